//! Progress reporting.
//!
//! The runner hands a [`GenerationStats`] to a [`PresentationSink`] once per
//! generation. Sinks are purely observational: nothing they do feeds back
//! into the search.
//!
//! - [`LogSink`]: one structured `tracing` event per generation
//! - [`ChartSink`]: keeps the history and writes an SVG fitness chart when
//!   the final generation arrives
//! - [`NullSink`]: discards everything
//!
//! A pair `(A, B)` of sinks reports to both, in order.

use crate::error::{Error, Result};
use crate::ga::{GenerationStats, Individual};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// File written by [`ChartSink::default`].
pub const DEFAULT_CHART_PATH: &str = "evolution_overview.svg";

const CHART_WIDTH: u32 = 800;
const CHART_HEIGHT: u32 = 500;

/// Receives per-generation statistics.
pub trait PresentationSink {
    /// Called once per generation, in order.
    fn render(&mut self, stats: &GenerationStats) -> Result<()>;
}

impl<S: PresentationSink + ?Sized> PresentationSink for &mut S {
    fn render(&mut self, stats: &GenerationStats) -> Result<()> {
        (**self).render(stats)
    }
}

impl<A: PresentationSink, B: PresentationSink> PresentationSink for (A, B) {
    fn render(&mut self, stats: &GenerationStats) -> Result<()> {
        self.0.render(stats)?;
        self.1.render(stats)
    }
}

/// Discards all reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn render(&mut self, _stats: &GenerationStats) -> Result<()> {
        Ok(())
    }
}

/// Emits one `info` event per generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl PresentationSink for LogSink {
    fn render(&mut self, stats: &GenerationStats) -> Result<()> {
        tracing::info!(
            generation = stats.generation,
            generation_avg = stats.generation_avg,
            selected_avg = stats.selected_avg,
            top_fitness = stats.top_fitness,
            failures = stats.failures,
            mutations = stats.mutations,
            best = %stats.best_label,
            "generation"
        );
        Ok(())
    }
}

/// Accumulates the fitness history and writes it as an SVG chart on the
/// final generation.
#[derive(Debug, Clone)]
pub struct ChartSink {
    path: PathBuf,
    history: Vec<GenerationStats>,
}

impl ChartSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            history: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }
}

impl Default for ChartSink {
    fn default() -> Self {
        Self::new(DEFAULT_CHART_PATH)
    }
}

impl PresentationSink for ChartSink {
    fn render(&mut self, stats: &GenerationStats) -> Result<()> {
        self.history.push(stats.clone());
        if !stats.is_final {
            return Ok(());
        }

        let svg = render_chart(&self.history, CHART_WIDTH, CHART_HEIGHT);
        std::fs::write(&self.path, svg).map_err(|source| Error::Snapshot {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), "chart written");
        Ok(())
    }
}

/// Renders the history as an SVG line chart.
///
/// Three filled series (top fitness, selected average, generation average)
/// are drawn over the generation axis. Every generation where top fitness
/// changes gets a marker annotated with the best individual's label.
pub fn render_chart(history: &[GenerationStats], width: u32, height: u32) -> String {
    const MARGIN_LEFT: f64 = 64.0;
    const MARGIN_RIGHT: f64 = 24.0;
    const MARGIN_TOP: f64 = 40.0;
    const MARGIN_BOTTOM: f64 = 48.0;

    let (w, h) = (width as f64, height as f64);
    let plot_w = (w - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
    let plot_h = (h - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);

    let values = history
        .iter()
        .flat_map(|s| [s.top_fitness, s.selected_avg, s.generation_avg]);
    let y_min = values.clone().fold(0.0_f64, f64::min);
    let y_max = values.fold(1.0_f64, f64::max);
    let x_max = history.len().saturating_sub(1).max(1) as f64;

    let x_of = |g: usize| MARGIN_LEFT + g as f64 / x_max * plot_w;
    let y_of = |v: f64| MARGIN_TOP + (y_max - v) / (y_max - y_min) * plot_h;
    let baseline = y_of(y_min.max(0.0));

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="monospace">"#
    );
    let _ = writeln!(svg, r#"  <rect width="{width}" height="{height}" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"  <text x="{:.1}" y="24" text-anchor="middle" font-size="15">Area Optimization Of Polygon Creatures</text>"#,
        w / 2.0
    );

    let series: [(&str, &str, &str, fn(&GenerationStats) -> f64); 3] = [
        ("top fitness", "darkgrey", "", |s| s.top_fitness),
        ("selected avg fitness", "lightgrey", "", |s| s.selected_avg),
        ("generation avg fitness", "gainsboro", "2,3", |s| s.generation_avg),
    ];
    for (name, fill, dash, value) in series {
        if history.is_empty() {
            break;
        }
        let line: Vec<String> = history
            .iter()
            .enumerate()
            .map(|(g, s)| format!("{:.2},{:.2}", x_of(g), y_of(value(s))))
            .collect();
        let area = format!(
            "{:.2},{baseline:.2} {} {:.2},{baseline:.2}",
            x_of(0),
            line.join(" "),
            x_of(history.len() - 1)
        );
        let _ = writeln!(svg, r#"  <polygon points="{area}" fill="{fill}" stroke="none"/>"#);
        let _ = writeln!(
            svg,
            r#"  <polyline points="{}" fill="none" stroke="darkgrey" stroke-width="1" stroke-dasharray="{dash}"><title>{name}</title></polyline>"#,
            line.join(" ")
        );
    }

    for (g, s) in history.iter().enumerate() {
        let changed = g == 0 || history[g - 1].top_fitness != s.top_fitness;
        if !changed {
            continue;
        }
        let (x, y) = (x_of(g), y_of(s.top_fitness));
        let _ = writeln!(
            svg,
            r#"  <circle cx="{x:.2}" cy="{y:.2}" r="4" fill="steelblue" stroke="darkslategrey" stroke-width="1"/>"#
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{x:.2}" y="{:.2}" font-size="10" fill="darkslategrey" transform="rotate(45 {x:.2} {:.2})">{}</text>"#,
            y + 8.0,
            y + 8.0,
            escape_xml(&s.best_label)
        );
    }

    // axes
    let (x0, x1) = (MARGIN_LEFT, MARGIN_LEFT + plot_w);
    let (y0, y1) = (MARGIN_TOP, MARGIN_TOP + plot_h);
    let _ = writeln!(
        svg,
        r#"  <polyline points="{x0:.2},{y0:.2} {x0:.2},{y1:.2} {x1:.2},{y1:.2}" fill="none" stroke="black" stroke-width="1"/>"#
    );
    let _ = writeln!(
        svg,
        r#"  <text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="12">Generation</text>"#,
        (x0 + x1) / 2.0,
        h - 12.0
    );
    let _ = writeln!(
        svg,
        r#"  <text x="16" y="{:.2}" text-anchor="middle" font-size="12" transform="rotate(-90 16 {:.2})">Fitness</text>"#,
        (y0 + y1) / 2.0,
        (y0 + y1) / 2.0
    );
    let _ = writeln!(
        svg,
        r#"  <text x="{:.2}" y="{:.2}" text-anchor="end" font-size="10">{y_max:.0}</text>"#,
        x0 - 6.0,
        y0 + 4.0
    );
    let _ = writeln!(
        svg,
        r#"  <text x="{:.2}" y="{:.2}" text-anchor="end" font-size="10">{y_min:.0}</text>"#,
        x0 - 6.0,
        y1
    );
    let _ = writeln!(
        svg,
        r#"  <text x="{x1:.2}" y="{:.2}" text-anchor="end" font-size="10">{}</text>"#,
        y1 + 16.0,
        history.len().saturating_sub(1)
    );

    svg.push_str("</svg>\n");
    svg
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Multi-line description of an individual.
///
/// ```text
/// ID:         17
/// label:      G3, brave otter
/// genome:     [12.34, 56.78, ...]
/// phenotype:  [[12, 56], ...]
/// fitness:    1234.5
/// ```
pub fn format_individual(individual: &Individual) -> String {
    let genome: Vec<String> = individual
        .genome()
        .iter()
        .map(|g| format!("{g:.2}"))
        .collect();
    let phenotype: Vec<String> = individual
        .phenotype()
        .iter()
        .map(ToString::to_string)
        .collect();

    format!(
        "ID:         {}\nlabel:      {}\ngenome:     [{}]\nphenotype:  [{}]\nfitness:    {}",
        individual.id(),
        individual.label(),
        genome.join(", "),
        phenotype.join(", "),
        individual.fitness()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(generation: usize, top: f64, is_final: bool) -> GenerationStats {
        GenerationStats {
            generation,
            generation_avg: top / 4.0,
            selected_avg: top / 2.0,
            top_fitness: top,
            failures: 0,
            mutations: 1,
            best_id: generation as u64,
            best_label: format!("G{generation}, brave <otter>"),
            is_final,
        }
    }

    #[test]
    fn test_chart_written_only_on_final() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        let mut sink = ChartSink::new(&path);

        sink.render(&stats(0, 100.0, false)).unwrap();
        sink.render(&stats(1, 250.0, false)).unwrap();
        assert!(!path.exists());

        sink.render(&stats(2, 250.0, true)).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.starts_with("<svg"));
        assert_eq!(sink.history().len(), 3);
    }

    #[test]
    fn test_chart_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("chart.svg");
        let mut sink = ChartSink::new(&path);
        let err = sink.render(&stats(0, 1.0, true)).unwrap_err();
        assert!(matches!(err, Error::Snapshot { .. }));
    }

    #[test]
    fn test_render_chart_markers_on_change() {
        let history = vec![
            stats(0, 100.0, false),
            stats(1, 100.0, false),
            stats(2, 300.0, false),
            stats(3, 300.0, true),
        ];
        let svg = render_chart(&history, 800, 500);
        assert_eq!(svg.matches("<circle").count(), 2);
        assert_eq!(svg.matches("<polyline").count(), 4);
        assert!(svg.contains("G2, brave &lt;otter&gt;"));
        assert!(!svg.contains("<otter>"));
    }

    #[test]
    fn test_render_chart_empty_history() {
        let svg = render_chart(&[], 400, 300);
        assert!(svg.contains("</svg>"));
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn test_default_chart_path() {
        assert_eq!(ChartSink::default().path(), Path::new(DEFAULT_CHART_PATH));
    }

    #[test]
    fn test_pair_sink_reports_to_both() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.svg");
        let b = dir.path().join("b.svg");
        let mut sink = (ChartSink::new(&a), ChartSink::new(&b));
        sink.render(&stats(0, 5.0, true)).unwrap();
        assert!(a.exists() && b.exists());
    }

    #[test]
    fn test_format_individual() {
        let mut ind = Individual::new(17, vec![12.344, 56.78, 0.0, 3.5, 9.99, 1.0]);
        ind.set_label("G3, brave otter".into());
        ind.set_fitness(42.5);
        let text = format_individual(&ind);
        assert_eq!(
            text,
            "ID:         17\n\
             label:      G3, brave otter\n\
             genome:     [12.34, 56.78, 0.00, 3.50, 9.99, 1.00]\n\
             phenotype:  [[12, 56], [0, 3], [9, 1]]\n\
             fitness:    42.5"
        );
    }
}
