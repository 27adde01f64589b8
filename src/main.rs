use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use polyevo::ga::{EvolutionConfig, EvolutionRunner};
use polyevo::geometry::{random_triangle, GeometryOracle, Polygon, ShoelaceOracle};
use polyevo::labels::NameLists;
use polyevo::random::rng_from_option;
use polyevo::report::{format_individual, ChartSink, LogSink, DEFAULT_CHART_PATH};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "polyevo")]
#[command(about = "Evolve polygons towards maximum area")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Run the genetic algorithm and write a fitness chart
    Evolve(EvolveArgs),
    /// Generate a random triangle and measure it
    Triangle {
        #[arg(long)]
        seed: Option<u64>,
        /// Also draw the triangle as SVG
        #[arg(long)]
        svg: Option<PathBuf>,
    },
}

#[derive(Args)]
struct EvolveArgs {
    /// JSON file with an EvolutionConfig; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    population: Option<usize>,
    #[arg(long)]
    generations: Option<usize>,
    /// Polygon vertex count
    #[arg(long)]
    points: Option<usize>,
    /// Fraction of each generation kept as parents
    #[arg(long)]
    retain: Option<f64>,
    #[arg(long)]
    mutation_rate: Option<f64>,
    #[arg(long)]
    seed: Option<u64>,
    /// Evaluate fitness in parallel (needs the `parallel` feature)
    #[arg(long)]
    parallel: bool,
    /// Line-delimited adjective list for labels
    #[arg(long, requires = "animals")]
    adjectives: Option<PathBuf>,
    /// Line-delimited animal list for labels
    #[arg(long, requires = "adjectives")]
    animals: Option<PathBuf>,
    /// Where the final fitness chart is written
    #[arg(long, default_value = DEFAULT_CHART_PATH)]
    chart: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cmd = Cmd::parse();
    match cmd.action {
        Action::Evolve(args) => evolve(args),
        Action::Triangle { seed, svg } => triangle(seed, svg),
    }
}

fn evolve(args: EvolveArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<EvolutionConfig>(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => EvolutionConfig::default(),
    };
    if let Some(n) = args.population {
        config.population_size = n;
    }
    if let Some(n) = args.generations {
        config.generations = n;
    }
    if let Some(n) = args.points {
        config.points = n;
    }
    if let Some(f) = args.retain {
        config.retain_fraction = f;
    }
    if let Some(r) = args.mutation_rate {
        config.mutation_rate = r;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.parallel |= args.parallel;
    config.validate()?;

    let names = match (&args.adjectives, &args.animals) {
        (Some(adjectives), Some(animals)) => NameLists::load(adjectives, animals)?,
        _ => NameLists::builtin(),
    };

    tracing::info!(
        population = config.population_size,
        generations = config.generations,
        points = config.points,
        seed = ?config.seed,
        "evolve"
    );
    let mut sink = (LogSink, ChartSink::new(&args.chart));
    let result = EvolutionRunner::run(&config, &ShoelaceOracle, &names, &mut sink)?;

    println!("{}", format_individual(&result.best));
    Ok(())
}

fn triangle(seed: Option<u64>, svg: Option<PathBuf>) -> Result<()> {
    let mut rng = rng_from_option(seed);
    let points = random_triangle(0..=100, &mut rng);
    let polygon = Polygon::new(points.to_vec());

    let listed: Vec<String> = points.iter().map(ToString::to_string).collect();
    println!("points: [{}]", listed.join(", "));
    match ShoelaceOracle.polygon_area(polygon.vertices()) {
        Ok(area) => println!("area:   {area}"),
        Err(err) => {
            tracing::warn!(error = %err, "could not build polygon");
            println!("area:   n/a ({err})");
        }
    }

    if let Some(path) = svg {
        std::fs::write(&path, polygon.to_svg(400, 400))
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "triangle drawn");
    }
    Ok(())
}
