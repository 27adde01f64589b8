//! End-to-end runs through the public API.

use polyevo::ga::{EvolutionConfig, EvolutionRunner, FAILED_FITNESS};
use polyevo::geometry::{GeometryOracle, ShoelaceOracle};
use polyevo::labels::NameLists;
use polyevo::report::{format_individual, ChartSink, LogSink, NullSink};
use std::io::Write;

fn small_config() -> EvolutionConfig {
    EvolutionConfig::default()
        .with_population_size(4)
        .with_points(3)
        .with_generations(1)
        .with_retain_fraction(0.5)
        .with_seed(42)
}

#[test]
fn seeded_run_reproduces_best_individual() {
    let config = small_config();
    let names = NameLists::builtin();

    let a = EvolutionRunner::run(&config, &ShoelaceOracle, &names, &mut NullSink).unwrap();
    let b = EvolutionRunner::run(&config, &ShoelaceOracle, &names, &mut NullSink).unwrap();

    assert_eq!(a.best_fitness(), b.best_fitness());
    assert_eq!(a.best.phenotype(), b.best.phenotype());
    assert_eq!(a.best.genome(), b.best.genome());
    assert_eq!(a.best.label(), b.best.label());
    assert_eq!(format_individual(&a.best), format_individual(&b.best));
}

#[test]
fn best_fitness_matches_oracle() {
    let result = EvolutionRunner::run(
        &small_config().with_generations(5),
        &ShoelaceOracle,
        &NameLists::builtin(),
        &mut NullSink,
    )
    .unwrap();

    let measured = ShoelaceOracle
        .polygon_area(result.best.phenotype())
        .unwrap_or(FAILED_FITNESS);
    assert_eq!(result.best_fitness(), measured);
    assert_eq!(result.best.phenotype().len(), 3);
    assert_eq!(result.population.len(), 4);
}

#[test]
fn full_run_writes_chart_with_loaded_names() {
    let dir = tempfile::tempdir().unwrap();
    let adjectives = dir.path().join("adjectives.txt");
    let animals = dir.path().join("animals.txt");
    std::fs::File::create(&adjectives)
        .unwrap()
        .write_all(b"square\nround\n")
        .unwrap();
    std::fs::File::create(&animals)
        .unwrap()
        .write_all(b"pelican\n")
        .unwrap();
    let names = NameLists::load(&adjectives, &animals).unwrap();

    let chart = dir.path().join("evolution_overview.svg");
    let mut sink = (LogSink, ChartSink::new(&chart));
    let config = EvolutionConfig::default().with_generations(12).with_seed(2024);
    let result = EvolutionRunner::run(&config, &ShoelaceOracle, &names, &mut sink).unwrap();

    assert_eq!(result.history.len(), 12);
    assert_eq!(sink.1.history().len(), 12);
    let svg = std::fs::read_to_string(&chart).unwrap();
    assert!(svg.contains("pelican"));
    assert!(result.best.label().starts_with("G11, "));
    assert!(result.best.label().ends_with(" pelican"));
}
