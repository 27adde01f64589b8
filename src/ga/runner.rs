//! Evolution loop execution.
//!
//! [`EvolutionRunner`] orchestrates a fixed number of generations:
//! evaluate → select → crossover → mutate → label → report.

use super::config::EvolutionConfig;
use super::operators::{
    assign_labels, average_fitness, crossover, evaluate_fitness, initialize, mutate,
};
use super::selection::{find_best, select};
use super::types::{IdAllocator, Individual, FAILED_FITNESS};
use crate::error::{Error, Result};
use crate::geometry::GeometryOracle;
use crate::labels::NameLists;
use crate::random::rng_from_option;
use crate::report::PresentationSink;
use tracing::instrument;

/// Statistics for one generation, as handed to a [`PresentationSink`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Zero-based generation index.
    pub generation: usize,

    /// Mean fitness of the whole evaluated population.
    pub generation_avg: f64,

    /// Mean fitness of the survivors of selection.
    pub selected_avg: f64,

    /// Fitness of the best survivor.
    pub top_fitness: f64,

    /// Individuals whose phenotype did not form a polygon.
    pub failures: usize,

    /// Individuals mutated after crossover.
    pub mutations: usize,

    /// Id of the best survivor.
    pub best_id: u64,

    /// Label given to the best survivor at the end of the generation.
    pub best_label: String,

    /// Whether this is the last generation of the run.
    pub is_final: bool,
}

/// Result of an evolution run.
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// Fittest individual of the final, re-evaluated population.
    pub best: Individual,

    /// The final population, evaluated.
    pub population: Vec<Individual>,

    /// One entry per generation.
    pub history: Vec<GenerationStats>,

    /// Number of generations executed.
    pub generations: usize,
}

impl EvolutionResult {
    pub fn best_fitness(&self) -> f64 {
        self.best.fitness()
    }
}

/// Executes the polygon evolution loop.
///
/// # Usage
///
/// ```
/// use polyevo::ga::{EvolutionConfig, EvolutionRunner};
/// use polyevo::geometry::ShoelaceOracle;
/// use polyevo::labels::NameLists;
/// use polyevo::report::NullSink;
///
/// let config = EvolutionConfig::default().with_generations(5).with_seed(42);
/// let result = EvolutionRunner::run(
///     &config,
///     &ShoelaceOracle,
///     &NameLists::builtin(),
///     &mut NullSink,
/// )?;
/// assert_eq!(result.history.len(), 5);
/// # Ok::<(), polyevo::Error>(())
/// ```
pub struct EvolutionRunner;

impl EvolutionRunner {
    /// Runs `config.generations` generations and returns the best
    /// individual of the final population.
    ///
    /// Fails on an invalid configuration or when the sink fails to
    /// report; geometry failures are absorbed into fitness.
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            population = config.population_size,
            generations = config.generations,
            points = config.points,
            seed = ?config.seed,
        )
    )]
    pub fn run<O, S>(
        config: &EvolutionConfig,
        oracle: &O,
        names: &NameLists,
        sink: &mut S,
    ) -> Result<EvolutionResult>
    where
        O: GeometryOracle + ?Sized,
        S: PresentationSink + ?Sized,
    {
        config.validate()?;
        let parallel = config.parallel_enabled();
        if config.parallel && !parallel {
            tracing::warn!("built without the `parallel` feature; evaluating sequentially");
        }

        let mut rng = rng_from_option(config.seed);
        let mut ids = IdAllocator::new();
        let mut history = Vec::with_capacity(config.generations);

        let mut population = initialize(config, &mut ids, &mut rng);

        for generation in 0..config.generations {
            let failures = evaluate_fitness(&mut population, oracle, parallel);
            let generation_avg = average_fitness(&population).unwrap_or(FAILED_FITNESS);

            let survivors = select(population, config.retain_fraction);
            let selected_avg = average_fitness(&survivors).unwrap_or(FAILED_FITNESS);
            let (top_fitness, best_id) = survivors
                .first()
                .map(|best| (best.fitness(), best.id()))
                .ok_or_else(|| Error::InvalidConfig("population died out".into()))?;

            population = crossover(survivors, config.population_size, &mut ids, &mut rng);
            let mutations = mutate(
                &mut population,
                config.mutation_rate,
                &config.gene_range,
                &mut rng,
            );
            assign_labels(&mut population, generation, names, &mut rng);

            let stats = GenerationStats {
                generation,
                generation_avg,
                selected_avg,
                top_fitness,
                failures,
                mutations,
                best_id,
                best_label: population[0].label().to_string(),
                is_final: generation + 1 == config.generations,
            };
            tracing::debug!(
                generation,
                top_fitness,
                failures,
                mutations,
                "generation complete"
            );
            sink.render(&stats)?;
            history.push(stats);
        }

        // Mutation after the last selection leaves stale fitness behind.
        evaluate_fitness(&mut population, oracle, parallel);
        let best = find_best(&population)
            .cloned()
            .ok_or_else(|| Error::InvalidConfig("population died out".into()))?;

        Ok(EvolutionResult {
            best,
            population,
            history,
            generations: config.generations,
        })
    }
}
