//! Genetic operators for the polygon GA.
//!
//! Each stage of a generation is a free function that takes the population
//! by value or by mutable slice and hands it on, so the runner threads one
//! population through the whole cycle.
//!
//! - [`initialize`]: random genomes
//! - [`evaluate_fitness`]: polygon area via a [`GeometryOracle`]
//! - [`crossover`]: single-point recombination until the population is full
//! - [`mutate`]: at most one gene resampled per individual
//! - [`assign_labels`]: cosmetic per-generation names

use super::config::EvolutionConfig;
use super::types::{GeneRange, IdAllocator, Individual, FAILED_FITNESS};
use crate::geometry::GeometryOracle;
use crate::labels::NameLists;
use rand::Rng;

/// Creates `config.population_size` individuals with random genomes.
pub fn initialize<R: Rng>(
    config: &EvolutionConfig,
    ids: &mut IdAllocator,
    rng: &mut R,
) -> Vec<Individual> {
    let length = config.genome_length();
    (0..config.population_size)
        .map(|_| Individual::random(ids.next_id(), length, &config.gene_range, rng))
        .collect()
}

/// Measures every individual's polygon area.
///
/// Individuals whose phenotype the oracle rejects get [`FAILED_FITNESS`];
/// the batch always completes. Returns the number of such failures.
pub fn evaluate_fitness<O>(population: &mut [Individual], oracle: &O, parallel: bool) -> usize
where
    O: GeometryOracle + ?Sized,
{
    if parallel {
        evaluate_parallel(population, oracle)
    } else {
        evaluate_sequential(population, oracle)
    }
}

fn evaluate_sequential<O: GeometryOracle + ?Sized>(
    population: &mut [Individual],
    oracle: &O,
) -> usize {
    population
        .iter_mut()
        .map(|ind| evaluate_one(ind, oracle))
        .filter(|ok| !ok)
        .count()
}

#[cfg(feature = "parallel")]
fn evaluate_parallel<O: GeometryOracle + ?Sized>(
    population: &mut [Individual],
    oracle: &O,
) -> usize {
    use rayon::prelude::*;

    population
        .par_iter_mut()
        .map(|ind| evaluate_one(ind, oracle))
        .filter(|ok| !*ok)
        .count()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_parallel<O: GeometryOracle + ?Sized>(
    population: &mut [Individual],
    oracle: &O,
) -> usize {
    evaluate_sequential(population, oracle)
}

/// Returns `false` when the oracle rejected the phenotype.
fn evaluate_one<O: GeometryOracle + ?Sized>(ind: &mut Individual, oracle: &O) -> bool {
    match oracle.polygon_area(ind.phenotype()) {
        Ok(area) => {
            ind.set_fitness(area);
            true
        }
        Err(err) => {
            tracing::debug!(id = ind.id(), error = %err, "could not build polygon");
            ind.set_fitness(FAILED_FITNESS);
            false
        }
    }
}

/// Arithmetic mean fitness, sentinel values included.
///
/// Returns `None` for an empty population.
pub fn average_fitness(population: &[Individual]) -> Option<f64> {
    if population.is_empty() {
        return None;
    }
    let total: f64 = population.iter().map(Individual::fitness).sum();
    Some(total / population.len() as f64)
}

/// Single-point crossover of two genomes at `split`.
///
/// Returns `(a[..split] ++ b[split..], b[..split] ++ a[split..])`.
///
/// # Panics
/// Panics if the genomes differ in length or `split` exceeds it.
pub fn single_point(a: &[f64], b: &[f64], split: usize) -> (Vec<f64>, Vec<f64>) {
    assert_eq!(a.len(), b.len(), "parents must have equal genome length");

    let mut first = Vec::with_capacity(a.len());
    first.extend_from_slice(&a[..split]);
    first.extend_from_slice(&b[split..]);

    let mut second = Vec::with_capacity(b.len());
    second.extend_from_slice(&b[..split]);
    second.extend_from_slice(&a[split..]);

    (first, second)
}

/// Refills `survivors` with offspring until it holds `target_size`
/// individuals.
///
/// Parents are drawn uniformly with replacement from the original
/// survivors; the split point is uniform over `[0, genome length]`. Each
/// pairing yields two complementary children. When only one slot is left
/// the second child is discarded, so the result is exactly `target_size`.
///
/// Survivors keep their positions at the front. An empty survivor set is
/// returned unchanged.
pub fn crossover<R: Rng>(
    mut survivors: Vec<Individual>,
    target_size: usize,
    ids: &mut IdAllocator,
    rng: &mut R,
) -> Vec<Individual> {
    let parents = survivors.len();
    if parents == 0 {
        return survivors;
    }
    survivors.reserve(target_size.saturating_sub(parents));

    while survivors.len() < target_size {
        let p1 = &survivors[rng.random_range(0..parents)];
        let p2 = &survivors[rng.random_range(0..parents)];
        let split = rng.random_range(0..=p1.genome().len());
        let (g1, g2) = single_point(p1.genome(), p2.genome(), split);

        survivors.push(Individual::new(ids.next_id(), g1));
        if survivors.len() < target_size {
            survivors.push(Individual::new(ids.next_id(), g2));
        }
    }

    survivors
}

/// Resamples one random gene of each individual with probability
/// `mutation_rate`.
///
/// Returns how many individuals were mutated.
///
/// # Panics
/// Panics if `mutation_rate` is outside `[0, 1]`.
pub fn mutate<R: Rng>(
    population: &mut [Individual],
    mutation_rate: f64,
    range: &GeneRange,
    rng: &mut R,
) -> usize {
    let mut mutated = 0;
    for ind in population.iter_mut() {
        if ind.genome().is_empty() || !rng.random_bool(mutation_rate) {
            continue;
        }
        let pos = rng.random_range(0..ind.genome().len());
        ind.replace_gene(pos, range.sample(rng));
        mutated += 1;
    }
    mutated
}

/// Gives every individual a fresh `G{generation}, {adjective} {animal}`
/// label.
pub fn assign_labels<R: Rng>(
    population: &mut [Individual],
    generation: usize,
    names: &NameLists,
    rng: &mut R,
) {
    for ind in population.iter_mut() {
        ind.set_label(names.label(generation, rng));
    }
}
