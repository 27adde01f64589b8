//! Truncation selection.
//!
//! The population is ranked by fitness (highest area first) and only the top
//! fraction is carried into the next generation as parents. Ranking uses a
//! stable sort so equal fitness keeps the original order.

use super::types::Individual;
use std::cmp::Ordering;

/// Number of survivors for a population of `len` at `retain_fraction`.
///
/// Truncates toward zero but never below one survivor for a non-empty
/// population, and never above `len`.
pub fn retain_count(len: usize, retain_fraction: f64) -> usize {
    if len == 0 {
        return 0;
    }
    let n = (len as f64 * retain_fraction) as usize;
    n.clamp(1, len)
}

/// Keeps the fittest `retain_fraction` of `population`, best first.
///
/// Fitness values are read as they are; callers evaluate the population
/// first.
pub fn select(mut population: Vec<Individual>, retain_fraction: f64) -> Vec<Individual> {
    sort_by_fitness(&mut population);
    let keep = retain_count(population.len(), retain_fraction);
    population.truncate(keep);
    population
}

/// Stable sort, highest fitness first.
pub fn sort_by_fitness(population: &mut [Individual]) {
    population.sort_by(|a, b| {
        b.fitness()
            .partial_cmp(&a.fitness())
            .unwrap_or(Ordering::Equal)
    });
}

/// The fittest individual; the earliest one wins ties.
pub fn find_best(population: &[Individual]) -> Option<&Individual> {
    population.iter().fold(None, |best, ind| match best {
        Some(b) if b.fitness() >= ind.fitness() => Some(b),
        _ => Some(ind),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::types::FAILED_FITNESS;
    use proptest::prelude::*;

    fn make_population(fitnesses: &[f64]) -> Vec<Individual> {
        fitnesses
            .iter()
            .enumerate()
            .map(|(i, &f)| {
                let mut ind = Individual::new(i as u64, vec![0.0; 6]);
                ind.set_fitness(f);
                ind
            })
            .collect()
    }

    fn ids(population: &[Individual]) -> Vec<u64> {
        population.iter().map(|i| i.id()).collect()
    }

    #[test]
    fn test_retain_count_truncates() {
        assert_eq!(retain_count(50, 0.2), 10);
        assert_eq!(retain_count(9, 0.5), 4);
        assert_eq!(retain_count(10, 1.0), 10);
    }

    #[test]
    fn test_retain_count_at_least_one() {
        assert_eq!(retain_count(4, 0.2), 1);
        assert_eq!(retain_count(1, 0.01), 1);
        assert_eq!(retain_count(0, 0.5), 0);
    }

    #[test]
    fn test_select_keeps_top_fraction() {
        let pop = make_population(&[5.0, 40.0, FAILED_FITNESS, 12.0, 30.0, 1.0, 0.5, 8.0, 2.0, 3.0]);
        let survivors = select(pop, 0.2);
        assert_eq!(ids(&survivors), vec![1, 4]);
    }

    #[test]
    fn test_select_ties_keep_original_order() {
        let pop = make_population(&[7.0, 9.0, 7.0, 9.0, 7.0, 1.0]);
        let survivors = select(pop, 1.0);
        assert_eq!(ids(&survivors), vec![1, 3, 0, 2, 4, 5]);
    }

    #[test]
    fn test_select_guarantees_one_survivor() {
        let pop = make_population(&[1.0, 3.0, 2.0]);
        let survivors = select(pop, 0.1);
        assert_eq!(ids(&survivors), vec![1]);
    }

    #[test]
    fn test_select_empty() {
        assert!(select(Vec::new(), 0.5).is_empty());
    }

    #[test]
    fn test_failed_individuals_rank_last() {
        let pop = make_population(&[FAILED_FITNESS, 0.5, FAILED_FITNESS]);
        let survivors = select(pop, 1.0);
        assert_eq!(ids(&survivors), vec![1, 0, 2]);
    }

    #[test]
    fn test_find_best_first_of_ties() {
        let pop = make_population(&[3.0, 8.0, 8.0, 1.0]);
        assert_eq!(find_best(&pop).map(|i| i.id()), Some(1));
        assert!(find_best(&[]).is_none());
    }

    proptest! {
        #[test]
        fn prop_select_sorted_and_not_larger(
            fitnesses in prop::collection::vec(-1.0f64..10_000.0, 0..60),
            fraction in 0.01f64..=1.0,
        ) {
            let len = fitnesses.len();
            let survivors = select(make_population(&fitnesses), fraction);
            prop_assert!(survivors.len() <= len);
            prop_assert_eq!(survivors.len(), retain_count(len, fraction));
            for pair in survivors.windows(2) {
                prop_assert!(pair[0].fitness() >= pair[1].fitness());
            }
        }
    }
}
