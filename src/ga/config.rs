//! Evolution configuration.
//!
//! [`EvolutionConfig`] holds every parameter of the evolutionary loop. It is
//! passed explicitly to the runner; nothing is read from global state.

use super::types::{GeneRange, GENES_PER_POINT};
use crate::error::{Error, Result};

/// Configuration for the polygon evolution loop.
///
/// # Defaults
///
/// ```
/// use polyevo::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.generations, 30);
/// assert_eq!(config.genome_length(), 6);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use polyevo::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default()
///     .with_population_size(200)
///     .with_points(5)
///     .with_retain_fraction(0.1)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EvolutionConfig {
    /// Number of individuals restored after every crossover.
    pub population_size: usize,

    /// Fixed number of generations; there is no early stop.
    pub generations: usize,

    /// Polygon vertex count. The genome holds two genes per vertex.
    pub points: usize,

    /// Fraction of the sorted population kept as parents (0.0–1.0].
    ///
    /// At least one individual always survives.
    pub retain_fraction: f64,

    /// Per-individual probability of a single-gene mutation (0.0–1.0).
    pub mutation_rate: f64,

    /// Range every gene is drawn from.
    pub gene_range: GeneRange,

    /// Evaluate fitness on the rayon thread pool.
    ///
    /// Only honoured with the `parallel` feature. Results are identical
    /// either way since evaluation consumes no randomness.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 30,
            points: 3,
            retain_fraction: 0.2,
            mutation_rate: 0.1,
            gene_range: GeneRange::default(),
            parallel: false,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    pub fn with_points(mut self, n: usize) -> Self {
        self.points = n;
        self
    }

    pub fn with_retain_fraction(mut self, fraction: f64) -> Self {
        self.retain_fraction = fraction;
        self
    }

    /// Sets the mutation rate, clamped to `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_gene_range(mut self, min: f64, max: f64) -> Self {
        self.gene_range = GeneRange::new(min, max);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Genome length: two genes per polygon vertex.
    pub fn genome_length(&self) -> usize {
        self.points * GENES_PER_POINT
    }

    /// Whether fitness evaluation actually runs on the rayon pool: the flag
    /// is set and the crate was built with the `parallel` feature.
    pub fn parallel_enabled(&self) -> bool {
        self.parallel && cfg!(feature = "parallel")
    }

    /// Number of survivors kept from a population of `len` individuals.
    pub fn retain_count(&self, len: usize) -> usize {
        super::selection::retain_count(len, self.retain_fraction)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(invalid("population_size must be at least 2"));
        }
        if self.generations == 0 {
            return Err(invalid("generations must be at least 1"));
        }
        if self.points < 3 {
            return Err(invalid("points must be at least 3 to form a polygon"));
        }
        if !(self.retain_fraction > 0.0 && self.retain_fraction <= 1.0) {
            return Err(invalid("retain_fraction must be in (0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(invalid("mutation_rate must be in [0, 1]"));
        }
        if !self.gene_range.is_valid() {
            return Err(invalid(
                "gene_range must lie within ±1e9 with max at least 0.01 above min",
            ));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> Error {
    Error::InvalidConfig(msg.to_string())
}
