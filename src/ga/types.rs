//! Core data types for the polygon GA.
//!
//! An [`Individual`] is a plain record: a genome of real-valued genes, the
//! integer polygon decoded from it, and the area-based fitness last measured
//! for that polygon. Behaviour that acts on individuals lives in free
//! functions ([`operators`](super::operators), [`select`](super::select),
//! [`format_individual`](crate::report::format_individual)).

use crate::geometry::Point;
use rand::Rng;

/// Fitness assigned when the phenotype does not form a valid polygon.
///
/// Also carried by individuals that have not been evaluated since their
/// genome last changed.
pub const FAILED_FITNESS: f64 = -1.0;

/// Number of genome values per decoded point (x, y).
pub const GENES_PER_POINT: usize = 2;

/// Half-open range `[min, max)` that every gene value is drawn from.
///
/// Values are quantized to hundredths, so a range must span at least
/// `0.01`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneRange {
    pub min: f64,
    pub max: f64,
}

impl GeneRange {
    /// Gene resolution: values are multiples of `1 / STEPS_PER_UNIT`.
    pub const STEPS_PER_UNIT: f64 = 100.0;

    /// Largest accepted absolute bound. Keeps the step count exact and
    /// decoded coordinates well inside `i64`.
    pub const MAX_MAGNITUDE: f64 = 1e9;

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Number of distinct values in the range.
    pub fn steps(&self) -> u64 {
        let span = (self.max - self.min) * Self::STEPS_PER_UNIT;
        if span.is_finite() && span >= 1.0 {
            span.floor() as u64
        } else {
            0
        }
    }

    /// Draws a uniformly distributed, quantized value from `[min, max)`.
    ///
    /// # Panics
    /// Panics if the range spans fewer than one step.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        let k = rng.random_range(0..self.steps());
        self.min + k as f64 / Self::STEPS_PER_UNIT
    }

    /// Whether both bounds lie within `±MAX_MAGNITUDE` and the range spans
    /// at least one step.
    pub fn is_valid(&self) -> bool {
        self.min.abs() <= Self::MAX_MAGNITUDE
            && self.max.abs() <= Self::MAX_MAGNITUDE
            && self.steps() > 0
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }
}

impl Default for GeneRange {
    fn default() -> Self {
        Self::new(0.0, 100.0)
    }
}

/// Decodes a genome into polygon vertices.
///
/// Consecutive gene pairs become `(x, y)`; each value is truncated toward
/// zero. A trailing unpaired gene is ignored.
pub fn decode_phenotype(genome: &[f64]) -> Vec<Point> {
    genome
        .chunks_exact(GENES_PER_POINT)
        .map(|pair| Point::new(pair[0] as i64, pair[1] as i64))
        .collect()
}

/// A candidate polygon.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    id: u64,
    label: String,
    genome: Vec<f64>,
    phenotype: Vec<Point>,
    fitness: f64,
}

impl Individual {
    /// Creates an unevaluated individual, decoding its phenotype.
    pub fn new(id: u64, genome: Vec<f64>) -> Self {
        let phenotype = decode_phenotype(&genome);
        Self {
            id,
            label: String::new(),
            genome,
            phenotype,
            fitness: FAILED_FITNESS,
        }
    }

    /// Creates an individual with `length` genes sampled from `range`.
    pub fn random<R: Rng>(id: u64, length: usize, range: &GeneRange, rng: &mut R) -> Self {
        let genome = (0..length).map(|_| range.sample(rng)).collect();
        Self::new(id, genome)
    }

    /// Stable identifier, unique within a run.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Cosmetic label; empty until the first labeling pass.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: String) {
        self.label = label;
    }

    pub fn genome(&self) -> &[f64] {
        &self.genome
    }

    pub fn phenotype(&self) -> &[Point] {
        &self.phenotype
    }

    /// Last measured fitness, or [`FAILED_FITNESS`].
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Overwrites one gene.
    ///
    /// The phenotype is re-decoded and the fitness reset to
    /// [`FAILED_FITNESS`] until the next evaluation.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn replace_gene(&mut self, index: usize, value: f64) {
        self.genome[index] = value;
        self.phenotype = decode_phenotype(&self.genome);
        self.fitness = FAILED_FITNESS;
    }
}

/// Hands out monotonically increasing individual ids.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}
