//! Genetic algorithm for polygon area.
//!
//! Individuals carry a real-valued genome that decodes into an integer
//! polygon; fitness is the polygon's area as measured by a
//! [`GeometryOracle`](crate::geometry::GeometryOracle). Each generation runs
//! evaluate → select → crossover → mutate for a fixed number of rounds.
//!
//! # Key Types
//!
//! - [`EvolutionConfig`]: Loop parameters (population, rates, gene range, seed)
//! - [`EvolutionRunner`]: Executes the generational loop
//! - [`EvolutionResult`]: Best individual, final population, per-generation history
//! - [`Individual`]: Genome, decoded phenotype and fitness
//!
//! # Submodules
//!
//! - [`operators`]: The individual stages as free functions
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::EvolutionConfig;
pub use runner::{EvolutionResult, EvolutionRunner, GenerationStats};
pub use selection::{find_best, retain_count, select, sort_by_fitness};
pub use types::{
    decode_phenotype, GeneRange, IdAllocator, Individual, FAILED_FITNESS, GENES_PER_POINT,
};
