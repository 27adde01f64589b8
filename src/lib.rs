//! Toy genetic algorithm that evolves polygons towards maximum area.
//!
//! - **Evolution loop** ([`ga`]): a population of genomes is decoded into
//!   integer polygons, scored by area, truncated to its fittest fraction,
//!   refilled by single-point crossover and mutated, for a fixed number of
//!   generations.
//! - **Geometry** ([`geometry`]): the area oracle. Invalid polygons
//!   (too few vertices, duplicate vertices, self-intersection, zero area)
//!   are reported as errors and scored with a sentinel fitness.
//! - **Reporting** ([`report`]): per-generation statistics to structured
//!   logs and an SVG fitness chart.
//! - **Labels** ([`labels`]): cosmetic "adjective animal" names for
//!   individuals.
//!
//! # Example
//!
//! ```
//! use polyevo::ga::{EvolutionConfig, EvolutionRunner};
//! use polyevo::geometry::ShoelaceOracle;
//! use polyevo::labels::NameLists;
//! use polyevo::report::{format_individual, LogSink};
//!
//! let config = EvolutionConfig::default().with_generations(10).with_seed(7);
//! let result = EvolutionRunner::run(&config, &ShoelaceOracle, &NameLists::builtin(), &mut LogSink)?;
//! println!("{}", format_individual(&result.best));
//! # Ok::<(), polyevo::Error>(())
//! ```

mod error;
pub mod ga;
pub mod geometry;
pub mod labels;
pub mod random;
pub mod report;

pub use error::{Error, Result};
