//! Lattice geometry: points, polygons and the area oracle.
//!
//! The evolution loop only needs one thing from geometry: given an ordered
//! list of integer points, either the area of the simple polygon they trace
//! or a reason why they do not trace one. That contract is
//! [`GeometryOracle`]; [`ShoelaceOracle`] is the exact implementation used
//! by default.

mod oracle;
mod types;

pub use oracle::{GeometryError, GeometryOracle, ShoelaceOracle};
pub use types::{random_triangle, Point, Polygon};
