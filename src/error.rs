//! Crate-level error type.
//!
//! Geometry failures are not part of this enum: they are recovered inside
//! fitness evaluation and live in [`crate::geometry::GeometryError`].

use std::path::PathBuf;

/// Fatal errors raised by configuration, name-list loading and reporting.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to read name list {path}: {source}")]
    NameList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Names the list: its file path when loaded, or `adjectives`/`animals`
    /// when built in memory.
    #[error("name list {0} contains no names")]
    EmptyNameList(String),
    #[error("failed to write snapshot {path}: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
