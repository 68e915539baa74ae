//! Construction-time configuration errors
//!
//! Every check happens in `Simulation::configure`; once a simulation exists,
//! stepping and snapshotting cannot fail.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("interaction matrix has no rows")]
    EmptyMatrix,

    #[error("interaction matrix row {row} has {len} entries, expected {expected}")]
    RaggedMatrix { row: usize, len: usize, expected: usize },

    #[error("type_count is {type_count} but the interaction matrix is {matrix_size}x{matrix_size}")]
    TypeCountMismatch { type_count: usize, matrix_size: usize },

    #[error("particle {index} has type {kind}, valid types are 0..{type_count}")]
    TypeOutOfRange { index: usize, kind: usize, type_count: usize },

    #[error("mass must be positive and finite, got {value} ({context})")]
    NonPositiveMass { value: f64, context: &'static str },

    #[error("invalid radius {value} ({context})")]
    InvalidRadius { value: f64, context: &'static str },

    #[error("cell_size must be positive, got {0}")]
    NonPositiveCellSize(f64),

    #[error("world bounds are empty: min {min:?}, max {max:?}")]
    EmptyBounds { min: [f64; 2], max: [f64; 2] },

    #[error("world bounds must be finite: min {min:?}, max {max:?}")]
    NonFiniteBounds { min: [f64; 2], max: [f64; 2] },

    #[error("a {cols}x{rows} grid exceeds the limit of {limit} cells, raise cell_size")]
    GridTooLarge { cols: f64, rows: f64, limit: usize },

    #[error("particle {index} has a non-finite {field}: {value:?}")]
    NonFiniteBody { index: usize, field: &'static str, value: [f64; 2] },

    #[error("particle {index} (radius {radius}) does not fit inside the world bounds")]
    ParticleTooLarge { index: usize, radius: f64 },

    #[error("{name} must lie in {range}, got {value}")]
    OutOfRange { name: &'static str, range: &'static str, value: f64 },
}
