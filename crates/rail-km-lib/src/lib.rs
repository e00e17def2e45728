//! Rail KM Library - Linear Referencing on Rail Reference Markers
//!
//! This library turns a planar point (national projected coordinates, meters) into a
//! kilometer position along one or more named rail lines, using the sparse, irregularly
//! spaced hectometer markers found around that point.
//!
//! # Architecture
//!
//! - **[`ReferenceMarker`]**: A geocoded marker (line id, kilometer geocode, position)
//! - **[`Segment`]**: Pair of geocode-adjacent markers and point projection onto it
//! - **[`engine`]**: Partitioning, ordering, segment construction and candidate selection
//! - **[`KilometerQuery`]**: Façade that fetches markers from a [`ReferencePointSource`]
//!   and runs the engine
//!
//! The engine is a pure function of its input: no I/O, no shared state.

pub mod engine;
mod marker;
mod query;
mod segment;
pub mod utils;

// Public API exports
pub use engine::{LineKilometer, find_line, locate};
pub use marker::ReferenceMarker;
pub use query::{DEFAULT_SEARCH_RADIUS_METERS, KilometerQuery, QueryConfig, ReferencePointSource};
pub use segment::{ProjectionResult, Segment};

/// Error types for the kilometer library
#[derive(Debug, thiserror::Error)]
pub enum KmError {
    #[error("Invalid coordinate: ({x}, {y})")]
    InvalidCoordinate { x: f64, y: f64 },

    #[error("Invalid reference marker on line {line_id}: {reason}")]
    InvalidMarker { line_id: String, reason: String },

    #[error("Reference point source failed: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, KmError>;
