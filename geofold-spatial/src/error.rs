//! Error types for spatial-union aggregation.

use thiserror::Error;

/// Spatial aggregation errors.
#[derive(Error, Debug)]
pub enum GeofoldError {
    /// WKT parsing error.
    #[error("WKT parse error: {0}")]
    WktParse(String),

    /// Geometries with different spatial references were combined.
    #[error("Spatial reference mismatch: srid {left} vs srid {right}")]
    ReferenceMismatch { left: i32, right: i32 },

    /// Geometry not usable by the union engine (non-polygonal type, etc.).
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Binary frame error (corrupt, truncated, or incompatible version).
    #[error("Encoding format error: {0}")]
    Format(String),

    /// A lower-level failure surfaced mid-aggregation.
    ///
    /// Carries the phase or operation that was executing and the original
    /// cause, so the execution engine can fail the enclosing task with
    /// full context.
    #[error("Aggregation failed in {phase}: {source}")]
    Aggregation {
        phase: &'static str,
        #[source]
        source: Box<GeofoldError>,
    },
}

impl GeofoldError {
    /// Wrap a lower-level error as an aggregation failure in `phase`.
    pub fn in_phase(phase: &'static str, source: GeofoldError) -> Self {
        GeofoldError::Aggregation {
            phase,
            source: Box::new(source),
        }
    }
}

/// Result type for spatial aggregation operations.
pub type Result<T> = std::result::Result<T, GeofoldError>;
