//! Error types for the bunting simulator.
//!
//! All crates return `BuntingResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the bunting simulator.
#[derive(Debug, Error)]
pub enum BuntingError {
    /// Grid resolution is too small to form a single quad.
    #[error("Invalid resolution {width_points}x{height_points}: both must be >= 2")]
    InvalidResolution {
        width_points: u32,
        height_points: u32,
    },

    /// Corner placement or drop height produces coincident points.
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Material constant is out of valid range.
    #[error("Invalid material parameter: {0}")]
    InvalidMaterial(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Mesh buffers are malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BuntingError {
    /// True for errors raised while building a cloth from its parameters.
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            BuntingError::InvalidResolution { .. }
                | BuntingError::DegenerateGeometry(_)
                | BuntingError::InvalidMaterial(_)
        )
    }
}

/// Convenience alias for `Result<T, BuntingError>`.
pub type BuntingResult<T> = Result<T, BuntingError>;
