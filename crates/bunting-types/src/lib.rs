//! # bunting-types
//!
//! Shared types, identifiers, error types, and physical constants
//! for the bunting cloth simulator.
//!
//! No simulation logic lives here; every other crate depends on it
//! for a common vocabulary.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{BuntingError, BuntingResult};
pub use ids::{MaterialId, PointMassId};
pub use scalar::Scalar;
