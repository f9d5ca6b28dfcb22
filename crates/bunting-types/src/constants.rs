//! Physical constants and cloth material defaults.

use crate::scalar::Scalar;

/// Gravitational acceleration (m/s²).
pub const GRAVITY: Scalar = 9.81;

/// Default frame timestep (seconds). 1/60th of a second.
pub const DEFAULT_FRAME_DT: Scalar = 1.0 / 60.0;

/// Default number of integration sub-steps per frame.
pub const DEFAULT_SUB_STEPS: u32 = 16;

/// Fraction of the implicit Verlet velocity removed every step.
pub const DEFAULT_DAMPING: Scalar = 0.002;

/// Areal density of the cloth (kg/m²).
pub const DEFAULT_DENSITY: Scalar = 150.0;

/// Hooke stiffness shared by every spring of a cloth.
pub const DEFAULT_STIFFNESS: Scalar = 5000.0;

/// Force weight applied to bending springs relative to the others.
pub const DEFAULT_BENDING_WEIGHT: Scalar = 0.2;

/// Springs shorter than this at rest are rejected at construction.
pub const MIN_REST_LENGTH: Scalar = 1.0e-9;

/// Vectors shorter than this normalize to zero.
pub const NORMALIZE_EPSILON: Scalar = 1.0e-12;
