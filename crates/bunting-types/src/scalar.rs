//! Scalar type alias for particle state.
//!
//! Positions and forces are integrated in double precision. Fine
//! sub-stepping multiplies tiny `dt²` terms into large coordinates and
//! single precision drifts visibly there. Mesh buffers handed to the
//! renderer stay `f32`.

/// The floating-point type used for all point-mass state.
pub type Scalar = f64;
