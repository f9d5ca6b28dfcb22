//! # bunting-math
//!
//! Vector primitives for the bunting cloth simulator.
//!
//! Provides:
//! - Re-exports of `glam` types (`DVec3` for particle state, `Vec3`/`Vec2` for mesh buffers)
//! - Guarded normalization that never yields NaN
//! - The edge-normalized face normal used for cloth shading

pub mod vector;

// Re-export glam types as the canonical math types for bunting.
pub use glam::{DVec2, DVec3, Vec2, Vec3};

pub use vector::{face_normal, safe_normalize, to_f32_array};
