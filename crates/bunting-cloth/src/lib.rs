//! # bunting-cloth
//!
//! Mass-spring cloth: a grid of point masses joined by springs, advanced
//! with damped Verlet integration, and a derived triangle mesh regenerated
//! from the particle state on request.
//!
//! ## Key Types
//!
//! - [`Cloth`]: Owns the point masses, springs, and derived meshes
//! - [`PointMass`]: Particle with rest position, pin flag, and Verlet state
//! - [`Spring`]: Index-based constraint between two point masses
//! - [`ClothMaterial`]: Damping, density, stiffness, pinning policy
//!
//! ```
//! use bunting_cloth::Cloth;
//! use bunting_math::DVec3;
//!
//! let mut cloth = Cloth::new(DVec3::new(0.0, 2.0, 0.0), DVec3::new(1.5, 2.0, 0.0), 1.0, 12, 8)?;
//! cloth.simulate(1.0 / 60.0, 16, &[DVec3::new(0.0, -9.81, 0.0)]);
//! cloth.recompute();
//! assert_eq!(cloth.mesh().vertex_count(), 96);
//! # Ok::<(), bunting_types::BuntingError>(())
//! ```

pub mod cloth;
pub mod config;
pub mod construction;
pub mod point_mass;
pub mod spring;

pub use cloth::{Cloth, ClothState};
pub use config::{ClothMaterial, PinPolicy};
pub use point_mass::PointMass;
pub use spring::{ConstraintKind, Spring, SpringFamily};
