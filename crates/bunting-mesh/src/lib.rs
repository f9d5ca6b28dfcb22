//! # bunting-mesh
//!
//! Triangle mesh buffers with Structure-of-Arrays (SoA) layout, in the
//! single precision a GPU upload expects.
//!
//! ## Key Types
//!
//! - [`SurfaceMesh`]: Positions, normals, texture coordinates, and indices.
//! - [`grid`]: Regular grid triangulation and texture coordinates.
//! - [`normals`]: Per-vertex normal accumulation from triangle faces.

pub mod grid;
pub mod mesh;
pub mod normals;

pub use mesh::SurfaceMesh;
