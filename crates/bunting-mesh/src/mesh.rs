//! Core surface mesh type with SoA (Structure of Arrays) layout.
//!
//! ```text
//! pos_x: [x0, x1, x2, ...]
//! pos_y: [y0, y1, y2, ...]
//! pos_z: [z0, z1, z2, ...]
//! ```
//!
//! Index and texture-coordinate buffers are written once. Positions and
//! normals are overwritten in place every frame, so a renderer only has to
//! re-upload those two attributes.

use bunting_types::{BuntingError, BuntingResult, MaterialId};
use serde::{Deserialize, Serialize};

/// A triangle mesh stored in Structure-of-Arrays layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMesh {
    // --- Vertex data (SoA) ---
    pub pos_x: Vec<f32>,
    pub pos_y: Vec<f32>,
    pub pos_z: Vec<f32>,

    pub normal_x: Vec<f32>,
    pub normal_y: Vec<f32>,
    pub normal_z: Vec<f32>,

    pub uv_u: Vec<f32>,
    pub uv_v: Vec<f32>,

    // --- Triangle data ---
    /// Flat triangle list: `[t0v0, t0v1, t0v2, t1v0, ...]`.
    pub indices: Vec<u32>,

    /// Material the renderer binds for the whole mesh.
    pub material_id: MaterialId,
}

impl SurfaceMesh {
    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            pos_x: Vec::with_capacity(vertex_capacity),
            pos_y: Vec::with_capacity(vertex_capacity),
            pos_z: Vec::with_capacity(vertex_capacity),
            normal_x: Vec::with_capacity(vertex_capacity),
            normal_y: Vec::with_capacity(vertex_capacity),
            normal_z: Vec::with_capacity(vertex_capacity),
            uv_u: Vec::with_capacity(vertex_capacity),
            uv_v: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(triangle_capacity * 3),
            material_id: MaterialId::default(),
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn position(&self, i: usize) -> [f32; 3] {
        [self.pos_x[i], self.pos_y[i], self.pos_z[i]]
    }

    #[inline]
    pub fn normal(&self, i: usize) -> [f32; 3] {
        [self.normal_x[i], self.normal_y[i], self.normal_z[i]]
    }

    #[inline]
    pub fn tex_coord(&self, i: usize) -> [f32; 2] {
        [self.uv_u[i], self.uv_v[i]]
    }

    /// Returns the three vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Overwrites the position of vertex `i`.
    #[inline]
    pub fn set_position(&mut self, i: usize, p: [f32; 3]) {
        self.pos_x[i] = p[0];
        self.pos_y[i] = p[1];
        self.pos_z[i] = p[2];
    }

    /// Overwrites the normal of vertex `i`.
    #[inline]
    pub fn set_normal(&mut self, i: usize, n: [f32; 3]) {
        self.normal_x[i] = n[0];
        self.normal_y[i] = n[1];
        self.normal_z[i] = n[2];
    }

    /// Appends a vertex with all of its attributes.
    pub fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) {
        self.pos_x.push(position[0]);
        self.pos_y.push(position[1]);
        self.pos_z.push(position[2]);
        self.normal_x.push(normal[0]);
        self.normal_y.push(normal[1]);
        self.normal_z.push(normal[2]);
        self.uv_u.push(uv[0]);
        self.uv_v.push(uv[1]);
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - All SoA arrays have the same length
    /// - Index count is a multiple of three and every index is in range
    /// - No triangle repeats a vertex index
    pub fn validate(&self) -> BuntingResult<()> {
        let n = self.pos_x.len();

        if self.pos_y.len() != n || self.pos_z.len() != n {
            return Err(BuntingError::InvalidMesh(
                "Position arrays have inconsistent lengths".into(),
            ));
        }
        if self.normal_x.len() != n || self.normal_y.len() != n || self.normal_z.len() != n {
            return Err(BuntingError::InvalidMesh(
                "Normal arrays have inconsistent lengths".into(),
            ));
        }
        if self.uv_u.len() != n || self.uv_v.len() != n {
            return Err(BuntingError::InvalidMesh(
                "UV arrays have inconsistent lengths".into(),
            ));
        }

        if self.indices.len() % 3 != 0 {
            return Err(BuntingError::InvalidMesh(
                "Index count is not divisible by 3".into(),
            ));
        }

        if let Some((i, &idx)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &idx)| idx as usize >= n)
        {
            return Err(BuntingError::InvalidMesh(format!(
                "Index {} at position {} is out of range (vertex count: {})",
                idx, i, n
            )));
        }

        for t in 0..self.triangle_count() {
            let [a, b, c] = self.triangle(t);
            if a == b || b == c || a == c {
                return Err(BuntingError::InvalidMesh(format!(
                    "Triangle {} has repeated vertex indices: [{}, {}, {}]",
                    t, a, b, c
                )));
            }
        }

        Ok(())
    }

    /// Positions as `[x0, y0, z0, x1, ...]` for a single vertex buffer upload.
    pub fn interleaved_positions(&self) -> Vec<f32> {
        interleave3(&self.pos_x, &self.pos_y, &self.pos_z)
    }

    /// Normals as `[x0, y0, z0, x1, ...]`.
    pub fn interleaved_normals(&self) -> Vec<f32> {
        interleave3(&self.normal_x, &self.normal_y, &self.normal_z)
    }

    /// Texture coordinates as `[u0, v0, u1, v1, ...]`.
    pub fn interleaved_tex_coords(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.uv_u.len() * 2);
        for (u, v) in self.uv_u.iter().zip(&self.uv_v) {
            out.push(*u);
            out.push(*v);
        }
        out
    }

    /// Builds the mesh seen from behind: same vertices and texture
    /// coordinates, reversed winding, negated normals.
    pub fn back_face(&self) -> Self {
        let mut back = self.clone();
        for tri in back.indices.chunks_exact_mut(3) {
            tri.swap(1, 2);
        }
        back.copy_flipped_normals_from(self);
        back
    }

    /// Copies positions from `front` and its normals negated.
    ///
    /// Both meshes must share a vertex count. Only the position and normal
    /// buffers are written.
    pub fn copy_flipped_normals_from(&mut self, front: &SurfaceMesh) {
        self.pos_x.copy_from_slice(&front.pos_x);
        self.pos_y.copy_from_slice(&front.pos_y);
        self.pos_z.copy_from_slice(&front.pos_z);
        for (dst, src) in self.normal_x.iter_mut().zip(&front.normal_x) {
            *dst = -*src;
        }
        for (dst, src) in self.normal_y.iter_mut().zip(&front.normal_y) {
            *dst = -*src;
        }
        for (dst, src) in self.normal_z.iter_mut().zip(&front.normal_z) {
            *dst = -*src;
        }
    }
}

fn interleave3(x: &[f32], y: &[f32], z: &[f32]) -> Vec<f32> {
    let mut out = Vec::with_capacity(x.len() * 3);
    for i in 0..x.len() {
        out.push(x[i]);
        out.push(y[i]);
        out.push(z[i]);
    }
    out
}
