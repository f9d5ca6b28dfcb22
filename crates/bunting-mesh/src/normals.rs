//! Vertex normal computation from triangle faces.
//!
//! Each triangle contributes its edge-normalized face normal (see
//! [`bunting_math::face_normal`]) to all three of its vertices; the sums are
//! normalized at the end. A vertex touched only by degenerate triangles
//! ends up with a zero normal instead of NaN.

use bunting_math::{face_normal, safe_normalize, to_f32_array, DVec3};

use crate::mesh::SurfaceMesh;

/// Accumulates per-vertex normals into `out`.
///
/// `out` must have one slot per position; it is fully overwritten, so it
/// can be a scratch buffer kept across frames.
pub fn accumulate_vertex_normals(positions: &[DVec3], triangles: &[[u32; 3]], out: &mut [DVec3]) {
    debug_assert_eq!(positions.len(), out.len());
    out.fill(DVec3::ZERO);

    for &[a, b, c] in triangles {
        let (a, b, c) = (a as usize, b as usize, c as usize);
        let n = face_normal(positions[a], positions[b], positions[c]);
        out[a] += n;
        out[b] += n;
        out[c] += n;
    }

    for n in out.iter_mut() {
        *n = safe_normalize(*n);
    }
}

/// Recompute a mesh's normals from its own position buffer.
pub fn compute_vertex_normals(mesh: &mut SurfaceMesh) {
    let positions: Vec<DVec3> = (0..mesh.vertex_count())
        .map(|i| {
            let [x, y, z] = mesh.position(i);
            DVec3::new(x as f64, y as f64, z as f64)
        })
        .collect();
    let triangles: Vec<[u32; 3]> = (0..mesh.triangle_count()).map(|t| mesh.triangle(t)).collect();

    let mut normals = vec![DVec3::ZERO; positions.len()];
    accumulate_vertex_normals(&positions, &triangles, &mut normals);

    for (i, n) in normals.iter().enumerate() {
        mesh.set_normal(i, to_f32_array(*n));
    }
}
