//! Regular grid topology for a row-major `width_points × height_points`
//! vertex lattice.
//!
//! Cell `(row, col)` has top-left vertex `o = row * width_points + col`
//! and is split along its `o → o + 1 + width_points` diagonal:
//!
//! ```text
//! o ─────── o+1
//! │ ╲   A    │
//! │   ╲      │
//! │ B   ╲    │
//! o+W ───── o+1+W
//! ```
//!
//! A = `(o, o+1+W, o+1)`, B = `(o, o+W, o+1+W)`.

/// Triangle index triples for every cell of the grid, two per cell.
///
/// Returns an empty list when either dimension is below 2.
pub fn grid_triangles(width_points: u32, height_points: u32) -> Vec<[u32; 3]> {
    if width_points < 2 || height_points < 2 {
        return Vec::new();
    }
    let w = width_points;
    let cells = ((width_points - 1) * (height_points - 1)) as usize;
    let mut triangles = Vec::with_capacity(cells * 2);
    for row in 0..height_points - 1 {
        for col in 0..width_points - 1 {
            let o = row * w + col;
            triangles.push([o, o + 1 + w, o + 1]);
            triangles.push([o, o + w, o + 1 + w]);
        }
    }
    triangles
}

/// Texture coordinate of grid vertex `(row, col)`.
///
/// `u = col / width_points`, `v = row / height_points`.
#[inline]
pub fn grid_tex_coord(row: u32, col: u32, width_points: u32, height_points: u32) -> [f32; 2] {
    [
        col as f32 / width_points as f32,
        row as f32 / height_points as f32,
    ]
}

/// Number of triangles [`grid_triangles`] produces.
#[inline]
pub fn grid_triangle_count(width_points: u32, height_points: u32) -> usize {
    if width_points < 2 || height_points < 2 {
        0
    } else {
        2 * ((width_points - 1) * (height_points - 1)) as usize
    }
}
