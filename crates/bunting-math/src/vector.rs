//! Guarded vector operations.
//!
//! Cloth geometry regularly produces zero-length vectors: a collapsed
//! triangle edge, or two particles pressed onto each other. Everything here
//! degrades to the zero vector in that case.

use bunting_types::constants::NORMALIZE_EPSILON;
use glam::DVec3;

/// Normalizes `v`, returning zero when its length is below [`NORMALIZE_EPSILON`]
/// or not finite.
#[inline]
pub fn safe_normalize(v: DVec3) -> DVec3 {
    let len = v.length();
    if len.is_finite() && len > NORMALIZE_EPSILON {
        v / len
    } else {
        DVec3::ZERO
    }
}

/// Face normal of triangle `(a, b, c)`.
///
/// Both edges leaving `a` are normalized before the cross product, so the
/// result's magnitude is the sine of the corner angle at `a` rather than
/// twice the triangle area. A zero-length edge yields the zero vector.
#[inline]
pub fn face_normal(a: DVec3, b: DVec3, c: DVec3) -> DVec3 {
    let e1 = safe_normalize(b - a);
    let e2 = safe_normalize(c - a);
    e1.cross(e2)
}

/// Narrows a double-precision vector to a GPU-friendly `[f32; 3]`.
#[inline]
pub fn to_f32_array(v: DVec3) -> [f32; 3] {
    [v.x as f32, v.y as f32, v.z as f32]
}
