//! Grid and spring construction.
//!
//! The upper edge runs from `upper_left` to `upper_right`, which may sit at
//! different heights (a flag on an inclined pole). Each side drops by its
//! own total so the lower edge ends up horizontal, `height` below the lower
//! of the two corners:
//!
//! ```text
//! upper_left ●
//!            │ ╲_____________ ● upper_right
//!  left drop │               │ right drop = height
//!            │               │
//!            ●───────────────●
//! ```
//!
//! Row `r` sits at fraction `r / (height_points - 1)` of each side's drop
//! and interpolates linearly between its two side points.

use bunting_math::DVec3;
use bunting_types::constants::MIN_REST_LENGTH;
use bunting_types::{BuntingError, BuntingResult, PointMassId, Scalar};

use crate::config::PinPolicy;
use crate::point_mass::PointMass;
use crate::spring::{Spring, SpringFamily};

/// Parameters describing the undeformed grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub upper_left: DVec3,
    pub upper_right: DVec3,
    /// Drop below the lower of the two upper corners.
    pub height: Scalar,
    pub width_points: u32,
    pub height_points: u32,
}

impl GridLayout {
    /// Checks resolution and corner placement.
    pub fn validate(&self) -> BuntingResult<()> {
        if self.width_points < 2 || self.height_points < 2 {
            return Err(BuntingError::InvalidResolution {
                width_points: self.width_points,
                height_points: self.height_points,
            });
        }
        if !self.upper_left.is_finite() || !self.upper_right.is_finite() {
            return Err(BuntingError::DegenerateGeometry(format!(
                "corners must be finite, got {} and {}",
                self.upper_left, self.upper_right
            )));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(BuntingError::DegenerateGeometry(format!(
                "drop height must be positive and finite, got {}",
                self.height
            )));
        }
        if self.width() < MIN_REST_LENGTH {
            return Err(BuntingError::DegenerateGeometry(
                "upper corners coincide".into(),
            ));
        }
        Ok(())
    }

    /// Distance between the two upper corners.
    #[inline]
    pub fn width(&self) -> Scalar {
        (self.upper_right - self.upper_left).length()
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.width_points as usize * self.height_points as usize
    }

    /// Total vertical drop of the left and right edges.
    pub fn edge_drops(&self) -> (Scalar, Scalar) {
        let slant = self.upper_left.y - self.upper_right.y;
        if slant > 0.0 {
            (self.height + slant, self.height)
        } else {
            (self.height, self.height - slant)
        }
    }

    /// Rest position of grid point `(row, col)`.
    pub fn rest_position(&self, row: u32, col: u32) -> DVec3 {
        let (left_drop, right_drop) = self.edge_drops();
        let t = row as Scalar / (self.height_points - 1) as Scalar;
        let s = col as Scalar / (self.width_points - 1) as Scalar;
        let left = self.upper_left - DVec3::Y * (left_drop * t);
        let right = self.upper_right - DVec3::Y * (right_drop * t);
        left + (right - left) * s
    }
}

/// Lays out the row-major point-mass array.
pub fn build_point_masses(layout: &GridLayout, pin_policy: PinPolicy) -> Vec<PointMass> {
    let mut masses = Vec::with_capacity(layout.point_count());
    for row in 0..layout.height_points {
        for col in 0..layout.width_points {
            let pinned = pin_policy.is_pinned(row, col, layout.width_points, layout.height_points);
            masses.push(PointMass::new(layout.rest_position(row, col), pinned));
        }
    }
    masses
}

/// Generates every spring of every family, each grid pairing exactly once.
///
/// Fails with [`BuntingError::DegenerateGeometry`] if any rest length is
/// below [`MIN_REST_LENGTH`].
pub fn build_springs(layout: &GridLayout, masses: &[PointMass]) -> BuntingResult<Vec<Spring>> {
    let w = layout.width_points as i64;
    let h = layout.height_points as i64;
    let total = SpringFamily::total_count(layout.width_points, layout.height_points);
    let mut springs = Vec::with_capacity(total);

    for family in SpringFamily::ALL {
        let (d_row, d_col) = family.offset();
        // Every spring ends at (row, col); its start sits at the offset behind it.
        for row in d_row..h {
            for col in 0..w {
                let start_col = col - d_col;
                if start_col < 0 || start_col >= w {
                    continue;
                }
                let start = PointMassId(((row - d_row) * w + start_col) as u32);
                let end = PointMassId((row * w + col) as u32);
                let spring = Spring::new(masses, start, end, family);
                if spring.rest_length() < MIN_REST_LENGTH {
                    return Err(BuntingError::DegenerateGeometry(format!(
                        "{:?} spring between points {} and {} has rest length {:e}",
                        family,
                        start.0,
                        end.0,
                        spring.rest_length()
                    )));
                }
                springs.push(spring);
            }
        }
    }

    debug_assert_eq!(springs.len(), total);
    Ok(springs)
}
