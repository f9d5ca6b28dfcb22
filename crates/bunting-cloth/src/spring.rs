//! Springs: Hooke constraints between two point masses.
//!
//! A spring names its endpoints by [`PointMassId`] into the owning cloth's
//! point-mass array. Its rest length is measured once from the endpoints'
//! rest positions and never recomputed.

use bunting_math::{safe_normalize, DVec3};
use bunting_types::{PointMassId, Scalar};
use serde::{Deserialize, Serialize};

use crate::point_mass::PointMass;

/// Topological role of a spring, which selects its force weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstraintKind {
    /// Direct horizontal or vertical neighbours.
    Structural,
    /// Neighbours two cells apart along a row or column.
    Shearing,
    /// Diagonal neighbours across a cell.
    Bending,
}

impl ConstraintKind {
    /// Multiplier applied to this kind's Hooke force.
    #[inline]
    pub fn weight(self, bending_weight: Scalar) -> Scalar {
        match self {
            ConstraintKind::Bending => bending_weight,
            ConstraintKind::Structural | ConstraintKind::Shearing => 1.0,
        }
    }
}

/// The six grid-offset families springs are generated from.
///
/// Offsets are `(d_row, d_col)` from the spring's start to its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpringFamily {
    StructuralVertical,
    StructuralHorizontal,
    ShearingVertical,
    ShearingHorizontal,
    /// Up-left neighbour to the point.
    BendingDiagonal,
    /// Up-right neighbour to the point.
    BendingAntiDiagonal,
}

impl SpringFamily {
    /// All families in generation order.
    pub const ALL: [SpringFamily; 6] = [
        SpringFamily::StructuralVertical,
        SpringFamily::StructuralHorizontal,
        SpringFamily::ShearingVertical,
        SpringFamily::ShearingHorizontal,
        SpringFamily::BendingDiagonal,
        SpringFamily::BendingAntiDiagonal,
    ];

    pub fn kind(self) -> ConstraintKind {
        match self {
            SpringFamily::StructuralVertical | SpringFamily::StructuralHorizontal => {
                ConstraintKind::Structural
            }
            SpringFamily::ShearingVertical | SpringFamily::ShearingHorizontal => {
                ConstraintKind::Shearing
            }
            SpringFamily::BendingDiagonal | SpringFamily::BendingAntiDiagonal => {
                ConstraintKind::Bending
            }
        }
    }

    /// Grid offset `(d_row, d_col)` from start to end.
    pub fn offset(self) -> (i64, i64) {
        match self {
            SpringFamily::StructuralVertical => (1, 0),
            SpringFamily::StructuralHorizontal => (0, 1),
            SpringFamily::ShearingVertical => (2, 0),
            SpringFamily::ShearingHorizontal => (0, 2),
            SpringFamily::BendingDiagonal => (1, 1),
            SpringFamily::BendingAntiDiagonal => (1, -1),
        }
    }

    /// How many springs of this family a `width_points × height_points` grid holds.
    pub fn count(self, width_points: u32, height_points: u32) -> usize {
        let (d_row, d_col) = self.offset();
        let rows = (height_points as i64 - d_row).max(0);
        let cols = (width_points as i64 - d_col.abs()).max(0);
        (rows * cols) as usize
    }

    /// Total spring count over every family.
    pub fn total_count(width_points: u32, height_points: u32) -> usize {
        Self::ALL
            .iter()
            .map(|f| f.count(width_points, height_points))
            .sum()
    }
}

/// A spring between two point masses of the same cloth.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    start: PointMassId,
    end: PointMassId,
    rest_length: Scalar,
    family: SpringFamily,
}

impl Spring {
    /// Creates a spring whose rest length is the distance between the two
    /// endpoints' rest positions.
    pub fn new(
        masses: &[PointMass],
        start: PointMassId,
        end: PointMassId,
        family: SpringFamily,
    ) -> Self {
        let rest_length =
            (masses[start.index()].rest_position() - masses[end.index()].rest_position()).length();
        Self {
            start,
            end,
            rest_length,
            family,
        }
    }

    #[inline]
    pub fn start(&self) -> PointMassId {
        self.start
    }

    #[inline]
    pub fn end(&self) -> PointMassId {
        self.end
    }

    #[inline]
    pub fn rest_length(&self) -> Scalar {
        self.rest_length
    }

    #[inline]
    pub fn family(&self) -> SpringFamily {
        self.family
    }

    #[inline]
    pub fn kind(&self) -> ConstraintKind {
        self.family.kind()
    }

    /// Hooke force on the start point for the given endpoint positions.
    ///
    /// `F = -ks · w · (|d| - rest) · d̂` with `d = start - end`: a stretched
    /// spring pulls start toward end, a compressed one pushes it away. The
    /// end point receives `-F`. Coincident endpoints give zero force.
    pub fn force_on_start(
        &self,
        start_position: DVec3,
        end_position: DVec3,
        stiffness: Scalar,
        bending_weight: Scalar,
    ) -> DVec3 {
        let delta = start_position - end_position;
        let dist = delta.length();
        let dir = safe_normalize(delta);
        let magnitude = stiffness * self.kind().weight(bending_weight) * (dist - self.rest_length);
        -dir * magnitude
    }

    /// Stored elastic energy `½ · ks · w · (|d| - rest)²` at the current positions.
    pub fn elastic_energy(
        &self,
        masses: &[PointMass],
        stiffness: Scalar,
        bending_weight: Scalar,
    ) -> Scalar {
        let dist = (masses[self.start.index()].current_position()
            - masses[self.end.index()].current_position())
        .length();
        let stretch = dist - self.rest_length;
        0.5 * stiffness * self.kind().weight(bending_weight) * stretch * stretch
    }
}
