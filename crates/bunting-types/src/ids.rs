//! Strongly-typed identifiers for cloth entities.
//!
//! Springs refer to their endpoints through `PointMassId`, an index into
//! the owning cloth's point-mass array, never through a reference.

use serde::{Deserialize, Serialize};

/// Index into a cloth's point-mass array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PointMassId(pub u32);

/// Material slot a renderer binds for a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MaterialId(pub u16);

impl PointMassId {
    /// Returns the raw index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Row-major id of grid cell `(row, col)` in a grid `width_points` wide.
    #[inline]
    pub fn from_grid(row: u32, col: u32, width_points: u32) -> Self {
        Self(row * width_points + col)
    }
}

impl MaterialId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for PointMassId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u16> for MaterialId {
    fn from(val: u16) -> Self {
        Self(val)
    }
}
