//! Cloth material configuration.
//!
//! Constants fixed per cloth instance and shared by every spring and point
//! mass it owns.

use bunting_types::constants::{
    DEFAULT_BENDING_WEIGHT, DEFAULT_DAMPING, DEFAULT_DENSITY, DEFAULT_STIFFNESS,
};
use bunting_types::{BuntingError, BuntingResult, Scalar};
use serde::{Deserialize, Serialize};

/// Which grid points are anchored at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinPolicy {
    /// The two upper corners, attached to a pole.
    #[default]
    TopCorners,
    /// Every point of the upper row.
    TopRow,
    /// Every point of the lower row.
    BottomRow,
    /// The whole cloth is frozen.
    All,
    /// Nothing is pinned; the cloth falls freely.
    None,
}

impl PinPolicy {
    /// Whether grid point `(row, col)` is pinned under this policy.
    pub fn is_pinned(self, row: u32, col: u32, width_points: u32, height_points: u32) -> bool {
        match self {
            PinPolicy::TopCorners => row == 0 && (col == 0 || col == width_points - 1),
            PinPolicy::TopRow => row == 0,
            PinPolicy::BottomRow => row == height_points - 1,
            PinPolicy::All => true,
            PinPolicy::None => false,
        }
    }
}

/// Physical constants of a cloth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothMaterial {
    /// Fraction of the implicit velocity removed every integration step
    /// (0.0 = undamped, 1.0 = no carried momentum).
    pub damping: Scalar,

    /// Areal density (kg/m²).
    pub density: Scalar,

    /// Hooke stiffness `ks` shared by every spring.
    pub stiffness: Scalar,

    /// Multiplier on bending-spring forces.
    pub bending_weight: Scalar,

    /// Which points are anchored.
    pub pin_policy: PinPolicy,

    /// Also derive a back-facing mesh with reversed winding.
    pub double_sided: bool,
}

impl Default for ClothMaterial {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            density: DEFAULT_DENSITY,
            stiffness: DEFAULT_STIFFNESS,
            bending_weight: DEFAULT_BENDING_WEIGHT,
            pin_policy: PinPolicy::default(),
            double_sided: false,
        }
    }
}

impl ClothMaterial {
    /// Light, floppy fabric: low density and stiffness, little damping.
    pub fn silk() -> Self {
        Self {
            damping: 0.001,
            density: 40.0,
            stiffness: 2000.0,
            bending_weight: 0.1,
            ..Default::default()
        }
    }

    /// Heavy canvas that barely flutters.
    pub fn canvas() -> Self {
        Self {
            damping: 0.005,
            density: 400.0,
            stiffness: 12000.0,
            bending_weight: 0.4,
            ..Default::default()
        }
    }

    /// Rejects values that would make the integrator produce NaN or blow up.
    pub fn validate(&self) -> BuntingResult<()> {
        let finite = [
            ("damping", self.damping),
            ("density", self.density),
            ("stiffness", self.stiffness),
            ("bending_weight", self.bending_weight),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(BuntingError::InvalidMaterial(format!(
                "{name} must be finite, got {value}"
            )));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(BuntingError::InvalidMaterial(format!(
                "damping must be in [0, 1], got {}",
                self.damping
            )));
        }
        if self.density <= 0.0 {
            return Err(BuntingError::InvalidMaterial(format!(
                "density must be positive, got {}",
                self.density
            )));
        }
        if self.stiffness < 0.0 {
            return Err(BuntingError::InvalidMaterial(format!(
                "stiffness must be non-negative, got {}",
                self.stiffness
            )));
        }
        if self.bending_weight < 0.0 {
            return Err(BuntingError::InvalidMaterial(format!(
                "bending_weight must be non-negative, got {}",
                self.bending_weight
            )));
        }
        Ok(())
    }
}
