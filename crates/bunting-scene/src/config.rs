//! Scene configuration loaded from TOML.
//!
//! ```toml
//! [simulation]
//! frame_dt = 0.016666666666666666
//! sub_steps = 16
//! frames = 300
//! gravity = [0.0, -9.81, 0.0]
//!
//! [wind]
//! direction = [0.0, 0.0, 1.0]
//! strength = 2.0
//! gust_amplitude = 1.5
//! gust_frequency = 0.5
//!
//! [[flags]]
//! name = "left"
//! upper_left = [-2.0, 3.0, 0.0]
//! upper_right = [-0.5, 2.6, 0.0]
//! height = 1.0
//! width_points = 16
//! height_points = 10
//!
//! [flags.material]
//! stiffness = 4000.0
//! ```

use std::collections::HashSet;
use std::f64::consts::TAU;
use std::path::Path;

use bunting_cloth::construction::GridLayout;
use bunting_cloth::{Cloth, ClothMaterial};
use bunting_math::{safe_normalize, DVec3};
use bunting_types::constants::{DEFAULT_FRAME_DT, DEFAULT_SUB_STEPS, GRAVITY};
use bunting_types::{BuntingError, BuntingResult, Scalar};
use serde::{Deserialize, Serialize};

/// Frame clock and global forces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulated seconds per frame.
    pub frame_dt: Scalar,
    /// Integration sub-steps per frame.
    pub sub_steps: u32,
    /// Frames to run.
    pub frames: u32,
    /// Gravitational acceleration (m/s²).
    pub gravity: DVec3,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frame_dt: DEFAULT_FRAME_DT,
            sub_steps: DEFAULT_SUB_STEPS,
            frames: 300,
            gravity: DVec3::new(0.0, -GRAVITY, 0.0),
        }
    }
}

impl SimulationConfig {
    /// Length of one integration sub-step.
    pub fn sub_step_dt(&self) -> Scalar {
        self.frame_dt / self.sub_steps.max(1) as Scalar
    }

    /// Simulated length of the whole run.
    pub fn duration(&self) -> Scalar {
        self.frame_dt * self.frames as Scalar
    }
}

/// Wind acceleration that gusts sinusoidally around a steady strength.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    /// Blowing direction; normalized on use.
    pub direction: DVec3,
    /// Steady acceleration (m/s²).
    pub strength: Scalar,
    /// Peak deviation from `strength` (m/s²).
    pub gust_amplitude: Scalar,
    /// Gust cycles per second.
    pub gust_frequency: Scalar,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            direction: DVec3::Z,
            strength: 2.0,
            gust_amplitude: 1.5,
            gust_frequency: 0.5,
        }
    }
}

impl WindConfig {
    /// No wind at all.
    pub fn calm() -> Self {
        Self {
            strength: 0.0,
            gust_amplitude: 0.0,
            ..Default::default()
        }
    }

    /// Wind acceleration at simulation time `t`.
    pub fn at(&self, t: Scalar) -> DVec3 {
        let gust = self.gust_amplitude * (TAU * self.gust_frequency * t).sin();
        safe_normalize(self.direction) * (self.strength + gust)
    }
}

/// One flag hanging from its pole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagConfig {
    pub name: String,
    pub upper_left: DVec3,
    pub upper_right: DVec3,
    /// Drop of the lower edge below the lower upper corner.
    pub height: Scalar,
    pub width_points: u32,
    pub height_points: u32,
    #[serde(default)]
    pub material: ClothMaterial,
}

impl FlagConfig {
    fn layout(&self) -> GridLayout {
        GridLayout {
            upper_left: self.upper_left,
            upper_right: self.upper_right,
            height: self.height,
            width_points: self.width_points,
            height_points: self.height_points,
        }
    }

    /// Builds the cloth this flag describes.
    pub fn build(&self) -> BuntingResult<Cloth> {
        Cloth::with_material(
            self.upper_left,
            self.upper_right,
            self.height,
            self.width_points,
            self.height_points,
            self.material.clone(),
        )
    }

    pub fn validate(&self) -> BuntingResult<()> {
        if self.name.trim().is_empty() {
            return Err(BuntingError::InvalidConfig("flag name must not be empty".into()));
        }
        self.layout()
            .validate()
            .and_then(|()| self.material.validate())
            .map_err(|e| BuntingError::InvalidConfig(format!("flag '{}': {e}", self.name)))
    }
}

/// A whole scene: clock, forces, and flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub wind: WindConfig,
    #[serde(default)]
    pub flags: Vec<FlagConfig>,
}

impl Default for SceneConfig {
    /// Two flags on poles leaning toward each other, in a gusty breeze.
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            wind: WindConfig::default(),
            flags: vec![
                FlagConfig {
                    name: "left".into(),
                    upper_left: DVec3::new(-2.0, 3.0, 0.0),
                    upper_right: DVec3::new(-0.5, 2.6, 0.0),
                    height: 1.0,
                    width_points: 16,
                    height_points: 10,
                    material: ClothMaterial::default(),
                },
                FlagConfig {
                    name: "right".into(),
                    upper_left: DVec3::new(0.5, 2.6, 0.0),
                    upper_right: DVec3::new(2.0, 3.0, 0.0),
                    height: 1.0,
                    width_points: 16,
                    height_points: 10,
                    material: ClothMaterial {
                        double_sided: true,
                        ..ClothMaterial::silk()
                    },
                },
            ],
        }
    }
}

impl SceneConfig {
    pub fn from_toml_str(text: &str) -> BuntingResult<Self> {
        toml::from_str(text)
            .map_err(|e| BuntingError::Serialization(format!("TOML parse failed: {e}")))
    }

    /// Reads, parses, and validates a scene file.
    pub fn load(path: impl AsRef<Path>) -> BuntingResult<Self> {
        let config = Self::from_toml_str(&std::fs::read_to_string(path)?)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> BuntingResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| BuntingError::Serialization(format!("TOML serialization failed: {e}")))
    }

    pub fn validate(&self) -> BuntingResult<()> {
        let sim = &self.simulation;
        if !sim.frame_dt.is_finite() || sim.frame_dt <= 0.0 {
            return Err(BuntingError::InvalidConfig(format!(
                "frame_dt must be positive and finite, got {}",
                sim.frame_dt
            )));
        }
        if sim.sub_steps == 0 {
            return Err(BuntingError::InvalidConfig("sub_steps must be at least 1".into()));
        }
        if !sim.gravity.is_finite() {
            return Err(BuntingError::InvalidConfig("gravity must be finite".into()));
        }

        let wind = &self.wind;
        if !wind.direction.is_finite()
            || !wind.strength.is_finite()
            || !wind.gust_amplitude.is_finite()
            || !wind.gust_frequency.is_finite()
        {
            return Err(BuntingError::InvalidConfig("wind values must be finite".into()));
        }
        if wind.gust_frequency < 0.0 {
            return Err(BuntingError::InvalidConfig(format!(
                "gust_frequency must be non-negative, got {}",
                wind.gust_frequency
            )));
        }

        if self.flags.is_empty() {
            return Err(BuntingError::InvalidConfig("scene has no flags".into()));
        }
        let mut names = HashSet::new();
        for flag in &self.flags {
            flag.validate()?;
            if !names.insert(flag.name.as_str()) {
                return Err(BuntingError::InvalidConfig(format!(
                    "duplicate flag name '{}'",
                    flag.name
                )));
            }
        }
        Ok(())
    }
}
