//! # bunting-scene
//!
//! Flags on poles in the wind: the scene file, the per-frame driver that
//! steps every cloth and hands its meshes to a renderer, and the metrics
//! collected along the way.
//!
//! ## Key Types
//!
//! - [`SceneConfig`]: TOML scene description
//! - [`FlagScene`]: Built cloths plus the frame clock
//! - [`FlagMetrics`]: Per-flag results of a run, exportable as CSV

pub mod config;
pub mod metrics;
pub mod runner;

pub use config::{FlagConfig, SceneConfig, SimulationConfig, WindConfig};
pub use metrics::FlagMetrics;
pub use runner::{Flag, FlagScene};
