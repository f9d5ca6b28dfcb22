//! Simulation event types.
//!
//! Events are small value types tagged with the frame they belong to.

use serde::{Deserialize, Serialize};

/// An event emitted by the frame runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Frame number (0-indexed).
    pub frame: u32,
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// A scene was built and is about to run.
    SceneStart {
        flags: u32,
        frames: u32,
        sub_steps: u32,
    },

    /// Frame started.
    FrameBegin {
        /// Simulation time at the start of the frame (seconds).
        sim_time: f64,
        /// Wind acceleration applied during this frame.
        wind: [f64; 3],
    },

    /// One flag finished its `simulate` + `recompute` for the frame.
    FlagStepped {
        flag: String,
        /// Largest distance of any particle from its rest position.
        max_displacement: f64,
    },

    /// Energy snapshot of one flag.
    Energy {
        flag: String,
        kinetic: f64,
        elastic: f64,
    },

    /// Frame completed.
    FrameEnd {
        /// Wall-clock time for the whole frame (seconds).
        wall_time: f64,
    },

    /// Every frame has run.
    SceneEnd {
        /// Total wall-clock time (seconds).
        wall_time: f64,
    },
}

impl SimulationEvent {
    pub fn new(frame: u32, kind: EventKind) -> Self {
        Self { frame, kind }
    }

    /// Short label for the payload variant.
    pub fn label(&self) -> &'static str {
        match self.kind {
            EventKind::SceneStart { .. } => "scene_start",
            EventKind::FrameBegin { .. } => "frame_begin",
            EventKind::FlagStepped { .. } => "flag_stepped",
            EventKind::Energy { .. } => "energy",
            EventKind::FrameEnd { .. } => "frame_end",
            EventKind::SceneEnd { .. } => "scene_end",
        }
    }
}
