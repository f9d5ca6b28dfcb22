//! JSON frame exporter: records per-frame surface data for offline viewing.
//!
//! Static buffers are written once at the top of the document; each frame
//! carries positions and normals only.

use std::path::{Path, PathBuf};

use bunting_types::{BuntingError, BuntingResult};
use serde::{Deserialize, Serialize};

use crate::renderer::{RenderFrame, Renderer, SurfaceFrame, SurfaceLayout};

/// One recorded frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    pub frame: u32,
    pub sim_time: f64,
    pub surfaces: Vec<SurfaceFrame>,
}

/// A whole exported animation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub surfaces: Vec<SurfaceLayout>,
    pub frames: Vec<RecordedFrame>,
}

impl Animation {
    pub fn from_json_str(text: &str) -> BuntingResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| BuntingError::Serialization(format!("JSON parse failed: {e}")))
    }

    pub fn load(path: impl AsRef<Path>) -> BuntingResult<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn to_json_string(&self) -> BuntingResult<String> {
        serde_json::to_string(self)
            .map_err(|e| BuntingError::Serialization(format!("JSON serialization failed: {e}")))
    }

    /// Lowest and highest vertex `y` over every frame and surface.
    pub fn y_range(&self) -> Option<(f32, f32)> {
        self.frames
            .iter()
            .flat_map(|f| &f.surfaces)
            .flat_map(|s| s.positions.chunks_exact(3).map(|p| p[1]))
            .fold(None, |acc, y| match acc {
                None => Some((y, y)),
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            })
    }
}

/// Writes the whole animation to one JSON file on [`Renderer::finalize`].
///
/// ```text
/// let mut exporter = JsonFrameExporter::new("flags.json");
/// exporter.init(&layouts)?;
/// // ... submit_frame() once per frame ...
/// exporter.finalize()?;
/// ```
pub struct JsonFrameExporter {
    output_path: PathBuf,
    animation: Animation,
    /// Keep every n-th frame.
    stride: u32,
}

impl JsonFrameExporter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            animation: Animation::default(),
            stride: 1,
        }
    }

    /// Records only frames whose number is a multiple of `stride`.
    pub fn with_stride(mut self, stride: u32) -> Self {
        self.stride = stride.max(1);
        self
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Everything recorded so far.
    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn to_json_string(&self) -> BuntingResult<String> {
        self.animation.to_json_string()
    }
}

impl Renderer for JsonFrameExporter {
    fn init(&mut self, layouts: &[SurfaceLayout]) -> BuntingResult<()> {
        self.animation = Animation {
            surfaces: layouts.to_vec(),
            frames: Vec::new(),
        };
        Ok(())
    }

    fn submit_frame(&mut self, frame: &RenderFrame) -> BuntingResult<()> {
        frame.check_against(&self.animation.surfaces)?;
        if frame.frame % self.stride != 0 {
            return Ok(());
        }
        self.animation.frames.push(RecordedFrame {
            frame: frame.frame,
            sim_time: frame.sim_time,
            surfaces: frame.surfaces.clone(),
        });
        Ok(())
    }

    fn finalize(&mut self) -> BuntingResult<()> {
        let json = self.to_json_string()?;
        std::fs::write(&self.output_path, json)?;
        Ok(())
    }

    fn name(&self) -> &str {
        "json_exporter"
    }

    fn frame_count(&self) -> u32 {
        self.animation.frames.len() as u32
    }
}
