//! # bunting-render
//!
//! The boundary between the simulation and whatever draws it.
//!
//! A [`Renderer`] receives the static buffers of every surface (indices and
//! texture coordinates) once in [`Renderer::init`], then only positions and
//! normals per frame. The renderer pulls copies; it never aliases the
//! cloth's own buffers.
//!
//! - [`HeadlessRenderer`] checks and counts frames (benchmarks, CI)
//! - [`JsonFrameExporter`] records an animation to a JSON file

pub mod json_exporter;
pub mod renderer;

pub use json_exporter::{Animation, JsonFrameExporter, RecordedFrame};
pub use renderer::{HeadlessRenderer, RenderFrame, Renderer, SurfaceFrame, SurfaceLayout};
