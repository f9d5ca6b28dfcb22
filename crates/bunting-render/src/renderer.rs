//! Renderer trait, frame payloads, and the headless implementation.

use bunting_mesh::SurfaceMesh;
use bunting_types::{BuntingError, BuntingResult, MaterialId};
use serde::{Deserialize, Serialize};

/// Buffers of one surface that never change after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceLayout {
    pub name: String,
    pub vertex_count: usize,
    pub material_id: MaterialId,
    pub indices: Vec<u32>,
    /// Interleaved `[u0, v0, u1, v1, ...]`.
    pub tex_coords: Vec<f32>,
}

impl SurfaceLayout {
    pub fn from_mesh(name: impl Into<String>, mesh: &SurfaceMesh) -> Self {
        Self {
            name: name.into(),
            vertex_count: mesh.vertex_count(),
            material_id: mesh.material_id,
            indices: mesh.indices.clone(),
            tex_coords: mesh.interleaved_tex_coords(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Per-frame attributes of one surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceFrame {
    /// Interleaved `[x0, y0, z0, ...]`.
    pub positions: Vec<f32>,
    /// Interleaved `[nx0, ny0, nz0, ...]`.
    pub normals: Vec<f32>,
}

impl SurfaceFrame {
    pub fn from_mesh(mesh: &SurfaceMesh) -> Self {
        Self {
            positions: mesh.interleaved_positions(),
            normals: mesh.interleaved_normals(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// One frame for every surface, in the order they were passed to `init`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub frame: u32,
    /// Simulation time at the end of the frame (seconds).
    pub sim_time: f64,
    pub surfaces: Vec<SurfaceFrame>,
}

impl RenderFrame {
    /// Copies positions and normals out of each mesh.
    pub fn capture<'a>(
        frame: u32,
        sim_time: f64,
        meshes: impl IntoIterator<Item = &'a SurfaceMesh>,
    ) -> Self {
        Self {
            frame,
            sim_time,
            surfaces: meshes.into_iter().map(SurfaceFrame::from_mesh).collect(),
        }
    }

    /// Checks that the frame matches the layouts it is submitted against.
    pub fn check_against(&self, layouts: &[SurfaceLayout]) -> BuntingResult<()> {
        if self.surfaces.len() != layouts.len() {
            return Err(BuntingError::InvalidMesh(format!(
                "frame {} has {} surfaces, renderer was initialized with {}",
                self.frame,
                self.surfaces.len(),
                layouts.len()
            )));
        }
        for (surface, layout) in self.surfaces.iter().zip(layouts) {
            if surface.positions.len() != layout.vertex_count * 3
                || surface.normals.len() != layout.vertex_count * 3
            {
                return Err(BuntingError::InvalidMesh(format!(
                    "frame {}: surface '{}' expects {} vertices, got {} positions and {} normals",
                    self.frame,
                    layout.name,
                    layout.vertex_count,
                    surface.positions.len() / 3,
                    surface.normals.len() / 3
                )));
            }
        }
        Ok(())
    }
}

/// Consumer of simulation output.
pub trait Renderer: Send {
    /// Receives the static buffers of every surface, once, before any frame.
    fn init(&mut self, layouts: &[SurfaceLayout]) -> BuntingResult<()>;

    /// Receives the per-frame positions and normals.
    fn submit_frame(&mut self, frame: &RenderFrame) -> BuntingResult<()>;

    /// Flush buffers, close files.
    fn finalize(&mut self) -> BuntingResult<()>;

    fn name(&self) -> &str;

    fn frame_count(&self) -> u32;
}

/// Validates and counts frames, then drops them.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    layouts: Vec<SurfaceLayout>,
    frames: u32,
    initialized: bool,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layouts(&self) -> &[SurfaceLayout] {
        &self.layouts
    }
}

impl Renderer for HeadlessRenderer {
    fn init(&mut self, layouts: &[SurfaceLayout]) -> BuntingResult<()> {
        self.layouts = layouts.to_vec();
        self.initialized = true;
        Ok(())
    }

    fn submit_frame(&mut self, frame: &RenderFrame) -> BuntingResult<()> {
        if !self.initialized {
            return Err(BuntingError::InvalidConfig(
                "frame submitted before renderer init".into(),
            ));
        }
        frame.check_against(&self.layouts)?;
        self.frames += 1;
        Ok(())
    }

    fn finalize(&mut self) -> BuntingResult<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "headless"
    }

    fn frame_count(&self) -> u32 {
        self.frames
    }
}
