//! The cloth: point masses, springs, and the meshes derived from them.
//!
//! A [`Cloth`] exclusively owns its particles. Springs refer to them by
//! index, and the derived [`SurfaceMesh`] is a plain value the renderer
//! reads after [`Cloth::recompute`]. The index and texture-coordinate
//! buffers are written once at construction and never touched again.

use bunting_math::{to_f32_array, DVec3};
use bunting_mesh::grid::{grid_tex_coord, grid_triangles};
use bunting_mesh::normals::accumulate_vertex_normals;
use bunting_mesh::SurfaceMesh;
use bunting_types::{BuntingResult, PointMassId, Scalar};
use tracing::{debug, trace, warn};

use crate::config::ClothMaterial;
use crate::construction::{build_point_masses, build_springs, GridLayout};
use crate::point_mass::PointMass;
use crate::spring::Spring;

/// Operational state of a cloth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClothState {
    /// Built and meshed, never stepped.
    Constructed,
    /// At least one simulation step has run.
    Simulating,
}

/// A rectangular mass-spring cloth hanging from its upper edge.
#[derive(Debug, Clone)]
pub struct Cloth {
    layout: GridLayout,
    width: Scalar,
    material: ClothMaterial,
    particle_mass: Scalar,

    point_masses: Vec<PointMass>,
    springs: Vec<Spring>,
    triangles: Vec<[u32; 3]>,

    mesh: SurfaceMesh,
    back_mesh: Option<SurfaceMesh>,

    // Reused by every recompute so a frame allocates nothing.
    position_scratch: Vec<DVec3>,
    normal_scratch: Vec<DVec3>,

    steps_taken: u64,
    simulated_time: Scalar,
}

impl Cloth {
    /// Builds a cloth with the default material.
    ///
    /// `upper_left` and `upper_right` are the attachment corners; `height` is
    /// the drop of the lower edge below the lower corner.
    pub fn new(
        upper_left: DVec3,
        upper_right: DVec3,
        height: Scalar,
        width_points: u32,
        height_points: u32,
    ) -> BuntingResult<Self> {
        Self::with_material(
            upper_left,
            upper_right,
            height,
            width_points,
            height_points,
            ClothMaterial::default(),
        )
    }

    /// Builds a cloth with an explicit material.
    ///
    /// Fails with `InvalidResolution` if either resolution is below 2,
    /// `InvalidMaterial` if the material does not validate, and
    /// `DegenerateGeometry` for non-finite or coincident corners, a
    /// non-positive height, or any spring shorter than `MIN_REST_LENGTH`.
    pub fn with_material(
        upper_left: DVec3,
        upper_right: DVec3,
        height: Scalar,
        width_points: u32,
        height_points: u32,
        material: ClothMaterial,
    ) -> BuntingResult<Self> {
        let layout = GridLayout {
            upper_left,
            upper_right,
            height,
            width_points,
            height_points,
        };
        layout.validate()?;
        material.validate()?;

        let point_masses = build_point_masses(&layout, material.pin_policy);
        let springs = build_springs(&layout, &point_masses)?;
        let triangles = grid_triangles(width_points, height_points);

        let width = layout.width();
        let particle_mass = material.density * width * height / layout.point_count() as Scalar;

        let n = point_masses.len();
        let mut cloth = Self {
            layout,
            width,
            particle_mass,
            mesh: SurfaceMesh::with_capacity(n, triangles.len()),
            back_mesh: None,
            position_scratch: vec![DVec3::ZERO; n],
            normal_scratch: vec![DVec3::ZERO; n],
            point_masses,
            springs,
            triangles,
            material,
            steps_taken: 0,
            simulated_time: 0.0,
        };
        cloth.build_meshes();

        debug!(
            points = n,
            springs = cloth.springs.len(),
            triangles = cloth.triangles.len(),
            particle_mass = cloth.particle_mass,
            pinned = cloth.pinned_count(),
            "cloth constructed"
        );
        Ok(cloth)
    }

    fn build_meshes(&mut self) {
        let w = self.layout.width_points;
        let h = self.layout.height_points;
        for (i, p) in self.point_masses.iter().enumerate() {
            self.position_scratch[i] = p.current_position();
        }
        accumulate_vertex_normals(
            &self.position_scratch,
            &self.triangles,
            &mut self.normal_scratch,
        );

        for row in 0..h {
            for col in 0..w {
                let i = PointMassId::from_grid(row, col, w).index();
                self.mesh.push_vertex(
                    to_f32_array(self.position_scratch[i]),
                    to_f32_array(self.normal_scratch[i]),
                    grid_tex_coord(row, col, w, h),
                );
            }
        }
        self.mesh.indices = self.triangles.iter().flatten().copied().collect();

        if self.material.double_sided {
            self.back_mesh = Some(self.mesh.back_face());
        }
    }

    /// Advances the cloth by `delta_time`, split into `sub_steps` equal steps.
    ///
    /// Every unpinned point mass feels `mass * Σ accelerations` plus the
    /// spring forces. A `sub_steps` of zero, or a `delta_time` that is
    /// negative or not finite, does nothing.
    pub fn simulate(&mut self, delta_time: Scalar, sub_steps: u32, accelerations: &[DVec3]) {
        if sub_steps == 0 {
            warn!(delta_time, "simulate called with zero sub-steps; skipping");
            return;
        }
        if !delta_time.is_finite() || delta_time < 0.0 {
            warn!(delta_time, "simulate called with invalid delta time; skipping");
            return;
        }
        let dt = delta_time / sub_steps as Scalar;
        let external = self.particle_mass * accelerations.iter().copied().sum::<DVec3>();
        trace!(delta_time, sub_steps, ?external, "simulate");

        for _ in 0..sub_steps {
            self.step(dt, external);
        }
        self.steps_taken += sub_steps as u64;
        self.simulated_time += delta_time;
    }

    fn step(&mut self, dt: Scalar, external: DVec3) {
        for p in &mut self.point_masses {
            p.reset_force(external);
        }

        let stiffness = self.material.stiffness;
        let bending_weight = self.material.bending_weight;
        for spring in &self.springs {
            let (a, b) = (spring.start().index(), spring.end().index());
            let force = spring.force_on_start(
                self.point_masses[a].current_position(),
                self.point_masses[b].current_position(),
                stiffness,
                bending_weight,
            );
            self.point_masses[a].add_force(force);
            self.point_masses[b].add_force(-force);
        }

        let damping = self.material.damping;
        let mass = self.particle_mass;
        for p in &mut self.point_masses {
            p.integrate(dt, damping, mass);
        }
    }

    /// Regenerates mesh positions and normals from the current particle state.
    ///
    /// Writes in place; the index and texture-coordinate buffers are left
    /// untouched.
    pub fn recompute(&mut self) {
        for (slot, p) in self.position_scratch.iter_mut().zip(&self.point_masses) {
            *slot = p.current_position();
        }
        accumulate_vertex_normals(
            &self.position_scratch,
            &self.triangles,
            &mut self.normal_scratch,
        );

        for i in 0..self.position_scratch.len() {
            self.mesh.set_position(i, to_f32_array(self.position_scratch[i]));
            self.mesh.set_normal(i, to_f32_array(self.normal_scratch[i]));
        }
        if let Some(back) = &mut self.back_mesh {
            back.copy_flipped_normals_from(&self.mesh);
        }
    }

    // ─── Accessors ───────────────────────────────────────────

    pub fn state(&self) -> ClothState {
        if self.steps_taken == 0 {
            ClothState::Constructed
        } else {
            ClothState::Simulating
        }
    }

    /// The front-facing derived mesh.
    pub fn mesh(&self) -> &SurfaceMesh {
        &self.mesh
    }

    /// The back-facing derived mesh, present for double-sided materials.
    pub fn back_mesh(&self) -> Option<&SurfaceMesh> {
        self.back_mesh.as_ref()
    }

    /// Every derived mesh, front first.
    pub fn meshes(&self) -> impl Iterator<Item = &SurfaceMesh> {
        std::iter::once(&self.mesh).chain(self.back_mesh.as_ref())
    }

    pub fn point_masses(&self) -> &[PointMass] {
        &self.point_masses
    }

    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn material(&self) -> &ClothMaterial {
        &self.material
    }

    pub fn width_points(&self) -> u32 {
        self.layout.width_points
    }

    pub fn height_points(&self) -> u32 {
        self.layout.height_points
    }

    pub fn upper_left(&self) -> DVec3 {
        self.layout.upper_left
    }

    pub fn upper_right(&self) -> DVec3 {
        self.layout.upper_right
    }

    pub fn height(&self) -> Scalar {
        self.layout.height
    }

    /// Distance between the upper corners.
    pub fn width(&self) -> Scalar {
        self.width
    }

    /// Nominal area `width × height` used for the mass computation.
    pub fn area(&self) -> Scalar {
        self.width * self.layout.height
    }

    /// Mass shared by every particle.
    pub fn particle_mass(&self) -> Scalar {
        self.particle_mass
    }

    pub fn pinned_count(&self) -> usize {
        self.point_masses.iter().filter(|p| p.is_pinned()).count()
    }

    /// Index of grid point `(row, col)`, or `None` if out of range.
    pub fn grid_index(&self, row: u32, col: u32) -> Option<PointMassId> {
        (row < self.layout.height_points && col < self.layout.width_points)
            .then(|| PointMassId::from_grid(row, col, self.layout.width_points))
    }

    pub fn point_mass(&self, id: PointMassId) -> Option<&PointMass> {
        self.point_masses.get(id.index())
    }

    /// Total integration sub-steps run so far.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    pub fn simulated_time(&self) -> Scalar {
        self.simulated_time
    }

    // ─── Diagnostics ─────────────────────────────────────────

    /// Kinetic energy estimated from the last Verlet displacement over a
    /// sub-step of length `dt`.
    pub fn kinetic_energy(&self, dt: Scalar) -> Scalar {
        if dt <= 0.0 {
            return 0.0;
        }
        let sum_sq: Scalar = self
            .point_masses
            .iter()
            .map(|p| p.displacement().length_squared())
            .sum();
        0.5 * self.particle_mass * sum_sq / (dt * dt)
    }

    /// Energy stored in every spring at the current positions.
    pub fn elastic_energy(&self) -> Scalar {
        let stiffness = self.material.stiffness;
        let bending_weight = self.material.bending_weight;
        self.springs
            .iter()
            .map(|s| s.elastic_energy(&self.point_masses, stiffness, bending_weight))
            .sum()
    }

    /// Largest distance of any particle from its rest position.
    pub fn max_displacement(&self) -> Scalar {
        self.point_masses
            .iter()
            .map(|p| (p.current_position() - p.rest_position()).length())
            .fold(0.0, Scalar::max)
    }
}
