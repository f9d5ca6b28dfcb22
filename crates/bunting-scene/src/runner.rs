//! Frame runner: steps every flag each frame and feeds the renderer.
//!
//! Per frame, every cloth receives `simulate(frame_dt, sub_steps,
//! [gravity, wind(t)])` followed by `recompute()`, where `t` is the
//! simulation time at the start of the frame. Flags are stepped in scene
//! order on the calling thread.

use std::time::Instant;

use bunting_cloth::Cloth;
use bunting_math::DVec3;
use bunting_render::{RenderFrame, Renderer, SurfaceLayout};
use bunting_telemetry::{EventBus, EventKind, SimulationEvent};
use bunting_types::{BuntingResult, Scalar};
use tracing::{debug, info};

use crate::config::{SceneConfig, SimulationConfig, WindConfig};
use crate::metrics::FlagMetrics;

/// A named cloth in the scene.
#[derive(Debug, Clone)]
pub struct Flag {
    pub name: String,
    pub cloth: Cloth,
}

#[derive(Debug, Clone, Default)]
struct FlagTally {
    wall_time: f64,
    max_frame_time: f64,
    max_displacement: f64,
}

/// Every flag of a scene plus the shared frame clock.
#[derive(Debug, Clone)]
pub struct FlagScene {
    simulation: SimulationConfig,
    wind: WindConfig,
    flags: Vec<Flag>,
    tallies: Vec<FlagTally>,
    frame: u32,
}

impl FlagScene {
    /// Validates the configuration and builds every cloth.
    pub fn from_config(config: &SceneConfig) -> BuntingResult<Self> {
        config.validate()?;
        let flags = config
            .flags
            .iter()
            .map(|f| {
                Ok(Flag {
                    name: f.name.clone(),
                    cloth: f.build()?,
                })
            })
            .collect::<BuntingResult<Vec<_>>>()?;

        info!(
            flags = flags.len(),
            particles = flags.iter().map(|f| f.cloth.point_masses().len()).sum::<usize>(),
            "scene built"
        );
        Ok(Self {
            simulation: config.simulation.clone(),
            wind: config.wind.clone(),
            tallies: vec![FlagTally::default(); flags.len()],
            flags,
            frame: 0,
        })
    }

    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    pub fn flag(&self, name: &str) -> Option<&Flag> {
        self.flags.iter().find(|f| f.name == name)
    }

    pub fn simulation(&self) -> &SimulationConfig {
        &self.simulation
    }

    /// Frames stepped so far.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Simulation time at the start of the next frame.
    pub fn time(&self) -> Scalar {
        self.frame as Scalar * self.simulation.frame_dt
    }

    /// Acceleration list handed to every cloth for the frame starting at `t`.
    pub fn accelerations_at(&self, t: Scalar) -> [DVec3; 2] {
        [self.simulation.gravity, self.wind.at(t)]
    }

    /// Static buffers of every surface, in the order frames list them.
    ///
    /// Back faces follow their front face and are named `<flag>/back`.
    pub fn surface_layouts(&self) -> Vec<SurfaceLayout> {
        let mut layouts = Vec::new();
        for flag in &self.flags {
            layouts.push(SurfaceLayout::from_mesh(flag.name.clone(), flag.cloth.mesh()));
            if let Some(back) = flag.cloth.back_mesh() {
                layouts.push(SurfaceLayout::from_mesh(format!("{}/back", flag.name), back));
            }
        }
        layouts
    }

    /// Positions and normals of every surface at the current state.
    pub fn capture(&self) -> RenderFrame {
        let frame = self.frame.saturating_sub(1);
        RenderFrame::capture(
            frame,
            self.time(),
            self.flags.iter().flat_map(|f| f.cloth.meshes()),
        )
    }

    /// Steps every flag by one frame, emitting per-flag events on `bus`.
    pub fn step_frame(&mut self, bus: Option<&EventBus>) {
        let t = self.time();
        let accelerations = self.accelerations_at(t);
        let frame = self.frame;
        let emit = |kind| {
            if let Some(bus) = bus {
                bus.emit(SimulationEvent::new(frame, kind));
            }
        };
        emit(EventKind::FrameBegin {
            sim_time: t,
            wind: accelerations[1].to_array(),
        });

        let sub_dt = self.simulation.sub_step_dt();
        for (flag, tally) in self.flags.iter_mut().zip(&mut self.tallies) {
            let start = Instant::now();
            flag.cloth
                .simulate(self.simulation.frame_dt, self.simulation.sub_steps, &accelerations);
            flag.cloth.recompute();
            let elapsed = start.elapsed().as_secs_f64();

            let displacement = flag.cloth.max_displacement();
            tally.wall_time += elapsed;
            tally.max_frame_time = tally.max_frame_time.max(elapsed);
            tally.max_displacement = tally.max_displacement.max(displacement);

            emit(EventKind::FlagStepped {
                flag: flag.name.clone(),
                max_displacement: displacement,
            });
            emit(EventKind::Energy {
                flag: flag.name.clone(),
                kinetic: flag.cloth.kinetic_energy(sub_dt),
                elastic: flag.cloth.elastic_energy(),
            });
        }
        self.frame += 1;
    }

    /// Runs the configured number of frames, submitting each to `renderer`.
    pub fn run(
        &mut self,
        renderer: &mut dyn Renderer,
        bus: &mut EventBus,
    ) -> BuntingResult<Vec<FlagMetrics>> {
        let frames = self.simulation.frames;
        self.run_frames(frames, renderer, bus)
    }

    /// Runs `frames` frames from the current state.
    pub fn run_frames(
        &mut self,
        frames: u32,
        renderer: &mut dyn Renderer,
        bus: &mut EventBus,
    ) -> BuntingResult<Vec<FlagMetrics>> {
        renderer.init(&self.surface_layouts())?;
        bus.emit(SimulationEvent::new(
            self.frame,
            EventKind::SceneStart {
                flags: self.flags.len() as u32,
                frames,
                sub_steps: self.simulation.sub_steps,
            },
        ));

        let run_start = Instant::now();
        for _ in 0..frames {
            let frame_start = Instant::now();
            self.step_frame(Some(&*bus));
            renderer.submit_frame(&self.capture())?;
            bus.emit(SimulationEvent::new(
                self.frame - 1,
                EventKind::FrameEnd {
                    wall_time: frame_start.elapsed().as_secs_f64(),
                },
            ));
            bus.flush();
        }
        renderer.finalize()?;

        let wall_time = run_start.elapsed().as_secs_f64();
        bus.emit(SimulationEvent::new(self.frame, EventKind::SceneEnd { wall_time }));
        bus.finish();
        debug!(frames, wall_time, renderer = renderer.name(), "scene run complete");

        Ok(self.metrics())
    }

    /// Metrics for every flag over all frames stepped so far.
    pub fn metrics(&self) -> Vec<FlagMetrics> {
        let sub_dt = self.simulation.sub_step_dt();
        self.flags
            .iter()
            .zip(&self.tallies)
            .map(|(flag, tally)| FlagMetrics {
                flag: flag.name.clone(),
                vertex_count: flag.cloth.mesh().vertex_count(),
                spring_count: flag.cloth.springs().len(),
                triangle_count: flag.cloth.mesh().triangle_count(),
                frames: self.frame,
                sub_steps: self.simulation.sub_steps,
                total_wall_time: tally.wall_time,
                max_frame_time: tally.max_frame_time,
                max_displacement: tally.max_displacement,
                final_kinetic_energy: flag.cloth.kinetic_energy(sub_dt),
                final_elastic_energy: flag.cloth.elastic_energy(),
            })
            .collect()
    }
}
