//! CLI command implementations.

use bunting_cloth::ClothMaterial;
use bunting_math::DVec3;
use bunting_mesh::SurfaceMesh;
use bunting_render::{Animation, HeadlessRenderer, JsonFrameExporter, Renderer};
use bunting_scene::{FlagConfig, FlagMetrics, FlagScene, SceneConfig, SimulationConfig, WindConfig};
use bunting_telemetry::{EventBus, TracingSink};
use tracing::info;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

fn print_metrics(metrics: &[FlagMetrics]) {
    for m in metrics {
        println!("  {}", m.flag);
        println!("    Particles:     {} ({} springs)", m.vertex_count, m.spring_count);
        println!("    Avg frame:     {:.3}ms", m.avg_frame_time() * 1000.0);
        println!("    Max displace:  {:.4}m", m.max_displacement);
        println!("    Final KE:      {:.6e}", m.final_kinetic_energy);
        println!("    Final elastic: {:.6e}", m.final_elastic_energy);
    }
}

/// Run a scene from a config file or the built-in default.
pub fn simulate(
    config_path: Option<&str>,
    frames: Option<u32>,
    output_path: Option<&str>,
    stride: u32,
    metrics_path: Option<&str>,
) -> CommandResult {
    println!("bunting simulation");
    println!("──────────────────");

    let mut config = match config_path {
        Some(path) => {
            println!("Config: {path}");
            SceneConfig::load(path)?
        }
        None => {
            println!("Config: built-in scene");
            SceneConfig::default()
        }
    };
    if let Some(frames) = frames {
        config.simulation.frames = frames;
    }

    let mut scene = FlagScene::from_config(&config)?;
    println!(
        "Flags: {}  Frames: {}  Sub-steps: {}  ({:.2}s simulated)",
        scene.flags().len(),
        config.simulation.frames,
        config.simulation.sub_steps,
        config.simulation.duration(),
    );
    println!();

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::new(tracing::Level::DEBUG)));

    let mut renderer: Box<dyn Renderer> = match output_path {
        Some(path) => Box::new(JsonFrameExporter::new(path).with_stride(stride)),
        None => Box::new(HeadlessRenderer::new()),
    };
    let metrics = scene.run(renderer.as_mut(), &mut bus)?;

    print_metrics(&metrics);
    if let Some(path) = output_path {
        println!();
        println!("Animation written to: {path} ({} frames)", renderer.frame_count());
    }
    if let Some(path) = metrics_path {
        std::fs::write(path, FlagMetrics::to_csv(&metrics))?;
        println!("Metrics written to: {path}");
    }
    Ok(())
}

/// Run one hanging flag at each resolution and report timings.
pub fn benchmark(
    resolutions: &[u32],
    frames: u32,
    sub_steps: u32,
    output_path: Option<&str>,
) -> CommandResult {
    println!("bunting benchmark");
    println!("═════════════════");
    println!();

    let mut all_metrics = Vec::with_capacity(resolutions.len());
    for &n in resolutions {
        let config = SceneConfig {
            simulation: SimulationConfig {
                frames,
                sub_steps,
                ..Default::default()
            },
            wind: WindConfig::default(),
            flags: vec![FlagConfig {
                name: format!("flag_{n}x{n}"),
                upper_left: DVec3::new(0.0, 2.0, 0.0),
                upper_right: DVec3::new(1.5, 2.0, 0.0),
                height: 1.0,
                width_points: n,
                height_points: n,
                material: ClothMaterial::default(),
            }],
        };
        let mut scene = FlagScene::from_config(&config)?;
        println!("Running: {n}x{n} ({frames} frames, {sub_steps} sub-steps)");

        let metrics = scene.run(&mut HeadlessRenderer::new(), &mut EventBus::new())?;
        print_metrics(&metrics);
        println!();
        info!(resolution = n, "benchmark finished");
        all_metrics.extend(metrics);
    }

    let csv = FlagMetrics::to_csv(&all_metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }
    Ok(())
}

/// Validate a scene or a mesh.
pub fn validate(path: &str) -> CommandResult {
    println!("bunting validator");
    println!("─────────────────");

    if path.ends_with(".toml") {
        println!("Validating scene: {path}");
        let config = SceneConfig::load(path)?;
        // Construction catches what plain validation cannot, such as
        // springs collapsing below the minimum rest length.
        let scene = FlagScene::from_config(&config)?;
        for flag in scene.flags() {
            println!(
                "  {}: {} particles, {} springs, {} pinned",
                flag.name,
                flag.cloth.point_masses().len(),
                flag.cloth.springs().len(),
                flag.cloth.pinned_count(),
            );
        }
        println!("✅ Scene is valid.");
    } else if path.ends_with(".json") {
        println!("Validating mesh: {path}");
        let content = std::fs::read_to_string(path)?;
        let mesh: SurfaceMesh = serde_json::from_str(&content)?;
        mesh.validate()?;
        println!(
            "✅ Mesh is valid ({} verts, {} tris).",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
    } else {
        return Err(format!("unsupported file type: {path} (expected .toml or .json)").into());
    }
    Ok(())
}

/// Summarize an exported animation.
pub fn inspect(path: &str) -> CommandResult {
    println!("bunting animation inspector");
    println!("───────────────────────────");

    let animation = Animation::load(path)?;
    println!("Surfaces:   {}", animation.surfaces.len());
    for s in &animation.surfaces {
        println!("  {:<16} {} verts, {} tris", s.name, s.vertex_count, s.triangle_count());
    }
    println!("Frames:     {}", animation.frames.len());
    if let (Some(first), Some(last)) = (animation.frames.first(), animation.frames.last()) {
        println!("Time span:  {:.4}s .. {:.4}s", first.sim_time, last.sim_time);
    }
    if let Some((lo, hi)) = animation.y_range() {
        println!("Y range:    [{lo:.4}, {hi:.4}]");
    }
    Ok(())
}
