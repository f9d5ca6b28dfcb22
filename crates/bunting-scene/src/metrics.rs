//! Per-flag results of a scene run.

use serde::{Deserialize, Serialize};

/// Metrics collected for one flag over a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagMetrics {
    pub flag: String,
    pub vertex_count: usize,
    pub spring_count: usize,
    pub triangle_count: usize,
    pub frames: u32,
    pub sub_steps: u32,
    /// Wall-clock time spent in `simulate` + `recompute` (seconds).
    pub total_wall_time: f64,
    /// Slowest single frame (seconds).
    pub max_frame_time: f64,
    /// Largest distance of any particle from rest, over every frame.
    pub max_displacement: f64,
    pub final_kinetic_energy: f64,
    pub final_elastic_energy: f64,
}

impl FlagMetrics {
    /// Mean wall-clock time per frame (seconds).
    pub fn avg_frame_time(&self) -> f64 {
        if self.frames == 0 {
            0.0
        } else {
            self.total_wall_time / self.frames as f64
        }
    }

    pub fn to_csv_header() -> String {
        "flag,vertex_count,spring_count,triangle_count,frames,sub_steps,total_wall_time_s,avg_frame_ms,max_frame_ms,max_displacement,final_ke,final_elastic".to_string()
    }

    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{:.6},{:.4},{:.4},{:.6},{:.6e},{:.6e}",
            self.flag,
            self.vertex_count,
            self.spring_count,
            self.triangle_count,
            self.frames,
            self.sub_steps,
            self.total_wall_time,
            self.avg_frame_time() * 1000.0,
            self.max_frame_time * 1000.0,
            self.max_displacement,
            self.final_kinetic_energy,
            self.final_elastic_energy,
        )
    }

    /// Header plus one row per flag.
    pub fn to_csv(metrics: &[FlagMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
