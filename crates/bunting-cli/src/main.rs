//! bunting CLI: flag simulation, benchmarking, and file checks.

use clap::{Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "bunting")]
#[command(version, about = "bunting: mass-spring flags flapping in the wind")]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scene.
    Simulate {
        /// Scene file (TOML). Uses the built-in two-flag scene when omitted.
        #[arg(short, long)]
        config: Option<String>,

        /// Override the number of frames.
        #[arg(short, long)]
        frames: Option<u32>,

        /// Record the animation to a JSON file.
        #[arg(short, long)]
        output: Option<String>,

        /// Keep every n-th frame in the JSON output.
        #[arg(long, default_value_t = 1)]
        stride: u32,

        /// Write per-flag metrics as CSV.
        #[arg(short, long)]
        metrics: Option<String>,
    },

    /// Time a single hanging flag over a range of resolutions.
    Benchmark {
        /// Square resolutions to run.
        #[arg(short, long, value_delimiter = ',', default_values_t = [8u32, 16, 32, 48])]
        resolutions: Vec<u32>,

        /// Frames per resolution.
        #[arg(short, long, default_value_t = 120)]
        frames: u32,

        /// Integration sub-steps per frame.
        #[arg(short, long, default_value_t = 16)]
        sub_steps: u32,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate a scene (.toml) or surface mesh (.json).
    Validate {
        path: String,
    },

    /// Summarize an exported animation (.json).
    Inspect {
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Simulate {
            config,
            frames,
            output,
            stride,
            metrics,
        } => commands::simulate(
            config.as_deref(),
            frames,
            output.as_deref(),
            stride,
            metrics.as_deref(),
        ),
        Commands::Benchmark {
            resolutions,
            frames,
            sub_steps,
            output,
        } => commands::benchmark(&resolutions, frames, sub_steps, output.as_deref()),
        Commands::Validate { path } => commands::validate(&path),
        Commands::Inspect { path } => commands::inspect(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
