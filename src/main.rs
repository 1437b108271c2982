//! Hexspin entry point
//!
//! Headless runner: builds a simulation from a preset or config file, feeds it
//! fixed frame times, and prints snapshots as JSON lines on stdout.

use std::error::Error;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;

use hexspin::config::Preset;
use hexspin::{FixedStepRunner, SimulationConfig};

#[derive(Parser, Debug)]
#[command(name = "hexspin", about = "Ball bouncing inside a spinning polygon")]
struct Args {
    /// JSON config file (missing keys fall back to the preset)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting preset
    #[arg(long, value_enum, default_value_t = Preset::Classic)]
    preset: Preset,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Wall-clock length of each frame in milliseconds
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    frame_ms: f32,

    /// Emit a snapshot every N frames
    #[arg(long, default_value_t = 1)]
    every: u32,

    /// Only emit frames where a collision happened
    #[arg(long)]
    collisions_only: bool,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn load_config(args: &Args) -> Result<SimulationConfig, Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::from_preset(args.preset),
    };
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(&args)?;
    if args.dump_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    log::info!(
        "Hexspin starting: preset {}, {} frames at {:.2} ms",
        args.preset.as_str(),
        args.frames,
        args.frame_ms
    );

    let mut runner = FixedStepRunner::new(config)?;
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let every = args.every.max(1);
    let mut hits = 0u64;

    for frame in 0..args.frames {
        let ticks = runner.update(args.frame_ms / 1000.0);
        let snapshot = runner.snapshot();
        if ticks > 0 && snapshot.collided {
            hits += 1;
        }

        if frame % every != 0 || (args.collisions_only && !snapshot.collided) {
            continue;
        }
        serde_json::to_writer(&mut out, &snapshot)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    log::info!(
        "Done: {} ticks, {} frames with collisions",
        runner.state.time_ticks,
        hits
    );
    Ok(())
}
