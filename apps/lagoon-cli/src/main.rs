use std::path::PathBuf;

use clap::{Parser, Subcommand};
use glam::DVec3;
use lagoon_kernel::{Level, LevelConfig};
use lagoon_noise::{NoiseConfig, NoiseSynthesizer};
use lagoon_render::{DebugTextRenderer, RenderView, Renderer};
use lagoon_shadow::{ContactShadowProjector, ShadowConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lagoon-cli", about = "Headless driver for the lagoon water and shadow core")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run the per-frame update pass and print the final frame
    Simulate {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "60")]
        frames: u64,
        /// Seconds per frame
        #[arg(long, default_value = "0.016666667")]
        dt: f64,
        /// RNG seed (overrides the config file)
        #[arg(short, long)]
        seed: Option<u64>,
        /// Level config (.yaml, .yml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Rerun with the same seed and compare state hashes
        #[arg(long)]
        replay: bool,
    },
    /// Compute a contact shadow transform
    Shadow {
        /// Floor plane height
        #[arg(long, default_value = "-1.0", allow_hyphen_values = true)]
        floor: f64,
        /// Side size one unit above the floor
        #[arg(long, default_value = "0.5")]
        base: f64,
        /// Anchor height
        #[arg(long, allow_hyphen_values = true)]
        anchor: f64,
    },
    /// Sample a noise synthesizer
    Noise {
        #[arg(long, default_value = "1.0")]
        amplitude: f64,
        #[arg(long, default_value = "1.0")]
        frequency: f64,
        #[arg(long, default_value = "4")]
        octaves: usize,
        #[arg(long, default_value = "1.3")]
        growth: f64,
        #[arg(long, default_value = "42")]
        seed: u64,
        /// Number of samples
        #[arg(long, default_value = "10")]
        samples: usize,
        /// Distance between samples
        #[arg(long, default_value = "0.1")]
        step: f64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("lagoon-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", lagoon_common::crate_info());
            println!("noise: {}", lagoon_noise::crate_info());
            println!("water: {}", lagoon_water::crate_info());
            println!("shadow: {}", lagoon_shadow::crate_info());
            println!("render: {}", lagoon_render::crate_info());
        }
        Commands::Simulate {
            frames,
            dt,
            seed,
            config,
            replay,
        } => {
            let mut level_config = match config {
                Some(path) => LevelConfig::load(&path)?,
                None => LevelConfig::default(),
            };
            if let Some(seed) = seed {
                level_config.seed = seed;
            }
            println!(
                "Simulating: seed={}, frames={frames}, dt={dt}",
                level_config.seed
            );

            let level = run(&level_config, frames, dt)?;
            let output = DebugTextRenderer::new().render(&level, &RenderView::default());
            print!("{output}");

            if replay {
                let again = run(&level_config, frames, dt)?;
                println!(
                    "Replay: hash={:#x} vs {:#x} -> {}",
                    level.state_hash(),
                    again.state_hash(),
                    if level.state_hash() == again.state_hash() {
                        "OK"
                    } else {
                        "MISMATCH"
                    }
                );
            }
        }
        Commands::Shadow {
            floor,
            base,
            anchor,
        } => {
            let config = ShadowConfig {
                floor_height: floor,
                base_size: base,
            };
            let mut projector = ContactShadowProjector::new(config, DVec3::ZERO)?;
            let m = projector.recompute(anchor);
            println!("side_size={}", projector.side_size());
            for row in 0..4 {
                let r = m.row(row);
                println!("[{:>10.4} {:>10.4} {:>10.4} {:>10.4}]", r.x, r.y, r.z, r.w);
            }
        }
        Commands::Noise {
            amplitude,
            frequency,
            octaves,
            growth,
            seed,
            samples,
            step,
        } => {
            let config = NoiseConfig::new(amplitude, frequency, octaves).with_growth(growth);
            let synth = NoiseSynthesizer::from_config(&config, &mut StdRng::seed_from_u64(seed))?;
            for o in synth.octaves() {
                println!("octave: frequency={:.4} amplitude={:.4}", o.frequency, o.amplitude);
            }
            for i in 0..samples {
                let t = i as f64 * step;
                println!("{t:.3}\t{:.6}", synth.evaluate(t));
            }
        }
    }

    Ok(())
}

fn run(config: &LevelConfig, frames: u64, dt: f64) -> anyhow::Result<Level> {
    let mut level = Level::from_config(config)?;
    for _ in 0..frames {
        level.step(dt);
    }
    tracing::debug!(frames, hash = level.state_hash(), "simulation finished");
    Ok(level)
}
