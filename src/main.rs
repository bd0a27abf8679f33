use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing::{info, Level};

use wheel_engine::config::{load_config, load_config_from, Config, MAX_FRAME_RATE};
use wheel_engine::geometry::segment_center_angle;
use wheel_engine::host::{run_virtual, VirtualClock};
use wheel_engine::random::StdRng;
use wheel_engine::{generate_layout, FrameQueue, RandSource, SpinEngine};
use wheel_render::write_snapshot;

mod host;

#[derive(Parser)]
#[command(name = "roulette-wheel")]
#[command(about = "European roulette wheel with an animated ball", long_about = None)]
struct Cli {
    #[arg(long, global = true, help = "Config file to use instead of the default location")]
    config: Option<PathBuf>,
    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Spin the wheel and print where the ball lands")]
    Spin {
        #[arg(long, help = "Seed for a reproducible outcome")]
        seed: Option<u64>,
        #[arg(
            long,
            help = "Frame rate override",
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_FRAME_RATE))
        )]
        fps: Option<u32>,
        #[arg(long, help = "Animate on the wall clock instead of a simulated one")]
        realtime: bool,
        #[arg(long, help = "Print the outcome as JSON")]
        json: bool,
    },
    #[command(about = "Show the wheel order with colors and center angles")]
    Layout {
        #[arg(long)]
        json: bool,
    },
    #[command(about = "Spin and write a PNG or SVG snapshot")]
    Render {
        #[arg(short, long, help = "Output file, .png or .svg")]
        output: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, help = "Stop the animation this many milliseconds in")]
        at_ms: Option<f64>,
    },
    #[command(about = "Print the effective configuration")]
    Config,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn random_source(seed: Option<u64>) -> RandSource<StdRng> {
    match seed {
        Some(seed) => {
            info!("Using seed {}", seed);
            RandSource::seeded(seed)
        }
        None => RandSource::from_os_entropy(),
    }
}

async fn spin(config: &Config, seed: Option<u64>, realtime: bool, json: bool) -> Result<()> {
    let queue = FrameQueue::new();
    let mut engine = SpinEngine::new(config, queue.clone(), random_source(seed));
    engine.spin();

    let summary = if realtime {
        host::run_realtime(&mut engine, &queue, config.host.frame_rate, |_| {}).await
    } else {
        let mut clock = VirtualClock::new(0.0, config.host.frame_interval_ms());
        run_virtual(&mut engine, &queue, &mut clock, None, |_| {})
    };

    let outcome = summary.outcome.context("Spin ended without settling")?;
    if json {
        println!("{}", serde_json::to_string(&outcome)?);
    } else {
        println!("Ball landed on: {} ({})", outcome.number, outcome.color);
    }
    Ok(())
}

fn show_layout(json: bool) -> Result<()> {
    let layout = generate_layout();

    if json {
        let entries: Vec<_> = layout
            .iter()
            .enumerate()
            .map(|(index, segment)| {
                json!({
                    "index": index,
                    "number": segment.number,
                    "color": segment.color,
                    "center_angle": segment_center_angle(index),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for (index, segment) in layout.iter().enumerate() {
        println!(
            "{:>2}  {:>2}  {:<5}  {:>7.2}°",
            index,
            segment.number,
            segment.color.to_string(),
            segment_center_angle(index).to_degrees()
        );
    }
    Ok(())
}

fn render(config: &Config, output: PathBuf, seed: Option<u64>, at_ms: Option<f64>) -> Result<()> {
    let queue = FrameQueue::new();
    let mut engine = SpinEngine::new(config, queue.clone(), random_source(seed));
    engine.spin();

    let mut clock = VirtualClock::new(0.0, config.host.frame_interval_ms());
    let summary = run_virtual(&mut engine, &queue, &mut clock, at_ms, |_| {});

    write_snapshot(&output, config, &engine.frame())?;
    if engine.is_spinning() {
        println!("Wrote {} mid-spin", output.display());
    } else if let Some(outcome) = summary.outcome {
        println!("Wrote {} with the ball on {}", output.display(), outcome);
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    };

    match cli.command {
        Commands::Spin { seed, fps, realtime, json } => {
            if let Some(fps) = fps {
                config.host.frame_rate = fps;
            }
            spin(&config, seed, realtime, json).await?;
        }
        Commands::Layout { json } => {
            show_layout(json)?;
        }
        Commands::Render { output, seed, at_ms } => {
            render(&config, output, seed, at_ms)?;
        }
        Commands::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}
