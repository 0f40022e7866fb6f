use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use polarled_config::{PinLevel, Scenario};

#[derive(Parser, Debug)]
#[command(author, version, about = "Polarled Simulator", long_about = None)]
struct Args {
    /// Path to a scenario script (YAML)
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Serial bytes to feed to the UART (ignored when --script is given)
    #[arg(short, long, default_value = "")]
    input: String,

    /// Initial pushbutton level: high or low
    #[arg(short, long, default_value = "low")]
    button: PinLevel,

    /// Number of polling-loop iterations to run (default: 100)
    #[arg(long, default_value = "100")]
    iterations: u64,

    /// Enable verbose execution tracing
    #[arg(short, long)]
    trace: bool,

    /// Write a JSON snapshot of the final board state
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.trace {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    info!("Starting Polarled Simulator");

    let scenario = if let Some(path) = &args.script {
        info!("Loading scenario script: {:?}", path);
        Scenario::from_file(path)?
    } else {
        Scenario::ad_hoc(args.input.clone(), args.button, args.iterations)?
    };

    let run = polarled_sim::execute(&scenario);

    info!("Iterations run: {}", run.outcome.iterations_run);
    info!("Final mode: {:?}", run.outcome.final_mode);
    info!("LED: {}", if run.outcome.led_on { "on" } else { "off" });

    if let Some(path) = &args.snapshot {
        let snapshot = run.board.snapshot();
        std::fs::write(path, serde_json::to_string_pretty(&snapshot)?)
            .with_context(|| format!("Failed to write snapshot to {:?}", path))?;
        info!("Snapshot written to {:?}", path);
    }

    if !scenario.assertions.is_empty() {
        polarled_sim::check_assertions(&scenario, &run.outcome)?;
        info!("{} assertion(s) passed", scenario.assertions.len());
    }

    Ok(())
}
