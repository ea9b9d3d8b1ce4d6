//! Dread Engine - Session Runner
//!
//! Runs one adaptive session: prints a line per tick, a report per
//! checkpoint, and the final weight table.

use std::path::PathBuf;

use clap::Parser;
use dread_engine::core::error::Result;
use dread_engine::session::SessionController;
use dread_engine::SessionConfig;

/// Adaptive horror session - simulate, learn heart-rate impact, reweight events
#[derive(Parser, Debug)]
#[command(name = "dread-engine")]
#[command(about = "Run one adaptive-difficulty session and report how event weights moved")]
struct Args {
    /// Session config (TOML). Built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Session length in ticks (overrides the config)
    #[arg(long)]
    duration: Option<u64>,

    /// Retrain every N ticks after the first checkpoint
    #[arg(long)]
    checkpoint_every: Option<u64>,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,

    /// Write the JSON report here
    #[arg(long)]
    output: Option<PathBuf>,

    /// Suppress the per-tick trace
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dread_engine=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(duration) = args.duration {
        config.duration_ticks = duration;
    }
    if args.checkpoint_every.is_some() {
        config.checkpoint_every = args.checkpoint_every;
    }

    let text = args.format != "json";
    let mut session = SessionController::new(config)?;
    let mut reported = 0;

    while let Some(sample) = session.step()? {
        if text && !args.quiet {
            println!(
                "t={:>4}s  bpm={:>6.1}  event={}",
                sample.time, sample.signal, sample.event
            );
        }
        if text {
            for checkpoint in &session.checkpoints()[reported..] {
                println!("\n{}\n", checkpoint.summary());
            }
        }
        reported = session.checkpoints().len();
    }

    let report = session.into_report();

    if text {
        println!("\n{}", report.summary());
    } else {
        println!("{}", report.to_json()?);
    }

    if let Some(path) = &args.output {
        std::fs::write(path, report.to_json()?)?;
        tracing::info!("Report written to {}", path.display());
    }

    Ok(())
}
