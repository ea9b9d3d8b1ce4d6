//! Batch Session Simulation
//!
//! Runs many independently seeded sessions in parallel and summarizes
//! where the event weights ended up.

use std::path::PathBuf;

use clap::Parser;
use dread_engine::core::error::Result;
use dread_engine::session::{run_batch, BatchSummary};
use dread_engine::SessionConfig;

#[derive(Parser, Debug)]
#[command(name = "batch_sim")]
#[command(about = "Run N adaptive sessions in parallel and summarize final weights")]
struct Args {
    /// Session config (TOML). Built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of sessions
    #[arg(long, short = 'n', default_value_t = 100)]
    sessions: u64,

    /// First seed; session i uses base_seed + i
    #[arg(long, default_value_t = 0)]
    base_seed: u64,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dread_engine=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };

    let seeds: Vec<u64> = (0..args.sessions).map(|i| args.base_seed.wrapping_add(i)).collect();
    let start = std::time::Instant::now();
    let reports = run_batch(&config, &seeds)?;
    let summary = BatchSummary::from_reports(&reports);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Batch Session Simulation");
    println!("========================");
    println!(
        "{} sessions x {} ticks in {:.2}ms",
        summary.sessions,
        config.duration_ticks,
        start.elapsed().as_secs_f64() * 1000.0
    );
    println!("Mean heart rate: {:.1} bpm", summary.mean_signal);
    println!("Skipped checkpoints: {}", summary.skipped_checkpoints);
    println!("\n--- Final Weights ---");
    for weight in &summary.final_weights {
        println!(
            "{:<16} mean {:>5.2}  min {:>3}  max {:>3}",
            weight.event, weight.mean, weight.min, weight.max
        );
    }

    Ok(())
}
