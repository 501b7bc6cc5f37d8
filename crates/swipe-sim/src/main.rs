use std::path::PathBuf;

use clap::Parser;

use swipe_sim::config::SimConfig;
use swipe_sim::logging::init_logging;
use swipe_sim::replay::ReplayRunner;

/// Deterministic replay harness for the swipedeck decision engine.
#[derive(Debug, Parser)]
#[command(
    name = "swipedeck-sim",
    author,
    version,
    about = "Deterministic gesture replay harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "sim/replay.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the RNG seed for random gesture generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the number of random gestures to generate.
    #[arg(long, value_name = "COUNT")]
    gestures: Option<usize>,

    /// Exit after validating the configuration (no replay is run).
    #[arg(long)]
    validate_only: bool,

    /// Emit per-tick settle telemetry regardless of config.
    #[arg(long)]
    log_tick_details: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = SimConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(seed) = cli.seed {
        if !config.override_random_seed(seed) {
            eprintln!("Warning: --seed ignored; configuration has no random gesture block.");
        }
    }

    if let Some(count) = cli.gestures {
        if !config.override_random_count(count) {
            eprintln!("Warning: --gestures ignored; configuration has no random gesture block.");
        }
    }

    if cli.log_tick_details {
        config.logging.tick_details = true;
    }

    config.validate()?;

    let outputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let scripted = config.gestures.scripted.len();
    let random = config
        .gestures
        .random
        .as_ref()
        .map(|r| r.count)
        .unwrap_or(0);
    let candidates = config.feed.to_candidates().len();

    println!(
        "Loaded configuration '{run_id}' with {candidates} candidate{} ({scripted} scripted, {random} random gestures)",
        if candidates == 1 { "" } else { "s" }
    );

    let _logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let runner = ReplayRunner::new(config, outputs);

    if cli.validate_only {
        println!("Validation-only mode: replay execution skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Replay complete for '{run_id}': {} gestures → {} rows at {}",
        summary.gestures_run,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!(
        "Outcomes: {} accepted, {} rejected, {} undecided ({} feed wraps)",
        summary.accepted, summary.rejected, summary.undecided, summary.wraps
    );
    println!("Final score: {}", summary.final_score);
    println!("Summary table: {}", summary.summary_path.display());

    Ok(())
}
