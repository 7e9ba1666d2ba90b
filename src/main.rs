//! Arena Duel runner
//!
//! Reads a match description from `MATCH_FILE`, simulates it to completion
//! and prints the run summary (event log plus digests) as JSON on stdout.

use std::time::Instant;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arena_duel::config::{Config, LogFormat};
use arena_duel::game::{DuelMatch, MatchDescription};
use arena_duel::verify::RunSummary;

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level, config.log_format);

    let text = std::fs::read_to_string(&config.match_file)
        .with_context(|| format!("Failed to read {}", config.match_file.display()))?;
    let description = MatchDescription::from_json(&text)
        .with_context(|| format!("Invalid match description in {}", config.match_file.display()))?;

    info!(
        file = %config.match_file.display(),
        weapon_set = description.weapon_set_version(),
        "Loaded match description"
    );

    let started = Instant::now();
    let mut duel = DuelMatch::new(&description)?;
    let winner = duel.run();
    info!(
        winner = %winner,
        ticks = duel.tick(),
        elapsed_micros = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
        "Simulation complete"
    );

    let mut summary = RunSummary::from_match(&duel)?;
    if !config.summary_events {
        summary = summary.without_events();
    }

    let output = if config.summary_pretty {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };
    println!("{output}");

    Ok(())
}

/// Initialize tracing/logging on stderr so stdout carries only the summary
fn init_tracing(log_level: &str, format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
