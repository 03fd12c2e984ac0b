//! Dais CLI
//!
//! Runs the event page behaviors outside a browser.
//!
//! ## Usage
//!
//! ```bash
//! # Time left until the opening ceremony
//! dais countdown
//!
//! # ...as seen from a given instant
//! dais countdown --now 2025-10-22T16:26:56Z
//!
//! # Tick along in real time, stopping after 5 renders
//! dais countdown --live --ticks 5
//!
//! # Replay a scripted visit against the fixture page
//! dais simulate visit.json --json
//! ```

mod live;
mod scenario;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use dais_core::{
    fixture, Clock, CountdownPhase, HeadlessDocument, SiteConfig, Simulation, SystemClock,
};
use tracing_subscriber::EnvFilter;

/// Dais - event page behaviors
#[derive(Parser)]
#[command(name = "dais")]
#[command(version = "0.1.0")]
#[command(about = "Dais - event page behavior simulator and countdown")]
struct Cli {
    /// Site configuration (JSON); defaults apply to anything left out
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the time left until the event
    Countdown {
        /// Evaluate at this RFC 3339 instant instead of now
        #[arg(long, conflicts_with = "live")]
        now: Option<DateTime<Utc>>,

        /// Keep ticking with the real clock
        #[arg(long)]
        live: bool,

        /// Stop live mode after this many ticks
        #[arg(long, requires = "live")]
        ticks: Option<usize>,
    },
    /// Replay a JSON scenario against the fixture page
    Simulate {
        /// Scenario file
        scenario: PathBuf,

        /// Print the final report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<SiteConfig> {
    match path {
        Some(path) => SiteConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(SiteConfig::default()),
    }
}

/// One line describing the countdown as currently rendered
fn countdown_line(doc: &HeadlessDocument, phase: CountdownPhase, config: &SiteConfig) -> String {
    match phase {
        CountdownPhase::Finished => config.countdown.completion_message.clone(),
        CountdownPhase::Inactive => "countdown unavailable".to_string(),
        _ => {
            let [d, h, m, s] = ["#cd-d", "#cd-h", "#cd-m", "#cd-s"]
                .map(|selector| doc.select(selector).map(|node| doc.text(node)).unwrap_or("--"));
            format!("{d}d {h}h {m}m {s}s")
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Countdown { live: true, ticks, .. } => {
            live::run(config, ticks).await?;
        }
        Commands::Countdown { now, .. } => {
            let now = now
                .map(|now| now.timestamp_millis())
                .unwrap_or_else(|| SystemClock.now_millis());
            let sim = Simulation::new(fixture::event_page(), config.clone(), now)?;
            println!("{}", countdown_line(sim.doc(), sim.page().countdown_phase(), &config));
        }
        Commands::Simulate { scenario, json } => {
            let scenario = scenario::Scenario::from_file(&scenario)?;
            let report = scenario::run(&scenario, config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.render());
            }
        }
    }

    Ok(())
}
