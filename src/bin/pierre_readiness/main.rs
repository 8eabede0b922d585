// ABOUTME: Pierre readiness CLI - weekly readiness, ACWR, and post-match reports from a dataset
// ABOUTME: Loads a JSON session snapshot, runs one analysis pass, and prints JSON to stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Weekly readiness for every U17 player, anchored on the latest match and training
//! pierre-readiness readiness --input sessions.json --team U17
//!
//! # Pin the evaluation week
//! pierre-readiness readiness --input sessions.json --training-anchor 2025-03-14
//!
//! # Daily-rolling ACWR for one player and one metric
//! pierre-readiness acwr --input sessions.json --athlete "Player 7" --cadence daily --metric "Distance (m)"
//!
//! # Readiness since each player's latest match
//! pierre-readiness post-match --input sessions.json --team U16
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use pierre_core::models::Metric;
use pierre_readiness::dataset::load_snapshot;
use pierre_readiness::logging::{AppLogger, LoggingConfig};
use pierre_workload::{AcwrCadence, AnalysisRequest, WorkloadConfig};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "pierre-readiness",
    about = "Training readiness and workload analysis",
    long_about = "Computes per-player readiness ratios, spike flags, and acute:chronic workload ratios from a GPS session export."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

/// Dataset and selection shared by every command
#[derive(Args)]
struct Selection {
    /// Dataset snapshot (JSON array of session rows)
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Restrict to one team (e.g. U17)
    #[arg(long, short = 't')]
    team: Option<String>,

    /// Restrict the output to one athlete
    #[arg(long, short = 'a')]
    athlete: Option<String>,
}

impl Selection {
    fn request(&self) -> AnalysisRequest {
        let mut request = AnalysisRequest::default();
        request.team.clone_from(&self.team);
        request.athlete.clone_from(&self.athlete);
        request
    }
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Weekly readiness ratios and spike flags
    Readiness {
        #[command(flatten)]
        selection: Selection,

        /// Latest match date used for benchmarks (default: latest match in the selection)
        #[arg(long)]
        match_anchor: Option<NaiveDate>,

        /// Date whose ISO week is evaluated (default: latest training in the selection)
        #[arg(long)]
        training_anchor: Option<NaiveDate>,
    },

    /// Acute:chronic workload ratio series
    Acwr {
        #[command(flatten)]
        selection: Selection,

        /// Sampling cadence (daily or weekly)
        #[arg(long)]
        cadence: Option<AcwrCadence>,

        /// Load metric label or key; repeat for several (default: every load metric)
        #[arg(long, short = 'm')]
        metric: Vec<Metric>,

        /// Last date of the series (default: latest training in the selection)
        #[arg(long)]
        until: Option<NaiveDate>,
    },

    /// Readiness since each athlete's most recent match
    PostMatch {
        #[command(flatten)]
        selection: Selection,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging
    };
    logging.init()?;

    let mut config = WorkloadConfig::load()?;
    let started = Instant::now();

    let (name, athletes) = match cli.command {
        Command::Readiness {
            selection,
            match_anchor,
            training_anchor,
        } => {
            let (store, summary) = load_snapshot(&selection.input)?;
            AppLogger::log_ingest(&selection.input.display().to_string(), &summary);

            let mut request = selection.request();
            request.match_anchor = match_anchor;
            request.training_anchor = training_anchor;
            ("readiness", commands::readiness::run(&config, &store, &request)?)
        }
        Command::Acwr {
            selection,
            cadence,
            metric,
            until,
        } => {
            if let Some(cadence) = cadence {
                config.acwr.cadence = cadence;
            }
            let (store, summary) = load_snapshot(&selection.input)?;
            AppLogger::log_ingest(&selection.input.display().to_string(), &summary);

            let mut request = selection.request();
            request.training_anchor = until;
            if !metric.is_empty() {
                request = request.acwr_metrics(metric);
            }
            ("acwr", commands::acwr::run(&config, &store, &request)?)
        }
        Command::PostMatch { selection } => {
            let (store, summary) = load_snapshot(&selection.input)?;
            AppLogger::log_ingest(&selection.input.display().to_string(), &summary);

            let request = selection.request();
            ("post-match", commands::post_match::run(&config, &store, &request)?)
        }
    };

    AppLogger::log_command(name, athletes, started.elapsed().as_millis());
    info!("Done");
    Ok(())
}
