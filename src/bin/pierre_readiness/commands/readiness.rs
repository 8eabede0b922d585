// ABOUTME: Weekly readiness command for pierre-readiness
// ABOUTME: Runs one team analysis pass and prints anchors plus per-athlete readiness
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use pierre_workload::{AnalysisRequest, SessionStore, TeamAnalyzer, WorkloadConfig};
use serde_json::json;
use tracing::info;

use crate::helpers::output::{print_empty_state, print_json};

/// Print weekly readiness; returns the number of athletes reported
pub fn run(config: &WorkloadConfig, store: &SessionStore, request: &AnalysisRequest) -> Result<usize> {
    let report = TeamAnalyzer::new(config).analyze(store, request)?;

    if let Some(reason) = report.readiness.reason() {
        print_empty_state("readiness", reason);
    }
    let athletes = report.readiness.available().map_or(0, Vec::len);
    if let Some(results) = report.readiness.available() {
        let spiking = results.iter().filter(|r| r.has_spike()).count();
        info!(athletes, spiking, "Readiness computed");
    }

    print_json(&json!({
        "team": report.team,
        "anchors": report.anchors,
        "readiness": report.readiness,
    }))?;
    Ok(athletes)
}
