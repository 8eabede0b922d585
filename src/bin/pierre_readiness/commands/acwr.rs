// ABOUTME: ACWR command for pierre-readiness
// ABOUTME: Prints acute:chronic workload ratio series per athlete and metric
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use pierre_workload::{AnalysisRequest, SessionStore, TeamAnalyzer, WorkloadConfig};
use serde_json::json;

use crate::helpers::output::{print_empty_state, print_json};

/// Print ACWR series; returns the number of athletes reported
pub fn run(config: &WorkloadConfig, store: &SessionStore, request: &AnalysisRequest) -> Result<usize> {
    let report = TeamAnalyzer::new(config).analyze(store, request)?;

    if let Some(reason) = report.acwr.reason() {
        print_empty_state("acwr", reason);
    }

    print_json(&json!({
        "team": report.team,
        "cadence": config.acwr.cadence,
        "band": config.acwr.band,
        "acwr": report.acwr,
    }))?;
    Ok(report.acwr.available().map_or(0, Vec::len))
}
