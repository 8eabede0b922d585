// ABOUTME: Post-match readiness command for pierre-readiness
// ABOUTME: Compares training after each athlete's latest match against that match
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use pierre_workload::{AnalysisRequest, SessionStore, TeamAnalyzer, WorkloadConfig};

use crate::helpers::output::{print_empty_state, print_json};

/// Print post-match readiness; returns the number of athletes reported
pub fn run(config: &WorkloadConfig, store: &SessionStore, request: &AnalysisRequest) -> Result<usize> {
    let assessment = TeamAnalyzer::new(config).post_match(store, request)?;

    if let Some(reason) = assessment.reason() {
        print_empty_state("post-match", reason);
    }

    print_json(&assessment)?;
    Ok(assessment.available().map_or(0, Vec::len))
}
