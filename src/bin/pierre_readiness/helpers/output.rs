// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output helpers for pierre-readiness
// ABOUTME: Writes reports as pretty JSON to stdout and empty states to stderr

use std::io::{self, Write};

use anyhow::Result;
use pierre_workload::UndefinedReason;
use serde::Serialize;

/// Print a report as pretty JSON on stdout
pub fn print_json(report: &impl Serialize) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, report)?;
    writeln!(stdout)?;
    Ok(())
}

/// Tell the user why a report section is empty
pub fn print_empty_state(section: &str, reason: UndefinedReason) {
    eprintln!("{section}: {}", reason.message());
}
