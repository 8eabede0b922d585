// ABOUTME: Main library entry point for the Pierre readiness analysis tool
// ABOUTME: Wires structured logging and dataset loading around the workload engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Readiness
//!
//! Computes per-athlete training readiness and acute:chronic workload ratios
//! from GPS session exports.
//!
//! ## Architecture
//!
//! - **`pierre-core`**: errors, session models, and constants
//! - **`pierre-workload`**: the computation engine (session store,
//!   benchmarks, weekly aggregation, readiness, ACWR, team passes)
//! - **this crate**: logging setup and dataset snapshot loading for the
//!   `pierre-readiness` binary
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pierre_readiness::dataset::load_snapshot;
//! use pierre_workload::{AnalysisRequest, TeamAnalyzer, WorkloadConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = WorkloadConfig::load()?;
//! let (store, _summary) = load_snapshot("sessions.json")?;
//! let report = TeamAnalyzer::new(&config).analyze(&store, &AnalysisRequest::default().team("U17"))?;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! # Ok(())
//! # }
//! ```

/// Dataset snapshot loading
pub mod dataset;

/// Structured logging configuration
pub mod logging;
