// ABOUTME: Core data models for the readiness platform
// ABOUTME: Re-exports session records, metrics, and ISO week keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `SessionRecord`: one cleaned match or training row for an athlete
//! - `RawSessionRecord`: the same row as exported, before completeness checks
//! - `Metric` / `MetricValues`: tracked GPS metrics and their known values
//! - `WeekKey`: ISO (year, week) bucket used for weekly aggregation

mod metric;
mod session;
mod week;

pub use metric::{Metric, MetricValues};
pub use session::{RawSessionRecord, Segment, SessionRecord, SessionType};
pub use week::WeekKey;
