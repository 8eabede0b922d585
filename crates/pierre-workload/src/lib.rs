// ABOUTME: Readiness and workload engine turning session timelines into readiness and ACWR results
// ABOUTME: Pure, synchronous computations over an immutable session store snapshot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Workload
//!
//! Data flows leaf-first:
//!
//! ```text
//! raw records -> SessionStore -> { BenchmarkCalculator, WeeklyAggregator } -> ReadinessEngine
//!                SessionStore -> AcwrEngine
//! ```
//!
//! Every engine borrows a [`WorkloadConfig`] and holds no other state, so a
//! team pass can evaluate athletes in parallel. The engine never formats
//! percentages or labels; it returns numeric ratios and flag enums.

/// Engine configuration and rule variants
pub mod config;

/// Cleaned per-athlete session timelines
pub mod session_store;

/// Match-based per-90 and top-speed benchmarks
pub mod benchmark;

/// ISO-week buckets, practice ordinals, and previous-week lookup
pub mod weekly;

/// Readiness ratios, spike flags, and post-match readiness
pub mod readiness;

/// Acute:chronic workload ratio series and zones
pub mod acwr;

/// Team analysis passes over a selection
pub mod team;

pub use acwr::{AcwrEngine, AcwrPoint, AcwrSeries, TrainingLoadZone};
pub use benchmark::{Benchmark, BenchmarkCalculator, BenchmarkSet};
pub use config::{
    AcwrCadence, AcwrConfig, ConfigError, PreviousWeekPolicy, RatioCap, SpeedBandThresholds,
    WorkloadConfig, ZoneBand,
};
pub use readiness::{
    AthleteReadiness, PostMatchMetric, PostMatchReadiness, ReadinessEngine, ReadinessResult,
    SpeedBand, SpikeFlag, TopSpeedCheck,
};
pub use session_store::{IngestSummary, SessionFilter, SessionStore};
pub use team::{
    AnalysisRequest, Anchors, Assessment, AthleteAcwr, TeamAnalyzer, TeamReport, UndefinedReason,
};
pub use weekly::{
    assign_practice_ordinals, MetricTotals, OrdinalAverages, PreviousWeek, WeeklyAggregator,
    WeeklyBucket,
};
