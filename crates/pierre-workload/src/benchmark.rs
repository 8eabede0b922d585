// ABOUTME: Match-based benchmark calculator producing readiness denominators per metric
// ABOUTME: Per-90 mean over qualifying matches for load metrics, all-time max for top speed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Benchmark Calculator
//!
//! A benchmark answers "what does a full effort look like" for one athlete:
//!
//! - load metrics: mean of `value / duration_minutes * 90` across whole-session
//!   matches up to the anchor date, skipping matches without a usable duration
//!   or without a known value for the metric
//! - top speed: highest speed observed anywhere in the athlete's history,
//!   not normalised, not anchored
//!
//! A metric with no qualifying sample has no benchmark. That absence is
//! carried as `None` so ratios are never computed against a false zero.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use pierre_core::models::{Metric, SessionRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::WorkloadConfig;

/// Benchmark for one metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    /// Benchmark value; `None` when no qualifying sample exists
    pub value: Option<f64>,
    /// Number of samples the value was computed from
    pub samples: usize,
}

impl Benchmark {
    const UNDEFINED: Self = Self {
        value: None,
        samples: 0,
    };
}

/// Benchmarks for every tracked metric of one athlete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSet {
    /// Anchor date matches were limited to
    pub anchor: Option<NaiveDate>,
    /// Matches with a usable duration on or before the anchor
    pub qualifying_matches: usize,
    benchmarks: BTreeMap<Metric, Benchmark>,
}

impl BenchmarkSet {
    /// Benchmark value for a metric
    #[must_use]
    pub fn value(&self, metric: Metric) -> Option<f64> {
        self.benchmarks.get(&metric).and_then(|b| b.value)
    }

    /// Full benchmark entry for a metric
    #[must_use]
    pub fn get(&self, metric: Metric) -> Benchmark {
        self.benchmarks
            .get(&metric)
            .copied()
            .unwrap_or(Benchmark::UNDEFINED)
    }

    /// Metrics without a benchmark
    pub fn undefined_metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        Metric::ALL
            .into_iter()
            .filter(|metric| self.value(*metric).is_none())
    }
}

/// Normalise a cumulative value to a 90-minute equivalent
///
/// Returns `None` for an unusable duration (zero, negative, or non-finite).
#[must_use]
pub fn per90(value: f64, duration_minutes: f64, per90_minutes: f64) -> Option<f64> {
    (duration_minutes.is_finite() && duration_minutes > 0.0)
        .then(|| value / duration_minutes * per90_minutes)
}

/// Computes match-based benchmarks
pub struct BenchmarkCalculator<'a> {
    config: &'a WorkloadConfig,
}

impl<'a> BenchmarkCalculator<'a> {
    /// Create a calculator bound to a configuration
    #[must_use]
    pub const fn new(config: &'a WorkloadConfig) -> Self {
        Self { config }
    }

    /// Compute benchmarks from one athlete's date-ordered timeline
    ///
    /// `anchor` limits which matches count towards load benchmarks; `None`
    /// uses every match. The top-speed benchmark ignores the anchor.
    #[must_use]
    pub fn compute(&self, timeline: &[&SessionRecord], anchor: Option<NaiveDate>) -> BenchmarkSet {
        let qualifying: Vec<(&SessionRecord, f64)> = timeline
            .iter()
            .filter(|r| r.is_match() && anchor.is_none_or(|a| r.date <= a))
            .filter_map(|r| r.usable_duration().map(|minutes| (*r, minutes)))
            .collect();

        let mut benchmarks = BTreeMap::new();
        for metric in Metric::LOAD {
            let samples: Vec<f64> = qualifying
                .iter()
                .filter_map(|(record, minutes)| {
                    record
                        .value(metric)
                        .and_then(|value| per90(value, *minutes, self.config.per90_minutes))
                })
                .collect();
            benchmarks.insert(metric, mean_benchmark(&samples));
        }
        benchmarks.insert(Metric::TopSpeed, Self::top_speed(timeline));

        let set = BenchmarkSet {
            anchor,
            qualifying_matches: qualifying.len(),
            benchmarks,
        };

        debug!(
            anchor = ?anchor,
            qualifying_matches = set.qualifying_matches,
            undefined = set.undefined_metrics().count(),
            "Computed match benchmarks"
        );
        set
    }

    /// Highest top speed across the whole timeline, matches and trainings alike
    fn top_speed(timeline: &[&SessionRecord]) -> Benchmark {
        let speeds: Vec<f64> = timeline
            .iter()
            .filter(|r| r.is_match() || r.is_training())
            .filter_map(|r| r.value(Metric::TopSpeed))
            .collect();
        Benchmark {
            value: speeds.iter().copied().reduce(f64::max),
            samples: speeds.len(),
        }
    }
}

#[allow(clippy::cast_precision_loss)] // Safe: sample counts are far below 2^52
fn mean_benchmark(samples: &[f64]) -> Benchmark {
    if samples.is_empty() {
        return Benchmark::UNDEFINED;
    }
    Benchmark {
        value: Some(samples.iter().sum::<f64>() / samples.len() as f64),
        samples: samples.len(),
    }
}
