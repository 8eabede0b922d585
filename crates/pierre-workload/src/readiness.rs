// ABOUTME: Readiness engine comparing current-week training load against match benchmarks
// ABOUTME: Applies ratio capping, week-over-week spike detection with projection, and top-speed bands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Readiness Engine
//!
//! For each metric the engine reports how much of a match-equivalent load the
//! athlete has trained in the evaluation week:
//!
//! ```text
//! ratio = training_value / benchmark     (0 when the benchmark is missing or zero)
//! ```
//!
//! Load metrics are also checked for a week-over-week spike against the
//! previous week's total. Once the current week already exceeds the threshold
//! the spike is actual; otherwise the practices still to come are projected
//! from the athlete's historical per-ordinal averages.
//!
//! Top speed is maxed rather than summed and carries its own band
//! classification instead of a spike flag.

use chrono::NaiveDate;
use pierre_core::models::{Metric, SessionRecord, WeekKey};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::benchmark::BenchmarkCalculator;
use crate::config::WorkloadConfig;
use crate::team::Anchors;
use crate::weekly::{MetricTotals, WeeklyAggregator};

/// Week-over-week spike flag for a load metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpikeFlag {
    /// No spike, or no previous week to compare against
    #[default]
    None,
    /// The week's training so far already exceeds the threshold
    SpikeActual,
    /// Projecting the remaining practices exceeds the threshold
    SpikeProjected,
}

/// Top-speed ratio band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedBand {
    /// Below half of the top-speed benchmark
    BelowHalf,
    /// Half up to the developing threshold
    Developing,
    /// Developing threshold up to near-maximal
    Building,
    /// At or above the near-maximal threshold
    NearMaximal,
}

/// Readiness of one athlete for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessResult {
    /// Metric evaluated
    pub metric: Metric,
    /// Week total (sum for loads, max for top speed)
    pub training_value: f64,
    /// Match benchmark; `None` means "no data"
    pub benchmark_value: Option<f64>,
    /// Capped readiness ratio, 0 when the benchmark is missing or zero
    pub ratio: f64,
    /// Spike flag, always `None` for top speed
    pub flag: SpikeFlag,
    /// Previous-week total the spike check compared against
    pub previous_value: f64,
    /// Projected week total, when the week is incomplete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projected_value: Option<f64>,
}

/// Orthogonal top-speed check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopSpeedCheck {
    /// Band of the top-speed ratio; `None` without a top-speed benchmark
    pub band: Option<SpeedBand>,
    /// Near-maximal speed has not been reached this week
    pub near_max_warning: bool,
}

/// Weekly readiness report for one athlete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteReadiness {
    /// Athlete identifier
    pub athlete_id: String,
    /// Week under evaluation
    pub week: WeekKey,
    /// Training sessions in the evaluation week up to the anchor
    pub session_count: usize,
    /// Countable practices in the evaluation week
    pub practice_count: u32,
    /// Week used as the spike baseline; `None` when there is none
    pub previous_week: Option<WeekKey>,
    /// Matches that contributed to the benchmarks
    pub benchmark_matches: usize,
    /// Results in dashboard metric order
    pub results: Vec<ReadinessResult>,
    /// Top-speed band and warning
    pub top_speed: TopSpeedCheck,
}

impl AthleteReadiness {
    /// Result for one metric
    #[must_use]
    pub fn result(&self, metric: Metric) -> Option<&ReadinessResult> {
        self.results.iter().find(|result| result.metric == metric)
    }

    /// Whether any load metric carries a spike flag
    #[must_use]
    pub fn has_spike(&self) -> bool {
        self.results
            .iter()
            .any(|result| result.flag != SpikeFlag::None)
    }
}

/// Post-match readiness of one athlete for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMatchMetric {
    /// Metric evaluated
    pub metric: Metric,
    /// Training total after the match (sum for loads, max for top speed)
    pub training_value: f64,
    /// Raw value recorded in the match
    pub match_value: Option<f64>,
    /// Capped ratio, 0 when the match value is missing or zero
    pub ratio: f64,
}

/// Readiness since the athlete's most recent match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMatchReadiness {
    /// Athlete identifier
    pub athlete_id: String,
    /// Date of the most recent match
    pub match_date: NaiveDate,
    /// Dates of the training sessions counted after it
    pub training_dates: Vec<NaiveDate>,
    /// Results in dashboard metric order
    pub results: Vec<PostMatchMetric>,
}

/// Computes readiness ratios and spike flags
pub struct ReadinessEngine<'a> {
    config: &'a WorkloadConfig,
}

impl<'a> ReadinessEngine<'a> {
    /// Create an engine bound to a configuration
    #[must_use]
    pub const fn new(config: &'a WorkloadConfig) -> Self {
        Self { config }
    }

    /// Ratio of a training value to its reference, capped
    ///
    /// A missing, zero, or non-finite reference yields 0, never NaN.
    #[must_use]
    pub fn readiness_ratio(&self, training_value: f64, reference: Option<f64>) -> f64 {
        match reference {
            Some(reference) if reference.is_finite() && reference > 0.0 => {
                let ratio = training_value / reference;
                if ratio.is_finite() {
                    self.config.ratio_cap.apply(ratio.max(0.0))
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }

    /// Spike flag for a load metric
    ///
    /// `ordinal_averages[i]` is the historical average of practice ordinal
    /// `i + 1`; unknown averages project as zero. A week that already exceeds
    /// the threshold is an actual spike whether or not it is complete, so the
    /// projection only runs for an incomplete week still under it. Without a
    /// positive previous-week total there is nothing to compare against.
    #[must_use]
    pub fn evaluate_spike(
        &self,
        current: f64,
        previous: f64,
        practice_count: u32,
        ordinal_averages: &[Option<f64>],
    ) -> SpikeFlag {
        self.spike_with_projection(current, previous, practice_count, ordinal_averages)
            .0
    }

    /// Top-speed band for a ratio
    #[must_use]
    pub fn speed_band(&self, ratio: f64) -> SpeedBand {
        let bands = &self.config.speed_bands;
        if ratio < bands.half {
            SpeedBand::BelowHalf
        } else if ratio < bands.developing {
            SpeedBand::Developing
        } else if ratio < bands.near_maximal {
            SpeedBand::Building
        } else {
            SpeedBand::NearMaximal
        }
    }

    /// Weekly readiness for one athlete
    ///
    /// `timeline` is the athlete's date-ordered records. Benchmarks use
    /// matches up to `anchors.match_date`; the evaluation week is the ISO
    /// week containing `anchors.training_date`.
    #[must_use]
    pub fn assess(
        &self,
        athlete_id: &str,
        timeline: &[&SessionRecord],
        anchors: &Anchors,
    ) -> AthleteReadiness {
        let training: Vec<&SessionRecord> = timeline
            .iter()
            .copied()
            .filter(|r| r.is_training())
            .collect();

        let benchmarks = BenchmarkCalculator::new(self.config).compute(timeline, anchors.match_date);
        let aggregator = WeeklyAggregator::new(self.config);
        let bucket = aggregator.evaluation_bucket(athlete_id, &training, anchors.training_date);
        let previous = aggregator.previous_week(&training, bucket.week);
        let averages = aggregator.ordinal_averages(&training, anchors.training_date);

        let results: Vec<ReadinessResult> = Metric::ALL
            .into_iter()
            .map(|metric| {
                let training_value = bucket.totals.get(metric);
                let benchmark_value = benchmarks.value(metric);
                let previous_value = previous.totals.get(metric);
                let (flag, projected_value) = if metric.is_ceiling() {
                    (SpikeFlag::None, None)
                } else {
                    self.spike_with_projection(
                        training_value,
                        previous_value,
                        bucket.practice_count,
                        &averages.for_metric(metric, self.config.practices_per_week),
                    )
                };

                ReadinessResult {
                    metric,
                    training_value,
                    benchmark_value,
                    ratio: self.readiness_ratio(training_value, benchmark_value),
                    flag,
                    previous_value,
                    projected_value,
                }
            })
            .collect();

        let top_speed = self.top_speed_check(
            bucket.totals.get(Metric::TopSpeed),
            benchmarks.value(Metric::TopSpeed),
        );

        debug!(
            athlete = athlete_id,
            week = %bucket.week,
            practices = bucket.practice_count,
            previous_week = ?previous.week,
            benchmark_matches = benchmarks.qualifying_matches,
            "Assessed weekly readiness"
        );

        AthleteReadiness {
            athlete_id: athlete_id.to_owned(),
            week: bucket.week,
            session_count: bucket.session_count,
            practice_count: bucket.practice_count,
            previous_week: previous.week,
            benchmark_matches: benchmarks.qualifying_matches,
            results,
            top_speed,
        }
    }

    /// Readiness accumulated since the athlete's most recent match
    ///
    /// Counts the first `practices_per_week` trainings strictly after the
    /// latest whole-session match and compares them to that match's raw
    /// values. Returns `None` when the athlete has no match or no training
    /// after it.
    #[must_use]
    pub fn assess_post_match(
        &self,
        athlete_id: &str,
        timeline: &[&SessionRecord],
    ) -> Option<PostMatchReadiness> {
        let last_match = timeline.iter().rev().copied().find(|r| r.is_match())?;

        let limit = usize::try_from(self.config.practices_per_week).unwrap_or(usize::MAX);
        let sessions: Vec<&SessionRecord> = timeline
            .iter()
            .copied()
            .filter(|r| r.is_training() && r.date > last_match.date)
            .take(limit)
            .collect();
        if sessions.is_empty() {
            debug!(athlete = athlete_id, match_date = %last_match.date, "No training after latest match");
            return None;
        }

        let totals = MetricTotals::from_records(sessions.iter().copied());
        let results = Metric::ALL
            .into_iter()
            .map(|metric| {
                let training_value = totals.get(metric);
                let match_value = last_match.value(metric);
                PostMatchMetric {
                    metric,
                    training_value,
                    match_value,
                    ratio: self.readiness_ratio(training_value, match_value),
                }
            })
            .collect();

        Some(PostMatchReadiness {
            athlete_id: athlete_id.to_owned(),
            match_date: last_match.date,
            training_dates: sessions.iter().map(|r| r.date).collect(),
            results,
        })
    }

    fn spike_with_projection(
        &self,
        current: f64,
        previous: f64,
        practice_count: u32,
        ordinal_averages: &[Option<f64>],
    ) -> (SpikeFlag, Option<f64>) {
        let cap = self.config.practices_per_week;
        let projected = (practice_count < cap).then(|| {
            current
                + (practice_count + 1..=cap)
                    .filter_map(|ordinal| {
                        let index = usize::try_from(ordinal - 1).ok()?;
                        ordinal_averages.get(index).copied().flatten()
                    })
                    .sum::<f64>()
        });

        if !(previous.is_finite() && previous > 0.0) {
            return (SpikeFlag::None, projected);
        }

        let threshold = previous * self.config.spike_threshold;
        let flag = if current > threshold {
            SpikeFlag::SpikeActual
        } else if projected.is_some_and(|total| total > threshold) {
            SpikeFlag::SpikeProjected
        } else {
            SpikeFlag::None
        };
        (flag, projected)
    }

    fn top_speed_check(&self, week_max: f64, benchmark: Option<f64>) -> TopSpeedCheck {
        match benchmark {
            Some(benchmark) if benchmark.is_finite() && benchmark > 0.0 => {
                let ratio = week_max / benchmark;
                TopSpeedCheck {
                    band: Some(self.speed_band(ratio)),
                    near_max_warning: ratio < self.config.speed_bands.near_maximal,
                }
            }
            _ => TopSpeedCheck {
                band: None,
                near_max_warning: false,
            },
        }
    }
}
