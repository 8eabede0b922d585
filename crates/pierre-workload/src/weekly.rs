// ABOUTME: Weekly aggregation of training sessions into ISO-week buckets with practice ordinals
// ABOUTME: Provides the evaluation week, previous-week lookup, and per-ordinal historical averages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Weekly Aggregator
//!
//! Training records are bucketed by ISO week. Load metrics are summed within
//! a week, top speed is maxed. Each training record also gets a 1-based
//! practice ordinal within its week, capped at the configured practices per
//! week so that a fourth same-week session folds into the last ordinal.
//!
//! An athlete without training in the evaluation week still gets a bucket:
//! every total is zero and the practice count is zero.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use pierre_core::models::{Metric, SessionRecord, WeekKey};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{PreviousWeekPolicy, WorkloadConfig};

/// Per-metric totals for a period
///
/// Every tracked metric is present. Unknown session values contribute
/// nothing, so a period without sessions is all zeros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricTotals(BTreeMap<Metric, f64>);

impl Default for MetricTotals {
    fn default() -> Self {
        Self::zero()
    }
}

impl MetricTotals {
    /// All metrics at zero
    #[must_use]
    pub fn zero() -> Self {
        Self(Metric::ALL.into_iter().map(|metric| (metric, 0.0)).collect())
    }

    /// Sum load metrics and max ceiling metrics over the records
    #[must_use]
    pub fn from_records<'r>(records: impl IntoIterator<Item = &'r SessionRecord>) -> Self {
        let mut totals = Self::zero();
        for record in records {
            for (metric, value) in record.metrics.iter() {
                let total = totals.0.entry(metric).or_insert(0.0);
                if metric.is_ceiling() {
                    *total = total.max(value);
                } else {
                    *total += value;
                }
            }
        }
        totals
    }

    /// Total for one metric
    #[must_use]
    pub fn get(&self, metric: Metric) -> f64 {
        self.0.get(&metric).copied().unwrap_or(0.0)
    }

    /// Whether any metric total is strictly positive
    #[must_use]
    pub fn any_positive(&self) -> bool {
        self.0.values().any(|total| *total > 0.0)
    }

    /// Iterate totals in metric order
    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.0.iter().map(|(metric, total)| (*metric, *total))
    }
}

/// Training totals for one athlete and one ISO week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyBucket {
    /// Athlete identifier
    pub athlete_id: String,
    /// ISO week of the bucket
    pub week: WeekKey,
    /// Per-metric totals (sum for loads, max for top speed)
    pub totals: MetricTotals,
    /// Training sessions counted into the bucket
    pub session_count: usize,
    /// Countable practices, capped at the configured practices per week
    pub practice_count: u32,
}

/// Result of the previous-week lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviousWeek {
    /// Week found; `None` when no earlier week qualifies
    pub week: Option<WeekKey>,
    /// Totals of that week, zero when none was found
    pub totals: MetricTotals,
}

/// Historical per-ordinal averages for each load metric
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrdinalAverages {
    by_ordinal: BTreeMap<u32, BTreeMap<Metric, f64>>,
}

impl OrdinalAverages {
    /// Average of a metric over every practice with this ordinal
    #[must_use]
    pub fn get(&self, ordinal: u32, metric: Metric) -> Option<f64> {
        self.by_ordinal
            .get(&ordinal)
            .and_then(|averages| averages.get(&metric))
            .copied()
    }

    /// Averages of one metric for ordinals `1..=practices`, index 0 = ordinal 1
    #[must_use]
    pub fn for_metric(&self, metric: Metric, practices: u32) -> Vec<Option<f64>> {
        (1..=practices)
            .map(|ordinal| self.get(ordinal, metric))
            .collect()
    }
}

/// Assign 1-based within-week practice ordinals to date-ordered training records
///
/// The ordinal restarts at 1 whenever the ISO week changes and never exceeds
/// `cap`.
#[must_use]
pub fn assign_practice_ordinals(records: &[&SessionRecord], cap: u32) -> Vec<u32> {
    let mut ordinals = Vec::with_capacity(records.len());
    let mut current: Option<(WeekKey, u32)> = None;

    for record in records {
        let week = record.week();
        let ordinal = match current {
            Some((seen, ordinal)) if seen == week => (ordinal + 1).min(cap),
            _ => 1.min(cap),
        };
        current = Some((week, ordinal));
        ordinals.push(ordinal);
    }
    ordinals
}

/// Buckets training records into ISO weeks
pub struct WeeklyAggregator<'a> {
    config: &'a WorkloadConfig,
}

impl<'a> WeeklyAggregator<'a> {
    /// Create an aggregator bound to a configuration
    #[must_use]
    pub const fn new(config: &'a WorkloadConfig) -> Self {
        Self { config }
    }

    /// Buckets for every week that holds at least one training record
    ///
    /// `training` must be the athlete's date-ordered whole-session trainings.
    #[must_use]
    pub fn buckets(&self, athlete_id: &str, training: &[&SessionRecord]) -> Vec<WeeklyBucket> {
        let mut by_week: BTreeMap<WeekKey, Vec<&SessionRecord>> = BTreeMap::new();
        for record in training {
            by_week.entry(record.week()).or_default().push(record);
        }

        by_week
            .into_iter()
            .map(|(week, records)| self.bucket(athlete_id, week, &records))
            .collect()
    }

    /// Bucket for the week containing `anchor`, limited to sessions on or before it
    ///
    /// Always returns a bucket; an empty week yields zero totals.
    #[must_use]
    pub fn evaluation_bucket(
        &self,
        athlete_id: &str,
        training: &[&SessionRecord],
        anchor: NaiveDate,
    ) -> WeeklyBucket {
        let week = WeekKey::from_date(anchor);
        let records: Vec<&SessionRecord> = training
            .iter()
            .copied()
            .filter(|r| week.contains(r.date) && r.date <= anchor)
            .collect();

        let bucket = self.bucket(athlete_id, week, &records);
        if bucket.session_count == 0 {
            debug!(athlete = athlete_id, %week, "No training in evaluation week");
        }
        bucket
    }

    /// Previous week used as the spike baseline for `evaluation_week`
    #[must_use]
    pub fn previous_week(
        &self,
        training: &[&SessionRecord],
        evaluation_week: WeekKey,
    ) -> PreviousWeek {
        match self.config.previous_week_policy {
            PreviousWeekPolicy::CalendarPreceding => {
                let week = evaluation_week.previous();
                PreviousWeek {
                    week: Some(week),
                    totals: MetricTotals::from_records(
                        training.iter().copied().filter(|r| week.contains(r.date)),
                    ),
                }
            }
            PreviousWeekPolicy::NearestNonZero => self
                .buckets("", training)
                .into_iter()
                .rev()
                .filter(|bucket| bucket.week < evaluation_week)
                .find(|bucket| bucket.totals.any_positive())
                .map_or_else(
                    || PreviousWeek {
                        week: None,
                        totals: MetricTotals::zero(),
                    },
                    |bucket| PreviousWeek {
                        week: Some(bucket.week),
                        totals: bucket.totals,
                    },
                ),
        }
    }

    /// Average of each load metric per practice ordinal over training up to `until`
    ///
    /// Records without a value for a metric do not count towards that
    /// metric's average.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Safe: practice counts are far below 2^52
    pub fn ordinal_averages(&self, training: &[&SessionRecord], until: NaiveDate) -> OrdinalAverages {
        let history: Vec<&SessionRecord> = training
            .iter()
            .copied()
            .filter(|r| r.date <= until)
            .collect();
        let ordinals = assign_practice_ordinals(&history, self.config.practices_per_week);

        let mut sums: BTreeMap<(u32, Metric), (f64, usize)> = BTreeMap::new();
        for (record, ordinal) in history.iter().zip(ordinals) {
            for metric in Metric::LOAD {
                if let Some(value) = record.value(metric) {
                    let entry = sums.entry((ordinal, metric)).or_insert((0.0, 0));
                    entry.0 += value;
                    entry.1 += 1;
                }
            }
        }

        let mut averages = OrdinalAverages::default();
        for ((ordinal, metric), (sum, count)) in sums {
            averages
                .by_ordinal
                .entry(ordinal)
                .or_default()
                .insert(metric, sum / count as f64);
        }
        averages
    }

    fn bucket(&self, athlete_id: &str, week: WeekKey, records: &[&SessionRecord]) -> WeeklyBucket {
        let session_count = records.len();
        let practice_count = u32::try_from(session_count)
            .unwrap_or(u32::MAX)
            .min(self.config.practices_per_week);

        WeeklyBucket {
            athlete_id: athlete_id.to_owned(),
            week,
            totals: MetricTotals::from_records(records.iter().copied()),
            session_count,
            practice_count,
        }
    }
}
