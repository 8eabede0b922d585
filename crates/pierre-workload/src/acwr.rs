// ABOUTME: Acute:Chronic Workload Ratio engine with daily-rolling and weekly-bucketed cadences
// ABOUTME: Classifies each ratio into undertrained, optimal, or overtrained training-load zones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # ACWR Engine
//!
//! - acute load: metric sum over the trailing acute window (7 days or one ISO week)
//! - chronic load: mean of the trailing `chronic_weeks` acute windows
//! - ACWR: acute / chronic, undefined when the chronic load is zero
//!
//! Both cadences sample the same definition. Periods without training count
//! as zero load, and windows reaching before the first training are padded
//! with zeros. Only training records contribute; top speed is not a load.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use pierre_core::models::{Metric, SessionRecord, WeekKey};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{AcwrCadence, WorkloadConfig, ZoneBand};

/// Training-load zone of an ACWR value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingLoadZone {
    /// Below the optimal band
    Undertrained,
    /// Inside the inclusive optimal band
    Optimal,
    /// Above the optimal band
    Overtrained,
}

impl ZoneBand {
    /// Classify a ratio; both band edges are optimal
    #[must_use]
    pub fn classify(&self, acwr: f64) -> TrainingLoadZone {
        if acwr < self.low {
            TrainingLoadZone::Undertrained
        } else if acwr <= self.high {
            TrainingLoadZone::Optimal
        } else {
            TrainingLoadZone::Overtrained
        }
    }
}

/// One sample of the ACWR series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcwrPoint {
    /// Last day covered by the acute window
    pub period_end: NaiveDate,
    /// ISO week of the sample for weekly cadence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week: Option<WeekKey>,
    /// Acute load
    pub acute_load: f64,
    /// Chronic load
    pub chronic_load: f64,
    /// Acute:chronic ratio; `None` when the chronic load is zero
    pub acwr: Option<f64>,
    /// Zone of the ratio; `None` when the ratio is undefined
    pub zone: Option<TrainingLoadZone>,
}

/// ACWR series for one athlete and one load metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcwrSeries {
    /// Athlete identifier
    pub athlete_id: String,
    /// Load metric
    pub metric: Metric,
    /// Sampling cadence
    pub cadence: AcwrCadence,
    /// Whether the history spans a full chronic window
    pub sufficient_history: bool,
    /// Samples in chronological order
    pub points: Vec<AcwrPoint>,
}

impl AcwrSeries {
    /// Most recent sample
    #[must_use]
    pub fn latest(&self) -> Option<&AcwrPoint> {
        self.points.last()
    }
}

/// Computes ACWR series
pub struct AcwrEngine<'a> {
    config: &'a WorkloadConfig,
}

impl<'a> AcwrEngine<'a> {
    /// Create an engine bound to a configuration
    #[must_use]
    pub const fn new(config: &'a WorkloadConfig) -> Self {
        Self { config }
    }

    /// Acute:chronic ratio; `None` when the chronic load is zero or not finite
    #[must_use]
    pub fn acwr_ratio(acute: f64, chronic: f64) -> Option<f64> {
        (chronic.is_finite() && chronic > 0.0).then(|| acute / chronic)
    }

    /// ACWR series for one metric
    ///
    /// The series runs from the athlete's first training up to `until`
    /// (default: the last training). Returns `None` for top speed, which is
    /// not a cumulative load. An athlete without training gets an empty series.
    #[must_use]
    pub fn series(
        &self,
        athlete_id: &str,
        timeline: &[&SessionRecord],
        metric: Metric,
        until: Option<NaiveDate>,
    ) -> Option<AcwrSeries> {
        if metric.is_ceiling() {
            return None;
        }

        let loads: Vec<(NaiveDate, f64)> = timeline
            .iter()
            .filter(|r| r.is_training() && until.is_none_or(|end| r.date <= end))
            .map(|r| (r.date, r.value(metric).unwrap_or(0.0)))
            .collect();

        let cadence = self.config.acwr.cadence;
        let (points, sufficient_history) = match (loads.first(), loads.last()) {
            (Some((first, _)), Some((last, _))) => {
                let end = until.unwrap_or(*last);
                match cadence {
                    AcwrCadence::Daily => self.daily(&loads, *first, end),
                    AcwrCadence::Weekly => self.weekly(&loads, *first, end),
                }
            }
            _ => (Vec::new(), false),
        };

        debug!(
            athlete = athlete_id,
            metric = %metric,
            %cadence,
            points = points.len(),
            sufficient_history,
            "Computed ACWR series"
        );

        Some(AcwrSeries {
            athlete_id: athlete_id.to_owned(),
            metric,
            cadence,
            sufficient_history,
            points,
        })
    }

    fn point(
        &self,
        period_end: NaiveDate,
        week: Option<WeekKey>,
        acute_load: f64,
        chronic_load: f64,
    ) -> AcwrPoint {
        let acwr = Self::acwr_ratio(acute_load, chronic_load);
        AcwrPoint {
            period_end,
            week,
            acute_load,
            chronic_load,
            acwr,
            zone: acwr.map(|ratio| self.config.acwr.band.classify(ratio)),
        }
    }

    /// One point per day; windows are rolling day ranges ending on that day
    fn daily(
        &self,
        loads: &[(NaiveDate, f64)],
        first: NaiveDate,
        end: NaiveDate,
    ) -> (Vec<AcwrPoint>, bool) {
        let Ok(span) = usize::try_from((end - first).num_days() + 1) else {
            return (Vec::new(), false);
        };

        let mut daily = vec![0.0; span];
        for (date, load) in loads {
            if let Ok(offset) = usize::try_from((*date - first).num_days()) {
                if let Some(slot) = daily.get_mut(offset) {
                    *slot += load;
                }
            }
        }

        // prefix[i] = sum of daily[..i]
        let mut prefix = Vec::with_capacity(span + 1);
        prefix.push(0.0);
        for load in &daily {
            let running = prefix.last().copied().unwrap_or(0.0);
            prefix.push(running + load);
        }

        let acute_days = usize::try_from(self.config.acwr.acute_days).unwrap_or(usize::MAX);
        let chronic_weeks = self.config.acwr.chronic_weeks;
        let chronic_days = acute_days.saturating_mul(usize::try_from(chronic_weeks).unwrap_or(1));
        let window_sum = |day: usize, length: usize| {
            prefix[day + 1] - prefix[(day + 1).saturating_sub(length)]
        };

        let points = (0..span)
            .filter_map(|day| {
                let period_end = first.checked_add_days(Days::new(u64::try_from(day).ok()?))?;
                let acute = window_sum(day, acute_days);
                let chronic = window_sum(day, chronic_days) / f64::from(chronic_weeks);
                Some(self.point(period_end, None, acute, chronic))
            })
            .collect();

        (points, span >= chronic_days)
    }

    /// One point per ISO week; chronic load is the mean of trailing weekly sums
    fn weekly(
        &self,
        loads: &[(NaiveDate, f64)],
        first: NaiveDate,
        end: NaiveDate,
    ) -> (Vec<AcwrPoint>, bool) {
        let mut sums: BTreeMap<WeekKey, f64> = BTreeMap::new();
        for (date, load) in loads {
            *sums.entry(WeekKey::from_date(*date)).or_insert(0.0) += load;
        }

        let last_week = WeekKey::from_date(end);
        let mut weeks = Vec::new();
        let mut week = WeekKey::from_date(first);
        while week <= last_week {
            weeks.push((week, sums.get(&week).copied().unwrap_or(0.0)));
            week = week.next();
        }

        let chronic_weeks = self.config.acwr.chronic_weeks;
        let window = usize::try_from(chronic_weeks).unwrap_or(usize::MAX);
        let points = weeks
            .iter()
            .enumerate()
            .map(|(index, (week, acute))| {
                let start = (index + 1).saturating_sub(window);
                let trailing: f64 = weeks[start..=index].iter().map(|(_, sum)| sum).sum();
                let chronic = trailing / f64::from(chronic_weeks);
                self.point(week.sunday().min(end), Some(*week), *acute, chronic)
            })
            .collect();

        (points, weeks.len() >= window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_boundaries_are_inclusive() {
        let band = ZoneBand::default();
        assert_eq!(band.classify(0.79), TrainingLoadZone::Undertrained);
        assert_eq!(band.classify(0.80), TrainingLoadZone::Optimal);
        assert_eq!(band.classify(1.30), TrainingLoadZone::Optimal);
        assert_eq!(band.classify(1.31), TrainingLoadZone::Overtrained);
    }

    #[test]
    fn test_zero_chronic_is_undefined() {
        assert_eq!(AcwrEngine::acwr_ratio(120.0, 0.0), None);
        assert_eq!(AcwrEngine::acwr_ratio(100.0, 50.0), Some(2.0));
    }
}
