// ABOUTME: Tracked load metrics and the per-session metric value map
// ABOUTME: Metric labels match the GPS export columns; missing values stay unknown, never zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// GPS-tracked metrics evaluated by the readiness engine
///
/// Every metric except [`Metric::TopSpeed`] is a cumulative load: it is summed
/// over a period and normalised per 90 minutes for match benchmarks. Top speed
/// is a ceiling metric: it is maxed, never summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Total distance covered (m)
    Distance,
    /// High intensity running distance (m)
    HighIntensityRunning,
    /// Sprint distance (m)
    SprintDistance,
    /// Number of sprints
    SprintCount,
    /// Top speed reached (kph)
    TopSpeed,
    /// Number of accelerations
    Accelerations,
    /// Number of decelerations
    Decelerations,
}

impl Metric {
    /// All tracked metrics in dashboard order
    pub const ALL: [Self; 7] = [
        Self::Distance,
        Self::HighIntensityRunning,
        Self::SprintDistance,
        Self::SprintCount,
        Self::TopSpeed,
        Self::Accelerations,
        Self::Decelerations,
    ];

    /// Cumulative load metrics (everything except top speed)
    pub const LOAD: [Self; 6] = [
        Self::Distance,
        Self::HighIntensityRunning,
        Self::SprintDistance,
        Self::SprintCount,
        Self::Accelerations,
        Self::Decelerations,
    ];

    /// Column label used by the tracking export
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Distance => "Distance (m)",
            Self::HighIntensityRunning => "High Intensity Running (m)",
            Self::SprintDistance => "Sprint Distance (m)",
            Self::SprintCount => "No. of Sprints",
            Self::TopSpeed => "Top Speed (kph)",
            Self::Accelerations => "Accelerations",
            Self::Decelerations => "Decelerations",
        }
    }

    /// Whether the metric is a physical ceiling (maxed) rather than a load (summed)
    #[must_use]
    pub const fn is_ceiling(self) -> bool {
        matches!(self, Self::TopSpeed)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Metric {
    type Err = AppError;

    /// Accepts either the export column label or the snake case identifier
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|metric| {
                metric.label().eq_ignore_ascii_case(trimmed) || metric.key() == trimmed
            })
            .ok_or_else(|| AppError::invalid_input(format!("Unknown metric: '{trimmed}'")))
    }
}

impl Metric {
    const fn key(self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::HighIntensityRunning => "high_intensity_running",
            Self::SprintDistance => "sprint_distance",
            Self::SprintCount => "sprint_count",
            Self::TopSpeed => "top_speed",
            Self::Accelerations => "accelerations",
            Self::Decelerations => "decelerations",
        }
    }
}

/// Known metric values for one session
///
/// Absent and non-finite values are unknown. Callers must decide what unknown
/// means for their computation; the map never fabricates a zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricValues(BTreeMap<Metric, f64>);

impl MetricValues {
    /// Empty value set
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert; non-finite or negative values are dropped as unknown
    #[must_use]
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.set(metric, value);
        self
    }

    /// Record a value; non-finite or negative values are dropped as unknown
    pub fn set(&mut self, metric: Metric, value: f64) {
        if value.is_finite() && value >= 0.0 {
            self.0.insert(metric, value);
        } else {
            self.0.remove(&metric);
        }
    }

    /// Known value for a metric
    #[must_use]
    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.0.get(&metric).copied()
    }

    /// Number of known values
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no value is known
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate known values in metric order
    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.0.iter().map(|(metric, value)| (*metric, *value))
    }
}

impl FromIterator<(Metric, f64)> for MetricValues {
    fn from_iter<I: IntoIterator<Item = (Metric, f64)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (metric, value) in iter {
            values.set(metric, value);
        }
        values
    }
}
