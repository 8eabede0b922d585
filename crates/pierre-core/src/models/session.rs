// ABOUTME: Tracked session records (match and training) and their raw export counterpart
// ABOUTME: SessionRecord is the cleaned, typed row every engine computation consumes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::metric::{Metric, MetricValues};
use super::week::WeekKey;
use crate::errors::AppError;

/// Kind of tracked session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    /// Competitive match, the source of benchmarks
    Match,
    /// Training session, the source of weekly load
    Training,
}

impl SessionType {
    /// Label used by the tracking export
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Match => "Match Session",
            Self::Training => "Training Session",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SessionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "match session" | "match" => Ok(Self::Match),
            "training session" | "training" => Ok(Self::Training),
            other => Err(AppError::invalid_input(format!(
                "Unsupported session type: '{other}'"
            ))),
        }
    }
}

/// Portion of a session a record covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    /// The full session; the only segment used for readiness math
    WholeSession,
    /// Drill, half, or any other partial split
    Other,
}

impl Segment {
    /// Parse an export split name; anything but a whole session is `Other`
    #[must_use]
    pub fn from_split_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "whole session" | "whole_session" | "all" => Self::WholeSession,
            _ => Self::Other,
        }
    }
}

/// One cleaned row of tracked activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Athlete identifier
    pub athlete_id: String,
    /// Team (squad) label, when the export carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    /// Session date (timezone-naive, day granularity)
    pub date: NaiveDate,
    /// Match or training
    pub session_type: SessionType,
    /// Whole session or partial split
    pub segment: Segment,
    /// Minutes on the pitch; unknown when the export left it blank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
    /// Known metric values
    #[serde(default)]
    pub metrics: MetricValues,
}

impl SessionRecord {
    /// Create a whole-session record with no metrics
    #[must_use]
    pub fn new(athlete_id: impl Into<String>, date: NaiveDate, session_type: SessionType) -> Self {
        Self {
            athlete_id: athlete_id.into(),
            team: None,
            date,
            session_type,
            segment: Segment::WholeSession,
            duration_minutes: None,
            metrics: MetricValues::new(),
        }
    }

    /// Set the team label
    #[must_use]
    pub fn team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// Set the segment
    #[must_use]
    pub fn segment(mut self, segment: Segment) -> Self {
        self.segment = segment;
        self
    }

    /// Set the duration in minutes
    #[must_use]
    pub fn duration(mut self, minutes: f64) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    /// Set one metric value
    #[must_use]
    pub fn metric(mut self, metric: Metric, value: f64) -> Self {
        self.metrics.set(metric, value);
        self
    }

    /// Known value of a metric
    #[must_use]
    pub fn value(&self, metric: Metric) -> Option<f64> {
        self.metrics.get(metric)
    }

    /// Duration usable as a per-90 divisor (finite and strictly positive)
    #[must_use]
    pub fn usable_duration(&self) -> Option<f64> {
        self.duration_minutes
            .filter(|minutes| minutes.is_finite() && *minutes > 0.0)
    }

    /// ISO week containing the session
    #[must_use]
    pub fn week(&self) -> WeekKey {
        WeekKey::from_date(self.date)
    }

    /// Whether this is a whole-session match record
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.session_type == SessionType::Match && self.segment == Segment::WholeSession
    }

    /// Whether this is a whole-session training record
    #[must_use]
    pub fn is_training(&self) -> bool {
        self.session_type == SessionType::Training && self.segment == Segment::WholeSession
    }
}

/// One exported row before cleaning
///
/// Every field is optional: the session store drops rows missing any of the
/// athlete, date, session type, or segment before the engine sees them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSessionRecord {
    /// Athlete identifier
    #[serde(default)]
    pub athlete_id: Option<String>,
    /// Team (squad) label
    #[serde(default)]
    pub team: Option<String>,
    /// Session date, already coerced by the exporter
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Session type label ("Match Session", "Training Session")
    #[serde(default)]
    pub session_type: Option<String>,
    /// Split name ("Whole Session" or a partial split)
    #[serde(default)]
    pub segment: Option<String>,
    /// Minutes on the pitch
    #[serde(default)]
    pub duration_minutes: Option<f64>,
    /// Metric values keyed by export column label
    #[serde(default)]
    pub metrics: BTreeMap<String, Option<f64>>,
}
