// ABOUTME: In-memory session store holding cleaned, date-ordered timelines per athlete
// ABOUTME: Enforces the completeness precondition once and exposes filtered session views
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Session Store
//!
//! Raw export rows enter here exactly once. Rows missing the athlete, date,
//! session type, or segment are dropped; everything downstream may assume
//! those fields are present. Metric values are not validated beyond dropping
//! non-finite numbers to "unknown".

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use pierre_core::models::{
    Metric, MetricValues, RawSessionRecord, Segment, SessionRecord, SessionType,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Outcome of cleaning a raw export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestSummary {
    /// Rows accepted into the store
    pub accepted: usize,
    /// Rows dropped for a missing athlete, date, session type, or segment
    pub dropped_missing_fields: usize,
    /// Rows dropped because the session type is neither match nor training
    pub dropped_unsupported_type: usize,
    /// Metric column labels that are not tracked
    pub ignored_metric_labels: BTreeSet<String>,
}

/// Filter for [`SessionStore::sessions_of`]
///
/// Date bounds are inclusive. The default filter matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionFilter {
    session_type: Option<SessionType>,
    segment: Option<Segment>,
    from: Option<NaiveDate>,
    until: Option<NaiveDate>,
}

impl SessionFilter {
    /// Every session of the athlete
    #[must_use]
    pub const fn all() -> Self {
        Self {
            session_type: None,
            segment: None,
            from: None,
            until: None,
        }
    }

    /// Whole-session matches
    #[must_use]
    pub const fn matches() -> Self {
        Self::all()
            .session_type(SessionType::Match)
            .segment(Segment::WholeSession)
    }

    /// Whole-session trainings
    #[must_use]
    pub const fn training() -> Self {
        Self::all()
            .session_type(SessionType::Training)
            .segment(Segment::WholeSession)
    }

    /// Restrict to one session type
    #[must_use]
    pub const fn session_type(mut self, session_type: SessionType) -> Self {
        self.session_type = Some(session_type);
        self
    }

    /// Restrict to one segment
    #[must_use]
    pub const fn segment(mut self, segment: Segment) -> Self {
        self.segment = Some(segment);
        self
    }

    /// Only sessions on or after this date
    #[must_use]
    pub const fn since(mut self, date: NaiveDate) -> Self {
        self.from = Some(date);
        self
    }

    /// Only sessions on or before this date
    #[must_use]
    pub const fn until(mut self, date: NaiveDate) -> Self {
        self.until = Some(date);
        self
    }

    /// Inclusive date range
    #[must_use]
    pub const fn between(self, from: NaiveDate, until: NaiveDate) -> Self {
        self.since(from).until(until)
    }

    fn accepts(&self, record: &SessionRecord) -> bool {
        self.session_type.is_none_or(|t| record.session_type == t)
            && self.segment.is_none_or(|s| record.segment == s)
            && self.from.is_none_or(|d| record.date >= d)
            && self.until.is_none_or(|d| record.date <= d)
    }
}

/// Cleaned session records grouped into per-athlete timelines
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    timelines: HashMap<String, Vec<SessionRecord>>,
    athletes: Vec<String>,
}

impl SessionStore {
    /// Build a store from already-cleaned records
    ///
    /// Timelines are sorted by date; same-day records keep their input order.
    #[must_use]
    pub fn new(records: impl IntoIterator<Item = SessionRecord>) -> Self {
        let mut timelines: HashMap<String, Vec<SessionRecord>> = HashMap::new();
        for record in records {
            timelines
                .entry(record.athlete_id.clone()) // Safe: key ownership for grouping
                .or_default()
                .push(record);
        }

        for timeline in timelines.values_mut() {
            timeline.sort_by_key(|record| record.date);
        }

        // Athletes in order of their first session, ties broken by id
        let mut firsts: Vec<(NaiveDate, &String)> = timelines
            .iter()
            .filter_map(|(athlete, timeline)| timeline.first().map(|r| (r.date, athlete)))
            .collect();
        firsts.sort();
        let athletes = firsts.into_iter().map(|(_, id)| id.clone()).collect();

        Self {
            timelines,
            athletes,
        }
    }

    /// Clean raw export rows and build a store
    #[must_use]
    pub fn from_raw(rows: impl IntoIterator<Item = RawSessionRecord>) -> (Self, IngestSummary) {
        let mut summary = IngestSummary::default();
        let mut records = Vec::new();

        for row in rows {
            if let Some(record) = clean_row(row, &mut summary) {
                records.push(record);
            }
        }
        summary.accepted = records.len();

        if summary.dropped_missing_fields > 0 || summary.dropped_unsupported_type > 0 {
            warn!(
                accepted = summary.accepted,
                dropped_missing_fields = summary.dropped_missing_fields,
                dropped_unsupported_type = summary.dropped_unsupported_type,
                "Dropped incomplete session rows during ingestion"
            );
        }
        if !summary.ignored_metric_labels.is_empty() {
            debug!(labels = ?summary.ignored_metric_labels, "Ignored untracked metric columns");
        }

        (Self::new(records), summary)
    }

    /// Athletes in order of their first recorded session
    #[must_use]
    pub fn athletes(&self) -> &[String] {
        &self.athletes
    }

    /// Whether the athlete has any record
    #[must_use]
    pub fn contains_athlete(&self, athlete: &str) -> bool {
        self.timelines.contains_key(athlete)
    }

    /// Total number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.timelines.values().map(Vec::len).sum()
    }

    /// Whether the store holds no record
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timelines.is_empty()
    }

    /// Date-ordered sessions of one athlete matching the filter
    #[must_use]
    pub fn sessions_of(&self, athlete: &str, filter: &SessionFilter) -> Vec<&SessionRecord> {
        self.timelines
            .get(athlete)
            .map(|timeline| timeline.iter().filter(|r| filter.accepts(r)).collect())
            .unwrap_or_default()
    }

    /// Subset of the store belonging to one team
    #[must_use]
    pub fn for_team(&self, team: &str) -> Self {
        self.retain(|record| record.team.as_deref() == Some(team))
    }

    /// Subset of the store holding only one athlete
    #[must_use]
    pub fn for_athlete(&self, athlete: &str) -> Self {
        self.retain(|record| record.athlete_id == athlete)
    }

    /// Team labels present in the store
    #[must_use]
    pub fn teams(&self) -> BTreeSet<&str> {
        self.records().filter_map(|r| r.team.as_deref()).collect()
    }

    /// Most recent whole-session date of a session type across all athletes
    #[must_use]
    pub fn latest_date(&self, session_type: SessionType) -> Option<NaiveDate> {
        self.records()
            .filter(|r| r.session_type == session_type && r.segment == Segment::WholeSession)
            .map(|r| r.date)
            .max()
    }

    /// Whether any whole-session record of the type exists
    #[must_use]
    pub fn has_any(&self, session_type: SessionType) -> bool {
        self.latest_date(session_type).is_some()
    }

    fn records(&self) -> impl Iterator<Item = &SessionRecord> {
        self.timelines.values().flatten()
    }

    fn retain(&self, keep: impl Fn(&SessionRecord) -> bool) -> Self {
        Self::new(self.records().filter(|r| keep(r)).cloned())
    }
}

fn clean_row(row: RawSessionRecord, summary: &mut IngestSummary) -> Option<SessionRecord> {
    let athlete_id = row
        .athlete_id
        .map(|id| id.trim().to_owned())
        .filter(|id| !id.is_empty());

    let (Some(athlete_id), Some(date), Some(type_label), Some(split_name)) =
        (athlete_id, row.date, row.session_type, row.segment)
    else {
        summary.dropped_missing_fields += 1;
        return None;
    };

    let Ok(session_type) = type_label.parse::<SessionType>() else {
        summary.dropped_unsupported_type += 1;
        return None;
    };

    let mut metrics = MetricValues::new();
    for (label, value) in row.metrics {
        match label.parse::<Metric>() {
            Ok(metric) => {
                if let Some(value) = value {
                    metrics.set(metric, value);
                }
            }
            Err(_) => {
                summary.ignored_metric_labels.insert(label);
            }
        }
    }

    Some(SessionRecord {
        athlete_id,
        team: row.team.filter(|team| !team.trim().is_empty()),
        date,
        session_type,
        segment: Segment::from_split_name(&split_name),
        duration_minutes: row.duration_minutes,
        metrics,
    })
}
