// ABOUTME: Team analysis pass resolving global anchors and assessing every selected athlete
// ABOUTME: Runs readiness, ACWR, and post-match readiness per athlete in parallel with rayon
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Team Analysis
//!
//! One analysis pass corresponds to one dashboard render for a team. The
//! pass resolves a single pair of anchor dates for the whole selection so
//! every athlete's "current week" is the same calendar week, then evaluates
//! athletes independently. Athletes share no mutable state, so the per-athlete
//! work is spread across the rayon thread pool; results keep the store's
//! athlete order.
//!
//! Data conditions never raise: a selection without matches or training
//! yields [`Assessment::Undefined`] with the reason.

use chrono::NaiveDate;
use pierre_core::errors::{AppError, AppResult};
use pierre_core::models::{Metric, SessionType};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::acwr::{AcwrEngine, AcwrSeries};
use crate::config::WorkloadConfig;
use crate::readiness::{AthleteReadiness, PostMatchReadiness, ReadinessEngine};
use crate::session_store::{SessionFilter, SessionStore};

/// Anchor dates shared by every athlete of one analysis pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchors {
    /// Latest match date considered for benchmarks; `None` without matches
    pub match_date: Option<NaiveDate>,
    /// Date whose ISO week is evaluated
    pub training_date: NaiveDate,
}

impl Anchors {
    /// Resolve anchors for a selection
    ///
    /// Pinned dates win. Otherwise the match anchor is the most recent match
    /// and the training anchor the most recent training, falling back to the
    /// match anchor when the selection has no training. Returns `None` when
    /// there is nothing to anchor on.
    #[must_use]
    pub fn resolve(
        store: &SessionStore,
        match_pin: Option<NaiveDate>,
        training_pin: Option<NaiveDate>,
    ) -> Option<Self> {
        let match_date = match_pin.or_else(|| store.latest_date(SessionType::Match));
        let training_date = training_pin
            .or_else(|| store.latest_date(SessionType::Training))
            .or(match_date)?;

        Some(Self {
            match_date,
            training_date,
        })
    }
}

/// Why a computation has no result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedReason {
    /// Readiness needs at least one match in the selection
    NoMatches,
    /// ACWR needs at least one training record in the selection
    NoTraining,
    /// No athlete trained after their most recent match
    NoPostMatchTraining,
}

impl UndefinedReason {
    /// Human readable empty-state message
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoMatches => "No match sessions in the selection",
            Self::NoTraining => "No training sessions in the selection",
            Self::NoPostMatchTraining => "No athlete has training after their latest match",
        }
    }
}

/// Result of a computation that may be undefined for the whole selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Assessment<T> {
    /// Computed values
    Available(T),
    /// Nothing could be computed
    Undefined(UndefinedReason),
}

impl<T> Assessment<T> {
    /// Computed values, if any
    #[must_use]
    pub const fn available(&self) -> Option<&T> {
        match self {
            Self::Available(value) => Some(value),
            Self::Undefined(_) => None,
        }
    }

    /// Reason the computation is undefined
    #[must_use]
    pub const fn reason(&self) -> Option<UndefinedReason> {
        match self {
            Self::Available(_) => None,
            Self::Undefined(reason) => Some(*reason),
        }
    }

    /// Whether values were computed
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

/// Selection and anchors for one analysis pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Restrict to one team
    pub team: Option<String>,
    /// Restrict the output to one athlete
    pub athlete: Option<String>,
    /// Pinned match anchor
    pub match_anchor: Option<NaiveDate>,
    /// Pinned training anchor
    pub training_anchor: Option<NaiveDate>,
    /// Metrics to compute ACWR series for
    pub acwr_metrics: Vec<Metric>,
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        Self {
            team: None,
            athlete: None,
            match_anchor: None,
            training_anchor: None,
            acwr_metrics: Metric::LOAD.to_vec(),
        }
    }
}

impl AnalysisRequest {
    /// Restrict to one team
    #[must_use]
    pub fn team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// Restrict the output to one athlete
    #[must_use]
    pub fn athlete(mut self, athlete: impl Into<String>) -> Self {
        self.athlete = Some(athlete.into());
        self
    }

    /// Pin the match anchor
    #[must_use]
    pub fn match_anchor(mut self, date: NaiveDate) -> Self {
        self.match_anchor = Some(date);
        self
    }

    /// Pin the training anchor
    #[must_use]
    pub fn training_anchor(mut self, date: NaiveDate) -> Self {
        self.training_anchor = Some(date);
        self
    }

    /// Metrics to compute ACWR series for
    #[must_use]
    pub fn acwr_metrics(mut self, metrics: impl IntoIterator<Item = Metric>) -> Self {
        self.acwr_metrics = metrics.into_iter().collect();
        self
    }
}

/// ACWR series of one athlete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteAcwr {
    /// Athlete identifier
    pub athlete_id: String,
    /// One series per requested load metric
    pub series: Vec<AcwrSeries>,
}

impl AthleteAcwr {
    /// Series for one metric
    #[must_use]
    pub fn metric(&self, metric: Metric) -> Option<&AcwrSeries> {
        self.series.iter().find(|series| series.metric == metric)
    }
}

/// Output of one analysis pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamReport {
    /// Team the pass was restricted to
    pub team: Option<String>,
    /// Anchors shared by every athlete; `None` for an empty selection
    pub anchors: Option<Anchors>,
    /// Weekly readiness per athlete
    pub readiness: Assessment<Vec<AthleteReadiness>>,
    /// ACWR series per athlete
    pub acwr: Assessment<Vec<AthleteAcwr>>,
}

/// Runs analysis passes over a session store
pub struct TeamAnalyzer<'a> {
    config: &'a WorkloadConfig,
}

impl<'a> TeamAnalyzer<'a> {
    /// Create an analyzer bound to a configuration
    #[must_use]
    pub const fn new(config: &'a WorkloadConfig) -> Self {
        Self { config }
    }

    /// Weekly readiness and ACWR for every selected athlete
    ///
    /// # Errors
    ///
    /// Returns an error if the request names an athlete absent from the
    /// selected team
    pub fn analyze(&self, store: &SessionStore, request: &AnalysisRequest) -> AppResult<TeamReport> {
        let team = Self::team_selection(store, request);
        let anchors = Anchors::resolve(&team, request.match_anchor, request.training_anchor);
        let has_matches = team.has_any(SessionType::Match);
        let has_training = team.has_any(SessionType::Training);
        let selection = Self::athlete_selection(team, request)?;

        let readiness = match anchors {
            Some(anchors) if has_matches => {
                let engine = ReadinessEngine::new(self.config);
                Assessment::Available(
                    selection
                        .athletes()
                        .par_iter()
                        .map(|athlete| {
                            let timeline = selection.sessions_of(athlete, &SessionFilter::all());
                            engine.assess(athlete, &timeline, &anchors)
                        })
                        .collect(),
                )
            }
            _ => Assessment::Undefined(UndefinedReason::NoMatches),
        };

        let acwr = match anchors {
            Some(anchors) if has_training => {
                Assessment::Available(self.acwr_pass(&selection, request, anchors.training_date))
            }
            _ => Assessment::Undefined(UndefinedReason::NoTraining),
        };

        if let Some(reason) = readiness.reason().or_else(|| acwr.reason()) {
            warn!(team = ?request.team, reason = reason.message(), "Analysis pass partially undefined");
        }
        info!(
            team = ?request.team,
            athletes = selection.athletes().len(),
            anchors = ?anchors,
            "Completed team analysis pass"
        );

        Ok(TeamReport {
            team: request.team.clone(),
            anchors,
            readiness,
            acwr,
        })
    }

    /// Readiness since each athlete's most recent match
    ///
    /// Athletes without a match, or without training after it, are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the request names an athlete absent from the
    /// selected team
    pub fn post_match(
        &self,
        store: &SessionStore,
        request: &AnalysisRequest,
    ) -> AppResult<Assessment<Vec<PostMatchReadiness>>> {
        let selection = Self::athlete_selection(Self::team_selection(store, request), request)?;
        let engine = ReadinessEngine::new(self.config);

        let results: Vec<PostMatchReadiness> = selection
            .athletes()
            .par_iter()
            .filter_map(|athlete| {
                let timeline = selection.sessions_of(athlete, &SessionFilter::all());
                engine.assess_post_match(athlete, &timeline)
            })
            .collect();

        if results.is_empty() {
            warn!(team = ?request.team, "No athlete qualifies for post-match readiness");
            return Ok(Assessment::Undefined(UndefinedReason::NoPostMatchTraining));
        }

        info!(
            team = ?request.team,
            athletes = results.len(),
            skipped = selection.athletes().len() - results.len(),
            "Completed post-match readiness pass"
        );
        Ok(Assessment::Available(results))
    }

    fn acwr_pass(
        &self,
        selection: &SessionStore,
        request: &AnalysisRequest,
        until: NaiveDate,
    ) -> Vec<AthleteAcwr> {
        let engine = AcwrEngine::new(self.config);
        selection
            .athletes()
            .par_iter()
            .map(|athlete| {
                let timeline = selection.sessions_of(athlete, &SessionFilter::training());
                AthleteAcwr {
                    athlete_id: athlete.clone(),
                    series: request
                        .acwr_metrics
                        .iter()
                        .filter_map(|metric| engine.series(athlete, &timeline, *metric, Some(until)))
                        .collect(),
                }
            })
            .collect()
    }

    fn team_selection(store: &SessionStore, request: &AnalysisRequest) -> SessionStore {
        request
            .team
            .as_deref()
            .map_or_else(|| store.clone(), |team| store.for_team(team))
    }

    fn athlete_selection(team: SessionStore, request: &AnalysisRequest) -> AppResult<SessionStore> {
        match request.athlete.as_deref() {
            None => Ok(team),
            Some(athlete) if team.contains_athlete(athlete) => Ok(team.for_athlete(athlete)),
            Some(athlete) => Err(AppError::not_found(format!("Athlete '{athlete}'"))),
        }
    }
}
