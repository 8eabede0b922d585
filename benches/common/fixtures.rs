// ABOUTME: Benchmark fixtures generating deterministic squads of match and training sessions
// ABOUTME: Provides reproducible session stores sized for team analysis and ACWR benchmarks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Benchmark fixtures generating deterministic squads.
//!
//! Every athlete trains Monday, Tuesday, and Thursday and plays a full match
//! on Saturday. Values vary with the athlete and week index but never with
//! the wall clock.

use chrono::{Days, NaiveDate};
use pierre_core::models::{Metric, SessionRecord, SessionType};
use pierre_workload::SessionStore;

/// Predefined squad sizes for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum SquadSize {
    /// One age group (25 athletes)
    Team,
    /// A whole academy (200 athletes across eight teams)
    Academy,
}

impl SquadSize {
    #[must_use]
    pub const fn athletes(self) -> usize {
        match self {
            Self::Team => 25,
            Self::Academy => 200,
        }
    }
}

/// Season length in weeks
pub const SEASON_WEEKS: usize = 30;

const TRAINING_DAYS: [u64; 3] = [0, 1, 3];
const MATCH_DAY: u64 = 5;

fn season_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap_or_default()
}

#[allow(clippy::cast_precision_loss)]
fn with_metrics(record: SessionRecord, scale: f64, seed: usize) -> SessionRecord {
    let jitter = (seed % 17) as f64 / 100.0;
    let factor = scale * (0.9 + jitter);
    record
        .metric(Metric::Distance, 9800.0 * factor)
        .metric(Metric::HighIntensityRunning, 1100.0 * factor)
        .metric(Metric::SprintDistance, 320.0 * factor)
        .metric(Metric::SprintCount, (18.0 * factor).round())
        .metric(Metric::TopSpeed, 28.0 + (seed % 7) as f64 * 0.6)
        .metric(Metric::Accelerations, (60.0 * factor).round())
        .metric(Metric::Decelerations, (55.0 * factor).round())
}

fn session(athlete: usize, week: usize, day: u64, session_type: SessionType) -> Option<SessionRecord> {
    let offset = u64::try_from(week).ok()?.checked_mul(7)?.checked_add(day)?;
    let date = season_start().checked_add_days(Days::new(offset))?;
    let team = format!("U{}", 14 + athlete % 8);
    Some(SessionRecord::new(format!("Player {athlete}"), date, session_type).team(team))
}

/// Generate the records of a full season for a squad
#[must_use]
pub fn generate_records(size: SquadSize, weeks: usize) -> Vec<SessionRecord> {
    let mut records = Vec::with_capacity(size.athletes() * weeks * (TRAINING_DAYS.len() + 1));
    for athlete in 0..size.athletes() {
        for week in 0..weeks {
            let seed = athlete * 31 + week * 7;
            for (slot, day) in TRAINING_DAYS.into_iter().enumerate() {
                if let Some(record) = session(athlete, week, day, SessionType::Training) {
                    records.push(with_metrics(record, 0.3, seed + slot));
                }
            }
            if let Some(record) = session(athlete, week, MATCH_DAY, SessionType::Match) {
                records.push(with_metrics(record.duration(90.0), 1.0, seed));
            }
        }
    }
    records
}

/// Generate a session store holding a full season for a squad
#[must_use]
pub fn generate_store(size: SquadSize) -> SessionStore {
    SessionStore::new(generate_records(size, SEASON_WEEKS))
}
