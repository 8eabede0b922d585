// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, date helpers, and session record builders
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::wildcard_in_or_patterns,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `pierre_readiness`
//!
//! This module provides common builders to reduce duplication across
//! integration tests.

use std::env;
use std::sync::Once;

use chrono::NaiveDate;
use pierre_core::models::{Metric, SessionRecord, SessionType};
use pierre_workload::{SessionStore, WorkloadConfig};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            Ok("WARN" | "ERROR") | _ => Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Calendar date shorthand
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Whole-session training with a distance value
pub fn training(athlete: &str, on: NaiveDate, distance: f64) -> SessionRecord {
    SessionRecord::new(athlete, on, SessionType::Training).metric(Metric::Distance, distance)
}

/// Whole-session match with a duration and a distance value
pub fn match_session(athlete: &str, on: NaiveDate, minutes: f64, distance: f64) -> SessionRecord {
    SessionRecord::new(athlete, on, SessionType::Match)
        .duration(minutes)
        .metric(Metric::Distance, distance)
}

/// Borrowed, date-ordered view of records as engines consume them
pub fn timeline(records: &[SessionRecord]) -> Vec<&SessionRecord> {
    let mut view: Vec<&SessionRecord> = records.iter().collect();
    view.sort_by_key(|record| record.date);
    view
}

/// Store built from records, with quiet logging initialised
pub fn store(records: Vec<SessionRecord>) -> SessionStore {
    init_test_logging();
    SessionStore::new(records)
}

/// Default engine configuration
pub fn config() -> WorkloadConfig {
    init_test_logging();
    WorkloadConfig::default()
}

/// Approximate float equality for computed ratios
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
