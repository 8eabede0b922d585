// ABOUTME: Dataset snapshot loader reading exported session rows from JSON files
// ABOUTME: Parses RawSessionRecord arrays and hands them to the session store for cleaning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Dataset Snapshots
//!
//! A snapshot is a JSON array of exported rows:
//!
//! ```json
//! [
//!   {
//!     "athlete_id": "Player 7",
//!     "team": "U17",
//!     "date": "2025-03-08",
//!     "session_type": "Match Session",
//!     "segment": "Whole Session",
//!     "duration_minutes": 90.0,
//!     "metrics": { "Distance (m)": 10450.0, "Top Speed (kph)": 31.2 }
//!   }
//! ]
//! ```
//!
//! Rows missing required fields are dropped by [`SessionStore::from_raw`],
//! not rejected here.

use std::fs;
use std::path::Path;

use pierre_core::errors::{AppError, AppResult};
use pierre_core::models::RawSessionRecord;
use pierre_workload::{IngestSummary, SessionStore};
use tracing::debug;

/// Parse snapshot rows from a JSON string
///
/// # Errors
///
/// Returns a serialization error if the text is not a JSON array of rows
pub fn parse_snapshot(json: &str) -> AppResult<Vec<RawSessionRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Read a snapshot file and build a session store from it
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not hold a JSON array
/// of session rows
pub fn load_snapshot(path: impl AsRef<Path>) -> AppResult<(SessionStore, IngestSummary)> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        AppError::storage(format!("Failed to read dataset {}", path.display())).with_source(e)
    })?;

    let rows = parse_snapshot(&contents).map_err(|e| {
        AppError::new(
            e.code,
            format!("Invalid dataset {}: {}", path.display(), e.message),
        )
        .with_details(e.details)
    })?;
    debug!(path = %path.display(), rows = rows.len(), "Parsed dataset snapshot");

    Ok(SessionStore::from_raw(rows))
}
