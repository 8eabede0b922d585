// ABOUTME: ISO 8601 week key used to bucket sessions into calendar weeks
// ABOUTME: Handles year boundaries (week 1 of 2025 starts on 2024-12-30) through chrono
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// ISO (year, week) bucket
///
/// Ordering follows the calendar: all weeks of an ISO year sort before the
/// weeks of the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekKey {
    iso_year: i32,
    iso_week: u32,
}

impl WeekKey {
    /// Week containing the given date
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        let week = date.iso_week();
        Self {
            iso_year: week.year(),
            iso_week: week.week(),
        }
    }

    /// Validated construction from an ISO year and week number
    #[must_use]
    pub fn new(iso_year: i32, iso_week: u32) -> Option<Self> {
        NaiveDate::from_isoywd_opt(iso_year, iso_week, Weekday::Mon).map(Self::from_date)
    }

    /// ISO week-numbering year
    #[must_use]
    pub const fn iso_year(self) -> i32 {
        self.iso_year
    }

    /// ISO week number (1..=53)
    #[must_use]
    pub const fn iso_week(self) -> u32 {
        self.iso_week
    }

    /// Monday of this week
    #[must_use]
    pub fn monday(self) -> NaiveDate {
        // Keys are only built from real dates, so the Monday always exists
        NaiveDate::from_isoywd_opt(self.iso_year, self.iso_week, Weekday::Mon)
            .unwrap_or(NaiveDate::MIN)
    }

    /// Sunday of this week
    #[must_use]
    pub fn sunday(self) -> NaiveDate {
        self.monday() + Duration::days(6)
    }

    /// Calendar-preceding week
    #[must_use]
    pub fn previous(self) -> Self {
        Self::from_date(self.monday() - Duration::days(7))
    }

    /// Calendar-following week
    #[must_use]
    pub fn next(self) -> Self {
        Self::from_date(self.monday() + Duration::days(7))
    }

    /// Whether the date falls inside this week
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        Self::from_date(date) == self
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.iso_year, self.iso_week)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_year_boundary_belongs_to_next_iso_year() {
        let key = WeekKey::from_date(date(2024, 12, 30));
        assert_eq!(key.iso_year(), 2025);
        assert_eq!(key.iso_week(), 1);
        assert_eq!(key.to_string(), "2025-W01");
    }

    #[test]
    fn test_previous_crosses_year() {
        let first = WeekKey::new(2026, 1).unwrap();
        let previous = first.previous();
        assert_eq!(previous.iso_year(), 2025);
        assert_eq!(previous.iso_week(), 52);
        assert_eq!(previous.next(), first);
    }

    #[test]
    fn test_week_bounds() {
        let key = WeekKey::from_date(date(2024, 3, 6));
        assert_eq!(key.monday(), date(2024, 3, 4));
        assert_eq!(key.sunday(), date(2024, 3, 10));
        assert!(key.contains(date(2024, 3, 10)));
        assert!(!key.contains(date(2024, 3, 11)));
    }

    #[test]
    fn test_invalid_week_rejected() {
        assert!(WeekKey::new(2024, 60).is_none());
    }
}
