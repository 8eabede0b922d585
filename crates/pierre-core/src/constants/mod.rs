// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Default workload thresholds, window sizes, and service identifiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Defaults here seed `WorkloadConfig`; the engine reads the config, never
//! these constants directly, so every value can be overridden per render.

/// Readiness ratio and spike detection defaults
pub mod readiness {
    /// Minutes in a full match, the per-90 normalisation base
    pub const PER90_MINUTES: f64 = 90.0;

    /// Week-over-week growth above which a spike is flagged (110%)
    pub const SPIKE_THRESHOLD: f64 = 1.10;

    /// Countable practices per week; later same-week sessions fold into the last ordinal
    pub const PRACTICES_PER_WEEK: u32 = 3;

    /// Display cap for readiness ratios (200%)
    pub const RATIO_CAP: f64 = 2.0;
}

/// Top-speed band boundaries, as a fraction of the athlete's top-speed benchmark
pub mod speed_bands {
    /// Below this: less than half of maximal speed
    pub const HALF: f64 = 0.50;

    /// Upper bound of the developing band
    pub const DEVELOPING: f64 = 0.75;

    /// Near-maximal threshold; below it the near-max warning is raised
    pub const NEAR_MAXIMAL: f64 = 0.90;
}

/// Acute:chronic workload ratio defaults
pub mod acwr {
    /// ACWR below this is undertrained
    pub const OPTIMAL_LOW: f64 = 0.8;

    /// ACWR above this is overtrained
    pub const OPTIMAL_HIGH: f64 = 1.3;

    /// Acute window in days
    pub const ACUTE_WINDOW_DAYS: u32 = 7;

    /// Chronic window in weeks (28 days)
    pub const CHRONIC_WINDOW_WEEKS: u32 = 4;
}

/// Service identifiers used in structured logs
pub mod service_names {
    /// Readiness CLI / service name
    pub const PIERRE_READINESS: &str = "pierre-readiness";
}
