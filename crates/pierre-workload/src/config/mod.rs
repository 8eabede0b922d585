// ABOUTME: Workload engine configuration enumerating the readiness and ACWR rule variants
// ABOUTME: Defaults from pierre-core constants, environment overrides, and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Workload Configuration
//!
//! One explicit structure selects between the rule variants the dashboards
//! historically disagreed on: capped vs uncapped ratios, nearest non-zero vs
//! calendar-preceding previous week, daily vs weekly ACWR sampling.
//!
//! Configuration is passed into every engine call; nothing here is global.

/// Configuration error types
pub mod error;

pub use error::ConfigError;

use std::env;
use std::fmt;
use std::str::FromStr;

use pierre_core::constants::{acwr, readiness, speed_bands};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Upper bound applied to readiness ratios before they are reported
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "max", rename_all = "snake_case")]
pub enum RatioCap {
    /// Report the raw ratio
    Uncapped,
    /// Clamp the ratio to this maximum (2.0 = 200%)
    Capped(f64),
}

impl RatioCap {
    /// Apply the cap to a ratio
    #[must_use]
    pub fn apply(self, ratio: f64) -> f64 {
        match self {
            Self::Uncapped => ratio,
            Self::Capped(max) => ratio.min(max),
        }
    }
}

impl Default for RatioCap {
    fn default() -> Self {
        Self::Capped(readiness::RATIO_CAP)
    }
}

impl FromStr for RatioCap {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "uncapped" | "off" => Ok(Self::Uncapped),
            value => value
                .parse::<f64>()
                .map(Self::Capped)
                .map_err(|_| ConfigError::Parse(format!("Invalid ratio cap '{value}'"))),
        }
    }
}

/// Which earlier week spike detection compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviousWeekPolicy {
    /// Nearest earlier week with any non-zero total; off weeks are skipped
    #[default]
    NearestNonZero,
    /// Strictly the calendar-preceding ISO week, even when it is empty
    CalendarPreceding,
}

impl FromStr for PreviousWeekPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nearest_non_zero" | "nearest" => Ok(Self::NearestNonZero),
            "calendar_preceding" | "calendar" => Ok(Self::CalendarPreceding),
            other => Err(ConfigError::Parse(format!(
                "Invalid previous week policy '{other}'"
            ))),
        }
    }
}

/// Sampling strategy for ACWR series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcwrCadence {
    /// One point per calendar day over rolling day windows
    Daily,
    /// One point per ISO week over weekly sums
    #[default]
    Weekly,
}

impl fmt::Display for AcwrCadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => f.write_str("daily"),
            Self::Weekly => f.write_str("weekly"),
        }
    }
}

impl FromStr for AcwrCadence {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Ok(Self::Daily),
            "weekly" | "week" => Ok(Self::Weekly),
            other => Err(ConfigError::Parse(format!("Invalid ACWR cadence '{other}'"))),
        }
    }
}

/// Inclusive optimal ACWR band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneBand {
    /// Lowest optimal ratio
    pub low: f64,
    /// Highest optimal ratio
    pub high: f64,
}

impl Default for ZoneBand {
    fn default() -> Self {
        Self {
            low: acwr::OPTIMAL_LOW,
            high: acwr::OPTIMAL_HIGH,
        }
    }
}

/// Top-speed band boundaries as fractions of the top-speed benchmark
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedBandThresholds {
    /// Below this ratio the athlete reached less than half of maximal speed
    pub half: f64,
    /// Upper bound of the developing band
    pub developing: f64,
    /// Near-maximal threshold
    pub near_maximal: f64,
}

impl Default for SpeedBandThresholds {
    fn default() -> Self {
        Self {
            half: speed_bands::HALF,
            developing: speed_bands::DEVELOPING,
            near_maximal: speed_bands::NEAR_MAXIMAL,
        }
    }
}

/// ACWR engine settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcwrConfig {
    /// Daily rolling or weekly bucketed sampling
    pub cadence: AcwrCadence,
    /// Optimal band used for zone classification
    pub band: ZoneBand,
    /// Acute window length in days
    pub acute_days: u32,
    /// Number of acute windows averaged into the chronic load
    pub chronic_weeks: u32,
}

impl Default for AcwrConfig {
    fn default() -> Self {
        Self {
            cadence: AcwrCadence::default(),
            band: ZoneBand::default(),
            acute_days: acwr::ACUTE_WINDOW_DAYS,
            chronic_weeks: acwr::CHRONIC_WINDOW_WEEKS,
        }
    }
}

/// Main workload engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Cap applied to readiness ratios
    pub ratio_cap: RatioCap,
    /// Week-over-week growth factor that counts as a spike
    pub spike_threshold: f64,
    /// Countable practices per week
    pub practices_per_week: u32,
    /// Previous-week lookup policy for spike detection
    pub previous_week_policy: PreviousWeekPolicy,
    /// Match length used for per-90 normalisation
    pub per90_minutes: f64,
    /// Top-speed band boundaries
    pub speed_bands: SpeedBandThresholds,
    /// ACWR settings
    pub acwr: AcwrConfig,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            ratio_cap: RatioCap::default(),
            spike_threshold: readiness::SPIKE_THRESHOLD,
            practices_per_week: readiness::PRACTICES_PER_WEEK,
            previous_week_policy: PreviousWeekPolicy::default(),
            per90_minutes: readiness::PER90_MINUTES,
            speed_bands: SpeedBandThresholds::default(),
            acwr: AcwrConfig::default(),
        }
    }
}

impl WorkloadConfig {
    /// Load configuration from defaults and environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable holds an unparseable value
    /// or the resulting configuration fails validation
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        debug!(?config, "Workload configuration loaded");
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.spike_threshold.is_finite() && self.spike_threshold > 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "spike_threshold must be a positive number",
            ));
        }

        if self.practices_per_week == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "practices_per_week must be at least 1",
            ));
        }

        if let RatioCap::Capped(max) = self.ratio_cap {
            if !(max.is_finite() && max > 0.0) {
                return Err(ConfigError::ValueOutOfRange(
                    "ratio_cap must be a positive number",
                ));
            }
        }

        if !(self.per90_minutes.is_finite() && self.per90_minutes > 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "per90_minutes must be a positive number",
            ));
        }

        let bands = &self.speed_bands;
        if !(0.0 < bands.half && bands.half < bands.developing && bands.developing < bands.near_maximal)
        {
            return Err(ConfigError::InvalidRange(
                "speed bands must be positive and ascending",
            ));
        }

        let band = &self.acwr.band;
        if !(band.low > 0.0 && band.low < band.high) {
            return Err(ConfigError::InvalidRange(
                "ACWR band low must be positive and < high",
            ));
        }

        if self.acwr.acute_days == 0 || self.acwr.chronic_weeks == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "ACWR acute_days and chronic_weeks must be at least 1",
            ));
        }

        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var("READINESS_RATIO_CAP", &mut self.ratio_cap)?;
        Self::apply_env_var("READINESS_SPIKE_THRESHOLD", &mut self.spike_threshold)?;
        Self::apply_env_var("READINESS_PRACTICES_PER_WEEK", &mut self.practices_per_week)?;
        Self::apply_env_var(
            "READINESS_PREVIOUS_WEEK_POLICY",
            &mut self.previous_week_policy,
        )?;
        Self::apply_env_var("READINESS_PER90_MINUTES", &mut self.per90_minutes)?;

        Self::apply_env_var("ACWR_CADENCE", &mut self.acwr.cadence)?;
        Self::apply_env_var("ACWR_BAND_LOW", &mut self.acwr.band.low)?;
        Self::apply_env_var("ACWR_BAND_HIGH", &mut self.acwr.band.high)?;
        Self::apply_env_var("ACWR_CHRONIC_WEEKS", &mut self.acwr.chronic_weeks)?;

        Ok(self)
    }
}
