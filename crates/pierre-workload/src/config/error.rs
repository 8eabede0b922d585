// ABOUTME: Configuration error types for workload engine validation
// ABOUTME: Defines error variants for invalid ranges, parse failures, and out-of-range values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration error types for workload engine validation.

use pierre_core::errors::AppError;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Paired bounds out of order (e.g., ACWR band low >= high)
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Failed to parse an override value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::config(error.to_string())
    }
}
