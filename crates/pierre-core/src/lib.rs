// ABOUTME: Core types and constants for the Pierre readiness platform
// ABOUTME: Foundation crate with error handling, session data models, and workload constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Core
//!
//! Foundation crate providing shared types and constants for the readiness
//! and workload engine. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: Session records, tracked metrics, and ISO week keys
//! - **constants**: Default thresholds and window sizes

/// Unified error handling system with standard error codes
pub mod errors;

/// Session records, metrics, and calendar week keys
pub mod models;

/// Default workload thresholds organized by domain
pub mod constants;
