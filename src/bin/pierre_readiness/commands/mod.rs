// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for pierre-readiness
// ABOUTME: Provides the readiness, ACWR, and post-match report commands

pub mod acwr;
pub mod post_match;
pub mod readiness;
