// ABOUTME: Configuration error types for engine table validation
// ABOUTME: Defines error variants for invalid ranges, out-of-range values, and parse failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

//! Configuration error types for engine table validation.

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Ordered values are out of order (e.g., min not below max)
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Failed to parse an override value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}
