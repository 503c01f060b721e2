// ABOUTME: Unified error type for the velotune calculation engines
// ABOUTME: Defines the two calculation error classes and a serializable response view
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

//! # Unified Error Handling
//!
//! Calculations fail in exactly two ways:
//!
//! - `MissingRequiredData` - raised only by the drivetrain comparison entry point
//!   when a setup lacks cassette or chainring data
//! - `InvalidParameter` - a numeric input is non-positive or physically implausible
//!
//! Unrecognized enumeration strings never produce an error; they fall back to a
//! documented default in the engine that parses them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Standard error codes for calculation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Mandatory component data is absent from a setup
    #[serde(rename = "MISSING_REQUIRED_DATA")]
    MissingRequiredData,
    /// A numeric input is out of its physically sensible range
    #[serde(rename = "INVALID_PARAMETER")]
    InvalidParameter,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::MissingRequiredData => "Required component data is missing",
            Self::InvalidParameter => "A parameter is outside the acceptable range",
        }
    }

    /// Stable machine-readable name, matching the serialized form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingRequiredData => "MISSING_REQUIRED_DATA",
            Self::InvalidParameter => "INVALID_PARAMETER",
        }
    }
}

/// Unified error type for the calculation engines
#[derive(Debug, Clone, Error)]
#[error("{}: {message}", code.description())]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Structured context (parameter name, offending value, setup side)
    pub details: Value,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Value::Object(Map::new()),
        }
    }

    /// Mandatory component data is missing
    pub fn missing_required_data(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingRequiredData, message)
    }

    /// A numeric parameter failed validation
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidParameter, message)
    }

    /// Attach structured details to the error
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Serializable error view for callers that surface validation messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Structured details, omitted when empty
    #[serde(skip_serializing_if = "is_empty_details")]
    pub details: Value,
}

fn is_empty_details(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            code: error.code,
            message: error.message,
            details: error.details,
        }
    }
}
