// ABOUTME: Core types and constants for the velotune bicycle setup engines
// ABOUTME: Foundation crate with error handling, component models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

#![deny(unsafe_code)]

//! # Velotune Core
//!
//! Foundation crate providing shared types and constants for the velotune
//! calculation engines. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode` and the `AppResult` alias
//! - **constants**: Unit conversions and physical limits shared by all engines
//! - **models**: Immutable component catalog entries and bike setups

/// Unified error handling for calculation failures
pub mod errors;

/// Unit conversions and physical limits organized by domain
pub mod constants;

/// Component catalog value objects and bike setups
pub mod models;
