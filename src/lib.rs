// ABOUTME: Main library entry point for the velotune bicycle setup toolkit
// ABOUTME: Re-exports the core types and calculation engines and owns logging setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

#![deny(unsafe_code)]

//! # Velotune
//!
//! Recommends and validates bicycle drivetrain, tire pressure and suspension
//! configurations from component and rider parameters.
//!
//! ## Architecture
//!
//! - **`velotune-core`**: error types, domain constants, component and setup models
//! - **`velotune-engines`**: the three stateless calculation engines and their
//!   configuration tables
//! - **this crate**: re-exports, logging setup, and the `velotune` command-line harness
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use velotune::engines::{calculate_tire_pressure, EngineConfig, Terrain, TirePressureParams};
//! use velotune::engines::{RidePriority, SurfaceCondition};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = EngineConfig::load()?;
//!     let params = TirePressureParams {
//!         rider_weight_kg: 78.0,
//!         bike_weight_kg: 14.0,
//!         tire_width_mm: 61.0,
//!         wheel_diameter_in: 29.0,
//!         terrain: Terrain::Trail,
//!         tubeless: true,
//!         condition: SurfaceCondition::Dry,
//!         priority: RidePriority::Balanced,
//!     };
//!     let result = calculate_tire_pressure(&params, &config.tire_pressure)?;
//!     println!("front {} psi, rear {} psi", result.front_psi, result.rear_psi);
//!     Ok(())
//! }
//! ```

/// Core error types, constants and models
pub use velotune_core as core;

/// Calculation engines and configuration
pub use velotune_engines as engines;

/// Structured logging configuration
pub mod logging;

pub use velotune_core::errors::{AppError, AppResult, ErrorCode, ErrorResponse};
pub use velotune_core::models::{BikeSetup, Component};
pub use velotune_engines::EngineConfig;
