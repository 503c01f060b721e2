// ABOUTME: Calculation engines for bicycle drivetrain, tire pressure and suspension setup
// ABOUTME: Stateless rule-table calculators; every entry point is a pure function of its inputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

#![deny(unsafe_code)]

//! # Velotune Engines
//!
//! Three independent calculators, none of which calls another:
//!
//! - [`drivetrain`] - gear ratios, speed and climbing metrics, cross-chaining,
//!   compatibility rules, setup comparison, chain length and chainline
//! - [`tire_pressure`] - weight/terrain/tubeless adjusted pressure with safe ranges
//! - [`suspension`] - fork and shock pressure, sag and damping baselines
//!
//! Policy constants live in [`config::EngineConfig`]; callers pass the relevant
//! section by reference. There is no global state, so calls may run concurrently.

/// Engine configuration tables and environment overrides
pub mod config;

/// Drivetrain performance and compatibility engine
pub mod drivetrain;

/// Tire pressure engine
pub mod tire_pressure;

/// Suspension setup engine
pub mod suspension;

/// Lenient enumeration parsing shared by the engines
pub mod parsing;

mod rounding;

pub use config::EngineConfig;
pub use drivetrain::{
    analyze_chainline, calculate_chain_length, check_compatibility, compare_setups,
    ChainLengthResult, ChainlineResult, CompatibilityResult, ComparisonResult, FrameType,
};
pub use suspension::{
    calculate_suspension_settings, BikeCategory, RidingStyle, SuspensionInput, SuspensionResult,
    TrailTerrain,
};
pub use tire_pressure::{
    calculate_tire_pressure, RidePriority, SurfaceCondition, Terrain, TirePressureParams,
    TirePressureResult,
};
