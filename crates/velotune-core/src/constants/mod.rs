// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants shared by the drivetrain, tire and suspension engines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

//! Constants module
//!
//! Unit conversions and validation limits. Tunable policy values (terrain
//! factors, pressure ratios, fix costs) are not here; they live in the engine
//! configuration tables so they can be audited and overridden as data.

/// Unit conversion and measurement constants
pub mod units;

/// Physical input limits
pub mod limits {
    /// Heaviest rider accepted by the tire and suspension engines (kg)
    pub const MAX_RIDER_WEIGHT_KG: f64 = 200.0;
    /// Heaviest bike accepted by the tire engine (kg)
    pub const MAX_BIKE_WEIGHT_KG: f64 = 40.0;
    /// Heaviest carried gear accepted by the suspension engine (kg)
    pub const MAX_GEAR_WEIGHT_KG: f64 = 50.0;
    /// Narrowest tire accepted (mm)
    pub const MIN_TIRE_WIDTH_MM: f64 = 18.0;
    /// Widest tire accepted, fat bike territory (mm)
    pub const MAX_TIRE_WIDTH_MM: f64 = 130.0;
    /// Smallest wheel accepted (inches)
    pub const MIN_WHEEL_DIAMETER_IN: f64 = 12.0;
    /// Largest wheel accepted (inches)
    pub const MAX_WHEEL_DIAMETER_IN: f64 = 32.0;
    /// Longest chainstay accepted, tandems included (mm)
    pub const MAX_CHAINSTAY_MM: f64 = 1000.0;
    /// Largest chainring accepted for chain sizing (teeth)
    pub const MAX_CHAINRING_TEETH: u32 = 80;
    /// Largest cassette cog accepted for chain sizing (teeth)
    pub const MAX_COG_TEETH: u32 = 64;
}

/// Chain geometry
pub mod chain {
    /// Chain pitch: one link is half an inch (mm)
    pub const LINK_PITCH_MM: f64 = 12.7;
    /// Wrap allowance added to the chain length estimate (mm)
    pub const WRAP_ALLOWANCE_MM: f64 = 4.0;
    /// Links of slack either side of the recommended length
    pub const LINK_TOLERANCE: u32 = 2;
}
