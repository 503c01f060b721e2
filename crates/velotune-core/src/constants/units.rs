// ABOUTME: Unit conversion constants for distance, weight, and speed
// ABOUTME: Provides named constants to eliminate magic numbers in calculations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

/// Inches per mile
pub const INCHES_PER_MILE: f64 = 63_360.0;

/// Minutes per hour
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Pounds per kilogram
pub const LBS_PER_KG: f64 = 2.204_62;
