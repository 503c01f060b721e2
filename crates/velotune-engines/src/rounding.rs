// ABOUTME: Rounding helpers shared by the calculation engines
// ABOUTME: Fixed decimal places and fixed increments such as 0.5 PSI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

/// Round to a number of decimal places
#[must_use]
pub fn round_to_decimals(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

/// Round to the nearest multiple of `step`
#[must_use]
pub fn round_to_step(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}
