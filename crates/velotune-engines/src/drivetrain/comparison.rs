// ABOUTME: Current vs proposed drivetrain setup comparison
// ABOUTME: Strictly validated aggregate of performance deltas, compatibility, weight and cost
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

use crate::config::DrivetrainConfig;
use crate::drivetrain::compatibility::{check_compatibility, CompatibilityResult};
use crate::drivetrain::gearing::{
    climbing_gear, cross_chaining_issues, gear_range_percent, generate_gear_ratios, top_speed_mph,
    CrossChainIssue, GearRatio,
};
use crate::rounding::round_to_decimals;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};
use velotune_core::errors::{AppError, AppResult};
use velotune_core::models::BikeSetup;

/// Change in one metric between the current and proposed setup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta {
    /// Current setup value
    pub current: f64,
    /// Proposed setup value
    pub proposed: f64,
    /// `proposed − current`
    pub difference: f64,
    /// Change relative to current (%), 0 when current is 0
    pub percent_change: f64,
}

impl MetricDelta {
    /// Delta between two values; difference and percentage rounded to 0.1
    #[must_use]
    pub fn new(current: f64, proposed: f64) -> Self {
        let difference = proposed - current;
        let percent_change = if current.abs() > f64::EPSILON {
            round_to_decimals(difference / current * 100.0, 1)
        } else {
            0.0
        };
        Self {
            current,
            proposed,
            difference: round_to_decimals(difference, 2),
            percent_change,
        }
    }
}

/// Gear metrics for one setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupPerformance {
    /// Top speed at the configured cadence (mph)
    pub top_speed_mph: f64,
    /// Lowest gear ratio
    pub climbing_gear_ratio: f64,
    /// Cassette range (%)
    pub gear_range_percent: f64,
    /// Wheel diameter used for speed (inches)
    pub wheel_diameter_in: f64,
    /// Ratios on the largest chainring, highest first
    pub gear_ratios: Vec<GearRatio>,
    /// Cross-chained combinations
    pub cross_chaining: Vec<CrossChainIssue>,
}

impl SetupPerformance {
    /// Compute gear metrics for a setup; missing data yields zeros
    #[must_use]
    pub fn evaluate(setup: &BikeSetup, config: &DrivetrainConfig) -> Self {
        let cassette = setup.cassette_spec();
        let rings = setup.chainring_teeth();
        let wheel_diameter_in = setup
            .wheel_diameter_inches()
            .unwrap_or(config.defaults.wheel_diameter_in);
        let largest_ring = rings.and_then(|r| r.iter().copied().max()).unwrap_or(0);

        Self {
            top_speed_mph: top_speed_mph(
                cassette,
                rings,
                wheel_diameter_in,
                config.defaults.cadence_rpm,
            ),
            climbing_gear_ratio: climbing_gear(cassette, rings),
            gear_range_percent: gear_range_percent(cassette, rings),
            wheel_diameter_in,
            gear_ratios: if largest_ring > 0 {
                generate_gear_ratios(cassette, largest_ring)
            } else {
                Vec::new()
            },
            cross_chaining: cross_chaining_issues(cassette, rings, &config.cross_chaining),
        }
    }
}

/// Full comparison of a current and proposed setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Current setup metrics
    pub current: SetupPerformance,
    /// Proposed setup metrics
    pub proposed: SetupPerformance,
    /// Top speed change (mph)
    pub top_speed: MetricDelta,
    /// Climbing gear change; lower is easier
    pub climbing_gear: MetricDelta,
    /// Gear range change (percentage points)
    pub gear_range: MetricDelta,
    /// Weight change over cassette, chainring, chain, wheel and tire (grams)
    pub weight_grams: MetricDelta,
    /// Cost change; proposed includes required fixes
    pub cost: MetricDelta,
    /// Summed cost of compatibility fixes for the proposed setup
    pub required_fix_cost: f64,
    /// Compatibility of the proposed setup
    pub compatibility: CompatibilityResult,
    /// Short readable summary lines
    pub highlights: Vec<String>,
}

fn require_gearing(setup: &BikeSetup, side: &str) -> AppResult<()> {
    if setup.is_comparison_ready() {
        return Ok(());
    }
    let mut missing = Vec::new();
    if setup.cassette_spec().is_none_or(|c| c.cogs.is_empty()) {
        missing.push("cassette");
    }
    if setup.chainring_teeth().is_none() {
        missing.push("chainring");
    }
    Err(AppError::missing_required_data(format!(
        "The {side} setup is missing {} data",
        missing.join(" and ")
    ))
    .with_details(json!({ "setup": side, "missing": missing })))
}

/// Compare a current and proposed setup
///
/// # Errors
///
/// Returns `MissingRequiredData` if either setup lacks cassette or chainring
/// (or crankset) data.
pub fn compare_setups(
    current: &BikeSetup,
    proposed: &BikeSetup,
    config: &DrivetrainConfig,
) -> AppResult<ComparisonResult> {
    require_gearing(current, "current")?;
    require_gearing(proposed, "proposed")?;

    let current_perf = SetupPerformance::evaluate(current, config);
    let proposed_perf = SetupPerformance::evaluate(proposed, config);
    debug!(
        current_top_speed = current_perf.top_speed_mph,
        proposed_top_speed = proposed_perf.top_speed_mph,
        "Evaluated setup performance"
    );

    let compatibility = check_compatibility(proposed, &config.compatibility);
    let required_fix_cost = compatibility.total_fix_cost();

    let top_speed = MetricDelta::new(current_perf.top_speed_mph, proposed_perf.top_speed_mph);
    let climbing = MetricDelta::new(
        current_perf.climbing_gear_ratio,
        proposed_perf.climbing_gear_ratio,
    );
    let gear_range = MetricDelta::new(
        current_perf.gear_range_percent,
        proposed_perf.gear_range_percent,
    );
    let weight = MetricDelta::new(current.total_weight_grams(), proposed.total_weight_grams());
    let cost = MetricDelta::new(current.total_msrp(), proposed.total_msrp() + required_fix_cost);

    let highlights = build_highlights(
        &top_speed,
        &climbing,
        &gear_range,
        &weight,
        &compatibility,
    );

    info!(
        status = ?compatibility.status,
        issues = compatibility.issues.len(),
        top_speed_change = top_speed.difference,
        weight_change_g = weight.difference,
        cost_change = cost.difference,
        "Drivetrain comparison complete"
    );

    Ok(ComparisonResult {
        current: current_perf,
        proposed: proposed_perf,
        top_speed,
        climbing_gear: climbing,
        gear_range,
        weight_grams: weight,
        cost,
        required_fix_cost,
        compatibility,
        highlights,
    })
}

fn build_highlights(
    top_speed: &MetricDelta,
    climbing: &MetricDelta,
    gear_range: &MetricDelta,
    weight: &MetricDelta,
    compatibility: &CompatibilityResult,
) -> Vec<String> {
    let mut highlights = Vec::new();

    if top_speed.difference > 0.0 {
        highlights.push(format!("{:.1} mph faster top speed", top_speed.difference));
    } else if top_speed.difference < 0.0 {
        highlights.push(format!("{:.1} mph slower top speed", -top_speed.difference));
    }

    // lower ratio climbs more easily
    if climbing.difference < 0.0 {
        highlights.push(format!(
            "Easier climbing gear ({:.2} vs {:.2})",
            climbing.proposed, climbing.current
        ));
    } else if climbing.difference > 0.0 {
        highlights.push(format!(
            "Harder climbing gear ({:.2} vs {:.2})",
            climbing.proposed, climbing.current
        ));
    }

    if gear_range.difference > 0.0 {
        highlights.push(format!("{:.0}% wider gear range", gear_range.difference));
    } else if gear_range.difference < 0.0 {
        highlights.push(format!("{:.0}% narrower gear range", -gear_range.difference));
    }

    if weight.difference < 0.0 {
        highlights.push(format!("{:.0} g lighter", -weight.difference));
    } else if weight.difference > 0.0 {
        highlights.push(format!("{:.0} g heavier", weight.difference));
    }

    let fix_cost = compatibility.total_fix_cost();
    if fix_cost > 0.0 {
        let kind = if compatibility.has_critical() {
            "required"
        } else {
            "recommended"
        };
        highlights.push(format!(
            "{fix_cost:.0} in {kind} compatibility fixes ({} issue(s))",
            compatibility.issues.len()
        ));
    }

    highlights
}

#[cfg(test)]
mod tests {
    use super::*;
    use velotune_core::errors::ErrorCode;
    use velotune_core::models::{CassetteSpec, ChainringSpec, Component, ComponentSpec, FreehubType};

    fn component(id: &str, weight: f64, msrp: f64, spec: ComponentSpec) -> Component {
        Component {
            id: id.to_owned(),
            manufacturer: "Test".to_owned(),
            model: id.to_owned(),
            year: 2024,
            weight_grams: weight,
            msrp,
            spec,
        }
    }

    fn setup(cogs: Vec<u32>, ring: u32, cassette_weight: f64) -> BikeSetup {
        BikeSetup::new()
            .with_cassette(component(
                "cassette",
                cassette_weight,
                300.0,
                ComponentSpec::Cassette(CassetteSpec {
                    speeds: 12,
                    cogs,
                    freehub_type: FreehubType::SramXd,
                }),
            ))
            .with_chainring(component(
                "ring",
                100.0,
                60.0,
                ComponentSpec::Chainring(ChainringSpec { teeth: vec![ring] }),
            ))
    }

    #[test]
    fn test_metric_delta_zero_base() {
        let delta = MetricDelta::new(0.0, 5.0);
        assert!(delta.percent_change.abs() < f64::EPSILON);
        assert!((delta.difference - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_cassette_fails() {
        let current = setup(vec![11, 42], 32, 400.0);
        let proposed = BikeSetup::new();
        let err = compare_setups(&current, &proposed, &DrivetrainConfig::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingRequiredData);
        assert_eq!(err.details["setup"], "proposed");
    }

    #[test]
    fn test_empty_cassette_is_not_ready() {
        let current = setup(Vec::new(), 32, 400.0);
        let proposed = setup(vec![11, 42], 32, 400.0);
        assert!(!current.is_comparison_ready());

        let err = compare_setups(&current, &proposed, &DrivetrainConfig::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingRequiredData);
        assert_eq!(err.details["setup"], "current");
        assert_eq!(err.details["missing"], json!(["cassette"]));
    }

    #[test]
    fn test_comparison_deltas() {
        let current = setup(vec![11, 13, 15, 18, 21, 24, 28, 32, 37, 42], 32, 400.0);
        let proposed = setup(vec![10, 12, 14, 16, 18, 21, 24, 28, 32, 36, 42, 52], 32, 450.0);
        let result = compare_setups(&current, &proposed, &DrivetrainConfig::default()).unwrap();

        assert!(result.top_speed.difference > 0.0);
        assert!(result.climbing_gear.difference < 0.0);
        assert!((result.gear_range.proposed - 420.0).abs() < f64::EPSILON);
        assert!((result.weight_grams.difference - 50.0).abs() < f64::EPSILON);
        assert!(result.highlights.iter().any(|h| h.contains("faster")));
        assert!(result.highlights.iter().any(|h| h.contains("Easier climbing")));
    }
}
