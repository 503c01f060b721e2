// ABOUTME: Gear ratio math for drivetrain setups
// ABOUTME: Top speed, climbing gear, gear range, ratio tables and cross-chaining detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

//! Gear math helpers.
//!
//! Every function here is lenient: missing cassette or chainring data yields 0
//! (or an empty list) rather than an error.

use crate::config::CrossChainingConfig;
use crate::drivetrain::CrossChainSeverity;
use crate::rounding::round_to_decimals;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use velotune_core::constants::units::{INCHES_PER_MILE, MINUTES_PER_HOUR};
use velotune_core::models::CassetteSpec;

/// One chainring/cog combination
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GearRatio {
    /// Chainring teeth
    pub chainring_teeth: u32,
    /// Cog teeth
    pub cog_teeth: u32,
    /// Chainring ÷ cog
    pub ratio: f64,
}

/// A cross-chained combination worth avoiding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossChainIssue {
    /// Chainring teeth
    pub chainring_teeth: u32,
    /// Cog teeth
    pub cog_teeth: u32,
    /// How extreme the chain angle is
    pub severity: CrossChainSeverity,
    /// Estimated drivetrain efficiency loss (%)
    pub efficiency_loss_percent: f64,
    /// What to do instead
    pub recommendation: String,
}

/// Chainring ÷ cog, 0 for a zero-tooth cog
#[must_use]
pub fn gear_ratio(chainring_teeth: u32, cog_teeth: u32) -> f64 {
    if cog_teeth == 0 {
        return 0.0;
    }
    f64::from(chainring_teeth) / f64::from(cog_teeth)
}

/// Top speed (mph) in the largest chainring and smallest cog, rounded to 0.1
///
/// Returns 0 when cassette or chainring data is absent.
#[must_use]
pub fn top_speed_mph(
    cassette: Option<&CassetteSpec>,
    chainrings: Option<&[u32]>,
    wheel_diameter_in: f64,
    cadence_rpm: f64,
) -> f64 {
    let (Some(smallest_cog), Some(largest_ring)) = (
        cassette.and_then(CassetteSpec::smallest_cog),
        chainrings.and_then(|rings| rings.iter().copied().max()),
    ) else {
        return 0.0;
    };

    let ratio = gear_ratio(largest_ring, smallest_cog);
    let circumference_in = wheel_diameter_in * PI;
    let speed = ratio * circumference_in * cadence_rpm * MINUTES_PER_HOUR / INCHES_PER_MILE;
    round_to_decimals(speed, 1)
}

/// Climbing gear ratio (smallest chainring ÷ largest cog), rounded to 0.01
///
/// Returns 0 when cassette or chainring data is absent.
#[must_use]
pub fn climbing_gear(cassette: Option<&CassetteSpec>, chainrings: Option<&[u32]>) -> f64 {
    let (Some(largest_cog), Some(smallest_ring)) = (
        cassette.and_then(CassetteSpec::largest_cog),
        chainrings.and_then(|rings| rings.iter().copied().filter(|&t| t > 0).min()),
    ) else {
        return 0.0;
    };
    round_to_decimals(gear_ratio(smallest_ring, largest_cog), 2)
}

/// Cassette range as a percentage: `(largest ÷ smallest − 1) × 100`, rounded
///
/// Depends only on the cassette; the chainring only has to be present.
#[must_use]
pub fn gear_range_percent(cassette: Option<&CassetteSpec>, chainrings: Option<&[u32]>) -> f64 {
    if chainrings.is_none_or(<[u32]>::is_empty) {
        return 0.0;
    }
    let Some(cassette) = cassette else {
        return 0.0;
    };
    match (cassette.smallest_cog(), cassette.largest_cog()) {
        (Some(smallest), Some(largest)) => {
            ((f64::from(largest) / f64::from(smallest) - 1.0) * 100.0).round()
        }
        _ => 0.0,
    }
}

/// One ratio per cog on a single chainring, highest gear first
///
/// Equal ratios keep cassette order.
#[must_use]
pub fn generate_gear_ratios(cassette: Option<&CassetteSpec>, chainring_teeth: u32) -> Vec<GearRatio> {
    let Some(cassette) = cassette else {
        return Vec::new();
    };
    let mut ratios: Vec<GearRatio> = cassette
        .cogs
        .iter()
        .map(|&cog| GearRatio {
            chainring_teeth,
            cog_teeth: cog,
            ratio: gear_ratio(chainring_teeth, cog),
        })
        .collect();
    // sort_by is stable
    ratios.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));
    ratios
}

/// Cross-chained combinations for a cassette and chainring set
///
/// Cogs are ranked by distance from the nearer end of the cassette. Small-cog
/// positions pair with the smallest chainring and large-cog positions with the
/// largest, which on a 1x drivetrain is the same ring. Severity and loss come
/// from [`CrossChainingConfig::rule_for_position`]; middle cogs are not flagged.
#[must_use]
pub fn cross_chaining_issues(
    cassette: Option<&CassetteSpec>,
    chainrings: Option<&[u32]>,
    config: &CrossChainingConfig,
) -> Vec<CrossChainIssue> {
    let (Some(cassette), Some(rings)) = (cassette, chainrings) else {
        return Vec::new();
    };
    let (Some(smallest_ring), Some(largest_ring)) =
        (rings.iter().copied().min(), rings.iter().copied().max())
    else {
        return Vec::new();
    };

    let mut cogs: Vec<u32> = cassette.cogs.iter().copied().filter(|&c| c > 0).collect();
    cogs.sort_unstable();
    let last = cogs.len().saturating_sub(1);
    let single_ring = smallest_ring == largest_ring;

    cogs.iter()
        .enumerate()
        .filter_map(|(index, &cog)| {
            let from_small = index;
            let from_large = last - index;
            let small_end = from_small <= from_large;
            let position = from_small.min(from_large);
            let (severity, loss) = config.rule_for_position(position)?;
            let ring = if small_end { smallest_ring } else { largest_ring };
            Some(CrossChainIssue {
                chainring_teeth: ring,
                cog_teeth: cog,
                severity,
                efficiency_loss_percent: loss,
                recommendation: cross_chain_advice(ring, cog, severity, small_end, single_ring),
            })
        })
        .collect()
}

fn cross_chain_advice(
    ring: u32,
    cog: u32,
    severity: CrossChainSeverity,
    small_end: bool,
    single_ring: bool,
) -> String {
    let combo = format!("{ring}T x {cog}T");
    match (severity, single_ring) {
        (CrossChainSeverity::High, true) => {
            format!("{combo}: extreme chain angle, use only briefly and keep the chain well lubricated")
        }
        (CrossChainSeverity::Medium, true) => {
            format!("{combo}: noticeable chain angle, fine for short efforts")
        }
        (CrossChainSeverity::High, false) => {
            let ring_hint = if small_end { "larger" } else { "smaller" };
            format!("Avoid {combo}: shift to the {ring_hint} chainring for the same gear")
        }
        (CrossChainSeverity::Medium, false) => {
            format!("Limit time in {combo}: chain angle accelerates wear")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use velotune_core::models::FreehubType;

    fn eagle() -> CassetteSpec {
        CassetteSpec {
            speeds: 12,
            cogs: vec![10, 12, 14, 16, 18, 21, 24, 28, 32, 36, 42, 52],
            freehub_type: FreehubType::SramXd,
        }
    }

    #[test]
    fn test_gear_ratio_zero_cog() {
        assert!(gear_ratio(32, 0).abs() < f64::EPSILON);
        assert!((gear_ratio(32, 16) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_eagle_range_and_climbing_gear() {
        let cassette = eagle();
        let rings = [32];
        assert!((gear_range_percent(Some(&cassette), Some(&rings)) - 420.0).abs() < f64::EPSILON);
        assert!((climbing_gear(Some(&cassette), Some(&rings)) - 0.62).abs() < 1e-9);
    }

    #[test]
    fn test_top_speed() {
        // 32/10 × 29π × 90 × 60 / 63360 = 24.8 mph
        let speed = top_speed_mph(Some(&eagle()), Some(&[32]), 29.0, 90.0);
        assert!((speed - 24.8).abs() < 1e-9, "got {speed}");
    }

    #[test]
    fn test_missing_data_is_zero() {
        assert!(top_speed_mph(None, Some(&[32]), 29.0, 90.0).abs() < f64::EPSILON);
        assert!(climbing_gear(Some(&eagle()), None).abs() < f64::EPSILON);
        assert!(gear_range_percent(Some(&eagle()), Some(&[])).abs() < f64::EPSILON);
        assert!(generate_gear_ratios(None, 32).is_empty());
    }

    #[test]
    fn test_ratios_descending() {
        let ratios = generate_gear_ratios(Some(&eagle()), 32);
        assert_eq!(ratios.len(), 12);
        assert!(ratios.windows(2).all(|w| w[0].ratio >= w[1].ratio));
        assert_eq!(ratios[0].cog_teeth, 10);
    }

    #[test]
    fn test_cross_chaining_two_by() {
        let cassette = CassetteSpec {
            speeds: 11,
            cogs: vec![11, 12, 13, 14, 15, 17, 19, 21, 24, 27, 30],
            freehub_type: FreehubType::ShimanoHg,
        };
        let issues = cross_chaining_issues(
            Some(&cassette),
            Some(&[34, 50]),
            &CrossChainingConfig::default(),
        );
        assert_eq!(issues.len(), 6);

        let high: Vec<_> = issues
            .iter()
            .filter(|i| i.severity == CrossChainSeverity::High)
            .map(|i| (i.chainring_teeth, i.cog_teeth))
            .collect();
        assert_eq!(high, vec![(34, 11), (34, 12), (50, 27), (50, 30)]);

        let medium: Vec<_> = issues
            .iter()
            .filter(|i| i.severity == CrossChainSeverity::Medium)
            .map(|i| (i.chainring_teeth, i.cog_teeth))
            .collect();
        assert_eq!(medium, vec![(34, 13), (50, 24)]);
    }
}
