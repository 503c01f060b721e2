// ABOUTME: Standalone chain length sizing and chainline analysis
// ABOUTME: Even-link chain sizing with tolerance band; chainline deviation, angle and efficiency
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

use crate::config::ChainlineConfig;
use crate::drivetrain::FrameType;
use crate::rounding::round_to_decimals;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use velotune_core::constants::chain::{LINK_PITCH_MM, LINK_TOLERANCE, WRAP_ALLOWANCE_MM};
use velotune_core::constants::limits::{MAX_CHAINRING_TEETH, MAX_CHAINSTAY_MM, MAX_COG_TEETH};
use velotune_core::errors::{AppError, AppResult};

/// Recommended chain length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainLengthResult {
    /// Recommended link count, always even
    pub links: u32,
    /// Shortest acceptable link count
    pub min_links: u32,
    /// Longest acceptable link count
    pub max_links: u32,
    /// `2 × chainstay + chainring + cog + allowance`
    pub base_length: f64,
    /// Fitting notes
    pub notes: Vec<String>,
}

/// Which way the chainline is off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainlineDirection {
    /// Within the aligned threshold
    Aligned,
    /// Chainring sits further from the frame than optimal
    Outboard,
    /// Chainring sits closer to the frame than optimal
    Inboard,
}

/// Chainline analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainlineResult {
    /// Frame category used for the optimum
    pub frame_type: FrameType,
    /// `chainring offset + cassette offset / 2` (mm)
    pub current_chainline_mm: f64,
    /// Optimal chainline for the frame (mm)
    pub optimal_chainline_mm: f64,
    /// Absolute deviation (mm)
    pub deviation_mm: f64,
    /// Direction of misalignment
    pub direction: ChainlineDirection,
    /// `atan(deviation / chainstay)` (degrees)
    pub chain_angle_degrees: f64,
    /// Estimated drivetrain efficiency (%)
    pub efficiency_percent: f64,
    /// What to do about it
    pub recommendation: String,
}

fn positive(name: &'static str, value: f64) -> AppResult<()> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(
        AppError::invalid_parameter(format!("{name} must be greater than zero"))
            .with_details(json!({ "parameter": name, "value": value })),
    )
}

fn plausible_chainstay(chainstay_mm: f64) -> AppResult<()> {
    positive("chainstay_length_mm", chainstay_mm)?;
    if chainstay_mm > MAX_CHAINSTAY_MM {
        return Err(AppError::invalid_parameter(format!(
            "chainstay_length_mm must not exceed {MAX_CHAINSTAY_MM} mm"
        ))
        .with_details(json!({ "parameter": "chainstay_length_mm", "value": chainstay_mm })));
    }
    Ok(())
}

fn plausible_teeth(name: &'static str, teeth: u32, max: u32) -> AppResult<()> {
    positive(name, f64::from(teeth))?;
    if teeth > max {
        return Err(
            AppError::invalid_parameter(format!("{name} must not exceed {max} teeth"))
                .with_details(json!({ "parameter": name, "value": teeth, "max": max })),
        );
    }
    Ok(())
}

/// Size a chain for the largest chainring and largest cog
///
/// `links = ceil(base / 12.7)` rounded up to the next even number, where
/// `base = 2 × chainstay + chainring teeth + cog teeth + 4`.
///
/// # Errors
///
/// Returns `InvalidParameter` for zero tooth counts, a chainring above 80 or a
/// cog above 64 teeth, or a chainstay that is not positive or exceeds 1000 mm.
pub fn calculate_chain_length(
    chainring_teeth: u32,
    largest_cog_teeth: u32,
    chainstay_mm: f64,
) -> AppResult<ChainLengthResult> {
    plausible_teeth("chainring_teeth", chainring_teeth, MAX_CHAINRING_TEETH)?;
    plausible_teeth("largest_cog_teeth", largest_cog_teeth, MAX_COG_TEETH)?;
    plausible_chainstay(chainstay_mm)?;

    let base_length = 2.0f64.mul_add(
        chainstay_mm,
        f64::from(chainring_teeth) + f64::from(largest_cog_teeth) + WRAP_ALLOWANCE_MM,
    );
    let raw_links = (base_length / LINK_PITCH_MM).ceil() as u32;
    let links = raw_links + raw_links % 2;

    debug!(
        chainring_teeth,
        largest_cog_teeth, chainstay_mm, links, "Calculated chain length"
    );

    Ok(ChainLengthResult {
        links,
        min_links: links.saturating_sub(LINK_TOLERANCE),
        max_links: links + LINK_TOLERANCE,
        base_length: round_to_decimals(base_length, 1),
        notes: vec![
            "Verify on the bike: big chainring to largest cog without the derailleur, plus one inch (two links)".to_owned(),
            "Full suspension: size at the point of maximum chain growth in the travel".to_owned(),
            "Chains close in an even number of links; use a quick link where the chain supports one".to_owned(),
        ],
    })
}

/// Analyse chainline against the optimum for a frame category
///
/// # Errors
///
/// Returns `InvalidParameter` for a non-positive chainring offset or chainstay,
/// or a negative cassette offset.
pub fn analyze_chainline(
    chainring_offset_mm: f64,
    cassette_offset_mm: f64,
    chainstay_mm: f64,
    frame_type: FrameType,
    config: &ChainlineConfig,
) -> AppResult<ChainlineResult> {
    positive("chainring_offset_mm", chainring_offset_mm)?;
    if !cassette_offset_mm.is_finite() || cassette_offset_mm < 0.0 {
        return Err(
            AppError::invalid_parameter("cassette_offset_mm must not be negative")
                .with_details(json!({ "parameter": "cassette_offset_mm", "value": cassette_offset_mm })),
        );
    }
    plausible_chainstay(chainstay_mm)?;

    let current = cassette_offset_mm.mul_add(0.5, chainring_offset_mm);
    let optimal = config.optima.for_frame(frame_type);
    let signed = current - optimal;
    let deviation = signed.abs();

    let direction = if deviation < config.aligned_threshold_mm {
        ChainlineDirection::Aligned
    } else if signed > 0.0 {
        ChainlineDirection::Outboard
    } else {
        ChainlineDirection::Inboard
    };
    let efficiency = config
        .efficiency_loss_per_mm
        .mul_add(-deviation, 100.0)
        .max(config.min_efficiency_percent);
    let angle = (deviation / chainstay_mm).atan().to_degrees();

    debug!(
        current_chainline_mm = current,
        optimal_chainline_mm = optimal,
        deviation_mm = deviation,
        frame = %frame_type,
        "Analyzed chainline"
    );

    Ok(ChainlineResult {
        frame_type,
        current_chainline_mm: round_to_decimals(current, 1),
        optimal_chainline_mm: optimal,
        deviation_mm: round_to_decimals(deviation, 1),
        direction,
        chain_angle_degrees: round_to_decimals(angle, 2),
        efficiency_percent: round_to_decimals(efficiency, 1),
        recommendation: chainline_advice(deviation, direction, config),
    })
}

fn chainline_advice(deviation: f64, direction: ChainlineDirection, config: &ChainlineConfig) -> String {
    let toward = match direction {
        ChainlineDirection::Outboard => "inboard",
        ChainlineDirection::Inboard | ChainlineDirection::Aligned => "outboard",
    };
    if deviation > config.severe_threshold_mm {
        format!(
            "Chainline is {deviation:.1} mm off: fit a crankset, spindle or direct-mount ring with a different offset to move it {toward}"
        )
    } else if deviation > config.notable_threshold_mm {
        format!(
            "Chainline is {deviation:.1} mm off: move the chainring {toward} with an offset ring or bottom bracket spacers"
        )
    } else if deviation < config.aligned_threshold_mm {
        "Chainline is within tolerance; no changes needed".to_owned()
    } else {
        format!(
            "Minor {deviation:.1} mm deviation: watch for noise and wear on the extreme cogs"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use velotune_core::errors::ErrorCode;

    #[test]
    fn test_chain_length_even_with_tolerance() {
        // 2×435 + 32 + 52 + 4 = 958 mm → 75.4 → 76 links
        let result = calculate_chain_length(32, 52, 435.0).unwrap();
        assert_eq!(result.links, 76);
        assert_eq!(result.min_links, 74);
        assert_eq!(result.max_links, 78);
    }

    #[test]
    fn test_chain_length_rounds_odd_up() {
        // 2×405 + 50 + 28 + 4 = 892 mm → 70.2 → 71 links, rounded up to 72
        assert_eq!(calculate_chain_length(50, 28, 405.0).unwrap().links, 72);
    }

    #[test]
    fn test_chain_length_rejects_zero_chainstay() {
        let err = calculate_chain_length(32, 50, 0.0).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParameter);
    }

    #[test]
    fn test_chain_length_rejects_implausible_tooth_counts() {
        let err = calculate_chain_length(4_000_000, 52, 435.0).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParameter);
        assert!(err.message.contains("chainring_teeth"));

        let err = calculate_chain_length(32, MAX_COG_TEETH + 1, 435.0).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParameter);

        assert!(calculate_chain_length(MAX_CHAINRING_TEETH, MAX_COG_TEETH, 435.0).is_ok());
    }

    #[test]
    fn test_chainline_aligned() {
        let result =
            analyze_chainline(49.5, 0.0, 435.0, FrameType::Trail, &ChainlineConfig::default())
                .unwrap();
        assert_eq!(result.direction, ChainlineDirection::Aligned);
        assert!((result.efficiency_percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_chainline_efficiency_floor() {
        let result =
            analyze_chainline(60.0, 10.0, 420.0, FrameType::Road, &ChainlineConfig::default())
                .unwrap();
        // 65 − 43.5 = 21.5 mm outboard
        assert_eq!(result.direction, ChainlineDirection::Outboard);
        assert!((result.efficiency_percent - 85.0).abs() < f64::EPSILON);
        assert!(result.recommendation.contains("crankset"));
        assert!(result.chain_angle_degrees > 2.0);
    }
}
