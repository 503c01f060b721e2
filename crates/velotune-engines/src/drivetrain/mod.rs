// ABOUTME: Drivetrain performance and compatibility engine
// ABOUTME: Gear math, cross-chaining, compatibility rules, setup comparison, chain length and chainline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

//! # Drivetrain Engine
//!
//! Two kinds of entry point live here, and they fail differently:
//!
//! - Per-field helpers in [`gearing`] and [`check_compatibility`] degrade to
//!   neutral values (0, empty list, skipped rule) when optional component data
//!   is missing. They never return an error.
//! - [`compare_setups`] validates strictly: both setups must carry cassette and
//!   chainring (or crankset) data, otherwise it fails with
//!   `MissingRequiredData`.
//!
//! The standalone geometry calculators ([`calculate_chain_length`],
//! [`analyze_chainline`]) reject non-positive or implausible inputs with
//! `InvalidParameter`.

/// Chain length sizing and chainline analysis
pub mod chain;
/// Compatibility rule checks
pub mod compatibility;
/// Current vs proposed setup comparison
pub mod comparison;
/// Gear ratio, speed, range and cross-chaining helpers
pub mod gearing;

pub use chain::{
    analyze_chainline, calculate_chain_length, ChainLengthResult, ChainlineDirection,
    ChainlineResult,
};
pub use compatibility::{
    check_compatibility, CompatibilityIssue, CompatibilityResult, CompatibilitySolution,
    CompatibilityStatus, Difficulty, IssueSeverity, IssueType, SolutionAction,
};
pub use comparison::{compare_setups, ComparisonResult, MetricDelta, SetupPerformance};
pub use gearing::{CrossChainIssue, GearRatio};

use crate::parsing::LenientParse;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a cross-chained gear combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossChainSeverity {
    /// Outermost cogs on the wrong chainring
    High,
    /// Next cog inward
    Medium,
}

/// Frame category selecting the optimal chainline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum FrameType {
    /// Road frame
    Road,
    /// Gravel frame
    Gravel,
    /// Cross-country mountain bike
    CrossCountry,
    /// Trail mountain bike
    #[default]
    Trail,
    /// Enduro mountain bike
    Enduro,
}

impl LenientParse for FrameType {
    const KIND: &'static str = "frame type";

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "road" => Some(Self::Road),
            "gravel" | "cx" | "cyclocross" => Some(Self::Gravel),
            "cross_country" | "xc" => Some(Self::CrossCountry),
            "trail" | "mtb" => Some(Self::Trail),
            "enduro" => Some(Self::Enduro),
            _ => None,
        }
    }
}

impl From<String> for FrameType {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Road => "road",
            Self::Gravel => "gravel",
            Self::CrossCountry => "cross-country",
            Self::Trail => "trail",
            Self::Enduro => "enduro",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_type_lenient_parse() {
        assert_eq!(FrameType::parse_lenient("Road"), FrameType::Road);
        assert_eq!(FrameType::parse_lenient("XC"), FrameType::CrossCountry);
        assert_eq!(FrameType::parse_lenient("cross-country"), FrameType::CrossCountry);
        assert_eq!(FrameType::parse_lenient("fatbike"), FrameType::Trail);
    }

    #[test]
    fn test_frame_type_deserializes_unknown_as_default() {
        let frame: FrameType = serde_json::from_str("\"tandem\"").unwrap();
        assert_eq!(frame, FrameType::Trail);
    }
}
