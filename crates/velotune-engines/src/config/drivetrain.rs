// ABOUTME: Drivetrain engine configuration: defaults, cross-chaining table, fix costs, chainline optima
// ABOUTME: Policy constants for gear metrics and compatibility remediation pricing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

//! Drivetrain Engine Configuration
//!
//! Cross-chaining severities and efficiency losses are policy values, not derived
//! from chain-angle physics. Fix costs are flat estimates in the catalog currency.

use crate::drivetrain::{CrossChainSeverity, FrameType};
use serde::{Deserialize, Serialize};

/// Drivetrain engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrivetrainConfig {
    /// Speed and wheel defaults used by setup comparison
    pub defaults: DrivetrainDefaults,
    /// Cross-chaining lookup table
    pub cross_chaining: CrossChainingConfig,
    /// Compatibility remediation costs and scoring
    pub compatibility: CompatibilityConfig,
    /// Chainline optima and recommendation thresholds
    pub chainline: ChainlineConfig,
}

/// Inputs assumed when a setup does not supply them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrivetrainDefaults {
    /// Pedaling cadence for top-speed figures (rpm)
    pub cadence_rpm: f64,
    /// Wheel diameter when the setup has no wheel (inches)
    pub wheel_diameter_in: f64,
}

/// Cross-chaining lookup table, keyed by cog position counted from the nearer
/// end of the cassette (0 = smallest or largest cog)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossChainingConfig {
    /// Positions flagged high severity (the two outermost cogs at each end)
    pub high_severity_positions: usize,
    /// Further positions flagged medium severity
    pub medium_severity_positions: usize,
    /// Efficiency loss reported for high severity combinations (%)
    pub high_efficiency_loss_percent: f64,
    /// Efficiency loss reported for medium severity combinations (%)
    pub medium_efficiency_loss_percent: f64,
}

impl CrossChainingConfig {
    /// Severity and efficiency loss for a cog position, `None` for middle cogs
    #[must_use]
    pub fn rule_for_position(&self, position: usize) -> Option<(CrossChainSeverity, f64)> {
        if position < self.high_severity_positions {
            Some((CrossChainSeverity::High, self.high_efficiency_loss_percent))
        } else if position < self.high_severity_positions + self.medium_severity_positions {
            Some((CrossChainSeverity::Medium, self.medium_efficiency_loss_percent))
        } else {
            None
        }
    }
}

/// Compatibility remediation pricing and confidence scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityConfig {
    /// Freehub body replacement or adapter
    pub freehub_fix_cost: f64,
    /// Rear derailleur upgrade
    pub derailleur_upgrade_cost: f64,
    /// Replacement chain
    pub chain_replacement_cost: f64,
    /// Confidence points removed per issue
    pub confidence_penalty_per_issue: f64,
}

/// Optimal chainline per frame category (mm from frame centerline)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainlineOptima {
    /// Road, 130/142mm rear spacing
    pub road: f64,
    /// Gravel, 142mm spacing with wide-range rings
    pub gravel: f64,
    /// Cross-country, Boost 148mm
    pub cross_country: f64,
    /// Trail, Boost 148mm
    pub trail: f64,
    /// Enduro, Boost or SuperBoost
    pub enduro: f64,
}

impl ChainlineOptima {
    /// Optimal chainline for a frame category
    #[must_use]
    pub const fn for_frame(&self, frame: FrameType) -> f64 {
        match frame {
            FrameType::Road => self.road,
            FrameType::Gravel => self.gravel,
            FrameType::CrossCountry => self.cross_country,
            FrameType::Trail => self.trail,
            FrameType::Enduro => self.enduro,
        }
    }
}

/// Chainline analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainlineConfig {
    /// Optimal chainline table
    pub optima: ChainlineOptima,
    /// Efficiency lost per mm of deviation (%)
    pub efficiency_loss_per_mm: f64,
    /// Efficiency never reported below this (%)
    pub min_efficiency_percent: f64,
    /// Deviation treated as aligned (mm)
    pub aligned_threshold_mm: f64,
    /// Deviation worth correcting (mm)
    pub notable_threshold_mm: f64,
    /// Deviation that needs new parts (mm)
    pub severe_threshold_mm: f64,
}

impl Default for DrivetrainDefaults {
    fn default() -> Self {
        Self {
            cadence_rpm: 90.0,
            wheel_diameter_in: 29.0,
        }
    }
}

impl Default for CrossChainingConfig {
    fn default() -> Self {
        Self {
            high_severity_positions: 2,
            medium_severity_positions: 1,
            high_efficiency_loss_percent: 3.0,
            medium_efficiency_loss_percent: 1.5,
        }
    }
}

impl Default for CompatibilityConfig {
    fn default() -> Self {
        Self {
            freehub_fix_cost: 80.0,
            derailleur_upgrade_cost: 150.0,
            chain_replacement_cost: 45.0,
            confidence_penalty_per_issue: 15.0,
        }
    }
}

impl Default for ChainlineOptima {
    fn default() -> Self {
        Self {
            road: 43.5,
            gravel: 45.0,
            cross_country: 49.0,
            trail: 49.5,
            enduro: 50.0,
        }
    }
}

impl Default for ChainlineConfig {
    fn default() -> Self {
        Self {
            optima: ChainlineOptima::default(),
            efficiency_loss_per_mm: 2.0,
            min_efficiency_percent: 85.0,
            aligned_threshold_mm: 2.0,
            notable_threshold_mm: 5.0,
            severe_threshold_mm: 10.0,
        }
    }
}
