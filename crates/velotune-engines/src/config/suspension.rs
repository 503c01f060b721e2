// ABOUTME: Suspension engine configuration with per-category presets
// ABOUTME: Pressure ratios, sag targets, travel, damping bases and style/terrain adjustments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

//! Suspension Setup Configuration
//!
//! Pressure ratios are PSI per kg of rider plus gear and rise with travel. Shock
//! travel is shock stroke, so sag millimetres are measured on the shock shaft.

use crate::suspension::{BikeCategory, RidingStyle, TrailTerrain};
use serde::{Deserialize, Serialize};

/// Baseline for one suspension unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitPreset {
    /// Air pressure per kg of system weight (PSI/kg)
    pub pressure_ratio_psi_per_kg: f64,
    /// Target sag (% of travel)
    pub sag_percent: f64,
    /// Travel, or stroke for shocks (mm)
    pub travel_mm: f64,
    /// Rebound clicks from closed at the reference weight
    pub base_rebound_clicks: i32,
    /// Compression clicks from open, `None` without external compression adjust
    pub base_compression_clicks: Option<i32>,
}

/// Fork and optional shock preset for a bike category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryPreset {
    /// Fork baseline
    pub fork: UnitPreset,
    /// Shock baseline, `None` for hardtails
    pub shock: Option<UnitPreset>,
}

/// Presets keyed by bike category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPresets {
    /// Cross-country full suspension
    pub xc: CategoryPreset,
    /// Trail full suspension
    pub trail: CategoryPreset,
    /// Enduro full suspension
    pub enduro: CategoryPreset,
    /// Downhill full suspension
    pub downhill: CategoryPreset,
    /// Hardtail, fork only
    pub hardtail: CategoryPreset,
}

impl CategoryPresets {
    /// Preset for a bike category
    #[must_use]
    pub const fn for_category(&self, category: BikeCategory) -> &CategoryPreset {
        match category {
            BikeCategory::Xc => &self.xc,
            BikeCategory::Trail => &self.trail,
            BikeCategory::Enduro => &self.enduro,
            BikeCategory::Downhill => &self.downhill,
            BikeCategory::Hardtail => &self.hardtail,
        }
    }

    /// All presets in ascending travel order
    #[must_use]
    pub const fn all(&self) -> [&CategoryPreset; 5] {
        [
            &self.xc,
            &self.hardtail,
            &self.trail,
            &self.enduro,
            &self.downhill,
        ]
    }
}

/// Riding style adjustments
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StyleTable<T> {
    /// Relaxed
    pub relaxed: T,
    /// Balanced
    pub balanced: T,
    /// Aggressive
    pub aggressive: T,
    /// Racing
    pub racing: T,
}

impl<T: Copy> StyleTable<T> {
    /// Value for a riding style
    #[must_use]
    pub const fn get(&self, style: RidingStyle) -> T {
        match style {
            RidingStyle::Relaxed => self.relaxed,
            RidingStyle::Balanced => self.balanced,
            RidingStyle::Aggressive => self.aggressive,
            RidingStyle::Racing => self.racing,
        }
    }
}

/// Trail terrain adjustments
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailTerrainTable<T> {
    /// Smooth
    pub smooth: T,
    /// Mixed
    pub mixed: T,
    /// Rough
    pub rough: T,
    /// Bike park
    pub bike_park: T,
}

impl<T: Copy> TrailTerrainTable<T> {
    /// Value for a trail terrain
    #[must_use]
    pub const fn get(&self, terrain: TrailTerrain) -> T {
        match terrain {
            TrailTerrain::Smooth => self.smooth,
            TrailTerrain::Mixed => self.mixed,
            TrailTerrain::Rough => self.rough,
            TrailTerrain::BikePark => self.bike_park,
        }
    }
}

/// Suspension engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspensionConfig {
    /// Rider weight the click bases are tuned for (kg)
    pub reference_weight_kg: f64,
    /// Weight per rebound click step (kg)
    pub weight_per_click_kg: f64,
    /// Lowest click count reported
    pub min_clicks: i32,
    /// Highest click count reported
    pub max_clicks: i32,
    /// Presets per bike category
    pub presets: CategoryPresets,
    /// Additive pressure adjustment per riding style (fraction)
    pub style_pressure_adjustment: StyleTable<f64>,
    /// Additive pressure adjustment per terrain (fraction)
    pub terrain_pressure_adjustment: TrailTerrainTable<f64>,
    /// Compression clicks added per riding style
    pub style_compression_clicks: StyleTable<i32>,
    /// Compression clicks added per terrain
    pub terrain_compression_clicks: TrailTerrainTable<i32>,
}

const fn unit(
    pressure_ratio_psi_per_kg: f64,
    sag_percent: f64,
    travel_mm: f64,
    base_rebound_clicks: i32,
    base_compression_clicks: Option<i32>,
) -> UnitPreset {
    UnitPreset {
        pressure_ratio_psi_per_kg,
        sag_percent,
        travel_mm,
        base_rebound_clicks,
        base_compression_clicks,
    }
}

impl Default for CategoryPresets {
    fn default() -> Self {
        Self {
            xc: CategoryPreset {
                fork: unit(0.95, 20.0, 100.0, 10, None),
                shock: Some(unit(2.6, 25.0, 45.0, 10, None)),
            },
            trail: CategoryPreset {
                fork: unit(1.00, 25.0, 140.0, 8, Some(6)),
                shock: Some(unit(2.8, 30.0, 55.0, 8, Some(5))),
            },
            enduro: CategoryPreset {
                fork: unit(1.05, 28.0, 170.0, 7, Some(8)),
                shock: Some(unit(3.0, 32.0, 62.5, 7, Some(7))),
            },
            downhill: CategoryPreset {
                fork: unit(1.10, 30.0, 200.0, 6, Some(10)),
                shock: Some(unit(3.2, 35.0, 75.0, 6, Some(9))),
            },
            hardtail: CategoryPreset {
                fork: unit(0.98, 22.0, 120.0, 9, Some(5)),
                shock: None,
            },
        }
    }
}

impl Default for SuspensionConfig {
    fn default() -> Self {
        Self {
            reference_weight_kg: 75.0,
            weight_per_click_kg: 10.0,
            min_clicks: 0,
            max_clicks: 20,
            presets: CategoryPresets::default(),
            style_pressure_adjustment: StyleTable {
                relaxed: -0.05,
                balanced: 0.0,
                aggressive: 0.05,
                racing: 0.08,
            },
            terrain_pressure_adjustment: TrailTerrainTable {
                smooth: -0.03,
                mixed: 0.0,
                rough: 0.03,
                bike_park: 0.05,
            },
            style_compression_clicks: StyleTable {
                relaxed: -2,
                balanced: 0,
                aggressive: 2,
                racing: 3,
            },
            terrain_compression_clicks: TrailTerrainTable {
                smooth: -1,
                mixed: 0,
                rough: 1,
                bike_park: 2,
            },
        }
    }
}
