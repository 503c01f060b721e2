// ABOUTME: Component catalog entry with a category-specific specification payload
// ABOUTME: Defines cassette, chainring, crankset, chain, derailleur, hub, wheel and tire specs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cassette mounting interface on the rear hub
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FreehubType {
    /// Shimano Hyperglide spline (8-11 speed road, most MTB up to 11 speed)
    ShimanoHg,
    /// Shimano Micro Spline (12 speed MTB, 10T small cog)
    ShimanoMicroSpline,
    /// SRAM XD driver (10T small cog)
    SramXd,
    /// SRAM XDR driver (road variant of XD, 1.85mm longer)
    SramXdr,
    /// Campagnolo N3W
    CampagnoloN3w,
}

impl FreehubType {
    /// Display name used in issue messages
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ShimanoHg => "Shimano HG",
            Self::ShimanoMicroSpline => "Shimano Micro Spline",
            Self::SramXd => "SRAM XD",
            Self::SramXdr => "SRAM XDR",
            Self::CampagnoloN3w => "Campagnolo N3W",
        }
    }
}

impl fmt::Display for FreehubType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rear derailleur cage length
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CageLength {
    /// Short cage (road, close ratio)
    Short,
    /// Medium cage
    Medium,
    /// Long cage (wide range, double/triple cranks)
    Long,
}

/// Hub axle standard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AxleType {
    /// Quick release skewer
    QuickRelease,
    /// Thru axle
    ThruAxle,
}

/// Cassette specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CassetteSpec {
    /// Number of cogs the cassette is indexed for
    pub speeds: u8,
    /// Cog sizes in teeth, in any order
    pub cogs: Vec<u32>,
    /// Required freehub interface
    pub freehub_type: FreehubType,
}

impl CassetteSpec {
    /// Smallest cog (teeth), `None` for an empty cog list
    #[must_use]
    pub fn smallest_cog(&self) -> Option<u32> {
        self.cogs.iter().copied().filter(|&c| c > 0).min()
    }

    /// Largest cog (teeth), `None` for an empty cog list
    #[must_use]
    pub fn largest_cog(&self) -> Option<u32> {
        self.cogs.iter().copied().max().filter(|&c| c > 0)
    }
}

/// Chainring specification (one ring for 1x, several for 2x/3x)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainringSpec {
    /// Ring sizes in teeth
    pub teeth: Vec<u32>,
}

/// Crankset specification, interchangeable with a chainring for gearing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CranksetSpec {
    /// Installed ring sizes in teeth
    pub chainrings: Vec<u32>,
    /// Crank arm length (mm)
    pub crank_length_mm: f64,
}

/// Chain specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSpec {
    /// Drivetrain speed count the chain is built for
    pub speeds: u8,
    /// Links as sold
    pub links: u32,
}

/// Rear derailleur specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerailleurSpec {
    /// Drivetrain speed count (shifting index)
    pub speeds: u8,
    /// Largest cog the derailleur clears (teeth)
    pub max_cog: u32,
    /// Total wrap capacity (teeth)
    pub capacity: u32,
    /// Cage length
    pub cage_length: CageLength,
}

/// Rear hub specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubSpec {
    /// Freehub bodies available for this hub
    pub freehub_types: Vec<FreehubType>,
    /// Axle standard
    pub axle_type: AxleType,
    /// Axle width (mm), e.g. 142 or 148
    pub axle_width_mm: u32,
}

/// Wheel specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelSpec {
    /// Outside diameter including tire (inches)
    pub diameter_inches: f64,
    /// Freehub bodies the built-in hub accepts
    #[serde(default)]
    pub freehub_types: Vec<FreehubType>,
}

/// Tire specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TireSpec {
    /// Casing width (mm)
    pub width_mm: f64,
    /// Whether the tire can be run without a tube
    #[serde(default)]
    pub tubeless_ready: bool,
}

/// Category-specific payload; the variant is the component's category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", content = "spec", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentSpec {
    /// Rear cassette
    Cassette(CassetteSpec),
    /// Standalone chainring(s)
    Chainring(ChainringSpec),
    /// Crankset with rings
    Crankset(CranksetSpec),
    /// Chain
    Chain(ChainSpec),
    /// Rear derailleur
    Derailleur(DerailleurSpec),
    /// Rear hub
    Hub(HubSpec),
    /// Complete wheel
    Wheel(WheelSpec),
    /// Tire
    Tire(TireSpec),
}

/// Category tag derived from a component's payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentCategory {
    /// Rear cassette
    Cassette,
    /// Standalone chainring(s)
    Chainring,
    /// Crankset with rings
    Crankset,
    /// Chain
    Chain,
    /// Rear derailleur
    Derailleur,
    /// Rear hub
    Hub,
    /// Complete wheel
    Wheel,
    /// Tire
    Tire,
}

/// Component catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Catalog identifier
    pub id: String,
    /// Manufacturer name
    pub manufacturer: String,
    /// Model name
    pub model: String,
    /// Model year
    pub year: u16,
    /// Claimed weight (grams)
    pub weight_grams: f64,
    /// Manufacturer suggested retail price
    pub msrp: f64,
    /// Category and category-specific data
    #[serde(flatten)]
    pub spec: ComponentSpec,
}

impl Component {
    /// Category tag of this component
    #[must_use]
    pub const fn category(&self) -> ComponentCategory {
        match self.spec {
            ComponentSpec::Cassette(_) => ComponentCategory::Cassette,
            ComponentSpec::Chainring(_) => ComponentCategory::Chainring,
            ComponentSpec::Crankset(_) => ComponentCategory::Crankset,
            ComponentSpec::Chain(_) => ComponentCategory::Chain,
            ComponentSpec::Derailleur(_) => ComponentCategory::Derailleur,
            ComponentSpec::Hub(_) => ComponentCategory::Hub,
            ComponentSpec::Wheel(_) => ComponentCategory::Wheel,
            ComponentSpec::Tire(_) => ComponentCategory::Tire,
        }
    }

    /// "Manufacturer Model (Year)" label used in findings
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.manufacturer, self.model, self.year)
    }

    /// Cassette payload, if this is a cassette
    #[must_use]
    pub const fn as_cassette(&self) -> Option<&CassetteSpec> {
        match &self.spec {
            ComponentSpec::Cassette(spec) => Some(spec),
            _ => None,
        }
    }

    /// Ring sizes for a chainring or crankset component
    #[must_use]
    pub fn chainring_teeth(&self) -> Option<&[u32]> {
        match &self.spec {
            ComponentSpec::Chainring(spec) => Some(spec.teeth.as_slice()),
            ComponentSpec::Crankset(spec) => Some(spec.chainrings.as_slice()),
            _ => None,
        }
    }

    /// Chain payload, if this is a chain
    #[must_use]
    pub const fn as_chain(&self) -> Option<&ChainSpec> {
        match &self.spec {
            ComponentSpec::Chain(spec) => Some(spec),
            _ => None,
        }
    }

    /// Derailleur payload, if this is a derailleur
    #[must_use]
    pub const fn as_derailleur(&self) -> Option<&DerailleurSpec> {
        match &self.spec {
            ComponentSpec::Derailleur(spec) => Some(spec),
            _ => None,
        }
    }

    /// Hub payload, if this is a hub
    #[must_use]
    pub const fn as_hub(&self) -> Option<&HubSpec> {
        match &self.spec {
            ComponentSpec::Hub(spec) => Some(spec),
            _ => None,
        }
    }

    /// Wheel payload, if this is a wheel
    #[must_use]
    pub const fn as_wheel(&self) -> Option<&WheelSpec> {
        match &self.spec {
            ComponentSpec::Wheel(spec) => Some(spec),
            _ => None,
        }
    }

    /// Tire payload, if this is a tire
    #[must_use]
    pub const fn as_tire(&self) -> Option<&TireSpec> {
        match &self.spec {
            ComponentSpec::Tire(spec) => Some(spec),
            _ => None,
        }
    }
}
