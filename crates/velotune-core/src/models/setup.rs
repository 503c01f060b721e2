// ABOUTME: Bike setup bundle of optional component slots
// ABOUTME: Provides slot accessors and the comparison-readiness precondition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

use super::component::{CassetteSpec, ChainSpec, Component, DerailleurSpec, FreehubType};
use serde::{Deserialize, Serialize};

/// Named slot of a bike setup
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SetupSlot {
    /// Rear cassette
    Cassette,
    /// Chainring, or the crankset standing in for it
    Chainring,
    /// Chain
    Chain,
    /// Wheel
    Wheel,
    /// Tire
    Tire,
    /// Rear derailleur
    Derailleur,
    /// Rear hub
    Hub,
}

impl SetupSlot {
    /// Slots counted when totalling weight and cost of a setup
    pub const WEIGHED: [Self; 5] = [
        Self::Cassette,
        Self::Chainring,
        Self::Chain,
        Self::Wheel,
        Self::Tire,
    ];
}

/// Optional-slot bundle of components
///
/// A setup is comparison-ready when it holds a cassette and a chainring
/// (or a crankset, treated the same way).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BikeSetup {
    /// Rear cassette
    #[serde(default)]
    pub cassette: Option<Component>,
    /// Chainring(s)
    #[serde(default)]
    pub chainring: Option<Component>,
    /// Crankset, used for gearing when no chainring is given
    #[serde(default)]
    pub crankset: Option<Component>,
    /// Chain
    #[serde(default)]
    pub chain: Option<Component>,
    /// Wheel
    #[serde(default)]
    pub wheel: Option<Component>,
    /// Tire
    #[serde(default)]
    pub tire: Option<Component>,
    /// Rear derailleur
    #[serde(default)]
    pub derailleur: Option<Component>,
    /// Rear hub
    #[serde(default)]
    pub hub: Option<Component>,
}

impl BikeSetup {
    /// Empty setup
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cassette slot
    #[must_use]
    pub fn with_cassette(mut self, component: Component) -> Self {
        self.cassette = Some(component);
        self
    }

    /// Set the chainring slot
    #[must_use]
    pub fn with_chainring(mut self, component: Component) -> Self {
        self.chainring = Some(component);
        self
    }

    /// Set the crankset slot
    #[must_use]
    pub fn with_crankset(mut self, component: Component) -> Self {
        self.crankset = Some(component);
        self
    }

    /// Set the chain slot
    #[must_use]
    pub fn with_chain(mut self, component: Component) -> Self {
        self.chain = Some(component);
        self
    }

    /// Set the wheel slot
    #[must_use]
    pub fn with_wheel(mut self, component: Component) -> Self {
        self.wheel = Some(component);
        self
    }

    /// Set the tire slot
    #[must_use]
    pub fn with_tire(mut self, component: Component) -> Self {
        self.tire = Some(component);
        self
    }

    /// Set the derailleur slot
    #[must_use]
    pub fn with_derailleur(mut self, component: Component) -> Self {
        self.derailleur = Some(component);
        self
    }

    /// Set the hub slot
    #[must_use]
    pub fn with_hub(mut self, component: Component) -> Self {
        self.hub = Some(component);
        self
    }

    /// Component occupying a slot; the chainring slot falls back to the crankset
    #[must_use]
    pub fn slot(&self, slot: SetupSlot) -> Option<&Component> {
        match slot {
            SetupSlot::Cassette => self.cassette.as_ref(),
            SetupSlot::Chainring => self.chainring.as_ref().or(self.crankset.as_ref()),
            SetupSlot::Chain => self.chain.as_ref(),
            SetupSlot::Wheel => self.wheel.as_ref(),
            SetupSlot::Tire => self.tire.as_ref(),
            SetupSlot::Derailleur => self.derailleur.as_ref(),
            SetupSlot::Hub => self.hub.as_ref(),
        }
    }

    /// Cassette payload if the cassette slot holds a cassette
    #[must_use]
    pub fn cassette_spec(&self) -> Option<&CassetteSpec> {
        self.cassette.as_ref().and_then(Component::as_cassette)
    }

    /// Ring sizes from the chainring, or from the crankset when no chainring is set
    #[must_use]
    pub fn chainring_teeth(&self) -> Option<&[u32]> {
        self.chainring
            .as_ref()
            .and_then(Component::chainring_teeth)
            .or_else(|| self.crankset.as_ref().and_then(Component::chainring_teeth))
            .filter(|teeth| !teeth.is_empty())
    }

    /// Chain payload
    #[must_use]
    pub fn chain_spec(&self) -> Option<&ChainSpec> {
        self.chain.as_ref().and_then(Component::as_chain)
    }

    /// Derailleur payload
    #[must_use]
    pub fn derailleur_spec(&self) -> Option<&DerailleurSpec> {
        self.derailleur.as_ref().and_then(Component::as_derailleur)
    }

    /// Freehub bodies the rear hub accepts, from the hub or else the wheel
    #[must_use]
    pub fn supported_freehubs(&self) -> Option<&[FreehubType]> {
        self.hub
            .as_ref()
            .and_then(Component::as_hub)
            .map(|hub| hub.freehub_types.as_slice())
            .or_else(|| {
                self.wheel
                    .as_ref()
                    .and_then(Component::as_wheel)
                    .map(|wheel| wheel.freehub_types.as_slice())
                    .filter(|types| !types.is_empty())
            })
    }

    /// Outside wheel diameter in inches, if a wheel is present
    #[must_use]
    pub fn wheel_diameter_inches(&self) -> Option<f64> {
        self.wheel
            .as_ref()
            .and_then(Component::as_wheel)
            .map(|wheel| wheel.diameter_inches)
            .filter(|d| *d > 0.0)
    }

    /// Whether both cassette and chainring (or crankset) data are present
    #[must_use]
    pub fn is_comparison_ready(&self) -> bool {
        self.cassette_spec().is_some_and(|c| !c.cogs.is_empty()) && self.chainring_teeth().is_some()
    }

    /// Summed weight of the weighed slots; empty slots count as zero grams
    #[must_use]
    pub fn total_weight_grams(&self) -> f64 {
        SetupSlot::WEIGHED
            .iter()
            .filter_map(|slot| self.slot(*slot))
            .map(|c| c.weight_grams)
            .sum()
    }

    /// Summed MSRP of the weighed slots; empty slots count as zero
    #[must_use]
    pub fn total_msrp(&self) -> f64 {
        SetupSlot::WEIGHED
            .iter()
            .filter_map(|slot| self.slot(*slot))
            .map(|c| c.msrp)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChainringSpec, ComponentSpec, CranksetSpec};

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

    #[test]
    fn test_crankset_stands_in_for_chainring() {
        let setup = BikeSetup::new().with_crankset(component(
            "crank",
            520.0,
            300.0,
            ComponentSpec::Crankset(CranksetSpec {
                chainrings: vec![34, 50],
                crank_length_mm: 172.5,
            }),
        ));
        assert_eq!(setup.chainring_teeth(), Some(&[34, 50][..]));
        assert!(!setup.is_comparison_ready());
        assert!((setup.total_weight_grams() - 520.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_ring_list_is_not_usable() {
        let setup = BikeSetup::new().with_chainring(component(
            "ring",
            80.0,
            60.0,
            ComponentSpec::Chainring(ChainringSpec { teeth: vec![] }),
        ));
        assert!(setup.chainring_teeth().is_none());
    }

    #[test]
    fn test_empty_setup_totals_are_zero() {
        let setup = BikeSetup::new();
        assert!(setup.total_weight_grams().abs() < f64::EPSILON);
        assert!(setup.total_msrp().abs() < f64::EPSILON);
        assert!(setup.supported_freehubs().is_none());
    }
}
