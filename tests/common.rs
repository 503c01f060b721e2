// ABOUTME: Shared test utilities and component fixtures for integration tests
// ABOUTME: Provides logging setup plus catalog components and ready-made bike setups
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Velotune Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `velotune`
//!
//! Catalog fixtures mirror real parts closely enough that the numbers in the
//! assertions can be checked by hand.

use std::env;
use std::sync::Once;
use velotune::core::models::{
    AxleType, BikeSetup, CageLength, CassetteSpec, ChainSpec, ChainringSpec, Component,
    ComponentSpec, CranksetSpec, DerailleurSpec, FreehubType, HubSpec, WheelSpec,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Build a catalog component with test metadata
pub fn component(id: &str, weight_grams: f64, msrp: f64, spec: ComponentSpec) -> Component {
    Component {
        id: id.to_owned(),
        manufacturer: "Test".to_owned(),
        model: id.to_owned(),
        year: 2024,
        weight_grams,
        msrp,
        spec,
    }
}

/// SRAM Eagle 10-52, 12 speed, XD driver
pub fn eagle_cassette() -> Component {
    component(
        "xg-1295",
        372.0,
        360.0,
        ComponentSpec::Cassette(CassetteSpec {
            speeds: 12,
            cogs: vec![10, 12, 14, 16, 18, 21, 24, 28, 32, 36, 42, 52],
            freehub_type: FreehubType::SramXd,
        }),
    )
}

/// Shimano 11-42, 11 speed, HG spline
pub fn hg_cassette() -> Component {
    component(
        "cs-m7000",
        480.0,
        90.0,
        ComponentSpec::Cassette(CassetteSpec {
            speeds: 11,
            cogs: vec![11, 13, 15, 17, 19, 21, 24, 28, 32, 37, 42],
            freehub_type: FreehubType::ShimanoHg,
        }),
    )
}

/// Single chainring
pub fn chainring(teeth: u32) -> Component {
    component(
        &format!("ring-{teeth}"),
        90.0,
        70.0,
        ComponentSpec::Chainring(ChainringSpec { teeth: vec![teeth] }),
    )
}

/// Crankset with the given rings
pub fn crankset(rings: Vec<u32>) -> Component {
    component(
        "crankset",
        650.0,
        250.0,
        ComponentSpec::Crankset(CranksetSpec {
            chainrings: rings,
            crank_length_mm: 170.0,
        }),
    )
}

/// Rear hub offering the given freehub bodies
pub fn hub(freehubs: Vec<FreehubType>) -> Component {
    component(
        "hub",
        320.0,
        200.0,
        ComponentSpec::Hub(HubSpec {
            freehub_types: freehubs,
            axle_type: AxleType::ThruAxle,
            axle_width_mm: 148,
        }),
    )
}

/// Long cage rear derailleur
pub fn derailleur(speeds: u8, max_cog: u32, capacity: u32) -> Component {
    component(
        &format!("rd-{speeds}s-{max_cog}t"),
        290.0,
        120.0,
        ComponentSpec::Derailleur(DerailleurSpec {
            speeds,
            max_cog,
            capacity,
            cage_length: CageLength::Long,
        }),
    )
}

/// Chain for the given speed count
pub fn chain(speeds: u8) -> Component {
    component(
        &format!("chain-{speeds}s"),
        260.0,
        40.0,
        ComponentSpec::Chain(ChainSpec { speeds, links: 126 }),
    )
}

/// 29 inch wheel
pub fn wheel_29() -> Component {
    component(
        "wheel-29",
        1900.0,
        400.0,
        ComponentSpec::Wheel(WheelSpec {
            diameter_inches: 29.0,
            freehub_types: vec![],
        }),
    )
}

/// Working 1x11 trail drivetrain on an HG-only hub
pub fn hg_1x11_setup() -> BikeSetup {
    BikeSetup::new()
        .with_cassette(hg_cassette())
        .with_chainring(chainring(32))
        .with_hub(hub(vec![FreehubType::ShimanoHg]))
        .with_derailleur(derailleur(11, 42, 31))
        .with_chain(chain(11))
        .with_wheel(wheel_29())
}

/// Working 1x12 Eagle drivetrain on an XD hub
pub fn eagle_1x12_setup() -> BikeSetup {
    BikeSetup::new()
        .with_cassette(eagle_cassette())
        .with_chainring(chainring(32))
        .with_hub(hub(vec![FreehubType::SramXd]))
        .with_derailleur(derailleur(12, 52, 42))
        .with_chain(chain(12))
        .with_wheel(wheel_29())
}

/// The 1x11 bike with only the cassette swapped to Eagle
pub fn eagle_cassette_swap_setup() -> BikeSetup {
    hg_1x11_setup().with_cassette(eagle_cassette())
}
