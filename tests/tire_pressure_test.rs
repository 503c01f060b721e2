// ABOUTME: Integration tests for the tire pressure engine
// ABOUTME: Terrain ordering, tubeless and weight effects, rounding, safe ranges and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use velotune::engines::config::TirePressureConfig;
use velotune::engines::{
    calculate_tire_pressure, RidePriority, SurfaceCondition, Terrain, TirePressureParams,
};
use velotune::ErrorCode;

const TERRAINS: [Terrain; 5] = [
    Terrain::Road,
    Terrain::Gravel,
    Terrain::Trail,
    Terrain::Enduro,
    Terrain::Downhill,
];

fn params(terrain: Terrain, width: f64, tubeless: bool) -> TirePressureParams {
    TirePressureParams {
        rider_weight_kg: 75.0,
        bike_weight_kg: 12.0,
        tire_width_mm: width,
        wheel_diameter_in: 29.0,
        terrain,
        tubeless,
        condition: SurfaceCondition::Dry,
        priority: RidePriority::Balanced,
    }
}

/// Rider kg, bike kg and tire width mm spanning road to fat bike setups
const SYSTEMS: [(f64, f64, f64); 5] = [
    (60.0, 8.0, 28.0),
    (75.0, 12.0, 45.0),
    (75.0, 12.0, 60.0),
    (95.0, 16.0, 62.0),
    (20.0, 8.0, 120.0),
];

fn system_params(system: (f64, f64, f64), terrain: Terrain, tubeless: bool) -> TirePressureParams {
    let (rider_weight_kg, bike_weight_kg, width) = system;
    TirePressureParams {
        rider_weight_kg,
        bike_weight_kg,
        ..params(terrain, width, tubeless)
    }
}

#[test]
fn test_rougher_terrain_lowers_pressure() {
    common::init_test_logging();
    let config = TirePressureConfig::default();

    for system in SYSTEMS {
        for tubeless in [false, true] {
            let results: Vec<_> = TERRAINS
                .iter()
                .map(|t| calculate_tire_pressure(&system_params(system, *t, tubeless), &config).unwrap())
                .collect();
            let fronts: Vec<f64> = results.iter().map(|r| r.front_psi).collect();
            let rears: Vec<f64> = results.iter().map(|r| r.rear_psi).collect();

            assert!(fronts.windows(2).all(|w| w[0] > w[1]), "{system:?} tubeless={tubeless}: {fronts:?}");
            assert!(rears.windows(2).all(|w| w[0] > w[1]), "{system:?} tubeless={tubeless}: {rears:?}");
        }
    }
}

#[test]
fn test_tubeless_lowers_pressure() {
    let config = TirePressureConfig::default();
    for system in SYSTEMS {
        for terrain in TERRAINS {
            let tubes = calculate_tire_pressure(&system_params(system, terrain, false), &config).unwrap();
            let tubeless = calculate_tire_pressure(&system_params(system, terrain, true), &config).unwrap();
            assert!(tubeless.front_psi < tubes.front_psi, "{system:?} {terrain}");
            assert!(tubeless.rear_psi < tubes.rear_psi, "{system:?} {terrain}");
        }
    }
}

#[test]
fn test_same_inputs_same_pressure() {
    let config = TirePressureConfig::default();
    for system in SYSTEMS {
        let request = system_params(system, Terrain::Gravel, true);
        let first = calculate_tire_pressure(&request, &config).unwrap();
        let second = calculate_tire_pressure(&request, &config).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_heavier_rider_needs_more_pressure() {
    let config = TirePressureConfig::default();
    let light = calculate_tire_pressure(&params(Terrain::Trail, 60.0, true), &config).unwrap();
    let heavy = calculate_tire_pressure(
        &TirePressureParams {
            rider_weight_kg: 100.0,
            ..params(Terrain::Trail, 60.0, true)
        },
        &config,
    )
    .unwrap();
    assert!(heavy.front_psi > light.front_psi);
    assert!(heavy.rear_psi > light.rear_psi);
}

#[test]
fn test_outputs_on_half_psi_grid_inside_safe_range() {
    let config = TirePressureConfig::default();
    for terrain in TERRAINS {
        for width in [25.0, 40.0, 61.0] {
            let result = calculate_tire_pressure(&params(terrain, width, true), &config).unwrap();
            for value in [result.front_psi, result.rear_psi, result.safe_range.min_psi, result.safe_range.max_psi] {
                assert!(((value * 2.0).round() - value * 2.0).abs() < 1e-9, "{value}");
            }
            assert!(result.rear_psi >= result.front_psi);
            assert!(result.safe_range.min_psi <= result.front_psi);
            assert!(result.rear_psi <= result.safe_range.max_psi);
            assert!((50.0..=100.0).contains(&result.confidence_score));
        }
    }
}

#[test]
fn test_wet_condition_lowers_pressure_and_confidence() {
    let config = TirePressureConfig::default();
    let dry = calculate_tire_pressure(&params(Terrain::Gravel, 45.0, true), &config).unwrap();
    let wet = calculate_tire_pressure(
        &TirePressureParams {
            condition: SurfaceCondition::Wet,
            ..params(Terrain::Gravel, 45.0, true)
        },
        &config,
    )
    .unwrap();

    assert!(wet.front_psi < dry.front_psi);
    assert!(wet.confidence_score < dry.confidence_score);
    assert!(wet.notes.terrain.iter().any(|n| n.contains("Wet")));
}

#[test]
fn test_rejects_out_of_range_inputs() {
    let config = TirePressureConfig::default();

    let err = calculate_tire_pressure(
        &TirePressureParams {
            rider_weight_kg: -5.0,
            ..params(Terrain::Road, 28.0, false)
        },
        &config,
    )
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidParameter);
    assert_eq!(err.details["parameter"], "rider_weight_kg");

    let err = calculate_tire_pressure(&params(Terrain::Road, 300.0, false), &config).unwrap_err();
    assert_eq!(err.details["parameter"], "tire_width_mm");
}

#[test]
fn test_request_json_with_unknown_names() {
    let request: TirePressureParams = serde_json::from_str(
        r#"{
            "rider_weight_kg": 80,
            "bike_weight_kg": 14,
            "tire_width_mm": 61,
            "wheel_diameter_in": 29,
            "terrain": "moon dust",
            "priority": "Speed"
        }"#,
    )
    .unwrap();

    assert_eq!(request.terrain, Terrain::Trail);
    assert_eq!(request.priority, RidePriority::Speed);
    assert!(!request.tubeless);
    assert_eq!(request.condition, SurfaceCondition::Dry);

    let result = calculate_tire_pressure(&request, &TirePressureConfig::default()).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert!(json["safe_range"]["min_psi"].is_number());
    assert!(json["notes"]["recommendations"].is_array());
}
