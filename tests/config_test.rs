// ABOUTME: Integration tests for engine configuration loading
// ABOUTME: Environment overrides, parse failures and validation of overridden values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serial_test::serial;
use std::env;
use velotune::engines::config::{
    ConfigError, ENV_CHAIN_REPLACEMENT_COST, ENV_DEFAULT_CADENCE_RPM, ENV_FREEHUB_FIX_COST,
    ENV_SUSPENSION_REFERENCE_WEIGHT_KG, ENV_TIRE_CONFIDENCE_FLOOR,
};
use velotune::EngineConfig;

const ALL_VARS: [&str; 5] = [
    ENV_DEFAULT_CADENCE_RPM,
    ENV_FREEHUB_FIX_COST,
    ENV_CHAIN_REPLACEMENT_COST,
    ENV_TIRE_CONFIDENCE_FLOOR,
    ENV_SUSPENSION_REFERENCE_WEIGHT_KG,
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_load_without_overrides_matches_defaults() {
    clear_env();
    let loaded = EngineConfig::load().unwrap();
    let defaults = EngineConfig::default();

    assert_eq!(
        serde_json::to_value(&loaded).unwrap(),
        serde_json::to_value(&defaults).unwrap()
    );
}

#[test]
#[serial]
fn test_env_overrides_apply() {
    clear_env();
    env::set_var(ENV_FREEHUB_FIX_COST, "95.5");
    env::set_var(ENV_DEFAULT_CADENCE_RPM, " 85 ");
    env::set_var(ENV_SUSPENSION_REFERENCE_WEIGHT_KG, "80");

    let config = EngineConfig::load().unwrap();
    clear_env();

    assert!((config.drivetrain.compatibility.freehub_fix_cost - 95.5).abs() < f64::EPSILON);
    assert!((config.drivetrain.defaults.cadence_rpm - 85.0).abs() < f64::EPSILON);
    assert!((config.suspension.reference_weight_kg - 80.0).abs() < f64::EPSILON);
}

#[test]
#[serial]
fn test_unparseable_override_is_rejected() {
    clear_env();
    env::set_var(ENV_CHAIN_REPLACEMENT_COST, "forty");

    let result = EngineConfig::load();
    clear_env();

    match result {
        Err(ConfigError::Parse(message)) => assert!(message.contains(ENV_CHAIN_REPLACEMENT_COST)),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_override_still_validated() {
    clear_env();
    env::set_var(ENV_TIRE_CONFIDENCE_FLOOR, "99");

    let result = EngineConfig::load();
    clear_env();

    assert!(result.is_err(), "floor above the base score must be rejected");
}

#[test]
#[serial]
fn test_negative_cost_rejected() {
    clear_env();
    env::set_var(ENV_FREEHUB_FIX_COST, "-10");

    let result = EngineConfig::load();
    clear_env();

    assert!(matches!(result, Err(ConfigError::ValueOutOfRange(_))));
}

#[test]
#[serial]
fn test_non_finite_overrides_rejected() {
    for (var, value) in [
        (ENV_DEFAULT_CADENCE_RPM, "NaN"),
        (ENV_FREEHUB_FIX_COST, "inf"),
        (ENV_SUSPENSION_REFERENCE_WEIGHT_KG, "NaN"),
        (ENV_TIRE_CONFIDENCE_FLOOR, "NaN"),
    ] {
        clear_env();
        env::set_var(var, value);

        let result = EngineConfig::load();
        clear_env();

        assert!(
            matches!(result, Err(ConfigError::ValueOutOfRange(_))),
            "{var}={value} must be rejected, got {result:?}"
        );
    }
}
