// ABOUTME: Criterion benchmarks for the drivetrain, tire pressure and suspension engines
// ABOUTME: Measures setup comparison, compatibility rules and the rider setup calculators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

//! Criterion benchmarks for the calculation engines.
//!
//! Every engine is a pure function, so these measure rule evaluation and
//! result assembly only.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use velotune::core::models::{
    AxleType, BikeSetup, CageLength, CassetteSpec, ChainSpec, ChainringSpec, Component,
    ComponentSpec, DerailleurSpec, FreehubType, HubSpec,
};
use velotune::engines::config::EngineConfig;
use velotune::engines::drivetrain::gearing::{cross_chaining_issues, generate_gear_ratios};
use velotune::engines::{
    analyze_chainline, calculate_chain_length, calculate_suspension_settings,
    calculate_tire_pressure, check_compatibility, compare_setups, BikeCategory, FrameType,
    RidePriority, RidingStyle, SurfaceCondition, SuspensionInput, Terrain, TirePressureParams,
    TrailTerrain,
};

fn part(id: &str, spec: ComponentSpec) -> Component {
    Component {
        id: id.to_owned(),
        manufacturer: "Bench".to_owned(),
        model: id.to_owned(),
        year: 2024,
        weight_grams: 300.0,
        msrp: 100.0,
        spec,
    }
}

/// Drivetrain with the given cogs, rings and rear hardware speed count
fn setup(cogs: Vec<u32>, rings: Vec<u32>, speeds: u8, freehub: FreehubType) -> BikeSetup {
    let largest = cogs.iter().copied().max().unwrap_or(0);
    BikeSetup::new()
        .with_cassette(part(
            "cassette",
            ComponentSpec::Cassette(CassetteSpec {
                speeds,
                cogs,
                freehub_type: freehub,
            }),
        ))
        .with_chainring(part("rings", ComponentSpec::Chainring(ChainringSpec { teeth: rings })))
        .with_hub(part(
            "hub",
            ComponentSpec::Hub(HubSpec {
                freehub_types: vec![FreehubType::ShimanoHg],
                axle_type: AxleType::ThruAxle,
                axle_width_mm: 148,
            }),
        ))
        .with_derailleur(part(
            "derailleur",
            ComponentSpec::Derailleur(DerailleurSpec {
                speeds: 11,
                max_cog: largest.min(42),
                capacity: 39,
                cage_length: CageLength::Medium,
            }),
        ))
        .with_chain(part("chain", ComponentSpec::Chain(ChainSpec { speeds: 11, links: 116 })))
}

fn road_2x11() -> BikeSetup {
    setup(
        vec![11, 12, 13, 14, 15, 17, 19, 21, 24, 27, 30],
        vec![34, 50],
        11,
        FreehubType::ShimanoHg,
    )
}

fn eagle_1x12() -> BikeSetup {
    setup(
        vec![10, 12, 14, 16, 18, 21, 24, 28, 32, 36, 42, 52],
        vec![32],
        12,
        FreehubType::SramXd,
    )
}

fn bench_drivetrain(c: &mut Criterion) {
    let config = EngineConfig::default();
    let mut group = c.benchmark_group("drivetrain");

    let setups = [("road_2x11", road_2x11()), ("eagle_1x12", eagle_1x12())];
    for (name, bike) in &setups {
        group.bench_with_input(BenchmarkId::new("gear_ratios", name), bike, |b, bike| {
            b.iter(|| generate_gear_ratios(black_box(bike.cassette_spec()), black_box(34)));
        });
        group.bench_with_input(BenchmarkId::new("cross_chaining", name), bike, |b, bike| {
            b.iter(|| {
                cross_chaining_issues(
                    black_box(bike.cassette_spec()),
                    black_box(bike.chainring_teeth()),
                    &config.drivetrain.cross_chaining,
                )
            });
        });
        group.bench_with_input(BenchmarkId::new("compatibility", name), bike, |b, bike| {
            b.iter(|| check_compatibility(black_box(bike), &config.drivetrain.compatibility));
        });
    }

    let current = road_2x11();
    let proposed = eagle_1x12();
    group.bench_function("compare_setups", |b| {
        b.iter(|| compare_setups(black_box(&current), black_box(&proposed), &config.drivetrain));
    });
    group.bench_function("chain_length", |b| {
        b.iter(|| calculate_chain_length(black_box(32), black_box(52), black_box(435.0)));
    });
    group.bench_function("chainline", |b| {
        b.iter(|| {
            analyze_chainline(
                black_box(52.0),
                black_box(0.0),
                black_box(435.0),
                FrameType::Trail,
                &config.drivetrain.chainline,
            )
        });
    });

    group.finish();
}

fn bench_tire_pressure(c: &mut Criterion) {
    let config = EngineConfig::default();
    let mut group = c.benchmark_group("tire_pressure");

    for terrain in [Terrain::Road, Terrain::Gravel, Terrain::Enduro] {
        let params = TirePressureParams {
            rider_weight_kg: 78.0,
            bike_weight_kg: 13.5,
            tire_width_mm: 45.0,
            wheel_diameter_in: 28.0,
            terrain,
            tubeless: true,
            condition: SurfaceCondition::Mixed,
            priority: RidePriority::Balanced,
        };
        group.bench_with_input(
            BenchmarkId::new("calculate", terrain),
            &params,
            |b, params| b.iter(|| calculate_tire_pressure(black_box(params), &config.tire_pressure)),
        );
    }

    group.finish();
}

fn bench_suspension(c: &mut Criterion) {
    let config = EngineConfig::default();
    let mut group = c.benchmark_group("suspension");

    for category in [BikeCategory::Xc, BikeCategory::Enduro, BikeCategory::Hardtail] {
        let input = SuspensionInput {
            rider_weight_kg: 82.0,
            gear_weight_kg: 4.0,
            bike_category: category,
            riding_style: RidingStyle::Aggressive,
            terrain: TrailTerrain::Rough,
            fork_model: Some("Fox 36 Factory".to_owned()),
            shock_model: Some("RockShox Super Deluxe".to_owned()),
        };
        group.bench_with_input(
            BenchmarkId::new("calculate", category),
            &input,
            |b, input| b.iter(|| calculate_suspension_settings(black_box(input), &config.suspension)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_drivetrain, bench_tire_pressure, bench_suspension);
criterion_main!(benches);
