// ABOUTME: Core data models for drivetrain components and bike setups
// ABOUTME: Re-exports Component, ComponentSpec, BikeSetup and related enumerations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

//! # Data Models
//!
//! Value objects supplied by the caller's component catalog. Nothing here is
//! mutated by the engines; a `BikeSetup` only borrows from its components when
//! a calculation runs.
//!
//! ## Design Principles
//!
//! - **Payload is the category**: `ComponentSpec` variants carry the
//!   category-specific data, so a component can never claim one category and
//!   hold another category's payload
//! - **Optional slots**: every part of a `BikeSetup` may be absent; engines decide
//!   whether absence is tolerated or an error

mod component;
mod setup;

pub use component::{
    AxleType, CageLength, CassetteSpec, ChainSpec, ChainringSpec, Component, ComponentCategory,
    ComponentSpec, CranksetSpec, DerailleurSpec, FreehubType, HubSpec, TireSpec, WheelSpec,
};
pub use setup::{BikeSetup, SetupSlot};
