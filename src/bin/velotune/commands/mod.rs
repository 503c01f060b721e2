// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors
// ABOUTME: Re-exports command modules for the velotune CLI
// ABOUTME: Provides drivetrain and rider setup commands

pub mod drivetrain;
pub mod setup;
