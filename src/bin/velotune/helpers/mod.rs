// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors
// ABOUTME: Re-exports helper modules for the velotune CLI
// ABOUTME: Provides JSON input and output utilities

pub mod io;
