// ABOUTME: Lenient parsing for finite-domain engine enumerations
// ABOUTME: Unrecognized names fall back to the enumeration's documented default with a warning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

use std::fmt::Debug;
use tracing::warn;

/// Enumeration whose unrecognized names resolve to a default instead of failing
pub trait LenientParse: Sized + Copy + Default + Debug {
    /// Human-readable name of the enumeration, used in fallback warnings
    const KIND: &'static str;

    /// Match a normalized (lowercase, underscore separated) name
    fn from_name(name: &str) -> Option<Self>;

    /// Parse a caller-supplied name, falling back to `Self::default()`
    fn parse_lenient(value: &str) -> Self {
        let normalized = normalize(value);
        Self::from_name(&normalized).unwrap_or_else(|| {
            let fallback = Self::default();
            warn!(
                kind = Self::KIND,
                value = %value,
                fallback = ?fallback,
                "Unrecognized value, using default"
            );
            fallback
        })
    }
}

/// Lowercase, trim, and map spaces and hyphens to underscores
#[must_use]
pub fn normalize(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}
