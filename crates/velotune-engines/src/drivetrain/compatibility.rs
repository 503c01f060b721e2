// ABOUTME: Component compatibility rule checks for a bike setup
// ABOUTME: Freehub, derailleur capacity, chain speed and shifting index rules with priced remediations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Velotune Contributors

//! Compatibility rules.
//!
//! | Rule | Issue type | Severity | Remedy |
//! |------|------------|----------|--------|
//! | cassette freehub not supported by hub | `freehub` | critical | replace freehub body |
//! | largest cog above derailleur max, or wrap above capacity | `capacity` | critical | upgrade derailleur |
//! | chain speeds differ from cassette speeds | `chain-speed` | warning | replace chain |
//! | derailleur speeds differ from cassette speeds | `other` | warning | upgrade derailleur |
//!
//! Rules run independently and every finding is kept. A rule whose inputs are
//! missing from the setup is skipped.

use crate::config::CompatibilityConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;
use velotune_core::models::{BikeSetup, CassetteSpec, Component, DerailleurSpec};

/// Kind of compatibility finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueType {
    /// Cassette does not fit the hub's freehub body
    Freehub,
    /// Derailleur cannot reach the largest cog or take up the chain slack
    Capacity,
    /// Chain width does not match the cassette
    ChainSpeed,
    /// Any other mismatch, such as shifting index
    Other,
}

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// Works, but poorly or with accelerated wear
    Warning,
    /// Will not work as installed
    Critical,
}

/// Overall verdict for a setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompatibilityStatus {
    /// No findings
    Compatible,
    /// Findings, none critical
    Warning,
    /// At least one critical finding
    Incompatible,
}

/// Remediation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolutionAction {
    /// Swap the part for a compatible one
    Replace,
    /// Move to a more capable part
    Upgrade,
    /// Fit an adapter
    Adapter,
}

/// Mechanic skill needed for a remediation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Basic tools, home mechanic
    Easy,
    /// Specialist tools or some experience
    Moderate,
    /// Shop job
    Advanced,
}

/// A single compatibility finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityIssue {
    /// Finding kind
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    /// Severity
    pub severity: IssueSeverity,
    /// Human readable explanation
    pub message: String,
    /// The two components that conflict, by display name
    pub components: (String, String),
    /// Estimated cost of the fix
    pub estimated_fix_cost: f64,
}

/// Remediation paired with an issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilitySolution {
    /// Issue kind this solves
    pub issue_type: IssueType,
    /// Remediation kind
    pub action: SolutionAction,
    /// What to do
    pub description: String,
    /// Estimated cost
    pub estimated_cost: f64,
    /// Skill required
    pub difficulty: Difficulty,
}

/// Outcome of all compatibility rules for one setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    /// Overall verdict
    pub status: CompatibilityStatus,
    /// Findings in rule order
    pub issues: Vec<CompatibilityIssue>,
    /// One remediation per finding
    pub solutions: Vec<CompatibilitySolution>,
    /// `max(0, 100 − penalty × issue count)`
    pub confidence_score: f64,
}

impl CompatibilityResult {
    /// Summed cost of every remediation
    #[must_use]
    pub fn total_fix_cost(&self) -> f64 {
        self.solutions.iter().map(|s| s.estimated_cost).sum()
    }

    /// Whether any critical issue was found
    #[must_use]
    pub fn has_critical(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.severity == IssueSeverity::Critical)
    }
}

struct Finding {
    issue: CompatibilityIssue,
    solution: CompatibilitySolution,
}

/// Run every compatibility rule against a setup
#[must_use]
pub fn check_compatibility(setup: &BikeSetup, config: &CompatibilityConfig) -> CompatibilityResult {
    let findings: Vec<Finding> = [
        check_freehub(setup, config),
        check_derailleur_capacity(setup, config),
        check_chain_speed(setup, config),
        check_shifting_index(setup, config),
    ]
    .into_iter()
    .flatten()
    .collect();

    let (issues, solutions): (Vec<_>, Vec<_>) = findings
        .into_iter()
        .map(|finding| (finding.issue, finding.solution))
        .unzip();

    let status = if issues.iter().any(|i| i.severity == IssueSeverity::Critical) {
        CompatibilityStatus::Incompatible
    } else if issues.is_empty() {
        CompatibilityStatus::Compatible
    } else {
        CompatibilityStatus::Warning
    };
    let penalty = config.confidence_penalty_per_issue * issues.len() as f64;
    let confidence_score = (100.0 - penalty).max(0.0);

    debug!(
        status = ?status,
        issue_count = issues.len(),
        confidence_score,
        "Compatibility rules evaluated"
    );

    CompatibilityResult {
        status,
        issues,
        solutions,
        confidence_score,
    }
}

fn name_of(component: Option<&Component>) -> String {
    component.map_or_else(|| "unknown".to_owned(), Component::display_name)
}

fn check_freehub(setup: &BikeSetup, config: &CompatibilityConfig) -> Option<Finding> {
    let cassette = setup.cassette_spec()?;
    let supported = setup.supported_freehubs()?;
    if supported.contains(&cassette.freehub_type) {
        return None;
    }

    let hub = setup.hub.as_ref().or(setup.wheel.as_ref());
    let available = supported
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let cost = config.freehub_fix_cost;

    Some(Finding {
        issue: CompatibilityIssue {
            issue_type: IssueType::Freehub,
            severity: IssueSeverity::Critical,
            message: format!(
                "Cassette needs a {} freehub body; hub supports {available}",
                cassette.freehub_type
            ),
            components: (name_of(setup.cassette.as_ref()), name_of(hub)),
            estimated_fix_cost: cost,
        },
        solution: CompatibilitySolution {
            issue_type: IssueType::Freehub,
            action: SolutionAction::Replace,
            description: format!(
                "Fit a {} freehub body or a hub that accepts it",
                cassette.freehub_type
            ),
            estimated_cost: cost,
            difficulty: Difficulty::Moderate,
        },
    })
}

fn wrap_teeth(cassette: &CassetteSpec, rings: Option<&[u32]>) -> Option<u32> {
    let cog_spread = cassette.largest_cog()? - cassette.smallest_cog()?;
    let ring_spread = rings.map_or(0, |rings| {
        let max = rings.iter().copied().max().unwrap_or(0);
        let min = rings.iter().copied().min().unwrap_or(0);
        max - min
    });
    Some(cog_spread + ring_spread)
}

fn capacity_problem(
    cassette: &CassetteSpec,
    derailleur: &DerailleurSpec,
    rings: Option<&[u32]>,
) -> Option<String> {
    let largest = cassette.largest_cog()?;
    let wrap = wrap_teeth(cassette, rings).unwrap_or(0);
    let over_cog = largest > derailleur.max_cog;
    let over_wrap = wrap > derailleur.capacity;

    match (over_cog, over_wrap) {
        (false, false) => None,
        (true, false) => Some(format!(
            "Largest cog {largest}T exceeds derailleur maximum of {}T",
            derailleur.max_cog
        )),
        (false, true) => Some(format!(
            "Total wrap of {wrap}T exceeds derailleur capacity of {}T",
            derailleur.capacity
        )),
        (true, true) => Some(format!(
            "Largest cog {largest}T exceeds derailleur maximum of {}T and total wrap of {wrap}T exceeds capacity of {}T",
            derailleur.max_cog, derailleur.capacity
        )),
    }
}

fn check_derailleur_capacity(setup: &BikeSetup, config: &CompatibilityConfig) -> Option<Finding> {
    let cassette = setup.cassette_spec()?;
    let derailleur = setup.derailleur_spec()?;
    let message = capacity_problem(cassette, derailleur, setup.chainring_teeth())?;
    let cost = config.derailleur_upgrade_cost;

    Some(Finding {
        issue: CompatibilityIssue {
            issue_type: IssueType::Capacity,
            severity: IssueSeverity::Critical,
            message,
            components: (
                name_of(setup.derailleur.as_ref()),
                name_of(setup.cassette.as_ref()),
            ),
            estimated_fix_cost: cost,
        },
        solution: CompatibilitySolution {
            issue_type: IssueType::Capacity,
            action: SolutionAction::Upgrade,
            description: "Upgrade to a derailleur rated for this cassette's largest cog and range"
                .to_owned(),
            estimated_cost: cost,
            difficulty: Difficulty::Moderate,
        },
    })
}

fn check_chain_speed(setup: &BikeSetup, config: &CompatibilityConfig) -> Option<Finding> {
    let cassette = setup.cassette_spec()?;
    let chain = setup.chain_spec()?;
    if chain.speeds == cassette.speeds {
        return None;
    }
    let cost = config.chain_replacement_cost;

    Some(Finding {
        issue: CompatibilityIssue {
            issue_type: IssueType::ChainSpeed,
            severity: IssueSeverity::Warning,
            message: format!(
                "{}-speed chain on a {}-speed cassette will shift poorly and wear quickly",
                chain.speeds, cassette.speeds
            ),
            components: (
                name_of(setup.chain.as_ref()),
                name_of(setup.cassette.as_ref()),
            ),
            estimated_fix_cost: cost,
        },
        solution: CompatibilitySolution {
            issue_type: IssueType::ChainSpeed,
            action: SolutionAction::Replace,
            description: format!("Replace with a {}-speed chain", cassette.speeds),
            estimated_cost: cost,
            difficulty: Difficulty::Easy,
        },
    })
}

fn check_shifting_index(setup: &BikeSetup, config: &CompatibilityConfig) -> Option<Finding> {
    let cassette = setup.cassette_spec()?;
    let derailleur = setup.derailleur_spec()?;
    if derailleur.speeds == cassette.speeds {
        return None;
    }
    let cost = config.derailleur_upgrade_cost;

    Some(Finding {
        issue: CompatibilityIssue {
            issue_type: IssueType::Other,
            severity: IssueSeverity::Warning,
            message: format!(
                "{}-speed derailleur is indexed differently from the {}-speed cassette",
                derailleur.speeds, cassette.speeds
            ),
            components: (
                name_of(setup.derailleur.as_ref()),
                name_of(setup.cassette.as_ref()),
            ),
            estimated_fix_cost: cost,
        },
        solution: CompatibilitySolution {
            issue_type: IssueType::Other,
            action: SolutionAction::Upgrade,
            description: format!("Upgrade to a {}-speed derailleur and shifter", cassette.speeds),
            estimated_cost: cost,
            difficulty: Difficulty::Moderate,
        },
    })
}
