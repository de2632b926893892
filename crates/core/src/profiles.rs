// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Static workflow profiles keyed by action title
//!
//! Unknown titles resolve to an empty profile: no expected steps, no
//! required keywords, and the default duration estimate.

use std::time::Duration;

/// Estimate used when a title has no profile
pub const DEFAULT_ESTIMATED_DURATION: Duration = Duration::from_secs(300);

/// What a known automation is expected to look like while it runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowProfile {
    pub title: &'static str,
    pub expected_steps: &'static [&'static str],
    /// Each must appear in the engine's current step text
    pub keywords: &'static [&'static str],
    pub estimated_duration: Duration,
}

static PROFILES: &[WorkflowProfile] = &[
    WorkflowProfile {
        title: "Cancel Unused Subscriptions",
        expected_steps: &[
            "Scan recurring charges",
            "Identify unused subscriptions",
            "Cancel subscriptions",
            "Confirm cancellations",
        ],
        keywords: &["subscription"],
        estimated_duration: Duration::from_secs(240),
    },
    WorkflowProfile {
        title: "Negotiate Lower Bills",
        expected_steps: &[
            "Collect current bills",
            "Research competitor rates",
            "Contact providers",
            "Confirm new rates",
        ],
        keywords: &["bill"],
        estimated_duration: Duration::from_secs(600),
    },
    WorkflowProfile {
        title: "Consolidate High-Interest Debt",
        expected_steps: &[
            "Review debt balances",
            "Compare consolidation offers",
            "Submit consolidation application",
            "Schedule payoff transfers",
        ],
        keywords: &["debt"],
        estimated_duration: Duration::from_secs(900),
    },
    WorkflowProfile {
        title: "Rebalance Investment Portfolio",
        expected_steps: &[
            "Analyze current allocation",
            "Calculate target allocation",
            "Place rebalancing trades",
            "Verify settled positions",
        ],
        keywords: &["portfolio"],
        estimated_duration: Duration::from_secs(600),
    },
    WorkflowProfile {
        title: "Set Up Automatic Savings",
        expected_steps: &[
            "Choose savings account",
            "Calculate transfer amount",
            "Schedule recurring transfer",
        ],
        keywords: &["transfer"],
        estimated_duration: Duration::from_secs(180),
    },
    WorkflowProfile {
        title: "Switch to High-Yield Savings",
        expected_steps: &[
            "Compare savings rates",
            "Open high-yield account",
            "Move savings balance",
        ],
        keywords: &["savings"],
        estimated_duration: Duration::from_secs(420),
    },
];

/// Look up the profile for a title, ignoring ASCII case and surrounding
/// whitespace
pub fn profile_for(title: &str) -> Option<&'static WorkflowProfile> {
    let title = title.trim();
    PROFILES.iter().find(|p| p.title.eq_ignore_ascii_case(title))
}

pub fn expected_steps(title: &str) -> &'static [&'static str] {
    profile_for(title).map(|p| p.expected_steps).unwrap_or(&[])
}

pub fn required_keywords(title: &str) -> &'static [&'static str] {
    profile_for(title).map(|p| p.keywords).unwrap_or(&[])
}

pub fn estimated_duration(title: &str) -> Duration {
    profile_for(title)
        .map(|p| p.estimated_duration)
        .unwrap_or(DEFAULT_ESTIMATED_DURATION)
}

/// All known titles, in table order
pub fn known_titles() -> impl Iterator<Item = &'static str> {
    PROFILES.iter().map(|p| p.title)
}
