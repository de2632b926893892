// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow validation
//!
//! Compares what the engine reports for an execution against the static
//! profile for the action's title. `validate` is pure: identical inputs give
//! identical verdicts.

use crate::action::{Action, StepStatus};
use crate::profiles;
use crate::snapshot::WorkflowStatusSnapshot;
use crate::verdict::{RiskLevel, ValidationVerdict};
use std::time::Duration;

/// Efficiency reported when there is nothing to measure against
pub const DEFAULT_EFFICIENCY: u8 = 85;

/// Validate an action against the latest snapshot of its execution
pub fn validate(action: &Action, snapshot: &WorkflowStatusSnapshot) -> ValidationVerdict {
    let mut issues = Vec::new();
    let mut recommendations = Vec::new();

    let expected = profiles::expected_steps(&action.title);
    let actual = snapshot.steps.len();
    let title_match = expected.is_empty() || actual >= expected.len();
    if !title_match {
        issues.push(format!(
            "Expected {} steps, found {}",
            expected.len(),
            actual
        ));
        recommendations.push(
            "Check that the engine is running the full workflow for this action".to_string(),
        );
    }

    let missing = missing_keywords(&action.title, &snapshot.current_step);
    let automation_valid = missing.is_empty();
    if !automation_valid {
        let list = missing.join(", ");
        issues.push(format!("Current step does not mention: {}", list));
        recommendations.push(format!(
            "Confirm the automation is working on the expected accounts ({})",
            list
        ));
    }

    let completed = snapshot.completed_steps();
    let remaining = actual - completed;
    let steps_complete = remaining == 0;
    if !steps_complete {
        issues.push(format!("{} of {} steps remaining", remaining, actual));
        recommendations.push(format!(
            "Wait for the remaining {} {} to finish before reviewing results",
            remaining,
            if remaining == 1 { "step" } else { "steps" }
        ));
    }

    let risk_assessment = assess_risk(&action.title);
    if risk_assessment == RiskLevel::High {
        recommendations.push("Review the proposed investment changes before they settle".into());
    }

    ValidationVerdict {
        title_match,
        automation_valid,
        steps_complete,
        risk_assessment,
        efficiency_score: efficiency_score(
            profiles::estimated_duration(&action.title),
            snapshot.elapsed(),
        ),
        issues,
        recommendations,
    }
}

/// Verdict for an action that has never been validated against a snapshot
pub fn baseline(action: &Action) -> ValidationVerdict {
    let risk_assessment = assess_risk(&action.title);
    let mut recommendations = Vec::new();
    if risk_assessment == RiskLevel::High {
        recommendations.push("Review the proposed investment changes before they settle".into());
    }

    ValidationVerdict {
        title_match: true,
        automation_valid: true,
        steps_complete: action
            .steps
            .iter()
            .all(|s| s.status == StepStatus::Completed),
        risk_assessment,
        efficiency_score: DEFAULT_EFFICIENCY,
        issues: Vec::new(),
        recommendations,
    }
}

/// Risk from title keywords alone. Investment wording outranks debt wording.
pub fn assess_risk(title: &str) -> RiskLevel {
    let title = title.to_lowercase();
    if title.contains("investment") || title.contains("portfolio") {
        RiskLevel::High
    } else if title.contains("negotiate") || title.contains("debt") {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// `100 * estimated / observed`, clamped to 0-100
pub fn efficiency_score(estimated: Duration, observed: Option<Duration>) -> u8 {
    match observed {
        Some(observed) if !estimated.is_zero() && !observed.is_zero() => {
            let ratio = estimated.as_secs_f64() / observed.as_secs_f64();
            (100.0 * ratio).round().clamp(0.0, 100.0) as u8
        }
        _ => DEFAULT_EFFICIENCY,
    }
}

fn missing_keywords(title: &str, current_step: &str) -> Vec<&'static str> {
    let current_step = current_step.to_lowercase();
    profiles::required_keywords(title)
        .iter()
        .copied()
        .filter(|kw| !current_step.contains(&kw.to_lowercase()))
        .collect()
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
