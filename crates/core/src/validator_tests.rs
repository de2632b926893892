// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::action::Action;
use crate::snapshot::SnapshotStep;
use yare::parameterized;

fn subscriptions() -> Action {
    Action::suggested("a-1", "Cancel Unused Subscriptions")
}

fn steps(done: usize, pending: usize) -> Vec<SnapshotStep> {
    (0..done)
        .map(|i| SnapshotStep::new(format!("done-{}", i), StepStatus::Completed))
        .chain((0..pending).map(|i| SnapshotStep::new(format!("todo-{}", i), StepStatus::Pending)))
        .collect()
}

#[test]
fn fewer_steps_than_template_is_a_title_mismatch() {
    let snapshot = WorkflowStatusSnapshot::new(50, "Cancelling subscription: GymPass", "running")
        .with_steps(steps(2, 0));

    let verdict = validate(&subscriptions(), &snapshot);

    assert!(!verdict.title_match);
    assert!(verdict
        .issues
        .contains(&"Expected 4 steps, found 2".to_string()));
}

#[test]
fn full_template_matches() {
    let snapshot = WorkflowStatusSnapshot::new(100, "Confirmed subscription cancellations", "done")
        .with_steps(steps(4, 0));

    let verdict = validate(&subscriptions(), &snapshot);

    assert!(verdict.title_match);
    assert!(verdict.automation_valid);
    assert!(verdict.steps_complete);
    assert!(verdict.issues.is_empty());
    assert!(verdict.recommendations.is_empty());
}

#[test]
fn unknown_title_never_fails_template_or_keywords() {
    let action = Action::suggested("a-2", "Round Up Spare Change");
    let snapshot = WorkflowStatusSnapshot::new(10, "", "running");

    let verdict = validate(&action, &snapshot);

    assert!(verdict.title_match);
    assert!(verdict.automation_valid);
    assert!(verdict.steps_complete);
    assert_eq!(verdict.efficiency_score, DEFAULT_EFFICIENCY);
}

#[test]
fn keyword_match_is_case_insensitive_substring() {
    let snapshot =
        WorkflowStatusSnapshot::new(30, "Reviewing SUBSCRIPTIONS for StreamMax", "running");

    let verdict = validate(&subscriptions(), &snapshot);

    assert!(verdict.automation_valid);
}

#[test]
fn missing_keyword_is_reported() {
    let snapshot = WorkflowStatusSnapshot::new(30, "Scanning card statements", "running");

    let verdict = validate(&subscriptions(), &snapshot);

    assert!(!verdict.automation_valid);
    assert!(verdict
        .issues
        .iter()
        .any(|i| i.contains("subscription")));
}

#[test]
fn incomplete_steps_report_remaining_count() {
    let snapshot = WorkflowStatusSnapshot::new(60, "subscription review", "running")
        .with_steps(steps(3, 1));

    let verdict = validate(&subscriptions(), &snapshot);

    assert!(!verdict.steps_complete);
    assert!(verdict.issues.contains(&"1 of 4 steps remaining".to_string()));
    assert!(verdict
        .recommendations
        .iter()
        .any(|r| r.contains("remaining 1 step ")));
}

#[test]
fn recommendations_only_for_failed_dimensions() {
    // Template and keywords pass, steps do not
    let snapshot = WorkflowStatusSnapshot::new(60, "subscription review", "running")
        .with_steps(steps(2, 2));

    let verdict = validate(&subscriptions(), &snapshot);

    assert_eq!(verdict.recommendations.len(), 1);
    assert!(verdict.recommendations[0].starts_with("Wait for the remaining"));
}

#[parameterized(
    plain = { "Cancel Unused Subscriptions", RiskLevel::Low },
    negotiate = { "Negotiate Lower Bills", RiskLevel::Medium },
    debt = { "Consolidate High-Interest Debt", RiskLevel::Medium },
    investment = { "Lower Investment Fees", RiskLevel::High },
    portfolio = { "Rebalance Investment Portfolio", RiskLevel::High },
    both = { "Negotiate Portfolio Margin Debt", RiskLevel::High },
    lower_case = { "consolidate debt", RiskLevel::Medium },
)]
fn risk_from_title(title: &str, expected: RiskLevel) {
    assert_eq!(assess_risk(title), expected);
}

#[test]
fn high_risk_adds_review_recommendation() {
    let action = Action::suggested("a-3", "Rebalance Investment Portfolio");
    let snapshot = WorkflowStatusSnapshot::new(100, "portfolio rebalanced", "done")
        .with_steps(steps(4, 0));

    let verdict = validate(&action, &snapshot);

    assert_eq!(verdict.risk_assessment, RiskLevel::High);
    assert_eq!(verdict.recommendations.len(), 1);
}

#[parameterized(
    no_observation = { 300, None, 85 },
    on_time = { 300, Some(300), 100 },
    twice_as_long = { 300, Some(600), 50 },
    faster_is_capped = { 300, Some(100), 100 },
    zero_observed = { 300, Some(0), 85 },
    zero_estimate = { 0, Some(120), 85 },
    rounding = { 240, Some(720), 33 },
)]
fn efficiency(estimated: u64, observed: Option<u64>, expected: u8) {
    let score = efficiency_score(
        Duration::from_secs(estimated),
        observed.map(Duration::from_secs),
    );
    assert_eq!(score, expected);
}

#[test]
fn efficiency_uses_title_estimate() {
    // 240s estimate, 480s observed
    let snapshot = WorkflowStatusSnapshot::new(80, "subscription", "running")
        .with_elapsed(Duration::from_secs(480));

    let verdict = validate(&subscriptions(), &snapshot);

    assert_eq!(verdict.efficiency_score, 50);
}

#[test]
fn validation_is_idempotent() {
    let snapshot = WorkflowStatusSnapshot::new(40, "Scanning", "running")
        .with_steps(steps(1, 2))
        .with_elapsed(Duration::from_secs(90));
    let action = subscriptions();

    let first = validate(&action, &snapshot);
    for _ in 0..5 {
        assert_eq!(validate(&action, &snapshot), first);
    }
}

#[test]
fn baseline_reflects_local_steps_and_risk() {
    let action = Action::suggested("a-4", "Rebalance Investment Portfolio")
        .with_steps(vec![crate::action::Step::new("Analyze current allocation")]);

    let verdict = baseline(&action);

    assert!(verdict.title_match);
    assert!(!verdict.steps_complete);
    assert_eq!(verdict.risk_assessment, RiskLevel::High);
    assert!(verdict.issues.is_empty());
}
