// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    completed = { "completed", EngineStatus::Completed },
    done = { "done", EngineStatus::Completed },
    upper_case = { "SUCCESS", EngineStatus::Completed },
    padded = { "  finished ", EngineStatus::Completed },
    running = { "running", EngineStatus::InProcess },
    queued = { "queued", EngineStatus::InProcess },
    unknown = { "paused-for-review", EngineStatus::InProcess },
    empty = { "", EngineStatus::InProcess },
)]
fn engine_status_mapping(raw: &str, expected: EngineStatus) {
    assert_eq!(EngineStatus::from_engine(raw), expected);
}

#[test]
fn parses_engine_payload() {
    let json = r#"{
        "progress": 45,
        "current_step": "Cancelling subscription: StreamMax",
        "status": "running",
        "steps": [
            {"name": "Scan recurring charges", "status": "completed"},
            {"name": "Identify unused subscriptions", "status": "in_progress", "description": "3 found"}
        ],
        "estimated_completion": "2 minutes",
        "elapsed_seconds": 120
    }"#;

    let snapshot: WorkflowStatusSnapshot = serde_json::from_str(json).unwrap();

    assert_eq!(snapshot.progress, 45);
    assert_eq!(snapshot.engine_status(), EngineStatus::InProcess);
    assert_eq!(snapshot.steps.len(), 2);
    assert_eq!(snapshot.steps[1].status, StepStatus::InProgress);
    assert_eq!(snapshot.steps[1].description, "3 found");
    assert_eq!(snapshot.completed_steps(), 1);
    assert_eq!(snapshot.elapsed(), Some(Duration::from_secs(120)));
}

#[test]
fn out_of_range_progress_is_clamped() {
    let high: WorkflowStatusSnapshot =
        serde_json::from_str(r#"{"progress": 250, "status": "running"}"#).unwrap();
    let low: WorkflowStatusSnapshot =
        serde_json::from_str(r#"{"progress": -3, "status": "running"}"#).unwrap();
    let fractional: WorkflowStatusSnapshot =
        serde_json::from_str(r#"{"progress": 39.6, "status": "running"}"#).unwrap();

    assert_eq!(high.progress, 100);
    assert_eq!(low.progress, 0);
    assert_eq!(fractional.progress, 40);
}

#[test]
fn missing_fields_default() {
    let snapshot: WorkflowStatusSnapshot = serde_json::from_str("{}").unwrap();

    assert_eq!(snapshot.progress, 0);
    assert!(snapshot.steps.is_empty());
    assert_eq!(snapshot.engine_status(), EngineStatus::InProcess);
    assert_eq!(snapshot.elapsed(), None);
}

#[test]
fn unknown_step_status_reads_as_pending() {
    let snapshot: WorkflowStatusSnapshot = serde_json::from_str(
        r#"{"steps": [{"name": "a", "status": "mystery"}, {"name": "b", "status": null}]}"#,
    )
    .unwrap();

    assert_eq!(snapshot.steps[0].status, StepStatus::Pending);
    assert_eq!(snapshot.steps[1].status, StepStatus::Pending);
}
