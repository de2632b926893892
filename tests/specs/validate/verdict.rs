//! `ff validate` specs

use crate::prelude::*;

const SUBSCRIPTIONS: &str = r#"{"id": "a-1", "title": "Cancel Unused Subscriptions"}"#;

#[test]
fn missing_steps_fail_title_match() {
    let temp = Project::empty();
    temp.file("action.json", SUBSCRIPTIONS);
    temp.file(
        "snapshot.json",
        r#"{
            "progress": 50,
            "current_step": "Cancelling subscription: StreamMax",
            "status": "running",
            "steps": [
                {"name": "Scan recurring charges", "status": "completed"},
                {"name": "Identify unused subscriptions", "status": "completed"}
            ]
        }"#,
    );

    let verdict = temp
        .ff()
        .args(&[
            "validate",
            "--action",
            "action.json",
            "--snapshot",
            "snapshot.json",
        ])
        .passes()
        .stdout_json();

    assert_eq!(verdict["titleMatch"], false);
    assert_eq!(verdict["automationValid"], true);
    assert_eq!(verdict["riskAssessment"], "low");
    assert!(verdict["issues"]
        .as_array()
        .unwrap()
        .contains(&serde_json::json!("Expected 4 steps, found 2")));
}

#[test]
fn high_risk_title_in_text_format() {
    let temp = Project::empty();
    temp.file(
        "action.json",
        r#"{"id": "a-2", "title": "Rebalance Investment Portfolio"}"#,
    );
    temp.file(
        "snapshot.json",
        r#"{"progress": 10, "current_step": "Reading portfolio", "status": "running"}"#,
    );

    temp.ff()
        .args(&[
            "validate",
            "--action",
            "action.json",
            "--snapshot",
            "snapshot.json",
            "--format",
            "text",
        ])
        .passes()
        .stdout_has("risk:             high")
        .stdout_has("recommendation:");
}

#[test]
fn validate_does_not_need_config() {
    let temp = Project::empty();
    temp.file("finflow.toml", "this is not toml");
    temp.file("action.json", SUBSCRIPTIONS);
    temp.file(
        "snapshot.json",
        r#"{"progress": 0, "current_step": "", "status": "queued"}"#,
    );

    temp.ff()
        .args(&[
            "validate",
            "--action",
            "action.json",
            "--snapshot",
            "snapshot.json",
        ])
        .passes();
}

#[test]
fn negative_saving_is_rejected() {
    let temp = Project::empty();
    temp.file(
        "action.json",
        r#"{"id": "a-3", "title": "x", "potentialSaving": -1}"#,
    );
    temp.file("snapshot.json", "{}");

    temp.ff()
        .args(&[
            "validate",
            "--action",
            "action.json",
            "--snapshot",
            "snapshot.json",
        ])
        .fails()
        .stderr_has("action.json");
}

#[test]
fn missing_snapshot_file_is_reported() {
    let temp = Project::empty();
    temp.file("action.json", SUBSCRIPTIONS);

    temp.ff()
        .args(&[
            "validate",
            "--action",
            "action.json",
            "--snapshot",
            "nope.json",
        ])
        .fails()
        .stderr_has("nope.json");
}
