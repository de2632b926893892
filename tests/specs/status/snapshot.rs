//! `ff status` specs against an engine that answers

use crate::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn engine_with(execution_id: &str, response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/workflows/{}/status", execution_id)))
        .respond_with(response)
        .expect(1)
        .mount(&server)
        .await;
    server
}

#[tokio::test(flavor = "multi_thread")]
async fn prints_snapshot_as_json() {
    let engine = engine_with(
        "exec-1",
        ResponseTemplate::new(200).set_body_json(json!({
            "progress": 40,
            "current_step": "Checking subscription usage",
            "status": "running",
            "steps": [{"name": "Scan recurring charges", "status": "completed"}],
            "estimated_completion": "3 minutes"
        })),
    )
    .await;
    let temp = Project::empty();

    let snapshot = temp
        .ff()
        .env("FINFLOW_ENGINE_URL", &engine.uri())
        .args(&["status", "exec-1"])
        .passes()
        .stdout_json();

    assert_eq!(snapshot["progress"], 40);
    assert_eq!(snapshot["current_step"], "Checking subscription usage");
    assert_eq!(snapshot["status"], "running");
    assert_eq!(snapshot["estimated_completion"], "3 minutes");
    assert_eq!(snapshot["steps"][0]["name"], "Scan recurring charges");
}

#[tokio::test(flavor = "multi_thread")]
async fn prints_snapshot_as_text() {
    let engine = engine_with(
        "exec-2",
        ResponseTemplate::new(200).set_body_json(json!({
            "progress": 75,
            "current_step": "Calling providers",
            "status": "running"
        })),
    )
    .await;
    let temp = Project::empty();

    temp.ff()
        .env("FINFLOW_ENGINE_URL", &engine.uri())
        .args(&["status", "exec-2", "--format", "text"])
        .passes()
        .stdout_eq(" 75% Calling providers (running)\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_execution_is_reported() {
    let engine = engine_with("exec-3", ResponseTemplate::new(404)).await;
    let temp = Project::empty();

    temp.ff()
        .env("FINFLOW_ENGINE_URL", &engine.uri())
        .args(&["status", "exec-3"])
        .fails()
        .stderr_has("execution exec-3 is not known to the engine");
}
