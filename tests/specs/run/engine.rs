//! `ff run` specs against an engine that answers

use crate::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Engine that accepts every start and reports every execution as done
async fn finishing_engine() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/workflows/start"))
        .and(body_partial_json(json!({"userId": "local-user"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"executionId": "accepted", "status": "accepted"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/workflows/[^/]+/status$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "progress": 100,
            "current_step": "Confirmed subscription cancellations",
            "status": "done"
        })))
        .mount(&server)
        .await;
    server
}

#[tokio::test(flavor = "multi_thread")]
async fn automated_action_completes_and_is_replaced() {
    let engine = finishing_engine().await;
    let temp = Project::empty();
    temp.file("feed.json", FEED);
    temp.file("finflow.toml", "[polling]\ninterval = \"50ms\"\n");

    let run = temp
        .ff()
        .env("FINFLOW_ENGINE_URL", &engine.uri())
        .args(&["run", "--feed", "feed.json", "--automate", "a-1"])
        .passes();

    let stdout = run.stdout();
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(
        lines
            .iter()
            .any(|l| l.starts_with("a-1 ") && l.contains("in_process")),
        "no in_process line for a-1:\n{}",
        stdout
    );
    assert!(
        lines
            .iter()
            .any(|l| l.starts_with("a-1 ") && l.contains("completed") && l.contains("100%")),
        "a-1 never completed:\n{}",
        stdout
    );
    // Untouched action stays suggested
    assert!(lines
        .iter()
        .any(|l| l.starts_with("a-2 ") && l.contains("suggested")));
    // Backlog suggestion appended after completion
    let last_b1 = lines
        .iter()
        .rposition(|l| l.starts_with("b-1 ") && l.contains("Set Up Automatic Savings"));
    let last_a1 = lines.iter().rposition(|l| l.starts_with("a-1 "));
    assert!(
        matches!((last_a1, last_b1), (Some(a), Some(b)) if b > a),
        "b-1 not appended after a-1:\n{}",
        stdout
    );
}
