//! `ff run` specs that need no live engine

use crate::prelude::*;

#[test]
fn missing_feed_fails() {
    let temp = Project::empty();

    temp.ff()
        .args(&["run", "--feed", "feed.json", "--all"])
        .fails()
        .stderr_has("feed.json");
}

#[test]
fn nothing_selected_fails() {
    let temp = Project::empty();
    temp.file("feed.json", FEED);

    temp.ff()
        .args(&["run", "--feed", "feed.json"])
        .fails()
        .stderr_has("nothing to automate");
}

#[test]
fn unknown_action_fails() {
    let temp = Project::empty();
    temp.file("feed.json", FEED);

    temp.ff()
        .args(&["run", "--feed", "feed.json", "--automate", "ghost"])
        .fails()
        .stderr_has("action not found: ghost");
}

#[test]
fn feed_with_running_action_is_rejected() {
    let temp = Project::empty();
    temp.file(
        "feed.json",
        r#"{"actions": [{"id": "a-1", "title": "x", "status": "completed"}]}"#,
    );

    temp.ff()
        .args(&["run", "--feed", "feed.json", "--all"])
        .fails()
        .stderr_has("only suggested actions");
}
