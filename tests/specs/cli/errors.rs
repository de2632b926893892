//! Error reporting specs

use crate::prelude::*;

#[test]
fn unknown_command_fails() {
    let temp = Project::empty();

    temp.ff().args(&["frobnicate"]).fails();
}

#[test]
fn malformed_config_is_reported_with_path() {
    let temp = Project::empty();
    temp.file("finflow.toml", "[polling\n");

    temp.ff()
        .args(&["status", "exec-1"])
        .fails()
        .stderr_has("finflow.toml");
}

#[test]
fn unreachable_engine_is_transient() {
    let temp = Project::empty();

    temp.ff()
        .args(&["status", "exec-1"])
        .fails()
        .stderr_has("engine unavailable");
}

#[test]
fn zero_fan_out_is_rejected() {
    let temp = Project::empty();
    temp.file("custom.toml", "[polling]\nmax_in_flight = 0\n");

    temp.ff()
        .args(&["--config", "custom.toml", "status", "exec-1"])
        .fails()
        .stderr_has("max_in_flight");
}
