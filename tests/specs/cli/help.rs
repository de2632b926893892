//! Help and version specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    let temp = Project::empty();

    temp.ff()
        .args(&["--help"])
        .passes()
        .stdout_has("validate")
        .stdout_has("status")
        .stdout_has("run");
}

#[test]
fn version_prints_name() {
    let temp = Project::empty();

    temp.ff().args(&["--version"]).passes().stdout_has("ff ");
}

#[test]
fn run_help_describes_feed() {
    let temp = Project::empty();

    temp.ff()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("--feed")
        .stdout_has("--automate")
        .stdout_has("--all");
}
