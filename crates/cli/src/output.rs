// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use ff_core::{Action, ActionStatus, ValidationVerdict, WorkflowStatusSnapshot};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

/// Print output in the specified format
pub fn print<T: Serialize + fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

#[derive(Serialize)]
#[serde(transparent)]
pub struct VerdictView<'a>(pub &'a ValidationVerdict);

impl fmt::Display for VerdictView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        writeln!(f, "title match:      {}", v.title_match)?;
        writeln!(f, "automation valid: {}", v.automation_valid)?;
        writeln!(f, "steps complete:   {}", v.steps_complete)?;
        writeln!(f, "risk:             {}", v.risk_assessment)?;
        write!(f, "efficiency:       {}", v.efficiency_score)?;
        for issue in &v.issues {
            write!(f, "\n  issue: {}", issue)?;
        }
        for recommendation in &v.recommendations {
            write!(f, "\n  recommendation: {}", recommendation)?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(transparent)]
pub struct SnapshotView<'a>(pub &'a WorkflowStatusSnapshot);

impl fmt::Display for SnapshotView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        write!(f, "{:>3}% {} ({})", s.progress, s.current_step, s.status)?;
        if let Some(eta) = &s.estimated_completion {
            write!(f, ", eta {}", eta)?;
        }
        for step in &s.steps {
            write!(f, "\n  [{:?}] {}", step.status, step.name)?;
        }
        Ok(())
    }
}

/// One status line for an action
pub fn action_line(action: &Action) -> String {
    let mut line = format!("{:<12} {:<11} ", action.id.0, action.status.to_string());
    match action.status {
        ActionStatus::Suggested => line.push_str(&action.title),
        ActionStatus::InProcess | ActionStatus::Completed => {
            line.push_str(&format!("{:>3}% {}", action.progress, action.title));
            if let Some(step) = action.current_step.as_deref().filter(|s| !s.is_empty()) {
                line.push_str(&format!(" - {}", step));
            }
        }
    }
    if let Some(verdict) = &action.verdict {
        if !verdict.issues.is_empty() {
            line.push_str(&format!(" [{} issue(s)]", verdict.issues.len()));
        }
    }
    line
}
