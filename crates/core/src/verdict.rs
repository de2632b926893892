// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validation verdicts

use crate::action::ExecutionId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How much review an automation deserves before its effects settle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// Outcome of validating one action against one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    pub title_match: bool,
    pub automation_valid: bool,
    pub steps_complete: bool,
    pub risk_assessment: RiskLevel,
    pub efficiency_score: u8,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

impl ValidationVerdict {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Record that the engine has no record of `execution_id`.
    ///
    /// Returns false when the issue was already present.
    pub fn record_orphaned(&mut self, execution_id: &ExecutionId) -> bool {
        let issue = format!(
            "Execution {} was not found by the automation engine",
            execution_id
        );
        if self.issues.contains(&issue) {
            return false;
        }
        self.issues.push(issue);

        let recommendation =
            "Cancel this automation and start it again to create a new execution".to_string();
        if !self.recommendations.contains(&recommendation) {
            self.recommendations.push(recommendation);
        }
        true
    }
}
