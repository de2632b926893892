// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event name patterns and subscriptions

/// Pattern over colon-separated event names:
///   - exact: `action:completed`
///   - `*` matches exactly one segment: `action:*`
///   - `**` matches the rest of the name: `action:**`, or everything: `**`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventPattern(String);

impl EventPattern {
    pub fn new(pattern: &str) -> Self {
        Self(pattern.to_string())
    }

    pub fn matches(&self, event_name: &str) -> bool {
        if self.0.is_empty() {
            return false;
        }

        let mut pattern = self.0.split(':');
        let mut name = event_name.split(':');
        loop {
            match (pattern.next(), name.next()) {
                (None, None) => return true,
                (Some("**"), _) => return true,
                (Some("*"), Some(_)) => continue,
                (Some(p), Some(n)) if p == n => continue,
                _ => return false,
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Handle used to unsubscribe
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub String);

/// A named interest in one or more event patterns
#[derive(Clone, Debug)]
pub struct Subscription {
    pub id: SubscriberId,
    pub patterns: Vec<EventPattern>,
}

impl Subscription {
    pub fn new(id: impl Into<String>, patterns: &[&str]) -> Self {
        Self {
            id: SubscriberId(id.into()),
            patterns: patterns.iter().map(|p| EventPattern::new(p)).collect(),
        }
    }

    pub fn matches(&self, event_name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(event_name))
    }
}

#[cfg(test)]
#[path = "subscription_tests.rs"]
mod tests;
