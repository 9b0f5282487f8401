//! Shared helpers for the test suites.

#![allow(dead_code)]

use specrank::TaskSpec;

/// A spec with only an id and a title - the common case in these tests.
pub fn spec(id: &str, title: &str) -> TaskSpec {
    TaskSpec {
        id: id.to_string(),
        title: Some(title.to_string()),
        ..TaskSpec::default()
    }
}

/// A fully populated spec.
pub fn full_spec(
    id: &str,
    title: &str,
    description: &str,
    labels: &[&str],
    criteria: &[&str],
) -> TaskSpec {
    TaskSpec {
        id: id.to_string(),
        title: Some(title.to_string()),
        description: Some(description.to_string()),
        labels: labels.iter().map(|s| s.to_string()).collect(),
        acceptance_criteria: criteria.iter().map(|s| s.to_string()).collect(),
        ..TaskSpec::default()
    }
}

/// A small realistic backlog used across suites.
pub fn backlog() -> Vec<TaskSpec> {
    vec![
        full_spec(
            "task-1",
            "Implement JWT authentication for REST API",
            "Issue and validate signed tokens on every request",
            &["security", "api"],
            &["unauthenticated requests are rejected"],
        ),
        full_spec(
            "task-2",
            "Add dark mode toggle",
            "Persist the chosen theme across sessions",
            &["ui"],
            &["toggle switches the palette without reload"],
        ),
        full_spec(
            "task-3",
            "Refactor database pooling",
            "Replace the ad-hoc connection cache with a bounded pool",
            &["infra"],
            &["pool size is configurable"],
        ),
        full_spec(
            "task-4",
            "Rotate authentication tokens",
            "Expire refresh tokens after thirty days",
            &["security"],
            &["expired tokens force a new login"],
        ),
    ]
}
