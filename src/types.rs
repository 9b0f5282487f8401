// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of spec ranking.
//!
//! These types define the contract between the ranking core and the rest of
//! the system: callers hand over a snapshot of [`TaskSpec`] records, the
//! engines hand back scored ids, and the orchestrator resolves ids back into
//! specs. Nothing in this crate ever mutates a spec.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **TaskSpec**: `id` is unique within one ranking call. Everything else is
//!   optional prose - missing fields simply contribute nothing to the search
//!   payload.
//! - **ScoredResult**: produced sorted score-descending. Ties order by
//!   ascending doc id so two runs over the same snapshot return the same
//!   sequence (see [`ScoredResult::ranking_cmp`]).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A work-item spec as the surrounding system stores it.
///
/// This is a fixed-shape mirror of the caller's document model rather than a
/// dynamic map: absent fields are explicit `Option`s, and the ranking core
/// only ever reads them to assemble search payload text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSpec {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Milestone name, if the spec is scheduled into one.
    #[serde(default)]
    pub milestone: Option<String>,
    #[serde(default)]
    pub implementation_plan: Option<String>,
    /// Free-form labels for categorization.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Acceptance-criterion texts, in authoring order.
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
}

/// A document id paired with its relevance score.
///
/// What the engines return. The id points back into whatever snapshot the
/// caller indexed; the orchestrator resolves it to a full [`TaskSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredResult {
    pub doc_id: String,
    pub score: f64,
}

impl ScoredResult {
    /// Ranking order: score descending, then doc id ascending.
    ///
    /// The id tie-break is deliberate - without it, equal-score results come
    /// out in hash-map iteration order and tests flake. NaN never occurs
    /// (scores are sums of finite non-negative terms), so the `partial_cmp`
    /// fallback to `Equal` is unreachable in practice.
    pub fn ranking_cmp(a: &ScoredResult, b: &ScoredResult) -> Ordering {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.doc_id.cmp(&b.doc_id))
    }
}

/// A resolved spec paired with its relevance score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredSpec {
    pub spec: TaskSpec,
    pub score: f64,
}
