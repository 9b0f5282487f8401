//! Two-pass rank orchestration: BM25 first, fuzzy fallback when needed.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────┐   payload per    ┌────────────┐  pass 1   ┌────────────┐
//! │ SpecStore │ ──candidate────▶ │ Bm25Engine │ ────────▶ │   merge    │
//! │ (caller)  │                  ├────────────┤  pass 2   │  + resolve │
//! └───────────┘                  │ FuzzyEngine│ ─(maybe)─▶ └────────────┘
//!                                └────────────┘
//! ```
//!
//! Pass 1 runs BM25 alone. Only when it cannot fill the requested limit does
//! pass 2 run the fuzzy engine and fold its scores in at a reduced weight -
//! exact-term evidence should never be drowned out by typo-tolerant guesses,
//! and most queries never pay for the fuzzy scan at all.
//!
//! Engines are rebuilt from the store snapshot on every call. The backlog
//! this targets is small enough that a rebuild costs less than keeping an
//! index consistent with live edits would.

use crate::bm25::{Bm25Engine, Bm25Params};
use crate::fuzzy::{FuzzyEngine, FuzzyParams};
use crate::types::{ScoredResult, ScoredSpec, TaskSpec};
use log::{debug, trace};
use std::collections::HashMap;

/// External document store collaborator.
///
/// The ranking core never owns spec data; callers expose whatever cache or
/// storage they have behind these two lookups. Implementations hand out
/// owned clones - the core treats the snapshot as frozen for the duration
/// of one call.
pub trait SpecStore {
    /// Look up a single spec by id.
    fn spec(&self, id: &str) -> Option<TaskSpec>;

    /// Snapshot of all specs.
    fn all_specs(&self) -> Vec<TaskSpec>;
}

/// Plain vector-backed store for embedding and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemorySpecStore {
    specs: Vec<TaskSpec>,
}

impl InMemorySpecStore {
    pub fn new(specs: Vec<TaskSpec>) -> Self {
        Self { specs }
    }
}

impl SpecStore for InMemorySpecStore {
    fn spec(&self, id: &str) -> Option<TaskSpec> {
        self.specs.iter().find(|s| s.id == id).cloned()
    }

    fn all_specs(&self) -> Vec<TaskSpec> {
        self.specs.clone()
    }
}

/// Knobs for the two-pass ranking.
#[derive(Debug, Clone, Copy)]
pub struct RankConfig {
    pub bm25: Bm25Params,
    pub fuzzy: FuzzyParams,
    /// Weight applied to fuzzy scores when folding them into pass-1 results.
    /// Kept well under 1.0 so exact-term matches stay on top.
    pub fuzzy_weight: f64,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            bm25: Bm25Params::default(),
            fuzzy: FuzzyParams::default(),
            fuzzy_weight: 0.3,
        }
    }
}

/// Finds specs related to a free-text query or to another spec.
pub struct SpecSearch<S: SpecStore> {
    store: S,
    config: RankConfig,
}

impl<S: SpecStore> SpecSearch<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, RankConfig::default())
    }

    pub fn with_config(store: S, config: RankConfig) -> Self {
        Self { store, config }
    }

    /// Rank specs related to the spec with the given id.
    ///
    /// The query is the seed spec's own search payload; the seed itself is
    /// excluded from the candidates (id comparison is case-insensitive, ids
    /// in the wild differ in case between tools). An unknown id yields an
    /// empty result.
    pub fn find_related_by_id(&self, task_id: &str, limit: usize) -> Vec<ScoredSpec> {
        let Some(seed) = self.store.spec(task_id) else {
            debug!("related-by-id: no spec with id {task_id:?}");
            return Vec::new();
        };

        let query = build_search_payload(&seed);
        self.rank(&query, self.store.all_specs(), Some(task_id), limit)
    }

    /// Rank specs against a free-text query.
    pub fn find_related_by_query(&self, query: &str, limit: usize) -> Vec<ScoredSpec> {
        self.rank(query, self.store.all_specs(), None, limit)
    }

    fn rank(
        &self,
        query: &str,
        specs: Vec<TaskSpec>,
        exclude_id: Option<&str>,
        limit: usize,
    ) -> Vec<ScoredSpec> {
        if specs.is_empty() || query.trim().is_empty() {
            return Vec::new();
        }

        let mut exact = Bm25Engine::new(self.config.bm25);
        let mut fuzzy = FuzzyEngine::new(self.config.fuzzy);
        let mut spec_by_id: HashMap<String, TaskSpec> = HashMap::new();

        for spec in specs {
            if exclude_id.is_some_and(|id| id.eq_ignore_ascii_case(&spec.id)) {
                continue;
            }
            let payload = build_search_payload(&spec);
            exact.index(&spec.id, &payload);
            fuzzy.index(&spec.id, &payload);
            spec_by_id.insert(spec.id.clone(), spec);
        }
        trace!("indexed {} candidates", exact.doc_count());

        // Pass 1: exact terms only. A full page here means the fuzzy scan
        // never runs.
        let exact_results = exact.search(query, limit);
        if exact_results.len() >= limit {
            debug!("exact pass filled the limit ({limit}), skipping fuzzy pass");
            return resolve(exact_results, &spec_by_id);
        }

        // Pass 2: fuzzy fallback. Ask for extra candidates since some will
        // collapse onto documents pass 1 already scored.
        debug!(
            "exact pass returned {} of {limit}, running fuzzy fallback",
            exact_results.len()
        );
        let fuzzy_results = fuzzy.search(query, limit.saturating_mul(2));
        let merged = merge_passes(exact_results, fuzzy_results, self.config.fuzzy_weight, limit);
        resolve(merged, &spec_by_id)
    }
}

/// Build the searchable text payload for one spec.
///
/// Field order and weighting: the title twice (title terms should dominate),
/// then description, labels, each acceptance-criterion text, implementation
/// plan, and milestone. Missing fields contribute nothing. The result is
/// single-space separated and trimmed.
pub fn build_search_payload(spec: &TaskSpec) -> String {
    let mut payload = String::new();

    if let Some(title) = &spec.title {
        // Repeating the title doubles its term frequency relative to body
        // text - a cheap field weight without a field-aware scorer.
        payload.push_str(title);
        payload.push(' ');
        payload.push_str(title);
        payload.push(' ');
    }
    if let Some(description) = &spec.description {
        payload.push_str(description);
        payload.push(' ');
    }
    if !spec.labels.is_empty() {
        payload.push_str(&spec.labels.join(" "));
        payload.push(' ');
    }
    for criterion in &spec.acceptance_criteria {
        payload.push_str(criterion);
        payload.push(' ');
    }
    if let Some(plan) = &spec.implementation_plan {
        payload.push_str(plan);
        payload.push(' ');
    }
    if let Some(milestone) = &spec.milestone {
        payload.push_str(milestone);
        payload.push(' ');
    }

    payload.trim().to_string()
}

/// Fold fuzzy scores into the pass-1 score map at the configured weight.
fn merge_passes(
    exact: Vec<ScoredResult>,
    fuzzy: Vec<ScoredResult>,
    fuzzy_weight: f64,
    limit: usize,
) -> Vec<ScoredResult> {
    let mut merged: HashMap<String, f64> =
        exact.into_iter().map(|r| (r.doc_id, r.score)).collect();

    for result in fuzzy {
        *merged.entry(result.doc_id).or_insert(0.0) += result.score * fuzzy_weight;
    }

    let mut results: Vec<ScoredResult> = merged
        .into_iter()
        .map(|(doc_id, score)| ScoredResult { doc_id, score })
        .collect();

    results.sort_by(ScoredResult::ranking_cmp);
    results.truncate(limit);
    results
}

/// Resolve scored ids back to specs.
///
/// Every id came from the same snapshot that seeded `spec_by_id`, so the
/// lookup cannot miss under correct usage; an id that does miss is silently
/// dropped rather than surfaced as an error.
fn resolve(results: Vec<ScoredResult>, spec_by_id: &HashMap<String, TaskSpec>) -> Vec<ScoredSpec> {
    results
        .into_iter()
        .filter_map(|result| {
            spec_by_id.get(&result.doc_id).map(|spec| ScoredSpec {
                spec: spec.clone(),
                score: result.score,
            })
        })
        .collect()
}
