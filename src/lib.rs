//! In-memory relevance ranking for task specs.
//!
//! This crate ranks a bounded collection of short structured records
//! (work-item specs) by relevance to a free-text query, or to another spec
//! used as a similarity seed. Exact-term ranking comes from Okapi BM25; a
//! Levenshtein-similarity fallback catches typos and near-miss terminology;
//! a deterministic two-pass merge combines them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ tokenize.rs │────▶│   bm25.rs    │     │   fuzzy.rs   │
//! │ (normalize, │     │ (Bm25Engine) │     │ (FuzzyEngine)│
//! │ stop words) │     └──────┬───────┘     └──────┬───────┘
//! └─────────────┘            │    pass 1          │  pass 2 (on demand)
//!                            ▼                    ▼
//!                     ┌─────────────────────────────────┐
//!                     │           related.rs            │
//!                     │ (SpecSearch: payload, two-pass  │
//!                     │  merge, id resolution)          │
//!                     └─────────────────────────────────┘
//! ```
//!
//! Both engines share one tokenizer so their scores describe the same term
//! space. All index state is ephemeral: the orchestrator rebuilds both
//! engines from the caller's snapshot on every call, and nothing is shared
//! across calls. The whole crate is synchronous, CPU-bound, and total - no
//! input makes it panic or return an error; malformed input degrades to
//! empty results.
//!
//! # Usage
//!
//! ```
//! use specrank::{InMemorySpecStore, SpecSearch, TaskSpec};
//!
//! let store = InMemorySpecStore::new(vec![
//!     TaskSpec {
//!         id: "task-1".to_string(),
//!         title: Some("Implement JWT authentication".to_string()),
//!         ..TaskSpec::default()
//!     },
//!     TaskSpec {
//!         id: "task-2".to_string(),
//!         title: Some("Add dark mode toggle".to_string()),
//!         ..TaskSpec::default()
//!     },
//! ]);
//!
//! let search = SpecSearch::new(store);
//! let related = search.find_related_by_query("authentication", 5);
//! assert_eq!(related[0].spec.id, "task-1");
//! ```

// Module declarations
mod bm25;
pub mod filter;
mod fuzzy;
mod levenshtein;
mod related;
mod tokenize;
mod types;
mod utils;

// Re-exports for public API
pub use bm25::{Bm25Engine, Bm25Params};
pub use fuzzy::{FuzzyEngine, FuzzyParams};
pub use levenshtein::{levenshtein_distance, similarity};
pub use related::{
    build_search_payload, InMemorySpecStore, RankConfig, SpecSearch, SpecStore,
};
pub use tokenize::{is_stop_word, tokenize};
pub use types::{ScoredResult, ScoredSpec, TaskSpec};
pub use utils::normalize;
