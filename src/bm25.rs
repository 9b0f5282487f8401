//! Exact-term ranking via Okapi BM25.
//!
//! An ephemeral, per-call engine: the orchestrator builds a fresh instance
//! from the current spec snapshot, indexes every candidate, runs one search,
//! and throws the whole thing away. There is no persistence and no sharing
//! across calls - the document-frequency table and average length always
//! describe exactly the snapshot being ranked.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **DF_MATCHES_DOCS**: `doc_frequency[term]` equals the number of entries
//!    in `doc_tokens` whose token sequence contains `term`. `index()` keeps
//!    this true even when re-indexing an existing id (the old sequence's
//!    contribution is retracted first).
//! 2. **AVG_LEN_CURRENT**: `avg_doc_len` is the mean token-sequence length
//!    over all currently indexed documents, recomputed on every insertion.
//! 3. **RESULTS_ORDERED**: `search()` output is sorted score-descending with
//!    ascending doc-id tie-break, truncated to the requested limit, and never
//!    contains a non-positive score.

use crate::tokenize::tokenize;
use crate::types::ScoredResult;
use std::collections::{HashMap, HashSet};

/// BM25 tuning parameters.
///
/// Immutable once the engine is constructed; there is no global state to
/// reconfigure mid-search.
#[derive(Debug, Clone, Copy)]
pub struct Bm25Params {
    /// Term-frequency saturation. Higher values let repeated terms keep
    /// adding score; 1.2 is the standard Okapi default.
    pub k1: f64,
    /// Document-length normalization strength in [0, 1]. At 0, long and
    /// short documents score alike; at 1, scores are fully scaled by
    /// `doc_len / avg_len`.
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self { k1: 1.2, b: 0.75 }
    }
}

/// In-memory BM25 engine over a caller-supplied document snapshot.
#[derive(Debug)]
pub struct Bm25Engine {
    params: Bm25Params,
    doc_tokens: HashMap<String, Vec<String>>,
    doc_frequency: HashMap<String, usize>,
    avg_doc_len: f64,
}

impl Bm25Engine {
    pub fn new(params: Bm25Params) -> Self {
        Self {
            params,
            doc_tokens: HashMap::new(),
            doc_frequency: HashMap::new(),
            avg_doc_len: 0.0,
        }
    }

    /// Index a document. Call once per document before searching.
    ///
    /// Re-indexing an id replaces the previous text: the old token
    /// sequence's document-frequency contribution is retracted before the
    /// new one is applied, so `index` is idempotent per id.
    pub fn index(&mut self, doc_id: &str, text: &str) {
        if let Some(old_tokens) = self.doc_tokens.remove(doc_id) {
            self.retract_doc_frequency(&old_tokens);
        }

        let tokens = tokenize(text);

        // Document frequency counts documents, not occurrences: only the
        // unique terms of this document bump the table.
        let unique_terms: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        for term in unique_terms {
            *self.doc_frequency.entry(term.to_string()).or_insert(0) += 1;
        }

        self.doc_tokens.insert(doc_id.to_string(), tokens);
        self.recompute_avg_doc_len();
    }

    /// Rank indexed documents against the query, best first.
    ///
    /// Returns at most `limit` results, each with a positive score. An empty
    /// query (after tokenization) or an empty index yields an empty result -
    /// that guard also keeps the average document length out of a division
    /// by zero.
    pub fn search(&self, query: &str, limit: usize) -> Vec<ScoredResult> {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() || self.doc_tokens.is_empty() {
            return Vec::new();
        }

        let total_docs = self.doc_tokens.len();
        let mut results: Vec<ScoredResult> = self
            .doc_tokens
            .iter()
            .map(|(doc_id, tokens)| ScoredResult {
                doc_id: doc_id.clone(),
                score: self.score_document(tokens, &query_tokens, total_docs),
            })
            .filter(|r| r.score > 0.0)
            .collect();

        results.sort_by(ScoredResult::ranking_cmp);
        results.truncate(limit);
        results
    }

    /// Drop all indexed documents and reset the statistics.
    pub fn clear(&mut self) {
        self.doc_tokens.clear();
        self.doc_frequency.clear();
        self.avg_doc_len = 0.0;
    }

    /// Number of currently indexed documents.
    pub fn doc_count(&self) -> usize {
        self.doc_tokens.len()
    }

    fn score_document(
        &self,
        doc_tokens: &[String],
        query_tokens: &[String],
        total_docs: usize,
    ) -> f64 {
        let doc_len = doc_tokens.len();

        let mut term_freqs: HashMap<&str, usize> = HashMap::new();
        for token in doc_tokens {
            *term_freqs.entry(token).or_insert(0) += 1;
        }

        let Bm25Params { k1, b } = self.params;
        let mut score = 0.0;

        for term in query_tokens {
            let tf = term_freqs.get(term.as_str()).copied().unwrap_or(0);
            if tf == 0 {
                continue;
            }
            let tf = tf as f64;

            // DF_MATCHES_DOCS guarantees df <= total_docs.
            let df = self.doc_frequency.get(term).copied().unwrap_or(0);
            let idf = (((total_docs - df) as f64 + 0.5) / (df as f64 + 0.5) + 1.0).ln();

            // tf > 0 implies this document has tokens, so avg_doc_len > 0.
            let tf_norm = (tf * (k1 + 1.0))
                / (tf + k1 * (1.0 - b + b * (doc_len as f64 / self.avg_doc_len)));

            score += idf * tf_norm;
        }

        score
    }

    fn retract_doc_frequency(&mut self, tokens: &[String]) {
        let unique_terms: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        for term in unique_terms {
            let emptied = match self.doc_frequency.get_mut(term) {
                Some(count) => {
                    *count -= 1;
                    *count == 0
                }
                None => false,
            };
            if emptied {
                self.doc_frequency.remove(term);
            }
        }
    }

    fn recompute_avg_doc_len(&mut self) {
        if self.doc_tokens.is_empty() {
            self.avg_doc_len = 0.0;
            return;
        }
        let total_len: usize = self.doc_tokens.values().map(Vec::len).sum();
        self.avg_doc_len = total_len as f64 / self.doc_tokens.len() as f64;
    }
}
