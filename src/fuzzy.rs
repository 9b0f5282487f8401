//! Fuzzy fallback ranking via Levenshtein similarity.
//!
//! BM25 only sees exact terms, which makes it blind to typos and near-miss
//! terminology: "authetication" scores zero against "authentication". This
//! engine catches those cases by scoring each query token against the
//! closest token in each document and keeping matches above a similarity
//! threshold.
//!
//! # Cost model
//!
//! O(queryTokens × uniqueDocTokens × editDistance) per document. That is
//! fine for the corpora this crate targets (tens to low hundreds of specs);
//! a much larger corpus would want a pruning step that skips token pairs
//! whose length difference alone already puts them under the threshold.

use crate::levenshtein::similarity;
use crate::tokenize::tokenize;
use crate::types::ScoredResult;
use std::collections::{HashMap, HashSet};

/// Fuzzy-matching parameters.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyParams {
    /// Minimum similarity (0.0-1.0) for a token match to count. At the 0.6
    /// default, two strings must share at least 60% of their characters.
    pub min_similarity: f64,
}

impl Default for FuzzyParams {
    fn default() -> Self {
        Self {
            min_similarity: 0.6,
        }
    }
}

/// In-memory fuzzy engine over a caller-supplied document snapshot.
///
/// Same ephemeral lifecycle as [`crate::Bm25Engine`]: build, index, search,
/// discard. Both engines tokenize through [`crate::tokenize::tokenize`] so
/// their scores describe the same term space.
#[derive(Debug)]
pub struct FuzzyEngine {
    params: FuzzyParams,
    doc_tokens: HashMap<String, Vec<String>>,
}

impl FuzzyEngine {
    pub fn new(params: FuzzyParams) -> Self {
        Self {
            params,
            doc_tokens: HashMap::new(),
        }
    }

    /// Index a document for fuzzy searching. Re-indexing an id replaces its
    /// previous text.
    pub fn index(&mut self, doc_id: &str, text: &str) {
        self.doc_tokens.insert(doc_id.to_string(), tokenize(text));
    }

    /// Rank indexed documents by aggregate fuzzy similarity, best first.
    ///
    /// A document scores the sum over query tokens of its best token
    /// similarity, counting only matches at or above `min_similarity`.
    /// Documents with a zero total are excluded; ties order by ascending
    /// doc id.
    pub fn search(&self, query: &str, limit: usize) -> Vec<ScoredResult> {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() || self.doc_tokens.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<ScoredResult> = self
            .doc_tokens
            .iter()
            .map(|(doc_id, tokens)| ScoredResult {
                doc_id: doc_id.clone(),
                score: self.score_document(tokens, &query_tokens),
            })
            .filter(|r| r.score > 0.0)
            .collect();

        results.sort_by(ScoredResult::ranking_cmp);
        results.truncate(limit);
        results
    }

    /// Drop all indexed documents.
    pub fn clear(&mut self) {
        self.doc_tokens.clear();
    }

    /// Number of currently indexed documents.
    pub fn doc_count(&self) -> usize {
        self.doc_tokens.len()
    }

    fn score_document(&self, doc_tokens: &[String], query_tokens: &[String]) -> f64 {
        if doc_tokens.is_empty() {
            return 0.0;
        }

        // Similarity only cares about which terms exist, not how often.
        let unique_doc_tokens: HashSet<&str> = doc_tokens.iter().map(String::as_str).collect();

        let mut total_score = 0.0;
        for query_token in query_tokens {
            let best_similarity = unique_doc_tokens
                .iter()
                .map(|doc_token| similarity(query_token, doc_token))
                .fold(0.0, f64::max);

            if best_similarity >= self.params.min_similarity {
                total_score += best_similarity;
            }
        }

        total_score
    }
}
