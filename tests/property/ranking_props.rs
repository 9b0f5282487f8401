//! BM25, fuzzy, and two-pass merge invariants.

use proptest::prelude::*;
use specrank::{
    build_search_payload, Bm25Engine, Bm25Params, FuzzyEngine, FuzzyParams, InMemorySpecStore,
    SpecSearch, TaskSpec,
};

use crate::common::spec;

fn filler_words(count: usize) -> String {
    (0..count)
        .map(|i| format!("filler{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

proptest! {
    /// Of two equal-length documents distinguished only by how often they
    /// repeat the query term, the one with more repeats never scores lower.
    #[test]
    fn term_frequency_is_monotone_at_equal_length(
        tf_a in 1usize..8,
        tf_b in 1usize..8,
        doc_len in 8usize..16,
    ) {
        prop_assume!(tf_a > tf_b);

        let text_a = format!("{} {}", "cache ".repeat(tf_a).trim(), filler_words(doc_len - tf_a));
        let text_b = format!("{} {}", "cache ".repeat(tf_b).trim(), filler_words(doc_len - tf_b));

        let mut engine = Bm25Engine::new(Bm25Params::default());
        engine.index("more", &text_a);
        engine.index("fewer", &text_b);

        let results = engine.search("cache", 2);
        prop_assert_eq!(results.len(), 2);
        prop_assert_eq!(results[0].doc_id.as_str(), "more");
        prop_assert!(results[0].score >= results[1].score);
    }

    /// At equal raw term frequency, the shorter document scores at least as
    /// high as the longer one.
    #[test]
    fn shorter_documents_score_at_least_as_high(
        extra in 1usize..12,
        base_len in 2usize..6,
    ) {
        let short = format!("cache {}", filler_words(base_len));
        let long = format!("cache {}", filler_words(base_len + extra));

        let mut engine = Bm25Engine::new(Bm25Params::default());
        engine.index("short", &short);
        engine.index("long", &long);

        let results = engine.search("cache", 2);
        prop_assert_eq!(results[0].doc_id.as_str(), "short");
    }

    /// Re-indexing an id behaves exactly like a fresh engine that only ever
    /// saw the final text.
    #[test]
    fn reindex_is_idempotent_per_id(
        first in "[a-z]{3,8}( [a-z]{3,8}){0,4}",
        second in "[a-z]{3,8}( [a-z]{3,8}){0,4}",
        query in "[a-z]{3,8}",
    ) {
        let mut reindexed = Bm25Engine::new(Bm25Params::default());
        reindexed.index("doc", &first);
        reindexed.index("doc", &second);
        reindexed.index("anchor", "unrelated anchor text");

        let mut fresh = Bm25Engine::new(Bm25Params::default());
        fresh.index("doc", &second);
        fresh.index("anchor", "unrelated anchor text");

        let got = reindexed.search(&query, 10);
        let want = fresh.search(&query, 10);
        prop_assert_eq!(got.len(), want.len());
        for (g, w) in got.iter().zip(want.iter()) {
            prop_assert_eq!(&g.doc_id, &w.doc_id);
            prop_assert!((g.score - w.score).abs() < 1e-12);
        }
    }

    /// Fuzzy search never surfaces a document whose best per-token
    /// similarity is below the floor for every query token.
    #[test]
    fn fuzzy_never_scores_below_floor_matches(
        docs in prop::collection::vec("[a-z]{3,9}( [a-z]{3,9}){0,3}", 1..5),
        query in "[a-z]{3,9}",
    ) {
        let mut engine = FuzzyEngine::new(FuzzyParams::default());
        for (i, text) in docs.iter().enumerate() {
            engine.index(&format!("task-{i}"), text);
        }

        for result in engine.search(&query, docs.len()) {
            let index: usize = result.doc_id["task-".len()..].parse().unwrap();
            let best = specrank::tokenize(&docs[index])
                .iter()
                .map(|token| specrank::similarity(&query, token))
                .fold(0.0, f64::max);
            prop_assert!(best >= 0.6);
        }
    }

    /// When BM25 alone fills the limit, the merged output is exactly the
    /// BM25 output - scores untouched by any fuzzy contribution.
    #[test]
    fn full_first_pass_is_returned_verbatim(limit in 1usize..4) {
        // Every doc contains the query term, so pass 1 always fills.
        let specs: Vec<TaskSpec> = (0..6)
            .map(|i| spec(&format!("task-{i}"), &format!("cache subsystem area{i}")))
            .collect();

        let mut engine = Bm25Engine::new(Bm25Params::default());
        for s in &specs {
            engine.index(&s.id, &build_search_payload(s));
        }
        let raw = engine.search("cache", limit);

        let search = SpecSearch::new(InMemorySpecStore::new(specs));
        let merged = search.find_related_by_query("cache", limit);

        prop_assert_eq!(merged.len(), raw.len());
        for (m, r) in merged.iter().zip(raw.iter()) {
            prop_assert_eq!(&m.spec.id, &r.doc_id);
            prop_assert!((m.score - r.score).abs() < 1e-12);
        }
    }

    /// Merged results never exceed the limit, are sorted descending, and
    /// every id resolves to a candidate spec.
    #[test]
    fn merged_output_is_sorted_bounded_and_resolvable(
        titles in prop::collection::vec("[a-z]{3,9}( [a-z]{3,9}){1,4}", 1..6),
        query in "[a-z]{3,9}( [a-z]{3,9}){0,2}",
        limit in 1usize..5,
    ) {
        let specs: Vec<TaskSpec> = titles
            .iter()
            .enumerate()
            .map(|(i, title)| spec(&format!("task-{i}"), title))
            .collect();
        let ids: Vec<String> = specs.iter().map(|s| s.id.clone()).collect();

        let search = SpecSearch::new(InMemorySpecStore::new(specs));
        let results = search.find_related_by_query(&query, limit);

        prop_assert!(results.len() <= limit);
        for window in results.windows(2) {
            prop_assert!(window[0].score >= window[1].score);
        }
        for result in &results {
            prop_assert!(ids.contains(&result.spec.id));
            prop_assert!(result.score > 0.0);
        }
    }
}
