// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! End-to-end ranking under arbitrary corpora and queries.
//!
//! The ranking core promises a total contract: no input - garbage queries,
//! empty specs, duplicate ids, degenerate limits - may panic or produce an
//! unordered or over-long result. The fuzzer drives the whole two-pass
//! pipeline through the public API.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use specrank::{InMemorySpecStore, SpecSearch, TaskSpec};

#[derive(Debug, Arbitrary)]
struct RankInput {
    specs: Vec<(String, Option<String>, Option<String>, Vec<String>)>,
    query: String,
    seed_id: String,
    limit: u8,
}

fuzz_target!(|input: RankInput| {
    let specs: Vec<TaskSpec> = input
        .specs
        .into_iter()
        .take(24) // keep the quadratic fuzzy pass inside the time budget
        .map(|(id, title, description, labels)| TaskSpec {
            id,
            title,
            description,
            labels,
            ..TaskSpec::default()
        })
        .collect();
    let ids: Vec<String> = specs.iter().map(|s| s.id.clone()).collect();

    let search = SpecSearch::new(InMemorySpecStore::new(specs));
    let limit = usize::from(input.limit);

    for results in [
        search.find_related_by_query(&input.query, limit),
        search.find_related_by_id(&input.seed_id, limit),
    ] {
        // Bounded by the limit
        assert!(results.len() <= limit);

        // Sorted by score descending
        for window in results.windows(2) {
            assert!(window[0].score >= window[1].score);
        }

        // Every result resolves back to a supplied spec with positive score
        for result in &results {
            assert!(ids.contains(&result.spec.id));
            assert!(result.score > 0.0);
        }
    }
});
