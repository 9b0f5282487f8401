// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Edit-distance metric properties under arbitrary string pairs.
//!
//! The fuzzy engine thresholds on normalized similarity, so the metric
//! underneath has to actually be a metric. The fuzzer hunts for pairs where
//! symmetry, the length bounds, or the similarity normalization break -
//! especially around multi-byte characters, where a byte-based DP would
//! miscount.

#![no_main]

use libfuzzer_sys::fuzz_target;
use specrank::{levenshtein_distance, similarity};

fuzz_target!(|pair: (&str, &str)| {
    let (a, b) = pair;

    let d = levenshtein_distance(a, b);
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    // Symmetry
    assert_eq!(d, levenshtein_distance(b, a));

    // Length difference is a lower bound, the longer length an upper bound
    assert!(d >= a_len.abs_diff(b_len));
    assert!(d <= a_len.max(b_len));

    // Zero distance exactly for equal strings
    assert_eq!(d == 0, a == b);

    // Similarity is normalized and consistent with the distance
    let s = similarity(a, b);
    assert!((0.0..=1.0).contains(&s));
    if a == b {
        assert_eq!(s, 1.0);
    }
    if a.is_empty() != b.is_empty() {
        assert_eq!(s, 0.0);
    }
});
