// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tokenizer under adversarial input.
//!
//! Spec text arrives from whatever editor or import path the caller wired
//! up, so the tokenizer sees every encoding accident there is. The contract
//! is total: any string in, a clean token list out, no panics.

#![no_main]

use libfuzzer_sys::fuzz_target;
use specrank::{is_stop_word, tokenize};

fuzz_target!(|text: &str| {
    let tokens = tokenize(text);

    for token in &tokens {
        // INVARIANT 1: no token survives below two characters
        assert!(
            token.chars().count() > 1,
            "short token {token:?} leaked through"
        );

        // INVARIANT 2: stop words are filtered
        assert!(!is_stop_word(token), "stop word {token:?} leaked through");

        // INVARIANT 3: no whitespace survives inside a token
        assert!(
            !token.chars().any(char::is_whitespace),
            "whitespace inside token {token:?}"
        );
    }

    // INVARIANT 4: tokenization is deterministic
    assert_eq!(tokens, tokenize(text));
});
