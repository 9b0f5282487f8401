//! Tokenizer behavior: splitting, normalization, filtering.

use specrank::{is_stop_word, tokenize};

#[test]
fn lowercases_and_splits_on_whitespace() {
    assert_eq!(
        tokenize("JWT Authentication TOKEN"),
        vec!["jwt", "authentication", "token"]
    );
}

#[test]
fn punctuation_runs_are_single_separators() {
    assert_eq!(
        tokenize("auth: JWT//RS256, (rotate!)"),
        vec!["auth", "jwt", "rs256", "rotate"]
    );
}

#[test]
fn single_character_tokens_are_dropped() {
    assert_eq!(tokenize("a b c option-B"), vec!["option"]);
}

#[test]
fn stop_words_are_dropped() {
    assert_eq!(
        tokenize("the fix for the cache and the pool"),
        vec!["fix", "cache", "pool"]
    );
    assert!(is_stop_word("the"));
    assert!(is_stop_word("between"));
    assert!(!is_stop_word("cache"));
}

#[test]
fn blank_and_punctuation_only_input_yield_nothing() {
    assert!(tokenize("").is_empty());
    assert!(tokenize("   ").is_empty());
    assert!(tokenize("-- // ??").is_empty());
}

#[test]
fn token_order_and_repeats_are_preserved() {
    assert_eq!(
        tokenize("retry retry backoff retry"),
        vec!["retry", "retry", "backoff", "retry"]
    );
}

#[cfg(feature = "unicode-normalization")]
#[test]
fn diacritics_are_stripped_before_matching() {
    assert_eq!(tokenize("Café Sessions"), vec!["cafe", "sessions"]);
    assert_eq!(specrank::normalize("naïve"), "naive");
}

#[test]
fn digits_are_token_characters() {
    assert_eq!(tokenize("migrate to v2 schema"), vec!["migrate", "v2", "schema"]);
}
