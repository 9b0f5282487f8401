//! Tokenization shared by both ranking engines.
//!
//! BM25 and the fuzzy fallback must see identical token streams, otherwise
//! their scores stop being comparable and the two-pass merge turns into
//! nonsense. This module is the single place where raw spec text becomes
//! terms: split on runs of non-alphanumeric characters, normalize, then drop
//! anything too short or too common to carry signal.

use crate::utils::normalize;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Common English function words, excluded from indexing and queries.
///
/// These words are:
/// 1. Too common to be useful for ranking
/// 2. Cause false positives in fuzzy matching (e.g., "that" → "than")
///
/// Spec text is English task prose, so a single fixed set is enough - no
/// per-language tables here.
static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "an", "the", "is", "are", "was", "were", "be", "been", "being",
        "have", "has", "had", "do", "does", "did", "will", "would", "could",
        "should", "may", "might", "shall", "can", "need", "must",
        "in", "on", "at", "to", "for", "of", "with", "by", "from", "as",
        "into", "about", "between", "through", "during", "before", "after",
        "and", "but", "or", "nor", "not", "so", "yet",
        "it", "its", "this", "that", "these", "those",
        "i", "we", "you", "he", "she", "they", "me", "us", "him", "her", "them",
    ]
    .into_iter()
    .collect()
});

/// Check if a word is a stop word.
#[inline]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Word boundary detection: any non-alphanumeric character separates tokens.
fn is_word_boundary(c: char) -> bool {
    !c.is_alphanumeric()
}

/// Tokenize text into normalized terms.
///
/// Splits on runs of whitespace and punctuation, normalizes each word (see
/// [`crate::utils::normalize`]), and drops single-character tokens and stop
/// words. Repeats are preserved - term frequency matters to BM25 - and the
/// sequence length doubles as the document length for normalization.
///
/// Blank input yields an empty vector. Pure and deterministic; never fails.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(is_word_boundary)
        .filter(|raw| !raw.is_empty())
        .map(normalize)
        .filter(|word| word.chars().count() > 1 && !is_stop_word(word))
        .collect()
}
