//! Interactive filter scoring for spec pickers.
//!
//! Where the ranking engines answer "which specs are *about* this query",
//! this module answers the cheaper keystroke-by-keystroke question a picker
//! UI asks: does this query plausibly point at this title/id at all, and how
//! strongly? It tolerates typos, partial words, out-of-order tokens, and
//! in-order character subsequences.
//!
//! Scores live in [0.0, 1.0]. An exact substring match is always 1.0;
//! everything else is the best of three bounded strategies, so no fuzzy
//! heuristic can ever outrank a literal hit:
//!
//! | Strategy     | Cap | Catches                                 |
//! |--------------|-----|-----------------------------------------|
//! | token match  | 0.9 | word hits, prefixes, typos within words |
//! | subsequence  | 0.7 | "dbpool" → "database pooling"           |
//! | trigram dice | 0.7 | transpositions, garbled middles         |

use crate::levenshtein::levenshtein_distance;
use std::collections::HashSet;

/// Default score threshold for [`matches`].
const DEFAULT_THRESHOLD: f64 = 0.3;

/// Fuzzy match score between a query and a text, from 0.0 (no match) to 1.0
/// (exact substring match). Empty query or text scores 0.0.
pub fn score(query: &str, text: &str) -> f64 {
    if query.is_empty() || text.is_empty() {
        return 0.0;
    }

    let query = query.to_lowercase();
    let text = text.to_lowercase();

    if text.contains(&query) {
        return 1.0;
    }

    token_match_score(&query, &text)
        .max(subsequence_match_score(&query, &text))
        .max(trigram_similarity_score(&query, &text))
}

/// Does the query fuzzy-match the text at the default threshold?
pub fn matches(query: &str, text: &str) -> bool {
    score(query, text) >= DEFAULT_THRESHOLD
}

/// Does the query fuzzy-match the text at a custom threshold?
pub fn matches_with_threshold(query: &str, text: &str, threshold: f64) -> bool {
    score(query, text) >= threshold
}

/// Best score of a query across multiple text fields.
pub fn score_multi_field(query: &str, fields: &[&str]) -> f64 {
    fields
        .iter()
        .map(|field| score(query, field))
        .fold(0.0, f64::max)
}

/// Token-based matching: how many query words appear in the text, allowing
/// prefix/substring hits and per-word typo tolerance. Capped at 0.9 so a
/// token-level reconstruction never beats an exact substring.
fn token_match_score(query: &str, text: &str) -> f64 {
    let mut total_score = 0.0;
    let mut scored_tokens = 0usize;

    for token in query.split_whitespace() {
        scored_tokens += 1;

        if text.contains(token) {
            total_score += 1.0;
            continue;
        }

        let mut best_word_score: f64 = 0.0;
        for word in text.split_whitespace() {
            let word_score = if word.starts_with(token) {
                0.8
            } else if word.contains(token) {
                0.6
            } else {
                edit_distance_score(token, word)
            };
            best_word_score = best_word_score.max(word_score);
        }
        total_score += best_word_score;
    }

    if scored_tokens == 0 {
        return 0.0;
    }

    (total_score / scored_tokens as f64) * 0.9
}

/// Subsequence matching: all query characters appear in order in the text.
/// Consecutive runs earn a bonus. Capped at 0.7.
fn subsequence_match_score(query: &str, text: &str) -> f64 {
    let query_chars: Vec<char> = query.chars().collect();
    let text_chars: Vec<char> = text.chars().collect();
    if query_chars.is_empty() || text_chars.is_empty() {
        return 0.0;
    }

    let mut qi = 0usize;
    let mut matched_consecutive = 0usize;
    let mut total_consecutive_bonus = 0usize;
    let mut last_was_match = false;

    for &tc in &text_chars {
        if qi >= query_chars.len() {
            break;
        }
        if query_chars[qi] == tc {
            qi += 1;
            if last_was_match {
                matched_consecutive += 1;
                total_consecutive_bonus += matched_consecutive;
            } else {
                matched_consecutive = 0;
            }
            last_was_match = true;
        } else {
            last_was_match = false;
            matched_consecutive = 0;
        }
    }

    // Not all query characters found in order
    if qi < query_chars.len() {
        return 0.0;
    }

    let base_score = (query_chars.len() as f64 / text_chars.len() as f64).min(1.0);
    let consecutive_ratio = total_consecutive_bonus as f64 / query_chars.len() as f64;

    (base_score * 0.5 + consecutive_ratio * 0.3).min(0.7)
}

/// Trigram (3-character sliding window) similarity via the Dice coefficient:
/// `2·|A ∩ B| / (|A| + |B|)`. Good at catching transpositions. Capped at 0.7.
fn trigram_similarity_score(query: &str, text: &str) -> f64 {
    let query_trigrams = build_trigrams(query);
    let text_trigrams = build_trigrams(text);

    if query_trigrams.is_empty() || text_trigrams.is_empty() {
        return 0.0;
    }

    let common = query_trigrams.intersection(&text_trigrams).count();
    let dice = (2.0 * common as f64) / (query_trigrams.len() + text_trigrams.len()) as f64;
    dice * 0.7
}

/// Edit-distance score between two individual words, scaled to 0.6 max.
///
/// Only applies to words of similar length - comparing "db" against
/// "deployability" by edit distance produces noise, not typo tolerance.
fn edit_distance_score(a: &str, b: &str) -> f64 {
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    let max_len = a_len.max(b_len);
    if max_len == 0 {
        return 0.0;
    }
    if a_len.abs_diff(b_len) > 2.max(max_len / 3) {
        return 0.0;
    }

    let distance = levenshtein_distance(a, b);
    if distance > 1.max(max_len / 3) {
        return 0.0;
    }

    (1.0 - distance as f64 / max_len as f64) * 0.6
}

fn build_trigrams(s: &str) -> HashSet<String> {
    let chars: Vec<char> = s.chars().collect();
    chars
        .windows(3)
        .map(|window| window.iter().collect())
        .collect()
}
