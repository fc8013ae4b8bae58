//! Edit-distance similarity and fuzzy matching.
//!
//! Similarity is the Levenshtein distance normalised by the longer string:
//! `1 - distance / max(len(a), len(b))`. Matching is case-insensitive and a
//! literal substring always wins with a perfect score.
//!
//! Against a long searchable text, whole-string similarity stays low unless
//! the query covers most of it.

use rapidfuzz::distance::levenshtein;

/// Threshold used when a caller does not supply one.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.6;

/// Per-term threshold used when filtering interfaces by query.
pub const SEARCH_RECALL_THRESHOLD: f64 = 0.3;

/// Outcome of [`fuzzy_match`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatch {
    pub matches: bool,
    /// Similarity in `[0, 1]`; `1.0` for substring hits.
    pub score: f64,
}

impl FuzzyMatch {
    /// No match, zero score.
    pub const NONE: FuzzyMatch = FuzzyMatch {
        matches: false,
        score: 0.0,
    };

    /// Literal substring hit.
    pub const EXACT: FuzzyMatch = FuzzyMatch {
        matches: true,
        score: 1.0,
    };
}

/// Levenshtein distance over characters (insert, delete, substitute cost 1).
pub fn distance(a: &str, b: &str) -> usize {
    levenshtein::distance(a.chars(), b.chars())
}

/// Normalised similarity in `[0, 1]`; two empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - distance(a, b) as f64 / max_len as f64
}

/// Case-insensitive fuzzy match of `query` against `text`.
///
/// An empty query or text never matches.
pub fn fuzzy_match(query: &str, text: &str, threshold: f64) -> FuzzyMatch {
    if query.is_empty() || text.is_empty() {
        return FuzzyMatch::NONE;
    }
    let query = query.to_lowercase();
    let text = text.to_lowercase();
    if text.contains(&query) {
        return FuzzyMatch::EXACT;
    }
    let score = similarity(&query, &text);
    FuzzyMatch {
        matches: score >= threshold,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn distance_counts_edits() {
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("", "abc"), 3);
        assert_eq!(distance("flaw", "lawn"), 2);
        assert_eq!(distance("same", "same"), 0);
    }

    #[test]
    fn similarity_of_empty_strings_is_one() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("", "abc"), 0.0);
    }

    #[test]
    fn similarity_is_normalised_by_longer_string() {
        assert!((similarity("kitten", "sitting") - (1.0 - 3.0 / 7.0)).abs() < 1e-9);
    }

    #[test]
    fn substring_short_circuits_regardless_of_threshold() {
        assert_eq!(fuzzy_match("abc", "xxabcxx", 0.99), FuzzyMatch::EXACT);
        assert_eq!(fuzzy_match("ABC", "xxabcxx", DEFAULT_MATCH_THRESHOLD), FuzzyMatch::EXACT);
    }

    #[test]
    fn dissimilar_strings_do_not_match() {
        let result = fuzzy_match("zzz", "abc", 0.9);
        assert!(!result.matches);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn near_miss_matches_above_threshold() {
        let result = fuzzy_match("meter", "metre", 0.5);
        assert!(result.matches);
        assert!((result.score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn empty_inputs_never_match() {
        assert_eq!(fuzzy_match("", "abc", 0.0), FuzzyMatch::NONE);
        assert_eq!(fuzzy_match("abc", "", 0.0), FuzzyMatch::NONE);
    }

    #[test]
    fn multibyte_characters_count_once() {
        assert_eq!(distance("café", "cafe"), 1);
        assert!((similarity("café", "cafe") - 0.75).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn similarity_is_reflexive(a in "\\PC{1,24}") {
            prop_assert_eq!(similarity(&a, &a), 1.0);
        }

        #[test]
        fn similarity_is_symmetric(a in "\\PC{0,24}", b in "\\PC{0,24}") {
            prop_assert_eq!(similarity(&a, &b), similarity(&b, &a));
        }

        #[test]
        fn similarity_is_bounded(a in "[a-z ]{0,32}", b in "[a-z ]{0,32}") {
            let score = similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&score));
        }
    }
}
