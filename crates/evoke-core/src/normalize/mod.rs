//! Text normalization for answer comparison
//!
//! Case-folding, trimming, and tokenization into word sets. All functions
//! are pure and total: empty or malformed input yields empty output, never
//! an error. Folding uses `str::to_lowercase`, which is locale-independent,
//! so the same input always normalizes the same way.

use std::collections::HashSet;

use crate::lexicon;

/// Trimmed, case-folded copy of the input.
pub fn fold(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Whitespace-delimited tokens of the folded input.
pub fn words(raw: &str) -> HashSet<String> {
    fold(raw)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Tokens of the folded input with stop words removed.
pub fn significant_words(raw: &str) -> HashSet<String> {
    words(raw)
        .into_iter()
        .filter(|word| !lexicon::is_stop_word(word))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_trims_and_lowercases() {
        assert_eq!(fold("  My Son JOHN  "), "my son john");
        assert_eq!(fold(""), "");
        assert_eq!(fold("   "), "");
    }

    #[test]
    fn test_words_splits_on_any_whitespace() {
        let set = words("my\tson  john");
        assert_eq!(set.len(), 3);
        assert!(set.contains("my"));
        assert!(set.contains("son"));
        assert!(set.contains("john"));
    }

    #[test]
    fn test_empty_input_yields_empty_sets() {
        assert!(words("").is_empty());
        assert!(significant_words("   ").is_empty());
    }

    #[test]
    fn test_significant_words_drop_stop_words() {
        let set = significant_words("um she is my best friend");
        assert_eq!(set.len(), 2);
        assert!(set.contains("best"));
        assert!(set.contains("friend"));
    }

    #[test]
    fn test_all_stop_words_reduce_to_empty() {
        assert!(significant_words("um uh the my").is_empty());
    }
}
