//! Answer evaluation
//!
//! The matching cascade that decides whether a user's spoken-to-text answer
//! matches an expected answer. Tiers run strict to lenient; the first hit
//! wins. Every tier except exact match can be switched off per user, so a
//! clinician can dial strictness up or down per patient.
//!
//! Each tier's score floor is a fixed constant rather than a recomputed
//! value, keeping grading predictable across sessions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::lexicon;
use crate::normalize;

/// Score awarded when the user answers with only the first name.
const FIRST_NAME_SCORE: f64 = 0.9;

/// Score awarded for substring containment in either direction.
const SUBSTRING_SCORE: f64 = 0.8;

/// Minimum overlap ratio for the raw word-overlap tier.
const WORD_OVERLAP_THRESHOLD: f64 = 0.5;

/// Score floor once both answers share a significant word.
const SIGNIFICANT_OVERLAP_FLOOR: f64 = 0.7;

/// Minimum synonym-aware similarity for the synonym-set tiers.
const SYNONYM_SIMILARITY_THRESHOLD: f64 = 0.5;

/// Credit for a synonymous (non-equal) word pair, and the score awarded
/// by the single-pair fallback.
const SYNONYM_PAIR_SCORE: f64 = 0.7;

fn enabled() -> bool {
    true
}

/// Per-user matching strategy toggles.
///
/// Owned by the caller's settings store and passed by value into each
/// evaluation. Every strategy defaults to enabled; exact matching is
/// always on and has no toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSettings {
    #[serde(default = "enabled")]
    pub use_acceptable_alternatives: bool,
    #[serde(default = "enabled")]
    pub use_partial_substring: bool,
    #[serde(default = "enabled")]
    pub use_word_overlap: bool,
    #[serde(default = "enabled")]
    pub use_stop_word_filtering: bool,
    #[serde(default = "enabled")]
    pub use_synonyms: bool,
    #[serde(default = "enabled")]
    pub use_first_name_only: bool,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            use_acceptable_alternatives: true,
            use_partial_substring: true,
            use_word_overlap: true,
            use_stop_word_filtering: true,
            use_synonyms: true,
            use_first_name_only: true,
        }
    }
}

impl MatchSettings {
    /// Exact-match-only settings: every optional strategy disabled.
    pub fn strict() -> Self {
        Self {
            use_acceptable_alternatives: false,
            use_partial_substring: false,
            use_word_overlap: false,
            use_stop_word_filtering: false,
            use_synonyms: false,
            use_first_name_only: false,
        }
    }
}

/// Graded outcome of one evaluation.
///
/// `is_partial` is true only when the answer was accepted by a non-exact
/// tier; it is never true for an incorrect answer. `correctness_score`
/// is always within `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub is_correct: bool,
    pub is_partial: bool,
    pub correctness_score: f64,
}

impl Evaluation {
    fn exact() -> Self {
        Self {
            is_correct: true,
            is_partial: false,
            correctness_score: 1.0,
        }
    }

    fn partial(score: f64) -> Self {
        Self {
            is_correct: true,
            is_partial: true,
            correctness_score: score,
        }
    }

    fn no_match() -> Self {
        Self {
            is_correct: false,
            is_partial: false,
            correctness_score: 0.0,
        }
    }
}

/// Evaluate a user's answer against the expected answer.
///
/// Runs the cascade: empty input, exact match, acceptable alternatives,
/// first-name-only, substring containment, raw word overlap, stop-word
/// filtered overlap, synonym matching. The first matching tier decides
/// the result. Malformed user input degrades to a no-match result; the
/// only error is an empty `expected_answer`, which violates the prompt
/// contract and is rejected with [`Error::EmptyExpectedAnswer`].
pub fn evaluate(
    user_answer: &str,
    expected_answer: &str,
    acceptable_answers: &[String],
    settings: &MatchSettings,
) -> Result<Evaluation> {
    let expected = normalize::fold(expected_answer);
    if expected.is_empty() {
        return Err(Error::EmptyExpectedAnswer);
    }

    let user = normalize::fold(user_answer);
    if user.is_empty() {
        return Ok(Evaluation::no_match());
    }

    if user == expected {
        return Ok(Evaluation::exact());
    }

    if settings.use_acceptable_alternatives {
        let hit = acceptable_answers
            .iter()
            .map(|alt| normalize::fold(alt))
            .any(|alt| !alt.is_empty() && alt == user);
        if hit {
            debug!(tier = "alternative", "answer matched an acceptable alternative");
            return Ok(Evaluation::exact());
        }
    }

    // First-name-only applies when the expected answer looks like a full name
    if settings.use_first_name_only && expected.contains(char::is_whitespace) {
        if let Some(first) = expected.split_whitespace().next() {
            if user == first {
                debug!(tier = "first_name", "answer matched the first name");
                return Ok(Evaluation::partial(FIRST_NAME_SCORE));
            }
        }
    }

    if settings.use_partial_substring && (expected.contains(&user) || user.contains(&expected)) {
        debug!(tier = "substring", "answers contain one another");
        return Ok(Evaluation::partial(SUBSTRING_SCORE));
    }

    let user_words: HashSet<String> = user.split_whitespace().map(str::to_string).collect();
    let expected_words: HashSet<String> =
        expected.split_whitespace().map(str::to_string).collect();

    if settings.use_word_overlap {
        if let Some(ratio) = overlap_ratio(&user_words, &expected_words) {
            if ratio >= WORD_OVERLAP_THRESHOLD {
                debug!(tier = "word_overlap", ratio, "answers share enough words");
                return Ok(Evaluation::partial(ratio));
            }
        }
    }

    let user_significant: HashSet<String> = user_words
        .iter()
        .filter(|word| !lexicon::is_stop_word(word))
        .cloned()
        .collect();
    let expected_significant: HashSet<String> = expected_words
        .iter()
        .filter(|word| !lexicon::is_stop_word(word))
        .cloned()
        .collect();

    if settings.use_stop_word_filtering {
        if let Some(ratio) = overlap_ratio(&user_significant, &expected_significant) {
            // Sharing any significant word at all is already a meaningful
            // signal for impaired speakers, hence the floor
            let score = ratio.max(SIGNIFICANT_OVERLAP_FLOOR);
            debug!(tier = "significant_overlap", ratio, score, "significant words overlap");
            return Ok(Evaluation::partial(score));
        }
    }

    if settings.use_synonyms {
        if let Some(score) = synonym_similarity(&user_words, &expected_words) {
            if score >= SYNONYM_SIMILARITY_THRESHOLD {
                debug!(tier = "synonym_set", score, "raw word sets are synonym-similar");
                return Ok(Evaluation::partial(score));
            }
        }

        if settings.use_stop_word_filtering {
            if let Some(score) = synonym_similarity(&user_significant, &expected_significant) {
                if score >= SYNONYM_SIMILARITY_THRESHOLD {
                    debug!(tier = "synonym_significant", score, "significant sets are synonym-similar");
                    return Ok(Evaluation::partial(score));
                }
            }
        }

        let any_pair = user_words.iter().any(|user_word| {
            expected_words
                .iter()
                .any(|expected_word| lexicon::are_synonyms(user_word, expected_word))
        });
        if any_pair {
            debug!(tier = "synonym_pair", "a single synonymous word pair matched");
            return Ok(Evaluation::partial(SYNONYM_PAIR_SCORE));
        }
    }

    Ok(Evaluation::no_match())
}

/// Shared-word ratio `|a ∩ b| / max(|a|, |b|)`, or `None` when the sets
/// are disjoint or either is empty.
fn overlap_ratio(a: &HashSet<String>, b: &HashSet<String>) -> Option<f64> {
    if a.is_empty() || b.is_empty() {
        return None;
    }
    let common = a.intersection(b).count();
    if common == 0 {
        return None;
    }
    Some(common as f64 / a.len().max(b.len()) as f64)
}

/// Synonym-aware similarity between two word sets.
///
/// Each user word earns full credit for an equal expected word and
/// [`SYNONYM_PAIR_SCORE`] credit for a synonymous one; the total is
/// divided by the larger set size. `None` when no word earns credit.
fn synonym_similarity(user: &HashSet<String>, expected: &HashSet<String>) -> Option<f64> {
    if user.is_empty() || expected.is_empty() {
        return None;
    }
    let mut credit = 0.0;
    for user_word in user {
        if expected.contains(user_word) {
            credit += 1.0;
        } else if expected
            .iter()
            .any(|expected_word| lexicon::are_synonyms(user_word, expected_word))
        {
            credit += SYNONYM_PAIR_SCORE;
        }
    }
    if credit == 0.0 {
        None
    } else {
        Some(credit / user.len().max(expected.len()) as f64)
    }
}
