//! Session statistics
//!
//! Pure aggregation over the graded responses of one practice session.
//! The caller owns persistence; this module only computes the summary a
//! completed session stores alongside its responses.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::prompts::PromptKind;

/// One graded answer within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptResponse {
    pub kind: PromptKind,
    pub user_answer: String,
    pub is_correct: bool,
    pub is_partial: bool,
    #[serde(default)]
    pub response_time_ms: Option<f64>,
    #[serde(default)]
    pub clarity_score: Option<f64>,
    #[serde(default)]
    pub correctness_score: Option<f64>,
    pub answered_at: DateTime<Utc>,
}

/// Correct/total counts for one prompt kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindBreakdown {
    pub correct: usize,
    pub total: usize,
}

/// Summary of a completed session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatistics {
    pub total_prompts: usize,
    pub total_correct: usize,
    /// Answers accepted by a non-exact tier.
    pub total_partial: usize,
    pub accuracy_percentage: f64,
    pub average_response_time_ms: f64,
    pub average_clarity_score: f64,
    pub average_correctness_score: f64,
    pub by_kind: BTreeMap<String, KindBreakdown>,
}

impl SessionStatistics {
    /// Aggregate a session's responses.
    ///
    /// Averages skip responses without the corresponding measurement and
    /// fall back to zero when no response carries one. Errors on an empty
    /// slice: a session with no responses cannot be completed.
    pub fn from_responses(responses: &[PromptResponse]) -> Result<Self> {
        if responses.is_empty() {
            return Err(Error::InvalidInput(
                "no responses to aggregate".to_string(),
            ));
        }

        let total = responses.len();
        let total_correct = responses.iter().filter(|r| r.is_correct).count();
        let total_partial = responses.iter().filter(|r| r.is_partial).count();

        let mut by_kind: BTreeMap<String, KindBreakdown> = BTreeMap::new();
        for response in responses {
            let entry = by_kind.entry(response.kind.to_string()).or_default();
            entry.total += 1;
            if response.is_correct {
                entry.correct += 1;
            }
        }

        Ok(Self {
            total_prompts: total,
            total_correct,
            total_partial,
            accuracy_percentage: round_to(total_correct as f64 / total as f64 * 100.0, 1),
            average_response_time_ms: round_to(
                mean(responses.iter().filter_map(|r| r.response_time_ms)),
                0,
            ),
            average_clarity_score: round_to(
                mean(responses.iter().filter_map(|r| r.clarity_score)),
                2,
            ),
            average_correctness_score: round_to(
                mean(responses.iter().filter_map(|r| r.correctness_score)),
                2,
            ),
            by_kind,
        })
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 { 0.0 } else { sum / count as f64 }
}

fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
