//! Recall prompt generation
//!
//! Builds a session's worth of recall prompts from a user's stored
//! contacts. Each prompt is self-contained: it carries its question text,
//! expected answer, and acceptable alternatives, so grading never needs to
//! re-fetch the source contact.
//!
//! Shuffling uses an injected random source; tests and the CLI `--seed`
//! flag pass a seeded generator for reproducible sessions.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::lexicon;

/// Minimum number of contacts needed to build a session.
pub const MIN_SUBJECTS: usize = 2;

const DEFAULT_ASSOCIATION: &str = "at home";
const DEFAULT_INTERESTS: &str = "spending time together";
const DEFAULT_PERSONALITY: &str = "kind and caring";

/// A stored contact as the generator consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
    pub relationship: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub location_context: Option<String>,
    #[serde(default)]
    pub association: Option<String>,
    #[serde(default)]
    pub interests: Option<String>,
    #[serde(default)]
    pub personality: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Subject {
    /// First non-empty descriptive field, in hint priority order.
    fn descriptive_field(&self) -> Option<&str> {
        [&self.interests, &self.description, &self.personality]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .map(str::trim)
            .find(|value| !value.is_empty())
    }
}

/// The kind of recall a prompt exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    Relationship,
    Association,
    Interests,
    Personality,
    NameFromDescription,
}

impl PromptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relationship => "relationship",
            Self::Association => "association",
            Self::Interests => "interests",
            Self::Personality => "personality",
            Self::NameFromDescription => "name_from_description",
        }
    }
}

impl std::fmt::Display for PromptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generated recall question with its grading data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecallPrompt {
    pub subject_id: Uuid,
    pub subject_name: String,
    pub subject_photo_url: Option<String>,
    pub kind: PromptKind,
    pub question_text: String,
    pub expected_answer: String,
    pub acceptable_answers: Vec<String>,
}

/// Generate a session's prompts from the given contacts.
///
/// Requires at least [`MIN_SUBJECTS`] contacts and returns an empty
/// sequence otherwise; the caller turns that into a cannot-start-session
/// error. Contacts are shuffled with the injected generator, then prompt
/// kinds are assigned in fixed priority order. Yields five prompts, or
/// four when no contact carries a descriptive field for the
/// name-from-description question.
pub fn generate<R: Rng + ?Sized>(subjects: &[Subject], rng: &mut R) -> Vec<RecallPrompt> {
    if subjects.len() < MIN_SUBJECTS {
        warn!(
            got = subjects.len(),
            needed = MIN_SUBJECTS,
            "not enough contacts for a session"
        );
        return Vec::new();
    }

    let mut shuffled: Vec<&Subject> = subjects.iter().collect();
    shuffled.shuffle(rng);

    let first = shuffled[0];
    let second = shuffled.get(1).copied().unwrap_or(first);

    let mut prompts = Vec::with_capacity(5);

    prompts.push(RecallPrompt {
        subject_id: first.id,
        subject_name: first.name.clone(),
        subject_photo_url: first.photo_url.clone(),
        kind: PromptKind::Relationship,
        question_text: format!("What is {}'s relationship to you?", first.name),
        expected_answer: first.relationship.clone(),
        acceptable_answers: relationship_answers(&first.relationship),
    });

    let location = non_empty(second.location_context.as_deref())
        .or_else(|| non_empty(second.association.as_deref()))
        .unwrap_or(DEFAULT_ASSOCIATION);
    prompts.push(RecallPrompt {
        subject_id: second.id,
        subject_name: second.name.clone(),
        subject_photo_url: second.photo_url.clone(),
        kind: PromptKind::Association,
        question_text: format!("Where do you usually see {}?", second.name),
        expected_answer: location.to_string(),
        acceptable_answers: vec![location.to_lowercase()],
    });

    let interests = non_empty(first.interests.as_deref()).unwrap_or(DEFAULT_INTERESTS);
    prompts.push(RecallPrompt {
        subject_id: first.id,
        subject_name: first.name.clone(),
        subject_photo_url: first.photo_url.clone(),
        kind: PromptKind::Interests,
        question_text: format!("What does {} enjoy doing?", first.name),
        expected_answer: interests.to_string(),
        acceptable_answers: vec![interests.to_lowercase()],
    });

    let personality = non_empty(second.personality.as_deref())
        .or_else(|| non_empty(second.description.as_deref()))
        .unwrap_or(DEFAULT_PERSONALITY);
    prompts.push(RecallPrompt {
        subject_id: second.id,
        subject_name: second.name.clone(),
        subject_photo_url: second.photo_url.clone(),
        kind: PromptKind::Personality,
        question_text: format!("How would you describe {}'s personality?", second.name),
        expected_answer: personality.to_string(),
        acceptable_answers: vec![personality.to_lowercase()],
    });

    // Reverse recall: name the contact from a hint. Skipped entirely when
    // nobody has a descriptive field, so the session length reflects the
    // data that actually exists.
    if let Some((subject, field)) = shuffled
        .iter()
        .find_map(|s| s.descriptive_field().map(|field| (*s, field)))
    {
        let hint = hint_clause(field);
        let mut acceptable = vec![subject.name.to_lowercase()];
        if let Some(first_name) = subject.name.split_whitespace().next() {
            let first_name = first_name.to_lowercase();
            if !acceptable.contains(&first_name) {
                acceptable.push(first_name);
            }
        }
        if let Some(nickname) = non_empty(subject.nickname.as_deref()) {
            let nickname = nickname.to_lowercase();
            if !acceptable.contains(&nickname) {
                acceptable.push(nickname);
            }
        }
        prompts.push(RecallPrompt {
            subject_id: subject.id,
            subject_name: subject.name.clone(),
            subject_photo_url: subject.photo_url.clone(),
            kind: PromptKind::NameFromDescription,
            question_text: format!("Who is your {} who {}?", subject.relationship, hint),
            expected_answer: subject.name.clone(),
            acceptable_answers: acceptable,
        });
    }

    info!(count = prompts.len(), "generated recall prompts");
    prompts
}

/// Acceptable answers for a relationship prompt.
///
/// Known labels expand through the alias table; unknown labels fall back
/// to their lowercase, title-case, and raw spellings.
fn relationship_answers(label: &str) -> Vec<String> {
    match lexicon::relationship_aliases(label) {
        Some(aliases) => aliases.iter().map(|alias| alias.to_string()).collect(),
        None => {
            let mut answers = vec![label.to_lowercase(), title_case(label)];
            if !answers.iter().any(|a| a == label) {
                answers.push(label.to_string());
            }
            answers
        }
    }
}

/// Turn a descriptive field into a hint clause that reads naturally after
/// "who": an existing verb phrase is kept, a gerund or bare noun gets
/// "loves " prepended.
fn hint_clause(value: &str) -> String {
    const VERB_STARTS: &[&str] = &[
        "loves", "enjoys", "likes", "is", "was", "has", "plays", "works", "collects", "makes",
        "sings", "paints", "teaches", "volunteers", "fixes", "builds", "bakes", "cooks", "reads",
        "writes", "grows", "watches", "goes", "runs", "rides", "travels", "knits",
    ];
    let trimmed = value.trim();
    let first = trimmed
        .split_whitespace()
        .next()
        .map(str::to_lowercase)
        .unwrap_or_default();
    if VERB_STARTS.contains(&first.as_str()) {
        trimmed.to_string()
    } else {
        format!("loves {}", trimmed)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
