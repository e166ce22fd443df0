//! Personal-information practice
//!
//! Generates teach-then-quiz items from the user's own profile: phone
//! number, address, birthday, favorites. Each item carries the spoken
//! teach text (digits read one at a time for numbers), the question, the
//! expected answer, and a hint.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Minimum number of filled profile fields to start a session; enforced
/// by callers, not by the generator.
pub const MIN_FILLED_FIELDS: usize = 5;

/// Items selected per session.
const ITEMS_PER_SESSION: usize = 5;

/// How a hint is derived from the expected answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintKind {
    FirstLetter,
    FirstDigit,
}

/// One practicable profile field with its phrasing templates.
///
/// `teach_template` contains a `{value}` placeholder for the spoken form
/// of the stored value.
#[derive(Debug, Clone)]
pub struct PracticeField {
    pub name: &'static str,
    pub label: &'static str,
    pub teach_template: &'static str,
    pub question: &'static str,
    pub hint_kind: HintKind,
}

/// Profile fields that can be practiced.
pub static PRACTICE_FIELDS: Lazy<Vec<PracticeField>> = Lazy::new(|| {
    vec![
        PracticeField {
            name: "phone_number",
            label: "phone number",
            teach_template: "Your phone number is {value}",
            question: "What is your phone number?",
            hint_kind: HintKind::FirstDigit,
        },
        PracticeField {
            name: "address_city",
            label: "city",
            teach_template: "You live in {value}",
            question: "What city do you live in?",
            hint_kind: HintKind::FirstLetter,
        },
        PracticeField {
            name: "address_state",
            label: "state",
            teach_template: "You live in the state of {value}",
            question: "What state do you live in?",
            hint_kind: HintKind::FirstLetter,
        },
        PracticeField {
            name: "address_zip",
            label: "zip code",
            teach_template: "Your zip code is {value}",
            question: "What is your zip code?",
            hint_kind: HintKind::FirstDigit,
        },
        PracticeField {
            name: "date_of_birth",
            label: "birthday",
            teach_template: "Your birthday is {value}",
            question: "When is your birthday?",
            hint_kind: HintKind::FirstLetter,
        },
        PracticeField {
            name: "full_name",
            label: "full name",
            teach_template: "Your full name is {value}",
            question: "What is your full name?",
            hint_kind: HintKind::FirstLetter,
        },
        PracticeField {
            name: "job",
            label: "job",
            teach_template: "Your job is {value}",
            question: "What is your job?",
            hint_kind: HintKind::FirstLetter,
        },
        PracticeField {
            name: "marital_status",
            label: "marital status",
            teach_template: "Your marital status is {value}",
            question: "What is your marital status?",
            hint_kind: HintKind::FirstLetter,
        },
        PracticeField {
            name: "number_of_children",
            label: "number of children",
            teach_template: "You have {value} children",
            question: "How many children do you have?",
            hint_kind: HintKind::FirstDigit,
        },
        PracticeField {
            name: "favorite_food",
            label: "favorite food",
            teach_template: "Your favorite food is {value}",
            question: "What is your favorite food?",
            hint_kind: HintKind::FirstLetter,
        },
        PracticeField {
            name: "favorite_music",
            label: "favorite music",
            teach_template: "Your favorite music is {value}",
            question: "What is your favorite music?",
            hint_kind: HintKind::FirstLetter,
        },
        PracticeField {
            name: "hair_color",
            label: "hair color",
            teach_template: "Your hair color is {value}",
            question: "What is your hair color?",
            hint_kind: HintKind::FirstLetter,
        },
        PracticeField {
            name: "eye_color",
            label: "eye color",
            teach_template: "Your eye color is {value}",
            question: "What is your eye color?",
            hint_kind: HintKind::FirstLetter,
        },
    ]
});

/// The user's stored profile fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalProfile {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address_city: Option<String>,
    #[serde(default)]
    pub address_state: Option<String>,
    #[serde(default)]
    pub address_zip: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub marital_status: Option<String>,
    #[serde(default)]
    pub number_of_children: Option<u32>,
    #[serde(default)]
    pub favorite_food: Option<String>,
    #[serde(default)]
    pub favorite_music: Option<String>,
    #[serde(default)]
    pub hair_color: Option<String>,
    #[serde(default)]
    pub eye_color: Option<String>,
}

impl PersonalProfile {
    /// Display value for a practice field, if the field is filled.
    ///
    /// Birthdays render as "January 15" so the spoken answer can match
    /// the expected text.
    fn display_value(&self, field: &str) -> Option<String> {
        let text = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        match field {
            "full_name" => text(&self.full_name),
            "phone_number" => text(&self.phone_number),
            "address_city" => text(&self.address_city),
            "address_state" => text(&self.address_state),
            "address_zip" => text(&self.address_zip),
            "date_of_birth" => self
                .date_of_birth
                .map(|date| date.format("%B %d").to_string()),
            "job" => text(&self.job),
            "marital_status" => text(&self.marital_status),
            "number_of_children" => self.number_of_children.map(|n| n.to_string()),
            "favorite_food" => text(&self.favorite_food),
            "favorite_music" => text(&self.favorite_music),
            "hair_color" => text(&self.hair_color),
            "eye_color" => text(&self.eye_color),
            _ => None,
        }
    }

    /// Count of practice fields with a value.
    pub fn filled_count(&self) -> usize {
        PRACTICE_FIELDS
            .iter()
            .filter(|field| self.display_value(field.name).is_some())
            .count()
    }
}

/// One generated practice item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoPrompt {
    pub field_name: String,
    pub field_label: String,
    pub teach_text: String,
    pub question_text: String,
    pub expected_answer: String,
    pub hint_text: String,
}

/// Generate up to five practice items from the profile.
///
/// The filled fields are shuffled with the injected generator and the
/// first five are selected. Yields fewer items (possibly none) when fewer
/// fields are filled; callers gate session start on
/// [`PersonalProfile::filled_count`].
pub fn generate_items<R: Rng + ?Sized>(
    profile: &PersonalProfile,
    rng: &mut R,
) -> Vec<InfoPrompt> {
    let mut filled: Vec<(&PracticeField, String)> = PRACTICE_FIELDS
        .iter()
        .filter_map(|field| {
            profile
                .display_value(field.name)
                .map(|value| (field, value))
        })
        .collect();

    filled.shuffle(rng);
    filled.truncate(ITEMS_PER_SESSION);

    let items = filled
        .into_iter()
        .map(|(field, value)| {
            let spoken = match field.name {
                "phone_number" => spell_phone(&value),
                "address_zip" => spell_zip(&value),
                _ => value.clone(),
            };
            // Birthday hints use the month's first letter
            let hint_value = match field.name {
                "date_of_birth" => value
                    .split_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_string(),
                _ => value.clone(),
            };
            InfoPrompt {
                field_name: field.name.to_string(),
                field_label: field.label.to_string(),
                teach_text: field.teach_template.replace("{value}", &spoken),
                question_text: field.question.to_string(),
                expected_answer: value,
                hint_text: hint_for(&hint_value, field.hint_kind),
            }
        })
        .collect::<Vec<_>>();

    info!(count = items.len(), "generated practice items");
    items
}

/// Spoken form of a phone number: digits read individually, grouped the
/// way a US number is said aloud.
pub fn spell_phone(phone: &str) -> String {
    let digits: Vec<String> = phone
        .chars()
        .filter(char::is_ascii_digit)
        .map(String::from)
        .collect();
    match digits.len() {
        10 => format!(
            "{} {} {}, {} {} {}, {} {} {} {}",
            digits[0],
            digits[1],
            digits[2],
            digits[3],
            digits[4],
            digits[5],
            digits[6],
            digits[7],
            digits[8],
            digits[9]
        ),
        7 => format!(
            "{} {} {}, {} {} {} {}",
            digits[0], digits[1], digits[2], digits[3], digits[4], digits[5], digits[6]
        ),
        _ => digits.join(" "),
    }
}

/// Spoken form of a zip code: digits read individually.
pub fn spell_zip(zip: &str) -> String {
    zip.chars()
        .filter(char::is_ascii_digit)
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build a hint sentence for the expected answer.
pub fn hint_for(value: &str, kind: HintKind) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match kind {
        HintKind::FirstLetter => {
            let first = trimmed
                .chars()
                .next()
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_default();
            format!("It starts with the letter {}", first)
        }
        HintKind::FirstDigit => match trimmed.chars().find(char::is_ascii_digit) {
            Some(digit) => format!("The first digit is {}", digit),
            None => {
                let first = trimmed.chars().next().unwrap_or_default();
                format!("It starts with {}", first)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn full_profile() -> PersonalProfile {
        PersonalProfile {
            full_name: Some("Rose Martin".to_string()),
            phone_number: Some("(555) 867-5309".to_string()),
            address_city: Some("Portland".to_string()),
            address_state: Some("Oregon".to_string()),
            address_zip: Some("97201".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1948, 1, 15),
            job: Some("librarian".to_string()),
            marital_status: Some("married".to_string()),
            number_of_children: Some(3),
            favorite_food: Some("lasagna".to_string()),
            favorite_music: Some("jazz".to_string()),
            hair_color: Some("gray".to_string()),
            eye_color: Some("green".to_string()),
        }
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(11)
    }

    #[test]
    fn test_spell_phone_ten_digits() {
        assert_eq!(
            spell_phone("(555) 867-5309"),
            "5 5 5, 8 6 7, 5 3 0 9"
        );
    }

    #[test]
    fn test_spell_phone_seven_digits() {
        assert_eq!(spell_phone("867-5309"), "8 6 7, 5 3 0 9");
    }

    #[test]
    fn test_spell_phone_other_lengths_space_all_digits() {
        assert_eq!(spell_phone("12345"), "1 2 3 4 5");
        assert_eq!(spell_phone("no digits"), "");
    }

    #[test]
    fn test_spell_zip() {
        assert_eq!(spell_zip("97201"), "9 7 2 0 1");
    }

    #[test]
    fn test_hint_first_letter() {
        assert_eq!(
            hint_for("portland", HintKind::FirstLetter),
            "It starts with the letter P"
        );
    }

    #[test]
    fn test_hint_first_digit_scans_into_value() {
        assert_eq!(
            hint_for("(555) 867-5309", HintKind::FirstDigit),
            "The first digit is 5"
        );
    }

    #[test]
    fn test_hint_first_digit_falls_back_to_first_char() {
        assert_eq!(hint_for("three", HintKind::FirstDigit), "It starts with t");
    }

    #[test]
    fn test_hint_empty_value() {
        assert_eq!(hint_for("  ", HintKind::FirstLetter), "");
    }

    #[test]
    fn test_sparse_profiles_yield_fewer_items() {
        let profile = PersonalProfile {
            full_name: Some("Rose Martin".to_string()),
            address_city: Some("Portland".to_string()),
            ..PersonalProfile::default()
        };
        // The generator works with whatever is filled; session-start
        // minimums are the caller's gate
        assert_eq!(profile.filled_count(), 2);
        let items = generate_items(&profile, &mut rng());
        assert_eq!(items.len(), 2);

        assert!(generate_items(&PersonalProfile::default(), &mut rng()).is_empty());
    }

    #[test]
    fn test_blank_fields_do_not_count_as_filled() {
        let profile = PersonalProfile {
            full_name: Some("  ".to_string()),
            ..PersonalProfile::default()
        };
        assert_eq!(profile.filled_count(), 0);
    }

    #[test]
    fn test_generates_five_items_from_full_profile() {
        let items = generate_items(&full_profile(), &mut rng());
        assert_eq!(items.len(), 5);

        // All items are distinct fields with complete phrasing
        let mut names: Vec<&str> = items.iter().map(|i| i.field_name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 5);
        for item in &items {
            assert!(!item.teach_text.is_empty());
            assert!(!item.question_text.is_empty());
            assert!(!item.expected_answer.is_empty());
            assert!(!item.hint_text.is_empty());
        }
    }

    #[test]
    fn test_phone_item_teaches_spelled_digits() {
        let profile = PersonalProfile {
            phone_number: Some("5558675309".to_string()),
            address_city: Some("Portland".to_string()),
            address_state: Some("Oregon".to_string()),
            job: Some("librarian".to_string()),
            favorite_food: Some("lasagna".to_string()),
            ..PersonalProfile::default()
        };
        let items = generate_items(&profile, &mut rng());
        let phone = items
            .iter()
            .find(|i| i.field_name == "phone_number")
            .unwrap();
        assert_eq!(
            phone.teach_text,
            "Your phone number is 5 5 5, 8 6 7, 5 3 0 9"
        );
        // The expected answer keeps the stored form for matching
        assert_eq!(phone.expected_answer, "5558675309");
    }

    #[test]
    fn test_birthday_formats_and_hints_on_month() {
        let profile = PersonalProfile {
            date_of_birth: NaiveDate::from_ymd_opt(1948, 1, 15),
            address_city: Some("Portland".to_string()),
            address_state: Some("Oregon".to_string()),
            job: Some("librarian".to_string()),
            favorite_food: Some("lasagna".to_string()),
            ..PersonalProfile::default()
        };
        let items = generate_items(&profile, &mut rng());
        let birthday = items
            .iter()
            .find(|i| i.field_name == "date_of_birth")
            .unwrap();
        assert_eq!(birthday.expected_answer, "January 15");
        assert_eq!(birthday.hint_text, "It starts with the letter J");
    }

    #[test]
    fn test_seeded_selection_is_reproducible() {
        let mut a = ChaCha8Rng::seed_from_u64(3);
        let mut b = ChaCha8Rng::seed_from_u64(3);
        let first = generate_items(&full_profile(), &mut a);
        let second = generate_items(&full_profile(), &mut b);
        let names = |items: &[InfoPrompt]| -> Vec<String> {
            items.iter().map(|i| i.field_name.clone()).collect()
        };
        assert_eq!(names(&first), names(&second));
    }
}
