//! Static lexical resources for answer matching
//!
//! Stop words, synonym groups, and relationship aliases used by the
//! normalizer, the evaluator, and the prompt generator. All tables are
//! loaded once and read-only for the process lifetime.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

// ============================================================================
// STOP WORDS
// ============================================================================

/// Function words removed before significant-word comparison.
///
/// Includes fillers common in transcribed speech ("um", "uh", "like")
/// so that a hesitant spoken answer still reduces to its content words.
pub static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // articles and determiners
        "a", "an", "the", "this", "that", "these", "those", "some", "any",
        // pronouns and possessives
        "i", "me", "my", "mine", "you", "your", "yours", "he", "him", "his",
        "she", "her", "hers", "it", "its", "we", "us", "our", "ours", "they",
        "them", "their", "theirs",
        // auxiliaries and copulas
        "am", "is", "are", "was", "were", "be", "been", "being", "do", "does",
        "did", "have", "has", "had", "will", "would", "can", "could", "should",
        // prepositions and conjunctions
        "at", "in", "on", "of", "to", "for", "with", "by", "from", "about",
        "and", "or", "but", "so", "as", "if", "than", "then",
        // common adverbs and qualifiers
        "very", "really", "just", "not", "no", "yes", "maybe", "also", "too",
        // spoken fillers
        "um", "uh", "er", "ah", "like", "well",
    ]
    .into_iter()
    .collect()
});

// ============================================================================
// SYNONYM GROUPS
// ============================================================================

/// Words treated as mutually interchangeable for scoring.
///
/// Two words are synonymous iff they co-occur in at least one group;
/// membership is symmetric and carries no transitivity across groups.
/// Groups cover the vocabulary patients actually use for personality,
/// interests, and places in recall answers.
pub static SYNONYM_GROUPS: Lazy<Vec<HashSet<&'static str>>> = Lazy::new(|| {
    [
        // personality
        &["friendly", "kind", "nice", "warm", "sweet", "caring", "gentle", "loving"][..],
        &["outgoing", "social", "extroverted", "sociable", "talkative", "bubbly"],
        &["funny", "humorous", "hilarious", "witty", "amusing", "silly"],
        &["smart", "intelligent", "clever", "bright", "brilliant", "wise"],
        &["happy", "cheerful", "joyful", "upbeat", "positive", "sunny"],
        &["quiet", "shy", "reserved", "introverted", "calm"],
        &["serious", "stern", "strict", "firm"],
        &["generous", "giving", "thoughtful", "considerate", "helpful"],
        &["strong", "tough", "brave", "courageous"],
        &["hardworking", "diligent", "dedicated", "driven"],
        // places and contexts
        &["work", "job", "office", "workplace"],
        &["home", "house", "apartment", "place"],
        &["church", "chapel", "temple", "service"],
        &["school", "college", "university", "class"],
        &["gym", "fitness", "exercise", "workout"],
        &["store", "shop", "market", "grocery"],
        &["neighborhood", "block", "street", "nearby"],
        // interests and activities
        &["cooking", "baking", "kitchen"],
        &["reading", "books", "novels"],
        &["hiking", "walking", "outdoors", "nature"],
        &["gardening", "garden", "plants", "flowers"],
        &["fishing", "hunting"],
        &["music", "singing", "songs"],
        &["painting", "drawing", "art", "crafts"],
        &["golf", "golfing"],
        &["travel", "traveling", "trips", "vacations"],
        &["movies", "films", "television", "tv"],
        &["sports", "games", "athletics"],
    ]
    .iter()
    .map(|group| group.iter().copied().collect())
    .collect()
});

// ============================================================================
// RELATIONSHIP ALIASES
// ============================================================================

/// Canonical relationship label -> spoken variants accepted as answers.
///
/// Consulted only at prompt-generation time to pre-populate a prompt's
/// acceptable answers; the evaluator never reads this table.
pub static RELATIONSHIP_ALIASES: Lazy<HashMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| {
        let entries: &[(&str, &[&str])] = &[
            ("child", &["son", "daughter", "kid", "my son", "my daughter", "my child"]),
            ("son", &["my son", "my boy", "boy"]),
            ("daughter", &["my daughter", "my girl", "girl"]),
            ("parent", &["mother", "father", "mom", "dad", "my mom", "my dad"]),
            ("mother", &["mom", "mommy", "mama", "my mom", "my mother"]),
            ("father", &["dad", "daddy", "papa", "my dad", "my father"]),
            ("sibling", &["brother", "sister", "my brother", "my sister"]),
            ("brother", &["my brother", "bro"]),
            ("sister", &["my sister", "sis"]),
            ("spouse", &["husband", "wife", "partner", "my husband", "my wife"]),
            ("husband", &["my husband", "hubby"]),
            ("wife", &["my wife"]),
            ("partner", &["my partner", "boyfriend", "girlfriend"]),
            ("grandchild", &["grandson", "granddaughter", "my grandson", "my granddaughter"]),
            ("grandson", &["my grandson"]),
            ("granddaughter", &["my granddaughter"]),
            ("grandparent", &["grandmother", "grandfather", "grandma", "grandpa"]),
            ("grandmother", &["grandma", "granny", "nana", "my grandma", "my grandmother"]),
            ("grandfather", &["grandpa", "granddad", "papa", "my grandpa", "my grandfather"]),
            ("aunt", &["my aunt", "auntie"]),
            ("uncle", &["my uncle"]),
            ("cousin", &["my cousin"]),
            ("niece", &["my niece"]),
            ("nephew", &["my nephew"]),
            ("friend", &["my friend", "buddy", "pal", "best friend", "good friend"]),
            ("neighbor", &["my neighbor", "neighbour", "my neighbour"]),
            ("caregiver", &["my caregiver", "helper", "aide", "my helper"]),
            ("nurse", &["my nurse"]),
            ("doctor", &["my doctor", "physician"]),
            ("therapist", &["my therapist", "speech therapist"]),
            ("coworker", &["colleague", "my coworker", "my colleague", "workmate"]),
        ];
        entries.iter().copied().collect()
    });

/// True when the word is filtered out before significant-word comparison.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word.trim().to_lowercase().as_str())
}

/// True when the two words co-occur in at least one synonym group.
///
/// Equal words are not considered synonyms; equality is handled by the
/// earlier cascade tiers.
pub fn are_synonyms(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() || a == b {
        return false;
    }
    SYNONYM_GROUPS
        .iter()
        .any(|group| group.contains(a.as_str()) && group.contains(b.as_str()))
}

/// Spoken variants for a canonical relationship label, if the label is known.
pub fn relationship_aliases(label: &str) -> Option<&'static [&'static str]> {
    RELATIONSHIP_ALIASES
        .get(label.trim().to_lowercase().as_str())
        .copied()
}
