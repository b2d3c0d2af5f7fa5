//! Detection of generic, content-free cultural descriptions.
//!
//! Generated text is rejected when it leans on stock phrases, or when it has
//! no concrete anchor (a year, a percentage, a named country, or an
//! institution or event) or too few real sentences.

use regex::Regex;
use std::sync::LazyLock;

/// Stock phrases that signal filler, matched case-insensitively as substrings,
/// so each entry also covers its longer variants.
pub const BANNED_PHRASES: [&str; 37] = [
    "this topic is important",
    "different cultures have different views",
    "different people have different views",
    "people have different opinions",
    "understanding the context helps",
    "it is important to understand",
    "cultural context is important",
    "cultural differences exist",
    "it depends on the culture",
    "people from different backgrounds",
    "plays an important role",
    "this is a complex issue",
    "there are many factors",
    "around the world people",
    "in today's world",
    "throughout history",
    "this article discusses",
    "many people believe",
    "different perspectives",
    "various perspectives",
    "different cultures",
    "various cultures",
    "many cultures",
    "different countries",
    "in many countries",
    "history and culture",
    "based on their",
    "the importance of",
    "this topic reflects",
    "understanding this helps",
    "understanding these differences",
    "helps interpret news",
    "shape how people view this topic",
    "different regions have",
    "cultural and historical differences",
    "important cultural and historical background",
    "different cultures and historical experiences",
];

pub const COUNTRIES: [&str; 70] = [
    "Afghanistan", "Africa", "America", "Argentina", "Asia", "Australia", "Bangladesh",
    "Brazil", "Britain", "Canada", "Chile", "China", "Colombia", "Cuba", "Egypt", "England",
    "Ethiopia", "Europe", "Fiji", "Finland", "France", "Germany", "Ghana", "Greece", "Hungary",
    "India", "Indonesia", "Iran", "Iraq", "Ireland", "Israel", "Italy", "Japan", "Kenya",
    "Lebanon", "Maldives", "Mexico", "Morocco", "Netherlands", "New Zealand", "Nigeria",
    "North Korea", "Norway", "Pakistan", "Palestine", "Peru", "Philippines", "Poland",
    "Portugal", "Qatar", "Russia", "Saudi Arabia", "Scotland", "Singapore", "South Africa",
    "South Korea", "Spain", "Sweden", "Switzerland", "Syria", "Taiwan", "Thailand", "Turkey",
    "Ukraine", "United Kingdom", "United States", "Venezuela", "Vietnam", "Wales", "Yemen",
];

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());
static PERCENTAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\d+(?:\.\d+)?\s?%|\bper\s?cent\b").unwrap());
static COUNTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\b(?:{})\b", COUNTRIES.join("|"))).unwrap());
static INSTITUTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:University|College|UN|NATO|EU|IPCC|UNESCO|WHO|OECD|IMF|FIFA|IOC|Summit|Agreement|Treaty|Protocol|Convention|Conference|Organization|Congress|Parliament|Court|Act|Olympics?)\b",
    )
    .unwrap()
});
static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    pub min_description_chars: usize,
    pub min_sentences: usize,
    /// Fragments this short do not count as sentences.
    pub min_sentence_chars: usize,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_description_chars: 200,
            min_sentences: 4,
            min_sentence_chars: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Specific,
    BannedPhrase(&'static str),
    NoConcreteDetail,
    TooFewSentences(usize),
}

impl Verdict {
    pub fn describe(&self) -> String {
        match self {
            Verdict::Specific => "specific".to_string(),
            Verdict::BannedPhrase(phrase) => format!("stock phrase \"{phrase}\""),
            Verdict::NoConcreteDetail => "no year, percentage, country or institution".to_string(),
            Verdict::TooFewSentences(found) => format!("only {found} substantial sentences"),
        }
    }
}

pub fn assess(description: &str, config: &GateConfig) -> Verdict {
    let lowered = description.to_lowercase();
    if let Some(phrase) = BANNED_PHRASES.iter().copied().find(|p| lowered.contains(p)) {
        return Verdict::BannedPhrase(phrase);
    }

    if !has_concrete_detail(description) {
        return Verdict::NoConcreteDetail;
    }

    let sentences = SENTENCE_END
        .split(description)
        .filter(|s| s.trim().chars().count() > config.min_sentence_chars)
        .count();
    if sentences < config.min_sentences {
        return Verdict::TooFewSentences(sentences);
    }

    Verdict::Specific
}

pub fn is_generic(description: &str, config: &GateConfig) -> bool {
    assess(description, config) != Verdict::Specific
}

pub fn has_concrete_detail(text: &str) -> bool {
    YEAR.is_match(text)
        || PERCENTAGE.is_match(text)
        || COUNTRY.is_match(text)
        || INSTITUTION.is_match(text)
}
