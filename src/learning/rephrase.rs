use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;
use utoipa::ToSchema;

use crate::{
    ai::{FallbackReason, GenerationRequest, Outcome, extract_json, interpreter::str_field},
    learning::vocabulary::{split_sentences, truncate_chars, word_count},
};

pub const MAX_INPUT_CHARS: usize = 500;
/// Beginner sentences longer than this are cut at their first comma.
const LONG_SENTENCE_WORDS: usize = 15;

const REPHRASE_SYSTEM: &str = "You are an English language teacher showing students how one idea reads at different proficiency levels. Each level must be clearly different. Always respond with valid JSON only, no additional text.";

/// The same passage written for each level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RephrasedText {
    pub beginner: String,
    pub intermediate: String,
    pub advanced: String,
}

struct Substitution {
    pattern: Regex,
    replacement: &'static str,
}

fn table(pairs: &[(&str, &'static str)]) -> Vec<Substitution> {
    pairs
        .iter()
        .map(|(word, replacement)| Substitution {
            pattern: Regex::new(&format!(r"(?i)\b{word}\b")).unwrap(),
            replacement,
        })
        .collect()
}

static SIMPLER: LazyLock<Vec<Substitution>> = LazyLock::new(|| {
    table(&[
        ("comprehensive", "complete"),
        ("implement", "do"),
        ("significant", "important"),
        ("strategy", "plan"),
        ("develop", "make"),
        ("analyze", "look at"),
        ("establish", "make"),
        ("emphasize", "say"),
        ("facilitate", "help"),
        ("substantiate", "show"),
    ])
});

static RICHER: LazyLock<Vec<Substitution>> = LazyLock::new(|| {
    table(&[
        ("complete", "comprehensive"),
        ("do", "implement"),
        ("important", "significant"),
        ("plan", "strategy"),
        ("make", "develop"),
        ("look at", "analyze"),
        ("say", "emphasize"),
        ("help", "facilitate"),
        ("show", "substantiate"),
    ])
});

/// Applies each substitution in order, keeping a leading capital.
fn substitute(text: &str, rules: &[Substitution]) -> String {
    rules.iter().fold(text.to_string(), |acc, rule| {
        rule.pattern
            .replace_all(&acc, |caps: &Captures| {
                let matched = &caps[0];
                if matched.starts_with(char::is_uppercase) {
                    capitalize(rule.replacement)
                } else {
                    rule.replacement.to_string()
                }
            })
            .into_owned()
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Plainer words, and long sentences cut back to their first clause.
pub fn simplify(text: &str) -> String {
    let simpler = substitute(text, &SIMPLER);
    let shortened = split_sentences(&simpler)
        .into_iter()
        .map(|sentence| {
            if word_count(sentence) > LONG_SENTENCE_WORDS
                && let Some((head, _)) = sentence.split_once(", ")
            {
                format!("{head}.")
            } else {
                sentence.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    truncate_chars(&shortened, text.chars().count() + 50).to_string()
}

/// Academic vocabulary in place of everyday words.
pub fn enhance(text: &str) -> String {
    substitute(text, &RICHER)
}

/// Clips input to the length the exercise accepts.
pub fn clip(text: &str) -> &str {
    truncate_chars(text, MAX_INPUT_CHARS)
}

pub fn fallback(text: &str) -> RephrasedText {
    RephrasedText {
        beginner: simplify(text),
        intermediate: text.to_string(),
        advanced: enhance(text),
    }
}

pub fn prompt(text: &str) -> GenerationRequest {
    GenerationRequest::new(format!(
        "Rewrite the following text for three English proficiency levels.\n\n\
         Text: \"{text}\"\n\n\
         1. BEGINNER (A1-A2): common words, sentences of 8 to 12 words, simple present and past.\n\
         2. INTERMEDIATE (B1-B2): varied vocabulary, sentences of 15 to 20 words, linking words such as however and therefore.\n\
         3. ADVANCED (C1-C2): academic vocabulary, complex sentences of 20 to 35 words, subjunctive or inversion where natural.\n\n\
         Keep the meaning identical across levels and never copy the same text into two levels.\n\n\
         Reply with a JSON object:\n\
         {{\"beginner\": \"...\", \"intermediate\": \"...\", \"advanced\": \"...\"}}"
    ))
    .with_system(REPHRASE_SYSTEM)
}

/// Blank levels take the input text; three identical levels are replaced by
/// the substitution tables.
pub fn interpret(reply: &str, text: &str) -> Outcome<RephrasedText> {
    let value = match extract_json(reply) {
        Ok(value) => value,
        Err(err) => {
            debug!(error = %err, "rephrase reply unreadable");
            return Outcome::Fallback(fallback(text), FallbackReason::Unparseable);
        }
    };

    let level = |key: &str| str_field(&value, key).unwrap_or_else(|| text.to_string());
    let rephrased = RephrasedText {
        beginner: level("beginner"),
        intermediate: level("intermediate"),
        advanced: level("advanced"),
    };

    if rephrased.beginner == rephrased.intermediate && rephrased.intermediate == rephrased.advanced
    {
        return Outcome::Fallback(fallback(text), FallbackReason::InvalidShape("distinct levels"));
    }
    Outcome::Generated(rephrased)
}
