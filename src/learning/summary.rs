use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::{
    ai::{
        FallbackReason, GenerationRequest, Outcome, extract_json,
        interpreter::{str_field, str_list},
    },
    learning::{
        level::Level,
        prompts::{TUTOR_SYSTEM, learner_brief},
        vocabulary::truncate_chars,
    },
};

pub const MAX_KEYWORDS: usize = 5;
pub const MAX_GRAMMAR_POINTS: usize = 3;
/// Article text beyond this is not sent to the provider.
pub const MAX_CONTENT_CHARS: usize = 3000;
const FALLBACK_SUMMARY_CHARS: usize = 200;

/// A level-adapted summary with study material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsSummary {
    pub summary: String,
    pub keywords: Vec<String>,
    pub grammar_points: Vec<String>,
}

impl NewsSummary {
    /// The article's opening plus the level's default study lists.
    pub fn fallback(content: &str, level: Level) -> Self {
        Self {
            summary: opening(content),
            keywords: default_keywords(level),
            grammar_points: default_grammar_points(level),
        }
    }
}

pub fn default_keywords(level: Level) -> Vec<String> {
    let words: [&str; MAX_KEYWORDS] = match level {
        Level::Beginner => ["important", "people", "country", "change", "help"],
        Level::Intermediate => ["significant", "analysis", "strategy", "impact", "develop"],
        Level::Advanced => ["substantiate", "comprehensive", "facilitate", "paradigm", "nuanced"],
    };
    words.iter().map(|w| w.to_string()).collect()
}

pub fn default_grammar_points(level: Level) -> Vec<String> {
    let points: [&str; MAX_GRAMMAR_POINTS] = match level {
        Level::Beginner => ["Simple present tense", "Basic past tense", "Simple questions"],
        Level::Intermediate => [
            "Present perfect tense",
            "Passive voice",
            "Conditional sentences",
        ],
        Level::Advanced => [
            "Subjunctive mood",
            "Inverted conditionals",
            "Complex noun phrases",
        ],
    };
    points.iter().map(|p| p.to_string()).collect()
}

fn opening(content: &str) -> String {
    let trimmed = content.trim();
    let head = truncate_chars(trimmed, FALLBACK_SUMMARY_CHARS);
    if head.len() < trimmed.len() {
        format!("{head}...")
    } else {
        head.to_string()
    }
}

pub fn prompt(title: &str, content: &str, level: Level) -> GenerationRequest {
    let content = truncate_chars(content, MAX_CONTENT_CHARS);
    GenerationRequest::new(format!(
        "{brief}\n\n\
         Summarize this news article for the learner and pick study material from it.\n\n\
         Title: {title}\n\
         Article:\n{content}\n\n\
         Reply with a JSON object:\n\
         {{\"summary\": \"3-5 sentences at the learner's level\", \
         \"keywords\": [\"up to {MAX_KEYWORDS} useful words from the article\"], \
         \"grammarPoints\": [\"up to {MAX_GRAMMAR_POINTS} grammar structures the article uses\"]}}",
        brief = learner_brief(level),
    ))
    .with_system(TUTOR_SYSTEM)
}

/// Validates a provider reply field by field; missing parts take level defaults.
pub fn interpret(reply: &str, content: &str, level: Level) -> Outcome<NewsSummary> {
    let value = match extract_json(reply) {
        Ok(value) => value,
        Err(err) => {
            debug!(error = %err, "summary reply unreadable");
            return Outcome::Fallback(NewsSummary::fallback(content, level), FallbackReason::Unparseable);
        }
    };

    let Some(summary) = str_field(&value, "summary") else {
        return Outcome::Fallback(
            NewsSummary::fallback(content, level),
            FallbackReason::InvalidShape("summary"),
        );
    };

    let mut keywords = str_list(&value, "keywords");
    if keywords.is_empty() {
        keywords = default_keywords(level);
    }
    keywords.truncate(MAX_KEYWORDS);

    let mut grammar_points = str_list(&value, "grammarPoints");
    if grammar_points.is_empty() {
        grammar_points = default_grammar_points(level);
    }
    grammar_points.truncate(MAX_GRAMMAR_POINTS);

    Outcome::Generated(NewsSummary {
        summary,
        keywords,
        grammar_points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = "City officials approved a new bike lane network on Tuesday.";

    #[test]
    fn complete_reply_is_generated() {
        let reply = r#"{"summary": "The city will build bike lanes.", "keywords": ["approve", "network"], "grammarPoints": ["Passive voice"]}"#;
        let outcome = interpret(reply, CONTENT, Level::Intermediate);
        assert!(!outcome.is_fallback());
        let summary = outcome.into_inner();
        assert_eq!(summary.keywords, vec!["approve", "network"]);
        assert_eq!(summary.grammar_points, vec!["Passive voice"]);
    }

    #[test]
    fn long_lists_are_capped() {
        let reply = r#"{"summary": "S", "keywords": ["a","b","c","d","e","f","g"], "grammarPoints": ["1","2","3","4"]}"#;
        let summary = interpret(reply, CONTENT, Level::Beginner).into_inner();
        assert_eq!(summary.keywords.len(), MAX_KEYWORDS);
        assert_eq!(summary.grammar_points.len(), MAX_GRAMMAR_POINTS);
    }

    #[test]
    fn missing_lists_use_level_defaults() {
        let reply = r#"{"summary": "Short summary.", "keywords": "not a list"}"#;
        let summary = interpret(reply, CONTENT, Level::Advanced).into_inner();
        assert_eq!(summary.keywords, default_keywords(Level::Advanced));
        assert_eq!(summary.grammar_points, default_grammar_points(Level::Advanced));
    }

    #[test]
    fn unreadable_reply_falls_back_to_opening() {
        let long = "word ".repeat(100);
        let outcome = interpret("Sorry, I can't do that.", &long, Level::Beginner);
        assert_eq!(outcome.reason(), Some(&FallbackReason::Unparseable));
        let summary = outcome.into_inner();
        assert!(summary.summary.ends_with("..."));
        assert_eq!(summary.summary.chars().count(), FALLBACK_SUMMARY_CHARS + 3);
        assert_eq!(summary.keywords[0], "important");
    }

    #[test]
    fn missing_summary_is_invalid_shape() {
        let outcome = interpret(r#"{"keywords": ["x"]}"#, CONTENT, Level::Intermediate);
        assert_eq!(outcome.reason(), Some(&FallbackReason::InvalidShape("summary")));
        assert_eq!(outcome.value().summary, CONTENT);
    }

    #[test]
    fn prompt_truncates_long_articles() {
        let content = "x".repeat(MAX_CONTENT_CHARS + 500);
        let request = prompt("Title", &content, Level::Intermediate);
        assert!(!request.prompt.contains(&"x".repeat(MAX_CONTENT_CHARS + 1)));
        assert!(request.prompt.contains("grammarPoints"));
        assert!(request.system_instruction.is_some());
    }
}
