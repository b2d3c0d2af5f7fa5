use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;
use utoipa::ToSchema;

use crate::{
    ai::{
        FallbackReason, GenerationRequest, Outcome, extract_json,
        interpreter::{str_field, str_list},
    },
    learning::{
        gate::{BANNED_PHRASES, COUNTRIES, GateConfig, Verdict, assess},
        level::Level,
        prompts::{TUTOR_SYSTEM, learner_brief},
        topics::Topic,
        vocabulary::truncate_chars,
    },
};

pub const MAX_EXAMPLES: usize = 5;
const MAX_DETAILS: usize = 5;
const PROMPT_CONTENT_CHARS: usize = 2000;

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());
static FIGURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d+(?:[.,]\d+)?\s?(?:%|percent\b|per cent\b|million\b|billion\b)").unwrap()
});
static ORGANIZATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:[A-Z]{2,6}|(?:[A-Z][a-z]+ )+(?:University|Agreement|Summit|Council|Ministry|Bank|Organization|Association|Commission|Court|Party))\b",
    )
    .unwrap()
});
static PROPER_NOUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").unwrap());

/// Capitalised words that are not names.
const NOT_ENTITIES: [&str; 16] = [
    "The", "This", "That", "These", "Those", "There", "However", "Monday", "Tuesday",
    "Wednesday", "Thursday", "Friday", "Saturday", "Sunday", "January", "December",
];

/// Background explaining the setting of an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CulturalContext {
    pub title: String,
    pub description: String,
    pub examples: Vec<String>,
}

/// Concrete facts pulled from an article to anchor prompts and fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleDetails {
    pub years: Vec<String>,
    pub countries: Vec<String>,
    pub organizations: Vec<String>,
    pub figures: Vec<String>,
    pub entities: Vec<String>,
}

fn push_unique(list: &mut Vec<String>, item: &str) {
    if list.len() < MAX_DETAILS && !list.iter().any(|seen| seen == item) {
        list.push(item.to_string());
    }
}

impl ArticleDetails {
    pub fn extract(title: &str, content: &str) -> Self {
        let text = format!("{title}. {content}");
        let mut details = Self::default();

        for m in YEAR.find_iter(&text) {
            push_unique(&mut details.years, m.as_str());
        }
        for country in COUNTRIES.iter().filter(|c| text.contains(*c)) {
            push_unique(&mut details.countries, country);
        }
        for m in ORGANIZATION.find_iter(&text) {
            push_unique(&mut details.organizations, m.as_str());
        }
        for m in FIGURE.find_iter(&text) {
            push_unique(&mut details.figures, m.as_str());
        }
        for m in PROPER_NOUN.find_iter(&text) {
            let name = m.as_str();
            let opens_sentence = text[..m.start()].trim_end().is_empty()
                || text[..m.start()].trim_end().ends_with(['.', '!', '?']);
            if opens_sentence && !name.contains(' ') {
                continue;
            }
            if name.len() > 3
                && !NOT_ENTITIES.contains(&name)
                && !COUNTRIES.contains(&name)
                && !details.organizations.iter().any(|org| org.contains(name))
            {
                push_unique(&mut details.entities, name);
            }
        }
        details
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
            && self.countries.is_empty()
            && self.organizations.is_empty()
            && self.figures.is_empty()
            && self.entities.is_empty()
    }

    /// One line per non-empty category, for prompts.
    pub fn summary_lines(&self) -> String {
        [
            ("Dates", &self.years),
            ("Places", &self.countries),
            ("Institutions", &self.organizations),
            ("Figures", &self.figures),
            ("Names", &self.entities),
        ]
        .iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(label, items)| format!("- {label}: {}", items.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
    }

    /// A closing sentence tying the background to this article.
    fn anchor(&self, level: Level) -> Option<String> {
        let subjects: Vec<&str> = self
            .entities
            .iter()
            .chain(self.countries.iter())
            .map(String::as_str)
            .take(3)
            .collect();
        let who = join_natural(&subjects);
        let year = self.years.first();

        let sentence = match (level, who.is_empty(), year) {
            (_, true, None) => return None,
            (Level::Beginner, false, Some(y)) => {
                format!("This article is about {who}. It talks about the year {y}.")
            }
            (Level::Beginner, false, None) => format!("This article is about {who}."),
            (Level::Beginner, true, Some(y)) => format!("This article talks about the year {y}."),
            (Level::Intermediate, false, Some(y)) => format!(
                "The article links these themes to {who}, with {y} as a key date."
            ),
            (Level::Intermediate, false, None) => {
                format!("The article links these themes to {who}.")
            }
            (Level::Intermediate, true, Some(y)) => {
                format!("The article places these themes in {y}.")
            }
            (Level::Advanced, false, Some(y)) => format!(
                "The reporting situates {who} within this longer trajectory, taking {y} as a reference point."
            ),
            (Level::Advanced, false, None) => {
                format!("The reporting situates {who} within this longer trajectory.")
            }
            (Level::Advanced, true, Some(y)) => {
                format!("The reporting anchors this trajectory in {y}.")
            }
        };
        Some(sentence)
    }
}

fn join_natural(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [one] => one.to_string(),
        [rest @ .., last] => format!("{} and {last}", rest.join(", ")),
    }
}

/// Themes the article touches on, from cue words in its text.
pub fn cultural_examples(content: &str) -> Vec<String> {
    const CUES: [(&str, &str); 8] = [
        ("tradition", "Traditional practices and customs"),
        ("festival", "Festivals and public celebrations"),
        ("family", "Family life and relationships"),
        ("religio", "Religious beliefs and institutions"),
        ("community", "Local community life"),
        ("government", "The role of government in daily life"),
        ("school", "Education and schooling"),
        ("food", "Food culture and cuisine"),
    ];
    let lowered = content.to_lowercase();
    let mut examples: Vec<String> = CUES
        .iter()
        .filter(|(cue, _)| lowered.contains(cue))
        .map(|(_, example)| example.to_string())
        .take(MAX_EXAMPLES)
        .collect();

    if examples.is_empty() {
        examples = ["Global perspective", "Cultural awareness", "Societal impact"]
            .iter()
            .map(|e| e.to_string())
            .collect();
    }
    examples
}

/// Topic background plus an article-specific closing sentence.
pub fn fallback(title: &str, content: &str, level: Level) -> CulturalContext {
    let topic = Topic::detect(title, content);
    let details = ArticleDetails::extract(title, content);
    CulturalContext {
        title: topic.label().to_string(),
        description: fallback_description(topic, &details, level),
        examples: cultural_examples(content),
    }
}

fn fallback_description(topic: Topic, details: &ArticleDetails, level: Level) -> String {
    let background = topic.background(level);
    match details.anchor(level) {
        Some(anchor) if !contains_banned(&anchor) => format!("{background} {anchor}"),
        _ => background.to_string(),
    }
}

fn contains_banned(text: &str) -> bool {
    let lowered = text.to_lowercase();
    BANNED_PHRASES.iter().any(|p| lowered.contains(p))
}

pub fn prompt(title: &str, content: &str, level: Level) -> GenerationRequest {
    let topic = Topic::detect(title, content);
    let details = ArticleDetails::extract(title, content);
    let facts = if details.is_empty() {
        "- No specific dates or names were found; draw on well-known facts about the topic."
            .to_string()
    } else {
        details.summary_lines()
    };
    let avoid = BANNED_PHRASES[..6]
        .iter()
        .map(|p| format!("\"{p}\""))
        .collect::<Vec<_>>()
        .join(", ");

    GenerationRequest::new(format!(
        "{brief}\n\n\
         Explain the cultural and historical background a learner needs to understand this article.\n\n\
         Title: {title}\n\
         Main topic: {topic}\n\
         Facts found in the article:\n{facts}\n\n\
         Article:\n{content}\n\n\
         Requirements:\n\
         - The description must have at least 5 sentences and mention specific dates, places, institutions or events.\n\
         - Connect the background directly to the people and places in this article.\n\
         - Never use vague filler such as {avoid}.\n\n\
         Reply with a JSON object:\n\
         {{\"title\": \"short heading\", \"description\": \"the background\", \"examples\": [\"up to {MAX_EXAMPLES} related cultural points\"]}}",
        brief = learner_brief(level),
        topic = topic.label(),
        content = truncate_chars(content, PROMPT_CONTENT_CHARS),
    ))
    .with_system(TUTOR_SYSTEM)
}

/// Accepts a generated description only if it clears the quality gate;
/// otherwise the topic background replaces it.
pub fn interpret(
    reply: &str,
    title: &str,
    content: &str,
    level: Level,
    gate: &GateConfig,
) -> Outcome<CulturalContext> {
    let value = match extract_json(reply) {
        Ok(value) => value,
        Err(err) => {
            debug!(error = %err, "cultural reply unreadable");
            return Outcome::Fallback(fallback(title, content, level), FallbackReason::Unparseable);
        }
    };

    let Some(description) = str_field(&value, "description") else {
        return Outcome::Fallback(
            fallback(title, content, level),
            FallbackReason::InvalidShape("description"),
        );
    };

    let mut examples = str_list(&value, "examples");
    if examples.is_empty() {
        examples = cultural_examples(content);
    }
    examples.truncate(MAX_EXAMPLES);
    let heading = str_field(&value, "title")
        .unwrap_or_else(|| Topic::detect(title, content).label().to_string());

    let rejection = if description.chars().count() < gate.min_description_chars {
        Some(format!(
            "shorter than {} characters",
            gate.min_description_chars
        ))
    } else {
        match assess(&description, gate) {
            Verdict::Specific => None,
            verdict => Some(verdict.describe()),
        }
    };

    match rejection {
        None => Outcome::Generated(CulturalContext {
            title: heading,
            description,
            examples,
        }),
        Some(why) => {
            debug!(reason = %why, "generated cultural description rejected");
            let topic = Topic::detect(title, content);
            let details = ArticleDetails::extract(title, content);
            Outcome::Fallback(
                CulturalContext {
                    title: heading,
                    description: fallback_description(topic, &details, level),
                    examples,
                },
                FallbackReason::Generic(why),
            )
        }
    }
}
