//! Feedback on a learner's written response to an article.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;
use utoipa::ToSchema;

use crate::{
    ai::{
        FallbackReason, GenerationRequest, Outcome, extract_json,
        interpreter::{str_field, str_list},
    },
    learning::{
        level::Level,
        vocabulary::{split_sentences, truncate_chars, word_count},
    },
};

const ARTICLE_EXCERPT_CHARS: usize = 500;
const LONG_SENTENCE_WORDS: usize = 25;
const SHORT_TEXT_WORDS: usize = 80;

static PASSIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:is|are|was|were|been|being)\s+\w+ed\b").unwrap());
static PLAIN_ADJECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:very|really|good|bad|nice)\b").unwrap());
static OVERUSED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:important|interesting|problem)\b").unwrap());

static DRAFT_UPGRADES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        ("very good", "excellent"),
        ("very important", "crucial"),
        ("I think", "I believe"),
        ("people", "individuals"),
        ("things", "aspects"),
    ]
    .into_iter()
    .map(|(phrase, upgrade)| (Regex::new(&format!(r"(?i)\b{phrase}\b")).unwrap(), upgrade))
    .collect()
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScoredAspect {
    /// 0 to 100.
    pub score: u8,
    pub comments: Vec<String>,
}

impl ScoredAspect {
    fn new(score: u8, comments: Vec<String>) -> Self {
        Self {
            score: score.min(100),
            comments,
        }
    }

    fn placeholder(score: u8, comment: &str) -> Self {
        Self::new(score, vec![comment.to_string()])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WritingFeedback {
    pub grammar: ScoredAspect,
    pub vocabulary: ScoredAspect,
    pub structure: ScoredAspect,
    pub suggestions: Vec<String>,
    pub improved: String,
}

/// A learner's text and what it responds to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WritingSubmission {
    pub text: String,
    pub article_title: Option<String>,
    pub article_content: Option<String>,
    pub level: Level,
    pub question: Option<String>,
}

fn pick(condition: bool, yes: &str, no: &str) -> String {
    if condition { yes } else { no }.to_string()
}

/// Rule-based feedback used when no provider is configured.
pub fn heuristic_feedback(text: &str) -> WritingFeedback {
    let sentences = split_sentences(text);
    let words = word_count(text);
    let long_sentences = sentences
        .iter()
        .filter(|s| word_count(s) > LONG_SENTENCE_WORDS)
        .count();
    let passives = PASSIVE.find_iter(text).count();

    let grammar = vec![
        pick(
            long_sentences > 0,
            "Several sentences are very long. Split them to make the text easier to read.",
            "Sentence length is comfortable to read.",
        ),
        pick(
            passives > 0,
            "The passive voice appears often. Try using more active sentences.",
            "Sentence structure reads naturally.",
        ),
        pick(
            words < SHORT_TEXT_WORDS,
            "The text is rather short. Add a little more supporting detail.",
            "The length is enough to develop your opinion well.",
        ),
    ];

    let vocabulary = vec![
        pick(
            PLAIN_ADJECTIVE.is_match(text),
            "Replace simple adjectives with more precise words.",
            "Word choice is fairly consistent.",
        ),
        pick(
            text.contains("I think"),
            "Vary \"I think\" with \"I believe\" or \"In my view\".",
            "Opinion phrases are used appropriately.",
        ),
        pick(
            OVERUSED.is_match(text),
            "Consider synonyms such as \"critical\", \"noteworthy\" or \"challenge\".",
            "The vocabulary is varied.",
        ),
    ];

    let structure = vec![
        pick(
            sentences.len() >= 3,
            "Make the introduction, body and conclusion more clearly separate.",
            "There are too few paragraphs. Aim for at least three.",
        ),
        pick(
            text.contains("because") || text.contains("therefore"),
            "Linking words connect reasons and results well.",
            "Adding linking words that explain your reasoning will make the text more persuasive.",
        ),
        pick(
            text.trim().ends_with('.'),
            "The closing sentence is clear.",
            "Finish the text with a complete sentence.",
        ),
    ];

    let suggestions = vec![
        pick(
            text.contains("I think"),
            "I think → I believe / From my perspective",
            "Use connectors such as \"Furthermore\" or \"Moreover\" between sentences.",
        ),
        pick(
            long_sentences > 0,
            "Split long sentences into two or more shorter ones.",
            "Add a concrete example to support your main point.",
        ),
        pick(
            passives > 0,
            "Active voice makes the writing more lively than the passive.",
            "Use adjectives or adverbs to emphasise feelings or opinions.",
        ),
    ];

    let grammar_score = 100usize
        .saturating_sub(long_sentences * 5 + passives * 3)
        .max(60);
    let structure_score = (60 + sentences.len() * 5).min(85);

    WritingFeedback {
        grammar: ScoredAspect::new(grammar_score as u8, grammar),
        vocabulary: ScoredAspect::new(80, vocabulary),
        structure: ScoredAspect::new(structure_score as u8, structure),
        suggestions,
        improved: improved_draft(text),
    }
}

/// The text with a few stock upgrades applied and a closing full stop.
pub fn improved_draft(text: &str) -> String {
    let improved = DRAFT_UPGRADES
        .iter()
        .fold(text.to_string(), |acc, (pattern, upgrade)| {
            pattern.replace_all(&acc, *upgrade).into_owned()
        });
    if improved.ends_with('.') {
        improved
    } else {
        format!("{}.", improved.trim())
    }
}

/// Neutral scores served when the provider fails mid-request.
pub fn error_feedback(text: &str) -> WritingFeedback {
    WritingFeedback {
        grammar: ScoredAspect::placeholder(75, "Error processing"),
        vocabulary: ScoredAspect::placeholder(80, "Error processing"),
        structure: ScoredAspect::placeholder(70, "Error processing"),
        suggestions: Vec::new(),
        improved: text.to_string(),
    }
}

pub fn prompt(submission: &WritingSubmission) -> GenerationRequest {
    let level = submission.level;
    let guidance = match level {
        Level::Beginner => {
            "Focus on basic grammar, simple vocabulary and clear sentence structure. Be encouraging and keep explanations simple."
        }
        Level::Intermediate => {
            "Evaluate grammar accuracy, vocabulary variety and logical structure. Give constructive feedback for improvement."
        }
        Level::Advanced => {
            "Assess sophisticated grammar, nuanced vocabulary and complex sentence structures. Give detailed, professional feedback."
        }
    };

    let mut context = String::new();
    if let (Some(title), Some(content)) = (&submission.article_title, &submission.article_content) {
        context.push_str(&format!(
            "\n\nThis writing responds to a news article.\nTitle: {title}\nContent: {}",
            truncate_chars(content, ARTICLE_EXCERPT_CHARS)
        ));
    }
    match &submission.question {
        Some(question) => context.push_str(&format!(
            "\n\nQuestion: {question}\n\nEvaluate how well the writing answers the question."
        )),
        None if !context.is_empty() => {
            context.push_str("\n\nEvaluate how well the writing addresses the article's themes.")
        }
        None => {}
    }

    GenerationRequest::new(format!(
        "Give detailed feedback on this {level}-level English writing. {guidance}\n\n\
         {text}{context}\n\n\
         Provide:\n\
         1. Grammar: a score from 0 to 100 and 3 comments.\n\
         2. Vocabulary: a score from 0 to 100 and 3 comments.\n\
         3. Structure: a score from 0 to 100 and 3 comments.\n\
         4. Three specific suggestions in the form \"original → improved\".\n\
         5. An improved version of the text.\n\n\
         Reply with a JSON object:\n\
         {{\"grammar\": {{\"score\": 0, \"comments\": []}}, \"vocabulary\": {{\"score\": 0, \"comments\": []}}, \
         \"structure\": {{\"score\": 0, \"comments\": []}}, \"suggestions\": [], \"improved\": \"...\"}}",
        text = submission.text,
    ))
    .with_system(format!(
        "You are an English writing tutor specialising in {level}-level instruction. Give constructive, level-appropriate feedback. Always respond with valid JSON only, no additional text."
    ))
}

fn aspect(value: &Value, key: &str, default_score: u8) -> ScoredAspect {
    let Some(section) = value.get(key).filter(|v| v.is_object()) else {
        return ScoredAspect::placeholder(default_score, "No feedback available");
    };
    let score = section
        .get("score")
        .and_then(Value::as_f64)
        .map(|s| s.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(default_score);
    let mut comments = str_list(section, "comments");
    if comments.is_empty() {
        comments.push("No feedback available".to_string());
    }
    ScoredAspect::new(score, comments)
}

pub fn interpret(reply: &str, text: &str) -> Outcome<WritingFeedback> {
    let value = match extract_json(reply) {
        Ok(value) if value.is_object() => value,
        Ok(_) => {
            return Outcome::Fallback(error_feedback(text), FallbackReason::InvalidShape("feedback"));
        }
        Err(err) => {
            debug!(error = %err, "writing feedback reply unreadable");
            return Outcome::Fallback(error_feedback(text), FallbackReason::Unparseable);
        }
    };

    Outcome::Generated(WritingFeedback {
        grammar: aspect(&value, "grammar", 75),
        vocabulary: aspect(&value, "vocabulary", 80),
        structure: aspect(&value, "structure", 70),
        suggestions: str_list(&value, "suggestions"),
        improved: str_field(&value, "improved").unwrap_or_else(|| text.to_string()),
    })
}
