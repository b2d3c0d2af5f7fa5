use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::{
    ai::{
        FallbackReason, GenerationRequest, Outcome, extract_json, interpreter::str_field,
    },
    learning::{
        level::Level,
        prompts::learner_brief,
        summary::MAX_CONTENT_CHARS,
        vocabulary::{frequent_words, truncate_chars},
    },
};

pub const OPTION_COUNT: usize = 4;
pub const MAX_QUESTIONS: usize = 10;
/// Questions requested from the provider and built by the fallback.
pub const QUIZ_LENGTH: usize = 5;

const QUIZ_SYSTEM: &str = "You are an English language teacher creating vocabulary quizzes from news articles. Always respond with a valid JSON array only, no additional text.";

const DISTRACTORS: [&str; 3] = [
    "It is the name of the news agency that published the story",
    "It is a word the article does not use",
    "It only appears in an advertisement next to the article",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: String,
    pub word: String,
}

pub fn prompt(title: &str, content: &str, keywords: &[String], level: Level) -> GenerationRequest {
    let vocabulary = if keywords.is_empty() {
        String::new()
    } else {
        format!("Key vocabulary from the article: {}\n", keywords.join(", "))
    };

    GenerationRequest::new(format!(
        "{brief}\n\n\
         Create {QUIZ_LENGTH} fill-in-the-blank vocabulary questions that test specific words and phrases from this article.\n\n\
         Title: {title}\n\
         Article:\n{content}\n\
         {vocabulary}\n\
         Requirements:\n\
         - Every question uses a sentence from, or closely based on, the article.\n\
         - Give exactly {OPTION_COUNT} options: one correct answer from the article and three plausible but clearly wrong distractors.\n\
         - Vary the position of the correct answer (0, 1, 2 or 3) across questions.\n\
         - The explanation refers back to the article.\n\n\
         Reply with a JSON array:\n\
         [{{\"question\": \"... _____ ...\", \"options\": [\"a\", \"b\", \"c\", \"d\"], \"correctAnswer\": 2, \
         \"explanation\": \"...\", \"word\": \"the word or phrase tested\"}}]",
        brief = learner_brief(level),
        content = truncate_chars(content, MAX_CONTENT_CHARS),
    ))
    .with_system(QUIZ_SYSTEM)
}

/// Keeps the well-formed questions of a reply; with none left the keyword quiz is served.
pub fn interpret(
    reply: &str,
    content: &str,
    keywords: &[String],
) -> Outcome<Vec<QuizQuestion>> {
    let value = match extract_json(reply) {
        Ok(value) => value,
        Err(err) => {
            debug!(error = %err, "quiz reply unreadable");
            return Outcome::Fallback(keyword_quiz(content, keywords), FallbackReason::Unparseable);
        }
    };

    let items: &[Value] = match &value {
        Value::Array(items) => items.as_slice(),
        Value::Object(_) => value
            .get("questions")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default(),
        _ => &[],
    };

    let mut questions: Vec<QuizQuestion> = items
        .iter()
        .filter_map(validate)
        .take(MAX_QUESTIONS)
        .collect();
    if questions.is_empty() {
        return Outcome::Fallback(
            keyword_quiz(content, keywords),
            FallbackReason::InvalidShape("questions"),
        );
    }

    if rebalance(&mut questions) {
        warn!(count = questions.len(), "every correct answer shared one slot; rebalanced");
    }
    assign_ids(&mut questions);
    Outcome::Generated(questions)
}

fn validate(item: &Value) -> Option<QuizQuestion> {
    let question = str_field(item, "question")?;
    let options: Vec<String> = item
        .get("options")?
        .as_array()?
        .iter()
        .map(|opt| opt.as_str().map(str::trim).filter(|s| !s.is_empty()))
        .collect::<Option<Vec<_>>>()?
        .into_iter()
        .map(str::to_string)
        .collect();
    if options.len() != OPTION_COUNT {
        return None;
    }

    let correct_answer = match item.get("correctAnswer")? {
        Value::Number(n) => n.as_u64()? as usize,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    if correct_answer >= OPTION_COUNT {
        return None;
    }

    let explanation =
        str_field(item, "explanation").unwrap_or_else(|| "No explanation available".to_string());
    let word = str_field(item, "word").unwrap_or_else(|| {
        question
            .split(|c: char| !c.is_alphanumeric())
            .find(|w| !w.is_empty())
            .unwrap_or("vocabulary")
            .to_string()
    });

    Some(QuizQuestion {
        id: String::new(),
        question,
        options,
        correct_answer,
        explanation,
        word,
    })
}

/// Moves each correct option to slot `index % 4` when all answers share one slot.
/// Returns whether anything moved.
pub fn rebalance(questions: &mut [QuizQuestion]) -> bool {
    let Some(first) = questions.first().map(|q| q.correct_answer) else {
        return false;
    };
    if questions.len() < 2 || questions.iter().any(|q| q.correct_answer != first) {
        return false;
    }

    for (idx, question) in questions.iter_mut().enumerate() {
        let answer = question.options.remove(question.correct_answer);
        let slot = idx % OPTION_COUNT;
        question.options.insert(slot, answer);
        question.correct_answer = slot;
    }
    true
}

fn assign_ids(questions: &mut [QuizQuestion]) {
    for (idx, question) in questions.iter_mut().enumerate() {
        question.id = format!("quiz-{}", idx + 1);
    }
}

/// One recognition question per keyword, or a single main-topic question when
/// the article offers no usable words.
pub fn keyword_quiz(content: &str, keywords: &[String]) -> Vec<QuizQuestion> {
    let words: Vec<String> = if keywords.is_empty() {
        frequent_words(content, 4, QUIZ_LENGTH)
    } else {
        keywords
            .iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .take(QUIZ_LENGTH)
            .collect()
    };

    let mut questions: Vec<QuizQuestion> = if words.is_empty() {
        vec![main_topic_question()]
    } else {
        words
            .into_iter()
            .enumerate()
            .map(|(idx, word)| {
                let slot = idx % OPTION_COUNT;
                let mut options: Vec<String> = DISTRACTORS.iter().map(|d| d.to_string()).collect();
                options.insert(slot, format!("\"{word}\" is a key term used in this article"));
                QuizQuestion {
                    id: String::new(),
                    question: format!("What does \"{word}\" mean in this article?"),
                    options,
                    correct_answer: slot,
                    explanation: format!("\"{word}\" is a key term in this article."),
                    word,
                }
            })
            .collect()
    };
    assign_ids(&mut questions);
    questions
}

fn main_topic_question() -> QuizQuestion {
    QuizQuestion {
        id: String::new(),
        question: "Based on the article, what is the main topic?".to_string(),
        options: [
            "The article discusses current events",
            "The article covers important news",
            "The article reports on recent developments",
            "The article presents new information",
        ]
        .iter()
        .map(|o| o.to_string())
        .collect(),
        correct_answer: 0,
        explanation: "This is a fallback question. Please check the article content.".to_string(),
        word: "article".to_string(),
    }
}
