use regex::Regex;
use std::sync::LazyLock;

use crate::{
    ai::{FallbackReason, GenerationRequest, Outcome},
    learning::{level::Level, vocabulary::truncate_chars},
};

const ARTICLE_EXCERPT_CHARS: usize = 2000;

static LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:question|q)\s*:\s*").unwrap());

pub fn fallback(level: Level) -> String {
    match level {
        Level::Beginner => {
            "What do you think about this news? Write your opinion in simple English."
        }
        Level::Intermediate => {
            "What is your opinion on this article? Please provide your analysis and thoughts."
        }
        Level::Advanced => {
            "Analyze this article and provide your critical perspective on the topic. Discuss the implications and your viewpoint."
        }
    }
    .to_string()
}

pub fn prompt(title: &str, content: &str, level: Level) -> GenerationRequest {
    let instructions = match level {
        Level::Beginner => {
            "Use simple, everyday words and keep the question to 10-15 words. Ask for a personal opinion or a simple fact, answerable in 50-100 words."
        }
        Level::Intermediate => {
            "Use clear language with some academic words such as opinion, impact or perspective, in 15-25 words. Ask for an opinion with reasons and examples, answerable in 100-150 words."
        }
        Level::Advanced => {
            "Use sophisticated vocabulary such as implications or critically evaluate, in 20-30 words. Ask for critical analysis of the wider implications, answerable in 150-200 words."
        }
    };

    GenerationRequest::new(format!(
        "Based on this news article, write one thought-provoking question that asks a {level}-level student to give their opinion or analysis in writing.\n\n\
         {instructions}\n\n\
         Title: {title}\n\
         Article:\n{content}\n\n\
         The question must be about the article's main topic and open-ended. Return only the question text.",
        content = truncate_chars(content, ARTICLE_EXCERPT_CHARS),
    ))
    .with_system(
        "You are an English language teacher creating writing prompts for students. Always respond with a clear, direct question only.",
    )
}

/// The reply with any `Question:` or `Q:` label removed.
pub fn interpret(reply: &str, level: Level) -> Outcome<String> {
    let question = LABEL.replace(reply.trim(), "");
    let question = question.trim().trim_matches('"').trim();
    if question.is_empty() {
        Outcome::Fallback(fallback(level), FallbackReason::InvalidShape("question"))
    } else {
        Outcome::Generated(question.to_string())
    }
}
