use regex::Regex;
use std::sync::LazyLock;

use crate::extractor::{
    boilerplate::{RuleKind, TEXT_RULES},
    model::ExtractorConfig,
};

static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<a\b").unwrap());

pub fn link_count(markup: &str) -> usize {
    LINK.find_iter(markup).count()
}

/// More anchors than the configured allowance per hundred characters of text.
pub fn too_link_dense(markup: &str, text_len: usize, config: &ExtractorConfig) -> bool {
    let allowed = text_len as f64 / 100.0 * config.max_links_per_100_chars;
    link_count(markup) as f64 > allowed
}

/// Contact details or social prompts anywhere in a block.
pub fn is_noisy(text: &str) -> bool {
    TEXT_RULES
        .iter()
        .filter(|rule| matches!(rule.kind, RuleKind::Contact | RuleKind::SocialPrompt))
        .any(|rule| rule.matches(text))
}

pub fn meets_minimum(length: usize, config: &ExtractorConfig) -> bool {
    length >= config.min_article_chars
}
