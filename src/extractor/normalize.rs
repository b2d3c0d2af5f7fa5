//! Markup-to-text conversion shared by every extraction pass.
//!
//! [`normalize`] is idempotent: feeding its output back in returns the same
//! string, provided the text holds no entity that decodes into markup.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap());
static STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").unwrap());
static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

static BLOCK_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(?:p|div|h[1-6]|li)\s*>|<br\b[^>]*>").unwrap()
});
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(nbsp|amp|lt|gt|quot|#39|apos|mdash|ndash|hellip);").unwrap()
});

static HORIZONTAL_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());
static PADDED_NEWLINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" ?\n ?").unwrap());
static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Converts an HTML fragment into plain text with paragraph breaks preserved.
pub fn normalize(html: &str) -> String {
    let html = SCRIPT.replace_all(html, " ");
    let html = STYLE.replace_all(&html, " ");
    let html = COMMENT.replace_all(&html, " ");

    let text = BLOCK_BREAK.replace_all(&html, "\n");
    let text = TAG.replace_all(&text, " ");
    let text = decode_entities(&text);

    collapse_whitespace(&text)
}

/// Decodes the small entity set news markup actually uses, in one pass so
/// that `&amp;lt;` becomes `&lt;` rather than `<`.
pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            match &caps[1] {
                "nbsp" => " ",
                "amp" => "&",
                "lt" => "<",
                "gt" => ">",
                "quot" => "\"",
                "#39" | "apos" => "'",
                "mdash" => "\u{2014}",
                "ndash" => "\u{2013}",
                _ => "...",
            }
        })
        .into_owned()
}

/// Collapses runs of spaces, trims around line breaks and caps blank runs at one empty line.
pub fn collapse_whitespace(text: &str) -> String {
    let text = HORIZONTAL_SPACE.replace_all(text, " ");
    let text = PADDED_NEWLINE.replace_all(&text, "\n");
    let text = BLANK_RUN.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Length in characters, which is what every extraction threshold counts.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
