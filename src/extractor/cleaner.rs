use regex::Regex;
use std::sync::LazyLock;

use crate::extractor::{boilerplate, normalize::collapse_whitespace};

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.?!])\s+([A-Z][a-z])").unwrap());
static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());

/// Final pass over a chosen candidate: strip boilerplate spans, then lay the
/// text out as blank-line separated paragraphs.
pub fn finalize(text: &str) -> String {
    let stripped = boilerplate::strip_text(text);
    let collapsed = collapse_whitespace(&stripped);
    let reflowed = SENTENCE_BREAK.replace_all(&collapsed, "$1\n\n$2");
    let spaced = LINE_BREAKS.replace_all(&reflowed, "\n\n");
    collapse_whitespace(&spaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentences_become_paragraphs() {
        let text = "The vote passed. Lawmakers cheered!  Was it enough? Nobody knows.";
        assert_eq!(
            finalize(text),
            "The vote passed.\n\nLawmakers cheered!\n\nWas it enough?\n\nNobody knows."
        );
    }

    #[test]
    fn abbreviations_before_digits_stay_inline() {
        assert_eq!(finalize("It rose 2.5 percent. Not bad."), "It rose 2.5 percent.\n\nNot bad.");
    }

    #[test]
    fn boilerplate_spans_are_removed_before_layout() {
        let text = "Published 9:00 AM\nCrews restored power overnight. Call 555-010-9999 for help.";
        let cleaned = finalize(text);
        assert!(cleaned.starts_with("Crews restored power overnight."));
        assert!(!cleaned.contains("555"));
        assert!(!cleaned.contains("\n\n\n"));
    }

    #[test]
    fn contact_only_text_cleans_to_nothing() {
        assert_eq!(finalize("press@example.com"), "");
    }
}
