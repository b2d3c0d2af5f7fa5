//! Recognition and removal of non-article text.
//!
//! Boilerplate is handled at two levels. [`strip_markup`] drops whole elements
//! (navigation, share bars, ad slots) before any text is produced.
//! [`TEXT_RULES`] is an ordered table of text rules. Each rule can disqualify
//! a paragraph ([`matching_rule`]) and strip its spans from finished text
//! ([`strip_text`]).

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Families of non-article text, in the order rules are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Contact,
    BareUrl,
    SocialPrompt,
    UiLabel,
    PlatformName,
    Solicitation,
    Legal,
    ReporterBio,
    Dateline,
    Timestamp,
    SourcePromo,
}

/// One entry of the rule table.
#[derive(Debug)]
pub struct TextRule {
    pub kind: RuleKind,
    /// Tested against a trimmed candidate paragraph.
    detect: Regex,
    /// Spans removed from assembled text.
    remove: Regex,
}

impl TextRule {
    fn new(kind: RuleKind, detect: &str, remove: &str) -> Self {
        Self {
            kind,
            detect: Regex::new(detect).unwrap(),
            remove: Regex::new(remove).unwrap(),
        }
    }

    fn same(kind: RuleKind, pattern: &str) -> Self {
        Self::new(kind, pattern, pattern)
    }

    pub fn matches(&self, paragraph: &str) -> bool {
        self.detect.is_match(paragraph.trim())
    }

    pub fn strip<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.remove.replace_all(text, "")
    }
}

const EMAIL: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";
const PHONE: &str = r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b";
const PLATFORMS: &str =
    "Facebook|Twitter|Instagram|LinkedIn|Pinterest|YouTube|TikTok|Bluesky|Flipboard|Reddit|WhatsApp|Threads|X";

pub static TEXT_RULES: LazyLock<Vec<TextRule>> = LazyLock::new(|| {
    vec![
        TextRule::same(RuleKind::Contact, &format!("{EMAIL}|{PHONE}")),
        TextRule::same(RuleKind::BareUrl, r"(?i)\bhttps?://\S+|\bwww\.\S+"),
        TextRule::new(
            RuleKind::SocialPrompt,
            &format!(
                r"(?i)\b(?:follow|like|share|tweet|connect|subscribe)\b[^.\n]{{0,40}}?\b(?:on|via|with)\b[^.\n]{{0,20}}?\b(?:{PLATFORMS})\b"
            ),
            &format!(
                r"(?i)\b(?:follow|like|share|tweet|connect|subscribe)\b[^.\n]{{0,40}}?\b(?:on|via|with)\b[^.\n]{{0,20}}?\b(?:{PLATFORMS})\b[^\n.]*\.?"
            ),
        ),
        TextRule::new(
            RuleKind::UiLabel,
            r"(?i)^(?:share|copy|copy link|link copied|print|email|save|bookmark)$",
            r"(?im)^[ \t]*(?:share|copy|copy link|link copied|print|email|save|bookmark)[ \t]*$",
        ),
        TextRule::new(
            RuleKind::PlatformName,
            &format!("(?i)^(?:{PLATFORMS})$"),
            &format!(r"(?im)^[ \t]*(?:{PLATFORMS})[ \t]*$"),
        ),
        TextRule::new(
            RuleKind::Solicitation,
            r"(?i)\b(?:leave a comment|add (?:a|your) comment|join the (?:discussion|conversation)|comments? \(\d+\)|related (?:articles|stories|coverage)|read more|more articles|more from|you (?:might|may) also like|recommended for you|see also|subscribe to|sign up for|get our newsletter|newsletter)\b",
            r"(?i)\b(?:leave a comment|add (?:a|your) comment|join the (?:discussion|conversation)|comments? \(\d+\)|related (?:articles|stories|coverage)|read more|more articles|more from|you (?:might|may) also like|recommended for you|see also|subscribe to|sign up for|get our newsletter|newsletter)\b[^\n]{0,200}",
        ),
        TextRule::new(
            RuleKind::Legal,
            r"(?i)(?:\bcopyright\b|©|\ball rights reserved\b|\bterms of (?:service|use)\b|\bprivacy policy\b)",
            r"(?i)(?:\bcopyright\b|©|\ball rights reserved\b|\bterms of (?:service|use)\b|\bprivacy policy\b)[^\n]{0,100}",
        ),
        TextRule::new(
            RuleKind::ReporterBio,
            r"^(?:[A-Z][a-z]+(?:\s+[A-Z][a-z]+)?\s+(?:is\s+a|has\s+reported|is\s+based)\b|(?:She|He|They)\s+(?:has|have)\s+reported\b)",
            r"(?m)^(?:[A-Z][a-z]+(?:\s+[A-Z][a-z]+)?\s+(?:is\s+a|has\s+reported|is\s+based)|(?:She|He|They)\s+(?:has|have)\s+reported)\b[^\n]{0,200}",
        ),
        TextRule::new(
            RuleKind::Dateline,
            r"^[A-Z][A-Z\s,]+(?:\([A-Z]+\)\s*)?\u{2014}",
            r"(?m)^[A-Z][A-Z\s,]+(?:\([A-Z]+\)\s*)?\u{2014}\s*",
        ),
        TextRule::new(
            RuleKind::Timestamp,
            r"(?i)^(?:updated?|published|last\s+updated?)\b|\b\d{1,2}:\d{2}[ \t]*(?:AM|PM)[ \t]*(?-i:[A-Z]{2,4})\b",
            r"(?im)^(?:updated?|published|last\s+updated?)\b[^\n]{0,50}|\b\d{1,2}:\d{2}[ \t]*(?:AM|PM)[ \t]*(?-i:[A-Z]{2,4}),?(?-i:[ \t]*[A-Z][a-z]+[ \t]+\d{1,2},?[ \t]+\d{4})?",
        ),
        TextRule::same(
            RuleKind::SourcePromo,
            r"(?i)\badd\s+[A-Z0-9][^\n]{0,40}?\s+(?:on\s+google|as\s+(?:a|your)\s+preferred\s+source)\b",
        ),
    ]
});

/// First rule that disqualifies `paragraph`, if any.
pub fn matching_rule(paragraph: &str) -> Option<RuleKind> {
    TEXT_RULES
        .iter()
        .find(|rule| rule.matches(paragraph))
        .map(|rule| rule.kind)
}

pub fn is_boilerplate(paragraph: &str) -> bool {
    matching_rule(paragraph).is_some()
}

/// Applies every rule's removal, in table order.
pub fn strip_text(text: &str) -> String {
    TEXT_RULES
        .iter()
        .fold(text.to_string(), |acc, rule| rule.strip(&acc).into_owned())
}

/// Element families removed wholesale before extraction.
static MARKUP_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let mut rules: Vec<Regex> = ["nav", "header", "footer", "aside", "form"]
        .iter()
        .map(|tag| Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>")).unwrap())
        .collect();

    let container_families = [
        "social|share|sharing|share-buttons|social-media|facebook|twitter|instagram|linkedin|pinterest|whatsapp|email-share",
        "ads?|advert|advertisement|promo|sponsored?|banner|popup|modal",
        "comments?|related|recommended|more-articles|newsletter|subscribe|sign-up",
        "copyright|legal|terms|privacy",
        "contact",
    ];
    rules.extend(container_families.iter().map(|family| {
        Regex::new(&format!(
            r#"(?is)<div\b[^>]*\b(?:class|id)\s*=\s*["'][^"']*?\b(?:{family})\b[^"']*["'][^>]*>.*?</div\s*>"#
        ))
        .unwrap()
    }));

    rules.push(
        Regex::new(r#"(?is)<a\b[^>]*href\s*=\s*["'][^"']*(?:facebook|twitter|instagram|linkedin|pinterest|youtube|mailto:)[^"']*["'][^>]*>.*?</a\s*>"#)
            .unwrap(),
    );
    rules
});

/// Removes chrome, share bars, ad slots and social links from raw markup.
pub fn strip_markup(html: &str) -> String {
    MARKUP_RULES
        .iter()
        .fold(html.to_string(), |acc, rule| rule.replace_all(&acc, " ").into_owned())
}
