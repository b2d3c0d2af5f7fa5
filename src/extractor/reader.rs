//! Candidate selection: structural containers first, then paragraph
//! aggregation, then a scan of every `div`.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;
use tracing::debug;

use crate::extractor::{
    boilerplate,
    model::{CandidateBlock, CandidateSource, ExtractorConfig},
    normalize::{char_len, normalize},
    reject,
};

/// Class or id fragments that mark an article body, in priority order.
const CONTENT_CLASSES: [&str; 9] = [
    "article-body",
    "article-content",
    "article-text",
    "post-content",
    "entry-content",
    "story-body",
    "content-body",
    "main-content",
    "article-main",
];

/// Elements the reader pairs up and treats as candidate containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Article,
    Div,
    Main,
    Section,
}

impl Kind {
    fn from_name(name: &str) -> Option<Self> {
        [
            ("article", Kind::Article),
            ("div", Kind::Div),
            ("main", Kind::Main),
            ("section", Kind::Section),
        ]
        .into_iter()
        .find(|(tag, _)| name.eq_ignore_ascii_case(tag))
        .map(|(_, kind)| kind)
    }
}

struct Container {
    name: &'static str,
    kind: Kind,
    open: Regex,
}

impl Container {
    fn new(name: &'static str, kind: Kind, open: &str) -> Self {
        Self {
            name,
            kind,
            open: Regex::new(open).unwrap(),
        }
    }
}

static CONTAINERS: LazyLock<Vec<Container>> = LazyLock::new(|| {
    let mut containers = vec![Container::new("article", Kind::Article, r"(?i)^<article\b")];
    containers.extend(CONTENT_CLASSES.iter().map(|class| {
        Container::new(
            class,
            Kind::Div,
            &format!(
                r#"(?i)^<div\b[^>]*\b(?:class|id)\s*=\s*["'][^"']*\b{}\b[^"']*["']"#,
                regex::escape(class)
            ),
        )
    }));
    containers.push(Container::new("main", Kind::Main, r"(?i)^<main\b"));
    containers.push(Container::new(
        "section",
        Kind::Section,
        r#"(?i)^<section\b[^>]*\b(?:class|id)\s*=\s*["'][^"']*(?:article|content|body|story)[^"']*["']"#,
    ));
    containers
});

static TAG_EDGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(/?)(article|div|main|section)\b[^>]*>").unwrap());
static PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p\b[^>]*>(.*?)</p\s*>").unwrap());

/// A container with both of its tags present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Element<'a> {
    kind: Kind,
    open_tag: &'a str,
    inner: &'a str,
}

/// Pairs opening and closing tags in one pass, in document order.
///
/// Unclosed elements are dropped, and so is anything nested more than
/// `max_depth` levels inside its own kind, so every byte of `html` sits in at
/// most `max_depth` returned elements of each kind.
fn balanced_elements(html: &str, max_depth: usize) -> Vec<Element<'_>> {
    let mut open: [Vec<Range<usize>>; 4] = Default::default();
    let mut closed = Vec::new();

    for caps in TAG_EDGE.captures_iter(html) {
        let (Some(edge), Some(kind)) = (caps.get(0), Kind::from_name(&caps[2])) else {
            continue;
        };
        let stack = &mut open[kind as usize];
        if caps[1].is_empty() {
            stack.push(edge.range());
            continue;
        }
        // Stray closing tags are ignored.
        let Some(tag) = stack.pop() else { continue };
        if stack.len() < max_depth {
            closed.push((
                tag.start,
                Element {
                    kind,
                    open_tag: &html[tag.clone()],
                    inner: &html[tag.end..edge.start()],
                },
            ));
        }
    }

    closed.sort_by_key(|(start, _)| *start);
    closed.into_iter().map(|(_, element)| element).collect()
}

/// Runs the passes in order and returns the body they settle on.
pub fn best_candidate(html: &str, config: &ExtractorConfig) -> Option<CandidateBlock> {
    let structural = structural_candidate(html, config);
    if let Some(block) = &structural
        && block.length >= config.accept_chars
    {
        return structural;
    }

    paragraph_candidate(html, config)
        .or_else(|| div_candidate(html, config))
        .or(structural)
}

/// Longest match of the first container pattern that yields anything usable.
pub fn structural_candidate(html: &str, config: &ExtractorConfig) -> Option<CandidateBlock> {
    let elements = balanced_elements(html, config.max_nesting_depth);

    for container in CONTAINERS.iter() {
        let best = elements
            .iter()
            .filter(|el| el.kind == container.kind && container.open.is_match(el.open_tag))
            .map(|el| normalize(el.inner))
            .filter(|text| char_len(text) >= config.min_container_chars)
            .max_by_key(|text| char_len(text));

        if let Some(text) = best {
            debug!(pattern = container.name, "structural container matched");
            return Some(CandidateBlock::new(
                text,
                CandidateSource::Structural {
                    pattern: container.name.to_string(),
                },
            ));
        }
    }
    None
}

/// Every substantial, non-boilerplate `<p>` in document order.
pub fn paragraph_candidate(html: &str, config: &ExtractorConfig) -> Option<CandidateBlock> {
    let paragraphs: Vec<String> = PARAGRAPH
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|inner| normalize(inner.as_str()))
        .filter(|text| char_len(text) >= config.min_paragraph_chars)
        .filter(|text| !boilerplate::is_boilerplate(text))
        .collect();

    let total: usize = paragraphs.iter().map(|p| char_len(p)).sum();
    if paragraphs.len() < config.min_paragraphs || total <= config.min_aggregate_chars {
        return None;
    }

    let count = paragraphs.len();
    Some(CandidateBlock::new(
        paragraphs.join("\n\n"),
        CandidateSource::Paragraphs { count },
    ))
}

/// Longest `div` whose text is neither link-heavy nor contact or social noise.
pub fn div_candidate(html: &str, config: &ExtractorConfig) -> Option<CandidateBlock> {
    let mut best: Option<CandidateBlock> = None;

    let divs = balanced_elements(html, config.max_nesting_depth)
        .into_iter()
        .filter(|el| el.kind == Kind::Div);
    for div in divs {
        // Byte length bounds character length from above.
        if div.inner.len() < config.div_min_chars {
            continue;
        }

        let text = normalize(div.inner);
        let length = char_len(&text);
        if length < config.div_min_chars || length > config.div_max_chars {
            continue;
        }
        if reject::too_link_dense(div.inner, length, config) || reject::is_noisy(&text) {
            continue;
        }

        if best.as_ref().is_none_or(|b| length > b.length) {
            best = Some(CandidateBlock::new(text, CandidateSource::DivScan));
        }
    }
    best
}
