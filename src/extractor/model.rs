use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Thresholds for the extraction passes. Defaults match the tuned production values.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractorConfig {
    /// Shortest structural container worth keeping.
    pub min_container_chars: usize,
    /// A structural result at least this long skips paragraph aggregation.
    pub accept_chars: usize,
    pub min_paragraph_chars: usize,
    pub min_paragraphs: usize,
    /// Aggregated paragraphs must exceed this many characters.
    pub min_aggregate_chars: usize,
    pub div_min_chars: usize,
    pub div_max_chars: usize,
    /// Links allowed per hundred characters of div text.
    pub max_links_per_100_chars: f64,
    /// Final text shorter than this is reported as a failure.
    pub min_article_chars: usize,
    /// Containers nested deeper than this inside their own kind are not candidates.
    pub max_nesting_depth: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_container_chars: 100,
            accept_chars: 200,
            min_paragraph_chars: 50,
            min_paragraphs: 4,
            min_aggregate_chars: 500,
            div_min_chars: 200,
            div_max_chars: 100_000,
            max_links_per_100_chars: 1.0,
            min_article_chars: 100,
            max_nesting_depth: 64,
        }
    }
}

/// Which pass produced the article body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CandidateSource {
    /// A semantic or class-named container, e.g. `article` or `story-body`.
    Structural { pattern: String },
    Paragraphs { count: usize },
    DivScan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateBlock {
    pub text: String,
    pub length: usize,
    pub source: CandidateSource,
}

impl CandidateBlock {
    pub fn new(text: String, source: CandidateSource) -> Self {
        let length = super::normalize::char_len(&text);
        Self {
            text,
            length,
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ExtractedArticle {
    pub text: String,
    pub length: usize,
    pub source: CandidateSource,
    pub paragraph_count: usize,
    /// ISO 639-1 code when detection is confident.
    pub language: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    NoCandidate,
    TooShort,
}

/// Extraction found no usable body. Callers treat this as a normal outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no article body found ({reason:?}, best candidate {best_length} chars)")]
pub struct ExtractionFailure {
    pub reason: FailureReason,
    pub best_length: usize,
}
