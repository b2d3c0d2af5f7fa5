//! Heuristic article-body extraction from arbitrary news markup.
//!
//! The pipeline is pure and synchronous: markup-level boilerplate removal,
//! candidate selection ([`reader`]), a final text cleanup ([`cleaner`]) and a
//! minimum-length gate. Thresholds live in [`ExtractorConfig`].

pub mod boilerplate;
pub mod cleaner;
pub mod language;
pub mod metadata;
pub mod model;
pub mod normalize;
pub mod reader;
pub mod reject;

#[cfg(test)]
mod tests;

pub use metadata::{PageMetadata, page_metadata};
pub use model::{
    CandidateBlock, CandidateSource, ExtractedArticle, ExtractionFailure, ExtractorConfig,
    FailureReason,
};

use tracing::{debug, instrument};

use crate::fetcher::types::PageResponse;

/// Extracts the readable body of `raw_html`.
#[instrument(skip_all, fields(html_len = raw_html.len()))]
pub fn extract(
    raw_html: &str,
    config: &ExtractorConfig,
) -> Result<ExtractedArticle, ExtractionFailure> {
    let html = boilerplate::strip_markup(raw_html);

    let candidate = reader::best_candidate(&html, config).ok_or(ExtractionFailure {
        reason: FailureReason::NoCandidate,
        best_length: 0,
    })?;

    let text = cleaner::finalize(&candidate.text);
    let length = normalize::char_len(&text);
    if !reject::meets_minimum(length, config) {
        debug!(length, source = ?candidate.source, "candidate too short after cleanup");
        return Err(ExtractionFailure {
            reason: FailureReason::TooShort,
            best_length: length,
        });
    }

    let language = language::detect_language(&text);
    debug!(length, source = ?candidate.source, ?language, "article extracted");

    Ok(ExtractedArticle {
        paragraph_count: text.split("\n\n").count(),
        text,
        length,
        source: candidate.source,
        language,
    })
}

/// Convenience wrapper over [`extract`] for a fetched page.
pub fn extract_page(
    page: &PageResponse,
    config: &ExtractorConfig,
) -> Result<ExtractedArticle, ExtractionFailure> {
    extract(&page.body, config)
}
