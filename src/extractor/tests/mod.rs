use std::fs;
use std::time::{Duration, Instant};

use crate::extractor::{
    CandidateSource, ExtractorConfig, FailureReason, extract, normalize::normalize,
};

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

#[test]
fn test_extract_structural_article() {
    let article = extract(&fixture("article.html"), &ExtractorConfig::default()).unwrap();

    assert_eq!(
        article.source,
        CandidateSource::Structural {
            pattern: "article".into()
        }
    );
    assert!(article.text.contains("Engineers in Lisbon spent the weekend"));
    assert!(article.text.contains("move to higher ground before Thursday."));
    assert!(article.text.contains("Coastal towns across southern Europe"));
    assert_eq!(article.language.as_deref(), Some("en"));
    assert!(article.paragraph_count >= 5);
    assert_eq!(article.length, article.text.chars().count());
}

#[test]
fn test_structural_article_drops_boilerplate() {
    let article = extract(&fixture("article.html"), &ExtractorConfig::default()).unwrap();

    for noise in [
        "Updated",
        "LISBON",
        "Add The Harbour Post",
        "Ana Silva",
        "Share",
        "Facebook",
        "Related articles",
        "newsletter",
        "Copyright",
        "dataLayer",
        "display: flex",
    ] {
        assert!(!article.text.contains(noise), "{noise:?} leaked into output");
    }
}

#[test]
fn test_extract_paragraph_aggregation() {
    let article = extract(&fixture("paragraphs.html"), &ExtractorConfig::default()).unwrap();

    assert_eq!(article.source, CandidateSource::Paragraphs { count: 5 });
    assert_eq!(article.paragraph_count, 5);
    assert!(article.text.starts_with("The Valley Gazette has learned"));
    assert!(!article.text.contains("Follow us"));
    assert!(!article.text.contains("@valleygazette.com"));
    assert!(!article.text.contains("Advertisement"));
}

#[test]
fn test_extract_div_scan() {
    let article = extract(&fixture("divs.html"), &ExtractorConfig::default()).unwrap();

    assert_eq!(article.source, CandidateSource::DivScan);
    assert!(article.text.starts_with("Farmers in the northern valley"));
    assert!(!article.text.contains("Weather"));
    assert_eq!(article.paragraph_count, 4);
}

#[test]
fn test_reject_empty_page() {
    let failure = extract(&fixture("empty.html"), &ExtractorConfig::default()).unwrap_err();
    assert_eq!(failure.reason, FailureReason::NoCandidate);
}

#[test]
fn test_two_paragraph_article_joined_by_blank_line() {
    let first = "The first paragraph describes how the festival began in a small village square.";
    let second = "The second paragraph explains why thousands of visitors now arrive every August.";
    let html = format!("<html><body><article><p>{first}</p><p>{second}</p></article></body></html>");

    let article = extract(&html, &ExtractorConfig::default()).unwrap();
    assert_eq!(article.text, format!("{first}\n\n{second}"));
}

#[test]
fn test_source_promo_is_removed() {
    let body = "The harbour authority confirmed that the new ferry terminal will open in June after three years of construction delays.";
    let html = format!(
        "<article><p>{body}</p><p>Add The Daily Ledger on Google</p><p>{body}</p></article>"
    );

    let article = extract(&html, &ExtractorConfig::default()).unwrap();
    assert!(!article.text.contains("Daily Ledger"));
    assert!(article.text.contains("new ferry terminal"));
}

#[test]
fn test_short_article_fails_after_cleanup() {
    let html = "<article><p>Short note about the weather today.</p></article>";
    let failure = extract(html, &ExtractorConfig::default()).unwrap_err();
    assert_eq!(failure.reason, FailureReason::NoCandidate);

    // Long enough before cleanup, too short once the contact details are gone.
    let html = format!(
        "<article><p>Tips: {}</p><p>Brief update.</p></article>",
        "desk@example.com ".repeat(8)
    );
    let failure = extract(&html, &ExtractorConfig::default()).unwrap_err();
    assert_eq!(failure.reason, FailureReason::TooShort);
    assert!(failure.best_length < 100);
}

#[test]
fn test_thresholds_are_configurable() {
    let config = ExtractorConfig {
        min_container_chars: 10,
        min_article_chars: 10,
        ..ExtractorConfig::default()
    };
    let article = extract("<article><p>Tiny but real.</p></article>", &config).unwrap();
    assert_eq!(article.text, "Tiny but real.");
}

#[test]
fn test_normalize_is_idempotent_on_fixtures() {
    for name in ["article.html", "paragraphs.html", "divs.html", "empty.html"] {
        let once = normalize(&fixture(name));
        assert_eq!(normalize(&once), once, "{name}");
    }
}

#[test]
fn test_unclosed_divs_finish_quickly() {
    let html = "<div>word word word ".repeat(20_000);

    let started = Instant::now();
    let failure = extract(&html, &ExtractorConfig::default()).unwrap_err();

    assert_eq!(failure.reason, FailureReason::NoCandidate);
    assert!(
        started.elapsed() < Duration::from_secs(5),
        "took {:?}",
        started.elapsed()
    );
}

#[test]
fn test_deeply_nested_divs_finish_quickly() {
    let body = "Volunteers rebuilt the village school over the summer using donated timber and stone. "
        .repeat(4);
    let html = format!("{}{body}{}", "<div>".repeat(5_000), "</div>".repeat(5_000));

    let started = Instant::now();
    let article = extract(&html, &ExtractorConfig::default()).unwrap();

    assert_eq!(article.source, CandidateSource::DivScan);
    assert!(article.text.starts_with("Volunteers rebuilt the village school"));
    assert!(
        started.elapsed() < Duration::from_secs(5),
        "took {:?}",
        started.elapsed()
    );
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use crate::extractor::{ExtractorConfig, extract, normalize::normalize};
    use proptest::prelude::*;

    fn markup_piece() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("<p>".to_string()),
            Just("</p>".to_string()),
            Just("<div class=\"story-body\">".to_string()),
            Just("<div>".to_string()),
            Just("</div>".to_string()),
            Just("<article>".to_string()),
            Just("</article>".to_string()),
            Just("<a href=\"/x\">".to_string()),
            Just("</a>".to_string()),
            Just("<br>".to_string()),
            "[A-Za-z0-9 .,!?@&;#-]{0,120}",
        ]
    }

    proptest! {
        #[test]
        fn extraction_never_panics_on_arbitrary_text(html in ".{0,2000}") {
            if let Ok(article) = extract(&html, &ExtractorConfig::default()) {
                prop_assert!(article.length >= 100);
            }
        }

        #[test]
        fn extraction_respects_minimum_on_markup_soup(
            pieces in prop::collection::vec(markup_piece(), 0..80)
        ) {
            let html = pieces.concat();
            if let Ok(article) = extract(&html, &ExtractorConfig::default()) {
                prop_assert!(article.length >= 100);
                prop_assert_eq!(article.length, article.text.chars().count());
            }
        }

        #[test]
        fn normalize_is_idempotent(text in "[a-zA-Z0-9 .,<>/\n\t]{0,300}") {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once);
        }
    }
}
