#![no_main]

use libfuzzer_sys::fuzz_target;

use nels::extractor::{ExtractorConfig, extract, normalize::normalize};

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data);
    let config = ExtractorConfig::default();

    if let Ok(article) = extract(&html, &config) {
        assert!(article.length >= config.min_article_chars);
    }

    let once = normalize(&html);
    let _ = normalize(&once);
});
