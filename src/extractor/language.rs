use whatlang::{Lang, detect};

const MIN_SAMPLE_CHARS: usize = 20;
const MIN_CONFIDENCE: f64 = 0.5;

/// ISO 639-1 code of the dominant language, when detection is trustworthy.
pub fn detect_language(text: &str) -> Option<String> {
    if text.chars().count() < MIN_SAMPLE_CHARS {
        return None;
    }

    let info = detect(text)?;
    if !info.is_reliable() && info.confidence() < MIN_CONFIDENCE {
        return None;
    }

    Some(iso_639_1(info.lang()).to_string())
}

fn iso_639_1(lang: Lang) -> &'static str {
    match lang {
        Lang::Eng => "en",
        Lang::Spa => "es",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Ita => "it",
        Lang::Por => "pt",
        Lang::Nld => "nl",
        Lang::Pol => "pl",
        Lang::Rus => "ru",
        Lang::Ukr => "uk",
        Lang::Tur => "tr",
        Lang::Ara => "ar",
        Lang::Hin => "hi",
        Lang::Vie => "vi",
        Lang::Jpn => "ja",
        Lang::Kor => "ko",
        Lang::Cmn => "zh",
        other => other.code(),
    }
}
