use scraper::{Html, Selector};
use serde::Serialize;
use utoipa::ToSchema;

/// Page-level facts shown alongside an extracted article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: Option<String>,
    pub site_name: Option<String>,
    pub description: Option<String>,
}

/// Title and site tags sit near the top of a page; markup past this point is not parsed.
const METADATA_WINDOW: usize = 512 * 1024;

pub fn page_metadata(html: &str) -> PageMetadata {
    let document = Html::parse_document(leading_window(html));
    PageMetadata {
        title: page_title(&document),
        site_name: site_name(&document),
        description: meta_content(&document, "meta[property='og:description']")
            .or_else(|| meta_content(&document, "meta[name='description']")),
    }
}

fn leading_window(html: &str) -> &str {
    let mut end = html.len().min(METADATA_WINDOW);
    while !html.is_char_boundary(end) {
        end -= 1;
    }
    &html[..end]
}

fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .filter_map(|el| el.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(str::to_string)
}

fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .find(|text| !text.is_empty())
}

fn page_title(document: &Html) -> Option<String> {
    meta_content(document, "meta[property='og:title']")
        .or_else(|| first_text(document, "title"))
        .or_else(|| first_text(document, "h1"))
}

fn site_name(document: &Html) -> Option<String> {
    if let Some(name) = meta_content(document, "meta[property='og:site_name']") {
        return Some(name);
    }

    // "Headline - Site" or "Headline | Site"
    let title = first_text(document, "title")?;
    [" | ", " - "]
        .iter()
        .filter_map(|sep| title.rfind(sep).map(|pos| title[pos + sep.len()..].trim().to_string()))
        .find(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_open_graph_tags() {
        let html = r#"<html><head>
            <title>Storm hits coast | Coastal Times</title>
            <meta property="og:title" content="Storm hits the coast">
            <meta property="og:site_name" content="The Coastal Times">
            <meta name="description" content="A strong storm made landfall.">
        </head><body><h1>Ignored</h1></body></html>"#;
        let meta = page_metadata(html);
        assert_eq!(meta.title.as_deref(), Some("Storm hits the coast"));
        assert_eq!(meta.site_name.as_deref(), Some("The Coastal Times"));
        assert_eq!(meta.description.as_deref(), Some("A strong storm made landfall."));
    }

    #[test]
    fn falls_back_to_title_element() {
        let html = "<html><head><title>Budget approved - City Herald</title></head></html>";
        let meta = page_metadata(html);
        assert_eq!(meta.title.as_deref(), Some("Budget approved - City Herald"));
        assert_eq!(meta.site_name.as_deref(), Some("City Herald"));
        assert_eq!(meta.description, None);
    }

    #[test]
    fn only_the_leading_window_is_parsed() {
        let padding = "é ".repeat(METADATA_WINDOW / 2);
        let html = format!("<title>Early title</title>{padding}<h1>Late heading</h1>");
        assert!(leading_window(&html).len() <= METADATA_WINDOW);
        assert_eq!(page_metadata(&html).title.as_deref(), Some("Early title"));

        let late = format!("{padding}<h1>Late heading</h1>");
        assert_eq!(page_metadata(&late).title, None);
    }

    #[test]
    fn empty_documents_have_no_metadata() {
        assert_eq!(page_metadata(""), PageMetadata::default());
    }
}
