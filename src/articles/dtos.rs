use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    extractor::{ExtractedArticle, PageMetadata},
    learning::Level,
    news::LearningArticle,
};

const MAX_URL_LEN: usize = 2048;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct NewsQuery {
    /// `beginner`, `intermediate` or `advanced`; anything else reads as intermediate.
    pub level: Option<String>,
    /// Ask for live news instead of the built-in samples.
    pub real: Option<bool>,
}

impl NewsQuery {
    pub fn level(&self) -> Level {
        Level::parse_lossy(self.level.as_deref())
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ArticleQuery {
    pub level: Option<String>,
}

impl ArticleQuery {
    pub fn level(&self) -> Level {
        Level::parse_lossy(self.level.as_deref())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NewsListResponse {
    pub articles: Vec<LearningArticle>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArticleResponse {
    pub article: LearningArticle,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct FetchArticleQuery {
    pub url: Option<String>,
}

impl FetchArticleQuery {
    /// The trimmed URL, or why the request cannot be served.
    pub fn validate(&self) -> Result<&str, String> {
        let url = self.url.as_deref().map(str::trim).unwrap_or_default();
        if url.is_empty() {
            return Err("URL parameter is required".to_string());
        }
        if url.len() > MAX_URL_LEN {
            return Err("URL too long".to_string());
        }
        Ok(url)
    }
}

/// Either the extracted body, or a marker telling the client to keep the
/// text it already has.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct FetchArticleResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FetchArticleResponse {
    pub fn extracted(article: ExtractedArticle, metadata: PageMetadata) -> Self {
        Self {
            success: true,
            length: Some(article.length),
            content: Some(article.text),
            language: article.language,
            title: metadata.title,
            ..Default::default()
        }
    }

    pub fn not_extracted() -> Self {
        Self {
            success: false,
            fallback: Some(true),
            message: Some("Could not extract full article content".to_string()),
            ..Default::default()
        }
    }
}
