use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::learning::{CulturalContext, Level};

/// An article with the study material attached for one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LearningArticle {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub level: Level,
    pub keywords: Vec<String>,
    pub grammar_points: Vec<String>,
    pub cultural_context: CulturalContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewsSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// One entry of a NewsAPI article listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiArticle {
    #[serde(default)]
    pub source: NewsSource,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<String>,
    pub content: Option<String>,
}

fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

impl NewsApiArticle {
    /// A title plus a description or body.
    pub fn is_usable(&self) -> bool {
        present(&self.title) && (present(&self.description) || present(&self.content))
    }

    pub fn is_complete(&self) -> bool {
        present(&self.title) && present(&self.description) && present(&self.content)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewsApiResponse {
    pub status: String,
    #[serde(default)]
    pub articles: Vec<NewsApiArticle>,
    pub message: Option<String>,
}
