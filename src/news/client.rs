use chrono::Utc;
use reqwest::{Client, header::USER_AGENT};
use tracing::{debug, instrument, warn};

use crate::news::{
    errors::NewsApiError,
    model::{NewsApiArticle, NewsApiResponse},
};

const DEFAULT_BASE_URL: &str = "https://newsapi.org";
const CLIENT_AGENT: &str = "NELS-News-Reader/1.0";
const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Clone)]
pub struct NewsApiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    language: String,
    page_size: u32,
}

impl NewsApiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language: "en".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set a custom base URL (for proxies and tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Today's headlines, or when none come back, everything published
    /// since yesterday. Only articles with a title and some text are kept.
    #[instrument(skip(self))]
    pub async fn latest(&self) -> Result<Vec<NewsApiArticle>, NewsApiError> {
        let page_size = self.page_size.to_string();
        let headlines = self
            .get(
                "/v2/top-headlines",
                &[("language", self.language.as_str()), ("pageSize", page_size.as_str())],
            )
            .await;

        match headlines {
            Ok(articles) if !articles.is_empty() => return Ok(usable(articles)),
            Ok(_) => debug!("no top headlines, trying everything"),
            Err(err) => warn!(error = %err, "top headlines failed, trying everything"),
        }

        let today = Utc::now().date_naive();
        let yesterday = today.pred_opt().unwrap_or(today);
        let from = yesterday.format("%Y-%m-%d").to_string();
        let to = today.format("%Y-%m-%d").to_string();
        let articles = self
            .get(
                "/v2/everything",
                &[
                    ("language", self.language.as_str()),
                    ("from", from.as_str()),
                    ("to", to.as_str()),
                    ("sortBy", "publishedAt"),
                    ("pageSize", page_size.as_str()),
                ],
            )
            .await?;
        Ok(usable(articles))
    }

    /// Recent articles matching `query` that carry a description and a body.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<NewsApiArticle>, NewsApiError> {
        let page_size = self.page_size.to_string();
        let articles = self
            .get(
                "/v2/everything",
                &[
                    ("q", query),
                    ("language", self.language.as_str()),
                    ("sortBy", "publishedAt"),
                    ("pageSize", page_size.as_str()),
                ],
            )
            .await?;
        Ok(articles
            .into_iter()
            .filter(NewsApiArticle::is_complete)
            .collect())
    }

    async fn get(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<NewsApiArticle>, NewsApiError> {
        let response = self
            .http_client
            .get(format!("{}{path}", self.base_url))
            .query(params)
            .header(USER_AGENT, CLIENT_AGENT)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let parsed: Option<NewsApiResponse> = serde_json::from_str(&body).ok();

        if !status.is_success() {
            let message = parsed
                .and_then(|r| r.message)
                .unwrap_or_else(|| body.chars().take(200).collect());
            return Err(NewsApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = parsed.ok_or_else(|| NewsApiError::Decode(body.chars().take(200).collect()))?;
        if parsed.status != "ok" {
            return Err(NewsApiError::Api {
                status: status.as_u16(),
                message: parsed.message.unwrap_or(parsed.status),
            });
        }
        debug!(path, count = parsed.articles.len(), "news API listing");
        Ok(parsed.articles)
    }
}

fn usable(articles: Vec<NewsApiArticle>) -> Vec<NewsApiArticle> {
    let total = articles.len();
    let kept: Vec<_> = articles.into_iter().filter(NewsApiArticle::is_usable).collect();
    debug!(total, kept = kept.len(), "filtered news articles");
    kept
}
