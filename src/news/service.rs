use dashmap::DashMap;
use futures::future::join_all;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info, instrument, warn};

use crate::{
    config::Config,
    learning::{Level, Tutor},
    news::{
        client::NewsApiClient,
        model::{LearningArticle, NewsApiArticle},
        samples::sample_articles,
    },
};

pub const DEFAULT_ENRICH_LIMIT: usize = 5;
const DESCRIPTION_PROBE_CHARS: usize = 50;

static BRACKETED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*\[\+\d+\s*chars?\]").unwrap());
static BARE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*\+\d+\s*chars?\b").unwrap());

/// Removes the `[+1234 chars]` tail NewsAPI puts on truncated bodies.
pub fn strip_truncation_markers(text: &str) -> String {
    let text = BRACKETED_MARKER.replace_all(text, "");
    BARE_MARKER.replace_all(&text, "").trim().to_string()
}

/// Content alone when it already opens with the description, otherwise both.
pub fn merge_description(description: &str, content: &str) -> String {
    match (description.is_empty(), content.is_empty()) {
        (true, _) => content.to_string(),
        (false, true) => description.to_string(),
        (false, false) => {
            let probe: String = description
                .to_lowercase()
                .chars()
                .take(DESCRIPTION_PROBE_CHARS)
                .collect();
            if content.to_lowercase().contains(&probe) {
                content.to_string()
            } else {
                format!("{description}\n\n{content}")
            }
        }
    }
}

/// Index into a level listing named by `real-N` or `real-N-<suffix>`.
fn real_index(id: &str) -> Option<usize> {
    let rest = id.strip_prefix("real-")?;
    let number = rest.split('-').next()?;
    number.parse::<usize>().ok()?.checked_sub(1)
}

/// Article listings for every level, live when possible.
pub struct NewsService {
    client: Option<NewsApiClient>,
    tutor: Tutor,
    enrich_limit: usize,
    cache: DashMap<Level, Vec<LearningArticle>>,
}

impl NewsService {
    pub fn new(client: Option<NewsApiClient>, tutor: Tutor) -> Self {
        Self {
            client,
            tutor,
            enrich_limit: DEFAULT_ENRICH_LIMIT,
            cache: DashMap::new(),
        }
    }

    pub fn from_config(config: &Config, tutor: Tutor) -> Self {
        let client = config.news_api_key().map(NewsApiClient::new);
        if client.is_none() {
            info!("no news API key configured, serving sample articles");
        }
        Self::new(client, tutor).with_enrich_limit(config.news_enrich_limit())
    }

    pub fn with_enrich_limit(mut self, limit: usize) -> Self {
        self.enrich_limit = limit.max(1);
        self
    }

    pub fn tutor(&self) -> &Tutor {
        &self.tutor
    }

    /// Live articles for `level` when `real` is set and a key is configured.
    /// A failed refresh serves the last good listing, then the samples.
    #[instrument(skip(self), fields(level = %level))]
    pub async fn list(&self, level: Level, real: bool) -> Vec<LearningArticle> {
        if !real {
            return sample_articles(level);
        }
        let Some(client) = &self.client else {
            debug!("live news requested without a key");
            return sample_articles(level);
        };

        match client.latest().await {
            Ok(articles) if !articles.is_empty() => {
                let enriched = self.enrich_all(articles, level).await;
                info!(count = enriched.len(), "enriched live articles");
                self.cache.insert(level, enriched.clone());
                return enriched;
            }
            Ok(_) => warn!("news API returned no usable articles"),
            Err(err) => warn!(error = %err, "news API request failed"),
        }

        match self.cache.get(&level) {
            Some(cached) => {
                debug!(count = cached.len(), "serving cached articles");
                cached.clone()
            }
            None => sample_articles(level),
        }
    }

    /// Looks `id` up in the cached listings, then by `real-N` position, then
    /// among the samples for `level`.
    pub fn find(&self, id: &str, level: Level) -> Option<LearningArticle> {
        if let Some(found) = self.cached_by_id(id, level) {
            return Some(found);
        }
        if let Some(idx) = real_index(id) {
            let by_position = self
                .cache
                .get(&level)
                .and_then(|articles| articles.get(idx).cloned());
            if by_position.is_some() {
                return by_position;
            }
        }
        sample_articles(level).into_iter().find(|a| a.id == id)
    }

    fn cached_by_id(&self, id: &str, level: Level) -> Option<LearningArticle> {
        let preferred = self
            .cache
            .get(&level)
            .and_then(|articles| articles.iter().find(|a| a.id == id).cloned());
        preferred.or_else(|| {
            self.cache
                .iter()
                .find_map(|entry| entry.value().iter().find(|a| a.id == id).cloned())
        })
    }

    async fn enrich_all(&self, articles: Vec<NewsApiArticle>, level: Level) -> Vec<LearningArticle> {
        let jobs = articles
            .into_iter()
            .take(self.enrich_limit)
            .enumerate()
            .map(|(idx, article)| self.enrich(idx, article, level));
        join_all(jobs).await
    }

    async fn enrich(&self, idx: usize, article: NewsApiArticle, level: Level) -> LearningArticle {
        let title = article.title.unwrap_or_default().trim().to_string();
        let description = strip_truncation_markers(article.description.as_deref().unwrap_or_default());
        let content = strip_truncation_markers(article.content.as_deref().unwrap_or_default());
        let body = merge_description(&description, &content);

        let (summary, cultural) = tokio::join!(
            self.tutor.summarize(&title, &body, level),
            self.tutor.cultural_context(&title, &body, level),
        );

        let summary_is_fallback = summary.is_fallback();
        let summary = summary.into_inner();
        let summary_text = if summary_is_fallback && !description.is_empty() {
            description
        } else {
            summary.summary
        };

        LearningArticle {
            id: format!("real-{}", idx + 1),
            title,
            summary: summary_text,
            content: body,
            level,
            keywords: summary.keywords,
            grammar_points: summary.grammar_points,
            cultural_context: cultural.into_inner(),
            source: article.source.name,
            author: article.author,
            url: article.url,
            published_at: article.published_at,
        }
    }
}
