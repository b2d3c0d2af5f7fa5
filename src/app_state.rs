use std::sync::Arc;

use crate::{
    ai::GenerativeClient,
    config::Config,
    extractor::ExtractorConfig,
    learning::Tutor,
    news::NewsService,
};

#[derive(Clone)]
pub struct AppState {
    pub tutor: Tutor,
    pub news: Arc<NewsService>,
    pub extractor: Arc<ExtractorConfig>,
}

impl AppState {
    pub fn new(config: &Config, client: Arc<dyn GenerativeClient>) -> Self {
        let tutor = Tutor::from_config(client, config);
        Self::with_news(NewsService::from_config(config, tutor))
    }

    /// State around an already assembled news service, sharing its tutor.
    pub fn with_news(news: NewsService) -> Self {
        Self {
            tutor: news.tutor().clone(),
            news: Arc::new(news),
            extractor: Arc::new(ExtractorConfig::default()),
        }
    }
}
