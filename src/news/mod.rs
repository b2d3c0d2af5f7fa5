//! News listings: NewsAPI access, enrichment into learning articles and the
//! built-in samples served when live news is unavailable.

pub mod client;
pub mod errors;
pub mod model;
pub mod samples;
pub mod service;

pub use client::NewsApiClient;
pub use errors::NewsApiError;
pub use model::{LearningArticle, NewsApiArticle};
pub use service::NewsService;
