pub mod ai;
pub mod api_error;
pub mod app_state;
pub mod articles;
pub mod config;
pub mod exercises;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod learning;
pub mod news;
pub mod router;
