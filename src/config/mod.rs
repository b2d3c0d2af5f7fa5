//! Runtime configuration read from the environment.
//!
//! Every setting has a development default so the service boots with no
//! environment at all; it then serves fallback content for every AI feature
//! and sample articles for the news listing.

use std::env;
use std::time::Duration;
use thiserror::Error;

use crate::ai::AiProvider;

pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
pub const ENV_GOOGLE_AI_API_KEY: &str = "GOOGLE_AI_API_KEY";
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_GEMINI_MODEL: &str = "GEMINI_MODEL";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const ENV_NEWS_API_KEY: &str = "NEWS_API_KEY";
pub const ENV_SUMMARY_TIMEOUT_SECS: &str = "AI_TIMEOUT_SECS";
pub const ENV_CULTURAL_TIMEOUT_SECS: &str = "CULTURAL_TIMEOUT_SECS";
pub const ENV_GENERATION_TIMEOUT_SECS: &str = "GENERATION_TIMEOUT_SECS";
pub const ENV_NEWS_ENRICH_LIMIT: &str = "NEWS_ENRICH_LIMIT";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_SUMMARY_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CULTURAL_TIMEOUT_SECS: u64 = 15;
const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_NEWS_ENRICH_LIMIT: usize = 5;
const MAX_NEWS_ENRICH_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    google_api_key: Option<String>,
    gemini_model: Option<String>,
    openai_api_key: Option<String>,
    openai_model: String,
    news_api_key: Option<String>,
    summary_timeout: Duration,
    cultural_timeout: Duration,
    generation_timeout: Duration,
    news_enrich_limit: usize,
    log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            google_api_key: None,
            gemini_model: None,
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            news_api_key: None,
            summary_timeout: Duration::from_secs(DEFAULT_SUMMARY_TIMEOUT_SECS),
            cultural_timeout: Duration::from_secs(DEFAULT_CULTURAL_TIMEOUT_SECS),
            generation_timeout: Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS),
            news_enrich_limit: DEFAULT_NEWS_ENRICH_LIMIT,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let google_api_key = [ENV_GOOGLE_API_KEY, ENV_GOOGLE_AI_API_KEY, ENV_GEMINI_API_KEY]
            .into_iter()
            .find_map(non_empty_var);

        let log_format = match non_empty_var(ENV_LOG_FORMAT).as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    field: ENV_LOG_FORMAT,
                    reason: format!("expected 'pretty' or 'json', got '{other}'"),
                });
            }
        };

        let news_enrich_limit = parse_var(ENV_NEWS_ENRICH_LIMIT)?
            .unwrap_or(DEFAULT_NEWS_ENRICH_LIMIT);
        if news_enrich_limit == 0 || news_enrich_limit > MAX_NEWS_ENRICH_LIMIT {
            return Err(ConfigError::InvalidValue {
                field: ENV_NEWS_ENRICH_LIMIT,
                reason: format!("must be between 1 and {MAX_NEWS_ENRICH_LIMIT}"),
            });
        }

        Ok(Self {
            bind_addr: non_empty_var(ENV_BIND_ADDR).unwrap_or(defaults.bind_addr),
            google_api_key,
            gemini_model: non_empty_var(ENV_GEMINI_MODEL),
            openai_api_key: non_empty_var(ENV_OPENAI_API_KEY),
            openai_model: non_empty_var(ENV_OPENAI_MODEL).unwrap_or(defaults.openai_model),
            news_api_key: non_empty_var(ENV_NEWS_API_KEY),
            summary_timeout: seconds_var(ENV_SUMMARY_TIMEOUT_SECS)?
                .unwrap_or(defaults.summary_timeout),
            cultural_timeout: seconds_var(ENV_CULTURAL_TIMEOUT_SECS)?
                .unwrap_or(defaults.cultural_timeout),
            generation_timeout: seconds_var(ENV_GENERATION_TIMEOUT_SECS)?
                .unwrap_or(defaults.generation_timeout),
            news_enrich_limit,
            log_format,
        })
    }

    pub fn with_bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = addr.into();
        self
    }

    pub fn with_google_api_key(mut self, key: impl Into<String>) -> Self {
        self.google_api_key = Some(key.into());
        self
    }

    pub fn with_openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    pub fn with_news_api_key(mut self, key: impl Into<String>) -> Self {
        self.news_api_key = Some(key.into());
        self
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }

    /// Google takes precedence when both keys are present.
    pub fn provider(&self) -> AiProvider {
        if self.google_api_key.is_some() {
            AiProvider::Google
        } else if self.openai_api_key.is_some() {
            AiProvider::OpenAi
        } else {
            AiProvider::Disabled
        }
    }

    pub fn google_api_key(&self) -> Option<&str> {
        self.google_api_key.as_deref()
    }
    /// Explicit Gemini model; unset means discover one at startup.
    pub fn gemini_model(&self) -> Option<&str> {
        self.gemini_model.as_deref()
    }
    pub fn openai_api_key(&self) -> Option<&str> {
        self.openai_api_key.as_deref()
    }
    pub fn openai_model(&self) -> &str {
        &self.openai_model
    }
    pub fn news_api_key(&self) -> Option<&str> {
        self.news_api_key.as_deref()
    }
    pub fn summary_timeout(&self) -> Duration {
        self.summary_timeout
    }
    pub fn cultural_timeout(&self) -> Duration {
        self.cultural_timeout
    }
    pub fn generation_timeout(&self) -> Duration {
        self.generation_timeout
    }
    /// How many live articles are enriched per listing.
    pub fn news_enrich_limit(&self) -> usize {
        self.news_enrich_limit
    }
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_var<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    non_empty_var(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
                field: key,
                reason: format!("'{raw}' is not a valid number"),
            })
        })
        .transpose()
}

fn seconds_var(key: &'static str) -> Result<Option<Duration>, ConfigError> {
    match parse_var::<u64>(key)? {
        Some(0) => Err(ConfigError::InvalidValue {
            field: key,
            reason: "timeout must be at least one second".to_string(),
        }),
        other => Ok(other.map(Duration::from_secs)),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
