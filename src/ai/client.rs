use async_trait::async_trait;
use serde::Serialize;
use std::{future::Future, sync::Arc, time::Duration};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::{
    ai::{
        errors::AiError,
        gemini::{self, GeminiClient},
        openai::OpenAiClient,
    },
    config::Config,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    Google,
    #[serde(rename = "openai")]
    OpenAi,
    Disabled,
}

/// A prompt plus optional system instruction, provider-neutral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub system_instruction: Option<String>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
        }
    }

    pub fn with_system(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }
}

/// One text-in, text-out capability shared by every provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AiError>;

    fn provider(&self) -> AiProvider;
}

/// Stand-in used when no key is configured. Every call fails fast so callers
/// go straight to their fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledClient;

#[async_trait]
impl GenerativeClient for DisabledClient {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, AiError> {
        Err(AiError::NotConfigured)
    }

    fn provider(&self) -> AiProvider {
        AiProvider::Disabled
    }
}

/// Binds the configured provider. Google wins when both keys are present.
pub async fn connect(config: &Config) -> Arc<dyn GenerativeClient> {
    match config.provider() {
        AiProvider::Google => {
            let key = config.google_api_key().unwrap_or_default();
            let client = match config.gemini_model() {
                Some(model) => GeminiClient::new(key, model),
                None => {
                    let probe = GeminiClient::new(key, gemini::DEFAULT_MODEL);
                    let model = probe.discover_model().await;
                    probe.with_model(model)
                }
            };
            info!(provider = "google", model = client.model(), "generative client ready");
            Arc::new(client)
        }
        AiProvider::OpenAi => {
            let key = config.openai_api_key().unwrap_or_default();
            info!(provider = "openai", model = config.openai_model(), "generative client ready");
            Arc::new(OpenAiClient::new(key).with_model(config.openai_model()))
        }
        AiProvider::Disabled => {
            warn!("no AI provider key configured, serving fallback content only");
            Arc::new(DisabledClient)
        }
    }
}

/// Races `future` against `limit`; losing the race is an ordinary failure.
pub async fn with_timeout<T, F>(limit: Duration, future: F) -> Result<T, AiError>
where
    F: Future<Output = Result<T, AiError>>,
{
    match tokio::time::timeout(limit, future).await {
        Ok(result) => result,
        Err(_) => Err(AiError::Timeout(limit)),
    }
}
