use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::ai::{
    client::{AiProvider, GenerationRequest, GenerativeClient},
    errors::AiError,
};

pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Tried in order when the configured model is missing.
const ALTERNATIVE_MODELS: [&str; 4] = [
    "gemini-2.5-pro",
    "gemini-1.5-flash",
    "gemini-1.5-pro",
    "gemini-pro",
];

/// Preference order when picking from the account's model list.
const PREFERRED_MODELS: [&str; 6] = [
    "gemini-2.5-pro",
    "gemini-1.5-flash",
    "gemini-1.5-flash-latest",
    "gemini-1.5-pro",
    "gemini-1.5-pro-latest",
    "gemini-pro",
];

#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Deserialize)]
struct ReplyPart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelInfo {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            model: bare_model_name(&model.into()).to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for proxies and tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = bare_model_name(&model.into()).to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Picks the best generation-capable model the key can see, or the
    /// default when the listing is unavailable.
    pub async fn discover_model(&self) -> String {
        let available = match self.list_models().await {
            Ok(models) => models,
            Err(err) => {
                warn!(error = %err, "Gemini model listing failed, using default model");
                return DEFAULT_MODEL.to_string();
            }
        };

        let chosen = PREFERRED_MODELS
            .iter()
            .find_map(|preferred| {
                available
                    .iter()
                    .find(|name| name.as_str() == *preferred)
                    .or_else(|| available.iter().find(|name| name.starts_with(preferred)))
            })
            .or_else(|| available.first())
            .cloned()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        info!(model = %chosen, candidates = available.len(), "Gemini model selected");
        chosen
    }

    async fn list_models(&self) -> Result<Vec<String>, AiError> {
        let response = self
            .http_client
            .get(format!("{}/v1/models", self.base_url))
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| AiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let listing: ModelList = response
            .json()
            .await
            .map_err(|e| AiError::Decode(e.to_string()))?;

        Ok(listing
            .models
            .into_iter()
            .filter(|m| {
                m.supported_generation_methods
                    .iter()
                    .any(|method| method == "generateContent")
            })
            .map(|m| bare_model_name(&m.name).to_string())
            .collect())
    }

    async fn generate_with(&self, model: &str, text: &str) -> Result<String, AiError> {
        let body = GenerateContentRequest {
            contents: [Content {
                parts: [Part { text }],
            }],
        };

        let response = self
            .http_client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url,
                bare_model_name(model)
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                AiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            if status == StatusCode::NOT_FOUND || error_text.contains("is not found") {
                return Err(AiError::ModelNotFound(model.to_string()));
            }
            warn!(status = %status, error = %error_text, "Gemini API error");
            return Err(AiError::Api {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AiError::Decode(e.to_string()))?;

        let reply: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if reply.trim().is_empty() {
            return Err(AiError::EmptyReply);
        }
        debug!(model, chars = reply.len(), "Gemini reply received");
        Ok(reply)
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AiError> {
        // Older Gemini models ignore system instructions, so they ride in the prompt.
        let text = match &request.system_instruction {
            Some(system) => format!("{system}\n\n{}", request.prompt),
            None => request.prompt.clone(),
        };

        match self.generate_with(&self.model, &text).await {
            Err(AiError::ModelNotFound(missing)) => {
                warn!(model = %missing, "Gemini model unavailable, trying alternatives");
                for model in ALTERNATIVE_MODELS.iter().filter(|m| **m != missing) {
                    match self.generate_with(model, &text).await {
                        Ok(reply) => {
                            info!(model, "alternative Gemini model answered");
                            return Ok(reply);
                        }
                        Err(AiError::ModelNotFound(_)) => continue,
                        Err(other) => return Err(other),
                    }
                }
                Err(AiError::ModelNotFound(missing))
            }
            other => other,
        }
    }

    fn provider(&self) -> AiProvider {
        AiProvider::Google
    }
}

/// `models/gemini-pro` and `gemini-pro` name the same model.
pub fn bare_model_name(name: &str) -> &str {
    name.strip_prefix("models/").unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_models_prefix() {
        assert_eq!(bare_model_name("models/gemini-1.5-flash"), "gemini-1.5-flash");
        assert_eq!(bare_model_name("gemini-pro"), "gemini-pro");
        assert_eq!(GeminiClient::new("k", "models/gemini-pro").model(), "gemini-pro");
    }

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let client = GeminiClient::new("k", DEFAULT_MODEL).with_base_url("http://localhost:1234/");
        assert_eq!(client.base_url, "http://localhost:1234");
    }
}
