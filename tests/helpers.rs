#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header::CONTENT_TYPE},
};
use serde_json::Value;
use std::sync::{Arc, Mutex};

use nels::{
    ai::{AiError, AiProvider, DisabledClient, GenerationRequest, GenerativeClient},
    app_state::AppState,
    learning::{Timeouts, Tutor},
    news::{NewsApiClient, NewsService},
    router::build_router,
};

/// Replies with canned text per call and records every prompt it saw.
pub struct ScriptedClient {
    replies: Mutex<Vec<Result<String, AiError>>>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    /// Replies are served in order; the last one repeats.
    pub fn new(replies: Vec<Result<String, AiError>>) -> Self {
        Self {
            replies: Mutex::new(replies),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn always(reply: &str) -> Self {
        Self::new(vec![Ok(reply.to_string())])
    }
}

#[async_trait]
impl GenerativeClient for ScriptedClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AiError> {
        self.prompts.lock().unwrap().push(request.prompt.clone());
        let mut replies = self.replies.lock().unwrap();
        match replies.len() {
            0 => Err(AiError::NotConfigured),
            1 => match &replies[0] {
                Ok(reply) => Ok(reply.clone()),
                Err(_) => Err(AiError::Network("scripted failure".to_string())),
            },
            _ => replies.remove(0),
        }
    }

    fn provider(&self) -> AiProvider {
        AiProvider::OpenAi
    }
}

pub fn tutor(client: Arc<dyn GenerativeClient>) -> Tutor {
    Tutor::new(client, Timeouts::default())
}

pub fn app_with(client: Arc<dyn GenerativeClient>, news: Option<NewsApiClient>) -> Router {
    let service = NewsService::new(news, tutor(client));
    build_router(AppState::with_news(service))
}

/// The full router with no AI provider and no live news.
pub fn offline_app() -> Router {
    app_with(Arc::new(DisabledClient), None)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
