use axum::{
    Router,
    body::Body,
    http::Request,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info_span;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    api_error::ErrorResponse,
    app_state::AppState,
    articles::{dtos as article_dtos, handlers as articles},
    exercises::{dtos as exercise_dtos, handlers as exercises},
    health,
    learning::{CulturalContext, Level, NewsSummary, QuizQuestion, RephrasedText, WritingFeedback},
    news::LearningArticle,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "nels", description = "News-based English learning API"),
    paths(
        health::health_check,
        articles::list_news,
        articles::get_news,
        articles::fetch_article,
        exercises::quiz,
        exercises::rephrase,
        exercises::writing_feedback,
        exercises::generate_question,
        exercises::summary,
        exercises::cultural_context,
    ),
    components(schemas(
        ErrorResponse,
        Level,
        LearningArticle,
        CulturalContext,
        NewsSummary,
        QuizQuestion,
        RephrasedText,
        WritingFeedback,
        health::HealthResponse,
        article_dtos::NewsListResponse,
        article_dtos::ArticleResponse,
        article_dtos::FetchArticleResponse,
        exercise_dtos::QuizResponse,
        exercise_dtos::RephraseRequest,
        exercise_dtos::RephraseResponse,
        exercise_dtos::WritingFeedbackRequest,
        exercise_dtos::WritingFeedbackResponse,
        exercise_dtos::ArticleTextRequest,
        exercise_dtos::QuestionResponse,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "news", description = "Article listings and full-text extraction"),
        (name = "exercises", description = "Generated study material")
    )
)]
pub struct ApiDoc;

/// Every route, the API docs and the request tracing layers.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/healthz", get(health::health_check))
        .route("/v1/news", get(articles::list_news))
        .route("/v1/news/{id}", get(articles::get_news))
        .route("/v1/fetch-article", get(articles::fetch_article))
        .route("/v1/quiz", get(exercises::quiz))
        .route("/v1/rephrase", post(exercises::rephrase))
        .route("/v1/writing-feedback", post(exercises::writing_feedback))
        .route("/v1/generate-question", post(exercises::generate_question))
        .route("/v1/summary", post(exercises::summary))
        .route("/v1/cultural-context", post(exercises::cultural_context))
        .with_state(state);

    let tracing = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or_default();
                info_span!(
                    "http",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id,
                )
            }),
        )
        .layer(PropagateRequestIdLayer::x_request_id());

    api.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(tracing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        for expected in [
            "/healthz",
            "/v1/news",
            "/v1/news/{id}",
            "/v1/fetch-article",
            "/v1/quiz",
            "/v1/rephrase",
            "/v1/writing-feedback",
            "/v1/generate-question",
            "/v1/summary",
            "/v1/cultural-context",
        ] {
            assert!(paths.iter().any(|p| p == expected), "missing {expected}");
        }
    }
}
