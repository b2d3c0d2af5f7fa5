use axum::{
    Json,
    extract::{Query, State},
};
use tracing::{debug, info};

use crate::{
    api_error::{ApiError, ErrorResponse},
    app_state::AppState,
    exercises::dtos::{
        ArticleTextRequest, QuestionResponse, QuizQuery, QuizResponse, RephraseRequest,
        RephraseResponse, WritingFeedbackRequest, WritingFeedbackResponse,
    },
    learning::{CulturalContext, NewsSummary},
    news::samples::{CLIMATE_SUMMIT_CONTENT, CLIMATE_SUMMIT_KEYWORDS, CLIMATE_SUMMIT_TITLE},
};

/// Title, content and study words the quiz is built from.
struct QuizSource {
    title: String,
    content: String,
    keywords: Vec<String>,
}

fn resolve_quiz_source(state: &AppState, query: &QuizQuery) -> QuizSource {
    if let Some((title, content)) = query.inline_article() {
        return QuizSource {
            title: title.to_string(),
            content: content.to_string(),
            keywords: query.keywords(),
        };
    }

    if let Some(id) = query.article_id()
        && let Some(article) = state.news.find(id, query.level())
    {
        debug!(%id, "quiz built from listed article");
        return QuizSource {
            title: article.title,
            content: article.content,
            keywords: article.keywords,
        };
    }

    info!("no article resolved for quiz, using the climate summit sample");
    QuizSource {
        title: CLIMATE_SUMMIT_TITLE.to_string(),
        content: CLIMATE_SUMMIT_CONTENT.to_string(),
        keywords: CLIMATE_SUMMIT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
    }
}

#[utoipa::path(
    get,
    path = "/v1/quiz",
    tag = "exercises",
    params(QuizQuery),
    responses(
        (status = 200, description = "Vocabulary questions", body = QuizResponse)
    )
)]
pub async fn quiz(State(state): State<AppState>, Query(query): Query<QuizQuery>) -> Json<QuizResponse> {
    let source = resolve_quiz_source(&state, &query);
    let questions = state
        .tutor
        .generate_quiz(&source.title, &source.content, &source.keywords, query.level())
        .await
        .into_inner();
    Json(QuizResponse { questions })
}

#[utoipa::path(
    post,
    path = "/v1/rephrase",
    tag = "exercises",
    request_body = RephraseRequest,
    responses(
        (status = 200, description = "The text at three levels", body = RephraseResponse),
        (status = 400, description = "No text given", body = ErrorResponse)
    )
)]
pub async fn rephrase(
    State(state): State<AppState>,
    Json(payload): Json<RephraseRequest>,
) -> Result<Json<RephraseResponse>, ApiError> {
    let text = payload.validate().map_err(ApiError::BadRequest)?;
    let outcome = state.tutor.rephrase(text).await;
    let fallback = outcome.is_fallback();
    Ok(Json(RephraseResponse {
        rephrased: outcome.into_inner(),
        fallback,
    }))
}

#[utoipa::path(
    post,
    path = "/v1/writing-feedback",
    tag = "exercises",
    request_body = WritingFeedbackRequest,
    responses(
        (status = 200, description = "Scores and suggestions", body = WritingFeedbackResponse),
        (status = 400, description = "No text given", body = ErrorResponse)
    )
)]
pub async fn writing_feedback(
    State(state): State<AppState>,
    Json(payload): Json<WritingFeedbackRequest>,
) -> Result<Json<WritingFeedbackResponse>, ApiError> {
    payload.validate().map_err(ApiError::BadRequest)?;
    let submission = payload.into_submission();
    let feedback = state.tutor.writing_feedback(&submission).await.into_inner();
    Ok(Json(WritingFeedbackResponse { feedback }))
}

#[utoipa::path(
    post,
    path = "/v1/generate-question",
    tag = "exercises",
    request_body = ArticleTextRequest,
    responses(
        (status = 200, description = "An open writing question", body = QuestionResponse),
        (status = 400, description = "Title or content missing", body = ErrorResponse)
    )
)]
pub async fn generate_question(
    State(state): State<AppState>,
    Json(payload): Json<ArticleTextRequest>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let (title, content, level) = payload.validate().map_err(ApiError::BadRequest)?;
    let question = state
        .tutor
        .writing_question(title, content, level)
        .await
        .into_inner();
    Ok(Json(QuestionResponse { question }))
}

#[utoipa::path(
    post,
    path = "/v1/summary",
    tag = "exercises",
    request_body = ArticleTextRequest,
    responses(
        (status = 200, description = "Summary with study words", body = NewsSummary),
        (status = 400, description = "Title or content missing", body = ErrorResponse)
    )
)]
pub async fn summary(
    State(state): State<AppState>,
    Json(payload): Json<ArticleTextRequest>,
) -> Result<Json<NewsSummary>, ApiError> {
    let (title, content, level) = payload.validate().map_err(ApiError::BadRequest)?;
    Ok(Json(
        state.tutor.summarize(title, content, level).await.into_inner(),
    ))
}

#[utoipa::path(
    post,
    path = "/v1/cultural-context",
    tag = "exercises",
    request_body = ArticleTextRequest,
    responses(
        (status = 200, description = "Background for the article", body = CulturalContext),
        (status = 400, description = "Title or content missing", body = ErrorResponse)
    )
)]
pub async fn cultural_context(
    State(state): State<AppState>,
    Json(payload): Json<ArticleTextRequest>,
) -> Result<Json<CulturalContext>, ApiError> {
    let (title, content, level) = payload.validate().map_err(ApiError::BadRequest)?;
    Ok(Json(
        state
            .tutor
            .cultural_context(title, content, level)
            .await
            .into_inner(),
    ))
}
