use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::{error, info, warn};

use crate::{
    api_error::{ApiError, ErrorResponse},
    app_state::AppState,
    articles::dtos::{
        ArticleQuery, ArticleResponse, FetchArticleQuery, FetchArticleResponse, NewsListResponse,
        NewsQuery,
    },
    extractor::{extract_page, page_metadata},
    fetcher::fetch,
};

#[utoipa::path(
    get,
    path = "/v1/news",
    tag = "news",
    params(NewsQuery),
    responses(
        (status = 200, description = "Articles for the level", body = NewsListResponse)
    )
)]
pub async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Json<NewsListResponse> {
    let articles = state
        .news
        .list(query.level(), query.real.unwrap_or(false))
        .await;
    Json(NewsListResponse { articles })
}

#[utoipa::path(
    get,
    path = "/v1/news/{id}",
    tag = "news",
    params(("id" = String, Path, description = "Article id"), ArticleQuery),
    responses(
        (status = 200, description = "The article", body = ArticleResponse),
        (status = 404, description = "No such article", body = ErrorResponse)
    )
)]
pub async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ArticleQuery>,
) -> Result<Json<ArticleResponse>, ApiError> {
    match state.news.find(&id, query.level()) {
        Some(article) => Ok(Json(ArticleResponse { article })),
        None => {
            warn!(%id, "article not found");
            Err(ApiError::NotFound("Article not found".to_string()))
        }
    }
}

#[utoipa::path(
    get,
    path = "/v1/fetch-article",
    tag = "news",
    params(FetchArticleQuery),
    responses(
        (status = 200, description = "Extracted body, or a fallback marker", body = FetchArticleResponse),
        (status = 400, description = "Missing or unusable URL", body = ErrorResponse),
        (status = 502, description = "The page could not be fetched", body = ErrorResponse)
    )
)]
pub async fn fetch_article(
    State(state): State<AppState>,
    Query(query): Query<FetchArticleQuery>,
) -> Result<Json<FetchArticleResponse>, ApiError> {
    let url = query.validate().map_err(ApiError::BadRequest)?;
    info!(%url, "fetching article page");

    let page = match fetch(url).await {
        Ok(page) => page,
        Err(err) if err.is_bad_input() => return Err(ApiError::bad_request(err.to_string())),
        Err(err) => {
            warn!(%url, error = %err, "article fetch failed");
            return Err(ApiError::Upstream(err.to_string()));
        }
    };

    let config = state.extractor.clone();
    let extraction = tokio::task::spawn_blocking(move || {
        let metadata = page_metadata(&page.body);
        (extract_page(&page, &config), metadata)
    })
    .await;

    let response = match extraction {
        Ok((Ok(article), metadata)) => {
            info!(length = article.length, "article body extracted");
            FetchArticleResponse::extracted(article, metadata)
        }
        Ok((Err(failure), _)) => {
            warn!(%url, best_length = failure.best_length, reason = ?failure.reason, "article body not extracted");
            FetchArticleResponse::not_extracted()
        }
        Err(err) => {
            error!(error = %err, "extraction task failed");
            FetchArticleResponse::not_extracted()
        }
    };
    Ok(Json(response))
}
