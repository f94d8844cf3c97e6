use crate::AppState;
use crate::api::models::articles::{
    ArticleCreate, ArticleEnvelope, ArticleSummaryResponse, ArticlesEnvelope, ArticlesQuery, VotesUpdate,
};
use crate::db::handlers::{Articles, Repository, Topics};
use crate::db::models::articles::ArticleCreateDBRequest;
use crate::errors::{Error, ErrorBody, Result};
use crate::types::NumericId;
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};

fn article_not_found() -> Error {
    Error::NotFound {
        resource: "article_id".to_string(),
    }
}

#[utoipa::path(
    get,
    path = "/api/articles",
    tag = "articles",
    summary = "List articles",
    params(ArticlesQuery),
    responses(
        (status = 200, description = "Articles without their body, each with a comment count", body = ArticlesEnvelope),
        (status = 400, description = "Invalid sort_by or order, or a malformed query string", body = ErrorBody),
        (status = 404, description = "Topic does not exist", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_articles(
    State(state): State<AppState>,
    query: std::result::Result<Query<ArticlesQuery>, QueryRejection>,
) -> Result<Json<ArticlesEnvelope>> {
    let Query(query) = query?;
    let filter = query.into_filter()?;
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let articles = Articles::new(&mut conn).list(&filter).await?;

    // An empty page is only an error when the topic itself is unknown
    if articles.is_empty()
        && let Some(topic) = filter.topic
        && Topics::new(&mut conn).get_by_id(topic).await?.is_none()
    {
        return Err(Error::NotFound {
            resource: "topic".to_string(),
        });
    }

    Ok(Json(ArticlesEnvelope {
        articles: articles.into_iter().map(ArticleSummaryResponse::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/articles/{article_id}",
    tag = "articles",
    summary = "Get article",
    params(
        ("article_id" = i32, Path, description = "Article ID"),
    ),
    responses(
        (status = 200, description = "Article with its body and comment count", body = ArticleEnvelope),
        (status = 400, description = "Article ID is not a number", body = ErrorBody),
        (status = 404, description = "Article not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_article(State(state): State<AppState>, NumericId(article_id): NumericId) -> Result<Json<ArticleEnvelope>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let article = Articles::new(&mut conn)
        .get_by_id(article_id)
        .await?
        .ok_or_else(article_not_found)?;

    Ok(Json(ArticleEnvelope { article: article.into() }))
}

#[utoipa::path(
    post,
    path = "/api/articles",
    tag = "articles",
    summary = "Create article",
    request_body = ArticleCreate,
    responses(
        (status = 201, description = "Article created", body = ArticleEnvelope),
        (status = 400, description = "Missing key, unknown author or unknown topic", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_article(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ArticleCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<ArticleEnvelope>)> {
    let Json(create) = payload?;
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let article = Articles::new(&mut conn).create(&ArticleCreateDBRequest::from(create)).await?;

    Ok((StatusCode::CREATED, Json(ArticleEnvelope { article: article.into() })))
}

#[utoipa::path(
    patch,
    path = "/api/articles/{article_id}",
    tag = "articles",
    summary = "Change article votes",
    params(
        ("article_id" = i32, Path, description = "Article ID"),
    ),
    request_body = VotesUpdate,
    responses(
        (status = 200, description = "Updated article", body = ArticleEnvelope),
        (status = 400, description = "Missing inc_votes, votes out of range, or article ID is not a number", body = ErrorBody),
        (status = 404, description = "Article not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip(state, payload))]
pub async fn update_article_votes(
    State(state): State<AppState>,
    NumericId(article_id): NumericId,
    payload: std::result::Result<Json<VotesUpdate>, JsonRejection>,
) -> Result<Json<ArticleEnvelope>> {
    let Json(update) = payload?;
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let article = Articles::new(&mut conn)
        .increment_votes(article_id, update.inc_votes)
        .await?
        .ok_or_else(article_not_found)?;

    Ok(Json(ArticleEnvelope { article: article.into() }))
}

#[utoipa::path(
    delete,
    path = "/api/articles/{article_id}",
    tag = "articles",
    summary = "Delete article",
    description = "Deletes the article together with all of its comments.",
    params(
        ("article_id" = i32, Path, description = "Article ID"),
    ),
    responses(
        (status = 204, description = "Article deleted"),
        (status = 400, description = "Article ID is not a number", body = ErrorBody),
        (status = 404, description = "Article not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete_article(State(state): State<AppState>, NumericId(article_id): NumericId) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    if Articles::new(&mut conn).delete(article_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(article_not_found())
    }
}
