use crate::AppState;
use crate::api::models::articles::VotesUpdate;
use crate::api::models::comments::{CommentCreate, CommentEnvelope, CommentResponse, CommentsEnvelope};
use crate::db::errors::DbError;
use crate::db::handlers::{Articles, Comments, Repository, comments::CommentFilter};
use crate::errors::{Error, ErrorBody, Result};
use crate::types::NumericId;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

fn comment_not_found() -> Error {
    Error::NotFound {
        resource: "comment_id".to_string(),
    }
}

#[utoipa::path(
    get,
    path = "/api/articles/{article_id}/comments",
    tag = "comments",
    summary = "List comments on an article",
    params(
        ("article_id" = i32, Path, description = "Article ID"),
    ),
    responses(
        (status = 200, description = "Comments, newest first", body = CommentsEnvelope),
        (status = 400, description = "Article ID is not a number", body = ErrorBody),
        (status = 404, description = "Article not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_article_comments(
    State(state): State<AppState>,
    NumericId(article_id): NumericId,
) -> Result<Json<CommentsEnvelope>> {
    // The comment fetch and the existence check are independent, so run them side by side
    let (comments, article_exists) = tokio::try_join!(
        async {
            let mut conn = state.db.acquire().await.map_err(DbError::from)?;
            Comments::new(&mut conn).list(&CommentFilter::for_article(article_id)).await
        },
        async {
            let mut conn = state.db.acquire().await.map_err(DbError::from)?;
            Articles::new(&mut conn).exists(article_id).await
        },
    )?;

    if !article_exists {
        return Err(Error::NotFound {
            resource: "article_id".to_string(),
        });
    }

    Ok(Json(CommentsEnvelope {
        comments: comments.into_iter().map(CommentResponse::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/articles/{article_id}/comments",
    tag = "comments",
    summary = "Post a comment on an article",
    params(
        ("article_id" = i32, Path, description = "Article ID"),
    ),
    request_body = CommentCreate,
    responses(
        (status = 201, description = "Comment created", body = CommentEnvelope),
        (status = 400, description = "Missing key, unknown user or article ID is not a number", body = ErrorBody),
        (status = 404, description = "Article not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip(state, payload))]
pub async fn create_article_comment(
    State(state): State<AppState>,
    NumericId(article_id): NumericId,
    payload: std::result::Result<Json<CommentCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<CommentEnvelope>)> {
    let Json(create) = payload?;
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let comment = Comments::new(&mut conn).create(&create.into_db_request(article_id)).await?;

    Ok((StatusCode::CREATED, Json(CommentEnvelope { comment: comment.into() })))
}

#[utoipa::path(
    patch,
    path = "/api/comments/{comment_id}",
    tag = "comments",
    summary = "Change comment votes",
    params(
        ("comment_id" = i32, Path, description = "Comment ID"),
    ),
    request_body = VotesUpdate,
    responses(
        (status = 200, description = "Updated comment", body = CommentEnvelope),
        (status = 400, description = "Missing inc_votes, votes out of range, or comment ID is not a number", body = ErrorBody),
        (status = 404, description = "Comment not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip(state, payload))]
pub async fn update_comment_votes(
    State(state): State<AppState>,
    NumericId(comment_id): NumericId,
    payload: std::result::Result<Json<VotesUpdate>, JsonRejection>,
) -> Result<Json<CommentEnvelope>> {
    let Json(update) = payload?;
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let comment = Comments::new(&mut conn)
        .increment_votes(comment_id, update.inc_votes)
        .await?
        .ok_or_else(comment_not_found)?;

    Ok(Json(CommentEnvelope { comment: comment.into() }))
}

#[utoipa::path(
    delete,
    path = "/api/comments/{comment_id}",
    tag = "comments",
    summary = "Delete comment",
    params(
        ("comment_id" = i32, Path, description = "Comment ID"),
    ),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 400, description = "Comment ID is not a number", body = ErrorBody),
        (status = 404, description = "Comment not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete_comment(State(state): State<AppState>, NumericId(comment_id): NumericId) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    if Comments::new(&mut conn).delete(comment_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(comment_not_found())
    }
}
