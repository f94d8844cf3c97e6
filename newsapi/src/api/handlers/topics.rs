use crate::AppState;
use crate::api::models::topics::{TopicCreate, TopicEnvelope, TopicResponse, TopicsEnvelope};
use crate::db::handlers::{Repository, Topics};
use crate::db::models::topics::TopicCreateDBRequest;
use crate::errors::{Error, ErrorBody, Result};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/api/topics",
    tag = "topics",
    summary = "List topics",
    responses(
        (status = 200, description = "All topics", body = TopicsEnvelope),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_topics(State(state): State<AppState>) -> Result<Json<TopicsEnvelope>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let topics = Topics::new(&mut conn).list(&()).await?;

    Ok(Json(TopicsEnvelope {
        topics: topics.into_iter().map(TopicResponse::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/topics",
    tag = "topics",
    summary = "Create topic",
    request_body = TopicCreate,
    responses(
        (status = 201, description = "Topic created", body = TopicEnvelope),
        (status = 400, description = "Missing slug or malformed body", body = ErrorBody),
        (status = 409, description = "A topic with this slug already exists", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_topic(
    State(state): State<AppState>,
    payload: std::result::Result<Json<TopicCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<TopicEnvelope>)> {
    let Json(create) = payload?;
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let topic = Topics::new(&mut conn).create(&TopicCreateDBRequest::from(create)).await?;

    Ok((StatusCode::CREATED, Json(TopicEnvelope { topic: topic.into() })))
}
