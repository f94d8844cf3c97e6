//! Database models for comments.

use crate::types::{ArticleId, CommentId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a new comment on an article
#[derive(Debug, Clone)]
pub struct CommentCreateDBRequest {
    pub article_id: ArticleId,
    pub author: Option<String>,
    pub body: Option<String>,
}

/// Database response for a comment
#[derive(Debug, Clone, FromRow)]
pub struct CommentDBResponse {
    pub comment_id: CommentId,
    pub body: String,
    pub article_id: ArticleId,
    pub author: String,
    pub votes: i32,
    pub created_at: DateTime<Utc>,
}
