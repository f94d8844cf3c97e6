//! API request/response models for comments.

use crate::db::models::comments::{CommentCreateDBRequest, CommentDBResponse};
use crate::types::{ArticleId, CommentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for posting a comment on an article
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentCreate {
    /// Must name an existing user
    #[schema(example = "butter_bridge")]
    pub username: Option<String>,
    #[schema(example = "What a read")]
    pub body: Option<String>,
}

impl CommentCreate {
    pub fn into_db_request(self, article_id: ArticleId) -> CommentCreateDBRequest {
        CommentCreateDBRequest {
            article_id,
            author: self.username,
            body: self.body,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub comment_id: CommentId,
    pub body: String,
    pub article_id: ArticleId,
    pub author: String,
    pub votes: i32,
    pub created_at: DateTime<Utc>,
}

impl From<CommentDBResponse> for CommentResponse {
    fn from(db: CommentDBResponse) -> Self {
        Self {
            comment_id: db.comment_id,
            body: db.body,
            article_id: db.article_id,
            author: db.author,
            votes: db.votes,
            created_at: db.created_at,
        }
    }
}

/// `{"comments": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentsEnvelope {
    pub comments: Vec<CommentResponse>,
}

/// `{"comment": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentEnvelope {
    pub comment: CommentResponse,
}
