//! Database models for articles.

use crate::api::models::articles::ArticleCreate;
use crate::types::ArticleId;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a new article
#[derive(Debug, Clone)]
pub struct ArticleCreateDBRequest {
    pub author: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub topic: Option<String>,
    pub article_img_url: Option<String>,
}

impl From<ArticleCreate> for ArticleCreateDBRequest {
    fn from(api: ArticleCreate) -> Self {
        Self {
            author: api.author,
            title: api.title,
            body: api.body,
            topic: api.topic,
            article_img_url: api.article_img_url,
        }
    }
}

/// Database response for a single article, including its body
#[derive(Debug, Clone, FromRow)]
pub struct ArticleDBResponse {
    pub article_id: ArticleId,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: Option<String>,
    /// Number of comments referencing this article, derived at query time
    pub comment_count: i64,
}

/// Database response for an article in a listing (no body)
#[derive(Debug, Clone, FromRow)]
pub struct ArticleSummaryDBResponse {
    pub article_id: ArticleId,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: Option<String>,
    pub comment_count: i64,
}
