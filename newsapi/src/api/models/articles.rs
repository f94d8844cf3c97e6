//! API request/response models for articles.

use crate::db::handlers::articles::{ArticleFilter, SortBy, SortOrder};
use crate::db::models::articles::{ArticleDBResponse, ArticleSummaryDBResponse};
use crate::errors::Error;
use crate::types::ArticleId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for listing articles
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ArticlesQuery {
    /// Only return articles in this topic
    #[param(example = "cats")]
    pub topic: Option<String>,

    /// Column to sort by (default `created_at`)
    #[param(example = "votes")]
    pub sort_by: Option<String>,

    /// `asc` or `desc` (default `desc`), case-insensitive
    #[param(example = "asc")]
    pub order: Option<String>,
}

impl ArticlesQuery {
    /// Validate the sort parameters against their allowlists and build a repository filter.
    pub fn into_filter(self) -> Result<ArticleFilter, Error> {
        let sort_by = match self.sort_by.as_deref() {
            Some(raw) => raw.parse::<SortBy>().map_err(|_| Error::BadRequest {
                message: "invalid sort_by query".to_string(),
            })?,
            None => SortBy::default(),
        };
        let order = match self.order.as_deref() {
            Some(raw) => raw.parse::<SortOrder>().map_err(|_| Error::BadRequest {
                message: "invalid order query".to_string(),
            })?,
            None => SortOrder::default(),
        };

        Ok(ArticleFilter::new(self.topic, sort_by, order))
    }
}

/// Request body for creating an article. Every field except
/// `article_img_url` is required; missing keys are reported by the database.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleCreate {
    #[schema(example = "butter_bridge")]
    pub author: Option<String>,
    #[schema(example = "Living in the shadow of a great man")]
    pub title: Option<String>,
    #[schema(example = "I find this existence challenging")]
    pub body: Option<String>,
    #[schema(example = "mitch")]
    pub topic: Option<String>,
    pub article_img_url: Option<String>,
}

/// Request body for a vote change on an article or comment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VotesUpdate {
    /// Signed amount to add to the current vote count
    #[schema(example = 1)]
    pub inc_votes: Option<i32>,
}

/// A single article, including its body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleResponse {
    pub article_id: ArticleId,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: Option<String>,
    pub comment_count: i64,
}

impl From<ArticleDBResponse> for ArticleResponse {
    fn from(db: ArticleDBResponse) -> Self {
        Self {
            article_id: db.article_id,
            title: db.title,
            topic: db.topic,
            author: db.author,
            body: db.body,
            created_at: db.created_at,
            votes: db.votes,
            article_img_url: db.article_img_url,
            comment_count: db.comment_count,
        }
    }
}

/// An article as it appears in listings: no body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleSummaryResponse {
    pub article_id: ArticleId,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: Option<String>,
    pub comment_count: i64,
}

impl From<ArticleSummaryDBResponse> for ArticleSummaryResponse {
    fn from(db: ArticleSummaryDBResponse) -> Self {
        Self {
            article_id: db.article_id,
            title: db.title,
            topic: db.topic,
            author: db.author,
            created_at: db.created_at,
            votes: db.votes,
            article_img_url: db.article_img_url,
            comment_count: db.comment_count,
        }
    }
}

/// `{"articles": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticlesEnvelope {
    pub articles: Vec<ArticleSummaryResponse>,
}

/// `{"article": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleEnvelope {
    pub article: ArticleResponse,
}
