//! Database models for topics.

use crate::api::models::topics::TopicCreate;
use sqlx::FromRow;

/// Database request for creating a new topic
#[derive(Debug, Clone)]
pub struct TopicCreateDBRequest {
    pub slug: Option<String>,
    pub description: Option<String>,
}

impl From<TopicCreate> for TopicCreateDBRequest {
    fn from(api: TopicCreate) -> Self {
        Self {
            slug: api.slug,
            description: api.description,
        }
    }
}

/// Database response for a topic
#[derive(Debug, Clone, FromRow)]
pub struct TopicDBResponse {
    pub slug: String,
    pub description: String,
}
