//! API request/response models for topics.

use crate::db::models::topics::TopicDBResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for creating a topic. `slug` is required; a missing slug is
/// reported as a missing required key.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TopicCreate {
    #[schema(example = "football")]
    pub slug: Option<String>,
    #[schema(example = "Footie!")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TopicResponse {
    pub slug: String,
    pub description: String,
}

impl From<TopicDBResponse> for TopicResponse {
    fn from(db: TopicDBResponse) -> Self {
        Self {
            slug: db.slug,
            description: db.description,
        }
    }
}

/// `{"topics": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TopicsEnvelope {
    pub topics: Vec<TopicResponse>,
}

/// `{"topic": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TopicEnvelope {
    pub topic: TopicResponse,
}
