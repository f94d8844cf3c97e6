//! Database models for users.

use sqlx::FromRow;

/// Database response for a user
#[derive(Debug, Clone, FromRow)]
pub struct UserDBResponse {
    pub username: String,
    pub name: String,
    pub avatar_url: Option<String>,
}
