//! Common type definitions shared by the API and database layers.
//!
//! # ID Types
//!
//! Articles and comments are keyed by PostgreSQL `SERIAL` columns, topics and
//! users by natural string keys:
//!
//! - [`ArticleId`]: article surrogate key
//! - [`CommentId`]: comment surrogate key
//!
//! # Path extraction
//!
//! [`NumericId`] extracts a single integer path segment. A segment that is not
//! a valid 32-bit integer, or that does not percent-decode to UTF-8, is
//! rejected with [`Error::InvalidId`] before any handler code or query runs.

use crate::errors::Error;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

// Type aliases for IDs
pub type ArticleId = i32;
pub type CommentId = i32;

/// An integer path parameter, e.g. the `{article_id}` in `/api/articles/{article_id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericId(pub i32);

impl<S> FromRequestParts<S> for NumericId
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Also covers segments that do not percent-decode to UTF-8, e.g. `%FF`
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await.map_err(|rejection| {
            tracing::debug!("Rejected path parameter: {}", rejection.body_text());
            Error::InvalidId
        })?;

        parse_id(&raw).map(NumericId)
    }
}

/// Parse a path segment as an integer id.
pub fn parse_id(raw: &str) -> Result<i32, Error> {
    raw.trim().parse::<i32>().map_err(|_| Error::InvalidId)
}
