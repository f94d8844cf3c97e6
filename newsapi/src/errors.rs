use crate::db::errors::DbError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use utoipa::ToSchema;

const MSG_INVALID_ID: &str = "Bad Request - parametric endpoint must be a number";
const MSG_VOTES_OUT_OF_RANGE: &str = "Bad Request - votes out of range";
const MSG_MISSING_KEYS: &str = "Bad Request - request body must contain all required keys";
const MSG_UNKNOWN_USER: &str = "Bad Request - user does not exist";
const MSG_UNKNOWN_ARTICLE: &str = "Not Found - article_id does not exist";
const MSG_UNKNOWN_TOPIC: &str = "Bad Request - topic does not exist";
const MSG_UNKNOWN_AUTHOR: &str = "Bad Request - author does not exist";
const MSG_ALREADY_EXISTS: &str = "Conflict - resource already exists";
const MSG_ENDPOINT_NOT_FOUND: &str = "Not Found - endpoint does not exist";
const MSG_INTERNAL: &str = "Internal Server Error";

#[derive(ThisError, Debug)]
pub enum Error {
    /// A numeric path parameter could not be parsed
    #[error("Path parameter is not a valid integer")]
    InvalidId,

    /// Invalid request data or business rule violation
    #[error("{message}")]
    BadRequest { message: String },

    /// Requested resource not found; `resource` names the key that was looked up
    #[error("{resource} does not exist")]
    NotFound { resource: String },

    /// No route matches the method and path
    #[error("No route matches the request")]
    EndpointNotFound,

    /// Database operation error
    #[error(transparent)]
    Database(#[from] DbError),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub msg: String,
}

/// Translate a storage-layer error into the status and message exposed to callers.
///
/// Constraint names are those declared in `migrations/`. Anything not listed
/// here is an internal error and is reported without detail.
pub fn normalize_db_error(err: &DbError) -> (StatusCode, &'static str) {
    match err {
        DbError::InvalidTextRepresentation { .. } => (StatusCode::BAD_REQUEST, MSG_INVALID_ID),
        // Only vote arithmetic can leave the integer range; ids are range-checked at extraction
        DbError::NumericValueOutOfRange { .. } => (StatusCode::BAD_REQUEST, MSG_VOTES_OUT_OF_RANGE),
        DbError::ForeignKeyViolation { constraint, .. } => match constraint.as_deref() {
            Some("comments_author_fkey") => (StatusCode::BAD_REQUEST, MSG_UNKNOWN_USER),
            Some("comments_article_id_fkey") => (StatusCode::NOT_FOUND, MSG_UNKNOWN_ARTICLE),
            Some("articles_topic_fkey") => (StatusCode::BAD_REQUEST, MSG_UNKNOWN_TOPIC),
            Some("articles_author_fkey") => (StatusCode::BAD_REQUEST, MSG_UNKNOWN_AUTHOR),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL),
        },
        DbError::NotNullViolation { .. } => (StatusCode::BAD_REQUEST, MSG_MISSING_KEYS),
        DbError::UniqueViolation { .. } => (StatusCode::CONFLICT, MSG_ALREADY_EXISTS),
        DbError::NotFound | DbError::Other(_) => (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL),
    }
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidId | Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } | Error::EndpointNotFound => StatusCode::NOT_FOUND,
            Error::Database(db_err) => normalize_db_error(db_err).0,
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::InvalidId => MSG_INVALID_ID.to_string(),
            Error::BadRequest { message } => format!("Bad Request - {message}"),
            Error::NotFound { resource } => format!("Not Found - {resource} does not exist"),
            Error::EndpointNotFound => MSG_ENDPOINT_NOT_FOUND.to_string(),
            Error::Database(db_err) => normalize_db_error(db_err).1.to_string(),
            Error::Other(_) => MSG_INTERNAL.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log full error details for debugging - different log levels based on severity
        if status.is_server_error() {
            tracing::error!("Internal service error: {:#}", self);
        } else if let Error::Database(_) = self {
            tracing::warn!("Database constraint error: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        let body = ErrorBody { msg: self.user_message() };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        Error::BadRequest {
            message: "request body is malformed".to_string(),
        }
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path parameter: {}", rejection.body_text());
        Error::BadRequest {
            message: "path parameter is malformed".to_string(),
        }
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Rejected query string: {}", rejection.body_text());
        Error::BadRequest {
            message: "query string is malformed".to_string(),
        }
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;
