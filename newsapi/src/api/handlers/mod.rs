//! HTTP request handlers for all API endpoints.
//!
//! Handlers destructure the request, call a repository from
//! [`crate::db::handlers`] and wrap the result in its response envelope.
//! Anything that goes wrong is returned as [`crate::errors::Error`], which
//! renders the `{"msg": ...}` body with the matching status code.
//!
//! # Handler Modules
//!
//! - [`endpoints`]: endpoint catalog, liveness probe, unmatched-route fallback
//! - [`topics`]: topic listing and creation
//! - [`articles`]: article listing, lookup, creation, votes, deletion
//! - [`comments`]: per-article comments, comment votes, deletion
//! - [`users`]: user listing and lookup
//!
//! Numeric path ids are taken through [`crate::types::NumericId`], so a
//! non-numeric segment is rejected before the handler body runs. JSON bodies
//! are taken as `Result<Json<T>, JsonRejection>` so malformed payloads get
//! the same error shape as everything else.

pub mod articles;
pub mod comments;
pub mod endpoints;
pub mod topics;
pub mod users;
