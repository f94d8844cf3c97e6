//! API request and response data models.
//!
//! These structures define the public JSON contract. They are distinct from
//! the database models in [`crate::db::models`] and convert from them with
//! `From`. Every model is annotated with `utoipa` for the generated API docs.
//!
//! Responses are wrapped in a single-key envelope: lists as
//! `{"<plural>": [...]}` and single entities as `{"<entity>": {...}}`.
//!
//! - [`topics`]: topic creation and listing
//! - [`articles`]: article listing query, creation, vote updates
//! - [`comments`]: comment posting and listing
//! - [`users`]: user listing and lookup
//! - [`endpoints`]: the static endpoint catalog

pub mod articles;
pub mod comments;
pub mod endpoints;
pub mod topics;
pub mod users;
