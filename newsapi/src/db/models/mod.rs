//! Database record models matching table schemas.
//!
//! These structs correspond to rows returned by the repositories in
//! [`crate::db::handlers`] and to the data they accept for insertion.
//!
//! # Design Principles
//!
//! - **Schema Mapping**: Each response struct derives `sqlx::FromRow` and matches
//!   the columns selected by its repository
//! - **Separation**: Database models are distinct from API models in
//!   [`crate::api::models`], which convert from them with `From`
//! - **Constraint passthrough**: Create requests keep client-supplied fields
//!   optional, so a missing key reaches PostgreSQL as `NULL` and is reported by
//!   the column's `NOT NULL` constraint
//!
//! # Models
//!
//! - [`topics`]: Topic categories
//! - [`users`]: Author identities
//! - [`articles`]: Articles, with and without body, plus derived comment counts
//! - [`comments`]: Comments attached to articles

pub mod articles;
pub mod comments;
pub mod topics;
pub mod users;
