//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with PostgreSQL.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (api::handlers - HTTP request handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - queries)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - database records)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │  PostgreSQL │
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`handlers`]: Repository implementations
//! - [`models`]: Database record structures matching table schemas
//! - [`errors`]: Database-specific error types, classified by SQLSTATE
//!
//! # Migrations
//!
//! Schema migrations live in `migrations/` and are embedded by
//! [`crate::migrator`]. The reference dataset in `seeds/news.sql` is applied
//! by [`crate::seed_database`] and doubles as the fixture for database tests.

pub mod errors;
pub mod handlers;
pub mod models;
