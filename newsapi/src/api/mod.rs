//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! Every route lives under `/api`:
//!
//! - **Catalog** (`/api`): the endpoint catalog, plus `/api/healthz`
//! - **Topics** (`/api/topics`)
//! - **Articles** (`/api/articles/*`), including per-article comments
//! - **Comments** (`/api/comments/*`)
//! - **Users** (`/api/users/*`)
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with `utoipa`. The generated document is
//! served at `/api/openapi.json` and browsable at `/api/docs`.

pub mod handlers;
pub mod models;
