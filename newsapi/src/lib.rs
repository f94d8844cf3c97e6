//! # newsapi: REST API for a news site
//!
//! `newsapi` serves topics, articles, comments and users from PostgreSQL over
//! HTTP/JSON. Clients can browse articles with filtering and sorting, read and
//! post comments, vote on articles and comments, and delete either.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for the HTTP layer and
//! uses PostgreSQL for all persistence, accessed through SQLx.
//!
//! A request passes through the tracing and CORS layers, is matched against
//! the route table in [`build_router`], and reaches a handler in
//! [`api::handlers`]. Handlers take a pooled connection from [`AppState`],
//! run one repository call from [`db::handlers`] (or two side by side), and
//! wrap the result in its JSON envelope. Failures at any step are returned as
//! [`errors::Error`], which renders a `{"msg": ...}` body. Storage errors are
//! classified by SQLSTATE and constraint name in [`db::errors`] and translated
//! to a status and message by [`errors::normalize_db_error`].
//!
//! Every mutation is a single SQL statement (`INSERT`/`UPDATE ... RETURNING`,
//! `DELETE` with a row count), so there is no check-then-act window between
//! an existence check and a write.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use newsapi::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = newsapi::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     newsapi::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! Migrations run automatically on startup. They can also be applied directly:
//!
//! ```no_run
//! # use sqlx::PgPool;
//! # async fn example(pool: PgPool) -> Result<(), sqlx::migrate::MigrateError> {
//! newsapi::migrator().run(&pool).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
pub mod types;

#[cfg(test)]
mod test;
#[cfg(test)]
pub mod test_utils;

use crate::{
    api::handlers::{articles, comments, endpoints, topics, users},
    api::models::endpoints::EndpointCatalog,
    config::CorsOrigin,
    openapi::ApiDoc,
};
use axum::{
    Json, Router,
    http::{self, HeaderValue},
    routing::{get, patch},
};
use bon::Builder;
pub use config::Config;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Application state shared across all request handlers.
///
/// # Fields
///
/// - `db`: PostgreSQL connection pool
/// - `config`: Application configuration loaded from file/environment
/// - `endpoints`: The endpoint catalog served at `GET /api`
///
/// # Example
///
/// ```ignore
/// let state = AppState::builder()
///     .db(pool)
///     .config(config)
///     .endpoints(EndpointCatalog::embedded()?)
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub endpoints: EndpointCatalog,
}

/// Get the newsapi database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Load the reference dataset (`seeds/news.sql`) into an empty database.
///
/// Does nothing if any topic already exists, so it is safe to call on every
/// startup. Returns whether the seed was applied.
#[instrument(skip_all, err)]
pub async fn seed_database(pool: &PgPool) -> anyhow::Result<bool> {
    let topic_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM topics").fetch_one(pool).await?;
    if topic_count > 0 {
        debug!("Database already contains {} topics, skipping seed", topic_count);
        return Ok(false);
    }

    let mut tx = pool.begin().await?;
    sqlx::raw_sql(include_str!("../seeds/news.sql")).execute(&mut *tx).await?;
    tx.commit().await?;

    info!("Seeded database with reference dataset");
    Ok(true)
}

/// Connect to the database, run migrations, and seed if configured
async fn setup_database(config: &Config) -> anyhow::Result<PgPool> {
    let pool = config.database.pool.pool_options().connect(&config.database.url).await?;
    migrator().run(&pool).await?;

    if config.seed_on_startup {
        seed_database(&pool).await?;
    }

    Ok(pool)
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors_config = &config.cors;

    // A wildcard anywhere in the list allows every origin
    let allow_origin = if cors_config.allowed_origins.contains(&CorsOrigin::Wildcard) {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &cors_config.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                origins.push(url.origin().ascii_serialization().parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(origins)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([http::Method::GET, http::Method::POST, http::Method::PATCH, http::Method::DELETE])
        .allow_headers([http::header::CONTENT_TYPE]);

    if let Some(max_age) = cors_config.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the main application router with all endpoints and middleware.
///
/// Unknown paths, and known paths with an unsupported method, both get the
/// `404 {"msg": "Not Found - endpoint does not exist"}` response.
///
/// # Errors
///
/// Returns an error if the CORS configuration is invalid.
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    let api_routes = Router::new()
        .route("/api", get(endpoints::get_endpoints))
        .route("/api/healthz", get(endpoints::healthz))
        .route("/api/topics", get(topics::list_topics).post(topics::create_topic))
        .route("/api/articles", get(articles::list_articles).post(articles::create_article))
        .route(
            "/api/articles/{article_id}",
            get(articles::get_article)
                .patch(articles::update_article_votes)
                .delete(articles::delete_article),
        )
        .route(
            "/api/articles/{article_id}/comments",
            get(comments::list_article_comments).post(comments::create_article_comment),
        )
        .route(
            "/api/comments/{comment_id}",
            patch(comments::update_comment_votes).delete(comments::delete_comment),
        )
        .route("/api/users", get(users::list_users))
        .route("/api/users/{username}", get(users::get_user))
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .method_not_allowed_fallback(endpoints::not_found)
        .with_state(state.clone());

    let router = Router::new()
        .merge(api_routes)
        .merge(Scalar::with_url("/api/docs", ApiDoc::openapi()))
        .fallback(endpoints::not_found);

    let cors_layer = create_cors_layer(&state.config)?;
    let router = router.layer(cors_layer).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// The assembled server: database pool, shared state and router.
///
/// # Lifecycle
///
/// 1. **Create**: [`Application::new`] connects to the database, runs migrations,
///    optionally seeds, and builds the router
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and starts handling requests
/// 3. **Shutdown**: When the shutdown future resolves, in-flight requests finish,
///    the pool is closed and telemetry is flushed
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting news API with configuration: {:#?}", config);

        let pool = setup_database(&config).await?;
        Self::new_with_pool(config, pool)
    }

    /// Create an application on an existing, already migrated pool
    pub fn new_with_pool(config: Config, pool: PgPool) -> anyhow::Result<Self> {
        let app_state = AppState::builder()
            .db(pool.clone())
            .config(config.clone())
            .endpoints(EndpointCatalog::embedded()?)
            .build();

        let router = build_router(&app_state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "News API listening on http://{}, available at http://localhost:{}/api",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router).with_graceful_shutdown(shutdown).await?;

        info!("Closing database connections...");
        self.pool.close().await;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
