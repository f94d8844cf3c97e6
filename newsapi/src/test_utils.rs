//! Test utilities shared by unit and end-to-end tests.

use crate::config::{Config, CorsConfig, CorsOrigin, DatabaseConfig, PoolSettings};
use axum_test::TestServer;
use sqlx::PgPool;

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: None,
        database: DatabaseConfig {
            // Tests hand the application a pool from #[sqlx::test]; this URL is never dialled
            url: "postgres://localhost/newsapi_test".to_string(),
            pool: PoolSettings {
                max_connections: 2,
                min_connections: 0,
                ..Default::default()
            },
        },
        enable_otel_export: false,
        seed_on_startup: false,
        cors: CorsConfig {
            allowed_origins: vec![CorsOrigin::Wildcard],
            max_age: None,
        },
    }
}

/// A test server for the full router on `pool`
pub fn create_test_server(pool: PgPool) -> TestServer {
    crate::Application::new_with_pool(create_test_config(), pool)
        .expect("Failed to create application")
        .into_test_server()
}

/// Row count of a table, for asserting exactly which rows a request touched
pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}
