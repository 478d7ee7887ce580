pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod routes;
pub mod store;

pub use routes::AppState;

/// Create the app router for testing
///
/// Builds the Axum router with all routes and the auth gate configured,
/// useful for integration testing without starting the full server.
pub async fn create_app(db_pool: sqlx::SqlitePool) -> anyhow::Result<axum::Router> {
    let state = AppState {
        db_pool,
        jwt: config::JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_string(),
            lifetime_seconds: 24 * 60 * 60,
        },
        secure_cookies: false,
    };

    Ok(routes::app_router(state))
}
