#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tower::ServiceExt;

/// Matches the secret `pressroom::create_app` wires in.
pub const TEST_JWT_SECRET: &str = "test_secret_key_minimum_32_characters_long";

pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    pool
}

pub async fn create_test_app(pool: SqlitePool) -> Router {
    pressroom::create_app(pool).await.unwrap()
}

/// Insert an admin with a real argon2 hash; returns the row id.
pub async fn seed_admin(pool: &SqlitePool, email: &str, password: &str) -> i64 {
    let hash = pressroom::auth::password::hash_password(password).unwrap();

    sqlx::query("INSERT INTO admins (email, password_hash, role) VALUES (?1, ?2, 'admin')")
        .bind(email)
        .bind(&hash)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
}

/// POST /admin/login with a JSON body.
pub async fn post_login(router: &Router, email: &str, password: &str) -> Response<Body> {
    router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/login")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({ "email": email, "password": password }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Log in and return the `admin_token=...` cookie pair for later requests.
pub async fn login_cookie(router: &Router, email: &str, password: &str) -> String {
    let response = post_login(router, email, password).await;
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response).expect("login response set no auth cookie")
}

/// Extract the `name=value` pair of the auth cookie from a Set-Cookie header.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .filter(|v| v.starts_with("admin_token="))
        .map(|v| v.split(';').next().unwrap().to_string())
}

pub async fn get_with_cookie(router: &Router, uri: &str, cookie: &str) -> Response<Body> {
    router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .header("cookie", cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
