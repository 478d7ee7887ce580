use axum::body::Body;
use axum::http::{Request, StatusCode};
use jsonwebtoken::{encode, EncodingKey, Header};
use pressroom::auth::token::Claims;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_login_then_profile_returns_identity() {
    let pool = common::setup_test_db().await;
    let router = common::create_test_app(pool.clone()).await;
    common::seed_admin(&pool, "a@x.com", "secret").await;

    let response = common::post_login(&router, "a@x.com", "secret").await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("admin_token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));
    assert!(set_cookie.contains("Path=/"));

    let cookie = common::session_cookie(&response).unwrap();
    let body = common::body_string(response).await;
    assert!(body.contains("\"success\":true"));
    assert!(body.contains("a@x.com"));
    // The password hash must never appear in any response body.
    assert!(!body.contains("password"));
    assert!(!body.contains("argon2"));

    let response = common::get_with_cookie(&router, "/admin/profile", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = common::body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["admin"]["email"], "a@x.com");
    assert_eq!(json["admin"]["role"], "admin");
    assert!(json["admin"]["id"].is_i64());
}

#[tokio::test]
async fn test_login_with_missing_fields_returns_400() {
    let pool = common::setup_test_db().await;
    let router = common::create_test_app(pool).await;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/login")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"email":"a@x.com"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Email and password are required");
}

#[tokio::test]
async fn test_login_with_malformed_body_returns_400_envelope() {
    let pool = common::setup_test_db().await;
    let router = common::create_test_app(pool).await;

    // Empty body and non-JSON body both get the JSON envelope, not the
    // framework's plain-text rejection.
    for (content_type, body) in [
        ("application/json", ""),
        ("application/json", "not json"),
        ("text/plain", r#"{"email":"a@x.com","password":"secret"}"#),
    ] {
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/admin/login")
                    .header("content-type", content_type)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = common::body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Email and password are required");
    }
}

#[tokio::test]
async fn test_unknown_email_and_wrong_password_are_indistinguishable() {
    let pool = common::setup_test_db().await;
    let router = common::create_test_app(pool.clone()).await;
    common::seed_admin(&pool, "a@x.com", "secret").await;

    let wrong_password = common::post_login(&router, "a@x.com", "not-secret").await;
    let unknown_email = common::post_login(&router, "nobody@x.com", "secret").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let body_a = common::body_string(wrong_password).await;
    let body_b = common::body_string(unknown_email).await;
    assert_eq!(body_a, body_b);
    assert!(body_a.contains("Invalid email or password"));
}

#[tokio::test]
async fn test_profile_without_cookie_is_rejected() {
    let pool = common::setup_test_db().await;
    let router = common::create_test_app(pool).await;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/admin/profile")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = common::body_json(response).await;
    assert_eq!(json["message"], "Access denied. No token provided.");
}

#[tokio::test]
async fn test_forged_cookie_is_rejected_as_invalid_token() {
    let pool = common::setup_test_db().await;
    let router = common::create_test_app(pool).await;

    let response =
        common::get_with_cookie(&router, "/admin/dashboard", "admin_token=garbage").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = common::body_json(response).await;
    assert_eq!(json["message"], "Invalid token.");
}

#[tokio::test]
async fn test_expired_token_is_rejected_as_expired() {
    let pool = common::setup_test_db().await;
    let router = common::create_test_app(pool.clone()).await;
    let admin_id = common::seed_admin(&pool, "a@x.com", "secret").await;

    // Sign already-expired tokens with the real secret; the signatures are
    // valid but expiry must win. The 30-second case sits inside the clock
    // leeway some JWT validators default to.
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();
    for expired_ago in [3600u64, 30] {
        let claims = Claims {
            sub: admin_id.to_string(),
            email: "a@x.com".to_string(),
            role: "admin".to_string(),
            iat: now - 7200,
            exp: now - expired_ago,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(common::TEST_JWT_SECRET.as_bytes()),
        )
        .unwrap();

        let cookie = format!("admin_token={token}");
        let response = common::get_with_cookie(&router, "/admin/profile", &cookie).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = common::body_json(response).await;
        assert_eq!(json["message"], "Token expired.");
    }
}

#[tokio::test]
async fn test_valid_token_for_deleted_admin_is_rejected() {
    let pool = common::setup_test_db().await;
    let router = common::create_test_app(pool.clone()).await;
    common::seed_admin(&pool, "a@x.com", "secret").await;

    let cookie = common::login_cookie(&router, "a@x.com", "secret").await;

    sqlx::query("DELETE FROM admins WHERE email = 'a@x.com'")
        .execute(&pool)
        .await
        .unwrap();

    let response = common::get_with_cookie(&router, "/admin/profile", &cookie).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = common::body_json(response).await;
    assert_eq!(json["message"], "Invalid token. Admin not found.");
}

#[tokio::test]
async fn test_logout_clears_cookie_and_session_ends() {
    let pool = common::setup_test_db().await;
    let router = common::create_test_app(pool.clone()).await;
    common::seed_admin(&pool, "a@x.com", "secret").await;

    let cookie = common::login_cookie(&router, "a@x.com", "secret").await;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/logout")
                .header("cookie", &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let removal = response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(removal.starts_with("admin_token="));
    assert!(removal.contains("Max-Age=0"));

    // The browser dropped the cookie; the next profile call carries none.
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/admin/profile")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = common::body_json(response).await;
    assert_eq!(json["message"], "Access denied. No token provided.");
}

#[tokio::test]
async fn test_logout_without_session_is_rejected() {
    let pool = common::setup_test_db().await;
    let router = common::create_test_app(pool).await;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_dashboard_returns_identity_and_stats() {
    let pool = common::setup_test_db().await;
    let router = common::create_test_app(pool.clone()).await;
    common::seed_admin(&pool, "a@x.com", "secret").await;

    sqlx::query("INSERT INTO categories (id, name, slug) VALUES ('tech', 'Tech', 'tech')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO articles (title, status, category) VALUES \
         ('One', 'published', 'tech'), ('Two', 'draft', 'tech')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let cookie = common::login_cookie(&router, "a@x.com", "secret").await;
    let response = common::get_with_cookie(&router, "/admin/dashboard", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = common::body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["admin"]["email"], "a@x.com");
    assert_eq!(json["data"]["stats"]["totalAdmins"], 1);
    assert_eq!(json["data"]["stats"]["totalCategories"], 1);
    assert_eq!(json["data"]["stats"]["totalArticles"], 2);
    assert_eq!(json["data"]["stats"]["publishedArticles"], 1);
    assert!(json["data"]["timestamp"].is_string());
}

#[tokio::test]
async fn test_health_and_ready_probes() {
    let pool = common::setup_test_db().await;
    let router = common::create_test_app(pool).await;

    let response = router
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
