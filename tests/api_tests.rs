//! HTTP API integration tests
//!
//! Exercises the route table end to end: the public visitor tracker, the
//! guarded analytics endpoints, the login/me flow and the catalog listing,
//! with the real services wired over a temp sqlite database.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::{Value, json};
use tempfile::TempDir;

use etalase::api;
use etalase::config::UploadConfig;
use etalase::services::{AnalyticsService, AuthService, CatalogService, ImageStore, JwtService};
use etalase::storage::StorageFactory;

// =============================================================================
// Test setup
// =============================================================================

struct TestEnv {
    analytics: Arc<AnalyticsService>,
    catalog: Arc<CatalogService>,
    auth: Arc<AuthService>,
    images: Arc<ImageStore>,
    _td: TempDir,
}

async fn setup() -> TestEnv {
    let td = TempDir::new().unwrap();
    let p = td.path().join("api_test.db");
    let u = format!("sqlite://{}?mode=rwc", p.display());
    let storage = StorageFactory::create(&u).await.unwrap();

    let images = Arc::new(
        ImageStore::new(&UploadConfig {
            dir: td.path().join("img").to_string_lossy().to_string(),
            public_base_url: "http://localhost:5000".to_string(),
            max_file_bytes: 1024 * 1024,
        })
        .unwrap(),
    );
    let analytics = Arc::new(AnalyticsService::new(storage.clone()));
    let catalog = Arc::new(CatalogService::new(storage.clone(), images.clone()));
    let auth = Arc::new(AuthService::new(
        storage.clone(),
        JwtService::new("test_secret_key_32_bytes_long!!", 24),
    ));

    TestEnv {
        analytics,
        catalog,
        auth,
        images,
        _td: td,
    }
}

macro_rules! test_app {
    ($env:expr) => {{
        test::init_service(
            App::new()
                .app_data(web::Data::new($env.analytics.clone()))
                .app_data(web::Data::new($env.catalog.clone()))
                .app_data(web::Data::new($env.auth.clone()))
                .app_data(web::Data::new($env.images.clone()))
                .configure(api::configure),
        )
        .await
    }};
}

async fn register_and_login(env: &TestEnv) -> String {
    env.auth
        .register("Admin", "admin@example.com", "rahasia123", "rahasia123")
        .await
        .unwrap();
    let (_user, token) = env
        .auth
        .login("admin@example.com", "rahasia123")
        .await
        .unwrap();
    token
}

// =============================================================================
// Visitor tracking & analytics
// =============================================================================

#[tokio::test]
async fn test_track_web_visitor_is_public_and_counts() {
    let env = setup().await;
    let app = test_app!(env);

    for _ in 0..2 {
        let req = TestRequest::post().uri("/api/track-web-visitor").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = TestRequest::post().uri("/api/track-web-visitor").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["webVisitors"], 3);
}

#[tokio::test]
async fn test_analytics_requires_auth() {
    let env = setup().await;
    let app = test_app!(env);

    for uri in [
        "/api/analytics/web-visitors",
        "/api/analytics/product-monthly",
        "/api/analytics/product-weekly",
        "/api/analytics/total-link-visited",
    ] {
        let req = TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "uri: {}", uri);
    }
}

#[tokio::test]
async fn test_total_link_visited_with_token() {
    let env = setup().await;
    let token = register_and_login(&env).await;
    let app = test_app!(env);

    let req = TestRequest::get()
        .uri("/api/analytics/total-link-visited")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["totalLinkVisited"], 0);
}

#[tokio::test]
async fn test_click_endpoint_rejects_malformed_date() {
    let env = setup().await;
    let app = test_app!(env);

    let req = TestRequest::post()
        .uri("/api/products/shopee-link/some-uuid?date=15-03-2024")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "E004");
}

// =============================================================================
// Auth flow
// =============================================================================

#[tokio::test]
async fn test_register_login_me_flow() {
    let env = setup().await;
    let app = test_app!(env);

    let req = TestRequest::post()
        .uri("/api/users")
        .set_json(json!({
            "name": "Admin",
            "email": "admin@example.com",
            "password": "rahasia123",
            "confPassword": "rahasia123",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = TestRequest::post()
        .uri("/api/login")
        .set_json(json!({
            "email": "admin@example.com",
            "password": "rahasia123",
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["user"]["email"], "admin@example.com");

    let req = TestRequest::get()
        .uri("/api/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["email"], "admin@example.com");
    // Password hash never leaves the server
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_login_wrong_password_is_400() {
    let env = setup().await;
    env.auth
        .register("Admin", "admin@example.com", "rahasia123", "rahasia123")
        .await
        .unwrap();
    let app = test_app!(env);

    let req = TestRequest::post()
        .uri("/api/login")
        .set_json(json!({
            "email": "admin@example.com",
            "password": "salah",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_unknown_email_is_404() {
    let env = setup().await;
    let app = test_app!(env);

    let req = TestRequest::post()
        .uri("/api/login")
        .set_json(json!({
            "email": "ghost@example.com",
            "password": "apapun",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cookie_token_accepted() {
    let env = setup().await;
    let token = register_and_login(&env).await;
    let app = test_app!(env);

    let req = TestRequest::get()
        .uri("/api/me")
        .cookie(actix_web::cookie::Cookie::new("access_token", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

// =============================================================================
// Catalog surface
// =============================================================================

#[tokio::test]
async fn test_catalog_page_shape_and_clamp() {
    let env = setup().await;
    let app = test_app!(env);

    let req = TestRequest::get()
        .uri("/api/products?page=0&limit=100")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["error"], false);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 50);
    assert_eq!(body["totalProducts"], 0);
    assert_eq!(body["categories"].as_array().unwrap().len(), 6);
    assert!(body["products"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_product_info_requires_a_selector() {
    let env = setup().await;
    let app = test_app!(env);

    let req = TestRequest::get().uri("/api/products/info").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_catalog_mutations_require_auth() {
    let env = setup().await;
    let app = test_app!(env);

    let req = TestRequest::delete()
        .uri("/api/products?productId=whatever")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = TestRequest::patch()
        .uri("/api/products/edit-hot-deal?productId=whatever")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_hot_deal_listing_empty_is_404() {
    let env = setup().await;
    let app = test_app!(env);

    let req = TestRequest::get().uri("/api/products/hot-deal").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "E005");
}

#[tokio::test]
async fn test_missing_image_is_404() {
    let env = setup().await;
    let app = test_app!(env);

    let req = TestRequest::get().uri("/images/never-stored.png").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stored_image_served_with_content_type() {
    let env = setup().await;
    let src = env._td.path().join("upload.png");
    std::fs::write(&src, b"fake-png").unwrap();
    let url = env.images.store("upload.png", &src).unwrap();
    let file_name = url.rsplit('/').next().unwrap().to_string();
    let app = test_app!(env);

    let req = TestRequest::get()
        .uri(&format!("/images/{}", file_name))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap().to_str().unwrap(),
        "image/png"
    );
    let bytes = test::read_body(resp).await;
    assert_eq!(&bytes[..], b"fake-png");
}
