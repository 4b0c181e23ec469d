//! Auth integration tests
//!
//! Registration, login and token-to-user resolution against a temp sqlite
//! database.

use std::sync::Arc;

use tempfile::TempDir;

use etalase::services::{AuthService, JwtService};
use etalase::storage::CatalogStorage;

async fn setup() -> (AuthService, Arc<CatalogStorage>, TempDir) {
    let td = TempDir::new().unwrap();
    let p = td.path().join("auth_test.db");
    let u = format!("sqlite://{}?mode=rwc", p.display());
    let storage = Arc::new(CatalogStorage::new(&u, "sqlite").await.unwrap());
    let auth = AuthService::new(
        storage.clone(),
        JwtService::new("test_secret_key_32_bytes_long!!", 24),
    );
    (auth, storage, td)
}

#[tokio::test]
async fn test_register_and_login() {
    let (auth, _storage, _td) = setup().await;

    let created = auth
        .register("Admin", "admin@example.com", "rahasia123", "rahasia123")
        .await
        .unwrap();
    assert_eq!(created.email, "admin@example.com");
    // Password is stored hashed
    assert_ne!(created.password, "rahasia123");
    assert!(created.password.starts_with("$argon2"));

    let (account, token) = auth.login("admin@example.com", "rahasia123").await.unwrap();
    assert_eq!(account.uuid, created.uuid);
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_register_rejects_password_mismatch() {
    let (auth, _storage, _td) = setup().await;
    let result = auth
        .register("Admin", "admin@example.com", "rahasia123", "beda123")
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let (auth, _storage, _td) = setup().await;
    auth.register("Admin", "admin@example.com", "rahasia123", "rahasia123")
        .await
        .unwrap();

    let result = auth
        .register("Lain", "admin@example.com", "lainnya99", "lainnya99")
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_login_unknown_email_is_not_found() {
    let (auth, _storage, _td) = setup().await;
    assert!(auth.login("ghost@example.com", "apapun").await.is_err());
}

#[tokio::test]
async fn test_login_wrong_password_rejected() {
    let (auth, _storage, _td) = setup().await;
    auth.register("Admin", "admin@example.com", "rahasia123", "rahasia123")
        .await
        .unwrap();

    assert!(auth.login("admin@example.com", "salah").await.is_err());
}

#[tokio::test]
async fn test_token_resolves_back_to_user() {
    let (auth, _storage, _td) = setup().await;
    auth.register("Admin", "admin@example.com", "rahasia123", "rahasia123")
        .await
        .unwrap();
    let (account, token) = auth.login("admin@example.com", "rahasia123").await.unwrap();

    let resolved = auth.authenticate(&token).await.unwrap();
    assert_eq!(resolved.uuid, account.uuid);
    assert_eq!(resolved.email, "admin@example.com");
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let (auth, _storage, _td) = setup().await;
    assert!(auth.authenticate("not.a.token").await.is_err());
}

#[tokio::test]
async fn test_users_listed_in_insertion_order() {
    let (auth, _storage, _td) = setup().await;
    auth.register("Satu", "satu@example.com", "rahasia123", "rahasia123")
        .await
        .unwrap();
    auth.register("Dua", "dua@example.com", "rahasia123", "rahasia123")
        .await
        .unwrap();

    let users = auth.list_users().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].email, "satu@example.com");

    let found = auth.find_user(&users[1].uuid).await.unwrap().unwrap();
    assert_eq!(found.name, "Dua");
}
