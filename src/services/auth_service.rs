//! Authentication: stateless JWT access tokens plus user registration
//!
//! Tokens carry the user's uuid as `sub`; every authenticated request is
//! re-checked against the users table so a deleted account is locked out
//! immediately, not at token expiry.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::errors::{EtalaseError, Result};
use crate::storage::CatalogStorage;
use crate::utils::{hash_password, verify_password};

use sea_orm::ActiveValue::Set;

use migration::entities::user;

/// Access token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// JWT service for generating and validating access tokens
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_hours: u64,
}

impl JwtService {
    pub fn new(secret: &str, access_token_hours: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_hours,
        }
    }

    /// Build from config. An empty secret gets a per-process random value,
    /// which invalidates all tokens on restart.
    pub fn from_config(config: &AuthConfig) -> Self {
        let secret = if config.jwt_secret.is_empty() {
            warn!("JWT secret not configured, generating a random per-process secret");
            format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
        } else {
            config.jwt_secret.clone()
        };
        Self::new(&secret, config.access_token_hours)
    }

    pub fn generate_token(&self, user_uuid: &str) -> Result<String> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: user_uuid.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.access_token_hours as i64)).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| EtalaseError::unauthorized(format!("Token generation failed: {}", e)))
    }

    pub fn validate_token(&self, token: &str) -> Result<AccessClaims> {
        decode::<AccessClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| EtalaseError::unauthorized("Invalid or expired token"))
    }
}

pub struct AuthService {
    storage: Arc<CatalogStorage>,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(storage: Arc<CatalogStorage>, jwt: JwtService) -> Self {
        Self { storage, jwt }
    }

    /// Verify credentials and mint an access token
    pub async fn login(&self, email: &str, password: &str) -> Result<(user::Model, String)> {
        let account = self
            .storage
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| EtalaseError::not_found("User tidak ditemukan"))?;

        if !verify_password(password, &account.password)? {
            return Err(EtalaseError::validation("Password Salah"));
        }

        let token = self.jwt.generate_token(&account.uuid)?;
        info!("User logged in: {}", account.email);
        Ok((account, token))
    }

    /// Resolve a bearer token back to its user row
    pub async fn authenticate(&self, token: &str) -> Result<user::Model> {
        let claims = self.jwt.validate_token(token)?;
        self.storage
            .find_user_by_uuid(&claims.sub)
            .await?
            .ok_or_else(|| EtalaseError::not_found("User tidak ditemukan"))
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<user::Model> {
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(EtalaseError::validation(
                "Name, email and password are required",
            ));
        }
        if password != confirm_password {
            return Err(EtalaseError::validation(
                "Password dan Confirm Password tidak cocok",
            ));
        }
        if self.storage.user_email_exists(email).await? {
            return Err(EtalaseError::conflict("Email is already registered"));
        }

        let now = Utc::now();
        let model = user::ActiveModel {
            uuid: Set(Uuid::new_v4().to_string()),
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            password: Set(hash_password(password)?),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = self.storage.insert_user(model).await?;
        info!("User registered: {}", created.email);
        Ok(created)
    }

    pub async fn list_users(&self) -> Result<Vec<user::Model>> {
        self.storage.list_users().await
    }

    pub async fn find_user(&self, uuid: &str) -> Result<Option<user::Model>> {
        self.storage.find_user_by_uuid(uuid).await
    }
}
