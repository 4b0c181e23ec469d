//! Request authentication
//!
//! `AuthedUser` is an extractor, not a blanket middleware: only the routes
//! that declare it pay for a token check and user lookup. Accepts a Bearer
//! token from the Authorization header, falling back to the `access_token`
//! cookie for browser clients.

use std::sync::Arc;

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::errors::EtalaseError;
use crate::services::AuthService;
use migration::entities::user;

pub const ACCESS_COOKIE_NAME: &str = "access_token";

/// The authenticated user behind the current request
#[derive(Debug)]
pub struct AuthedUser(pub user::Model);

fn extract_token(req: &HttpRequest) -> Option<String> {
    let bearer = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::to_string);

    bearer.or_else(|| {
        req.cookie(ACCESS_COOKIE_NAME)
            .map(|c| c.value().to_string())
    })
}

impl FromRequest for AuthedUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = extract_token(req);
        let auth = req.app_data::<web::Data<Arc<AuthService>>>().cloned();

        Box::pin(async move {
            let auth = auth.ok_or_else(|| {
                EtalaseError::database_operation("Auth service not configured")
            })?;
            let token = token.ok_or_else(|| {
                debug!("Request rejected: no bearer token or access cookie");
                EtalaseError::unauthorized("Missing access token")
            })?;

            let account = auth.authenticate(&token).await.map_err(|e| match e {
                // A valid token for a deleted account reads as unauthorized
                EtalaseError::NotFound(_) => EtalaseError::unauthorized("Unknown user"),
                other => other,
            })?;

            Ok(AuthedUser(account))
        })
    }
}
