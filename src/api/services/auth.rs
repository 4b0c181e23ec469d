//! Login, session introspection and logout

use std::sync::Arc;

use actix_web::{HttpResponse, web};

use crate::api::middleware::AuthedUser;
use crate::api::types::{LoginRequest, LoginResponse, MessageResponse, UserResponse};
use crate::errors::EtalaseError;
use crate::services::AuthService;

/// POST /api/login
pub async fn login(
    auth: web::Data<Arc<AuthService>>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, EtalaseError> {
    let (account, token) = auth.login(&body.email, &body.password).await?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        msg: "Login berhasil".to_string(),
        token,
        user: account.into(),
    }))
}

/// GET /api/me
pub async fn me(user: AuthedUser) -> Result<HttpResponse, EtalaseError> {
    Ok(HttpResponse::Ok().json(UserResponse::from(user.0)))
}

/// DELETE /api/logout
///
/// Tokens are stateless; the client discards its copy. This endpoint only
/// acknowledges so the frontend flow stays symmetric with login.
pub async fn logout() -> Result<HttpResponse, EtalaseError> {
    Ok(HttpResponse::Ok().json(MessageResponse::new("Logout berhasil")))
}
