//! User management endpoints

use std::sync::Arc;

use actix_web::{HttpResponse, web};

use crate::api::middleware::AuthedUser;
use crate::api::types::{MessageResponse, RegisterRequest, UserResponse};
use crate::errors::EtalaseError;
use crate::services::AuthService;

/// GET /api/users
pub async fn list_users(
    auth: web::Data<Arc<AuthService>>,
    _user: AuthedUser,
) -> Result<HttpResponse, EtalaseError> {
    let users = auth.list_users().await?;
    let body: Vec<UserResponse> = users.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/users/{id}
pub async fn get_user(
    auth: web::Data<Arc<AuthService>>,
    path: web::Path<String>,
    _user: AuthedUser,
) -> Result<HttpResponse, EtalaseError> {
    let uuid = path.into_inner();
    let found = auth
        .find_user(&uuid)
        .await?
        .ok_or_else(|| EtalaseError::not_found("User tidak ditemukan"))?;
    Ok(HttpResponse::Ok().json(UserResponse::from(found)))
}

/// POST /api/users
pub async fn register(
    auth: web::Data<Arc<AuthService>>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, EtalaseError> {
    auth.register(&body.name, &body.email, &body.password, &body.conf_password)
        .await?;
    Ok(HttpResponse::Created().json(MessageResponse::new("Register berhasil")))
}
