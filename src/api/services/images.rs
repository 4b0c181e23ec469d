//! Serving stored product images

use std::sync::Arc;

use actix_web::{HttpResponse, web};

use crate::errors::EtalaseError;
use crate::services::ImageStore;

/// GET /images/{filename}
pub async fn serve_image(
    images: web::Data<Arc<ImageStore>>,
    path: web::Path<String>,
) -> Result<HttpResponse, EtalaseError> {
    let (bytes, content_type) = images.read(&path.into_inner())?;
    Ok(HttpResponse::Ok().content_type(content_type).body(bytes))
}
