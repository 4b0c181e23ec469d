//! Product catalog endpoints
//!
//! Create and update take multipart form data so product fields and image
//! files arrive in one request; uploaded files land in temp storage first
//! and are only promoted into the image store after field validation.

use std::sync::Arc;

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::api::middleware::AuthedUser;
use crate::api::types::{
    CatalogPageResponse, MessageResponse, ProductListResponse, ProductResponse,
};
use crate::errors::EtalaseError;
use crate::services::{AnalyticsService, CatalogQueryOptions, CatalogService, ImageStore, ProductInput};
use crate::storage::Marketplace;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    /// Comma-separated category names
    pub categories: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

impl CatalogQuery {
    fn into_options(self) -> CatalogQueryOptions {
        let categories = self
            .categories
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        CatalogQueryOptions {
            page: self.page,
            limit: self.limit,
            sort_by: self.sort_by,
            sort_order: self.sort_order,
            categories,
            search: self.search,
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductIdQuery {
    pub product_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLookupQuery {
    pub product_id: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RankingQuery {
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ClickDateQuery {
    pub date: Option<String>,
}

#[derive(Debug, MultipartForm)]
pub struct CreateProductForm {
    #[multipart(rename = "images")]
    pub images: Vec<TempFile>,
    pub name: Text<String>,
    pub category: Text<String>,
    pub price: Text<i64>,
    pub description: Text<String>,
    pub stock: Text<i32>,
    #[multipart(rename = "shopeeLink")]
    pub shopee_link: Text<String>,
    #[multipart(rename = "tokopediaLink")]
    pub tokopedia_link: Text<String>,
}

impl CreateProductForm {
    fn input(&self) -> ProductInput {
        ProductInput {
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            price: *self.price,
            description: self.description.trim().to_string(),
            stock: *self.stock,
            shopee_link: self.shopee_link.trim().to_string(),
            tokopedia_link: self.tokopedia_link.trim().to_string(),
        }
    }
}

fn store_uploads(images: &ImageStore, files: &[TempFile]) -> Result<Vec<String>, EtalaseError> {
    let mut urls = Vec::with_capacity(files.len());
    for file in files {
        let name = file
            .file_name
            .as_deref()
            .ok_or_else(|| EtalaseError::validation("Uploaded file has no name"))?;
        urls.push(images.store(name, file.file.path())?);
    }
    Ok(urls)
}

/// GET /api/products
pub async fn catalog_page(
    catalog: web::Data<Arc<CatalogService>>,
    query: web::Query<CatalogQuery>,
) -> Result<HttpResponse, EtalaseError> {
    let page = catalog.catalog_page(&query.into_inner().into_options()).await?;
    Ok(HttpResponse::Ok().json(CatalogPageResponse::new(page)))
}

/// GET /api/products/all
pub async fn all_products(
    catalog: web::Data<Arc<CatalogService>>,
) -> Result<HttpResponse, EtalaseError> {
    let products = catalog.list_all().await?;
    Ok(HttpResponse::Ok().json(ProductListResponse::new(products)))
}

/// GET /api/products/info?productId=|slug=
pub async fn product_info(
    catalog: web::Data<Arc<CatalogService>>,
    query: web::Query<ProductLookupQuery>,
) -> Result<HttpResponse, EtalaseError> {
    let found = if let Some(uuid) = query.product_id.as_deref() {
        catalog.product_by_uuid(uuid).await?
    } else if let Some(slug) = query.slug.as_deref() {
        catalog.product_by_slug(slug).await?
    } else {
        return Err(EtalaseError::validation(
            "Either productId or slug is required",
        ));
    };
    Ok(HttpResponse::Ok().json(ProductResponse::from(found)))
}

/// GET /api/products/similar-product?productId=
pub async fn similar_products(
    catalog: web::Data<Arc<CatalogService>>,
    query: web::Query<ProductIdQuery>,
) -> Result<HttpResponse, EtalaseError> {
    let products = catalog.similar_products(&query.product_id).await?;
    Ok(HttpResponse::Ok().json(ProductListResponse::new(products)))
}

/// POST /api/products
pub async fn create_product(
    catalog: web::Data<Arc<CatalogService>>,
    images: web::Data<Arc<ImageStore>>,
    user: AuthedUser,
    MultipartForm(form): MultipartForm<CreateProductForm>,
) -> Result<HttpResponse, EtalaseError> {
    if form.images.is_empty() {
        return Err(EtalaseError::validation("No image uploaded"));
    }
    let urls = store_uploads(&images, &form.images)?;
    let created = catalog
        .create_product(form.input(), urls, user.0.id)
        .await?;
    Ok(HttpResponse::Created().json(ProductResponse::from(created)))
}

/// PATCH /api/products?productId=
pub async fn update_product(
    catalog: web::Data<Arc<CatalogService>>,
    images: web::Data<Arc<ImageStore>>,
    query: web::Query<ProductIdQuery>,
    _user: AuthedUser,
    MultipartForm(form): MultipartForm<CreateProductForm>,
) -> Result<HttpResponse, EtalaseError> {
    let new_urls = if form.images.is_empty() {
        None
    } else {
        Some(store_uploads(&images, &form.images)?)
    };
    let updated = catalog
        .update_product(&query.product_id, form.input(), new_urls)
        .await?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(updated)))
}

/// DELETE /api/products?productId=
pub async fn delete_product(
    catalog: web::Data<Arc<CatalogService>>,
    query: web::Query<ProductIdQuery>,
    _user: AuthedUser,
) -> Result<HttpResponse, EtalaseError> {
    catalog.delete_product(&query.product_id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Produk berhasil dihapus")))
}

/// PATCH /api/products/edit-hot-deal?productId=
pub async fn toggle_hot_deal(
    catalog: web::Data<Arc<CatalogService>>,
    query: web::Query<ProductIdQuery>,
    _user: AuthedUser,
) -> Result<HttpResponse, EtalaseError> {
    let updated = catalog.toggle_hot_deal(&query.product_id).await?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(updated)))
}

/// GET /api/products/best-seller
pub async fn best_sellers(
    catalog: web::Data<Arc<CatalogService>>,
    query: web::Query<RankingQuery>,
) -> Result<HttpResponse, EtalaseError> {
    let products = catalog.best_sellers(query.limit).await?;
    Ok(HttpResponse::Ok().json(ProductListResponse::new(products)))
}

/// GET /api/products/most-viewed
pub async fn most_viewed(
    catalog: web::Data<Arc<CatalogService>>,
    query: web::Query<RankingQuery>,
) -> Result<HttpResponse, EtalaseError> {
    let products = catalog.most_viewed(query.limit).await?;
    Ok(HttpResponse::Ok().json(ProductListResponse::new(products)))
}

/// GET /api/products/new-collection
pub async fn new_collection(
    catalog: web::Data<Arc<CatalogService>>,
    query: web::Query<RankingQuery>,
) -> Result<HttpResponse, EtalaseError> {
    let products = catalog.new_collection(query.limit).await?;
    Ok(HttpResponse::Ok().json(ProductListResponse::new(products)))
}

/// GET /api/products/hot-deal
pub async fn hot_deals(
    catalog: web::Data<Arc<CatalogService>>,
) -> Result<HttpResponse, EtalaseError> {
    let products = catalog.hot_deals().await?;
    Ok(HttpResponse::Ok().json(ProductListResponse::new(products)))
}

/// POST /api/products/shopee-link/{productId}
pub async fn record_shopee_click(
    analytics: web::Data<Arc<AnalyticsService>>,
    path: web::Path<String>,
    query: web::Query<ClickDateQuery>,
) -> Result<HttpResponse, EtalaseError> {
    analytics
        .record_marketplace_click(&path.into_inner(), Marketplace::Shopee, query.date.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Shopee click recorded")))
}

/// POST /api/products/tokopedia-link/{productId}
pub async fn record_tokopedia_click(
    analytics: web::Data<Arc<AnalyticsService>>,
    path: web::Path<String>,
    query: web::Query<ClickDateQuery>,
) -> Result<HttpResponse, EtalaseError> {
    analytics
        .record_marketplace_click(
            &path.into_inner(),
            Marketplace::Tokopedia,
            query.date.as_deref(),
        )
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Tokopedia click recorded")))
}
