//! Catalog service layer
//!
//! Owns product validation and the canonical catalog-query contract:
//! page clamped to >= 1, limit clamped to [1, 50], unknown sort keys fall
//! back to name/ascending and unknown category filters are dropped rather
//! than rejected.

use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{EtalaseError, Result};
use crate::storage::{CatalogStorage, Category, ProductFilter, SortKey, SortOrder};

use super::ImageStore;
use migration::entities::product;

pub const MAX_PAGE_SIZE: u64 = 50;
pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const DEFAULT_RANKING_LIMIT: u64 = 10;

/// Raw, unvalidated catalog query options as they come off the wire
#[derive(Debug, Default, Clone)]
pub struct CatalogQueryOptions {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub categories: Vec<String>,
    pub search: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

/// One page of catalog results plus paging metadata
#[derive(Debug)]
pub struct CatalogPage {
    pub products: Vec<product::Model>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

/// Validated product fields shared by create and update
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub category: String,
    pub price: i64,
    pub description: String,
    pub stock: i32,
    pub shopee_link: String,
    pub tokopedia_link: String,
}

pub struct CatalogService {
    storage: Arc<CatalogStorage>,
    images: Arc<ImageStore>,
}

impl CatalogService {
    pub fn new(storage: Arc<CatalogStorage>, images: Arc<ImageStore>) -> Self {
        Self { storage, images }
    }

    /// Clamp and validate raw query options into a storage filter
    pub fn validate_query(options: &CatalogQueryOptions) -> ProductFilter {
        let page = options.page.unwrap_or(1).max(1);
        let limit = options
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        // Unknown categories are dropped from the filter, not rejected
        let categories: Vec<Category> = options
            .categories
            .iter()
            .filter_map(|c| Category::from_str(c).ok())
            .collect();

        let sort_by = match options.sort_by.as_deref() {
            Some("price") => SortKey::Price,
            Some("date") => SortKey::Date,
            // "name" and anything unrecognized
            _ => SortKey::Name,
        };
        let sort_order = match options.sort_order.as_deref() {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        };

        ProductFilter {
            categories,
            search: options.search.clone().filter(|s| !s.is_empty()),
            min_price: options.min_price,
            max_price: options.max_price,
            sort_by,
            sort_order,
            page,
            limit,
        }
    }

    pub async fn catalog_page(&self, options: &CatalogQueryOptions) -> Result<CatalogPage> {
        let filter = Self::validate_query(options);
        let (products, total) = self.storage.find_product_page(&filter).await?;
        let total_pages = total.div_ceil(filter.limit);

        Ok(CatalogPage {
            products,
            total,
            page: filter.page,
            limit: filter.limit,
            total_pages,
        })
    }

    pub async fn list_all(&self) -> Result<Vec<product::Model>> {
        self.storage.list_all_products().await
    }

    fn validate_input(input: &ProductInput) -> Result<()> {
        let name_len = input.name.chars().count();
        if !(3..=100).contains(&name_len) {
            return Err(EtalaseError::validation(
                "Product name must be 3-100 characters",
            ));
        }
        let desc_len = input.description.chars().count();
        if !(3..=400).contains(&desc_len) {
            return Err(EtalaseError::validation(
                "Description must be 3-400 characters",
            ));
        }
        if Category::from_str(&input.category).is_err() {
            return Err(EtalaseError::validation(format!(
                "Unknown category: '{}'",
                input.category
            )));
        }
        if input.price < 0 {
            return Err(EtalaseError::validation("Price must not be negative"));
        }
        if input.stock < 0 {
            return Err(EtalaseError::validation("Stock must not be negative"));
        }
        if input.shopee_link.is_empty() || input.tokopedia_link.is_empty() {
            return Err(EtalaseError::validation(
                "Both marketplace links are required",
            ));
        }
        Ok(())
    }

    /// Create a product owned by `owner_id`; requires at least one stored
    /// image reference
    pub async fn create_product(
        &self,
        input: ProductInput,
        image_urls: Vec<String>,
        owner_id: i64,
    ) -> Result<product::Model> {
        Self::validate_input(&input)?;
        if image_urls.is_empty() {
            return Err(EtalaseError::validation("No image uploaded"));
        }

        if self.storage.product_name_exists(&input.name).await? {
            return Err(EtalaseError::conflict(
                "Product with the same name already exists",
            ));
        }

        let now = Utc::now();
        let model = product::ActiveModel {
            uuid: Set(Uuid::new_v4().to_string()),
            name: Set(input.name),
            category: Set(input.category),
            image: Set(ImageStore::join_refs(&image_urls)),
            price: Set(input.price),
            description: Set(input.description),
            stock: Set(input.stock),
            is_hot_deal: Set(false),
            shopee_link: Set(input.shopee_link),
            tokopedia_link: Set(input.tokopedia_link),
            count_view: Set(0),
            shopee_click: Set(0),
            tokopedia_click: Set(0),
            user_id: Set(owner_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = self.storage.insert_product(model).await?;
        info!("Product created: {} ({})", created.name, created.uuid);
        Ok(created)
    }

    pub async fn product_by_uuid(&self, uuid: &str) -> Result<product::Model> {
        self.storage
            .find_product_by_uuid(uuid)
            .await?
            .ok_or_else(|| EtalaseError::not_found("Product not found"))
    }

    /// Slug lookup (hyphens become spaces, matched case-insensitively).
    /// A hit counts as a product view.
    pub async fn product_by_slug(&self, slug: &str) -> Result<product::Model> {
        let name = slug.replace('-', " ");
        let found = self
            .storage
            .find_product_by_name_ci(&name)
            .await?
            .ok_or_else(|| EtalaseError::not_found("Product not found"))?;

        self.storage.increment_product_view(&found.uuid).await?;
        Ok(found)
    }

    pub async fn similar_products(&self, uuid: &str) -> Result<Vec<product::Model>> {
        let original = self.product_by_uuid(uuid).await?;
        self.storage
            .find_similar_products(&original.category, uuid)
            .await
    }

    /// Update a product in place. When new image references are supplied
    /// the row is committed first, then the replaced files are deleted
    /// best-effort; a cleanup failure can strand files but never the row.
    pub async fn update_product(
        &self,
        uuid: &str,
        input: ProductInput,
        new_image_urls: Option<Vec<String>>,
    ) -> Result<product::Model> {
        Self::validate_input(&input)?;

        let existing = self.product_by_uuid(uuid).await?;

        if input.name != existing.name && self.storage.product_name_exists(&input.name).await? {
            return Err(EtalaseError::conflict(
                "Product with the same name already exists",
            ));
        }

        let old_refs = ImageStore::split_refs(&existing.image);
        let new_refs = new_image_urls.filter(|urls| !urls.is_empty());

        let mut model: product::ActiveModel = existing.into();
        model.name = Set(input.name);
        model.category = Set(input.category);
        model.price = Set(input.price);
        model.description = Set(input.description);
        model.stock = Set(input.stock);
        model.shopee_link = Set(input.shopee_link);
        model.tokopedia_link = Set(input.tokopedia_link);
        model.updated_at = Set(Utc::now());
        if let Some(refs) = &new_refs {
            model.image = Set(ImageStore::join_refs(refs));
        }

        let updated = self.storage.update_product(model).await?;

        if new_refs.is_some() {
            self.images.delete_refs(&old_refs);
        }

        info!("Product updated: {} ({})", updated.name, updated.uuid);
        Ok(updated)
    }

    /// Delete the row first, then best-effort remove its image files
    pub async fn delete_product(&self, uuid: &str) -> Result<product::Model> {
        let existing = self.product_by_uuid(uuid).await?;
        let refs = ImageStore::split_refs(&existing.image);

        self.storage.delete_product(existing.clone()).await?;
        self.images.delete_refs(&refs);

        info!("Product deleted: {} ({})", existing.name, existing.uuid);
        Ok(existing)
    }

    pub async fn toggle_hot_deal(&self, uuid: &str) -> Result<product::Model> {
        let existing = self.product_by_uuid(uuid).await?;
        let flipped = !existing.is_hot_deal;

        let mut model: product::ActiveModel = existing.into();
        model.is_hot_deal = Set(flipped);
        model.updated_at = Set(Utc::now());

        self.storage.update_product(model).await
    }

    fn clamp_ranking_limit(limit: Option<u64>) -> u64 {
        limit
            .unwrap_or(DEFAULT_RANKING_LIMIT)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub async fn best_sellers(&self, limit: Option<u64>) -> Result<Vec<product::Model>> {
        self.storage
            .top_by_combined_clicks(Self::clamp_ranking_limit(limit))
            .await
    }

    pub async fn most_viewed(&self, limit: Option<u64>) -> Result<Vec<product::Model>> {
        self.storage
            .top_by_view(Self::clamp_ranking_limit(limit))
            .await
    }

    pub async fn new_collection(&self, limit: Option<u64>) -> Result<Vec<product::Model>> {
        self.storage
            .newest_products(Self::clamp_ranking_limit(limit))
            .await
    }

    /// Hot-deal listing; an empty set is a NotFound, matching the
    /// storefront's handling
    pub async fn hot_deals(&self) -> Result<Vec<product::Model>> {
        let rows = self.storage.hot_deal_products().await?;
        if rows.is_empty() {
            warn!("Hot deal listing requested but no products are flagged");
            return Err(EtalaseError::not_found("Hot deal products not found"));
        }
        Ok(rows)
    }
}
