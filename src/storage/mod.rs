use std::sync::Arc;

use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::CatalogStorage;
pub use models::{Category, Marketplace, ProductFilter, SortKey, SortOrder};

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(database_url: &str) -> Result<Arc<CatalogStorage>> {
        let backend_type = backend::infer_backend_from_url(database_url)?;
        let storage = CatalogStorage::new(database_url, &backend_type).await?;
        Ok(Arc::new(storage))
    }
}
