//! SeaORM storage backend
//!
//! Single connection wrapper for the catalog and analytics tables,
//! supporting SQLite, MySQL/MariaDB and PostgreSQL.

mod analytics;
mod connection;
mod products;
mod users;

use sea_orm::DatabaseConnection;

use crate::errors::{EtalaseError, Result};

pub use analytics::{MonthlyClickRow, WeekdayClickRow, day_number};
pub use connection::{connect_generic, connect_sqlite, run_migrations};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(EtalaseError::database_connection(format!(
            "Cannot infer database type from URL: {}. Supported: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

pub struct CatalogStorage {
    db: DatabaseConnection,
    backend_name: String,
}

impl CatalogStorage {
    /// Connect, run pending migrations and return a ready storage handle
    pub async fn new(database_url: &str, backend_type: &str) -> Result<Self> {
        let db = match backend_type {
            "sqlite" => connection::connect_sqlite(database_url).await?,
            other => connection::connect_generic(database_url, other).await?,
        };

        connection::run_migrations(&db).await?;

        Ok(Self {
            db,
            backend_name: backend_type.to_string(),
        })
    }

    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn get_backend_name(&self) -> &str {
        &self.backend_name
    }
}
