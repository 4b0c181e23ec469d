//! Service layer for business logic
//!
//! Validation and orchestration between the HTTP handlers and storage.
//! Handlers pass parsed, typed inputs (including the acting user where
//! ownership matters) and get back models or typed errors.

mod analytics_service;
mod auth_service;
mod catalog_service;
mod image_store;

pub use analytics_service::*;
pub use auth_service::*;
pub use catalog_service::*;
pub use image_store::ImageStore;
