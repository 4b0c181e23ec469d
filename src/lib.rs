//! Etalase: catalog backend for a small storefront
//!
//! Products are browsed here but sold on Shopee and Tokopedia; the
//! interesting parts are the marketplace click analytics (per-day buckets
//! rolled up into monthly and ISO-week reports) and the monthly web
//! visitor counters, both backed by atomic upsert-with-increment writes.
//!
//! Module layout:
//! - `api`: actix-web route table, wire DTOs, bearer-token extraction
//! - `services`: business logic between handlers and storage
//! - `storage`: SeaORM-backed queries over sqlite/mysql/postgres
//! - `config`: TOML file plus environment overrides
//! - `system`: process-level concerns (logging init)

pub mod api;
pub mod config;
pub mod errors;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
