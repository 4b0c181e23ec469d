//! Wire types for the JSON API
//!
//! The storefront frontend expects camelCase keys, so every response DTO
//! renames accordingly. Image references are stored comma-joined on the
//! row but always serialized as an array.

use serde::{Deserialize, Serialize};

use crate::services::{ImageStore, MonthClicks, YearClickReport};
use crate::storage::Category;
use crate::storage::backend::WeekdayClickRow;
use migration::entities::{product, user, web_analytics};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new<T: Into<String>>(msg: T) -> Self {
        Self { msg: msg.into() }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub uuid: String,
    pub name: String,
    pub category: String,
    pub image: Vec<String>,
    pub price: i64,
    pub description: String,
    pub stock: i32,
    pub is_hot_deal: bool,
    pub shopee_link: String,
    pub tokopedia_link: String,
    pub count_view: i64,
    pub shopee_click: i64,
    pub tokopedia_click: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<product::Model> for ProductResponse {
    fn from(m: product::Model) -> Self {
        Self {
            uuid: m.uuid,
            name: m.name,
            category: m.category,
            image: ImageStore::split_refs(&m.image),
            price: m.price,
            description: m.description,
            stock: m.stock,
            is_hot_deal: m.is_hot_deal,
            shopee_link: m.shopee_link,
            tokopedia_link: m.tokopedia_link,
            count_view: m.count_view,
            shopee_click: m.shopee_click,
            tokopedia_click: m.tokopedia_click,
            created_at: m.created_at.to_rfc3339(),
            updated_at: m.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPageResponse {
    pub error: bool,
    pub total_products: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub categories: Vec<String>,
    pub products: Vec<ProductResponse>,
}

impl CatalogPageResponse {
    pub fn new(page: crate::services::CatalogPage) -> Self {
        Self {
            error: false,
            total_products: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
            categories: Category::all_names(),
            products: page.products.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub error: bool,
    pub products: Vec<ProductResponse>,
}

impl ProductListResponse {
    pub fn new(products: Vec<product::Model>) -> Self {
        Self {
            error: false,
            products: products.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub uuid: String,
    pub name: String,
    pub email: String,
}

impl From<user::Model> for UserResponse {
    fn from(m: user::Model) -> Self {
        Self {
            uuid: m.uuid,
            name: m.name,
            email: m.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub msg: String,
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub conf_password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebVisitorResponse {
    pub month: i32,
    pub year: i32,
    pub web_visitors: i64,
}

impl From<web_analytics::Model> for WebVisitorResponse {
    fn from(m: web_analytics::Model) -> Self {
        Self {
            month: m.month,
            year: m.year,
            web_visitors: m.web_visitors,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthClicksResponse {
    pub month: i32,
    pub total_shopee_clicks: i64,
    pub total_tokopedia_clicks: i64,
}

impl From<MonthClicks> for MonthClicksResponse {
    fn from(m: MonthClicks) -> Self {
        Self {
            month: m.month,
            total_shopee_clicks: m.total_shopee,
            total_tokopedia_clicks: m.total_tokopedia,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct YearClicksResponse {
    pub year: i32,
    pub data: Vec<MonthClicksResponse>,
}

impl From<YearClickReport> for YearClicksResponse {
    fn from(r: YearClickReport) -> Self {
        Self {
            year: r.year,
            data: r.months.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayClicksResponse {
    pub day_number: i32,
    pub total_shopee_clicks: i64,
    pub total_tokopedia_clicks: i64,
}

impl From<WeekdayClickRow> for WeekdayClicksResponse {
    fn from(r: WeekdayClickRow) -> Self {
        Self {
            day_number: r.day_number,
            total_shopee_clicks: r.total_shopee,
            total_tokopedia_clicks: r.total_tokopedia,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalClicksResponse {
    pub total_link_visited: i64,
}
