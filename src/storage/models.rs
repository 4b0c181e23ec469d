//! Domain types shared between the storage and service layers.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Fixed product category set. Unknown values coming in from query strings
/// are dropped from filters, not rejected; on product create/update they
/// are a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum Category {
    #[strum(serialize = "Alat Make Up")]
    AlatMakeUp,
    #[strum(serialize = "Box Kado")]
    BoxKado,
    #[strum(serialize = "Figura")]
    Figura,
    #[strum(serialize = "Alat Tulis")]
    AlatTulis,
    #[strum(serialize = "Pernak-pernik")]
    PernakPernik,
    #[strum(serialize = "Kertas Daur Ulang")]
    KertasDaurUlang,
}

impl Category {
    /// The allow-list in display form, also returned in catalog responses
    pub fn all_names() -> Vec<String> {
        Category::iter().map(|c| c.to_string()).collect()
    }
}

/// Which affiliate link was clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marketplace {
    Shopee,
    Tokopedia,
}

impl Marketplace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Marketplace::Shopee => "shopee",
            Marketplace::Tokopedia => "tokopedia",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Price,
    /// Creation timestamp, exposed as "date" in the query string
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Validated catalog filter, produced by the service layer. Page and limit
/// are already clamped; categories already checked against the allow-list.
#[derive(Debug, Clone)]
pub struct ProductFilter {
    pub categories: Vec<Category>,
    pub search: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
    pub page: u64,
    pub limit: u64,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            search: None,
            min_price: None,
            max_price: None,
            sort_by: SortKey::default(),
            sort_order: SortOrder::default(),
            page: 1,
            limit: 10,
        }
    }
}
