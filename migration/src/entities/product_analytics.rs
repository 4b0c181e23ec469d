//! Daily marketplace-click aggregate
//!
//! One row per calendar date (unique index), summing Shopee and Tokopedia
//! clicks across all products. `day_number` uses the Sunday=1..Saturday=7
//! convention and is derived from `date`, not from the insertion moment.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "product_analytics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub date: Date,
    pub day_number: i32,
    pub shopee_click: i64,
    pub tokopedia_click: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
