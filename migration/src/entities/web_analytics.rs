//! Monthly web-visitor counter
//!
//! One row per (month, year), enforced by a unique index. Rows are created
//! on the first visit of a month and incremented afterwards, never deleted.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "web_analytics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub month: i32,
    pub year: i32,
    pub web_visitors: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
