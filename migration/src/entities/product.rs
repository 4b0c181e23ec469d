//! Catalog product entity
//!
//! `image` holds one or more stored image URLs joined by commas.
//! The two click counters are the per-product accumulators behind the
//! best-seller ranking; the daily breakdown lives in `product_analytics`.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub uuid: String,
    #[sea_orm(unique)]
    pub name: String,
    pub category: String,
    #[sea_orm(column_type = "Text")]
    pub image: String,
    pub price: i64,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub stock: i32,
    pub is_hot_deal: bool,
    #[sea_orm(column_type = "Text")]
    pub shopee_link: String,
    #[sea_orm(column_type = "Text")]
    pub tokopedia_link: String,
    pub count_view: i64,
    pub shopee_click: i64,
    pub tokopedia_click: i64,
    pub user_id: i64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
