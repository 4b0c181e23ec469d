//! Catalog query indexes
//!
//! Covers the filter and ranking paths: category/price filtering, hot-deal
//! listing and the created_at ordering used by the new-collection query.
//! The combined-click ranking stays a query-time expression, so no index.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_products_category")
                    .table(Product::Table)
                    .col(Product::Category)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_products_price")
                    .table(Product::Table)
                    .col(Product::Price)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_products_hot_deal")
                    .table(Product::Table)
                    .col(Product::IsHotDeal)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_products_created_at")
                    .table(Product::Table)
                    .col(Product::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_products_created_at").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_products_hot_deal").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_products_price").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_products_category").to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Product {
    #[sea_orm(iden = "products")]
    Table,
    Category,
    Price,
    IsHotDeal,
    CreatedAt,
}
