//! Initial schema: users, products and the two analytics bucket tables.
//!
//! The unique indexes on web_analytics (month, year) and
//! product_analytics (date) are load-bearing: the counter upserts rely on
//! them for conflict detection.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(User::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(User::Uuid)
                            .string_len(36)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(User::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(User::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(User::Password).string_len(255).not_null())
                    .col(
                        ColumnDef::new(User::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(User::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Product::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Product::Uuid)
                            .string_len(36)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Product::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Product::Category).string_len(50).not_null())
                    .col(ColumnDef::new(Product::Image).text().not_null())
                    .col(
                        ColumnDef::new(Product::Price)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Product::Description).text().not_null())
                    .col(ColumnDef::new(Product::Stock).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Product::IsHotDeal)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Product::ShopeeLink).text().not_null())
                    .col(ColumnDef::new(Product::TokopediaLink).text().not_null())
                    .col(
                        ColumnDef::new(Product::CountView)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Product::ShopeeClick)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Product::TokopediaClick)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Product::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Product::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Product::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_user")
                            .from(Product::Table, Product::UserId)
                            .to(User::Table, User::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WebAnalytics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WebAnalytics::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WebAnalytics::Month).integer().not_null())
                    .col(ColumnDef::new(WebAnalytics::Year).integer().not_null())
                    .col(
                        ColumnDef::new(WebAnalytics::WebVisitors)
                            .big_integer()
                            .not_null()
                            .default(1),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_web_analytics_month_year")
                    .table(WebAnalytics::Table)
                    .col(WebAnalytics::Month)
                    .col(WebAnalytics::Year)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductAnalytics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductAnalytics::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProductAnalytics::Date).date().not_null())
                    .col(
                        ColumnDef::new(ProductAnalytics::DayNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductAnalytics::ShopeeClick)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ProductAnalytics::TokopediaClick)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_product_analytics_date")
                    .table(ProductAnalytics::Table)
                    .col(ProductAnalytics::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_product_analytics_date").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_web_analytics_month_year")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(ProductAnalytics::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WebAnalytics::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Product::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Uuid,
    Name,
    Email,
    Password,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Product {
    #[sea_orm(iden = "products")]
    Table,
    Id,
    Uuid,
    Name,
    Category,
    Image,
    Price,
    Description,
    Stock,
    IsHotDeal,
    ShopeeLink,
    TokopediaLink,
    CountView,
    ShopeeClick,
    TokopediaClick,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum WebAnalytics {
    #[sea_orm(iden = "web_analytics")]
    Table,
    Id,
    Month,
    Year,
    WebVisitors,
}

#[derive(DeriveIden)]
enum ProductAnalytics {
    #[sea_orm(iden = "product_analytics")]
    Table,
    Id,
    Date,
    DayNumber,
    ShopeeClick,
    TokopediaClick,
}
