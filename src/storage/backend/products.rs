//! Product catalog queries
//!
//! Filtering, pagination and the ranking queries. Rankings order by
//! query-time expressions (e.g. shopee_click + tokopedia_click) so there is
//! no denormalized sort column to drift from the counters; ties fall back
//! to insertion order via the id column.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
    sea_query::{Expr, ExprTrait, Func},
};

use crate::errors::Result;
use crate::storage::models::{Marketplace, ProductFilter, SortKey, SortOrder};
use migration::entities::product;

impl super::CatalogStorage {
    pub async fn list_all_products(&self) -> Result<Vec<product::Model>> {
        product::Entity::find()
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    /// One page of the catalog plus the total row count for the filter
    pub async fn find_product_page(
        &self,
        filter: &ProductFilter,
    ) -> Result<(Vec<product::Model>, u64)> {
        let cond = Self::filter_condition(filter);

        let total = product::Entity::find()
            .filter(cond.clone())
            .count(&self.db)
            .await?;

        let sort_col = match filter.sort_by {
            SortKey::Name => product::Column::Name,
            SortKey::Price => product::Column::Price,
            SortKey::Date => product::Column::CreatedAt,
        };

        let query = product::Entity::find().filter(cond);
        let query = match filter.sort_order {
            SortOrder::Asc => query.order_by_asc(sort_col),
            SortOrder::Desc => query.order_by_desc(sort_col),
        };

        let rows = query
            .offset((filter.page - 1) * filter.limit)
            .limit(filter.limit)
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }

    fn filter_condition(filter: &ProductFilter) -> Condition {
        let mut cond = Condition::all();

        if !filter.categories.is_empty() {
            cond = cond.add(
                product::Column::Category.is_in(filter.categories.iter().map(|c| c.to_string())),
            );
        }

        if let Some(search) = &filter.search
            && !search.is_empty()
        {
            // LOWER(name) LIKE %term% keeps the match case-insensitive on
            // every backend, including PostgreSQL
            let pattern = format!("%{}%", search.to_lowercase());
            cond = cond.add(Expr::expr(Func::lower(Expr::col(product::Column::Name))).like(pattern));
        }

        if let Some(min) = filter.min_price {
            cond = cond.add(product::Column::Price.gte(min));
        }
        if let Some(max) = filter.max_price {
            cond = cond.add(product::Column::Price.lte(max));
        }

        cond
    }

    pub async fn find_product_by_uuid(&self, uuid: &str) -> Result<Option<product::Model>> {
        product::Entity::find()
            .filter(product::Column::Uuid.eq(uuid))
            .one(&self.db)
            .await
            .map_err(Into::into)
    }

    /// Case-insensitive exact name match, used by slug lookups
    pub async fn find_product_by_name_ci(&self, name: &str) -> Result<Option<product::Model>> {
        product::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(product::Column::Name))).eq(name.to_lowercase()))
            .one(&self.db)
            .await
            .map_err(Into::into)
    }

    pub async fn product_name_exists(&self, name: &str) -> Result<bool> {
        let count = product::Entity::find()
            .filter(product::Column::Name.eq(name))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    /// Products sharing a category, excluding the product itself
    pub async fn find_similar_products(
        &self,
        category: &str,
        exclude_uuid: &str,
    ) -> Result<Vec<product::Model>> {
        product::Entity::find()
            .filter(product::Column::Category.eq(category))
            .filter(product::Column::Uuid.ne(exclude_uuid))
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    pub async fn insert_product(&self, model: product::ActiveModel) -> Result<product::Model> {
        model.insert(&self.db).await.map_err(Into::into)
    }

    pub async fn update_product(&self, model: product::ActiveModel) -> Result<product::Model> {
        model.update(&self.db).await.map_err(Into::into)
    }

    pub async fn delete_product(&self, model: product::Model) -> Result<()> {
        model.delete(&self.db).await?;
        Ok(())
    }

    /// Atomic view-counter increment on the product row
    pub async fn increment_product_view(&self, uuid: &str) -> Result<()> {
        product::Entity::update_many()
            .col_expr(
                product::Column::CountView,
                Expr::col(product::Column::CountView).add(1),
            )
            .filter(product::Column::Uuid.eq(uuid))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Atomic per-product click increment for one marketplace link
    pub async fn increment_product_click(
        &self,
        uuid: &str,
        marketplace: Marketplace,
    ) -> Result<()> {
        let column = match marketplace {
            Marketplace::Shopee => product::Column::ShopeeClick,
            Marketplace::Tokopedia => product::Column::TokopediaClick,
        };

        product::Entity::update_many()
            .col_expr(column, Expr::col(column).add(1))
            .filter(product::Column::Uuid.eq(uuid))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Top products by shopee_click + tokopedia_click, computed at query
    /// time; zero counters rank fine, ties keep insertion order
    pub async fn top_by_combined_clicks(&self, limit: u64) -> Result<Vec<product::Model>> {
        product::Entity::find()
            .order_by_desc(
                Expr::col(product::Column::ShopeeClick)
                    .add(Expr::col(product::Column::TokopediaClick)),
            )
            .order_by_asc(product::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    pub async fn top_by_view(&self, limit: u64) -> Result<Vec<product::Model>> {
        product::Entity::find()
            .order_by_desc(product::Column::CountView)
            .order_by_asc(product::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    pub async fn newest_products(&self, limit: u64) -> Result<Vec<product::Model>> {
        product::Entity::find()
            .order_by_desc(product::Column::CreatedAt)
            .order_by_desc(product::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    pub async fn hot_deal_products(&self) -> Result<Vec<product::Model>> {
        product::Entity::find()
            .filter(product::Column::IsHotDeal.eq(true))
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }
}
