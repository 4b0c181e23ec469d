//! Counter-bucket upserts and aggregate queries
//!
//! The bump methods are single-statement upserts: insert the bucket row
//! with its defaults and, on unique-key conflict, increment the counter in
//! the same statement. Two concurrent bumps of the same bucket therefore
//! never create duplicate rows or lose an update; the storage engine's
//! conflict handling is the only synchronization.

use chrono::{Datelike, NaiveDate, Weekday};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect,
    sea_query::{Expr, ExprTrait, OnConflict},
};

use crate::errors::{EtalaseError, Result};
use crate::storage::models::Marketplace;
use migration::entities::{product_analytics, web_analytics};

/// Monthly roll-up row: (year, month) with click sums across all products
#[derive(Debug, FromQueryResult)]
pub struct MonthlyClickRow {
    pub year: i32,
    pub month: i32,
    pub total_shopee: i64,
    pub total_tokopedia: i64,
}

/// One weekday of an ISO-week roll-up
#[derive(Debug, FromQueryResult)]
pub struct WeekdayClickRow {
    pub day_number: i32,
    pub total_shopee: i64,
    pub total_tokopedia: i64,
}

#[derive(Debug, FromQueryResult)]
struct TotalRow {
    total: i64,
}

/// Day-of-week number under the Sunday=1..Saturday=7 convention,
/// derived from the date itself so backfilled dates stay correct.
pub fn day_number(date: NaiveDate) -> i32 {
    date.weekday().num_days_from_sunday() as i32 + 1
}

impl super::CatalogStorage {
    /// Ensure the (month, year) visitor bucket exists and add one visit.
    ///
    /// Returns the row as it stands after the bump.
    pub async fn bump_web_visitors(&self, month: u32, year: i32) -> Result<web_analytics::Model> {
        let model = web_analytics::ActiveModel {
            month: Set(month as i32),
            year: Set(year),
            web_visitors: Set(1),
            ..Default::default()
        };

        let on_conflict = OnConflict::columns([
            web_analytics::Column::Month,
            web_analytics::Column::Year,
        ])
        .value(
            web_analytics::Column::WebVisitors,
            Expr::col(web_analytics::Column::WebVisitors).add(1),
        )
        .to_owned();

        web_analytics::Entity::insert(model)
            .on_conflict(on_conflict)
            .exec_without_returning(&self.db)
            .await?;

        web_analytics::Entity::find()
            .filter(web_analytics::Column::Month.eq(month as i32))
            .filter(web_analytics::Column::Year.eq(year))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                EtalaseError::database_operation("visitor bucket missing after upsert")
            })
    }

    /// Ensure the daily click bucket exists and add one click for the
    /// given marketplace. day_number comes from `date`, not from now.
    pub async fn bump_daily_clicks(
        &self,
        date: NaiveDate,
        marketplace: Marketplace,
    ) -> Result<product_analytics::Model> {
        let (shopee, tokopedia) = match marketplace {
            Marketplace::Shopee => (1, 0),
            Marketplace::Tokopedia => (0, 1),
        };

        let model = product_analytics::ActiveModel {
            date: Set(date),
            day_number: Set(day_number(date)),
            shopee_click: Set(shopee),
            tokopedia_click: Set(tokopedia),
            ..Default::default()
        };

        let bumped_column = match marketplace {
            Marketplace::Shopee => product_analytics::Column::ShopeeClick,
            Marketplace::Tokopedia => product_analytics::Column::TokopediaClick,
        };

        let on_conflict = OnConflict::column(product_analytics::Column::Date)
            .value(bumped_column, Expr::col(bumped_column).add(1))
            .to_owned();

        product_analytics::Entity::insert(model)
            .on_conflict(on_conflict)
            .exec_without_returning(&self.db)
            .await?;

        product_analytics::Entity::find()
            .filter(product_analytics::Column::Date.eq(date))
            .one(&self.db)
            .await?
            .ok_or_else(|| EtalaseError::database_operation("daily bucket missing after upsert"))
    }

    /// Click sums grouped by (year, month), ascending
    pub async fn monthly_totals(&self) -> Result<Vec<MonthlyClickRow>> {
        let year_expr = self.year_of_date_expr();
        let month_expr = self.month_of_date_expr();

        product_analytics::Entity::find()
            .select_only()
            .column_as(year_expr.clone(), "year")
            .column_as(month_expr.clone(), "month")
            .column_as(product_analytics::Column::ShopeeClick.sum(), "total_shopee")
            .column_as(
                product_analytics::Column::TokopediaClick.sum(),
                "total_tokopedia",
            )
            .group_by(year_expr)
            .group_by(month_expr)
            .order_by_asc(Expr::cust("year"))
            .order_by_asc(Expr::cust("month"))
            .into_model::<MonthlyClickRow>()
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    /// Click sums per weekday for one exact ISO week.
    ///
    /// The week is turned into a [monday, next monday) date range in Rust,
    /// so ISO-8601 membership holds across year boundaries regardless of
    /// the SQL backend's own week function.
    pub async fn weekly_totals(&self, iso_week: u32, iso_year: i32) -> Result<Vec<WeekdayClickRow>> {
        let monday = NaiveDate::from_isoywd_opt(iso_year, iso_week, Weekday::Mon).ok_or_else(
            || {
                EtalaseError::validation(format!(
                    "No such ISO week: week {} of {}",
                    iso_week, iso_year
                ))
            },
        )?;
        let next_monday = monday + chrono::Duration::days(7);

        product_analytics::Entity::find()
            .select_only()
            .column(product_analytics::Column::DayNumber)
            .column_as(product_analytics::Column::ShopeeClick.sum(), "total_shopee")
            .column_as(
                product_analytics::Column::TokopediaClick.sum(),
                "total_tokopedia",
            )
            .filter(product_analytics::Column::Date.gte(monday))
            .filter(product_analytics::Column::Date.lt(next_monday))
            .group_by(product_analytics::Column::DayNumber)
            .order_by_asc(product_analytics::Column::DayNumber)
            .into_model::<WeekdayClickRow>()
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    /// Combined Shopee + Tokopedia clicks over all daily buckets, NULL-safe
    pub async fn total_link_clicks(&self) -> Result<i64> {
        let row = product_analytics::Entity::find()
            .select_only()
            .column_as(
                Expr::cust("COALESCE(SUM(shopee_click + tokopedia_click), 0)"),
                "total",
            )
            .into_model::<TotalRow>()
            .one(&self.db)
            .await?;

        Ok(row.map(|r| r.total).unwrap_or(0))
    }

    /// Visitor buckets for one calendar year, ordered by month
    pub async fn visitors_for_year(&self, year: i32) -> Result<Vec<web_analytics::Model>> {
        web_analytics::Entity::find()
            .filter(web_analytics::Column::Year.eq(year))
            .order_by_asc(web_analytics::Column::Month)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    /// Lookup of a single daily bucket, mainly for tests and reconciliation
    pub async fn find_daily_bucket(
        &self,
        date: NaiveDate,
    ) -> Result<Option<product_analytics::Model>> {
        product_analytics::Entity::find()
            .filter(product_analytics::Column::Date.eq(date))
            .one(&self.db)
            .await
            .map_err(Into::into)
    }

    fn year_of_date_expr(&self) -> Expr {
        match self.backend_name.as_str() {
            "sqlite" => Expr::cust("CAST(strftime('%Y', date) AS INTEGER)"),
            "mysql" => Expr::cust("YEAR(date)"),
            _ => Expr::cust("CAST(EXTRACT(YEAR FROM \"date\") AS INTEGER)"),
        }
    }

    fn month_of_date_expr(&self) -> Expr {
        match self.backend_name.as_str() {
            "sqlite" => Expr::cust("CAST(strftime('%m', date) AS INTEGER)"),
            "mysql" => Expr::cust("MONTH(date)"),
            _ => Expr::cust("CAST(EXTRACT(MONTH FROM \"date\") AS INTEGER)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_number_sunday_is_one() {
        // 2024-03-10 is a Sunday
        let d = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(day_number(d), 1);
    }

    #[test]
    fn test_day_number_friday_is_six() {
        // 2024-03-15 is a Friday
        let d = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(day_number(d), 6);
    }

    #[test]
    fn test_day_number_saturday_is_seven() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();
        assert_eq!(day_number(d), 7);
    }
}
