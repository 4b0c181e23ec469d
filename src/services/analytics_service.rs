//! Analytics service layer
//!
//! Write path: find-or-create-then-increment on a time bucket, delegated to
//! the storage layer's atomic upsert so concurrent requests never lose an
//! update. Read path: the monthly/weekly roll-ups and the combined click
//! total behind the dashboard.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use tracing::debug;

use crate::errors::{EtalaseError, Result};
use crate::storage::backend::{MonthlyClickRow, WeekdayClickRow};
use crate::storage::{CatalogStorage, Marketplace};

use migration::entities::{product_analytics, web_analytics};

/// Monthly click totals for one calendar year, months ascending
#[derive(Debug)]
pub struct YearClickReport {
    pub year: i32,
    pub months: Vec<MonthClicks>,
}

#[derive(Debug)]
pub struct MonthClicks {
    pub month: i32,
    pub total_shopee: i64,
    pub total_tokopedia: i64,
}

pub struct AnalyticsService {
    storage: Arc<CatalogStorage>,
}

impl AnalyticsService {
    pub fn new(storage: Arc<CatalogStorage>) -> Self {
        Self { storage }
    }

    /// Strict YYYY-MM-DD parse; malformed input is rejected before any
    /// storage access, never coerced
    pub fn parse_date(s: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
            EtalaseError::validation(format!("Invalid date '{}': {} (expected YYYY-MM-DD)", s, e))
        })
    }

    /// Count one web visit against the current (month, year) bucket
    pub async fn track_web_visitor(&self) -> Result<web_analytics::Model> {
        let now = Utc::now();
        self.bump_visitors(now.month(), now.year()).await
    }

    pub async fn bump_visitors(&self, month: u32, year: i32) -> Result<web_analytics::Model> {
        if !(1..=12).contains(&month) {
            return Err(EtalaseError::validation(format!(
                "Month out of range: {}",
                month
            )));
        }
        let row = self.storage.bump_web_visitors(month, year).await?;
        debug!(
            "Visitor bucket {}/{} now at {}",
            row.month, row.year, row.web_visitors
        );
        Ok(row)
    }

    /// Visitor counts per month for the current year.
    ///
    /// An empty year is a NotFound, matching the storefront's expectation
    /// of a 404 before any data exists.
    pub async fn web_visitors_current_year(&self) -> Result<Vec<web_analytics::Model>> {
        let year = Utc::now().year();
        let rows = self.storage.visitors_for_year(year).await?;
        if rows.is_empty() {
            return Err(EtalaseError::not_found(format!(
                "No web analytics data for {}",
                year
            )));
        }
        Ok(rows)
    }

    /// Monthly click totals grouped under their year, both ascending
    pub async fn monthly_report(&self) -> Result<Vec<YearClickReport>> {
        let rows = self.storage.monthly_totals().await?;
        Ok(Self::group_by_year(rows))
    }

    fn group_by_year(rows: Vec<MonthlyClickRow>) -> Vec<YearClickReport> {
        let mut reports: Vec<YearClickReport> = Vec::new();
        for row in rows {
            match reports.last_mut() {
                Some(report) if report.year == row.year => report.months.push(MonthClicks {
                    month: row.month,
                    total_shopee: row.total_shopee,
                    total_tokopedia: row.total_tokopedia,
                }),
                _ => reports.push(YearClickReport {
                    year: row.year,
                    months: vec![MonthClicks {
                        month: row.month,
                        total_shopee: row.total_shopee,
                        total_tokopedia: row.total_tokopedia,
                    }],
                }),
            }
        }
        reports
    }

    /// Per-weekday totals for the ISO week containing `today`
    pub async fn weekly_report(&self, today: NaiveDate) -> Result<Vec<WeekdayClickRow>> {
        let iso = today.iso_week();
        self.storage.weekly_totals(iso.week(), iso.year()).await
    }

    pub async fn weekly_report_for(
        &self,
        iso_week: u32,
        iso_year: i32,
    ) -> Result<Vec<WeekdayClickRow>> {
        self.storage.weekly_totals(iso_week, iso_year).await
    }

    pub async fn total_link_clicks(&self) -> Result<i64> {
        self.storage.total_link_clicks().await
    }

    /// Record one affiliate-link click: bump the per-product counter and
    /// the global daily bucket for the given date (today when absent).
    pub async fn record_marketplace_click(
        &self,
        product_uuid: &str,
        marketplace: Marketplace,
        date: Option<&str>,
    ) -> Result<product_analytics::Model> {
        let date = match date {
            Some(s) => Self::parse_date(s)?,
            None => Utc::now().date_naive(),
        };

        let product = self
            .storage
            .find_product_by_uuid(product_uuid)
            .await?
            .ok_or_else(|| EtalaseError::not_found("Product not found"))?;

        self.storage
            .increment_product_click(&product.uuid, marketplace)
            .await?;
        let bucket = self.storage.bump_daily_clicks(date, marketplace).await?;

        debug!(
            "{} click recorded for {} on {} (bucket: {}/{})",
            marketplace.as_str(),
            product.uuid,
            date,
            bucket.shopee_click,
            bucket.tokopedia_click
        );
        Ok(bucket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_valid() {
        let d = AnalyticsService::parse_date("2024-03-15").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(AnalyticsService::parse_date("15-03-2024").is_err());
        assert!(AnalyticsService::parse_date("2024-13-01").is_err());
        assert!(AnalyticsService::parse_date("not-a-date").is_err());
    }

    #[test]
    fn test_group_by_year_splits_on_year_change() {
        let rows = vec![
            MonthlyClickRow {
                year: 2023,
                month: 11,
                total_shopee: 5,
                total_tokopedia: 2,
            },
            MonthlyClickRow {
                year: 2023,
                month: 12,
                total_shopee: 1,
                total_tokopedia: 0,
            },
            MonthlyClickRow {
                year: 2024,
                month: 1,
                total_shopee: 3,
                total_tokopedia: 7,
            },
        ];
        let reports = AnalyticsService::group_by_year(rows);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].year, 2023);
        assert_eq!(reports[0].months.len(), 2);
        assert_eq!(reports[1].year, 2024);
        assert_eq!(reports[1].months[0].total_tokopedia, 7);
    }
}
