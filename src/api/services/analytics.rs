//! Analytics endpoints: the public visitor tracker plus the guarded
//! dashboard reports

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use chrono::Utc;

use crate::api::middleware::AuthedUser;
use crate::api::types::{
    TotalClicksResponse, WebVisitorResponse, WeekdayClicksResponse, YearClicksResponse,
};
use crate::errors::EtalaseError;
use crate::services::AnalyticsService;

/// POST /api/track-web-visitor
pub async fn track_web_visitor(
    analytics: web::Data<Arc<AnalyticsService>>,
) -> Result<HttpResponse, EtalaseError> {
    let bucket = analytics.track_web_visitor().await?;
    Ok(HttpResponse::Ok().json(WebVisitorResponse::from(bucket)))
}

/// GET /api/analytics/web-visitors
pub async fn web_visitors(
    analytics: web::Data<Arc<AnalyticsService>>,
    _user: AuthedUser,
) -> Result<HttpResponse, EtalaseError> {
    let rows = analytics.web_visitors_current_year().await?;
    let body: Vec<WebVisitorResponse> = rows.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/analytics/product-monthly
pub async fn product_monthly(
    analytics: web::Data<Arc<AnalyticsService>>,
    _user: AuthedUser,
) -> Result<HttpResponse, EtalaseError> {
    let reports = analytics.monthly_report().await?;
    let body: Vec<YearClicksResponse> = reports.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/analytics/product-weekly
pub async fn product_weekly(
    analytics: web::Data<Arc<AnalyticsService>>,
    _user: AuthedUser,
) -> Result<HttpResponse, EtalaseError> {
    let rows = analytics.weekly_report(Utc::now().date_naive()).await?;
    let body: Vec<WeekdayClicksResponse> = rows.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/analytics/total-link-visited
pub async fn total_link_visited(
    analytics: web::Data<Arc<AnalyticsService>>,
    _user: AuthedUser,
) -> Result<HttpResponse, EtalaseError> {
    let total = analytics.total_link_clicks().await?;
    Ok(HttpResponse::Ok().json(TotalClicksResponse {
        total_link_visited: total,
    }))
}
