//! Occupancy and revenue report handlers

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use hms_core::error::DomainError;
use hms_core::services::OccupancyReport;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DateRangeRequest {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl DateRangeRequest {
    fn check(&self) -> Result<(), ApiError> {
        if self.start_date >= self.end_date {
            return Err(DomainError::InvalidDateRange.into());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct RevenueReport {
    pub total_revenue: f64,
}

pub async fn occupancy(
    State(state): State<AppState>,
    Json(range): Json<DateRangeRequest>,
) -> Result<Json<ApiResponse<OccupancyReport>>, ApiError> {
    range.check()?;
    let report = state
        .report_service
        .occupancy(range.start_date, range.end_date)
        .await?;
    Ok(Json(ApiResponse::success(report)))
}

pub async fn total_revenue(
    State(state): State<AppState>,
    Json(range): Json<DateRangeRequest>,
) -> Result<Json<ApiResponse<RevenueReport>>, ApiError> {
    range.check()?;
    let total = state
        .report_service
        .total_revenue(range.start_date, range.end_date)
        .await?;
    Ok(Json(ApiResponse::success(RevenueReport {
        total_revenue: total,
    })))
}

pub async fn daily_revenue(
    State(state): State<AppState>,
    Json(range): Json<DateRangeRequest>,
) -> Result<Json<ApiResponse<BTreeMap<String, f64>>>, ApiError> {
    range.check()?;
    let buckets = state
        .report_service
        .daily_revenue(range.start_date, range.end_date)
        .await?;
    Ok(Json(ApiResponse::success(buckets)))
}

pub async fn monthly_revenue(
    State(state): State<AppState>,
    Json(range): Json<DateRangeRequest>,
) -> Result<Json<ApiResponse<BTreeMap<String, f64>>>, ApiError> {
    range.check()?;
    let buckets = state
        .report_service
        .monthly_revenue(range.start_date, range.end_date)
        .await?;
    Ok(Json(ApiResponse::success(buckets)))
}
