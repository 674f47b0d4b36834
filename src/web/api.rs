use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::engine::{ChartSeries, DashboardSnapshot};
use crate::error::DashboardError;
use crate::types::{MacroRow, NewsItem};
use super::AppState;

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            DashboardError::Http(_)
            | DashboardError::Csv(_)
            | DashboardError::Xml(_)
            | DashboardError::Provider { .. }
            | DashboardError::EmptySeries { .. }
            | DashboardError::NoAlignedRows
            | DashboardError::InsufficientHistory { .. }
            | DashboardError::TrendUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            DashboardError::Json(_)
            | DashboardError::Template(_)
            | DashboardError::Config(_)
            | DashboardError::InvalidConfig(_) => {
                error!("Internal error: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

// === Data Endpoints ===

pub async fn get_snapshot(
    State(state): State<AppState>,
) -> Result<Json<DashboardSnapshot>, DashboardError> {
    let (_, snapshot) = state.service.snapshot().await?;
    Ok(Json(snapshot))
}

#[derive(Serialize)]
pub struct SeriesResponse<'a> {
    pub rows: &'a [MacroRow],
    pub charts: ChartSeries,
}

pub async fn get_series(
    State(state): State<AppState>,
) -> Result<Response, DashboardError> {
    let table = state.service.macro_table().await?;
    let body = SeriesResponse {
        rows: table.rows(),
        charts: ChartSeries::from_table(&table),
    };
    Ok(Json(body).into_response())
}

pub async fn get_news(
    State(state): State<AppState>,
) -> Json<Vec<NewsItem>> {
    let items = state.service.headlines().await;
    Json(items.as_ref().clone())
}

// === Health Check ===

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: i64,
}

pub async fn health_check(
    State(state): State<AppState>,
) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: (Utc::now() - state.started_at).num_seconds(),
    })
}
