use askama::Template;
use axum::{extract::State, response::Html, routing::get, Router};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::{api, AppState, DashboardPage};
use crate::error::DashboardError;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Dashboard page
        .route("/", get(serve_dashboard))
        // API endpoints
        .route("/api/health", get(api::health_check))
        .route("/api/snapshot", get(api::get_snapshot))
        .route("/api/series", get(api::get_series))
        .route("/api/news", get(api::get_news))
        .layer(cors)
        .with_state(state)
}

pub async fn start_dashboard_server(state: AppState, bind: &str, port: u16) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    info!("Dashboard server starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Renders the full page, or only the error message when the macro data
/// cannot be assembled.
async fn serve_dashboard(State(state): State<AppState>) -> Result<Html<String>, DashboardError> {
    let page = match state.service.snapshot().await {
        Ok((table, snapshot)) => {
            let news = state.service.headlines().await;
            DashboardPage::ready(&table, &snapshot, &news, state.service.trend_window())?
        }
        Err(_) => DashboardPage::unavailable(),
    };
    Ok(Html(page.render()?))
}
