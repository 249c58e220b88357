use axum::{extract::State, middleware, routing::get, Json, Router};
use serde_json::json;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tower_http::services::ServeDir;

use crate::{
    app_state::AppState,
    middleware::{language_middleware, request_tracing_middleware},
    modules::{i18n::create_i18n_routes, pages::page_routes, time_intervals::time_interval_routes},
};

pub fn create_router(state: AppState) -> Router {
    let static_dir = state.env.app.static_dir.clone();

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/users", time_interval_routes())
        .nest("/api/i18n", create_i18n_routes())
        .merge(page_routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(middleware::from_fn(language_middleware))
        .layer(middleware::from_fn(request_tracing_middleware))
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let db_status = match state.store.health_check().await {
        Ok(()) => "healthy",
        Err(e) => {
            tracing::info!("Database health check failed: {}", e);
            "unhealthy"
        }
    };

    Json(json!({
        "status": "ok",
        "timestamp": OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default(),
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "database": db_status,
        }
    }))
}
