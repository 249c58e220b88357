use anyhow::Context;
use dotenv::dotenv;
use std::sync::Arc;
use tracing::info;

mod app;
mod app_state;
mod auth;
mod availability;
mod config;
mod db;
mod error;
mod i18n;
mod middleware;
mod modules;
mod telemetry;

use app_state::AppState;
use db::PgStore;
use telemetry::TelemetryConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = config::init().context("Failed to load configuration")?;

    telemetry::init_telemetry(Some(TelemetryConfig {
        environment: format!("{:?}", config.app.environment).to_lowercase(),
        log_format: config.app.log_format,
        ..TelemetryConfig::default()
    }))?;

    let pool = db::init_pool().await?;
    let store = Arc::new(PgStore::new(pool));

    let localizer = i18n::init_i18n(&config.app.locales_dir)
        .await
        .context("Failed to load translations")?;

    let state = AppState::new(
        store.clone(),
        store,
        config.clone(),
        Arc::new(localizer),
    );
    let app = app::create_router(state);

    let addr = config.server_addr();
    info!(
        "{} listening on {} (production: {})",
        config.app.name,
        addr,
        config.is_production()
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Failed to serve application")?;

    Ok(())
}
