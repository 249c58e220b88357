use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::LogFormat;

/// Telemetry configuration structure
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub service_version: String,
    pub environment: String,
    pub log_format: LogFormat,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: env!("CARGO_PKG_NAME").to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: std::env::var("APP_ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            log_format: LogFormat::default(),
        }
    }
}

/// Install the global tracing subscriber.
pub fn init_telemetry(config: Option<TelemetryConfig>) -> Result<()> {
    let config = config.unwrap_or_default();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into());

    let registry = Registry::default().with(env_filter);
    match config.log_format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init(),
    }
    .context("Failed to initialize tracing subscriber")?;

    info!(
        service = %config.service_name,
        version = %config.service_version,
        environment = %config.environment,
        "Telemetry initialized"
    );
    Ok(())
}
