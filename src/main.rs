//! formhook contact-form relay.
//!
//! Main entry point for the formhook server. Loads configuration, builds
//! the delivery client and serves the API until shutdown.

use anyhow::{Context, Result};
use formhook_api::{AppState, Config};
use formhook_delivery::DeliveryClient;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    init_tracing(&config.log_level)?;

    info!("Starting formhook contact-form relay");
    info!(
        host = %config.host,
        port = config.port,
        webhook_url = %config.webhook_url,
        delivery_timeout_seconds = config.delivery_timeout_seconds,
        "Configuration loaded"
    );

    let delivery = DeliveryClient::new(config.to_client_config())
        .context("Failed to build webhook delivery client")?;
    let state = AppState::new(delivery, config.webhook_url.as_str());

    let addr = config.parse_server_addr()?;
    formhook_api::start_server(state, addr, config.to_server_settings())
        .await
        .context("HTTP server failed")?;

    info!("formhook shutdown complete");
    Ok(())
}

/// Initializes tracing, preferring `RUST_LOG` over the configured level.
fn init_tracing(default_filter: &str) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .context("Invalid log filter")?;

    let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).try_init()?;
    Ok(())
}
