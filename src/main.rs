//! Benefits engine HTTP server.
//!
//! Loads the dataset named by `BENEFITS_DATA_DIR` (default `./config/sample`)
//! and serves the API on `BENEFITS_BIND_ADDR` (default `0.0.0.0:3000`).

use benefits_engine::api::{create_router, AppState};
use benefits_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DATA_DIR: &str = "./config/sample";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_dir =
        std::env::var("BENEFITS_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
    let bind_addr =
        std::env::var("BENEFITS_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let config = ConfigLoader::load(&data_dir)?;
    info!(
        data_dir = %data_dir,
        dataset = %config.metadata().name,
        "Dataset loaded"
    );

    let app = create_router(AppState::from_config(config));
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}
