use std::env;

use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use hr_engine::api::{AppState, create_router};
use hr_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config_dir =
        env::var("HR_ENGINE_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let addr = env::var("HR_ENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir).inspect_err(|e| {
        error!(config_dir = %config_dir, error = %e, "Failed to load policy configuration");
    })?;
    info!(
        policy = %config.metadata().name,
        version = %config.metadata().version,
        "Policy configuration loaded"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Server starting...");

    axum::serve(listener, router).await?;
    Ok(())
}
