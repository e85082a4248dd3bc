// Portfolio API server entry point.
// Loads configuration, installs logging, and serves the router.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_api::build_app;
use portfolio_api::cache::SystemClock;
use portfolio_api::config::Config;
use portfolio_api::github::GitHubClient;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let config = Config::load().context("Failed to load configuration")?;
    info!(
        owner = %config.owner,
        authenticated = config.github_token.is_some(),
        featured = ?config.featured,
        "Loaded configuration"
    );

    let client = GitHubClient::from_config(&config).context("Failed to build GitHub client")?;
    let app = build_app(&config, Arc::new(client), Arc::new(SystemClock));

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);
    info!("  Projects: http://{}/projects?type=featured", addr);
    info!("  Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
