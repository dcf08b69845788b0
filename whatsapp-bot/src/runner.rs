use anyhow::{Context, Result};
use relay_core::init_tracing;
use tokio::net::TcpListener;
use tracing::{info, instrument};

use super::components::{build_bot_components, create_assistant_client, create_store, verify_assistant};
use super::config::BotConfig;
use super::server::create_router;

/// Main entry: init logging, validate config, build components, check the assistant, then serve.
pub async fn run_bot(config: BotConfig) -> Result<()> {
    init_tracing(config.log_file())?;
    config.validate()?;

    info!(
        database_url = %config.database_url(),
        assistant_id = %config.assistant_id(),
        "Initializing bot"
    );

    let components = build_bot_components(&config).await?;
    verify_assistant(components.assistant.as_ref(), config.assistant_id()).await?;

    let addr = config.base().bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    let app = create_router(components.app_state(config.verify_token().map(String::from)));

    info!(addr = %addr, "Bot started successfully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Validates config and external dependencies without serving: assistant lookup and store open.
#[instrument(skip(config))]
pub async fn check(config: BotConfig) -> Result<()> {
    config.validate()?;

    let assistant = create_assistant_client(config.assistant())?;
    verify_assistant(assistant.as_ref(), config.assistant_id()).await?;
    create_store(config.database_url()).await?;

    println!("Configuration OK");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
