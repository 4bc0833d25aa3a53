//! FitCoach Telegram bot
//!
//! Main entry point: load configuration, open the database, connect to
//! Telegram and poll until a shutdown signal arrives.

use std::sync::Arc;

use anyhow::Context;
use application::ports::MessengerPort;
use infrastructure::{
    AppConfig, AsyncDatabase, AsyncDatabaseConfig, TelegramMessengerAdapter, init_logging,
};
use presentation_bot::{Poller, build_bot_service};
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.logging)?;

    info!(
        environment = %config.environment,
        "🏋️ FitCoach bot v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let db = AsyncDatabase::new(&AsyncDatabaseConfig::from_app_config(&config.database))
        .await
        .with_context(|| format!("Failed to open database at {}", config.database.path))?;
    if config.database.run_migrations {
        db.migrate().await.context("Failed to run migrations")?;
    }

    let adapter = TelegramMessengerAdapter::from_config(&config.telegram)?;
    let bot_name = adapter
        .prepare()
        .await
        .context("Failed to connect to Telegram")?;
    info!(bot = %bot_name, "🤖 Connected to Telegram");

    let messenger: Arc<dyn MessengerPort> = Arc::new(adapter);
    let bot = Arc::new(build_bot_service(&db, Arc::clone(&messenger), &config)?);

    Poller::new(messenger, bot).run(shutdown_signal()).await;

    db.close().await;
    info!("👋 FitCoach bot stopped");
    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, finishing the current batch...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, finishing the current batch...");
        }
    }
}
