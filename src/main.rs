//! # Class Tracker Bot Main Entry Point
//!
//! This is the main entry point for the Class Tracker Bot application.
//! It initializes logging, loads configuration, sets up the database
//! schema, and runs the Telegram bot next to a small HTTP server that
//! carries the health endpoints and, in webhook mode, the update bridge.

use anyhow::Result;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod bot;
mod config;
mod database;
mod services;
mod utils;

use crate::bot::handlers::BotHandler;
use crate::config::Config;
use crate::database::connection::DatabaseManager;
use crate::services::health::HealthService;
use crate::services::webhook;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "class_tracker_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Class Tracker Bot v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded - Database: {}, HTTP Port: {}",
        config.database_url, config.http_port);

    // Initialize database
    info!("Initializing database connection...");
    let db_manager = DatabaseManager::new(&config.database_url).await?;
    db_manager.init_schema().await?;
    let db_arc = Arc::new(db_manager);
    info!("Database initialized successfully");

    // Initialize bot
    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_bot_token);
    let handler = BotHandler::new(db_arc.as_ref().clone(), config.error_reply_policy);
    info!("Telegram bot initialized successfully");

    // HTTP router: health endpoints, plus the webhook bridge in webhook mode
    let health_service = HealthService::new(db_arc.clone());
    let mut router = health_service.router;

    let bridge_listener = match &config.webhook_url {
        Some(url) => {
            info!("Webhook mode - registering callback URL {}", url);
            bot.set_webhook(url.clone()).await?;
            let (bridge_router, listener) = webhook::update_bridge();
            router = router.merge(bridge_router);
            Some(listener)
        }
        None => {
            info!("Polling mode - clearing any previously registered webhook");
            // Telegram rejects getUpdates while a webhook is registered, so a
            // switch back from webhook mode must clear it first.
            bot.delete_webhook().await?;
            None
        }
    };
    let router = router.layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("HTTP server starting on port {}", config.http_port);

    // Run both the bot and the HTTP server concurrently
    let bot_task = tokio::spawn(async move {
        let mut dispatcher = Dispatcher::builder(bot, handler.schema())
            .default_handler(|update| async move {
                // Unrecognized commands and other updates are dropped silently
                tracing::debug!("Ignoring unhandled update: {:?}", update);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error occurred in the command dispatcher",
            ))
            .enable_ctrlc_handler()
            .build();

        match bridge_listener {
            Some(bridge) => {
                dispatcher
                    .dispatch_with_listener(
                        bridge,
                        LoggingErrorHandler::with_custom_text(
                            "An error occurred in the webhook bridge",
                        ),
                    )
                    .await;
            }
            None => dispatcher.dispatch().await,
        }
    });

    let http_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!("HTTP server error: {}", e);
        }
    });

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result1 = bot_task => {
            if let Err(e) = result1 {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result2 = http_task => {
            if let Err(e) = result2 {
                tracing::error!("HTTP task error: {}", e);
            }
        }
    }

    info!("Application stopped");
    Ok(())
}
