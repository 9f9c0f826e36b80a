//! Recipe bot
//!
//! A Telegram bot that searches a recipe catalog, bookmarks recipes, and
//! lets users rate their bookmarks.

mod catalog;
mod config;
mod favorites;
mod router;
mod state_machine;
mod telegram;

use catalog::{LoggingCatalog, MealDbClient};
use config::{BotConfig, TransportMode};
use favorites::InMemoryFavorites;
use router::Router;
use std::sync::Arc;
use std::time::Duration;
use telegram::webhook::WebhookState;
use telegram::{BotApi, Dispatcher};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipe_bot=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = BotConfig::from_env()?;

    let catalog = LoggingCatalog::new(MealDbClient::new(&config.catalog_url, config.catalog_timeout)?);
    tracing::info!(url = %config.catalog_url, "Recipe catalog configured");

    // Favorites live for the lifetime of the process
    let router = Arc::new(Router::new(catalog, InMemoryFavorites::new()));

    let poll_timeout = match &config.mode {
        TransportMode::Polling { timeout_secs } => Duration::from_secs(*timeout_secs),
        TransportMode::Webhook { .. } => Duration::ZERO,
    };
    let api = Arc::new(BotApi::new(&config.telegram_api_url, &config.telegram_token, poll_timeout)?);
    let dispatcher = Arc::new(Dispatcher::new(router, api.clone()));

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutdown requested");
            }
            cancel.cancel();
        }
    });

    match config.mode {
        TransportMode::Polling { timeout_secs } => {
            telegram::polling::run(&api, dispatcher.as_ref(), timeout_secs, cancel).await;
        }
        TransportMode::Webhook {
            port,
            public_url,
            secret,
        } => {
            api.set_webhook(&public_url, secret.as_deref()).await?;
            tracing::info!(url = %public_url, "Webhook registered");

            let state = WebhookState {
                handler: dispatcher,
                secret,
            };
            telegram::webhook::serve(port, state, cancel).await?;
        }
    }

    Ok(())
}
