//! Telegram transport
//!
//! Receives updates (long polling or webhook), feeds them through the
//! router, and delivers the resulting payloads via the Bot API.

mod api;
mod dispatch;
pub mod polling;
pub mod types;
pub mod webhook;

pub use api::BotApi;
pub use dispatch::{Dispatcher, UpdateHandler};

use crate::router::{CallbackAck, Outbound};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Telegram request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Telegram {method} failed ({code:?}): {description}")]
    Api {
        method: String,
        code: Option<i64>,
        description: String,
    },
}

/// Outbound side of the chat platform
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, chat_id: i64, message: &Outbound) -> Result<(), TelegramError>;

    /// Answer a callback query; must be called once per query
    async fn answer_callback(&self, callback_id: &str, ack: &CallbackAck) -> Result<(), TelegramError>;

    /// Show a "typing..." indicator
    async fn typing(&self, chat_id: i64) -> Result<(), TelegramError>;
}

#[async_trait]
impl<T: ChatTransport + ?Sized> ChatTransport for Arc<T> {
    async fn send(&self, chat_id: i64, message: &Outbound) -> Result<(), TelegramError> {
        (**self).send(chat_id, message).await
    }

    async fn answer_callback(&self, callback_id: &str, ack: &CallbackAck) -> Result<(), TelegramError> {
        (**self).answer_callback(callback_id, ack).await
    }

    async fn typing(&self, chat_id: i64) -> Result<(), TelegramError> {
        (**self).typing(chat_id).await
    }
}
