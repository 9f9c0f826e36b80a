//! Telegram Bot API client

use super::types::{
    parse_mode, AnswerCallbackQuery, ApiResponse, GetUpdates, ReplyMarkup, SendChatAction,
    SendMessage, SendPhoto, SetWebhook, Update,
};
use super::{ChatTransport, TelegramError};
use crate::router::{CallbackAck, Outbound};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

const ALLOWED_UPDATES: [&str; 2] = ["message", "callback_query"];

/// Extra time on top of the long-poll timeout before the HTTP request gives up
const POLL_GRACE: Duration = Duration::from_secs(10);

pub struct BotApi {
    client: Client,
    /// `{api_url}/bot{token}`
    base_url: String,
}

impl BotApi {
    pub fn new(api_url: &str, token: &str, poll_timeout: Duration) -> Result<Self, TelegramError> {
        let client = Client::builder().timeout(poll_timeout + POLL_GRACE).build()?;
        Ok(Self {
            client,
            base_url: format!("{}/bot{token}", api_url.trim_end_matches('/')),
        })
    }

    async fn call<B, R>(&self, method: &str, body: &B) -> Result<R, TelegramError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}/{method}", self.base_url))
            .json(body)
            .send()
            .await?;

        // The Bot API reports failures inside the JSON envelope, even on 4xx
        let envelope: ApiResponse<R> = response.json().await?;
        match envelope {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse {
                error_code,
                description,
                ..
            } => Err(TelegramError::Api {
                method: method.to_string(),
                code: error_code,
                description: description.unwrap_or_else(|| "no description".to_string()),
            }),
        }
    }

    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>, TelegramError> {
        self.call(
            "getUpdates",
            &GetUpdates {
                offset,
                timeout: timeout_secs,
                allowed_updates: ALLOWED_UPDATES.to_vec(),
            },
        )
        .await
    }

    pub async fn set_webhook(&self, url: &str, secret: Option<&str>) -> Result<(), TelegramError> {
        let _: bool = self
            .call(
                "setWebhook",
                &SetWebhook {
                    url,
                    secret_token: secret,
                    allowed_updates: ALLOWED_UPDATES.to_vec(),
                },
            )
            .await?;
        Ok(())
    }

    /// Polling and webhooks are mutually exclusive on Telegram's side
    pub async fn delete_webhook(&self) -> Result<(), TelegramError> {
        let _: bool = self.call("deleteWebhook", &serde_json::json!({})).await?;
        Ok(())
    }
}

#[async_trait]
impl ChatTransport for BotApi {
    async fn send(&self, chat_id: i64, message: &Outbound) -> Result<(), TelegramError> {
        match message {
            Outbound::Text { text, format, markup } => {
                let _: serde_json::Value = self
                    .call(
                        "sendMessage",
                        &SendMessage {
                            chat_id,
                            text,
                            parse_mode: parse_mode(*format),
                            reply_markup: markup.as_ref().map(ReplyMarkup::from),
                        },
                    )
                    .await?;
            }
            Outbound::Photo {
                url,
                caption,
                format,
                markup,
            } => {
                let _: serde_json::Value = self
                    .call(
                        "sendPhoto",
                        &SendPhoto {
                            chat_id,
                            photo: url,
                            caption,
                            parse_mode: parse_mode(*format),
                            reply_markup: markup.as_ref().map(ReplyMarkup::from),
                        },
                    )
                    .await?;
            }
        }
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, ack: &CallbackAck) -> Result<(), TelegramError> {
        let _: bool = self
            .call(
                "answerCallbackQuery",
                &AnswerCallbackQuery {
                    callback_query_id: callback_id,
                    text: ack.text.as_deref(),
                },
            )
            .await?;
        Ok(())
    }

    async fn typing(&self, chat_id: i64) -> Result<(), TelegramError> {
        let _: bool = self
            .call(
                "sendChatAction",
                &SendChatAction {
                    chat_id,
                    action: "typing",
                },
            )
            .await?;
        Ok(())
    }
}
