//! Telegram Bot API wire types (the subset this bot uses)

use crate::router::{Markup, TextFormat};
use serde::{Deserialize, Serialize};

// ============================================================================
// Inbound
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

impl Update {
    /// The user that caused this update, if any
    pub fn sender_id(&self) -> Option<i64> {
        if let Some(query) = &self.callback_query {
            return Some(query.from.id);
        }
        self.message.as_ref()?.from.as_ref().map(|u| u.id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub data: Option<String>,
}

/// Envelope of every Bot API reply
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

// ============================================================================
// Outbound
// ============================================================================

#[derive(Debug, Serialize)]
pub struct GetUpdates {
    pub offset: i64,
    pub timeout: u64,
    pub allowed_updates: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct SendMessage<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

#[derive(Debug, Serialize)]
pub struct SendPhoto<'a> {
    pub chat_id: i64,
    pub photo: &'a str,
    pub caption: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

#[derive(Debug, Serialize)]
pub struct AnswerCallbackQuery<'a> {
    pub callback_query_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct SendChatAction {
    pub chat_id: i64,
    pub action: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SetWebhook<'a> {
    pub url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_token: Option<&'a str>,
    pub allowed_updates: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ReplyMarkup {
    Inline {
        inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
    },
    Keyboard {
        keyboard: Vec<Vec<KeyboardButton>>,
        resize_keyboard: bool,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct KeyboardButton {
    pub text: String,
}

impl From<&Markup> for ReplyMarkup {
    fn from(markup: &Markup) -> Self {
        match markup {
            Markup::Inline(rows) => ReplyMarkup::Inline {
                inline_keyboard: rows
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|b| InlineKeyboardButton {
                                text: b.label.clone(),
                                callback_data: b.action.to_string(),
                            })
                            .collect()
                    })
                    .collect(),
            },
            Markup::Menu(rows) => ReplyMarkup::Keyboard {
                keyboard: rows
                    .iter()
                    .map(|row| row.iter().map(|text| KeyboardButton { text: text.clone() }).collect())
                    .collect(),
                resize_keyboard: true,
            },
        }
    }
}

pub fn parse_mode(format: TextFormat) -> Option<&'static str> {
    match format {
        TextFormat::Plain => None,
        TextFormat::Html => Some("HTML"),
    }
}
