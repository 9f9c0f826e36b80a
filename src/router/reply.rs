//! Outbound payload descriptions handed to the chat transport

use super::callback::CallbackAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    /// Telegram-flavoured HTML (`<b>`, escaped entities)
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: CallbackAction,
}

impl Button {
    pub fn new(label: impl Into<String>, action: CallbackAction) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    /// Buttons attached to the message, pressing one sends a callback
    Inline(Vec<Vec<Button>>),
    /// Persistent reply keyboard, pressing one sends its label as text
    Menu(Vec<Vec<String>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Text {
        text: String,
        format: TextFormat,
        markup: Option<Markup>,
    },
    Photo {
        url: String,
        caption: String,
        format: TextFormat,
        markup: Option<Markup>,
    },
}

impl Outbound {
    pub fn text(text: impl Into<String>) -> Self {
        Outbound::Text {
            text: text.into(),
            format: TextFormat::Plain,
            markup: None,
        }
    }

    pub fn text_with_markup(text: impl Into<String>, markup: Markup) -> Self {
        Outbound::Text {
            text: text.into(),
            format: TextFormat::Plain,
            markup: Some(markup),
        }
    }

    pub fn markup(&self) -> Option<&Markup> {
        match self {
            Outbound::Text { markup, .. } | Outbound::Photo { markup, .. } => markup.as_ref(),
        }
    }
}

/// Answer to a callback query, shown as a toast when `text` is set
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallbackAck {
    pub text: Option<String>,
}

impl CallbackAck {
    pub fn silent() -> Self {
        Self { text: None }
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// Everything produced for one callback event: exactly one ack, then messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackReply {
    pub ack: CallbackAck,
    pub messages: Vec<Outbound>,
}

impl CallbackReply {
    pub fn ack(ack: CallbackAck) -> Self {
        Self {
            ack,
            messages: vec![],
        }
    }
}
