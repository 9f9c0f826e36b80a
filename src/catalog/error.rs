//! Catalog error types

use thiserror::Error;

/// The catalog could not be reached or answered with something unusable.
///
/// Every kind surfaces to the user the same way ("try again later"); the
/// kind only exists for logs.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CatalogError {
    pub kind: CatalogErrorKind,
    pub message: String,
}

impl CatalogError {
    pub fn new(kind: CatalogErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(CatalogErrorKind::Network, message)
    }

    pub fn status(message: impl Into<String>) -> Self {
        Self::new(CatalogErrorKind::Status, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(CatalogErrorKind::Decode, message)
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::decode(err.to_string())
        } else if err.is_status() {
            Self::status(err.to_string())
        } else {
            Self::network(err.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogErrorKind {
    /// Connection failures and timeouts
    Network,
    /// Non-success HTTP status
    Status,
    /// Payload did not match the expected shape
    Decode,
}
