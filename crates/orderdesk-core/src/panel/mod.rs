//! SMM panel API client
//!
//! Every user action maps to one form-encoded POST against the panel
//! endpoint. Responses are JSON objects; an `error` field marks a failure
//! reported by the panel itself.

/// `reqwest`-backed client
pub mod client;
/// Response parsing and typed views
pub mod response;

pub use client::PanelClient;
pub use response::{Balance, OrderStatus, PanelResponse};

use crate::action::RemoteAction;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during panel operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PanelError {
    /// Request could not be sent or the body could not be read
    #[error("Network error: {0}")]
    Network(String),
    /// Body is not a JSON object
    #[error("Decode error: {0}")]
    Decode(String),
    /// The panel answered with an `error` field
    #[error("Panel error: {0}")]
    Remote(String),
}

/// A single call against the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRequest {
    /// User credential, sent as `key`
    pub key: String,
    /// Requested action, sent as `action`
    pub action: RemoteAction,
    /// Order id, sent as `order` when present
    pub order: Option<String>,
}

impl PanelRequest {
    /// Balance query for `key`.
    #[must_use]
    pub fn balance(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: RemoteAction::Balance,
            order: None,
        }
    }

    /// Order-scoped call.
    #[must_use]
    pub fn for_order(key: impl Into<String>, action: RemoteAction, order: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action,
            order: Some(order.into()),
        }
    }

    /// Form fields in wire order.
    #[must_use]
    pub fn form(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![("key", self.key.as_str()), ("action", self.action.wire_name())];
        if let Some(order) = &self.order {
            fields.push(("order", order.as_str()));
        }
        fields
    }
}

/// Interface for panel API backends
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PanelApi: Send + Sync {
    /// Issue one request and parse the reply.
    ///
    /// An `error` field in the reply surfaces as [`PanelError::Remote`].
    async fn call(&self, request: PanelRequest) -> Result<PanelResponse, PanelError>;
}
