//! Action tags exchanged with the chat menu and the panel API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An action that needs an order id before it can be dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderAction {
    /// Query the order status
    Status,
    /// Request cancellation
    Cancel,
    /// Request a refill
    Refill,
    /// Speed up the order
    SpeedUp,
}

impl OrderAction {
    /// All order actions in menu order.
    pub const ALL: [Self; 4] = [Self::Status, Self::Cancel, Self::Refill, Self::SpeedUp];

    /// Callback data carried by the menu button.
    #[must_use]
    pub const fn callback_data(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Cancel => "cancel",
            Self::Refill => "refill",
            Self::SpeedUp => "speedup",
        }
    }

    /// Name shown in the order id prompt.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Status => "Status",
            Self::Cancel => "Cancel",
            Self::Refill => "Refill",
            Self::SpeedUp => "Speedup",
        }
    }

    /// Remote call issued once the order id arrives.
    #[must_use]
    pub const fn remote(self) -> RemoteAction {
        match self {
            Self::Status => RemoteAction::Status,
            Self::Cancel => RemoteAction::Cancel,
            Self::Refill => RemoteAction::Refill,
            Self::SpeedUp => RemoteAction::SpeedUpProbe,
        }
    }
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.callback_data())
    }
}

/// A button of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Runs immediately, no order id needed
    Balance,
    /// Waits for an order id
    Order(OrderAction),
}

impl MenuAction {
    /// Callback data carried by the menu button.
    #[must_use]
    pub const fn callback_data(self) -> &'static str {
        match self {
            Self::Balance => "balance",
            Self::Order(action) => action.callback_data(),
        }
    }
}

/// Error returned for callback data that names no menu action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown menu action: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for MenuAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "balance" {
            return Ok(Self::Balance);
        }
        OrderAction::ALL
            .into_iter()
            .find(|action| action.callback_data() == s)
            .map(Self::Order)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// A call against the panel API.
///
/// The speed-up probe has no remote counterpart of its own: it is sent as a
/// plain status query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteAction {
    /// Account balance
    Balance,
    /// Order status
    Status,
    /// Order cancellation
    Cancel,
    /// Order refill
    Refill,
    /// Speed-up, issued as a status query
    SpeedUpProbe,
}

impl RemoteAction {
    /// Value of the `action` form field.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Balance => "balance",
            Self::Status | Self::SpeedUpProbe => "status",
            Self::Cancel => "cancel",
            Self::Refill => "refill",
        }
    }
}

impl fmt::Display for RemoteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpeedUpProbe => f.write_str("speedup_probe"),
            other => f.write_str(other.wire_name()),
        }
    }
}
