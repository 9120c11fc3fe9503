//! User-facing texts and menu layout
//!
//! All replies the dispatcher produces are rendered here, so transports only
//! deal with delivery.

use crate::action::{MenuAction, OrderAction, RemoteAction};
use crate::panel::{Balance, OrderStatus, PanelError, PanelResponse};

// ─────────────────────────────────────────────────────────────────────────────
// Conversation texts
// ─────────────────────────────────────────────────────────────────────────────

/// Prompt for the panel credential
pub const WELCOME_PROMPT: &str = "👋 Welcome! Please send your API Key to continue:";
/// Confirmation after the credential is stored
pub const CREDENTIAL_SAVED: &str = "✅ API Key saved successfully.";
/// Header of the menu message
pub const MENU_PROMPT: &str = "Choose an action:";
/// Button pressed before any credential was stored
pub const CREDENTIAL_MISSING: &str = "⚠️ API Key not found. Please use /start to enter it.";

/// Prompt for the order id of a pending action.
#[must_use]
pub fn order_id_prompt(action: OrderAction) -> String {
    format!("📩 Please send the Order ID for {}:", action.title())
}

// ─────────────────────────────────────────────────────────────────────────────
// Menu layout
// ─────────────────────────────────────────────────────────────────────────────

/// A menu button: label and the action it triggers.
pub type MenuButton = (&'static str, MenuAction);

/// Rows of the main menu.
pub const MENU_ROWS: &[&[MenuButton]] = &[
    &[
        ("📦 Order Status", MenuAction::Order(OrderAction::Status)),
        ("♻️ Refill", MenuAction::Order(OrderAction::Refill)),
    ],
    &[
        ("❌ Cancel", MenuAction::Order(OrderAction::Cancel)),
        ("⚡ Speed Up", MenuAction::Order(OrderAction::SpeedUp)),
    ],
    &[("💰 Balance", MenuAction::Balance)],
];

// ─────────────────────────────────────────────────────────────────────────────
// Panel outcomes
// ─────────────────────────────────────────────────────────────────────────────

/// Generic failure text for transport and decode errors.
#[must_use]
pub const fn failure_text(action: RemoteAction) -> &'static str {
    match action {
        RemoteAction::Balance => "❌ Failed to fetch balance. Check your API key.",
        RemoteAction::Status => "❌ Failed to fetch status.",
        RemoteAction::Cancel => "❌ Failed to cancel order.",
        RemoteAction::Refill => "❌ Failed to send refill request.",
        RemoteAction::SpeedUpProbe => "❌ Failed to process speed up.",
    }
}

/// Render the result of a panel call for the user.
///
/// `order_id` is ignored for balance queries.
#[must_use]
pub fn render_outcome(
    action: RemoteAction,
    order_id: &str,
    outcome: &Result<PanelResponse, PanelError>,
) -> String {
    match outcome {
        Ok(response) => render_success(action, order_id, response),
        // A balance error renders the defaults
        Err(PanelError::Remote(_)) if action == RemoteAction::Balance => {
            render_balance(&Balance::default())
        }
        Err(PanelError::Remote(_)) if action == RemoteAction::Refill => {
            "♻️ Refill not allowed.".to_string()
        }
        Err(PanelError::Remote(message)) => format!("❌ {message}"),
        Err(PanelError::Network(_) | PanelError::Decode(_)) => failure_text(action).to_string(),
    }
}

fn render_balance(balance: &Balance) -> String {
    format!("💰 Balance: {} {}", balance.amount, balance.currency)
}

fn render_success(action: RemoteAction, order_id: &str, response: &PanelResponse) -> String {
    match action {
        RemoteAction::Balance => render_balance(&Balance::from(response)),
        RemoteAction::Status => {
            let status = OrderStatus::from(response);
            format!(
                "📦 Order Status:\nID: {order_id}\nService: {}\nLink: {}\nStatus: {}",
                status.service, status.link, status.status
            )
        }
        RemoteAction::Cancel => "❌ Cancel request sent!".to_string(),
        RemoteAction::Refill => "♻️ Refill request sent!".to_string(),
        RemoteAction::SpeedUpProbe => "⚡ Speed Up Started ✅".to_string(),
    }
}
