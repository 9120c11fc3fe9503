//! Conversation dispatcher
//!
//! Interprets chat events against the session store and turns them into
//! panel calls and replies. Transport-agnostic: a transport converts its
//! updates into [`ChatEvent`] values and delivers the returned [`Reply`] list.

use crate::action::{MenuAction, RemoteAction};
use crate::panel::{PanelApi, PanelRequest};
use crate::session::{SessionError, SessionStore, UserPhase};
use crate::views;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// The entry command
    Start,
    /// A menu button press with its callback data
    Button(String),
    /// A free-text message
    Text(String),
}

/// An incoming chat event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    /// Chat user id
    pub user_id: i64,
    /// Event payload
    pub kind: EventKind,
}

impl ChatEvent {
    /// Entry command from `user_id`.
    #[must_use]
    pub const fn start(user_id: i64) -> Self {
        Self {
            user_id,
            kind: EventKind::Start,
        }
    }

    /// Button press from `user_id`.
    #[must_use]
    pub fn button(user_id: i64, data: impl Into<String>) -> Self {
        Self {
            user_id,
            kind: EventKind::Button(data.into()),
        }
    }

    /// Text message from `user_id`.
    #[must_use]
    pub fn text(user_id: i64, text: impl Into<String>) -> Self {
        Self {
            user_id,
            kind: EventKind::Text(text.into()),
        }
    }
}

/// A message to deliver back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Send a new message, optionally carrying the main menu
    Send {
        /// Message text
        text: String,
        /// Attach the main menu keyboard
        menu: bool,
    },
    /// Replace the text of the message whose button was pressed
    EditOrigin {
        /// New message text
        text: String,
    },
}

impl Reply {
    /// Plain message without keyboard.
    #[must_use]
    pub fn send(text: impl Into<String>) -> Self {
        Self::Send {
            text: text.into(),
            menu: false,
        }
    }

    /// The main menu message.
    #[must_use]
    pub fn menu() -> Self {
        Self::Send {
            text: views::MENU_PROMPT.to_string(),
            menu: true,
        }
    }

    /// Edit of the pressed button's message.
    #[must_use]
    pub fn edit(text: impl Into<String>) -> Self {
        Self::EditOrigin { text: text.into() }
    }

    /// Text carried by this reply.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Send { text, .. } | Self::EditOrigin { text } => text,
        }
    }
}

/// Per-user conversation state machine over a session store and a panel.
#[derive(Clone)]
pub struct CommandDispatcher {
    sessions: Arc<dyn SessionStore>,
    panel: Arc<dyn PanelApi>,
}

impl CommandDispatcher {
    /// Create a dispatcher over the given backends.
    #[must_use]
    pub fn new(sessions: Arc<dyn SessionStore>, panel: Arc<dyn PanelApi>) -> Self {
        Self { sessions, panel }
    }

    /// Handle one event to completion, including any panel call.
    ///
    /// Panel failures become reply texts; only session backend failures are
    /// returned as errors.
    ///
    /// # Errors
    ///
    /// Returns a `SessionError` if the session store fails.
    pub async fn handle(&self, event: ChatEvent) -> Result<Vec<Reply>, SessionError> {
        let user_id = event.user_id;
        match event.kind {
            EventKind::Start => self.on_start(user_id).await,
            EventKind::Button(data) => self.on_button(user_id, &data).await,
            EventKind::Text(text) => self.on_text(user_id, text.trim()).await,
        }
    }

    async fn on_start(&self, user_id: i64) -> Result<Vec<Reply>, SessionError> {
        info!(user_id, "User initiated /start");

        if self.sessions.get_credential(user_id).await?.is_some() {
            return Ok(vec![Reply::menu()]);
        }

        self.sessions.begin_onboarding(user_id).await?;
        Ok(vec![Reply::send(views::WELCOME_PROMPT)])
    }

    async fn on_button(&self, user_id: i64, data: &str) -> Result<Vec<Reply>, SessionError> {
        let Some(credential) = self.sessions.get_credential(user_id).await? else {
            info!(user_id, "Button pressed without stored API key");
            return Ok(vec![Reply::edit(views::CREDENTIAL_MISSING)]);
        };

        let action = match data.parse::<MenuAction>() {
            Ok(action) => action,
            Err(e) => {
                debug!(user_id, "Ignoring callback: {e}");
                return Ok(Vec::new());
            }
        };

        match action {
            MenuAction::Balance => {
                let text = self
                    .run_remote(user_id, PanelRequest::balance(credential))
                    .await;
                Ok(vec![Reply::edit(text)])
            }
            MenuAction::Order(action) => {
                self.sessions.set_pending(user_id, action).await?;
                info!(user_id, %action, "Awaiting order id");
                Ok(vec![Reply::edit(views::order_id_prompt(action))])
            }
        }
    }

    async fn on_text(&self, user_id: i64, text: &str) -> Result<Vec<Reply>, SessionError> {
        match self.sessions.phase(user_id).await? {
            Some(UserPhase::AwaitingCredential) => {
                self.sessions
                    .set_credential(user_id, text.to_string())
                    .await?;
                info!(user_id, "API key saved");
                Ok(vec![Reply::send(views::CREDENTIAL_SAVED), Reply::menu()])
            }
            Some(UserPhase::AwaitingOrderId(_)) => self.on_order_id(user_id, text).await,
            Some(UserPhase::Ready) | None => {
                debug!(user_id, "Ignoring text without pending action");
                Ok(Vec::new())
            }
        }
    }

    async fn on_order_id(&self, user_id: i64, order_id: &str) -> Result<Vec<Reply>, SessionError> {
        // A concurrent update may have consumed the action already.
        let Some(action) = self.sessions.take_pending(user_id).await? else {
            return Ok(Vec::new());
        };
        let Some(credential) = self.sessions.get_credential(user_id).await? else {
            return Ok(Vec::new());
        };

        let request = PanelRequest::for_order(credential, action.remote(), order_id);
        info!(user_id, %action, order_id, "Dispatching order action");
        Ok(vec![Reply::send(self.run_remote(user_id, request).await)])
    }

    async fn run_remote(&self, user_id: i64, request: PanelRequest) -> String {
        let action: RemoteAction = request.action;
        let order_id = request.order.clone().unwrap_or_default();

        let outcome = self.panel.call(request).await;
        if let Err(e) = &outcome {
            warn!(user_id, %action, "Panel request failed: {e}");
        }
        views::render_outcome(action, &order_id, &outcome)
    }
}
