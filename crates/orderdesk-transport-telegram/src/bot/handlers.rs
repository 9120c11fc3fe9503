use crate::bot::resilient::{edit_message_resilient, send_message_resilient};
use crate::bot::views::menu_keyboard;
use anyhow::Result;
use orderdesk_core::dispatcher::{ChatEvent, CommandDispatcher, Reply};
use std::sync::Arc;
use teloxide::{
    prelude::*,
    types::{ChatId, MessageId},
    utils::command::BotCommands,
};
use tracing::{debug, info};

/// Supported commands for the bot
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    /// Enter the API key or open the menu
    #[command(description = "Enter your API key or open the menu.")]
    Start,
    /// Show command list
    #[command(description = "Show this help.")]
    Help,
}

/// Safe extraction of user ID from a message.
/// Returns 0 if the user information is missing.
pub fn get_user_id_safe(msg: &Message) -> i64 {
    msg.from.as_ref().map_or(0, |u| u.id.0.cast_signed())
}

/// Start handler
///
/// # Errors
///
/// Returns an error if the session store fails or the reply cannot be sent.
pub async fn start(bot: Bot, msg: Message, dispatcher: Arc<CommandDispatcher>) -> Result<()> {
    let user_id = get_user_id_safe(&msg);
    let replies = dispatcher.handle(ChatEvent::start(user_id)).await?;
    deliver(&bot, msg.chat.id, None, replies).await
}

/// Help handler
///
/// # Errors
///
/// Returns an error if the message cannot be sent.
pub async fn help(bot: Bot, msg: Message) -> Result<()> {
    send_message_resilient(&bot, msg.chat.id, Command::descriptions().to_string(), None).await?;
    Ok(())
}

/// Free-text handler: credentials and order ids.
///
/// Commands the bot does not know are dropped here.
///
/// # Errors
///
/// Returns an error if the session store fails or the reply cannot be sent.
pub async fn handle_text(bot: Bot, msg: Message, dispatcher: Arc<CommandDispatcher>) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let user_id = get_user_id_safe(&msg);

    if is_command_text(text) {
        debug!(user_id, "Ignoring unknown command");
        return Ok(());
    }

    let replies = dispatcher.handle(ChatEvent::text(user_id, text)).await?;
    deliver(&bot, msg.chat.id, None, replies).await
}

/// Menu button handler
///
/// The callback is always answered so the client stops its spinner.
///
/// # Errors
///
/// Returns an error if the session store fails or the reply cannot be sent.
pub async fn handle_button(
    bot: Bot,
    q: CallbackQuery,
    dispatcher: Arc<CommandDispatcher>,
) -> Result<()> {
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        debug!("Failed to answer callback query: {e}");
    }

    let user_id = q.from.id.0.cast_signed();
    let Some(data) = q.data.clone() else {
        return Ok(());
    };
    info!(user_id, data = %data, "Menu button pressed");

    let origin = q.message.as_ref().map(|m| (m.chat().id, m.id()));
    let chat_id = origin.map_or(ChatId(user_id), |(chat_id, _)| chat_id);

    let replies = dispatcher.handle(ChatEvent::button(user_id, data)).await?;
    deliver(&bot, chat_id, origin.map(|(_, msg_id)| msg_id), replies).await
}

/// Slash-prefixed text is a command, never a credential or order id.
fn is_command_text(text: &str) -> bool {
    text.starts_with('/')
}

/// How a single reply reaches the chat.
#[derive(Debug, PartialEq, Eq)]
enum Delivery {
    Send { text: String, menu: bool },
    Edit { msg_id: MessageId, text: String },
}

fn route(reply: Reply, origin: Option<MessageId>) -> Delivery {
    match (reply, origin) {
        (Reply::Send { text, menu }, _) => Delivery::Send { text, menu },
        (Reply::EditOrigin { text }, Some(msg_id)) => Delivery::Edit { msg_id, text },
        // Inline-mode callbacks carry no message to edit
        (Reply::EditOrigin { text }, None) => Delivery::Send { text, menu: false },
    }
}

async fn deliver(
    bot: &Bot,
    chat_id: ChatId,
    origin: Option<MessageId>,
    replies: Vec<Reply>,
) -> Result<()> {
    for reply in replies {
        match route(reply, origin) {
            Delivery::Send { text, menu } => {
                send_message_resilient(bot, chat_id, text, menu.then(menu_keyboard)).await?;
            }
            Delivery::Edit { msg_id, text } => {
                edit_message_resilient(bot, chat_id, msg_id, text).await?;
            }
        }
    }
    Ok(())
}
