//! Resilient messaging utilities with automatic retry for Telegram API operations.
//!
//! Sends and edits are retried on failure using exponential backoff with
//! jitter. Panel calls are not covered here.

use anyhow::Result;
use orderdesk_core::utils::retry_transport_operation;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardMarkup, Message, MessageId};
use tracing::debug;

/// Send a message with automatic retry on network failures.
///
/// # Arguments
///
/// * `bot` - The Telegram bot instance
/// * `chat_id` - Target chat ID
/// * `text` - Message text to send
/// * `keyboard` - Optional inline keyboard to attach
///
/// # Returns
///
/// The sent [`Message`] on success, or an error after all retries are exhausted.
pub async fn send_message_resilient(
    bot: &Bot,
    chat_id: ChatId,
    text: impl Into<String>,
    keyboard: Option<InlineKeyboardMarkup>,
) -> Result<Message> {
    let text = text.into();
    retry_transport_operation(|| async {
        let mut req = bot.send_message(chat_id, text.clone());
        if let Some(markup) = keyboard.clone() {
            req = req.reply_markup(markup);
        }
        req.await
            .map_err(|e| anyhow::anyhow!("Telegram send error: {e}"))
    })
    .await
}

/// Edit a message with automatic retry on network failures.
///
/// Returns `Ok(None)` when Telegram reports the text as unchanged.
pub async fn edit_message_resilient(
    bot: &Bot,
    chat_id: ChatId,
    msg_id: MessageId,
    text: impl Into<String>,
) -> Result<Option<Message>> {
    let text = text.into();
    retry_transport_operation(|| async {
        match bot.edit_message_text(chat_id, msg_id, text.clone()).await {
            Ok(msg) => Ok(Some(msg)),
            Err(e) => {
                let err_msg = e.to_string();
                if err_msg.contains("message is not modified") {
                    debug!("Message update skipped: message is not modified");
                    return Ok(None);
                }
                Err(anyhow::anyhow!("Telegram edit error: {e}"))
            }
        }
    })
    .await
}
