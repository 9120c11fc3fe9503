//! Keyboard rendering for the main menu.

use orderdesk_core::views::MENU_ROWS;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Create the main menu inline keyboard
///
/// # Examples
///
/// ```
/// use orderdesk_transport_telegram::bot::views::menu_keyboard;
/// let keyboard = menu_keyboard();
/// assert_eq!(keyboard.inline_keyboard.len(), 3);
/// ```
#[must_use]
pub fn menu_keyboard() -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = MENU_ROWS
        .iter()
        .map(|row| {
            row.iter()
                .map(|(label, action)| {
                    InlineKeyboardButton::callback(*label, action.callback_data())
                })
                .collect()
        })
        .collect();
    InlineKeyboardMarkup::new(rows)
}
