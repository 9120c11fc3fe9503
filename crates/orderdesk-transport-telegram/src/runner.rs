use crate::bot;
use crate::bot::handlers::Command;
use crate::config::BotSettings;
use orderdesk_core::dispatcher::CommandDispatcher;
use orderdesk_core::panel::PanelClient;
use orderdesk_core::session::InMemorySessionStore;
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tracing::{error, info};

/// Run the Telegram transport runtime.
pub async fn run_bot(settings: Arc<BotSettings>) {
    let command_dispatcher = init_command_dispatcher(&settings);

    let bot = Bot::new(settings.telegram.bot_token.clone());
    let handler = setup_handler();

    info!("Bot is running...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![command_dispatcher, settings])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

fn init_command_dispatcher(settings: &BotSettings) -> Arc<CommandDispatcher> {
    let panel = PanelClient::new(settings.panel.as_ref());
    info!(endpoint = panel.endpoint(), "Panel client initialized.");

    let sessions = Arc::new(InMemorySessionStore::new());
    Arc::new(CommandDispatcher::new(sessions, Arc::new(panel)))
}

fn setup_handler() -> UpdateHandler<teloxide::RequestError> {
    dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handle_button))
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handle_command),
                )
                .branch(
                    dptree::filter(|msg: Message| msg.text().is_some()).endpoint(handle_text),
                ),
        )
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    dispatcher: Arc<CommandDispatcher>,
) -> Result<(), teloxide::RequestError> {
    let res = match cmd {
        Command::Start => bot::handlers::start(bot, msg, dispatcher).await,
        Command::Help => bot::handlers::help(bot, msg).await,
    };
    if let Err(e) = res {
        error!("Command error: {}", e);
    }
    respond(())
}

async fn handle_text(
    bot: Bot,
    msg: Message,
    dispatcher: Arc<CommandDispatcher>,
) -> Result<(), teloxide::RequestError> {
    if let Err(e) = bot::handlers::handle_text(bot, msg, dispatcher).await {
        error!("Text handler error: {}", e);
    }
    respond(())
}

async fn handle_button(
    bot: Bot,
    q: CallbackQuery,
    dispatcher: Arc<CommandDispatcher>,
) -> Result<(), teloxide::RequestError> {
    if let Err(e) = bot::handlers::handle_button(bot, q, dispatcher).await {
        error!("Button handler error: {}", e);
    }
    respond(())
}
