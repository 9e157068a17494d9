//! Telegram channel adapter.
//!
//! Wraps a teloxide `Bot` + `Dispatcher` and drives the long-polling event
//! loop until the process exits. Long polling — no public URL required.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

use crate::callbacks::handle_callback;
use crate::commands::{handle_command, Command};
use crate::context::AppContext;

pub struct TelegramAdapter {
    bot: Bot,
    ctx: Arc<AppContext>,
}

impl TelegramAdapter {
    pub fn new(bot: Bot, ctx: Arc<AppContext>) -> Self {
        Self { bot, ctx }
    }

    /// Publish the command list and drive the long-polling loop.
    ///
    /// Returns when the dispatcher stops (process shutdown).
    pub async fn run(self) {
        if let Err(e) = self.bot.set_my_commands(Command::bot_commands()).await {
            warn!("failed to publish command list: {e}");
        }

        info!("Telegram: starting long-polling dispatcher");

        let handler = dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(handle_command),
            )
            .branch(Update::filter_callback_query().endpoint(handle_callback));

        Dispatcher::builder(self.bot, handler)
            .dependencies(dptree::deps![self.ctx])
            .default_handler(|_upd| async {})
            .build()
            .dispatch()
            .await;
    }
}
