//! Proactive delivery — the scheduler's [`Notifier`] implemented over the bot.

use async_trait::async_trait;
use pitwall_scheduler::{DeliveryError, Notifier};
use teloxide::prelude::*;

/// Sends scheduler-fired reminder notifications to Telegram chats.
///
/// `Bot` is a cheap handle around a shared connection pool, so this clones
/// the same bot the dispatcher uses.
pub struct TelegramNotifier {
    bot: Bot,
}

impl TelegramNotifier {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn deliver(&self, chat_id: i64, text: &str) -> Result<(), DeliveryError> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .await
            .map(|_| ())
            .map_err(|e| DeliveryError(e.to_string()))
    }
}
