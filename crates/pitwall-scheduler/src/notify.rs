use async_trait::async_trait;
use thiserror::Error;

/// A rejected or timed-out notification send. Isolated to one reminder —
/// the reminder stays pending and is retried next tick.
#[derive(Debug, Error)]
#[error("delivery failed: {0}")]
pub struct DeliveryError(pub String);

/// The outbound message channel as the engine sees it.
///
/// Implemented by the Telegram adapter; tests substitute a recording mock.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, chat_id: i64, text: &str) -> std::result::Result<(), DeliveryError>;
}
