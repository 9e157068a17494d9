use thiserror::Error;

/// Errors that abort a whole scheduler tick.
///
/// Both variants occur before anything was mutated, so aborting is always
/// safe; the next tick retries naturally. Per-reminder delivery failures are
/// handled inside the delivery loop and never surface here.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("feed unavailable: {0}")]
    Feed(#[from] pitwall_data::FeedError),

    #[error("storage error: {0}")]
    Store(#[from] pitwall_store::StoreError),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
