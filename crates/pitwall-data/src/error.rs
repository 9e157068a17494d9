use thiserror::Error;

/// Errors from the external race-data feed.
///
/// Both variants mean the same thing to callers: the data is unavailable
/// right now. The scheduler aborts its tick, commands fall back to cached
/// data or apologise.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Transport-level failure: connect error, timeout, non-2xx status.
    #[error("feed request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not match the expected Ergast shape.
    #[error("feed returned malformed data: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, FeedError>;
