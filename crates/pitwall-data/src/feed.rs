use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ConstructorStanding, DriverStanding, Race};

/// The external race-data feed as the rest of the system sees it.
///
/// Implemented by [`crate::ErgastClient`] for a single endpoint and by
/// [`crate::FallbackFeed`] for the primary/secondary composition; callers
/// (scheduler, bot commands) only ever hold `Arc<dyn RaceFeed>`.
#[async_trait]
pub trait RaceFeed: Send + Sync {
    /// Full season calendar, past and future rounds, in round order.
    async fn season_schedule(&self, year: i32) -> Result<Vec<Race>>;

    /// Current driver championship standings, best position first.
    async fn driver_standings(&self, year: i32) -> Result<Vec<DriverStanding>>;

    /// Current constructor championship standings, best position first.
    async fn constructor_standings(&self, year: i32) -> Result<Vec<ConstructorStanding>>;

    /// The most recently completed race with its classification, if any
    /// race of the current season has finished.
    async fn last_race_results(&self) -> Result<Option<Race>>;
}
