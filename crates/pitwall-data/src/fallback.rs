use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::client::ErgastClient;
use crate::error::Result;
use crate::feed::RaceFeed;
use crate::metrics::FeedMetrics;
use crate::types::{ConstructorStanding, DriverStanding, Race};

/// Two Ergast endpoints behind one [`RaceFeed`].
///
/// Every request tries the preferred endpoint first and silently falls back
/// to the other on failure; only when both fail does the caller see an error.
/// The preference can be pinned at runtime (`/apistatus alt|primary`) — it is
/// instance state, not a process-wide switch.
pub struct FallbackFeed {
    primary: ErgastClient,
    secondary: ErgastClient,
    prefer_secondary: AtomicBool,
    metrics: Arc<FeedMetrics>,
}

impl FallbackFeed {
    pub fn new(primary: ErgastClient, secondary: ErgastClient, metrics: Arc<FeedMetrics>) -> Self {
        Self {
            primary,
            secondary,
            prefer_secondary: AtomicBool::new(false),
            metrics,
        }
    }

    /// Pin the secondary endpoint as first choice (or un-pin it).
    pub fn prefer_secondary(&self, on: bool) {
        self.prefer_secondary.store(on, Ordering::Relaxed);
    }

    pub fn is_secondary_preferred(&self) -> bool {
        self.prefer_secondary.load(Ordering::Relaxed)
    }

    /// "primary API (url)" / "alternative API (url)" for user-facing text.
    pub fn active_label(&self) -> String {
        if self.is_secondary_preferred() {
            format!("alternative API ({})", self.secondary.base_url())
        } else {
            format!("primary API ({})", self.primary.base_url())
        }
    }

    /// Human-readable status for `/apistatus`.
    pub fn status_line(&self) -> String {
        format!("Using {}", self.active_label())
    }

    /// (first choice, second choice, first-is-primary)
    fn order(&self) -> (&ErgastClient, &ErgastClient, bool) {
        if self.is_secondary_preferred() {
            (&self.secondary, &self.primary, false)
        } else {
            (&self.primary, &self.secondary, true)
        }
    }

    fn note_served(&self, by_primary: bool) {
        if by_primary {
            self.metrics.record_primary();
        } else {
            self.metrics.record_fallback();
        }
    }
}

// Each method follows the same pattern: try the preferred endpoint, warn and
// retry on the other, record which side ultimately served the request.
#[async_trait]
impl RaceFeed for FallbackFeed {
    async fn season_schedule(&self, year: i32) -> Result<Vec<Race>> {
        let (first, second, first_is_primary) = self.order();
        match first.season_schedule(year).await {
            Ok(races) => {
                self.note_served(first_is_primary);
                Ok(races)
            }
            Err(e) => {
                warn!(error = %e, endpoint = first.base_url(), "feed failed, trying other endpoint");
                let races = second.season_schedule(year).await?;
                self.note_served(!first_is_primary);
                Ok(races)
            }
        }
    }

    async fn driver_standings(&self, year: i32) -> Result<Vec<DriverStanding>> {
        let (first, second, first_is_primary) = self.order();
        match first.driver_standings(year).await {
            Ok(standings) => {
                self.note_served(first_is_primary);
                Ok(standings)
            }
            Err(e) => {
                warn!(error = %e, endpoint = first.base_url(), "feed failed, trying other endpoint");
                let standings = second.driver_standings(year).await?;
                self.note_served(!first_is_primary);
                Ok(standings)
            }
        }
    }

    async fn constructor_standings(&self, year: i32) -> Result<Vec<ConstructorStanding>> {
        let (first, second, first_is_primary) = self.order();
        match first.constructor_standings(year).await {
            Ok(standings) => {
                self.note_served(first_is_primary);
                Ok(standings)
            }
            Err(e) => {
                warn!(error = %e, endpoint = first.base_url(), "feed failed, trying other endpoint");
                let standings = second.constructor_standings(year).await?;
                self.note_served(!first_is_primary);
                Ok(standings)
            }
        }
    }

    async fn last_race_results(&self) -> Result<Option<Race>> {
        let (first, second, first_is_primary) = self.order();
        match first.last_race_results().await {
            Ok(race) => {
                self.note_served(first_is_primary);
                Ok(race)
            }
            Err(e) => {
                warn!(error = %e, endpoint = first.base_url(), "feed failed, trying other endpoint");
                let race = second.last_race_results().await?;
                self.note_served(!first_is_primary);
                Ok(race)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn feed() -> FallbackFeed {
        let metrics = Arc::new(FeedMetrics::new());
        let primary = ErgastClient::new(
            "https://api.jolpi.ca/ergast/f1",
            Duration::from_secs(1),
            Arc::clone(&metrics),
        )
        .unwrap();
        let secondary = ErgastClient::new(
            "https://ergast.com/api/f1",
            Duration::from_secs(1),
            Arc::clone(&metrics),
        )
        .unwrap();
        FallbackFeed::new(primary, secondary, metrics)
    }

    #[test]
    fn preference_toggle_changes_order_and_status() {
        let feed = feed();
        assert!(!feed.is_secondary_preferred());
        assert!(feed.status_line().contains("jolpi.ca"));

        feed.prefer_secondary(true);
        assert!(feed.is_secondary_preferred());
        assert!(feed.status_line().contains("ergast.com"));
        let (first, _, first_is_primary) = feed.order();
        assert!(!first_is_primary);
        assert!(first.base_url().contains("ergast.com"));

        feed.prefer_secondary(false);
        let (first, _, first_is_primary) = feed.order();
        assert!(first_is_primary);
        assert!(first.base_url().contains("jolpi.ca"));
    }
}
