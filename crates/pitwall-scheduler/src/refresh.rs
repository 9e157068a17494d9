use std::sync::Arc;
use std::time::Duration;

use pitwall_data::{ConstructorStanding, DriverStanding, Race, RaceFeed};
use pitwall_store::{CacheStore, CachedConstructorStanding, CachedDriverStanding, CachedRace};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::error::Result;

/// Coarse companion loop to the reminder engine: re-warms the local race and
/// standings tables so commands keep working through feed outages.
///
/// The first refresh runs at startup, then every `refresh_secs`. A failed
/// refresh leaves the previous cache in place.
pub struct RefreshJob {
    feed: Arc<dyn RaceFeed>,
    cache: Arc<CacheStore>,
    season: i32,
    interval: Duration,
}

impl RefreshJob {
    pub fn new(
        feed: Arc<dyn RaceFeed>,
        cache: Arc<CacheStore>,
        season: i32,
        interval: Duration,
    ) -> Self {
        Self {
            feed,
            cache,
            season,
            interval,
        }
    }

    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(interval_secs = self.interval.as_secs(), "cache refresh job started");

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = self.refresh().await {
                        warn!("cache refresh failed: {e}");
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("cache refresh job shutting down");
                        break;
                    }
                }
            }
        }
    }

    /// Fetch schedule + standings and replace the cached copies.
    pub async fn refresh(&self) -> Result<()> {
        let races = self.feed.season_schedule(self.season).await?;
        let cached: Vec<CachedRace> = races.iter().map(cached_race).collect();
        self.cache.replace_races(&cached)?;

        let drivers = self.feed.driver_standings(self.season).await?;
        let cached: Vec<CachedDriverStanding> = drivers.iter().map(cached_driver).collect();
        self.cache
            .replace_driver_standings(self.season as i64, &cached)?;

        let constructors = self.feed.constructor_standings(self.season).await?;
        let cached: Vec<CachedConstructorStanding> =
            constructors.iter().map(cached_constructor).collect();
        self.cache
            .replace_constructor_standings(self.season as i64, &cached)?;

        info!(
            races = races.len(),
            drivers = drivers.len(),
            constructors = constructors.len(),
            "feed caches refreshed"
        );
        Ok(())
    }
}

fn cached_race(race: &Race) -> CachedRace {
    CachedRace {
        event_id: race.event_id(),
        name: race.race_name.clone(),
        date: race.date.clone(),
        time: race.time.clone(),
        location: race.location(),
        round: race.round.parse().unwrap_or_default(),
        season: race.season.parse().unwrap_or_default(),
        circuit_id: race.circuit.circuit_id.clone(),
    }
}

fn cached_driver(standing: &DriverStanding) -> CachedDriverStanding {
    CachedDriverStanding {
        driver_id: standing.driver.driver_id.clone(),
        position: standing.position.parse().unwrap_or_default(),
        driver_name: format!(
            "{} {}",
            standing.driver.given_name, standing.driver.family_name
        ),
        points: standing.points.parse().unwrap_or_default(),
        wins: standing.wins.parse().unwrap_or_default(),
        team: standing.team_name().to_string(),
    }
}

fn cached_constructor(standing: &ConstructorStanding) -> CachedConstructorStanding {
    CachedConstructorStanding {
        constructor_id: standing.constructor.constructor_id.clone(),
        position: standing.position.parse().unwrap_or_default(),
        team_name: standing.constructor.name.clone(),
        points: standing.points.parse().unwrap_or_default(),
        wins: standing.wins.parse().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pitwall_store::db::init_db;
    use rusqlite::Connection;

    struct StaticFeed;

    #[async_trait]
    impl RaceFeed for StaticFeed {
        async fn season_schedule(&self, _year: i32) -> pitwall_data::Result<Vec<Race>> {
            Ok(vec![serde_race()])
        }
        async fn driver_standings(&self, _year: i32) -> pitwall_data::Result<Vec<DriverStanding>> {
            Ok(vec![serde_json::from_value(serde_json::json!({
                "position": "1",
                "points": "161.5",
                "wins": "4",
                "Driver": { "driverId": "piastri", "givenName": "Oscar", "familyName": "Piastri" },
                "Constructors": [{ "constructorId": "mclaren", "name": "McLaren" }]
            }))
            .unwrap()])
        }
        async fn constructor_standings(
            &self,
            _year: i32,
        ) -> pitwall_data::Result<Vec<ConstructorStanding>> {
            Ok(vec![serde_json::from_value(serde_json::json!({
                "position": "1",
                "points": "246",
                "wins": "5",
                "Constructor": { "constructorId": "mclaren", "name": "McLaren" }
            }))
            .unwrap()])
        }
        async fn last_race_results(&self) -> pitwall_data::Result<Option<Race>> {
            Ok(None)
        }
    }

    fn serde_race() -> Race {
        serde_json::from_value(serde_json::json!({
            "season": "2025",
            "round": "5",
            "raceName": "Miami Grand Prix",
            "Circuit": {
                "circuitId": "miami",
                "circuitName": "Miami International Autodrome",
                "Location": { "locality": "Miami", "country": "USA" }
            },
            "date": "2025-05-04",
            "time": "20:00:00Z"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn refresh_populates_all_caches() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        let cache = Arc::new(CacheStore::new(conn));

        let job = RefreshJob::new(
            Arc::new(StaticFeed),
            Arc::clone(&cache),
            2025,
            Duration::from_secs(3600),
        );
        job.refresh().await.unwrap();

        let races = cache.races(2025).unwrap();
        assert_eq!(races.len(), 1);
        assert_eq!(races[0].event_id, "2025_5");
        assert_eq!(races[0].location, "Miami, USA");

        let drivers = cache.driver_standings(2025).unwrap();
        assert_eq!(drivers[0].driver_name, "Oscar Piastri");
        assert_eq!(drivers[0].team, "McLaren");
        assert!((drivers[0].points - 161.5).abs() < f64::EPSILON);

        let constructors = cache.constructor_standings(2025).unwrap();
        assert_eq!(constructors[0].team_name, "McLaren");
        assert_eq!(constructors[0].wins, 5);
    }
}
