use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{FeedError, Result};
use crate::feed::RaceFeed;
use crate::metrics::FeedMetrics;
use crate::types::{ConstructorStanding, DriverStanding, Race};

/// Client for one Ergast-compatible endpoint.
///
/// Every request path is `{base_url}/{endpoint}.json`; responses are wrapped
/// in the API's `MRData` envelope. The HTTP client carries a hard timeout so
/// a stalled feed call fails instead of blocking a scheduler tick.
pub struct ErgastClient {
    http: reqwest::Client,
    base_url: String,
    metrics: Arc<FeedMetrics>,
}

impl ErgastClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        metrics: Arc<FeedMetrics>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            metrics,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}/{}.json", self.base_url, endpoint);
        self.metrics.record_request();
        let started = std::time::Instant::now();

        let response = match self
            .http
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
        {
            Ok(r) => r,
            Err(e) => {
                self.metrics.record_failure();
                return Err(e.into());
            }
        };

        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => {
                self.metrics.record_failure();
                return Err(e.into());
            }
        };

        match serde_json::from_str::<Envelope<T>>(&body) {
            Ok(envelope) => {
                self.metrics.record_success();
                debug!(
                    %url,
                    bytes = body.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "feed request ok"
                );
                Ok(envelope.data)
            }
            Err(e) => {
                self.metrics.record_failure();
                Err(FeedError::Malformed(format!("{url}: {e}")))
            }
        }
    }
}

#[async_trait]
impl RaceFeed for ErgastClient {
    async fn season_schedule(&self, year: i32) -> Result<Vec<Race>> {
        let table: RaceTableEnvelope = self.fetch(&format!("{year}")).await?;
        Ok(table.race_table.races)
    }

    async fn driver_standings(&self, year: i32) -> Result<Vec<DriverStanding>> {
        let table: StandingsTableEnvelope =
            self.fetch(&format!("{year}/driverStandings")).await?;
        Ok(table
            .standings_table
            .lists
            .into_iter()
            .next()
            .unwrap_or_default()
            .driver_standings)
    }

    async fn constructor_standings(&self, year: i32) -> Result<Vec<ConstructorStanding>> {
        let table: StandingsTableEnvelope =
            self.fetch(&format!("{year}/constructorStandings")).await?;
        Ok(table
            .standings_table
            .lists
            .into_iter()
            .next()
            .unwrap_or_default()
            .constructor_standings)
    }

    async fn last_race_results(&self) -> Result<Option<Race>> {
        let table: RaceTableEnvelope = self.fetch("current/last/results").await?;
        Ok(table.race_table.races.into_iter().next())
    }
}

// --- Ergast response envelopes ------------------------------------------

#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(rename = "MRData")]
    data: T,
}

#[derive(Deserialize)]
struct RaceTableEnvelope {
    #[serde(rename = "RaceTable")]
    race_table: RaceTable,
}

#[derive(Deserialize)]
struct RaceTable {
    #[serde(rename = "Races", default)]
    races: Vec<Race>,
}

#[derive(Deserialize)]
struct StandingsTableEnvelope {
    #[serde(rename = "StandingsTable")]
    standings_table: StandingsTable,
}

#[derive(Deserialize)]
struct StandingsTable {
    #[serde(rename = "StandingsLists", default)]
    lists: Vec<StandingsList>,
}

#[derive(Deserialize, Default)]
struct StandingsList {
    #[serde(rename = "DriverStandings", default)]
    driver_standings: Vec<DriverStanding>,
    #[serde(rename = "ConstructorStandings", default)]
    constructor_standings: Vec<ConstructorStanding>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_unwraps_schedule_payload() {
        let body = r#"{
            "MRData": {
                "RaceTable": {
                    "Races": [{
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
                    }]
                }
            }
        }"#;
        let envelope: Envelope<RaceTableEnvelope> = serde_json::from_str(body).unwrap();
        let races = envelope.data.race_table.races;
        assert_eq!(races.len(), 1);
        assert_eq!(races[0].event_id(), "2025_5");
    }

    #[test]
    fn empty_standings_lists_yield_no_rows() {
        // Off-season responses carry an empty StandingsLists array.
        let body = r#"{ "MRData": { "StandingsTable": { "StandingsLists": [] } } }"#;
        let envelope: Envelope<StandingsTableEnvelope> = serde_json::from_str(body).unwrap();
        let list = envelope
            .data
            .standings_table
            .lists
            .into_iter()
            .next()
            .unwrap_or_default();
        assert!(list.driver_standings.is_empty());
        assert!(list.constructor_standings.is_empty());
    }
}
