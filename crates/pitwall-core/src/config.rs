use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Top-level config (pitwall.toml + PITWALL_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitwallConfig {
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// External race-data feed (Ergast-compatible JSON API).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Primary endpoint, tried first on every request.
    #[serde(default = "default_primary_url")]
    pub primary_url: String,
    /// Secondary endpoint, tried when the primary fails.
    #[serde(default = "default_fallback_url")]
    pub fallback_url: String,
    /// Per-request timeout. A stalled feed call fails the request rather than
    /// holding up a scheduler tick.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Season to query. Defaults to the current UTC year when unset.
    pub season: Option<i32>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            primary_url: default_primary_url(),
            fallback_url: default_fallback_url(),
            request_timeout_secs: default_request_timeout_secs(),
            season: None,
        }
    }
}

impl FeedConfig {
    pub fn season_or_current(&self) -> i32 {
        use chrono::Datelike;
        self.season.unwrap_or_else(|| chrono::Utc::now().year())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Reminder scan cadence. The due window is one tick wide.
    #[serde(default = "default_tick_secs")]
    pub tick_secs: u64,
    /// Race/standings cache refresh cadence.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
    /// Upper bound on a single notification delivery.
    #[serde(default = "default_delivery_timeout_secs")]
    pub delivery_timeout_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_secs: default_tick_secs(),
            refresh_secs: default_refresh_secs(),
            delivery_timeout_secs: default_delivery_timeout_secs(),
        }
    }
}

fn default_db_path() -> String {
    "./data/pitwall.db".to_string()
}
fn default_primary_url() -> String {
    "https://api.jolpi.ca/ergast/f1".to_string()
}
fn default_fallback_url() -> String {
    "https://ergast.com/api/f1".to_string()
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_tick_secs() -> u64 {
    60
}
fn default_refresh_secs() -> u64 {
    6 * 60 * 60
}
fn default_delivery_timeout_secs() -> u64 {
    10
}

impl PitwallConfig {
    /// Load config from a TOML file with PITWALL_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ./pitwall.toml
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path.unwrap_or("pitwall.toml");

        let config: PitwallConfig = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("PITWALL_").split("_"))
            .extract()
            .map_err(|e| crate::error::PitwallError::Config(e.to_string()))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_optional_sections() {
        let config: PitwallConfig = serde_json::from_value(serde_json::json!({
            "telegram": { "bot_token": "123:abc" }
        }))
        .unwrap();
        assert_eq!(config.scheduler.tick_secs, 60);
        assert_eq!(config.scheduler.refresh_secs, 21_600);
        assert!(config.feed.primary_url.contains("jolpi.ca"));
        assert!(config.feed.season.is_none());
    }

    #[test]
    fn season_override_wins() {
        let feed = FeedConfig {
            season: Some(2024),
            ..FeedConfig::default()
        };
        assert_eq!(feed.season_or_current(), 2024);
    }
}
