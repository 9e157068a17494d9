use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use pitwall_core::types::Lang;
use pitwall_data::types::parse_start_time;
use pitwall_data::{FallbackFeed, FeedMetrics, RaceFeed};
use pitwall_store::{CacheStore, ReminderStore, UserStore};
use tracing::warn;

use crate::selection::SelectionStore;

/// Everything the command and callback handlers need, injected into the
/// dispatcher via dptree.
pub struct AppContext {
    pub feed: Arc<FallbackFeed>,
    pub metrics: Arc<FeedMetrics>,
    pub users: Arc<UserStore>,
    pub reminders: Arc<ReminderStore>,
    pub cache: Arc<CacheStore>,
    pub selection: SelectionStore,
    pub season: i32,
}

/// A race the user can attach a reminder to.
#[derive(Debug, Clone)]
pub struct RaceChoice {
    pub event_id: String,
    pub name: String,
    pub start: DateTime<Utc>,
}

impl AppContext {
    /// Language + timezone for a chat; (en, UTC) for unknown chats. A store
    /// failure degrades to defaults rather than failing the command.
    pub fn prefs(&self, chat_id: i64) -> (Lang, Tz) {
        let prefs = match self.users.prefs_for_chat(chat_id) {
            Ok(p) => p,
            Err(e) => {
                warn!(chat_id, "prefs lookup failed, using defaults: {e}");
                None
            }
        };
        let lang = prefs
            .as_ref()
            .and_then(|p| p.language.parse().ok())
            .unwrap_or_default();
        let tz = prefs
            .as_ref()
            .and_then(|p| p.timezone.parse::<Tz>().ok())
            .unwrap_or(chrono_tz::UTC);
        (lang, tz)
    }

    /// Races that have not started yet, live feed first, cache as fallback.
    pub async fn upcoming_races(&self) -> Vec<RaceChoice> {
        let now = Utc::now();
        match self.feed.season_schedule(self.season).await {
            Ok(races) => races
                .iter()
                .filter_map(|race| {
                    let start = race.start_time()?;
                    (start > now).then(|| RaceChoice {
                        event_id: race.event_id(),
                        name: race.race_name.clone(),
                        start,
                    })
                })
                .collect(),
            Err(e) => {
                warn!(error = %e, "feed down — serving cached races");
                match self.cache.races(self.season as i64) {
                    Ok(cached) => cached
                        .into_iter()
                        .filter_map(|race| {
                            let start = parse_start_time(&race.date, race.time.as_deref())?;
                            (start > now).then_some(RaceChoice {
                                event_id: race.event_id,
                                name: race.name,
                                start,
                            })
                        })
                        .collect(),
                    Err(e) => {
                        warn!("race cache read failed: {e}");
                        Vec::new()
                    }
                }
            }
        }
    }
}
