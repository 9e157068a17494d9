use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use pitwall_core::config::SchedulerConfig;
use pitwall_core::types::Lang;
use pitwall_data::{Race, RaceFeed};
use pitwall_store::{Reminder, ReminderStore, UserStore};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::error::Result;
use crate::notify::Notifier;

/// Periodic due-reminder scanner.
///
/// One logical instance runs per process. Ticks execute inline in the run
/// loop, so two ticks can never overlap; intervals missed while a tick was
/// still in flight are skipped rather than queued.
pub struct ReminderEngine {
    feed: Arc<dyn RaceFeed>,
    reminders: Arc<ReminderStore>,
    users: Arc<UserStore>,
    notifier: Arc<dyn Notifier>,
    season: i32,
    tick: Duration,
    delivery_timeout: Duration,
}

impl ReminderEngine {
    pub fn new(
        feed: Arc<dyn RaceFeed>,
        reminders: Arc<ReminderStore>,
        users: Arc<UserStore>,
        notifier: Arc<dyn Notifier>,
        season: i32,
        config: &SchedulerConfig,
    ) -> Self {
        Self {
            feed,
            reminders,
            users,
            notifier,
            season,
            tick: Duration::from_secs(config.tick_secs),
            delivery_timeout: Duration::from_secs(config.delivery_timeout_secs),
        }
    }

    /// Main event loop. Scans until `shutdown` broadcasts `true`; an
    /// in-flight tick finishes its current deliver/delete pairs first.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(tick_secs = self.tick.as_secs(), season = self.season, "reminder engine started");

        let mut interval = tokio::time::interval(self.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = self.tick(Utc::now()).await {
                        warn!("reminder tick aborted: {e}");
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("reminder engine shutting down");
                        break;
                    }
                }
            }
        }
    }

    /// One scan at `now`. Errors here mean the tick did nothing (feed or
    /// store unavailable); delivery failures are absorbed per reminder.
    pub async fn tick(&self, now: DateTime<Utc>) -> Result<()> {
        let reminders = self.reminders.list_all()?;
        if reminders.is_empty() {
            return Ok(());
        }

        let races = self.feed.season_schedule(self.season).await?;
        let plan = plan_tick(&races, &reminders, now);

        for reminder in &plan.stale {
            // Event already started: never remind late, just drop the row.
            match self.reminders.delete_by_id(reminder.id) {
                Ok(()) => debug!(
                    reminder_id = reminder.id,
                    event_id = %reminder.event_id,
                    "stale reminder dropped"
                ),
                Err(e) => error!(reminder_id = reminder.id, "failed to drop stale reminder: {e}"),
            }
        }

        for item in &plan.due {
            self.deliver_one(item).await;
        }
        Ok(())
    }

    /// Deliver one due reminder and delete it on success. Never propagates:
    /// a failure must not stop the remaining reminders in this tick.
    async fn deliver_one(&self, item: &DueItem) {
        let reminder = &item.reminder;
        let (lang, tz) = self.chat_prefs(reminder.chat_id);

        let time_left = pitwall_locale::render(lang, reminder.remind_before.label_key(), &[]);
        let race_time = format_in_tz(item.start, tz);
        let text = pitwall_locale::reminder_notification(
            lang,
            &item.race_name,
            &time_left,
            &item.location,
            &race_time,
        );

        let send = self.notifier.deliver(reminder.chat_id, &text);
        match tokio::time::timeout(self.delivery_timeout, send).await {
            Ok(Ok(())) => match self.reminders.delete_by_id(reminder.id) {
                Ok(()) => info!(
                    reminder_id = reminder.id,
                    chat_id = reminder.chat_id,
                    event_id = %reminder.event_id,
                    "reminder delivered"
                ),
                // The next tick will re-deliver; at-least-once is accepted.
                Err(e) => error!(reminder_id = reminder.id, "delivered but delete failed: {e}"),
            },
            Ok(Err(e)) => warn!(
                reminder_id = reminder.id,
                chat_id = reminder.chat_id,
                error = %e,
                "delivery failed — reminder retained for retry"
            ),
            Err(_) => warn!(
                reminder_id = reminder.id,
                chat_id = reminder.chat_id,
                timeout_secs = self.delivery_timeout.as_secs(),
                "delivery timed out — reminder retained for retry"
            ),
        }
    }

    /// Language and timezone for a chat; defaults (en, UTC) when the chat is
    /// unknown or the lookup fails. A prefs failure degrades one message, it
    /// never aborts the tick.
    fn chat_prefs(&self, chat_id: i64) -> (Lang, Tz) {
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
}

fn format_in_tz(instant: DateTime<Utc>, tz: Tz) -> String {
    format!("{} {}", instant.with_timezone(&tz).format("%B %-d, %Y %H:%M"), tz.name())
}

/// One reminder selected for delivery, with the event fields the
/// notification needs.
#[derive(Debug, Clone)]
struct DueItem {
    reminder: Reminder,
    race_name: String,
    location: String,
    start: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct TickPlan {
    due: Vec<DueItem>,
    /// Reminders whose event has already started.
    stale: Vec<Reminder>,
}

/// Pure due/stale classification for one tick.
///
/// A reminder is due from `start - remind_before` until the event starts;
/// in steady state that selects it on exactly one tick (the engine deletes
/// it after delivery), and after a failed delivery or a skipped tick it
/// simply stays due, which is the retry-until-delivered fallback. Reminders whose
/// event the feed no longer returns are left untouched (dormant).
fn plan_tick(races: &[Race], reminders: &[Reminder], now: DateTime<Utc>) -> TickPlan {
    let by_event: HashMap<String, &Race> =
        races.iter().map(|race| (race.event_id(), race)).collect();

    let mut plan = TickPlan::default();
    for reminder in reminders {
        let Some(race) = by_event.get(&reminder.event_id) else {
            continue;
        };
        let Some(start) = race.start_time() else {
            continue;
        };
        if start <= now {
            plan.stale.push(reminder.clone());
            continue;
        }
        let fire_time = start - chrono::Duration::minutes(reminder.remind_before.minutes());
        if now >= fire_time {
            plan.due.push(DueItem {
                reminder: reminder.clone(),
                race_name: race.race_name.clone(),
                location: race.location(),
                start,
            });
        }
    }
    plan
}
