use pitwall_core::types::RemindBefore;

/// A user's request to be notified before an event.
///
/// Row exists = PENDING; row absent = delivered or deleted. There is no
/// intermediate persisted state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub id: i64,
    pub user_id: i64,
    /// Delivery destination, denormalised from the user so delivery needs
    /// no join.
    pub chat_id: i64,
    /// `"{season}_{round}"` of the target event.
    pub event_id: String,
    pub remind_before: RemindBefore,
}

/// Per-chat presentation preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPrefs {
    pub user_id: i64,
    pub chat_id: i64,
    /// IANA timezone name, e.g. "Europe/London".
    pub timezone: String,
    /// Language code understood by pitwall-locale ("en", "uk").
    pub language: String,
}

/// Cached copy of a race row, warmed by the refresh job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedRace {
    pub event_id: String,
    pub name: String,
    pub date: String,
    pub time: Option<String>,
    pub location: String,
    pub round: i64,
    pub season: i64,
    pub circuit_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CachedDriverStanding {
    pub driver_id: String,
    pub position: i64,
    pub driver_name: String,
    pub points: f64,
    pub wins: i64,
    pub team: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CachedConstructorStanding {
    pub constructor_id: String,
    pub position: i64,
    pub team_name: String,
    pub points: f64,
    pub wins: i64,
}
