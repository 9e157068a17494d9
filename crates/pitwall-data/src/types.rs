use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A race weekend as returned by the schedule and results endpoints.
///
/// `results` is only populated by the results endpoints; the schedule
/// endpoint omits the field entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Race {
    pub season: String,
    pub round: String,
    #[serde(rename = "raceName")]
    pub race_name: String,
    #[serde(rename = "Circuit")]
    pub circuit: Circuit,
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(rename = "FirstPractice", default)]
    pub first_practice: Option<SessionTime>,
    #[serde(rename = "SecondPractice", default)]
    pub second_practice: Option<SessionTime>,
    #[serde(rename = "ThirdPractice", default)]
    pub third_practice: Option<SessionTime>,
    #[serde(rename = "Qualifying", default)]
    pub qualifying: Option<SessionTime>,
    #[serde(rename = "Sprint", default)]
    pub sprint: Option<SessionTime>,
    #[serde(rename = "Results", default)]
    pub results: Vec<ResultEntry>,
}

impl Race {
    /// Stable event key, `"{season}_{round}"` — survives feed pagination and
    /// endpoint switches.
    pub fn event_id(&self) -> String {
        format!("{}_{}", self.season, self.round)
    }

    /// Race start in UTC. Events without a published time default to
    /// midnight UTC. `None` only when the feed sends an unparseable date.
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        parse_start_time(&self.date, self.time.as_deref())
    }

    /// "Locality, Country" — the display form used in every message.
    pub fn location(&self) -> String {
        format!(
            "{}, {}",
            self.circuit.location.locality, self.circuit.location.country
        )
    }
}

/// Date + time of a support session (practice, qualifying, sprint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTime {
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
}

impl SessionTime {
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        parse_start_time(&self.date, self.time.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circuit {
    #[serde(rename = "circuitId")]
    pub circuit_id: String,
    #[serde(rename = "circuitName")]
    pub circuit_name: String,
    #[serde(rename = "Location")]
    pub location: CircuitLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitLocation {
    pub locality: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    #[serde(rename = "driverId")]
    pub driver_id: String,
    #[serde(rename = "givenName")]
    pub given_name: String,
    #[serde(rename = "familyName")]
    pub family_name: String,
    #[serde(rename = "permanentNumber", default)]
    pub permanent_number: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstructorRef {
    #[serde(rename = "constructorId")]
    pub constructor_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverStanding {
    pub position: String,
    pub points: String,
    pub wins: String,
    #[serde(rename = "Driver")]
    pub driver: Driver,
    #[serde(rename = "Constructors", default)]
    pub constructors: Vec<ConstructorRef>,
}

impl DriverStanding {
    /// Name of the standing's first listed constructor, if any.
    pub fn team_name(&self) -> &str {
        self.constructors.first().map(|c| c.name.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstructorStanding {
    pub position: String,
    pub points: String,
    pub wins: String,
    #[serde(rename = "Constructor")]
    pub constructor: ConstructorRef,
}

/// One classified finisher in a race result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultEntry {
    pub position: String,
    pub points: String,
    #[serde(rename = "Driver")]
    pub driver: Driver,
    #[serde(rename = "Constructor")]
    pub constructor: ConstructorRef,
    #[serde(rename = "Time", default)]
    pub time: Option<RaceTime>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ResultEntry {
    /// Finishing time, or "DNF" when the driver was not classified with one.
    pub fn time_or_dnf(&self) -> &str {
        self.time.as_ref().map(|t| t.time.as_str()).unwrap_or("DNF")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceTime {
    pub time: String,
}

/// Combine the feed's `date` + optional `time` into a UTC instant.
///
/// The feed sends `"2025-05-04"` and `"14:00:00Z"`; provisional calendar
/// entries omit the time, which defaults to midnight UTC.
pub fn parse_start_time(date: &str, time: Option<&str>) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let time = match time {
        Some(t) => NaiveTime::parse_from_str(t.trim_end_matches('Z'), "%H:%M:%S").ok()?,
        None => NaiveTime::MIN,
    };
    Some(Utc.from_utc_datetime(&date.and_time(time)))
}

/// First race in `races` that has not started yet. The feed returns the
/// season in round order, so the first future entry is the next one.
pub fn next_race(races: &[Race], now: DateTime<Utc>) -> Option<&Race> {
    races
        .iter()
        .find(|race| race.start_time().is_some_and(|start| start > now))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn race(round: &str, date: &str, time: Option<&str>) -> Race {
        serde_json::from_value(serde_json::json!({
            "season": "2025",
            "round": round,
            "raceName": format!("Race {round}"),
            "Circuit": {
                "circuitId": "monaco",
                "circuitName": "Circuit de Monaco",
                "Location": { "locality": "Monte-Carlo", "country": "Monaco" }
            },
            "date": date,
            "time": time,
        }))
        .unwrap()
    }

    #[test]
    fn event_id_is_season_underscore_round() {
        let r = race("5", "2025-05-04", Some("14:00:00Z"));
        assert_eq!(r.event_id(), "2025_5");
    }

    #[test]
    fn start_time_combines_date_and_time() {
        let r = race("5", "2025-05-04", Some("14:00:00Z"));
        assert_eq!(
            r.start_time().unwrap(),
            Utc.with_ymd_and_hms(2025, 5, 4, 14, 0, 0).unwrap()
        );
    }

    #[test]
    fn start_time_defaults_to_midnight_without_time() {
        let r = race("5", "2025-05-04", None);
        assert_eq!(
            r.start_time().unwrap(),
            Utc.with_ymd_and_hms(2025, 5, 4, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn start_time_none_on_bad_date() {
        let r = race("5", "soon", None);
        assert!(r.start_time().is_none());
    }

    #[test]
    fn next_race_picks_first_future_entry() {
        let races = vec![
            race("1", "2025-03-16", Some("04:00:00Z")),
            race("2", "2025-03-23", Some("07:00:00Z")),
            race("3", "2025-04-06", Some("05:00:00Z")),
        ];
        let now = Utc.with_ymd_and_hms(2025, 3, 20, 0, 0, 0).unwrap();
        assert_eq!(next_race(&races, now).unwrap().round, "2");

        let after_season = Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap();
        assert!(next_race(&races, after_season).is_none());
    }

    #[test]
    fn standing_parses_ergast_shape() {
        let standing: DriverStanding = serde_json::from_value(serde_json::json!({
            "position": "1",
            "points": "161",
            "wins": "4",
            "Driver": {
                "driverId": "piastri",
                "permanentNumber": "81",
                "givenName": "Oscar",
                "familyName": "Piastri",
                "nationality": "Australian"
            },
            "Constructors": [
                { "constructorId": "mclaren", "name": "McLaren" }
            ]
        }))
        .unwrap();
        assert_eq!(standing.team_name(), "McLaren");
        assert_eq!(standing.driver.permanent_number.as_deref(), Some("81"));
    }

    #[test]
    fn result_entry_without_time_is_dnf() {
        let entry: ResultEntry = serde_json::from_value(serde_json::json!({
            "position": "18",
            "points": "0",
            "Driver": { "driverId": "doohan", "givenName": "Jack", "familyName": "Doohan" },
            "Constructor": { "constructorId": "alpine", "name": "Alpine" },
            "status": "Collision"
        }))
        .unwrap();
        assert_eq!(entry.time_or_dnf(), "DNF");
    }
}
