//! Locale-driven message builders for every command reply.
//!
//! Standings arrive either live from the feed (string-typed fields) or from
//! the SQLite cache (typed columns); both are converted to the row structs
//! here so each message has exactly one builder.

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use pitwall_core::types::Lang;
use pitwall_data::types::SessionTime;
use pitwall_data::{ConstructorStanding, DriverStanding, FeedStats, Race};
use pitwall_locale::render;
use pitwall_store::{CachedConstructorStanding, CachedDriverStanding};

#[derive(Debug, Clone)]
pub struct DriverRow {
    pub position: String,
    pub first_name: String,
    pub last_name: String,
    pub team: String,
    pub points: String,
    pub wins: String,
}

#[derive(Debug, Clone)]
pub struct ConstructorRow {
    pub position: String,
    pub name: String,
    pub points: String,
    pub wins: String,
}

pub fn driver_rows_from_feed(standings: &[DriverStanding]) -> Vec<DriverRow> {
    standings
        .iter()
        .map(|s| DriverRow {
            position: s.position.clone(),
            first_name: s.driver.given_name.clone(),
            last_name: s.driver.family_name.clone(),
            team: s.team_name().to_string(),
            points: s.points.clone(),
            wins: s.wins.clone(),
        })
        .collect()
}

pub fn driver_rows_from_cache(standings: &[CachedDriverStanding]) -> Vec<DriverRow> {
    standings
        .iter()
        .map(|s| {
            let (first, last) = match s.driver_name.split_once(' ') {
                Some((first, last)) => (first.to_string(), last.to_string()),
                None => (s.driver_name.clone(), String::new()),
            };
            DriverRow {
                position: s.position.to_string(),
                first_name: first,
                last_name: last,
                team: s.team.clone(),
                points: s.points.to_string(),
                wins: s.wins.to_string(),
            }
        })
        .collect()
}

pub fn constructor_rows_from_feed(standings: &[ConstructorStanding]) -> Vec<ConstructorRow> {
    standings
        .iter()
        .map(|s| ConstructorRow {
            position: s.position.clone(),
            name: s.constructor.name.clone(),
            points: s.points.clone(),
            wins: s.wins.clone(),
        })
        .collect()
}

pub fn constructor_rows_from_cache(standings: &[CachedConstructorStanding]) -> Vec<ConstructorRow> {
    standings
        .iter()
        .map(|s| ConstructorRow {
            position: s.position.to_string(),
            name: s.team_name.clone(),
            points: s.points.to_string(),
            wins: s.wins.to_string(),
        })
        .collect()
}

fn fmt_full(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%B %-d, %Y %H:%M").to_string()
}

fn fmt_date(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%B %-d, %Y").to_string()
}

fn fmt_short(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%B %-d, %H:%M").to_string()
}

fn push_session(out: &mut String, lang: Lang, tz: Tz, key: &str, session: &Option<SessionTime>) {
    if let Some(start) = session.as_ref().and_then(|s| s.start_time()) {
        out.push_str(&render(lang, key, &[("time", &fmt_short(start, tz))]));
        out.push('\n');
    }
}

/// `/schedule`: up to five upcoming and five most recent past races.
pub fn schedule_message(
    lang: Lang,
    tz: Tz,
    season: i32,
    races: &[Race],
    now: DateTime<Utc>,
) -> String {
    let year = season.to_string();
    if races.is_empty() {
        return render(lang, "no_races", &[("year", &year)]);
    }

    let upcoming: Vec<(&Race, DateTime<Utc>)> = races
        .iter()
        .filter_map(|r| r.start_time().map(|s| (r, s)))
        .filter(|(_, start)| *start > now)
        .take(5)
        .collect();
    let past: Vec<(&Race, DateTime<Utc>)> = {
        let mut past: Vec<_> = races
            .iter()
            .filter_map(|r| r.start_time().map(|s| (r, s)))
            .filter(|(_, start)| *start <= now)
            .collect();
        let keep = past.len().saturating_sub(5);
        past.drain(..keep);
        past.reverse();
        past
    };

    let mut out = render(lang, "schedule_title", &[("year", &year)]);
    out.push_str("\n\n");

    if !upcoming.is_empty() {
        out.push_str(&render(lang, "upcoming_races", &[]));
        out.push_str("\n\n");
        for (race, start) in &upcoming {
            out.push_str(&race_header(lang, race));
            out.push_str(&render(lang, "race_circuit", &[("circuitName", &race.circuit.circuit_name)]));
            out.push('\n');
            out.push_str(&render(
                lang,
                "race_time",
                &[("date", &fmt_full(*start, tz)), ("timezone", tz.name())],
            ));
            out.push('\n');
            push_session(&mut out, lang, tz, "fp1", &race.first_practice);
            push_session(&mut out, lang, tz, "fp2", &race.second_practice);
            push_session(&mut out, lang, tz, "fp3", &race.third_practice);
            push_session(&mut out, lang, tz, "sprint", &race.sprint);
            push_session(&mut out, lang, tz, "qualifying", &race.qualifying);
            out.push('\n');
        }
    } else if season > now.year() {
        out.push_str(&render(lang, "schedule_not_released", &[("year", &year)]));
        out.push_str("\n\n");
    } else {
        out.push_str(&render(lang, "no_upcoming_races", &[]));
        out.push_str("\n\n");
    }

    if !past.is_empty() {
        out.push_str(&render(lang, "past_races", &[]));
        out.push_str("\n\n");
        for (race, start) in &past {
            out.push_str(&race_header(lang, race));
            out.push_str(&render(lang, "race_date", &[("date", &fmt_date(*start, tz))]));
            out.push_str("\n\n");
        }
    } else if season <= now.year() {
        out.push_str(&render(lang, "no_past_races", &[]));
        out.push('\n');
    }

    out
}

/// "🏁 Round N: name\n📍 locality, country\n", shared by both schedule halves.
fn race_header(lang: Lang, race: &Race) -> String {
    let mut out = render(
        lang,
        "race_round",
        &[("round", &race.round), ("raceName", &race.race_name)],
    );
    out.push('\n');
    out.push_str(&render(
        lang,
        "race_location",
        &[
            ("locality", &race.circuit.location.locality),
            ("country", &race.circuit.location.country),
        ],
    ));
    out.push('\n');
    out
}

/// `/driverstandings`: top ten.
pub fn driver_standings_message(lang: Lang, rows: &[DriverRow]) -> String {
    let mut out = render(lang, "driver_standings_title", &[]);
    out.push_str("\n\n");
    for row in rows.iter().take(10) {
        out.push_str(&render(
            lang,
            "driver_standings_entry",
            &[
                ("position", &row.position),
                ("firstName", &row.first_name),
                ("lastName", &row.last_name),
                ("points", &row.points),
                ("wins", &row.wins),
                ("team", &row.team),
            ],
        ));
        out.push_str("\n\n");
    }
    out
}

/// `/constructorstandings`: full table.
pub fn constructor_standings_message(lang: Lang, rows: &[ConstructorRow]) -> String {
    let mut out = render(lang, "constructor_standings_title", &[]);
    out.push_str("\n\n");
    for row in rows {
        out.push_str(&render(
            lang,
            "constructor_standings_entry",
            &[
                ("position", &row.position),
                ("name", &row.name),
                ("points", &row.points),
                ("wins", &row.wins),
            ],
        ));
        out.push_str("\n\n");
    }
    out
}

/// `/results`: last race classification, top ten, times in the user's zone.
pub fn results_message(lang: Lang, tz: Tz, race: &Race) -> String {
    if race.results.is_empty() {
        return render(lang, "no_results", &[]);
    }
    let start = race.start_time();
    let mut out = render(
        lang,
        "results_title",
        &[
            ("raceName", &race.race_name),
            ("date", &start.map(|s| fmt_date(s, tz)).unwrap_or_else(|| race.date.clone())),
            ("time", &start.map(|s| s.with_timezone(&tz).format("%H:%M").to_string()).unwrap_or_default()),
            ("timezone", tz.name()),
        ],
    );
    out.push_str("\n\n");
    for entry in race.results.iter().take(10) {
        out.push_str(&render(
            lang,
            "results_entry",
            &[
                ("position", &entry.position),
                ("firstName", &entry.driver.given_name),
                ("lastName", &entry.driver.family_name),
                ("time", entry.time_or_dnf()),
                ("points", &entry.points),
            ],
        ));
        out.push_str("\n\n");
    }
    out
}

/// `/live`: next race details, countdown, session times, top three drivers.
pub fn live_message(
    lang: Lang,
    tz: Tz,
    season: i32,
    race: &Race,
    top_drivers: &[DriverStanding],
    now: DateTime<Utc>,
) -> String {
    let mut out = render(
        lang,
        "next_race_title",
        &[("year", &season.to_string()), ("raceName", &race.race_name)],
    );
    out.push('\n');
    out.push_str(&render(
        lang,
        "next_race_location",
        &[
            ("locality", &race.circuit.location.locality),
            ("country", &race.circuit.location.country),
        ],
    ));
    out.push('\n');
    out.push_str(&render(
        lang,
        "next_race_circuit",
        &[("circuitName", &race.circuit.circuit_name)],
    ));
    out.push_str("\n\n");

    if let Some(start) = race.start_time() {
        out.push_str(&render(
            lang,
            "next_race_date",
            &[("date", &fmt_full(start, tz)), ("timezone", tz.name())],
        ));
        out.push('\n');
        out.push_str(&countdown(lang, start, now));
        out.push_str("\n\n");
    }

    push_session(&mut out, lang, tz, "qualifying", &race.qualifying);
    push_session(&mut out, lang, tz, "fp1", &race.first_practice);
    push_session(&mut out, lang, tz, "sprint", &race.sprint);

    if !top_drivers.is_empty() {
        out.push('\n');
        out.push_str(&render(lang, "standings_top", &[]));
        out.push('\n');
        for standing in top_drivers.iter().take(3) {
            out.push_str(&render(
                lang,
                "standings_top_entry",
                &[
                    ("position", &standing.position),
                    ("firstName", &standing.driver.given_name),
                    ("lastName", &standing.driver.family_name),
                    ("points", &standing.points),
                ],
            ));
            out.push('\n');
        }
    }
    out
}

fn countdown(lang: Lang, start: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (start - now).num_seconds().max(0);
    render(
        lang,
        "countdown",
        &[
            ("days", &(secs / 86_400).to_string()),
            ("hours", &(secs % 86_400 / 3_600).to_string()),
            ("minutes", &(secs % 3_600 / 60).to_string()),
        ],
    )
}

/// `/pitstops`: compact last-race classification.
pub fn pitstops_message(lang: Lang, season: i32, race: &Race) -> String {
    let mut out = render(
        lang,
        "pitstops_title",
        &[("year", &season.to_string()), ("raceName", &race.race_name)],
    );
    out.push_str("\n\n");
    if race.results.is_empty() {
        out.push_str(&render(lang, "no_pitstops", &[]));
        return out;
    }
    for entry in race.results.iter().take(10) {
        out.push_str(&render(
            lang,
            "result_entry",
            &[
                ("position", &entry.position),
                (
                    "name",
                    &format!("{} {}", entry.driver.given_name, entry.driver.family_name),
                ),
                ("team", &entry.constructor.name),
                ("time", entry.time_or_dnf()),
            ],
        ));
        out.push('\n');
    }
    out
}

/// `/driver`: one driver's card from the standings.
pub fn driver_info_message(lang: Lang, season: i32, standing: &DriverStanding) -> String {
    let driver = &standing.driver;
    let mut out = render(
        lang,
        "driver_info_title",
        &[
            ("year", &season.to_string()),
            ("firstName", &driver.given_name),
            ("lastName", &driver.family_name),
        ],
    );
    out.push('\n');
    out.push_str(&render(lang, "driver_info_team", &[("team", standing.team_name())]));
    out.push('\n');
    if let Some(number) = &driver.permanent_number {
        out.push_str(&render(lang, "driver_info_number", &[("number", number)]));
        out.push('\n');
    }
    if let Some(nationality) = &driver.nationality {
        out.push_str(&render(lang, "driver_info_nationality", &[("nationality", nationality)]));
        out.push('\n');
    }
    out.push_str(&render(lang, "driver_info_position", &[("position", &standing.position)]));
    out.push('\n');
    out.push_str(&render(lang, "driver_info_points", &[("points", &standing.points)]));
    out.push('\n');
    out.push_str(&render(lang, "driver_info_wins", &[("wins", &standing.wins)]));
    out.push('\n');
    if let Some(url) = &driver.url {
        out.push('\n');
        out.push_str(&render(lang, "driver_info_more", &[("url", url)]));
        out.push('\n');
    }
    out
}

/// Find a driver in the standings by permanent number or (partial,
/// case-insensitive) name.
pub fn find_driver<'a>(standings: &'a [DriverStanding], query: &str) -> Option<&'a DriverStanding> {
    let query = query.trim();
    if query.parse::<u32>().is_ok() {
        return standings
            .iter()
            .find(|s| s.driver.permanent_number.as_deref() == Some(query));
    }
    let q = query.to_lowercase();
    standings.iter().find(|s| {
        s.driver.family_name.to_lowercase().contains(&q)
            || s.driver.given_name.to_lowercase().contains(&q)
            || format!("{} {}", s.driver.given_name, s.driver.family_name)
                .to_lowercase()
                .contains(&q)
    })
}

/// `/apistatus stats`: usage counters.
pub fn api_stats_message(lang: Lang, season: i32, stats: FeedStats) -> String {
    render(
        lang,
        "api_stats",
        &[
            ("year", &season.to_string()),
            ("total", &stats.total.to_string()),
            ("success", &stats.success.to_string()),
            ("successRate", &stats.success_rate()),
            ("failed", &stats.failed.to_string()),
            ("primary", &stats.primary.to_string()),
            ("fallback", &stats.fallback.to_string()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn race(round: &str, date: &str, time: Option<&str>) -> Race {
        serde_json::from_value(serde_json::json!({
            "season": "2025",
            "round": round,
            "raceName": format!("Grand Prix {round}"),
            "Circuit": {
                "circuitId": "spa",
                "circuitName": "Circuit de Spa-Francorchamps",
                "Location": { "locality": "Spa", "country": "Belgium" }
            },
            "date": date,
            "time": time,
        }))
        .unwrap()
    }

    fn standing(number: Option<&str>, first: &str, last: &str) -> DriverStanding {
        serde_json::from_value(serde_json::json!({
            "position": "1",
            "points": "161",
            "wins": "4",
            "Driver": {
                "driverId": last.to_lowercase(),
                "permanentNumber": number,
                "givenName": first,
                "familyName": last
            },
            "Constructors": [{ "constructorId": "mclaren", "name": "McLaren" }]
        }))
        .unwrap()
    }

    #[test]
    fn find_driver_by_number_and_name() {
        let standings = vec![
            standing(Some("81"), "Oscar", "Piastri"),
            standing(Some("4"), "Lando", "Norris"),
        ];
        assert_eq!(find_driver(&standings, "4").unwrap().driver.family_name, "Norris");
        assert_eq!(find_driver(&standings, "piastri").unwrap().driver.given_name, "Oscar");
        assert_eq!(find_driver(&standings, "Lando Nor").unwrap().driver.family_name, "Norris");
        assert!(find_driver(&standings, "Hamilton").is_none());
        assert!(find_driver(&standings, "99").is_none());
    }

    #[test]
    fn schedule_splits_upcoming_and_past() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let races = vec![
            race("1", "2025-03-16", Some("04:00:00Z")),
            race("9", "2025-06-15", Some("13:00:00Z")),
        ];
        let out = schedule_message(Lang::En, chrono_tz::UTC, 2025, &races, now);
        assert!(out.contains("Upcoming Races"));
        assert!(out.contains("Round 9"));
        assert!(out.contains("Past Races"));
        assert!(out.contains("Round 1"));
    }

    #[test]
    fn schedule_renders_times_in_user_zone() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let races = vec![race("9", "2025-06-15", Some("13:00:00Z"))];
        let out = schedule_message(
            Lang::En,
            chrono_tz::Europe::Kyiv,
            2025,
            &races,
            now,
        );
        // 13:00 UTC is 16:00 in Kyiv (EEST).
        assert!(out.contains("16:00"), "got: {out}");
        assert!(out.contains("Europe/Kyiv"));
    }

    #[test]
    fn empty_season_renders_no_races() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let out = schedule_message(Lang::En, chrono_tz::UTC, 2025, &[], now);
        assert!(out.contains("No race schedule available"));
    }

    #[test]
    fn cached_driver_rows_split_names() {
        let rows = driver_rows_from_cache(&[CachedDriverStanding {
            driver_id: "verstappen".to_string(),
            position: 3,
            driver_name: "Max Verstappen".to_string(),
            points: 124.0,
            wins: 2,
            team: "Red Bull".to_string(),
        }]);
        assert_eq!(rows[0].first_name, "Max");
        assert_eq!(rows[0].last_name, "Verstappen");
        assert_eq!(rows[0].position, "3");
    }

    #[test]
    fn countdown_breaks_down_duration() {
        let start = Utc.with_ymd_and_hms(2025, 5, 4, 14, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 5, 2, 11, 30, 0).unwrap();
        let out = countdown(Lang::En, start, now);
        assert!(out.contains("2 days"));
        assert!(out.contains("2 hours"));
        assert!(out.contains("30 minutes"));
    }

    #[test]
    fn results_without_entries_apologises() {
        let race = race("9", "2025-06-15", Some("13:00:00Z"));
        let out = results_message(Lang::En, chrono_tz::UTC, &race);
        assert!(out.contains("No race results found"));
    }
}
