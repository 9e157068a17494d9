use std::sync::Mutex;

use rusqlite::Connection;
use tracing::debug;

use crate::error::Result;
use crate::types::{CachedConstructorStanding, CachedDriverStanding, CachedRace};

/// Local copies of feed data, rewritten wholesale by the refresh job.
///
/// Read paths serve commands when the live feed is down; the scheduler never
/// reads from here.
pub struct CacheStore {
    db: Mutex<Connection>,
}

impl CacheStore {
    /// Wrap an already-open (and `init_db`-initialised) connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Mutex::new(conn),
        }
    }

    /// Upsert the season's races. Rows for events the feed stopped returning
    /// are left in place — reminders may still reference them.
    pub fn replace_races(&self, races: &[CachedRace]) -> Result<()> {
        let mut db = self.db.lock().unwrap();
        let now = chrono::Utc::now().to_rfc3339();
        let tx = db.transaction()?;
        for race in races {
            tx.execute(
                "INSERT OR REPLACE INTO races
                 (event_id, name, date, time, location, round, season, circuit_id, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                rusqlite::params![
                    race.event_id,
                    race.name,
                    race.date,
                    race.time,
                    race.location,
                    race.round,
                    race.season,
                    race.circuit_id,
                    now
                ],
            )?;
        }
        tx.commit()?;
        debug!(count = races.len(), "race cache refreshed");
        Ok(())
    }

    /// All cached races for a season, in round order.
    pub fn races(&self, season: i64) -> Result<Vec<CachedRace>> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(
            "SELECT event_id, name, date, time, location, round, season, circuit_id
             FROM races WHERE season = ?1 ORDER BY round",
        )?;
        let rows = stmt.query_map([season], |row| {
            Ok(CachedRace {
                event_id: row.get(0)?,
                name: row.get(1)?,
                date: row.get(2)?,
                time: row.get(3)?,
                location: row.get(4)?,
                round: row.get(5)?,
                season: row.get(6)?,
                circuit_id: row.get(7)?,
            })
        })?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// Replace the season's driver standings with a fresh copy.
    pub fn replace_driver_standings(
        &self,
        season: i64,
        standings: &[CachedDriverStanding],
    ) -> Result<()> {
        let mut db = self.db.lock().unwrap();
        let now = chrono::Utc::now().to_rfc3339();
        let tx = db.transaction()?;
        tx.execute("DELETE FROM driver_standings WHERE season = ?1", [season])?;
        for s in standings {
            tx.execute(
                "INSERT INTO driver_standings
                 (driver_id, position, driver_name, points, wins, team, season, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                rusqlite::params![
                    s.driver_id,
                    s.position,
                    s.driver_name,
                    s.points,
                    s.wins,
                    s.team,
                    season,
                    now
                ],
            )?;
        }
        tx.commit()?;
        debug!(count = standings.len(), season, "driver standings cache refreshed");
        Ok(())
    }

    pub fn driver_standings(&self, season: i64) -> Result<Vec<CachedDriverStanding>> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(
            "SELECT driver_id, position, driver_name, points, wins, team
             FROM driver_standings WHERE season = ?1 ORDER BY position",
        )?;
        let rows = stmt.query_map([season], |row| {
            Ok(CachedDriverStanding {
                driver_id: row.get(0)?,
                position: row.get(1)?,
                driver_name: row.get(2)?,
                points: row.get(3)?,
                wins: row.get(4)?,
                team: row.get(5)?,
            })
        })?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// Replace the season's constructor standings with a fresh copy.
    pub fn replace_constructor_standings(
        &self,
        season: i64,
        standings: &[CachedConstructorStanding],
    ) -> Result<()> {
        let mut db = self.db.lock().unwrap();
        let now = chrono::Utc::now().to_rfc3339();
        let tx = db.transaction()?;
        tx.execute(
            "DELETE FROM constructor_standings WHERE season = ?1",
            [season],
        )?;
        for s in standings {
            tx.execute(
                "INSERT INTO constructor_standings
                 (constructor_id, position, team_name, points, wins, season, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![s.constructor_id, s.position, s.team_name, s.points, s.wins, season, now],
            )?;
        }
        tx.commit()?;
        debug!(count = standings.len(), season, "constructor standings cache refreshed");
        Ok(())
    }

    pub fn constructor_standings(&self, season: i64) -> Result<Vec<CachedConstructorStanding>> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(
            "SELECT constructor_id, position, team_name, points, wins
             FROM constructor_standings WHERE season = ?1 ORDER BY position",
        )?;
        let rows = stmt.query_map([season], |row| {
            Ok(CachedConstructorStanding {
                constructor_id: row.get(0)?,
                position: row.get(1)?,
                team_name: row.get(2)?,
                points: row.get(3)?,
                wins: row.get(4)?,
            })
        })?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;

    fn store() -> CacheStore {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        CacheStore::new(conn)
    }

    fn race(event_id: &str, round: i64) -> CachedRace {
        CachedRace {
            event_id: event_id.to_string(),
            name: format!("Round {round}"),
            date: "2025-05-04".to_string(),
            time: Some("14:00:00Z".to_string()),
            location: "Miami, USA".to_string(),
            round,
            season: 2025,
            circuit_id: "miami".to_string(),
        }
    }

    #[test]
    fn replace_races_upserts_by_event_id() {
        let store = store();
        store.replace_races(&[race("2025_1", 1), race("2025_2", 2)]).unwrap();

        let mut updated = race("2025_2", 2);
        updated.name = "Renamed".to_string();
        store.replace_races(&[updated]).unwrap();

        let races = store.races(2025).unwrap();
        assert_eq!(races.len(), 2);
        assert_eq!(races[1].name, "Renamed");
    }

    #[test]
    fn driver_standings_replace_wholesale() {
        let store = store();
        let standing = |pos: i64, name: &str| CachedDriverStanding {
            driver_id: name.to_lowercase(),
            position: pos,
            driver_name: name.to_string(),
            points: 100.0 - pos as f64,
            wins: 2,
            team: "McLaren".to_string(),
        };
        store
            .replace_driver_standings(2025, &[standing(1, "Piastri"), standing(2, "Norris")])
            .unwrap();
        store
            .replace_driver_standings(2025, &[standing(1, "Norris")])
            .unwrap();

        let rows = store.driver_standings(2025).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].driver_name, "Norris");
    }

    #[test]
    fn constructor_standings_scoped_by_season() {
        let store = store();
        let standing = CachedConstructorStanding {
            constructor_id: "mclaren".to_string(),
            position: 1,
            team_name: "McLaren".to_string(),
            points: 246.0,
            wins: 5,
        };
        store.replace_constructor_standings(2025, &[standing]).unwrap();

        assert_eq!(store.constructor_standings(2025).unwrap().len(), 1);
        assert!(store.constructor_standings(2024).unwrap().is_empty());
    }
}
