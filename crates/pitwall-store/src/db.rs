use rusqlite::Connection;

use crate::error::Result;

/// Initialise the full schema in `conn`. Idempotent — safe on every startup.
///
/// `UNIQUE(user_id, event_id)` on `reminders` enforces the
/// one-reminder-per-(user, event) invariant at write time; the CHECK pins
/// `remind_before` to the offered lead times. `idx_reminders_event` keeps
/// the per-event lookup cheap during scheduler ticks.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER NOT NULL PRIMARY KEY,   -- platform user id
            chat_id     INTEGER NOT NULL UNIQUE,
            timezone    TEXT    NOT NULL DEFAULT 'UTC',
            language    TEXT    NOT NULL DEFAULT 'en',
            created_at  TEXT    NOT NULL
        );

        CREATE TABLE IF NOT EXISTS reminders (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id       INTEGER NOT NULL REFERENCES users(id),
            chat_id       INTEGER NOT NULL,
            event_id      TEXT    NOT NULL,
            remind_before INTEGER NOT NULL CHECK (remind_before IN (60, 180, 1440)),
            created_at    TEXT    NOT NULL,
            UNIQUE(user_id, event_id)
        );
        CREATE INDEX IF NOT EXISTS idx_reminders_event ON reminders (event_id);

        CREATE TABLE IF NOT EXISTS races (
            event_id    TEXT    NOT NULL PRIMARY KEY,   -- '{season}_{round}'
            name        TEXT    NOT NULL,
            date        TEXT    NOT NULL,
            time        TEXT,
            location    TEXT    NOT NULL,
            round       INTEGER NOT NULL,
            season      INTEGER NOT NULL,
            circuit_id  TEXT    NOT NULL,
            updated_at  TEXT    NOT NULL
        );

        CREATE TABLE IF NOT EXISTS driver_standings (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            driver_id   TEXT    NOT NULL,
            position    INTEGER NOT NULL,
            driver_name TEXT    NOT NULL,
            points      REAL    NOT NULL,
            wins        INTEGER NOT NULL,
            team        TEXT    NOT NULL,
            season      INTEGER NOT NULL,
            updated_at  TEXT    NOT NULL
        );

        CREATE TABLE IF NOT EXISTS constructor_standings (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            constructor_id TEXT NOT NULL,
            position    INTEGER NOT NULL,
            team_name   TEXT    NOT NULL,
            points      REAL    NOT NULL,
            wins        INTEGER NOT NULL,
            season      INTEGER NOT NULL,
            updated_at  TEXT    NOT NULL
        );
        ",
    )?;
    Ok(())
}
