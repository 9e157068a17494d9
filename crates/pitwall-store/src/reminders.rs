use std::sync::Mutex;

use pitwall_core::types::RemindBefore;
use rusqlite::Connection;
use tracing::debug;

use crate::error::Result;
use crate::types::Reminder;

/// Map a SELECT row (id, user_id, chat_id, event_id, remind_before) to a
/// Reminder. The CHECK constraint keeps `remind_before` inside the
/// enumerated set, so the conversion failure path is schema corruption only.
fn row_to_reminder(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reminder> {
    let minutes: i64 = row.get(4)?;
    let remind_before = RemindBefore::try_from(minutes).map_err(|m| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            rusqlite::types::Type::Integer,
            format!("remind_before outside enumerated set: {m}").into(),
        )
    })?;
    Ok(Reminder {
        id: row.get(0)?,
        user_id: row.get(1)?,
        chat_id: row.get(2)?,
        event_id: row.get(3)?,
        remind_before,
    })
}

const REMINDER_SELECT: &str = "SELECT id, user_id, chat_id, event_id, remind_before FROM reminders";

/// Durable CRUD for reminder rows.
pub struct ReminderStore {
    db: Mutex<Connection>,
}

impl ReminderStore {
    /// Wrap an already-open (and `init_db`-initialised) connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Mutex::new(conn),
        }
    }

    /// Create or update the reminder for `(user_id, event_id)`.
    ///
    /// Last write wins: re-selecting a different offset for the same event
    /// overwrites `remind_before` in place. Returns the row id either way.
    pub fn upsert(
        &self,
        user_id: i64,
        chat_id: i64,
        event_id: &str,
        remind_before: RemindBefore,
    ) -> Result<i64> {
        let db = self.db.lock().unwrap();
        let now = chrono::Utc::now().to_rfc3339();
        db.execute(
            "INSERT INTO reminders (user_id, chat_id, event_id, remind_before, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(user_id, event_id)
             DO UPDATE SET remind_before = excluded.remind_before",
            rusqlite::params![user_id, chat_id, event_id, remind_before.minutes(), now],
        )?;
        let id = db.query_row(
            "SELECT id FROM reminders WHERE user_id = ?1 AND event_id = ?2",
            rusqlite::params![user_id, event_id],
            |row| row.get(0),
        )?;
        debug!(reminder_id = id, user_id, event_id, minutes = remind_before.minutes(), "reminder upserted");
        Ok(id)
    }

    /// All reminders registered for one event, unordered.
    pub fn for_event(&self, event_id: &str) -> Result<Vec<Reminder>> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(&format!("{REMINDER_SELECT} WHERE event_id = ?1"))?;
        let rows = stmt.query_map([event_id], row_to_reminder)?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// All reminders owned by one user.
    pub fn for_user(&self, user_id: i64) -> Result<Vec<Reminder>> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(&format!("{REMINDER_SELECT} WHERE user_id = ?1 ORDER BY id"))?;
        let rows = stmt.query_map([user_id], row_to_reminder)?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// Full table scan, one per scheduler tick.
    pub fn list_all(&self) -> Result<Vec<Reminder>> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(REMINDER_SELECT)?;
        let rows = stmt.query_map([], row_to_reminder)?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// Delete a reminder by id. A missing row is not an error; the user may
    /// have removed it between the scheduler reading and delivering.
    pub fn delete_by_id(&self, id: i64) -> Result<()> {
        let db = self.db.lock().unwrap();
        let n = db.execute("DELETE FROM reminders WHERE id = ?1", [id])?;
        if n == 0 {
            debug!(reminder_id = id, "delete_by_id: row already gone");
        }
        Ok(())
    }

    /// User-scoped delete. Returns whether a row was removed, so callers can
    /// tell a successful deletion from a guessed or stale id.
    pub fn delete_by_id_and_user(&self, id: i64, user_id: i64) -> Result<bool> {
        let db = self.db.lock().unwrap();
        let n = db.execute(
            "DELETE FROM reminders WHERE id = ?1 AND user_id = ?2",
            rusqlite::params![id, user_id],
        )?;
        Ok(n > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;

    fn store() -> ReminderStore {
        let conn = Connection::open_in_memory().unwrap();
        // Match standard SQLite's default (FK enforcement off on this
        // connection); some bundled builds compile with it on by default.
        conn.execute_batch("PRAGMA foreign_keys=OFF;").unwrap();
        init_db(&conn).unwrap();
        ReminderStore::new(conn)
    }

    #[test]
    fn upsert_is_idempotent() {
        let store = store();
        let a = store
            .upsert(7, 7, "2025_5", RemindBefore::OneHour)
            .unwrap();
        let b = store
            .upsert(7, 7, "2025_5", RemindBefore::OneHour)
            .unwrap();
        assert_eq!(a, b);

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].remind_before, RemindBefore::OneHour);
    }

    #[test]
    fn upsert_overwrites_offset() {
        let store = store();
        store.upsert(7, 7, "2025_5", RemindBefore::OneHour).unwrap();
        store.upsert(7, 7, "2025_5", RemindBefore::OneDay).unwrap();

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].remind_before, RemindBefore::OneDay);
    }

    #[test]
    fn distinct_users_keep_separate_rows_for_one_event() {
        let store = store();
        store.upsert(1, 1, "2025_5", RemindBefore::OneHour).unwrap();
        store.upsert(2, 2, "2025_5", RemindBefore::ThreeHours).unwrap();

        assert_eq!(store.for_event("2025_5").unwrap().len(), 2);
        assert_eq!(store.for_event("2025_6").unwrap().len(), 0);
        assert_eq!(store.for_user(1).unwrap().len(), 1);
    }

    #[test]
    fn delete_by_id_tolerates_missing_rows() {
        let store = store();
        let id = store.upsert(7, 7, "2025_5", RemindBefore::OneHour).unwrap();
        store.delete_by_id(id).unwrap();
        // Second delete of the same id must be a no-op, not an error.
        store.delete_by_id(id).unwrap();
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn scoped_delete_rejects_other_users_ids() {
        let store = store();
        let id = store.upsert(1, 1, "2025_5", RemindBefore::OneHour).unwrap();

        assert!(!store.delete_by_id_and_user(id, 999).unwrap());
        assert_eq!(store.list_all().unwrap().len(), 1);

        assert!(store.delete_by_id_and_user(id, 1).unwrap());
        assert!(store.list_all().unwrap().is_empty());
    }
}
