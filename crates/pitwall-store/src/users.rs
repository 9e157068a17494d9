use std::sync::Mutex;

use rusqlite::Connection;
use tracing::debug;

use crate::error::Result;
use crate::types::UserPrefs;

/// Per-chat user preferences (timezone, language).
pub struct UserStore {
    db: Mutex<Connection>,
}

impl UserStore {
    /// Wrap an already-open (and `init_db`-initialised) connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Mutex::new(conn),
        }
    }

    /// Register a user on first contact. Existing rows are left untouched so
    /// repeated `/start` never resets preferences.
    pub fn ensure(&self, user_id: i64, chat_id: i64) -> Result<()> {
        let db = self.db.lock().unwrap();
        let now = chrono::Utc::now().to_rfc3339();
        let n = db.execute(
            "INSERT OR IGNORE INTO users (id, chat_id, created_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![user_id, chat_id, now],
        )?;
        if n > 0 {
            debug!(user_id, chat_id, "user registered");
        }
        Ok(())
    }

    /// Set the chat's timezone, creating the user row if needed.
    /// `timezone` must already be validated as an IANA name by the caller.
    pub fn set_timezone(&self, user_id: i64, chat_id: i64, timezone: &str) -> Result<()> {
        let db = self.db.lock().unwrap();
        let now = chrono::Utc::now().to_rfc3339();
        db.execute(
            "INSERT INTO users (id, chat_id, timezone, created_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(chat_id) DO UPDATE SET timezone = excluded.timezone",
            rusqlite::params![user_id, chat_id, timezone, now],
        )?;
        Ok(())
    }

    /// Set the chat's language code, creating the user row if needed.
    pub fn set_language(&self, user_id: i64, chat_id: i64, language: &str) -> Result<()> {
        let db = self.db.lock().unwrap();
        let now = chrono::Utc::now().to_rfc3339();
        db.execute(
            "INSERT INTO users (id, chat_id, language, created_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(chat_id) DO UPDATE SET language = excluded.language",
            rusqlite::params![user_id, chat_id, language, now],
        )?;
        Ok(())
    }

    /// Preferences for a chat, or `None` for a chat that never talked to us.
    pub fn prefs_for_chat(&self, chat_id: i64) -> Result<Option<UserPrefs>> {
        let db = self.db.lock().unwrap();
        match db.query_row(
            "SELECT id, chat_id, timezone, language FROM users WHERE chat_id = ?1",
            [chat_id],
            |row| {
                Ok(UserPrefs {
                    user_id: row.get(0)?,
                    chat_id: row.get(1)?,
                    timezone: row.get(2)?,
                    language: row.get(3)?,
                })
            },
        ) {
            Ok(prefs) => Ok(Some(prefs)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;

    fn store() -> UserStore {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        UserStore::new(conn)
    }

    #[test]
    fn ensure_defaults_to_utc_english() {
        let store = store();
        store.ensure(42, 42).unwrap();

        let prefs = store.prefs_for_chat(42).unwrap().unwrap();
        assert_eq!(prefs.timezone, "UTC");
        assert_eq!(prefs.language, "en");
    }

    #[test]
    fn ensure_never_resets_existing_prefs() {
        let store = store();
        store.set_timezone(42, 42, "Europe/London").unwrap();
        store.ensure(42, 42).unwrap();

        let prefs = store.prefs_for_chat(42).unwrap().unwrap();
        assert_eq!(prefs.timezone, "Europe/London");
    }

    #[test]
    fn set_timezone_upserts_unknown_chats() {
        let store = store();
        store.set_timezone(7, 7, "Asia/Tokyo").unwrap();
        let prefs = store.prefs_for_chat(7).unwrap().unwrap();
        assert_eq!(prefs.timezone, "Asia/Tokyo");
        assert_eq!(prefs.language, "en");
    }

    #[test]
    fn set_language_keeps_timezone() {
        let store = store();
        store.set_timezone(7, 7, "Asia/Tokyo").unwrap();
        store.set_language(7, 7, "uk").unwrap();

        let prefs = store.prefs_for_chat(7).unwrap().unwrap();
        assert_eq!(prefs.timezone, "Asia/Tokyo");
        assert_eq!(prefs.language, "uk");
    }

    #[test]
    fn unknown_chat_has_no_prefs() {
        assert!(store().prefs_for_chat(1).unwrap().is_none());
    }
}
