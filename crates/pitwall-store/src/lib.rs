//! `pitwall-store` — SQLite persistence for users, reminders and feed caches.
//!
//! Three managers share one schema ([`db::init_db`]), each wrapping its own
//! `Mutex<Connection>` so subsystems never contend on a lock:
//!
//! | Manager          | Tables                                    |
//! |------------------|-------------------------------------------|
//! | [`ReminderStore`]| `reminders`                               |
//! | [`UserStore`]    | `users`                                   |
//! | [`CacheStore`]   | `races`, `driver_standings`, `constructor_standings` |
//!
//! All mutations are atomic single-row operations except the cache refresh,
//! which replaces whole tables inside one transaction.

pub mod cache;
pub mod db;
pub mod error;
pub mod reminders;
pub mod types;
pub mod users;

pub use cache::CacheStore;
pub use error::{Result, StoreError};
pub use reminders::ReminderStore;
pub use types::{CachedConstructorStanding, CachedDriverStanding, CachedRace, Reminder, UserPrefs};
pub use users::UserStore;
