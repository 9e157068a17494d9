//! `pitwall-scheduler` — due-reminder scanning and notification delivery.
//!
//! # Overview
//!
//! [`engine::ReminderEngine`] polls on a fixed tick (default 60 s), matches
//! every pending reminder against the feed's current schedule and delivers
//! due notifications through the [`Notifier`] trait, deleting each reminder
//! after its first successful delivery.
//!
//! # Per-reminder lifecycle
//!
//! | State     | Representation                                  |
//! |-----------|-------------------------------------------------|
//! | Pending   | Row in `reminders`                              |
//! | Due       | `now >= start - remind_before` (computed, not stored) |
//! | Delivered | Row deleted                                     |
//! | Stale     | Event already started: row deleted, no message  |
//!
//! A failed delivery keeps the row, so an overdue reminder retries every
//! tick until the send succeeds or the event starts. Restarting mid-window
//! can therefore double-deliver; the design accepts at-least-once delivery.
//!
//! [`refresh::RefreshJob`] is the coarser companion loop that re-warms the
//! race/standings cache tables every few hours.

pub mod engine;
pub mod error;
pub mod notify;
pub mod refresh;

pub use engine::ReminderEngine;
pub use error::{Result, SchedulerError};
pub use notify::{DeliveryError, Notifier};
pub use refresh::RefreshJob;
