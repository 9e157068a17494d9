//! `pitwall-data` — client for the Ergast-compatible motorsport data API.
//!
//! # Overview
//!
//! [`ErgastClient`] speaks the Ergast JSON dialect (jolpi.ca / ergast.com).
//! [`FallbackFeed`] composes two clients behind the same [`RaceFeed`] trait so
//! callers never know which endpoint served a request. [`FeedMetrics`] is an
//! explicitly constructed counter set shared by reference; there is no
//! process-wide statistics singleton.
//!
//! The API serialises numbers as strings (`"position": "1"`); the types here
//! keep them as strings and let presentation code decide how to parse.

pub mod client;
pub mod error;
pub mod fallback;
pub mod feed;
pub mod metrics;
pub mod types;

pub use client::ErgastClient;
pub use error::{FeedError, Result};
pub use fallback::FallbackFeed;
pub use feed::RaceFeed;
pub use metrics::{FeedMetrics, FeedStats};
pub use types::{next_race, ConstructorStanding, Driver, DriverStanding, Race};
