//! Core types for meetcal.
//!
//! This crate turns already-split input rows into calendar output:
//! - `event` parses a row into an `Event`
//! - `recency` drops events that started too long ago
//! - `store` collects events and hands them to the renderers in start order
//! - `render` serializes to iCalendar text or to JSON summary records
//! - `tz` computes the civil UTC offset without a timezone database

pub mod config;
pub mod error;
pub mod event;
pub mod recency;
pub mod render;
pub mod store;
pub mod tz;

pub use config::{Escaping, LinkStrategy, MeetcalConfig};
pub use error::{MeetcalError, MeetcalResult};
pub use event::Event;
pub use recency::RecencyFilter;
pub use render::{OutputFormat, SummaryRecord};
pub use store::EventStore;
