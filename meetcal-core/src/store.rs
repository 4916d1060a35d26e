//! Event store: collects events for a single run and renders them.

use crate::config::MeetcalConfig;
use crate::error::{MeetcalError, MeetcalResult};
use crate::event::Event;
use crate::render::{self, OutputFormat, SummaryRecord};

/// Events accepted during one run, kept in insertion order.
///
/// Rendering always presents them sorted by start; events with equal starts
/// keep their insertion order. Duplicates are kept.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the event if there is one. Returns whether it was added.
    pub fn add(&mut self, event: Option<Event>) -> bool {
        match event {
            Some(event) => {
                tracing::debug!(start = %event.start, location = %event.location, "Adding event");
                self.events.push(event);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events ascending by start, ties in insertion order.
    pub fn sorted(&self) -> Vec<&Event> {
        let mut sorted: Vec<&Event> = self.events.iter().collect();
        sorted.sort_by_key(|event| event.start);
        sorted
    }

    /// iCalendar text for all events.
    pub fn render_ical(&self, config: &MeetcalConfig) -> String {
        render::render_ical(self.sorted(), config)
    }

    /// JSON summary records for the latest `summary_limit` events.
    pub fn render_summary(&self, config: &MeetcalConfig) -> Vec<SummaryRecord> {
        render::render_summary(&self.sorted(), config.summary_limit, &config.links)
    }

    /// Finished output in the requested format.
    pub fn render(&self, format: OutputFormat, config: &MeetcalConfig) -> MeetcalResult<String> {
        match format {
            OutputFormat::Ics => Ok(self.render_ical(config)),
            OutputFormat::Json => {
                let records = self.render_summary(config);
                serde_json::to_string(&records).map_err(|e| MeetcalError::Serialization(e.to_string()))
            }
        }
    }
}
