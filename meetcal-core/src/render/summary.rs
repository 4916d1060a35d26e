//! JSON summary of the most recent events.

use chrono::SecondsFormat;
use serde::Serialize;

use crate::config::LinkStrategy;
use crate::event::Event;
use crate::tz;

/// One entry of the JSON summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRecord {
    pub label: String,
    pub url: String,
    /// Start as `YYYY-MM-DDTHH:MM:SS+HH:MM` in civil time
    pub date: String,
}

/// Build summary records for the `limit` latest events.
///
/// Events are ranked newest first with a stable sort, so among events with
/// the same start the earlier-inserted ones win a place. The selected events
/// are returned oldest first.
pub fn render_summary(
    events: &[&Event],
    limit: usize,
    links: &LinkStrategy,
) -> Vec<SummaryRecord> {
    let mut selected: Vec<&Event> = events.to_vec();
    selected.sort_by(|a, b| b.start.cmp(&a.start));
    if selected.len() > limit {
        tracing::debug!(total = selected.len(), limit, "Summary keeps only the latest events");
        selected.truncate(limit);
    }
    // Stable again, so ties stay in insertion order
    selected.sort_by_key(|event| event.start);

    selected
        .into_iter()
        .map(|event| SummaryRecord {
            label: event.location.clone(),
            url: links.url_for(&event.location),
            date: tz::localize(event.start).to_rfc3339_opts(SecondsFormat::Secs, false),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_event(location: &str, ts: &str) -> Event {
        Event::from_row(location, "Treffen", ts).unwrap()
    }

    #[test]
    fn test_record_fields() {
        let event = make_event("LeineLab Hannover", "2024-06-01-19-30");
        let records = render_summary(&[&event], 8, &LinkStrategy::default());

        assert_eq!(
            records,
            vec![SummaryRecord {
                label: "LeineLab Hannover".to_string(),
                url: "https://hannover.freifunk.net/wiki/Freifunk/Treffen#LeineLab_Hannover"
                    .to_string(),
                date: "2024-06-01T19:30:00+02:00".to_string(),
            }]
        );
    }

    #[test]
    fn test_winter_date_has_standard_offset() {
        let event = make_event("A", "2024-12-03-19-00");
        let records = render_summary(&[&event], 8, &LinkStrategy::default());
        assert_eq!(records[0].date, "2024-12-03T19:00:00+01:00");
    }

    #[test]
    fn test_limit_keeps_latest_in_ascending_order() {
        let events = [
            make_event("a", "2024-01-01-19-00"),
            make_event("b", "2024-02-01-19-00"),
            make_event("c", "2024-03-01-19-00"),
        ];
        let refs: Vec<&Event> = events.iter().collect();

        let records = render_summary(&refs, 2, &LinkStrategy::default());
        let labels: Vec<&str> = records.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "c"]);
    }

    #[test]
    fn test_zero_limit_is_empty() {
        let event = make_event("a", "2024-01-01-19-00");
        assert!(render_summary(&[&event], 0, &LinkStrategy::default()).is_empty());
    }

    #[test]
    fn test_json_shape() {
        let event = make_event("Linden", "2024-03-31-12-00");
        let records = render_summary(&[&event], 8, &LinkStrategy::default());

        let json = serde_json::to_value(&records).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "label": "Linden",
                "url": "https://hannover.freifunk.net/wiki/Freifunk/Treffen#Linden",
                "date": "2024-03-31T12:00:00+02:00",
            }])
        );
    }

    #[test]
    fn test_ties_at_limit_keep_earliest_inserted() {
        let events: Vec<Event> = (0..9)
            .map(|i| make_event(&format!("loc{i}"), "2024-06-01-19-00"))
            .collect();
        let refs: Vec<&Event> = events.iter().collect();

        let records = render_summary(&refs, 8, &LinkStrategy::default());
        let labels: Vec<&str> = records.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["loc0", "loc1", "loc2", "loc3", "loc4", "loc5", "loc6", "loc7"]
        );
    }

    #[test]
    fn test_tie_at_boundary_with_older_events() {
        let events = [
            make_event("old", "2024-01-01-19-00"),
            make_event("first", "2024-02-01-19-00"),
            make_event("second", "2024-02-01-19-00"),
            make_event("newest", "2024-03-01-19-00"),
        ];
        let refs: Vec<&Event> = events.iter().collect();

        let records = render_summary(&refs, 2, &LinkStrategy::default());
        let labels: Vec<&str> = records.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["first", "newest"]);
    }
}
