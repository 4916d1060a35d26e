//! iCalendar text generation.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::config::{Escaping, MeetcalConfig};
use crate::event::Event;

const CRLF: &str = "\r\n";
const UID_DATE_FORMAT: &str = "%Y%m%d";

/// Render events as a VCALENDAR document.
///
/// Events are written in the order given. Every line, including the final
/// `END:VCALENDAR`, ends with CRLF. Start times are floating local times
/// (`DTSTART;VALUE=DATE-TIME:YYYYMMDDTHHMMSS`).
///
/// URL, DURATION and UID lines follow LOCATION only when the config sets
/// `url`, `duration_minutes` or `uid_prefix`.
pub fn render_ical<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    config: &MeetcalConfig,
) -> String {
    let escaping = config.escaping;
    let duration = config.duration_minutes.map(format_duration);
    let mut uids = UidAllocator::default();

    let mut out = String::new();
    push_line(&mut out, "BEGIN:VCALENDAR");

    for event in events {
        push_line(&mut out, "BEGIN:VEVENT");
        push_line(&mut out, &format!("SUMMARY:{}", escape(&event.summary, escaping)));
        push_line(
            &mut out,
            &format!("DTSTART;VALUE=DATE-TIME:{}", event.start.format("%Y%m%dT%H%M%S")),
        );
        push_line(&mut out, &format!("LOCATION:{}", escape(&event.location, escaping)));
        if !event.description.is_empty() {
            push_line(
                &mut out,
                &format!("DESCRIPTION:{}", escape(&event.description, escaping)),
            );
        }
        if let Some(url) = &config.url {
            push_line(&mut out, &format!("URL:{url}"));
        }
        if let Some(duration) = &duration {
            push_line(&mut out, &format!("DURATION:{duration}"));
        }
        if let Some(prefix) = &config.uid_prefix {
            let uid = uids.next(prefix, event);
            push_line(&mut out, &format!("UID:{}", escape(&uid, escaping)));
        }
        push_line(&mut out, "END:VEVENT");
    }

    push_line(&mut out, "END:VCALENDAR");
    out
}

/// RFC 5545 dur-value such as `PT3H` or `PT1H30M`.
fn format_duration(minutes: u32) -> String {
    let (hours, minutes) = (minutes / 60, minutes % 60);
    match (hours, minutes) {
        (0, m) => format!("PT{m}M"),
        (h, 0) => format!("PT{h}H"),
        (h, m) => format!("PT{h}H{m}M"),
    }
}

/// Hands out `<prefix><YYYYMMDD>` UIDs, suffixing `-2`, `-3`, ... for
/// events on a day that already has one.
#[derive(Default)]
struct UidAllocator {
    seen: HashMap<String, usize>,
}

impl UidAllocator {
    fn next(&mut self, prefix: &str, event: &Event) -> String {
        let base = format!("{prefix}{}", event.start.format(UID_DATE_FORMAT));
        let count = self.seen.entry(base.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base
        } else {
            format!("{base}-{count}")
        }
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push_str(CRLF);
}

/// Escape a TEXT value (RFC 5545 section 3.3.11).
fn escape(value: &str, escaping: Escaping) -> Cow<'_, str> {
    match escaping {
        Escaping::PassThrough => Cow::Borrowed(value),
        Escaping::Rfc5545 => {
            if !value.contains(['\\', ';', ',', '\n', '\r']) {
                return Cow::Borrowed(value);
            }
            let mut escaped = String::with_capacity(value.len() + 8);
            let mut chars = value.chars().peekable();
            while let Some(c) = chars.next() {
                match c {
                    '\\' => escaped.push_str("\\\\"),
                    ';' => escaped.push_str("\\;"),
                    ',' => escaped.push_str("\\,"),
                    '\r' => {
                        // CRLF and lone CR both become a single \n
                        if chars.peek() == Some(&'\n') {
                            chars.next();
                        }
                        escaped.push_str("\\n");
                    }
                    '\n' => escaped.push_str("\\n"),
                    _ => escaped.push(c),
                }
            }
            Cow::Owned(escaped)
        }
    }
}
