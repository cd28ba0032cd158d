use chrono::{DateTime, FixedOffset, NaiveDate};
use chrono_tz::Tz;
use serde::Deserialize;

pub const ALL_DAY_PREFIX: &str = "終日";
pub const UNTITLED: &str = "(無題)";

/// Google Calendar v3 `events.list` response.
#[derive(Debug, Deserialize)]
pub struct EventsResponse {
    #[serde(default)]
    pub items: Vec<CalendarEvent>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CalendarEvent {
    #[serde(default)]
    pub summary: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
}

/// Either a precise timestamp or an all-day date marker.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum EventTime {
    Timed {
        #[serde(rename = "dateTime")]
        date_time: DateTime<FixedOffset>,
    },
    AllDay {
        date: NaiveDate,
    },
}

impl CalendarEvent {
    pub fn title(&self) -> &str {
        match self.summary.as_deref() {
            Some(summary) if !summary.trim().is_empty() => summary,
            _ => UNTITLED,
        }
    }

    /// The line handed to the model: `HH:MM～HH:MM: title` or `終日: title`.
    pub fn format_for_prompt(&self, tz: &Tz) -> String {
        match (&self.start, &self.end) {
            (EventTime::Timed { date_time: start }, EventTime::Timed { date_time: end }) => {
                format!(
                    "{}～{}: {}",
                    start.with_timezone(tz).format("%H:%M"),
                    end.with_timezone(tz).format("%H:%M"),
                    self.title()
                )
            }
            (EventTime::Timed { date_time: start }, EventTime::AllDay { .. }) => {
                format!("{}～: {}", start.with_timezone(tz).format("%H:%M"), self.title())
            }
            (EventTime::AllDay { .. }, _) => format!("{}: {}", ALL_DAY_PREFIX, self.title()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_google_payload() {
        let payload = r#"{
            "kind": "calendar#events",
            "items": [
                {"summary": "ゼミ", "start": {"dateTime": "2026-10-18T10:00:00+09:00"}, "end": {"dateTime": "2026-10-18T11:30:00+09:00"}},
                {"summary": "誕生日", "start": {"date": "2026-10-18"}, "end": {"date": "2026-10-19"}},
                {"start": {"dateTime": "2026-10-18T01:00:00Z"}, "end": {"dateTime": "2026-10-18T02:00:00Z"}}
            ]
        }"#;
        let parsed: EventsResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.items.len(), 3);

        let tokyo: Tz = "Asia/Tokyo".parse().unwrap();
        assert_eq!(parsed.items[0].format_for_prompt(&tokyo), "10:00～11:30: ゼミ");
        assert_eq!(parsed.items[1].format_for_prompt(&tokyo), "終日: 誕生日");
        assert_eq!(parsed.items[2].format_for_prompt(&tokyo), "10:00～11:00: (無題)");
    }

    #[test]
    fn missing_items_means_no_events() {
        let parsed: EventsResponse = serde_json::from_str(r#"{"kind": "calendar#events"}"#).unwrap();
        assert!(parsed.items.is_empty());
    }
}
