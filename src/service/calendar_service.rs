use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::clients::google_calendar_client;
use crate::error::Result;
use crate::models::calendar_event::CalendarEvent;

#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// Events on `date`, in start-time order.
    async fn events_for_date(&self, date: NaiveDate) -> Result<Vec<CalendarEvent>>;

    /// Zone used for the day window and for formatting event times.
    fn time_zone(&self) -> Tz;
}

pub fn format_events(events: &[CalendarEvent], tz: &Tz) -> Vec<String> {
    events.iter().map(|event| event.format_for_prompt(tz)).collect()
}

pub struct GoogleCalendarService {
    http: reqwest::Client,
    base_url: String,
    calendar_id: String,
    token_file: PathBuf,
    tz: Tz,
}

impl GoogleCalendarService {
    pub fn new(http: reqwest::Client, calendar_id: String, token_file: PathBuf, tz: Tz) -> Self {
        Self {
            http,
            base_url: google_calendar_client::CALENDAR_BASE_URL.to_string(),
            calendar_id,
            token_file,
            tz,
        }
    }
}

#[async_trait]
impl CalendarSource for GoogleCalendarService {
    async fn events_for_date(&self, date: NaiveDate) -> Result<Vec<CalendarEvent>> {
        // Re-read every call so a token refreshed by another tool is picked up.
        let token = google_calendar_client::read_access_token(&self.token_file)?;
        google_calendar_client::list_events(
            &self.http,
            &self.base_url,
            &self.calendar_id,
            &token,
            date,
            &self.tz,
        )
        .await
    }

    fn time_zone(&self) -> Tz {
        self.tz
    }
}
