use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::error::{PlannerError, Result};
use crate::models::calendar_event::{CalendarEvent, EventsResponse};

pub const CALENDAR_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";

/// The parts of an authorized-user token file we read. `token` is what the
/// Google auth libraries write; `access_token` is the raw OAuth field.
#[derive(Debug, Deserialize)]
struct TokenFile {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
}

pub fn read_access_token(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path).map_err(|e| {
        PlannerError::Configuration(format!("Cannot read token file {}: {}", path.display(), e))
    })?;
    let parsed: TokenFile = serde_json::from_str(&content)?;
    parsed
        .token
        .or(parsed.access_token)
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| {
            PlannerError::Configuration(format!("No access token in {}", path.display()))
        })
}

/// First and last instant of `date` in `tz`.
pub fn day_bounds(date: NaiveDate, tz: &Tz) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let at = |time: NaiveTime| {
        tz.from_local_datetime(&date.and_time(time))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| PlannerError::InvalidDate(format!("{} has no {} in {}", date, time, tz)))
    };
    let last = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
        .ok_or_else(|| PlannerError::InvalidDate(date.to_string()))?;
    Ok((at(NaiveTime::MIN)?, at(last)?))
}

pub async fn list_events(
    http: &reqwest::Client,
    base_url: &str,
    calendar_id: &str,
    access_token: &str,
    date: NaiveDate,
    tz: &Tz,
) -> Result<Vec<CalendarEvent>> {
    let (time_min, time_max) = day_bounds(date, tz)?;
    let url = format!("{}/calendars/{}/events", base_url.trim_end_matches('/'), calendar_id);
    info!("Fetching events for {}", date.format("%Y年%m月%d日"));
    debug!("Calendar window {} .. {}", time_min, time_max);

    let response = http
        .get(&url)
        .bearer_auth(access_token)
        .query(&[
            ("timeMin", time_min.to_rfc3339()),
            ("timeMax", time_max.to_rfc3339()),
            ("singleEvents", "true".to_string()),
            ("orderBy", "startTime".to_string()),
        ])
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        error!("Calendar request failed: {} - {}", status, text);
        return Err(PlannerError::Calendar(format!(
            "Request failed with status {}: {}",
            status, text
        )));
    }

    let parsed: EventsResponse = serde_json::from_str(&text)
        .map_err(|e| PlannerError::Calendar(format!("Failed to parse events: {}", e)))?;
    info!("Fetched {} events", parsed.items.len());
    Ok(parsed.items)
}
