use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use chrono_tz::Tz;

use crate::clients::gemini_client::DEFAULT_MODEL;
use crate::error::{PlannerError, Result};

pub const DEFAULT_TOKEN_FILE: &str = "token.json";
pub const DEFAULT_CALENDAR_ID: &str = "primary";
pub const DEFAULT_TIMEZONE: &str = "UTC";
pub const DEFAULT_DATA_FILE: &str = "calendar_data.json";
pub const DEFAULT_CHART_FILE: &str = "schedule.svg";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REMINDER_POLL_SECS: u64 = 60;
const DEFAULT_REMINDER_LEAD_MINUTES: i64 = 0;

/// `KEY=VALUE` lines from the file named by `CONFIG_FILE`.
#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let entries = dotenvy::from_path_iter(path)
            .map_err(|err| PlannerError::Configuration(format!("Cannot read {}: {}", path, err)))?;
        Self::collect(entries)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Self::collect(dotenvy::from_read_iter(content.as_bytes()))
    }

    fn collect(entries: impl Iterator<Item = dotenvy::Result<(String, String)>>) -> Result<Self> {
        let values = entries
            .collect::<dotenvy::Result<HashMap<_, _>>>()
            .map_err(|err| PlannerError::Configuration(format!("Invalid config file: {}", err)))?;
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    /// File value first, then the process environment.
    pub fn get_prop(&self, key: &str) -> Option<String> {
        self.get(key).or_else(|| env::var(key).ok())
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub google_api_key: Option<String>,
    pub gemini_model: String,
    pub token_file: PathBuf,
    pub calendar_id: String,
    pub timezone: Tz,
    pub data_file: PathBuf,
    pub chart_file: PathBuf,
    pub request_timeout: Duration,
    pub reminder_poll_interval: Duration,
    pub reminder_lead: chrono::Duration,
}

impl Settings {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let number = |key: &str, default: u64| -> Result<u64> {
            match get(key) {
                Some(raw) => raw.trim().parse().map_err(|_| {
                    PlannerError::Configuration(format!("{} must be a whole number, got {:?}", key, raw))
                }),
                None => Ok(default),
            }
        };

        let timezone_name = get("PLANNER_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone: Tz = timezone_name.parse().map_err(|_| {
            PlannerError::Configuration(format!("Unknown time zone {:?}", timezone_name))
        })?;

        let lead_minutes = match get("REMINDER_LEAD_MINUTES") {
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
                PlannerError::Configuration(format!("REMINDER_LEAD_MINUTES must be a number, got {:?}", raw))
            })?,
            None => DEFAULT_REMINDER_LEAD_MINUTES,
        };

        Ok(Self {
            google_api_key: get("GOOGLE_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            token_file: PathBuf::from(get("GOOGLE_TOKEN_FILE").unwrap_or_else(|| DEFAULT_TOKEN_FILE.to_string())),
            calendar_id: get("CALENDAR_ID").unwrap_or_else(|| DEFAULT_CALENDAR_ID.to_string()),
            timezone,
            data_file: PathBuf::from(get("DATA_FILE").unwrap_or_else(|| DEFAULT_DATA_FILE.to_string())),
            chart_file: PathBuf::from(get("CHART_FILE").unwrap_or_else(|| DEFAULT_CHART_FILE.to_string())),
            request_timeout: Duration::from_secs(number("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?),
            reminder_poll_interval: Duration::from_secs(
                number("REMINDER_POLL_SECS", DEFAULT_REMINDER_POLL_SECS)?.max(1),
            ),
            reminder_lead: chrono::Duration::minutes(lead_minutes),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::from_lookup(|key| config.get_prop(key))
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.google_api_key
            .as_deref()
            .ok_or_else(|| PlannerError::Configuration("GOOGLE_API_KEY is not set. Check your .env file.".to_string()))
    }
}
