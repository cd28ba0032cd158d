use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::time_block::Schedule;

pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// What gets saved for a planned day: the raw model reply and what parsed out of it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PersistedDay {
    pub schedule_text: String,
    pub schedule: Schedule,
}

/// On-disk layout, keyed by ISO date. Holds at most one day after a save.
pub type PersistedState = BTreeMap<String, PersistedDay>;

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    if key.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).ok()
}
