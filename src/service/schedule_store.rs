use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::persisted_day::{date_key, parse_date_key, PersistedDay, PersistedState};
use crate::models::time_block::Schedule;

/// The single JSON file holding the most recently planned day.
#[derive(Debug)]
pub struct ScheduleStore {
    path: PathBuf,
    state: PersistedState,
}

impl ScheduleStore {
    /// Loads the file at `path`. A missing or unreadable file starts an empty
    /// store and is left as it is on disk.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = load_state(&path);
        Self { path, state }
    }

    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    /// Replaces everything with this one day and writes it out.
    pub fn save_day(&mut self, date: NaiveDate, schedule_text: &str, schedule: &Schedule) -> Result<()> {
        let state = PersistedState::from([(
            date_key(date),
            PersistedDay {
                schedule_text: schedule_text.to_string(),
                schedule: schedule.clone(),
            },
        )]);
        write_state(&self.path, &state)?;
        self.state = state;
        info!("Saved schedule for {} to {}", date, self.path.display());
        Ok(())
    }

    pub fn flush(&self) -> Result<()> {
        write_state(&self.path, &self.state)
    }

    pub fn day(&self, date: NaiveDate) -> Option<&PersistedDay> {
        self.state.get(&date_key(date))
    }

    /// The latest entry whose key is an ISO date; other keys are ignored.
    pub fn latest(&self) -> Option<(NaiveDate, &PersistedDay)> {
        self.state
            .iter()
            .filter_map(|(key, day)| parse_date_key(key).map(|date| (date, day)))
            .max_by_key(|(date, _)| *date)
    }
}

fn write_state(path: &Path, state: &PersistedState) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let body = serde_json::to_string_pretty(state)?;
    fs::write(path, body)?;
    Ok(())
}

fn load_state(path: &Path) -> PersistedState {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            debug!("No saved schedule at {} ({}), starting empty", path.display(), err);
            return PersistedState::new();
        }
    };
    match serde_json::from_str(&content) {
        Ok(state) => {
            debug!("Loaded saved schedule from {}", path.display());
            state
        }
        Err(err) => {
            warn!("Saved schedule at {} is not valid JSON ({}), starting empty", path.display(), err);
            PersistedState::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_ignores_non_date_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calendar_data.json");
        fs::write(
            &path,
            r#"{
                "settings": {"schedule_text": "", "schedule": []},
                "2026-10-01": {"schedule_text": "a", "schedule": []},
                "2026-10-03": {"schedule_text": "b", "schedule": [["07:00", "08:00", "朝食"]]}
            }"#,
        )
        .unwrap();

        let store = ScheduleStore::open(&path);
        let (date, day) = store.latest().unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 10, 3).unwrap());
        assert_eq!(day.schedule_text, "b");
        assert_eq!(day.schedule.len(), 1);
    }

    #[test]
    fn save_creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("calendar_data.json");
        let mut store = ScheduleStore::open(&path);
        assert!(store.state().is_empty());

        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        store.save_day(date, "", &Vec::new()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn failed_write_keeps_previous_day_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calendar_data.json");
        let mut store = ScheduleStore::open(&path);
        let first = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        store.save_day(first, "a", &Vec::new()).unwrap();

        // A directory where the file should be makes the write fail.
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();
        let second = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert!(store.save_day(second, "b", &Vec::new()).is_err());

        assert_eq!(store.latest().map(|(date, _)| date), Some(first));
        assert!(store.day(second).is_none());
    }
}
