use std::fs;

use chrono::NaiveDate;
use dayPlanner::models::time_block::TimeBlock;
use dayPlanner::service::schedule_store::ScheduleStore;

fn block(start: &str, end: &str, label: &str) -> TimeBlock {
    TimeBlock::new(start.parse().unwrap(), end.parse().unwrap(), label)
}

#[test]
fn saved_day_round_trips_and_replaces_previous_day() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calendar_data.json");
    let first = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
    let second = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

    let mut store = ScheduleStore::open(&path);
    store
        .save_day(first, "**07:00-08:00 朝食**", &vec![block("07:00", "08:00", "朝食")])
        .unwrap();

    let text = "**23:00-07:00 睡眠**\n**09:00-10:30 Meeting**";
    let schedule = vec![block("23:00", "07:00", "睡眠"), block("09:00", "10:30", "Meeting")];
    store.save_day(second, text, &schedule).unwrap();

    let reloaded = ScheduleStore::open(&path);
    let day = reloaded.day(second).unwrap();
    assert_eq!(day.schedule_text, text);
    assert_eq!(day.schedule, schedule);
    assert!(reloaded.day(first).is_none());
    assert_eq!(reloaded.state().len(), 1);
    assert_eq!(reloaded.latest().map(|(date, _)| date), Some(second));
}

#[test]
fn file_layout_is_date_keyed_triples() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calendar_data.json");
    let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

    let mut store = ScheduleStore::open(&path);
    store
        .save_day(date, "text", &vec![block("09:00", "10:30", "会議")])
        .unwrap();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        raw,
        serde_json::json!({
            "2026-10-18": {
                "schedule_text": "text",
                "schedule": [["09:00", "10:30", "会議"]]
            }
        })
    );
    assert!(fs::read_to_string(&path).unwrap().contains("会議"));
}

#[test]
fn malformed_file_loads_as_empty_and_is_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calendar_data.json");
    fs::write(&path, "{ \"2026-10-18\": { \"schedule_text\": ").unwrap();

    let store = ScheduleStore::open(&path);
    assert!(store.state().is_empty());
    assert!(store.latest().is_none());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "{ \"2026-10-18\": { \"schedule_text\": "
    );
}

#[test]
fn missing_file_loads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = ScheduleStore::open(dir.path().join("absent.json"));
    assert!(store.state().is_empty());
}
