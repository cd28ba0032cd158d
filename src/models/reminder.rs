use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::time_block::TimeBlock;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub id: String,
    pub message: String,
    pub due_at: DateTime<Utc>,
}

impl Reminder {
    pub fn new(message: impl Into<String>, due_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            message: message.into(),
            due_at,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_at <= now
    }
}

// Resolves a wall-clock reading on `date` in `tz`. Ambiguous readings take the
// earlier instant; readings that fall into a DST gap resolve to nothing.
fn local_instant(date: NaiveDate, time: NaiveTime, tz: &Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn reminder_for_block(
    date: NaiveDate,
    block: &TimeBlock,
    tz: &Tz,
    lead: Duration,
) -> Option<Reminder> {
    let start = block.start.to_naive_time()?;
    let due_at = local_instant(date, start, tz)? - lead;
    Some(Reminder::new(
        format!("{} {}", block.start, block.label),
        due_at,
    ))
}

/// One reminder per block start that is still ahead of `now`.
pub fn reminders_for_schedule(
    date: NaiveDate,
    schedule: &[TimeBlock],
    tz: &Tz,
    lead: Duration,
    now: DateTime<Utc>,
) -> Vec<Reminder> {
    schedule
        .iter()
        .filter_map(|block| reminder_for_block(date, block, tz, lead))
        .filter(|reminder| !reminder.is_due(now))
        .collect()
}

/// Parses a typed-in `HH:MM message` line into a reminder on `date`.
pub fn parse_reminder_line(line: &str, date: NaiveDate, tz: &Tz) -> Option<Reminder> {
    let (time, message) = line.trim().split_once(char::is_whitespace)?;
    let message = message.trim();
    if message.is_empty() {
        return None;
    }
    let time = NaiveTime::parse_from_str(time, "%H:%M").ok()?;
    Some(Reminder::new(message, local_instant(date, time, tz)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::time_block::TimeOfDay;

    #[test]
    fn block_reminder_fires_lead_minutes_early() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let tz: Tz = "Asia/Tokyo".parse().unwrap();
        let block = TimeBlock::new(TimeOfDay::new(9, 0), TimeOfDay::new(10, 0), "ゼミ");

        let reminder = reminder_for_block(date, &block, &tz, Duration::minutes(10)).unwrap();
        assert_eq!(reminder.due_at, Utc.with_ymd_and_hms(2026, 10, 17, 23, 50, 0).unwrap());
        assert_eq!(reminder.message, "09:00 ゼミ");
    }

    #[test]
    fn block_reminder_skips_out_of_range_start() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let block = TimeBlock::new(TimeOfDay::new(25, 0), TimeOfDay::new(26, 0), "謎");
        assert!(reminder_for_block(date, &block, &Tz::UTC, Duration::zero()).is_none());
    }

    #[test]
    fn schedule_reminders_skip_past_blocks() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let schedule = vec![
            TimeBlock::new(TimeOfDay::new(7, 0), TimeOfDay::new(8, 0), "朝食"),
            TimeBlock::new(TimeOfDay::new(12, 0), TimeOfDay::new(13, 0), "昼食"),
            TimeBlock::new(TimeOfDay::new(18, 0), TimeOfDay::new(19, 0), "夕食"),
        ];
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();

        let reminders = reminders_for_schedule(date, &schedule, &Tz::UTC, Duration::zero(), now);
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].message, "18:00 夕食");
    }

    #[test]
    fn parses_typed_reminder_line() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let reminder = parse_reminder_line("  14:30 take a break ", date, &Tz::UTC).unwrap();
        assert_eq!(reminder.message, "take a break");
        assert_eq!(reminder.due_at, Utc.with_ymd_and_hms(2026, 10, 18, 14, 30, 0).unwrap());

        assert!(parse_reminder_line("14:30", date, &Tz::UTC).is_none());
        assert!(parse_reminder_line("later take a break", date, &Tz::UTC).is_none());
    }
}
