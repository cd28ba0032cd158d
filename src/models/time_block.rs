use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A clock reading taken from a two-digit `HH:MM` token.
///
/// The token shape is enforced, the numeric range is not: `25:70` is carried
/// through as-is and simply lands off the 0–24 axis when laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// `hour + minute / 60`, the unit used on the timeline axis.
    pub fn fractional_hour(&self) -> f64 {
        f64::from(self.hour) + f64::from(self.minute) / 60.0
    }

    /// The matching `chrono` time, or `None` for out-of-range readings.
    pub fn to_naive_time(&self) -> Option<chrono::NaiveTime> {
        chrono::NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTimeToken(pub String);

impl fmt::Display for InvalidTimeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected HH:MM, got {:?}", self.0)
    }
}

impl std::error::Error for InvalidTimeToken {}

impl FromStr for TimeOfDay {
    type Err = InvalidTimeToken;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidTimeToken(token.to_string());
        let bytes = token.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(invalid());
        }
        let digit_pair = |hi: u8, lo: u8| -> Option<u8> {
            if hi.is_ascii_digit() && lo.is_ascii_digit() {
                Some((hi - b'0') * 10 + (lo - b'0'))
            } else {
                None
            }
        };
        let hour = digit_pair(bytes[0], bytes[1]).ok_or_else(invalid)?;
        let minute = digit_pair(bytes[3], bytes[4]).ok_or_else(invalid)?;
        Ok(Self { hour, minute })
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One schedule entry. `end < start` means the block runs past midnight.
///
/// Stored on disk as `[start, end, label]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(TimeOfDay, TimeOfDay, String)", into = "(TimeOfDay, TimeOfDay, String)")]
pub struct TimeBlock {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub label: String,
}

impl TimeBlock {
    pub fn new(start: TimeOfDay, end: TimeOfDay, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    pub fn crosses_midnight(&self) -> bool {
        self.end.fractional_hour() < self.start.fractional_hour()
    }
}

impl From<(TimeOfDay, TimeOfDay, String)> for TimeBlock {
    fn from((start, end, label): (TimeOfDay, TimeOfDay, String)) -> Self {
        Self { start, end, label }
    }
}

impl From<TimeBlock> for (TimeOfDay, TimeOfDay, String) {
    fn from(block: TimeBlock) -> Self {
        (block.start, block.end, block.label)
    }
}

impl fmt::Display for TimeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} {}", self.start, self.end, self.label)
    }
}

/// Blocks in the order they appeared in the model text.
pub type Schedule = Vec<TimeBlock>;
