use std::sync::LazyLock;

use regex::Regex;

use crate::models::time_block::{Schedule, TimeBlock, TimeOfDay};

const EMPHASIS: &str = "**";

// `**HH:MM-HH:MM label**`. The label runs to the last `**` on the line.
static EMPHASIZED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\*\*([0-9]{2}:[0-9]{2})-([0-9]{2}:[0-9]{2})\s*(.+)\*\*").expect("valid pattern")
});

// `HH:MM-HH:MM label`
static PLAIN_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{2}:[0-9]{2})-([0-9]{2}:[0-9]{2})\s*(.+)").expect("valid pattern")
});

/// Extracts time blocks from model output, one candidate per line.
///
/// Lines matching neither form are skipped; preambles and commentary are
/// expected in the input and are not an error.
pub fn parse(text: &str) -> Schedule {
    text.split('\n').filter_map(parse_line).collect()
}

/// Emphasised form first, plain form second.
pub fn parse_line(line: &str) -> Option<TimeBlock> {
    let line = line.trim();
    let captures = EMPHASIZED_LINE
        .captures(line)
        .or_else(|| PLAIN_LINE.captures(line))?;

    let start: TimeOfDay = captures[1].parse().ok()?;
    let end: TimeOfDay = captures[2].parse().ok()?;
    let label = clean_label(&captures[3]);
    if label.is_empty() {
        return None;
    }
    Some(TimeBlock::new(start, end, label))
}

// Drops a dangling `**`, or both markers when they wrap only the label.
fn clean_label(raw: &str) -> String {
    let label = raw.trim();
    match label.strip_suffix(EMPHASIS) {
        Some(rest) => rest.strip_prefix(EMPHASIS).unwrap_or(rest).trim().to_string(),
        None => label.to_string(),
    }
}
