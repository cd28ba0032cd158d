//! Maps a schedule onto a single-lane 0–24h vertical axis.
//!
//! Everything is in hour units; turning hours into pixels is the renderer's job.

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::models::time_block::{Schedule, TimeBlock};

pub const HOURS_PER_DAY: f64 = 24.0;

/// Matplotlib's `Set3` qualitative palette.
pub const SET3: [Rgb; 12] = [
    Rgb(0x8d, 0xd3, 0xc7),
    Rgb(0xff, 0xff, 0xb3),
    Rgb(0xbe, 0xba, 0xda),
    Rgb(0xfb, 0x80, 0x72),
    Rgb(0x80, 0xb1, 0xd3),
    Rgb(0xfd, 0xb4, 0x62),
    Rgb(0xb3, 0xde, 0x69),
    Rgb(0xfc, 0xcd, 0xe5),
    Rgb(0xd9, 0xd9, 0xd9),
    Rgb(0xbc, 0x80, 0xbd),
    Rgb(0xcc, 0xeb, 0xc5),
    Rgb(0xff, 0xed, 0x6f),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// A vertical stretch of the lane. The lane is always drawn full width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourSpan {
    pub start: f64,
    pub extent: f64,
}

impl HourSpan {
    pub fn between(start: f64, end: f64) -> Self {
        Self {
            start,
            extent: end - start,
        }
    }

    pub fn end(&self) -> f64 {
        self.start + self.extent
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockGeometry {
    pub label: String,
    pub color: Rgb,
    /// One span, or two when the block wraps past midnight.
    pub spans: Vec<HourSpan>,
    pub label_anchor: f64,
    /// Gridline drawn at the block's start.
    pub boundary: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderGeometry {
    pub date: NaiveDate,
    pub blocks: Vec<BlockGeometry>,
    pub now_marker: f64,
}

/// `None` means there is nothing to draw.
pub fn layout(schedule: &Schedule, date: NaiveDate, now: NaiveTime) -> Option<RenderGeometry> {
    if schedule.is_empty() {
        return None;
    }
    let blocks = schedule
        .iter()
        .enumerate()
        .map(|(index, block)| layout_block(block, palette_color(index, schedule.len())))
        .collect();
    Some(RenderGeometry {
        date,
        blocks,
        now_marker: fractional_hour(now),
    })
}

fn layout_block(block: &TimeBlock, color: Rgb) -> BlockGeometry {
    let start = block.start.fractional_hour();
    let end = block.end.fractional_hour();

    let (spans, label_anchor) = if block.crosses_midnight() {
        let mut anchor = (start + HOURS_PER_DAY + end) / 2.0;
        if anchor >= HOURS_PER_DAY {
            anchor -= HOURS_PER_DAY;
        }
        (
            vec![
                HourSpan::between(start, HOURS_PER_DAY),
                HourSpan::between(0.0, end),
            ],
            anchor,
        )
    } else {
        let span = HourSpan::between(start, end);
        (vec![span], start + span.extent / 2.0)
    };

    BlockGeometry {
        label: block.label.clone(),
        color,
        spans,
        label_anchor,
        boundary: start,
    }
}

/// Samples the palette evenly over `count` blocks, like `Set3(linspace(0, 1, count))`.
pub fn palette_color(index: usize, count: usize) -> Rgb {
    if count <= 1 {
        return SET3[0];
    }
    let position = index as f64 / (count - 1) as f64;
    let slot = ((position * SET3.len() as f64) as usize).min(SET3.len() - 1);
    SET3[slot]
}

pub fn fractional_hour(time: NaiveTime) -> f64 {
    f64::from(time.hour()) + f64::from(time.minute()) / 60.0
}
