use chrono::{NaiveDate, NaiveTime};
use dayPlanner::models::time_block::TimeBlock;
use dayPlanner::service::chart_renderer::render_svg;
use dayPlanner::service::timeline_layout::layout;

fn block(start: &str, end: &str, label: &str) -> TimeBlock {
    TimeBlock::new(start.parse().unwrap(), end.parse().unwrap(), label)
}

#[test]
fn chart_contains_title_blocks_and_now_line() {
    let schedule = vec![block("09:00", "10:30", "会議 <定例>"), block("23:00", "07:00", "睡眠")];
    let geometry = layout(
        &schedule,
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
        NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
    )
    .unwrap();

    let svg = render_svg(&geometry);
    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains("2026年10月18日のスケジュール"));
    assert!(svg.contains("会議 &lt;定例&gt;"));
    assert!(svg.contains("睡眠"));
    assert!(svg.contains("現在"));
    assert!(svg.contains("00:00"));
    assert!(svg.contains("24:00"));
    assert_eq!(svg.matches("fill-opacity=\"0.7\"").count(), 3);
    assert_eq!(svg.matches("stroke-dasharray").count(), 2);
    assert_eq!(svg.matches("class=\"now\"").count(), 1);
}

#[test]
fn markup_characters_in_labels_are_escaped() {
    let schedule = vec![block("10:00", "11:00", "R&D \"sync\"")];
    let geometry = layout(
        &schedule,
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
        NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
    )
    .unwrap();

    let svg = render_svg(&geometry);
    assert!(svg.contains("R&amp;D &quot;sync&quot;"));
    assert!(!svg.contains("R&D"));
}
