//! SVG rendering of a laid-out timeline. Hour 0 is at the top.

use std::fmt::Write;

use quick_xml::escape::escape;

use crate::service::timeline_layout::{RenderGeometry, HOURS_PER_DAY};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 1200.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 80.0;
const MARGIN_TOP: f64 = 70.0;
const MARGIN_BOTTOM: f64 = 60.0;
const PLOT_WIDTH: f64 = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
const PLOT_HEIGHT: f64 = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
const BLOCK_OPACITY: f64 = 0.7;
const NOW_LABEL: &str = "現在";
const AXIS_LABEL: &str = "活動";

fn y_for(hour: f64) -> f64 {
    MARGIN_TOP + hour / HOURS_PER_DAY * PLOT_HEIGHT
}

pub fn render_svg(geometry: &RenderGeometry) -> String {
    let mut svg = String::new();
    let lane_center = MARGIN_LEFT + PLOT_WIDTH / 2.0;
    let lane_right = MARGIN_LEFT + PLOT_WIDTH;

    // Writing into a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif">"#
    );
    let _ = writeln!(svg, r#"<rect width="{WIDTH}" height="{HEIGHT}" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="40" text-anchor="middle" font-size="22">{}のスケジュール</text>"#,
        WIDTH / 2.0,
        geometry.date.format("%Y年%m月%d日")
    );

    for hour in 0..=24u32 {
        let y = y_for(f64::from(hour));
        let _ = writeln!(
            svg,
            r##"<line x1="{}" y1="{y:.2}" x2="{MARGIN_LEFT}" y2="{y:.2}" stroke="#000"/><text x="{}" y="{y:.2}" text-anchor="end" dominant-baseline="middle" font-size="12">{hour:02}:00</text>"##,
            MARGIN_LEFT - 5.0,
            MARGIN_LEFT - 8.0,
        );
    }

    for block in &geometry.blocks {
        let fill = block.color.to_hex();
        for span in &block.spans {
            let _ = writeln!(
                svg,
                r#"<rect x="{MARGIN_LEFT}" y="{:.2}" width="{PLOT_WIDTH}" height="{:.2}" fill="{fill}" fill-opacity="{BLOCK_OPACITY}"/>"#,
                y_for(span.start),
                span.extent / HOURS_PER_DAY * PLOT_HEIGHT,
            );
        }
        let _ = writeln!(
            svg,
            r#"<text x="{lane_center}" y="{:.2}" text-anchor="middle" dominant-baseline="middle" font-size="14" font-weight="bold">{}</text>"#,
            y_for(block.label_anchor),
            escape(block.label.as_str()),
        );
        let boundary = y_for(block.boundary);
        let _ = writeln!(
            svg,
            r#"<line x1="{MARGIN_LEFT}" y1="{boundary:.2}" x2="{lane_right}" y2="{boundary:.2}" stroke="gray" stroke-width="0.5" stroke-dasharray="4 3"/>"#
        );
    }

    let now = y_for(geometry.now_marker);
    let _ = writeln!(
        svg,
        r#"<line class="now" x1="{MARGIN_LEFT}" y1="{now:.2}" x2="{lane_right}" y2="{now:.2}" stroke="red" stroke-width="2"/><text x="{}" y="{now:.2}" fill="red" dominant-baseline="middle" font-size="14">{NOW_LABEL}</text>"#,
        lane_right + 6.0,
    );

    let _ = writeln!(
        svg,
        r#"<rect x="{MARGIN_LEFT}" y="{MARGIN_TOP}" width="{PLOT_WIDTH}" height="{PLOT_HEIGHT}" fill="none" stroke="black"/>"#
    );
    let _ = writeln!(
        svg,
        r#"<text x="{lane_center}" y="{}" text-anchor="middle" font-size="16">{AXIS_LABEL}</text>"#,
        HEIGHT - 20.0
    );
    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_zero_is_at_the_top() {
        assert_eq!(y_for(0.0), MARGIN_TOP);
        assert_eq!(y_for(24.0), HEIGHT - MARGIN_BOTTOM);
    }
}
