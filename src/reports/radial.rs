//! Donut chart geometry
//!
//! Maps an ordered list of percentages onto a circle (100% = 360°) and
//! computes the outline of each wedge between an inner and outer radius.
//! Angles are in degrees, measured clockwise from twelve o'clock.

use serde::Serialize;

use super::aggregation::{aggregate, CategoryShare};
use crate::config::DonutSettings;
use crate::models::numeric::finite_or_zero;
use crate::models::CategoryRecord;

/// Degrees per percentage point
pub const DEGREES_PER_PERCENT: f64 = 3.6;

/// Span of a wedge that the gap would otherwise swallow
pub const MIN_SLIVER_DEGREES: f64 = 0.5;

/// Largest drawable span; a full 360° arc has identical end points
pub const MAX_SPAN_DEGREES: f64 = 359.99;

/// Color used when no palette is supplied
pub const FALLBACK_COLOR: &str = "#9CA3AF";

/// One wedge of a pie or donut chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieSegment {
    pub name: String,
    pub amount: f64,
    pub color: String,
    pub percentage: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieSegment {
    /// Angular width in degrees
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Angle halfway through the wedge, for labels and tooltips
    pub fn mid_angle(&self) -> f64 {
        self.start_angle + self.span() / 2.0
    }
}

/// Start and end angle for each percentage, accumulated in order
///
/// Negative or non-finite percentages take up no room.
pub fn cumulative_angles(percentages: &[f64]) -> Vec<(f64, f64)> {
    let mut cursor = 0.0;
    percentages
        .iter()
        .map(|p| {
            let pct = finite_or_zero(*p);
            if pct < 0.0 {
                tracing::warn!(percentage = pct, "negative percentage mapped to an empty wedge");
            }
            let start = cursor;
            cursor += pct.max(0.0);
            (start * DEGREES_PER_PERCENT, cursor * DEGREES_PER_PERCENT)
        })
        .collect()
}

/// Turn category shares into pie segments, coloring from `palette` in order
pub fn map_segments(shares: &[CategoryShare], palette: &[String]) -> Vec<PieSegment> {
    let percentages: Vec<f64> = shares.iter().map(|s| s.percentage).collect();

    shares
        .iter()
        .zip(cumulative_angles(&percentages))
        .enumerate()
        .map(|(i, (share, (start_angle, end_angle)))| PieSegment {
            name: share.category.clone(),
            amount: share.total_amount,
            color: palette_color(palette, i).to_string(),
            percentage: share.percentage,
            start_angle,
            end_angle,
        })
        .collect()
}

/// Aggregate category totals and lay them out as pie segments
pub fn build_pie(records: &[CategoryRecord], palette: &[String]) -> Vec<PieSegment> {
    map_segments(&aggregate(records), palette)
}

fn palette_color(palette: &[String], index: usize) -> &str {
    if palette.is_empty() {
        FALLBACK_COLOR
    } else {
        &palette[index % palette.len()]
    }
}

/// A point in chart coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Outline of one donut wedge
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WedgePath {
    pub outer_start: Point,
    pub outer_end: Point,
    pub inner_end: Point,
    pub inner_start: Point,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub large_arc: bool,
    /// The gap left no room and the wedge was shrunk to a sliver
    pub collapsed: bool,
}

impl WedgePath {
    /// SVG path data: outer arc clockwise, inner arc back counter-clockwise
    pub fn to_svg_path(&self) -> String {
        let large = u8::from(self.large_arc);
        format!(
            "M {:.3} {:.3} A {r} {r} 0 {large} 1 {:.3} {:.3} L {:.3} {:.3} A {ir} {ir} 0 {large} 0 {:.3} {:.3} Z",
            self.outer_start.x,
            self.outer_start.y,
            self.outer_end.x,
            self.outer_end.y,
            self.inner_end.x,
            self.inner_end.y,
            self.inner_start.x,
            self.inner_start.y,
            r = self.outer_radius,
            ir = self.inner_radius,
            large = large,
        )
    }
}

/// Radii, gap and centre of a donut chart
#[derive(Debug, Clone, PartialEq)]
pub struct DonutGeometry {
    pub outer_radius: f64,
    pub inner_radius: f64,
    /// Spacing between neighbouring wedges, in degrees
    pub gap_degrees: f64,
    pub center: Point,
}

impl Default for DonutGeometry {
    fn default() -> Self {
        Self::from_settings(&DonutSettings::default())
    }
}

impl DonutGeometry {
    pub fn new(outer_radius: f64, inner_radius: f64, gap_degrees: f64) -> Self {
        Self {
            outer_radius,
            inner_radius,
            gap_degrees: finite_or_zero(gap_degrees).max(0.0),
            center: Point { x: 0.0, y: 0.0 },
        }
    }

    pub fn with_center(mut self, x: f64, y: f64) -> Self {
        self.center = Point { x, y };
        self
    }

    pub fn from_settings(settings: &DonutSettings) -> Self {
        Self::new(settings.outer_radius, settings.inner_radius, settings.gap_degrees)
            .with_center(settings.center_x, settings.center_y)
    }

    /// Outline of the wedge between `start` and `end` degrees
    ///
    /// Half the gap is trimmed from each side. When that leaves less than
    /// `MIN_SLIVER_DEGREES`, the wedge becomes a sliver of that width
    /// centred on the original span. The large-arc flag follows the
    /// untrimmed span, so a segment just over 180° keeps the flag even when
    /// the gap trims the drawn arc below 180°.
    pub fn wedge(&self, start: f64, end: f64) -> WedgePath {
        let half_gap = self.gap_degrees / 2.0;
        let mut from = start + half_gap;
        let mut to = end - half_gap;
        let collapsed = to - from < MIN_SLIVER_DEGREES;

        if collapsed {
            let mid = (start + end) / 2.0;
            from = mid - MIN_SLIVER_DEGREES / 2.0;
            to = mid + MIN_SLIVER_DEGREES / 2.0;
        } else if to - from > MAX_SPAN_DEGREES {
            to = from + MAX_SPAN_DEGREES;
        }

        let a1 = (from - 90.0).to_radians();
        let a2 = (to - 90.0).to_radians();

        WedgePath {
            outer_start: self.polar(self.outer_radius, a1),
            outer_end: self.polar(self.outer_radius, a2),
            inner_end: self.polar(self.inner_radius, a2),
            inner_start: self.polar(self.inner_radius, a1),
            outer_radius: self.outer_radius,
            inner_radius: self.inner_radius,
            large_arc: end - start > 180.0,
            collapsed,
        }
    }

    /// Wedges for every segment, in order
    pub fn wedges(&self, segments: &[PieSegment]) -> Vec<WedgePath> {
        segments
            .iter()
            .map(|s| self.wedge(s.start_angle, s.end_angle))
            .collect()
    }

    fn polar(&self, radius: f64, radians: f64) -> Point {
        Point {
            x: self.center.x + radius * radians.cos(),
            y: self.center.y + radius * radians.sin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(name: &str, percentage: f64) -> CategoryShare {
        CategoryShare {
            category: name.to_string(),
            total_amount: percentage,
            percentage,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn palette() -> Vec<String> {
        vec!["#111111".to_string(), "#222222".to_string()]
    }

    #[test]
    fn test_two_halves() {
        let segments = map_segments(&[share("A", 50.0), share("B", 50.0)], &palette());

        assert_close(segments[0].start_angle, 0.0);
        assert_close(segments[0].end_angle, 180.0);
        assert_close(segments[1].start_angle, 180.0);
        assert_close(segments[1].end_angle, 360.0);
        assert_close(segments[0].span(), 180.0);
        assert_close(segments[1].mid_angle(), 270.0);
    }

    #[test]
    fn test_angles_accumulate_in_order() {
        let angles = cumulative_angles(&[25.0, 10.0, 65.0]);
        assert_close(angles[1].0, 90.0);
        assert_close(angles[1].1, 126.0);
        assert_close(angles[2].1, 360.0);
    }

    #[test]
    fn test_negative_percentage_takes_no_room() {
        let angles = cumulative_angles(&[-10.0, 50.0, f64::NAN]);
        assert_eq!(angles[0], (0.0, 0.0));
        assert_close(angles[1].1, 180.0);
        assert_eq!(angles[2].0, angles[2].1);
    }

    #[test]
    fn test_palette_cycles() {
        let shares: Vec<_> = (0..3).map(|i| share(&i.to_string(), 10.0)).collect();
        let segments = map_segments(&shares, &palette());

        assert_eq!(segments[0].color, "#111111");
        assert_eq!(segments[1].color, "#222222");
        assert_eq!(segments[2].color, "#111111");

        let uncolored = map_segments(&shares, &[]);
        assert_eq!(uncolored[0].color, FALLBACK_COLOR);
    }

    #[test]
    fn test_build_pie_from_records() {
        let records = vec![
            CategoryRecord::new("rent", 750.0),
            CategoryRecord::new("food", 250.0),
        ];
        let segments = build_pie(&records, &palette());

        assert_eq!(segments[0].name, "rent");
        assert_eq!(segments[0].amount, 750.0);
        assert_eq!(segments[0].percentage, 75.0);
        assert_close(segments[0].end_angle, 270.0);
        assert_close(segments[1].mid_angle(), 315.0);
        assert!(build_pie(&[], &palette()).is_empty());
    }

    #[test]
    fn test_wedge_corners() {
        let geometry = DonutGeometry::new(100.0, 50.0, 0.0);
        let wedge = geometry.wedge(0.0, 90.0);

        // 0° is twelve o'clock, 90° is three o'clock
        assert_close(wedge.outer_start.x, 0.0);
        assert_close(wedge.outer_start.y, -100.0);
        assert_close(wedge.outer_end.x, 100.0);
        assert_close(wedge.outer_end.y, 0.0);
        assert_close(wedge.inner_end.x, 50.0);
        assert_close(wedge.inner_start.y, -50.0);
        assert!(!wedge.large_arc);
        assert!(!wedge.collapsed);
    }

    #[test]
    fn test_gap_trims_both_sides() {
        let geometry = DonutGeometry::new(100.0, 50.0, 4.0);
        let wedge = geometry.wedge(0.0, 90.0);

        let a1 = (2.0f64 - 90.0).to_radians();
        let a2 = (88.0f64 - 90.0).to_radians();
        assert_close(wedge.outer_start.x, 100.0 * a1.cos());
        assert_close(wedge.outer_end.y, 100.0 * a2.sin());
    }

    #[test]
    fn test_large_arc_flag() {
        let geometry = DonutGeometry::new(100.0, 50.0, 2.0);
        assert!(geometry.wedge(0.0, 270.0).large_arc);
        assert!(!geometry.wedge(0.0, 180.0).large_arc);
    }

    #[test]
    fn test_large_arc_follows_untrimmed_span() {
        let geometry = DonutGeometry::new(100.0, 50.0, 4.0);
        let wedge = geometry.wedge(0.0, 181.0);

        // drawn arc runs 2° to 179°, the flag still reflects 181°
        assert!(wedge.large_arc);
        let a2 = (179.0f64 - 90.0).to_radians();
        assert_close(wedge.outer_end.x, 100.0 * a2.cos());
        assert_close(wedge.outer_end.y, 100.0 * a2.sin());
        assert!(wedge.to_svg_path().contains(" 0 1 1 "));
    }

    #[test]
    fn test_gap_wider_than_segment_collapses() {
        let geometry = DonutGeometry::new(100.0, 50.0, 4.0);
        let wedge = geometry.wedge(100.0, 101.0);

        assert!(wedge.collapsed);
        let mid = (100.5f64 - 90.0).to_radians();
        let a1 = mid - (MIN_SLIVER_DEGREES / 2.0).to_radians();
        assert_close(wedge.outer_start.x, 100.0 * a1.cos());
        assert!(wedge.to_svg_path().starts_with("M "));
    }

    #[test]
    fn test_full_circle_stays_drawable() {
        let geometry = DonutGeometry::new(100.0, 50.0, 0.0);
        let wedge = geometry.wedge(0.0, 360.0);

        assert!(wedge.large_arc);
        assert_ne!(wedge.outer_start, wedge.outer_end);
    }

    #[test]
    fn test_svg_path_format() {
        let geometry = DonutGeometry::new(10.0, 5.0, 0.0).with_center(10.0, 10.0);
        let path = geometry.wedge(0.0, 90.0).to_svg_path();

        assert_eq!(
            path,
            "M 10.000 0.000 A 10 10 0 0 1 20.000 10.000 L 15.000 10.000 A 5 5 0 0 0 10.000 5.000 Z"
        );
    }

    #[test]
    fn test_wedges_follow_segments() {
        let segments = map_segments(&[share("A", 30.0), share("B", 70.0)], &palette());
        let wedges = DonutGeometry::default().wedges(&segments);

        assert_eq!(wedges.len(), 2);
        assert!(wedges[1].large_arc);
        assert!(!wedges[0].large_arc);
    }
}
