//! Angle math shared by the renderers and the spin engine.
//!
//! Angles are radians measured from the positive x axis, growing towards
//! positive y (clockwise on a y-down drawing surface). Segment `i` covers
//! `[i * span, (i + 1) * span)`.

use glam::DVec2;
use std::f64::consts::{PI, TAU};

use crate::layout::SEGMENT_COUNT;

/// Angular width of one segment, `2π / 37`.
pub fn segment_angle_span() -> f64 {
    TAU / SEGMENT_COUNT as f64
}

/// Angle of the leading edge of segment `index`.
pub fn segment_start_angle(index: usize) -> f64 {
    index as f64 * segment_angle_span()
}

pub fn segment_center_angle(index: usize) -> f64 {
    let span = segment_angle_span();
    index as f64 * span + span / 2.0
}

pub fn polar_to_cartesian(angle: f64, radius: f64) -> DVec2 {
    DVec2::new(radius * angle.cos(), radius * angle.sin())
}

/// Segment whose span contains `angle`, after wrapping into `[0, 2π)`.
pub fn segment_at_angle(angle: f64) -> usize {
    let wrapped = angle.rem_euclid(TAU);
    let index = (wrapped / segment_angle_span()).floor() as usize;
    index.min(SEGMENT_COUNT - 1)
}

/// Pie slice outline for one segment, centered on the wheel origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    pub start_angle: f64,
    pub end_angle: f64,
    pub start: DVec2,
    pub end: DVec2,
    pub radius: f64,
    pub large_arc: bool,
}

impl ArcPath {
    /// SVG `d` attribute: origin, line to the start edge, sweep to the end edge, close.
    pub fn to_svg_path_data(&self) -> String {
        format!(
            "M 0 0 L {:.3} {:.3} A {r:.3} {r:.3} 0 {} 1 {:.3} {:.3} Z",
            self.start.x,
            self.start.y,
            u8::from(self.large_arc),
            self.end.x,
            self.end.y,
            r = self.radius,
        )
    }
}

pub fn segment_arc_path(index: usize, radius: f64) -> ArcPath {
    let span = segment_angle_span();
    let start_angle = segment_start_angle(index);
    let end_angle = start_angle + span;

    ArcPath {
        start_angle,
        end_angle,
        start: polar_to_cartesian(start_angle, radius),
        end: polar_to_cartesian(end_angle, radius),
        radius,
        large_arc: span > PI,
    }
}

/// Where a segment's number is drawn and how far it is turned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub position: DVec2,
    /// Clockwise rotation about `position` so the text reads outward.
    pub rotation_degrees: f64,
}

pub fn segment_label(index: usize, radius: f64) -> LabelPlacement {
    let angle = segment_center_angle(index);
    LabelPlacement {
        position: polar_to_cartesian(angle, radius),
        rotation_degrees: angle.to_degrees() + 90.0,
    }
}

/// Spoke along the leading edge of segment `index`, from `inner_radius` to `outer_radius`.
pub fn divider_line(index: usize, inner_radius: f64, outer_radius: f64) -> (DVec2, DVec2) {
    let angle = segment_start_angle(index);
    (polar_to_cartesian(angle, inner_radius), polar_to_cartesian(angle, outer_radius))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_span_is_tau_over_37() {
        assert!((segment_angle_span() - TAU / 37.0).abs() < EPS);
        assert!((segment_angle_span() * SEGMENT_COUNT as f64 - TAU).abs() < EPS);
    }

    #[test]
    fn test_center_angle_within_segment() {
        let span = segment_angle_span();
        for index in 0..SEGMENT_COUNT {
            let center = segment_center_angle(index);
            let low = index as f64 * span;
            let high = (index + 1) as f64 * span;
            assert!(
                center >= low && center < high,
                "index {index}: {center} not in [{low}, {high})"
            );
        }
    }

    #[test]
    fn test_center_of_zero_is_half_span() {
        assert!((segment_center_angle(0) - segment_angle_span() / 2.0).abs() < EPS);
    }

    #[test]
    fn test_polar_to_cartesian_axes() {
        let p = polar_to_cartesian(0.0, 10.0);
        assert!((p.x - 10.0).abs() < EPS);
        assert!(p.y.abs() < EPS);

        let p = polar_to_cartesian(PI / 2.0, 10.0);
        assert!(p.x.abs() < EPS);
        assert!((p.y - 10.0).abs() < EPS);

        let p = polar_to_cartesian(1.234, 42.0);
        assert!((p.length() - 42.0).abs() < EPS);
    }

    #[test]
    fn test_arc_path_boundaries() {
        let span = segment_angle_span();
        let arc = segment_arc_path(5, 150.0);

        assert!((arc.start_angle - 5.0 * span).abs() < EPS);
        assert!((arc.end_angle - 6.0 * span).abs() < EPS);
        assert_eq!(arc.start, polar_to_cartesian(arc.start_angle, 150.0));
        assert_eq!(arc.end, polar_to_cartesian(arc.end_angle, 150.0));
        assert!(!arc.large_arc);
    }

    #[test]
    fn test_arcs_share_edges() {
        for index in 0..SEGMENT_COUNT - 1 {
            let a = segment_arc_path(index, 100.0);
            let b = segment_arc_path(index + 1, 100.0);
            assert!((a.end - b.start).length() < EPS);
        }
        let last = segment_arc_path(SEGMENT_COUNT - 1, 100.0);
        let first = segment_arc_path(0, 100.0);
        assert!((last.end - first.start).length() < 1e-6);
    }

    #[test]
    fn test_arc_svg_path_data() {
        let arc = segment_arc_path(0, 150.0);
        let d = arc.to_svg_path_data();
        assert!(d.starts_with("M 0 0 L 150.000 0.000 A 150.000 150.000 0 0 1 "));
        assert!(d.ends_with(" Z"));
    }

    #[test]
    fn test_segment_at_angle_inverts_center() {
        for index in 0..SEGMENT_COUNT {
            assert_eq!(segment_at_angle(segment_center_angle(index)), index);
            assert_eq!(segment_at_angle(segment_center_angle(index) + 3.0 * TAU), index);
            assert_eq!(segment_at_angle(segment_center_angle(index) - TAU), index);
        }
    }

    #[test]
    fn test_label_rotation_points_outward() {
        let label = segment_label(0, 130.0);
        let angle = segment_center_angle(0);
        assert!((label.rotation_degrees - (angle.to_degrees() + 90.0)).abs() < EPS);
        assert!((label.position.length() - 130.0).abs() < EPS);
    }

    #[test]
    fn test_divider_line_on_leading_edge() {
        let (inner, outer) = divider_line(3, 150.0, 170.0);
        let angle = segment_start_angle(3);
        assert!((inner.length() - 150.0).abs() < EPS);
        assert!((outer.length() - 170.0).abs() < EPS);
        assert!((inner.y.atan2(inner.x) - angle).abs() < EPS);
    }
}
