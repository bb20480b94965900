//! Path builders shared by the renderers.

use avakio_core::{Path, Point};

/// Catmull-Rom tension used for spline charts.
pub const SPLINE_TENSION: f32 = 0.3;

/// Point on a circle, angle in degrees measured clockwise from 12 o'clock.
pub fn polar_to_cartesian(center: Point, radius: f32, degrees: f32) -> Point {
    let rad = (degrees - 90.0).to_radians();
    Point::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
}

pub fn polyline_path(points: &[Point]) -> Path {
    if points.len() < 2 {
        return Path::new();
    }
    let mut path = Path::new().move_to(points[0].x, points[0].y);
    for p in &points[1..] {
        path = path.line_to(p.x, p.y);
    }
    path
}

/// Smooth curve through every point.
///
/// Each segment `p1 -> p2` is a cubic with control points derived from the
/// neighbours `p0` and `p3` (clamped at the ends). Two points degenerate to a
/// straight line.
pub fn spline_path(points: &[Point]) -> Path {
    match points.len() {
        0 | 1 => return Path::new(),
        2 => return polyline_path(points),
        _ => {}
    }

    let last = points.len() - 1;
    let mut path = Path::new().move_to(points[0].x, points[0].y);
    for i in 0..last {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(last)];

        let cp1 = Point::new(
            p1.x + (p2.x - p0.x) * SPLINE_TENSION,
            p1.y + (p2.y - p0.y) * SPLINE_TENSION,
        );
        let cp2 = Point::new(
            p2.x - (p3.x - p1.x) * SPLINE_TENSION,
            p2.y - (p3.y - p1.y) * SPLINE_TENSION,
        );
        path = path.cubic_to(cp1, cp2, p2);
    }
    path
}

/// Open arc outline from `start` to `end` degrees.
pub fn describe_arc(center: Point, radius: f32, start: f32, end: f32) -> Path {
    let sweep = end - start;
    if sweep <= 0.0 || radius <= 0.0 {
        return Path::new();
    }
    if sweep >= 360.0 {
        let top = polar_to_cartesian(center, radius, start);
        let bottom = polar_to_cartesian(center, radius, start + 180.0);
        return Path::new()
            .move_to(top.x, top.y)
            .arc_to(radius, false, true, bottom)
            .arc_to(radius, false, true, top);
    }
    let from = polar_to_cartesian(center, radius, start);
    let to = polar_to_cartesian(center, radius, end);
    Path::new()
        .move_to(from.x, from.y)
        .arc_to(radius, sweep > 180.0, true, to)
}

/// Closed pie wedge (`inner == 0`) or donut ring segment.
///
/// A full 360 degree sweep is drawn as two half arcs since a single arc with
/// coincident endpoints renders nothing.
pub fn slice_path(center: Point, outer: f32, inner: f32, start: f32, end: f32) -> Path {
    let sweep = end - start;
    if sweep <= 0.0 || outer <= 0.0 {
        return Path::new();
    }
    let inner = inner.clamp(0.0, outer);

    if sweep >= 360.0 {
        let mut path = describe_arc(center, outer, start, start + 360.0).close();
        if inner > 0.0 {
            let i_top = polar_to_cartesian(center, inner, start);
            let i_mid = polar_to_cartesian(center, inner, start + 180.0);
            path = path
                .move_to(i_top.x, i_top.y)
                .arc_to(inner, false, false, i_mid)
                .arc_to(inner, false, false, i_top)
                .close();
        }
        return path;
    }

    let large = sweep > 180.0;
    let o_start = polar_to_cartesian(center, outer, start);
    let o_end = polar_to_cartesian(center, outer, end);

    if inner <= 0.0 {
        return Path::new()
            .move_to(center.x, center.y)
            .line_to(o_start.x, o_start.y)
            .arc_to(outer, large, true, o_end)
            .close();
    }

    let i_start = polar_to_cartesian(center, inner, start);
    let i_end = polar_to_cartesian(center, inner, end);
    describe_arc(center, outer, start, end)
        .line_to(i_end.x, i_end.y)
        .arc_to(inner, large, false, i_start)
        .close()
}

/// Shoelace area of a closed polygon.
pub fn polygon_area(points: &[Point]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    (sum * 0.5).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use avakio_core::PathVerb;
    use std::f32::consts::PI;

    fn approx(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn polar_zero_is_twelve_oclock() {
        let c = Point::new(100.0, 100.0);
        let p = polar_to_cartesian(c, 50.0, 0.0);
        assert!(approx(p.x, 100.0, 1e-4) && approx(p.y, 50.0, 1e-4));
        let p = polar_to_cartesian(c, 50.0, 90.0);
        assert!(approx(p.x, 150.0, 1e-4) && approx(p.y, 100.0, 1e-4));
    }

    #[test]
    fn spline_degenerates() {
        assert!(spline_path(&[]).is_empty());
        assert!(spline_path(&[Point::new(1.0, 1.0)]).is_empty());

        let two = spline_path(&[Point::new(0.0, 0.0), Point::new(10.0, 5.0)]);
        assert_eq!(
            two.verbs(),
            &[
                PathVerb::MoveTo(Point::new(0.0, 0.0)),
                PathVerb::LineTo(Point::new(10.0, 5.0))
            ]
        );
    }

    #[test]
    fn spline_passes_through_points() {
        let pts = [
            Point::new(0.0, 10.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 8.0),
            Point::new(30.0, 2.0),
        ];
        let path = spline_path(&pts);
        let ends: Vec<Point> = path
            .verbs()
            .iter()
            .filter_map(|v| match v {
                PathVerb::CubicTo { to, .. } => Some(*to),
                _ => None,
            })
            .collect();
        assert_eq!(ends, pts[1..].to_vec());
    }

    #[test]
    fn arc_sets_large_flag_past_half_turn() {
        let c = Point::new(10.0, 10.0);
        let small = describe_arc(c, 20.0, 0.0, 90.0);
        assert_eq!(small.verbs().len(), 2);
        match small.verbs()[0] {
            PathVerb::MoveTo(p) => assert!(approx(p.x, 10.0, 1e-4) && approx(p.y, -10.0, 1e-4)),
            ref other => panic!("unexpected first verb {other:?}"),
        }
        match small.verbs()[1] {
            PathVerb::ArcTo {
                radius,
                large_arc,
                sweep,
                to,
            } => {
                assert_eq!(radius, 20.0);
                assert!(!large_arc);
                assert!(sweep);
                assert!(approx(to.x, 30.0, 1e-4) && approx(to.y, 10.0, 1e-4));
            }
            ref other => panic!("unexpected arc verb {other:?}"),
        }

        let large = describe_arc(c, 20.0, 0.0, 270.0);
        match large.verbs()[1] {
            PathVerb::ArcTo { large_arc, to, .. } => {
                assert!(large_arc);
                assert!(approx(to.x, -10.0, 1e-4) && approx(to.y, 10.0, 1e-4));
            }
            ref other => panic!("unexpected arc verb {other:?}"),
        }

        assert!(describe_arc(c, 20.0, 90.0, 90.0).is_empty());
        assert!(describe_arc(c, 0.0, 0.0, 90.0).is_empty());
    }

    #[test]
    fn full_arc_encloses_disc() {
        let c = Point::new(0.0, 0.0);
        let path = describe_arc(c, 30.0, 45.0, 405.0);
        let arcs = path
            .verbs()
            .iter()
            .filter(|v| matches!(v, PathVerb::ArcTo { .. }))
            .count();
        assert_eq!(arcs, 2);
        let area = polygon_area(&path.flatten(64));
        let expected = PI * 30.0 * 30.0;
        assert!((area - expected).abs() / expected < 0.01, "area {area}");
    }

    #[test]
    fn full_pie_slice_covers_circle() {
        let c = Point::new(0.0, 0.0);
        let path = slice_path(c, 50.0, 0.0, 0.0, 360.0);
        let area = polygon_area(&path.flatten(64));
        let expected = PI * 50.0 * 50.0;
        assert!((area - expected).abs() / expected < 0.01, "area {area}");
    }

    #[test]
    fn quarter_slice_area() {
        let c = Point::new(0.0, 0.0);
        let path = slice_path(c, 40.0, 0.0, 90.0, 180.0);
        let area = polygon_area(&path.flatten(64));
        let expected = PI * 40.0 * 40.0 / 4.0;
        assert!((area - expected).abs() / expected < 0.01, "area {area}");
    }

    #[test]
    fn donut_segment_starts_on_outer_ring() {
        let c = Point::new(0.0, 0.0);
        let path = slice_path(c, 100.0, 60.0, 0.0, 90.0);
        match path.verbs()[0] {
            PathVerb::MoveTo(p) => assert!(approx(p.distance(c), 100.0, 1e-3)),
            ref other => panic!("unexpected first verb {other:?}"),
        }
        assert!(slice_path(c, 100.0, 60.0, 45.0, 45.0).is_empty());
    }
}
