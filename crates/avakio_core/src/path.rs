//! Vector path builder.
//!
//! Paths are built with a consuming builder (`Path::new().move_to(..).line_to(..)`)
//! and can be serialized as SVG path data or flattened into a polyline for
//! hit-testing and area computations.

use std::f64::consts::TAU;

use crate::geometry::{Point, Rect};
use crate::paint::CornerRadius;

/// One path segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathVerb {
    MoveTo(Point),
    LineTo(Point),
    CubicTo {
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    /// Circular arc in SVG endpoint parameterization.
    ArcTo {
        radius: f32,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    Close,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    verbs: Vec<PathVerb>,
}

impl Path {
    pub fn new() -> Self {
        Self { verbs: Vec::new() }
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.verbs.push(PathVerb::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.verbs.push(PathVerb::LineTo(Point::new(x, y)));
        self
    }

    pub fn cubic_to(mut self, ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        self.verbs.push(PathVerb::CubicTo { ctrl1, ctrl2, to });
        self
    }

    pub fn arc_to(mut self, radius: f32, large_arc: bool, sweep: bool, to: Point) -> Self {
        self.verbs.push(PathVerb::ArcTo {
            radius,
            large_arc,
            sweep,
            to,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.verbs.push(PathVerb::Close);
        self
    }

    /// Rectangle with per-corner radii, clockwise from the top-left corner.
    pub fn rounded_rect(rect: Rect, radius: CornerRadius) -> Self {
        let r = radius.fit(rect.width(), rect.height());
        let (x0, y0, x1, y1) = (rect.x(), rect.y(), rect.right(), rect.bottom());

        let mut p = Path::new()
            .move_to(x0 + r.top_left, y0)
            .line_to(x1 - r.top_right, y0);
        if r.top_right > 0.0 {
            p = p.arc_to(r.top_right, false, true, Point::new(x1, y0 + r.top_right));
        }
        p = p.line_to(x1, y1 - r.bottom_right);
        if r.bottom_right > 0.0 {
            p = p.arc_to(r.bottom_right, false, true, Point::new(x1 - r.bottom_right, y1));
        }
        p = p.line_to(x0 + r.bottom_left, y1);
        if r.bottom_left > 0.0 {
            p = p.arc_to(r.bottom_left, false, true, Point::new(x0, y1 - r.bottom_left));
        }
        p = p.line_to(x0, y0 + r.top_left);
        if r.top_left > 0.0 {
            p = p.arc_to(r.top_left, false, true, Point::new(x0 + r.top_left, y0));
        }
        p.close()
    }

    pub fn verbs(&self) -> &[PathVerb] {
        &self.verbs
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Append all verbs of `other`.
    pub fn extend(mut self, other: &Path) -> Self {
        self.verbs.extend_from_slice(&other.verbs);
        self
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        let t = |p: Point| p.offset(dx, dy);
        let verbs = self
            .verbs
            .iter()
            .map(|v| match *v {
                PathVerb::MoveTo(p) => PathVerb::MoveTo(t(p)),
                PathVerb::LineTo(p) => PathVerb::LineTo(t(p)),
                PathVerb::CubicTo { ctrl1, ctrl2, to } => PathVerb::CubicTo {
                    ctrl1: t(ctrl1),
                    ctrl2: t(ctrl2),
                    to: t(to),
                },
                PathVerb::ArcTo {
                    radius,
                    large_arc,
                    sweep,
                    to,
                } => PathVerb::ArcTo {
                    radius,
                    large_arc,
                    sweep,
                    to: t(to),
                },
                PathVerb::Close => PathVerb::Close,
            })
            .collect();
        Self { verbs }
    }

    /// SVG path data (`d` attribute).
    pub fn to_svg_data(&self) -> String {
        let mut out = String::new();
        for verb in &self.verbs {
            if !out.is_empty() {
                out.push(' ');
            }
            match verb {
                PathVerb::MoveTo(p) => out.push_str(&format!("M{} {}", num(p.x), num(p.y))),
                PathVerb::LineTo(p) => out.push_str(&format!("L{} {}", num(p.x), num(p.y))),
                PathVerb::CubicTo { ctrl1, ctrl2, to } => out.push_str(&format!(
                    "C{} {} {} {} {} {}",
                    num(ctrl1.x),
                    num(ctrl1.y),
                    num(ctrl2.x),
                    num(ctrl2.y),
                    num(to.x),
                    num(to.y)
                )),
                PathVerb::ArcTo {
                    radius,
                    large_arc,
                    sweep,
                    to,
                } => out.push_str(&format!(
                    "A{r} {r} 0 {} {} {} {}",
                    u8::from(*large_arc),
                    u8::from(*sweep),
                    num(to.x),
                    num(to.y),
                    r = num(*radius)
                )),
                PathVerb::Close => out.push('Z'),
            }
        }
        out
    }

    /// Approximate the path with straight segments.
    ///
    /// Curves and arcs contribute `steps` points each. Subpaths are concatenated,
    /// so the result is only meaningful as a polygon for single-subpath shapes.
    pub fn flatten(&self, steps: usize) -> Vec<Point> {
        let steps = steps.max(1);
        let mut out = Vec::new();
        let mut current = Point::ZERO;
        let mut start = Point::ZERO;

        for verb in &self.verbs {
            match *verb {
                PathVerb::MoveTo(p) => {
                    out.push(p);
                    current = p;
                    start = p;
                }
                PathVerb::LineTo(p) => {
                    out.push(p);
                    current = p;
                }
                PathVerb::CubicTo { ctrl1, ctrl2, to } => {
                    for i in 1..=steps {
                        let t = i as f32 / steps as f32;
                        out.push(cubic_point(current, ctrl1, ctrl2, to, t));
                    }
                    current = to;
                }
                PathVerb::ArcTo {
                    radius,
                    large_arc,
                    sweep,
                    to,
                } => {
                    out.extend(arc_points(current, radius, large_arc, sweep, to, steps));
                    current = to;
                }
                PathVerb::Close => {
                    current = start;
                }
            }
        }
        out
    }
}

fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f32) -> Point {
    let u = 1.0 - t;
    let a = u * u * u;
    let b = 3.0 * u * u * t;
    let c = 3.0 * u * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

/// Endpoint-to-center conversion for a circular arc (SVG implementation notes, F.6.5).
fn arc_points(
    from: Point,
    radius: f32,
    large_arc: bool,
    sweep: bool,
    to: Point,
    steps: usize,
) -> Vec<Point> {
    if radius <= 0.0 || from == to {
        return vec![to];
    }

    let (x1, y1) = (from.x as f64, from.y as f64);
    let (x2, y2) = (to.x as f64, to.y as f64);
    let x1p = (x1 - x2) / 2.0;
    let y1p = (y1 - y2) / 2.0;

    let mut r = radius as f64;
    let lambda = (x1p * x1p + y1p * y1p) / (r * r);
    if lambda > 1.0 {
        r *= lambda.sqrt();
    }

    let r2 = r * r;
    let d2 = x1p * x1p + y1p * y1p;
    let coef = ((r2 - d2) / d2).max(0.0).sqrt();
    let sign = if large_arc != sweep { 1.0 } else { -1.0 };
    let cxp = sign * coef * y1p;
    let cyp = sign * coef * -x1p;
    let cx = cxp + (x1 + x2) / 2.0;
    let cy = cyp + (y1 + y2) / 2.0;

    let theta1 = ((y1p - cyp) / r).atan2((x1p - cxp) / r);
    let theta2 = ((-y1p - cyp) / r).atan2((-x1p - cxp) / r);
    let mut delta = theta2 - theta1;
    if sweep && delta < 0.0 {
        delta += TAU;
    } else if !sweep && delta > 0.0 {
        delta -= TAU;
    }

    (1..=steps)
        .map(|i| {
            let theta = theta1 + delta * i as f64 / steps as f64;
            Point::new((cx + r * theta.cos()) as f32, (cy + r * theta.sin()) as f32)
        })
        .collect()
}

/// Format a coordinate with at most two decimals and no trailing zeros.
fn num(v: f32) -> String {
    let mut s = format!("{v:.2}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}
