//! Hit regions recorded during rendering and queried by pointer events.

use avakio_core::{Point, Rect};

#[derive(Clone, Debug, PartialEq)]
pub enum HitShape {
    Circle { center: Point, radius: f32 },
    Rect(Rect),
    Polygon(Vec<Point>),
    /// Pie or donut slice; angles in degrees clockwise from 12 o'clock.
    /// `squash` is the vertical scale of a tilted pie.
    Sector {
        center: Point,
        inner: f32,
        outer: f32,
        start: f32,
        end: f32,
        squash: f32,
    },
}

impl HitShape {
    pub fn contains(&self, p: Point) -> bool {
        match self {
            HitShape::Circle { center, radius } => center.distance(p) <= *radius,
            HitShape::Rect(r) => r.contains(p),
            HitShape::Polygon(poly) => point_in_polygon(p, poly),
            HitShape::Sector {
                center,
                inner,
                outer,
                start,
                end,
                squash,
            } => {
                let dx = p.x - center.x;
                let dy = (p.y - center.y) / squash.max(1e-3);
                let dist = (dx * dx + dy * dy).sqrt();
                if dist < *inner || dist > *outer {
                    return false;
                }
                let sweep = end - start;
                if sweep >= 360.0 {
                    return true;
                }
                let angle = dy.atan2(dx).to_degrees() + 90.0;
                (angle - start).rem_euclid(360.0) <= sweep
            }
        }
    }
}

/// One interactive data point.
#[derive(Clone, Debug, PartialEq)]
pub struct HitRegion {
    pub series_key: String,
    /// Index of the series in the configured series list.
    pub series_index: usize,
    pub point_index: usize,
    /// Category index on band axes, used by shared tooltips.
    pub category: Option<usize>,
    pub shape: HitShape,
    /// Where the tooltip attaches.
    pub anchor: Point,
}

/// Topmost region under `p`; later regions are drawn above earlier ones.
pub fn hit_test(regions: &[HitRegion], p: Point) -> Option<&HitRegion> {
    regions.iter().rev().find(|r| r.shape.contains(p))
}

pub fn point_in_polygon(p: Point, poly: &[Point]) -> bool {
    if poly.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = poly.len() - 1;
    for i in 0..poly.len() {
        let pi = poly[i];
        let pj = poly[j];
        let intersects = if (pi.y > p.y) != (pj.y > p.y) {
            let dy = pj.y - pi.y;
            if dy.abs() < 1e-12 {
                false
            } else {
                // Points exactly on an edge count as outside.
                p.x < (pj.x - pi.x) * (p.y - pi.y) / dy + pi.x
            }
        } else {
            false
        };
        if intersects {
            inside = !inside;
        }
        j = i;
    }
    inside
}
