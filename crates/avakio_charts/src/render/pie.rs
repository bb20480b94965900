use avakio_core::{Brush, DrawContext, Path, Point, Rect, Stroke, TextAnchor, TextBaseline};

use super::{series_group, Plot};
use crate::config::{ChartType, Series};
use crate::hit::{HitRegion, HitShape};
use crate::shapes::{polar_to_cartesian, slice_path};

/// Radial offset of the hovered slice.
pub const HOVER_OFFSET: f32 = 8.0;
/// Distance of slice labels outside the outer radius.
pub const LABEL_OFFSET: f32 = 16.0;
/// Slices narrower than this get no label.
pub const MIN_LABEL_SWEEP: f32 = 15.0;
pub const PIE3D_DEPTH: f32 = 12.0;
pub const PIE3D_SQUASH: f32 = 0.75;

const ARC_STEPS: usize = 24;

#[derive(Clone, Debug, PartialEq)]
pub struct PieSlice {
    pub point_index: usize,
    pub value: f64,
    /// Degrees clockwise from 12 o'clock.
    pub start: f32,
    pub end: f32,
}

impl PieSlice {
    pub fn sweep(&self) -> f32 {
        self.end - self.start
    }

    pub fn mid_angle(&self) -> f32 {
        (self.start + self.end) * 0.5
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PieGeometry {
    pub series_key: String,
    pub center: Point,
    pub outer_radius: f32,
    pub inner_radius: f32,
    pub slices: Vec<PieSlice>,
}

/// Slice angles for `series`, scaled by `progress`. Empty when the series
/// has nothing positive to show.
pub fn slice_angles(series: &Series, start_angle: f32, progress: f32) -> Vec<PieSlice> {
    let total: f64 = series
        .data
        .iter()
        .map(|p| p.y)
        .filter(|v| v.is_finite() && *v > 0.0)
        .sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let mut acc = 0.0f64;
    let mut slices = Vec::new();
    for (i, p) in series.data.iter().enumerate() {
        if !p.y.is_finite() || p.y <= 0.0 {
            continue;
        }
        let start = start_angle + (acc / total * 360.0) as f32 * progress;
        acc += p.y;
        let end = start_angle + (acc / total * 360.0) as f32 * progress;
        slices.push(PieSlice {
            point_index: i,
            value: p.y,
            start,
            end,
        });
    }
    slices
}

pub(crate) fn render(
    ctx: &mut dyn DrawContext,
    plot: &mut Plot<'_>,
    area: Rect,
) -> Option<PieGeometry> {
    let config = plot.config;
    let (index, series) = plot.visible.first().copied()?;
    if area.is_empty() {
        return None;
    }

    let slices = slice_angles(series, config.pie.start_angle, plot.progress);
    if slices.is_empty() {
        return None;
    }

    let tilted = config.chart_type == ChartType::Pie3D;
    let (squash, depth) = if tilted {
        (PIE3D_SQUASH, PIE3D_DEPTH)
    } else {
        (1.0, 0.0)
    };
    let label_room = if config.pie.show_labels {
        LABEL_OFFSET + 12.0
    } else {
        HOVER_OFFSET
    };
    let fit_w = area.width() * 0.5;
    let fit_h = (area.height() - depth) * 0.5 / squash;
    let outer = (fit_w.min(fit_h) - label_room).max(1.0);
    let inner = if config.chart_type == ChartType::Donut {
        outer * config.donut_fraction()
    } else {
        0.0
    };
    let center = Point::new(area.center().x, area.center().y - depth * 0.5);

    ctx.push_group(&series_group(series));

    if tilted {
        for slice in &slices {
            let color = plot.slice_color(slice.point_index, &series.data[slice.point_index]);
            let (c, _) = slice_center(plot, series, slice, center);
            let path = squashed(&slice_path(c, outer, 0.0, slice.start, slice.end), c, squash)
                .translate(0.0, depth);
            ctx.fill_path(&path, Brush::Solid(color.darken(0.3)));
        }
    }

    for slice in &slices {
        let point = &series.data[slice.point_index];
        let color = plot.slice_color(slice.point_index, point);
        let (c, hovered) = slice_center(plot, series, slice, center);

        let mut path = slice_path(c, outer, inner, slice.start, slice.end);
        if tilted {
            path = squashed(&path, c, squash);
        }
        let fill = if hovered { color.lighten(0.1) } else { color };
        ctx.fill_path(&path, Brush::Solid(fill));
        ctx.stroke_path(
            &path,
            &Stroke::new(1.0),
            Brush::Solid(config.style.background),
        );

        let mid = slice.mid_angle();
        if config.pie.show_labels && slice.sweep() >= MIN_LABEL_SWEEP {
            let at = polar_to_cartesian(c, outer + LABEL_OFFSET, mid);
            let at = Point::new(at.x, c.y + (at.y - c.y) * squash);
            let norm = mid.rem_euclid(360.0);
            let anchor = if norm < 1.0 || norm > 359.0 || (norm - 180.0).abs() < 1.0 {
                TextAnchor::Middle
            } else if norm < 180.0 {
                TextAnchor::Start
            } else {
                TextAnchor::End
            };
            let style = plot
                .text_style(11.0)
                .with_anchor(anchor)
                .with_baseline(TextBaseline::Middle);
            ctx.draw_text(&point.display_name(slice.point_index), at, &style);
        }

        let anchor = polar_to_cartesian(c, (inner + outer) * 0.5, mid);
        plot.hit_regions.push(HitRegion {
            series_key: series.key().to_string(),
            series_index: index,
            point_index: slice.point_index,
            category: None,
            shape: HitShape::Sector {
                center: c,
                inner,
                outer,
                start: slice.start,
                end: slice.end,
                squash,
            },
            anchor: Point::new(anchor.x, c.y + (anchor.y - c.y) * squash),
        });
    }
    ctx.pop_group();

    Some(PieGeometry {
        series_key: series.key().to_string(),
        center,
        outer_radius: outer,
        inner_radius: inner,
        slices,
    })
}

/// Slice center, pushed outward along the mid-angle when hovered.
fn slice_center(plot: &Plot<'_>, series: &Series, slice: &PieSlice, center: Point) -> (Point, bool) {
    if plot.is_hovered(series, slice.point_index) {
        let p = polar_to_cartesian(center, HOVER_OFFSET, slice.mid_angle());
        (p, true)
    } else {
        (center, false)
    }
}

/// Polygonal copy of `path` flattened vertically around `center`.
fn squashed(path: &Path, center: Point, squash: f32) -> Path {
    let pts = path.flatten(ARC_STEPS);
    let Some((first, rest)) = pts.split_first() else {
        return Path::new();
    };
    let map = |p: &Point| Point::new(p.x, center.y + (p.y - center.y) * squash);
    let f = map(first);
    let mut out = Path::new().move_to(f.x, f.y);
    for p in rest {
        let q = map(p);
        out = out.line_to(q.x, q.y);
    }
    out.close()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_angles_are_proportional() {
        let s = Series::from_values("s", &[30.0, 30.0, 40.0]);
        let slices = slice_angles(&s, 0.0, 1.0);
        let spans: Vec<(f32, f32)> = slices.iter().map(|s| (s.start, s.end)).collect();
        assert_eq!(spans.len(), 3);
        assert!((spans[0].0 - 0.0).abs() < 1e-4 && (spans[0].1 - 108.0).abs() < 1e-3);
        assert!((spans[1].1 - 216.0).abs() < 1e-3);
        assert!((spans[2].1 - 360.0).abs() < 1e-3);
    }

    #[test]
    fn progress_scales_total_sweep() {
        let s = Series::from_values("s", &[1.0, 1.0]);
        let slices = slice_angles(&s, 90.0, 0.5);
        assert_eq!(slices[0].start, 90.0);
        assert!((slices[1].end - 270.0).abs() < 1e-4);
    }

    #[test]
    fn zero_sum_yields_no_slices() {
        let s = Series::from_values("s", &[0.0, 0.0]);
        assert!(slice_angles(&s, 0.0, 1.0).is_empty());
        let s = Series::from_values("s", &[f64::NAN, -3.0]);
        assert!(slice_angles(&s, 0.0, 1.0).is_empty());
    }
}
