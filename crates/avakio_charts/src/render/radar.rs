use avakio_core::{Brush, DrawContext, Point, Rect, Stroke, TextAnchor, TextBaseline};

use super::{series_group, Plot};
use crate::hit::{HitRegion, HitShape};
use crate::shapes::{polar_to_cartesian, polyline_path};

pub const RING_COUNT: usize = 5;
const LABEL_ROOM: f32 = 24.0;

/// Spoke angle for axis `i` of `n`.
pub fn axis_angle(i: usize, n: usize) -> f32 {
    if n == 0 {
        0.0
    } else {
        i as f32 * 360.0 / n as f32
    }
}

pub(crate) fn render(ctx: &mut dyn DrawContext, plot: &mut Plot<'_>, area: Rect) {
    let config = plot.config;
    let Some((_, first)) = plot.visible.first().copied() else {
        return;
    };
    let axes: Vec<String> = first
        .data
        .iter()
        .enumerate()
        .map(|(i, p)| p.display_name(i))
        .collect();
    let n = axes.len();
    if n == 0 || area.is_empty() {
        return;
    }

    let center = area.center();
    let radius = (area.width().min(area.height()) * 0.5 - LABEL_ROOM).max(1.0);

    ctx.push_group("radar-grid");
    let grid = Brush::Solid(config.style.grid);
    for level in 1..=RING_COUNT {
        let r = radius * level as f32 / RING_COUNT as f32;
        let mut ring: Vec<Point> = (0..n)
            .map(|i| polar_to_cartesian(center, r, axis_angle(i, n)))
            .collect();
        if let Some(first) = ring.first().copied() {
            ring.push(first);
        }
        ctx.stroke_path(&polyline_path(&ring), &Stroke::new(1.0), grid.clone());
    }
    for (i, name) in axes.iter().enumerate() {
        let angle = axis_angle(i, n);
        let tip = polar_to_cartesian(center, radius, angle);
        ctx.stroke_polyline(&[center, tip], &Stroke::new(1.0), grid.clone());

        let at = polar_to_cartesian(center, radius + 10.0, angle);
        let anchor = if (angle - 0.0).abs() < 1.0 || (angle - 180.0).abs() < 1.0 {
            TextAnchor::Middle
        } else if angle < 180.0 {
            TextAnchor::Start
        } else {
            TextAnchor::End
        };
        let style = plot
            .text_style(11.0)
            .with_color(config.style.muted_text)
            .with_anchor(anchor)
            .with_baseline(TextBaseline::Middle);
        ctx.draw_text(name, at, &style);
    }
    ctx.pop_group();

    let max = plot
        .visible
        .iter()
        .flat_map(|(_, s)| s.data.iter().map(|p| p.y))
        .filter(|v| v.is_finite())
        .fold(0.0f64, f64::max);
    let max = if max > 0.0 { max } else { 1.0 };

    // Wedges sit below every marker so markers keep priority.
    let first_region = plot.hit_regions.len();
    let mut wedges = Vec::new();
    let visible = plot.visible.clone();
    for (index, series) in visible {
        let color = plot.series_color(index, series);
        let mut vertices = Vec::with_capacity(n);
        for (i, p) in series.data.iter().take(n).enumerate() {
            if !p.y.is_finite() {
                continue;
            }
            let t = (p.y.max(0.0) / max) as f32 * plot.progress;
            let angle = axis_angle(i, n);
            let r = radius * t;
            vertices.push((i, polar_to_cartesian(center, r, angle)));
            wedges.push(HitRegion {
                series_key: series.key().to_string(),
                series_index: index,
                point_index: i,
                category: Some(i),
                shape: HitShape::Polygon(wedge(center, r, angle, n)),
                anchor: polar_to_cartesian(center, r, angle),
            });
        }

        ctx.push_group(&series_group(series));
        let mut outline: Vec<Point> = vertices.iter().map(|(_, p)| *p).collect();
        if outline.len() >= 2 {
            outline.push(outline[0]);
            let path = polyline_path(&outline).close();
            ctx.fill_path(
                &path,
                Brush::Solid(color.with_alpha(color.a * series.fill_opacity)),
            );
            ctx.stroke_path(&path, &Stroke::new(series.line_width), Brush::Solid(color));
        }
        for (i, p) in &vertices {
            let hovered = plot.is_hovered(series, *i);
            if series.show_markers || hovered {
                let r = series.marker_size + if hovered { 3.0 } else { 0.0 };
                ctx.fill_circle(
                    *p,
                    r,
                    Brush::Solid(plot.point_color(index, series, &series.data[*i])),
                );
            }
            if series.show_labels {
                let style = plot.text_style(11.0).with_anchor(TextAnchor::Middle);
                ctx.draw_text(
                    &plot.value_label(series.data[*i].y),
                    p.offset(0.0, -(series.marker_size + 4.0)),
                    &style,
                );
            }
            plot.hit_regions.push(HitRegion {
                series_key: series.key().to_string(),
                series_index: index,
                point_index: *i,
                category: Some(*i),
                shape: HitShape::Circle {
                    center: *p,
                    radius: (series.marker_size + 4.0).max(8.0),
                },
                anchor: *p,
            });
        }
        ctx.pop_group();
    }
    plot.hit_regions.splice(first_region..first_region, wedges);
}

/// Area around spoke `angle` reaching out to `r`, half-way to each neighbour.
fn wedge(center: Point, r: f32, angle: f32, n: usize) -> Vec<Point> {
    let half = 180.0 / n.max(1) as f32;
    vec![
        center,
        polar_to_cartesian(center, r, angle - half),
        polar_to_cartesian(center, r, angle),
        polar_to_cartesian(center, r, angle + half),
    ]
}
