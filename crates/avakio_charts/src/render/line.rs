use avakio_core::{Brush, DrawContext, Point, Stroke, TextAnchor};

use super::{gradient_brush, series_group, Plot};
use crate::config::{ChartType, Series};
use crate::hit::{HitRegion, HitShape};
use crate::scale::CartesianScales;
use crate::shapes::{polyline_path, spline_path};
use crate::stack::StackLayout;

/// Minimum hover radius around a marker.
const HIT_RADIUS: f32 = 8.0;
/// Marker growth while hovered.
const HOVER_GROW: f32 = 3.0;

struct Vertex {
    index: usize,
    category: Option<usize>,
    top: Point,
    bottom: Point,
}

/// Line, spline, area or spline area series.
pub(crate) fn render(
    ctx: &mut dyn DrawContext,
    plot: &mut Plot<'_>,
    scales: &CartesianScales,
    index: usize,
    series: &Series,
    chart_type: ChartType,
    stack: Option<&StackLayout>,
) {
    let is_area = chart_type.is_area();
    let stack = stack.filter(|_| is_area);
    let baseline = scales.baseline_value();
    let categories = scales.x.categories();

    let mut vertices = Vec::with_capacity(series.data.len());
    for (i, p) in series.data.iter().enumerate() {
        if !p.y.is_finite() {
            continue;
        }
        let category = categories.and_then(|c| c.index_of_point(p, i));
        let (lo, hi) = match (stack, category) {
            (Some(stack), Some(cat)) => match stack.segment(index, cat) {
                Some(seg) => (plot.animated(seg.start), plot.animated(seg.end)),
                None => continue,
            },
            _ => (baseline, plot.animated(p.y)),
        };
        let (Some(top), Some(bottom)) = (
            scales.point_px(p, i, hi),
            scales.point_px(p, i, lo),
        ) else {
            continue;
        };
        vertices.push(Vertex {
            index: i,
            category,
            top,
            bottom,
        });
    }

    ctx.push_group(&series_group(series));
    let color = plot.series_color(index, series);
    let tops: Vec<Point> = vertices.iter().map(|v| v.top).collect();
    let line = if chart_type.is_spline() {
        spline_path(&tops)
    } else {
        polyline_path(&tops)
    };

    if is_area && !line.is_empty() {
        let mut fill = line.clone();
        for v in vertices.iter().rev() {
            fill = fill.line_to(v.bottom.x, v.bottom.y);
        }
        let fill = fill.close();
        let brush = if plot.config.gradient {
            gradient_brush(
                color.with_alpha(color.a * series.fill_opacity.max(0.6)),
                scales.area,
                plot.config.gradient_direction,
                0.05,
            )
        } else {
            Brush::Solid(color.with_alpha(color.a * series.fill_opacity))
        };
        ctx.fill_path(&fill, brush);
    }

    if !line.is_empty() && series.line_width > 0.0 {
        ctx.stroke_path(&line, &Stroke::new(series.line_width), Brush::Solid(color));
    }

    for v in &vertices {
        let point = &series.data[v.index];
        let hovered = plot.is_hovered(series, v.index);
        if series.show_markers || hovered {
            let r = series.marker_size + if hovered { HOVER_GROW } else { 0.0 };
            if r > 0.0 {
                ctx.fill_circle(v.top, r, Brush::Solid(plot.point_color(index, series, point)));
                ctx.stroke_circle(
                    v.top,
                    r,
                    &Stroke::new(1.5),
                    Brush::Solid(plot.config.style.background),
                );
            }
        }
        if series.show_labels {
            let style = plot.text_style(11.0).with_anchor(TextAnchor::Middle);
            let at = v.top.offset(0.0, -(series.marker_size + 4.0));
            ctx.draw_text(&plot.value_label(point.y), at, &style);
        }
        plot.hit_regions.push(HitRegion {
            series_key: series.key().to_string(),
            series_index: index,
            point_index: v.index,
            category: v.category,
            shape: HitShape::Circle {
                center: v.top,
                radius: (series.marker_size + 4.0).max(HIT_RADIUS),
            },
            anchor: v.top,
        });
    }
    ctx.pop_group();
}
