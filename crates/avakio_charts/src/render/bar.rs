use avakio_core::{Brush, CornerRadius, DrawContext, Point, Rect, TextAnchor, TextBaseline};

use super::{gradient_brush, series_group, Plot};
use crate::config::Series;
use crate::hit::{HitRegion, HitShape};
use crate::scale::{CartesianScales, Orientation};
use crate::stack::StackLayout;

/// Bars of every bar-typed series, grouped side by side or stacked.
pub(crate) fn render(
    ctx: &mut dyn DrawContext,
    plot: &mut Plot<'_>,
    scales: &CartesianScales,
    series: &[(usize, &Series)],
    stack: Option<&StackLayout>,
) {
    let (Some(band), Some(categories)) = (scales.x.band(), scales.x.categories()) else {
        return;
    };
    if band.count() == 0 || series.is_empty() {
        return;
    }

    let config = plot.config;
    let group = band.step();
    let available = (group - config.bar.offset).max(1.0);
    let slots = if stack.is_some() { 1 } else { series.len() };
    let bar_w = config.bar.width.min(available / slots as f32).max(1.0);
    let horizontal = scales.orientation == Orientation::Horizontal;
    let baseline = scales.baseline_value();

    for (slot, (index, s)) in series.iter().copied().enumerate() {
        ctx.push_group(&series_group(s));
        for (i, p) in s.data.iter().enumerate() {
            if !p.y.is_finite() {
                continue;
            }
            let Some(cat) = categories.index_of_point(p, i) else {
                continue;
            };
            let Some(center) = band.center(cat) else {
                continue;
            };

            let (start, end) = match stack {
                Some(stack) => match stack.segment(index, cat) {
                    Some(seg) => (plot.animated(seg.start), plot.animated(seg.end)),
                    None => continue,
                },
                None => (baseline, scales.y.clamp(plot.animated(p.y))),
            };

            let offset = if stack.is_some() {
                -bar_w * 0.5
            } else {
                -bar_w * slots as f32 * 0.5 + bar_w * slot as f32
            };
            let c0 = center + offset;
            let v0 = scales.value_px(start);
            let v1 = scales.value_px(end);
            let (a, b) = if horizontal {
                (Point::new(v0, c0), Point::new(v1, c0 + bar_w))
            } else {
                (Point::new(c0, v0), Point::new(c0 + bar_w, v1))
            };
            let rect = Rect::from_corners(a, b);

            let radius = if stack.is_some() || end < start {
                CornerRadius::ZERO
            } else if horizontal {
                CornerRadius::right(config.bar.radius)
            } else {
                CornerRadius::top(config.bar.radius)
            }
            .fit(rect.width(), rect.height());

            let hovered = plot.is_hovered(s, i);
            let mut color = plot.point_color(index, s, p);
            if hovered {
                color = color.lighten(0.15);
            }
            let brush = if config.gradient {
                gradient_brush(color, rect, config.gradient_direction, 0.55)
            } else {
                Brush::Solid(color)
            };
            ctx.fill_rect(rect, radius, brush);

            let anchor = scales.to_screen(center + offset + bar_w * 0.5, v1);
            if s.show_labels {
                let style = if horizontal {
                    plot.text_style(11.0)
                        .with_anchor(TextAnchor::Start)
                        .with_baseline(TextBaseline::Middle)
                } else {
                    plot.text_style(11.0)
                        .with_anchor(TextAnchor::Middle)
                        .with_baseline(TextBaseline::Alphabetic)
                };
                let at = if horizontal {
                    anchor.offset(4.0, 0.0)
                } else {
                    anchor.offset(0.0, -4.0)
                };
                ctx.draw_text(&plot.value_label(p.y), at, &style);
            }

            plot.hit_regions.push(HitRegion {
                series_key: s.key().to_string(),
                series_index: index,
                point_index: i,
                category: Some(cat),
                shape: HitShape::Rect(rect),
                anchor,
            });
        }
        ctx.pop_group();
    }
}
