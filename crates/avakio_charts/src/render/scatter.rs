use avakio_core::{Brush, DrawContext, Stroke, TextAnchor};

use super::{series_group, Plot};
use crate::config::Series;
use crate::hit::{HitRegion, HitShape};
use crate::scale::CartesianScales;

pub(crate) fn render(
    ctx: &mut dyn DrawContext,
    plot: &mut Plot<'_>,
    scales: &CartesianScales,
    index: usize,
    series: &Series,
) {
    ctx.push_group(&series_group(series));
    let categories = scales.x.categories();
    for (i, p) in series.data.iter().enumerate() {
        if !p.y.is_finite() {
            continue;
        }
        let Some(center) = scales.point_px(p, i, plot.animated(p.y)) else {
            continue;
        };
        let hovered = plot.is_hovered(series, i);
        let radius = series.marker_size.max(1.0) + if hovered { 3.0 } else { 0.0 };
        let color = plot.point_color(index, series, p);

        ctx.fill_circle(center, radius, Brush::Solid(color.with_alpha(color.a * 0.85)));
        if hovered {
            ctx.stroke_circle(center, radius, &Stroke::new(2.0), Brush::Solid(color));
        }
        if series.show_labels {
            let style = plot.text_style(11.0).with_anchor(TextAnchor::Middle);
            ctx.draw_text(
                &plot.value_label(p.y),
                center.offset(0.0, -(radius + 4.0)),
                &style,
            );
        }

        plot.hit_regions.push(HitRegion {
            series_key: series.key().to_string(),
            series_index: index,
            point_index: i,
            category: categories.and_then(|c| c.index_of_point(p, i)),
            shape: HitShape::Circle {
                center,
                radius: radius + 3.0,
            },
            anchor: center,
        });
    }
    ctx.pop_group();
}
