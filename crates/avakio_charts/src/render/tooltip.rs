use avakio_core::{Brush, CornerRadius, DrawContext, Point, Rect, TextBaseline};

use super::{text_width, value_label, Plot};
use crate::config::{ChartConfig, DataPoint, Series};

/// Gap between the pointer and the tooltip box.
pub const TOOLTIP_OFFSET: f32 = 10.0;
const LINE_HEIGHT: f32 = 16.0;
const PAD: f32 = 8.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    /// Tooltip box in container coordinates.
    pub rect: Rect,
    pub lines: Vec<String>,
}

/// Tooltip text for one point: the point's own override, then the
/// configured formatter, then `name: value`.
pub fn tooltip_text(config: &ChartConfig, series: &Series, point: &DataPoint) -> String {
    if let Some(text) = &point.tooltip {
        return text.clone();
    }
    if let Some(formatter) = &config.tooltip.formatter {
        return formatter.format(point, series);
    }
    let name = match (&point.label, config.chart_type.is_pie()) {
        (Some(label), true) => label.as_str(),
        _ if series.name.is_empty() => series.key(),
        _ => series.name.as_str(),
    };
    format!("{}: {}", name, value_label(config, point.y))
}

pub(crate) fn render(
    ctx: &mut dyn DrawContext,
    plot: &Plot<'_>,
    container: Rect,
) -> Option<Tooltip> {
    let hover = plot.state.hover()?;
    let region = plot.hit_regions.iter().find(|r| {
        r.series_key == hover.series_key && r.point_index == hover.point_index
    })?;
    let (_, series) = plot
        .visible
        .iter()
        .find(|(_, s)| s.key() == hover.series_key)
        .copied()?;
    let point = series.data.get(hover.point_index)?;

    let lines = match region.category {
        Some(cat) if plot.config.tooltip.shared && !plot.config.chart_type.is_pie() => plot
            .hit_regions
            .iter()
            .filter(|r| r.category == Some(cat))
            .filter_map(|r| {
                let (_, s) = plot
                    .visible
                    .iter()
                    .find(|(i, _)| *i == r.series_index)
                    .copied()?;
                Some(tooltip_text(plot.config, s, s.data.get(r.point_index)?))
            })
            .collect(),
        _ => vec![tooltip_text(plot.config, series, point)],
    };
    if lines.is_empty() {
        return None;
    }

    let style = plot
        .text_style(plot.config.style.font_size)
        .with_color(plot.config.style.tooltip_text)
        .with_baseline(TextBaseline::Middle);
    let width = lines
        .iter()
        .map(|l| text_width(ctx, l, &style))
        .fold(0.0f32, f32::max)
        + PAD * 2.0;
    let height = LINE_HEIGHT * lines.len() as f32 + PAD;

    let at = plot.state.pointer().unwrap_or(region.anchor);
    let mut x = at.x + TOOLTIP_OFFSET;
    let mut y = at.y + TOOLTIP_OFFSET;
    if x + width > container.right() {
        x = (at.x - TOOLTIP_OFFSET - width).max(container.x());
    }
    if y + height > container.bottom() {
        y = (at.y - TOOLTIP_OFFSET - height).max(container.y());
    }
    let rect = Rect::new(x, y, width, height);

    ctx.push_group("tooltip");
    ctx.fill_rect(
        rect,
        CornerRadius::uniform(4.0),
        Brush::Solid(plot.config.style.tooltip_bg),
    );
    for (i, line) in lines.iter().enumerate() {
        let cy = y + PAD * 0.5 + LINE_HEIGHT * (i as f32 + 0.5);
        ctx.draw_text(line, Point::new(x + PAD, cy), &style);
    }
    ctx.pop_group();

    Some(Tooltip { rect, lines })
}
