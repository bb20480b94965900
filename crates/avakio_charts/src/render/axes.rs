use avakio_core::{
    Brush, CornerRadius, DrawContext, Point, Rect, Stroke, TextAnchor, TextBaseline, TextStyle,
};

use crate::bounds::compute_bounds;
use crate::config::{AxisConfig, ChartConfig};
use crate::layout::{AXIS_TITLE, CATEGORY_GUTTER, VALUE_GUTTER};
use crate::scale::{CartesianScales, Orientation, XScale};

const TICK_LEN: f32 = 4.0;
const LABEL_GAP: f32 = 6.0;

/// Tick on either axis, in pixels along that axis.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct AxisTick {
    pub px: f32,
    pub label: String,
}

pub(crate) fn value_ticks(config: &ChartConfig, scales: &CartesianScales) -> Vec<AxisTick> {
    scales
        .bounds
        .ticks
        .iter()
        .map(|v| AxisTick {
            px: scales.value_px(*v),
            label: config.y_axis.format(*v),
        })
        .collect()
}

pub(crate) fn category_ticks(config: &ChartConfig, scales: &CartesianScales) -> Vec<AxisTick> {
    match &scales.x {
        XScale::Band { scale, categories } => (0..categories.len())
            .filter_map(|i| {
                Some(AxisTick {
                    px: scale.center(i)?,
                    label: categories.label(i)?.to_string(),
                })
            })
            .collect(),
        XScale::Linear(scale) => {
            let (lo, hi) = scale.domain();
            compute_bounds(&[lo, hi], config.x_axis.step)
                .ticks
                .into_iter()
                .filter(|v| *v >= lo - 1e-9 && *v <= hi + 1e-9)
                .map(|v| AxisTick {
                    px: scale.map(v),
                    label: config.x_axis.format(v),
                })
                .collect()
        }
    }
}

fn hline(ctx: &mut dyn DrawContext, x0: f32, x1: f32, y: f32, brush: Brush) {
    ctx.fill_rect(
        Rect::new(x0.min(x1), y, (x1 - x0).abs(), 1.0),
        CornerRadius::default(),
        brush,
    );
}

fn vline(ctx: &mut dyn DrawContext, x: f32, y0: f32, y1: f32, brush: Brush) {
    ctx.fill_rect(
        Rect::new(x, y0.min(y1), 1.0, (y1 - y0).abs()),
        CornerRadius::default(),
        brush,
    );
}

pub(crate) fn draw_grid(ctx: &mut dyn DrawContext, config: &ChartConfig, scales: &CartesianScales) {
    let area = scales.area;
    let grid = Brush::Solid(config.style.grid);
    let horizontal = scales.orientation == Orientation::Horizontal;

    if config.y_axis.show_grid {
        for tick in value_ticks(config, scales) {
            if horizontal {
                vline(ctx, tick.px, area.y(), area.bottom(), grid.clone());
            } else {
                hline(ctx, area.x(), area.right(), tick.px, grid.clone());
            }
        }
    }
    if config.x_axis.show_grid {
        for tick in category_ticks(config, scales) {
            if horizontal {
                hline(ctx, area.x(), area.right(), tick.px, grid.clone());
            } else {
                vline(ctx, tick.px, area.y(), area.bottom(), grid.clone());
            }
        }
    }
}

/// Axis lines, ticks, labels and titles.
pub(crate) fn draw_axes(ctx: &mut dyn DrawContext, config: &ChartConfig, scales: &CartesianScales) {
    let (left, bottom) = match scales.orientation {
        Orientation::Vertical => (
            (&config.y_axis, value_ticks(config, scales)),
            (&config.x_axis, category_ticks(config, scales)),
        ),
        Orientation::Horizontal => (
            (&config.x_axis, category_ticks(config, scales)),
            (&config.y_axis, value_ticks(config, scales)),
        ),
    };
    draw_left_axis(ctx, config, scales.area, left.0, &left.1);
    draw_bottom_axis(ctx, config, scales.area, bottom.0, &bottom.1);
}

fn draw_left_axis(
    ctx: &mut dyn DrawContext,
    config: &ChartConfig,
    area: Rect,
    axis: &AxisConfig,
    ticks: &[AxisTick],
) {
    let line = Brush::Solid(config.style.axis);
    if axis.show_line {
        ctx.stroke_polyline(
            &[Point::new(area.x(), area.y()), Point::new(area.x(), area.bottom())],
            &Stroke::new(1.0),
            line.clone(),
        );
    }
    let style = TextStyle::new(config.style.font_size - 1.0)
        .with_color(config.style.muted_text)
        .with_anchor(TextAnchor::End)
        .with_baseline(TextBaseline::Middle)
        .with_rotation(axis.label_rotation);
    for tick in ticks {
        if axis.show_ticks {
            hline(ctx, area.x() - TICK_LEN, area.x(), tick.px, line.clone());
        }
        if axis.show_labels {
            ctx.draw_text(
                &tick.label,
                Point::new(area.x() - TICK_LEN - LABEL_GAP, tick.px),
                &style,
            );
        }
    }
    if let Some(title) = &axis.title {
        let gutter = if axis.show_labels { VALUE_GUTTER } else { 0.0 };
        let x = area.x() - gutter - AXIS_TITLE * 0.5;
        let style = TextStyle::new(config.style.font_size)
            .with_color(config.style.text)
            .with_anchor(TextAnchor::Middle)
            .with_baseline(TextBaseline::Middle)
            .with_rotation(-90.0);
        ctx.draw_text(title, Point::new(x, area.center().y), &style);
    }
}

fn draw_bottom_axis(
    ctx: &mut dyn DrawContext,
    config: &ChartConfig,
    area: Rect,
    axis: &AxisConfig,
    ticks: &[AxisTick],
) {
    let line = Brush::Solid(config.style.axis);
    if axis.show_line {
        ctx.stroke_polyline(
            &[
                Point::new(area.x(), area.bottom()),
                Point::new(area.right(), area.bottom()),
            ],
            &Stroke::new(1.0),
            line.clone(),
        );
    }
    let anchor = if axis.label_rotation == 0.0 {
        TextAnchor::Middle
    } else {
        TextAnchor::End
    };
    let style = TextStyle::new(config.style.font_size - 1.0)
        .with_color(config.style.muted_text)
        .with_anchor(anchor)
        .with_baseline(TextBaseline::Hanging)
        .with_rotation(axis.label_rotation);
    for tick in ticks {
        if axis.show_ticks {
            vline(ctx, tick.px, area.bottom(), area.bottom() + TICK_LEN, line.clone());
        }
        if axis.show_labels {
            ctx.draw_text(
                &tick.label,
                Point::new(tick.px, area.bottom() + TICK_LEN + LABEL_GAP),
                &style,
            );
        }
    }
    if let Some(title) = &axis.title {
        let gutter = if axis.show_labels { CATEGORY_GUTTER } else { 0.0 };
        let y = area.bottom() + gutter + AXIS_TITLE * 0.5;
        let style = TextStyle::new(config.style.font_size)
            .with_color(config.style.text)
            .with_anchor(TextAnchor::Middle)
            .with_baseline(TextBaseline::Middle);
        ctx.draw_text(title, Point::new(area.center().x, y), &style);
    }
}
