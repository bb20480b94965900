use avakio_core::{Brush, Color, CornerRadius, DrawContext, Point, Rect, TextBaseline};

use super::{text_width, Plot};
use crate::config::{LegendAlign, LegendPosition};

const SWATCH: f32 = 10.0;
const SWATCH_GAP: f32 = 6.0;
const ITEM_GAP: f32 = 16.0;
const ROW_HEIGHT: f32 = 20.0;
const HIDDEN_ALPHA: f32 = 0.3;

#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    /// Series key, or the slice name on pie charts.
    pub key: String,
    pub label: String,
    pub color: Color,
    pub hidden: bool,
    /// Clicking toggles the series.
    pub toggleable: bool,
    /// Clickable bounds, set once laid out.
    pub rect: Rect,
}

/// Legend entries before layout: every configured series, or the slices of
/// the first visible series on pie charts.
pub(crate) fn entries(plot: &Plot<'_>) -> Vec<LegendItem> {
    let config = plot.config;
    if config.chart_type.is_pie() {
        let Some((_, series)) = plot.visible.first() else {
            return Vec::new();
        };
        return series
            .data
            .iter()
            .enumerate()
            .filter(|(_, p)| p.y.is_finite() && p.y > 0.0)
            .map(|(i, p)| LegendItem {
                key: p.display_name(i),
                label: p.display_name(i),
                color: plot.slice_color(i, p),
                hidden: false,
                toggleable: false,
                rect: Rect::default(),
            })
            .collect();
    }

    config
        .series
        .iter()
        .enumerate()
        .map(|(i, s)| LegendItem {
            key: s.key().to_string(),
            label: if s.name.is_empty() {
                s.key().to_string()
            } else {
                s.name.clone()
            },
            color: plot.series_color(i, s),
            hidden: plot.state.is_hidden(s.key()),
            toggleable: config.legend.toggle_on_click,
            rect: Rect::default(),
        })
        .collect()
}

pub(crate) fn render(
    ctx: &mut dyn DrawContext,
    plot: &Plot<'_>,
    mut items: Vec<LegendItem>,
    bounds: Rect,
) -> Vec<LegendItem> {
    let config = plot.config;
    let style = plot.text_style(config.style.font_size).with_baseline(TextBaseline::Middle);
    let widths: Vec<f32> = items
        .iter()
        .map(|item| SWATCH + SWATCH_GAP + text_width(ctx, &item.label, &style))
        .collect();

    match config.legend.position {
        LegendPosition::Top | LegendPosition::Bottom => {
            let total: f32 =
                widths.iter().sum::<f32>() + ITEM_GAP * items.len().saturating_sub(1) as f32;
            let mut x = match config.legend.align {
                LegendAlign::Start => bounds.x(),
                LegendAlign::Center => bounds.x() + ((bounds.width() - total) * 0.5).max(0.0),
                LegendAlign::End => (bounds.right() - total).max(bounds.x()),
            };
            let y = bounds.center().y - ROW_HEIGHT * 0.5;
            for (item, w) in items.iter_mut().zip(&widths) {
                item.rect = Rect::new(x, y, *w, ROW_HEIGHT);
                x += w + ITEM_GAP;
            }
        }
        LegendPosition::Left | LegendPosition::Right => {
            let total = ROW_HEIGHT * items.len() as f32;
            let mut y = match config.legend.align {
                LegendAlign::Start => bounds.y(),
                LegendAlign::Center => bounds.y() + ((bounds.height() - total) * 0.5).max(0.0),
                LegendAlign::End => (bounds.bottom() - total).max(bounds.y()),
            };
            let x = bounds.x() + 8.0;
            for (item, w) in items.iter_mut().zip(&widths) {
                item.rect = Rect::new(x, y, *w, ROW_HEIGHT);
                y += ROW_HEIGHT;
            }
        }
    }

    ctx.push_group("legend");
    for item in &items {
        let (swatch, text) = if item.hidden {
            (
                item.color.with_alpha(item.color.a * HIDDEN_ALPHA),
                config.style.muted_text,
            )
        } else {
            (item.color, config.style.text)
        };
        let cy = item.rect.center().y;
        ctx.fill_rect(
            Rect::new(item.rect.x(), cy - SWATCH * 0.5, SWATCH, SWATCH),
            CornerRadius::uniform(2.0),
            Brush::Solid(swatch),
        );
        ctx.draw_text(
            &item.label,
            Point::new(item.rect.x() + SWATCH + SWATCH_GAP, cy),
            &style.clone().with_color(text),
        );
    }
    ctx.pop_group();
    items
}

/// Legend item under `p`.
pub fn legend_item_at(items: &[LegendItem], p: Point) -> Option<&LegendItem> {
    items.iter().find(|item| item.rect.contains(p))
}
