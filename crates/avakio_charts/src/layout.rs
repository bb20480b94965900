//! Chart area layout: container minus padding, title block, legend band and
//! axis gutters.

use avakio_core::{Rect, Size};

use crate::config::{ChartConfig, LegendPosition};

pub const TITLE_HEIGHT: f32 = 28.0;
pub const SUBTITLE_HEIGHT: f32 = 18.0;
/// Height of a top/bottom legend band.
pub const LEGEND_BAND: f32 = 28.0;
/// Width of a left/right legend column.
pub const LEGEND_SIDE: f32 = 120.0;
pub const VALUE_GUTTER: f32 = 44.0;
pub const CATEGORY_GUTTER: f32 = 28.0;
pub const AXIS_TITLE: f32 = 18.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    pub container: Rect,
    /// Title and subtitle block.
    pub title: Option<Rect>,
    pub legend: Option<Rect>,
    /// Plot rectangle.
    pub area: Rect,
}

/// Lay out a chart of `size`. `legend_items` is the number of entries the
/// legend would show; no band is reserved when it is zero.
pub fn compute_layout(config: &ChartConfig, size: Size, legend_items: usize) -> ChartLayout {
    let container = size.to_rect();
    let pad = config.padding;
    let mut inner = container.inset_sides(pad.top, pad.right, pad.bottom, pad.left);

    let mut title_h = 0.0;
    if config.title.is_some() {
        title_h += TITLE_HEIGHT;
    }
    if config.subtitle.is_some() {
        title_h += SUBTITLE_HEIGHT;
    }
    let title = (title_h > 0.0).then(|| {
        let h = title_h.min(inner.height());
        let r = Rect::new(inner.x(), inner.y(), inner.width(), h);
        inner = inner.inset_sides(h, 0.0, 0.0, 0.0);
        r
    });

    let legend = (config.legend.show && legend_items > 0).then(|| {
        let r = match config.legend.position {
            LegendPosition::Top => {
                let h = LEGEND_BAND.min(inner.height());
                Rect::new(inner.x(), inner.y(), inner.width(), h)
            }
            LegendPosition::Bottom => {
                let h = LEGEND_BAND.min(inner.height());
                Rect::new(inner.x(), inner.bottom() - h, inner.width(), h)
            }
            LegendPosition::Left => {
                let w = LEGEND_SIDE.min(inner.width());
                Rect::new(inner.x(), inner.y(), w, inner.height())
            }
            LegendPosition::Right => {
                let w = LEGEND_SIDE.min(inner.width());
                Rect::new(inner.right() - w, inner.y(), w, inner.height())
            }
        };
        inner = match config.legend.position {
            LegendPosition::Top => inner.inset_sides(r.height(), 0.0, 0.0, 0.0),
            LegendPosition::Bottom => inner.inset_sides(0.0, 0.0, r.height(), 0.0),
            LegendPosition::Left => inner.inset_sides(0.0, 0.0, 0.0, r.width()),
            LegendPosition::Right => inner.inset_sides(0.0, r.width(), 0.0, 0.0),
        };
        r
    });

    let area = if config.chart_type.is_polar() {
        inner
    } else {
        let (mut left, mut bottom) = (0.0, 0.0);
        let (category_axis, value_axis) = (&config.x_axis, &config.y_axis);
        let horizontal = config.chart_type.is_horizontal();

        // Left gutter holds the values, or the categories of horizontal bars.
        let (left_axis, bottom_axis) = if horizontal {
            (category_axis, value_axis)
        } else {
            (value_axis, category_axis)
        };
        if left_axis.show_labels {
            left += VALUE_GUTTER;
        }
        if left_axis.title.is_some() {
            left += AXIS_TITLE;
        }
        if bottom_axis.show_labels {
            bottom += CATEGORY_GUTTER;
        }
        if bottom_axis.title.is_some() {
            bottom += AXIS_TITLE;
        }
        inner.inset_sides(0.0, 0.0, bottom, left)
    };

    ChartLayout {
        container,
        title,
        legend,
        area,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartType;

    #[test]
    fn cartesian_defaults() {
        let cfg = ChartConfig::new(ChartType::Line, Vec::new());
        let layout = compute_layout(&cfg, Size::new(600.0, 400.0), 1);
        assert_eq!(layout.title, None);
        assert_eq!(layout.legend, Some(Rect::new(20.0, 352.0, 560.0, 28.0)));
        assert_eq!(layout.area, Rect::new(64.0, 20.0, 516.0, 304.0));
    }

    #[test]
    fn title_and_right_legend() {
        let mut cfg = ChartConfig::new(ChartType::Pie, Vec::new());
        cfg.title = Some("Share".into());
        cfg.subtitle = Some("2024".into());
        cfg.legend.position = LegendPosition::Right;
        let layout = compute_layout(&cfg, Size::new(600.0, 400.0), 3);
        assert_eq!(layout.title, Some(Rect::new(20.0, 20.0, 560.0, 46.0)));
        assert_eq!(layout.area, Rect::new(20.0, 66.0, 440.0, 314.0));
    }

    #[test]
    fn no_legend_without_items() {
        let cfg = ChartConfig::new(ChartType::Pie, Vec::new());
        let layout = compute_layout(&cfg, Size::new(200.0, 200.0), 0);
        assert_eq!(layout.legend, None);
        assert_eq!(layout.area, Rect::new(20.0, 20.0, 160.0, 160.0));
    }

    #[test]
    fn tiny_container_never_goes_negative() {
        let cfg = ChartConfig::new(ChartType::Bar, Vec::new());
        let layout = compute_layout(&cfg, Size::new(30.0, 30.0), 2);
        assert!(layout.area.width() >= 0.0);
        assert!(layout.area.height() >= 0.0);
    }
}
