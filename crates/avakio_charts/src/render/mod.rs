//! One render pass: bounds, scales, geometry and draw calls, computed from a
//! single snapshot of configuration and interaction state.

mod axes;
mod bar;
mod legend;
mod line;
mod pie;
mod radar;
mod scatter;
mod tooltip;

use avakio_core::{
    Brush, Color, CornerRadius, DrawContext, Gradient, GradientStop, Point, Rect, Size,
    TextAnchor, TextBaseline, TextStyle,
};

use crate::config::{ChartConfig, ChartType, DataPoint, GradientDirection, Series};
use crate::hit::HitRegion;
use crate::interaction::ChartInstanceState;
use crate::layout::{compute_layout, ChartLayout};
use crate::scale::{CartesianScales, Categories};
use crate::stack::StackLayout;

pub use legend::{legend_item_at, LegendItem};
pub use pie::{slice_angles, PieGeometry, PieSlice};
pub use tooltip::{tooltip_text, Tooltip, TOOLTIP_OFFSET};

/// Inputs of one render pass.
pub struct RenderInput<'a> {
    pub config: &'a ChartConfig,
    pub state: &'a ChartInstanceState,
    pub size: Size,
    /// Animation progress in `[0, 1]`.
    pub progress: f32,
}

/// Geometry produced by a render pass, kept for hit-testing and inspection.
#[derive(Clone, Debug, Default)]
pub struct ChartFrame {
    pub layout: Option<ChartLayout>,
    pub scales: Option<CartesianScales>,
    pub pie: Option<PieGeometry>,
    pub hit_regions: Vec<HitRegion>,
    pub legend: Vec<LegendItem>,
    pub tooltip: Option<Tooltip>,
    pub progress: f32,
}

/// Shared state for the per-type renderers.
pub(crate) struct Plot<'a> {
    pub config: &'a ChartConfig,
    pub state: &'a ChartInstanceState,
    pub visible: Vec<(usize, &'a Series)>,
    pub palette: Vec<Color>,
    pub progress: f32,
    pub hit_regions: Vec<HitRegion>,
}

impl<'a> Plot<'a> {
    fn new(config: &'a ChartConfig, state: &'a ChartInstanceState, progress: f32) -> Self {
        Self {
            config,
            state,
            visible: state.visible(&config.series),
            palette: config.resolved_palette(),
            progress: progress.clamp(0.0, 1.0),
            hit_regions: Vec::new(),
        }
    }

    pub fn palette_color(&self, index: usize) -> Color {
        match self.palette.len() {
            0 => Color::BLACK,
            n => self.palette[index % n],
        }
    }

    /// Series color, or the palette entry at its configured position.
    pub fn series_color(&self, index: usize, series: &Series) -> Color {
        series
            .color
            .as_deref()
            .and_then(|c| Color::parse(c).ok())
            .unwrap_or_else(|| self.palette_color(index))
    }

    pub fn point_color(&self, index: usize, series: &Series, point: &DataPoint) -> Color {
        point
            .color
            .as_deref()
            .and_then(|c| Color::parse(c).ok())
            .unwrap_or_else(|| self.series_color(index, series))
    }

    /// Pie slices take palette colors by point position.
    pub fn slice_color(&self, point_index: usize, point: &DataPoint) -> Color {
        point
            .color
            .as_deref()
            .and_then(|c| Color::parse(c).ok())
            .unwrap_or_else(|| self.palette_color(point_index))
    }

    pub fn is_hovered(&self, series: &Series, point_index: usize) -> bool {
        self.state
            .hover()
            .is_some_and(|h| h.series_key == series.key() && h.point_index == point_index)
    }

    /// `y` scaled by animation progress.
    pub fn animated(&self, y: f64) -> f64 {
        y * self.progress as f64
    }

    pub fn value_label(&self, y: f64) -> String {
        value_label(self.config, y)
    }

    pub fn text_style(&self, size: f32) -> TextStyle {
        TextStyle::new(size).with_color(self.config.style.text)
    }
}

/// Text for a data label or tooltip value.
pub fn value_label(config: &ChartConfig, y: f64) -> String {
    match &config.y_axis.label_formatter {
        Some(f) => f.format(y),
        None => crate::format::format_number(y),
    }
}

pub(crate) fn series_group(series: &Series) -> String {
    format!("series:{}", series.key())
}

// Fallback width used only when backend text measurement is unavailable.
const AVG_CHAR_WIDTH_EM: f32 = 0.6;

pub(crate) fn text_width(ctx: &mut dyn DrawContext, text: &str, style: &TextStyle) -> f32 {
    ctx.measure_text(text, style)
        .map(|size| size.width)
        .unwrap_or(text.chars().count() as f32 * style.size * AVG_CHAR_WIDTH_EM)
}

/// Render a chart into `ctx` and return the geometry needed for hit-testing.
pub fn render_chart(ctx: &mut dyn DrawContext, input: &RenderInput<'_>) -> ChartFrame {
    let config = input.config;
    let mut plot = Plot::new(config, input.state, input.progress);
    tracing::trace!(
        chart_type = ?config.chart_type,
        visible = plot.visible.len(),
        progress = plot.progress,
        "render pass"
    );

    let mut frame = ChartFrame {
        progress: plot.progress,
        ..ChartFrame::default()
    };
    if input.size.is_empty() {
        return frame;
    }

    let entries = legend::entries(&plot);
    let layout = compute_layout(config, input.size, entries.len());

    ctx.fill_rect(
        layout.container,
        CornerRadius::default(),
        Brush::Solid(config.style.background),
    );
    draw_title(ctx, config, &layout);

    if config.chart_type.is_pie() {
        frame.pie = pie::render(ctx, &mut plot, layout.area);
    } else if config.chart_type == ChartType::Radar {
        radar::render(ctx, &mut plot, layout.area);
    } else {
        frame.scales = render_cartesian(ctx, &mut plot, layout.area);
    }

    if let Some(rect) = layout.legend {
        frame.legend = legend::render(ctx, &plot, entries, rect);
    }
    if config.tooltip.show {
        frame.tooltip = tooltip::render(ctx, &plot, layout.container);
    }

    frame.layout = Some(layout);
    frame.hit_regions = plot.hit_regions;
    frame
}

fn render_cartesian(
    ctx: &mut dyn DrawContext,
    plot: &mut Plot<'_>,
    area: Rect,
) -> Option<CartesianScales> {
    let config = plot.config;
    let visible: Vec<&Series> = plot.visible.iter().map(|(_, s)| *s).collect();
    let categories = Categories::from_series(visible.iter().copied());

    let bar_series: Vec<(usize, &Series)> = plot
        .visible
        .iter()
        .filter(|(_, s)| config.series_type(s).is_bar())
        .copied()
        .collect();
    let area_series: Vec<(usize, &Series)> = plot
        .visible
        .iter()
        .filter(|(_, s)| config.series_type(s).is_area())
        .copied()
        .collect();

    let bar_stack = config
        .is_stacked()
        .then(|| StackLayout::build(bar_series.iter().copied(), &categories));
    let area_stack = config
        .stacked
        .then(|| StackLayout::build(area_series.iter().copied(), &categories));

    let mut extents = Vec::new();
    for stack in bar_stack.iter().chain(area_stack.iter()) {
        extents.extend(stack.extents());
    }

    let scales = CartesianScales::build(config, &visible, &extents, area)?;
    // Nothing visible: no grid or axes over an invented domain.
    if area.is_empty() || visible.is_empty() {
        return Some(scales);
    }

    ctx.push_group("grid");
    axes::draw_grid(ctx, config, &scales);
    ctx.pop_group();

    if !bar_series.is_empty() {
        bar::render(ctx, plot, &scales, &bar_series, bar_stack.as_ref());
    }
    let others: Vec<(usize, &Series)> = plot
        .visible
        .iter()
        .filter(|(_, s)| !config.series_type(s).is_bar())
        .copied()
        .collect();
    for (index, series) in others {
        match config.series_type(series) {
            ChartType::Scatter => scatter::render(ctx, plot, &scales, index, series),
            t => line::render(ctx, plot, &scales, index, series, t, area_stack.as_ref()),
        }
    }

    ctx.push_group("axes");
    axes::draw_axes(ctx, config, &scales);
    ctx.pop_group();

    Some(scales)
}

fn draw_title(ctx: &mut dyn DrawContext, config: &ChartConfig, layout: &ChartLayout) {
    let Some(rect) = layout.title else {
        return;
    };
    ctx.push_group("title");
    let cx = rect.center().x;
    let mut y = rect.y();
    if let Some(title) = &config.title {
        let style = TextStyle::new(config.style.font_size + 4.0)
            .with_color(config.style.text)
            .bold()
            .with_anchor(TextAnchor::Middle)
            .with_baseline(TextBaseline::Middle);
        ctx.draw_text(title, Point::new(cx, y + crate::layout::TITLE_HEIGHT * 0.5), &style);
        y += crate::layout::TITLE_HEIGHT;
    }
    if let Some(subtitle) = &config.subtitle {
        let style = TextStyle::new(config.style.font_size)
            .with_color(config.style.muted_text)
            .with_anchor(TextAnchor::Middle)
            .with_baseline(TextBaseline::Middle);
        ctx.draw_text(
            subtitle,
            Point::new(cx, y + crate::layout::SUBTITLE_HEIGHT * 0.5),
            &style,
        );
    }
    ctx.pop_group();
}

/// Linear gradient across `rect` from `color` to a faded copy of it.
pub(crate) fn gradient_brush(
    color: Color,
    rect: Rect,
    direction: GradientDirection,
    fade_to: f32,
) -> Brush {
    let (start, end) = match direction {
        GradientDirection::Vertical => (
            Point::new(rect.x(), rect.y()),
            Point::new(rect.x(), rect.bottom()),
        ),
        GradientDirection::Horizontal => (
            Point::new(rect.x(), rect.y()),
            Point::new(rect.right(), rect.y()),
        ),
    };
    Brush::Gradient(Gradient {
        start,
        end,
        stops: vec![
            GradientStop::new(0.0, color),
            GradientStop::new(1.0, color.with_alpha(color.a * fade_to)),
        ],
    })
}
