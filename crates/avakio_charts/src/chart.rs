//! Chart instance and its shareable handle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use avakio_animation::{AnimationProgress, FrameScheduler, FrameStatus};
use avakio_core::{DrawContext, Point, Size};

use crate::config::{ChartConfig, DataPoint, Series};
use crate::error::ExportError;
use crate::export::{self, ImageFormat, SvgContext};
use crate::hit::hit_test;
use crate::interaction::{ChartInstanceState, HoverTarget};
use crate::render::{legend_item_at, render_chart, ChartFrame, RenderInput};

pub type PointClickCallback = Box<dyn Fn(&DataPoint, &Series, usize) + Send>;
pub type PointHoverCallback =
    Box<dyn Fn(Option<&DataPoint>, Option<&Series>, Option<usize>) + Send>;
/// Receives the clicked series and its visibility after the click.
pub type LegendClickCallback = Box<dyn Fn(&Series, bool) + Send>;

/// One chart: configuration, interaction state, animation and the geometry
/// of the last render.
pub struct AvakioChart {
    config: ChartConfig,
    state: ChartInstanceState,
    progress: AnimationProgress,
    size: Size,
    frame: ChartFrame,
    on_point_click: Option<PointClickCallback>,
    on_point_hover: Option<PointHoverCallback>,
    on_legend_click: Option<LegendClickCallback>,
}

impl std::fmt::Debug for AvakioChart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvakioChart")
            .field("chart_type", &self.config.chart_type)
            .field("series", &self.config.series.len())
            .field("size", &self.size)
            .field("progress", &self.progress.value())
            .finish_non_exhaustive()
    }
}

impl AvakioChart {
    pub fn new(config: ChartConfig) -> Self {
        let progress = AnimationProgress::new(
            config.animation.enabled,
            Duration::from_millis(config.animation.duration),
        );
        let chart = Self {
            state: ChartInstanceState::new(&config.series),
            size: Size::new(config.width.max(0.0), config.height.max(0.0)),
            progress,
            frame: ChartFrame::default(),
            on_point_click: None,
            on_point_hover: None,
            on_legend_click: None,
            config,
        };
        chart.report_diagnostics();
        chart
    }

    pub fn with_on_point_click(
        mut self,
        f: impl Fn(&DataPoint, &Series, usize) + Send + 'static,
    ) -> Self {
        self.on_point_click = Some(Box::new(f));
        self
    }

    pub fn with_on_point_hover(
        mut self,
        f: impl Fn(Option<&DataPoint>, Option<&Series>, Option<usize>) + Send + 'static,
    ) -> Self {
        self.on_point_hover = Some(Box::new(f));
        self
    }

    pub fn with_on_legend_click(mut self, f: impl Fn(&Series, bool) + Send + 'static) -> Self {
        self.on_legend_click = Some(Box::new(f));
        self
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn state(&self) -> &ChartInstanceState {
        &self.state
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    /// Geometry of the last render.
    pub fn frame(&self) -> &ChartFrame {
        &self.frame
    }

    fn report_diagnostics(&self) {
        for warning in self.config.diagnostics() {
            tracing::warn!(%warning, "chart configuration");
        }
    }

    /// Replace the configuration and restart the animation. Returns the new
    /// animation generation.
    pub fn set_config(&mut self, config: ChartConfig) -> u64 {
        tracing::debug!(
            chart_type = ?config.chart_type,
            series = config.series.len(),
            "chart configuration changed"
        );
        self.state.sync_series(&config.series);
        self.progress.configure(
            config.animation.enabled,
            Duration::from_millis(config.animation.duration),
        );
        self.size = Size::new(config.width.max(0.0), config.height.max(0.0));
        self.config = config;
        self.report_diagnostics();
        self.progress.restart()
    }

    /// Replace the series data and restart the animation.
    pub fn set_series(&mut self, series: Vec<Series>) -> u64 {
        let mut config = self.config.clone();
        config.series = series;
        self.set_config(config)
    }

    /// Container resize. Does not restart the animation.
    pub fn set_size(&mut self, size: Size) {
        self.size = Size::new(size.width.max(0.0), size.height.max(0.0));
        self.config.width = self.size.width;
        self.config.height = self.size.height;
    }

    pub fn show_series(&mut self, key: &str) -> bool {
        self.state.show(key)
    }

    pub fn hide_series(&mut self, key: &str) -> bool {
        self.state.hide(key)
    }

    /// Returns the resulting visibility.
    pub fn toggle_series(&mut self, key: &str) -> bool {
        self.state.toggle(key)
    }

    /// Keys of the visible series in configuration order.
    pub fn visible_series(&self) -> Vec<String> {
        self.state.visible_keys(&self.config.series)
    }

    pub fn restart_animation(&mut self) -> u64 {
        tracing::debug!("animation started");
        self.progress.restart()
    }

    pub fn advance_animation(&mut self, generation: u64, now: Duration) -> FrameStatus {
        let status = self.progress.advance(generation, now);
        if status == FrameStatus::Finished {
            tracing::debug!(generation, "animation finished");
        }
        status
    }

    /// Re-render at the final state without animating.
    pub fn refresh(&mut self) {
        self.progress.restart();
        self.progress.finish();
    }

    /// Render into `ctx` and remember the geometry for hit-testing.
    pub fn render(&mut self, ctx: &mut dyn DrawContext) -> &ChartFrame {
        self.frame = render_chart(
            ctx,
            &RenderInput {
                config: &self.config,
                state: &self.state,
                size: self.size,
                progress: self.progress.value(),
            },
        );
        &self.frame
    }

    /// Render the current state as a standalone SVG document.
    pub fn to_svg(&mut self) -> String {
        let mut ctx = SvgContext::new(self.size);
        self.render(&mut ctx);
        ctx.finish()
    }

    /// Update hover from a pointer position in container coordinates.
    /// Returns `true` when the hovered point changed.
    pub fn on_pointer_move(&mut self, pos: Point) -> bool {
        let target = hit_test(&self.frame.hit_regions, pos).map(|r| HoverTarget {
            series_key: r.series_key.clone(),
            point_index: r.point_index,
        });
        let changed = self.state.set_hover(target, Some(pos));
        if changed {
            tracing::trace!(hover = ?self.state.hover(), "hover changed");
            self.notify_hover();
        }
        changed
    }

    pub fn on_pointer_leave(&mut self) -> bool {
        let changed = self.state.hover().is_some();
        self.state.clear_hover();
        if changed {
            self.notify_hover();
        }
        changed
    }

    fn notify_hover(&self) {
        let Some(cb) = &self.on_point_hover else {
            return;
        };
        let hit = self.state.hover().and_then(|h| {
            let series = self.config.series.iter().find(|s| s.key() == h.series_key)?;
            Some((series.data.get(h.point_index)?, series, h.point_index))
        });
        match hit {
            Some((point, series, index)) => cb(Some(point), Some(series), Some(index)),
            None => cb(None, None, None),
        }
    }

    /// Route a click: legend items first, then data points.
    pub fn on_click(&mut self, pos: Point) {
        if let Some(item) = legend_item_at(&self.frame.legend, pos) {
            if !item.toggleable {
                return;
            }
            let key = item.key.clone();
            let visible = self.state.toggle(&key);
            tracing::debug!(series = %key, visible, "legend toggled series");
            if let (Some(cb), Some(series)) = (
                &self.on_legend_click,
                self.config.series.iter().find(|s| s.key() == key),
            ) {
                cb(series, visible);
            }
            return;
        }

        let Some(region) = hit_test(&self.frame.hit_regions, pos) else {
            return;
        };
        let Some(cb) = &self.on_point_click else {
            return;
        };
        if let Some(series) = self.config.series.get(region.series_index) {
            if let Some(point) = series.data.get(region.point_index) {
                cb(point, series, region.point_index);
            }
        }
    }
}

/// Shared, thread-safe handle to a chart, with an optional frame source for
/// animation.
#[derive(Clone)]
pub struct ChartHandle {
    inner: Arc<Mutex<AvakioChart>>,
    scheduler: Option<Arc<dyn FrameScheduler>>,
}

impl ChartHandle {
    pub fn new(chart: AvakioChart) -> Self {
        Self {
            inner: Arc::new(Mutex::new(chart)),
            scheduler: None,
        }
    }

    pub fn with_scheduler(chart: AvakioChart, scheduler: Arc<dyn FrameScheduler>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(chart)),
            scheduler: Some(scheduler),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, AvakioChart> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Initial animation.
    pub fn mount(&self) {
        self.start_animation();
    }

    /// Restart the animation and drive it from the scheduler. Without a
    /// scheduler the chart jumps to its final state.
    pub fn start_animation(&self) {
        let generation = self.lock().restart_animation();
        self.drive(generation);
    }

    fn drive(&self, generation: u64) {
        match &self.scheduler {
            Some(scheduler) => {
                schedule_frame(Arc::downgrade(&self.inner), scheduler.clone(), generation)
            }
            None => self.lock().refresh(),
        }
    }

    pub fn set_config(&self, config: ChartConfig) {
        let generation = self.lock().set_config(config);
        self.drive(generation);
    }

    pub fn set_series(&self, series: Vec<Series>) {
        let generation = self.lock().set_series(series);
        self.drive(generation);
    }

    pub fn set_size(&self, size: Size) {
        self.lock().set_size(size);
    }

    /// Measured container size.
    pub fn container_size(&self) -> Size {
        self.lock().size()
    }

    pub fn show_series(&self, key: &str) -> bool {
        self.lock().show_series(key)
    }

    pub fn hide_series(&self, key: &str) -> bool {
        self.lock().hide_series(key)
    }

    pub fn toggle_series(&self, key: &str) -> bool {
        self.lock().toggle_series(key)
    }

    pub fn visible_series(&self) -> Vec<String> {
        self.lock().visible_series()
    }

    pub fn refresh(&self) {
        self.lock().refresh();
    }

    pub fn progress(&self) -> f32 {
        self.lock().progress()
    }

    pub fn to_svg(&self) -> String {
        self.lock().to_svg()
    }

    /// Rasterize the current drawing and return it as a `data:` URL.
    ///
    /// Resolves to an empty string when the chart has no size yet or
    /// rasterization fails.
    pub async fn export_image(&self, format: ImageFormat) -> String {
        let (svg, size) = {
            let mut chart = self.lock();
            let size = chart.size();
            if size.is_empty() {
                let error = ExportError::EmptyCanvas {
                    width: size.width,
                    height: size.height,
                };
                tracing::warn!(%error, "chart export failed");
                return String::new();
            }
            (chart.to_svg(), size)
        };

        let result = tokio::task::spawn_blocking(move || export::rasterize(&svg, format))
            .await
            .map_err(|e| ExportError::Task(e.to_string()))
            .and_then(|r| r);
        match result {
            Ok(bytes) => {
                tracing::debug!(?format, bytes = bytes.len(), ?size, "chart exported");
                export::data_url(format, &bytes)
            }
            Err(error) => {
                tracing::warn!(%error, "chart export failed");
                String::new()
            }
        }
    }
}

fn schedule_frame(
    chart: Weak<Mutex<AvakioChart>>,
    scheduler: Arc<dyn FrameScheduler>,
    generation: u64,
) {
    let next = scheduler.clone();
    scheduler.request_frame(Box::new(move |now| {
        let Some(inner) = chart.upgrade() else {
            return;
        };
        let status = inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .advance_animation(generation, now);
        if status == FrameStatus::Running {
            schedule_frame(chart, next, generation);
        }
    }));
}
