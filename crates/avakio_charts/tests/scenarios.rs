use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use avakio_animation::ManualScheduler;
use avakio_charts::hit::HitShape;
use avakio_charts::prelude::*;
use avakio_charts::render::TOOLTIP_OFFSET;
use avakio_core::{Rect, RecordingContext, Size};

fn still(mut config: ChartConfig) -> ChartConfig {
    config.animation.enabled = false;
    config
}

fn render(chart: &mut AvakioChart) -> (RecordingContext, ChartFrame) {
    let mut ctx = RecordingContext::new(chart.size());
    let frame = chart.render(&mut ctx).clone();
    (ctx, frame)
}

fn bar_rect(frame: &ChartFrame, key: &str) -> Rect {
    frame
        .hit_regions
        .iter()
        .find(|r| r.series_key == key)
        .and_then(|r| match r.shape {
            HitShape::Rect(rect) => Some(rect),
            _ => None,
        })
        .expect("bar hit region")
}

#[test]
fn pie_slice_angles() {
    let config = still(ChartConfig::new(
        ChartType::Pie,
        vec![Series::from_values("share", &[30.0, 30.0, 40.0])],
    ));
    let mut chart = AvakioChart::new(config);
    let (_, frame) = render(&mut chart);
    let pie = frame.pie.expect("pie geometry");

    let spans: Vec<(f32, f32)> = pie.slices.iter().map(|s| (s.start, s.end)).collect();
    let expected = [(0.0, 108.0), (108.0, 216.0), (216.0, 360.0)];
    for ((start, end), (es, ee)) in spans.iter().zip(expected) {
        assert!((start - es).abs() < 1e-3 && (end - ee).abs() < 1e-3);
    }
    assert_eq!(frame.hit_regions.len(), 3);
}

#[test]
fn donut_inner_radius_is_fraction_of_outer() {
    let mut config = still(ChartConfig::new(
        ChartType::Donut,
        vec![Series::from_values("share", &[1.0, 2.0, 3.0])],
    ));
    config.width = 296.0;
    config.height = 400.0;
    config.pie.donut_inner_radius = 0.5;
    let mut chart = AvakioChart::new(config);
    let (_, frame) = render(&mut chart);
    let pie = frame.pie.expect("donut geometry");
    assert!((pie.outer_radius - 100.0).abs() < 1e-3);
    assert!((pie.inner_radius - 50.0).abs() < 1e-3);
}

#[test]
fn zero_sum_pie_draws_nothing() {
    let config = still(ChartConfig::new(
        ChartType::Pie,
        vec![Series::from_values("empty", &[0.0, 0.0])],
    ));
    let mut chart = AvakioChart::new(config);
    let (ctx, frame) = render(&mut chart);
    assert!(frame.pie.is_none());
    assert!(frame.hit_regions.is_empty());
    assert!(ctx.group("series:empty").is_none());
}

#[test]
fn stacked_bars_keep_series_order() {
    let config = still(ChartConfig::new(
        ChartType::StackedBar,
        vec![
            Series::from_values("A", &[10.0]),
            Series::from_values("B", &[20.0]),
        ],
    ));
    let mut chart = AvakioChart::new(config);
    let (_, frame) = render(&mut chart);
    let scales = frame.scales.as_ref().unwrap();

    let a = bar_rect(&frame, "A");
    let b = bar_rect(&frame, "B");
    let px = |v: f64| scales.value_px(v);
    assert!((a.bottom() - px(0.0)).abs() < 1e-3);
    assert!((a.y() - px(10.0)).abs() < 1e-3);
    assert!((b.bottom() - px(10.0)).abs() < 1e-3);
    assert!((b.y() - px(30.0)).abs() < 1e-3);
    assert!(b.y() < a.y());
}

#[test]
fn grouped_bars_sit_side_by_side() {
    let config = still(ChartConfig::new(
        ChartType::Bar,
        vec![
            Series::from_values("A", &[10.0]),
            Series::from_values("B", &[20.0]),
        ],
    ));
    let mut chart = AvakioChart::new(config);
    let (_, frame) = render(&mut chart);
    let a = bar_rect(&frame, "A");
    let b = bar_rect(&frame, "B");
    assert!((a.right() - b.x()).abs() < 1e-3);
    assert!(a.width() <= 40.0);
}

#[test]
fn horizontal_bars_grow_to_the_right() {
    let config = still(ChartConfig::new(
        ChartType::BarH,
        vec![Series::from_values("A", &[10.0, 20.0])],
    ));
    let mut chart = AvakioChart::new(config);
    let (_, frame) = render(&mut chart);
    let rects: Vec<Rect> = frame
        .hit_regions
        .iter()
        .filter_map(|r| match r.shape {
            HitShape::Rect(rect) => Some(rect),
            _ => None,
        })
        .collect();
    assert_eq!(rects.len(), 2);
    assert!(rects[1].width() > rects[0].width());
    assert!((rects[0].x() - rects[1].x()).abs() < 1e-3);
    assert!(rects[0].y() < rects[1].y());
}

#[test]
fn hover_shows_tooltip_and_notifies() {
    let hovered = Arc::new(Mutex::new(Vec::new()));
    let sink = hovered.clone();
    let config = still(ChartConfig::new(
        ChartType::Line,
        vec![Series::from_values("A", &[1.0, 2.0, 3.0])],
    ));
    let mut chart = AvakioChart::new(config).with_on_point_hover(move |point, series, index| {
        sink.lock()
            .unwrap()
            .push((point.map(|p| p.y), series.map(|s| s.name.clone()), index));
    });

    let (_, frame) = render(&mut chart);
    let anchor = frame.hit_regions[1].anchor;
    assert!(chart.on_pointer_move(anchor));
    assert!(!chart.on_pointer_move(anchor.offset(1.0, 0.0)));

    let (ctx, frame) = render(&mut chart);
    let tooltip = frame.tooltip.expect("tooltip");
    assert_eq!(tooltip.lines, vec!["A: 2".to_string()]);
    assert_eq!(tooltip.rect.x(), anchor.x + 1.0 + TOOLTIP_OFFSET);
    assert!(ctx.texts().contains(&"A: 2"));

    assert!(chart.on_pointer_leave());
    let (_, frame) = render(&mut chart);
    assert!(frame.tooltip.is_none());

    let events = hovered.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            (Some(2.0), Some("A".to_string()), Some(1)),
            (None, None, None)
        ]
    );
}

#[test]
fn shared_tooltip_lists_every_series_at_category() {
    let mut config = still(ChartConfig::new(
        ChartType::Line,
        vec![
            Series::new(
                "North",
                vec![DataPoint::at("Q1", 5.0), DataPoint::at("Q2", 7.0)],
            ),
            Series::new("South", vec![DataPoint::at("Q2", 3.0)]),
        ],
    ));
    config.tooltip.shared = true;
    let mut chart = AvakioChart::new(config);
    let (_, frame) = render(&mut chart);
    let anchor = frame
        .hit_regions
        .iter()
        .find(|r| r.series_key == "South")
        .map(|r| r.anchor)
        .unwrap();
    chart.on_pointer_move(anchor);
    let (_, frame) = render(&mut chart);
    assert_eq!(
        frame.tooltip.map(|t| t.lines),
        Some(vec!["North: 7".to_string(), "South: 3".to_string()])
    );
}

#[test]
fn tooltip_formatter_and_point_override() {
    let mut config = still(ChartConfig::new(
        ChartType::Bar,
        vec![Series::new(
            "S",
            vec![
                DataPoint::at("a", 1.0).with_tooltip("custom"),
                DataPoint::at("b", 2.0),
            ],
        )],
    ));
    config.tooltip.formatter = Some(TooltipFormatter::new(|p, s| {
        format!("{} -> {}", s.name, p.y)
    }));
    let mut chart = AvakioChart::new(config);

    for (index, expected) in [(0usize, "custom"), (1, "S -> 2")] {
        let (_, frame) = render(&mut chart);
        let anchor = frame.hit_regions[index].anchor;
        chart.on_pointer_move(anchor.offset(0.0, 2.0));
        let (_, frame) = render(&mut chart);
        assert_eq!(frame.tooltip.unwrap().lines, vec![expected.to_string()]);
    }
}

#[test]
fn legend_click_toggles_series() {
    let clicks = Arc::new(Mutex::new(Vec::new()));
    let sink = clicks.clone();
    let config = still(ChartConfig::new(
        ChartType::Line,
        vec![
            Series::from_values("A", &[1.0]),
            Series::from_values("B", &[2.0]),
        ],
    ));
    let mut chart = AvakioChart::new(config).with_on_legend_click(move |series, visible| {
        sink.lock().unwrap().push((series.name.clone(), visible));
    });

    let (_, frame) = render(&mut chart);
    let item = frame.legend.iter().find(|i| i.key == "B").unwrap().clone();
    chart.on_click(item.rect.center());
    assert_eq!(chart.visible_series(), vec!["A".to_string()]);

    let (_, frame) = render(&mut chart);
    assert!(frame.legend.iter().find(|i| i.key == "B").unwrap().hidden);
    chart.on_click(item.rect.center());
    assert_eq!(chart.visible_series().len(), 2);

    assert_eq!(
        *clicks.lock().unwrap(),
        vec![("B".to_string(), false), ("B".to_string(), true)]
    );
}

#[test]
fn pie_legend_lists_slices_and_ignores_clicks() {
    let config = still(ChartConfig::new(
        ChartType::Pie,
        vec![Series::new(
            "share",
            vec![
                DataPoint::new(2.0).with_label("Rust"),
                DataPoint::new(1.0).with_label("Go"),
            ],
        )],
    ));
    let mut chart = AvakioChart::new(config);
    let (_, frame) = render(&mut chart);
    let labels: Vec<&str> = frame.legend.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["Rust", "Go"]);
    chart.on_click(frame.legend[0].rect.center());
    assert_eq!(chart.visible_series(), vec!["share".to_string()]);
}

#[test]
fn point_click_reports_point_and_series() {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = count.clone();
    let config = still(ChartConfig::new(
        ChartType::Scatter,
        vec![Series::new(
            "pts",
            vec![DataPoint::at(1.0, 1.0), DataPoint::at(2.0, 4.0)],
        )],
    ));
    let mut chart = AvakioChart::new(config).with_on_point_click(move |point, series, index| {
        assert_eq!(series.name, "pts");
        assert_eq!(index, 1);
        assert_eq!(point.y, 4.0);
        seen.fetch_add(1, Ordering::SeqCst);
    });
    let (_, frame) = render(&mut chart);
    chart.on_click(frame.hit_regions[1].anchor);
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn empty_chart_renders_without_series() {
    for chart_type in [ChartType::Line, ChartType::Pie, ChartType::Radar] {
        let mut chart = AvakioChart::new(still(ChartConfig::new(chart_type, Vec::new())));
        let (ctx, frame) = render(&mut chart);
        assert!(frame.hit_regions.is_empty());
        assert!(frame.legend.is_empty());
        assert!(ctx.group("grid").is_none());
        assert!(ctx.group("axes").is_none());
        assert!(ctx.group("radar-grid").is_none());
    }
}

#[test]
fn hiding_every_series_clears_the_plot() {
    let config = still(ChartConfig::new(
        ChartType::Bar,
        vec![Series::from_values("A", &[1.0, 2.0])],
    ));
    let mut chart = AvakioChart::new(config);
    let (ctx, _) = render(&mut chart);
    assert!(ctx.group("axes").is_some());

    chart.hide_series("A");
    let (ctx, frame) = render(&mut chart);
    assert!(ctx.group("grid").is_none());
    assert!(ctx.group("axes").is_none());
    assert!(frame.hit_regions.is_empty());
    assert_eq!(frame.legend.len(), 1);
    assert!(frame.legend[0].hidden);
}

#[test]
fn new_data_supersedes_running_animation() {
    let scheduler = Arc::new(ManualScheduler::new());
    let config = ChartConfig::new(ChartType::Area, vec![Series::from_values("A", &[1.0, 2.0])]);
    let handle = ChartHandle::with_scheduler(AvakioChart::new(config), scheduler.clone());

    handle.mount();
    scheduler.advance(Duration::from_millis(16));
    scheduler.advance(Duration::from_millis(400));
    let midway = handle.progress();
    assert!(midway > 0.0 && midway < 1.0);

    handle.set_series(vec![Series::from_values("A", &[5.0, 6.0])]);
    assert_eq!(handle.progress(), 0.0);
    // The stale frame and the new one are both queued; only the new one continues.
    assert_eq!(scheduler.pending_frames(), 2);
    scheduler.advance(Duration::from_millis(16));
    assert_eq!(scheduler.pending_frames(), 1);

    scheduler.run_until_idle(Duration::from_millis(16), 1_000);
    assert_eq!(handle.progress(), 1.0);
    assert_eq!(scheduler.pending_frames(), 0);
}

#[test]
fn refresh_jumps_to_final_state() {
    let scheduler = Arc::new(ManualScheduler::new());
    let config = ChartConfig::new(ChartType::Bar, vec![Series::from_values("A", &[1.0])]);
    let handle = ChartHandle::with_scheduler(AvakioChart::new(config), scheduler.clone());
    handle.mount();
    assert_eq!(handle.progress(), 0.0);
    handle.refresh();
    assert_eq!(handle.progress(), 1.0);
    // The in-flight sequence notices it was superseded and stops.
    scheduler.advance(Duration::from_millis(16));
    assert_eq!(scheduler.pending_frames(), 0);
    assert_eq!(handle.progress(), 1.0);
}

#[test]
fn handle_without_scheduler_renders_final_state() {
    let handle = ChartHandle::new(AvakioChart::new(ChartConfig::new(
        ChartType::Line,
        vec![Series::from_values("A", &[1.0])],
    )));
    handle.mount();
    assert_eq!(handle.progress(), 1.0);
    assert_eq!(handle.container_size(), Size::new(600.0, 400.0));
    assert!(!handle.toggle_series("A"));
    assert!(handle.visible_series().is_empty());
    assert!(handle.show_series("A"));
}

#[test]
fn svg_document_contains_series_groups() {
    let mut config = still(ChartConfig::new(
        ChartType::SplineArea,
        vec![Series::from_values("rev", &[3.0, 5.0, 4.0])],
    ));
    config.title = Some("Revenue & costs".into());
    config.gradient = true;
    let mut chart = AvakioChart::new(config);
    let svg = chart.to_svg();
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains(r#"<g class="series:rev">"#));
    assert!(svg.contains("Revenue &amp; costs"));
    assert!(svg.contains("<linearGradient"));
}

#[tokio::test]
async fn export_image_returns_data_url() {
    let handle = ChartHandle::new(AvakioChart::new(still(ChartConfig::new(
        ChartType::Bar,
        vec![Series::from_values("A", &[1.0, 2.0])],
    ))));
    let png = handle.export_image(ImageFormat::Png).await;
    assert!(png.starts_with("data:image/png;base64,"));
    assert!(png.len() > "data:image/png;base64,".len());

    let jpeg = handle.export_image(ImageFormat::Jpeg).await;
    assert!(jpeg.starts_with("data:image/jpeg;base64,"));
}

#[tokio::test]
async fn export_before_layout_is_empty() {
    let handle = ChartHandle::new(AvakioChart::new(ChartConfig::new(
        ChartType::Line,
        vec![Series::from_values("A", &[1.0])],
    )));
    handle.set_size(Size::ZERO);
    assert_eq!(handle.export_image(ImageFormat::Png).await, "");
}
