//! Chart configuration surface.
//!
//! Everything the engine needs for one render pass: chart type, series data,
//! axis/legend/tooltip options and layout knobs. All structs deserialize from
//! partial TOML or JSON documents; missing keys take the defaults below.

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use avakio_core::Color;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::format::format_number;

/// Chart geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartType {
    #[default]
    Line,
    Spline,
    Area,
    SplineArea,
    Bar,
    BarH,
    StackedBar,
    StackedBarH,
    Pie,
    #[serde(rename = "pie3D")]
    Pie3D,
    Donut,
    Scatter,
    Radar,
}

impl ChartType {
    /// Pie, pie3D and donut.
    pub fn is_pie(self) -> bool {
        matches!(self, ChartType::Pie | ChartType::Pie3D | ChartType::Donut)
    }

    /// Types laid out around a center instead of on Cartesian axes.
    pub fn is_polar(self) -> bool {
        self.is_pie() || self == ChartType::Radar
    }

    pub fn is_bar(self) -> bool {
        matches!(
            self,
            ChartType::Bar | ChartType::BarH | ChartType::StackedBar | ChartType::StackedBarH
        )
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, ChartType::BarH | ChartType::StackedBarH)
    }

    pub fn is_stacked_bar(self) -> bool {
        matches!(self, ChartType::StackedBar | ChartType::StackedBarH)
    }

    pub fn is_area(self) -> bool {
        matches!(self, ChartType::Area | ChartType::SplineArea)
    }

    pub fn is_spline(self) -> bool {
        matches!(self, ChartType::Spline | ChartType::SplineArea)
    }
}

/// Categorical or numeric x value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum XValue {
    Number(f64),
    Category(String),
}

impl XValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            XValue::Number(v) => Some(*v),
            XValue::Category(_) => None,
        }
    }
}

impl fmt::Display for XValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XValue::Number(v) => f.write_str(&format_number(*v)),
            XValue::Category(s) => f.write_str(s),
        }
    }
}

impl From<f64> for XValue {
    fn from(v: f64) -> Self {
        XValue::Number(v)
    }
}

impl From<&str> for XValue {
    fn from(v: &str) -> Self {
        XValue::Category(v.to_string())
    }
}

impl From<String> for XValue {
    fn from(v: String) -> Self {
        XValue::Category(v)
    }
}

/// Identity of a category band.
///
/// Numeric x values compare by exact value, never by their rounded label, and
/// a point without x is keyed by its index apart from any categorical x.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CategoryKey {
    Index(usize),
    Number(u64),
    Text(String),
}

impl CategoryKey {
    pub fn number(v: f64) -> Self {
        // -0.0 and 0.0 share a band.
        let v = if v == 0.0 { 0.0 } else { v };
        CategoryKey::Number(v.to_bits())
    }
}

impl From<&str> for CategoryKey {
    fn from(v: &str) -> Self {
        CategoryKey::Text(v.to_string())
    }
}

/// One observation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<XValue>,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    /// Caller metadata, passed through to formatters untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DataPoint {
    pub fn new(y: f64) -> Self {
        Self {
            y,
            ..Self::default()
        }
    }

    pub fn at(x: impl Into<XValue>, y: f64) -> Self {
        Self {
            x: Some(x.into()),
            y,
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Category key: the x value, or the point index when x is absent.
    pub fn category_key(&self, index: usize) -> CategoryKey {
        match &self.x {
            Some(XValue::Number(v)) => CategoryKey::number(*v),
            Some(XValue::Category(s)) => CategoryKey::Text(s.clone()),
            None => CategoryKey::Index(index),
        }
    }

    /// Name shown for the point on category axes, legends and radar spokes.
    pub fn display_name(&self, index: usize) -> String {
        match (&self.label, &self.x) {
            (Some(label), _) => label.clone(),
            (None, Some(x)) => x.to_string(),
            (None, None) => (index + 1).to_string(),
        }
    }
}

/// A named sequence of points drawn as one visual entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Series {
    /// Join key for visibility and hover; falls back to `name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub data: Vec<DataPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Per-series geometry for mixed charts.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartType>,
    pub line_width: f32,
    pub fill_opacity: f32,
    pub marker_size: f32,
    pub show_labels: bool,
    pub show_markers: bool,
    pub hidden: bool,
}

impl Default for Series {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            data: Vec::new(),
            color: None,
            chart_type: None,
            line_width: 2.0,
            fill_opacity: 0.3,
            marker_size: 4.0,
            show_labels: false,
            show_markers: true,
            hidden: false,
        }
    }
}

impl Series {
    pub fn new(name: impl Into<String>, data: Vec<DataPoint>) -> Self {
        Self {
            name: name.into(),
            data,
            ..Self::default()
        }
    }

    /// Series whose points only carry y values.
    pub fn from_values(name: impl Into<String>, values: &[f64]) -> Self {
        Self::new(name, values.iter().map(|v| DataPoint::new(*v)).collect())
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = Some(chart_type);
        self
    }

    pub fn with_labels(mut self) -> Self {
        self.show_labels = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn key(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }
}

/// `(value) -> label` formatter for axis ticks and data labels.
#[derive(Clone)]
pub struct ValueFormatter(Arc<dyn Fn(f64) -> String + Send + Sync>);

impl ValueFormatter {
    pub fn new(f: impl Fn(f64) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn format(&self, value: f64) -> String {
        (self.0)(value)
    }
}

impl fmt::Debug for ValueFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueFormatter(..)")
    }
}

/// `(point, series) -> text` formatter for tooltips.
#[derive(Clone)]
pub struct TooltipFormatter(Arc<dyn Fn(&DataPoint, &Series) -> String + Send + Sync>);

impl TooltipFormatter {
    pub fn new(f: impl Fn(&DataPoint, &Series) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn format(&self, point: &DataPoint, series: &Series) -> String {
        (self.0)(point, series)
    }
}

impl fmt::Debug for TooltipFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TooltipFormatter(..)")
    }
}

/// Axis options. `xAxis` always describes the category/independent axis and
/// `yAxis` the value axis, including for horizontal bar charts.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisConfig {
    pub title: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    #[serde(skip)]
    pub label_formatter: Option<ValueFormatter>,
    pub show_grid: bool,
    pub show_line: bool,
    pub show_ticks: bool,
    pub show_labels: bool,
    /// Label rotation in degrees.
    pub label_rotation: f32,
    /// Keep zero inside the value range.
    pub include_zero: bool,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            title: None,
            min: None,
            max: None,
            step: None,
            label_formatter: None,
            show_grid: true,
            show_line: true,
            show_ticks: true,
            show_labels: true,
            label_rotation: 0.0,
            include_zero: true,
        }
    }
}

impl AxisConfig {
    pub fn format(&self, value: f64) -> String {
        match &self.label_formatter {
            Some(f) => f.format(value),
            None => crate::format::format_compact(value),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LegendPosition {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LegendAlign {
    Start,
    #[default]
    Center,
    End,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegendConfig {
    pub show: bool,
    pub position: LegendPosition,
    pub align: LegendAlign,
    /// Clicking a legend item toggles the series.
    pub toggle_on_click: bool,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            show: true,
            position: LegendPosition::Bottom,
            align: LegendAlign::Center,
            toggle_on_click: true,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TooltipConfig {
    pub show: bool,
    #[serde(skip)]
    pub formatter: Option<TooltipFormatter>,
    /// List every visible series at the hovered category.
    pub shared: bool,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            show: true,
            formatter: None,
            shared: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationConfig {
    pub enabled: bool,
    /// Duration in milliseconds.
    pub duration: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration: 800,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Padding {
    pub fn uniform(v: f32) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::uniform(20.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GradientDirection {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BarConfig {
    /// Upper bound on a single bar's thickness.
    pub width: f32,
    /// Gap between neighbouring category groups.
    pub offset: f32,
    /// Corner radius of the bar end.
    pub radius: f32,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            width: 40.0,
            offset: 10.0,
            radius: 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PieConfig {
    /// Degrees, 0 = 12 o'clock, clockwise.
    pub start_angle: f32,
    pub show_labels: bool,
    /// Inner radius of donut charts as a fraction of the outer radius.
    pub donut_inner_radius: f32,
}

impl Default for PieConfig {
    fn default() -> Self {
        Self {
            start_angle: 0.0,
            show_labels: true,
            donut_inner_radius: 0.6,
        }
    }
}

/// Colors that are not part of the data.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartStyle {
    pub background: Color,
    pub text: Color,
    pub muted_text: Color,
    pub grid: Color,
    pub axis: Color,
    pub tooltip_bg: Color,
    pub tooltip_text: Color,
    pub font_size: f32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            text: Color::from_hex(0x333333),
            muted_text: Color::from_hex(0x8a8f98),
            grid: Color::from_hex(0xe8eaed),
            axis: Color::from_hex(0xb0b5bd),
            tooltip_bg: Color::rgba(0.13, 0.14, 0.16, 0.92),
            tooltip_text: Color::WHITE,
            font_size: 12.0,
        }
    }
}

pub const DEFAULT_PALETTE: [u32; 10] = [
    0x1ca1c1, 0xfdbf4c, 0xf7633e, 0x6bcb77, 0x8c6cd9, 0x3d8bfd, 0xe85d9e, 0x20c997, 0xa0522d,
    0x708090,
];

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub series: Vec<Series>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    pub legend: LegendConfig,
    pub tooltip: TooltipConfig,
    /// Palette override (CSS colors); empty uses the default palette.
    pub palette: Vec<String>,
    pub width: f32,
    pub height: f32,
    pub padding: Padding,
    pub animation: AnimationConfig,
    pub gradient: bool,
    pub gradient_direction: GradientDirection,
    pub bar: BarConfig,
    pub pie: PieConfig,
    pub stacked: bool,
    #[serde(skip)]
    pub style: ChartStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            chart_type: ChartType::Line,
            series: Vec::new(),
            title: None,
            subtitle: None,
            x_axis: AxisConfig::default(),
            y_axis: AxisConfig::default(),
            legend: LegendConfig::default(),
            tooltip: TooltipConfig::default(),
            palette: Vec::new(),
            width: 600.0,
            height: 400.0,
            padding: Padding::default(),
            animation: AnimationConfig::default(),
            gradient: false,
            gradient_direction: GradientDirection::Vertical,
            bar: BarConfig::default(),
            pie: PieConfig::default(),
            stacked: false,
            style: ChartStyle::default(),
        }
    }
}

/// Suspicious configuration; reported, never rejected.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigWarning {
    DuplicateSeriesKey(String),
    DonutRadiusOutOfRange(f32),
    ExtraPieSeries { used: String, ignored: usize },
    InvalidColor { owner: String, color: String },
    RadarLengthMismatch {
        series: String,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::DuplicateSeriesKey(key) => {
                write!(f, "series key `{key}` is used more than once")
            }
            ConfigWarning::DonutRadiusOutOfRange(v) => {
                write!(f, "donut inner radius {v} is outside 0..=0.95 and will be clamped")
            }
            ConfigWarning::ExtraPieSeries { used, ignored } => write!(
                f,
                "pie charts draw one series; using `{used}`, ignoring {ignored} more"
            ),
            ConfigWarning::InvalidColor { owner, color } => {
                write!(f, "color `{color}` on `{owner}` is not a CSS color")
            }
            ConfigWarning::RadarLengthMismatch {
                series,
                expected,
                found,
            } => write!(
                f,
                "radar series `{series}` has {found} points but the chart has {expected} axes"
            ),
        }
    }
}

impl ChartConfig {
    pub fn new(chart_type: ChartType, series: Vec<Series>) -> Self {
        Self {
            chart_type,
            series,
            ..Self::default()
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a `.toml` or `.json` configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let read = || {
            fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        };
        match ext.as_deref() {
            Some("toml") => Self::from_toml_str(&read()?),
            Some("json") => Self::from_json_str(&read()?),
            _ => Err(ConfigError::UnsupportedExtension(path.to_path_buf())),
        }
    }

    /// Stacking applies to stacked bar types and to bar/area series when `stacked` is set.
    pub fn is_stacked(&self) -> bool {
        self.stacked || self.chart_type.is_stacked_bar()
    }

    /// Geometry used for `series`: its override, unless that would leave the
    /// chart's coordinate system.
    pub fn series_type(&self, series: &Series) -> ChartType {
        match series.chart_type {
            Some(t) if !t.is_polar() && !self.chart_type.is_polar() => t,
            _ => self.chart_type,
        }
    }

    pub fn donut_fraction(&self) -> f32 {
        self.pie.donut_inner_radius.clamp(0.0, 0.95)
    }

    pub fn resolved_palette(&self) -> Vec<Color> {
        let parsed: Vec<Color> = self
            .palette
            .iter()
            .filter_map(|c| Color::parse(c).ok())
            .collect();
        if parsed.is_empty() {
            DEFAULT_PALETTE.iter().map(|hex| Color::from_hex(*hex)).collect()
        } else {
            parsed
        }
    }

    pub fn diagnostics(&self) -> Vec<ConfigWarning> {
        let mut out = Vec::new();

        let mut seen = FxHashSet::default();
        for s in &self.series {
            if !seen.insert(s.key()) {
                out.push(ConfigWarning::DuplicateSeriesKey(s.key().to_string()));
            }
        }

        for c in &self.palette {
            if Color::parse(c).is_err() {
                out.push(ConfigWarning::InvalidColor {
                    owner: "palette".to_string(),
                    color: c.clone(),
                });
            }
        }
        for s in &self.series {
            if let Some(c) = &s.color {
                if Color::parse(c).is_err() {
                    out.push(ConfigWarning::InvalidColor {
                        owner: s.key().to_string(),
                        color: c.clone(),
                    });
                }
            }
        }

        if self.chart_type == ChartType::Donut {
            let f = self.pie.donut_inner_radius;
            if !(0.0..=0.95).contains(&f) {
                out.push(ConfigWarning::DonutRadiusOutOfRange(f));
            }
        }

        let visible: Vec<&Series> = self.series.iter().filter(|s| !s.hidden).collect();
        if self.chart_type.is_pie() && visible.len() > 1 {
            out.push(ConfigWarning::ExtraPieSeries {
                used: visible[0].key().to_string(),
                ignored: visible.len() - 1,
            });
        }

        if self.chart_type == ChartType::Radar {
            if let Some((first, rest)) = visible.split_first() {
                let expected = first.data.len();
                for s in rest {
                    if s.data.len() != expected {
                        out.push(ConfigWarning::RadarLengthMismatch {
                            series: s.key().to_string(),
                            expected,
                            found: s.data.len(),
                        });
                    }
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_type_names_match_configuration_strings() {
        let cases = [
            ("\"splineArea\"", ChartType::SplineArea),
            ("\"barH\"", ChartType::BarH),
            ("\"stackedBarH\"", ChartType::StackedBarH),
            ("\"pie3D\"", ChartType::Pie3D),
            ("\"radar\"", ChartType::Radar),
        ];
        for (json, expected) in cases {
            let parsed: ChartType = serde_json::from_str(json).unwrap();
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn series_key_falls_back_to_name() {
        let s = Series::from_values("Revenue", &[1.0]);
        assert_eq!(s.key(), "Revenue");
        assert_eq!(s.with_id("rev").key(), "rev");
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = ChartConfig::from_toml_str(
            r##"
            type = "stackedBar"
            title = "Sales"

            [legend]
            position = "right"

            [[series]]
            name = "North"
            color = "#ff0000"
            data = [{ x = "Q1", y = 10 }, { x = "Q2", y = 12.5, region = "n" }]
            "##,
        )
        .unwrap();

        assert_eq!(cfg.chart_type, ChartType::StackedBar);
        assert!(cfg.is_stacked());
        assert_eq!(cfg.legend.position, LegendPosition::Right);
        assert!(cfg.legend.toggle_on_click);
        assert_eq!(cfg.width, 600.0);
        let s = &cfg.series[0];
        assert_eq!(s.line_width, 2.0);
        assert_eq!(s.data[0].x, Some(XValue::Category("Q1".into())));
        assert_eq!(s.data[0].y, 10.0);
        assert_eq!(
            s.data[1].extra.get("region"),
            Some(&serde_json::Value::String("n".into()))
        );
    }

    #[test]
    fn json_numeric_x_values() {
        let cfg = ChartConfig::from_json_str(
            r#"{"type":"scatter","series":[{"name":"a","data":[{"x":1.5,"y":2},{"y":3}]}]}"#,
        )
        .unwrap();
        let data = &cfg.series[0].data;
        assert_eq!(data[0].x, Some(XValue::Number(1.5)));
        assert_eq!(data[1].x, None);
        assert_eq!(data[1].category_key(1), CategoryKey::Index(1));
    }

    #[test]
    fn category_keys_keep_exact_numbers() {
        let a = DataPoint::at(0.0001, 1.0);
        let b = DataPoint::at(0.0002, 1.0);
        assert_eq!(a.x.as_ref().map(|x| x.to_string()), b.x.as_ref().map(|x| x.to_string()));
        assert_ne!(a.category_key(0), b.category_key(1));
        assert_eq!(DataPoint::at(-0.0, 1.0).category_key(0), DataPoint::at(0.0, 1.0).category_key(3));

        // Index keys never collide with categorical text.
        assert_ne!(DataPoint::new(1.0).category_key(2), DataPoint::at("2", 1.0).category_key(0));
    }

    #[test]
    fn missing_y_is_rejected() {
        let err = ChartConfig::from_json_str(r#"{"series":[{"name":"a","data":[{"x":1}]}]}"#);
        assert!(matches!(err, Err(ConfigError::Json(_))));
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let err = ChartConfig::load(Path::new("chart.yaml"));
        assert!(matches!(err, Err(ConfigError::UnsupportedExtension(_))));
    }

    #[test]
    fn diagnostics_report_suspicious_input() {
        let mut cfg = ChartConfig::new(
            ChartType::Donut,
            vec![
                Series::from_values("a", &[1.0]).with_color("nope"),
                Series::from_values("a", &[2.0]),
            ],
        );
        cfg.pie.donut_inner_radius = 1.4;

        let warnings = cfg.diagnostics();
        assert!(warnings.contains(&ConfigWarning::DuplicateSeriesKey("a".into())));
        assert!(warnings.contains(&ConfigWarning::DonutRadiusOutOfRange(1.4)));
        assert!(warnings.contains(&ConfigWarning::ExtraPieSeries {
            used: "a".into(),
            ignored: 1
        }));
        assert!(warnings
            .iter()
            .any(|w| matches!(w, ConfigWarning::InvalidColor { color, .. } if color == "nope")));
        assert_eq!(cfg.donut_fraction(), 0.95);
    }

    #[test]
    fn polar_override_is_ignored_in_cartesian_chart() {
        let cfg = ChartConfig::new(ChartType::Bar, Vec::new());
        let line = Series::default().with_type(ChartType::Line);
        let pie = Series::default().with_type(ChartType::Pie);
        assert_eq!(cfg.series_type(&line), ChartType::Line);
        assert_eq!(cfg.series_type(&pie), ChartType::Bar);
    }

    #[test]
    fn palette_override_falls_back_when_unparsable() {
        let mut cfg = ChartConfig::default();
        cfg.palette = vec!["bogus".into()];
        assert_eq!(cfg.resolved_palette().len(), DEFAULT_PALETTE.len());
        cfg.palette = vec!["#000".into(), "#fff".into()];
        assert_eq!(cfg.resolved_palette(), vec![Color::BLACK, Color::WHITE]);
    }
}
