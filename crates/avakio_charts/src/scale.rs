use avakio_core::{Point, Rect};
use indexmap::IndexMap;

use crate::bounds::{compute_bounds, AxisBounds};
use crate::config::{CategoryKey, ChartConfig, DataPoint, Series};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    pub fn new(domain_min: f64, domain_max: f64, range_min: f32, range_max: f32) -> Self {
        Self {
            domain_min,
            domain_max,
            range_min,
            range_max,
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    pub fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }

    pub fn map(&self, value: f64) -> f32 {
        let d = self.domain_max - self.domain_min;
        if d.abs() < 1e-12 {
            return self.range_min;
        }
        let t = (value - self.domain_min) / d;
        self.range_min + (t as f32) * (self.range_max - self.range_min)
    }

    /// `value` clamped into the domain.
    pub fn clamp(&self, value: f64) -> f64 {
        let (lo, hi) = if self.domain_min <= self.domain_max {
            (self.domain_min, self.domain_max)
        } else {
            (self.domain_max, self.domain_min)
        };
        value.clamp(lo, hi)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandScale {
    count: usize,
    start: f32,
    step: f32,
    band_width: f32,
}

impl BandScale {
    pub fn new(
        count: usize,
        range_min: f32,
        range_max: f32,
        padding_inner: f32,
        padding_outer: f32,
    ) -> Self {
        if count == 0 {
            return Self {
                count: 0,
                start: range_min,
                step: 0.0,
                band_width: 0.0,
            };
        }
        let count_f = count as f32;
        let span = (range_max - range_min).max(0.0);
        let denom = (count_f - padding_inner + 2.0 * padding_outer).max(1e-6);
        let step = span / denom;
        let band_width = step * (1.0 - padding_inner).max(0.0);
        let start = range_min + step * padding_outer;
        Self {
            count,
            start,
            step,
            band_width,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn band_width(&self) -> f32 {
        self.band_width
    }

    pub fn band_start(&self, idx: usize) -> Option<f32> {
        if idx >= self.count {
            return None;
        }
        Some(self.start + self.step * idx as f32)
    }

    pub fn center(&self, idx: usize) -> Option<f32> {
        self.band_start(idx).map(|x| x + self.band_width * 0.5)
    }

    /// Band under `px`, if any.
    pub fn index_at(&self, px: f32) -> Option<usize> {
        if self.count == 0 || self.step <= 0.0 || px < self.start {
            return None;
        }
        let idx = ((px - self.start) / self.step).floor() as usize;
        (idx < self.count).then_some(idx)
    }
}

/// Unique category keys in first-occurrence order, with their axis labels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Categories {
    entries: IndexMap<CategoryKey, String>,
}

impl Categories {
    pub fn from_series<'a>(series: impl IntoIterator<Item = &'a Series>) -> Self {
        let mut entries = IndexMap::new();
        for s in series {
            for (i, p) in s.data.iter().enumerate() {
                entries
                    .entry(p.category_key(i))
                    .or_insert_with(|| axis_label(p, i));
            }
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index_of(&self, key: &CategoryKey) -> Option<usize> {
        self.entries.get_index_of(key)
    }

    pub fn index_of_point(&self, point: &DataPoint, index: usize) -> Option<usize> {
        self.index_of(&point.category_key(index))
    }

    pub fn key(&self, index: usize) -> Option<&CategoryKey> {
        self.entries.get_index(index).map(|(k, _)| k)
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.entries.get_index(index).map(|(_, v)| v.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }
}

fn axis_label(point: &DataPoint, index: usize) -> String {
    match (&point.x, &point.label) {
        (Some(x), _) => x.to_string(),
        (None, Some(label)) => label.clone(),
        (None, None) => (index + 1).to_string(),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum XScale {
    Linear(LinearScale),
    Band {
        scale: BandScale,
        categories: Categories,
    },
}

impl XScale {
    pub fn categories(&self) -> Option<&Categories> {
        match self {
            XScale::Band { categories, .. } => Some(categories),
            XScale::Linear(_) => None,
        }
    }

    pub fn band(&self) -> Option<&BandScale> {
        match self {
            XScale::Band { scale, .. } => Some(scale),
            XScale::Linear(_) => None,
        }
    }

    /// Pixel position of a point along the category axis.
    pub fn position(&self, point: &DataPoint, index: usize) -> Option<f32> {
        match self {
            XScale::Linear(scale) => point
                .x
                .as_ref()
                .and_then(|x| x.as_number())
                .filter(|x| x.is_finite())
                .map(|x| scale.map(x)),
            XScale::Band { scale, categories } => categories
                .index_of_point(point, index)
                .and_then(|idx| scale.center(idx)),
        }
    }
}

/// Which screen axis carries the values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Categories run left to right, values bottom to top.
    #[default]
    Vertical,
    /// Categories run top to bottom, values left to right.
    Horizontal,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CartesianScales {
    pub orientation: Orientation,
    pub area: Rect,
    pub x: XScale,
    pub y: LinearScale,
    pub bounds: AxisBounds,
}

impl CartesianScales {
    /// Build scales for the visible series of a Cartesian chart.
    ///
    /// `extra_values` carries stacked extents so the value axis covers the
    /// stacked totals. Returns `None` for polar chart types.
    pub fn build(
        config: &ChartConfig,
        visible: &[&Series],
        extra_values: &[f64],
        area: Rect,
    ) -> Option<Self> {
        if config.chart_type.is_polar() {
            return None;
        }
        let orientation = if config.chart_type.is_horizontal() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };

        let mut values: Vec<f64> = visible
            .iter()
            .flat_map(|s| s.data.iter().map(|p| p.y))
            .filter(|v| v.is_finite())
            .collect();
        values.extend(extra_values.iter().copied().filter(|v| v.is_finite()));
        if config.y_axis.include_zero {
            values.push(0.0);
        }
        let bounds = compute_bounds(&values, config.y_axis.step)
            .with_limits(config.y_axis.min, config.y_axis.max);

        let (cat_min, cat_max, val_min, val_max) = match orientation {
            Orientation::Vertical => (area.x(), area.right(), area.bottom(), area.y()),
            Orientation::Horizontal => (area.y(), area.bottom(), area.x(), area.right()),
        };
        let y = LinearScale::new(bounds.min, bounds.max, val_min, val_max);

        let has_bars = config.chart_type.is_bar()
            || visible.iter().any(|s| config.series_type(s).is_bar());
        let x = match numeric_domain(visible) {
            Some((lo, hi)) if !has_bars => {
                let lo = config.x_axis.min.unwrap_or(lo);
                let hi = config.x_axis.max.unwrap_or(hi);
                let (lo, hi) = if hi > lo { (lo, hi) } else { (lo - 1.0, hi + 1.0) };
                XScale::Linear(LinearScale::new(lo, hi, cat_min, cat_max))
            }
            _ => {
                let categories = Categories::from_series(visible.iter().copied());
                let scale = BandScale::new(categories.len(), cat_min, cat_max, 0.0, 0.0);
                XScale::Band { scale, categories }
            }
        };

        Some(Self {
            orientation,
            area,
            x,
            y,
            bounds,
        })
    }

    pub fn value_px(&self, value: f64) -> f32 {
        self.y.map(value)
    }

    /// Value where bars and area fills start: zero, clamped into the domain.
    pub fn baseline_value(&self) -> f64 {
        self.y.clamp(0.0)
    }

    /// Screen point from a category-axis and a value-axis coordinate.
    pub fn to_screen(&self, category_px: f32, value_px: f32) -> Point {
        match self.orientation {
            Orientation::Vertical => Point::new(category_px, value_px),
            Orientation::Horizontal => Point::new(value_px, category_px),
        }
    }

    /// Screen position of a data point at `value` (usually `y * progress`).
    pub fn point_px(&self, point: &DataPoint, index: usize, value: f64) -> Option<Point> {
        if !value.is_finite() {
            return None;
        }
        let c = self.x.position(point, index)?;
        Some(self.to_screen(c, self.value_px(value)))
    }

    /// Category band under a screen position.
    pub fn category_at(&self, pos: Point) -> Option<usize> {
        let band = self.x.band()?;
        match self.orientation {
            Orientation::Vertical => band.index_at(pos.x),
            Orientation::Horizontal => band.index_at(pos.y),
        }
    }
}

/// Shared numeric x domain, when every point of every series has a numeric x.
fn numeric_domain(visible: &[&Series]) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    let mut any = false;
    for s in visible {
        for p in &s.data {
            let x = p.x.as_ref()?.as_number()?;
            if !x.is_finite() {
                continue;
            }
            lo = lo.min(x);
            hi = hi.max(x);
            any = true;
        }
    }
    any.then_some((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChartType, DataPoint};

    fn area() -> Rect {
        Rect::new(0.0, 0.0, 400.0, 200.0)
    }

    #[test]
    fn band_scale_bounds_indices() {
        let b = BandScale::new(3, 0.0, 300.0, 0.1, 0.05);
        assert!(b.band_start(2).is_some());
        assert!(b.band_start(3).is_none());
    }

    #[test]
    fn band_index_at_position() {
        let b = BandScale::new(4, 0.0, 400.0, 0.0, 0.0);
        assert_eq!(b.index_at(0.0), Some(0));
        assert_eq!(b.index_at(250.0), Some(2));
        assert_eq!(b.index_at(400.0), None);
        assert_eq!(b.center(1), Some(150.0));
    }

    #[test]
    fn linear_scale_maps_inverted_range() {
        let s = LinearScale::new(0.0, 100.0, 200.0, 0.0);
        assert_eq!(s.map(50.0), 100.0);
        assert_eq!(s.map(100.0), 0.0);
    }

    #[test]
    fn categories_keep_first_occurrence_order() {
        let a = Series::new(
            "a",
            vec![DataPoint::at("Mar", 1.0), DataPoint::at("Jan", 2.0)],
        );
        let b = Series::new(
            "b",
            vec![DataPoint::at("Jan", 1.0), DataPoint::at("Feb", 2.0)],
        );
        let cats = Categories::from_series([&a, &b]);
        let labels: Vec<&str> = cats.labels().collect();
        assert_eq!(labels, vec!["Mar", "Jan", "Feb"]);
    }

    #[test]
    fn numeric_x_uses_linear_scale() {
        let s = Series::new(
            "s",
            vec![DataPoint::at(0.0, 1.0), DataPoint::at(10.0, 5.0)],
        );
        let cfg = ChartConfig::new(ChartType::Scatter, vec![s.clone()]);
        let scales = CartesianScales::build(&cfg, &[&s], &[], area()).unwrap();
        assert!(matches!(scales.x, XScale::Linear(_)));
        let p = scales.point_px(&s.data[1], 1, 5.0).unwrap();
        assert_eq!(p.x, 400.0);
    }

    #[test]
    fn bars_always_use_bands() {
        let s = Series::new(
            "s",
            vec![DataPoint::at(0.0, 1.0), DataPoint::at(10.0, 5.0)],
        );
        let cfg = ChartConfig::new(ChartType::Bar, vec![s.clone()]);
        let scales = CartesianScales::build(&cfg, &[&s], &[], area()).unwrap();
        assert_eq!(scales.x.band().map(BandScale::count), Some(2));
    }

    #[test]
    fn close_numeric_x_values_get_their_own_bands() {
        let s = Series::new(
            "s",
            vec![
                DataPoint::at(0.0001, 1.0),
                DataPoint::at(0.0002, 2.0),
                DataPoint::at(0.0003, 3.0),
            ],
        );
        let cfg = ChartConfig::new(ChartType::Bar, vec![s.clone()]);
        let scales = CartesianScales::build(&cfg, &[&s], &[], area()).unwrap();
        assert_eq!(scales.x.band().map(BandScale::count), Some(3));

        let cats = scales.x.categories().unwrap();
        let idx: Vec<Option<usize>> = s
            .data
            .iter()
            .enumerate()
            .map(|(i, p)| cats.index_of_point(p, i))
            .collect();
        assert_eq!(idx, vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn missing_x_does_not_join_text_category() {
        let a = Series::new("a", vec![DataPoint::at("2", 1.0)]);
        let b = Series::from_values("b", &[1.0, 1.0, 1.0]);
        let cats = Categories::from_series([&a, &b]);
        assert_eq!(cats.len(), 4);
    }

    #[test]
    fn horizontal_swaps_axes() {
        let s = Series::from_values("s", &[10.0, 20.0]);
        let cfg = ChartConfig::new(ChartType::BarH, vec![s.clone()]);
        let scales = CartesianScales::build(&cfg, &[&s], &[], area()).unwrap();
        assert_eq!(scales.orientation, Orientation::Horizontal);
        let p = scales.point_px(&s.data[0], 0, 0.0).unwrap();
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 50.0);
    }

    #[test]
    fn polar_types_have_no_cartesian_scales() {
        let cfg = ChartConfig::new(ChartType::Pie, Vec::new());
        assert!(CartesianScales::build(&cfg, &[], &[], area()).is_none());
    }
}
