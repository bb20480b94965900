//! Stacked layout for bars and areas.
//!
//! Values are stacked per category key in series order: positive values grow
//! upward from zero, negative values downward, each with its own running
//! total. A series without a point at some category leaves that category's
//! baseline untouched.

use rustc_hash::FxHashMap;

use crate::config::Series;
use crate::scale::Categories;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackSegment {
    pub start: f64,
    pub end: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StackLayout {
    segments: FxHashMap<(usize, usize), StackSegment>,
    positive: Vec<f64>,
    negative: Vec<f64>,
}

impl StackLayout {
    /// `series` pairs each series with its index in the configured series list.
    pub fn build<'a>(
        series: impl IntoIterator<Item = (usize, &'a Series)>,
        categories: &Categories,
    ) -> Self {
        let mut positive = vec![0.0; categories.len()];
        let mut negative = vec![0.0; categories.len()];
        let mut segments = FxHashMap::default();

        for (series_index, s) in series {
            for (i, p) in s.data.iter().enumerate() {
                if !p.y.is_finite() {
                    continue;
                }
                let Some(cat) = categories.index_of_point(p, i) else {
                    continue;
                };
                let running = if p.y >= 0.0 {
                    &mut positive[cat]
                } else {
                    &mut negative[cat]
                };
                let start = *running;
                *running += p.y;
                segments.insert(
                    (series_index, cat),
                    StackSegment {
                        start,
                        end: *running,
                    },
                );
            }
        }

        Self {
            segments,
            positive,
            negative,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment(&self, series_index: usize, category: usize) -> Option<StackSegment> {
        self.segments.get(&(series_index, category)).copied()
    }

    /// Sum of positive values at a category.
    pub fn positive_total(&self, category: usize) -> f64 {
        self.positive.get(category).copied().unwrap_or(0.0)
    }

    pub fn negative_total(&self, category: usize) -> f64 {
        self.negative.get(category).copied().unwrap_or(0.0)
    }

    /// Every stack top and bottom, for the value-axis bounds.
    pub fn extents(&self) -> Vec<f64> {
        self.positive
            .iter()
            .chain(self.negative.iter())
            .copied()
            .collect()
    }
}
