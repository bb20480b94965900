//! Per-instance interaction state: hidden series and hover.

use avakio_core::Point;
use rustc_hash::FxHashSet;

use crate::config::Series;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HoverTarget {
    pub series_key: String,
    pub point_index: usize,
}

#[derive(Clone, Debug, Default)]
pub struct ChartInstanceState {
    hidden: FxHashSet<String>,
    /// Keys whose initial `hidden` flag has already been applied.
    seen: FxHashSet<String>,
    hover: Option<HoverTarget>,
    pointer: Option<Point>,
}

impl ChartInstanceState {
    pub fn new(series: &[Series]) -> Self {
        let mut state = Self::default();
        state.sync_series(series);
        state
    }

    /// Reconcile with a new series list. A series seen for the first time
    /// starts hidden when its `hidden` flag is set; keys that disappeared are
    /// forgotten.
    pub fn sync_series(&mut self, series: &[Series]) {
        let keys: FxHashSet<&str> = series.iter().map(Series::key).collect();
        self.seen.retain(|k| keys.contains(k.as_str()));
        self.hidden.retain(|k| keys.contains(k.as_str()));

        for s in series {
            if self.seen.insert(s.key().to_string()) && s.hidden {
                self.hidden.insert(s.key().to_string());
            }
        }

        if let Some(hover) = &self.hover {
            let still_there = series
                .iter()
                .find(|s| s.key() == hover.series_key)
                .is_some_and(|s| hover.point_index < s.data.len());
            if !still_there {
                self.clear_hover();
            }
        }
    }

    pub fn is_hidden(&self, key: &str) -> bool {
        self.hidden.contains(key)
    }

    /// Returns `true` when the set changed.
    pub fn hide(&mut self, key: &str) -> bool {
        let changed = self.hidden.insert(key.to_string());
        if changed
            && self
                .hover
                .as_ref()
                .is_some_and(|h| h.series_key == key)
        {
            self.clear_hover();
        }
        changed
    }

    pub fn show(&mut self, key: &str) -> bool {
        self.hidden.remove(key)
    }

    /// Flip visibility; returns the resulting visibility.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.is_hidden(key) {
            self.show(key);
            true
        } else {
            self.hide(key);
            false
        }
    }

    /// Visible series keys in configuration order.
    pub fn visible_keys(&self, series: &[Series]) -> Vec<String> {
        series
            .iter()
            .filter(|s| !self.is_hidden(s.key()))
            .map(|s| s.key().to_string())
            .collect()
    }

    /// Visible series paired with their configured index.
    pub fn visible<'a>(&self, series: &'a [Series]) -> Vec<(usize, &'a Series)> {
        series
            .iter()
            .enumerate()
            .filter(|(_, s)| !self.is_hidden(s.key()))
            .collect()
    }

    pub fn hover(&self) -> Option<&HoverTarget> {
        self.hover.as_ref()
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Returns `true` when the hover target changed.
    pub fn set_hover(&mut self, target: Option<HoverTarget>, pointer: Option<Point>) -> bool {
        self.pointer = pointer;
        if self.hover == target {
            return false;
        }
        self.hover = target;
        true
    }

    pub fn clear_hover(&mut self) {
        self.hover = None;
        self.pointer = None;
    }
}
