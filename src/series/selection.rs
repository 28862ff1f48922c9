use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::render::Color;

fn default_selection_color() -> Color {
    Color::rgb(255, 140, 0)
}

/// Whole-series selection shared by every series of one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSelection {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub selected: IndexSet<String>,
    #[serde(default = "default_selection_color")]
    pub color: Color,
}

impl Default for SeriesSelection {
    fn default() -> Self {
        Self {
            enabled: false,
            selected: IndexSet::new(),
            color: default_selection_color(),
        }
    }
}

/// Point-level selection of one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSelection {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub selected: IndexSet<usize>,
    #[serde(default = "default_selection_color")]
    pub color: Color,
}

impl Default for PointSelection {
    fn default() -> Self {
        Self {
            enabled: false,
            selected: IndexSet::new(),
            color: default_selection_color(),
        }
    }
}

impl PointSelection {
    #[must_use]
    pub fn is_selected(&self, index: usize) -> bool {
        self.enabled && self.selected.contains(&index)
    }
}

/// Selection read by the color resolver every frame.
///
/// The host mutates it between frames; segments never cache it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    #[serde(default)]
    pub series: SeriesSelection,
    #[serde(default)]
    pub points: IndexMap<String, PointSelection>,
}

impl SelectionState {
    /// Series selection color when `series_id` is selected and series
    /// selection is enabled.
    #[must_use]
    pub fn series_color(&self, series_id: &str) -> Option<Color> {
        (self.series.enabled && self.series.selected.contains(series_id))
            .then_some(self.series.color)
    }

    #[must_use]
    pub fn point_selection(&self, series_id: &str) -> Option<&PointSelection> {
        self.points.get(series_id)
    }

    pub fn select_series(&mut self, series_id: impl Into<String>) {
        self.series.selected.insert(series_id.into());
    }

    pub fn deselect_series(&mut self, series_id: &str) -> bool {
        self.series.selected.shift_remove(series_id)
    }

    pub fn select_point(&mut self, series_id: impl Into<String>, index: usize) {
        self.points
            .entry(series_id.into())
            .or_default()
            .selected
            .insert(index);
    }

    pub fn deselect_point(&mut self, series_id: &str, index: usize) -> bool {
        self.points
            .get_mut(series_id)
            .is_some_and(|selection| selection.selected.shift_remove(&index))
    }

    pub fn set_point_selection_enabled(&mut self, series_id: impl Into<String>, enabled: bool) {
        self.points.entry(series_id.into()).or_default().enabled = enabled;
    }

    /// Drops every selection entry of a removed series.
    pub fn forget_series(&mut self, series_id: &str) {
        self.series.selected.shift_remove(series_id);
        self.points.shift_remove(series_id);
    }

    pub fn clear(&mut self) {
        self.series.selected.clear();
        for selection in self.points.values_mut() {
            selection.selected.clear();
        }
    }
}
