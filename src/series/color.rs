use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::IndexWindow;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::selection::PointSelection;

/// Which index picks the palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteMode {
    /// `palette[point_index % len]`.
    #[default]
    PerPoint,
    /// `palette[series_index % len]`: one color for the whole series.
    PerSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub colors: Vec<Color>,
    #[serde(default)]
    pub mode: PaletteMode,
}

impl Palette {
    #[must_use]
    pub fn new(colors: Vec<Color>) -> Self {
        Self {
            colors,
            mode: PaletteMode::PerPoint,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: PaletteMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.colors.is_empty() {
            return Err(ChartError::InvalidData(
                "palette must contain at least one color".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn color_for(&self, point_index: usize, series_index: usize) -> Option<Color> {
        if self.colors.is_empty() {
            return None;
        }
        let slot = match self.mode {
            PaletteMode::PerPoint => point_index,
            PaletteMode::PerSeries => series_index,
        };
        self.colors.get(slot % self.colors.len()).copied()
    }
}

/// Everything the color resolver reads for one series in one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorSource<'a> {
    /// Set when series selection is enabled and this series is selected.
    pub series_selection: Option<Color>,
    pub point_selection: Option<&'a PointSelection>,
    pub point_colors: Option<&'a IndexMap<usize, Color>>,
    pub palette: Option<&'a Palette>,
    pub series_index: usize,
}

/// Resolves the color of one point; first match wins:
/// series selection, point selection, explicit point color, palette,
/// `fallback`, transparent.
#[must_use]
pub fn resolve_color(source: &ColorSource<'_>, point_index: usize, fallback: Option<Color>) -> Color {
    if let Some(color) = source.series_selection {
        return color;
    }
    if let Some(selection) = source
        .point_selection
        .filter(|selection| selection.is_selected(point_index))
    {
        return selection.color;
    }
    if let Some(color) = source
        .point_colors
        .and_then(|colors| colors.get(&point_index))
    {
        return *color;
    }
    if let Some(color) = source
        .palette
        .and_then(|palette| palette.color_for(point_index, source.series_index))
    {
        return color;
    }
    fallback.unwrap_or(Color::TRANSPARENT)
}

/// Frame-local memo of resolved colors over one window.
///
/// Segments reset it at the start of `update` and clear it at the end, so
/// no entry outlives the frame it was resolved in.
#[derive(Debug, Clone, Default)]
pub struct ColorCache {
    base: usize,
    colors: Vec<Option<Color>>,
}

impl ColorCache {
    pub fn reset(&mut self, window: IndexWindow) {
        self.base = window.start;
        self.colors.clear();
        self.colors.resize(window.point_count(), None);
    }

    pub fn resolve(
        &mut self,
        source: &ColorSource<'_>,
        point_index: usize,
        fallback: Option<Color>,
    ) -> Color {
        let slot = point_index
            .checked_sub(self.base)
            .and_then(|offset| self.colors.get_mut(offset));
        match slot {
            Some(Some(color)) => *color,
            Some(empty) => *empty.insert(resolve_color(source, point_index, fallback)),
            None => resolve_color(source, point_index, fallback),
        }
    }

    /// Number of resolved entries.
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.colors.iter().filter(|color| color.is_some()).count()
    }

    pub fn clear(&mut self) {
        self.colors.clear();
        self.base = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::{ColorCache, ColorSource, Palette, PaletteMode};
    use crate::core::IndexWindow;
    use crate::render::Color;

    #[test]
    fn cache_outside_window_still_resolves() {
        let palette = Palette::new(vec![Color::rgb(1, 2, 3)]);
        let source = ColorSource {
            palette: Some(&palette),
            ..ColorSource::default()
        };
        let mut cache = ColorCache::default();
        cache.reset(IndexWindow::new(5, 6));
        assert_eq!(cache.resolve(&source, 2, None), Color::rgb(1, 2, 3));
        assert_eq!(cache.resolved_count(), 0);
        assert_eq!(cache.resolve(&source, 6, None), Color::rgb(1, 2, 3));
        assert_eq!(cache.resolved_count(), 1);
    }

    #[test]
    fn per_series_palette_ignores_point_index() {
        let palette = Palette::new(vec![Color::rgb(10, 0, 0), Color::rgb(20, 0, 0)])
            .with_mode(PaletteMode::PerSeries);
        assert_eq!(palette.color_for(0, 1), Some(Color::rgb(20, 0, 0)));
        assert_eq!(palette.color_for(7, 1), Some(Color::rgb(20, 0, 0)));
    }
}
