use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{AxisState, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;
use crate::series::{Palette, SeriesStyle};

/// Host bootstrap configuration.
///
/// Serializable so a host can persist and reload the plot setup, series
/// styles included, without inventing its own format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub viewport: Viewport,
    #[serde(default = "default_background")]
    pub background: Color,
    pub x_axis: AxisState,
    pub y_axis: AxisState,
    #[serde(default)]
    pub transposed: bool,
    #[serde(default)]
    pub palette: Option<Palette>,
    /// Split each category slot between side-by-side series instead of
    /// overlapping them.
    #[serde(default = "default_side_by_side")]
    pub side_by_side: bool,
    /// Category slot width in x data units.
    #[serde(default = "default_slot_width")]
    pub slot_width: f64,
    /// Series created on construction, in z-order.
    #[serde(default)]
    pub series: IndexMap<String, SeriesStyle>,
}

fn default_background() -> Color {
    Color::WHITE
}

fn default_side_by_side() -> bool {
    true
}

fn default_slot_width() -> f64 {
    0.8
}

impl ChartConfig {
    /// Linear axes over `[x_start, x_end]` and `[0, 1]`, sized to the viewport.
    #[must_use]
    pub fn new(viewport: Viewport, x_start: f64, x_end: f64) -> Self {
        Self {
            viewport,
            background: default_background(),
            x_axis: AxisState::new(x_start, x_end, f64::from(viewport.width)),
            y_axis: AxisState::new(0.0, 1.0, f64::from(viewport.height)),
            transposed: false,
            palette: None,
            side_by_side: default_side_by_side(),
            slot_width: default_slot_width(),
            series: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_y_range(mut self, start: f64, end: f64) -> Self {
        self.y_axis = self.y_axis.with_visible_range(start, end);
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, axis: AxisState) -> Self {
        self.x_axis = axis;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, axis: AxisState) -> Self {
        self.y_axis = axis;
        self
    }

    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn with_transposed(mut self, transposed: bool) -> Self {
        self.transposed = transposed;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    #[must_use]
    pub fn with_side_by_side(mut self, side_by_side: bool) -> Self {
        self.side_by_side = side_by_side;
        self
    }

    #[must_use]
    pub fn with_slot_width(mut self, slot_width: f64) -> Self {
        self.slot_width = slot_width;
        self
    }

    #[must_use]
    pub fn with_series(mut self, id: impl Into<String>, style: SeriesStyle) -> Self {
        self.series.insert(id.into(), style);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.x_axis.validate()?;
        self.y_axis.validate()?;
        if let Some(palette) = &self.palette {
            palette.validate()?;
        }
        if !self.slot_width.is_finite() || self.slot_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "slot width must be finite and > 0".to_owned(),
            ));
        }
        for style in self.series.values() {
            style.validate()?;
        }
        Ok(())
    }
}
