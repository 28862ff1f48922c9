use serde::{Deserialize, Serialize};

use crate::core::axis::{AxisOrientation, AxisState};
use crate::core::types::{PixelPoint, PixelRect};
use crate::error::ChartResult;

/// Data-to-pixel mapping consumed by segments.
///
/// Implementations must be pure: calling `transform_to_visible` twice with
/// the same input yields the same output for the lifetime of a frame.
pub trait Transformer: Send + Sync {
    fn transform_to_visible(&self, x_value: f64, y_value: f64) -> PixelPoint;

    fn x_axis(&self) -> &AxisState;

    fn y_axis(&self) -> &AxisState;

    /// `true` when the x axis is laid out vertically and the y axis horizontally.
    fn is_transposed(&self) -> bool;

    /// Device-pixel bounds of the plot area.
    fn rendered_rect(&self) -> PixelRect;
}

/// Two-axis cartesian transformer with optional transposition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartesianTransformer {
    pub x_axis: AxisState,
    pub y_axis: AxisState,
    #[serde(default)]
    pub transposed: bool,
}

impl CartesianTransformer {
    #[must_use]
    pub fn new(x_axis: AxisState, y_axis: AxisState) -> Self {
        Self {
            x_axis,
            y_axis,
            transposed: false,
        }
    }

    #[must_use]
    pub fn with_transposed(mut self, transposed: bool) -> Self {
        self.transposed = transposed;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        self.x_axis.validate()?;
        self.y_axis.validate()
    }

    #[must_use]
    pub fn x_orientation(self) -> AxisOrientation {
        if self.transposed {
            AxisOrientation::Vertical
        } else {
            AxisOrientation::Horizontal
        }
    }

    #[must_use]
    pub fn y_orientation(self) -> AxisOrientation {
        if self.transposed {
            AxisOrientation::Horizontal
        } else {
            AxisOrientation::Vertical
        }
    }

    /// Inverse of `transform_to_visible`.
    #[must_use]
    pub fn pixel_to_value(self, point: PixelPoint) -> (f64, f64) {
        let (x_pixel, y_pixel) = if self.transposed {
            (point.y, point.x)
        } else {
            (point.x, point.y)
        };
        (
            self.x_axis.pixel_to_value(x_pixel, self.x_orientation()),
            self.y_axis.pixel_to_value(y_pixel, self.y_orientation()),
        )
    }
}

impl Transformer for CartesianTransformer {
    fn transform_to_visible(&self, x_value: f64, y_value: f64) -> PixelPoint {
        let x_pixel = self.x_axis.value_to_pixel(x_value, self.x_orientation());
        let y_pixel = self.y_axis.value_to_pixel(y_value, self.y_orientation());
        if self.transposed {
            PixelPoint::new(y_pixel, x_pixel)
        } else {
            PixelPoint::new(x_pixel, y_pixel)
        }
    }

    fn x_axis(&self) -> &AxisState {
        &self.x_axis
    }

    fn y_axis(&self) -> &AxisState {
        &self.y_axis
    }

    fn is_transposed(&self) -> bool {
        self.transposed
    }

    fn rendered_rect(&self) -> PixelRect {
        let (horizontal, vertical) = if self.transposed {
            (self.y_axis, self.x_axis)
        } else {
            (self.x_axis, self.y_axis)
        };
        PixelRect::new(
            horizontal.rendered_offset,
            vertical.rendered_offset,
            horizontal.rendered_size,
            vertical.rendered_size,
        )
    }
}
