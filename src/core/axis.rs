use serde::{Deserialize, Serialize};

use crate::core::types::DoubleRange;
use crate::error::{ChartError, ChartResult};

/// Screen direction an axis is laid out along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisOrientation {
    /// Coefficient grows left to right.
    Horizontal,
    /// Coefficient grows bottom to top (screen y grows downwards).
    Vertical,
}

/// Per-axis projection state read by segments every frame.
///
/// For logarithmic axes `visible_range` is expressed in exponent space
/// (`log_base` units), the same space `transform_value` maps into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisState {
    pub visible_range: DoubleRange,
    #[serde(default)]
    pub inverted: bool,
    #[serde(default)]
    pub logarithmic: bool,
    #[serde(default = "default_log_base")]
    pub log_base: f64,
    pub rendered_size: f64,
    #[serde(default)]
    pub rendered_offset: f64,
}

fn default_log_base() -> f64 {
    10.0
}

impl AxisState {
    /// Linear, non-inverted axis spanning `rendered_size` pixels from offset 0.
    #[must_use]
    pub fn new(visible_start: f64, visible_end: f64, rendered_size: f64) -> Self {
        Self {
            visible_range: DoubleRange::new(visible_start, visible_end),
            inverted: false,
            logarithmic: false,
            log_base: default_log_base(),
            rendered_size,
            rendered_offset: 0.0,
        }
    }

    #[must_use]
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Switches the axis to logarithmic mapping; the visible range is then
    /// read as exponents of `base`.
    #[must_use]
    pub fn with_log_base(mut self, base: f64) -> Self {
        self.logarithmic = true;
        self.log_base = base;
        self
    }

    #[must_use]
    pub fn with_rendered_offset(mut self, offset: f64) -> Self {
        self.rendered_offset = offset;
        self
    }

    #[must_use]
    pub fn with_visible_range(mut self, start: f64, end: f64) -> Self {
        self.visible_range = DoubleRange::new(start, end);
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.visible_range.start.is_finite() || !self.visible_range.end.is_finite() {
            return Err(ChartError::InvalidData(
                "axis visible range must be finite".to_owned(),
            ));
        }
        if !self.rendered_size.is_finite() || self.rendered_size < 0.0 {
            return Err(ChartError::InvalidData(
                "axis rendered size must be finite and >= 0".to_owned(),
            ));
        }
        if !self.rendered_offset.is_finite() {
            return Err(ChartError::InvalidData(
                "axis rendered offset must be finite".to_owned(),
            ));
        }
        if self.logarithmic
            && (!self.log_base.is_finite() || self.log_base <= 0.0 || self.log_base == 1.0)
        {
            return Err(ChartError::InvalidData(
                "logarithmic base must be finite, > 0 and != 1".to_owned(),
            ));
        }
        Ok(())
    }

    /// Maps a data value into the space the visible range is expressed in.
    #[must_use]
    pub fn transform_value(self, value: f64) -> f64 {
        if self.logarithmic {
            if value > 0.0 { value.log(self.log_base) } else { value }
        } else {
            value
        }
    }

    /// Unclamped position of `value` inside the visible range.
    ///
    /// Values outside the range yield coefficients outside `[0, 1]`; a
    /// zero-length range yields non-finite coefficients.
    #[must_use]
    pub fn value_to_coefficient(self, value: f64) -> f64 {
        let start = self.visible_range.start;
        let end = self.visible_range.end;
        let coefficient = (self.transform_value(value) - start) / (end - start);
        if self.inverted {
            1.0 - coefficient
        } else {
            coefficient
        }
    }

    #[must_use]
    pub fn coefficient_to_value(self, coefficient: f64) -> f64 {
        let coefficient = if self.inverted {
            1.0 - coefficient
        } else {
            coefficient
        };
        let start = self.visible_range.start;
        let transformed = start + coefficient * (self.visible_range.end - start);
        if self.logarithmic {
            self.log_base.powf(transformed)
        } else {
            transformed
        }
    }

    /// Places a coefficient on screen along `orientation`.
    #[must_use]
    pub fn coefficient_to_pixel(self, coefficient: f64, orientation: AxisOrientation) -> f64 {
        match orientation {
            AxisOrientation::Horizontal => self.rendered_offset + self.rendered_size * coefficient,
            AxisOrientation::Vertical => {
                self.rendered_offset + self.rendered_size * (1.0 - coefficient)
            }
        }
    }

    #[must_use]
    pub fn pixel_to_coefficient(self, pixel: f64, orientation: AxisOrientation) -> f64 {
        let normalized = (pixel - self.rendered_offset) / self.rendered_size;
        match orientation {
            AxisOrientation::Horizontal => normalized,
            AxisOrientation::Vertical => 1.0 - normalized,
        }
    }

    #[must_use]
    pub fn value_to_pixel(self, value: f64, orientation: AxisOrientation) -> f64 {
        self.coefficient_to_pixel(self.value_to_coefficient(value), orientation)
    }

    #[must_use]
    pub fn pixel_to_value(self, pixel: f64, orientation: AxisOrientation) -> f64 {
        self.coefficient_to_value(self.pixel_to_coefficient(pixel, orientation))
    }

    /// Visible range expressed in data units (exponents resolved for log axes).
    #[must_use]
    pub fn visible_value_range(self) -> DoubleRange {
        if self.logarithmic {
            DoubleRange::new(
                self.log_base.powf(self.visible_range.start),
                self.log_base.powf(self.visible_range.end),
            )
        } else {
            self.visible_range
        }
    }

    /// Axis units covered by one rendered pixel, in transformed space.
    #[must_use]
    pub fn units_per_pixel(self) -> f64 {
        (self.visible_range.delta() / self.rendered_size).abs()
    }
}
