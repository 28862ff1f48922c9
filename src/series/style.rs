use serde::{Deserialize, Serialize};

use crate::core::{PixelPoint, PixelRect};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, PixelSurface, draw_line, draw_thick_line};

use super::candle::CandleStyle;
use super::column::ColumnStyle;
use super::hilo::HiLoStyle;
use super::hilo_open_close::HiLoOpenCloseStyle;
use super::line::LineStyle;
use super::range_area::RangeAreaStyle;
use super::scatter::ScatterStyle;
use super::step_line::StepLineStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Line,
    Column,
    Bar,
    Candle,
    HiLo,
    HiLoOpenClose,
    Scatter,
    StepLine,
    RangeArea,
}

impl SeriesKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Column => "column",
            Self::Bar => "bar",
            Self::Candle => "candle",
            Self::HiLo => "hi_lo",
            Self::HiLoOpenClose => "hi_lo_open_close",
            Self::Scatter => "scatter",
            Self::StepLine => "step_line",
            Self::RangeArea => "range_area",
        }
    }

    /// Kinds whose marks occupy a share of a category slot.
    #[must_use]
    pub const fn uses_side_by_side(self) -> bool {
        matches!(
            self,
            Self::Column | Self::Bar | Self::Candle | Self::HiLo | Self::HiLoOpenClose
        )
    }

    /// Bars draw column geometry with the plot axes swapped.
    #[must_use]
    pub const fn flips_transposition(self) -> bool {
        matches!(self, Self::Bar)
    }
}

/// Outline drawn around or along a filled mark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    #[serde(default = "default_stroke_width")]
    pub width: f64,
}

pub(crate) fn default_stroke_width() -> f64 {
    1.0
}

impl StrokeStyle {
    #[must_use]
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }

    pub fn validate(self) -> ChartResult<()> {
        validate_stroke_width(self.width)
    }
}

pub(crate) fn validate_stroke_width(width: f64) -> ChartResult<()> {
    if !width.is_finite() || width <= 0.0 {
        return Err(ChartError::InvalidData(
            "stroke width must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

/// Straight stroke of `width` pixels; one pixel wide strokes stay aliased.
pub(crate) fn draw_stroke(
    surface: &mut PixelSurface,
    from: PixelPoint,
    to: PixelPoint,
    width: f64,
    color: Color,
    clip: PixelRect,
) {
    if width > 1.0 && from != to {
        draw_thick_line(surface, from, to, width, color, Some(clip));
    } else {
        draw_line(surface, from, to, color, Some(clip));
    }
}

/// Style of one series, tagged by kind. Selects the segment variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeriesStyle {
    Line(LineStyle),
    Column(ColumnStyle),
    Bar(ColumnStyle),
    Candle(CandleStyle),
    HiLo(HiLoStyle),
    HiLoOpenClose(HiLoOpenCloseStyle),
    Scatter(ScatterStyle),
    StepLine(StepLineStyle),
    RangeArea(RangeAreaStyle),
}

impl SeriesStyle {
    #[must_use]
    pub fn kind(&self) -> SeriesKind {
        match self {
            Self::Line(_) => SeriesKind::Line,
            Self::Column(_) => SeriesKind::Column,
            Self::Bar(_) => SeriesKind::Bar,
            Self::Candle(_) => SeriesKind::Candle,
            Self::HiLo(_) => SeriesKind::HiLo,
            Self::HiLoOpenClose(_) => SeriesKind::HiLoOpenClose,
            Self::Scatter(_) => SeriesKind::Scatter,
            Self::StepLine(_) => SeriesKind::StepLine,
            Self::RangeArea(_) => SeriesKind::RangeArea,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Line(style) => style.validate(),
            Self::Column(style) | Self::Bar(style) => style.validate(),
            Self::Candle(style) => style.validate(),
            Self::HiLo(style) => style.validate(),
            Self::HiLoOpenClose(style) => style.validate(),
            Self::Scatter(style) => style.validate(),
            Self::StepLine(style) => style.validate(),
            Self::RangeArea(style) => style.validate(),
        }
    }
}
