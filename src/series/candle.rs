use serde::{Deserialize, Serialize};

use crate::core::{DoubleRange, PixelPoint, SeriesData};
use crate::error::ChartResult;
use crate::render::{Color, fill_rect, stroke_rect};

use super::layout::validate_spacing;
use super::ohlc::{
    ComparisonMode, align_high_low, default_bear_color, default_bull_color, is_bullish,
};
use super::segment::{SegmentState, SegmentStats, UpdateContext};
use super::style::{default_stroke_width, draw_stroke, validate_stroke_width};

const KIND: &str = "candle";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandleStyle {
    #[serde(default = "default_bull_color")]
    pub bull_color: Color,
    #[serde(default = "default_bear_color")]
    pub bear_color: Color,
    #[serde(default)]
    pub comparison_mode: ComparisonMode,
    #[serde(default)]
    pub spacing: f64,
    #[serde(default = "default_stroke_width")]
    pub wick_width: f64,
}

impl Default for CandleStyle {
    fn default() -> Self {
        Self {
            bull_color: default_bull_color(),
            bear_color: default_bear_color(),
            comparison_mode: ComparisonMode::None,
            spacing: 0.0,
            wick_width: default_stroke_width(),
        }
    }
}

impl CandleStyle {
    #[must_use]
    pub fn with_colors(mut self, bull_color: Color, bear_color: Color) -> Self {
        self.bull_color = bull_color;
        self.bear_color = bear_color;
        self
    }

    #[must_use]
    pub fn with_comparison_mode(mut self, mode: ComparisonMode) -> Self {
        self.comparison_mode = mode;
        self
    }

    #[must_use]
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    #[must_use]
    pub fn with_wick_width(mut self, wick_width: f64) -> Self {
        self.wick_width = wick_width;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_spacing(self.spacing)?;
        validate_stroke_width(self.wick_width)
    }
}

/// Candlestick: wicks from high to the body and from the body to low, then
/// the open/close body, filled or (hollow) stroked.
#[derive(Debug, Clone)]
pub struct CandleSegment {
    style: CandleStyle,
    pub(crate) state: SegmentState,
}

impl CandleSegment {
    #[must_use]
    pub fn new(style: CandleStyle) -> Self {
        Self {
            style,
            state: SegmentState::default(),
        }
    }

    #[must_use]
    pub fn style(&self) -> &CandleStyle {
        &self.style
    }

    pub(crate) fn set_data(&mut self, data: SeriesData) -> ChartResult<()> {
        let channels = data.require_ohlc(KIND)?;
        let y_range = DoubleRange::from_finite_values(
            channels
                .open
                .iter()
                .chain(channels.high)
                .chain(channels.low)
                .chain(channels.close),
        );
        self.state.attach(data, y_range);
        Ok(())
    }

    pub(crate) fn update(&mut self, ctx: &mut UpdateContext<'_>) -> SegmentStats {
        let mut stats = SegmentStats::default();
        self.state.clear_scratch();

        let Some(window) = self.state.window(ctx.transformer) else {
            return stats;
        };
        let Some(Ok(channels)) = self.state.data.as_ref().map(|data| data.require_ohlc(KIND))
        else {
            return stats;
        };

        let transformer = ctx.transformer;
        let transposed = transformer.is_transposed();
        let side_by_side = self.state.side_by_side;
        let (start, end) = side_by_side.with_spacing(self.style.spacing);
        let clip = ctx.clip_rect();
        stats.windowed = window.point_count();
        self.state.colors.reset(window);

        for index in window.indices() {
            let x = channels.x[index];
            let (open, close) = (channels.open[index], channels.close[index]);
            let (high, low) = align_high_low(
                open,
                channels.high[index],
                channels.low[index],
                close,
            );
            if ![x, open, high, low, close].iter().all(|value| value.is_finite()) {
                stats.skipped += 1;
                continue;
            }

            let median = x + side_by_side.median;
            let open_corner = transformer.transform_to_visible(x + start, open);
            let close_corner = transformer.transform_to_visible(x + end, close);
            let high_point = transformer.transform_to_visible(median, high);
            let upper_edge = transformer.transform_to_visible(median, open.max(close));
            let lower_edge = transformer.transform_to_visible(median, open.min(close));
            let low_point = transformer.transform_to_visible(median, low);
            if ![open_corner, close_corner, high_point, upper_edge, lower_edge, low_point]
                .iter()
                .all(|point| point.is_finite())
            {
                stats.skipped += 1;
                continue;
            }
            let is_bull = is_bullish(self.style.comparison_mode, channels, index);
            let brush = if is_bull {
                self.style.bull_color
            } else {
                self.style.bear_color
            };
            let color = self.state.colors.resolve(&ctx.colors, index, Some(brush));

            draw_stroke(ctx.surface, high_point, upper_edge, self.style.wick_width, color, clip);
            draw_stroke(ctx.surface, lower_edge, low_point, self.style.wick_width, color, clip);

            let body = Body::ordered(open_corner, close_corner, transposed);
            if self.style.comparison_mode.is_hollow(open, close) {
                stroke_rect(
                    ctx.surface,
                    body.left,
                    body.top,
                    body.right,
                    body.bottom,
                    color,
                    Some(clip),
                );
            } else {
                fill_rect(
                    ctx.surface,
                    body.left,
                    body.top,
                    body.right,
                    body.bottom,
                    color,
                    Some(clip),
                );
            }
            stats.drawn += 1;
        }

        self.state.clear_scratch();
        stats
    }
}

/// Candle body in pixel space with `top <= bottom` and `left <= right`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Body {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Body {
    /// Orders the open/close corners so the visually lower edge comes
    /// second whatever the axis direction. A body thinner than one pixel
    /// along the value axis is widened to one.
    pub(crate) fn ordered(open: PixelPoint, close: PixelPoint, transposed: bool) -> Self {
        let mut body = Self {
            left: open.x.min(close.x),
            top: open.y.min(close.y),
            right: open.x.max(close.x),
            bottom: open.y.max(close.y),
        };
        if transposed {
            if body.right - body.left < 1.0 {
                body.right = body.left + 1.0;
            }
        } else if body.bottom - body.top < 1.0 {
            body.bottom = body.top + 1.0;
        }
        body
    }
}
