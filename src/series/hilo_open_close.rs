use serde::{Deserialize, Serialize};

use crate::core::{DoubleRange, SeriesData};
use crate::error::ChartResult;
use crate::render::Color;

use super::layout::validate_spacing;
use super::ohlc::{
    ComparisonMode, align_high_low, default_bear_color, default_bull_color, is_bullish,
};
use super::segment::{SegmentState, SegmentStats, UpdateContext};
use super::style::{default_stroke_width, draw_stroke, validate_stroke_width};

const KIND: &str = "hi_lo_open_close";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiLoOpenCloseStyle {
    #[serde(default = "default_bull_color")]
    pub bull_color: Color,
    #[serde(default = "default_bear_color")]
    pub bear_color: Color,
    #[serde(default)]
    pub comparison_mode: ComparisonMode,
    #[serde(default)]
    pub spacing: f64,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
}

impl Default for HiLoOpenCloseStyle {
    fn default() -> Self {
        Self {
            bull_color: default_bull_color(),
            bear_color: default_bear_color(),
            comparison_mode: ComparisonMode::None,
            spacing: 0.0,
            stroke_width: default_stroke_width(),
        }
    }
}

impl HiLoOpenCloseStyle {
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
    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_spacing(self.spacing)?;
        validate_stroke_width(self.stroke_width)
    }
}

/// OHLC bar: high-low wick at the slot median, an open tick towards the
/// slot start and a close tick towards the slot end.
#[derive(Debug, Clone)]
pub struct HiLoOpenCloseSegment {
    style: HiLoOpenCloseStyle,
    pub(crate) state: SegmentState,
}

impl HiLoOpenCloseSegment {
    #[must_use]
    pub fn new(style: HiLoOpenCloseStyle) -> Self {
        Self {
            style,
            state: SegmentState::default(),
        }
    }

    #[must_use]
    pub fn style(&self) -> &HiLoOpenCloseStyle {
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
        let side_by_side = self.state.side_by_side;
        let (start, end) = side_by_side.with_spacing(self.style.spacing);
        let width = self.style.stroke_width;
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
            let median = x + side_by_side.median;
            let points = [
                transformer.transform_to_visible(median, high),
                transformer.transform_to_visible(median, low),
                transformer.transform_to_visible(x + start, open),
                transformer.transform_to_visible(median, open),
                transformer.transform_to_visible(median, close),
                transformer.transform_to_visible(x + end, close),
            ];
            if !points.iter().all(|point| point.is_finite()) {
                stats.skipped += 1;
                continue;
            }

            let brush = if is_bullish(self.style.comparison_mode, channels, index) {
                self.style.bull_color
            } else {
                self.style.bear_color
            };
            let color = self.state.colors.resolve(&ctx.colors, index, Some(brush));
            let [high_point, low_point, open_tick, open_wick, close_wick, close_tick] = points;
            draw_stroke(ctx.surface, high_point, low_point, width, color, clip);
            draw_stroke(ctx.surface, open_tick, open_wick, width, color, clip);
            draw_stroke(ctx.surface, close_wick, close_tick, width, color, clip);
            stats.drawn += 1;
        }

        self.state.clear_scratch();
        stats
    }
}
