use serde::{Deserialize, Serialize};

use crate::core::series_data::OhlcChannels;
use crate::render::Color;

pub(crate) fn default_bull_color() -> Color {
    Color::rgb(38, 166, 154)
}

pub(crate) fn default_bear_color() -> Color {
    Color::rgb(239, 83, 80)
}

/// Picks the bull or bear brush of financial marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMode {
    /// Bullish when `close >= open`.
    #[default]
    None,
    /// Bullish when the open does not fall below the previous open.
    Open,
    High,
    Low,
    Close,
}

impl ComparisonMode {
    /// Hollow bodies are stroked instead of filled: any comparison mode
    /// other than `None` with a rising body.
    #[must_use]
    pub fn is_hollow(self, open: f64, close: f64) -> bool {
        self != Self::None && close > open
    }
}

/// Forces `high >= max(open, close)` and `low <= min(open, close)` on a
/// malformed bar.
///
/// The branch order matters when several bounds are violated at once:
/// a high below the body is first swapped with a smaller low, then raised to
/// open, then to close; a low above the body is first lowered to close, then
/// to open, then swapped with a smaller high. Non-finite inputs pass through.
#[must_use]
pub fn align_high_low(open: f64, high: f64, low: f64, close: f64) -> (f64, f64) {
    let (mut high, mut low) = (high, low);

    if high < open.max(close) {
        if high < low {
            std::mem::swap(&mut high, &mut low);
        }
        if high < open {
            high = open;
        }
        if high < close {
            high = close;
        }
    }

    if low > open.min(close) {
        if low > close {
            low = close;
        }
        if low > open {
            low = open;
        }
        if low > high {
            std::mem::swap(&mut high, &mut low);
        }
    }

    (high, low)
}

/// Bull/bear classification of point `index` under `mode`.
///
/// The first point, and points whose previous value is not finite, count as
/// bullish in the previous-value modes.
pub(crate) fn is_bullish(mode: ComparisonMode, channels: OhlcChannels<'_>, index: usize) -> bool {
    let compared = match mode {
        ComparisonMode::None => return channels.close[index] >= channels.open[index],
        ComparisonMode::Open => channels.open,
        ComparisonMode::High => channels.high,
        ComparisonMode::Low => channels.low,
        ComparisonMode::Close => channels.close,
    };
    let Some(previous) = index.checked_sub(1).map(|previous| compared[previous]) else {
        return true;
    };
    !previous.is_finite() || compared[index] >= previous
}

#[cfg(test)]
mod tests {
    use super::{ComparisonMode, align_high_low};

    #[test]
    fn high_below_body_and_low_above_body_swap_first() {
        assert_eq!(align_high_low(10.0, 7.0, 12.0, 8.0), (12.0, 7.0));
    }

    #[test]
    fn well_formed_bar_is_untouched() {
        assert_eq!(align_high_low(10.0, 14.0, 6.0, 12.0), (14.0, 6.0));
    }

    #[test]
    fn high_inside_body_is_raised_to_the_top_edge() {
        assert_eq!(align_high_low(10.0, 11.0, 9.0, 12.0), (12.0, 9.0));
        assert_eq!(align_high_low(10.0, 12.0, 11.0, 12.0), (12.0, 10.0));
    }

    #[test]
    fn hollow_requires_a_comparison_mode() {
        assert!(!ComparisonMode::None.is_hollow(1.0, 2.0));
        assert!(ComparisonMode::Close.is_hollow(1.0, 2.0));
        assert!(!ComparisonMode::Close.is_hollow(2.0, 1.0));
    }
}
