use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Offsets, in x data units, of one series' share of a category slot.
///
/// Series that place marks side by side (columns, candles, hi-lo) split a
/// slot of fixed width; each gets `[start, end]` around the point's x value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SideBySideInfo {
    pub start: f64,
    pub median: f64,
    pub end: f64,
}

impl Default for SideBySideInfo {
    fn default() -> Self {
        Self::centered(0.8)
    }
}

impl SideBySideInfo {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            median: (start + end) * 0.5,
            end,
        }
    }

    /// Whole slot of `width` centered on the x value.
    #[must_use]
    pub fn centered(width: f64) -> Self {
        Self::new(-width * 0.5, width * 0.5)
    }

    /// Share `position` of `count` equal shares of a `slot_width` slot.
    pub fn for_slot(slot_width: f64, position: usize, count: usize) -> ChartResult<Self> {
        if !slot_width.is_finite() || slot_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "side-by-side slot width must be finite and > 0".to_owned(),
            ));
        }
        if position >= count {
            return Err(ChartError::InvalidData(format!(
                "side-by-side position {position} out of {count} shares"
            )));
        }
        let share = slot_width / count as f64;
        let start = -slot_width * 0.5 + share * position as f64;
        Ok(Self::new(start, start + share))
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.end - self.start
    }

    /// Shrinks `[start, end]` symmetrically by `spacing` (a `[0, 1]` ratio
    /// of the share width). Out-of-range ratios are clamped.
    #[must_use]
    pub fn with_spacing(self, spacing: f64) -> (f64, f64) {
        let spacing = if spacing.is_finite() {
            spacing.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let inset = self.width() * spacing * 0.5;
        (self.start + inset, self.end - inset)
    }
}

pub(crate) fn validate_spacing(spacing: f64) -> ChartResult<()> {
    if !spacing.is_finite() || !(0.0..=1.0).contains(&spacing) {
        return Err(ChartError::InvalidData(
            "spacing must be within [0, 1]".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::SideBySideInfo;

    #[test]
    fn spacing_shrinks_about_the_center() {
        let info = SideBySideInfo::new(-0.5, 0.5);
        let (start, end) = info.with_spacing(0.2);
        assert!((start + 0.4).abs() <= 1e-12);
        assert!((end - 0.4).abs() <= 1e-12);
    }

    #[test]
    fn slot_shares_tile_the_slot() {
        let first = SideBySideInfo::for_slot(0.9, 0, 3).expect("valid share");
        let last = SideBySideInfo::for_slot(0.9, 2, 3).expect("valid share");
        assert!((first.start + 0.45).abs() <= 1e-12);
        assert!((last.end - 0.45).abs() <= 1e-12);
        assert!((first.median + 0.3).abs() <= 1e-12);
    }
}
