use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::convert::{channel_value, unix_seconds};
use crate::error::{ChartError, ChartResult};

/// One x/y sample, used to build `SeriesData` from typed inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XySample {
    pub x: f64,
    pub y: f64,
}

impl XySample {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> ChartResult<Self> {
        Ok(Self {
            x: unix_seconds(time),
            y: channel_value(value, "value")?,
        })
    }
}

/// One OHLC sample. Values are not validated against each other: malformed
/// bars are aligned at draw time instead of being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcSample {
    pub time: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl OhlcSample {
    #[must_use]
    pub fn new(time: f64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
        }
    }

    pub fn from_decimal_time(
        time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> ChartResult<Self> {
        Ok(Self::new(
            unix_seconds(time),
            channel_value(open, "open")?,
            channel_value(high, "high")?,
            channel_value(low, "low")?,
            channel_value(close, "close")?,
        ))
    }
}

/// Index-aligned value channels of one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum SeriesChannels {
    Xy {
        x: Vec<f64>,
        y: Vec<f64>,
    },
    HighLow {
        x: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
    },
    Ohlc {
        x: Vec<f64>,
        open: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
    },
}

impl SeriesChannels {
    #[must_use]
    pub fn shape_name(&self) -> &'static str {
        match self {
            Self::Xy { .. } => "xy",
            Self::HighLow { .. } => "high_low",
            Self::Ohlc { .. } => "ohlc",
        }
    }

    #[must_use]
    pub fn x_values(&self) -> &[f64] {
        match self {
            Self::Xy { x, .. } | Self::HighLow { x, .. } | Self::Ohlc { x, .. } => x,
        }
    }

    fn x_values_mut(&mut self) -> &mut Vec<f64> {
        match self {
            Self::Xy { x, .. } | Self::HighLow { x, .. } | Self::Ohlc { x, .. } => x,
        }
    }

    fn validate(&self) -> ChartResult<()> {
        let expected = self.x_values().len();
        let check = |channel: &'static str, values: &[f64]| {
            if values.len() == expected {
                Ok(())
            } else {
                Err(ChartError::ChannelLengthMismatch {
                    channel,
                    expected,
                    actual: values.len(),
                })
            }
        };

        match self {
            Self::Xy { y, .. } => check("y", y),
            Self::HighLow { high, low, .. } => {
                check("high", high)?;
                check("low", low)
            }
            Self::Ohlc {
                open,
                high,
                low,
                close,
                ..
            } => {
                check("open", open)?;
                check("high", high)?;
                check("low", low)?;
                check("close", close)
            }
        }
    }
}

/// Read-only data attached to a segment.
///
/// Deserialization goes through the same validation as [`SeriesData::new`];
/// a serialized `is_linearly_ordered` is recomputed, not trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SeriesDataRepr")]
pub struct SeriesData {
    channels: SeriesChannels,
    is_indexed: bool,
    is_linearly_ordered: bool,
}

#[derive(Deserialize)]
struct SeriesDataRepr {
    channels: SeriesChannels,
    #[serde(default)]
    is_indexed: bool,
}

impl TryFrom<SeriesDataRepr> for SeriesData {
    type Error = ChartError;

    fn try_from(repr: SeriesDataRepr) -> ChartResult<Self> {
        let data = Self::new(repr.channels)?;
        Ok(if repr.is_indexed {
            data.into_indexed()
        } else {
            data
        })
    }
}

impl SeriesData {
    pub fn new(channels: SeriesChannels) -> ChartResult<Self> {
        channels.validate()?;
        let is_linearly_ordered = is_non_decreasing(channels.x_values());
        Ok(Self {
            channels,
            is_indexed: false,
            is_linearly_ordered,
        })
    }

    pub fn xy(x: Vec<f64>, y: Vec<f64>) -> ChartResult<Self> {
        Self::new(SeriesChannels::Xy { x, y })
    }

    pub fn high_low(x: Vec<f64>, high: Vec<f64>, low: Vec<f64>) -> ChartResult<Self> {
        Self::new(SeriesChannels::HighLow { x, high, low })
    }

    pub fn ohlc(
        x: Vec<f64>,
        open: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
    ) -> ChartResult<Self> {
        Self::new(SeriesChannels::Ohlc {
            x,
            open,
            high,
            low,
            close,
        })
    }

    /// Category data: x of point `i` is `i`.
    #[must_use]
    pub fn indexed_y(y: Vec<f64>) -> Self {
        let x = (0..y.len()).map(|index| index as f64).collect();
        Self {
            channels: SeriesChannels::Xy { x, y },
            is_indexed: true,
            is_linearly_ordered: true,
        }
    }

    #[must_use]
    pub fn from_xy_samples(samples: &[XySample]) -> Self {
        let x = samples.iter().map(|sample| sample.x).collect();
        let y = samples.iter().map(|sample| sample.y).collect();
        let channels = SeriesChannels::Xy { x, y };
        let is_linearly_ordered = is_non_decreasing(channels.x_values());
        Self {
            channels,
            is_indexed: false,
            is_linearly_ordered,
        }
    }

    #[must_use]
    pub fn from_ohlc_samples(samples: &[OhlcSample]) -> Self {
        let channels = SeriesChannels::Ohlc {
            x: samples.iter().map(|sample| sample.time).collect(),
            open: samples.iter().map(|sample| sample.open).collect(),
            high: samples.iter().map(|sample| sample.high).collect(),
            low: samples.iter().map(|sample| sample.low).collect(),
            close: samples.iter().map(|sample| sample.close).collect(),
        };
        let is_linearly_ordered = is_non_decreasing(channels.x_values());
        Self {
            channels,
            is_indexed: false,
            is_linearly_ordered,
        }
    }

    /// Re-keys the data onto a category axis, replacing x with point indices.
    #[must_use]
    pub fn into_indexed(mut self) -> Self {
        let x = self.channels.x_values_mut();
        for (index, value) in x.iter_mut().enumerate() {
            *value = index as f64;
        }
        self.is_indexed = true;
        self.is_linearly_ordered = true;
        self
    }

    #[must_use]
    pub fn channels(&self) -> &SeriesChannels {
        &self.channels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.x_values().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_indexed(&self) -> bool {
        self.is_indexed
    }

    #[must_use]
    pub fn is_linearly_ordered(&self) -> bool {
        self.is_linearly_ordered
    }

    #[must_use]
    pub fn x_values(&self) -> &[f64] {
        self.channels.x_values()
    }

    pub(crate) fn require_xy(&self, kind: &str) -> ChartResult<(&[f64], &[f64])> {
        match &self.channels {
            SeriesChannels::Xy { x, y } => Ok((x, y)),
            other => Err(shape_error(kind, "xy", other)),
        }
    }

    pub(crate) fn require_high_low(&self, kind: &str) -> ChartResult<(&[f64], &[f64], &[f64])> {
        match &self.channels {
            SeriesChannels::HighLow { x, high, low } => Ok((x, high, low)),
            // OHLC data carries high/low channels as well.
            SeriesChannels::Ohlc { x, high, low, .. } => Ok((x, high, low)),
            other => Err(shape_error(kind, "high_low", other)),
        }
    }

    pub(crate) fn require_ohlc(&self, kind: &str) -> ChartResult<OhlcChannels<'_>> {
        match &self.channels {
            SeriesChannels::Ohlc {
                x,
                open,
                high,
                low,
                close,
            } => Ok(OhlcChannels {
                x,
                open,
                high,
                low,
                close,
            }),
            other => Err(shape_error(kind, "ohlc", other)),
        }
    }
}

/// Borrowed OHLC channel set.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OhlcChannels<'a> {
    pub x: &'a [f64],
    pub open: &'a [f64],
    pub high: &'a [f64],
    pub low: &'a [f64],
    pub close: &'a [f64],
}

fn shape_error(kind: &str, expected: &str, actual: &SeriesChannels) -> ChartError {
    ChartError::InvalidData(format!(
        "{kind} series expects `{expected}` channels, got `{}`",
        actual.shape_name()
    ))
}

/// `true` when finite x values never decrease; `NaN` entries are ignored.
fn is_non_decreasing(values: &[f64]) -> bool {
    let mut previous = f64::NEG_INFINITY;
    for &value in values {
        if value.is_nan() {
            continue;
        }
        if value < previous {
            return false;
        }
        previous = value;
    }
    true
}
