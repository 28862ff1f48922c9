//! Typed host inputs to the `f64` channels segments read.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

/// Seconds since the Unix epoch, millisecond precision. X unit of time
/// based series.
#[must_use]
pub fn unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

pub fn channel_value(value: Decimal, channel: &'static str) -> ChartResult<f64> {
    value
        .to_f64()
        .filter(|converted| converted.is_finite())
        .ok_or_else(|| {
            ChartError::InvalidData(format!("`{channel}` value {value} does not fit in f64"))
        })
}
