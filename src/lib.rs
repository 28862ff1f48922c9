//! chart-raster: high-volume series rendering straight into a pixel surface.
//!
//! Each fast series windows its data to the visible x range, projects the
//! surviving points through the axis transformer, resolves per-point colors
//! and rasterizes primitives into one shared ARGB buffer owned by
//! [`RasterChart`].

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod series;
pub mod telemetry;

pub use api::{ChartConfig, FrameStats, RasterChart};
pub use error::{ChartError, ChartResult};
