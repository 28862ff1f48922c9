//! Fast series segments: window, project, color and rasterize one series
//! straight into the shared pixel surface.

mod candle;
mod color;
mod column;
mod hilo;
mod hilo_open_close;
mod layout;
mod line;
mod ohlc;
mod projection;
mod range_area;
mod scatter;
mod segment;
mod selection;
mod step_line;
mod style;

pub use candle::{CandleSegment, CandleStyle};
pub use color::{ColorCache, ColorSource, Palette, PaletteMode, resolve_color};
pub use column::{ColumnSegment, ColumnStyle, column_origin};
pub use hilo::{HiLoSegment, HiLoStyle};
pub use hilo_open_close::{HiLoOpenCloseSegment, HiLoOpenCloseStyle};
pub use layout::SideBySideInfo;
pub use line::{LineSegment, LineStyle};
pub use ohlc::{ComparisonMode, align_high_low};
pub use range_area::{RangeAreaSegment, RangeAreaStyle};
pub use scatter::{MarkerShape, MarkerVertices, ScatterSegment, ScatterStyle, marker_polygon};
pub use segment::{FastSegment, SegmentStats, UpdateContext};
pub use selection::{PointSelection, SelectionState, SeriesSelection};
pub use step_line::{StepLineSegment, StepLineStyle};
pub use style::{SeriesKind, SeriesStyle, StrokeStyle};
