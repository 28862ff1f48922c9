pub mod axis;
pub mod convert;
pub mod observable;
pub mod series_data;
pub mod transformer;
pub mod types;
pub mod windowing;

pub use axis::{AxisOrientation, AxisState};
pub use observable::Observable;
pub use series_data::{OhlcSample, SeriesChannels, SeriesData, XySample};
pub use transformer::{CartesianTransformer, Transformer};
pub use types::{DoubleRange, PixelPoint, PixelRect, Viewport};
pub use windowing::{
    DecimationTolerance, IndexWindow, decimate_window, indexed_window, linear_window,
    visible_window,
};
