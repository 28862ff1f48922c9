mod chart;
mod config;
mod invalidation;
mod json_contract;

pub use chart::{FrameStats, RasterChart};
pub use config::ChartConfig;
pub use invalidation::DirtyFlag;
pub use json_contract::{
    CHART_CONFIG_JSON_SCHEMA_V1, ChartConfigJsonContractV1, FRAME_STATS_JSON_SCHEMA_V1,
    FrameStatsJsonContractV1,
};
