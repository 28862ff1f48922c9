use chart_raster::api::{
    CHART_CONFIG_JSON_SCHEMA_V1, ChartConfigJsonContractV1, FRAME_STATS_JSON_SCHEMA_V1,
    FrameStatsJsonContractV1,
};
use chart_raster::core::{AxisState, SeriesData, Viewport};
use chart_raster::render::Color;
use chart_raster::series::{
    CandleStyle, ComparisonMode, LineStyle, MarkerShape, Palette, PaletteMode, ScatterStyle,
    SeriesStyle,
};
use chart_raster::{ChartConfig, FrameStats, RasterChart};

fn sample_config() -> ChartConfig {
    ChartConfig::new(Viewport::new(640, 360), 0.0, 100.0)
        .with_y_axis(AxisState::new(1.0, 4.0, 360.0).with_log_base(10.0))
        .with_background(Color::rgb(16, 16, 24))
        .with_palette(
            Palette::new(vec![Color::rgb(255, 0, 0), Color::rgb(0, 0, 255)])
                .with_mode(PaletteMode::PerSeries),
        )
        .with_side_by_side(false)
        .with_slot_width(0.5)
        .with_series(
            "price",
            SeriesStyle::Line(
                LineStyle::new(Color::rgb(0, 128, 255))
                    .with_stroke_width(2.0)
                    .with_dash_pattern(vec![3.0, 1.0]),
            ),
        )
        .with_series(
            "candles",
            SeriesStyle::Candle(CandleStyle::default().with_comparison_mode(ComparisonMode::Close)),
        )
        .with_series(
            "fills",
            SeriesStyle::Scatter(ScatterStyle::new(Color::BLACK).with_shape(MarkerShape::Diamond)),
        )
}

#[test]
fn config_contract_roundtrips() {
    let config = sample_config();
    let json = config.to_json_contract_v1_pretty().expect("serialize");

    let payload: ChartConfigJsonContractV1 = serde_json::from_str(&json).expect("parse payload");
    assert_eq!(payload.schema_version, CHART_CONFIG_JSON_SCHEMA_V1);

    let restored = ChartConfig::from_json_compat_str(&json).expect("restore");
    assert_eq!(restored, config);
}

#[test]
fn bare_config_json_is_accepted() {
    let config = sample_config();
    let json = serde_json::to_string(&config).expect("serialize");
    let restored = ChartConfig::from_json_compat_str(&json).expect("restore");
    assert_eq!(restored, config);
}

#[test]
fn omitted_fields_take_their_defaults() {
    let json = r#"{
        "viewport": { "width": 200, "height": 100 },
        "x_axis": { "visible_range": { "start": 0.0, "end": 10.0 }, "rendered_size": 200.0 },
        "y_axis": { "visible_range": { "start": 0.0, "end": 1.0 }, "rendered_size": 100.0 },
        "series": { "close": { "kind": "line", "color": { "red": 0, "green": 0, "blue": 0, "alpha": 255 } } }
    }"#;
    let config = ChartConfig::from_json_compat_str(json).expect("parse");

    assert_eq!(config.background, Color::WHITE);
    assert!(config.side_by_side);
    assert!(!config.transposed);
    assert!((config.slot_width - 0.8).abs() < 1e-12);
    assert!(!config.x_axis.logarithmic);
    match &config.series["close"] {
        SeriesStyle::Line(style) => {
            assert!((style.stroke_width - 1.0).abs() < 1e-12);
            assert!(style.dash_pattern.is_none());
        }
        other => panic!("unexpected style: {other:?}"),
    }

    let chart = RasterChart::new(config).expect("chart");
    assert_eq!(chart.series_ids().collect::<Vec<_>>(), ["close"]);
}

#[test]
fn unsupported_schema_version_is_rejected() {
    let json = sample_config().to_json_contract_v1_pretty().expect("serialize");
    let mut payload: serde_json::Value = serde_json::from_str(&json).expect("value");
    payload["schema_version"] = serde_json::json!(2);
    let err = ChartConfig::from_json_compat_str(&payload.to_string()).expect_err("version");
    assert!(err.to_string().contains("unsupported config schema version"));
}

#[test]
fn malformed_json_is_rejected() {
    assert!(ChartConfig::from_json_compat_str("{ not json").is_err());
    assert!(ChartConfig::from_json_compat_str(r#"{ "schema_version": 1 }"#).is_err());
}

#[test]
fn frame_stats_contract_carries_the_frame_totals() {
    let mut chart = RasterChart::new(
        ChartConfig::new(Viewport::new(64, 64), 0.0, 4.0)
            .with_y_range(0.0, 10.0)
            .with_series("close", SeriesStyle::Line(LineStyle::new(Color::BLACK))),
    )
    .expect("chart");
    chart
        .set_series_data("close", SeriesData::indexed_y(vec![1.0, 5.0, f64::NAN, 7.0, 2.0]))
        .expect("data");
    let stats = chart.render_frame();

    let json = stats.to_json_contract_v1_pretty().expect("serialize");
    let payload: FrameStatsJsonContractV1 = serde_json::from_str(&json).expect("parse");
    assert_eq!(payload.schema_version, FRAME_STATS_JSON_SCHEMA_V1);
    assert_eq!(payload.stats, stats);
    assert_eq!(payload.stats.frame, 1);
    assert_eq!(payload.stats.skipped, 1);
    assert_ne!(payload.stats, FrameStats::default());
}
