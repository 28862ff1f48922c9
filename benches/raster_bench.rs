use chart_raster::core::{PixelPoint, SeriesData, Viewport};
use chart_raster::render::{Color, PixelSurface, fill_polygon};
use chart_raster::series::{CandleStyle, LineStyle, SeriesStyle};
use chart_raster::{ChartConfig, RasterChart};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn wave(count: usize) -> SeriesData {
    let y = (0..count)
        .map(|i| 50.0 + 40.0 * (i as f64 * 0.01).sin())
        .collect();
    SeriesData::indexed_y(y)
}

fn bench_line_frame_1m(c: &mut Criterion) {
    let config = ChartConfig::new(Viewport::new(1920, 1080), 0.0, 1_000_000.0)
        .with_y_range(0.0, 100.0)
        .with_series(
            "wave",
            SeriesStyle::Line(LineStyle::new(Color::rgb(0, 90, 200)).with_decimation(true)),
        );
    let mut chart = RasterChart::new(config).expect("chart init");
    chart
        .set_series_data("wave", wave(1_000_000))
        .expect("series data");

    c.bench_function("line_frame_1m_decimated", |b| {
        b.iter(|| black_box(chart.render_frame()))
    });
}

fn bench_candle_frame_10k(c: &mut Criterion) {
    let config = ChartConfig::new(Viewport::new(1600, 900), -1.0, 10_000.0)
        .with_y_range(0.0, 700.0)
        .with_series("ohlc", SeriesStyle::Candle(CandleStyle::default()));
    let mut chart = RasterChart::new(config).expect("chart init");

    let mut x = Vec::with_capacity(10_000);
    let (mut open, mut high, mut low, mut close) = (
        Vec::with_capacity(10_000),
        Vec::with_capacity(10_000),
        Vec::with_capacity(10_000),
        Vec::with_capacity(10_000),
    );
    for i in 0..10_000 {
        let t = i as f64;
        let base = 100.0 + t * 0.05;
        let end = if i % 2 == 0 { base + 1.0 } else { base - 1.0 };
        x.push(t);
        open.push(base);
        close.push(end);
        low.push(base.min(end) - 0.75);
        high.push(base.max(end) + 0.75);
    }
    chart
        .set_series_data(
            "ohlc",
            SeriesData::ohlc(x, open, high, low, close).expect("ohlc data"),
        )
        .expect("series data");

    c.bench_function("candle_frame_10k", |b| {
        b.iter(|| black_box(chart.render_frame()))
    });
}

fn bench_polygon_fill(c: &mut Criterion) {
    let mut surface = PixelSurface::new(Viewport::new(1024, 1024));
    let star: Vec<PixelPoint> = (0..64)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::TAU / 64.0;
            let radius = if i % 2 == 0 { 500.0 } else { 220.0 };
            PixelPoint::new(512.0 + radius * angle.cos(), 512.0 + radius * angle.sin())
        })
        .collect();

    c.bench_function("fill_polygon_star_64", |b| {
        b.iter(|| {
            fill_polygon(
                &mut surface,
                black_box(&star),
                Color::rgba(200, 40, 40, 160),
                None,
            );
        })
    });
}

criterion_group!(
    benches,
    bench_line_frame_1m,
    bench_candle_frame_10k,
    bench_polygon_fill
);
criterion_main!(benches);
