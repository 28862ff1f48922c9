//! Pixel surface and the primitive rasterizer every fast segment draws with.

mod primitives;
pub mod raster;
mod surface;

pub use primitives::Color;
pub use raster::{
    DashStyle, MITER_LIMIT, draw_dashed_polyline, draw_line, draw_line_aa, draw_polyline,
    draw_thick_line, draw_thick_polyline, fill_ellipse, fill_polygon, fill_rect, stroke_ellipse,
    stroke_rect, thick_polyline_quads,
};
pub use surface::PixelSurface;
