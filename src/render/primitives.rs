use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Straight-alpha RGBA color with 8-bit channels.
///
/// Packs to `0xAARRGGBB` on the pixel surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    #[must_use]
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 255)
    }

    #[must_use]
    pub const fn from_argb(argb: u32) -> Self {
        Self::rgba(
            ((argb >> 16) & 0xff) as u8,
            ((argb >> 8) & 0xff) as u8,
            (argb & 0xff) as u8,
            (argb >> 24) as u8,
        )
    }

    #[must_use]
    pub const fn to_argb(self) -> u32 {
        ((self.alpha as u32) << 24)
            | ((self.red as u32) << 16)
            | ((self.green as u32) << 8)
            | self.blue as u32
    }

    /// Builds a color from normalized `0..=1` channels.
    pub fn from_normalized(red: f64, green: f64, blue: f64, alpha: f64) -> ChartResult<Self> {
        let mut channels = [0_u8; 4];
        for (slot, (channel, value)) in channels.iter_mut().zip([
            ("red", red),
            ("green", green),
            ("blue", blue),
            ("alpha", alpha),
        ]) {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
            *slot = (value * 255.0).round() as u8;
        }
        Ok(Self::rgba(channels[0], channels[1], channels[2], channels[3]))
    }

    #[must_use]
    pub const fn with_alpha(mut self, alpha: u8) -> Self {
        self.alpha = alpha;
        self
    }

    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.alpha == 0
    }

    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.alpha == 255
    }
}

/// Source-over composite of `color` scaled by `alpha` (0..=255) onto `dst`.
#[must_use]
pub(crate) fn blend_argb(dst: u32, color: Color, alpha: u32) -> u32 {
    if alpha == 0 {
        return dst;
    }
    if alpha >= 255 {
        return color.with_alpha(255).to_argb();
    }

    let dst_alpha = dst >> 24;
    let inverse = 255 - alpha;
    let out_alpha = alpha + (dst_alpha * inverse + 127) / 255;
    if out_alpha == 0 {
        return 0;
    }

    let denominator = out_alpha * 255;
    let channel = |src: u8, shift: u32| {
        let dst_channel = (dst >> shift) & 0xff;
        let numerator = u32::from(src) * alpha * 255 + dst_channel * dst_alpha * inverse;
        ((numerator + denominator / 2) / denominator).min(255)
    };

    (out_alpha << 24)
        | (channel(color.red, 16) << 16)
        | (channel(color.green, 8) << 8)
        | channel(color.blue, 0)
}

#[cfg(test)]
mod tests {
    use super::{Color, blend_argb};

    #[test]
    fn argb_packing_is_symmetric() {
        let color = Color::rgba(0x12, 0x34, 0x56, 0x78);
        assert_eq!(color.to_argb(), 0x7812_3456);
        assert_eq!(Color::from_argb(0x7812_3456), color);
    }

    #[test]
    fn half_alpha_over_opaque_white_lands_mid_grey() {
        let out = Color::from_argb(blend_argb(Color::WHITE.to_argb(), Color::BLACK, 128));
        assert_eq!(out.alpha, 255);
        assert!((126..=128).contains(&out.red));
        assert_eq!(out.red, out.green);
    }

    #[test]
    fn out_of_range_normalized_channels_are_rejected() {
        assert!(Color::from_normalized(1.2, 0.0, 0.0, 1.0).is_err());
        assert_eq!(
            Color::from_normalized(1.0, 0.0, 0.0, 1.0).expect("valid"),
            Color::rgb(255, 0, 0)
        );
    }
}
