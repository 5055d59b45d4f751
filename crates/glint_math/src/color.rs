//! RGB color helpers.
//!
//! Colors are plain `Vec3` values (r = x, g = y, b = z) so the usual vector
//! arithmetic applies. Channels stay unclamped while light is accumulated;
//! `max_to_one` brings them back into range at the end.

use crate::Vec3;

/// Color type alias (RGB values, unclamped during accumulation)
pub type Color = Vec3;

/// Named colors.
pub mod colors {
    use super::Color;

    pub const BLACK: Color = Color::ZERO;
    pub const WHITE: Color = Color::ONE;
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);
}

/// Extension trait for treating a `Vec3` as an RGB color.
pub trait ColorExt {
    /// Rescale so that no channel exceeds 1.
    ///
    /// If any channel is above 1 every channel is divided by the largest one,
    /// which keeps the hue of overexposed pixels. Colors already in range are
    /// returned unchanged.
    fn max_to_one(self) -> Self;

    /// `max_to_one`, then quantise each channel to 8 bits.
    fn to_rgb8(self) -> [u8; 3];

    /// `to_rgb8` packed as `0x00RRGGBB`.
    fn pack_rgb(self) -> u32;
}

impl ColorExt for Color {
    fn max_to_one(self) -> Self {
        let max = self.max_element();
        if max > 1.0 {
            self / max
        } else {
            self
        }
    }

    fn to_rgb8(self) -> [u8; 3] {
        let c = self.max_to_one();
        // `as` saturates, so negative channels land on 0
        [
            (c.x * 255.0) as u8,
            (c.y * 255.0) as u8,
            (c.z * 255.0) as u8,
        ]
    }

    fn pack_rgb(self) -> u32 {
        let [r, g, b] = self.to_rgb8();
        (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
    }
}
