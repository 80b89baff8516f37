//! Per-pixel channel sampling.
//!
//! Maps a surface coordinate to a normalized channel intensity of the source
//! image. Sampling is pure, so a grid build can query it freely.

use crate::channel::{Channel, ColorMode};
use crate::source::ImageSource;
use crate::vector::Vector;

/// Reads channel intensities from a source image at surface coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Sampler<'a> {
    image: &'a ImageSource,
    /// Surface pixels per image pixel.
    image_scale: f32,
    mode: ColorMode,
}

impl<'a> Sampler<'a> {
    /// `image_scale` is the surface size divided by the natural image size.
    pub fn new(image: &'a ImageSource, image_scale: f32, mode: ColorMode) -> Self {
        Self {
            image,
            image_scale,
            mode,
        }
    }

    /// Sampler for an image displayed at `surface_width` pixels wide.
    pub fn for_surface_width(image: &'a ImageSource, surface_width: f32, mode: ColorMode) -> Self {
        let image_scale = surface_width / image.width().max(1) as f32;
        Self::new(image, image_scale, mode)
    }

    #[inline]
    pub fn image_scale(&self) -> f32 {
        self.image_scale
    }

    /// Intensity of `channel` at surface position `pos`, in `[0, 1]`.
    ///
    /// Positions outside the image yield exactly 0 in both color modes. In
    /// subtractive mode the value is inverted: it measures how much ink the
    /// channel needs rather than how much light it carries.
    pub fn sample(&self, pos: Vector, channel: Channel) -> f32 {
        // Image pixel i covers surface [i * scale, (i + 1) * scale).
        let x = (pos.x / self.image_scale).floor() as i64;
        let y = (pos.y / self.image_scale).floor() as i64;

        let Some(px) = self.image.pixel(x, y) else {
            return 0.0;
        };

        let value = match channel.rgba_offset() {
            Some(offset) => px[offset] as f32 / 255.0,
            None => lightness(px),
        };

        match self.mode {
            ColorMode::Additive => value,
            ColorMode::Subtractive => 1.0 - value,
        }
    }
}

/// HSL lightness of an RGBA pixel: the midpoint of its brightest and darkest
/// components.
fn lightness(px: [u8; 4]) -> f32 {
    let r = px[0] as f32 / 255.0;
    let g = px[1] as f32 / 255.0;
    let b = px[2] as f32 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    (max + min) / 2.0
}
