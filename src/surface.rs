//! Drawing surfaces.
//!
//! The engine draws through the [`Surface`] trait so hosts can plug in any 2D
//! backend. [`Canvas`] is the built-in software implementation: an RGBA
//! raster with `normal`, `lighter` and `darker` composition.

use std::path::Path;

use crate::error::HalftoneError;
use crate::vector::Vector;
use crate::visuals::{BlendMode, Rgb};

/// A 2D drawing surface.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Resize, discarding current contents.
    fn resize(&mut self, width: u32, height: u32);

    /// A blank surface of the same size, used as an off-screen layer.
    fn create_layer(&self) -> Self
    where
        Self: Sized;

    /// Blend mode for subsequent fills.
    fn set_blend_mode(&mut self, mode: BlendMode);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb);

    /// Fill a disc.
    fn fill_dot(&mut self, center: Vector, radius: f32, color: Rgb);

    /// Composite all of `layer` onto this surface at the origin.
    fn draw_layer(&mut self, layer: &Self, mode: BlendMode)
    where
        Self: Sized;

    /// Read back one pixel. Backends without readback return `None`.
    fn read_pixel(&self, _x: u32, _y: u32) -> Option<Rgb> {
        None
    }

    /// Fill the whole surface with `color`, replacing its contents.
    fn clear(&mut self, color: Rgb) {
        self.set_blend_mode(BlendMode::Normal);
        self.fill_rect(0.0, 0.0, self.width() as f32, self.height() as f32, color);
    }
}

/// Software RGBA surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pixels: Vec<[u8; 4]>,
    width: u32,
    height: u32,
    blend: BlendMode,
}

impl Canvas {
    /// A black, fully opaque canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![Rgb::BLACK.to_rgba(); width as usize * height as usize],
            width,
            height,
            blend: BlendMode::Normal,
        }
    }

    #[inline]
    fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    fn blend_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        let idx = self.index(x, y);
        let mode = self.blend;
        let dst = &mut self.pixels[idx];
        dst[0] = mode.blend_channel(color.r, dst[0]);
        dst[1] = mode.blend_channel(color.g, dst[1]);
        dst[2] = mode.blend_channel(color.b, dst[2]);
        dst[3] = 255;
    }

    /// Color at `(x, y)`, `None` out of bounds.
    pub fn pixel(&self, x: i64, y: i64) -> Option<Rgb> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let px = self.pixels[self.index(x as u32, y as u32)];
        Some(Rgb::new(px[0], px[1], px[2]))
    }

    /// The single color covering the whole canvas, if there is one.
    pub fn uniform_color(&self) -> Option<Rgb> {
        let first = *self.pixels.first()?;
        self.pixels
            .iter()
            .all(|px| *px == first)
            .then(|| Rgb::new(first[0], first[1], first[2]))
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Encode as PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), HalftoneError> {
        let bytes = self.as_bytes().to_vec();
        let expected = bytes.len();
        let img = image::RgbaImage::from_raw(self.width, self.height, bytes).ok_or(
            HalftoneError::PixelBufferSize {
                expected: self.width as usize * self.height as usize * 4,
                actual: expected,
            },
        )?;
        img.save(path)?;
        Ok(())
    }
}

impl Surface for Canvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![Rgb::BLACK.to_rgba(); width as usize * height as usize];
    }

    fn create_layer(&self) -> Self {
        Canvas::new(self.width, self.height)
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend = mode;
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        // Pixels whose centers fall inside the rectangle.
        let x0 = (x - 0.5).ceil().max(0.0) as i64;
        let y0 = (y - 0.5).ceil().max(0.0) as i64;
        let x1 = ((x + width - 0.5).ceil() as i64).min(self.width as i64);
        let y1 = ((y + height - 0.5).ceil() as i64).min(self.height as i64);

        for py in y0..y1 {
            for px in x0..x1 {
                self.blend_pixel(px as u32, py as u32, color);
            }
        }
    }

    fn fill_dot(&mut self, center: Vector, radius: f32, color: Rgb) {
        if radius <= 0.0 || !center.is_finite() {
            return;
        }
        let r2 = radius * radius;
        let x0 = ((center.x - radius - 0.5).floor() as i64).max(0);
        let y0 = ((center.y - radius - 0.5).floor() as i64).max(0);
        let x1 = ((center.x + radius + 0.5).ceil() as i64).min(self.width as i64);
        let y1 = ((center.y + radius + 0.5).ceil() as i64).min(self.height as i64);

        for py in y0..y1 {
            let dy = py as f32 + 0.5 - center.y;
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - center.x;
                if dx * dx + dy * dy <= r2 {
                    self.blend_pixel(px as u32, py as u32, color);
                }
            }
        }
    }

    fn read_pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        self.pixel(x as i64, y as i64)
    }

    fn draw_layer(&mut self, layer: &Self, mode: BlendMode) {
        let w = self.width.min(layer.width);
        let h = self.height.min(layer.height);
        for y in 0..h {
            for x in 0..w {
                let src = layer.pixels[layer.index(x, y)];
                let idx = self.index(x, y);
                let dst = &mut self.pixels[idx];
                dst[0] = mode.blend_channel(src[0], dst[0]);
                dst[1] = mode.blend_channel(src[1], dst[1]);
                dst[2] = mode.blend_channel(src[2], dst[2]);
                dst[3] = 255;
            }
        }
    }
}
