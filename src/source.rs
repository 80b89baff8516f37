//! Decoded source images.
//!
//! The engine never decodes images itself. It consumes an [`ImageSource`]: a
//! row-major RGBA byte buffer with known dimensions. Files are decoded at the
//! boundary through the `image` crate, and a few procedural sources are
//! provided for demos and tests.
//!
//! # Example
//!
//! ```ignore
//! let photo = ImageSource::open("assets/portrait.jpg")?;
//! let white = ImageSource::solid(10, 10, [255, 255, 255, 255]);
//! ```

use std::path::Path;

use crate::error::HalftoneError;

/// Row-major RGBA pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl ImageSource {
    /// Wrap raw RGBA data (4 bytes per pixel).
    ///
    /// # Example
    ///
    /// ```ignore
    /// // 2x1: white, black
    /// let img = ImageSource::from_rgba(vec![255, 255, 255, 255, 0, 0, 0, 255], 2, 1)?;
    /// ```
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Result<Self, HalftoneError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(HalftoneError::PixelBufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, width, height })
    }

    /// Decode an image file.
    ///
    /// Supports whatever formats the `image` crate was built with (PNG and
    /// JPEG here).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, HalftoneError> {
        let img = image::open(path.as_ref())?;
        Ok(Self::from_image(img))
    }

    /// Convert an already decoded image.
    pub fn from_image(img: image::DynamicImage) -> Self {
        let img = img.into_rgba8();
        let (width, height) = img.dimensions();
        Self {
            data: img.into_raw(),
            width,
            height,
        }
    }

    /// A single-color image.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let data = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self { data, width, height }
    }

    /// A horizontal gradient from `start` (left column) to `end` (right column).
    pub fn gradient(width: u32, height: u32, start: [u8; 4], end: [u8; 4]) -> Self {
        let mut row = Vec::with_capacity(width as usize * 4);
        for x in 0..width {
            let t = x as f32 / (width.saturating_sub(1)).max(1) as f32;
            for c in 0..4 {
                row.push(lerp_u8(start[c], end[c], t));
            }
        }
        let data = row.repeat(height as usize);
        Self { data, width, height }
    }

    /// A checkerboard of `cell`-sized squares.
    pub fn checkerboard(width: u32, height: u32, cell: u32, a: [u8; 4], b: [u8; 4]) -> Self {
        let cell = cell.max(1);
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                let color = if (x / cell + y / cell) % 2 == 0 { a } else { b };
                data.extend_from_slice(&color);
            }
        }
        Self { data, width, height }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// RGBA of the pixel at `(x, y)`, `None` outside the image.
    #[inline]
    pub fn pixel(&self, x: i64, y: i64) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.data[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }
}

fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    let a = a as f32;
    let b = b as f32;
    (a + (b - a) * t).round() as u8
}
