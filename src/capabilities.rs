//! Host rendering capabilities.
//!
//! Probed once at startup and handed to the engine, which decides its channel
//! set from them before the first frame.

use crate::surface::Surface;
use crate::visuals::{BlendMode, Rgb};

/// What the host's drawing backend can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// A 2D drawing surface is available at all.
    pub has_surface: bool,
    /// The `darker` (per-channel minimum) composition works.
    pub supports_darker: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::FULL
    }
}

impl Capabilities {
    pub const FULL: Capabilities = Capabilities {
        has_surface: true,
        supports_darker: true,
    };

    pub const NONE: Capabilities = Capabilities {
        has_surface: false,
        supports_darker: false,
    };

    /// Probe a backend through a 1x1 scratch surface.
    ///
    /// `make_surface` returns `None` when no surface can be created. The
    /// darker test paints red, then `#999999` under `darker`; a working
    /// minimum leaves `(153, 0, 0)`.
    pub fn probe<S, F>(make_surface: F) -> Self
    where
        S: Surface,
        F: FnOnce(u32, u32) -> Option<S>,
    {
        let Some(mut scratch) = make_surface(1, 1) else {
            return Self::NONE;
        };

        scratch.clear(Rgb::RED);
        scratch.set_blend_mode(BlendMode::Darker);
        scratch.fill_rect(0.0, 0.0, 1.0, 1.0, Rgb::new(0x99, 0x99, 0x99));

        Self {
            has_surface: true,
            supports_darker: scratch.read_pixel(0, 0) == Some(Rgb::new(153, 0, 0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Canvas;
    use crate::vector::Vector;

    #[test]
    fn test_canvas_supports_darker() {
        let caps = Capabilities::probe(|w, h| Some(Canvas::new(w, h)));
        assert_eq!(caps, Capabilities::FULL);
    }

    #[test]
    fn test_no_surface() {
        let caps = Capabilities::probe::<Canvas, _>(|_, _| None);
        assert_eq!(caps, Capabilities::NONE);
    }

    /// A backend that ignores blend modes, like a host without `darker`.
    struct SourceOverOnly(Canvas);

    impl Surface for SourceOverOnly {
        fn width(&self) -> u32 {
            self.0.width()
        }
        fn height(&self) -> u32 {
            self.0.height()
        }
        fn resize(&mut self, width: u32, height: u32) {
            self.0.resize(width, height)
        }
        fn create_layer(&self) -> Self {
            SourceOverOnly(self.0.create_layer())
        }
        fn set_blend_mode(&mut self, _mode: BlendMode) {}
        fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
            self.0.fill_rect(x, y, width, height, color)
        }
        fn fill_dot(&mut self, center: Vector, radius: f32, color: Rgb) {
            self.0.fill_dot(center, radius, color)
        }
        fn draw_layer(&mut self, layer: &Self, _mode: BlendMode) {
            self.0.draw_layer(&layer.0, BlendMode::Normal)
        }
        fn read_pixel(&self, x: u32, y: u32) -> Option<Rgb> {
            self.0.read_pixel(x, y)
        }
    }

    #[test]
    fn test_missing_darker_detected() {
        let caps = Capabilities::probe(|w, h| Some(SourceOverOnly(Canvas::new(w, h))));
        assert!(caps.has_surface);
        assert!(!caps.supports_darker);
    }
}
