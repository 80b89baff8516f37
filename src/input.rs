//! Pointer and resize input.
//!
//! Hosts report input as [`HalftoneEvent`]s in screen coordinates. The engine
//! converts pointer positions to surface pixels with a [`SurfaceTransform`]
//! that is cached and refreshed only when the surface layout changes.
//!
//! Windowed hosts can feed winit events straight in:
//!
//! ```ignore
//! if let Some(event) = HalftoneEvent::from_window_event(&event, window_size) {
//!     halftone.handle_event(event);
//! }
//! ```

use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};

use crate::vector::Vector;

/// Where the surface sits on screen and how large it is displayed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    /// Screen position of the surface's top-left corner.
    pub offset: Vec2,
    /// Displayed size in screen units.
    pub display_size: Vec2,
}

impl SurfaceLayout {
    pub fn new(offset: Vec2, display_size: Vec2) -> Self {
        Self {
            offset,
            display_size,
        }
    }

    /// A layout at the screen origin.
    pub fn at_origin(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }
}

/// Input the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HalftoneEvent {
    /// Pointer moved to a screen position.
    PointerMoved { x: f32, y: f32 },
    /// Pointer pressed (mouse down or touch start).
    PointerEngaged,
    /// Pointer let go (mouse up or touch end).
    PointerReleased,
    /// Surface moved or changed its displayed size.
    SurfaceResized(SurfaceLayout),
}

impl HalftoneEvent {
    /// Translate a winit window event.
    ///
    /// Only the left button engages the pointer. Resizes report the new
    /// window size as a layout at the origin.
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::CursorMoved { position, .. } => Some(HalftoneEvent::PointerMoved {
                x: position.x as f32,
                y: position.y as f32,
            }),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => Some(match state {
                ElementState::Pressed => HalftoneEvent::PointerEngaged,
                ElementState::Released => HalftoneEvent::PointerReleased,
            }),
            WindowEvent::Resized(size) => Some(HalftoneEvent::SurfaceResized(
                SurfaceLayout::at_origin(size.width as f32, size.height as f32),
            )),
            _ => None,
        }
    }
}

/// Screen-to-surface mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceTransform {
    offset: Vec2,
    /// Surface pixels per screen unit.
    scale: f32,
}

impl Default for SurfaceTransform {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl SurfaceTransform {
    /// Mapping for a surface `surface_width` pixels wide shown with `layout`.
    pub fn new(layout: &SurfaceLayout, surface_width: f32) -> Self {
        let scale = if layout.display_size.x > 0.0 {
            surface_width / layout.display_size.x
        } else {
            1.0
        };
        Self {
            offset: layout.offset,
            scale,
        }
    }

    #[inline]
    pub fn to_surface(&self, screen: Vec2) -> Vector {
        (screen - self.offset) * self.scale
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }
}
