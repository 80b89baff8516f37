//! Colors and blend modes for layer compositing.
//!
//! # Usage
//!
//! ```ignore
//! let fill = Rgb::channel_fill(Channel::Red, ColorMode::Subtractive); // cyan ink
//! surface.set_blend_mode(BlendMode::for_mode(ColorMode::Subtractive)); // darker
//! ```

use crate::channel::{Channel, ColorMode};

/// How a source is combined with what is already on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Source-over. Opaque fills replace the destination.
    #[default]
    Normal,

    /// Per-channel saturating sum.
    ///
    /// Overlapping light gets brighter. Used to accumulate additive layers
    /// over a black background.
    Lighter,

    /// Per-channel minimum.
    ///
    /// Overlapping ink gets darker. Used to accumulate subtractive layers
    /// over a white background.
    Darker,
}

impl BlendMode {
    /// The layer blend for a color synthesis mode.
    pub fn for_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Additive => BlendMode::Lighter,
            ColorMode::Subtractive => BlendMode::Darker,
        }
    }

    /// Combine one source byte with one destination byte.
    #[inline]
    pub fn blend_channel(self, src: u8, dst: u8) -> u8 {
        match self {
            BlendMode::Normal => src,
            BlendMode::Lighter => src.saturating_add(dst),
            BlendMode::Darker => src.min(dst),
        }
    }
}

/// Opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const CYAN: Rgb = Rgb::new(0, 255, 255);
    pub const MAGENTA: Rgb = Rgb::new(255, 0, 255);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Background that is the identity for the mode's layer blend.
    pub fn background(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Additive => Rgb::BLACK,
            ColorMode::Subtractive => Rgb::WHITE,
        }
    }

    /// Dot fill color of a channel.
    ///
    /// Subtractive inks are the complements of the additive primaries, since
    /// ink removes the light it is named after.
    pub fn channel_fill(channel: Channel, mode: ColorMode) -> Self {
        match (mode, channel) {
            (ColorMode::Additive, Channel::Red) => Rgb::RED,
            (ColorMode::Additive, Channel::Green) => Rgb::GREEN,
            (ColorMode::Additive, Channel::Blue) => Rgb::BLUE,
            (ColorMode::Additive, Channel::Lum) => Rgb::WHITE,
            (ColorMode::Subtractive, Channel::Red) => Rgb::CYAN,
            (ColorMode::Subtractive, Channel::Green) => Rgb::MAGENTA,
            (ColorMode::Subtractive, Channel::Blue) => Rgb::YELLOW,
            (ColorMode::Subtractive, Channel::Lum) => Rgb::BLACK,
        }
    }

    #[inline]
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}
