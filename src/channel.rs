//! Color channels and color synthesis modes.
//!
//! Every channel gets its own dot grid, rotated by a fixed per-channel angle so
//! the grids never line up with each other (which would show as Moiré banding).

use serde::{Deserialize, Serialize};

/// One independently gridded and rendered color dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
    /// Lightness, `(max(r, g, b) + min(r, g, b)) / 2`.
    #[serde(rename = "lum", alias = "luminance")]
    Lum,
}

impl Channel {
    /// All channels, in a stable order.
    pub const ALL: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::Lum];

    /// The default RGB channel set.
    pub const RGB: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Grid rotation angle in radians.
    ///
    /// Chosen by eye to keep the channel grids decorrelated.
    pub fn grid_angle(self) -> f32 {
        match self {
            Channel::Red => 1.0,
            Channel::Green => 2.5,
            Channel::Blue => 5.0,
            Channel::Lum => 4.0,
        }
    }

    /// Byte offset of this channel inside an RGBA pixel, `None` for lightness.
    pub fn rgba_offset(self) -> Option<usize> {
        match self {
            Channel::Red => Some(0),
            Channel::Green => Some(1),
            Channel::Blue => Some(2),
            Channel::Lum => None,
        }
    }

    /// Dense index, usable for per-channel tables.
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::Lum => 3,
        }
    }
}

/// How channel layers combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorMode {
    /// Light on black: layers sum (`lighter`).
    #[default]
    Additive,
    /// Ink on white: layers take the per-channel minimum (`darker`).
    Subtractive,
}

impl ColorMode {
    pub fn from_additive(is_additive: bool) -> Self {
        if is_additive {
            ColorMode::Additive
        } else {
            ColorMode::Subtractive
        }
    }

    pub fn is_additive(self) -> bool {
        self == ColorMode::Additive
    }
}
