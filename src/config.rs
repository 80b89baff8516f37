//! Engine configuration.
//!
//! [`HalftoneConfig`] is the fully populated, immutable configuration an
//! engine is built with. [`HalftoneOptions`] is its loosely specified
//! counterpart: every field optional, keyed the way option objects are
//! usually written by hand, and deep-merged over the defaults once.
//!
//! # Example
//!
//! ```ignore
//! let options = HalftoneOptions::from_json(r#"{
//!     "gridSize": 4,
//!     "isAdditive": false,
//!     "displacement": { "hoverForce": -0.05 }
//! }"#)?;
//! let config = HalftoneConfig::default().merge(options);
//! ```
//!
//! # Valid ranges
//!
//! Values are not checked at runtime. Outside these ranges behavior is
//! unspecified:
//! - `grid_size > 0`
//! - `0 <= friction < 1`
//! - `0 <= dot_threshold <= 1`
//! - displacement radii `> 0`
//! - `dot_size_osc.period > 0`

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::channel::{Channel, ColorMode};
use crate::error::HalftoneError;
use crate::grid::GridLayout;

/// Pointer force parameters.
///
/// Radii are fractions of the surface diagonal. Forces are signed: negative
/// draws dots toward the pointer, positive pushes them away.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Displacement {
    pub hover_radius: f32,
    pub hover_force: f32,
    pub active_radius: f32,
    pub active_force: f32,
}

impl Default for Displacement {
    fn default() -> Self {
        Self {
            hover_radius: 0.15,
            hover_force: -0.02,
            active_radius: 0.3,
            active_force: 0.01,
        }
    }
}

/// Dot size breathing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotSizeOsc {
    /// Seconds per breath.
    pub period: f32,
    /// Relative size swing around the natural size.
    pub delta: f32,
}

impl Default for DotSizeOsc {
    fn default() -> Self {
        Self {
            period: 3.0,
            delta: 0.2,
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct HalftoneConfig {
    /// Grid spacing as a percentage of the surface diagonal.
    pub grid_size: f32,
    pub color_mode: ColorMode,
    /// Channels to grid and render, in draw order. Each appears at most once;
    /// repeats are dropped keeping the first position.
    pub channels: Vec<Channel>,
    /// Lens flag carried for hosts; the core grid and physics ignore it.
    pub is_channel_lens: bool,
    pub friction: f32,
    /// Minimum sampled intensity for a grid point to get a dot.
    pub dot_threshold: f32,
    pub displacement: Displacement,
    pub dot_size_osc: DotSizeOsc,
    pub layout: GridLayout,
    /// Quiet period before a burst of resizes triggers one rebuild.
    pub resize_debounce: Duration,
}

impl Default for HalftoneConfig {
    fn default() -> Self {
        Self {
            grid_size: 2.5,
            color_mode: ColorMode::Additive,
            channels: Channel::RGB.to_vec(),
            is_channel_lens: true,
            friction: 0.06,
            dot_threshold: 0.05,
            displacement: Displacement::default(),
            dot_size_osc: DotSizeOsc::default(),
            layout: GridLayout::Cartesian,
            resize_debounce: Duration::from_millis(200),
        }
    }
}

impl HalftoneConfig {
    pub fn with_grid_size(mut self, percent_of_diagonal: f32) -> Self {
        self.grid_size = percent_of_diagonal;
        self
    }

    pub fn with_color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    pub fn with_channels(mut self, channels: impl Into<Vec<Channel>>) -> Self {
        self.channels = distinct(channels.into());
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_dot_threshold(mut self, threshold: f32) -> Self {
        self.dot_threshold = threshold;
        self
    }

    pub fn with_displacement(mut self, displacement: Displacement) -> Self {
        self.displacement = displacement;
        self
    }

    pub fn with_dot_size_osc(mut self, osc: DotSizeOsc) -> Self {
        self.dot_size_osc = osc;
        self
    }

    pub fn with_layout(mut self, layout: GridLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_resize_debounce(mut self, quiet: Duration) -> Self {
        self.resize_debounce = quiet;
        self
    }

    /// Overlay `options` on this configuration.
    ///
    /// Nested objects merge field by field; `channels` replaces the whole
    /// list.
    pub fn merge(mut self, options: HalftoneOptions) -> Self {
        if let Some(v) = options.grid_size {
            self.grid_size = v;
        }
        if let Some(v) = options.is_additive {
            self.color_mode = ColorMode::from_additive(v);
        }
        if let Some(v) = options.channels {
            self.channels = distinct(v);
        }
        if let Some(v) = options.is_channel_lens {
            self.is_channel_lens = v;
        }
        if let Some(v) = options.friction {
            self.friction = v;
        }
        if let Some(v) = options.dot_threshold {
            self.dot_threshold = v;
        }
        if let Some(v) = options.is_radial {
            self.layout = if v { GridLayout::Radial } else { GridLayout::Cartesian };
        }
        if let Some(d) = options.displacement {
            let target = &mut self.displacement;
            if let Some(v) = d.hover_radius {
                target.hover_radius = v;
            }
            if let Some(v) = d.hover_force {
                target.hover_force = v;
            }
            if let Some(v) = d.active_radius {
                target.active_radius = v;
            }
            if let Some(v) = d.active_force {
                target.active_force = v;
            }
        }
        if let Some(o) = options.dot_size_osc {
            if let Some(v) = o.period {
                self.dot_size_osc.period = v;
            }
            if let Some(v) = o.delta {
                self.dot_size_osc.delta = v;
            }
        }
        self
    }

    /// Defaults merged with options read from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HalftoneError> {
        let json = fs::read_to_string(path)?;
        let options = HalftoneOptions::from_json(&json)?;
        Ok(Self::default().merge(options))
    }
}

/// Partial options, as accepted from hosts.
///
/// Unknown keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HalftoneOptions {
    pub grid_size: Option<f32>,
    pub is_additive: Option<bool>,
    pub channels: Option<Vec<Channel>>,
    pub is_channel_lens: Option<bool>,
    pub friction: Option<f32>,
    pub dot_threshold: Option<f32>,
    pub is_radial: Option<bool>,
    pub displacement: Option<DisplacementOptions>,
    pub dot_size_osc: Option<DotSizeOscOptions>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplacementOptions {
    pub hover_radius: Option<f32>,
    pub hover_force: Option<f32>,
    pub active_radius: Option<f32>,
    pub active_force: Option<f32>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DotSizeOscOptions {
    pub period: Option<f32>,
    pub delta: Option<f32>,
}

impl HalftoneOptions {
    pub fn from_json(json: &str) -> Result<Self, HalftoneError> {
        Ok(serde_json::from_str(json)?)
    }
}

fn distinct(channels: Vec<Channel>) -> Vec<Channel> {
    let mut out: Vec<Channel> = Vec::with_capacity(channels.len());
    for channel in channels {
        if !out.contains(&channel) {
            out.push(channel);
        }
    }
    out
}
