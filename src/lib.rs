//! # halftone - breathing halftone images
//!
//! Turns a still image into an animated halftone: one grid of colored dots
//! per color channel, each dot sized by the image brightness under it. Dots
//! shy away from (or gather toward) the pointer, drift back to rest under
//! friction, and slowly breathe.
//!
//! ## Quick Start
//!
//! ```ignore
//! use halftone::prelude::*;
//!
//! fn main() -> Result<(), HalftoneError> {
//!     let caps = Capabilities::probe(|w, h| Some(Canvas::new(w, h)));
//!     let mut halftone = Halftone::new(HalftoneConfig::default(), caps, Some(Canvas::new(1, 1)));
//!
//!     halftone.load_image_file("portrait.png")?;
//!     halftone.handle_event(HalftoneEvent::PointerMoved { x: 120.0, y: 80.0 });
//!     halftone.tick(0.0);
//!
//!     halftone.output().unwrap().save_png("frame.png")
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Channels and color modes
//!
//! Each [`Channel`] (red, green, blue, or luminance) gets its own grid rotated
//! by a channel-specific angle so the grids never line up into Moiré bands.
//!
//! - [`ColorMode::Additive`]: colored light on black, layers summed with
//!   [`BlendMode::Lighter`].
//! - [`ColorMode::Subtractive`]: cyan/magenta/yellow ink on white, layers
//!   combined with [`BlendMode::Darker`]. Hosts without `darker` fall back to
//!   a single luminance channel.
//!
//! ### Grids
//!
//! [`GridLayout::Cartesian`] tiles a rotated square lattice;
//! [`GridLayout::Radial`] lays concentric rings of dots. Grid points sampling
//! below the dot threshold never become particles.
//!
//! ### Physics
//!
//! Every frame the [`Simulator`] applies a smooth pointer force to each
//! [`Particle`], then steps it. Friction damps velocity and pulls the dot
//! back toward its origin, so with the pointer gone every dot settles.
//!
//! ### Surfaces
//!
//! Drawing goes through the [`Surface`] trait. [`Canvas`] is a software
//! RGBA implementation that can be saved as PNG.

pub mod capabilities;
pub mod channel;
pub mod compositor;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod input;
pub mod particle;
pub mod sampler;
pub mod scheduler;
pub mod simulator;
pub mod source;
pub mod surface;
pub mod time;
pub mod vector;
pub mod visuals;

pub use capabilities::Capabilities;
pub use channel::{Channel, ColorMode};
pub use compositor::Compositor;
pub use config::{
    Displacement, DisplacementOptions, DotSizeOsc, DotSizeOscOptions, HalftoneConfig,
    HalftoneOptions,
};
pub use engine::Halftone;
pub use error::HalftoneError;
pub use glam::Vec2;
pub use grid::{GridBuilder, GridLayout, ParticleSet};
pub use input::{HalftoneEvent, SurfaceLayout, SurfaceTransform};
pub use particle::Particle;
pub use sampler::Sampler;
pub use scheduler::{FixedRateScheduler, FrameScheduler};
pub use simulator::{PointerField, PointerState, Simulator};
pub use source::ImageSource;
pub use surface::{Canvas, Surface};
pub use time::{Clock, Debounce};
pub use vector::Vector;
pub use visuals::{BlendMode, Rgb};

/// Convenient re-exports for hosts.
///
/// ```ignore
/// use halftone::prelude::*;
/// ```
pub mod prelude {
    pub use crate::capabilities::Capabilities;
    pub use crate::channel::{Channel, ColorMode};
    pub use crate::config::{Displacement, DotSizeOsc, HalftoneConfig, HalftoneOptions};
    pub use crate::engine::Halftone;
    pub use crate::error::HalftoneError;
    pub use crate::grid::GridLayout;
    pub use crate::input::{HalftoneEvent, SurfaceLayout};
    pub use crate::scheduler::{FixedRateScheduler, FrameScheduler};
    pub use crate::source::ImageSource;
    pub use crate::surface::{Canvas, Surface};
    pub use crate::time::Clock;
    pub use crate::visuals::Rgb;
    pub use glam::Vec2;
}
