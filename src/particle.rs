//! Halftone dots.
//!
//! A [`Particle`] is anchored to the grid point it was created on. Pointer
//! forces push it around; friction bleeds off its velocity and pulls it back
//! to its origin until it settles.

use std::f32::consts::TAU;

use crate::channel::Channel;
use crate::config::DotSizeOsc;
use crate::surface::Surface;
use crate::vector::Vector;
use crate::visuals::Rgb;

/// One halftone dot.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Channel grid this dot belongs to.
    pub channel: Channel,
    /// Rest position assigned by the grid.
    pub origin: Vector,
    /// Current, displaced position.
    pub position: Vector,
    /// Current velocity in surface pixels per tick.
    pub velocity: Vector,
    /// Forces applied since the last update.
    acceleration: Vector,
    /// Maximum dot radius.
    pub natural_size: f32,
    /// Channel intensity sampled at the origin when the dot was created.
    pub intensity: f32,
    /// Fraction of velocity (and of displacement) lost each tick.
    pub friction: f32,
    /// Breathing phase offset in cycles, derived from the origin.
    phase: f32,
}

impl Particle {
    /// Create a dot at rest on its origin.
    pub fn new(
        channel: Channel,
        origin: Vector,
        natural_size: f32,
        intensity: f32,
        friction: f32,
    ) -> Self {
        Self {
            channel,
            origin,
            position: origin,
            velocity: Vector::ZERO,
            acceleration: Vector::ZERO,
            natural_size,
            intensity,
            friction,
            phase: phase_from_origin(origin),
        }
    }

    /// Accumulate a force for the next [`update`](Self::update).
    #[inline]
    pub fn apply_force(&mut self, force: Vector) {
        self.acceleration += force;
    }

    /// Advance one tick.
    ///
    /// Accumulated force goes into velocity, velocity is damped and
    /// integrated, then the displacement from the origin is damped by the
    /// same friction factor. With no force and no velocity the displacement
    /// shrinks by exactly `1 - friction` per tick.
    pub fn update(&mut self) {
        let keep = 1.0 - self.friction;

        self.velocity += self.acceleration;
        self.velocity *= keep;
        self.position += self.velocity;
        self.position = self.origin + (self.position - self.origin) * keep;

        self.acceleration = Vector::ZERO;
    }

    /// Offset from the rest position.
    #[inline]
    pub fn displacement(&self) -> Vector {
        self.position - self.origin
    }

    /// Breathing multiplier at `time` seconds.
    pub fn oscillation(&self, time: f32, osc: &DotSizeOsc) -> f32 {
        if osc.period <= 0.0 {
            return 1.0;
        }
        1.0 + osc.delta * (TAU * (time / osc.period + self.phase)).sin()
    }

    /// Drawn radius at `time` seconds.
    pub fn render_size(&self, time: f32, osc: &DotSizeOsc) -> f32 {
        self.natural_size * self.intensity * self.oscillation(time, osc)
    }

    /// Draw this dot at its current position.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, color: Rgb, time: f32, osc: &DotSizeOsc) {
        let size = self.render_size(time, osc);
        if size > 0.0 {
            surface.fill_dot(self.position, size, color);
        }
    }
}

/// Stable pseudo-random phase in `[0, 1)` for a grid point.
fn phase_from_origin(origin: Vector) -> f32 {
    let x = origin.x.to_bits();
    let y = origin.y.to_bits();
    let mut n = x
        .wrapping_mul(374761393)
        .wrapping_add(y.wrapping_mul(668265263));
    n = (n ^ (n >> 13)).wrapping_mul(1274126177);
    n ^= n >> 16;
    (n & 0xFFFF) as f32 / 65536.0
}
