//! Per-frame physics.
//!
//! The pointer pushes (or pulls) nearby dots with a force that eases in from
//! zero at the edge of its radius to full strength at its center. After the
//! force is applied every particle advances one tick.

use std::f32::consts::PI;

use glam::Vec2;

use crate::config::Displacement;
use crate::particle::Particle;
use crate::vector::{subtract, Vector};

/// Where the pointer is and whether it is pressed.
///
/// Position is in surface coordinates. Both fields change together so a
/// frame never sees a half-applied pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub position: Vector,
    pub is_active: bool,
}

impl PointerState {
    /// Far enough off any surface that no dot feels it.
    pub const OFF_SURFACE: Vector = Vec2::splat(-1.0e7);

    pub fn new(position: Vector, is_active: bool) -> Self {
        Self {
            position,
            is_active,
        }
    }

    pub fn moved_to(self, position: Vector) -> Self {
        Self { position, ..self }
    }

    pub fn engaged(self) -> Self {
        Self {
            is_active: true,
            ..self
        }
    }

    pub fn released(self) -> Self {
        Self {
            is_active: false,
            ..self
        }
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new(Self::OFF_SURFACE, false)
    }
}

/// The pointer's force field for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerField {
    pub center: Vector,
    /// Reach in surface pixels.
    pub radius: f32,
    pub force_scale: f32,
}

impl PointerField {
    /// Field for `pointer` on a surface with the given diagonal.
    pub fn new(pointer: &PointerState, displacement: &Displacement, diagonal: f32) -> Self {
        let (radius, force_scale) = if pointer.is_active {
            (displacement.active_radius, displacement.active_force)
        } else {
            (displacement.hover_radius, displacement.hover_force)
        };
        Self {
            center: pointer.position,
            radius: radius * diagonal,
            force_scale,
        }
    }

    /// Falloff weight in `[0, 1]` at `distance` from the pointer.
    ///
    /// 1 at the pointer, exactly 0 at or beyond the radius.
    pub fn falloff(&self, distance: f32) -> f32 {
        if self.radius <= 0.0 {
            return 0.0;
        }
        let proximity = (self.radius - distance).max(0.0) / self.radius;
        if proximity <= 0.0 {
            return 0.0;
        }
        ((1.0 - proximity) * PI).cos() * 0.5 + 0.5
    }

    /// Force on a particle at `position`.
    pub fn force_at(&self, position: Vector) -> Vector {
        let delta = subtract(position, self.center);
        let weight = self.falloff(delta.length());
        if weight == 0.0 {
            return Vector::ZERO;
        }
        delta * weight * self.force_scale
    }
}

/// Advances particles one tick at a time.
#[derive(Debug, Clone, Copy)]
pub struct Simulator {
    displacement: Displacement,
    diagonal: f32,
}

impl Simulator {
    pub fn new(displacement: Displacement, diagonal: f32) -> Self {
        Self {
            displacement,
            diagonal,
        }
    }

    pub fn set_diagonal(&mut self, diagonal: f32) {
        self.diagonal = diagonal;
    }

    #[inline]
    pub fn diagonal(&self) -> f32 {
        self.diagonal
    }

    /// Apply the pointer force to every particle, then step each one.
    pub fn update(&self, particles: &mut [Particle], pointer: &PointerState) {
        let field = PointerField::new(pointer, &self.displacement, self.diagonal);
        for particle in particles.iter_mut() {
            particle.apply_force(field.force_at(particle.position));
            particle.update();
        }
    }
}
