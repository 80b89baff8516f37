//! Dot grid generation.
//!
//! Each channel gets its own grid, rotated by the channel's angle. Grid points
//! are sampled once; points whose intensity falls below the threshold never
//! become particles. Two layouts are available:
//!
//! - [`GridLayout::Cartesian`]: a square lattice rotated about the surface
//!   center, large enough to cover the surface at any angle.
//! - [`GridLayout::Radial`]: concentric rings of 1, 6, 12, 18, ... points around
//!   a center nudged one grid step in the channel's direction.
//!
//! Builds are deterministic: the same image, size and configuration always
//! produce the same particles.

use std::f32::consts::{SQRT_2, TAU};
use std::ops::Range;

use glam::Vec2;

use crate::channel::Channel;
use crate::config::HalftoneConfig;
use crate::particle::Particle;
use crate::sampler::Sampler;
use crate::vector::{rotate_about, Vector};

/// Grid point arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridLayout {
    #[default]
    Cartesian,
    Radial,
}

/// Side of the square that covers a `width` x `height` surface under any
/// rotation.
#[inline]
fn coverage_extent(width: f32, height: f32) -> f32 {
    width.max(height) * SQRT_2
}

/// Points of a square lattice with `spacing`, rotated by `angle` about the
/// center of a `width` x `height` surface.
///
/// The lattice is centered exactly on the surface center. It is not anchored
/// at `(diag - width) / 2` from the top-left corner, which would leave it
/// slightly off-center whenever `cells * spacing` overshoots the diagonal.
pub fn cartesian_points(width: f32, height: f32, spacing: f32, angle: f32) -> Vec<Vector> {
    let extent = coverage_extent(width, height);
    let cells = (extent / spacing).ceil().max(1.0) as usize;
    let center = Vec2::new(width / 2.0, height / 2.0);
    let half_span = cells as f32 * spacing / 2.0;

    let mut points = Vec::with_capacity(cells * cells);
    for row in 0..cells {
        for col in 0..cells {
            let cell = Vec2::new(
                (col as f32 + 0.5) * spacing - half_span,
                (row as f32 + 0.5) * spacing - half_span,
            );
            points.push(rotate_about(center + cell, center, angle));
        }
    }
    points
}

/// Center of the radial grid: one `spacing` step from the surface center in
/// the direction of `angle`.
pub fn radial_center(width: f32, height: f32, spacing: f32, angle: f32) -> Vector {
    Vec2::new(width / 2.0, height / 2.0) + Vec2::from_angle(angle) * spacing
}

/// Number of points on ring `level`.
#[inline]
pub fn ring_count(level: usize) -> usize {
    (level * 6).max(1)
}

/// Points of ring `level` around `center`, evenly spaced and starting at
/// `angle`.
pub fn radial_ring(center: Vector, level: usize, spacing: f32, angle: f32) -> impl Iterator<Item = Vector> {
    let count = ring_count(level);
    let radius = level as f32 * spacing;
    (0..count).map(move |j| {
        let theta = TAU * j as f32 / count as f32 + angle;
        center + Vec2::from_angle(theta) * radius
    })
}

/// All radial grid points for a `width` x `height` surface.
pub fn radial_points(width: f32, height: f32, spacing: f32, angle: f32) -> Vec<Vector> {
    let extent = coverage_extent(width, height);
    let center = radial_center(width, height, spacing, angle);
    let levels = ((extent + spacing) / spacing).ceil() as usize;

    (0..levels)
        .flat_map(|level| radial_ring(center, level, spacing, angle))
        .collect()
}

/// Builds per-channel particle grids for one surface size.
#[derive(Debug, Clone, Copy)]
pub struct GridBuilder<'a> {
    sampler: Sampler<'a>,
    width: f32,
    height: f32,
    spacing: f32,
    threshold: f32,
    friction: f32,
    layout: GridLayout,
}

impl<'a> GridBuilder<'a> {
    /// Builder with a threshold of 0, no friction and a cartesian layout.
    pub fn new(sampler: Sampler<'a>, width: f32, height: f32, spacing: f32) -> Self {
        Self {
            sampler,
            width,
            height,
            spacing,
            threshold: 0.0,
            friction: 0.0,
            layout: GridLayout::Cartesian,
        }
    }

    /// Builder for a surface, with spacing, threshold, friction and layout
    /// taken from `config`.
    pub fn from_config(sampler: Sampler<'a>, width: f32, height: f32, config: &HalftoneConfig) -> Self {
        let spacing = grid_spacing(width, height, config.grid_size);
        Self::new(sampler, width, height, spacing)
            .with_threshold(config.dot_threshold)
            .with_friction(config.friction)
            .with_layout(config.layout)
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_layout(mut self, layout: GridLayout) -> Self {
        self.layout = layout;
        self
    }

    #[inline]
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Radius of a full-intensity dot: half the diagonal of a grid cell.
    #[inline]
    pub fn natural_size(&self) -> f32 {
        self.spacing * SQRT_2 / 2.0
    }

    /// Grid points for `angle`, before thresholding.
    pub fn points(&self, angle: f32) -> Vec<Vector> {
        match self.layout {
            GridLayout::Cartesian => cartesian_points(self.width, self.height, self.spacing, angle),
            GridLayout::Radial => radial_points(self.width, self.height, self.spacing, angle),
        }
    }

    /// Particles of one channel grid rotated by `angle`.
    ///
    /// Points sampling below the threshold are skipped.
    pub fn build(&self, channel: Channel, angle: f32) -> Vec<Particle> {
        let natural_size = self.natural_size();
        self.points(angle)
            .into_iter()
            .filter_map(|origin| {
                let intensity = self.sampler.sample(origin, channel);
                (intensity >= self.threshold).then(|| {
                    Particle::new(channel, origin, natural_size, intensity, self.friction)
                })
            })
            .collect()
    }

    /// Grids for every channel, each at its own angle.
    pub fn build_all(&self, channels: &[Channel]) -> ParticleSet {
        let mut set = ParticleSet::default();
        for &channel in channels {
            set.push_channel(channel, self.build(channel, channel.grid_angle()));
        }
        set
    }
}

/// Grid spacing in pixels: `grid_size` percent of the surface diagonal.
pub fn grid_spacing(width: f32, height: f32, grid_size: f32) -> f32 {
    grid_size / 100.0 * (width * width + height * height).sqrt()
}

/// All particles, partitioned by channel.
///
/// Particles live in one flat list; each channel owns a contiguous range of
/// it, so the channel views are disjoint and together cover the whole list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleSet {
    particles: Vec<Particle>,
    ranges: Vec<(Channel, Range<usize>)>,
}

impl ParticleSet {
    /// Append a channel's particles.
    fn push_channel(&mut self, channel: Channel, particles: Vec<Particle>) {
        let start = self.particles.len();
        self.particles.extend(particles);
        self.ranges.push((channel, start..self.particles.len()));
    }

    /// Every particle, in channel order.
    #[inline]
    pub fn all(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn all_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Particles of one channel. Empty for channels that were not built.
    pub fn channel(&self, channel: Channel) -> &[Particle] {
        self.ranges
            .iter()
            .find(|(c, _)| *c == channel)
            .map(|(_, range)| &self.particles[range.clone()])
            .unwrap_or(&[])
    }

    /// Channels in build order.
    pub fn channels(&self) -> impl Iterator<Item = Channel> + '_ {
        self.ranges.iter().map(|(c, _)| *c)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
