//! The halftone engine.
//!
//! [`Halftone`] ties everything together: it owns the configuration, the
//! particles, the pointer state and the compositor, and exposes a small host
//! API: load an image, feed input events, tick frames.
//!
//! # Lifecycle
//!
//! 1. [`Halftone::new`] decides the channel set from the probed
//!    [`Capabilities`]. Without a drawing surface the engine is inert: every
//!    later call is accepted and does nothing.
//! 2. [`Halftone::load_image`] sizes the surface to the displayed image size
//!    and builds the dot grid.
//! 3. Each [`Halftone::tick`] applies a settled resize (rebuilding the grid),
//!    steps the physics, and renders one frame.
//!
//! ```ignore
//! let config = HalftoneConfig::default().with_grid_size(2.0);
//! let caps = Capabilities::probe(|w, h| Some(Canvas::new(w, h)));
//! let mut halftone = Halftone::new(config, caps, Some(Canvas::new(1, 1)));
//!
//! let image = ImageSource::open("portrait.jpg")?;
//! let layout = SurfaceLayout::at_origin(image.width() as f32, image.height() as f32);
//! halftone.load_image(image, layout);
//! halftone.run(&mut FixedRateScheduler::realtime(60.0));
//! ```

use std::path::Path;
use std::time::Duration;

use glam::Vec2;

use crate::capabilities::Capabilities;
use crate::channel::{Channel, ColorMode};
use crate::compositor::Compositor;
use crate::config::HalftoneConfig;
use crate::error::HalftoneError;
use crate::grid::{grid_spacing, GridBuilder, ParticleSet};
use crate::input::{HalftoneEvent, SurfaceLayout, SurfaceTransform};
use crate::particle::Particle;
use crate::sampler::Sampler;
use crate::scheduler::FrameScheduler;
use crate::simulator::{PointerState, Simulator};
use crate::source::ImageSource;
use crate::surface::Surface;
use crate::time::Debounce;

/// Channels to render given the configuration and host capabilities.
///
/// Subtractive composition needs `darker`; without it the engine falls back
/// to a single luminance channel.
pub fn effective_channels(config: &HalftoneConfig, capabilities: &Capabilities) -> Vec<Channel> {
    if config.color_mode == ColorMode::Subtractive && !capabilities.supports_darker {
        vec![Channel::Lum]
    } else {
        config.channels.clone()
    }
}

/// An animated halftone over one image.
pub struct Halftone<S: Surface> {
    config: HalftoneConfig,
    channels: Vec<Channel>,
    /// `None` when the host has no drawing surface.
    compositor: Option<Compositor<S>>,
    image: Option<ImageSource>,
    particles: ParticleSet,
    simulator: Simulator,
    pointer: PointerState,
    transform: SurfaceTransform,
    pending_resize: Debounce<SurfaceLayout>,
    /// Animation time of the latest tick, in seconds.
    now: f32,
    running: bool,
    generation: u64,
}

impl<S: Surface> Halftone<S> {
    /// Create an engine drawing onto `surface`.
    ///
    /// The channel set is fixed here. A missing surface, or capabilities
    /// reporting none, leave the engine inert.
    pub fn new(config: HalftoneConfig, capabilities: Capabilities, surface: Option<S>) -> Self {
        let channels = effective_channels(&config, &capabilities);
        if channels != config.channels {
            log::warn!(
                "subtractive blending unavailable, rendering {:?} instead of {:?}",
                channels,
                config.channels
            );
        }

        let compositor = match surface {
            Some(surface) if capabilities.has_surface => {
                Some(Compositor::new(surface, &channels, config.color_mode))
            }
            _ => {
                log::warn!("no drawing surface available, halftone disabled");
                None
            }
        };

        log::debug!(
            "halftone created: mode={:?} channels={:?} layout={:?}",
            config.color_mode,
            channels,
            config.layout
        );

        Self {
            simulator: Simulator::new(config.displacement, 0.0),
            pending_resize: Debounce::new(config.resize_debounce),
            config,
            channels,
            compositor,
            image: None,
            particles: ParticleSet::default(),
            pointer: PointerState::default(),
            transform: SurfaceTransform::default(),
            now: 0.0,
            running: false,
            generation: 0,
        }
    }

    /// Use `image`, displayed with `layout`, and build its grid.
    ///
    /// Replaces any previous image and particles. A resize still waiting for
    /// its quiet period is dropped, since `layout` is newer.
    pub fn load_image(&mut self, image: ImageSource, layout: SurfaceLayout) {
        log::debug!("image loaded: {}x{}", image.width(), image.height());
        self.image = Some(image);
        if self.pending_resize.is_pending() {
            log::debug!("pending resize superseded by image load");
            self.pending_resize.cancel();
        }
        self.apply_layout(layout);
    }

    /// Decode an image file and load it at its natural size.
    pub fn load_image_file(&mut self, path: impl AsRef<Path>) -> Result<(), HalftoneError> {
        let image = ImageSource::open(path)?;
        let layout = SurfaceLayout::at_origin(image.width() as f32, image.height() as f32);
        self.load_image(image, layout);
        Ok(())
    }

    /// Resize surfaces to `layout`, refresh the pointer mapping and rebuild.
    fn apply_layout(&mut self, layout: SurfaceLayout) {
        let Some(compositor) = self.compositor.as_mut() else {
            return;
        };

        let width = layout.display_size.x.round().max(1.0) as u32;
        let height = layout.display_size.y.round().max(1.0) as u32;
        compositor.resize(width, height);
        self.transform = SurfaceTransform::new(&layout, width as f32);

        self.rebuild();
    }

    /// Regenerate every particle from the current image and surface size.
    fn rebuild(&mut self) {
        let (Some(compositor), Some(image)) = (self.compositor.as_ref(), self.image.as_ref()) else {
            return;
        };

        let width = compositor.output().width() as f32;
        let height = compositor.output().height() as f32;
        let diagonal = Vec2::new(width, height).length();

        let sampler = Sampler::for_surface_width(image, width, self.config.color_mode);
        let builder = GridBuilder::from_config(sampler, width, height, &self.config);

        self.particles = builder.build_all(&self.channels);
        self.simulator.set_diagonal(diagonal);
        self.generation += 1;

        log::info!(
            "grid #{} built: {}x{} surface, spacing {:.2}px, {} dots ({})",
            self.generation,
            width,
            height,
            builder.spacing(),
            self.particles.len(),
            self.channels
                .iter()
                .map(|c| format!("{:?}={}", c, self.particles.channel(*c).len()))
                .collect::<Vec<_>>()
                .join(" ")
        );
    }

    /// React to one host input event.
    ///
    /// Pointer events take effect on the next tick. Resizes are held back
    /// until no further resize has arrived for the configured quiet period.
    pub fn handle_event(&mut self, event: HalftoneEvent) {
        match event {
            HalftoneEvent::PointerMoved { x, y } => {
                let position = self.transform.to_surface(Vec2::new(x, y));
                self.pointer = self.pointer.moved_to(position);
            }
            HalftoneEvent::PointerEngaged => self.pointer = self.pointer.engaged(),
            HalftoneEvent::PointerReleased => self.pointer = self.pointer.released(),
            HalftoneEvent::SurfaceResized(layout) => {
                log::debug!(
                    "resize to {}x{} requested",
                    layout.display_size.x,
                    layout.display_size.y
                );
                self.pending_resize.request(layout, seconds(self.now));
            }
        }
    }

    /// Replace the pointer state in one step, in surface coordinates.
    pub fn set_pointer(&mut self, pointer: PointerState) {
        self.pointer = pointer;
    }

    /// Begin requesting frames. Does nothing on an inert engine.
    pub fn start(&mut self) {
        if self.compositor.is_none() {
            return;
        }
        if !self.running {
            log::debug!("frame loop started");
        }
        self.running = true;
    }

    /// Stop requesting frames. The engine keeps its state.
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("frame loop stopped");
        }
        self.running = false;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance one frame at animation time `time` seconds.
    ///
    /// Returns `false` without doing anything when the engine is inert or no
    /// image has been loaded.
    pub fn tick(&mut self, time: f32) -> bool {
        self.now = time;
        if self.compositor.is_none() || self.image.is_none() {
            return false;
        }

        if let Some(layout) = self.pending_resize.poll(seconds(time)) {
            self.apply_layout(layout);
        }

        self.simulator.update(self.particles.all_mut(), &self.pointer);
        if let Some(compositor) = self.compositor.as_mut() {
            compositor.render(&self.particles, time, &self.config.dot_size_osc);
        }
        true
    }

    /// Start, then tick once per scheduled frame until stopped or the
    /// scheduler runs out. Returns the number of frames rendered.
    pub fn run(&mut self, scheduler: &mut impl FrameScheduler) -> u64 {
        self.run_with(scheduler, |_, _| {})
    }

    /// Like [`run`](Self::run), calling `on_frame` before every tick.
    ///
    /// The callback can feed events to the engine or stop it.
    pub fn run_with<F>(&mut self, scheduler: &mut impl FrameScheduler, mut on_frame: F) -> u64
    where
        F: FnMut(&mut Self, f32),
    {
        self.start();
        let mut frames = 0;
        while self.running {
            let Some(time) = scheduler.wait_for_frame() else {
                break;
            };
            on_frame(self, time);
            if !self.running {
                break;
            }
            if self.tick(time) {
                frames += 1;
            }
        }
        self.stop();
        frames
    }

    /// Every particle, in channel order.
    pub fn particles(&self) -> &[Particle] {
        self.particles.all()
    }

    /// Particles of one channel.
    pub fn channel_particles(&self, channel: Channel) -> &[Particle] {
        self.particles.channel(channel)
    }

    pub fn particle_set(&self) -> &ParticleSet {
        &self.particles
    }

    /// Channels being rendered, after any capability downgrade.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn config(&self) -> &HalftoneConfig {
        &self.config
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// The rendered frame. `None` on an inert engine.
    pub fn output(&self) -> Option<&S> {
        self.compositor.as_ref().map(Compositor::output)
    }

    /// Whether the engine has no surface and will never draw.
    pub fn is_inert(&self) -> bool {
        self.compositor.is_none()
    }

    /// Number of grid builds so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Surface diagonal in pixels, 0 before the first build.
    pub fn diagonal(&self) -> f32 {
        self.simulator.diagonal()
    }

    /// Grid spacing in pixels for the current surface.
    pub fn grid_spacing(&self) -> f32 {
        self.output()
            .map(|s| grid_spacing(s.width() as f32, s.height() as f32, self.config.grid_size))
            .unwrap_or(0.0)
    }

    pub fn transform(&self) -> &SurfaceTransform {
        &self.transform
    }

    /// Whether a resize is waiting for its quiet period to pass.
    pub fn has_pending_resize(&self) -> bool {
        self.pending_resize.is_pending()
    }
}

fn seconds(time: f32) -> Duration {
    Duration::from_secs_f32(time.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Canvas;

    fn engine(config: HalftoneConfig) -> Halftone<Canvas> {
        Halftone::new(config, Capabilities::FULL, Some(Canvas::new(1, 1)))
    }

    #[test]
    fn test_downgrade_only_when_subtractive() {
        let caps = Capabilities {
            has_surface: true,
            supports_darker: false,
        };
        let add = HalftoneConfig::default();
        let sub = HalftoneConfig::default().with_color_mode(ColorMode::Subtractive);

        assert_eq!(effective_channels(&add, &caps), Channel::RGB.to_vec());
        assert_eq!(effective_channels(&sub, &caps), vec![Channel::Lum]);
        assert_eq!(effective_channels(&sub, &Capabilities::FULL), Channel::RGB.to_vec());
    }

    #[test]
    fn test_tick_before_image_does_nothing() {
        let mut h = engine(HalftoneConfig::default());
        assert!(!h.tick(0.0));
        assert_eq!(h.generation(), 0);
    }

    #[test]
    fn test_load_sizes_surface_to_display() {
        let mut h = engine(HalftoneConfig::default());
        let img = ImageSource::solid(4, 3, [200; 4]);
        h.load_image(img, SurfaceLayout::at_origin(40.0, 30.0));

        let out = h.output().unwrap();
        assert_eq!((out.width(), out.height()), (40, 30));
        assert!((h.diagonal() - 50.0).abs() < 1e-4);
        assert!((h.grid_spacing() - 1.25).abs() < 1e-4);
        assert_eq!(h.generation(), 1);
    }

    #[test]
    fn test_pointer_events_use_transform() {
        let mut h = engine(HalftoneConfig::default());
        let img = ImageSource::solid(10, 10, [255; 4]);
        h.load_image(
            img,
            SurfaceLayout::new(Vec2::new(100.0, 20.0), Vec2::new(10.0, 10.0)),
        );

        h.handle_event(HalftoneEvent::PointerMoved { x: 103.0, y: 27.0 });
        h.handle_event(HalftoneEvent::PointerEngaged);
        assert_eq!(*h.pointer(), PointerState::new(Vec2::new(3.0, 7.0), true));

        h.handle_event(HalftoneEvent::PointerReleased);
        assert!(!h.pointer().is_active);
    }

    #[test]
    fn test_start_stop() {
        let mut h = engine(HalftoneConfig::default());
        assert!(!h.is_running());
        h.start();
        assert!(h.is_running());
        h.stop();
        assert!(!h.is_running());
    }
}
