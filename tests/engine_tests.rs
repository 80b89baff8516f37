//! End-to-end tests of the halftone engine through its public API.

use halftone::prelude::*;
use halftone::{Channel, ColorMode, PointerState, Vector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Grid size that yields a 2x2 lattice on a 10x10 surface.
const TWO_BY_TWO: f32 = 50.01;

fn canvas_engine(config: HalftoneConfig) -> Halftone<Canvas> {
    Halftone::new(config, Capabilities::FULL, Some(Canvas::new(1, 1)))
}

fn load_solid(h: &mut Halftone<Canvas>, size: u32, rgba: [u8; 4]) {
    let image = ImageSource::solid(size, size, rgba);
    h.load_image(image, SurfaceLayout::at_origin(size as f32, size as f32));
}

// ============================================================================
// Grid scenarios
// ============================================================================

#[test]
fn test_white_image_two_by_two_grid() {
    let config = HalftoneConfig::default()
        .with_grid_size(TWO_BY_TWO)
        .with_dot_threshold(0.05);
    let mut h = canvas_engine(config);
    load_solid(&mut h, 10, [255, 255, 255, 255]);

    for channel in Channel::RGB {
        let dots = h.channel_particles(channel);
        assert_eq!(dots.len(), 4, "{channel:?}");
        for dot in dots {
            assert!((dot.intensity - 1.0).abs() < 1e-6);
        }
    }
    assert_eq!(h.particles().len(), 12);
}

#[test]
fn test_black_image_has_no_dots() {
    let config = HalftoneConfig::default()
        .with_grid_size(TWO_BY_TWO)
        .with_dot_threshold(0.05);
    let mut h = canvas_engine(config);
    load_solid(&mut h, 10, [0, 0, 0, 255]);

    assert!(h.particles().is_empty());
    for channel in Channel::RGB {
        assert!(h.channel_particles(channel).is_empty());
    }
}

#[test]
fn test_empty_additive_frame_is_black() {
    let mut h = canvas_engine(HalftoneConfig::default());
    load_solid(&mut h, 12, [0, 0, 0, 255]);

    assert!(h.tick(0.0));
    assert_eq!(h.output().unwrap().uniform_color(), Some(Rgb::new(0, 0, 0)));
}

#[test]
fn test_empty_subtractive_frame_is_white() {
    let config = HalftoneConfig::default().with_color_mode(ColorMode::Subtractive);
    let mut h = canvas_engine(config);
    // White needs no ink.
    load_solid(&mut h, 12, [255, 255, 255, 255]);

    assert!(h.particles().is_empty());
    assert!(h.tick(0.0));
    assert_eq!(h.output().unwrap().uniform_color(), Some(Rgb::new(255, 255, 255)));
}

#[test]
fn test_partition_invariant() {
    let config = HalftoneConfig::default()
        .with_grid_size(5.0)
        .with_dot_threshold(0.2);
    let mut h = canvas_engine(config.clone());
    let image = ImageSource::gradient(32, 24, [250, 10, 120, 255], [20, 240, 60, 255]);
    h.load_image(image, SurfaceLayout::at_origin(64.0, 48.0));

    let total: usize = h.channels().iter().map(|c| h.channel_particles(*c).len()).sum();
    assert_eq!(total, h.particles().len());
    assert!(total > 0);

    for &channel in h.channels() {
        for dot in h.channel_particles(channel) {
            assert_eq!(dot.channel, channel);
            assert!(dot.intensity >= config.dot_threshold);
        }
    }
}

#[test]
fn test_grid_build_is_deterministic() {
    let image = ImageSource::checkerboard(20, 20, 3, [255, 80, 0, 255], [10, 40, 200, 255]);
    let layout = SurfaceLayout::at_origin(40.0, 40.0);

    for layout_kind in [GridLayout::Cartesian, GridLayout::Radial] {
        let config = HalftoneConfig::default()
            .with_grid_size(4.0)
            .with_layout(layout_kind);
        let mut a = canvas_engine(config.clone());
        let mut b = canvas_engine(config);
        a.load_image(image.clone(), layout);
        b.load_image(image.clone(), layout);

        assert!(!a.particles().is_empty());
        assert_eq!(a.particles(), b.particles());
    }
}

#[test]
fn test_channel_grids_are_rotated_apart() {
    let config = HalftoneConfig::default().with_grid_size(10.0);
    let mut h = canvas_engine(config);
    load_solid(&mut h, 30, [255, 255, 255, 255]);

    let red = h.channel_particles(Channel::Red);
    let green = h.channel_particles(Channel::Green);
    assert!(!red.is_empty() && !green.is_empty());
    let shared = red
        .iter()
        .filter(|r| green.iter().any(|g| (g.origin - r.origin).length() < 1e-3))
        .count();
    assert!(shared < red.len());
}

// ============================================================================
// Capabilities
// ============================================================================

#[test]
fn test_missing_darker_falls_back_to_luminance() {
    let caps = Capabilities {
        has_surface: true,
        supports_darker: false,
    };
    let config = HalftoneConfig::default()
        .with_color_mode(ColorMode::Subtractive)
        .with_grid_size(10.0);
    let mut h = Halftone::new(config, caps, Some(Canvas::new(1, 1)));
    assert_eq!(h.channels(), &[Channel::Lum]);

    load_solid(&mut h, 20, [30, 30, 30, 255]);
    assert!(!h.particles().is_empty());
    assert!(h.particles().iter().all(|p| p.channel == Channel::Lum));
}

#[test]
fn test_no_surface_is_inert() {
    let mut h: Halftone<Canvas> =
        Halftone::new(HalftoneConfig::default(), Capabilities::NONE, None);
    assert!(h.is_inert());

    load_solid(&mut h, 10, [255; 4]);
    h.handle_event(HalftoneEvent::PointerMoved { x: 5.0, y: 5.0 });
    h.start();

    assert!(!h.is_running());
    assert!(!h.tick(0.0));
    assert!(h.particles().is_empty());
    assert!(h.output().is_none());
    assert_eq!(h.run(&mut FixedRateScheduler::stepped(60.0).with_max_frames(5)), 0);
}

#[test]
fn test_capabilities_reported_without_surface_stay_inert() {
    let h = Halftone::new(HalftoneConfig::default(), Capabilities::NONE, Some(Canvas::new(4, 4)));
    assert!(h.is_inert());
}

// ============================================================================
// Physics through the engine
// ============================================================================

#[test]
fn test_dots_settle_after_pointer_leaves() {
    let config = HalftoneConfig::default().with_grid_size(8.0);
    let mut h = canvas_engine(config);
    load_solid(&mut h, 40, [255, 255, 255, 255]);

    h.handle_event(HalftoneEvent::PointerMoved { x: 20.0, y: 20.0 });
    h.handle_event(HalftoneEvent::PointerEngaged);
    for i in 0..20 {
        h.tick(i as f32 / 60.0);
    }
    let moved = h
        .particles()
        .iter()
        .map(|p| (p.position - p.origin).length())
        .fold(0.0_f32, f32::max);
    assert!(moved > 1e-3);

    h.handle_event(HalftoneEvent::PointerReleased);
    h.set_pointer(PointerState::default());
    for i in 20..2000 {
        h.tick(i as f32 / 60.0);
    }
    for p in h.particles() {
        assert!((p.position - p.origin).length() < 1e-3);
    }
}

#[test]
fn test_displacement_decay_is_monotonic() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let friction: f32 = rng.gen_range(0.02..0.5);
        let origin = Vector::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0));
        let mut dot = halftone::Particle::new(Channel::Blue, origin, 3.0, 0.7, friction);
        dot.position = origin + Vector::new(rng.gen_range(-30.0..30.0), rng.gen_range(-30.0..30.0));

        let bound = (20.0 / friction).ceil() as usize;
        let mut prev = dot.displacement().length();
        let mut settled = false;
        for _ in 0..bound {
            dot.update();
            let now = dot.displacement().length();
            assert!(now <= prev);
            prev = now;
            if now < 1e-3 {
                settled = true;
                break;
            }
        }
        assert!(settled, "friction {friction} did not settle in {bound} ticks");
    }
}

// ============================================================================
// Resize and run loop
// ============================================================================

#[test]
fn test_resize_bursts_coalesce() {
    let mut h = canvas_engine(HalftoneConfig::default().with_grid_size(10.0));
    load_solid(&mut h, 10, [255; 4]);
    assert_eq!(h.generation(), 1);
    h.tick(0.0);

    h.handle_event(HalftoneEvent::SurfaceResized(SurfaceLayout::at_origin(20.0, 20.0)));
    h.tick(0.05);
    h.handle_event(HalftoneEvent::SurfaceResized(SurfaceLayout::at_origin(30.0, 30.0)));
    h.tick(0.2);
    assert!(h.has_pending_resize());
    assert_eq!(h.output().unwrap().width(), 10);

    h.tick(0.3);
    assert!(!h.has_pending_resize());
    assert_eq!(h.generation(), 2);
    let out = h.output().unwrap();
    assert_eq!((out.width(), out.height()), (30, 30));
}

#[test]
fn test_image_load_supersedes_earlier_resize() {
    let mut h = canvas_engine(HalftoneConfig::default().with_grid_size(10.0));
    h.handle_event(HalftoneEvent::SurfaceResized(SurfaceLayout::at_origin(40.0, 40.0)));
    load_solid(&mut h, 10, [255; 4]);
    assert!(!h.has_pending_resize());

    h.tick(0.0);
    h.tick(0.3);
    let out = h.output().unwrap();
    assert_eq!((out.width(), out.height()), (10, 10));
    assert_eq!(h.generation(), 1);
}

#[test]
fn test_resize_refreshes_pointer_mapping() {
    let mut h = canvas_engine(HalftoneConfig::default());
    load_solid(&mut h, 10, [255; 4]);

    let layout = SurfaceLayout::new(Vec2::new(50.0, 50.0), Vec2::new(40.0, 20.0));
    h.handle_event(HalftoneEvent::SurfaceResized(layout));
    h.tick(1.0);

    h.handle_event(HalftoneEvent::PointerMoved { x: 60.0, y: 55.0 });
    assert_eq!(h.pointer().position, Vec2::new(10.0, 5.0));
}

#[test]
fn test_run_stops_from_callback() {
    let mut h = canvas_engine(HalftoneConfig::default().with_grid_size(10.0));
    load_solid(&mut h, 10, [255; 4]);

    let mut scheduler = FixedRateScheduler::stepped(60.0).with_max_frames(100);
    let mut calls = 0;
    let frames = h.run_with(&mut scheduler, |h, _| {
        calls += 1;
        if calls == 4 {
            h.stop();
        }
    });
    assert_eq!(frames, 3);
    assert!(!h.is_running());
}

#[test]
fn test_run_renders_every_scheduled_frame() {
    let mut h = canvas_engine(HalftoneConfig::default().with_grid_size(10.0));
    load_solid(&mut h, 10, [255; 4]);
    let frames = h.run(&mut FixedRateScheduler::stepped(60.0).with_max_frames(7));
    assert_eq!(frames, 7);
    assert!(!h.is_running());
}
