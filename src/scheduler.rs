//! Frame scheduling.
//!
//! The engine's run loop asks a [`FrameScheduler`] for each frame. Windowed
//! hosts usually drive [`Halftone::tick`](crate::Halftone::tick) from their
//! own redraw callback instead and never need one.

use std::thread;
use std::time::Duration;

use crate::time::Clock;

/// Source of frame ticks.
pub trait FrameScheduler {
    /// Block until the next frame is due and return the animation time in
    /// seconds. `None` means the host is shutting down.
    fn wait_for_frame(&mut self) -> Option<f32>;
}

/// Ticks at a fixed rate, optionally for a limited number of frames.
///
/// A realtime scheduler sleeps between frames. A stepped one returns
/// immediately and advances time by exactly one frame interval per call,
/// which makes offline rendering and tests reproducible.
#[derive(Debug)]
pub struct FixedRateScheduler {
    interval: Duration,
    max_frames: Option<u64>,
    frame: u64,
    realtime: bool,
    clock: Option<Clock>,
}

impl FixedRateScheduler {
    pub fn realtime(fps: f32) -> Self {
        Self::with_rate(fps, true)
    }

    pub fn stepped(fps: f32) -> Self {
        Self::with_rate(fps, false)
    }

    fn with_rate(fps: f32, realtime: bool) -> Self {
        let fps = if fps > 0.0 { fps } else { 60.0 };
        Self {
            interval: Duration::from_secs_f32(1.0 / fps),
            max_frames: None,
            frame: 0,
            realtime,
            clock: None,
        }
    }

    /// Stop after `frames` frames.
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frame
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl FrameScheduler for FixedRateScheduler {
    fn wait_for_frame(&mut self) -> Option<f32> {
        if self.max_frames.is_some_and(|max| self.frame >= max) {
            return None;
        }

        let due = self.interval * self.frame as u32;
        if self.realtime {
            let clock = self.clock.get_or_insert_with(Clock::new);
            clock.tick();
            let now = clock.elapsed();
            if due > now {
                thread::sleep(due - now);
            }
        }

        self.frame += 1;
        Some(due.as_secs_f32())
    }
}
