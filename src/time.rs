//! Frame timing.
//!
//! [`Clock`] measures wall-clock animation time for realtime scheduling.
//! [`Debounce`] holds back bursty requests (window resizes) until they have
//! been quiet for a while.
//!
//! # Example
//!
//! ```ignore
//! use halftone::time::Clock;
//!
//! let mut clock = Clock::new();
//! loop {
//!     let elapsed = clock.tick();
//!     halftone.tick(elapsed);
//! }
//! ```

use std::time::{Duration, Instant};

/// Wall-clock elapsed time since creation.
#[derive(Debug)]
pub struct Clock {
    start: Instant,
    elapsed: Duration,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed: Duration::ZERO,
        }
    }

    /// Advance to now. Returns elapsed seconds.
    pub fn tick(&mut self) -> f32 {
        self.elapsed = self.start.elapsed();
        self.elapsed.as_secs_f32()
    }

    /// Elapsed time as of the last [`tick`](Self::tick).
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Coalesces requests until `quiet` has passed since the latest one.
///
/// Time is supplied by the caller, so any monotonic clock works. The last
/// request wins.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    quiet: Duration,
    pending: Option<(T, Duration)>,
}

impl<T> Debounce<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Replace any pending request with `value`, restarting the quiet period.
    pub fn request(&mut self, value: T, now: Duration) {
        self.pending = Some((value, now));
    }

    /// The pending request, once it has been quiet long enough.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        match &self.pending {
            Some((_, at)) if now.saturating_sub(*at) >= self.quiet => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Drop any pending request.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
