//! L3 Molecular Layer: a single timed value transition

use std::time::{Duration, Instant};

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete_at, lerp, progress_at};

/// One scalar animating from `from` to `to`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    start: Instant,
    duration: Duration,
    easing: EasingType,
}

impl Tween {
    pub fn new(from: f64, to: f64, start: Instant, duration: Duration, easing: EasingType) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    /// Eased value at `now`; exactly `to` once complete
    pub fn value_at(&self, now: Instant) -> f64 {
        if self.is_complete_at(now) {
            return self.to;
        }
        let t = self.easing.apply(progress_at(self.start, self.duration, now));
        lerp(self.from, self.to, t)
    }

    pub fn is_complete_at(&self, now: Instant) -> bool {
        is_complete_at(self.start, self.duration, now)
    }

    /// Instant at which the tween finishes
    pub fn end(&self) -> Instant {
        self.start + self.duration
    }
}
