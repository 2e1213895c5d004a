//! L3 Molecular Layer: Scroll animation controller
//!
//! Smooth row scrolling for the prayer list and the editor. Scroll requests
//! made within one frame are batched and resolved on the next `update_at`.

use std::time::Instant;

use super::config::{ScrollConfig, ScrollConfigExt};
use super::tween::Tween;

#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    animation: Option<Tween>,
    config: ScrollConfig,
    current: u16,
    pending_delta: i32,
    /// While set, all scroll requests are dropped
    locked: bool,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current: 0,
            pending_delta: 0,
            locked: false,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Pending work that needs the high frame rate
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0
    }

    #[inline]
    pub fn current(&self) -> u16 {
        self.current
    }

    /// Final position once the running animation settles
    pub fn target(&self) -> u16 {
        self.animation
            .as_ref()
            .map(|a| a.target().round() as u16)
            .unwrap_or(self.current)
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Freeze user scrolling; an in-flight animation is stopped where it is
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        if locked {
            self.animation = None;
            self.pending_delta = 0;
        }
    }

    /// Jump without animation. Used for programmatic adjustments, so it
    /// ignores the lock.
    pub fn set_position(&mut self, position: u16) {
        self.animation = None;
        self.pending_delta = 0;
        self.current = position;
    }

    pub fn scroll_by(&mut self, delta: i32, max_scroll: u16) {
        if self.locked || delta == 0 {
            return;
        }
        if !self.config.is_smooth() {
            self.current = (self.current as i32 + delta).clamp(0, max_scroll as i32) as u16;
            return;
        }
        self.pending_delta += delta;
    }

    pub fn scroll_lines(&mut self, direction: i32, max_scroll: u16) {
        let lines = self.config.scroll_lines.max(1) as i32;
        self.scroll_by(direction.signum() * lines, max_scroll);
    }

    pub fn scroll_half_page(&mut self, direction: i32, viewport_height: u16, max_scroll: u16) {
        let half = (viewport_height / 2).max(1) as i32;
        self.scroll_by(direction.signum() * half, max_scroll);
    }

    /// Animate to an absolute position
    pub fn scroll_to(&mut self, target: u16, max_scroll: u16, now: Instant) {
        if self.locked {
            return;
        }
        let target = target.min(max_scroll);
        self.pending_delta = 0;
        if !self.config.is_smooth() || target == self.current {
            self.animation = None;
            self.current = target;
            return;
        }
        self.animation = Some(self.tween(target, now));
    }

    fn tween(&self, target: u16, now: Instant) -> Tween {
        Tween::new(
            self.current as f64,
            target as f64,
            now,
            self.config.animation_duration(),
            self.config.easing,
        )
    }

    /// Advance to `now` and return the visible position
    pub fn update_at(&mut self, now: Instant, max_scroll: u16) -> u16 {
        if self.pending_delta != 0 {
            let target = (self.target() as i32 + self.pending_delta).clamp(0, max_scroll as i32) as u16;
            self.pending_delta = 0;
            if target != self.current {
                self.animation = Some(self.tween(target, now));
            }
        }

        if let Some(anim) = self.animation {
            self.current = (anim.value_at(now).round().max(0.0) as u16).min(max_scroll);
            if anim.is_complete_at(now) {
                self.animation = None;
            }
        }
        self.current = self.current.min(max_scroll);
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn smooth() -> ScrollConfig {
        ScrollConfig {
            smooth_enabled: true,
            animation_duration_ms: 100,
            ..Default::default()
        }
    }

    #[test]
    fn test_instant_scroll_when_disabled() {
        let mut animator = ScrollAnimator::new(ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        });
        animator.scroll_to(100, 200, Instant::now());
        assert_eq!(animator.current(), 100);
        assert!(!animator.needs_update());
    }

    #[test]
    fn test_scroll_by_batching() {
        let mut animator = ScrollAnimator::new(smooth());
        animator.scroll_by(10, 200);
        animator.scroll_by(10, 200);
        animator.scroll_by(10, 200);

        let t0 = Instant::now();
        animator.update_at(t0, 200);
        assert_eq!(animator.target(), 30);
        assert_eq!(animator.update_at(t0 + Duration::from_millis(100), 200), 30);
        assert!(!animator.needs_update());
    }

    #[test]
    fn test_scroll_clamp_max() {
        let mut animator = ScrollAnimator::new(smooth());
        let t0 = Instant::now();
        animator.set_position(50);
        animator.scroll_to(300, 100, t0);
        assert_eq!(animator.target(), 100);
        assert_eq!(animator.update_at(t0 + Duration::from_secs(1), 100), 100);
    }

    #[test]
    fn test_lock_drops_requests_but_allows_programmatic_moves() {
        let mut animator = ScrollAnimator::new(smooth());
        animator.set_locked(true);
        animator.scroll_by(5, 100);
        animator.scroll_to(40, 100, Instant::now());
        assert!(!animator.needs_update());
        assert_eq!(animator.current(), 0);

        animator.set_position(12);
        assert_eq!(animator.current(), 12);

        animator.set_locked(false);
        animator.scroll_by(5, 100);
        assert!(animator.needs_update());
    }
}
