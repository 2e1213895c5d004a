//! Per-row delete choreography: slide and fade out, then collapse
//!
//! Heights are measured in whatever unit the owner lays rows out in; the
//! editor uses terminal rows.

use std::time::{Duration, Instant};

use prayerboard_core::EditorConfig;

use crate::motion::timing::{lerp, progress_at};
use crate::motion::{CubicBezier, EditorConfigExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionPhase {
    Stable,
    Animating,
    Removed,
}

/// Animation parameters of one row at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeletionState {
    pub phase: DeletionPhase,
    pub cached_height: f64,
    pub translate_x: f64,
    pub opacity: f64,
    pub collapsed_height: f64,
    pub collapsed_margin: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeleteTiming {
    pub slide_distance: f64,
    pub slide: Duration,
    pub collapse: Duration,
    pub easing: CubicBezier,
}

impl DeleteTiming {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            slide_distance: config.slide_distance,
            slide: config.slide_duration(),
            collapse: config.collapse_duration(),
            easing: CubicBezier::EASE,
        }
    }
}

impl Default for DeleteTiming {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEvent {
    /// Slide and fade finished, height is collapsing
    CollapseStarted,
    /// Row is fully collapsed and can leave the model
    Finished,
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Stable,
    Sliding { start: Instant },
    Collapsing { start: Instant },
    Removed,
}

#[derive(Debug, Clone)]
pub struct RowDeleteAnimator {
    timing: DeleteTiming,
    margin: f64,
    cached_height: f64,
    step: Step,
}

impl RowDeleteAnimator {
    pub fn new(timing: DeleteTiming, margin: f64) -> Self {
        Self {
            timing,
            margin,
            cached_height: 0.0,
            step: Step::Stable,
        }
    }

    pub fn phase(&self) -> DeletionPhase {
        match self.step {
            Step::Stable => DeletionPhase::Stable,
            Step::Sliding { .. } | Step::Collapsing { .. } => DeletionPhase::Animating,
            Step::Removed => DeletionPhase::Removed,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.phase() == DeletionPhase::Animating
    }

    pub fn cached_height(&self) -> f64 {
        self.cached_height
    }

    /// Report the rendered height after a layout pass. Frozen once deletion starts.
    pub fn on_layout(&mut self, height: f64) {
        if matches!(self.step, Step::Stable) {
            self.cached_height = height.max(0.0);
        }
    }

    /// Start deleting. Returns the space the row occupies including its margin,
    /// or `None` if the row is already on its way out.
    pub fn begin(&mut self, now: Instant) -> Option<f64> {
        if !matches!(self.step, Step::Stable) {
            return None;
        }
        self.step = Step::Sliding { start: now };
        Some(self.cached_height + self.margin)
    }

    fn eased(&self, start: Instant, duration: Duration, now: Instant) -> f64 {
        self.timing.easing.solve(progress_at(start, duration, now))
    }

    /// Advance the phase sequence. Reports `Finished` exactly once.
    pub fn tick(&mut self, now: Instant) -> Option<RowEvent> {
        let mut event = None;
        if let Step::Sliding { start } = self.step {
            let slide_end = start + self.timing.slide;
            if now < slide_end {
                return None;
            }
            self.step = Step::Collapsing { start: slide_end };
            event = Some(RowEvent::CollapseStarted);
        }
        if let Step::Collapsing { start } = self.step {
            if now >= start + self.timing.collapse {
                self.step = Step::Removed;
                event = Some(RowEvent::Finished);
            }
        }
        event
    }

    pub fn style(&self, now: Instant) -> DeletionState {
        let mut state = DeletionState {
            phase: self.phase(),
            cached_height: self.cached_height,
            translate_x: 0.0,
            opacity: 1.0,
            collapsed_height: self.cached_height,
            collapsed_margin: self.margin,
        };
        match self.step {
            Step::Stable => {}
            Step::Sliding { start } => {
                let t = self.eased(start, self.timing.slide, now);
                state.translate_x = lerp(0.0, -self.timing.slide_distance, t);
                state.opacity = lerp(1.0, 0.0, t);
            }
            Step::Collapsing { start } => {
                let t = self.eased(start, self.timing.collapse, now);
                state.translate_x = -self.timing.slide_distance;
                state.opacity = 0.0;
                state.collapsed_height = lerp(self.cached_height, 0.0, t);
                state.collapsed_margin = lerp(self.margin, 0.0, t);
            }
            Step::Removed => {
                state.translate_x = -self.timing.slide_distance;
                state.opacity = 0.0;
                state.collapsed_height = 0.0;
                state.collapsed_margin = 0.0;
            }
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn animator() -> RowDeleteAnimator {
        let mut row = RowDeleteAnimator::new(DeleteTiming::default(), 24.0);
        row.on_layout(80.0);
        row
    }

    #[test]
    fn test_height_cached_until_deletion_starts() {
        let t0 = Instant::now();
        let mut row = animator();
        row.on_layout(90.0);
        assert_eq!(row.begin(t0), Some(114.0));

        // Layout passes during the animation do not move the frozen height
        row.on_layout(30.0);
        assert_eq!(row.cached_height(), 90.0);
        assert_eq!(row.begin(t0), None);
    }

    #[test]
    fn test_slide_then_collapse_then_finish() {
        let t0 = Instant::now();
        let mut row = animator();
        let stable = row.style(t0);
        assert_eq!(stable.phase, DeletionPhase::Stable);
        assert_eq!(stable.collapsed_height, 80.0);

        row.begin(t0);
        let mid_slide = row.style(t0 + ms(140));
        assert_eq!(mid_slide.phase, DeletionPhase::Animating);
        assert!(mid_slide.translate_x < 0.0 && mid_slide.translate_x > -400.0);
        assert!(mid_slide.opacity > 0.0 && mid_slide.opacity < 1.0);
        // Height stays frozen while sliding
        assert_eq!(mid_slide.collapsed_height, 80.0);

        assert_eq!(row.tick(t0 + ms(279)), None);
        assert_eq!(row.tick(t0 + ms(280)), Some(RowEvent::CollapseStarted));

        let mid_collapse = row.style(t0 + ms(390));
        assert_eq!(mid_collapse.opacity, 0.0);
        assert!(mid_collapse.collapsed_height > 0.0 && mid_collapse.collapsed_height < 80.0);
        assert!(mid_collapse.collapsed_margin > 0.0 && mid_collapse.collapsed_margin < 24.0);

        assert_eq!(row.tick(t0 + ms(499)), None);
        assert_eq!(row.tick(t0 + ms(500)), Some(RowEvent::Finished));
        assert_eq!(row.phase(), DeletionPhase::Removed);
        assert_eq!(row.tick(t0 + ms(600)), None);

        let gone = row.style(t0 + ms(600));
        assert_eq!(gone.collapsed_height, 0.0);
        assert_eq!(gone.collapsed_margin, 0.0);
    }

    #[test]
    fn test_coarse_tick_finishes_in_one_step() {
        let t0 = Instant::now();
        let mut row = animator();
        row.begin(t0);
        assert_eq!(row.tick(t0 + ms(5_000)), Some(RowEvent::Finished));
    }

    #[test]
    fn test_stable_row_never_finishes() {
        let mut row = animator();
        assert_eq!(row.tick(Instant::now() + ms(5_000)), None);
        assert_eq!(row.phase(), DeletionPhase::Stable);
    }
}
