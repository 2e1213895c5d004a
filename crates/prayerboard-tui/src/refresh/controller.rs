//! Pull-to-refresh state machine
//!
//! Gesture events and the programmatic trigger feed the same state. The
//! controller never runs the refresh itself: it hands out a
//! [`RefreshRequest`] and waits for [`PullToRefresh::complete_refresh`].

use std::time::Instant;

use prayerboard_core::RefreshConfig;

use super::indicator::IndicatorFrame;
use super::resistance::{apply_resistance, progress_for};
use crate::motion::{EasingType, RefreshConfigExt, Tween};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullPhase {
    Idle,
    /// Armed: the gesture started with the list at its top
    Pulling,
    /// A refresh is in flight or its indicator is tearing down
    Refreshing,
}

/// Observable snapshot of the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PullState {
    pub phase: PullPhase,
    pub pull_distance: f64,
    pub progress: f64,
    pub loader_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Gesture,
    Programmatic,
}

/// Ask the owner to run the refresh callback once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshRequest {
    pub id: u64,
    pub trigger: RefreshTrigger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Success,
    Failed(String),
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    Idle,
    Pulling,
    /// Sub-threshold release springing back to zero
    Releasing(Tween),
    Refreshing {
        spin_start: Instant,
    },
    FadingOut {
        spin_start: Instant,
        fade: Tween,
    },
    Collapsing(Tween),
}

#[derive(Debug, Clone)]
pub struct PullToRefresh {
    config: RefreshConfig,
    stage: Stage,
    distance: f64,
    scroll_offset: f64,
    next_id: u64,
    in_flight: Option<u64>,
}

impl PullToRefresh {
    pub fn new(config: RefreshConfig) -> Self {
        Self {
            config,
            stage: Stage::Idle,
            distance: 0.0,
            scroll_offset: 0.0,
            next_id: 0,
            in_flight: None,
        }
    }

    pub fn config(&self) -> &RefreshConfig {
        &self.config
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    pub fn phase(&self) -> PullPhase {
        match self.stage {
            Stage::Idle | Stage::Releasing(_) => PullPhase::Idle,
            Stage::Pulling => PullPhase::Pulling,
            Stage::Refreshing { .. } | Stage::FadingOut { .. } | Stage::Collapsing(_) => {
                PullPhase::Refreshing
            }
        }
    }

    pub fn state(&self) -> PullState {
        PullState {
            phase: self.phase(),
            pull_distance: self.distance,
            progress: progress_for(self.distance, self.config.threshold),
            loader_active: !matches!(self.stage, Stage::Idle | Stage::Releasing(_)),
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.phase() == PullPhase::Refreshing
    }

    /// Whether frames must keep coming to animate the indicator
    pub fn needs_tick(&self) -> bool {
        !matches!(self.stage, Stage::Idle | Stage::Pulling)
    }

    /// Record the list's current scroll offset
    pub fn on_scroll(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }

    /// Arm the gesture when the list sits at its top. Returns whether it armed.
    pub fn gesture_begin(&mut self) -> bool {
        if self.scroll_offset > 0.0 {
            return false;
        }
        match self.stage {
            // `distance` holds the last ticked value of the spring-back
            Stage::Idle | Stage::Releasing(_) => {
                self.stage = Stage::Pulling;
                true
            }
            Stage::Pulling => true,
            _ => false,
        }
    }

    /// Feed the total downward translation of the running gesture
    pub fn gesture_update(&mut self, translation: f64) {
        if !matches!(self.stage, Stage::Pulling) || translation <= 0.0 {
            return;
        }
        self.distance = apply_resistance(
            translation,
            self.config.threshold,
            self.config.resistance_factor,
        );
    }

    pub fn gesture_end(&mut self, now: Instant) -> Option<RefreshRequest> {
        if !matches!(self.stage, Stage::Pulling) {
            return None;
        }
        if self.distance >= self.config.threshold {
            return Some(self.start_refresh(RefreshTrigger::Gesture, now));
        }
        self.spring_back(now);
        None
    }

    /// Abandon a running gesture without refreshing, however far it was pulled
    pub fn gesture_cancel(&mut self, now: Instant) {
        if matches!(self.stage, Stage::Pulling) {
            tracing::debug!(distance = self.distance, "Pull gesture cancelled");
            self.spring_back(now);
        }
    }

    fn spring_back(&mut self, now: Instant) {
        if self.distance > 0.0 {
            self.stage = Stage::Releasing(Tween::new(
                self.distance,
                0.0,
                now,
                self.config.release_duration(),
                EasingType::EaseInOut,
            ));
        } else {
            self.stage = Stage::Idle;
        }
    }

    /// Start a refresh without a gesture; a no-op while one is running
    pub fn trigger_refresh(&mut self, now: Instant) -> Option<RefreshRequest> {
        if self.is_refreshing() {
            tracing::debug!("Refresh already in progress, ignoring trigger");
            return None;
        }
        Some(self.start_refresh(RefreshTrigger::Programmatic, now))
    }

    fn start_refresh(&mut self, trigger: RefreshTrigger, now: Instant) -> RefreshRequest {
        self.next_id += 1;
        let id = self.next_id;
        self.distance = self.config.threshold;
        self.stage = Stage::Refreshing { spin_start: now };
        self.in_flight = Some(id);
        tracing::debug!(id, ?trigger, "Refresh started");
        RefreshRequest { id, trigger }
    }

    /// Settle the refresh `id`. Both outcomes run the same teardown.
    /// Returns false for an unknown or stale id.
    pub fn complete_refresh(&mut self, id: u64, outcome: &RefreshOutcome, now: Instant) -> bool {
        if self.in_flight != Some(id) {
            return false;
        }
        let Stage::Refreshing { spin_start } = self.stage else {
            return false;
        };
        self.in_flight = None;

        match outcome {
            RefreshOutcome::Success => tracing::debug!(id, "Refresh finished"),
            RefreshOutcome::Failed(e) => tracing::warn!(id, error = %e, "Refresh failed"),
        }

        self.stage = Stage::FadingOut {
            spin_start,
            fade: Tween::new(
                1.0,
                0.0,
                now,
                self.config.fade_out_duration(),
                EasingType::EaseInOut,
            ),
        };
        true
    }

    /// Advance the spring-back and teardown animations
    pub fn tick(&mut self, now: Instant) {
        loop {
            match self.stage {
                Stage::Releasing(tween) => {
                    self.distance = tween.value_at(now);
                    if tween.is_complete_at(now) {
                        self.settle();
                    }
                    return;
                }
                Stage::FadingOut { fade, .. } if fade.is_complete_at(now) => {
                    // Collapse starts exactly when the fade ended
                    self.stage = Stage::Collapsing(Tween::new(
                        self.distance,
                        0.0,
                        fade.end(),
                        self.config.collapse_duration(),
                        EasingType::EaseInOut,
                    ));
                }
                Stage::Collapsing(tween) => {
                    self.distance = tween.value_at(now);
                    if tween.is_complete_at(now) {
                        self.settle();
                    }
                    return;
                }
                _ => return,
            }
        }
    }

    fn settle(&mut self) {
        self.stage = Stage::Idle;
        self.distance = 0.0;
    }

    /// How far the content is pushed down below the indicator
    pub fn content_offset(&self) -> f64 {
        self.distance
    }

    pub fn indicator(&self, now: Instant) -> IndicatorFrame {
        let revolution = self.config.revolution_duration().as_secs_f64();
        let rotation = |spin_start: Instant| {
            let elapsed = now.saturating_duration_since(spin_start).as_secs_f64();
            (elapsed / revolution).fract() * 360.0
        };

        match self.stage {
            Stage::Refreshing { spin_start } => {
                IndicatorFrame::spinning(self.distance, rotation(spin_start), 1.0)
            }
            Stage::FadingOut { spin_start, fade } => {
                IndicatorFrame::spinning(self.distance, rotation(spin_start), fade.value_at(now))
            }
            Stage::Collapsing(_) => IndicatorFrame::spinning(self.distance, 0.0, 0.0),
            _ => IndicatorFrame::pulling(self.distance, progress_for(self.distance, self.config.threshold)),
        }
    }
}
