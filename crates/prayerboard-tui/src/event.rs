use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};
use prayerboard_core::prayer::PrayerData;

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    /// Poll interval while something is animating
    animation_tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self::with_animation_fps(tick_rate_ms, 60)
    }

    pub fn with_animation_fps(tick_rate_ms: u64, animation_fps: u32) -> Self {
        let frame_ms = if animation_fps == 0 {
            16
        } else {
            (1000 / animation_fps as u64).max(1)
        };
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            animation_tick_rate: Duration::from_millis(frame_ms.min(tick_rate_ms.max(1))),
        }
    }

    /// Poll for the next event, waking at frame rate when `fast` is set
    pub fn next(&self, fast: bool) -> Result<Option<AppEvent>> {
        let timeout = if fast {
            self.animation_tick_rate
        } else {
            self.tick_rate
        };
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Mouse(mouse) => Ok(Some(AppEvent::Mouse(mouse))),
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse drag or wheel, drives pull-to-refresh
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}

/// Result of a background publish or load, sent back to the main loop
#[derive(Debug)]
pub enum TaskResult {
    Published(std::result::Result<(), String>),
    Loaded(std::result::Result<Option<PrayerData>, String>),
}
