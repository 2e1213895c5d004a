//! L4 Atomic Layer: Duration helpers over the core animation settings

use std::time::Duration;

pub use prayerboard_core::{AudioConfig, EditorConfig, RefreshConfig, ScrollConfig};

/// Extension trait for ScrollConfig with utility methods
pub trait ScrollConfigExt {
    fn animation_duration(&self) -> Duration;

    /// Frame interval while something is animating
    fn animation_tick_duration(&self) -> Duration;

    fn is_smooth(&self) -> bool;
}

impl ScrollConfigExt for ScrollConfig {
    #[inline]
    fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[inline]
    fn animation_tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}

/// Phase durations of the pull-to-refresh choreography
pub trait RefreshConfigExt {
    fn release_duration(&self) -> Duration;
    fn fade_out_duration(&self) -> Duration;
    fn collapse_duration(&self) -> Duration;
    fn revolution_duration(&self) -> Duration;
}

impl RefreshConfigExt for RefreshConfig {
    fn release_duration(&self) -> Duration {
        Duration::from_millis(self.release_ms)
    }

    fn fade_out_duration(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }

    fn collapse_duration(&self) -> Duration {
        Duration::from_millis(self.collapse_ms)
    }

    fn revolution_duration(&self) -> Duration {
        Duration::from_millis(self.revolution_ms.max(1))
    }
}

/// Phase durations of the row delete animation
pub trait EditorConfigExt {
    fn slide_duration(&self) -> Duration;
    fn collapse_duration(&self) -> Duration;
}

impl EditorConfigExt for EditorConfig {
    fn slide_duration(&self) -> Duration {
        Duration::from_millis(self.slide_ms)
    }

    fn collapse_duration(&self) -> Duration {
        Duration::from_millis(self.collapse_ms)
    }
}

pub trait AudioConfigExt {
    /// Time a fade between silence and full volume takes
    fn fade_duration(&self) -> Duration;
    /// Configured volume clamped to 0.0..=1.0
    fn max_volume(&self) -> f64;
}

impl AudioConfigExt for AudioConfig {
    fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }

    fn max_volume(&self) -> f64 {
        self.volume.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_smooth() {
        let mut config = ScrollConfig::default();
        assert!(config.is_smooth());

        config.smooth_enabled = false;
        assert!(!config.is_smooth());

        config.smooth_enabled = true;
        config.animation_duration_ms = 0;
        assert!(!config.is_smooth());
    }

    #[test]
    fn test_tick_duration_fallback() {
        let config = ScrollConfig {
            animation_fps: 0,
            ..Default::default()
        };
        assert_eq!(config.animation_tick_duration(), Duration::from_millis(16));
    }

    #[test]
    fn test_phase_durations() {
        let refresh = RefreshConfig::default();
        assert_eq!(refresh.release_duration(), Duration::from_millis(200));
        assert_eq!(refresh.fade_out_duration(), Duration::from_millis(300));
        assert_eq!(refresh.revolution_duration(), Duration::from_millis(1500));

        let editor = EditorConfig::default();
        assert_eq!(editor.slide_duration(), Duration::from_millis(280));
        assert_eq!(editor.collapse_duration(), Duration::from_millis(220));
    }
}
