//! What the background music should sound like at a given instant

use std::time::Instant;

use prayerboard_core::AudioConfig;

use crate::motion::{AudioConfigExt, EasingType, Tween};

/// Volume and run state the output follows for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MusicOutput {
    pub volume: f32,
    /// False once a fade-out has reached silence; the output pauses
    pub running: bool,
}

/// Looped music with linear fades between silence and the configured volume.
///
/// `playing` is the user's choice and is persisted. `suspended` holds the
/// music silent while the editor is open without changing that choice.
#[derive(Debug, Clone)]
pub struct BackgroundMusic {
    config: AudioConfig,
    playing: bool,
    suspended: bool,
    volume: f64,
    fade: Option<Tween>,
}

impl BackgroundMusic {
    /// Starts silent; a wanted fade-in begins on the first tick
    pub fn new(config: AudioConfig, playing: bool) -> Self {
        Self {
            config,
            playing,
            suspended: false,
            volume: 0.0,
            fade: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    fn audible(&self) -> bool {
        self.playing && !self.suspended
    }

    fn target_volume(&self) -> f64 {
        if self.audible() {
            self.config.max_volume()
        } else {
            0.0
        }
    }

    pub fn play(&mut self, now: Instant) {
        self.playing = true;
        self.retarget(now);
    }

    pub fn pause(&mut self, now: Instant) {
        self.playing = false;
        self.retarget(now);
    }

    /// Flip play/pause, returning whether music is now wanted
    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.playing {
            self.pause(now);
        } else {
            self.play(now);
        }
        self.playing
    }

    /// Fade out for the editor; a no-op when configured to keep playing
    pub fn suspend(&mut self, now: Instant) {
        if !self.config.pause_in_editor || self.suspended {
            return;
        }
        self.suspended = true;
        self.retarget(now);
    }

    /// Undo [`suspend`](Self::suspend), fading back in if music is wanted
    pub fn resume(&mut self, now: Instant) {
        if !self.suspended {
            return;
        }
        self.suspended = false;
        self.retarget(now);
    }

    /// Replace any running fade with one from the current volume to the target
    fn retarget(&mut self, now: Instant) {
        self.advance(now);
        self.fade = None;
        self.start_fade(now);
    }

    fn start_fade(&mut self, now: Instant) {
        let target = self.target_volume();
        let distance = (target - self.volume).abs();
        if distance <= f64::EPSILON {
            self.volume = target;
            return;
        }
        // A partial fade takes its share of the full fade time
        let full = self.config.max_volume().max(f64::EPSILON);
        let duration = self.config.fade_duration().mul_f64((distance / full).min(1.0));
        self.fade = Some(Tween::new(self.volume, target, now, duration, EasingType::Linear));
    }

    fn advance(&mut self, now: Instant) {
        if let Some(fade) = self.fade {
            self.volume = fade.value_at(now);
            if fade.is_complete_at(now) {
                self.fade = None;
            }
        }
    }

    /// Advance the running fade, or start the one a new state calls for
    pub fn tick(&mut self, now: Instant) {
        self.advance(now);
        if self.fade.is_none() {
            self.start_fade(now);
            self.advance(now);
        }
    }

    /// Whether frames must keep coming to step the volume
    pub fn needs_tick(&self) -> bool {
        self.fade.is_some() || (self.target_volume() - self.volume).abs() > f64::EPSILON
    }

    pub fn output(&self) -> MusicOutput {
        MusicOutput {
            volume: self.volume as f32,
            running: self.audible() || self.fade.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn music(playing: bool) -> BackgroundMusic {
        BackgroundMusic::new(AudioConfig::default(), playing)
    }

    #[test]
    fn test_starts_with_fade_in() {
        let t0 = Instant::now();
        let mut music = music(true);
        assert_eq!(music.volume(), 0.0);
        assert!(music.needs_tick());

        music.tick(t0);
        assert!(music.output().running);
        music.tick(t0 + ms(500));
        assert!((music.volume() - 0.5).abs() < 1e-9);
        music.tick(t0 + ms(1_000));
        assert_eq!(music.volume(), 1.0);
        assert!(!music.needs_tick());
    }

    #[test]
    fn test_pause_fades_out_then_stops() {
        let t0 = Instant::now();
        let mut music = music(true);
        music.tick(t0);
        music.tick(t0 + ms(1_000));

        assert!(!music.toggle(t0 + ms(1_000)));
        music.tick(t0 + ms(1_500));
        let output = music.output();
        assert!(output.running);
        assert!((output.volume - 0.5).abs() < 1e-6);

        music.tick(t0 + ms(2_000));
        assert_eq!(
            music.output(),
            MusicOutput {
                volume: 0.0,
                running: false
            }
        );
        assert!(!music.needs_tick());
    }

    #[test]
    fn test_paused_music_stays_silent() {
        let t0 = Instant::now();
        let mut music = music(false);
        assert!(!music.needs_tick());
        music.tick(t0);
        assert!(!music.output().running);
    }

    #[test]
    fn test_pause_mid_fade_in_is_shorter() {
        let t0 = Instant::now();
        let mut music = music(true);
        music.tick(t0);
        music.pause(t0 + ms(400));
        assert!((music.volume() - 0.4).abs() < 1e-9);

        music.tick(t0 + ms(800));
        assert_eq!(music.volume(), 0.0);
        assert!(!music.output().running);
    }

    #[test]
    fn test_editor_suspend_keeps_choice() {
        let t0 = Instant::now();
        let mut music = music(true);
        music.tick(t0);
        music.tick(t0 + ms(1_000));

        music.suspend(t0 + ms(1_000));
        music.tick(t0 + ms(2_000));
        assert!(music.is_playing());
        assert!(!music.output().running);

        music.resume(t0 + ms(2_000));
        music.tick(t0 + ms(3_000));
        assert_eq!(music.volume(), 1.0);
    }

    #[test]
    fn test_suspend_can_be_disabled() {
        let t0 = Instant::now();
        let config = AudioConfig {
            pause_in_editor: false,
            ..Default::default()
        };
        let mut music = BackgroundMusic::new(config, true);
        music.tick(t0);
        music.suspend(t0);
        assert!(!music.is_suspended());
        music.tick(t0 + ms(1_000));
        assert_eq!(music.volume(), 1.0);
    }

    #[test]
    fn test_volume_is_clamped() {
        let t0 = Instant::now();
        let config = AudioConfig {
            volume: 3.0,
            fade_ms: 0,
            ..Default::default()
        };
        let mut music = BackgroundMusic::new(config, true);
        music.tick(t0);
        assert_eq!(music.volume(), 1.0);
    }
}
