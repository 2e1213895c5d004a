use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub audio: AudioConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (cache snapshot, preferences)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the hosted backend (PostgREST-style `rest/v1` endpoints)
    #[serde(default)]
    pub base_url: Option<String>,
    /// Public API key sent with every request
    #[serde(default)]
    pub api_key: Option<String>,
    /// Access token of an authorized author; editing is disabled without it
    #[serde(default)]
    pub author_token: Option<String>,
    /// Table holding published prayer lists
    #[serde(default = "default_prayer_table")]
    pub prayer_table: String,
    /// Table holding the per-platform minimum version rows
    #[serde(default = "default_config_table")]
    pub config_table: String,
    /// Platform key used for the version gate lookup
    #[serde(default = "default_platform")]
    pub platform: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            author_token: None,
            prayer_table: default_prayer_table(),
            config_table: default_config_table(),
            platform: default_platform(),
            request_timeout_secs: default_timeout(),
        }
    }
}

impl BackendConfig {
    /// Whether the configured credentials allow publishing
    pub fn is_author(&self) -> bool {
        self.author_token
            .as_deref()
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Theme used when no preference has been saved: "dark", "light"
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Font scale used when no preference has been saved (percent)
    #[serde(default = "default_font_scale")]
    pub default_font_scale: u16,
    /// Smooth scrolling configuration
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            theme: default_theme(),
            default_font_scale: default_font_scale(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Easing curve selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump to target at the end
    None,
    Linear,
    /// 1 - (1-t)^3
    #[default]
    Cubic,
    /// 1 - (1-t)^5
    Quintic,
    /// 1 - 2^(-10t)
    EaseOut,
    /// cubic-bezier(0.25, 0.1, 0.25, 1)
    EaseInOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Enable smooth scrolling
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Scroll animation duration in milliseconds
    #[serde(default = "default_scroll_duration")]
    pub animation_duration_ms: u64,
    /// Easing used for scroll animations
    #[serde(default)]
    pub easing: EasingType,
    /// Lines moved per scroll step when smooth scrolling is off
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    /// Frame rate while anything is animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_scroll_duration(),
            easing: EasingType::default(),
            scroll_lines: default_scroll_lines(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Pull-to-refresh tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Resisted pull distance that triggers a refresh on release
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Square-root damping factor
    #[serde(default = "default_resistance_factor")]
    pub resistance_factor: f64,
    /// Duration of the snap-back after a sub-threshold release
    #[serde(default = "default_release_ms")]
    pub release_ms: u64,
    /// Indicator fade-out after the refresh settles
    #[serde(default = "default_fade_out_ms")]
    pub fade_out_ms: u64,
    /// Pull distance collapse after the fade-out
    #[serde(default = "default_collapse_ms")]
    pub collapse_ms: u64,
    /// Duration of one spinner revolution
    #[serde(default = "default_revolution_ms")]
    pub revolution_ms: u64,
    /// Drag translation produced by moving the mouse one terminal row
    #[serde(default = "default_drag_units_per_row")]
    pub drag_units_per_row: f64,
    /// Pull distance rendered as one terminal row
    #[serde(default = "default_units_per_row")]
    pub units_per_row: f64,
    /// Trigger a refresh as soon as the main screen opens
    #[serde(default = "default_true")]
    pub refresh_on_start: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            resistance_factor: default_resistance_factor(),
            release_ms: default_release_ms(),
            fade_out_ms: default_fade_out_ms(),
            collapse_ms: default_collapse_ms(),
            revolution_ms: default_revolution_ms(),
            drag_units_per_row: default_drag_units_per_row(),
            units_per_row: default_units_per_row(),
            refresh_on_start: default_true(),
        }
    }
}

/// Editor row deletion and reflow tuning (terminal rows)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Horizontal travel of the slide-out phase
    #[serde(default = "default_slide_distance")]
    pub slide_distance: f64,
    /// Slide and fade phase duration
    #[serde(default = "default_slide_ms")]
    pub slide_ms: u64,
    /// Height and margin collapse phase duration
    #[serde(default = "default_row_collapse_ms")]
    pub collapse_ms: u64,
    /// Distance from the content end considered "near bottom"
    #[serde(default = "default_near_bottom_rows")]
    pub near_bottom_rows: u16,
    /// Blank rows below each section
    #[serde(default = "default_one")]
    pub section_margin_rows: u16,
    /// Blank rows above each subsection
    #[serde(default = "default_one")]
    pub subsection_margin_rows: u16,
    /// Blank items created with a new section
    #[serde(default = "default_new_section_items")]
    pub new_section_items: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            slide_distance: default_slide_distance(),
            slide_ms: default_slide_ms(),
            collapse_ms: default_row_collapse_ms(),
            near_bottom_rows: default_near_bottom_rows(),
            section_margin_rows: default_one(),
            subsection_margin_rows: default_one(),
            new_section_items: default_new_section_items(),
        }
    }
}

/// Looped background music
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Open an audio output at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Start playing when no preference has been saved
    #[serde(default = "default_true")]
    pub autoplay: bool,
    /// WAV or MP3 file to loop; a built-in ambient tone is used when unset
    #[serde(default)]
    pub track: Option<PathBuf>,
    /// Playback volume, 0.0 to 1.0
    #[serde(default = "default_volume")]
    pub volume: f64,
    /// Fade in/out duration in milliseconds
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,
    /// Fade the music out while the editor is open
    #[serde(default = "default_true")]
    pub pause_in_editor: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            autoplay: default_true(),
            track: None,
            volume: default_volume(),
            fade_ms: default_fade_ms(),
            pause_in_editor: default_true(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("prayerboard")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_prayer_table() -> String {
    "prayers".to_string()
}

fn default_config_table() -> String {
    "app_config".to_string()
}

fn default_platform() -> String {
    "terminal".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_tick_rate() -> u64 {
    100
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_font_scale() -> u16 {
    100
}

fn default_true() -> bool {
    true
}

fn default_one() -> u16 {
    1
}

fn default_scroll_duration() -> u64 {
    150
}

fn default_scroll_lines() -> u16 {
    1
}

fn default_animation_fps() -> u32 {
    60
}

fn default_threshold() -> f64 {
    40.0
}

fn default_resistance_factor() -> f64 {
    0.16
}

fn default_release_ms() -> u64 {
    200
}

fn default_fade_out_ms() -> u64 {
    300
}

fn default_collapse_ms() -> u64 {
    200
}

fn default_revolution_ms() -> u64 {
    1500
}

fn default_drag_units_per_row() -> f64 {
    16.0
}

fn default_units_per_row() -> f64 {
    8.0
}

fn default_slide_distance() -> f64 {
    400.0
}

fn default_slide_ms() -> u64 {
    280
}

fn default_row_collapse_ms() -> u64 {
    220
}

fn default_near_bottom_rows() -> u16 {
    12
}

fn default_new_section_items() -> usize {
    5
}

fn default_volume() -> f64 {
    1.0
}

fn default_fade_ms() -> u64 {
    1000
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Always uses ~/.config/prayerboard/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("prayerboard")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Last-known-good prayer list snapshot
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir().join("cached_prayer.json")
    }

    /// Theme, font scale and music persistence
    pub fn preferences_path(&self) -> PathBuf {
        self.data_dir().join("preferences.toml")
    }

    /// Configured music track (with tilde expansion)
    pub fn audio_track_path(&self) -> Option<PathBuf> {
        self.audio.track.as_deref().map(expand_tilde)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_gesture_tuning() {
        let config = AppConfig::default();
        assert_eq!(config.refresh.threshold, 40.0);
        assert_eq!(config.refresh.resistance_factor, 0.16);
        assert_eq!(config.editor.slide_ms, 280);
        assert_eq!(config.editor.collapse_ms, 220);
        assert_eq!(config.backend.request_timeout_secs, 10);
        assert!(!config.backend.is_author());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [backend]
            base_url = "https://example.supabase.co"
            author_token = "secret"

            [refresh]
            threshold = 60.0

            [ui.scroll]
            easing = "ease_in_out"
            "#,
        )
        .unwrap();

        assert_eq!(config.backend.base_url.as_deref(), Some("https://example.supabase.co"));
        assert!(config.backend.is_author());
        assert_eq!(config.backend.prayer_table, "prayers");
        assert_eq!(config.refresh.threshold, 60.0);
        assert_eq!(config.refresh.fade_out_ms, 300);
        assert_eq!(config.ui.scroll.easing, EasingType::EaseInOut);
        assert_eq!(config.editor.new_section_items, 5);
        assert!(config.audio.autoplay);
        assert_eq!(config.audio.fade_ms, 1000);
        assert_eq!(config.audio_track_path(), None);
    }

    #[test]
    fn test_audio_section() {
        let config = AppConfig::from_toml(
            r#"
            [audio]
            autoplay = false
            track = "/music/hymn.wav"
            volume = 0.4
            "#,
        )
        .unwrap();

        assert!(config.audio.enabled);
        assert!(!config.audio.autoplay);
        assert_eq!(config.audio.volume, 0.4);
        assert_eq!(config.audio_track_path(), Some(PathBuf::from("/music/hymn.wav")));
    }

    #[test]
    fn test_blank_author_token_is_not_author() {
        let backend = BackendConfig {
            author_token: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(!backend.is_author());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("refresh = 3").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }
}
