//! Locally persisted theme, font scale and music state

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    /// Parse a configured theme name, anything unknown is dark
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "light" => ThemeMode::Light,
            _ => ThemeMode::Dark,
        }
    }
}

/// Text size in percent of the base size
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontScale(u16);

impl FontScale {
    pub const MIN: u16 = 80;
    pub const MAX: u16 = 200;
    pub const STEP: u16 = 10;
    pub const DEFAULT: u16 = 100;

    pub fn new(percent: u16) -> Self {
        Self(percent.clamp(Self::MIN, Self::MAX))
    }

    pub fn percent(self) -> u16 {
        self.0
    }

    pub fn can_increase(self) -> bool {
        self.0 < Self::MAX
    }

    pub fn can_decrease(self) -> bool {
        self.0 > Self::MIN
    }

    pub fn increased(self) -> Self {
        Self::new(self.0.saturating_add(Self::STEP))
    }

    pub fn decreased(self) -> Self {
        Self::new(self.0.saturating_sub(Self::STEP))
    }

    pub fn factor(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Default for FontScale {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Saved preferences; `None` falls back to the configured default
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Option<ThemeMode>,
    #[serde(default)]
    pub font_scale: Option<FontScale>,
    /// Whether background music was left playing
    #[serde(default)]
    pub music: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load saved preferences, falling back to defaults on any error
    pub fn load(&self) -> Preferences {
        if !self.path.exists() {
            return Preferences::default();
        }
        let parsed = std::fs::read_to_string(&self.path)
            .map_err(|e| e.to_string())
            .and_then(|content| toml::from_str(&content).map_err(|e| e.to_string()));
        match parsed {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load preferences");
                Preferences::default()
            }
        }
    }

    pub fn save(&self, prefs: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(prefs).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
