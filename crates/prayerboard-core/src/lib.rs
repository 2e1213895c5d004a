pub mod config;
pub mod error;
pub mod prayer;
pub mod prefs;
pub mod store;
pub mod version;

pub use config::{AppConfig, AudioConfig, EasingType, EditorConfig, RefreshConfig, ScrollConfig};
pub use error::{Error, Result};
pub use store::{MemoryStore, PrayerStore, RestStore, SnapshotCache};
