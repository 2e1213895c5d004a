use anyhow::Result;

use prayerboard_core::prefs::FontScale;
use prayerboard_core::{AppConfig, PrayerStore, SnapshotCache};
use prayerboard_tui::widgets::prayer_view;

pub async fn run(config: &AppConfig, store: &dyn PrayerStore, offline: bool, width: u16) -> Result<()> {
    let cache = SnapshotCache::new(config.snapshot_path());

    let prayer = if offline {
        cache.load()
    } else {
        match store.fetch_latest().await {
            Ok(Some(data)) => {
                if let Err(e) = cache.save(&data) {
                    tracing::warn!(error = %e, "Failed to update snapshot cache");
                }
                Some(data)
            }
            Ok(None) => None,
            Err(e) => {
                eprintln!("Could not reach the backend ({}), showing the cached list.\n", e);
                cache.load()
            }
        }
    };

    let Some(prayer) = prayer else {
        println!("No prayer list has been published yet.");
        return Ok(());
    };

    for line in prayer_view::layout(Some(&prayer), width, FontScale::default()) {
        println!("{}", line.text);
    }

    Ok(())
}
