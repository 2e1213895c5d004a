use anyhow::{anyhow, Result};

use prayerboard_core::version::{self, VersionStatus, CURRENT_VERSION};
use prayerboard_core::{AppConfig, PrayerStore};

pub async fn run(config: &AppConfig, store: &dyn PrayerStore) -> Result<()> {
    println!("Installed version: {}", CURRENT_VERSION);
    println!("Platform: {}", config.backend.platform);

    match version::check(store, &config.backend.platform, CURRENT_VERSION).await {
        VersionStatus::UpToDate => {
            println!("Up to date.");
            Ok(())
        }
        VersionStatus::UpdateRequired { minimum, .. } => Err(anyhow!(
            "Update required: the minimum supported version is {}",
            minimum.min_version
        )),
    }
}
