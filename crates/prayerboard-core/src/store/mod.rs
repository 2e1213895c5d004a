mod cache;
mod memory;
mod rest;

pub use cache::SnapshotCache;
pub use memory::{sample_prayer, MemoryStore};
pub use rest::RestStore;

use async_trait::async_trait;

use crate::prayer::PrayerData;
use crate::version::VersionRequirement;
use crate::Result;

/// Hosted backend holding published prayer lists
#[async_trait]
pub trait PrayerStore: Send + Sync {
    /// Most recently published list, if any
    async fn fetch_latest(&self) -> Result<Option<PrayerData>>;

    /// Publish a new list
    async fn upload(&self, data: &PrayerData) -> Result<()>;

    /// Minimum supported version for a platform
    async fn min_version(&self, platform: &str) -> Result<Option<VersionRequirement>>;
}
