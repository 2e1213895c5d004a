use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::PrayerStore;
use crate::prayer::{PrayerData, PrayerSection, PrayerVerse};
use crate::version::VersionRequirement;
use crate::{Error, Result};

/// In-process store used when no backend is configured
#[derive(Default)]
pub struct MemoryStore {
    published: Mutex<Vec<PrayerData>>,
    requirement: Mutex<Option<VersionRequirement>>,
    fail_fetches: AtomicBool,
    fetches: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a demo list
    pub fn with_sample() -> Self {
        let store = Self::new();
        store.push(sample_prayer());
        store
    }

    pub fn push(&self, data: PrayerData) {
        if let Ok(mut published) = self.published.lock() {
            published.push(data);
        }
    }

    pub fn set_requirement(&self, requirement: Option<VersionRequirement>) {
        if let Ok(mut slot) = self.requirement.lock() {
            *slot = requirement;
        }
    }

    /// Make subsequent fetches fail
    pub fn set_failing(&self, failing: bool) {
        self.fail_fetches.store(failing, Ordering::SeqCst);
    }

    /// Number of fetch calls made so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn published(&self) -> Vec<PrayerData> {
        self.published
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PrayerStore for MemoryStore {
    async fn fetch_latest(&self) -> Result<Option<PrayerData>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(Error::Other("memory store is offline".to_string()));
        }
        let published = self
            .published
            .lock()
            .map_err(|_| Error::Other("memory store poisoned".to_string()))?;
        Ok(published.last().cloned())
    }

    async fn upload(&self, data: &PrayerData) -> Result<()> {
        self.push(data.clone());
        Ok(())
    }

    async fn min_version(&self, _platform: &str) -> Result<Option<VersionRequirement>> {
        let requirement = self
            .requirement
            .lock()
            .map_err(|_| Error::Other("memory store poisoned".to_string()))?;
        Ok(requirement.clone())
    }
}

/// Demo list shown when running without a backend
pub fn sample_prayer() -> PrayerData {
    let section = |name: &str, items: &[&str]| PrayerSection {
        name: name.to_string(),
        items: items.iter().map(|i| i.to_string()).collect(),
        subsections: Vec::new(),
    };

    PrayerData {
        title: "Church prayer list".to_string(),
        sections: vec![
            section(
                "Pastoral staff",
                &[
                    "Health and wisdom for the senior pastor",
                    "Ministry and growth of the associate pastors",
                    "Devotion and passion of the ministers",
                ],
            ),
            section(
                "Revival",
                &[
                    "New members settling in",
                    "Spiritual growth of the congregation",
                    "Hunger for the Word",
                    "A praying church",
                ],
            ),
            section(
                "Missions",
                &[
                    "Health and safety of missionaries abroad",
                    "Fruit of the local ministries",
                    "Church planting in the mission field",
                    "Provision for financial needs",
                ],
            ),
        ],
        verse: PrayerVerse {
            text: "And I will do whatever you ask in my name, so that the Father may be glorified in the Son.".to_string(),
            reference: "John 14:13".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_latest_is_last_published() {
        let store = MemoryStore::with_sample();
        let mut next = sample_prayer();
        next.title = "Next week".to_string();
        store.upload(&next).await.unwrap();

        let latest = store.fetch_latest().await.unwrap().unwrap();
        assert_eq!(latest.title, "Next week");
        assert_eq!(store.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_failing_store_counts_attempts() {
        let store = MemoryStore::new();
        store.set_failing(true);
        assert!(store.fetch_latest().await.is_err());
        assert_eq!(store.fetch_count(), 1);

        store.set_failing(false);
        assert!(store.fetch_latest().await.unwrap().is_none());
    }
}
