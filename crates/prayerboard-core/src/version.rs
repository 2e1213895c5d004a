//! Remote minimum-version gate

use serde::{Deserialize, Serialize};

use crate::store::PrayerStore;

/// Version compiled into this build
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Row of the remote `app_config` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRequirement {
    pub min_version: String,
    pub min_version_code: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionStatus {
    UpToDate,
    UpdateRequired {
        current: String,
        minimum: VersionRequirement,
    },
}

impl VersionStatus {
    pub fn is_update_required(&self) -> bool {
        matches!(self, VersionStatus::UpdateRequired { .. })
    }
}

/// Monotonic integer code for a `major.minor.patch` version
pub fn version_code(version: &str) -> Option<u32> {
    let core = version.split(|c: char| c == '-' || c == '+').next()?;
    let mut parts = core.split('.').map(|p| p.parse::<u32>());
    let major = parts.next()?.ok()?;
    let minor = parts.next().unwrap_or(Ok(0)).ok()?;
    let patch = parts.next().unwrap_or(Ok(0)).ok()?;
    if minor >= 100 || patch >= 100 {
        return None;
    }
    Some(major * 10_000 + minor * 100 + patch)
}

/// Compare the running version against the remote requirement
pub fn evaluate(current: &str, requirement: Option<&VersionRequirement>) -> VersionStatus {
    let Some(requirement) = requirement else {
        return VersionStatus::UpToDate;
    };
    let Some(current_code) = version_code(current) else {
        tracing::warn!(version = current, "Unparseable version, skipping gate");
        return VersionStatus::UpToDate;
    };

    if current_code < requirement.min_version_code {
        VersionStatus::UpdateRequired {
            current: current.to_string(),
            minimum: requirement.clone(),
        }
    } else {
        VersionStatus::UpToDate
    }
}

/// Look up the requirement and evaluate it; lookup failures keep the app usable
pub async fn check(store: &dyn PrayerStore, platform: &str, current: &str) -> VersionStatus {
    match store.min_version(platform).await {
        Ok(requirement) => evaluate(current, requirement.as_ref()),
        Err(e) => {
            tracing::warn!(error = %e, "Version check failed, continuing");
            VersionStatus::UpToDate
        }
    }
}
