use serde::{Deserialize, Serialize};

/// Bible verse attached to a published list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerVerse {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub reference: String,
}

impl PrayerVerse {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.reference.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerSubsection {
    pub name: String,
    #[serde(default)]
    pub items: Vec<String>,
}

/// A named group of prayer items (usually a person or a topic)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerSection {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<PrayerSubsection>,
}

impl PrayerSection {
    /// Whether anything is listed below the section header
    pub fn has_body(&self) -> bool {
        !self.items.is_empty() || !self.subsections.is_empty()
    }
}

/// A published prayer list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerData {
    pub title: String,
    #[serde(default)]
    pub sections: Vec<PrayerSection>,
    #[serde(default)]
    pub verse: PrayerVerse,
}

impl PrayerData {
    /// Total number of items including subsection items
    pub fn item_count(&self) -> usize {
        self.sections
            .iter()
            .map(|s| s.items.len() + s.subsections.iter().map(|ss| ss.items.len()).sum::<usize>())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collections_are_omitted() {
        let section = PrayerSection {
            name: "Missions".to_string(),
            items: vec!["Safety".to_string()],
            subsections: Vec::new(),
        };
        let json = serde_json::to_value(&section).unwrap();
        assert!(json.get("subsections").is_none());
        assert_eq!(json["items"][0], "Safety");
    }

    #[test]
    fn test_item_count_includes_subsections() {
        let data = PrayerData {
            title: "t".to_string(),
            sections: vec![PrayerSection {
                name: "Youth".to_string(),
                items: vec!["a".to_string()],
                subsections: vec![PrayerSubsection {
                    name: "Retreat".to_string(),
                    items: vec!["b".to_string(), "c".to_string()],
                }],
            }],
            verse: PrayerVerse::default(),
        };
        assert_eq!(data.item_count(), 3);
    }
}
