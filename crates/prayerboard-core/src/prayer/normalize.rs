//! Lenient decoding of prayer lists stored as free-form JSON
//!
//! Rows written by older clients may carry missing fields, non-string items
//! or blank entries. Decoding never fails: anything unusable is dropped.

use serde_json::Value;

use super::models::{PrayerData, PrayerSection, PrayerSubsection, PrayerVerse};

fn string_field(value: Option<&Value>) -> String {
    value.and_then(Value::as_str).unwrap_or_default().to_string()
}

fn normalize_items(value: Option<&Value>) -> Vec<String> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Value::as_str)
        .filter(|item| !item.trim().is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize_subsections(value: Option<&Value>) -> Vec<PrayerSubsection> {
    let Some(subsections) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    subsections
        .iter()
        .map(|sub| PrayerSubsection {
            name: string_field(sub.get("name")),
            items: normalize_items(sub.get("items")),
        })
        .filter(|sub| !sub.items.is_empty())
        .collect()
}

/// Decode a `sections` array
pub fn normalize_sections(value: Option<&Value>) -> Vec<PrayerSection> {
    let Some(sections) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    sections
        .iter()
        .map(|section| PrayerSection {
            name: string_field(section.get("name")),
            items: normalize_items(section.get("items")),
            subsections: normalize_subsections(section.get("subsections")),
        })
        .collect()
}

fn normalize_verse(value: Option<&Value>) -> PrayerVerse {
    match value {
        Some(verse) if verse.is_object() => PrayerVerse {
            text: string_field(verse.get("text")),
            reference: string_field(verse.get("reference")),
        },
        _ => PrayerVerse::default(),
    }
}

/// Decode a backend row: `{ title, content: { sections, verse } }`
pub fn prayer_from_record(record: &Value) -> Option<PrayerData> {
    if !record.is_object() {
        return None;
    }
    let content = record.get("content");
    Some(PrayerData {
        title: string_field(record.get("title")),
        sections: normalize_sections(content.and_then(|c| c.get("sections"))),
        verse: normalize_verse(content.and_then(|c| c.get("verse"))),
    })
}

/// Decode a cached snapshot: `{ title, sections, verse }`
pub fn prayer_from_snapshot(value: &Value) -> PrayerData {
    PrayerData {
        title: string_field(value.get("title")),
        sections: normalize_sections(value.get("sections")),
        verse: normalize_verse(value.get("verse")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_and_non_string_items_dropped() {
        let sections = normalize_sections(Some(&json!([
            { "name": "Pastors", "items": ["Health", "  ", 42, null, "Wisdom"] }
        ])));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].items, vec!["Health", "Wisdom"]);
    }

    #[test]
    fn test_subsections_without_items_dropped() {
        let sections = normalize_sections(Some(&json!([
            {
                "name": "Youth",
                "subsections": [
                    { "name": "Retreat", "items": ["Travel"] },
                    { "name": "Empty", "items": ["", " "] },
                    { "items": "not-an-array" }
                ]
            }
        ])));
        assert_eq!(sections[0].subsections.len(), 1);
        assert_eq!(sections[0].subsections[0].name, "Retreat");
        assert!(sections[0].items.is_empty());
    }

    #[test]
    fn test_non_array_sections_is_empty() {
        assert!(normalize_sections(Some(&json!({"name": "x"}))).is_empty());
        assert!(normalize_sections(None).is_empty());
    }

    #[test]
    fn test_record_decoding() {
        let record = json!({
            "id": "1",
            "title": "Prayers (2025.10.03)",
            "content": {
                "sections": [{ "name": 7, "items": ["One"] }],
                "verse": { "text": "Ask", "reference": "John 14:13" }
            },
            "created_at": "2025-10-03T00:00:00Z"
        });
        let data = prayer_from_record(&record).unwrap();
        assert_eq!(data.title, "Prayers (2025.10.03)");
        assert_eq!(data.sections[0].name, "");
        assert_eq!(data.verse.reference, "John 14:13");
        assert!(prayer_from_record(&json!(null)).is_none());
    }

    #[test]
    fn test_snapshot_missing_verse_defaults() {
        let data = prayer_from_snapshot(&json!({ "title": "T", "sections": [] }));
        assert!(data.verse.is_empty());
        assert!(data.sections.is_empty());
    }
}
