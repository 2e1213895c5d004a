use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::blank::{requires_confirmation, Blank};
use super::models::{PrayerData, PrayerSection, PrayerSubsection, PrayerVerse};
use crate::{Error, Result};

/// Stable synthetic row identity, never derived from content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(Uuid);

impl RowId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableItem {
    pub id: RowId,
    pub content: String,
    pub is_new: bool,
}

impl EditableItem {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: RowId::new(),
            content: content.into(),
            is_new: true,
        }
    }

    fn published(content: &str) -> Self {
        Self {
            is_new: false,
            ..Self::new(content)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableSubsection {
    pub id: RowId,
    pub name: String,
    pub items: Vec<EditableItem>,
    pub is_new: bool,
}

impl EditableSubsection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RowId::new(),
            name: name.into(),
            items: Vec::new(),
            is_new: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableSection {
    pub id: RowId,
    pub name: String,
    pub items: Vec<EditableItem>,
    pub subsections: Vec<EditableSubsection>,
    pub is_new: bool,
}

impl EditableSection {
    /// New section pre-filled with `blank_items` empty items
    pub fn new(name: impl Into<String>, blank_items: usize) -> Self {
        Self {
            id: RowId::new(),
            name: name.into(),
            items: (0..blank_items).map(|_| EditableItem::new("")).collect(),
            subsections: Vec::new(),
            is_new: true,
        }
    }

    fn subsection(&self, id: RowId) -> Option<&EditableSubsection> {
        self.subsections.iter().find(|s| s.id == id)
    }

    fn subsection_mut(&mut self, id: RowId) -> Option<&mut EditableSubsection> {
        self.subsections.iter_mut().find(|s| s.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    Section,
    Subsection,
    Item,
}

/// Address of a removable row inside the nested document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowPath {
    Section(RowId),
    SectionItem {
        section: RowId,
        item: RowId,
    },
    Subsection {
        section: RowId,
        subsection: RowId,
    },
    SubsectionItem {
        section: RowId,
        subsection: RowId,
        item: RowId,
    },
}

impl RowPath {
    /// Identity of the addressed row itself
    pub fn id(&self) -> RowId {
        match *self {
            RowPath::Section(id) => id,
            RowPath::SectionItem { item, .. } => item,
            RowPath::Subsection { subsection, .. } => subsection,
            RowPath::SubsectionItem { item, .. } => item,
        }
    }

    pub fn kind(&self) -> RowKind {
        match self {
            RowPath::Section(_) => RowKind::Section,
            RowPath::Subsection { .. } => RowKind::Subsection,
            RowPath::SectionItem { .. } | RowPath::SubsectionItem { .. } => RowKind::Item,
        }
    }

    /// Enclosing row, `None` for sections
    pub fn parent(&self) -> Option<RowPath> {
        match *self {
            RowPath::Section(_) => None,
            RowPath::SectionItem { section, .. } | RowPath::Subsection { section, .. } => {
                Some(RowPath::Section(section))
            }
            RowPath::SubsectionItem {
                section,
                subsection,
                ..
            } => Some(RowPath::Subsection {
                section,
                subsection,
            }),
        }
    }

    /// Nesting depth (sections are 0)
    pub fn depth(&self) -> usize {
        match self {
            RowPath::Section(_) => 0,
            RowPath::SectionItem { .. } | RowPath::Subsection { .. } => 1,
            RowPath::SubsectionItem { .. } => 2,
        }
    }
}

/// The document being edited before it is published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditablePrayer {
    pub date: NaiveDate,
    pub sections: Vec<EditableSection>,
    pub verse: PrayerVerse,
}

impl EditablePrayer {
    /// Fresh document with a single blank section
    pub fn new_blank(date: NaiveDate, items_per_section: usize) -> Self {
        Self {
            date,
            sections: vec![EditableSection::new("", items_per_section)],
            verse: PrayerVerse::default(),
        }
    }

    /// Convert a published list into an editable document with fresh row ids
    pub fn from_published(data: &PrayerData, date: NaiveDate) -> Self {
        let sections = data
            .sections
            .iter()
            .map(|section| EditableSection {
                id: RowId::new(),
                name: section.name.clone(),
                items: section.items.iter().map(|i| EditableItem::published(i)).collect(),
                subsections: section
                    .subsections
                    .iter()
                    .map(|sub| EditableSubsection {
                        id: RowId::new(),
                        name: sub.name.clone(),
                        items: sub.items.iter().map(|i| EditableItem::published(i)).collect(),
                        is_new: false,
                    })
                    .collect(),
                is_new: false,
            })
            .collect();

        Self {
            date,
            sections,
            verse: data.verse.clone(),
        }
    }

    pub fn section(&self, id: RowId) -> Option<&EditableSection> {
        self.sections.iter().find(|s| s.id == id)
    }

    fn section_mut(&mut self, id: RowId) -> Option<&mut EditableSection> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    /// Every row in display order: section, its items, then its subsections
    pub fn rows(&self) -> Vec<RowPath> {
        let mut rows = Vec::new();
        for section in &self.sections {
            rows.push(RowPath::Section(section.id));
            for item in &section.items {
                rows.push(RowPath::SectionItem {
                    section: section.id,
                    item: item.id,
                });
            }
            for sub in &section.subsections {
                rows.push(RowPath::Subsection {
                    section: section.id,
                    subsection: sub.id,
                });
                for item in &sub.items {
                    rows.push(RowPath::SubsectionItem {
                        section: section.id,
                        subsection: sub.id,
                        item: item.id,
                    });
                }
            }
        }
        rows
    }

    pub fn add_section(&mut self, blank_items: usize) -> RowPath {
        let section = EditableSection::new("", blank_items);
        let id = section.id;
        self.sections.push(section);
        RowPath::Section(id)
    }

    pub fn add_item(&mut self, section: RowId) -> Option<RowPath> {
        let target = self.section_mut(section)?;
        let item = EditableItem::new("");
        let id = item.id;
        target.items.push(item);
        Some(RowPath::SectionItem { section, item: id })
    }

    pub fn add_subsection(&mut self, section: RowId) -> Option<RowPath> {
        let target = self.section_mut(section)?;
        let sub = EditableSubsection::new("");
        let id = sub.id;
        target.subsections.push(sub);
        Some(RowPath::Subsection {
            section,
            subsection: id,
        })
    }

    pub fn add_subsection_item(&mut self, section: RowId, subsection: RowId) -> Option<RowPath> {
        let target = self.section_mut(section)?.subsection_mut(subsection)?;
        let item = EditableItem::new("");
        let id = item.id;
        target.items.push(item);
        Some(RowPath::SubsectionItem {
            section,
            subsection,
            item: id,
        })
    }

    pub fn contains(&self, path: &RowPath) -> bool {
        self.text(path).is_some()
    }

    /// Editable text of a row: a name for sections and subsections
    pub fn text(&self, path: &RowPath) -> Option<&str> {
        match *path {
            RowPath::Section(id) => self.section(id).map(|s| s.name.as_str()),
            RowPath::SectionItem { section, item } => self
                .section(section)?
                .items
                .iter()
                .find(|i| i.id == item)
                .map(|i| i.content.as_str()),
            RowPath::Subsection {
                section,
                subsection,
            } => self
                .section(section)?
                .subsection(subsection)
                .map(|s| s.name.as_str()),
            RowPath::SubsectionItem {
                section,
                subsection,
                item,
            } => self
                .section(section)?
                .subsection(subsection)?
                .items
                .iter()
                .find(|i| i.id == item)
                .map(|i| i.content.as_str()),
        }
    }

    pub fn set_text(&mut self, path: &RowPath, text: String) -> bool {
        let slot = match *path {
            RowPath::Section(id) => self.section_mut(id).map(|s| &mut s.name),
            RowPath::SectionItem { section, item } => self
                .section_mut(section)
                .and_then(|s| s.items.iter_mut().find(|i| i.id == item))
                .map(|i| &mut i.content),
            RowPath::Subsection {
                section,
                subsection,
            } => self
                .section_mut(section)
                .and_then(|s| s.subsection_mut(subsection))
                .map(|s| &mut s.name),
            RowPath::SubsectionItem {
                section,
                subsection,
                item,
            } => self
                .section_mut(section)
                .and_then(|s| s.subsection_mut(subsection))
                .and_then(|s| s.items.iter_mut().find(|i| i.id == item))
                .map(|i| &mut i.content),
        };
        match slot {
            Some(slot) => {
                *slot = text;
                true
            }
            None => false,
        }
    }

    /// Remove a row from the model; returns false when it no longer exists
    pub fn remove(&mut self, path: &RowPath) -> bool {
        match *path {
            RowPath::Section(id) => {
                let before = self.sections.len();
                self.sections.retain(|s| s.id != id);
                self.sections.len() != before
            }
            RowPath::SectionItem { section, item } => match self.section_mut(section) {
                Some(s) => {
                    let before = s.items.len();
                    s.items.retain(|i| i.id != item);
                    s.items.len() != before
                }
                None => false,
            },
            RowPath::Subsection {
                section,
                subsection,
            } => match self.section_mut(section) {
                Some(s) => {
                    let before = s.subsections.len();
                    s.subsections.retain(|ss| ss.id != subsection);
                    s.subsections.len() != before
                }
                None => false,
            },
            RowPath::SubsectionItem {
                section,
                subsection,
                item,
            } => match self
                .section_mut(section)
                .and_then(|s| s.subsection_mut(subsection))
            {
                Some(sub) => {
                    let before = sub.items.len();
                    sub.items.retain(|i| i.id != item);
                    sub.items.len() != before
                }
                None => false,
            },
        }
    }

    /// Sections need a sibling to remain; subsection items keep at least one
    pub fn can_remove(&self, path: &RowPath) -> bool {
        if !self.contains(path) {
            return false;
        }
        match *path {
            RowPath::Section(_) => self.sections.len() > 1,
            RowPath::SectionItem { .. } | RowPath::Subsection { .. } => true,
            RowPath::SubsectionItem {
                section,
                subsection,
                ..
            } => self
                .section(section)
                .and_then(|s| s.subsection(subsection))
                .map(|s| s.items.len() > 1)
                .unwrap_or(false),
        }
    }

    /// Whether deleting this row must be confirmed first
    pub fn requires_confirmation(&self, path: &RowPath) -> bool {
        match *path {
            RowPath::Section(id) => self.section(id).map(requires_confirmation).unwrap_or(false),
            RowPath::Subsection {
                section,
                subsection,
            } => self
                .section(section)
                .and_then(|s| s.subsection(subsection))
                .map(requires_confirmation)
                .unwrap_or(false),
            RowPath::SectionItem { .. } | RowPath::SubsectionItem { .. } => self
                .text(path)
                .map(|t| !t.trim().is_empty())
                .unwrap_or(false),
        }
    }

    pub fn shift_date(&mut self, days: i64) {
        if let Some(date) = self.date.checked_add_signed(Duration::days(days)) {
            self.date = date;
        }
    }

    /// Title derived from the list date, e.g. "Prayers (2025.10.03)"
    pub fn title(&self) -> String {
        format!("Prayers ({})", self.date.format("%Y.%m.%d"))
    }

    /// Check the document can be published
    pub fn validate(&self) -> Result<()> {
        if self.sections.is_empty() {
            return Err(Error::Validation(
                "Add at least one section before saving".to_string(),
            ));
        }

        for section in &self.sections {
            if section.name.trim().is_empty() {
                return Err(Error::Validation("Every section needs a name".to_string()));
            }

            let has_item = section.items.iter().any(|i| !i.is_blank())
                || section
                    .subsections
                    .iter()
                    .flat_map(|s| s.items.iter())
                    .any(|i| !i.is_blank());
            if !has_item {
                return Err(Error::Validation(format!(
                    "\"{}\" needs at least one prayer item",
                    section.name.trim()
                )));
            }
        }

        Ok(())
    }

    /// Published form: blank items and empty subsections are dropped
    pub fn to_publishable(&self) -> PrayerData {
        let filled = |items: &[EditableItem]| -> Vec<String> {
            items
                .iter()
                .filter(|i| !i.is_blank())
                .map(|i| i.content.trim().to_string())
                .collect()
        };

        PrayerData {
            title: self.title(),
            sections: self
                .sections
                .iter()
                .map(|section| PrayerSection {
                    name: section.name.trim().to_string(),
                    items: filled(&section.items),
                    subsections: section
                        .subsections
                        .iter()
                        .map(|sub| PrayerSubsection {
                            name: sub.name.trim().to_string(),
                            items: filled(&sub.items),
                        })
                        .filter(|sub| !sub.items.is_empty())
                        .collect(),
                })
                .collect(),
            verse: self.verse.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 3).unwrap()
    }

    fn sample() -> EditablePrayer {
        let data = PrayerData {
            title: "old".to_string(),
            sections: vec![
                PrayerSection {
                    name: "Pastors".to_string(),
                    items: vec!["Health".to_string()],
                    subsections: vec![PrayerSubsection {
                        name: "Family".to_string(),
                        items: vec!["Rest".to_string(), "Joy".to_string()],
                    }],
                },
                PrayerSection {
                    name: "Missions".to_string(),
                    items: vec!["Safety".to_string()],
                    subsections: Vec::new(),
                },
            ],
            verse: PrayerVerse::default(),
        };
        EditablePrayer::from_published(&data, date())
    }

    #[test]
    fn test_from_published_assigns_distinct_ids() {
        let doc = sample();
        let rows = doc.rows();
        assert_eq!(rows.len(), 7);
        let mut ids: Vec<RowId> = rows.iter().map(RowPath::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 7);
        assert!(!doc.sections[0].is_new);
    }

    #[test]
    fn test_remove_keeps_other_row_ids() {
        let mut doc = sample();
        let rows = doc.rows();
        let target = rows[1];
        let survivors: Vec<RowId> = rows.iter().filter(|r| **r != target).map(RowPath::id).collect();

        assert!(doc.remove(&target));
        assert!(!doc.remove(&target));
        let after: Vec<RowId> = doc.rows().iter().map(RowPath::id).collect();
        assert_eq!(after, survivors);
    }

    #[test]
    fn test_can_remove_rules() {
        let mut doc = sample();
        let section = RowPath::Section(doc.sections[0].id);
        assert!(doc.can_remove(&section));

        let sub = &doc.sections[0].subsections[0];
        let sub_item = RowPath::SubsectionItem {
            section: doc.sections[0].id,
            subsection: sub.id,
            item: sub.items[0].id,
        };
        assert!(doc.can_remove(&sub_item));
        assert!(doc.remove(&sub_item));
        let last = RowPath::SubsectionItem {
            section: doc.sections[0].id,
            subsection: doc.sections[0].subsections[0].id,
            item: doc.sections[0].subsections[0].items[0].id,
        };
        assert!(!doc.can_remove(&last));

        let second = RowPath::Section(doc.sections[1].id);
        assert!(doc.remove(&second));
        assert!(!doc.can_remove(&section));
    }

    #[test]
    fn test_section_confirmation_scenario() {
        let mut doc = EditablePrayer::new_blank(date(), 2);
        let section = RowPath::Section(doc.sections[0].id);
        assert!(!doc.requires_confirmation(&section));

        let first = RowPath::SectionItem {
            section: doc.sections[0].id,
            item: doc.sections[0].items[0].id,
        };
        assert!(doc.set_text(&first, "Wisdom".to_string()));
        assert!(doc.requires_confirmation(&section));
        assert!(doc.requires_confirmation(&first));
    }

    #[test]
    fn test_validate() {
        let mut doc = EditablePrayer::new_blank(date(), 2);
        assert!(matches!(doc.validate(), Err(Error::Validation(_))));

        let section = RowPath::Section(doc.sections[0].id);
        doc.set_text(&section, "Youth".to_string());
        assert!(doc.validate().is_err());

        let sub = doc.add_subsection(doc.sections[0].id).unwrap();
        let item = doc
            .add_subsection_item(doc.sections[0].id, sub.id())
            .unwrap();
        doc.set_text(&item, "Retreat".to_string());
        assert!(doc.validate().is_ok());

        doc.sections.clear();
        assert!(doc.validate().is_err());
    }

    #[test]
    fn test_to_publishable_cleans_blanks() {
        let mut doc = EditablePrayer::new_blank(date(), 3);
        let id = doc.sections[0].id;
        doc.set_text(&RowPath::Section(id), " Church ".to_string());
        let item = RowPath::SectionItem {
            section: id,
            item: doc.sections[0].items[1].id,
        };
        doc.set_text(&item, "Revival".to_string());
        doc.add_subsection(id);

        let data = doc.to_publishable();
        assert_eq!(data.title, "Prayers (2025.10.03)");
        assert_eq!(data.sections[0].name, "Church");
        assert_eq!(data.sections[0].items, vec!["Revival"]);
        assert!(data.sections[0].subsections.is_empty());
    }

    #[test]
    fn test_shift_date() {
        let mut doc = EditablePrayer::new_blank(date(), 0);
        doc.shift_date(-3);
        assert_eq!(doc.date, NaiveDate::from_ymd_opt(2025, 9, 30).unwrap());
    }

    #[test]
    fn test_path_parent_and_depth() {
        let doc = sample();
        let rows = doc.rows();
        let deepest = rows.iter().find(|r| r.depth() == 2).unwrap();
        let parent = deepest.parent().unwrap();
        assert_eq!(parent.kind(), RowKind::Subsection);
        assert_eq!(parent.parent().unwrap().kind(), RowKind::Section);
        assert!(RowPath::Section(RowId::new()).parent().is_none());
    }
}
