use super::editable::{EditableItem, EditableSection, EditableSubsection};

/// Whether a row and everything nested under it carries no text
pub trait Blank {
    fn is_blank(&self) -> bool;
}

fn blank_text(text: &str) -> bool {
    text.trim().is_empty()
}

impl Blank for EditableItem {
    fn is_blank(&self) -> bool {
        blank_text(&self.content)
    }
}

impl Blank for EditableSubsection {
    fn is_blank(&self) -> bool {
        blank_text(&self.name) && self.items.iter().all(Blank::is_blank)
    }
}

impl Blank for EditableSection {
    fn is_blank(&self) -> bool {
        blank_text(&self.name)
            && self.items.iter().all(Blank::is_blank)
            && self.subsections.iter().all(Blank::is_blank)
    }
}

/// Any non-blank text anywhere in the subtree requires a confirmation prompt
pub fn requires_confirmation<T: Blank + ?Sized>(row: &T) -> bool {
    !row.is_blank()
}
