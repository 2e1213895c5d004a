mod blank;
mod editable;
mod models;
mod normalize;

pub use blank::{requires_confirmation, Blank};
pub use editable::{
    EditableItem, EditablePrayer, EditableSection, EditableSubsection, RowId, RowKind, RowPath,
};
pub use models::{PrayerData, PrayerSection, PrayerSubsection, PrayerVerse};
pub use normalize::{normalize_sections, prayer_from_record, prayer_from_snapshot};
