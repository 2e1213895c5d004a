mod editor_view;
mod popup;
pub mod prayer_view;
mod refresh_indicator;
mod status_bar;
mod update_required;

pub use editor_view::EditorWidget;
pub use popup::PopupWidget;
pub use prayer_view::PrayerViewWidget;
pub use refresh_indicator::RefreshIndicatorWidget;
pub use status_bar::StatusBarWidget;
pub use update_required::UpdateRequiredWidget;
