//! Terminal UI for the prayer list
//!
//! ## L4 Atomic Layer
//! - `motion` - Easing, tweens, smooth scrolling
//!
//! ## L3 Molecular Layer
//! - `refresh` - Pull-to-refresh gesture controller and runner
//! - `reflow` - Animated row deletion with scroll compensation
//! - `audio` - Looped background music with fades
//!
//! ## Screens
//! - `app`, `editor`, `input`, `event`, `widgets`

pub mod app;
pub mod audio;
pub mod editor;
pub mod event;
pub mod input;
pub mod motion;
pub mod refresh;
pub mod reflow;
pub mod theme;
pub mod widgets;

pub use app::{App, Command, Screen};
pub use editor::EditorState;
pub use theme::Theme;
