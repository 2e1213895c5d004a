//! Animation primitives for Prayerboard TUI
//!
//! All time-dependent types sample an explicit `Instant` instead of reading
//! the clock, so tests can drive them frame by frame.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Pure easing functions and the CSS `ease` bezier
//! - `timing` - Progress and interpolation helpers
//! - `config` - Duration helpers over the core config types
//!
//! ## L3 Molecular Layer
//! - `tween` - One value moving between two points over time
//! - `scroll` - Batched, lockable smooth scrolling

// L4 Atomic Layer
pub mod config;
pub mod easing;
pub mod timing;

// L3 Molecular Layer
pub mod scroll;
pub mod tween;

pub use config::{AudioConfigExt, EditorConfigExt, RefreshConfigExt, ScrollConfigExt};
pub use easing::{CubicBezier, EasingType, EasingTypeExt};
pub use scroll::ScrollAnimator;
pub use tween::Tween;
