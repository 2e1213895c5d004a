//! Animated row deletion with scroll reflow compensation
//!
//! ## L3 Molecular Layer
//! - `animator` - Two-phase delete animation of one row
//! - `coordinator` - Scroll lock and bottom spacer for the whole list
//! - `relay` - Nesting adapter between child rows and the coordinator

pub mod animator;
pub mod coordinator;
pub mod relay;

pub use animator::{DeleteTiming, DeletionPhase, DeletionState, RowDeleteAnimator, RowEvent};
pub use coordinator::{ReflowSink, ScrollMetrics, ScrollReflow};
pub use relay::NestedRelay;
