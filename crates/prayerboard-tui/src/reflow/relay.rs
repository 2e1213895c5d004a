//! Forwards delete notifications from nested rows up to the owning list

use prayerboard_core::prayer::RowId;

use super::coordinator::ReflowSink;

/// Sink handed to the rows inside a section or subsection.
///
/// Starts without a measured height are dropped; ends always pass through
/// and the top-level coordinator ignores ends it never saw start.
pub struct NestedRelay<'a> {
    parent: &'a mut dyn ReflowSink,
}

impl<'a> NestedRelay<'a> {
    pub fn new(parent: &'a mut dyn ReflowSink) -> Self {
        Self { parent }
    }
}

impl ReflowSink for NestedRelay<'_> {
    fn delete_started(&mut self, row: RowId, height: f64) {
        if height > 0.0 {
            self.parent.delete_started(row, height);
        }
    }

    fn delete_ended(&mut self, row: RowId) {
        self.parent.delete_ended(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflow::coordinator::{ScrollMetrics, ScrollReflow};

    #[test]
    fn test_nested_start_reaches_top_level() {
        let mut reflow = ScrollReflow::new(300.0);
        reflow.on_scroll(ScrollMetrics {
            offset: 1000.0,
            content_height: 1300.0,
            viewport_height: 600.0,
        });
        let row = RowId::new();

        {
            let mut section = NestedRelay::new(&mut reflow);
            let mut subsection = NestedRelay::new(&mut section);
            subsection.delete_started(row, 36.0);
        }
        assert!(reflow.scroll_locked());
        assert_eq!(reflow.pending_spacer_height(), 36.0);

        NestedRelay::new(&mut reflow).delete_ended(row);
        assert!(!reflow.scroll_locked());
    }

    #[test]
    fn test_zero_height_start_is_dropped() {
        let mut reflow = ScrollReflow::new(300.0);
        let row = RowId::new();
        NestedRelay::new(&mut reflow).delete_started(row, 0.0);
        assert!(!reflow.scroll_locked());

        NestedRelay::new(&mut reflow).delete_ended(row);
        assert_eq!(reflow.outstanding_delete_count(), 0);
    }
}
