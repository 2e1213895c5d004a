//! Keeps the editor's viewport still while rows animate out
//!
//! Scrolling is locked while any deletion is outstanding. A deletion that
//! starts near the end of the content grows a spacer by the removed height,
//! so the max scroll offset does not shrink under the viewport. The spacer is
//! retracted lazily once the scroll offset fits without it.

use std::collections::HashSet;

use prayerboard_core::prayer::RowId;

/// Receives delete notifications from rows
pub trait ReflowSink {
    fn delete_started(&mut self, row: RowId, height: f64);
    fn delete_ended(&mut self, row: RowId);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub offset: f64,
    /// Includes the spacer
    pub content_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    pub fn max_offset(&self) -> f64 {
        (self.content_height - self.viewport_height).max(0.0)
    }
}

#[derive(Debug, Clone)]
pub struct ScrollReflow {
    near_bottom_margin: f64,
    near_bottom: bool,
    spacer: f64,
    outstanding: HashSet<RowId>,
}

impl ScrollReflow {
    pub fn new(near_bottom_margin: f64) -> Self {
        Self {
            near_bottom_margin,
            near_bottom: false,
            spacer: 0.0,
            outstanding: HashSet::new(),
        }
    }

    pub fn scroll_locked(&self) -> bool {
        !self.outstanding.is_empty()
    }

    pub fn pending_spacer_height(&self) -> f64 {
        self.spacer
    }

    pub fn outstanding_delete_count(&self) -> usize {
        self.outstanding.len()
    }

    pub fn is_near_bottom(&self) -> bool {
        self.near_bottom
    }

    /// Sample the scroll position. Returns true when the spacer was retracted.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> bool {
        self.near_bottom = metrics.offset + metrics.viewport_height
            >= metrics.content_height - self.near_bottom_margin;

        // Rows still hold their frozen height while locked
        if self.spacer <= 0.0 || self.scroll_locked() {
            return false;
        }
        let max_without_spacer =
            (metrics.content_height - self.spacer - metrics.viewport_height).max(0.0);
        if metrics.offset <= max_without_spacer {
            tracing::debug!(spacer = self.spacer, "Retracting reflow spacer");
            self.spacer = 0.0;
            return true;
        }
        false
    }

    /// Drop all state, e.g. when a new document is loaded
    pub fn reset(&mut self) {
        self.near_bottom = false;
        self.spacer = 0.0;
        self.outstanding.clear();
    }
}

impl ReflowSink for ScrollReflow {
    fn delete_started(&mut self, row: RowId, height: f64) {
        if !self.outstanding.insert(row) {
            return;
        }
        if self.near_bottom && height > 0.0 {
            self.spacer += height;
        }
        tracing::debug!(
            %row,
            height,
            outstanding = self.outstanding.len(),
            spacer = self.spacer,
            "Row delete started"
        );
    }

    fn delete_ended(&mut self, row: RowId) {
        // Unknown rows are ignored so the count never goes negative
        if self.outstanding.remove(&row) {
            tracing::debug!(%row, outstanding = self.outstanding.len(), "Row delete ended");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(offset: f64, content_height: f64, viewport_height: f64) -> ScrollMetrics {
        ScrollMetrics {
            offset,
            content_height,
            viewport_height,
        }
    }

    #[test]
    fn test_lock_is_reference_counted() {
        let mut reflow = ScrollReflow::new(300.0);
        let (a, b) = (RowId::new(), RowId::new());

        reflow.delete_started(a, 40.0);
        reflow.delete_started(b, 40.0);
        assert!(reflow.scroll_locked());
        assert_eq!(reflow.outstanding_delete_count(), 2);

        reflow.delete_ended(a);
        assert!(reflow.scroll_locked());
        reflow.delete_ended(b);
        assert!(!reflow.scroll_locked());

        // Extra ends never underflow
        reflow.delete_ended(b);
        reflow.delete_ended(RowId::new());
        assert_eq!(reflow.outstanding_delete_count(), 0);
    }

    #[test]
    fn test_spacer_only_near_bottom() {
        let mut reflow = ScrollReflow::new(300.0);
        reflow.on_scroll(metrics(0.0, 2000.0, 600.0));
        assert!(!reflow.is_near_bottom());
        reflow.delete_started(RowId::new(), 104.0);
        assert_eq!(reflow.pending_spacer_height(), 0.0);
    }

    #[test]
    fn test_near_bottom_delete_preserves_max_scroll() {
        let mut reflow = ScrollReflow::new(300.0);
        let before = metrics(1000.0, 1300.0, 600.0);
        reflow.on_scroll(before);
        assert!(reflow.is_near_bottom());

        let row = RowId::new();
        let removed = 80.0 + 24.0;
        reflow.delete_started(row, removed);
        assert!(reflow.pending_spacer_height() >= removed);

        // Samples during the animation never retract
        assert!(!reflow.on_scroll(metrics(1000.0, 1300.0 + removed, 600.0)));

        reflow.delete_ended(row);
        let after = metrics(
            before.offset,
            before.content_height - removed + reflow.pending_spacer_height(),
            before.viewport_height,
        );
        assert!(after.max_offset() >= before.max_offset());
        assert!(!reflow.on_scroll(after));
        assert_eq!(reflow.pending_spacer_height(), removed);
    }

    #[test]
    fn test_spacer_retracts_once_offset_fits() {
        let mut reflow = ScrollReflow::new(12.0);
        reflow.on_scroll(metrics(40.0, 60.0, 20.0));
        let row = RowId::new();
        reflow.delete_started(row, 5.0);
        reflow.delete_ended(row);

        // At the very bottom the spacer is still needed
        assert!(!reflow.on_scroll(metrics(40.0, 60.0, 20.0)));
        // After scrolling up past the spacer it goes away
        assert!(reflow.on_scroll(metrics(35.0, 60.0, 20.0)));
        assert_eq!(reflow.pending_spacer_height(), 0.0);
    }

    #[test]
    fn test_simultaneous_deletes_grow_spacer() {
        let mut reflow = ScrollReflow::new(300.0);
        reflow.on_scroll(metrics(700.0, 1300.0, 600.0));
        reflow.delete_started(RowId::new(), 50.0);
        reflow.delete_started(RowId::new(), 30.0);
        assert_eq!(reflow.pending_spacer_height(), 80.0);
    }
}
