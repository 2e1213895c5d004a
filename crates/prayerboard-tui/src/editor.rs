//! Editor screen state
//!
//! Owns the editable document plus the per-row delete animators and the
//! scroll reflow coordinator. Each frame runs `prepare_frame`: finished
//! deletions leave the document, rows are laid out into virtual lines
//! (reporting their heights to the animators) and the scroll position is
//! sampled for the spacer logic.

use std::collections::HashMap;
use std::time::Instant;

use prayerboard_core::prayer::{EditablePrayer, PrayerData, RowId, RowKind, RowPath};
use prayerboard_core::{EditorConfig, ScrollConfig};

use crate::motion::ScrollAnimator;
use crate::reflow::{
    DeleteTiming, NestedRelay, ReflowSink, RowDeleteAnimator, RowEvent, ScrollMetrics,
    ScrollReflow,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Normal,
    Editing { path: RowPath, buffer: String },
    ConfirmDelete(RowPath),
    ConfirmSave,
    ConfirmLoad,
    ConfirmExit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Started,
    NeedsConfirmation,
    NotAllowed,
    NothingSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Date,
    SectionHeader,
    SubsectionHeader,
    Item,
    AddSection,
    Margin,
    Spacer,
}

/// One terminal line of the laid-out document
#[derive(Debug, Clone, PartialEq)]
pub struct EditorLine {
    pub kind: LineKind,
    pub row: Option<RowId>,
    /// First line of its row, the one the cursor highlights
    pub head: bool,
    pub text: String,
    pub placeholder: bool,
    pub depth: u16,
    /// Horizontal slide in [0, 1] of the available width
    pub shift: f64,
    pub opacity: f64,
    pub removable: bool,
}

impl EditorLine {
    fn filler(kind: LineKind) -> Self {
        Self {
            kind,
            row: None,
            head: false,
            text: String::new(),
            placeholder: false,
            depth: 0,
            shift: 0.0,
            opacity: 1.0,
            removable: false,
        }
    }
}

/// Deliver a notification through one relay per nesting level
fn route(sink: &mut dyn ReflowSink, depth: usize, f: &mut dyn FnMut(&mut dyn ReflowSink)) {
    if depth == 0 {
        f(sink);
    } else {
        route(&mut NestedRelay::new(sink), depth - 1, f);
    }
}

struct LayoutPass<'a> {
    animators: &'a mut HashMap<RowId, RowDeleteAnimator>,
    timing: DeleteTiming,
    config: &'a EditorConfig,
    doc: &'a EditablePrayer,
    now: Instant,
}

impl LayoutPass<'_> {
    fn margin_for(&self, kind: RowKind) -> u16 {
        match kind {
            RowKind::Section => self.config.section_margin_rows,
            RowKind::Subsection => self.config.subsection_margin_rows,
            RowKind::Item => 0,
        }
    }

    /// Apply the row's animation to its laid-out lines
    fn animate(&mut self, path: RowPath, mut body: Vec<EditorLine>) -> Vec<EditorLine> {
        let timing = self.timing;
        let margin = self.margin_for(path.kind()) as f64;
        let animator = self
            .animators
            .entry(path.id())
            .or_insert_with(|| RowDeleteAnimator::new(timing, margin));
        animator.on_layout(body.len() as f64);
        let style = animator.style(self.now);

        let shift = if timing.slide_distance > 0.0 {
            (-style.translate_x / timing.slide_distance).clamp(0.0, 1.0)
        } else {
            0.0
        };
        for line in &mut body {
            line.shift = line.shift.max(shift);
            line.opacity *= style.opacity;
        }
        let visible = (style.collapsed_height.round().max(0.0) as usize).min(body.len());
        body.truncate(visible);
        let margin_rows = style.collapsed_margin.round().max(0.0) as usize;
        body.extend((0..margin_rows).map(|_| EditorLine::filler(LineKind::Margin)));
        body
    }

    fn head(&self, path: RowPath, kind: LineKind, text: &str, placeholder: String, depth: u16) -> EditorLine {
        let blank = text.trim().is_empty();
        EditorLine {
            kind,
            row: Some(path.id()),
            head: true,
            text: if blank { placeholder } else { text.to_string() },
            placeholder: blank,
            depth,
            shift: 0.0,
            opacity: 1.0,
            removable: self.doc.can_remove(&path),
        }
    }

    fn section(&mut self, index: usize) -> Vec<EditorLine> {
        let doc = self.doc;
        let section = &doc.sections[index];
        let path = RowPath::Section(section.id);
        let mut body = vec![self.head(
            path,
            LineKind::SectionHeader,
            &section.name,
            format!("Section {} title", index + 1),
            0,
        )];

        for (i, item) in section.items.iter().enumerate() {
            let item_path = RowPath::SectionItem {
                section: section.id,
                item: item.id,
            };
            let line = self.head(item_path, LineKind::Item, &item.content, format!("Prayer {}", i + 1), 1);
            body.extend(self.animate(item_path, vec![line]));
        }

        for sub in &section.subsections {
            let sub_path = RowPath::Subsection {
                section: section.id,
                subsection: sub.id,
            };
            let mut sub_body = vec![self.head(
                sub_path,
                LineKind::SubsectionHeader,
                &sub.name,
                "Subsection title".to_string(),
                1,
            )];
            for (i, item) in sub.items.iter().enumerate() {
                let item_path = RowPath::SubsectionItem {
                    section: section.id,
                    subsection: sub.id,
                    item: item.id,
                };
                let line = self.head(item_path, LineKind::Item, &item.content, format!("Prayer {}", i + 1), 2);
                sub_body.extend(self.animate(item_path, vec![line]));
            }
            body.extend(self.animate(sub_path, sub_body));
        }

        self.animate(path, body)
    }
}

pub struct EditorState {
    config: EditorConfig,
    timing: DeleteTiming,
    doc: EditablePrayer,
    animators: HashMap<RowId, RowDeleteAnimator>,
    deleting: HashMap<RowId, RowPath>,
    reflow: ScrollReflow,
    scroll: ScrollAnimator,
    selected: Option<RowId>,
    follow_cursor: bool,
    mode: EditorMode,
    lines: Vec<EditorLine>,
    viewport_height: u16,
    dirty: bool,
}

impl EditorState {
    pub fn new(doc: EditablePrayer, config: EditorConfig, scroll: ScrollConfig) -> Self {
        let selected = doc.rows().first().map(|r| r.id());
        Self {
            timing: DeleteTiming::from_config(&config),
            reflow: ScrollReflow::new(config.near_bottom_rows as f64),
            config,
            doc,
            animators: HashMap::new(),
            deleting: HashMap::new(),
            scroll: ScrollAnimator::new(scroll),
            selected,
            follow_cursor: true,
            mode: EditorMode::Normal,
            lines: Vec::new(),
            viewport_height: 0,
            dirty: false,
        }
    }

    pub fn document(&self) -> &EditablePrayer {
        &self.doc
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn lines(&self) -> &[EditorLine] {
        &self.lines
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll.current()
    }

    pub fn scroll_locked(&self) -> bool {
        self.reflow.scroll_locked()
    }

    pub fn reflow(&self) -> &ScrollReflow {
        &self.reflow
    }

    pub fn selected(&self) -> Option<RowId> {
        self.selected
    }

    pub fn needs_fast_update(&self) -> bool {
        !self.deleting.is_empty() || self.scroll.needs_update()
    }

    fn max_scroll(&self) -> u16 {
        (self.lines.len() as u16).saturating_sub(self.viewport_height)
    }

    /// Rows being deleted, or inside a row being deleted
    fn is_leaving(&self, path: &RowPath) -> bool {
        let mut current = Some(*path);
        while let Some(p) = current {
            if self.deleting.contains_key(&p.id()) {
                return true;
            }
            current = p.parent();
        }
        false
    }

    fn selectable(&self) -> Vec<RowPath> {
        self.doc
            .rows()
            .into_iter()
            .filter(|p| !self.is_leaving(p))
            .collect()
    }

    pub fn selected_path(&self) -> Option<RowPath> {
        let id = self.selected?;
        self.doc.rows().into_iter().find(|p| p.id() == id)
    }

    fn select(&mut self, path: Option<RowPath>) {
        self.selected = path.map(|p| p.id());
        self.follow_cursor = true;
    }

    pub fn move_cursor(&mut self, delta: i32) {
        let rows = self.selectable();
        if rows.is_empty() {
            self.select(None);
            return;
        }
        let current = self
            .selected
            .and_then(|id| rows.iter().position(|p| p.id() == id));
        let next = match current {
            Some(i) => (i as i32 + delta).clamp(0, rows.len() as i32 - 1) as usize,
            None => 0,
        };
        self.select(Some(rows[next]));
    }

    pub fn jump_to_top(&mut self) {
        let first = self.selectable().first().copied();
        self.select(first);
    }

    pub fn jump_to_bottom(&mut self) {
        let last = self.selectable().last().copied();
        self.select(last);
    }

    /// Free scrolling (mouse wheel, page keys). Dropped while locked.
    pub fn scroll_by(&mut self, delta: i32) {
        let max = self.max_scroll();
        self.scroll.scroll_by(delta, max);
    }

    pub fn scroll_half_page(&mut self, direction: i32) {
        let max = self.max_scroll();
        self.scroll.scroll_half_page(direction, self.viewport_height, max);
    }

    /// Removal rules, counting rows already on their way out as gone
    fn can_remove_now(&self, path: &RowPath) -> bool {
        if self.is_leaving(path) || !self.doc.can_remove(path) {
            return false;
        }
        match *path {
            RowPath::Section(_) => {
                self.doc
                    .sections
                    .iter()
                    .filter(|s| !self.deleting.contains_key(&s.id))
                    .count()
                    > 1
            }
            RowPath::SubsectionItem {
                section,
                subsection,
                ..
            } => self
                .doc
                .section(section)
                .and_then(|s| s.subsections.iter().find(|sub| sub.id == subsection))
                .map(|sub| {
                    sub.items
                        .iter()
                        .filter(|i| !self.deleting.contains_key(&i.id))
                        .count()
                        > 1
                })
                .unwrap_or(false),
            _ => true,
        }
    }

    /// Delete the selected row, asking first when it holds any text
    pub fn request_delete(&mut self, now: Instant) -> DeleteOutcome {
        let Some(path) = self.selected_path() else {
            return DeleteOutcome::NothingSelected;
        };
        if !self.can_remove_now(&path) {
            return DeleteOutcome::NotAllowed;
        }
        if self.doc.requires_confirmation(&path) {
            self.mode = EditorMode::ConfirmDelete(path);
            return DeleteOutcome::NeedsConfirmation;
        }
        self.start_delete(path, now);
        DeleteOutcome::Started
    }

    /// Confirm a pending delete prompt
    pub fn confirm_delete(&mut self, now: Instant) -> bool {
        let EditorMode::ConfirmDelete(path) = self.mode else {
            return false;
        };
        self.mode = EditorMode::Normal;
        if !self.doc.contains(&path) || !self.can_remove_now(&path) {
            return false;
        }
        self.start_delete(path, now);
        true
    }

    fn start_delete(&mut self, path: RowPath, now: Instant) {
        let timing = self.timing;
        let margin = match path.kind() {
            RowKind::Section => self.config.section_margin_rows,
            RowKind::Subsection => self.config.subsection_margin_rows,
            RowKind::Item => 0,
        } as f64;
        let animator = self
            .animators
            .entry(path.id())
            .or_insert_with(|| RowDeleteAnimator::new(timing, margin));
        let Some(height) = animator.begin(now) else {
            return;
        };

        // Move the cursor off the leaving subtree first
        let rows = self.selectable();
        let position = rows.iter().position(|p| p.id() == path.id());
        self.deleting.insert(path.id(), path);
        if self.selected_path().map_or(false, |p| self.is_leaving(&p)) {
            let remaining = self.selectable();
            // Prefer the next row below, then the closest one above
            let replacement = match position {
                Some(i) => rows[i..]
                    .iter()
                    .chain(rows[..i].iter().rev())
                    .find(|p| remaining.contains(p))
                    .copied(),
                None => remaining.first().copied(),
            };
            self.select(replacement);
        }

        let id = path.id();
        route(&mut self.reflow, path.depth(), &mut |sink: &mut dyn ReflowSink| {
            sink.delete_started(id, height)
        });
        self.scroll.set_locked(self.reflow.scroll_locked());
        tracing::debug!(row = %id, height, "Delete animation started");
    }

    /// Advance delete animations, removing finished rows from the document.
    /// Returns how many rows were removed.
    pub fn tick(&mut self, now: Instant) -> usize {
        let mut finished = Vec::new();
        for (id, animator) in self.animators.iter_mut() {
            if animator.tick(now) == Some(RowEvent::Finished) {
                finished.push(*id);
            }
        }

        let mut removed = 0;
        for id in finished {
            let Some(path) = self.deleting.remove(&id) else {
                continue;
            };
            // Already gone when an ancestor finished first
            if self.doc.remove(&path) {
                removed += 1;
                self.dirty = true;
            }
            self.animators.remove(&id);
            route(&mut self.reflow, path.depth(), &mut |sink: &mut dyn ReflowSink| {
                sink.delete_ended(id)
            });
        }
        self.scroll.set_locked(self.reflow.scroll_locked());
        removed
    }

    fn layout(&mut self, now: Instant) {
        let mut lines = Vec::new();
        let mut date = EditorLine::filler(LineKind::Date);
        date.text = self.doc.date.format("%Y.%m.%d (%a)").to_string();
        lines.push(date);
        lines.push(EditorLine::filler(LineKind::Margin));

        let mut pass = LayoutPass {
            animators: &mut self.animators,
            timing: self.timing,
            config: &self.config,
            doc: &self.doc,
            now,
        };
        for index in 0..self.doc.sections.len() {
            lines.extend(pass.section(index));
        }

        let mut add = EditorLine::filler(LineKind::AddSection);
        add.text = "+ Add section".to_string();
        lines.push(add);

        let spacer = self.reflow.pending_spacer_height().round().max(0.0) as usize;
        lines.extend((0..spacer).map(|_| EditorLine::filler(LineKind::Spacer)));
        self.lines = lines;

        // Animators of rows that left the document and are not animating
        let live: std::collections::HashSet<RowId> = self.doc.rows().iter().map(|p| p.id()).collect();
        let deleting = &self.deleting;
        self.animators
            .retain(|id, _| live.contains(id) || deleting.contains_key(id));
    }

    fn ensure_cursor_visible(&mut self, now: Instant) {
        if !self.follow_cursor || self.scroll.is_locked() {
            return;
        }
        self.follow_cursor = false;
        let Some(id) = self.selected else {
            return;
        };
        let Some(index) = self.lines.iter().position(|l| l.head && l.row == Some(id)) else {
            return;
        };
        let index = index as u16;
        let offset = self.scroll.target();
        let max = self.max_scroll();
        if index < offset {
            self.scroll.scroll_to(index, max, now);
        } else if self.viewport_height > 0 && index >= offset + self.viewport_height {
            self.scroll.scroll_to(index + 1 - self.viewport_height, max, now);
        }
    }

    /// Advance animations and lay out the document for a frame
    pub fn prepare_frame(&mut self, now: Instant, viewport_height: u16) {
        self.viewport_height = viewport_height;
        self.tick(now);
        self.layout(now);
        self.ensure_cursor_visible(now);

        let max = self.max_scroll();
        let offset = self.scroll.update_at(now, max);
        let metrics = ScrollMetrics {
            offset: offset as f64,
            content_height: self.lines.len() as f64,
            viewport_height: viewport_height as f64,
        };
        if self.reflow.on_scroll(metrics) {
            self.layout(now);
        }
    }

    pub fn begin_edit(&mut self) -> bool {
        let Some(path) = self.selected_path() else {
            return false;
        };
        if self.is_leaving(&path) {
            return false;
        }
        let buffer = self.doc.text(&path).unwrap_or_default().to_string();
        self.mode = EditorMode::Editing { path, buffer };
        true
    }

    pub fn input_char(&mut self, c: char) {
        if let EditorMode::Editing { buffer, .. } = &mut self.mode {
            buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let EditorMode::Editing { buffer, .. } = &mut self.mode {
            buffer.pop();
        }
    }

    pub fn commit_edit(&mut self) {
        let mode = std::mem::replace(&mut self.mode, EditorMode::Normal);
        if let EditorMode::Editing { path, buffer } = mode {
            if self.doc.text(&path) != Some(buffer.as_str()) && self.doc.set_text(&path, buffer) {
                self.dirty = true;
            }
        }
    }

    pub fn cancel_mode(&mut self) {
        self.mode = EditorMode::Normal;
    }

    /// Section containing the cursor, and the subsection if any
    fn cursor_context(&self) -> Option<(RowId, Option<RowId>)> {
        match self.selected_path()? {
            RowPath::Section(section) | RowPath::SectionItem { section, .. } => Some((section, None)),
            RowPath::Subsection {
                section,
                subsection,
            }
            | RowPath::SubsectionItem {
                section,
                subsection,
                ..
            } => Some((section, Some(subsection))),
        }
    }

    pub fn add_section(&mut self) {
        let path = self.doc.add_section(self.config.new_section_items);
        self.dirty = true;
        self.select(Some(path));
    }

    /// Add an item to the cursor's subsection, or its section
    pub fn add_item(&mut self) -> bool {
        let path = match self.cursor_context() {
            Some((section, Some(subsection))) => self.doc.add_subsection_item(section, subsection),
            Some((section, None)) => self.doc.add_item(section),
            None => None,
        };
        self.added(path)
    }

    pub fn add_subsection(&mut self) -> bool {
        let path = self
            .cursor_context()
            .and_then(|(section, _)| self.doc.add_subsection(section));
        self.added(path)
    }

    fn added(&mut self, path: Option<RowPath>) -> bool {
        match path {
            Some(path) => {
                self.dirty = true;
                self.select(Some(path));
                true
            }
            None => false,
        }
    }

    pub fn shift_date(&mut self, days: i64) {
        self.doc.shift_date(days);
        self.dirty = true;
    }

    pub fn validate(&self) -> prayerboard_core::Result<()> {
        self.doc.validate()
    }

    pub fn publishable(&self) -> PrayerData {
        self.doc.to_publishable()
    }

    /// Swap in a new document; running animations are discarded with the old one
    pub fn replace_document(&mut self, doc: EditablePrayer) {
        self.doc = doc;
        self.animators.clear();
        self.deleting.clear();
        self.reflow.reset();
        self.scroll.set_locked(false);
        self.scroll.set_position(0);
        self.mode = EditorMode::Normal;
        self.dirty = false;
        let first = self.doc.rows().first().copied();
        self.select(first);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use prayerboard_core::prayer::{EditableItem, EditableSection};
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
    }

    fn instant_scroll() -> ScrollConfig {
        ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        }
    }

    fn filled_section(name: &str, items: usize) -> EditableSection {
        let mut section = EditableSection::new(name, 0);
        section.items = (0..items).map(|i| EditableItem::new(format!("item {}", i + 1))).collect();
        section
    }

    fn editor(sections: Vec<EditableSection>) -> EditorState {
        let mut doc = EditablePrayer::new_blank(date(), 0);
        doc.sections = sections;
        EditorState::new(doc, EditorConfig::default(), instant_scroll())
    }

    #[test]
    fn test_blank_section_deletes_without_prompt() {
        let t0 = Instant::now();
        let mut ed = editor(vec![filled_section("Church", 1), EditableSection::new("", 2)]);
        ed.prepare_frame(t0, 20);

        ed.jump_to_bottom();
        ed.move_cursor(-2);
        assert!(matches!(ed.selected_path(), Some(RowPath::Section(_))));

        assert_eq!(ed.request_delete(t0), DeleteOutcome::Started);
        assert_eq!(ed.mode(), &EditorMode::Normal);
        assert!(ed.scroll_locked());

        ed.prepare_frame(t0 + ms(250), 20);
        assert!(ed.scroll_locked());
        assert_eq!(ed.document().sections.len(), 2);

        ed.prepare_frame(t0 + ms(500), 20);
        assert!(!ed.scroll_locked());
        assert_eq!(ed.document().sections.len(), 1);
        assert!(ed.is_dirty());
    }

    #[test]
    fn test_filled_row_asks_before_deleting() {
        let t0 = Instant::now();
        let mut ed = editor(vec![filled_section("Church", 2)]);
        ed.prepare_frame(t0, 20);
        ed.move_cursor(1);

        assert_eq!(ed.request_delete(t0), DeleteOutcome::NeedsConfirmation);
        assert!(!ed.scroll_locked());
        assert_eq!(ed.document().sections[0].items.len(), 2);

        ed.cancel_mode();
        assert!(!ed.confirm_delete(t0));

        ed.request_delete(t0);
        assert!(ed.confirm_delete(t0));
        assert!(ed.scroll_locked());
        ed.prepare_frame(t0 + ms(600), 20);
        assert_eq!(ed.document().sections[0].items.len(), 1);
        assert!(!ed.scroll_locked());
    }

    #[test]
    fn test_last_section_cannot_be_removed() {
        let mut ed = editor(vec![filled_section("Church", 1)]);
        assert_eq!(ed.request_delete(Instant::now()), DeleteOutcome::NotAllowed);
    }

    #[test]
    fn test_concurrent_deletes_keep_scroll_locked() {
        let t0 = Instant::now();
        let mut blank = EditableSection::new("Family", 3);
        blank.name = String::new();
        let mut ed = editor(vec![blank]);
        ed.prepare_frame(t0, 20);

        ed.move_cursor(1);
        assert_eq!(ed.request_delete(t0), DeleteOutcome::Started);
        ed.prepare_frame(t0 + ms(100), 20);
        assert_eq!(ed.request_delete(t0 + ms(100)), DeleteOutcome::Started);
        assert_eq!(ed.reflow().outstanding_delete_count(), 2);

        // First finishes, second still running
        ed.prepare_frame(t0 + ms(510), 20);
        assert_eq!(ed.document().sections[0].items.len(), 2);
        assert!(ed.scroll_locked());

        ed.prepare_frame(t0 + ms(610), 20);
        assert_eq!(ed.document().sections[0].items.len(), 1);
        assert!(!ed.scroll_locked());
    }

    #[test]
    fn test_near_bottom_delete_keeps_viewport_still() {
        let t0 = Instant::now();
        let mut ed = editor(vec![filled_section("Church", 30)]);
        ed.prepare_frame(t0, 10);
        // date, margin, header, 30 items, section margin, add-section
        assert_eq!(ed.lines().len(), 35);

        ed.jump_to_bottom();
        ed.prepare_frame(t0, 10);
        ed.scroll_by(5);
        ed.prepare_frame(t0, 10);
        assert_eq!(ed.scroll_offset(), 25);
        assert!(ed.reflow().is_near_bottom());

        assert_eq!(ed.request_delete(t0), DeleteOutcome::NeedsConfirmation);
        assert!(ed.confirm_delete(t0));
        assert_eq!(ed.reflow().pending_spacer_height(), 1.0);

        ed.prepare_frame(t0 + ms(100), 10);
        ed.scroll_by(-5);
        ed.prepare_frame(t0 + ms(100), 10);
        assert_eq!(ed.scroll_offset(), 25, "locked while animating");

        ed.prepare_frame(t0 + ms(600), 10);
        assert_eq!(ed.document().sections[0].items.len(), 29);
        assert_eq!(ed.scroll_offset(), 25);
        assert_eq!(ed.reflow().pending_spacer_height(), 1.0);

        // Scrolling up far enough retracts the spacer
        ed.scroll_by(-3);
        ed.prepare_frame(t0 + ms(700), 10);
        assert_eq!(ed.scroll_offset(), 22);
        assert_eq!(ed.reflow().pending_spacer_height(), 0.0);
        assert_eq!(ed.lines().len(), 34);
    }

    #[test]
    fn test_subsection_item_goes_through_relays() {
        let t0 = Instant::now();
        let mut ed = editor(vec![filled_section("Church", 1)]);
        let section = ed.document().sections[0].id;
        ed.prepare_frame(t0, 20);

        ed.jump_to_top();
        assert!(ed.add_subsection());
        assert!(ed.add_item());
        assert!(ed.add_item());
        ed.prepare_frame(t0, 20);

        let path = ed.selected_path().expect("selection");
        assert!(matches!(path, RowPath::SubsectionItem { section: s, .. } if s == section));
        assert_eq!(ed.request_delete(t0), DeleteOutcome::Started);
        assert!(ed.scroll_locked());

        // The cursor moved to the sibling, now the only remaining item
        assert!(matches!(ed.selected_path(), Some(RowPath::SubsectionItem { .. })));
        assert_eq!(ed.request_delete(t0), DeleteOutcome::NotAllowed);

        ed.prepare_frame(t0 + ms(600), 20);
        assert!(!ed.scroll_locked());
        assert_eq!(ed.document().sections[0].subsections[0].items.len(), 1);
    }

    #[test]
    fn test_editing_and_adding_mark_dirty() {
        let mut ed = editor(vec![filled_section("Church", 1)]);
        assert!(!ed.is_dirty());

        ed.add_section();
        assert_eq!(ed.document().sections[1].items.len(), 5);
        assert!(ed.is_dirty());
        ed.mark_saved();

        assert!(ed.begin_edit());
        for c in "Youth".chars() {
            ed.input_char(c);
        }
        ed.backspace();
        ed.commit_edit();
        assert_eq!(ed.document().sections[1].name, "Yout");
        assert!(ed.is_dirty());
    }

    #[test]
    fn test_replace_document_discards_running_animations() {
        let t0 = Instant::now();
        let mut ed = editor(vec![filled_section("Church", 1), EditableSection::new("", 1)]);
        ed.prepare_frame(t0, 20);
        ed.jump_to_bottom();
        ed.move_cursor(-1);
        assert_eq!(ed.request_delete(t0), DeleteOutcome::Started);

        ed.replace_document(EditablePrayer::new_blank(date(), 5));
        assert!(!ed.scroll_locked());
        ed.prepare_frame(t0 + ms(600), 20);
        assert_eq!(ed.document().sections.len(), 1);
        assert_eq!(ed.document().sections[0].items.len(), 5);
    }
}
