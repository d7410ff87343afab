//! In-memory [`EditorHost`] over a [`TextBuffer`].
//!
//! Lays text out on a fixed monospace grid behind a gutter, with no
//! wrapping or folding. Used by the replay tool and the tests.

use crate::core::event::EditorEvent;
use crate::core::geom::{DocPos, DocRange, Point, Rect};
use crate::kernel::services::ports::editor::{EditorHost, SurfaceRegion};
use crate::models::{Granularity, TextBuffer};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridMetrics {
    pub gutter_width: f32,
    pub char_width: f32,
    pub line_height: f32,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            gutter_width: 40.0,
            char_width: 10.0,
            line_height: 20.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MemoryEditor {
    buffer: TextBuffer,
    container: Rect,
    metrics: GridMetrics,
    scroll_left: f32,
    scroll_top: f32,
    focused: bool,
    read_only: bool,
    events: VecDeque<EditorEvent>,
}

impl MemoryEditor {
    pub fn new(text: &str) -> Self {
        Self {
            buffer: TextBuffer::from_text(text),
            container: Rect::new(0.0, 0.0, 360.0, 640.0),
            metrics: GridMetrics::default(),
            scroll_left: 0.0,
            scroll_top: 0.0,
            focused: true,
            read_only: false,
            events: VecDeque::new(),
        }
    }

    pub fn with_container(mut self, container: Rect) -> Self {
        self.container = container;
        self
    }

    pub fn with_metrics(mut self, metrics: GridMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn metrics(&self) -> GridMetrics {
        self.metrics
    }

    /// Queues an event as if the editor published it.
    pub fn emit(&mut self, event: EditorEvent) {
        self.events.push_back(event);
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Typing path: replaces the selection and publishes a content change.
    pub fn insert_text(&mut self, text: &str) {
        if self.read_only {
            return;
        }
        self.mutate_selection(|buffer| buffer.insert_str(text));
        self.emit(EditorEvent::Change);
    }

    /// External caret move, e.g. from a hardware key.
    pub fn set_cursor_external(&mut self, pos: DocPos) {
        self.move_to_position(pos);
    }

    pub fn set_scroll(&mut self, left: f32, top: f32) {
        self.apply_scroll(left, top);
    }

    pub fn set_focused(&mut self, focused: bool) {
        if focused {
            self.focus();
        } else {
            self.blur();
        }
    }

    fn text_origin(&self) -> Point {
        Point::new(
            self.container.x + self.metrics.gutter_width,
            self.container.y,
        )
    }

    fn longest_line(&self) -> usize {
        (0..self.buffer.len_lines())
            .map(|row| self.buffer.line_grapheme_len(row))
            .max()
            .unwrap_or(0)
    }

    fn mutate_selection(&mut self, f: impl FnOnce(&mut TextBuffer)) {
        let cursor_before = self.buffer.cursor();
        let selection_before = self.buffer.selection().clone();
        f(&mut self.buffer);
        if self.buffer.cursor() != cursor_before {
            self.emit(EditorEvent::ChangeCursor);
        }
        if *self.buffer.selection() != selection_before {
            self.emit(EditorEvent::ChangeSelection);
        }
    }

    fn apply_scroll(&mut self, left: f32, top: f32) {
        let left = left.clamp(0.0, self.max_scroll_left());
        let top = top.clamp(0.0, self.max_scroll_top());
        if left == self.scroll_left && top == self.scroll_top {
            return;
        }
        self.scroll_left = left;
        self.scroll_top = top;
        self.emit(EditorEvent::Scroll);
    }

    fn reveal(&mut self, pos: DocPos) {
        let line_height = self.metrics.line_height;
        let row_top = pos.row as f32 * line_height;
        let mut top = self.scroll_top;
        if row_top < top {
            top = row_top;
        } else if row_top + line_height > top + self.container.h {
            top = row_top + line_height - self.container.h;
        }
        self.apply_scroll(self.scroll_left, top);
    }
}

impl EditorHost for MemoryEditor {
    fn container_rect(&self) -> Rect {
        self.container
    }

    fn region_at(&self, point: Point) -> SurfaceRegion {
        if point.x >= self.container.x && point.x < self.text_origin().x {
            SurfaceRegion::Gutter
        } else {
            SurfaceRegion::Text
        }
    }

    fn screen_to_text(&self, point: Point) -> DocPos {
        let origin = self.text_origin();
        let y = point.y - origin.y + self.scroll_top;
        let x = point.x - origin.x + self.scroll_left;
        let row = (y / self.metrics.line_height).floor().max(0.0) as usize;
        let column = (x / self.metrics.char_width).round().max(0.0) as usize;
        self.buffer.clip(DocPos::new(row, column))
    }

    fn text_to_screen(&self, pos: DocPos) -> Point {
        let origin = self.text_origin();
        Point::new(
            origin.x + pos.column as f32 * self.metrics.char_width - self.scroll_left,
            origin.y + pos.row as f32 * self.metrics.line_height - self.scroll_top,
        )
    }

    fn clip_position(&self, pos: DocPos) -> DocPos {
        self.buffer.clip(pos)
    }

    fn line_height(&self) -> f32 {
        self.metrics.line_height
    }

    fn cursor(&self) -> DocPos {
        self.buffer.cursor()
    }

    fn selection_range(&self) -> DocRange {
        self.buffer.selection_range()
    }

    fn selection_anchor(&self) -> Option<DocPos> {
        self.buffer.has_selection().then(|| self.buffer.anchor())
    }

    fn copy_text(&self) -> String {
        self.buffer.selected_text()
    }

    fn word_range(&self) -> Option<DocRange> {
        Some(self.buffer.expand_at(self.buffer.cursor(), Granularity::Word))
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn move_to_position(&mut self, pos: DocPos) {
        self.mutate_selection(|buffer| buffer.collapse_to(pos));
    }

    fn move_cursor_to_position(&mut self, pos: DocPos) {
        self.mutate_selection(|buffer| buffer.move_cursor(pos));
    }

    fn select_between(&mut self, anchor: DocPos, cursor: DocPos) {
        self.mutate_selection(|buffer| buffer.select(anchor, cursor));
    }

    fn set_selection_range(&mut self, range: DocRange) {
        self.mutate_selection(|buffer| buffer.select(range.start, range.end));
    }

    fn set_selection_anchor(&mut self, pos: DocPos) {
        self.mutate_selection(|buffer| buffer.set_anchor(pos));
    }

    fn select_line(&mut self) {
        let range = self
            .buffer
            .expand_at(self.buffer.cursor(), Granularity::Line);
        self.set_selection_range(range);
    }

    fn goto_position(&mut self, pos: DocPos) {
        self.move_to_position(pos);
        self.reveal(self.buffer.cursor());
    }

    fn scroll_left(&self) -> f32 {
        self.scroll_left
    }

    fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    fn max_scroll_left(&self) -> f32 {
        let content = self.longest_line() as f32 * self.metrics.char_width;
        (content - (self.container.w - self.metrics.gutter_width)).max(0.0)
    }

    fn max_scroll_top(&self) -> f32 {
        let content = self.buffer.len_lines() as f32 * self.metrics.line_height;
        (content - self.container.h).max(0.0)
    }

    fn scroll_by(&mut self, dx: f32, dy: f32) {
        self.apply_scroll(self.scroll_left + dx, self.scroll_top + dy);
    }

    fn set_scroll_top(&mut self, top: f32) {
        self.apply_scroll(self.scroll_left, top);
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        if self.focused {
            self.focused = false;
            self.emit(EditorEvent::Blur);
        }
    }

    fn poll_event(&mut self) -> Option<EditorEvent> {
        self.events.pop_front()
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/memory_editor.rs"]
mod tests;
