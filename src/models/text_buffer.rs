//! Text buffer model
//!
//! Responsibilities:
//! - text storage (Rope)
//! - anchor/cursor selection
//! - row/column to char offset mapping, position clipping

use super::selection::{line_grapheme_len, Granularity, Selection};
use crate::core::geom::{DocPos, DocRange};
use ropey::{Rope, RopeSlice};
use std::borrow::Cow;
use unicode_segmentation::UnicodeSegmentation;

/// Borrows the slice when it is contiguous, copies otherwise.
pub fn slice_to_cow(slice: RopeSlice<'_>) -> Cow<'_, str> {
    match slice.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(slice.to_string()),
    }
}

#[derive(Clone, Debug)]
pub struct TextBuffer {
    rope: Rope,
    selection: Selection,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::from_text("")
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            selection: Selection::collapsed(DocPos::default()),
        }
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn cursor(&self) -> DocPos {
        self.selection.cursor()
    }

    pub fn anchor(&self) -> DocPos {
        self.selection.anchor()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_range(&self) -> DocRange {
        self.selection.range()
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn line_grapheme_len(&self, row: usize) -> usize {
        line_grapheme_len(&self.rope, row)
    }

    /// Clamps a position into the document.
    pub fn clip(&self, pos: DocPos) -> DocPos {
        let last_row = self.len_lines().saturating_sub(1);
        let row = pos.row.min(last_row);
        DocPos::new(row, pos.column.min(self.line_grapheme_len(row)))
    }

    /// Collapses the selection onto `pos`.
    pub fn collapse_to(&mut self, pos: DocPos) {
        self.selection = Selection::collapsed(self.clip(pos));
    }

    /// Moves the cursor, leaving the anchor in place.
    pub fn move_cursor(&mut self, pos: DocPos) {
        let pos = self.clip(pos);
        self.selection.set_cursor(pos);
    }

    pub fn set_anchor(&mut self, pos: DocPos) {
        let pos = self.clip(pos);
        self.selection.set_anchor(pos);
    }

    pub fn select(&mut self, anchor: DocPos, cursor: DocPos) {
        self.selection = Selection::new(self.clip(anchor), self.clip(cursor));
    }

    /// Range a tap of `granularity` would select at `pos`.
    pub fn expand_at(&self, pos: DocPos, granularity: Granularity) -> DocRange {
        Selection::from_pos(self.clip(pos), granularity, &self.rope).range()
    }

    pub fn pos_to_char(&self, pos: DocPos) -> usize {
        let pos = self.clip(pos);
        self.rope.line_to_char(pos.row) + self.grapheme_to_char_index(pos.row, pos.column)
    }

    pub fn grapheme_to_char_index(&self, row: usize, grapheme_index: usize) -> usize {
        let slice = self.rope.line(row);
        let line = slice_to_cow(slice);
        line.graphemes(true)
            .take(grapheme_index)
            .map(|g| g.chars().count())
            .sum()
    }

    pub fn text_in(&self, range: DocRange) -> String {
        let start = self.pos_to_char(range.start);
        let end = self.pos_to_char(range.end);
        if start >= end {
            return String::new();
        }
        self.rope.slice(start..end).to_string()
    }

    pub fn selected_text(&self) -> String {
        self.text_in(self.selection_range())
    }

    /// Replaces the selection with `s` and leaves the cursor after it.
    pub fn insert_str(&mut self, s: &str) {
        let range = self.selection_range();
        let start = self.pos_to_char(range.start);
        let end = self.pos_to_char(range.end);
        if start < end {
            self.rope.remove(start..end);
        }
        self.rope.insert(start, s);

        let newlines = s.chars().filter(|&c| c == '\n').count();
        let cursor = match s.rfind('\n') {
            Some(last_newline) => DocPos::new(
                range.start.row + newlines,
                s[last_newline + 1..].graphemes(true).count(),
            ),
            None => DocPos::new(
                range.start.row,
                range.start.column + s.graphemes(true).count(),
            ),
        };
        self.collapse_to(cursor);
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/text_buffer.rs"]
mod tests;
