//! Selection model: an anchor plus a cursor, expandable to word or line.

use super::text_buffer::slice_to_cow;
use crate::core::geom::{DocPos, DocRange};
use ropey::Rope;
use unicode_segmentation::UnicodeSegmentation;
use unicode_xid::UnicodeXID;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Word,
    Line,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    anchor: DocPos,
    cursor: DocPos,
}

impl Selection {
    pub fn new(anchor: DocPos, cursor: DocPos) -> Self {
        Self { anchor, cursor }
    }

    pub fn collapsed(pos: DocPos) -> Self {
        Self::new(pos, pos)
    }

    /// Builds the selection a tap of the given granularity produces at `pos`.
    pub fn from_pos(pos: DocPos, granularity: Granularity, rope: &Rope) -> Self {
        match granularity {
            Granularity::Word => {
                let line = slice_to_cow(rope.line(pos.row));
                let (start, end) = Self::word_bounds_at(&line, pos.column);
                Self::new(DocPos::new(pos.row, start), DocPos::new(pos.row, end))
            }
            Granularity::Line => Self::new(
                DocPos::new(pos.row, 0),
                DocPos::new(pos.row, line_grapheme_len(rope, pos.row)),
            ),
        }
    }

    pub fn anchor(&self) -> DocPos {
        self.anchor
    }

    pub fn cursor(&self) -> DocPos {
        self.cursor
    }

    pub fn set_anchor(&mut self, pos: DocPos) {
        self.anchor = pos;
    }

    pub fn set_cursor(&mut self, pos: DocPos) {
        self.cursor = pos;
    }

    pub fn word_bounds_at(line: &str, col: usize) -> (usize, usize) {
        #[derive(PartialEq, Eq, Clone, Copy)]
        enum CharType {
            Identifier,
            Whitespace,
            Other,
        }

        let classify_char = |s: &str| -> CharType {
            let mut chars = s.chars();
            if let Some(c) = chars.next() {
                if c.is_whitespace() {
                    CharType::Whitespace
                } else if c.is_xid_start() || c.is_xid_continue() || c == '_' {
                    CharType::Identifier
                } else {
                    CharType::Other
                }
            } else {
                CharType::Other
            }
        };

        let mut len = 0usize;
        let mut prev_type: Option<CharType> = None;
        let mut segment_start = 0usize;

        let mut start = 0usize;
        let mut current_type: Option<CharType> = None;

        for (idx, grapheme) in line.graphemes(true).enumerate() {
            if grapheme == "\n" || grapheme == "\r\n" {
                break;
            }
            let ty = classify_char(grapheme);
            if prev_type.is_some_and(|prev| prev != ty) {
                segment_start = idx;
            }
            prev_type = Some(ty);

            if idx == col {
                current_type = Some(ty);
                start = segment_start;
            } else if current_type.is_some_and(|ct| idx > col && ty != ct) {
                return (start, idx);
            }

            len = idx + 1;
        }

        match current_type {
            Some(_) => (start, len),
            None => (len, len),
        }
    }

    pub fn range(&self) -> DocRange {
        DocRange::between(self.anchor, self.cursor)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.cursor
    }

    pub fn is_backwards(&self) -> bool {
        self.cursor < self.anchor
    }
}

/// Grapheme count of a line without its terminator.
pub fn line_grapheme_len(rope: &Rope, row: usize) -> usize {
    if row >= rope.len_lines() {
        return 0;
    }
    let line = slice_to_cow(rope.line(row));
    let without_newline = line.strip_suffix('\n').unwrap_or(&line);
    let without_newline = without_newline
        .strip_suffix('\r')
        .unwrap_or(without_newline);
    without_newline.graphemes(true).count()
}

#[cfg(test)]
#[path = "../../tests/unit/models/selection.rs"]
mod tests;
