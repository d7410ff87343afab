//! Editor port: what the touch controller needs from the host editor.

use crate::core::event::EditorEvent;
use crate::core::geom::{DocPos, DocRange, Point, Rect};

/// What lies under a screen point on the editor surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceRegion {
    #[default]
    Text,
    Gutter,
    FoldWidget,
    InlineButton,
}

impl SurfaceRegion {
    /// Regions where a tap only places the caret on the line.
    pub fn is_structural(&self) -> bool {
        !matches!(self, SurfaceRegion::Text)
    }
}

/// Capability surface of the host text editor.
///
/// Screen values are page pixels. `text_to_screen` returns the top-left
/// corner of the glyph at a position. Mutating calls may queue
/// [`EditorEvent`]s which the controller drains through `poll_event`.
pub trait EditorHost {
    fn container_rect(&self) -> Rect;
    fn region_at(&self, point: Point) -> SurfaceRegion;

    fn screen_to_text(&self, point: Point) -> DocPos;
    fn text_to_screen(&self, pos: DocPos) -> Point;
    fn clip_position(&self, pos: DocPos) -> DocPos;
    fn line_height(&self) -> f32;

    fn cursor(&self) -> DocPos;
    fn selection_range(&self) -> DocRange;
    /// Anchor of a non-empty selection.
    fn selection_anchor(&self) -> Option<DocPos>;
    /// Text the copy command would take.
    fn copy_text(&self) -> String;
    /// Word around the cursor.
    fn word_range(&self) -> Option<DocRange>;
    fn is_read_only(&self) -> bool;

    /// Collapses the selection onto `pos`.
    fn move_to_position(&mut self, pos: DocPos);
    /// Moves the cursor and keeps the anchor.
    fn move_cursor_to_position(&mut self, pos: DocPos);
    /// Anchor stays at `anchor`, cursor goes to `cursor`; may be backwards.
    fn select_between(&mut self, anchor: DocPos, cursor: DocPos);
    fn set_selection_range(&mut self, range: DocRange);
    fn set_selection_anchor(&mut self, pos: DocPos);
    fn select_line(&mut self);
    /// Jumps the caret, clearing the selection and revealing the line.
    fn goto_position(&mut self, pos: DocPos);

    fn scroll_left(&self) -> f32;
    fn scroll_top(&self) -> f32;
    fn max_scroll_left(&self) -> f32;
    fn max_scroll_top(&self) -> f32;
    fn scroll_by(&mut self, dx: f32, dy: f32);
    fn set_scroll_top(&mut self, top: f32);

    fn is_focused(&self) -> bool;
    fn focus(&mut self);
    fn blur(&mut self);

    fn poll_event(&mut self) -> Option<EditorEvent>;
}
