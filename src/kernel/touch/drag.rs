//! Dragging a teardrop handle.

use super::handles::HandleKind;
use super::menu::FINGER_OFFSET_LINES;
use super::{Task, TimerSlot, TouchController};
use crate::core::geom::{DocPos, Point};
use crate::kernel::services::ports::EditorHost;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleDrag {
    kind: HandleKind,
    /// Cleared by the first move; a press without movement opens the menu.
    shows_menu: bool,
    ended: bool,
}

impl HandleDrag {
    pub fn kind(&self) -> HandleKind {
        self.kind
    }

    pub fn shows_menu(&self) -> bool {
        self.shows_menu
    }
}

/// Where the selection anchor goes while the start handle is dragged to
/// `pos`. `None` keeps the anchor because the range would become empty or
/// backwards.
pub fn start_drag_target(pos: DocPos, end: DocPos) -> Option<DocPos> {
    let mut pos = pos;
    if pos.column == end.column {
        if pos.column == 0 {
            if pos.row >= end.row {
                return None;
            }
        } else {
            pos.column -= 1;
        }
    }
    (pos < end).then_some(pos)
}

/// Where the cursor goes while the end handle is dragged to `pos`. `clip`
/// keeps the bumped column inside the line.
pub fn end_drag_target(
    pos: DocPos,
    start: DocPos,
    clip: impl Fn(DocPos) -> DocPos,
) -> Option<DocPos> {
    let mut pos = pos;
    if pos.column == start.column {
        pos = clip(DocPos::new(pos.row, pos.column + 1));
    }
    (pos > start).then_some(pos)
}

impl TouchController {
    pub fn drag(&self) -> Option<&HandleDrag> {
        self.drag.as_ref()
    }

    pub(super) fn begin_drag(&mut self, kind: HandleKind) {
        self.session.stop_tracking();
        self.handle_mut(kind).set_immortal(true);
        if kind == HandleKind::Caret {
            self.scheduler.cancel(TimerSlot::CaretHide);
        }
        self.drag = Some(HandleDrag {
            kind,
            shows_menu: true,
            ended: false,
        });
        tracing::debug!(handle = ?kind, "handle drag started");
    }

    pub(super) fn drag_move(&mut self, editor: &mut dyn EditorHost, point: Point) {
        let Some(kind) = self.drag.filter(|d| !d.ended).map(|d| d.kind) else {
            return;
        };
        let line_height = editor.line_height();
        let range = editor.selection_range();
        let backwards = !range.is_empty() && editor.selection_anchor() == Some(range.end);
        let mut target = Point::new(point.x, point.y - line_height * FINGER_OFFSET_LINES);

        match kind {
            HandleKind::Caret => {
                let pos = editor.screen_to_text(target);
                editor.goto_position(pos);
                self.pump(editor);
            }
            HandleKind::RangeStart => {
                target.x = point.x + self.settings.teardrop_size;
                let end = editor.text_to_screen(range.end);
                if end.y <= target.y {
                    target.y = end.y;
                    if end.x < target.x {
                        target.x = end.x;
                    }
                }
                let pos = editor.screen_to_text(target);
                if let Some(pos) = start_drag_target(pos, range.end) {
                    if backwards {
                        editor.move_cursor_to_position(pos);
                    } else {
                        editor.set_selection_anchor(pos);
                    }
                    self.pump(editor);
                }
                self.position_range_end(editor);
            }
            HandleKind::RangeEnd => {
                let start = editor.text_to_screen(range.start);
                if start.y >= target.y {
                    target.y = start.y;
                    if start.x > target.x {
                        target.x = start.x;
                    }
                }
                let pos = editor.screen_to_text(target);
                if let Some(pos) = end_drag_target(pos, range.start, |p| editor.clip_position(p)) {
                    if backwards {
                        editor.set_selection_anchor(pos);
                    } else {
                        editor.move_cursor_to_position(pos);
                    }
                    self.pump(editor);
                }
                self.position_range_start(editor);
            }
        }

        self.scheduler.cancel(TimerSlot::DragScroll);
        let container = editor.container_rect();
        let nudge = if point.y < container.top() {
            -line_height
        } else if point.y > container.bottom() {
            line_height
        } else {
            0.0
        };
        if nudge != 0.0 {
            self.scheduler.schedule(
                TimerSlot::DragScroll,
                self.settings.drag_scroll_period(),
                Task::DragScroll { dy: nudge, point },
            );
        }

        let anchor = container.relative(point.offset(0.0, -line_height));
        self.handle_mut(kind).place(anchor);
        if let Some(drag) = self.drag.as_mut() {
            drag.shows_menu = false;
        }
        tracing::trace!(handle = ?kind, x = point.x, y = point.y, "handle drag move");
    }

    /// Edge auto-scroll tick: nudges the viewport and replays the last move.
    pub(super) fn drag_scroll(&mut self, editor: &mut dyn EditorHost, dy: f32, point: Point) {
        let top = editor.scroll_top();
        editor.set_scroll_top(top + dy);
        self.pump(editor);
        if self.drag.is_some_and(|d| !d.ended) {
            self.drag_move(editor, point);
        }
    }

    pub(super) fn end_drag(&mut self, editor: &mut dyn EditorHost) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        drag.ended = true;
        let drag = *drag;
        self.scheduler.cancel(TimerSlot::DragScroll);

        match drag.kind {
            HandleKind::Caret => self.show_caret(editor),
            kind => self.show_selection(editor, Some(kind)),
        }
        self.handle_mut(drag.kind).set_immortal(false);
        self.drag = None;
        if drag.shows_menu {
            self.show_menu(editor, drag.kind);
        }
        editor.focus();
        self.pump(editor);
        tracing::debug!(handle = ?drag.kind, tapped = drag.shows_menu, "handle drag ended");
    }

    /// Drops a drag without restoring handles, e.g. when a second touch
    /// starts before the first one ended.
    pub(super) fn abort_drag(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        self.scheduler.cancel(TimerSlot::DragScroll);
        self.handle_mut(drag.kind).set_immortal(false);
        tracing::debug!(handle = ?drag.kind, "handle drag aborted");
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/touch/drag.rs"]
mod tests;
