//! Teardrop handles: the caret drop and the two range drops.

use super::reconcile::Listener;
use super::{Task, TimerSlot, TouchController};
use crate::core::geom::{Point, Rect};
use crate::kernel::services::ports::EditorHost;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleKind {
    Caret,
    RangeStart,
    RangeEnd,
}

impl HandleKind {
    /// Hit-test priority when boxes overlap.
    pub const HIT_ORDER: [HandleKind; 3] =
        [HandleKind::RangeStart, HandleKind::RangeEnd, HandleKind::Caret];
}

/// A handle overlay. `position` is container-relative and marks the glyph
/// bottom the handle hangs from (the start drop hangs to its left).
#[derive(Debug, Clone, Serialize)]
pub struct HandleWidget {
    kind: HandleKind,
    position: Point,
    attached: bool,
    /// Set while dragged; hide and clear requests are ignored.
    immortal: bool,
}

impl HandleWidget {
    pub fn new(kind: HandleKind) -> Self {
        Self {
            kind,
            position: Point::default(),
            attached: false,
            immortal: false,
        }
    }

    pub fn kind(&self) -> HandleKind {
        self.kind
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_immortal(&self) -> bool {
        self.immortal
    }

    pub(super) fn place(&mut self, position: Point) {
        self.position = position;
        self.attached = true;
    }

    pub(super) fn detach(&mut self) -> bool {
        std::mem::replace(&mut self.attached, false)
    }

    pub(super) fn set_immortal(&mut self, immortal: bool) {
        self.immortal = immortal;
    }

    /// Page-space box of the handle. The caret drop is centered on its
    /// anchor; range drops extend to the right of it.
    pub fn bounds(&self, container: Rect, size: f32) -> Rect {
        let origin = container.absolute(self.position);
        let x = match self.kind {
            HandleKind::Caret => origin.x - size / 2.0,
            HandleKind::RangeStart | HandleKind::RangeEnd => origin.x,
        };
        Rect::new(x, origin.y, size, size)
    }
}

impl TouchController {
    pub fn handle(&self, kind: HandleKind) -> &HandleWidget {
        match kind {
            HandleKind::Caret => &self.caret,
            HandleKind::RangeStart => &self.range_start,
            HandleKind::RangeEnd => &self.range_end,
        }
    }

    pub(super) fn handle_mut(&mut self, kind: HandleKind) -> &mut HandleWidget {
        match kind {
            HandleKind::Caret => &mut self.caret,
            HandleKind::RangeStart => &mut self.range_start,
            HandleKind::RangeEnd => &mut self.range_end,
        }
    }

    pub fn handle_size(&self, kind: HandleKind) -> f32 {
        match kind {
            HandleKind::Caret => self.settings.caret_size(),
            HandleKind::RangeStart | HandleKind::RangeEnd => self.settings.teardrop_size,
        }
    }

    pub fn handle_bounds(&self, editor: &dyn EditorHost, kind: HandleKind) -> Rect {
        self.handle(kind)
            .bounds(editor.container_rect(), self.handle_size(kind))
    }

    /// First attached handle whose box strictly contains `point`.
    pub fn handle_at(&self, editor: &dyn EditorHost, point: Point) -> Option<HandleKind> {
        HandleKind::HIT_ORDER.into_iter().find(|&kind| {
            self.handle(kind).is_attached()
                && self.handle_bounds(editor, kind).contains_strict(point)
        })
    }

    /// Shows the caret drop under the cursor and arms its auto-hide.
    pub fn show_caret(&mut self, editor: &mut dyn EditorHost) {
        if !self.settings.handles_enabled() || !editor.is_focused() {
            return;
        }
        self.scheduler.cancel(TimerSlot::CaretHide);
        self.clear_selection(true);

        let container = editor.container_rect();
        let glyph = editor.text_to_screen(editor.cursor());
        let anchor = container.relative(glyph.offset(0.0, editor.line_height()));
        self.caret.place(anchor);

        self.scheduler.schedule(
            TimerSlot::CaretHide,
            self.settings.teardrop_timeout(),
            Task::HideCaret,
        );
        self.listen(Listener::Caret, true);
    }

    pub fn hide_caret(&mut self) {
        if self.caret.is_immortal() || !self.caret.is_attached() {
            return;
        }
        self.caret.detach();
        self.scheduler.cancel(TimerSlot::CaretHide);
        self.listen(Listener::Caret, false);
    }

    /// Shows both range drops; `trigger` also opens the menu next to it.
    /// Selection listeners are armed once the current dispatch finishes so
    /// the change that caused this call does not clear it again.
    pub fn show_selection(&mut self, editor: &mut dyn EditorHost, trigger: Option<HandleKind>) {
        if !self.settings.handles_enabled() {
            return;
        }
        self.hide_caret();
        self.selection_active = true;
        self.position_range_end(editor);
        self.position_range_start(editor);
        if let Some(trigger) = trigger {
            self.show_menu(editor, trigger);
        }
        self.scheduler.defer(Task::ArmSelectionListeners);
    }

    /// Removes the range drops. `clear_active` also forgets that a selection
    /// was on screen, which stops scroll-end from bringing them back.
    pub fn clear_selection(&mut self, clear_active: bool) {
        if self.range_start.is_immortal() || self.range_end.is_immortal() {
            return;
        }
        self.range_start.detach();
        self.range_end.detach();
        if clear_active {
            self.selection_active = false;
        }
        self.listen(Listener::Selection, false);
    }

    pub(super) fn position_range_start(&mut self, editor: &dyn EditorHost) {
        let container = editor.container_rect();
        let glyph = editor.text_to_screen(editor.selection_range().start);
        let size = self.settings.teardrop_size;
        let anchor = container.relative(glyph.offset(-size, editor.line_height()));
        self.range_start.place(anchor);
    }

    pub(super) fn position_range_end(&mut self, editor: &dyn EditorHost) {
        let container = editor.container_rect();
        let glyph = editor.text_to_screen(editor.selection_range().end);
        let anchor = container.relative(glyph.offset(0.0, editor.line_height()));
        self.range_end.place(anchor);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/touch/handles.rs"]
mod tests;
