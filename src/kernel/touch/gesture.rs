//! Touch start/move/end classification and the actions taps resolve to.

use super::handles::HandleKind;
use super::session::{GestureMode, MoveOutcome};
use super::{Task, TimerSlot, TouchController};
use crate::core::event::{ContextMenuEvent, TouchEvent};
use crate::core::geom::Point;
use crate::kernel::effect::Effect;
use crate::kernel::services::ports::EditorHost;

impl TouchController {
    pub(super) fn on_touch_start(&mut self, editor: &mut dyn EditorHost, event: TouchEvent) {
        let point = event.point;
        self.scheduler.cancel_frame();
        self.session.stop_tracking();

        if self.minimal && point.x <= self.settings.side_panel_inset_px {
            tracing::trace!(x = point.x, "touch left to the side panel");
            return;
        }
        if self.drag.is_some() {
            self.abort_drag();
        }
        if let Some(kind) = self.handle_at(editor, point) {
            self.begin_drag(kind);
            return;
        }
        if editor.region_at(point).is_structural() {
            self.move_cursor_to(editor, Point::new(0.0, point.y), false);
            return;
        }

        self.session.begin(point, event.time);
        self.scheduler.schedule(
            TimerSlot::TapWindow,
            self.settings.multi_tap_window(),
            Task::ResetTaps,
        );
        tracing::trace!(x = point.x, y = point.y, "gesture session opened");
    }

    pub(super) fn on_touch_move(&mut self, editor: &mut dyn EditorHost, event: TouchEvent) {
        if self.drag.is_some() {
            self.drag_move(editor, event.point);
            return;
        }
        let outcome = self.session.classify_move(
            event.point,
            self.settings.touch_move_threshold,
            self.settings.text_wrap,
        );
        match outcome {
            MoveOutcome::Ignored => {}
            MoveOutcome::Teardown => tracing::debug!("move after selection, session closed"),
            MoveOutcome::Scroll(delta) => {
                let applied = self.test_scroll(editor, delta);
                self.session.enter_scroll(applied);
                self.scroll(editor, applied, self.session.frozen_axis());
            }
        }
    }

    pub(super) fn on_touch_end(&mut self, editor: &mut dyn EditorHost, event: TouchEvent) {
        if self.drag.is_some() {
            self.end_drag(editor);
            return;
        }
        if !self.session.is_tracking() {
            tracing::trace!("touch end without a tracked session");
            return;
        }
        self.session.stop_tracking();

        let point = event.point;
        if self.session.mode() == GestureMode::Wait {
            let repeat = self.session.taps().last_point().is_some_and(|last| {
                editor
                    .screen_to_text(point)
                    .is_repeat_tap_of(editor.screen_to_text(last))
            });
            let mode = self.session.finish_tap(point, event.time, repeat);
            tracing::debug!(?mode, taps = self.session.taps().count(), "tap classified");
        }

        match self.session.mode() {
            GestureMode::Wait => {}
            GestureMode::Cursor if self.minimal => {
                self.move_cursor_to(editor, point, false);
                self.effects.push(Effect::Click);
            }
            GestureMode::Cursor => {
                self.move_cursor_to(editor, point, event.shift);
                if event.shift {
                    self.show_selection(editor, Some(HandleKind::RangeEnd));
                } else {
                    self.show_caret(editor);
                }
            }
            GestureMode::Scroll => {
                let delta = self.session.delta();
                self.scroll_animation(editor, delta);
            }
            GestureMode::Selection => {
                if self.minimal {
                    return;
                }
                self.move_cursor_to(editor, point, false);
                self.select_word(editor);
                self.vibrate();
            }
            GestureMode::SelectLine => {
                if self.minimal {
                    return;
                }
                self.move_cursor_to(editor, point, false);
                editor.select_line();
                self.pump(editor);
                self.show_selection(editor, Some(HandleKind::RangeEnd));
                self.vibrate();
            }
        }
    }

    pub(super) fn on_context_menu(&mut self, editor: &mut dyn EditorHost, event: ContextMenuEvent) {
        if self.minimal {
            return;
        }
        self.session.stop_tracking();
        self.session.set_mode(GestureMode::Selection);
        self.move_cursor_to(editor, event.point, false);
        if !self.select_word(editor) {
            // No word here: drops on the caret with the no-selection items.
            self.show_selection(editor, Some(HandleKind::RangeEnd));
        }
        tracing::debug!(x = event.point.x, y = event.point.y, "long press selection");
    }

    /// Places the caret at a screen point, or extends the selection to it.
    pub fn move_cursor_to(&mut self, editor: &mut dyn EditorHost, point: Point, extend: bool) {
        let pos = editor.screen_to_text(point);
        editor.blur();
        if extend {
            let anchor = editor.selection_anchor().unwrap_or_else(|| editor.cursor());
            editor.select_between(anchor, pos);
        } else {
            editor.move_to_position(pos);
        }
        editor.focus();
        self.pump(editor);
        self.effects.push(Effect::DismissTooltip);
    }

    /// Selects the word around the cursor. Returns whether there was one.
    pub fn select_word(&mut self, editor: &mut dyn EditorHost) -> bool {
        self.session.stop_tracking();
        let Some(range) = editor.word_range().filter(|r| !r.is_empty()) else {
            return false;
        };
        editor.blur();
        editor.set_selection_range(range);
        editor.focus();
        self.pump(editor);
        self.show_selection(editor, Some(HandleKind::RangeEnd));
        true
    }

    fn vibrate(&mut self) {
        if self.settings.vibrate_on_tap {
            self.effects.push(Effect::Vibrate {
                ms: self.settings.vibration_ms,
            });
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/touch/gesture.rs"]
mod tests;
