//! Keeps handles and menu consistent with what the editor reports.

use super::handles::HandleKind;
use super::{Task, TimerSlot, TouchController};
use crate::core::event::EditorEvent;
use crate::kernel::effect::Effect;
use crate::kernel::services::ports::EditorHost;

/// Overlays that react to cursor and selection changes while shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    Caret,
    Selection,
    Menu,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Listeners {
    caret: bool,
    selection: bool,
    menu: bool,
}

impl Listeners {
    pub fn is_on(&self, listener: Listener) -> bool {
        match listener {
            Listener::Caret => self.caret,
            Listener::Selection => self.selection,
            Listener::Menu => self.menu,
        }
    }

    fn slot(&mut self, listener: Listener) -> &mut bool {
        match listener {
            Listener::Caret => &mut self.caret,
            Listener::Selection => &mut self.selection,
            Listener::Menu => &mut self.menu,
        }
    }
}

/// Events handled per drain before giving up on a chatty host.
const MAX_EVENTS_PER_PUMP: usize = 256;

impl TouchController {
    pub fn is_listening(&self, listener: Listener) -> bool {
        self.listeners.is_on(listener)
    }

    /// The single place subscriptions change.
    pub(super) fn listen(&mut self, listener: Listener, on: bool) {
        let slot = self.listeners.slot(listener);
        if *slot != on {
            *slot = on;
            tracing::trace!(?listener, on, "listener");
        }
    }

    /// Handles whatever the editor queued since the last drain.
    pub(super) fn pump(&mut self, editor: &mut dyn EditorHost) {
        for _ in 0..MAX_EVENTS_PER_PUMP {
            let Some(event) = editor.poll_event() else {
                return;
            };
            self.on_editor_event(editor, event);
        }
        tracing::warn!(
            limit = MAX_EVENTS_PER_PUMP,
            "editor kept emitting events, drain stopped"
        );
    }

    pub(super) fn on_editor_event(&mut self, editor: &mut dyn EditorHost, event: EditorEvent) {
        tracing::trace!(?event, "editor event");
        match event {
            EditorEvent::Change => {
                self.hide_caret();
                self.clear_selection(true);
                self.hide_menu(true);
            }
            EditorEvent::Fold => {
                if self.selection_active {
                    if self.settings.handles_enabled() {
                        self.position_range_end(editor);
                        self.position_range_start(editor);
                    }
                    self.hide_menu(true);
                    self.show_menu(editor, HandleKind::RangeEnd);
                } else {
                    self.hide_caret();
                }
            }
            EditorEvent::Scroll => {
                self.scheduler.cancel(TimerSlot::ScrollEnd);
                self.hide_caret();
                self.clear_selection(false);
                self.hide_menu(false);
                self.effects.push(Effect::DismissTooltip);
                self.scheduler.schedule(
                    TimerSlot::ScrollEnd,
                    self.settings.scroll_end_delay(),
                    Task::ScrollEnd,
                );
            }
            EditorEvent::ChangeSession => {
                let has_selection = !editor.selection_range().is_empty();
                self.selection_active = has_selection;
                self.menu.set_active(has_selection);
            }
            EditorEvent::ScrollIntoView => self.show_caret(editor),
            EditorEvent::SelectWord => self.show_selection(editor, Some(HandleKind::RangeEnd)),
            EditorEvent::Blur => {
                self.scheduler.schedule(
                    TimerSlot::BlurGrace,
                    self.settings.blur_grace(),
                    Task::BlurGrace,
                );
            }
            EditorEvent::ChangeCursor => {
                if self.is_listening(Listener::Caret) {
                    self.hide_caret();
                }
                if self.is_listening(Listener::Selection) {
                    self.clear_selection(true);
                }
                if self.is_listening(Listener::Menu) {
                    self.hide_menu(true);
                }
            }
            EditorEvent::ChangeSelection => {
                if self.is_listening(Listener::Selection) {
                    self.clear_selection(true);
                }
                if self.is_listening(Listener::Menu) {
                    self.hide_menu(true);
                }
            }
        }
    }

    /// Restores what a scroll hid once scrolling has been quiet for a while.
    pub(super) fn on_scroll_end(&mut self, editor: &mut dyn EditorHost) {
        if self.selection_active {
            self.show_selection(editor, None);
        }
        if self.menu.is_active() {
            self.show_menu(editor, HandleKind::RangeEnd);
        }
    }

    pub(super) fn on_blur_grace(&mut self, editor: &mut dyn EditorHost) {
        if editor.is_focused() {
            return;
        }
        self.hide_caret();
        self.hide_menu(true);
    }

    /// Subscribes the range drops if they are still on screen.
    pub(super) fn arm_selection_listeners(&mut self) {
        if self.range_start.is_attached() && self.range_end.is_attached() {
            self.listen(Listener::Selection, true);
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/touch/reconcile.rs"]
mod tests;
