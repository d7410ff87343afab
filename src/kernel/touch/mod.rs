//! Touch controller: turns raw touches into caret moves, selections and
//! scrolling, and keeps the teardrop handles and context menu in sync with
//! the editor.
//!
//! Every entry point takes the current time. Timers due by then fire first,
//! then the input is handled, editor events are drained, and deferred tasks
//! run last. Nothing runs between entry points.

mod drag;
mod gesture;
mod handles;
mod menu;
mod reconcile;
mod scroll;
mod session;

pub use drag::{end_drag_target, start_drag_target, HandleDrag};
pub use handles::{HandleKind, HandleWidget};
pub use menu::{
    default_items, filter_items, ContextMenu, ItemMode, MenuCommand, MenuItem,
    FINGER_OFFSET_LINES,
};
pub use reconcile::{Listener, Listeners};
pub use scroll::{clamp_to_extents, flick_step, Flick, ScrollExtents};
pub use session::{Axis, Delta, GestureMode, GestureSession, MoveOutcome, TapCounter};

use crate::core::event::{ContextMenuEvent, EditorEvent, TouchEvent, TouchPhase};
use crate::core::geom::Point;
use crate::core::scheduler::Scheduler;
use crate::kernel::effect::Effect;
use crate::kernel::services::ports::{EditorHost, SettingChange, TouchSettings};
use std::time::Instant;

/// Named single-instance timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum TimerSlot {
    TapWindow,
    CaretHide,
    ScrollEnd,
    BlurGrace,
    DragScroll,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Task {
    ResetTaps,
    HideCaret,
    ArmSelectionListeners,
    ScrollEnd,
    BlurGrace,
    DragScroll { dy: f32, point: Point },
    Flick(Flick),
}

#[derive(Debug)]
pub struct TouchController {
    settings: TouchSettings,
    minimal: bool,
    attached: bool,
    session: GestureSession,
    caret: HandleWidget,
    range_start: HandleWidget,
    range_end: HandleWidget,
    menu: ContextMenu,
    menu_catalog: Vec<MenuItem>,
    drag: Option<HandleDrag>,
    listeners: Listeners,
    /// A selection is on screen and should come back after a scroll.
    selection_active: bool,
    scheduler: Scheduler<TimerSlot, Task>,
    effects: Vec<Effect>,
}

impl TouchController {
    /// `minimal` builds the reduced controller for read-only viewers.
    pub fn new(settings: TouchSettings, minimal: bool, now: Instant) -> Self {
        let settings = if minimal {
            settings.minimal()
        } else {
            settings
        }
        .sanitized();
        tracing::debug!(minimal, "touch controller attached");
        Self {
            settings,
            minimal,
            attached: true,
            session: GestureSession::new(),
            caret: HandleWidget::new(HandleKind::Caret),
            range_start: HandleWidget::new(HandleKind::RangeStart),
            range_end: HandleWidget::new(HandleKind::RangeEnd),
            menu: ContextMenu::default(),
            menu_catalog: default_items(),
            drag: None,
            listeners: Listeners::default(),
            selection_active: false,
            scheduler: Scheduler::new(now),
            effects: Vec::new(),
        }
    }

    pub fn with_menu_items(mut self, items: Vec<MenuItem>) -> Self {
        self.menu_catalog = items;
        self
    }

    pub fn settings(&self) -> &TouchSettings {
        &self.settings
    }

    pub fn is_minimal(&self) -> bool {
        self.minimal
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    pub fn is_selection_active(&self) -> bool {
        self.selection_active
    }

    pub fn is_menu_active(&self) -> bool {
        self.menu.is_active()
    }

    pub fn set_selection_active(&mut self, active: bool) {
        self.selection_active = active;
    }

    pub fn set_menu_active(&mut self, active: bool) {
        self.menu.set_active(active);
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_timers()
    }

    pub fn now(&self) -> Instant {
        self.scheduler.now()
    }

    /// Side signals produced since the last call.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn handle_touch(&mut self, editor: &mut dyn EditorHost, event: TouchEvent) {
        if !self.enter(editor, event.time) {
            return;
        }
        match event.phase {
            TouchPhase::Start => self.on_touch_start(editor, event),
            TouchPhase::Move => self.on_touch_move(editor, event),
            TouchPhase::End => self.on_touch_end(editor, event),
        }
        self.settle(editor);
    }

    pub fn touch_start(&mut self, editor: &mut dyn EditorHost, point: Point, now: Instant) {
        self.handle_touch(editor, TouchEvent::start(point, now));
    }

    pub fn touch_move(&mut self, editor: &mut dyn EditorHost, point: Point, now: Instant) {
        self.handle_touch(editor, TouchEvent::moved(point, now));
    }

    pub fn touch_end(
        &mut self,
        editor: &mut dyn EditorHost,
        point: Point,
        shift: bool,
        now: Instant,
    ) {
        self.handle_touch(editor, TouchEvent::end(point, now).with_shift(shift));
    }

    pub fn context_menu(&mut self, editor: &mut dyn EditorHost, event: ContextMenuEvent) {
        if !self.enter(editor, event.time) {
            return;
        }
        self.on_context_menu(editor, event);
        self.settle(editor);
    }

    /// Drains events the editor published on its own (typing, folding,
    /// programmatic scrolls).
    pub fn sync_editor(&mut self, editor: &mut dyn EditorHost, now: Instant) {
        if !self.enter(editor, now) {
            return;
        }
        self.settle(editor);
    }

    /// Delivers one event directly, as an editor listener callback would.
    pub fn editor_event(&mut self, editor: &mut dyn EditorHost, event: EditorEvent, now: Instant) {
        if !self.enter(editor, now) {
            return;
        }
        self.on_editor_event(editor, event);
        self.settle(editor);
    }

    /// Fires timers due by `now`.
    pub fn tick(&mut self, editor: &mut dyn EditorHost, now: Instant) {
        if !self.enter(editor, now) {
            return;
        }
        self.settle(editor);
    }

    pub fn animation_frame(&mut self, editor: &mut dyn EditorHost, now: Instant) {
        if !self.enter(editor, now) {
            return;
        }
        if let Some(task) = self.scheduler.take_frame() {
            self.run_task(editor, task);
        }
        self.settle(editor);
    }

    pub fn update_setting(
        &mut self,
        editor: &mut dyn EditorHost,
        change: SettingChange,
        now: Instant,
    ) {
        if !self.enter(editor, now) {
            return;
        }
        if self.minimal {
            tracing::debug!(?change, "setting ignored by minimal controller");
            return;
        }
        self.settings.apply(change);
        if let SettingChange::TextWrap(_) = change {
            self.on_editor_event(editor, EditorEvent::Change);
        }
        tracing::debug!(?change, "setting updated");
        self.settle(editor);
    }

    /// Tears everything down; later calls are ignored.
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        self.scheduler.clear();
        self.drag = None;
        self.session.stop_tracking();
        for kind in HandleKind::HIT_ORDER {
            let handle = self.handle_mut(kind);
            handle.set_immortal(false);
            handle.detach();
        }
        self.menu.detach();
        self.menu.set_active(false);
        self.selection_active = false;
        self.listeners = Listeners::default();
        tracing::debug!("touch controller detached");
    }

    /// Common prologue: flushes leftovers and fires timers due by `now`.
    fn enter(&mut self, editor: &mut dyn EditorHost, now: Instant) -> bool {
        if !self.attached {
            tracing::trace!("call on detached touch controller");
            return false;
        }
        self.settle(editor);
        while let Some(task) = self.scheduler.pop_due(now) {
            self.run_task(editor, task);
            self.settle(editor);
        }
        self.scheduler.advance_to(now);
        true
    }

    /// Drains editor events and deferred tasks until both are empty.
    fn settle(&mut self, editor: &mut dyn EditorHost) {
        loop {
            self.pump(editor);
            match self.scheduler.pop_deferred() {
                Some(task) => self.run_task(editor, task),
                None => break,
            }
        }
    }

    fn run_task(&mut self, editor: &mut dyn EditorHost, task: Task) {
        match task {
            Task::ResetTaps => self.session.reset_taps(),
            Task::HideCaret => {
                self.hide_caret();
                self.hide_menu(true);
            }
            Task::ArmSelectionListeners => self.arm_selection_listeners(),
            Task::ScrollEnd => self.on_scroll_end(editor),
            Task::BlurGrace => self.on_blur_grace(editor),
            Task::DragScroll { dy, point } => self.drag_scroll(editor, dy, point),
            Task::Flick(flick) => self.flick_frame(editor, flick),
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/touch/controller.rs"]
mod tests;
