//! Finger-driven scrolling and the release flick.

use super::session::{Axis, Delta};
use super::{Task, TouchController};
use crate::kernel::services::ports::EditorHost;

/// Viewport offsets and their upper limits.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollExtents {
    pub left: f32,
    pub top: f32,
    pub max_left: f32,
    pub max_top: f32,
}

impl ScrollExtents {
    pub fn of(editor: &dyn EditorHost) -> Self {
        Self {
            left: editor.scroll_left(),
            top: editor.scroll_top(),
            max_left: editor.max_scroll_left(),
            max_top: editor.max_scroll_top(),
        }
    }
}

/// Zeroes each component of a finger delta whose scroll direction is
/// already at its extreme.
pub fn clamp_to_extents(delta: Delta, reverse: bool, extents: ScrollExtents) -> Delta {
    // A finger moving down pulls earlier content in, unless reversed.
    let toward_top = (delta.dy > 0.0) != reverse;
    let toward_left = (delta.dx > 0.0) != reverse;

    let blocked_y = if toward_top {
        extents.top <= 0.0
    } else {
        extents.top >= extents.max_top
    };
    let blocked_x = if toward_left {
        extents.left <= 0.0
    } else {
        extents.left >= extents.max_left
    };

    Delta::new(
        if blocked_x { 0.0 } else { delta.dx },
        if blocked_y { 0.0 } else { delta.dy },
    )
}

/// One flick step: `remaining * speed`, truncated to hundredths.
pub fn flick_step(remaining: f32, speed: f32) -> f32 {
    ((f64::from(remaining) * f64::from(speed) * 100.0).trunc() / 100.0) as f32
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flick {
    pub remaining: Delta,
    pub frozen: Option<Axis>,
}

impl TouchController {
    /// Scrolls the viewport against the finger direction.
    pub fn scroll(&mut self, editor: &mut dyn EditorHost, delta: Delta, frozen: Option<Axis>) {
        let sign = if self.settings.reverse_scrolling { 1.0 } else { -1.0 };
        let mut dx = sign * delta.dx;
        let mut dy = sign * delta.dy;
        if !self.settings.diagonal_scrolling {
            match frozen {
                Some(Axis::X) => dx = 0.0,
                _ => dy = 0.0,
            }
        }
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        editor.scroll_by(dx, dy);
        self.pump(editor);
    }

    pub fn test_scroll(&self, editor: &dyn EditorHost, delta: Delta) -> Delta {
        clamp_to_extents(delta, self.settings.reverse_scrolling, ScrollExtents::of(editor))
    }

    /// Starts the inertial glide after a scrolling touch is released.
    pub fn scroll_animation(&mut self, editor: &mut dyn EditorHost, delta: Delta) {
        let frozen = self.session.frozen_axis();
        self.flick_frame(
            editor,
            Flick {
                remaining: delta,
                frozen,
            },
        );
    }

    pub(super) fn flick_frame(&mut self, editor: &mut dyn EditorHost, flick: Flick) {
        let speed = self.settings.scroll_speed;
        let mut remaining = flick.remaining;
        let mut step = Delta::new(
            flick_step(remaining.dx, speed),
            flick_step(remaining.dy, speed),
        );

        let allowed = self.test_scroll(editor, remaining);
        if allowed.dx == 0.0 {
            remaining.dx = 0.0;
            step.dx = 0.0;
        }
        if allowed.dy == 0.0 {
            remaining.dy = 0.0;
            step.dy = 0.0;
        }

        if step.is_zero() {
            self.scheduler.cancel_frame();
            tracing::trace!("flick settled");
            return;
        }

        self.scroll(editor, step, flick.frozen);
        remaining.dx -= step.dx;
        remaining.dy -= step.dy;
        tracing::trace!(dx = step.dx, dy = step.dy, "flick frame");
        self.scheduler.request_frame(Task::Flick(Flick {
            remaining,
            frozen: flick.frozen,
        }));
    }

    pub fn wants_animation_frame(&self) -> bool {
        self.scheduler.has_frame()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/touch/scroll.rs"]
mod tests;
