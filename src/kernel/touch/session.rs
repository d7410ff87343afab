//! Per-touch gesture state and the pure parts of classification.

use crate::core::geom::Point;
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GestureMode {
    #[default]
    Wait,
    Cursor,
    Selection,
    SelectLine,
    Scroll,
}

impl GestureMode {
    pub fn for_tap_count(count: u32) -> Self {
        match count {
            0 | 1 => GestureMode::Cursor,
            2 => GestureMode::Selection,
            _ => GestureMode::SelectLine,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Delta {
    pub dx: f32,
    pub dy: f32,
}

impl Delta {
    pub const ZERO: Delta = Delta { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct TapCounter {
    count: u32,
    last_tap: Option<(Point, Instant)>,
}

impl TapCounter {
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn last_point(&self) -> Option<Point> {
        self.last_tap.map(|(p, _)| p)
    }

    pub fn last_time(&self) -> Option<Instant> {
        self.last_tap.map(|(_, t)| t)
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.last_tap = None;
    }

    /// Counts a release; `repeat` says it landed on the previous tap.
    pub fn register(&mut self, point: Point, at: Instant, repeat: bool) -> u32 {
        self.count = if repeat && self.last_tap.is_some() {
            self.count.saturating_add(1)
        } else {
            1
        };
        self.last_tap = Some((point, at));
        self.count
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    Ignored,
    /// The session gave up tracking; the move belongs to another gesture.
    Teardown,
    Scroll(Delta),
}

/// Everything one touch-start..touch-end cycle needs, plus the tap history
/// that spans cycles.
#[derive(Debug, Clone, Default)]
pub struct GestureSession {
    start: Point,
    last: Point,
    delta: Delta,
    frozen: Option<Axis>,
    mode: GestureMode,
    tracking: bool,
    started_at: Option<Instant>,
    taps: TapCounter,
}

impl GestureSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new session. The tap history is kept.
    pub fn begin(&mut self, point: Point, at: Instant) {
        self.start = point;
        self.last = point;
        self.delta = Delta::ZERO;
        self.frozen = None;
        self.mode = GestureMode::Wait;
        self.tracking = true;
        self.started_at = Some(at);
    }

    pub fn stop_tracking(&mut self) {
        self.tracking = false;
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: GestureMode) {
        self.mode = mode;
    }

    pub fn start_point(&self) -> Point {
        self.start
    }

    pub fn last_point(&self) -> Point {
        self.last
    }

    /// Latest thresholded (and extent-clamped once scrolling) delta.
    pub fn delta(&self) -> Delta {
        self.delta
    }

    pub fn frozen_axis(&self) -> Option<Axis> {
        self.frozen
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn taps(&self) -> &TapCounter {
        &self.taps
    }

    pub fn reset_taps(&mut self) {
        self.taps.reset();
    }

    /// Turns a move into a scroll delta, locking an axis on the first real
    /// movement and dropping jitter below `threshold`.
    pub fn classify_move(&mut self, point: Point, threshold: f32, text_wrap: bool) -> MoveOutcome {
        if !self.tracking {
            return MoveOutcome::Ignored;
        }
        if self.mode == GestureMode::Selection {
            self.tracking = false;
            return MoveOutcome::Teardown;
        }

        let mut dx = point.x - self.last.x;
        let mut dy = point.y - self.last.y;
        if dx == 0.0 && dy == 0.0 {
            return MoveOutcome::Ignored;
        }

        if self.frozen.is_none() {
            // Horizontal intent freezes the vertical axis and vice versa.
            self.frozen = Some(if dx.abs() > dy.abs() { Axis::Y } else { Axis::X });
        }
        self.last = point;

        if text_wrap || dx.abs() < threshold {
            dx = 0.0;
        }
        if dy.abs() < threshold {
            dy = 0.0;
        }

        self.delta = Delta::new(dx, dy);
        if self.delta.is_zero() {
            return MoveOutcome::Ignored;
        }
        MoveOutcome::Scroll(self.delta)
    }

    /// Records the delta actually applied and switches to scrolling.
    pub fn enter_scroll(&mut self, applied: Delta) {
        self.delta = applied;
        self.mode = GestureMode::Scroll;
    }

    /// Classifies a release in `Wait` mode.
    pub fn finish_tap(&mut self, point: Point, at: Instant, repeat: bool) -> GestureMode {
        let count = self.taps.register(point, at, repeat);
        self.mode = GestureMode::for_tap_count(count);
        self.mode
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/touch/session.rs"]
mod tests;
