use super::geom::Point;
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    Start,
    Move,
    End,
}

/// One platform touch callback, reduced to the primary finger.
#[derive(Debug, Clone, Copy)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub point: Point,
    pub time: Instant,
    /// State of the soft or hardware shift modifier at delivery time.
    pub shift: bool,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, point: Point, time: Instant) -> Self {
        Self {
            phase,
            point,
            time,
            shift: false,
        }
    }

    pub fn start(point: Point, time: Instant) -> Self {
        Self::new(TouchPhase::Start, point, time)
    }

    pub fn moved(point: Point, time: Instant) -> Self {
        Self::new(TouchPhase::Move, point, time)
    }

    pub fn end(point: Point, time: Instant) -> Self {
        Self::new(TouchPhase::End, point, time)
    }

    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    pub fn is_start(&self) -> bool {
        matches!(self.phase, TouchPhase::Start)
    }

    pub fn is_end(&self) -> bool {
        matches!(self.phase, TouchPhase::End)
    }
}

/// Long-press delivered by the platform on the scroll surface.
#[derive(Debug, Clone, Copy)]
pub struct ContextMenuEvent {
    pub point: Point,
    pub time: Instant,
}

impl ContextMenuEvent {
    pub fn new(point: Point, time: Instant) -> Self {
        Self { point, time }
    }
}

/// Lifecycle notifications published by the host editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorEvent {
    Change,
    Fold,
    Scroll,
    ChangeSession,
    ScrollIntoView,
    SelectWord,
    Blur,
    ChangeCursor,
    ChangeSelection,
}

impl EditorEvent {
    /// Events that only reach subscribed listeners.
    pub fn is_selection_signal(&self) -> bool {
        matches!(self, EditorEvent::ChangeCursor | EditorEvent::ChangeSelection)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/event.rs"]
mod tests;
