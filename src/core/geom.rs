//! Screen and document coordinates.
//!
//! Screen values are page pixels as reported by the host (the same space the
//! touch events use). Container-relative values are produced by
//! [`Rect::relative`].

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Hit test that excludes every edge, so zero-sized boxes never match.
    pub fn contains_strict(&self, p: Point) -> bool {
        p.x > self.x && p.x < self.right() && p.y > self.y && p.y < self.bottom()
    }

    /// Converts a page point into this rect's local space.
    pub fn relative(&self, p: Point) -> Point {
        Point::new(p.x - self.x, p.y - self.y)
    }

    /// Inverse of [`Rect::relative`].
    pub fn absolute(&self, p: Point) -> Point {
        Point::new(p.x + self.x, p.y + self.y)
    }

    /// Scales around the center.
    pub fn scaled(&self, scale: f32) -> Rect {
        let w = self.w * scale;
        let h = self.h * scale;
        Rect::new(
            self.x + (self.w - w) / 2.0,
            self.y + (self.h - h) / 2.0,
            w,
            h,
        )
    }
}

/// A position in the document, zero based.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct DocPos {
    pub row: usize,
    pub column: usize,
}

impl DocPos {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Same row and at most two columns apart. Rows are compared strictly,
    /// columns tolerate finger drift.
    pub fn is_repeat_tap_of(&self, other: DocPos) -> bool {
        self.row == other.row && self.column.abs_diff(other.column) <= 2
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocRange {
    pub start: DocPos,
    pub end: DocPos,
}

impl DocRange {
    pub fn new(start: DocPos, end: DocPos) -> Self {
        Self { start, end }
    }

    /// Orders the two ends.
    pub fn between(a: DocPos, b: DocPos) -> Self {
        if a <= b {
            Self::new(a, b)
        } else {
            Self::new(b, a)
        }
    }

    pub fn collapsed(pos: DocPos) -> Self {
        Self::new(pos, pos)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/geom.rs"]
mod tests;
