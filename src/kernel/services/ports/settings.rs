use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Snapshot of the gesture-related app settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchSettings {
    pub diagonal_scrolling: bool,
    pub reverse_scrolling: bool,
    /// Edge length of a range teardrop in pixels. Zero disables handles.
    pub teardrop_size: f32,
    pub teardrop_timeout_ms: u64,
    /// Fraction of the remaining flick applied per animation frame.
    pub scroll_speed: f32,
    pub touch_move_threshold: f32,
    pub text_wrap: bool,
    pub vibrate_on_tap: bool,
    pub vibration_ms: u64,
    pub multi_tap_ms: u64,
    /// Left inset reserved for the side panel slide gesture.
    pub side_panel_inset_px: f32,
    pub scroll_end_ms: u64,
    pub blur_grace_ms: u64,
    pub drag_scroll_ms: u64,
    pub menu: MenuMetrics,
}

impl Default for TouchSettings {
    fn default() -> Self {
        Self {
            diagonal_scrolling: false,
            reverse_scrolling: false,
            teardrop_size: 30.0,
            teardrop_timeout_ms: 3000,
            scroll_speed: 0.5,
            touch_move_threshold: 1.0,
            text_wrap: false,
            vibrate_on_tap: true,
            vibration_ms: 30,
            multi_tap_ms: 500,
            side_panel_inset_px: 20.0,
            scroll_end_ms: 100,
            blur_grace_ms: 100,
            drag_scroll_ms: 100,
            menu: MenuMetrics::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuMetrics {
    /// Distance kept between the menu and the container's side edges.
    pub margin: f32,
    pub glyph_width: f32,
    pub item_padding: f32,
    pub item_height: f32,
}

impl Default for MenuMetrics {
    fn default() -> Self {
        Self {
            margin: 10.0,
            glyph_width: 8.0,
            item_padding: 12.0,
            item_height: 40.0,
        }
    }
}

/// A live settings update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "setting", content = "value", rename_all = "snake_case")]
pub enum SettingChange {
    DiagonalScrolling(bool),
    ReverseScrolling(bool),
    TeardropSize(f32),
    ScrollSpeed(f32),
    TouchMoveThreshold(f32),
    TextWrap(bool),
}

pub const MIN_SCROLL_SPEED: f32 = 0.01;
pub const MAX_SCROLL_SPEED: f32 = 0.99;
/// Auto-scroll re-arms itself from its own callback and needs a non-zero period.
pub const MIN_DRAG_SCROLL_MS: u64 = 1;

impl TouchSettings {
    /// Profile for read-only viewer surfaces: no handles, no menu, plain
    /// axis-locked scrolling.
    pub fn minimal(mut self) -> Self {
        self.diagonal_scrolling = false;
        self.reverse_scrolling = false;
        self.teardrop_size = 0.0;
        self
    }

    /// Clamps values the controller cannot work with.
    pub fn sanitized(mut self) -> Self {
        if !self.scroll_speed.is_finite() {
            self.scroll_speed = Self::default().scroll_speed;
        }
        self.scroll_speed = self.scroll_speed.clamp(MIN_SCROLL_SPEED, MAX_SCROLL_SPEED);
        if !self.teardrop_size.is_finite() || self.teardrop_size < 0.0 {
            self.teardrop_size = 0.0;
        }
        if !self.touch_move_threshold.is_finite() || self.touch_move_threshold < 0.0 {
            self.touch_move_threshold = 0.0;
        }
        self.drag_scroll_ms = self.drag_scroll_ms.max(MIN_DRAG_SCROLL_MS);
        self
    }

    pub fn apply(&mut self, change: SettingChange) {
        match change {
            SettingChange::DiagonalScrolling(v) => self.diagonal_scrolling = v,
            SettingChange::ReverseScrolling(v) => self.reverse_scrolling = v,
            SettingChange::TeardropSize(v) => self.teardrop_size = v,
            SettingChange::ScrollSpeed(v) => self.scroll_speed = v,
            SettingChange::TouchMoveThreshold(v) => self.touch_move_threshold = v,
            SettingChange::TextWrap(v) => self.text_wrap = v,
        }
        *self = std::mem::take(self).sanitized();
    }

    pub fn handles_enabled(&self) -> bool {
        self.teardrop_size > 0.0
    }

    /// The caret teardrop is a rotated square, so its box is the diagonal.
    pub fn caret_size(&self) -> f32 {
        (self.teardrop_size * self.teardrop_size * 2.0).sqrt()
    }

    pub fn teardrop_timeout(&self) -> Duration {
        Duration::from_millis(self.teardrop_timeout_ms)
    }

    pub fn multi_tap_window(&self) -> Duration {
        Duration::from_millis(self.multi_tap_ms)
    }

    pub fn scroll_end_delay(&self) -> Duration {
        Duration::from_millis(self.scroll_end_ms)
    }

    pub fn blur_grace(&self) -> Duration {
        Duration::from_millis(self.blur_grace_ms)
    }

    pub fn drag_scroll_period(&self) -> Duration {
        Duration::from_millis(self.drag_scroll_ms)
    }
}
