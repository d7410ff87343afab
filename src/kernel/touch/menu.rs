//! Floating context menu: item filtering and placement inside the container.

use super::handles::HandleKind;
use super::reconcile::Listener;
use super::TouchController;
use crate::core::geom::{Point, Rect};
use crate::kernel::services::ports::{EditorHost, MenuMetrics};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

/// Vertical distance, in lines, between a touch or glyph and what is placed
/// for it so the finger does not cover it.
pub const FINGER_OFFSET_LINES: f32 = 1.8;

const SCALE_STEP: f32 = 0.1;
/// Shrinking stops at 0.1.
const MAX_SHRINK_STEPS: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuCommand {
    Copy,
    Cut,
    Paste,
    SelectAll,
}

/// When an item is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemMode {
    /// Only with selected text.
    Selected,
    Always,
    /// Only without selected text.
    NoSelection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub command: MenuCommand,
    pub label: CompactString,
    pub mode: ItemMode,
    /// Offered on read-only documents.
    pub read_only: bool,
}

impl MenuItem {
    pub fn new(command: MenuCommand, label: &str, mode: ItemMode, read_only: bool) -> Self {
        Self {
            command,
            label: CompactString::new(label),
            mode,
            read_only,
        }
    }

    pub fn is_offered(&self, read_only: bool, has_text: bool) -> bool {
        if read_only && !self.read_only {
            return false;
        }
        match self.mode {
            ItemMode::Selected => has_text,
            ItemMode::Always => true,
            ItemMode::NoSelection => !has_text,
        }
    }
}

pub fn default_items() -> Vec<MenuItem> {
    vec![
        MenuItem::new(MenuCommand::Copy, "copy", ItemMode::Selected, true),
        MenuItem::new(MenuCommand::Cut, "cut", ItemMode::Selected, false),
        MenuItem::new(MenuCommand::Paste, "paste", ItemMode::Always, false),
        MenuItem::new(MenuCommand::SelectAll, "select all", ItemMode::NoSelection, true),
    ]
}

pub fn filter_items(catalog: &[MenuItem], read_only: bool, has_text: bool) -> Vec<MenuItem> {
    catalog
        .iter()
        .filter(|item| item.is_offered(read_only, has_text))
        .cloned()
        .collect()
}

/// The menu overlay. `position` is the container-relative top-left of the
/// unscaled box; scaling happens around its center.
#[derive(Debug, Clone, Serialize)]
pub struct ContextMenu {
    position: Point,
    scale: f32,
    #[serde(skip)]
    shrink_steps: u8,
    /// The menu should come back after a transient hide.
    active: bool,
    attached: bool,
    items: Vec<MenuItem>,
}

impl Default for ContextMenu {
    fn default() -> Self {
        Self {
            position: Point::default(),
            scale: 1.0,
            shrink_steps: 0,
            active: false,
            attached: false,
            items: Vec::new(),
        }
    }
}

impl ContextMenu {
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn commands(&self) -> Vec<MenuCommand> {
        self.items.iter().map(|item| item.command).collect()
    }

    pub(super) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub(super) fn open(&mut self, position: Point, items: Vec<MenuItem>) {
        self.position = position;
        self.scale = 1.0;
        self.shrink_steps = 0;
        self.items = items;
        self.attached = true;
    }

    pub(super) fn detach(&mut self) -> bool {
        std::mem::replace(&mut self.attached, false)
    }

    /// Unscaled width and height.
    pub fn size(&self, metrics: &MenuMetrics) -> (f32, f32) {
        if self.items.is_empty() {
            return (0.0, 0.0);
        }
        let width = self
            .items
            .iter()
            .map(|item| {
                item.label.width() as f32 * metrics.glyph_width + 2.0 * metrics.item_padding
            })
            .sum();
        (width, metrics.item_height)
    }

    /// Container-relative box after scaling.
    pub fn bounds(&self, metrics: &MenuMetrics) -> Rect {
        let (w, h) = self.size(metrics);
        Rect::new(self.position.x, self.position.y, w, h).scaled(self.scale)
    }

    fn shift_x(&mut self, dx: f32) {
        self.position.x += dx;
    }

    fn shrink(&mut self) -> bool {
        if self.shrink_steps >= MAX_SHRINK_STEPS {
            return false;
        }
        self.shrink_steps += 1;
        self.scale = 1.0 - SCALE_STEP * f32::from(self.shrink_steps);
        true
    }
}

impl TouchController {
    pub fn menu(&self) -> &ContextMenu {
        &self.menu
    }

    /// Opens the menu under the `trigger` handle with the items that apply
    /// to the current selection.
    pub fn show_menu(&mut self, editor: &mut dyn EditorHost, trigger: HandleKind) {
        if self.minimal {
            return;
        }
        self.menu.set_active(true);

        let container = editor.container_rect();
        let trigger_box = self.handle_bounds(editor, trigger);
        let anchor = container.relative(Point::new(trigger_box.left(), trigger_box.bottom()));
        let has_text = !editor.copy_text().is_empty();
        let items = filter_items(&self.menu_catalog, editor.is_read_only(), has_text);
        self.menu.open(anchor, items);

        self.position_menu(editor, trigger);
        self.listen(Listener::Menu, true);
    }

    /// Pulls the menu back inside the container, shrinking it when it is
    /// wider than the space between the margins, and flips it above the
    /// selection when it would hang below the bottom edge.
    pub fn position_menu(&mut self, editor: &dyn EditorHost, trigger: HandleKind) {
        let metrics = self.settings.menu;
        let container = editor.container_rect();
        let margin = metrics.margin;

        let fits = loop {
            let bounds = self.menu.bounds(&metrics);
            if bounds.right() + margin > container.w {
                self.menu.shift_x(container.w - margin - bounds.right());
            }
            let bounds = self.menu.bounds(&metrics);
            if bounds.left() - margin < 0.0 {
                self.menu.shift_x(margin - bounds.left());
            }

            let bounds = self.menu.bounds(&metrics);
            if bounds.left() >= 0.0 && bounds.right() <= container.w {
                break true;
            }
            if !self.menu.shrink() {
                tracing::debug!(
                    scale = self.menu.scale,
                    "menu wider than container at minimum scale"
                );
                break false;
            }
        };

        if fits && self.menu.bounds(&metrics).bottom() > container.h {
            let range = editor.selection_range();
            let pos = match trigger {
                HandleKind::RangeStart => range.start,
                HandleKind::Caret | HandleKind::RangeEnd => range.end,
            };
            let glyph = editor.text_to_screen(pos);
            let top = glyph.y - editor.line_height() * FINGER_OFFSET_LINES;
            self.menu.position.y = container.relative(Point::new(glyph.x, top)).y;
        }
    }

    /// Removes the menu. `clear_active` also stops scroll-end from
    /// reopening it.
    pub fn hide_menu(&mut self, clear_active: bool) {
        if !self.menu.detach() {
            return;
        }
        self.listen(Listener::Menu, false);
        if clear_active {
            self.menu.set_active(false);
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/touch/menu.rs"]
mod tests;
