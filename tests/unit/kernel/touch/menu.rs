use super::*;
use crate::core::geom::{DocPos, DocRange};
use crate::kernel::services::adapters::MemoryEditor;
use crate::kernel::services::ports::TouchSettings;
use std::time::Instant;

const TEXT: &str = "fn main() {\n    let alpha = 1;\n    let beta = 2;\n}\n";

fn setup(container: Rect) -> (TouchController, MemoryEditor) {
    let ctl = TouchController::new(TouchSettings::default(), false, Instant::now());
    let mut ed = MemoryEditor::new(TEXT).with_container(container);
    ed.set_selection_range(DocRange::new(DocPos::new(1, 4), DocPos::new(1, 7)));
    ed.clear_events();
    (ctl, ed)
}

fn commands(items: &[MenuItem]) -> Vec<MenuCommand> {
    items.iter().map(|item| item.command).collect()
}

#[test]
fn items_follow_selection_and_read_only() {
    let catalog = default_items();
    assert_eq!(
        commands(&filter_items(&catalog, false, true)),
        vec![MenuCommand::Copy, MenuCommand::Cut, MenuCommand::Paste]
    );
    assert_eq!(
        commands(&filter_items(&catalog, false, false)),
        vec![MenuCommand::Paste, MenuCommand::SelectAll]
    );
    assert_eq!(
        commands(&filter_items(&catalog, true, true)),
        vec![MenuCommand::Copy]
    );
    assert_eq!(
        commands(&filter_items(&catalog, true, false)),
        vec![MenuCommand::SelectAll]
    );
}

#[test]
fn size_is_measured_from_labels() {
    let mut menu = ContextMenu::default();
    assert_eq!(menu.size(&MenuMetrics::default()), (0.0, 0.0));

    menu.open(
        Point::default(),
        vec![
            MenuItem::new(MenuCommand::Copy, "copy", ItemMode::Selected, true),
            MenuItem::new(MenuCommand::Paste, "貼り付け", ItemMode::Always, false),
        ],
    );
    // "copy" is 4 cells, the CJK label 8 cells.
    let expected = (4.0 * 8.0 + 24.0) + (8.0 * 8.0 + 24.0);
    assert_eq!(menu.size(&MenuMetrics::default()), (expected, 40.0));
}

#[test]
fn show_menu_opens_under_the_trigger() {
    let (mut ctl, mut ed) = setup(Rect::new(0.0, 0.0, 360.0, 640.0));
    ctl.range_end.place(Point::new(110.0, 40.0));

    ctl.show_menu(&mut ed, HandleKind::RangeEnd);

    let menu = ctl.menu();
    assert!(menu.is_attached());
    assert!(menu.is_active());
    assert_eq!(menu.position(), Point::new(110.0, 70.0));
    assert_eq!(menu.scale(), 1.0);
    assert_eq!(
        menu.commands(),
        vec![MenuCommand::Copy, MenuCommand::Cut, MenuCommand::Paste]
    );
    assert!(ctl.is_listening(Listener::Menu));
}

#[test]
fn right_overflow_shifts_left() {
    let (mut ctl, ed) = setup(Rect::new(0.0, 0.0, 360.0, 640.0));
    ctl.menu
        .open(Point::new(300.0, 100.0), filter_items(&default_items(), false, true));

    ctl.position_menu(&ed, HandleKind::RangeEnd);

    let bounds = ctl.menu().bounds(&MenuMetrics::default());
    assert_eq!(bounds.right(), 350.0);
    assert_eq!(ctl.menu().scale(), 1.0);
}

#[test]
fn left_overflow_shifts_to_margin() {
    let (mut ctl, ed) = setup(Rect::new(0.0, 0.0, 360.0, 640.0));
    ctl.menu
        .open(Point::new(-40.0, 100.0), filter_items(&default_items(), false, true));

    ctl.position_menu(&ed, HandleKind::RangeEnd);

    assert_eq!(ctl.menu().bounds(&MenuMetrics::default()).left(), 10.0);
}

#[test]
fn narrow_container_shrinks_until_it_fits() {
    let (mut ctl, ed) = setup(Rect::new(0.0, 0.0, 100.0, 640.0));
    ctl.menu
        .open(Point::new(0.0, 100.0), filter_items(&default_items(), false, true));

    ctl.position_menu(&ed, HandleKind::RangeEnd);

    let bounds = ctl.menu().bounds(&MenuMetrics::default());
    assert!((ctl.menu().scale() - 0.5).abs() < 1e-5);
    assert!(bounds.left() >= 0.0);
    assert!(bounds.right() <= 100.0);
}

#[test]
fn shrinking_stops_at_the_floor() {
    for width in [0.0, 1.0, 5.0, 15.0] {
        let (mut ctl, ed) = setup(Rect::new(0.0, 0.0, width, 640.0));
        ctl.menu
            .open(Point::new(0.0, 100.0), filter_items(&default_items(), false, true));

        ctl.position_menu(&ed, HandleKind::RangeEnd);

        let scale = ctl.menu().scale();
        assert!(scale > 0.0, "width {width} gave scale {scale}");
        assert!((scale - 0.1).abs() < 1e-5);
    }
}

#[test]
fn reopening_resets_scale() {
    let (mut ctl, mut ed) = setup(Rect::new(0.0, 0.0, 100.0, 640.0));
    ctl.range_end.place(Point::new(10.0, 40.0));
    ctl.show_menu(&mut ed, HandleKind::RangeEnd);
    assert!(ctl.menu().scale() < 1.0);

    ctl.menu.open(Point::default(), Vec::new());
    assert_eq!(ctl.menu().scale(), 1.0);
}

#[test]
fn bottom_overflow_moves_above_the_selection() {
    let (mut ctl, ed) = setup(Rect::new(0.0, 0.0, 360.0, 640.0));
    ctl.menu
        .open(Point::new(50.0, 630.0), filter_items(&default_items(), false, true));

    ctl.position_menu(&ed, HandleKind::RangeEnd);

    // Selection end glyph top is y = 20; 1.8 lines of 20 px above it.
    assert!((ctl.menu().position().y - (20.0 - 36.0)).abs() < 1e-4);
}

#[test]
fn menu_that_never_fits_keeps_its_row() {
    let (mut ctl, ed) = setup(Rect::new(0.0, 0.0, 15.0, 640.0));
    ctl.menu
        .open(Point::new(0.0, 630.0), filter_items(&default_items(), false, true));

    ctl.position_menu(&ed, HandleKind::RangeEnd);

    assert_eq!(ctl.menu().position().y, 630.0);
}

#[test]
fn hide_menu_optionally_keeps_active_flag() {
    let (mut ctl, mut ed) = setup(Rect::new(0.0, 0.0, 360.0, 640.0));
    ctl.range_end.place(Point::new(110.0, 40.0));
    ctl.show_menu(&mut ed, HandleKind::RangeEnd);

    ctl.hide_menu(false);
    assert!(!ctl.menu().is_attached());
    assert!(ctl.is_menu_active());
    assert!(!ctl.is_listening(Listener::Menu));

    // Already detached: nothing changes.
    ctl.hide_menu(true);
    assert!(ctl.is_menu_active());
}

#[test]
fn minimal_controller_never_shows_menu() {
    let mut ctl = TouchController::new(TouchSettings::default(), true, Instant::now());
    let mut ed = MemoryEditor::new(TEXT);
    ctl.show_menu(&mut ed, HandleKind::RangeEnd);
    assert!(!ctl.menu().is_attached());
    assert!(!ctl.is_menu_active());
}
