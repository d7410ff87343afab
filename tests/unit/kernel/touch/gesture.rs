use super::*;
use crate::core::geom::{DocPos, DocRange};
use crate::kernel::services::adapters::MemoryEditor;
use crate::kernel::services::ports::TouchSettings;
use crate::kernel::touch::{Axis, Delta, Listener, MenuCommand};
use std::time::{Duration, Instant};

const TEXT: &str = "fn main() {\n    let alpha = 1;\n    let beta = 2;\n    let gamma = alpha + beta;\n}\n";

fn setup(settings: TouchSettings, minimal: bool) -> (TouchController, MemoryEditor, Instant) {
    let now = Instant::now();
    let ctl = TouchController::new(settings, minimal, now);
    (ctl, MemoryEditor::new(TEXT), now)
}

/// Middle of the glyph cell at `row`, `column` on the default grid.
fn cell(row: usize, column: usize) -> Point {
    Point::new(40.0 + column as f32 * 10.0, row as f32 * 20.0 + 10.0)
}

fn tap(ctl: &mut TouchController, ed: &mut MemoryEditor, point: Point, at: Instant) {
    ctl.touch_start(ed, point, at);
    ctl.touch_end(ed, point, false, at);
}

#[test]
fn single_tap_places_caret_below_the_glyph() {
    let (mut ctl, mut ed, now) = setup(TouchSettings::default(), false);

    tap(&mut ctl, &mut ed, cell(3, 5), now);

    assert_eq!(ctl.session().mode(), GestureMode::Cursor);
    assert_eq!(ed.cursor(), DocPos::new(3, 5));
    let caret = ctl.handle(HandleKind::Caret);
    assert!(caret.is_attached());
    // Glyph (3, 5) sits at (90, 60); one line lower.
    assert_eq!(caret.position(), Point::new(90.0, 80.0));
    assert!(!ctl.handle(HandleKind::RangeStart).is_attached());
    assert!(!ctl.handle(HandleKind::RangeEnd).is_attached());
    assert!(ctl.take_effects().contains(&Effect::DismissTooltip));
}

#[test]
fn double_tap_selects_the_word_with_handles_and_menu() {
    let (mut ctl, mut ed, now) = setup(TouchSettings::default(), false);

    tap(&mut ctl, &mut ed, cell(3, 5), now);
    tap(&mut ctl, &mut ed, cell(3, 6), now + Duration::from_millis(200));

    assert_eq!(ctl.session().mode(), GestureMode::Selection);
    assert_eq!(
        ed.selection_range(),
        DocRange::new(DocPos::new(3, 4), DocPos::new(3, 7))
    );
    assert!(!ctl.handle(HandleKind::Caret).is_attached());
    assert!(ctl.handle(HandleKind::RangeStart).is_attached());
    assert!(ctl.handle(HandleKind::RangeEnd).is_attached());
    assert!(ctl.is_listening(Listener::Selection));
    assert!(ctl.menu().is_attached());
    assert_eq!(
        ctl.menu().commands(),
        vec![MenuCommand::Copy, MenuCommand::Cut, MenuCommand::Paste]
    );
    assert!(ctl.take_effects().contains(&Effect::Vibrate { ms: 30 }));
}

#[test]
fn third_tap_selects_the_line() {
    let (mut ctl, mut ed, now) = setup(TouchSettings::default(), false);
    for n in 0..3 {
        tap(&mut ctl, &mut ed, cell(2, 6), now + Duration::from_millis(n * 100));
    }

    assert_eq!(ctl.session().mode(), GestureMode::SelectLine);
    let range = ed.selection_range();
    assert_eq!(range.start, DocPos::new(2, 0));
    assert_eq!(range.end, DocPos::new(2, 17));
    assert!(ctl.handle(HandleKind::RangeEnd).is_attached());
}

#[test]
fn taps_outside_the_window_start_over() {
    let (mut ctl, mut ed, now) = setup(TouchSettings::default(), false);

    tap(&mut ctl, &mut ed, cell(3, 5), now);
    tap(&mut ctl, &mut ed, cell(3, 5), now + Duration::from_millis(600));

    assert_eq!(ctl.session().taps().count(), 1);
    assert_eq!(ctl.session().mode(), GestureMode::Cursor);
}

#[test]
fn taps_on_another_row_start_over() {
    let (mut ctl, mut ed, now) = setup(TouchSettings::default(), false);

    tap(&mut ctl, &mut ed, cell(3, 5), now);
    tap(&mut ctl, &mut ed, cell(2, 5), now + Duration::from_millis(100));

    assert_eq!(ctl.session().taps().count(), 1);
    assert_eq!(ed.cursor(), DocPos::new(2, 5));
}

#[test]
fn taps_far_apart_on_a_row_start_over() {
    let (mut ctl, mut ed, now) = setup(TouchSettings::default(), false);

    tap(&mut ctl, &mut ed, cell(3, 5), now);
    tap(&mut ctl, &mut ed, cell(3, 9), now + Duration::from_millis(100));

    assert_eq!(ctl.session().taps().count(), 1);
}

#[test]
fn shift_tap_extends_from_the_cursor() {
    let (mut ctl, mut ed, now) = setup(TouchSettings::default(), false);
    tap(&mut ctl, &mut ed, cell(1, 4), now);

    let later = now + Duration::from_millis(700);
    ctl.touch_start(&mut ed, cell(2, 8), later);
    ctl.touch_end(&mut ed, cell(2, 8), true, later);

    assert_eq!(
        ed.selection_range(),
        DocRange::new(DocPos::new(1, 4), DocPos::new(2, 8))
    );
    assert!(ctl.handle(HandleKind::RangeEnd).is_attached());
    assert!(ctl.menu().is_attached());
}

#[test]
fn gutter_tap_goes_to_line_start() {
    let (mut ctl, mut ed, now) = setup(TouchSettings::default(), false);

    ctl.touch_start(&mut ed, Point::new(10.0, 50.0), now);

    assert_eq!(ed.cursor(), DocPos::new(2, 0));
    assert!(!ctl.session().is_tracking());
}

#[test]
fn minimal_tap_clicks_without_handles() {
    let (mut ctl, mut ed, now) = setup(TouchSettings::default(), true);

    tap(&mut ctl, &mut ed, cell(3, 5), now);

    assert_eq!(ed.cursor(), DocPos::new(3, 5));
    assert!(!ctl.handle(HandleKind::Caret).is_attached());
    assert!(ctl.take_effects().contains(&Effect::Click));

    tap(&mut ctl, &mut ed, cell(3, 5), now + Duration::from_millis(100));
    assert_eq!(ctl.session().mode(), GestureMode::Selection);
    assert!(ed.selection_range().is_empty());
}

#[test]
fn minimal_ignores_the_side_panel_strip() {
    let (mut ctl, mut ed, now) = setup(TouchSettings::default(), true);

    ctl.touch_start(&mut ed, Point::new(15.0, 50.0), now);

    assert!(!ctl.session().is_tracking());
    assert_eq!(ed.cursor(), DocPos::new(0, 0));
}

#[test]
fn long_press_selects_the_word() {
    let (mut ctl, mut ed, now) = setup(TouchSettings::default(), false);
    ctl.touch_start(&mut ed, cell(1, 6), now);

    ctl.context_menu(&mut ed, ContextMenuEvent::new(cell(1, 6), now));

    assert_eq!(ctl.session().mode(), GestureMode::Selection);
    assert_eq!(
        ed.selection_range(),
        DocRange::new(DocPos::new(1, 4), DocPos::new(1, 7))
    );
    assert!(ctl.menu().is_attached());

    // The lift after a long press is not a tap.
    ctl.touch_end(&mut ed, cell(1, 6), false, now + Duration::from_millis(600));
    assert_eq!(ctl.session().taps().count(), 0);
    assert!(ctl.handle(HandleKind::RangeEnd).is_attached());
}

#[test]
fn long_press_on_blank_space_offers_paste() {
    let (mut ctl, mut ed, now) = setup(TouchSettings::default(), false);

    ctl.context_menu(&mut ed, ContextMenuEvent::new(cell(4, 3), now));

    assert!(ed.selection_range().is_empty());
    assert!(ctl.handle(HandleKind::RangeStart).is_attached());
    assert!(ctl.handle(HandleKind::RangeEnd).is_attached());
    assert!(ctl.menu().is_attached());
    assert_eq!(
        ctl.menu().commands(),
        vec![MenuCommand::Paste, MenuCommand::SelectAll]
    );
}

#[test]
fn long_press_on_an_empty_document_offers_paste() {
    let now = Instant::now();
    let mut ctl = TouchController::new(TouchSettings::default(), false, now);
    let mut ed = MemoryEditor::new("");

    ctl.context_menu(&mut ed, ContextMenuEvent::new(cell(0, 0), now));

    assert!(ctl.menu().is_attached());
    assert!(ctl.menu().commands().contains(&MenuCommand::Paste));
    assert!(ctl.is_selection_active());
}

#[test]
fn wrapped_drag_only_scrolls_vertically() {
    let text: String = (0..100).map(|i| format!("{i} {}\n", "word ".repeat(30))).collect();
    let now = Instant::now();
    let settings = TouchSettings {
        text_wrap: true,
        ..TouchSettings::default()
    };
    let mut ctl = TouchController::new(settings, false, now);
    let mut ed = MemoryEditor::new(&text);
    ed.set_scroll(0.0, 400.0);

    ctl.touch_start(&mut ed, Point::new(200.0, 300.0), now);
    ctl.touch_move(&mut ed, Point::new(230.0, 240.0), now);

    assert_eq!(ctl.session().frozen_axis(), Some(Axis::X));
    assert_eq!(ctl.session().delta(), Delta::new(0.0, -60.0));
    assert_eq!(ed.scroll_left(), 0.0);
    assert_eq!(ed.scroll_top(), 460.0);

    // A mostly horizontal swipe still has no horizontal effect.
    ctl.touch_move(&mut ed, Point::new(500.0, 230.0), now);
    assert_eq!(ctl.session().delta(), Delta::new(0.0, -10.0));
    assert_eq!(ed.scroll_left(), 0.0);
}

#[test]
fn moves_below_threshold_do_not_scroll() {
    let settings = TouchSettings {
        touch_move_threshold: 8.0,
        ..TouchSettings::default()
    };
    let (mut ctl, mut ed, now) = setup(settings, false);

    ctl.touch_start(&mut ed, cell(1, 5), now);
    ctl.touch_move(&mut ed, cell(1, 5).offset(3.0, 2.0), now);
    ctl.touch_end(&mut ed, cell(1, 5).offset(3.0, 2.0), false, now);

    assert_eq!(ctl.session().mode(), GestureMode::Cursor);
}

#[test]
fn end_without_start_is_ignored() {
    let (mut ctl, mut ed, now) = setup(TouchSettings::default(), false);

    ctl.touch_move(&mut ed, cell(1, 5), now);
    ctl.touch_end(&mut ed, cell(1, 5), false, now);

    assert_eq!(ctl.session().mode(), GestureMode::Wait);
    assert_eq!(ed.cursor(), DocPos::new(0, 0));
}
