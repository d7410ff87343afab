use super::*;

fn drain(editor: &mut MemoryEditor) -> Vec<EditorEvent> {
    std::iter::from_fn(|| editor.poll_event()).collect()
}

#[test]
fn screen_and_text_coordinates_round_trip_on_grid() {
    let editor = MemoryEditor::new("hello\nworld\n").with_container(Rect::new(
        10.0, 100.0, 300.0, 400.0,
    ));

    let p = editor.text_to_screen(DocPos::new(1, 3));
    assert_eq!(p, Point::new(10.0 + 40.0 + 30.0, 100.0 + 20.0));
    // Any point inside the glyph cell maps back to the same position.
    assert_eq!(editor.screen_to_text(p.offset(2.0, 5.0)), DocPos::new(1, 3));
}

#[test]
fn screen_to_text_clips_into_document() {
    let editor = MemoryEditor::new("ab\ncd");
    assert_eq!(
        editor.screen_to_text(Point::new(900.0, 900.0)),
        DocPos::new(1, 2)
    );
    assert_eq!(
        editor.screen_to_text(Point::new(-50.0, -50.0)),
        DocPos::new(0, 0)
    );
}

#[test]
fn gutter_region() {
    let editor = MemoryEditor::new("x");
    assert_eq!(editor.region_at(Point::new(5.0, 5.0)), SurfaceRegion::Gutter);
    assert_eq!(editor.region_at(Point::new(60.0, 5.0)), SurfaceRegion::Text);
}

#[test]
fn selection_mutations_publish_events() {
    let mut editor = MemoryEditor::new("hello world\n");

    editor.move_to_position(DocPos::new(0, 3));
    assert_eq!(drain(&mut editor), vec![EditorEvent::ChangeCursor, EditorEvent::ChangeSelection]);

    editor.set_selection_anchor(DocPos::new(0, 0));
    assert_eq!(drain(&mut editor), vec![EditorEvent::ChangeSelection]);
    assert_eq!(editor.selection_anchor(), Some(DocPos::new(0, 0)));
    assert_eq!(editor.copy_text(), "hel");

    // No change, no event.
    editor.set_selection_anchor(DocPos::new(0, 0));
    assert!(drain(&mut editor).is_empty());
}

#[test]
fn scroll_is_clamped_and_published() {
    let text = "line\n".repeat(100);
    let mut editor = MemoryEditor::new(&text);
    assert_eq!(editor.max_scroll_top(), 101.0 * 20.0 - 640.0);

    editor.scroll_by(0.0, -10.0);
    assert!(drain(&mut editor).is_empty());

    editor.scroll_by(0.0, 50.0);
    assert_eq!(editor.scroll_top(), 50.0);
    assert_eq!(drain(&mut editor), vec![EditorEvent::Scroll]);

    editor.set_scroll_top(1.0e9);
    assert_eq!(editor.scroll_top(), editor.max_scroll_top());
}

#[test]
fn blur_publishes_only_when_focused() {
    let mut editor = MemoryEditor::new("x");
    editor.blur();
    editor.blur();
    assert_eq!(drain(&mut editor), vec![EditorEvent::Blur]);
    editor.focus();
    assert!(editor.is_focused());
}

#[test]
fn goto_position_reveals_row() {
    let text = "line\n".repeat(100);
    let mut editor = MemoryEditor::new(&text);
    editor.goto_position(DocPos::new(60, 2));
    assert_eq!(editor.cursor(), DocPos::new(60, 2));
    assert_eq!(editor.scroll_top(), 61.0 * 20.0 - 640.0);
}

#[test]
fn insert_text_publishes_change() {
    let mut editor = MemoryEditor::new("ab");
    editor.move_to_position(DocPos::new(0, 2));
    editor.clear_events();
    editor.insert_text("c");
    assert_eq!(editor.buffer().text(), "abc");
    assert_eq!(drain(&mut editor).last(), Some(&EditorEvent::Change));
}

#[test]
fn word_and_line_selection() {
    let mut editor = MemoryEditor::new("let value = 1;\n");
    editor.move_to_position(DocPos::new(0, 6));
    assert_eq!(
        editor.word_range(),
        Some(DocRange::new(DocPos::new(0, 4), DocPos::new(0, 9)))
    );
    editor.select_line();
    assert_eq!(editor.copy_text(), "let value = 1;");
}
