//! Edit, Save and Cancel on single rows, through the API and the keyboard

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use dd_table::config::config::Config;
use dd_table::data::{CellValue, TableState};
use dd_table::ui::actions::AppMode;
use dd_table::ui::table_app::TableApp;

fn rendered(state: &TableState) -> Vec<Vec<String>> {
    state
        .rows()
        .iter()
        .map(|row| {
            state
                .columns()
                .iter()
                .map(|c| row.display(&dd_table::data::to_camel_case(c), "undefined"))
                .collect()
        })
        .collect()
}

fn key(app: &mut TableApp, code: KeyCode) {
    app.handle_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
}

fn type_text(app: &mut TableApp, text: &str) {
    for c in text.chars() {
        key(app, KeyCode::Char(c));
    }
}

#[test]
fn test_seed_row_starts_in_edit_mode_with_draft() {
    let app = TableApp::new(Config::default());
    assert!(app.state().rows()[0].editing);
    let draft = app.row_view(0).and_then(|v| v.draft()).expect("draft");
    assert_eq!(draft.get("Last Name"), Some(&CellValue::text("Baliuk")));
}

#[test]
fn test_cancel_restores_rendered_values() {
    let mut app = TableApp::new(Config::default());
    app.cancel(0);
    let before = rendered(app.state());

    assert!(app.begin_edit(1));
    app.edit_field(1, "First Name", "Marta");
    assert!(app.cancel(1));

    assert_eq!(rendered(app.state()), before);
    assert!(!app.state().rows()[1].editing);
    assert!(app.row_view(1).unwrap().draft().is_none());
}

#[test]
fn test_edit_after_cancel_starts_from_shared_row() {
    let mut app = TableApp::new(Config::default());
    app.begin_edit(2);
    app.edit_field(2, "Email", "nope@example.com");
    app.cancel(2);
    app.begin_edit(2);

    let draft = app.row_view(2).and_then(|v| v.draft()).unwrap();
    assert_eq!(draft.get("Email"), Some(&CellValue::text("max@gmail.com")));
}

#[test]
fn test_save_renders_new_value_and_leaves_others() {
    let mut app = TableApp::new(Config::default());
    let before = rendered(app.state());

    app.begin_edit(1);
    app.edit_field(1, "Phone Number", "555-0100");
    assert!(app.save(1));

    let after = rendered(app.state());
    assert_eq!(after[1][2], "555-0100");
    assert_eq!(after[1][0], "Maryna");
    assert_eq!(after[0], before[0]);
    assert_eq!(after[2], before[2]);
    assert!(!app.state().rows()[1].editing);
}

#[test]
fn test_edits_are_not_shared_before_save() {
    let mut app = TableApp::new(Config::default());
    app.edit_field(0, "First Name", "Yarik");
    assert_eq!(
        app.state().rows()[0].get("firstName"),
        Some(&CellValue::text("Yaroslav"))
    );
}

#[test]
fn test_begin_edit_twice_keeps_draft() {
    let mut app = TableApp::new(Config::default());
    app.edit_field(0, "First Name", "Yarik");
    assert!(!app.begin_edit(0));
    let draft = app.row_view(0).and_then(|v| v.draft()).unwrap();
    assert_eq!(draft.get("First Name"), Some(&CellValue::text("Yarik")));
}

#[test]
fn test_save_without_edit_is_noop() {
    let mut app = TableApp::new(Config::default());
    let before = rendered(app.state());
    assert!(!app.save(2));
    assert!(!app.save(9));
    assert_eq!(rendered(app.state()), before);
}

#[test]
fn test_new_column_is_editable() {
    let mut app = TableApp::new(Config::default());
    app.add_column("Notes");
    app.begin_edit(1);
    app.edit_field(1, "Notes", "likes tea");
    app.save(1);
    assert_eq!(
        app.state().rows()[1].get("notes"),
        Some(&CellValue::text("likes tea"))
    );
}

#[test]
fn test_keyboard_edit_and_save() {
    let mut app = TableApp::new(Config::default());
    key(&mut app, KeyCode::Down);
    assert_eq!(app.selected(), 1);
    assert_eq!(app.mode(), AppMode::Table);

    key(&mut app, KeyCode::Char('e'));
    assert_eq!(app.mode(), AppMode::RowEdit);

    // Cursor starts at the end of the first cell
    key(&mut app, KeyCode::Backspace);
    type_text(&mut app, "e");
    key(&mut app, KeyCode::Tab);
    type_text(&mut app, "-X");
    key(&mut app, KeyCode::Enter);

    assert_eq!(app.mode(), AppMode::Table);
    let row = &app.state().rows()[1];
    assert_eq!(row.get("firstName"), Some(&CellValue::text("Marye")));
    assert_eq!(row.get("lastName"), Some(&CellValue::text("Vasylyshena-X")));
}

#[test]
fn test_keyboard_cancel() {
    let mut app = TableApp::new(Config::default());
    type_text(&mut app, "zzz");
    key(&mut app, KeyCode::Esc);

    assert_eq!(app.mode(), AppMode::Table);
    assert_eq!(
        app.state().rows()[0].get("firstName"),
        Some(&CellValue::text("Yaroslav"))
    );
}

#[test]
fn test_editing_flag_is_reserved() {
    let mut app = TableApp::new(Config::default());
    app.add_column("editing");
    app.begin_edit(1);
    app.edit_field(1, "editing", "nope");
    app.save(1);

    let row = &app.state().rows()[1];
    assert!(!row.editing);
    assert_eq!(row.value("editing"), Some(CellValue::Flag(false)));
}
