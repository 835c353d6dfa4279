//! Drag-to-reorder: hysteresis at the hovered row's midpoint

use crossterm::event::{Event, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use dd_table::config::config::Config;
use dd_table::data::{CellValue, TableState};
use dd_table::ui::drag::{decide_hover, HoverDecision, RowBounds};
use dd_table::ui::table_app::TableApp;
use ratatui::{backend::TestBackend, Terminal};

fn first_names(state: &TableState) -> Vec<String> {
    state
        .rows()
        .iter()
        .map(|r| r.display("firstName", "undefined"))
        .collect()
}

fn mouse(app: &mut TableApp, kind: MouseEventKind, column: u16, row: u16) {
    app.handle_event(&Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }));
}

/// Seeded app drawn once on an 80x30 screen.
/// Data rows are 3 lines each starting at line 4: 4..7, 7..10, 10..13.
fn drawn_app() -> (TableApp, Terminal<TestBackend>) {
    let mut app = TableApp::new(Config::default());
    let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
    terminal.draw(|f| app.draw(f)).unwrap();
    (app, terminal)
}

#[test]
fn test_hover_decisions() {
    let bounds = RowBounds::new(100.0, 140.0);
    assert_eq!(
        decide_hover(1, 1, bounds, Some(110.0)),
        HoverDecision::SameRow
    );
    assert_eq!(decide_hover(0, 1, bounds, None), HoverDecision::NoPointer);
    assert_eq!(
        decide_hover(0, 1, bounds, Some(119.0)),
        HoverDecision::BeforeMidpointDown
    );
    assert_eq!(
        decide_hover(0, 1, bounds, Some(121.0)),
        HoverDecision::Move { from: 0, to: 1 }
    );
    assert_eq!(
        decide_hover(2, 1, bounds, Some(121.0)),
        HoverDecision::BeforeMidpointUp
    );
    assert_eq!(
        decide_hover(2, 1, bounds, Some(119.0)),
        HoverDecision::Move { from: 2, to: 1 }
    );
}

#[test]
fn test_drag_down_waits_for_midpoint() {
    let (mut app, mut terminal) = drawn_app();

    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 5);
    assert!(app.is_dragging());

    // Top line of row 1 is above its midpoint
    mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 5, 7);
    assert_eq!(first_names(app.state()), vec!["Yaroslav", "Maryna", "Max"]);

    // Bottom line is past it
    mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 5, 9);
    assert_eq!(first_names(app.state()), vec!["Maryna", "Yaroslav", "Max"]);
    assert_eq!(app.selected(), 1);

    terminal.draw(|f| app.draw(f)).unwrap();
    mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 5, 12);
    assert_eq!(first_names(app.state()), vec!["Maryna", "Max", "Yaroslav"]);

    mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 5, 12);
    assert!(!app.is_dragging());
}

#[test]
fn test_drag_down_with_single_line_rows() {
    let mut config = Config::default();
    config.display.row_height = 1;
    let mut app = TableApp::new(config);
    let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
    terminal.draw(|f| app.draw(f)).unwrap();

    // One line per row: 4, 5, 6
    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 4);
    mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 5, 5);
    assert_eq!(first_names(app.state()), vec!["Maryna", "Yaroslav", "Max"]);

    terminal.draw(|f| app.draw(f)).unwrap();
    mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 5, 6);
    assert_eq!(first_names(app.state()), vec!["Maryna", "Max", "Yaroslav"]);
}

#[test]
fn test_drag_up_with_single_line_rows() {
    let mut config = Config::default();
    config.display.row_height = 1;
    let mut app = TableApp::new(config);
    let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
    terminal.draw(|f| app.draw(f)).unwrap();

    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 6);
    mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 5, 5);
    assert_eq!(first_names(app.state()), vec!["Yaroslav", "Max", "Maryna"]);
}

#[test]
fn test_drag_up_waits_for_midpoint() {
    let (mut app, _terminal) = drawn_app();

    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 11);
    mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 5, 9);
    assert_eq!(first_names(app.state()), vec!["Yaroslav", "Maryna", "Max"]);

    mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 5, 7);
    assert_eq!(first_names(app.state()), vec!["Yaroslav", "Max", "Maryna"]);
}

#[test]
fn test_dragged_draft_moves_with_row() {
    let (mut app, _terminal) = drawn_app();
    app.edit_field(0, "First Name", "Yarik");

    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 5);
    mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 5, 9);

    let draft = app.row_view(1).and_then(|v| v.draft()).unwrap();
    assert_eq!(draft.get("First Name"), Some(&CellValue::text("Yarik")));
    assert!(app.state().rows()[1].editing);
}

#[test]
fn test_mouse_ignored_when_disabled() {
    let mut config = Config::default();
    config.behavior.enable_mouse = false;
    let mut app = TableApp::new(config);
    let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
    terminal.draw(|f| app.draw(f)).unwrap();

    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 5);
    assert!(!app.is_dragging());
}

#[test]
fn test_row_buttons_by_mouse() {
    let (mut app, mut terminal) = drawn_app();

    // Action column is the last 15 cells inside the border: x 64..79
    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 64, 8);
    assert!(app.state().rows()[1].editing);
    assert!(!app.is_dragging());

    terminal.draw(|f| app.draw(f)).unwrap();
    // "[Save] [Cancel]": Cancel starts 7 cells in
    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 72, 5);
    assert!(!app.state().rows()[0].editing);
}
