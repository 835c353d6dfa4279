//! The table container: owns the table state, one [`RowView`] per row, the
//! two input panels and the drag session, and turns terminal events into
//! operations on them.

use anyhow::{anyhow, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};
use std::io;
use std::time::Duration;
use tracing::{debug, info, trace};

use crate::config::config::Config;
use crate::data::{CellValue, TableState};
use crate::ui::actions::{Action, AppMode};
use crate::ui::drag::{DragSession, RowBounds};
use crate::ui::key_mapper::KeyMapper;
use crate::ui::row_view::RowView;
use crate::ui::table_render_context::{RenderRow, TableRenderContext};
use crate::ui::table_renderer::{render_table, row_capacity, RowButton, TableGeometry};
use crate::utils::logging::{get_log_buffer, LogRingBuffer};
use crate::widgets::column_panel::ColumnPanel;
use crate::widgets::help_widget::HelpWidget;
use crate::widgets::log_widget::LogWidget;
use crate::widgets::row_panel::RowPanel;

const ADD_ROW_LABEL: &str = "[ Add Row ]";
const ADD_COLUMN_LABEL: &str = "[ Add Column ]";

/// Which part of the screen receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    ColumnInput,
    ColumnList,
    RowForm,
}

/// Screen areas from the last draw, used for mouse hit-testing
#[derive(Debug, Clone, Default)]
struct ScreenLayout {
    add_row_button: Rect,
    add_column_button: Rect,
    table: TableGeometry,
}

pub struct TableApp {
    state: TableState,
    row_views: Vec<RowView>,
    selected: usize,
    scroll_offset: usize,
    focus: Focus,
    show_add_row: bool,
    show_add_column: bool,
    column_panel: ColumnPanel,
    row_panel: RowPanel,
    drag: DragSession,
    key_mapper: KeyMapper,
    config: Config,
    layout: ScreenLayout,
    show_help: bool,
    show_log: bool,
    log_buffer: Option<LogRingBuffer>,
    should_quit: bool,
}

impl TableApp {
    /// Create the app with the start-up contents chosen by `config`
    pub fn new(config: Config) -> Self {
        let state = if config.behavior.seed_rows {
            TableState::seeded()
        } else {
            TableState::new(crate::data::seed::initial_columns(), Vec::new())
        };
        Self::with_state(config, state)
    }

    pub fn with_state(config: Config, state: TableState) -> Self {
        let mut app = Self {
            column_panel: ColumnPanel::new(state.columns()),
            row_panel: RowPanel::new(config.behavior.add_row_key_style()),
            key_mapper: KeyMapper::new(config.keybindings.vim_mode),
            state,
            row_views: Vec::new(),
            selected: 0,
            scroll_offset: 0,
            focus: Focus::Table,
            show_add_row: false,
            show_add_column: false,
            drag: DragSession::new(),
            config,
            layout: ScreenLayout::default(),
            show_help: false,
            show_log: false,
            log_buffer: get_log_buffer(),
            should_quit: false,
        };
        app.sync_row_views();
        app
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn row_view(&self, index: usize) -> Option<&RowView> {
        self.row_views.get(index)
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_add_row_panel_shown(&self) -> bool {
        self.show_add_row
    }

    pub fn is_add_column_panel_shown(&self) -> bool {
        self.show_add_column
    }

    pub fn column_panel(&self) -> &ColumnPanel {
        &self.column_panel
    }

    pub fn row_panel(&self) -> &RowPanel {
        &self.row_panel
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Current input mode
    pub fn mode(&self) -> AppMode {
        match self.focus {
            Focus::Table => match self.state.row(self.selected) {
                Some(row) if row.editing => AppMode::RowEdit,
                _ => AppMode::Table,
            },
            Focus::ColumnInput => AppMode::AddColumn,
            Focus::ColumnList => AppMode::ColumnList,
            Focus::RowForm => AppMode::AddRow,
        }
    }

    /// Keep one row view per row, indexed by position
    fn sync_row_views(&mut self) {
        let len = self.state.row_count();
        self.row_views.truncate(len);
        while self.row_views.len() < len {
            self.row_views.push(RowView::new(self.row_views.len()));
        }
        for (i, view) in self.row_views.iter_mut().enumerate() {
            view.set_index(i);
            view.sync(&self.state);
        }
        self.selected = self.selected.min(len.saturating_sub(1));
        self.column_panel.sync_catalog(self.state.columns());
    }

    // ========== Container operations ==========

    pub fn toggle_column(&mut self, name: &str, checked: bool) {
        self.state.toggle_column(name, checked);
        self.sync_row_views();
    }

    pub fn add_column(&mut self, text: &str) -> bool {
        self.column_panel.set_value(text);
        let added = self.column_panel.commit(&mut self.state);
        self.sync_row_views();
        added
    }

    /// Set one field of the add-row form
    pub fn set_new_row_field(&mut self, label: &str, value: &str) {
        self.row_panel.set_field(label, value);
    }

    pub fn add_row(&mut self) {
        self.row_panel.commit(&mut self.state);
        self.sync_row_views();
    }

    pub fn delete_row(&mut self) -> bool {
        let deleted = self.row_panel.delete_last(&mut self.state).is_some();
        self.sync_row_views();
        deleted
    }

    /// Move a row together with its view, keeping the selection on it
    pub fn move_row(&mut self, from: usize, to: usize) -> bool {
        if !self.state.move_row(from, to) {
            return false;
        }
        let to = to.min(self.state.row_count() - 1);
        self.after_move(from, to);
        true
    }

    fn after_move(&mut self, from: usize, to: usize) {
        if from < self.row_views.len() {
            let view = self.row_views.remove(from);
            let to = to.min(self.row_views.len());
            self.row_views.insert(to, view);
        }
        if self.selected == from {
            self.selected = to;
        } else if from < self.selected && self.selected <= to {
            self.selected -= 1;
        } else if to <= self.selected && self.selected < from {
            self.selected += 1;
        }
        self.sync_row_views();
    }

    pub fn begin_edit(&mut self, index: usize) -> bool {
        let Some(view) = self.row_views.get_mut(index) else {
            return false;
        };
        view.begin_edit(&mut self.state)
    }

    pub fn edit_field(&mut self, index: usize, label: &str, value: &str) {
        let columns = self.state.columns();
        if let Some(view) = self.row_views.get_mut(index) {
            view.edit_field(label, CellValue::text(value));
            // Keep the cursor input in step with the draft
            let col = view.focused_col();
            if columns.get(col).map(String::as_str) == Some(label) {
                view.focus_cell(col, columns);
            }
        }
    }

    pub fn save(&mut self, index: usize) -> bool {
        let saved = match self.row_views.get_mut(index) {
            Some(view) => view.save(&mut self.state),
            None => false,
        };
        self.sync_row_views();
        saved
    }

    pub fn cancel(&mut self, index: usize) -> bool {
        let cancelled = match self.row_views.get_mut(index) {
            Some(view) => view.cancel(&mut self.state),
            None => false,
        };
        self.sync_row_views();
        cancelled
    }

    /// Start dragging row `index`
    pub fn begin_drag(&mut self, index: usize) {
        if index < self.state.row_count() {
            self.drag.begin(index);
            self.selected = index;
            self.focus = Focus::Table;
        }
    }

    /// The drag pointer is over row `index` with the given bounds
    pub fn drag_over(
        &mut self,
        index: usize,
        bounds: RowBounds,
        pointer_y: Option<f32>,
    ) -> Option<(usize, usize)> {
        let item = self.drag.item_mut()?;
        let view = self.row_views.get(index)?;
        let (from, to) = view.hover(item, bounds, pointer_y, &mut self.state)?;
        self.after_move(from, to);
        Some((from, to))
    }

    pub fn end_drag(&mut self) {
        self.drag.end();
    }

    pub fn rows_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self.state.rows())
    }

    // ========== Event handling ==========

    /// Handle one terminal event
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) => {
                // Only presses; release events would double every toggle
                if key.kind == KeyEventKind::Press {
                    self.handle_key(*key, event);
                }
            }
            Event::Mouse(mouse) if self.config.behavior.enable_mouse => self.handle_mouse(*mouse),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent, event: &Event) {
        trace!(target: "input", "Key: {:?}", key);
        let mode = self.mode();

        if self.show_help || self.show_log {
            match self.key_mapper.map_key(key, mode) {
                Some(Action::ForceQuit) => self.should_quit = true,
                Some(Action::ShowLog) => self.show_log = !self.show_log,
                Some(Action::ShowHelp) => self.show_help = !self.show_help,
                _ => {
                    self.show_help = false;
                    self.show_log = false;
                }
            }
            return;
        }

        match self.key_mapper.map_key(key, mode) {
            Some(action) => self.perform(action),
            None if mode.accepts_text() => self.handle_text_input(mode, event),
            None => {}
        }
    }

    fn handle_text_input(&mut self, mode: AppMode, event: &Event) {
        let columns = self.state.columns();
        match mode {
            AppMode::RowEdit => {
                if let Some(view) = self.row_views.get_mut(self.selected) {
                    view.handle_editor_event(event, columns);
                }
            }
            AppMode::AddColumn => {
                self.column_panel.handle_input_event(event);
            }
            AppMode::AddRow => {
                self.row_panel.handle_input_event(event, columns);
            }
            AppMode::Table | AppMode::ColumnList => {}
        }
    }

    /// Apply an action to the app
    pub fn perform(&mut self, action: Action) {
        debug!(target: "input", "Action: {:?}", action);

        match action {
            Action::SelectUp => self.selected = self.selected.saturating_sub(1),
            Action::SelectDown => {
                if self.selected + 1 < self.state.row_count() {
                    self.selected += 1;
                }
            }
            Action::MoveRowUp => {
                if self.selected > 0 {
                    self.move_row(self.selected, self.selected - 1);
                }
            }
            Action::MoveRowDown => {
                self.move_row(self.selected, self.selected + 1);
            }
            Action::BeginEdit => {
                self.begin_edit(self.selected);
            }
            Action::SaveEdit => {
                self.save(self.selected);
            }
            Action::CancelEdit => {
                self.cancel(self.selected);
            }
            Action::NextCell => {
                if let Some(view) = self.row_views.get_mut(self.selected) {
                    view.next_cell(self.state.columns());
                }
            }
            Action::PrevCell => {
                if let Some(view) = self.row_views.get_mut(self.selected) {
                    view.prev_cell(self.state.columns());
                }
            }
            Action::ToggleAddRowPanel => {
                self.show_add_row = !self.show_add_row;
                if self.show_add_row {
                    self.focus = Focus::RowForm;
                    self.row_panel.focus_field(0, self.state.columns());
                } else if self.focus == Focus::RowForm {
                    self.focus = Focus::Table;
                }
            }
            Action::ToggleAddColumnPanel => {
                self.show_add_column = !self.show_add_column;
                if self.show_add_column {
                    self.focus = Focus::ColumnInput;
                } else if matches!(self.focus, Focus::ColumnInput | Focus::ColumnList) {
                    self.focus = Focus::Table;
                }
            }
            Action::FocusNext => self.focus_next(),
            Action::FocusTable => self.focus = Focus::Table,
            Action::CommitColumn => {
                self.column_panel.commit(&mut self.state);
                self.sync_row_views();
            }
            Action::FocusColumnList => self.focus = Focus::ColumnList,
            Action::ColumnCursorUp => {
                if self.column_panel.cursor() == 0 {
                    self.focus = Focus::ColumnInput;
                } else {
                    self.column_panel.cursor_up();
                }
            }
            Action::ColumnCursorDown => self.column_panel.cursor_down(),
            Action::ToggleColumnAtCursor => {
                self.column_panel.toggle_at_cursor(&mut self.state);
                self.sync_row_views();
            }
            Action::CommitRow => {
                self.add_row();
                self.row_panel.focus_field(0, self.state.columns());
            }
            Action::DeleteLastRow => {
                self.delete_row();
            }
            Action::NextField => self.row_panel.next_field(self.state.columns()),
            Action::PrevField => self.row_panel.prev_field(self.state.columns()),
            Action::ShowHelp => self.show_help = !self.show_help,
            Action::ShowLog => self.show_log = !self.show_log,
            Action::Quit | Action::ForceQuit => {
                info!(target: "app", "Quit requested");
                self.should_quit = true;
            }
        }
    }

    fn focus_next(&mut self) {
        let order: Vec<Focus> = [
            Some(Focus::Table),
            self.show_add_column.then_some(Focus::ColumnInput),
            self.show_add_row.then_some(Focus::RowForm),
        ]
        .into_iter()
        .flatten()
        .collect();
        let current = match self.focus {
            Focus::ColumnList => Focus::ColumnInput,
            other => other,
        };
        let pos = order.iter().position(|f| *f == current).unwrap_or(0);
        self.focus = order[(pos + 1) % order.len()];
        if self.focus == Focus::RowForm {
            let focused = self.row_panel.focused();
            self.row_panel.focus_field(focused, self.state.columns());
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let point = Position::new(x, y);
                if self.layout.add_row_button.contains(point) {
                    self.perform(Action::ToggleAddRowPanel);
                    return;
                }
                if self.layout.add_column_button.contains(point) {
                    self.perform(Action::ToggleAddColumnPanel);
                    return;
                }
                let Some(hit) = self.layout.table.row_at(x, y).cloned() else {
                    return;
                };
                self.focus = Focus::Table;
                self.selected = hit.index;
                match hit.button_at(x) {
                    Some(RowButton::Edit) => {
                        self.begin_edit(hit.index);
                    }
                    Some(RowButton::Save) => {
                        self.save(hit.index);
                    }
                    Some(RowButton::Cancel) => {
                        self.cancel(hit.index);
                    }
                    None => self.begin_drag(hit.index),
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if !self.drag.is_active() {
                    return;
                }
                if let Some(hit) = self.layout.table.row_at(x, y).cloned() {
                    let bounds = RowBounds::from_lines(hit.area.y, hit.area.height);
                    // Pointer sits in the middle of its terminal cell
                    self.drag_over(hit.index, bounds, Some(f32::from(y) + 0.5));
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.end_drag(),
            _ => {}
        }
    }

    // ========== Rendering ==========

    /// Draw the whole screen
    pub fn draw(&mut self, f: &mut Frame) {
        let area = f.area();
        let column_panel_height = if self.show_add_column {
            self.column_panel.height(area.width)
        } else {
            0
        };
        let row_panel_height = if self.show_add_row {
            self.row_panel.height()
        } else {
            0
        };
        let hint_height = u16::from(self.config.display.show_key_hints);

        let [toolbar_area, column_area, row_area, table_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(column_panel_height),
            Constraint::Length(row_panel_height),
            Constraint::Min(3),
            Constraint::Length(hint_height),
        ])
        .areas(area);

        self.draw_toolbar(f, toolbar_area);

        let snapshot = self.state.snapshot();
        let mut cursor = None;
        if self.show_add_column {
            cursor = cursor.or(self.column_panel.render(
                f,
                column_area,
                &self.state,
                self.focus == Focus::ColumnInput,
                self.focus == Focus::ColumnList,
            ));
        }
        if self.show_add_row {
            cursor = cursor.or(self.row_panel.render(
                f,
                row_area,
                snapshot.columns(),
                self.focus == Focus::RowForm,
            ));
        }

        let capacity = row_capacity(table_area, self.config.display.effective_row_height());
        self.ensure_selected_visible(capacity);
        let ctx = self.render_context(capacity);
        self.layout.table = render_table(f, table_area, &ctx);
        if self.focus == Focus::Table {
            cursor = cursor.or(self.layout.table.cursor);
        }

        if self.config.display.show_key_hints {
            let hints = Paragraph::new(self.key_hints()).style(Style::default().fg(Color::DarkGray));
            f.render_widget(hints, hint_area);
        }

        if self.show_help {
            HelpWidget::render(f, area);
        } else if self.show_log {
            LogWidget::new(self.log_buffer.as_ref()).render(f, area);
        } else if let Some(position) = cursor {
            f.set_cursor_position(position);
        }
    }

    fn draw_toolbar(&mut self, f: &mut Frame, area: Rect) {
        let button = |active: bool| {
            let style = Style::default().add_modifier(Modifier::BOLD);
            if active {
                style.fg(Color::Black).bg(Color::Cyan)
            } else {
                style.fg(Color::Cyan)
            }
        };
        let add_row_width = ADD_ROW_LABEL.len() as u16;
        let add_column_width = ADD_COLUMN_LABEL.len() as u16;
        self.layout.add_row_button = Rect::new(area.x, area.y, add_row_width.min(area.width), 1);
        self.layout.add_column_button = Rect::new(
            area.x + add_row_width + 2,
            area.y,
            add_column_width.min(area.width.saturating_sub(add_row_width + 2)),
            1,
        );

        let line = Line::from(vec![
            Span::styled(ADD_ROW_LABEL, button(self.show_add_row)),
            Span::raw("  "),
            Span::styled(ADD_COLUMN_LABEL, button(self.show_add_column)),
        ]);
        f.render_widget(Paragraph::new(line), area);
    }

    fn ensure_selected_visible(&mut self, capacity: usize) {
        let capacity = capacity.max(1);
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + capacity {
            self.scroll_offset = self.selected + 1 - capacity;
        }
        let max_offset = self.state.row_count().saturating_sub(capacity);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    fn render_context(&self, capacity: usize) -> TableRenderContext {
        let display = &self.config.display;
        let theme = &self.config.theme;
        let columns = self.state.columns();

        let headers = columns
            .iter()
            .map(|c| {
                if display.uppercase_headers {
                    c.to_uppercase()
                } else {
                    c.clone()
                }
            })
            .collect();

        let rows = self
            .state
            .rows()
            .iter()
            .zip(self.row_views.iter())
            .enumerate()
            .skip(self.scroll_offset)
            .take(capacity)
            .map(|(index, (row, view))| {
                let has_cursor = self.focus == Focus::Table
                    && index == self.selected
                    && row.editing
                    && view.draft().is_some();
                RenderRow {
                    index,
                    cells: view.cell_texts(row, columns, &display.missing_cell_text),
                    editing: row.editing,
                    cursor: has_cursor
                        .then(|| (view.focused_col(), view.editor().visual_cursor())),
                }
            })
            .collect();

        TableRenderContext {
            headers,
            rows,
            total_rows: self.state.row_count(),
            selected_row: (self.state.row_count() > 0).then_some(self.selected),
            dragged_row: self.drag.item().map(|item| item.index),
            row_height: display.effective_row_height(),
            show_row_numbers: display.show_row_numbers,
            focused: self.focus == Focus::Table,
            header_color: theme.header(),
            selection_color: theme.selection(),
            drag_color: theme.drag(),
        }
    }

    fn key_hints(&self) -> String {
        let hints = match self.mode() {
            AppMode::Table => {
                "↑↓: Select | Shift+↑↓: Move row | e: Edit | a: Add Row | c: Add Column | Tab: Next panel | F1: Help | q: Quit"
            }
            AppMode::RowEdit => {
                "Editing row: Tab/Shift+Tab: Next/prev cell | Enter: Save | Esc: Cancel | Alt+A/Alt+C: Add Row/Column"
            }
            AppMode::AddColumn => "New column: Enter: Add | ↓: Checkboxes | Tab: Next panel | Esc: Table",
            AppMode::ColumnList => "Columns: ←→: Move | Space: Show/Hide | ↑ at start: Name input | Esc: Table",
            AppMode::AddRow => "New row: Tab: Next field | Enter: Add | Ctrl+D: Delete last row | Esc: Table",
        };
        hints.to_string()
    }

    // ========== Terminal loop ==========

    /// Set up the terminal, run until quit, and always restore the terminal
    pub fn run(mut self) -> Result<Self> {
        enable_raw_mode().map_err(|e| anyhow!("Failed to enable raw mode: {}", e))?;

        let mut stdout = io::stdout();
        let setup = if self.config.behavior.enable_mouse {
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        } else {
            execute!(stdout, EnterAlternateScreen)
        };
        if let Err(e) = setup {
            let _ = disable_raw_mode();
            return Err(anyhow!("Failed to set up terminal: {}", e));
        }

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = match Terminal::new(backend) {
            Ok(t) => t,
            Err(e) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
                return Err(anyhow!("Failed to create terminal: {}", e));
            }
        };

        let res = self.run_app(&mut terminal);

        let _ = disable_raw_mode();
        let _ = execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = terminal.show_cursor();

        res.map_err(|e| anyhow!("TUI error: {}", e))?;
        Ok(self)
    }

    pub fn run_app<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!(target: "app", "Starting with {} columns, {} rows", self.state.columns().len(), self.state.row_count());

        while !self.should_quit {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(100))? {
                let event = event::read()?;
                self.handle_event(&event);
            }
        }

        Ok(())
    }
}
