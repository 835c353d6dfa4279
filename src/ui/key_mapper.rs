// Maps keyboard input to actions based on the current mode

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::ui::actions::{Action, AppMode};

type KeyCombo = (KeyCode, KeyModifiers);

/// Maps keyboard input to actions based on context
pub struct KeyMapper {
    /// Mappings that work in every mode
    global_mappings: HashMap<KeyCombo, Action>,

    /// Mode-specific mappings
    mode_mappings: HashMap<AppMode, HashMap<KeyCombo, Action>>,
}

impl KeyMapper {
    pub fn new(vim_mode: bool) -> Self {
        let mut mapper = Self {
            global_mappings: HashMap::new(),
            mode_mappings: HashMap::new(),
        };

        mapper.init_global_mappings();
        mapper.init_table_mappings(vim_mode);
        mapper.init_row_edit_mappings();
        mapper.init_add_column_mappings();
        mapper.init_column_list_mappings(vim_mode);
        mapper.init_add_row_mappings();
        mapper
    }

    fn init_global_mappings(&mut self) {
        use KeyCode::*;
        use KeyModifiers as Mod;

        self.global_mappings.insert((F(1), Mod::NONE), Action::ShowHelp);
        self.global_mappings.insert((F(5), Mod::NONE), Action::ShowLog);
        self.global_mappings
            .insert((Char('c'), Mod::CONTROL), Action::ForceQuit);
    }

    fn init_table_mappings(&mut self, vim_mode: bool) {
        use KeyCode::*;
        use KeyModifiers as Mod;

        let mut mappings = HashMap::new();

        mappings.insert((Up, Mod::NONE), Action::SelectUp);
        mappings.insert((Down, Mod::NONE), Action::SelectDown);
        mappings.insert((Up, Mod::SHIFT), Action::MoveRowUp);
        mappings.insert((Down, Mod::SHIFT), Action::MoveRowDown);

        if vim_mode {
            mappings.insert((Char('k'), Mod::NONE), Action::SelectUp);
            mappings.insert((Char('j'), Mod::NONE), Action::SelectDown);
            mappings.insert((Char('K'), Mod::NONE), Action::MoveRowUp);
            mappings.insert((Char('J'), Mod::NONE), Action::MoveRowDown);
        }

        mappings.insert((Char('e'), Mod::NONE), Action::BeginEdit);
        mappings.insert((Enter, Mod::NONE), Action::BeginEdit);
        mappings.insert((Char('a'), Mod::NONE), Action::ToggleAddRowPanel);
        mappings.insert((Char('c'), Mod::NONE), Action::ToggleAddColumnPanel);
        mappings.insert((Tab, Mod::NONE), Action::FocusNext);
        mappings.insert((Char('?'), Mod::NONE), Action::ShowHelp);
        mappings.insert((Char('q'), Mod::NONE), Action::Quit);

        self.mode_mappings.insert(AppMode::Table, mappings);
    }

    fn init_row_edit_mappings(&mut self) {
        use KeyCode::*;
        use KeyModifiers as Mod;

        let mut mappings = HashMap::new();

        mappings.insert((Up, Mod::NONE), Action::SelectUp);
        mappings.insert((Down, Mod::NONE), Action::SelectDown);
        mappings.insert((Up, Mod::SHIFT), Action::MoveRowUp);
        mappings.insert((Down, Mod::SHIFT), Action::MoveRowDown);
        mappings.insert((Tab, Mod::NONE), Action::NextCell);
        mappings.insert((BackTab, Mod::NONE), Action::PrevCell);
        mappings.insert((Enter, Mod::NONE), Action::SaveEdit);
        mappings.insert((Esc, Mod::NONE), Action::CancelEdit);
        // Plain letters are cell text here
        mappings.insert((Char('a'), Mod::ALT), Action::ToggleAddRowPanel);
        mappings.insert((Char('c'), Mod::ALT), Action::ToggleAddColumnPanel);

        self.mode_mappings.insert(AppMode::RowEdit, mappings);
    }

    fn init_add_column_mappings(&mut self) {
        use KeyCode::*;
        use KeyModifiers as Mod;

        let mut mappings = HashMap::new();

        mappings.insert((Enter, Mod::NONE), Action::CommitColumn);
        mappings.insert((Down, Mod::NONE), Action::FocusColumnList);
        mappings.insert((Tab, Mod::NONE), Action::FocusNext);
        mappings.insert((Esc, Mod::NONE), Action::FocusTable);

        self.mode_mappings.insert(AppMode::AddColumn, mappings);
    }

    fn init_column_list_mappings(&mut self, vim_mode: bool) {
        use KeyCode::*;
        use KeyModifiers as Mod;

        let mut mappings = HashMap::new();

        mappings.insert((Up, Mod::NONE), Action::ColumnCursorUp);
        mappings.insert((Down, Mod::NONE), Action::ColumnCursorDown);
        mappings.insert((Left, Mod::NONE), Action::ColumnCursorUp);
        mappings.insert((Right, Mod::NONE), Action::ColumnCursorDown);
        if vim_mode {
            mappings.insert((Char('k'), Mod::NONE), Action::ColumnCursorUp);
            mappings.insert((Char('j'), Mod::NONE), Action::ColumnCursorDown);
        }
        mappings.insert((Char(' '), Mod::NONE), Action::ToggleColumnAtCursor);
        mappings.insert((Enter, Mod::NONE), Action::ToggleColumnAtCursor);
        mappings.insert((Tab, Mod::NONE), Action::FocusNext);
        mappings.insert((Esc, Mod::NONE), Action::FocusTable);
        mappings.insert((Char('q'), Mod::NONE), Action::Quit);

        self.mode_mappings.insert(AppMode::ColumnList, mappings);
    }

    fn init_add_row_mappings(&mut self) {
        use KeyCode::*;
        use KeyModifiers as Mod;

        let mut mappings = HashMap::new();

        mappings.insert((Enter, Mod::NONE), Action::CommitRow);
        mappings.insert((Char('d'), Mod::CONTROL), Action::DeleteLastRow);
        mappings.insert((Tab, Mod::NONE), Action::NextField);
        mappings.insert((BackTab, Mod::NONE), Action::PrevField);
        mappings.insert((Esc, Mod::NONE), Action::FocusTable);

        self.mode_mappings.insert(AppMode::AddRow, mappings);
    }

    /// Map a key event to an action. `None` means the key is unbound here;
    /// text modes hand such keys to their input field.
    pub fn map_key(&self, key: KeyEvent, mode: AppMode) -> Option<Action> {
        let key_combo = normalize(key);

        if let Some(action) = self.global_mappings.get(&key_combo) {
            return Some(action.clone());
        }

        self.mode_mappings
            .get(&mode)
            .and_then(|mappings| mappings.get(&key_combo))
            .cloned()
    }
}

/// Terminals disagree on whether upper-case letters and BackTab carry SHIFT
fn normalize(key: KeyEvent) -> KeyCombo {
    match key.code {
        KeyCode::Char(_) | KeyCode::BackTab => (key.code, key.modifiers.difference(KeyModifiers::SHIFT)),
        _ => (key.code, key.modifiers),
    }
}
