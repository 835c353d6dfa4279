// Action system for UI operations
// Key and mouse input is mapped to these before anything touches the table

/// Where keyboard input currently goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppMode {
    /// Navigating rows; the selected row is not being edited
    Table,
    /// The selected row is in edit mode; typing goes to its draft
    RowEdit,
    /// Typing a new column name
    AddColumn,
    /// Moving through the column checkboxes
    ColumnList,
    /// Filling in the add-row form
    AddRow,
}

impl AppMode {
    /// Modes where unmapped keys are text input
    pub fn accepts_text(&self) -> bool {
        matches!(self, AppMode::RowEdit | AppMode::AddColumn | AppMode::AddRow)
    }
}

/// All possible actions that can be triggered in the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Row selection and reorder
    SelectUp,
    SelectDown,
    MoveRowUp,
    MoveRowDown,

    // Row editing
    BeginEdit,
    SaveEdit,
    CancelEdit,
    NextCell,
    PrevCell,

    // Panels
    ToggleAddRowPanel,
    ToggleAddColumnPanel,
    FocusNext,
    FocusTable,

    // Add-column panel
    CommitColumn,
    FocusColumnList,
    ColumnCursorUp,
    ColumnCursorDown,
    ToggleColumnAtCursor,

    // Add-row panel
    CommitRow,
    DeleteLastRow,
    NextField,
    PrevField,

    // Overlays
    ShowHelp,
    ShowLog,

    // Application control
    Quit,
    ForceQuit,
}
