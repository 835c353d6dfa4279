// Table rendering context that encapsulates all data needed for rendering
// This decouples the table renderer from the app's internals

use ratatui::style::Color;

/// One row as the renderer sees it
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRow {
    /// Position in the full row list
    pub index: usize,

    /// Cell texts in column order
    pub cells: Vec<String>,

    /// Whether the row shows inputs and Save/Cancel
    pub editing: bool,

    /// Column holding the text cursor, with the cursor's visual offset
    pub cursor: Option<(usize, usize)>,
}

/// All the data needed to render the table, collected in one place
#[derive(Debug, Clone)]
pub struct TableRenderContext {
    /// Header labels in column order (already cased for display)
    pub headers: Vec<String>,

    /// Rows in the viewport, top to bottom
    pub rows: Vec<RenderRow>,

    /// Total number of rows in the table
    pub total_rows: usize,

    /// Selected row (absolute index)
    pub selected_row: Option<usize>,

    /// Row currently carried by a mouse drag (absolute index)
    pub dragged_row: Option<usize>,

    /// Terminal lines per row
    pub row_height: u16,

    pub show_row_numbers: bool,

    /// Whether keyboard focus is on the table
    pub focused: bool,

    pub header_color: Color,
    pub selection_color: Color,
    pub drag_color: Color,
}

impl TableRenderContext {
    pub fn is_selected(&self, index: usize) -> bool {
        self.focused && self.selected_row == Some(index)
    }

    pub fn is_dragged(&self, index: usize) -> bool {
        self.dragged_row == Some(index)
    }
}
