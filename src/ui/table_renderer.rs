// Pure table rendering function that depends only on TableRenderContext
// Returns the screen geometry of every drawn row for mouse hit-testing

use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::table_render_context::{RenderRow, TableRenderContext};

const ROW_NUMBER_WIDTH: u16 = 4;
const ACTION_WIDTH: u16 = 15;
const COLUMN_SPACING: u16 = 1;
/// Header line plus its bottom margin
const HEADER_LINES: u16 = 2;

const EDIT_LABEL: &str = "[Edit]";
const SAVE_LABEL: &str = "[Save]";
const CANCEL_LABEL: &str = "[Cancel]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowButton {
    Edit,
    Save,
    Cancel,
}

/// Where a rendered row sits on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowHitbox {
    pub index: usize,
    pub area: Rect,
    pub action: Rect,
    pub editing: bool,
}

impl RowHitbox {
    /// The action button under column `x`, if any
    pub fn button_at(&self, x: u16) -> Option<RowButton> {
        if x < self.action.x || x >= self.action.right() {
            return None;
        }
        let offset = x - self.action.x;
        let save_width = SAVE_LABEL.len() as u16;
        let cancel_start = save_width + 1;
        let cancel_end = cancel_start + CANCEL_LABEL.len() as u16;
        match (self.editing, offset) {
            (false, o) if o < EDIT_LABEL.len() as u16 => Some(RowButton::Edit),
            (true, o) if o < save_width => Some(RowButton::Save),
            (true, o) if (cancel_start..cancel_end).contains(&o) => Some(RowButton::Cancel),
            _ => None,
        }
    }
}

/// Geometry of the last rendered table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableGeometry {
    pub rows: Vec<RowHitbox>,
    pub cursor: Option<Position>,
    /// How many rows fit in the viewport
    pub capacity: usize,
}

impl TableGeometry {
    pub fn row_at(&self, x: u16, y: u16) -> Option<&RowHitbox> {
        self.rows
            .iter()
            .find(|hit| hit.area.contains(Position::new(x, y)))
    }
}

/// Number of rows of `row_height` lines that fit in `area`
pub fn row_capacity(area: Rect, row_height: u16) -> usize {
    let inner_height = area.height.saturating_sub(2 + HEADER_LINES);
    usize::from(inner_height / row_height.max(1))
}

/// Render the table using only the provided context
pub fn render_table(f: &mut Frame, area: Rect, ctx: &TableRenderContext) -> TableGeometry {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Table ({} rows)", ctx.total_rows));
    let inner = block.inner(area);
    let capacity = row_capacity(area, ctx.row_height);

    if ctx.headers.is_empty() {
        let empty = Paragraph::new("No visible columns. Press 'c' to add or show one.")
            .style(Style::default().fg(ctx.header_color))
            .block(block);
        f.render_widget(empty, area);
        return TableGeometry {
            capacity,
            ..TableGeometry::default()
        };
    }

    let widths = column_constraints(ctx);
    let column_areas = Layout::horizontal(widths.clone())
        .spacing(COLUMN_SPACING)
        .split(inner);
    let first_data_col = usize::from(ctx.show_row_numbers);
    let action_area = column_areas[column_areas.len() - 1];

    let header = build_header_row(ctx);
    let rows: Vec<Row> = ctx.rows.iter().map(|row| build_data_row(ctx, row)).collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(COLUMN_SPACING);
    f.render_widget(table, area);

    let row_height = ctx.row_height.max(1);
    let pad_top = (row_height - 1) / 2;
    let mut geometry = TableGeometry {
        capacity,
        ..TableGeometry::default()
    };

    for (slot, row) in ctx.rows.iter().enumerate() {
        let y = inner.y + HEADER_LINES + slot as u16 * row_height;
        if y >= inner.bottom() {
            break;
        }
        let height = row_height.min(inner.bottom() - y);
        let row_area = Rect::new(inner.x, y, inner.width, height);
        geometry.rows.push(RowHitbox {
            index: row.index,
            area: row_area,
            action: Rect::new(action_area.x, y, action_area.width, height),
            editing: row.editing,
        });

        if let Some((col, offset)) = row.cursor {
            if let Some(cell_area) = column_areas.get(first_data_col + col) {
                let x = cell_area.x + (offset as u16).min(cell_area.width.saturating_sub(1));
                if pad_top < height {
                    geometry.cursor = Some(Position::new(x, y + pad_top));
                }
            }
        }
    }

    geometry
}

fn column_constraints(ctx: &TableRenderContext) -> Vec<Constraint> {
    let mut widths = Vec::with_capacity(ctx.headers.len() + 2);
    if ctx.show_row_numbers {
        widths.push(Constraint::Length(ROW_NUMBER_WIDTH));
    }
    widths.extend(ctx.headers.iter().map(|_| Constraint::Fill(1)));
    widths.push(Constraint::Length(ACTION_WIDTH));
    widths
}

fn build_header_row(ctx: &TableRenderContext) -> Row<'static> {
    let style = Style::default()
        .fg(ctx.header_color)
        .add_modifier(Modifier::BOLD);

    let mut cells: Vec<Cell> = Vec::new();
    if ctx.show_row_numbers {
        cells.push(Cell::from("#").style(style));
    }
    cells.extend(ctx.headers.iter().map(|h| Cell::from(h.clone()).style(style)));
    cells.push(Cell::from(""));

    Row::new(cells).bottom_margin(1)
}

/// Text padded with blank lines so it sits on the row's middle line
fn padded(text: String, pad_top: u16) -> Text<'static> {
    let mut lines: Vec<Line> = (0..pad_top).map(|_| Line::default()).collect();
    lines.push(Line::from(text));
    Text::from(lines)
}

fn build_data_row(ctx: &TableRenderContext, row: &RenderRow) -> Row<'static> {
    let row_height = ctx.row_height.max(1);
    let pad_top = (row_height - 1) / 2;

    let mut row_style = Style::default();
    if ctx.is_dragged(row.index) {
        row_style = row_style.bg(ctx.drag_color).fg(ratatui::style::Color::Black);
    } else if ctx.is_selected(row.index) {
        row_style = row_style.bg(ctx.selection_color);
    }

    let mut cells: Vec<Cell> = Vec::new();
    if ctx.show_row_numbers {
        cells.push(Cell::from(padded((row.index + 1).to_string(), pad_top)));
    }

    for (col, text) in row.cells.iter().enumerate() {
        let mut style = Style::default();
        if row.editing {
            style = style.add_modifier(Modifier::UNDERLINED);
            if matches!(row.cursor, Some((c, _)) if c == col) {
                style = style.add_modifier(Modifier::BOLD);
            }
        }
        cells.push(Cell::from(padded(text.clone(), pad_top)).style(style));
    }

    let actions = if row.editing {
        format!("{} {}", SAVE_LABEL, CANCEL_LABEL)
    } else {
        EDIT_LABEL.to_string()
    };
    cells.push(Cell::from(padded(actions, pad_top)));

    Row::new(cells).height(row_height).style(row_style)
}
