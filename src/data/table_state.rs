//! Authoritative table state: the ordered column labels and row records.
//!
//! Every mutation goes through `Arc::make_mut`, so a [`TableSnapshot`] taken
//! before a change keeps seeing the lists exactly as they were.

use std::sync::Arc;
use tracing::{debug, info};

use super::row_record::RowRecord;
use super::seed;

/// Immutable view of the table shared with renderers
#[derive(Debug, Clone)]
pub struct TableSnapshot {
    columns: Arc<Vec<String>>,
    rows: Arc<Vec<RowRecord>>,
}

impl TableSnapshot {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[RowRecord] {
        &self.rows
    }
}

#[derive(Debug, Clone, Default)]
pub struct TableState {
    columns: Arc<Vec<String>>,
    rows: Arc<Vec<RowRecord>>,
}

impl TableState {
    pub fn new(columns: Vec<String>, rows: Vec<RowRecord>) -> Self {
        Self {
            columns: Arc::new(columns),
            rows: Arc::new(rows),
        }
    }

    /// State with the built-in columns and rows
    pub fn seeded() -> Self {
        Self::new(seed::initial_columns(), seed::initial_rows())
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            columns: Arc::clone(&self.columns),
            rows: Arc::clone(&self.rows),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[RowRecord] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&RowRecord> {
        self.rows.get(index)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Show (`checked`) or hide a column. Showing always appends, so a column
    /// hidden and shown again ends up last.
    pub fn toggle_column(&mut self, name: &str, checked: bool) {
        let columns = Arc::make_mut(&mut self.columns);
        if checked {
            columns.push(name.to_string());
        } else {
            columns.retain(|c| c != name);
        }
        debug!(target: "table", "Column '{}' checked={} -> {:?}", name, checked, columns);
    }

    /// Append a column from free text. Blank input is ignored.
    pub fn add_column(&mut self, text: &str) -> bool {
        let label = text.trim();
        if label.is_empty() {
            debug!(target: "table", "Ignoring blank column name");
            return false;
        }
        Arc::make_mut(&mut self.columns).push(label.to_string());
        info!(target: "table", "Added column '{}'", label);
        true
    }

    /// Append a row. New rows never start in edit mode.
    pub fn add_row(&mut self, record: RowRecord) {
        let record = record.with_editing(false);
        Arc::make_mut(&mut self.rows).push(record);
        info!(target: "table", "Added row, {} rows total", self.rows.len());
    }

    /// Remove the last row, if any
    pub fn delete_last_row(&mut self) -> Option<RowRecord> {
        if self.rows.is_empty() {
            debug!(target: "table", "Delete on empty table ignored");
            return None;
        }
        let removed = Arc::make_mut(&mut self.rows).pop();
        info!(target: "table", "Deleted last row, {} rows left", self.rows.len());
        removed
    }

    /// Move the row at `from` to `to`, shifting the rows in between.
    /// A destination past the end means "last".
    pub fn move_row(&mut self, from: usize, to: usize) -> bool {
        let len = self.rows.len();
        if from >= len {
            debug!(target: "table", "move_row({}, {}) out of range (len {})", from, to, len);
            return false;
        }
        let to = to.min(len - 1);
        if from == to {
            return false;
        }
        let rows = Arc::make_mut(&mut self.rows);
        let row = rows.remove(from);
        rows.insert(to, row);
        debug!(target: "table", "Moved row {} -> {}", from, to);
        true
    }

    /// Replace the row at `index` with a modified copy
    pub fn update_row<F>(&mut self, index: usize, f: F) -> bool
    where
        F: FnOnce(&mut RowRecord),
    {
        if index >= self.rows.len() {
            debug!(target: "table", "update_row({}) out of range", index);
            return false;
        }
        let rows = Arc::make_mut(&mut self.rows);
        f(&mut rows[index]);
        true
    }

    pub fn set_editing(&mut self, index: usize, editing: bool) -> bool {
        self.update_row(index, |row| row.editing = editing)
    }
}
