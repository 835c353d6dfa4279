use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::trace;

use super::cell_value::CellValue;

/// Reserved key holding the edit-mode flag
pub const EDITING_KEY: &str = "editing";

/// One table entry: an insertion-ordered mapping from column key to value,
/// plus the edit-mode flag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowRecord {
    cells: Vec<(String, CellValue)>,
    pub editing: bool,
}

impl RowRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cell(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn with_editing(mut self, editing: bool) -> Self {
        self.editing = editing;
        self
    }

    /// Look up a stored cell. The reserved flag is not a cell.
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Look up a value the way the renderer sees it, including the flag
    pub fn value(&self, key: &str) -> Option<CellValue> {
        if key == EDITING_KEY {
            return Some(CellValue::Flag(self.editing));
        }
        self.get(key).cloned()
    }

    /// Text shown for `key`, or `placeholder` when the key is missing
    pub fn display(&self, key: &str, placeholder: &str) -> String {
        self.value(key)
            .map(|v| v.to_string())
            .unwrap_or_else(|| placeholder.to_string())
    }

    /// Insert or replace a cell, keeping the key's original position.
    /// Writes to the reserved key are dropped; the flag always wins.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        let key = key.into();
        if key == EDITING_KEY {
            trace!(target: "row", "Ignoring write to reserved key '{}'", EDITING_KEY);
            return;
        }
        let value = value.into();
        match self.cells.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.cells.push((key, value)),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        key == EDITING_KEY || self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Serialize for RowRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len() + 1))?;
        for (key, value) in &self.cells {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry(EDITING_KEY, &self.editing)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_keeps_insertion_order() {
        let mut row = RowRecord::new().with_cell("b", "1").with_cell("a", "2");
        row.set("b", "3");
        let keys: Vec<&str> = row.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(row.get("b"), Some(&CellValue::text("3")));
    }

    #[test]
    fn test_missing_key_uses_placeholder() {
        let row = RowRecord::new().with_cell("email", "max@gmail.com");
        assert_eq!(row.display("email", "undefined"), "max@gmail.com");
        assert_eq!(row.display("notes", "undefined"), "undefined");
    }

    #[test]
    fn test_reserved_key() {
        let mut row = RowRecord::new().with_editing(true);
        row.set(EDITING_KEY, "oops");
        assert!(row.editing);
        assert!(row.is_empty());
        assert_eq!(row.display(EDITING_KEY, "undefined"), "true");
        assert!(row.contains_key(EDITING_KEY));
    }

    #[test]
    fn test_serializes_flag_last() {
        let row = RowRecord::new().with_cell("email", "a@b.c");
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"email":"a@b.c","editing":false}"#);
    }
}
