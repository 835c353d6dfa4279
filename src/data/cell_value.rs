use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell value in a row record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Flag(bool),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Text(String::new())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Flag(value)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(CellValue::text("Max").to_string(), "Max");
        assert_eq!(CellValue::Flag(true).to_string(), "true");
        assert_eq!(CellValue::default().to_string(), "");
    }

    #[test]
    fn test_json_shape_is_untagged() {
        let json = serde_json::to_string(&vec![CellValue::text("a"), CellValue::Flag(false)]).unwrap();
        assert_eq!(json, r#"["a",false]"#);
    }
}
