//! Table data model
//!
//! Column labels, key derivation, row records and the owned table state
//! that the UI layer mutates.

pub mod cell_value;
pub mod column_key;
pub mod row_record;
pub mod seed;
pub mod table_state;

pub use cell_value::CellValue;
pub use column_key::{column_to_key, to_camel_case, KeyStyle};
pub use row_record::{RowRecord, EDITING_KEY};
pub use table_state::{TableSnapshot, TableState};
