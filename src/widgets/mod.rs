//! UI widgets for the TUI application
//!
//! The add-column and add-row panels and the help and log overlays.

pub mod column_panel;
pub mod help_widget;
pub mod log_widget;
pub mod row_panel;
