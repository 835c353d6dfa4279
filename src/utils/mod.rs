//! Utility functions and helpers
//!
//! Application paths and the logging setup used throughout the application.

pub mod app_paths;
pub mod dual_logging;
pub mod logging;
