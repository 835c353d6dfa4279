//! Configuration module
//!
//! TOML-backed settings for display, key bindings, behavior and theme.

pub mod config;
