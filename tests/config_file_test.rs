//! Loading and saving the TOML config file

use dd_table::config::config::Config;
use dd_table::data::KeyStyle;
use ratatui::style::Color;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_round_trip_through_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.display.row_height = 5;
    config.display.missing_cell_text = "n/a".to_string();
    config.behavior.unify_column_keys = true;
    config.theme.header_color = "cyan".to_string();
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.display.row_height, 5);
    assert_eq!(loaded.display.missing_cell_text, "n/a");
    assert!(loaded.behavior.unify_column_keys);
    assert_eq!(loaded.behavior.add_row_key_style(), KeyStyle::CamelCase);
    assert_eq!(loaded.theme.header(), Color::Cyan);
}

#[test]
fn test_missing_keys_use_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[display]\nshow_row_numbers = true\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert!(config.display.show_row_numbers);
    assert_eq!(config.display.row_height, 3);
    assert_eq!(config.display.missing_cell_text, "undefined");
    assert!(config.keybindings.vim_mode);
    assert!(config.behavior.enable_mouse);
    assert!(config.behavior.seed_rows);
    assert_eq!(config.behavior.add_row_key_style(), KeyStyle::Compact);
}

#[test]
fn test_commented_template_parses() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, Config::create_default_with_comments()).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.display.row_height, 3);
    assert_eq!(config.theme.header(), Color::Magenta);
    assert_eq!(config.theme.drag(), Color::Yellow);
    assert!(!config.behavior.unify_column_keys);
    // The color hint line is part of the template, not the end of it
    assert!(Config::create_default_with_comments().contains("\"#rrggbb\""));
}

#[test]
fn test_invalid_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[display\nrow_height = ").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("broken.toml"));
}

#[test]
fn test_unknown_color_falls_back() {
    let mut config = Config::default();
    config.theme.drag_color = "not-a-color".to_string();
    assert_eq!(config.theme.drag(), Color::Yellow);
}

#[test]
fn test_zero_row_height_is_clamped() {
    let mut config = Config::default();
    config.display.row_height = 0;
    assert_eq!(config.display.effective_row_height(), 1);
}
