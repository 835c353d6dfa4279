use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::data::KeyStyle;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub keybindings: KeybindingConfig,
    pub behavior: BehaviorConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Terminal lines per table row; drag reorders at the row's midpoint
    pub row_height: u16,

    /// Show row numbers in front of each row
    pub show_row_numbers: bool,

    /// Render column headers upper-cased
    pub uppercase_headers: bool,

    /// Text shown for a column the row has no value for
    pub missing_cell_text: String,

    /// Show the key hint line at the bottom
    pub show_key_hints: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    /// Whether to use vim-style keybindings (j/k, J/K)
    pub vim_mode: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Capture the mouse for drag-to-reorder and clickable buttons
    pub enable_mouse: bool,

    /// Start with the built-in sample rows
    pub seed_rows: bool,

    /// Make the add-row form use the same key derivation as the row renderer
    pub unify_column_keys: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Column header color: "magenta", "cyan", "yellow", ...
    pub header_color: String,

    /// Background of the selected row
    pub selection_color: String,

    /// Background of the row being dragged
    pub drag_color: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            row_height: 3,
            show_row_numbers: false,
            uppercase_headers: true,
            missing_cell_text: "undefined".to_string(),
            show_key_hints: true,
        }
    }
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self { vim_mode: true }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            enable_mouse: true,
            seed_rows: true,
            unify_column_keys: false,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            header_color: "magenta".to_string(),
            selection_color: "blue".to_string(),
            drag_color: "yellow".to_string(),
        }
    }
}

impl DisplayConfig {
    pub fn effective_row_height(&self) -> u16 {
        self.row_height.max(1)
    }
}

impl BehaviorConfig {
    /// Key derivation used by the add-row form
    pub fn add_row_key_style(&self) -> KeyStyle {
        if self.unify_column_keys {
            KeyStyle::CamelCase
        } else {
            KeyStyle::Compact
        }
    }
}

impl ThemeConfig {
    pub fn header(&self) -> Color {
        parse_color(&self.header_color, Color::Magenta)
    }

    pub fn selection(&self) -> Color {
        parse_color(&self.selection_color, Color::Blue)
    }

    pub fn drag(&self) -> Color {
        parse_color(&self.drag_color, Color::Yellow)
    }
}

/// Parse a color name, falling back when it is unknown
pub fn parse_color(name: &str, fallback: Color) -> Color {
    match name.parse::<Color>() {
        Ok(color) => color,
        Err(_) => {
            warn!(target: "config", "Unknown color '{}', using {:?}", name, fallback);
            fallback
        }
    }
}

impl Config {
    /// Load config from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        debug!(target: "config", "Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to an explicit file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("dd-table").join("config.toml"))
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r##"# dd-table Configuration File
# Location: ~/.config/dd-table/config.toml (Linux)
#           %APPDATA%\dd-table\config.toml (Windows)

[display]
# Terminal lines per table row. Dragging a row swaps it with its neighbour
# once the pointer passes the middle line, so 3 gives the smoothest drag.
row_height = 3

# Show row numbers in front of each row
show_row_numbers = false

# Render column headers in upper case
uppercase_headers = true

# Text shown when a row has no value for a column
missing_cell_text = "undefined"

# Show the key hint line at the bottom of the screen
show_key_hints = true

[keybindings]
# Use vim-style keybindings (j/k to move, J/K to reorder rows)
vim_mode = true

[behavior]
# Capture the mouse for drag-to-reorder and clickable buttons
enable_mouse = true

# Start with the built-in sample rows
seed_rows = true

# The add-row form and the row renderer derive storage keys from column
# labels differently ("first name" -> "firstname" vs "firstName").
# Set to true to make the form use the renderer's derivation.
unify_column_keys = false

[theme]
# Colors: "black", "red", "green", "yellow", "blue", "magenta", "cyan",
# "gray", "white", or "#rrggbb"
header_color = "magenta"
selection_color = "blue"
drag_color = "yellow"
"##
        .to_string()
    }
}
