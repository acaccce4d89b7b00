//! Configuration file support for episode-browser.
//!
//! This module provides functionality for loading and saving user preferences
//! (colors and keybindings) from a TOML configuration file.

use crate::error::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::warn;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// User configuration settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Theme colors
    #[serde(default)]
    pub colors: ColorScheme,

    /// Key bindings
    #[serde(default)]
    pub keybindings: Keybindings,
}

/// Named theme colors, as color strings ("white", "dark gray", "#1e1e2e").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScheme {
    /// Panel background
    pub background: String,
    /// Regular text
    pub text: String,
    /// Borders of panels and the interval selector
    pub border: String,
    /// Background of the cell under the cursor
    pub hover: String,
    /// Foreground of the selected episode
    pub selected: String,
    /// Foreground of every other episode
    pub unselected: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            background: "reset".to_string(),
            text: "white".to_string(),
            border: "dark gray".to_string(),
            hover: "dark gray".to_string(),
            selected: "white".to_string(),
            unselected: "gray".to_string(),
        }
    }
}

/// Resolved theme colors ready for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub border: Color,
    pub hover: Color,
    pub selected: Color,
    pub unselected: Color,
}

impl Default for Theme {
    fn default() -> Self {
        ColorScheme::default().resolve()
    }
}

impl ColorScheme {
    /// Parse every color, falling back to the default for invalid entries.
    pub fn resolve(&self) -> Theme {
        let defaults = ColorScheme::default();
        let parse = |name: &str, value: &str, fallback: &str| {
            Color::from_str(value).unwrap_or_else(|_| {
                warn!(
                    "Invalid color '{}' for {}, using '{}'",
                    value, name, fallback
                );
                Color::from_str(fallback).unwrap_or(Color::Reset)
            })
        };

        Theme {
            background: parse("background", &self.background, &defaults.background),
            text: parse("text", &self.text, &defaults.text),
            border: parse("border", &self.border, &defaults.border),
            hover: parse("hover", &self.hover, &defaults.hover),
            selected: parse("selected", &self.selected, &defaults.selected),
            unselected: parse("unselected", &self.unselected, &defaults.unselected),
        }
    }
}

/// Key bindings, each a list of key names ("k", "up", "enter", "tab").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keybindings {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub select: Vec<String>,
    pub toggle_focus: Vec<String>,
    pub help: Vec<String>,
    pub quit: Vec<String>,
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Default for Keybindings {
    fn default() -> Self {
        Self {
            up: keys(&["k", "up"]),
            down: keys(&["j", "down"]),
            left: keys(&["h", "left"]),
            right: keys(&["l", "right"]),
            select: keys(&["enter"]),
            toggle_focus: keys(&["tab"]),
            help: keys(&["?"]),
            quit: keys(&["q"]),
        }
    }
}

impl Keybindings {
    /// Check whether `key` matches any of the names in `binding`.
    pub fn matches(&self, binding: &[String], key: &KeyEvent) -> bool {
        binding.iter().any(|name| key_matches(name, key))
    }
}

fn key_matches(name: &str, key: &KeyEvent) -> bool {
    let lower = name.to_lowercase();
    match lower.as_str() {
        "up" => key.code == KeyCode::Up,
        "down" => key.code == KeyCode::Down,
        "left" => key.code == KeyCode::Left,
        "right" => key.code == KeyCode::Right,
        "enter" => key.code == KeyCode::Enter,
        "tab" => key.code == KeyCode::Tab,
        "esc" => key.code == KeyCode::Esc,
        "backspace" => key.code == KeyCode::Backspace,
        "space" => key.code == KeyCode::Char(' '),
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    key.code == KeyCode::Char(c) && !key.modifiers.contains(KeyModifiers::CONTROL)
                }
                _ => false,
            }
        }
    }
}

impl Config {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the path to the config file.
    ///
    /// Returns ~/.config/episode-browser/config.toml on Linux,
    /// or a platform-appropriate location on other systems.
    pub fn get_config_path() -> std::result::Result<PathBuf, io::Error> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Could not find config directory")
            })?
            .join("episode-browser");

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Load config from `path`, or defaults if there is no file there.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Create a default config file if one doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn create_default_if_missing() -> Result<PathBuf> {
        let path = Self::get_config_path()?;
        Self::create_default_at(&path)?;
        Ok(path)
    }

    /// Write the default config to `path` unless a file is already there.
    /// Returns whether a file was written.
    pub fn create_default_at(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        Self::new().save_to(path)?;
        Ok(true)
    }
}
