// Application settings
// Loaded from ~/.config/scriptview/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use scriptview_core::Theme;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Script
    /// Source used when none is given on the command line
    #[serde(rename = "script.source", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    // Theme
    /// Theme at startup. Toggling in the viewer is never written back.
    #[serde(rename = "theme.initial")]
    pub initial_theme: Theme,

    // Logging
    #[serde(rename = "log.file", skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: None,
            initial_theme: Theme::Light,
            log_file: None,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("scriptview")
            .join("settings.json")
    }

    /// Default log file location
    pub fn default_log_path() -> PathBuf {
        dirs::data_local_dir()
            .or_else(dirs::cache_dir)
            .unwrap_or_else(std::env::temp_dir)
            .join("scriptview")
            .join("scriptview.log")
    }

    /// Load settings from `path`. A missing file means defaults; the file is
    /// never created.
    pub fn load_at(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Load settings from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        Self::parse(&contents)
    }

    /// Parse settings JSON. Lines starting with `//` are comments.
    pub fn parse(contents: &str) -> Result<Self, String> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        if cleaned.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_json::from_str(&cleaned).map_err(|e| e.to_string())
    }

    /// Effective log file: settings value or the default location
    pub fn effective_log_file(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(Self::default_log_path)
    }
}
