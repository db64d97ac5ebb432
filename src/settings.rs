use std::path::PathBuf;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::geometry::Constraints;
use crate::placement::DEFAULT_PLACEMENT_INSET;

static SETTINGS_PATH: Lazy<PathBuf> = Lazy::new(|| {
    dirs_next::config_dir()
        .map(|dir| dir.join("companion_shell").join("settings.json"))
        .unwrap_or_else(|| PathBuf::from("settings.json"))
});

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// When enabled the application initialises the logger at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
    /// Window size on first launch.
    #[serde(default = "default_window_size")]
    pub window_size: (i32, i32),
    /// Smallest size the window may be resized to.
    #[serde(default = "default_min_size")]
    pub min_size: (i32, i32),
    /// Largest size the window may be resized to.
    #[serde(default = "default_max_size")]
    pub max_size: (i32, i32),
    /// Inset from the bottom-right display corner used for the initial
    /// window position.
    #[serde(default = "default_placement_inset")]
    pub placement_inset: (i32, i32),
}

fn default_window_size() -> (i32, i32) {
    (420, 640)
}

fn default_min_size() -> (i32, i32) {
    (300, 250)
}

fn default_max_size() -> (i32, i32) {
    (1200, 900)
}

fn default_placement_inset() -> (i32, i32) {
    DEFAULT_PLACEMENT_INSET
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            window_size: default_window_size(),
            min_size: default_min_size(),
            max_size: default_max_size(),
            placement_inset: default_placement_inset(),
        }
    }
}

impl Settings {
    /// Location of the settings file under the user configuration
    /// directory.
    pub fn default_path() -> &'static std::path::Path {
        &SETTINGS_PATH
    }

    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Size limits for the resize logic. Invalid limits fall back to the
    /// defaults rather than propagating a broken configuration.
    pub fn constraints(&self) -> Constraints {
        let (min_width, min_height) = self.min_size;
        let (max_width, max_height) = self.max_size;
        if min_width > max_width || min_height > max_height || min_width <= 0 || min_height <= 0 {
            tracing::warn!(
                min = ?self.min_size,
                max = ?self.max_size,
                "configured size limits are invalid; using defaults"
            );
            return Constraints::default();
        }
        Constraints {
            min_width,
            min_height,
            max_width,
            max_height,
        }
    }
}
