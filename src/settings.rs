//! Game and editor settings
//!
//! Read from a JSON file next to the executable's working directory. Any
//! field left out of the file takes its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default settings file name
pub const SETTINGS_FILE: &str = "settings.json";

/// File-backed configuration shared by the game and the editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Files ===
    /// Level list written by the editor and read by the game
    pub level_file: PathBuf,
    /// Directory of tile/enemy sprites
    pub asset_dir: PathBuf,
    /// Backdrop for the game window (optional on disk)
    pub game_background: PathBuf,
    /// Backdrop for the editor canvas (optional on disk)
    pub editor_background: PathBuf,

    // === Simulation ===
    /// Fixed RNG seed; a time-derived seed is used when absent
    pub seed: Option<u64>,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level_file: PathBuf::from("level_data.json"),
            asset_dir: PathBuf::from("assets"),
            game_background: PathBuf::from("assets/background/BG.png"),
            editor_background: PathBuf::from("assets/background/background.png"),
            seed: None,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str(&text) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring bad settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load from [`SETTINGS_FILE`] in the working directory
    pub fn load_default() -> Self {
        Self::load(Path::new(SETTINGS_FILE))
    }

    /// The configured seed, or one derived from the clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
