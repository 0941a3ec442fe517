//! Level file format and loading
//!
//! A level file is a JSON list of levels; each level is a list of
//! `{"asset": name, "x": col, "y": row}` records in grid units. The editor
//! appends one level per save and the game reads the whole file once.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::assets::AssetId;
use crate::consts::MAX_GRID_COORD;

/// Errors raised while reading or writing level files
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("level file not found or empty: {0}")]
    MissingFile(PathBuf),

    #[error("level file {path} is corrupt: {reason}")]
    CorruptFormat { path: PathBuf, reason: String },

    #[error("level file {0} contains no levels")]
    NoLevels(PathBuf),

    #[error("level {index} out of range ({len} levels loaded)")]
    OutOfRange { index: usize, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode level data: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One asset placed on the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedTile {
    #[serde(default)]
    pub asset: AssetId,
    #[serde(default, deserialize_with = "grid_coord")]
    pub x: i32,
    #[serde(default, deserialize_with = "grid_coord")]
    pub y: i32,
}

/// Accept integer or float grid coordinates, truncating toward zero.
/// Values beyond `MAX_GRID_COORD` are rejected.
fn grid_coord<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() || raw.abs() > f64::from(MAX_GRID_COORD) {
        return Err(serde::de::Error::custom(format!(
            "grid coordinate {} out of range (limit {})",
            raw, MAX_GRID_COORD
        )));
    }
    Ok(raw.trunc() as i32)
}

impl PlacedTile {
    pub fn new(asset: impl Into<AssetId>, x: i32, y: i32) -> Self {
        Self {
            asset: asset.into(),
            x,
            y,
        }
    }
}

/// One playable stage, in placement order
pub type Level = Vec<PlacedTile>;

/// Every level from a level file, in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSet {
    levels: Vec<Level>,
}

impl LevelSet {
    /// Build a level set from already-parsed levels (must be non-empty)
    pub fn new(levels: Vec<Level>) -> Option<Self> {
        if levels.is_empty() {
            None
        } else {
            Some(Self { levels })
        }
    }

    /// Read and validate a level file
    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let levels = read_level_file(path)?;
        if levels.is_empty() {
            return Err(LevelError::NoLevels(path.to_path_buf()));
        }
        log::info!("Loaded {} levels from {}", levels.len(), path.display());
        Ok(Self { levels })
    }

    /// Bounds-checked access to one level
    pub fn current(&self, index: usize) -> Result<&Level, LevelError> {
        self.levels.get(index).ok_or(LevelError::OutOfRange {
            index,
            len: self.levels.len(),
        })
    }

    // Never empty, so no is_empty
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn has_next(&self, index: usize) -> bool {
        index + 1 < self.levels.len()
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }
}

/// Read a level file as a raw JSON list, without checking its records
fn read_level_list(path: &Path) -> Result<Vec<serde_json::Value>, LevelError> {
    let missing = || LevelError::MissingFile(path.to_path_buf());
    let corrupt = |reason: String| LevelError::CorruptFormat {
        path: path.to_path_buf(),
        reason,
    };

    let meta = fs::metadata(path).map_err(|_| missing())?;
    if meta.len() == 0 {
        return Err(missing());
    }

    let text = fs::read_to_string(path)?;
    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| corrupt(e.to_string()))?;
    match value {
        serde_json::Value::Array(items) => Ok(items),
        _ => Err(corrupt("top level is not a list".to_string())),
    }
}

/// Parse a level file without requiring it to be non-empty
fn read_level_file(path: &Path) -> Result<Vec<Level>, LevelError> {
    let items = read_level_list(path)?;
    serde_json::from_value(serde_json::Value::Array(items)).map_err(|e| {
        LevelError::CorruptFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    })
}

/// Append one level to the level file and rewrite it, returning the new
/// level count.
///
/// Existing entries are kept as-is, even ones the game cannot load. An
/// absent, empty, unparseable or non-list file is replaced by a fresh list
/// holding only the new level.
pub fn append_level(path: &Path, level: &[PlacedTile]) -> Result<usize, LevelError> {
    let mut levels = match read_level_list(path) {
        Ok(levels) => levels,
        Err(LevelError::MissingFile(_)) => Vec::new(),
        Err(LevelError::Io(e)) => return Err(LevelError::Io(e)),
        Err(e) => {
            log::warn!("{}; starting a new level list", e);
            Vec::new()
        }
    };

    levels.push(serde_json::to_value(level)?);
    write_level_file(path, &levels)?;
    log::info!("Level {} saved to {}", levels.len(), path.display());
    Ok(levels.len())
}

/// Write levels as JSON indented with four spaces
fn write_level_file<T: Serialize>(path: &Path, levels: &[T]) -> Result<(), LevelError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    levels.serialize(&mut ser)?;
    fs::write(path, buf)?;
    Ok(())
}
