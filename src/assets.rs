//! Asset identifiers and handle lookup
//!
//! Assets are image files in a flat directory; the file stem is the
//! identifier that level files refer to. The simulation only ever sees
//! identifiers. Render handles are looked up through [`AssetMap`], which
//! falls back to a placeholder for anything it does not know.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File extensions recognised as images (compared case-insensitively)
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

/// Identifier of an asset as written in level files
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// The marker asset that spawns an enemy instead of a tile
    pub const ENEMY: &'static str = "enemy";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn enemy() -> Self {
        Self::new(Self::ENEMY)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_enemy(&self) -> bool {
        self.0 == Self::ENEMY
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// One image file found in the asset directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    pub id: AssetId,
    pub path: PathBuf,
}

/// List the image files directly inside `dir`, sorted by identifier.
///
/// A missing or unreadable directory yields an empty list; the game still
/// runs with placeholder rendering.
pub fn scan_asset_dir(dir: &Path) -> Vec<AssetEntry> {
    let read_dir = match std::fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => {
            log::warn!("Asset directory {} unavailable: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut entries: Vec<AssetEntry> = read_dir
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_image_extension(path))
        .filter_map(|path| {
            let stem = path.file_stem()?.to_str()?.to_owned();
            Some(AssetEntry {
                id: AssetId::new(stem),
                path,
            })
        })
        .collect();

    entries.sort_by(|a, b| a.id.cmp(&b.id));
    log::info!("Found {} assets in {}", entries.len(), dir.display());
    entries
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Result of resolving an asset identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a, H> {
    /// A loaded render handle
    Image(&'a H),
    /// Nothing loaded under this identifier; draw a solid-colour stand-in
    Placeholder,
}

/// Mapping from asset identifier to an opaque render handle
#[derive(Debug, Clone)]
pub struct AssetMap<H> {
    handles: HashMap<AssetId, H>,
}

impl<H> Default for AssetMap<H> {
    fn default() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }
}

impl<H> AssetMap<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: AssetId, handle: H) {
        self.handles.insert(id, handle);
    }

    /// Look up a handle, falling back to [`Resolved::Placeholder`]
    pub fn resolve(&self, id: &AssetId) -> Resolved<'_, H> {
        match self.handles.get(id) {
            Some(handle) => Resolved::Image(handle),
            None => Resolved::Placeholder,
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_scan_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("stone.png"), b"").unwrap();
        fs::write(dir.path().join("Grass.JPG"), b"").unwrap();
        fs::write(dir.path().join("enemy.bmp"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("background")).unwrap();

        let entries = scan_asset_dir(dir.path());
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["Grass", "enemy", "stone"]);
    }

    #[test]
    fn test_scan_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let entries = scan_asset_dir(&dir.path().join("nope"));
        assert!(entries.is_empty());
    }

    #[test]
    fn test_resolve_falls_back_to_placeholder() {
        let mut map = AssetMap::new();
        map.insert(AssetId::new("grass"), 7u32);

        assert_eq!(map.resolve(&AssetId::new("grass")), Resolved::Image(&7));
        assert_eq!(map.resolve(&AssetId::new("lava")), Resolved::Placeholder);
    }

    #[test]
    fn test_enemy_marker() {
        assert!(AssetId::enemy().is_enemy());
        assert!(!AssetId::new("enemy_block").is_enemy());
    }
}
