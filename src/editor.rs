//! Level editor model
//!
//! The editor window is split into an asset panel on the left and a grid
//! canvas on the right. This module holds the editor's state and click
//! handling; drawing and input polling live in the `level-editor` binary.

use std::path::{Path, PathBuf};

use crate::assets::AssetId;
use crate::consts::TILE_SIZE;
use crate::level::{LevelError, PlacedTile, append_level};
use crate::sim::Rect;

/// Editor window size (pixels)
pub const EDITOR_WIDTH: i32 = 1000;
pub const EDITOR_HEIGHT: i32 = 600;
/// Width of the asset panel; the canvas starts here
pub const PANEL_WIDTH: i32 = 200;

/// First icon offset and spacing inside the panel
const PANEL_MARGIN: i32 = 10;
const PANEL_STEP: i32 = 30;

/// An asset icon in the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelItem {
    pub id: AssetId,
    pub rect: Rect,
}

/// Mouse button that produced a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickButton {
    Left,
    Right,
}

/// Outcome of a click, for logging and redraw decisions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    Selected(AssetId),
    Placed(PlacedTile),
    Deleted { x: i32, y: i32, count: usize },
    Ignored,
}

/// Stack icons down the panel, wrapping into a new column at the bottom
pub fn layout_panel(ids: impl IntoIterator<Item = AssetId>) -> Vec<PanelItem> {
    let mut x = PANEL_MARGIN;
    let mut y = PANEL_MARGIN;
    let mut items = Vec::new();
    for id in ids {
        items.push(PanelItem {
            id,
            rect: Rect::new(x, y, TILE_SIZE, TILE_SIZE),
        });
        y += PANEL_STEP;
        if y >= EDITOR_HEIGHT {
            x += PANEL_STEP;
            y = PANEL_MARGIN;
        }
    }
    items
}

/// Grid cell under a canvas point, or `None` over the panel
pub fn cell_at(mx: i32, my: i32) -> Option<(i32, i32)> {
    if mx < PANEL_WIDTH {
        return None;
    }
    Some((
        (mx - PANEL_WIDTH).div_euclid(TILE_SIZE),
        my.div_euclid(TILE_SIZE),
    ))
}

/// Pixel position of a grid cell's top-left corner on the canvas
pub fn cell_origin(x: i32, y: i32) -> (i32, i32) {
    (PANEL_WIDTH + x * TILE_SIZE, y * TILE_SIZE)
}

/// Working state of one editing session
#[derive(Debug, Clone)]
pub struct EditorState {
    pub panel: Vec<PanelItem>,
    pub selected: Option<AssetId>,
    pub delete_mode: bool,
    /// Tiles of the level being built, in placement order
    pub placed: Vec<PlacedTile>,
    level_file: PathBuf,
}

impl EditorState {
    pub fn new(assets: impl IntoIterator<Item = AssetId>, level_file: impl Into<PathBuf>) -> Self {
        Self {
            panel: layout_panel(assets),
            selected: None,
            delete_mode: false,
            placed: Vec::new(),
            level_file: level_file.into(),
        }
    }

    pub fn level_file(&self) -> &Path {
        &self.level_file
    }

    /// Handle a mouse click at window position `(mx, my)`.
    ///
    /// Panel clicks pick an asset. Canvas clicks delete everything in the
    /// cell (right button or delete mode) or place the selected asset.
    pub fn click(&mut self, mx: i32, my: i32, button: ClickButton) -> EditorEvent {
        let Some((x, y)) = cell_at(mx, my) else {
            return match self.panel.iter().find(|item| item.rect.contains_point(mx, my)) {
                Some(item) => {
                    self.selected = Some(item.id.clone());
                    EditorEvent::Selected(item.id.clone())
                }
                None => EditorEvent::Ignored,
            };
        };

        if button == ClickButton::Right || self.delete_mode {
            let before = self.placed.len();
            self.placed.retain(|t| !(t.x == x && t.y == y));
            return EditorEvent::Deleted {
                x,
                y,
                count: before - self.placed.len(),
            };
        }

        match &self.selected {
            Some(asset) => {
                let tile = PlacedTile {
                    asset: asset.clone(),
                    x,
                    y,
                };
                self.placed.push(tile.clone());
                EditorEvent::Placed(tile)
            }
            None => EditorEvent::Ignored,
        }
    }

    /// Flip delete mode, returning the new setting
    pub fn toggle_delete_mode(&mut self) -> bool {
        self.delete_mode = !self.delete_mode;
        self.delete_mode
    }

    /// Append the working level to the level file and clear the canvas.
    /// Returns the number of levels now in the file. On failure the canvas
    /// is left untouched.
    pub fn save(&mut self) -> Result<usize, LevelError> {
        let count = append_level(&self.level_file, &self.placed)?;
        self.placed.clear();
        log::info!("Canvas cleared for level {}", count + 1);
        Ok(count)
    }
}
