//! Static tile geometry built from a level's placed tiles

use rand::Rng;

use super::rect::Rect;
use super::state::Enemy;
use crate::assets::AssetId;
use crate::consts::{MAX_GRID_COORD, TILE_SIZE};
use crate::level::PlacedTile;

/// One solid tile in pixel space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRect {
    pub rect: Rect,
    /// Sprite to draw; collision never depends on it being loadable
    pub asset: AssetId,
}

/// The static collision world of one level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileField {
    tiles: Vec<TileRect>,
}

impl TileField {
    pub fn new(tiles: Vec<TileRect>) -> Self {
        Self { tiles }
    }

    pub fn tiles(&self) -> &[TileRect] {
        &self.tiles
    }

    /// First tile (in level order) overlapping `rect`
    pub fn first_overlap(&self, rect: &Rect) -> Option<&TileRect> {
        self.tiles.iter().find(|t| t.rect.overlaps(rect))
    }

    pub fn any_overlap(&self, rect: &Rect) -> bool {
        self.first_overlap(rect).is_some()
    }
}

/// Pixel rectangle covering grid cell `(x, y)`. Coordinates are clamped to
/// `MAX_GRID_COORD` so pixel positions stay well inside `i32`.
pub fn grid_rect(x: i32, y: i32) -> Rect {
    let cell = |c: i32| c.clamp(-MAX_GRID_COORD, MAX_GRID_COORD) * TILE_SIZE;
    Rect::new(cell(x), cell(y), TILE_SIZE, TILE_SIZE)
}

/// Split a level into its tile field and its enemies, both in level order.
pub fn build_level<R: Rng>(level: &[PlacedTile], rng: &mut R) -> (TileField, Vec<Enemy>) {
    let mut tiles = Vec::new();
    let mut enemies = Vec::new();

    for placed in level {
        let rect = grid_rect(placed.x, placed.y);
        if placed.asset.is_enemy() {
            enemies.push(Enemy::spawn(rect.x, rect.y, rng));
        } else {
            tiles.push(TileRect {
                rect,
                asset: placed.asset.clone(),
            });
        }
    }

    (TileField::new(tiles), enemies)
}
