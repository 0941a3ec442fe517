//! macroquad rendering for the game and the editor
//!
//! Drawing only reads simulation and editor state. Sprites come from an
//! [`AssetMap`] of textures; anything missing is drawn as a flat colour.

pub mod editor_view;
pub mod scene;

use std::path::Path;

use macroquad::prelude::*;

use crate::assets::{AssetEntry, AssetId, AssetMap, Resolved};
use crate::sim::Rect;

pub use editor_view::draw_editor;
pub use scene::draw_game;

/// Load a texture for every catalog entry. Files that fail to decode are
/// logged and left out, so they render as placeholders.
pub async fn load_asset_textures(entries: &[AssetEntry]) -> AssetMap<Texture2D> {
    let mut map = AssetMap::new();
    for entry in entries {
        let path = entry.path.to_string_lossy();
        match load_texture(&path).await {
            Ok(texture) => {
                texture.set_filter(FilterMode::Nearest);
                map.insert(entry.id.clone(), texture);
            }
            Err(e) => log::warn!("Failed to load {}: {}", entry.path.display(), e),
        }
    }
    log::info!("Loaded {} of {} asset textures", map.len(), entries.len());
    map
}

/// Load an optional backdrop image
pub async fn load_background(path: &Path) -> Option<Texture2D> {
    if !path.is_file() {
        log::info!("No background at {}", path.display());
        return None;
    }
    match load_texture(&path.to_string_lossy()).await {
        Ok(texture) => Some(texture),
        Err(e) => {
            log::warn!("Failed to load background {}: {}", path.display(), e);
            None
        }
    }
}

/// Draw a texture stretched over `rect`
fn draw_sprite(texture: &Texture2D, rect: Rect) {
    draw_texture_ex(
        texture,
        rect.x as f32,
        rect.y as f32,
        WHITE,
        DrawTextureParams {
            dest_size: Some(vec2(rect.w as f32, rect.h as f32)),
            ..Default::default()
        },
    );
}

/// Draw an asset's sprite, or a flat `placeholder` block when it has none
fn draw_asset(textures: &AssetMap<Texture2D>, id: &AssetId, rect: Rect, placeholder: Color) {
    match textures.resolve(id) {
        Resolved::Image(texture) => draw_sprite(texture, rect),
        Resolved::Placeholder => fill_rect(rect, placeholder),
    }
}

fn fill_rect(rect: Rect, color: Color) {
    draw_rectangle(rect.x as f32, rect.y as f32, rect.w as f32, rect.h as f32, color);
}

/// Draw text centred on a point
fn draw_text_centered(text: &str, cx: f32, cy: f32, font_size: u16, color: Color) {
    let dims = measure_text(text, None, font_size, 1.0);
    draw_text(
        text,
        cx - dims.width / 2.0,
        cy - dims.height / 2.0 + dims.offset_y,
        font_size as f32,
        color,
    );
}
