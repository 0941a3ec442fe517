//! Editor panel, grid and placed tiles

use macroquad::prelude::*;

use super::{draw_asset, draw_sprite};
use crate::assets::AssetMap;
use crate::consts::TILE_SIZE;
use crate::editor::{EDITOR_HEIGHT, EDITOR_WIDTH, EditorState, PANEL_WIDTH, cell_origin};
use crate::sim::Rect;

const PANEL_BG: Color = Color::new(50.0 / 255.0, 50.0 / 255.0, 50.0 / 255.0, 1.0);
const GRID_LINE: Color = Color::new(80.0 / 255.0, 80.0 / 255.0, 80.0 / 255.0, 1.0);
const CANVAS_BG: Color = Color::new(30.0 / 255.0, 30.0 / 255.0, 40.0 / 255.0, 1.0);
const PLACEHOLDER: Color = Color::new(150.0 / 255.0, 150.0 / 255.0, 150.0 / 255.0, 1.0);
const SELECTED: Color = Color::new(1.0, 1.0, 0.0, 1.0);

/// Draw one editor frame. `status` is an optional line shown under the
/// key hints (last save result).
pub fn draw_editor(
    editor: &EditorState,
    textures: &AssetMap<Texture2D>,
    background: Option<&Texture2D>,
    status: Option<&str>,
) {
    clear_background(CANVAS_BG);
    if let Some(bg) = background {
        draw_sprite(bg, Rect::new(PANEL_WIDTH, 0, EDITOR_WIDTH, EDITOR_HEIGHT));
    }

    draw_panel(editor, textures, status);
    draw_grid();

    for tile in &editor.placed {
        let (x, y) = cell_origin(tile.x, tile.y);
        draw_asset(textures, &tile.asset, Rect::new(x, y, TILE_SIZE, TILE_SIZE), PLACEHOLDER);
    }
}

fn draw_panel(editor: &EditorState, textures: &AssetMap<Texture2D>, status: Option<&str>) {
    draw_rectangle(0.0, 0.0, PANEL_WIDTH as f32, EDITOR_HEIGHT as f32, PANEL_BG);

    for item in &editor.panel {
        draw_asset(textures, &item.id, item.rect, PLACEHOLDER);
        if editor.selected.as_ref() == Some(&item.id) {
            let r = item.rect;
            draw_rectangle_lines(r.x as f32, r.y as f32, r.w as f32, r.h as f32, 2.0, SELECTED);
        }
    }

    let mode = if editor.delete_mode {
        "DELETE MODE: ON (D)"
    } else {
        "DELETE MODE: OFF (D)"
    };
    let bottom = EDITOR_HEIGHT as f32;
    draw_text(mode, 20.0, bottom - 46.0, 18.0, WHITE);
    draw_text("Press S to Save Level", 20.0, bottom - 26.0, 18.0, WHITE);
    if let Some(status) = status {
        draw_text(status, 20.0, bottom - 6.0, 16.0, SELECTED);
    }
}

fn draw_grid() {
    let (left, width, height) = (PANEL_WIDTH as f32, EDITOR_WIDTH as f32, EDITOR_HEIGHT as f32);
    for x in (PANEL_WIDTH..EDITOR_WIDTH).step_by(TILE_SIZE as usize) {
        draw_line(x as f32, 0.0, x as f32, height, 1.0, GRID_LINE);
    }
    for y in (0..EDITOR_HEIGHT).step_by(TILE_SIZE as usize) {
        draw_line(left, y as f32, width, y as f32, 1.0, GRID_LINE);
    }
}
