//! Level editor entry point
//!
//! Pick an asset from the left panel and click cells to place it. Right
//! click (or delete mode) clears a cell. `S` appends the level to the level
//! file and starts a fresh canvas.

use macroquad::prelude::*;

use tile_platformer::Settings;
use tile_platformer::assets::scan_asset_dir;
use tile_platformer::editor::{ClickButton, EDITOR_HEIGHT, EDITOR_WIDTH, EditorEvent, EditorState};
use tile_platformer::renderer::{draw_editor, load_asset_textures, load_background};

fn window_conf() -> Conf {
    Conf {
        window_title: "Level Editor".to_owned(),
        window_width: EDITOR_WIDTH,
        window_height: EDITOR_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

fn pressed_button() -> Option<ClickButton> {
    if is_mouse_button_pressed(MouseButton::Left) {
        Some(ClickButton::Left)
    } else if is_mouse_button_pressed(MouseButton::Right) {
        Some(ClickButton::Right)
    } else {
        None
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    log::info!("Level editor starting...");

    let settings = Settings::load_default();
    let catalog = scan_asset_dir(&settings.asset_dir);
    let textures = load_asset_textures(&catalog).await;
    let background = load_background(&settings.editor_background).await;

    let mut editor = EditorState::new(
        catalog.iter().map(|entry| entry.id.clone()),
        settings.level_file.clone(),
    );
    let mut status: Option<String> = None;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        if let Some(button) = pressed_button() {
            let (mx, my) = mouse_position();
            match editor.click(mx as i32, my as i32, button) {
                EditorEvent::Selected(id) => log::debug!("Selected {}", id),
                EditorEvent::Placed(tile) => log::debug!("Placed {} at ({}, {})", tile.asset, tile.x, tile.y),
                EditorEvent::Deleted { x, y, count } if count > 0 => {
                    log::debug!("Removed {} tiles at ({}, {})", count, x, y)
                }
                _ => {}
            }
        }

        if is_key_pressed(KeyCode::D) {
            let on = editor.toggle_delete_mode();
            log::debug!("Delete mode {}", if on { "on" } else { "off" });
        }

        if is_key_pressed(KeyCode::S) {
            status = Some(match editor.save() {
                Ok(count) => format!("Level {} saved", count),
                Err(e) => {
                    log::error!("Save failed: {}", e);
                    "Save failed (see log)".to_owned()
                }
            });
        }

        draw_editor(&editor, &textures, background.as_ref(), status.as_deref());
        next_frame().await;
    }
}
