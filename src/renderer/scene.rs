//! Game scene and HUD

use macroquad::prelude::*;

use super::{draw_asset, draw_sprite, draw_text_centered, fill_rect};
use crate::assets::{AssetId, AssetMap};
use crate::consts::*;
use crate::sim::{BulletOwner, Enemy, GamePhase, GameState, Player, Rect};

const SKY: Color = Color::new(120.0 / 255.0, 180.0 / 255.0, 1.0, 1.0);
const TILE_PLACEHOLDER: Color = Color::new(100.0 / 255.0, 100.0 / 255.0, 100.0 / 255.0, 1.0);
const ENEMY_PLACEHOLDER: Color = Color::new(200.0 / 255.0, 0.0, 0.0, 1.0);
const PLAYER_COLOR: Color = Color::new(100.0 / 255.0, 200.0 / 255.0, 10.0 / 255.0, 1.0);
const PLAYER_BULLET_COLOR: Color = Color::new(1.0, 0.0, 0.0, 1.0);
const ENEMY_BULLET_COLOR: Color = Color::new(1.0, 200.0 / 255.0, 30.0 / 255.0, 1.0);
const BAR_BACK: Color = Color::new(100.0 / 255.0, 100.0 / 255.0, 100.0 / 255.0, 1.0);

/// Draw one frame of the game
pub fn draw_game(
    state: &GameState,
    textures: &AssetMap<Texture2D>,
    background: Option<&Texture2D>,
    show_fps: bool,
) {
    match background {
        Some(bg) => draw_sprite(bg, Rect::new(0, 0, WINDOW_WIDTH, WINDOW_HEIGHT)),
        None => clear_background(SKY),
    }

    for tile in state.field.tiles() {
        draw_asset(textures, &tile.asset, tile.rect, TILE_PLACEHOLDER);
    }

    let enemy_id = AssetId::enemy();
    for enemy in state.enemies.iter().filter(|e| e.alive) {
        draw_asset(textures, &enemy_id, enemy.rect, ENEMY_PLACEHOLDER);
        draw_enemy_health(enemy);
    }

    for bullet in &state.bullets {
        let color = match bullet.owner {
            BulletOwner::Enemy => ENEMY_BULLET_COLOR,
            BulletOwner::Player => PLAYER_BULLET_COLOR,
        };
        fill_rect(bullet.rect, color);
    }

    draw_player(&state.player);
    draw_hud(state, show_fps);

    let cx = WINDOW_WIDTH as f32 / 2.0;
    let cy = WINDOW_HEIGHT as f32 / 2.0;
    match state.phase {
        GamePhase::Dead => {
            draw_text_centered("YOU DIED - Press R to Restart", cx, cy, 36, Color::from_rgba(255, 10, 10, 255));
        }
        GamePhase::Complete { .. } => {
            draw_text_centered("GAME COMPLETE!", cx, cy, 48, Color::from_rgba(0, 255, 0, 255));
        }
        GamePhase::Advancing => {
            let text = format!("Level {} cleared!", state.level_number());
            draw_text_centered(&text, cx, cy, 36, WHITE);
        }
        GamePhase::Playing => {}
    }
}

/// Player block with an eye on the facing side; blinks while invulnerable
fn draw_player(player: &Player) {
    if player.invuln > 0 && (player.invuln / 6) % 2 == 0 {
        return;
    }
    fill_rect(player.rect, PLAYER_COLOR);

    let eye_x = player.rect.center_x() + player.rect.w / 4 * player.facing;
    let eye_y = player.rect.center_y() - player.rect.h / 4;
    draw_circle(eye_x as f32, eye_y as f32, 2.0, BLACK);
}

/// Small bar above a damaged enemy
fn draw_enemy_health(enemy: &Enemy) {
    if enemy.health >= enemy.max_health {
        return;
    }
    let w = (TILE_SIZE + 4) as f32;
    let h = 4.0;
    let x = enemy.rect.x as f32 - 2.0;
    let y = enemy.rect.y as f32 - 8.0;

    draw_rectangle(x - 1.0, y - 1.0, w + 2.0, h + 2.0, BLACK);
    draw_rectangle(x, y, w, h, BAR_BACK);
    let fill = (enemy.health.max(0) as f32 / enemy.max_health as f32) * w;
    draw_rectangle(x, y, fill.floor(), h, Color::from_rgba(0, 255, 0, 255));
}

fn draw_hud(state: &GameState, show_fps: bool) {
    let (x, y, w, h) = (10.0, 10.0, 120.0, 16.0);
    let health = state.player.health.max(0);

    draw_rectangle(x - 2.0, y - 2.0, w + 4.0, h + 4.0, BLACK);
    draw_rectangle(x, y, w, h, BAR_BACK);
    let fill = (health as f32 / PLAYER_MAX_HEALTH as f32) * w;
    draw_rectangle(x, y, fill.floor(), h, Color::from_rgba(200, 30, 30, 255));

    let text = format!("HP: {}/{}  (R to reset)", health, PLAYER_MAX_HEALTH);
    draw_text(&text, 10.0, 44.0, 18.0, WHITE);

    let level = format!("Level {}/{}", state.level_number(), state.levels.len());
    draw_text(&level, 10.0, 62.0, 18.0, WHITE);

    if show_fps {
        draw_text(&format!("{} FPS", get_fps()), WINDOW_WIDTH as f32 - 70.0, 20.0, 18.0, WHITE);
    }
}
