//! Tile Platformer - a grid-built 2D platformer and its level editor
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, combat, level flow)
//! - `level`: Level file loading and the editor's append-on-save path
//! - `assets`: Asset directory scanning and typed handle lookup
//! - `editor`: Level editor model (panel, placement, delete mode)
//! - `renderer`: macroquad drawing for the game and the editor
//! - `settings`: File-backed configuration

pub mod assets;
pub mod editor;
pub mod level;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use assets::{AssetId, AssetMap};
pub use level::{LevelError, LevelSet, PlacedTile};
pub use settings::Settings;

/// Game configuration constants
///
/// Speeds and accelerations are expressed per simulation tick.
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Play field dimensions (pixels)
    pub const WINDOW_WIDTH: i32 = 790;
    pub const WINDOW_HEIGHT: i32 = 600;
    /// Edge length of one grid tile (pixels)
    pub const TILE_SIZE: i32 = 24;
    /// Largest grid coordinate a level may use (either sign)
    pub const MAX_GRID_COORD: i32 = 1_000_000;

    /// Player movement
    pub const PLAYER_SPEED: i32 = 4;
    pub const JUMP_POWER: f32 = 12.0;
    pub const GRAVITY: f32 = 0.7;
    pub const MAX_FALL_SPEED: f32 = 12.0;
    /// Where the player appears on level load, restart and advance
    pub const PLAYER_SPAWN_X: i32 = 200;
    pub const PLAYER_SPAWN_Y: i32 = 100;

    /// Player combat
    pub const PLAYER_MAX_HEALTH: i32 = 20;
    pub const PLAYER_INVULN_FRAMES: u32 = 60;
    pub const PLAYER_SHOOT_COOLDOWN: u32 = 20;
    pub const PLAYER_BULLET_SPEED: f32 = 8.0;
    pub const PLAYER_BULLET_DAMAGE: i32 = 1;

    /// Enemy behaviour
    pub const ENEMY_SPEED: f32 = 1.2;
    pub const ENEMY_SHOOT_RANGE: i32 = 100;
    pub const ENEMY_SHOOT_COOLDOWN: u32 = 90;
    pub const ENEMY_BULLET_SPEED: f32 = 6.0;
    pub const ENEMY_MAX_HEALTH: i32 = 3;

    /// Damage dealt to the player by an enemy bullet
    pub const ENEMY_DAMAGE: i32 = 1;
    /// Damage dealt to the player by touching an enemy
    pub const PLAYER_TOUCH_DAMAGE: i32 = 1;
    /// Horizontal shove applied by an enemy bullet hit
    pub const BULLET_KNOCKBACK: i32 = 6;
    /// Horizontal shove applied by enemy contact
    pub const TOUCH_KNOCKBACK: i32 = 12;

    /// Bullets
    pub const BULLET_SIZE: i32 = 6;
    /// Bullets further than this outside the window are discarded
    pub const BULLET_OFFSCREEN_MARGIN: f32 = 50.0;

    /// How long the "GAME COMPLETE" screen holds before the run ends (3 s)
    pub const COMPLETE_HOLD_TICKS: u32 = 3 * 60;
}
