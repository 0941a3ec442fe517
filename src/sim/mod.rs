//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (level order for tiles and enemies)
//! - No rendering or platform dependencies

pub mod collision;
pub mod combat;
pub mod field;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{clamp_to_screen, enemy_ground_snap, enemy_patrol, move_and_collide, step_player};
pub use combat::{BulletReport, apply_touch_damage, resolve_bullets};
pub use field::{TileField, TileRect, build_level, grid_rect};
pub use rect::Rect;
pub use state::{Bullet, BulletOwner, Enemy, GamePhase, GameState, Player};
pub use tick::{TickInput, tick};
