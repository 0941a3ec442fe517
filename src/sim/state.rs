//! Game state and core simulation types
//!
//! Everything the tick loop mutates lives in [`GameState`], which the game
//! driver owns and hands to [`super::tick`] once per fixed step.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::field::{TileField, build_level};
use super::rect::Rect;
use crate::consts::*;
use crate::level::LevelSet;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Level cleared; the next level loads on the following tick
    Advancing,
    /// Last level cleared; frozen until the hold runs out
    Complete { hold_ticks: u32 },
    /// Player died; frozen until restart input
    Dead,
}

/// The player character
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub rect: Rect,
    /// Vertical velocity (pixels per tick, positive is down)
    pub vel_y: f32,
    /// Set by a landing this tick; gates jumping on the next one
    pub on_ground: bool,
    /// +1 facing right, -1 facing left
    pub facing: i32,
    pub health: i32,
    /// Ticks of invulnerability remaining
    pub invuln: u32,
    /// Ticks until the player may shoot again
    pub shoot_cooldown: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::spawn()
    }
}

impl Player {
    /// Fresh player at the spawn point
    pub fn spawn() -> Self {
        Self {
            rect: Rect::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y, TILE_SIZE, TILE_SIZE),
            vel_y: 0.0,
            on_ground: false,
            facing: 1,
            health: PLAYER_MAX_HEALTH,
            invuln: 0,
            shoot_cooldown: 0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Apply a damaging hit unless invulnerable.
    ///
    /// Returns whether the hit landed. A landed hit starts the
    /// invulnerability window and shoves the player by `knockback_x`.
    pub fn take_hit(&mut self, damage: i32, knockback_x: i32) -> bool {
        if self.invuln > 0 {
            return false;
        }
        self.health -= damage;
        self.invuln = PLAYER_INVULN_FRAMES;
        self.rect.x += knockback_x;
        true
    }
}

/// A patrolling, shooting enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    /// Patrol direction, +1 right or -1 left
    pub dir: i32,
    pub speed: f32,
    pub shoot_cooldown: u32,
    pub alive: bool,
    pub health: i32,
    pub max_health: i32,
}

impl Enemy {
    /// Enemy at pixel position `(x, y)` with a random heading and a random
    /// initial shoot cooldown so volleys don't line up.
    pub fn spawn<R: Rng>(x: i32, y: i32, rng: &mut R) -> Self {
        let dir = if rng.random_bool(0.5) { -1 } else { 1 };
        let shoot_cooldown = rng.random_range(0..=ENEMY_SHOOT_COOLDOWN);
        Self::with_heading(x, y, dir, shoot_cooldown)
    }

    /// Enemy with an explicit heading and cooldown
    pub fn with_heading(x: i32, y: i32, dir: i32, shoot_cooldown: u32) -> Self {
        Self {
            rect: Rect::new(x, y, TILE_SIZE, TILE_SIZE),
            dir,
            speed: ENEMY_SPEED,
            shoot_cooldown,
            alive: true,
            health: ENEMY_MAX_HEALTH,
            max_health: ENEMY_MAX_HEALTH,
        }
    }

    pub fn take_damage(&mut self, damage: i32) {
        self.health -= damage;
        if self.health <= 0 {
            self.alive = false;
        }
    }
}

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// A straight-flying projectile
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Collision box, always derived from `pos`
    pub rect: Rect,
    pub owner: BulletOwner,
    /// Damage carried by player bullets; enemy bullets use `ENEMY_DAMAGE`
    pub damage: Option<i32>,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2, owner: BulletOwner, damage: Option<i32>) -> Self {
        let mut bullet = Self {
            pos,
            vel,
            rect: Rect::new(0, 0, BULLET_SIZE, BULLET_SIZE),
            owner,
            damage,
        };
        bullet.sync_rect();
        bullet
    }

    /// Re-derive the collision box from the float position
    pub fn sync_rect(&mut self) {
        self.rect.x = self.pos.x as i32;
        self.rect.y = self.pos.y as i32;
    }

    /// Advance one tick along the velocity
    pub fn integrate(&mut self) {
        self.pos += self.vel;
        self.sync_rect();
    }

    pub fn is_offscreen(&self) -> bool {
        let m = BULLET_OFFSCREEN_MARGIN;
        self.pos.x < -m
            || self.pos.x > WINDOW_WIDTH as f32 + m
            || self.pos.y < -m
            || self.pos.y > WINDOW_HEIGHT as f32 + m
    }
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub levels: LevelSet,
    /// Index into `levels` of the level being played
    pub level_index: usize,
    /// Static collision geometry of the current level
    pub field: TileField,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub player: Player,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Start a run on the first level
    pub fn new(levels: LevelSet, seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            levels,
            level_index: 0,
            field: TileField::default(),
            enemies: Vec::new(),
            bullets: Vec::new(),
            player: Player::spawn(),
            phase: GamePhase::Playing,
            time_ticks: 0,
        };
        state.rebuild_level();
        state
    }

    /// Rebuild the tile field and enemies from the current level
    fn rebuild_level(&mut self) {
        let (field, enemies) = match self.levels.current(self.level_index) {
            Ok(level) => build_level(level, &mut self.rng),
            Err(e) => {
                log::error!("Cannot build level: {}", e);
                (TileField::default(), Vec::new())
            }
        };
        log::info!(
            "Loading level {}: {} tiles, {} enemies",
            self.level_index + 1,
            field.tiles().len(),
            enemies.len()
        );
        self.field = field;
        self.enemies = enemies;
    }

    /// Reload the current level from scratch with a fresh player
    pub fn restart_level(&mut self) {
        self.rebuild_level();
        self.bullets.clear();
        self.player = Player::spawn();
        self.phase = GamePhase::Playing;
    }

    /// Move on to the next level. The player keeps facing, cooldowns and
    /// invulnerability; position, health and velocity reset.
    pub fn advance_level(&mut self) {
        if !self.levels.has_next(self.level_index) {
            log::warn!("No level after {}", self.level_index + 1);
            return;
        }
        self.level_index += 1;
        self.bullets.clear();
        self.player.rect.x = PLAYER_SPAWN_X;
        self.player.rect.y = PLAYER_SPAWN_Y;
        self.player.health = PLAYER_MAX_HEALTH;
        self.player.vel_y = 0.0;
        self.rebuild_level();
        self.phase = GamePhase::Playing;
        log::info!("Moving to level {}", self.level_index + 1);
    }

    /// True once the game-complete hold has elapsed
    pub fn run_finished(&self) -> bool {
        matches!(self.phase, GamePhase::Complete { hold_ticks: 0 })
    }

    /// 1-based level number for display
    pub fn level_number(&self) -> usize {
        self.level_index + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::PlacedTile;

    fn levels(levels: Vec<Vec<PlacedTile>>) -> LevelSet {
        LevelSet::new(levels).unwrap()
    }

    #[test]
    fn test_new_state_builds_first_level() {
        let state = GameState::new(
            levels(vec![
                vec![PlacedTile::new("grass", 0, 10), PlacedTile::new("enemy", 3, 9)],
                vec![PlacedTile::new("stone", 1, 1)],
            ]),
            7,
        );
        assert_eq!(state.level_index, 0);
        assert_eq!(state.field.tiles().len(), 1);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player, Player::spawn());
    }

    #[test]
    fn test_take_hit_respects_invulnerability() {
        let mut player = Player::spawn();
        assert!(player.take_hit(1, 6));
        assert_eq!(player.health, PLAYER_MAX_HEALTH - 1);
        assert_eq!(player.invuln, PLAYER_INVULN_FRAMES);
        assert_eq!(player.rect.x, PLAYER_SPAWN_X + 6);

        assert!(!player.take_hit(1, 6));
        assert_eq!(player.health, PLAYER_MAX_HEALTH - 1);
        assert_eq!(player.rect.x, PLAYER_SPAWN_X + 6);
    }

    #[test]
    fn test_enemy_spawn_cooldown_in_range() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..100 {
            let enemy = Enemy::spawn(0, 0, &mut rng);
            assert!(enemy.shoot_cooldown <= ENEMY_SHOOT_COOLDOWN);
            assert!(enemy.dir == 1 || enemy.dir == -1);
            assert_eq!(enemy.health, ENEMY_MAX_HEALTH);
        }
    }

    #[test]
    fn test_bullet_rect_follows_position() {
        let mut bullet = Bullet::new(
            Vec2::new(10.0, 20.0),
            Vec2::new(2.5, -1.5),
            BulletOwner::Enemy,
            None,
        );
        bullet.integrate();
        bullet.integrate();
        assert_eq!(bullet.rect, Rect::new(15, 17, BULLET_SIZE, BULLET_SIZE));
    }

    #[test]
    fn test_bullet_offscreen_margin() {
        let inside = Bullet::new(Vec2::new(-50.0, 0.0), Vec2::ZERO, BulletOwner::Player, Some(1));
        let outside = Bullet::new(Vec2::new(-50.5, 0.0), Vec2::ZERO, BulletOwner::Player, Some(1));
        assert!(!inside.is_offscreen());
        assert!(outside.is_offscreen());
    }

    #[test]
    fn test_advance_keeps_facing_and_resets_health() {
        let mut state = GameState::new(
            levels(vec![vec![], vec![PlacedTile::new("enemy", 5, 5)]]),
            1,
        );
        state.player.facing = -1;
        state.player.health = 4;
        state.player.rect.x = 50;
        state.player.vel_y = 3.0;
        state.advance_level();

        assert_eq!(state.level_index, 1);
        assert_eq!(state.player.facing, -1);
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
        assert_eq!(state.player.rect.x, PLAYER_SPAWN_X);
        assert_eq!(state.player.vel_y, 0.0);
        assert_eq!(state.enemies.len(), 1);
    }
}
