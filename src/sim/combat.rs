//! Shooting, bullet flight and damage
//!
//! Bullet hits are arbitrated once per bullet per tick. Removals are
//! collected during the pass and applied afterwards so indices stay valid.

use glam::{IVec2, Vec2};

use super::field::TileField;
use super::state::{Bullet, BulletOwner, Enemy, Player};
use super::tick::TickInput;
use crate::consts::*;

/// Turn the player toward the held direction. Holding both or neither keeps
/// the last facing.
pub fn update_facing(player: &mut Player, input: &TickInput) {
    match (input.left, input.right) {
        (false, true) => player.facing = 1,
        (true, false) => player.facing = -1,
        _ => {}
    }
}

/// Fire a player bullet from the player's center if shoot is held and the
/// cooldown has run out.
pub fn player_try_shoot(player: &mut Player, shoot: bool, bullets: &mut Vec<Bullet>) {
    if !shoot || player.shoot_cooldown != 0 {
        return;
    }
    let vel = Vec2::new(PLAYER_BULLET_SPEED * player.facing as f32, 0.0);
    bullets.push(Bullet::new(
        player.rect.center_f32(),
        vel,
        BulletOwner::Player,
        Some(PLAYER_BULLET_DAMAGE),
    ));
    player.shoot_cooldown = PLAYER_SHOOT_COOLDOWN;
}

/// Count down the enemy's cooldown or, once it is ready and the target is
/// within horizontal range, fire an aimed bullet at `target`.
pub fn enemy_try_shoot(enemy: &mut Enemy, target: IVec2, bullets: &mut Vec<Bullet>) {
    if enemy.shoot_cooldown > 0 {
        enemy.shoot_cooldown -= 1;
        return;
    }

    let origin = enemy.rect.center();
    if (target.x - origin.x).abs() > ENEMY_SHOOT_RANGE {
        return;
    }

    let delta = (target - origin).as_vec2();
    let angle = delta.y.atan2(delta.x);
    let vel = Vec2::from_angle(angle) * ENEMY_BULLET_SPEED;
    bullets.push(Bullet::new(origin.as_vec2(), vel, BulletOwner::Enemy, None));
    enemy.shoot_cooldown = ENEMY_SHOOT_COOLDOWN;
    log::debug!("Enemy at {:?} fired at {:?}", origin, target);
}

/// Move every bullet one tick along its velocity
pub fn integrate_bullets(bullets: &mut [Bullet]) {
    for bullet in bullets {
        bullet.integrate();
    }
}

/// What happened while resolving bullet hits this tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulletReport {
    /// Enemy bullets that actually hurt the player
    pub player_hits: u32,
    /// Player bullets that hurt an enemy
    pub enemy_hits: u32,
    /// Enemies removed because their health ran out
    pub enemies_killed: u32,
}

/// Resolve bullet collisions against tiles, the player and enemies, then
/// drop spent bullets and dead enemies.
///
/// Per bullet, in order: off-screen, tile, then its target. Enemy bullets
/// only hurt the player when not invulnerable but are spent either way.
/// A player bullet damages at most one enemy.
pub fn resolve_bullets(
    bullets: &mut Vec<Bullet>,
    field: &TileField,
    player: &mut Player,
    enemies: &mut Vec<Enemy>,
) -> BulletReport {
    let mut report = BulletReport::default();
    let mut spent = Vec::new();
    let mut dead = Vec::new();

    for (i, bullet) in bullets.iter().enumerate() {
        if bullet.is_offscreen() {
            spent.push(i);
            continue;
        }

        if field.any_overlap(&bullet.rect) {
            spent.push(i);
            continue;
        }

        match bullet.owner {
            BulletOwner::Enemy => {
                if player.rect.overlaps(&bullet.rect) {
                    let knockback = if bullet.vel.x > 0.0 {
                        BULLET_KNOCKBACK
                    } else {
                        -BULLET_KNOCKBACK
                    };
                    if player.take_hit(ENEMY_DAMAGE, knockback) {
                        report.player_hits += 1;
                    }
                    spent.push(i);
                }
            }
            BulletOwner::Player => {
                let hit = enemies
                    .iter_mut()
                    .enumerate()
                    .find(|(_, e)| e.alive && e.rect.overlaps(&bullet.rect));
                if let Some((j, enemy)) = hit {
                    enemy.take_damage(bullet.damage.unwrap_or(PLAYER_BULLET_DAMAGE));
                    report.enemy_hits += 1;
                    spent.push(i);
                    if !enemy.alive {
                        dead.push(j);
                    }
                }
            }
        }
    }

    remove_indices(bullets, spent);
    report.enemies_killed = remove_indices(enemies, dead) as u32;
    report
}

/// Damage the player for touching any live enemy, shoving them away from
/// that enemy's center. Returns whether damage was dealt.
pub fn apply_touch_damage(player: &mut Player, enemies: &[Enemy]) -> bool {
    let mut hurt = false;
    for enemy in enemies.iter().filter(|e| e.alive) {
        if !player.rect.overlaps(&enemy.rect) {
            continue;
        }
        let knockback = if player.rect.center_x() >= enemy.rect.center_x() {
            TOUCH_KNOCKBACK
        } else {
            -TOUCH_KNOCKBACK
        };
        hurt |= player.take_hit(PLAYER_TOUCH_DAMAGE, knockback);
    }
    hurt
}

/// Remove the items at `indices` (duplicates allowed, any order), highest
/// index first. Returns how many were removed.
pub fn remove_indices<T>(items: &mut Vec<T>, mut indices: Vec<usize>) -> usize {
    indices.sort_unstable();
    indices.dedup();
    let mut removed = 0;
    for &idx in indices.iter().rev() {
        if idx < items.len() {
            items.remove(idx);
            removed += 1;
        }
    }
    removed
}
