//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::{enemy_ground_snap, enemy_patrol, step_player};
use super::combat::{
    apply_touch_damage, enemy_try_shoot, integrate_bullets, player_try_shoot, resolve_bullets,
    update_facing,
};
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
    /// Jump held
    pub jump: bool,
    /// Shoot held
    pub shoot: bool,
    /// Restart pressed this tick
    pub restart: bool,
}

impl TickInput {
    /// -1, 0 or +1 from the held direction keys
    pub fn horizontal(&self) -> i32 {
        self.right as i32 - self.left as i32
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Dead => {
            if input.restart {
                log::info!("Restarting level {}", state.level_number());
                state.restart_level();
            }
            return;
        }
        GamePhase::Complete { hold_ticks } => {
            state.phase = GamePhase::Complete {
                hold_ticks: hold_ticks.saturating_sub(1),
            };
            return;
        }
        GamePhase::Advancing => {
            state.advance_level();
            return;
        }
        GamePhase::Playing => {}
    }

    if input.restart {
        log::info!("Resetting level {}", state.level_number());
        state.restart_level();
    }

    state.time_ticks += 1;

    if state.player.shoot_cooldown > 0 {
        state.player.shoot_cooldown -= 1;
    }

    update_facing(&mut state.player, input);
    player_try_shoot(&mut state.player, input.shoot, &mut state.bullets);

    step_player(&mut state.player, &state.field, input);

    let target = state.player.rect.center();
    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        enemy_ground_snap(&mut enemy.rect, &state.field);
        enemy_patrol(enemy, &state.field);
        enemy_try_shoot(enemy, target, &mut state.bullets);
    }

    integrate_bullets(&mut state.bullets);
    let report = resolve_bullets(
        &mut state.bullets,
        &state.field,
        &mut state.player,
        &mut state.enemies,
    );
    if report.player_hits > 0 || report.enemy_hits > 0 {
        log::debug!(
            "Bullet hits: {} on player, {} on enemies",
            report.player_hits,
            report.enemy_hits
        );
    }
    if report.enemies_killed > 0 {
        log::debug!(
            "{} enemies down, {} left",
            report.enemies_killed,
            state.enemies.len()
        );
    }

    apply_touch_damage(&mut state.player, &state.enemies);

    if state.player.invuln > 0 {
        state.player.invuln -= 1;
    }

    if state.enemies.is_empty() {
        if state.levels.has_next(state.level_index) {
            log::info!("Level {} cleared", state.level_number());
            state.phase = GamePhase::Advancing;
        } else {
            log::info!("All {} levels completed", state.levels.len());
            state.phase = GamePhase::Complete {
                hold_ticks: COMPLETE_HOLD_TICKS,
            };
        }
        return;
    }

    if state.player.is_dead() {
        log::info!("Player died on level {}", state.level_number());
        state.phase = GamePhase::Dead;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{LevelSet, PlacedTile};
    use crate::sim::state::{Bullet, BulletOwner, Enemy, Player};
    use glam::Vec2;

    /// A floor along row 21 with one enemy parked far from the spawn point
    fn arena() -> Vec<PlacedTile> {
        let mut level: Vec<PlacedTile> = (0..33).map(|x| PlacedTile::new("grass", x, 21)).collect();
        level.push(PlacedTile::new("enemy", 28, 20));
        level
    }

    fn state_with(levels: Vec<Vec<PlacedTile>>) -> GameState {
        GameState::new(LevelSet::new(levels).unwrap(), 42)
    }

    #[test]
    fn test_empty_level_advances_on_first_tick() {
        let mut state = state_with(vec![vec![PlacedTile::new("grass", 0, 0)], arena()]);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Advancing);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level_index, 1);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_last_empty_level_completes_and_holds() {
        let mut state = state_with(vec![vec![]]);
        tick(&mut state, &TickInput::default());
        assert_eq!(
            state.phase,
            GamePhase::Complete {
                hold_ticks: COMPLETE_HOLD_TICKS
            }
        );
        assert!(!state.run_finished());

        let frozen = state.player.clone();
        for _ in 0..COMPLETE_HOLD_TICKS {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.run_finished());
        assert_eq!(state.player, frozen);
    }

    #[test]
    fn test_enemy_dies_on_third_hit() {
        let mut state = state_with(vec![arena()]);
        // Keep the enemy quiet so only our bullets matter
        state.enemies[0].shoot_cooldown = 10_000;

        for hit in 1..=ENEMY_MAX_HEALTH {
            let r = state.enemies[0].rect;
            state.bullets.push(Bullet::new(
                Vec2::new(r.x as f32, r.center_y() as f32),
                Vec2::new(PLAYER_BULLET_SPEED, 0.0),
                BulletOwner::Player,
                Some(1),
            ));
            tick(&mut state, &TickInput::default());

            if hit < ENEMY_MAX_HEALTH {
                assert_eq!(state.enemies.len(), 1, "enemy removed early on hit {hit}");
                assert_eq!(state.enemies[0].health, ENEMY_MAX_HEALTH - hit);
                assert!(state.bullets.is_empty());
            } else {
                assert!(state.enemies.is_empty());
            }
        }
        assert!(matches!(state.phase, GamePhase::Complete { .. }));
    }

    #[test]
    fn test_death_freezes_until_restart() {
        let mut state = state_with(vec![arena()]);
        state.enemies[0].shoot_cooldown = 10_000;
        state.player.health = 1;

        // Park an enemy bullet on the player
        let c = state.player.rect.center_f32();
        state.bullets.push(Bullet::new(c, Vec2::ZERO, BulletOwner::Enemy, None));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Dead);

        let frozen_player = state.player.clone();
        let frozen_enemies = state.enemies.clone();
        let held = TickInput {
            right: true,
            jump: true,
            shoot: true,
            ..Default::default()
        };
        for _ in 0..30 {
            tick(&mut state, &held);
        }
        assert_eq!(state.player, frozen_player);
        assert_eq!(state.enemies, frozen_enemies);

        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player, Player::spawn());
        assert!(state.bullets.is_empty());
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_restart_while_playing_rebuilds_level() {
        let mut state = state_with(vec![arena()]);
        state.enemies[0].health = 1;
        state.enemies.push(Enemy::with_heading(0, 0, 1, 10_000));
        state.player.health = 5;
        state.player.facing = -1;

        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].health, ENEMY_MAX_HEALTH);
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
        assert_eq!(state.player.facing, 1);
    }

    #[test]
    fn test_player_shoots_on_tick() {
        let mut state = state_with(vec![arena()]);
        state.enemies[0].shoot_cooldown = 10_000;
        let input = TickInput {
            shoot: true,
            left: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.bullets.len(), 1);
        assert!(state.bullets[0].vel.x < 0.0);
        assert_eq!(state.player.shoot_cooldown, PLAYER_SHOOT_COOLDOWN);

        // Cooldown ticks down at the start of each tick
        for _ in 0..PLAYER_SHOOT_COOLDOWN - 1 {
            tick(&mut state, &input);
        }
        assert_eq!(state.player.shoot_cooldown, 1);
        tick(&mut state, &input);
        assert_eq!(state.player.shoot_cooldown, PLAYER_SHOOT_COOLDOWN);
    }

    #[test]
    fn test_invulnerability_counts_down() {
        let mut state = state_with(vec![arena()]);
        state.enemies[0].shoot_cooldown = 10_000;
        state.player.invuln = 3;
        for expected in [2, 1, 0, 0] {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.player.invuln, expected);
        }
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let levels = vec![arena(), arena()];
        let mut state1 = state_with(levels.clone());
        let mut state2 = state_with(levels);

        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                jump: true,
                shoot: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..100 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.enemies, state2.enemies);
        assert_eq!(state1.bullets, state2.bullets);
    }
}
