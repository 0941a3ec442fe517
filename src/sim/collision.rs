//! Movement and collision against the static tile field
//!
//! Collisions are resolved one axis at a time: move along x and push out of
//! any tile hit, then the same along y. Tiles are scanned in level order;
//! since tiles never overlap each other the first hit decides in practice.

use super::field::TileField;
use super::rect::Rect;
use super::state::{Enemy, Player};
use super::tick::TickInput;
use crate::consts::*;

/// Move `rect` horizontally by `dx` (truncated to whole pixels) and push it
/// out of any tile it now overlaps.
pub fn resolve_horizontal(rect: &mut Rect, field: &TileField, dx: f32) {
    rect.x += dx as i32;
    for tile in field.tiles() {
        if rect.overlaps(&tile.rect) {
            if dx > 0.0 {
                rect.set_right(tile.rect.left());
            } else if dx < 0.0 {
                rect.set_left(tile.rect.right());
            }
        }
    }
}

/// Move `rect` vertically by `dy` and push it out of any tile it now
/// overlaps. Returns true when it came to rest on top of a tile.
pub fn resolve_vertical(rect: &mut Rect, field: &TileField, dy: f32) -> bool {
    rect.y += dy as i32;
    let mut landed = false;
    for tile in field.tiles() {
        if rect.overlaps(&tile.rect) {
            if dy > 0.0 {
                rect.set_bottom(tile.rect.top());
                landed = true;
            } else if dy < 0.0 {
                rect.set_top(tile.rect.bottom());
            }
        }
    }
    landed
}

/// Axis-separated move: horizontal first, then vertical. Returns whether
/// the rectangle landed.
pub fn move_and_collide(rect: &mut Rect, field: &TileField, dx: f32, dy: f32) -> bool {
    resolve_horizontal(rect, field, dx);
    resolve_vertical(rect, field, dy)
}

/// Keep the player inside the window. The floor counts as ground; the
/// ceiling stops upward motion.
pub fn clamp_to_screen(player: &mut Player) {
    if player.rect.left() < 0 {
        player.rect.set_left(0);
    }
    if player.rect.right() > WINDOW_WIDTH {
        player.rect.set_right(WINDOW_WIDTH);
    }

    if player.rect.bottom() > WINDOW_HEIGHT {
        player.rect.set_bottom(WINDOW_HEIGHT);
        player.vel_y = 0.0;
        player.on_ground = true;
    }
    if player.rect.top() < 0 {
        player.rect.set_top(0);
        player.vel_y = 0.0;
    }
}

/// One tick of player movement: jump, gravity, tile collision, screen clamp.
///
/// Gravity is applied every tick, even when standing, and only an actual
/// landing zeroes it again.
pub fn step_player(player: &mut Player, field: &TileField, input: &TickInput) {
    if input.jump && player.on_ground {
        player.vel_y = -JUMP_POWER;
        player.on_ground = false;
    }

    player.vel_y = (player.vel_y + GRAVITY).min(MAX_FALL_SPEED);

    let dx = (input.horizontal() * PLAYER_SPEED) as f32;
    let landed = move_and_collide(&mut player.rect, field, dx, player.vel_y);
    if landed {
        player.vel_y = 0.0;
    }
    player.on_ground = landed;

    clamp_to_screen(player);
}

/// Keep an enemy glued to the ground: nudge it down a pixel and, if that
/// touches a tile, sit it on top. Otherwise leave it where it was.
pub fn enemy_ground_snap(rect: &mut Rect, field: &TileField) -> bool {
    rect.y += 1;
    match field.first_overlap(rect) {
        Some(tile) => {
            rect.set_bottom(tile.rect.top());
            true
        }
        None => {
            rect.y -= 1;
            false
        }
    }
}

/// Walk the enemy along its patrol, turning around at walls and ledges.
pub fn enemy_patrol(enemy: &mut Enemy, field: &TileField) {
    enemy.rect.x += (enemy.dir as f32 * enemy.speed) as i32;

    if let Some(tile) = field.first_overlap(&enemy.rect) {
        if enemy.dir > 0 {
            enemy.rect.set_right(tile.rect.left());
        } else {
            enemy.rect.set_left(tile.rect.right());
        }
        enemy.dir = -enemy.dir;
        return;
    }

    // Probe just past the leading edge, under the feet
    let ahead_x = enemy.rect.center_x() + enemy.dir * (enemy.rect.w / 2 + 1);
    let foot = Rect::new(ahead_x, enemy.rect.bottom() + 1, 2, 2);
    if !field.any_overlap(&foot) {
        enemy.dir = -enemy.dir;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::field::{TileRect, grid_rect};
    use proptest::prelude::*;

    fn field(cells: &[(i32, i32)]) -> TileField {
        TileField::new(
            cells
                .iter()
                .map(|&(x, y)| TileRect {
                    rect: grid_rect(x, y),
                    asset: "block".into(),
                })
                .collect(),
        )
    }

    fn floor(row: i32, cols: std::ops::Range<i32>) -> Vec<(i32, i32)> {
        cols.map(|c| (c, row)).collect()
    }

    #[test]
    fn test_horizontal_snaps_to_wall() {
        let f = field(&[(5, 0)]);
        let mut rect = Rect::new(94, 0, 24, 24);
        resolve_horizontal(&mut rect, &f, 4.0);
        assert_eq!(rect.right(), 120);

        let mut rect = Rect::new(146, 0, 24, 24);
        resolve_horizontal(&mut rect, &f, -4.0);
        assert_eq!(rect.left(), 144);
    }

    #[test]
    fn test_vertical_landing_and_ceiling() {
        let f = field(&[(0, 10)]);
        let mut rect = Rect::new(0, 210, 24, 24);
        assert!(resolve_vertical(&mut rect, &f, 12.0));
        assert_eq!(rect.bottom(), 240);

        let mut rect = Rect::new(0, 270, 24, 24);
        assert!(!resolve_vertical(&mut rect, &f, -12.0));
        assert_eq!(rect.top(), 264);
    }

    #[test]
    fn test_sub_pixel_fall_does_not_move() {
        let f = field(&[]);
        let mut rect = Rect::new(0, 100, 24, 24);
        assert!(!resolve_vertical(&mut rect, &f, 0.7));
        assert_eq!(rect.y, 100);
    }

    #[test]
    fn test_unopposed_fall_reaches_terminal_velocity() {
        let f = field(&[]);
        let mut player = Player::spawn();
        let input = TickInput::default();

        let mut last_y = player.rect.y;
        let mut ticks = 0;
        while player.rect.bottom() < WINDOW_HEIGHT {
            step_player(&mut player, &f, &input);
            ticks += 1;
            assert!(player.rect.y >= last_y, "fall must be monotonic");
            last_y = player.rect.y;

            if ticks < 18 && player.rect.bottom() < WINDOW_HEIGHT {
                assert!(player.vel_y < MAX_FALL_SPEED);
            }
            if ticks == 18 {
                assert_eq!(player.vel_y, MAX_FALL_SPEED);
            }
            assert!(ticks < 200);
        }

        // The window floor stops the fall
        assert!(player.on_ground);
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn test_landing_on_tile_sets_on_ground() {
        let f = field(&floor(21, 0..33));
        let mut player = Player::spawn();
        let input = TickInput::default();
        for _ in 0..120 {
            step_player(&mut player, &f, &input);
        }
        assert_eq!(player.rect.bottom(), 21 * TILE_SIZE);
    }

    #[test]
    fn test_jump_needs_ground() {
        let f = field(&[]);
        let mut player = Player::spawn();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        step_player(&mut player, &f, &jump);
        assert!(player.vel_y > 0.0);

        player.on_ground = true;
        step_player(&mut player, &f, &jump);
        assert_eq!(player.vel_y, -JUMP_POWER + GRAVITY);
        assert!(!player.on_ground);
    }

    #[test]
    fn test_screen_clamp() {
        let mut player = Player::spawn();
        player.rect.x = -10;
        player.rect.y = -5;
        player.vel_y = -3.0;
        clamp_to_screen(&mut player);
        assert_eq!((player.rect.x, player.rect.y), (0, 0));
        assert_eq!(player.vel_y, 0.0);

        player.rect.x = WINDOW_WIDTH;
        player.rect.y = WINDOW_HEIGHT;
        player.vel_y = 5.0;
        clamp_to_screen(&mut player);
        assert_eq!(player.rect.right(), WINDOW_WIDTH);
        assert_eq!(player.rect.bottom(), WINDOW_HEIGHT);
        assert!(player.on_ground);
    }

    #[test]
    fn test_enemy_ground_snap() {
        let f = field(&[(0, 10)]);
        let mut standing = Rect::new(0, 216, 24, 24);
        assert!(enemy_ground_snap(&mut standing, &f));
        assert_eq!(standing.bottom(), 240);

        let mut floating = Rect::new(0, 100, 24, 24);
        assert!(!enemy_ground_snap(&mut floating, &f));
        assert_eq!(floating.y, 100);
    }

    #[test]
    fn test_patrol_turns_at_wall() {
        let mut cells = floor(10, 0..10);
        cells.push((5, 9));
        let f = field(&cells);
        let mut enemy = Enemy::with_heading(96, 216, 1, 0);
        enemy_patrol(&mut enemy, &f);
        assert_eq!(enemy.rect.right(), 120);
        assert_eq!(enemy.dir, -1);
    }

    #[test]
    fn test_patrol_turns_at_ledge() {
        let f = field(&floor(10, 0..3));
        // Right edge of the enemy at the end of the platform
        let mut enemy = Enemy::with_heading(47, 216, 1, 0);
        enemy_patrol(&mut enemy, &f);
        assert_eq!(enemy.rect.x, 48);
        assert_eq!(enemy.dir, -1);
    }

    #[test]
    fn test_patrol_keeps_walking_when_supported() {
        let f = field(&floor(10, 0..10));
        let mut enemy = Enemy::with_heading(100, 216, -1, 0);
        enemy_patrol(&mut enemy, &f);
        assert_eq!(enemy.rect.x, 99);
        assert_eq!(enemy.dir, -1);
    }

    proptest! {
        #[test]
        fn prop_no_horizontal_overlap_after_resolution(
            cells in proptest::collection::btree_set((0i32..12, 0i32..6), 0..30),
            x in 0i32..280,
            y in 0i32..140,
            dx in -PLAYER_SPEED..=PLAYER_SPEED,
        ) {
            let mut rect = Rect::new(x, y, TILE_SIZE, TILE_SIZE);
            // Start clear of every tile
            let cells: Vec<(i32, i32)> = cells
                .into_iter()
                .filter(|&(cx, cy)| !grid_rect(cx, cy).overlaps(&rect))
                .collect();
            let f = field(&cells);

            resolve_horizontal(&mut rect, &f, dx as f32);
            prop_assert!(!f.any_overlap(&rect));
        }

        #[test]
        fn prop_fall_speed_never_exceeds_cap(
            start_vel in -JUMP_POWER..MAX_FALL_SPEED,
            ticks in 0usize..300,
        ) {
            let f = field(&[]);
            let mut player = Player::spawn();
            player.vel_y = start_vel;
            let input = TickInput::default();
            for _ in 0..ticks {
                step_player(&mut player, &f, &input);
                prop_assert!(player.vel_y <= MAX_FALL_SPEED);
            }
        }
    }
}
