//! Tile Platformer entry point
//!
//! Loads settings, levels and sprites, then runs the fixed-timestep game loop.

use macroquad::prelude::*;

use tile_platformer::assets::scan_asset_dir;
use tile_platformer::consts::*;
use tile_platformer::renderer::{draw_game, load_asset_textures, load_background};
use tile_platformer::sim::{GameState, TickInput, tick};
use tile_platformer::{LevelSet, Settings};

fn window_conf() -> Conf {
    Conf {
        window_title: "Platformer with Enemies & Health".to_owned(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

/// Game instance holding all state
struct Game {
    state: GameState,
    accumulator: f32,
    input: TickInput,
}

impl Game {
    fn new(state: GameState) -> Self {
        Self {
            state,
            accumulator: 0.0,
            input: TickInput::default(),
        }
    }

    /// Sample the keyboard. Restart is latched until a tick consumes it.
    fn poll_input(&mut self) {
        self.input.left = is_key_down(KeyCode::Left);
        self.input.right = is_key_down(KeyCode::Right);
        self.input.jump = is_key_down(KeyCode::Up);
        self.input.shoot = is_key_down(KeyCode::Space);
        if is_key_pressed(KeyCode::R) {
            self.input.restart = true;
        }
    }

    /// Run simulation ticks
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.restart = false;
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    log::info!("Tile Platformer starting...");

    let settings = Settings::load_default();

    let levels = match LevelSet::load(&settings.level_file) {
        Ok(levels) => levels,
        Err(e) => {
            log::error!("{}", e);
            log::error!("No playable levels; create some with the level-editor binary");
            return;
        }
    };

    let seed = settings.resolve_seed();
    log::info!("Game initialized with seed: {}", seed);
    let mut game = Game::new(GameState::new(levels, seed));

    let catalog = scan_asset_dir(&settings.asset_dir);
    let textures = load_asset_textures(&catalog).await;
    let background = load_background(&settings.game_background).await;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            log::info!("Quit requested");
            break;
        }

        game.poll_input();
        game.update(get_frame_time());

        draw_game(&game.state, &textures, background.as_ref(), settings.show_fps);

        if game.state.run_finished() {
            log::info!("Run complete");
            break;
        }

        next_frame().await;
    }
}
