#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Snake.

mod state;

use snake_core::{Command, ConfigError, Event, GameConfig, WELCOME_BANNER};
use snake_system_food::FoodPlacer;
use tracing::{info, warn};

pub use state::{GameState, StateError, Transition};

/// Represents the authoritative Snake world.
#[derive(Clone, Debug)]
pub struct World {
    banner: &'static str,
    config: GameConfig,
    state: GameState,
    food: FoodPlacer,
}

impl World {
    /// Creates a paused world laid out according to `config`.
    ///
    /// Food placement is driven by `seed`, so identical seeds and commands
    /// replay identical games.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let state = GameState::initial(&config, true)?;
        info!(
            width = state.grid().width(),
            height = state.grid().height(),
            seed,
            "world created"
        );
        Ok(Self::from_state(config, state, seed))
    }

    /// Wraps an already constructed state, typically one built for a test.
    #[must_use]
    pub fn from_state(config: GameConfig, state: GameState, seed: u64) -> Self {
        Self {
            banner: WELCOME_BANNER,
            config,
            state,
            food: FoodPlacer::new(seed),
        }
    }

    fn restart(&mut self, out_events: &mut Vec<Event>) {
        match GameState::initial(&self.config, false) {
            Ok(state) => {
                self.state = state;
                info!(seed = self.food.seed(), "new game started");
                out_events.push(Event::GameRestarted);
            }
            Err(error) => {
                // Only reachable through `from_state` with an invalid config.
                warn!(%error, "cannot restart with the stored configuration");
            }
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => {
            let transition = world.state.tick(&mut world.food);
            world.state = transition.state;
            out_events.extend(transition.events);
        }
        Command::QueueDirection { direction } => {
            world.state.queue_direction(direction, out_events);
        }
        Command::Play => world.state.set_paused(false, out_events),
        Command::Pause => world.state.set_paused(true, out_events),
        Command::ChangeSpeed { delta } => world.state.change_speed(delta, out_events),
        Command::NewGame => world.restart(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::{GameState, World};
    use snake_core::{
        Cell, Direction, GameConfig, GameOverReason, GameSnapshot, GameStatus, GridSize,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the complete game state.
    #[must_use]
    pub fn state(world: &World) -> &GameState {
        &world.state
    }

    /// Captures an owned snapshot suitable for handing to a renderer.
    #[must_use]
    pub fn snapshot(world: &World) -> GameSnapshot {
        world.state.snapshot()
    }

    /// Configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Snake cells, head first.
    #[must_use]
    pub fn snake(world: &World) -> Vec<Cell> {
        world.state.snake().iter().copied().collect()
    }

    /// Direction currently in effect.
    #[must_use]
    pub fn direction(world: &World) -> Direction {
        world.state.direction()
    }

    /// Turn waiting for the next tick.
    #[must_use]
    pub fn pending_direction(world: &World) -> Option<Direction> {
        world.state.pending_direction()
    }

    /// Cell holding the food, when any is on the board.
    #[must_use]
    pub fn food(world: &World) -> Option<Cell> {
        world.state.food()
    }

    /// Current score.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.state.score()
    }

    /// Current speed factor.
    #[must_use]
    pub fn speed_factor(world: &World) -> u32 {
        world.state.speed_factor()
    }

    /// Current state machine status.
    #[must_use]
    pub fn status(world: &World) -> GameStatus {
        world.state.status()
    }

    /// Grid the game is played on.
    #[must_use]
    pub fn grid(world: &World) -> GridSize {
        world.state.grid()
    }

    /// Why the game ended, once it has.
    #[must_use]
    pub fn game_over_reason(world: &World) -> Option<GameOverReason> {
        world.state.game_over_reason()
    }

    /// Time between ticks at the current speed factor.
    #[must_use]
    pub fn tick_interval(world: &World) -> Duration {
        world.config.base_tick_interval() / world.state.speed_factor().max(1)
    }
}
