//! Game state aggregate and its pure tick transition.

use std::collections::{HashSet, VecDeque};

use snake_core::{
    Cell, ConfigError, Direction, Event, GameConfig, GameOverReason, GameSnapshot, GameStatus,
    GridSize,
};
use snake_system_collision::{detect, Collision};
use snake_system_food::{FoodPlacementError, FoodPlacer};
use thiserror::Error;
use tracing::{debug, info};

/// Reasons a hand-built [`GameState`] is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum StateError {
    /// A snake needs at least one cell.
    #[error("snake must contain at least one cell")]
    EmptySnake,
    /// A snake cell lies outside the grid.
    #[error("snake cell {0:?} lies outside the grid")]
    OutOfBounds(Cell),
    /// A cell appears twice in the snake.
    #[error("snake occupies {0:?} more than once")]
    DuplicateCell(Cell),
    /// Food cannot be placed outside the grid or on the snake.
    #[error("food cannot be placed at {0:?}")]
    InvalidFood(Cell),
}

/// Result of a pure tick: the successor state plus what happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// State after the tick.
    pub state: GameState,
    /// Events produced by the tick, in order.
    pub events: Vec<Event>,
}

/// Everything that describes one game in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    grid: GridSize,
    snake: VecDeque<Cell>,
    direction: Direction,
    pending_direction: Option<Direction>,
    food: Option<Cell>,
    score: u32,
    speed_factor: u32,
    paused: bool,
    game_over: Option<GameOverReason>,
}

impl GameState {
    /// Creates the opening state described by `config`.
    pub fn initial(config: &GameConfig, paused: bool) -> Result<Self, ConfigError> {
        let grid = config.validate()?;
        Ok(Self {
            grid,
            snake: config.initial_snake().into(),
            direction: Direction::Right,
            pending_direction: None,
            food: None,
            score: 0,
            speed_factor: 1,
            paused,
            game_over: None,
        })
    }

    /// Creates a running state with an arbitrary snake, head first.
    pub fn with_snake<I>(grid: GridSize, cells: I, direction: Direction) -> Result<Self, StateError>
    where
        I: IntoIterator<Item = Cell>,
    {
        let snake: VecDeque<Cell> = cells.into_iter().collect();
        if snake.is_empty() {
            return Err(StateError::EmptySnake);
        }

        let mut seen = HashSet::with_capacity(snake.len());
        for cell in &snake {
            if !grid.contains(*cell) {
                return Err(StateError::OutOfBounds(*cell));
            }
            if !seen.insert(*cell) {
                return Err(StateError::DuplicateCell(*cell));
            }
        }

        Ok(Self {
            grid,
            snake,
            direction,
            pending_direction: None,
            food: None,
            score: 0,
            speed_factor: 1,
            paused: false,
            game_over: None,
        })
    }

    /// Places food at `cell`, which must be inside the grid and off the snake.
    pub fn with_food(mut self, cell: Cell) -> Result<Self, StateError> {
        if !self.grid.contains(cell) || self.snake.contains(&cell) {
            return Err(StateError::InvalidFood(cell));
        }
        self.food = Some(cell);
        Ok(self)
    }

    /// Overrides the paused flag.
    #[must_use]
    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    /// Grid the game is played on.
    #[must_use]
    pub const fn grid(&self) -> GridSize {
        self.grid
    }

    /// Snake cells ordered head first.
    #[must_use]
    pub fn snake(&self) -> &VecDeque<Cell> {
        &self.snake
    }

    /// Cell currently occupied by the head.
    #[must_use]
    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    /// Direction currently in effect.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Turn buffered for the next tick.
    #[must_use]
    pub const fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Cell holding the food.
    #[must_use]
    pub const fn food(&self) -> Option<Cell> {
        self.food
    }

    /// Number of food items eaten.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Tick rate multiplier, never below one.
    #[must_use]
    pub const fn speed_factor(&self) -> u32 {
        self.speed_factor
    }

    /// Whether ticks are currently suspended by the player.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the game has ended.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.game_over.is_some()
    }

    /// Why the game ended, once it has.
    #[must_use]
    pub const fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over
    }

    /// Externally visible state machine status.
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        if self.game_over.is_some() {
            GameStatus::GameOver
        } else if self.paused {
            GameStatus::Paused
        } else {
            GameStatus::Running
        }
    }

    /// Copies the state into an owned snapshot for renderers.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            snake: self.snake.iter().copied().collect(),
            direction: self.direction,
            food: self.food,
            score: self.score,
            speed_factor: self.speed_factor,
            status: self.status(),
            game_over_reason: self.game_over,
        }
    }

    /// Computes the state one tick later without touching `self`.
    ///
    /// Paused and finished games come back unchanged with no events.
    #[must_use]
    pub fn tick(&self, food_placer: &mut FoodPlacer) -> Transition {
        let mut events = Vec::new();
        if self.status() != GameStatus::Running {
            return Transition {
                state: self.clone(),
                events,
            };
        }

        let mut next = self.clone();
        if let Some(direction) = next.pending_direction.take() {
            next.direction = direction;
            debug!(?direction, "turn applied");
            events.push(Event::DirectionApplied { direction });
        }

        let next_head = next.head().step(next.direction);
        let eating = next.food == Some(next_head);

        if let Some(collision) = detect(next.grid, &next.snake, next_head, eating) {
            let reason = match collision {
                Collision::Wall => GameOverReason::Wall,
                Collision::SelfIntersection => GameOverReason::SelfCollision,
            };
            next.finish(reason, &mut events);
            return Transition {
                state: next,
                events,
            };
        }

        next.snake.push_front(next_head);
        if eating {
            next.score = next.score.saturating_add(1);
            next.food = None;
        } else {
            let _ = next.snake.pop_back();
        }
        events.push(Event::SnakeAdvanced {
            head: next_head,
            grew: eating,
        });
        if eating {
            debug!(cell = ?next_head, score = next.score, "food eaten");
            events.push(Event::FoodEaten {
                cell: next_head,
                score: next.score,
            });
        }

        if next.food.is_none() {
            match food_placer.place(&next.snake, next.grid) {
                Ok(cell) => {
                    next.food = Some(cell);
                    events.push(Event::FoodPlaced { cell });
                }
                Err(FoodPlacementError::BoardFull { .. }) => {
                    events.push(Event::BoardFull);
                    next.finish(GameOverReason::BoardFull, &mut events);
                }
            }
        }

        Transition {
            state: next,
            events,
        }
    }

    /// Buffers a turn for the next tick unless it reverses the current heading.
    ///
    /// The buffer holds one entry; a later request overwrites an earlier one.
    pub fn queue_direction(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if self.is_game_over() {
            return;
        }

        if direction.is_opposite(self.direction) {
            out_events.push(Event::DirectionRejected {
                requested: direction,
                current: self.direction,
            });
            return;
        }

        self.pending_direction = Some(direction);
        out_events.push(Event::DirectionQueued { direction });
    }

    /// Pauses or resumes the game. Finished games ignore the request.
    pub fn set_paused(&mut self, paused: bool, out_events: &mut Vec<Event>) {
        if self.is_game_over() || self.paused == paused {
            return;
        }
        self.paused = paused;
        out_events.push(Event::PauseChanged { paused });
    }

    /// Adds `delta` to the speed factor, clamping at one.
    pub fn change_speed(&mut self, delta: i32, out_events: &mut Vec<Event>) {
        let requested = i64::from(self.speed_factor) + i64::from(delta);
        let speed_factor = u32::try_from(requested.max(1)).unwrap_or(u32::MAX);
        if speed_factor == self.speed_factor {
            return;
        }
        self.speed_factor = speed_factor;
        out_events.push(Event::SpeedChanged { speed_factor });
    }

    fn finish(&mut self, reason: GameOverReason, events: &mut Vec<Event>) {
        self.game_over = Some(reason);
        info!(?reason, score = self.score, "game over");
        events.push(Event::GameOver {
            reason,
            score: self.score,
        });
    }
}
