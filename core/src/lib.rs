#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Snake engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then reports [`Event`] values describing what
//! changed. Renderers never see the world directly; they receive immutable
//! snapshots built from its queries.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Snake.";

/// Column of the initial head is the snake length plus this offset.
const INITIAL_HEAD_COLUMN_OFFSET: i32 = 5;
/// Row the initial snake is laid out on.
const INITIAL_ROW: i32 = 5;

/// Cardinal movement directions available to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Reports whether `other` points exactly the opposite way.
    #[must_use]
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Column and row delta of a single step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Reports whether the direction moves along the horizontal axis.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Coordinates are signed so that a step off the top or left edge is still
/// representable; such cells simply fail [`GridSize::contains`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    x: i32,
    y: i32,
}

impl Cell {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the neighbouring cell one step away in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Direction of travel from `self` to an orthogonally adjacent `other`.
    ///
    /// Returns `None` when the cells are not direct neighbours.
    #[must_use]
    pub fn direction_to(self, other: Cell) -> Option<Direction> {
        match (other.x - self.x, other.y - self.y) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Dimensions of the playing grid measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    /// Creates a new grid size descriptor.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells contained in the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let count = u64::from(self.width) * u64::from(self.height);
        usize::try_from(count).unwrap_or(usize::MAX)
    }

    /// Reports whether the cell lies within `[0, width) x [0, height)`.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        let column = u32::try_from(cell.x()).map_or(false, |x| x < self.width);
        let row = u32::try_from(cell.y()).map_or(false, |y| y < self.height);
        column && row
    }

    /// Iterates every cell of the grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let width = i32::try_from(self.width).unwrap_or(i32::MAX);
        let height = i32::try_from(self.height).unwrap_or(i32::MAX);
        (0..height).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
    }
}

/// Pixel dimensions of the drawing surface and the size of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Width of the drawing surface in pixels.
    pub pixel_width: u32,
    /// Height of the drawing surface in pixels.
    pub pixel_height: u32,
    /// Side length of one square cell in pixels.
    pub cell_size: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            pixel_width: 600,
            pixel_height: 400,
            cell_size: 10,
        }
    }
}

impl BoardConfig {
    /// Derives the grid dimensions from the surface and cell size.
    ///
    /// Both surface dimensions must be positive multiples of the cell size.
    pub fn grid_size(&self) -> Result<GridSize, ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        if self.pixel_width == 0
            || self.pixel_height == 0
            || self.pixel_width % self.cell_size != 0
            || self.pixel_height % self.cell_size != 0
        {
            return Err(ConfigError::UnevenBoard {
                pixel_width: self.pixel_width,
                pixel_height: self.pixel_height,
                cell_size: self.cell_size,
            });
        }

        Ok(GridSize::new(
            self.pixel_width / self.cell_size,
            self.pixel_height / self.cell_size,
        ))
    }
}

/// Fixed game constants. Defaults reproduce the classic 60x40 board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Surface and cell dimensions.
    pub board: BoardConfig,
    /// Number of cells in a freshly spawned snake.
    pub initial_snake_length: u32,
    /// Delay between ticks at speed factor one, in milliseconds.
    pub base_tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            initial_snake_length: 10,
            base_tick_interval_ms: 200,
        }
    }
}

impl GameConfig {
    /// Validates the configuration and returns the derived grid.
    pub fn validate(&self) -> Result<GridSize, ConfigError> {
        let grid = self.board.grid_size()?;
        if self.initial_snake_length == 0 {
            return Err(ConfigError::EmptySnake);
        }
        if self.base_tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        // The body extends left from the head, so the head is the only cell
        // that can leave the grid.
        if !grid.contains(self.initial_head()) {
            return Err(ConfigError::SnakeDoesNotFit {
                length: self.initial_snake_length,
                width: grid.width(),
                height: grid.height(),
            });
        }
        Ok(grid)
    }

    /// Delay between ticks at speed factor one.
    #[must_use]
    pub fn base_tick_interval(&self) -> Duration {
        Duration::from_millis(self.base_tick_interval_ms)
    }

    /// Cells of a freshly spawned snake, head first, laid out horizontally
    /// and facing right.
    #[must_use]
    pub fn initial_snake(&self) -> Vec<Cell> {
        let head = self.initial_head();
        let length = i32::try_from(self.initial_snake_length).unwrap_or(i32::MAX);
        (0..length)
            .map(|index| Cell::new(head.x() - index, INITIAL_ROW))
            .collect()
    }

    fn initial_head(&self) -> Cell {
        let length = i32::try_from(self.initial_snake_length).unwrap_or(i32::MAX);
        Cell::new(length.saturating_add(INITIAL_HEAD_COLUMN_OFFSET), INITIAL_ROW)
    }
}

/// Errors raised while validating a [`GameConfig`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The cell size must be positive.
    #[error("cell_size must be positive")]
    ZeroCellSize,
    /// The surface does not divide into whole cells.
    #[error(
        "board of {pixel_width}x{pixel_height} pixels does not divide evenly into {cell_size}-pixel cells"
    )]
    UnevenBoard {
        /// Configured surface width.
        pixel_width: u32,
        /// Configured surface height.
        pixel_height: u32,
        /// Configured cell size.
        cell_size: u32,
    },
    /// The initial snake must contain at least one cell.
    #[error("initial_snake_length must be positive")]
    EmptySnake,
    /// The base tick interval must be positive.
    #[error("base_tick_interval_ms must be positive")]
    ZeroTickInterval,
    /// The initial snake would extend beyond the grid.
    #[error("an initial snake of length {length} does not fit a {width}x{height} grid")]
    SnakeDoesNotFit {
        /// Requested initial length.
        length: u32,
        /// Grid columns derived from the board.
        width: u32,
        /// Grid rows derived from the board.
        height: u32,
    },
}

/// Externally visible state of the game state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Ticks are no-ops until the game is resumed.
    Paused,
    /// Ticks advance the snake.
    Running,
    /// The game ended; only a restart leaves this state.
    GameOver,
}

/// Reasons a game can end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverReason {
    /// The head left the grid.
    Wall,
    /// The head ran into the snake's own body.
    SelfCollision,
    /// No free cell remained for food.
    BoardFull,
}

/// Immutable copy of everything a renderer or status display needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Snake cells ordered head first.
    pub snake: Vec<Cell>,
    /// Direction currently in effect.
    pub direction: Direction,
    /// Cell holding the food, if any has been placed.
    pub food: Option<Cell>,
    /// Number of food items eaten.
    pub score: u32,
    /// Tick rate multiplier.
    pub speed_factor: u32,
    /// State machine status.
    pub status: GameStatus,
    /// Why the game ended, once it has.
    pub game_over_reason: Option<GameOverReason>,
}

impl GameSnapshot {
    /// Reports whether the snapshot was taken after the game ended.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the simulation by one step.
    Tick,
    /// Buffers a turn to be applied at the start of the next tick.
    QueueDirection {
        /// Requested heading.
        direction: Direction,
    },
    /// Resumes a paused game.
    Play,
    /// Pauses a running game.
    Pause,
    /// Adjusts the speed factor by the provided delta, never below one.
    ChangeSpeed {
        /// Signed adjustment applied to the speed factor.
        delta: i32,
    },
    /// Replaces the game with a fresh one that starts running immediately.
    NewGame,
}

/// Events reported by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// A buffered turn became the current direction.
    DirectionApplied {
        /// Direction now in effect.
        direction: Direction,
    },
    /// A turn request was accepted into the buffer.
    DirectionQueued {
        /// Direction waiting for the next tick.
        direction: Direction,
    },
    /// A turn request was ignored because it would reverse the snake.
    DirectionRejected {
        /// Direction that was requested.
        requested: Direction,
        /// Direction currently in effect.
        current: Direction,
    },
    /// The snake moved one cell.
    SnakeAdvanced {
        /// New head cell.
        head: Cell,
        /// Whether the snake grew during the move.
        grew: bool,
    },
    /// The snake consumed the food.
    FoodEaten {
        /// Cell the food occupied.
        cell: Cell,
        /// Score after eating.
        score: u32,
    },
    /// New food was placed on the board.
    FoodPlaced {
        /// Cell holding the food.
        cell: Cell,
    },
    /// Food placement found no free cell.
    BoardFull,
    /// The game ended.
    GameOver {
        /// Why the game ended.
        reason: GameOverReason,
        /// Final score.
        score: u32,
    },
    /// The paused flag changed.
    PauseChanged {
        /// Whether the game is now paused.
        paused: bool,
    },
    /// The speed factor changed.
    SpeedChanged {
        /// Speed factor now in effect.
        speed_factor: u32,
    },
    /// The game was replaced with a fresh one.
    GameRestarted,
}
