#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Snake adapters.

mod geometry;
mod segments;
mod surface;

use anyhow::Result as AnyResult;
use snake_core::{ConfigError, Direction, GameSnapshot, GameStatus};
use std::{error::Error, fmt, time::Duration};

pub use geometry::{BoardGeometry, Rect, Sector};
pub use segments::{draw_segment, render_game, segment_shapes, SegmentShape};
pub use surface::{DrawCommand, Surface};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Colors used by the game renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Color the board is cleared to each frame.
    pub background: Color,
    /// Snake body and head.
    pub snake: Color,
    /// Food disc.
    pub food: Color,
    /// Translucent rectangle drawn behind the game-over image.
    pub game_over_backdrop: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::from_rgb_u8(255, 255, 255),
            snake: Color::from_rgb_u8(0, 0, 0),
            food: Color::from_rgb_u8(255, 0, 0),
            game_over_backdrop: Color::new(1.0, 1.0, 1.0, 0.3),
        }
    }
}

/// Images that backends resolve from their asset manifest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageKey {
    /// Banner shown once the game has ended.
    GameOver,
}

impl ImageKey {
    /// Every image the renderer may request.
    pub const ALL: [ImageKey; 1] = [ImageKey::GameOver];

    /// Name used for the image in asset manifests.
    #[must_use]
    pub const fn manifest_name(self) -> &'static str {
        match self {
            Self::GameOver => "GameOver",
        }
    }

    /// Looks up an image by its manifest name.
    #[must_use]
    pub fn from_manifest_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.manifest_name() == name)
    }
}

/// Control-panel buttons and their keyboard equivalents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlAction {
    /// Resume a paused game.
    Play,
    /// Pause a running game.
    Pause,
    /// Lower the speed factor by one.
    SpeedDown,
    /// Raise the speed factor by one.
    SpeedUp,
    /// Start over after the game has ended.
    NewGame,
}

impl ControlAction {
    /// Text shown on the control-panel button.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Play => "Play",
            Self::Pause => "Pause",
            Self::SpeedDown => "-",
            Self::SpeedUp => "+",
            Self::NewGame => "New Game",
        }
    }
}

/// Which control-panel buttons are currently offered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlPanelView {
    /// Play button visible.
    pub play: bool,
    /// Pause button visible.
    pub pause: bool,
    /// Speed down and speed up buttons visible.
    pub speed: bool,
    /// New game button visible.
    pub new_game: bool,
}

impl ControlPanelView {
    /// Derives the visible controls from the game status.
    #[must_use]
    pub const fn for_status(status: GameStatus) -> Self {
        match status {
            GameStatus::Paused => Self {
                play: true,
                pause: false,
                speed: true,
                new_game: false,
            },
            GameStatus::Running => Self {
                play: false,
                pause: true,
                speed: true,
                new_game: false,
            },
            GameStatus::GameOver => Self {
                play: false,
                pause: false,
                speed: false,
                new_game: true,
            },
        }
    }

    /// Visible actions in the order they are laid out.
    #[must_use]
    pub fn actions(&self) -> Vec<ControlAction> {
        let mut actions = Vec::with_capacity(4);
        if self.play {
            actions.push(ControlAction::Play);
        }
        if self.pause {
            actions.push(ControlAction::Pause);
        }
        if self.speed {
            actions.extend([ControlAction::SpeedDown, ControlAction::SpeedUp]);
        }
        if self.new_game {
            actions.push(ControlAction::NewGame);
        }
        actions
    }

    /// Whether `action` is currently offered.
    #[must_use]
    pub const fn allows(&self, action: ControlAction) -> bool {
        match action {
            ControlAction::Play => self.play,
            ControlAction::Pause => self.pause,
            ControlAction::SpeedDown | ControlAction::SpeedUp => self.speed,
            ControlAction::NewGame => self.new_game,
        }
    }
}

/// Input snapshot gathered by adapters before updating the frame.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Most recent arrow-key direction pressed this frame.
    pub direction: Option<Direction>,
    /// Control actions triggered this frame, in the order they happened.
    pub actions: Vec<ControlAction>,
}

/// Read-only view of the game that backends draw each frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Snapshot of the game state.
    pub game: GameSnapshot,
    /// Controls offered alongside the board.
    pub control_panel: ControlPanelView,
}

impl Frame {
    /// Creates a frame for `game`.
    #[must_use]
    pub fn new(game: GameSnapshot) -> Self {
        let control_panel = ControlPanelView::for_status(game.status);
        Self {
            game,
            control_panel,
        }
    }

    /// Replaces the snapshot and the controls derived from it.
    pub fn update(&mut self, game: GameSnapshot) {
        self.control_panel = ControlPanelView::for_status(game.status);
        self.game = game;
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Pixel layout of the board.
    pub geometry: BoardGeometry,
    /// Colors used to draw the game.
    pub palette: Palette,
    /// Frame shown before the first update.
    pub frame: Frame,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, geometry: BoardGeometry, palette: Palette, frame: Frame) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            geometry,
            palette,
            frame,
        }
    }
}

/// Rendering backend capable of presenting Snake frames.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_frame` closure receives the real frame delta and
    /// the input captured by the adapter, and replaces the frame before it is
    /// drawn.
    fn run<F>(self, presentation: Presentation, update_frame: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Frame) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// Cells must be at least one pixel wide.
    ZeroCellSize,
    /// The board configuration does not describe a valid grid.
    InvalidBoard {
        /// Validation failure reported by the configuration.
        source: ConfigError,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCellSize => write!(f, "cell size must be positive"),
            Self::InvalidBoard { source } => write!(f, "invalid board: {source}"),
        }
    }
}

impl Error for RenderingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ZeroCellSize => None,
            Self::InvalidBoard { source } => Some(source),
        }
    }
}
