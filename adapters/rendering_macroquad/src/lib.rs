#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Snake.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The board is drawn through the shared `Surface` contract; the control panel
//! below it uses Macroquad's immediate-mode UI, confined to the local `ui`
//! module.

mod images;
mod surface;
mod ui;

use std::{path::PathBuf, time::Duration};

use glam::Vec2;
use macroquad::{
    color::Color as MacroquadColor,
    input::{get_last_key_pressed, is_key_pressed, KeyCode},
    math::Vec2 as MacroquadVec2,
};
use snake_core::{Direction, GameStatus};
use snake_rendering::{
    render_game, Color, ControlAction, ControlPanelView, Frame, FrameInput, Presentation,
    RenderingBackend,
};
use tracing::{info, warn};

pub use self::images::ImageAtlas;
use self::{
    surface::MacroquadSurface,
    ui::{draw_control_panel_ui, ControlPanelUiContext},
};

/// Height of the control strip drawn under the board.
const CONTROL_PANEL_HEIGHT: f32 = 44.0;
/// Narrowest window that still fits every control.
const MIN_WINDOW_WIDTH: f32 = 360.0;

const ARROW_KEYS: [(KeyCode, Direction); 4] = [
    (KeyCode::Up, Direction::Up),
    (KeyCode::Down, Direction::Down),
    (KeyCode::Left, Direction::Left),
    (KeyCode::Right, Direction::Right),
];

/// Tracks UI-sourced interactions so they can be merged with physical input on the next frame.
#[doc(hidden)]
#[derive(Clone, Debug, Default)]
pub struct ControlPanelInputState {
    latched: Vec<ControlAction>,
}

impl ControlPanelInputState {
    /// Returns the latched button presses and clears them so each fires only once.
    pub fn take_actions(&mut self) -> Vec<ControlAction> {
        std::mem::take(&mut self.latched)
    }

    /// Records that a control-panel button was clicked this frame.
    ///
    /// Repeated clicks of the same button before the next take collapse into one.
    pub fn register(&mut self, action: ControlAction) {
        if !self.latched.contains(&action) {
            self.latched.push(action);
        }
    }
}

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    pub quit_requested: bool,
    /// Latest arrow key pressed this frame.
    pub direction: Option<Direction>,
    /// `Space` toggles between playing and paused.
    pub toggle_pause: bool,
    /// `N` or `Enter` starts a new game once the current one is over.
    pub new_game: bool,
    /// `-` lowers the speed factor.
    pub speed_down: bool,
    /// `+` (or `=`) raises the speed factor.
    pub speed_up: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let direction = get_last_key_pressed()
            .and_then(direction_for_key)
            .or_else(|| {
                ARROW_KEYS
                    .into_iter()
                    .filter(|(key, _)| is_key_pressed(*key))
                    .map(|(_, direction)| direction)
                    .last()
            });
        let toggle_pause = is_key_pressed(KeyCode::Space);
        let new_game = is_key_pressed(KeyCode::N)
            || is_key_pressed(KeyCode::Enter)
            || is_key_pressed(KeyCode::KpEnter);
        let speed_down = is_key_pressed(KeyCode::Minus) || is_key_pressed(KeyCode::KpSubtract);
        let speed_up = is_key_pressed(KeyCode::Equal) || is_key_pressed(KeyCode::KpAdd);

        Self {
            quit_requested,
            direction,
            toggle_pause,
            new_game,
            speed_down,
            speed_up,
        }
    }
}

/// Maps an arrow key to the direction it steers.
#[must_use]
pub fn direction_for_key(key: KeyCode) -> Option<Direction> {
    ARROW_KEYS
        .into_iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, direction)| direction)
}

/// Merges keyboard shortcuts with clicked buttons into the input for one frame.
///
/// Keyboard actions only fire when the matching button is offered, so both
/// input paths obey the same rules. Space resolves to `Play` or `Pause`
/// depending on `status`.
#[must_use]
pub fn gather_frame_input(
    keyboard: KeyboardShortcuts,
    status: GameStatus,
    button_actions: Vec<ControlAction>,
) -> FrameInput {
    let panel = ControlPanelView::for_status(status);
    let mut actions = button_actions;

    let mut keyboard_actions = Vec::new();
    if keyboard.toggle_pause {
        match status {
            GameStatus::Paused => keyboard_actions.push(ControlAction::Play),
            GameStatus::Running => keyboard_actions.push(ControlAction::Pause),
            GameStatus::GameOver => {}
        }
    }
    if keyboard.speed_down {
        keyboard_actions.push(ControlAction::SpeedDown);
    }
    if keyboard.speed_up {
        keyboard_actions.push(ControlAction::SpeedUp);
    }
    if keyboard.new_game {
        keyboard_actions.push(ControlAction::NewGame);
    }

    for action in keyboard_actions {
        if panel.allows(action) && !actions.contains(&action) {
            actions.push(action);
        }
    }

    FrameInput {
        direction: keyboard.direction,
        actions,
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    manifest_path: Option<PathBuf>,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            manifest_path: Some(ImageAtlas::default_manifest_path()),
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Sets the image manifest to load, or `None` to always use the text fallback.
    #[must_use]
    pub fn with_manifest_path(mut self, manifest_path: Option<PathBuf>) -> Self {
        self.manifest_path = manifest_path;
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_frame: F) -> anyhow::Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Frame) + 'static,
    {
        let Self {
            swap_interval,
            manifest_path,
        } = self;

        let Presentation {
            window_title,
            geometry,
            palette,
            frame,
        } = presentation;

        let board_size = geometry.surface_size();
        let window_size = window_size(board_size);
        let mut config = macroquad::window::Conf {
            window_title,
            window_width: window_size.x as i32,
            window_height: window_size.y as i32,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut frame = frame;
            let images = manifest_path.and_then(|path| {
                match ImageAtlas::from_manifest_path(&path) {
                    Ok(atlas) => Some(atlas),
                    Err(error) => {
                        warn!(error = %format!("{error:#}"), "using text game-over banner");
                        None
                    }
                }
            });

            let panel_background = MacroquadColor::from_rgba(240, 240, 240, 255);
            let mut control_panel_input = ControlPanelInputState::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    info!("quit requested");
                    break;
                }

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = gather_frame_input(
                    keyboard,
                    frame.game.status,
                    control_panel_input.take_actions(),
                );

                update_frame(frame_dt, frame_input, &mut frame);

                macroquad::window::clear_background(panel_background);
                let mut surface = MacroquadSurface::new(images.as_ref(), board_size);
                render_game(&mut surface, &frame.game, &geometry, &palette);

                let mut control_panel_ui = macroquad::ui::root_ui();
                let clicked = draw_control_panel_ui(
                    &mut control_panel_ui,
                    ControlPanelUiContext {
                        origin: MacroquadVec2::new(0.0, board_size.y),
                        size: MacroquadVec2::new(window_size.x, CONTROL_PANEL_HEIGHT),
                        background: panel_background,
                        panel: frame.control_panel,
                        score: frame.game.score,
                        speed_factor: frame.game.speed_factor,
                    },
                );
                for action in clicked {
                    control_panel_input.register(action);
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn window_size(board_size: Vec2) -> Vec2 {
    Vec2::new(
        board_size.x.max(MIN_WINDOW_WIDTH),
        board_size.y + CONTROL_PANEL_HEIGHT,
    )
}

fn to_macroquad_color(color: Color) -> MacroquadColor {
    MacroquadColor::new(color.red, color.green, color.blue, color.alpha)
}

fn to_macroquad_vec(vector: Vec2) -> MacroquadVec2 {
    MacroquadVec2::new(vector.x, vector.y)
}
