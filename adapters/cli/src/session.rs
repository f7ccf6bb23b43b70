//! Glue between backend frames and the world: input, pacing, ticks, snapshot.

use std::time::Duration;

use snake_core::{Command, Event, GameStatus};
use snake_rendering::{ControlAction, Frame, FrameInput};
use snake_system_pacing::Pacing;
use snake_world::{self as world, query, World};
use tracing::debug;

/// Drives one world from the backend's frame loop.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    pacing: Pacing,
    events: Vec<Event>,
}

impl Session {
    /// Wraps `world`, optionally raising its speed and starting it.
    pub(crate) fn new(world: World, speed_factor: u32, start_running: bool) -> Self {
        let pacing = Pacing::new(query::config(&world).base_tick_interval());
        let mut session = Self {
            world,
            pacing,
            events: Vec::new(),
        };

        let delta = i32::try_from(speed_factor.saturating_sub(1)).unwrap_or(i32::MAX);
        if delta > 0 {
            session.apply(Command::ChangeSpeed { delta });
        }
        if start_running {
            session.apply(Command::Play);
        }
        session.flush_events();
        session
    }

    /// Snapshot of the current game wrapped for the renderer.
    pub(crate) fn frame(&self) -> Frame {
        Frame::new(query::snapshot(&self.world))
    }

    /// Applies one frame of input, runs the ticks that are due, and refreshes `frame`.
    pub(crate) fn update(&mut self, dt: Duration, input: FrameInput, frame: &mut Frame) {
        self.handle_input(input);
        self.advance(dt);
        self.flush_events();
        frame.update(query::snapshot(&self.world));
    }

    fn handle_input(&mut self, input: FrameInput) {
        if let Some(direction) = input.direction {
            self.apply(Command::QueueDirection { direction });
        }

        for action in input.actions {
            let command = match action {
                ControlAction::Play => Command::Play,
                ControlAction::Pause => Command::Pause,
                ControlAction::SpeedDown => Command::ChangeSpeed { delta: -1 },
                ControlAction::SpeedUp => Command::ChangeSpeed { delta: 1 },
                ControlAction::NewGame => Command::NewGame,
            };
            if matches!(command, Command::Play | Command::NewGame) {
                self.pacing.reset();
            }
            self.apply(command);
        }
    }

    fn advance(&mut self, dt: Duration) {
        if query::status(&self.world) != GameStatus::Running {
            self.pacing.reset();
            return;
        }

        let due = self.pacing.advance(dt, query::speed_factor(&self.world));
        for _ in 0..due {
            self.apply(Command::Tick);
            if query::status(&self.world) != GameStatus::Running {
                self.pacing.reset();
                break;
            }
        }
    }

    fn apply(&mut self, command: Command) {
        world::apply(&mut self.world, command, &mut self.events);
    }

    fn flush_events(&mut self) {
        for event in self.events.drain(..) {
            debug!(?event, "world event");
        }
    }
}
