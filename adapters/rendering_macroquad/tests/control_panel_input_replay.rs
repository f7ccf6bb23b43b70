use snake_core::{Direction, GameStatus};
use snake_rendering::ControlAction;
use snake_rendering_macroquad::{gather_frame_input, ControlPanelInputState, KeyboardShortcuts};

fn run_sequence(sequence: &[Option<ControlAction>]) -> Vec<Vec<ControlAction>> {
    let mut state = ControlPanelInputState::default();
    let mut taken = Vec::new();
    for &clicked in sequence {
        taken.push(state.take_actions());
        if let Some(action) = clicked {
            state.register(action);
        }
    }

    // Flush any trailing latched click so the harness observes the final press.
    taken.push(state.take_actions());
    taken
}

#[test]
fn button_clicks_fire_on_the_following_frame() {
    let clicks = [
        None,
        Some(ControlAction::Play),
        None,
        Some(ControlAction::SpeedUp),
        Some(ControlAction::Pause),
        None,
    ];
    let expected = vec![
        vec![],
        vec![],
        vec![ControlAction::Play],
        vec![],
        vec![ControlAction::SpeedUp],
        vec![ControlAction::Pause],
        vec![],
    ];

    let first_run = run_sequence(&clicks);
    let second_run = run_sequence(&clicks);

    assert_eq!(first_run, expected);
    assert_eq!(first_run, second_run);
}

#[test]
fn double_click_within_a_frame_collapses() {
    let mut state = ControlPanelInputState::default();
    state.register(ControlAction::SpeedUp);
    state.register(ControlAction::SpeedUp);
    state.register(ControlAction::SpeedDown);

    assert_eq!(
        state.take_actions(),
        vec![ControlAction::SpeedUp, ControlAction::SpeedDown]
    );
    assert!(state.take_actions().is_empty());
}

#[test]
fn latched_clicks_merge_with_keyboard_input() {
    let mut state = ControlPanelInputState::default();
    state.register(ControlAction::Play);
    let keyboard = KeyboardShortcuts {
        direction: Some(Direction::Up),
        speed_up: true,
        ..KeyboardShortcuts::default()
    };

    let input = gather_frame_input(keyboard, GameStatus::Paused, state.take_actions());

    assert_eq!(
        input.actions,
        vec![ControlAction::Play, ControlAction::SpeedUp]
    );
    assert_eq!(input.direction, Some(Direction::Up));
}
