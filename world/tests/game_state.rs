use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use snake_core::{Cell, Command, Direction, Event, GameConfig, GameOverReason, GameStatus, GridSize};
use snake_system_food::FoodPlacer;
use snake_world::{self as world, query, GameState, World};

fn cells(coords: &[(i32, i32)]) -> Vec<Cell> {
    coords.iter().map(|&(x, y)| Cell::new(x, y)).collect()
}

fn running_default() -> GameState {
    GameState::initial(&GameConfig::default(), false).expect("default config is valid")
}

#[test]
fn plain_move_shifts_every_segment() {
    let state = running_default();
    let mut placer = FoodPlacer::new(1);

    let transition = state.tick(&mut placer);

    let expected: Vec<Cell> = (7..=16).rev().map(|x| Cell::new(x, 5)).collect();
    let snake: Vec<Cell> = transition.state.snake().iter().copied().collect();
    assert_eq!(snake, expected);
    assert_eq!(transition.state.score(), 0);
    assert_eq!(
        transition.events[0],
        Event::SnakeAdvanced {
            head: Cell::new(16, 5),
            grew: false
        }
    );
}

#[test]
fn eating_grows_the_snake_and_replaces_food() {
    let state = running_default()
        .with_food(Cell::new(16, 5))
        .expect("food off the snake");
    let mut placer = FoodPlacer::new(1);

    let transition = state.tick(&mut placer);
    let next = &transition.state;

    assert_eq!(next.snake().len(), 11);
    assert_eq!(next.head(), Cell::new(16, 5));
    assert_eq!(next.snake().back().copied(), Some(Cell::new(6, 5)));
    assert_eq!(next.score(), 1);

    let food = next.food().expect("new food placed");
    assert!(!next.snake().contains(&food), "{food:?} placed on the snake");
    assert_eq!(
        transition.events,
        vec![
            Event::SnakeAdvanced {
                head: Cell::new(16, 5),
                grew: true
            },
            Event::FoodEaten {
                cell: Cell::new(16, 5),
                score: 1
            },
            Event::FoodPlaced { cell: food },
        ]
    );
}

#[test]
fn tick_leaves_the_input_state_untouched() {
    let state = running_default();
    let before = state.clone();
    let mut placer = FoodPlacer::new(1);

    let _ = state.tick(&mut placer);

    assert_eq!(state, before);
}

#[test]
fn turn_through_a_corner() {
    let grid = GridSize::new(5, 5);
    let state = GameState::with_snake(grid, cells(&[(1, 1), (1, 2), (1, 3)]), Direction::Up)
        .expect("valid snake")
        .with_food(Cell::new(4, 4))
        .expect("food off the snake");
    let mut placer = FoodPlacer::new(1);

    let mut state = state.tick(&mut placer).state;
    assert_eq!(
        state.snake().iter().copied().collect::<Vec<_>>(),
        cells(&[(1, 0), (1, 1), (1, 2)])
    );

    let mut events = Vec::new();
    state.queue_direction(Direction::Left, &mut events);
    let transition = state.tick(&mut placer);

    assert_eq!(
        transition.state.snake().iter().copied().collect::<Vec<_>>(),
        cells(&[(0, 0), (1, 0), (1, 1)])
    );
    assert_eq!(transition.state.direction(), Direction::Left);
    assert_eq!(transition.state.pending_direction(), None);
    assert_eq!(
        transition.events[0],
        Event::DirectionApplied {
            direction: Direction::Left
        }
    );
}

#[test]
fn reversal_is_rejected() {
    let mut state = running_default();
    let mut events = Vec::new();

    state.queue_direction(Direction::Left, &mut events);

    assert_eq!(state.pending_direction(), None);
    assert_eq!(
        events,
        vec![Event::DirectionRejected {
            requested: Direction::Left,
            current: Direction::Right
        }]
    );
}

#[test]
fn latest_queued_direction_wins() {
    let mut state = running_default();
    let mut events = Vec::new();

    state.queue_direction(Direction::Up, &mut events);
    state.queue_direction(Direction::Down, &mut events);

    assert_eq!(state.pending_direction(), Some(Direction::Down));
}

#[test]
fn reversal_is_judged_against_the_current_direction() {
    let mut state = running_default();
    let mut events = Vec::new();

    state.queue_direction(Direction::Up, &mut events);
    state.queue_direction(Direction::Left, &mut events);

    assert_eq!(
        state.pending_direction(),
        Some(Direction::Up),
        "left still reverses the current heading"
    );
}

#[test]
fn leaving_the_right_edge_ends_the_game() {
    let grid = GridSize::new(60, 40);
    let state = GameState::with_snake(grid, cells(&[(59, 5), (58, 5)]), Direction::Right)
        .expect("valid snake");
    let mut placer = FoodPlacer::new(1);

    let transition = state.tick(&mut placer);

    assert_eq!(transition.state.status(), GameStatus::GameOver);
    assert_eq!(
        transition.state.game_over_reason(),
        Some(GameOverReason::Wall)
    );
    assert_eq!(
        transition.state.snake(),
        state.snake(),
        "the snake must not move on a fatal tick"
    );
    assert_eq!(
        transition.events,
        vec![Event::GameOver {
            reason: GameOverReason::Wall,
            score: 0
        }]
    );
}

#[test]
fn leaving_the_top_edge_ends_the_game() {
    let grid = GridSize::new(4, 4);
    let state =
        GameState::with_snake(grid, cells(&[(2, 0)]), Direction::Up).expect("valid snake");
    let mut placer = FoodPlacer::new(1);

    let transition = state.tick(&mut placer);

    assert_eq!(
        transition.state.game_over_reason(),
        Some(GameOverReason::Wall)
    );
}

#[test]
fn running_into_the_body_ends_the_game() {
    let grid = GridSize::new(6, 6);
    let state = GameState::with_snake(
        grid,
        cells(&[(1, 1), (2, 1), (2, 2), (1, 2), (0, 2)]),
        Direction::Down,
    )
    .expect("valid snake");
    let mut placer = FoodPlacer::new(1);

    let transition = state.tick(&mut placer);

    assert_eq!(
        transition.state.game_over_reason(),
        Some(GameOverReason::SelfCollision)
    );
}

#[test]
fn chasing_the_tail_is_allowed() {
    let grid = GridSize::new(6, 6);
    let state = GameState::with_snake(
        grid,
        cells(&[(1, 1), (2, 1), (2, 2), (1, 2)]),
        Direction::Down,
    )
    .expect("valid snake")
    .with_food(Cell::new(5, 5))
    .expect("food off the snake");
    let mut placer = FoodPlacer::new(1);

    let transition = state.tick(&mut placer);

    assert_eq!(transition.state.status(), GameStatus::Running);
    assert_eq!(transition.state.head(), Cell::new(1, 2));
    assert_eq!(transition.state.snake().len(), 4);
}

#[test]
fn filling_the_board_ends_the_game() {
    let grid = GridSize::new(2, 1);
    let state = GameState::with_snake(grid, cells(&[(0, 0)]), Direction::Right)
        .expect("valid snake")
        .with_food(Cell::new(1, 0))
        .expect("food off the snake");
    let mut placer = FoodPlacer::new(1);

    let transition = state.tick(&mut placer);

    assert_eq!(
        transition.state.game_over_reason(),
        Some(GameOverReason::BoardFull)
    );
    assert_eq!(transition.state.food(), None);
    assert_eq!(
        transition.events,
        vec![
            Event::SnakeAdvanced {
                head: Cell::new(1, 0),
                grew: true
            },
            Event::FoodEaten {
                cell: Cell::new(1, 0),
                score: 1
            },
            Event::BoardFull,
            Event::GameOver {
                reason: GameOverReason::BoardFull,
                score: 1
            },
        ]
    );
}

#[test]
fn paused_and_finished_games_do_not_tick() {
    let mut placer = FoodPlacer::new(1);

    let paused = running_default().with_paused(true);
    let transition = paused.tick(&mut placer);
    assert_eq!(transition.state, paused);
    assert!(transition.events.is_empty());

    let grid = GridSize::new(3, 3);
    let finished = GameState::with_snake(grid, cells(&[(2, 1)]), Direction::Right)
        .expect("valid snake")
        .tick(&mut placer)
        .state;
    assert!(finished.is_game_over());

    let transition = finished.tick(&mut placer);
    assert_eq!(transition.state, finished);
    assert!(transition.events.is_empty());
}

#[test]
fn queued_direction_survives_a_pause() {
    let mut world = World::new(GameConfig::default(), 3).expect("default config is valid");
    let mut events = Vec::new();

    world::apply(
        &mut world,
        Command::QueueDirection {
            direction: Direction::Down,
        },
        &mut events,
    );
    world::apply(&mut world, Command::Tick, &mut events);
    assert_eq!(query::pending_direction(&world), Some(Direction::Down));

    world::apply(&mut world, Command::Play, &mut events);
    world::apply(&mut world, Command::Tick, &mut events);

    assert_eq!(query::direction(&world), Direction::Down);
    assert_eq!(query::snake(&world)[0], Cell::new(15, 6));
}

#[test]
fn pause_and_play_emit_events_once() {
    let mut world = World::new(GameConfig::default(), 3).expect("default config is valid");
    let mut events = Vec::new();

    world::apply(&mut world, Command::Pause, &mut events);
    world::apply(&mut world, Command::Play, &mut events);
    world::apply(&mut world, Command::Play, &mut events);

    assert_eq!(events, vec![Event::PauseChanged { paused: false }]);
    assert_eq!(query::status(&world), GameStatus::Running);
}

#[test]
fn random_play_preserves_invariants() {
    let config = GameConfig {
        board: snake_core::BoardConfig {
            pixel_width: 80,
            pixel_height: 80,
            cell_size: 10,
        },
        initial_snake_length: 2,
        base_tick_interval_ms: 200,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(0xfeed);

    for game in 0..50_u64 {
        let mut world = World::new(config, game).expect("config is valid");
        let mut events = Vec::new();
        world::apply(&mut world, Command::Play, &mut events);

        for _ in 0..400 {
            if query::status(&world) == GameStatus::GameOver {
                break;
            }

            let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
            world::apply(
                &mut world,
                Command::QueueDirection { direction },
                &mut events,
            );

            let before_len = query::snake(&world).len();
            let before_food = query::food(&world);
            let before_score = query::score(&world);
            world::apply(&mut world, Command::Tick, &mut events);

            let snake = query::snake(&world);
            let unique: HashSet<Cell> = snake.iter().copied().collect();
            assert_eq!(unique.len(), snake.len(), "duplicate cell in {snake:?}");
            if let Some(food) = query::food(&world) {
                assert!(!snake.contains(&food), "food {food:?} on the snake");
            }

            if query::status(&world) == GameStatus::GameOver
                && query::game_over_reason(&world) != Some(GameOverReason::BoardFull)
            {
                assert_eq!(snake.len(), before_len);
                continue;
            }

            let ate = before_food == Some(snake[0]);
            assert_eq!(snake.len(), before_len + usize::from(ate));
            assert_eq!(query::score(&world), before_score + u32::from(ate));
        }
    }
}
