use glam::Vec2;
use grid_snake_core::{Command, Direction};
use grid_snake_system_input::{DeviceInput, InputRouter, Key};

fn run_frames(frames: &[Vec<DeviceInput>], head_center: Option<Vec2>) -> Vec<Vec<Command>> {
    let mut router = InputRouter::new();
    frames
        .iter()
        .map(|frame| {
            let mut commands = Vec::new();
            router.handle(frame, head_center, &mut commands);
            commands
        })
        .collect()
}

fn turn(direction: Direction) -> Command {
    Command::ChangeDirection { direction }
}

#[test]
fn only_the_latest_direction_of_a_frame_survives() {
    let frames = vec![vec![
        DeviceInput::Key(Key::ArrowUp),
        DeviceInput::Key(Key::Char('a')),
        DeviceInput::Key(Key::ArrowDown),
    ]];

    assert_eq!(run_frames(&frames, None), vec![vec![turn(Direction::Down)]]);
}

#[test]
fn space_toggles_pause_alongside_turns() {
    let frames = vec![
        vec![DeviceInput::Key(Key::Space)],
        vec![DeviceInput::Key(Key::Char('D')), DeviceInput::Key(Key::Space)],
        vec![DeviceInput::Key(Key::Char('x'))],
    ];

    assert_eq!(
        run_frames(&frames, None),
        vec![
            vec![Command::TogglePause],
            vec![Command::TogglePause, turn(Direction::Right)],
            Vec::new(),
        ]
    );
}

#[test]
fn swipes_measure_from_the_previous_touch_point() {
    let frames = vec![
        vec![DeviceInput::TouchStart(Vec2::new(100.0, 100.0))],
        vec![DeviceInput::TouchMove(Vec2::new(140.0, 110.0))],
        vec![DeviceInput::TouchMove(Vec2::new(145.0, 160.0))],
        vec![DeviceInput::TouchMove(Vec2::new(145.0, 160.0))],
        vec![
            DeviceInput::TouchEnd,
            DeviceInput::TouchMove(Vec2::new(0.0, 0.0)),
        ],
    ];

    let first_run = run_frames(&frames, None);
    let second_run = run_frames(&frames, None);

    assert_eq!(
        first_run,
        vec![
            Vec::new(),
            vec![turn(Direction::Right)],
            vec![turn(Direction::Down)],
            Vec::new(),
            Vec::new(),
        ]
    );
    assert_eq!(first_run, second_run);
}

#[test]
fn clicks_steer_relative_to_the_head() {
    let head = Some(Vec2::new(210.0, 210.0));
    let frames = vec![
        vec![DeviceInput::Click(Vec2::new(215.0, 40.0))],
        vec![DeviceInput::Click(Vec2::new(20.0, 230.0))],
    ];

    assert_eq!(
        run_frames(&frames, head),
        vec![vec![turn(Direction::Up)], vec![turn(Direction::Left)]]
    );
    assert_eq!(run_frames(&frames, None), vec![Vec::new(), Vec::new()]);
}

#[test]
fn touch_end_clears_the_origin() {
    let mut router = InputRouter::new();
    let mut commands = Vec::new();

    router.handle(
        &[DeviceInput::TouchStart(Vec2::new(3.0, 4.0))],
        None,
        &mut commands,
    );
    assert_eq!(router.touch_origin(), Some(Vec2::new(3.0, 4.0)));

    router.handle(&[DeviceInput::TouchEnd], None, &mut commands);
    assert_eq!(router.touch_origin(), None);
    assert!(commands.is_empty());
}
