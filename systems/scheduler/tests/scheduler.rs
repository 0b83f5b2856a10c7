use std::time::Duration;

use grid_snake_core::{Cell, Command, Event, GamePhase, GridSize, Level};
use grid_snake_system_scheduler::TickScheduler;
use grid_snake_world::{self as world, query, BoardLayout, GameState};

fn millis(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Applies a frame's worth of time, re-pumping the scheduler until idle.
fn advance(
    state: &mut GameState,
    scheduler: &mut TickScheduler,
    pending: &mut Vec<Event>,
    dt: Duration,
) -> usize {
    let mut steps = 0;
    let mut dt = dt;
    loop {
        let mut commands = Vec::new();
        scheduler.handle(pending, dt, &mut commands);
        pending.clear();
        dt = Duration::ZERO;
        if commands.is_empty() {
            return steps;
        }
        for command in commands {
            steps += 1;
            world::apply(state, command, pending);
        }
    }
}

#[test]
fn disarmed_scheduler_ignores_time() {
    let mut scheduler = TickScheduler::default();
    let mut commands = Vec::new();

    scheduler.handle(&[], Duration::from_secs(5), &mut commands);

    assert!(commands.is_empty());
    assert!(!scheduler.is_armed());
}

#[test]
fn started_event_arms_at_carried_interval() {
    let mut scheduler = TickScheduler::default();
    let mut commands = Vec::new();

    scheduler.handle(
        &[Event::Started {
            level: Level::new(3),
            tick_interval: millis(130),
        }],
        millis(129),
        &mut commands,
    );
    assert!(commands.is_empty());
    assert_eq!(scheduler.interval(), millis(130));

    scheduler.handle(&[], millis(1), &mut commands);
    assert_eq!(commands, vec![Command::Step]);
}

#[test]
fn emits_at_most_one_step_per_call() {
    let mut scheduler = TickScheduler::new(millis(100));
    scheduler.arm();
    let mut commands = Vec::new();

    scheduler.handle(&[], millis(350), &mut commands);
    assert_eq!(commands.len(), 1);

    scheduler.handle(&[], Duration::ZERO, &mut commands);
    scheduler.handle(&[], Duration::ZERO, &mut commands);
    scheduler.handle(&[], Duration::ZERO, &mut commands);
    assert_eq!(commands.len(), 3);
    assert_eq!(scheduler.elapsed(), millis(50));
}

#[test]
fn resume_begins_a_full_interval() {
    let mut scheduler = TickScheduler::new(millis(150));
    scheduler.arm();
    let mut commands = Vec::new();

    scheduler.handle(&[], millis(140), &mut commands);
    scheduler.handle(&[Event::Paused], millis(500), &mut commands);
    assert!(!scheduler.is_armed());

    scheduler.handle(
        &[Event::Resumed {
            tick_interval: millis(150),
        }],
        millis(20),
        &mut commands,
    );
    assert!(commands.is_empty(), "partial progress survived the pause");

    scheduler.handle(&[], millis(130), &mut commands);
    assert_eq!(commands, vec![Command::Step]);
}

#[test]
fn interval_change_discards_partial_progress() {
    let mut scheduler = TickScheduler::new(millis(150));
    scheduler.arm();
    let mut commands = Vec::new();

    scheduler.handle(&[], millis(100), &mut commands);
    scheduler.handle(
        &[Event::TickIntervalChanged {
            tick_interval: millis(140),
        }],
        millis(100),
        &mut commands,
    );

    assert!(commands.is_empty());
    assert!(scheduler.is_armed());
    assert_eq!(scheduler.elapsed(), millis(100));
}

#[test]
fn terminal_phases_stop_the_timer() {
    let mut state = GameState::from_layout(
        BoardLayout::new(GridSize::new(20, 20), vec![Cell::new(17, 5)]).with_food(Cell::new(0, 0)),
        3,
    )
    .expect("valid layout");
    let mut scheduler = TickScheduler::default();
    let mut pending = Vec::new();
    world::apply(&mut state, Command::Start, &mut pending);

    let steps = advance(&mut state, &mut scheduler, &mut pending, Duration::from_secs(2));

    assert_eq!(steps, 3);
    assert_eq!(query::phase(&state), GamePhase::GameOver);
    assert!(!scheduler.is_armed());
    assert_eq!(advance(&mut state, &mut scheduler, &mut pending, millis(600)), 0);
}

#[test]
fn level_up_speeds_up_subsequent_ticks() {
    let mut state = GameState::from_layout(
        BoardLayout::new(GridSize::new(20, 20), vec![Cell::new(2, 2)])
            .with_food(Cell::new(3, 2))
            .with_progress(40, Level::FIRST),
        5,
    )
    .expect("valid layout");
    let mut scheduler = TickScheduler::default();
    let mut pending = Vec::new();
    world::apply(&mut state, Command::Start, &mut pending);

    assert_eq!(advance(&mut state, &mut scheduler, &mut pending, millis(150)), 1);
    assert_eq!(query::level(&state), Level::new(2));
    assert_eq!(scheduler.interval(), millis(140));

    assert_eq!(advance(&mut state, &mut scheduler, &mut pending, millis(139)), 0);
    assert_eq!(advance(&mut state, &mut scheduler, &mut pending, millis(1)), 1);
}
