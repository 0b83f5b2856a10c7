//! Frame pump wiring the world to the scheduler, input router and status systems.

use std::time::Duration;

use glam::Vec2;
use grid_snake_core::{Command, Event, GameSnapshot};
use grid_snake_rendering::{ControlPanelActions, FrameInput};
use grid_snake_system_input::InputRouter;
use grid_snake_system_scheduler::TickScheduler;
use grid_snake_system_status::Status;
use grid_snake_world::{self as world, query, Config, GameState};
use tracing::debug;

/// Longest frame delta fed to the scheduler; longer stalls are not caught up.
const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Owns the session and the systems reacting to it.
#[derive(Debug)]
pub(crate) struct Simulation {
    state: GameState,
    scheduler: TickScheduler,
    router: InputRouter,
    status: Status,
    pending: Vec<Event>,
}

impl Simulation {
    pub(crate) fn new(config: Config) -> Self {
        let state = GameState::new(config);
        let scheduler = TickScheduler::new(query::tick_interval(&state));
        Self {
            state,
            scheduler,
            router: InputRouter::new(),
            status: Status::new(),
            pending: Vec::new(),
        }
    }

    pub(crate) fn state(&self) -> &GameState {
        &self.state
    }

    pub(crate) fn status(&self) -> &Status {
        &self.status
    }

    pub(crate) fn snapshot(&self) -> GameSnapshot {
        query::snapshot(&self.state)
    }

    /// Advances the session by one frame and returns the events it produced.
    ///
    /// Control panel presses and device input are applied first, then the
    /// scheduler is pumped until it has no further step to emit.
    pub(crate) fn advance(
        &mut self,
        dt: Duration,
        input: &FrameInput,
        head_center: Option<Vec2>,
    ) -> Vec<Event> {
        let dt = dt.min(MAX_FRAME_DELTA);
        let mut commands = control_commands(input.actions);
        self.router.handle(&input.device, head_center, &mut commands);
        for command in commands {
            world::apply(&mut self.state, command, &mut self.pending);
        }

        let mut frame_events = Vec::new();
        let mut remaining = dt;
        loop {
            let mut steps = Vec::new();
            self.scheduler.handle(&self.pending, remaining, &mut steps);
            frame_events.append(&mut self.pending);
            remaining = Duration::ZERO;
            if steps.is_empty() {
                break;
            }
            for command in steps {
                world::apply(&mut self.state, command, &mut self.pending);
            }
        }

        if !frame_events.is_empty() {
            debug!(count = frame_events.len(), "frame produced events");
        }
        self.status.handle(&frame_events, dt);
        frame_events
    }
}

fn control_commands(actions: ControlPanelActions) -> Vec<Command> {
    let mut commands = Vec::new();
    if actions.restart {
        commands.push(Command::Restart);
    }
    if actions.start {
        commands.push(Command::Start);
    }
    if actions.pause {
        commands.push(Command::TogglePause);
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_snake_core::{GamePhase, GridSize};
    use grid_snake_system_input::{DeviceInput, Key};
    use grid_snake_system_status::StatusMessage;

    fn simulation() -> Simulation {
        Simulation::new(Config::new(GridSize::new(20, 20), 0xabc))
    }

    fn press(actions: ControlPanelActions) -> FrameInput {
        FrameInput {
            device: Vec::new(),
            actions,
        }
    }

    fn start() -> FrameInput {
        press(ControlPanelActions {
            start: true,
            ..ControlPanelActions::default()
        })
    }

    #[test]
    fn idle_board_never_ticks() {
        let mut simulation = simulation();

        let events = simulation.advance(Duration::from_secs(1), &FrameInput::default(), None);

        assert!(events.is_empty());
        assert_eq!(query::tick_index(simulation.state()), 0);
        assert_eq!(
            simulation.status().message(),
            StatusMessage::PressStart
        );
    }

    #[test]
    fn frames_accumulate_into_ticks() {
        let mut simulation = simulation();
        let _ = simulation.advance(Duration::ZERO, &start(), None);

        for _ in 0..9 {
            let _ = simulation.advance(Duration::from_millis(16), &FrameInput::default(), None);
        }
        assert_eq!(query::tick_index(simulation.state()), 0);

        let _ = simulation.advance(Duration::from_millis(16), &FrameInput::default(), None);
        assert_eq!(query::tick_index(simulation.state()), 1);
    }

    #[test]
    fn long_stalls_are_clamped() {
        let mut simulation = simulation();
        let _ = simulation.advance(Duration::ZERO, &start(), None);

        let _ = simulation.advance(Duration::from_secs(30), &FrameInput::default(), None);

        assert_eq!(query::tick_index(simulation.state()), 1);
    }

    #[test]
    fn space_pauses_and_status_follows() {
        let mut simulation = simulation();
        let _ = simulation.advance(Duration::ZERO, &start(), None);

        let pause = FrameInput {
            device: vec![DeviceInput::Key(Key::Space)],
            actions: ControlPanelActions::default(),
        };
        let events = simulation.advance(Duration::from_millis(16), &pause, None);

        assert_eq!(events, vec![Event::Paused]);
        assert_eq!(simulation.snapshot().phase, GamePhase::Paused);
        assert_eq!(simulation.status().message(), StatusMessage::Paused);
        assert!(simulation.status().controls().pause_enabled);
    }

    #[test]
    fn restart_button_rebuilds_the_board() {
        let mut simulation = simulation();
        let _ = simulation.advance(Duration::ZERO, &start(), None);
        let _ = simulation.advance(Duration::from_millis(150), &FrameInput::default(), None);

        let events = simulation.advance(
            Duration::from_millis(100),
            &press(ControlPanelActions {
                restart: true,
                ..ControlPanelActions::default()
            }),
            None,
        );

        assert!(events.contains(&Event::BoardReset {
            level: grid_snake_core::Level::FIRST,
        }));
        assert_eq!(simulation.snapshot().phase, GamePhase::Ready);
        assert_eq!(simulation.status().message(), StatusMessage::PressStart);
    }
}
