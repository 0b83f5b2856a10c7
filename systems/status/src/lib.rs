#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Status system that turns lifecycle events into player-facing text and
//! control availability. It never feeds back into the simulation.

use std::{fmt, time::Duration};

use grid_snake_core::{Event, GameOverReason, GamePhase, Level, LEVEL_UP_BANNER_DURATION};

/// Message shown beneath the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusMessage {
    /// Nothing to report.
    Empty,
    /// A fresh board waits for the player.
    PressStart,
    /// The run is suspended.
    Paused,
    /// A level was gained during the run.
    LevelUp(Level),
    /// The run ended in a collision.
    GameOver(GameOverReason),
    /// The board was cleared; starting again enters the carried level.
    Won {
        /// Level the next board is built for.
        next_level: Level,
    },
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::PressStart => f.write_str("Press start to play"),
            Self::Paused => f.write_str("Game paused"),
            Self::LevelUp(level) => write!(f, "Level {}! Speed increased!", level.get()),
            Self::GameOver(reason) => {
                let hazard = match reason {
                    GameOverReason::WallHit => "the wall",
                    GameOverReason::SelfHit => "yourself",
                    GameOverReason::ObstacleHit => "an obstacle",
                };
                write!(f, "Game over! You hit {hazard}!")
            }
            Self::Won { next_level } => {
                write!(f, "You win! Press start to enter level {}", next_level.get())
            }
        }
    }
}

/// Label carried by the pause control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PauseLabel {
    /// Pressing the control suspends the run.
    Pause,
    /// Pressing the control continues the run.
    Continue,
}

impl PauseLabel {
    /// Text rendered on the control.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Pause => "Pause",
            Self::Continue => "Continue",
        }
    }
}

/// Availability of the start, pause and restart controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Controls {
    /// Whether the start control accepts presses.
    pub start_enabled: bool,
    /// Whether the pause control accepts presses.
    pub pause_enabled: bool,
    /// Label of the pause control.
    pub pause_label: PauseLabel,
    /// Whether the restart control accepts presses.
    pub restart_enabled: bool,
}

impl Controls {
    /// Derives control availability from the phase of the session.
    #[must_use]
    pub const fn for_phase(phase: GamePhase) -> Self {
        let (start_enabled, pause_enabled) = match phase {
            GamePhase::Ready | GamePhase::GameOver | GamePhase::Won => (true, false),
            GamePhase::Running | GamePhase::Paused => (false, true),
        };
        let pause_label = match phase {
            GamePhase::Paused => PauseLabel::Continue,
            _ => PauseLabel::Pause,
        };

        Self {
            start_enabled,
            pause_enabled,
            pause_label,
            restart_enabled: true,
        }
    }
}

/// Pure system tracking what the shell should display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    phase: GamePhase,
    message: StatusMessage,
    banner_remaining: Duration,
}

impl Status {
    /// Creates the status of a fresh board.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: GamePhase::Ready,
            message: StatusMessage::PressStart,
            banner_remaining: Duration::ZERO,
        }
    }

    /// Message to display.
    #[must_use]
    pub const fn message(&self) -> StatusMessage {
        self.message
    }

    /// Phase the status believes the session is in.
    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Control availability for the tracked phase.
    #[must_use]
    pub const fn controls(&self) -> Controls {
        Controls::for_phase(self.phase)
    }

    /// Advances the level-up banner by `dt`, then reacts to world events.
    pub fn handle(&mut self, events: &[Event], dt: Duration) {
        if let StatusMessage::LevelUp(_) = self.message {
            self.banner_remaining = self.banner_remaining.saturating_sub(dt);
            if self.banner_remaining.is_zero() {
                self.message = StatusMessage::Empty;
            }
        }

        for event in events {
            match *event {
                Event::BoardReset { .. } => {
                    self.phase = GamePhase::Ready;
                    self.show(StatusMessage::PressStart);
                }
                Event::Started { .. } | Event::Resumed { .. } => {
                    self.phase = GamePhase::Running;
                    self.show(StatusMessage::Empty);
                }
                Event::Paused => {
                    self.phase = GamePhase::Paused;
                    self.show(StatusMessage::Paused);
                }
                Event::LevelUp { level } => {
                    self.show(StatusMessage::LevelUp(level));
                    self.banner_remaining = LEVEL_UP_BANNER_DURATION;
                }
                Event::GameOver { reason } => {
                    self.phase = GamePhase::GameOver;
                    self.show(StatusMessage::GameOver(reason));
                }
                Event::Won { level } => {
                    self.phase = GamePhase::Won;
                    self.show(StatusMessage::Won {
                        next_level: level.next(),
                    });
                }
                Event::SnakeMoved { .. }
                | Event::FoodEaten { .. }
                | Event::TickIntervalChanged { .. } => {}
            }
        }
    }

    fn show(&mut self, message: StatusMessage) {
        self.message = message;
        self.banner_remaining = Duration::ZERO;
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::new()
    }
}
