#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tick scheduler that turns elapsed frame time into simulation steps.
//!
//! The scheduler owns the only timer of a session. It never inspects the
//! world: it is armed and disarmed by lifecycle events and emits
//! [`Command::Step`] once a full interval has elapsed.

use std::time::Duration;

use grid_snake_core::{Command, Event, BASE_TICK_INTERVAL};
use tracing::debug;

/// Pure system that converts simulated time into `Step` commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickScheduler {
    interval: Duration,
    accumulator: Duration,
    armed: bool,
}

impl TickScheduler {
    /// Creates a disarmed scheduler that will tick at `interval` once armed.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulator: Duration::ZERO,
            armed: false,
        }
    }

    /// Reports whether ticks are currently being produced.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    /// Interval between consecutive ticks.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Time accumulated towards the next tick.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.accumulator
    }

    /// Arms the timer at its current interval, beginning a full interval.
    pub fn arm(&mut self) {
        self.armed = true;
        self.accumulator = Duration::ZERO;
    }

    /// Stops producing ticks and forgets any partial progress.
    pub fn disarm(&mut self) {
        self.armed = false;
        self.accumulator = Duration::ZERO;
    }

    /// Switches to a new interval, restarting the current one from zero.
    ///
    /// A disarmed scheduler only records the interval.
    pub fn rearm(&mut self, interval: Duration) {
        self.interval = interval;
        self.accumulator = Duration::ZERO;
    }

    /// Consumes world events and elapsed time, emitting at most one step.
    pub fn handle(&mut self, events: &[Event], dt: Duration, out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::Started { tick_interval, .. } | Event::Resumed { tick_interval } => {
                    self.interval = *tick_interval;
                    self.arm();
                    debug!(interval = ?self.interval, "tick timer armed");
                }
                Event::TickIntervalChanged { tick_interval } => {
                    self.rearm(*tick_interval);
                    debug!(interval = ?self.interval, "tick timer rearmed");
                }
                Event::Paused
                | Event::GameOver { .. }
                | Event::Won { .. }
                | Event::BoardReset { .. } => {
                    if self.armed {
                        debug!("tick timer disarmed");
                    }
                    self.disarm();
                }
                Event::SnakeMoved { .. } | Event::FoodEaten { .. } | Event::LevelUp { .. } => {}
            }
        }

        if !self.armed {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(dt);
        if self.interval.is_zero() || self.accumulator < self.interval {
            return;
        }

        self.accumulator -= self.interval;
        out.push(Command::Step);
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(BASE_TICK_INTERVAL)
    }
}
