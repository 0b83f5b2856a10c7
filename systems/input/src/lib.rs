#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Input router that normalises raw device input into player intents.
//!
//! Adapters capture keyboard, touch and mouse activity as [`DeviceInput`]
//! values expressed in screen pixels (y grows downwards). The router turns a
//! frame's worth of input into at most one `ChangeDirection` command plus any
//! pause toggles. Phase gating is left to the world.

use glam::Vec2;
use grid_snake_core::{Command, Direction};
use tracing::trace;

/// Keys the router understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Space bar.
    Space,
    /// Printable character key as typed, in either case.
    Char(char),
}

/// Raw input captured by an adapter during a single frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DeviceInput {
    /// A key was pressed.
    Key(Key),
    /// A touch began at the provided screen position.
    TouchStart(Vec2),
    /// An active touch moved to the provided screen position.
    TouchMove(Vec2),
    /// The active touch was lifted.
    TouchEnd,
    /// The primary mouse button was clicked at the provided screen position.
    Click(Vec2),
}

/// Maps a key onto the direction it requests, if any.
#[must_use]
pub fn key_direction(key: Key) -> Option<Direction> {
    match key {
        Key::ArrowUp => Some(Direction::Up),
        Key::ArrowDown => Some(Direction::Down),
        Key::ArrowLeft => Some(Direction::Left),
        Key::ArrowRight => Some(Direction::Right),
        Key::Char(character) => match character.to_ascii_lowercase() {
            'w' => Some(Direction::Up),
            's' => Some(Direction::Down),
            'a' => Some(Direction::Left),
            'd' => Some(Direction::Right),
            _ => None,
        },
        Key::Space => None,
    }
}

/// Picks the direction along the dominant axis of a screen-space delta.
///
/// Ties favour the vertical axis. A zero or non-finite delta yields `None`.
#[must_use]
pub fn dominant_direction(delta: Vec2) -> Option<Direction> {
    if !delta.is_finite() || delta == Vec2::ZERO {
        return None;
    }

    if delta.x.abs() > delta.y.abs() {
        if delta.x > 0.0 {
            Some(Direction::Right)
        } else {
            Some(Direction::Left)
        }
    } else if delta.y > 0.0 {
        Some(Direction::Down)
    } else {
        Some(Direction::Up)
    }
}

/// Stateful router that tracks the active touch between frames.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputRouter {
    touch_origin: Option<Vec2>,
}

impl InputRouter {
    /// Creates a router with no active touch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen position the next swipe delta is measured from.
    #[must_use]
    pub fn touch_origin(&self) -> Option<Vec2> {
        self.touch_origin
    }

    /// Translates a frame of device input into intents.
    ///
    /// `head_center` is the pixel centre of the snake's head and anchors mouse
    /// clicks; clicks are dropped when it is unknown. Pause toggles are emitted
    /// as they occur, followed by the most recent direction of the frame.
    pub fn handle(
        &mut self,
        inputs: &[DeviceInput],
        head_center: Option<Vec2>,
        out: &mut Vec<Command>,
    ) {
        let mut latest = None;

        for input in inputs {
            let requested = match *input {
                DeviceInput::Key(Key::Space) => {
                    out.push(Command::TogglePause);
                    None
                }
                DeviceInput::Key(key) => key_direction(key),
                DeviceInput::TouchStart(position) => {
                    self.touch_origin = Some(position);
                    None
                }
                DeviceInput::TouchMove(position) => {
                    let requested = self
                        .touch_origin
                        .and_then(|origin| dominant_direction(position - origin));
                    self.touch_origin = Some(position);
                    requested
                }
                DeviceInput::TouchEnd => {
                    self.touch_origin = None;
                    None
                }
                DeviceInput::Click(position) => {
                    head_center.and_then(|center| dominant_direction(position - center))
                }
            };

            if let Some(direction) = requested {
                trace!(?direction, ?input, "direction requested");
                latest = Some(direction);
            }
        }

        if let Some(direction) = latest {
            out.push(Command::ChangeDirection { direction });
        }
    }
}
