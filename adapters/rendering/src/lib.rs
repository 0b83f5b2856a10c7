#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Grid Snake adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use grid_snake_core::{Cell, Direction, GameSnapshot, GridSize};
use grid_snake_system_input::DeviceInput;
use grid_snake_system_status::{Controls, Status};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Colors used to paint the board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Fill behind the grid.
    pub background: Color,
    /// Grid line color.
    pub grid_line: Color,
    /// Food fill.
    pub food: Color,
    /// Obstacle fill.
    pub obstacle: Color,
    /// Fill of the snake's head.
    pub snake_head: Color,
    /// Outline drawn around every snake segment.
    pub snake_outline: Color,
    /// Fill of the head's eyes.
    pub eye: Color,
    /// Status and HUD text.
    pub text: Color,
    /// Fill of enabled control buttons.
    pub button: Color,
}

impl Palette {
    /// Fill of the snake segment at `index`, counted from the head.
    ///
    /// Body segments cycle through a short green gradient.
    #[must_use]
    pub fn snake_segment(&self, index: usize) -> Color {
        if index == 0 {
            return self.snake_head;
        }

        let step = u8::try_from(index.wrapping_mul(2) % 30).unwrap_or(0);
        let shade = 46 - step;
        Color::from_rgb_u8(46, 170 + shade, 113 + shade)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::from_rgb_u8(0xec, 0xf0, 0xf1),
            grid_line: Color::from_rgb_u8(0xbd, 0xc3, 0xc7),
            food: Color::from_rgb_u8(0xe7, 0x4c, 0x3c),
            obstacle: Color::from_rgb_u8(0x8e, 0x44, 0xad),
            snake_head: Color::from_rgb_u8(0x2e, 0xcc, 0x71),
            snake_outline: Color::from_rgb_u8(0x27, 0xae, 0x60),
            eye: Color::from_rgb_u8(0, 0, 0),
            text: Color::from_rgb_u8(0x2c, 0x3e, 0x50),
            button: Color::from_rgb_u8(0x34, 0x98, 0xdb),
        }
    }
}

/// Pixel geometry of the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPresentation {
    /// Grid dimensions in cells.
    pub grid: GridSize,
    /// Side length of a single cell in pixels.
    pub cell_length: f32,
}

impl GridPresentation {
    /// Creates a new grid descriptor.
    ///
    /// Returns an error when `cell_length` is not a positive finite number.
    pub fn new(grid: GridSize, cell_length: f32) -> Result<Self, RenderingError> {
        if !cell_length.is_finite() || cell_length <= 0.0 {
            return Err(RenderingError::InvalidCellLength { cell_length });
        }

        Ok(Self { grid, cell_length })
    }

    /// Width of the grid in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.grid.width() as f32 * self.cell_length
    }

    /// Height of the grid in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.grid.height() as f32 * self.cell_length
    }

    /// Top-left pixel of the provided cell.
    #[must_use]
    pub fn cell_origin(&self, cell: Cell) -> Vec2 {
        Vec2::new(cell.x() as f32, cell.y() as f32) * self.cell_length
    }

    /// Centre pixel of the provided cell.
    #[must_use]
    pub fn cell_center(&self, cell: Cell) -> Vec2 {
        self.cell_origin(cell) + Vec2::splat(self.cell_length * 0.5)
    }

    /// Radius of the food circle.
    #[must_use]
    pub fn food_radius(&self) -> f32 {
        (self.cell_length * 0.5 - 2.0).max(1.0)
    }

    /// Side length of one eye.
    #[must_use]
    pub fn eye_size(&self) -> f32 {
        self.cell_length / 5.0
    }

    /// Top-left offsets of both eyes within the head cell, facing `direction`.
    #[must_use]
    pub fn eye_offsets(&self, direction: Direction) -> [Vec2; 2] {
        let length = self.cell_length;
        let inset = length / 3.0;
        let size = self.eye_size();
        let far = length - inset;

        match direction {
            Direction::Right => [Vec2::new(far, inset), Vec2::new(far, far - size)],
            Direction::Left => [
                Vec2::new(inset - size, inset),
                Vec2::new(inset - size, far - size),
            ],
            Direction::Up => [
                Vec2::new(inset, inset - size),
                Vec2::new(far - size, inset - size),
            ],
            Direction::Down => [Vec2::new(inset, far), Vec2::new(far - size, far)],
        }
    }
}

/// Buttons pressed on the control panel during a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlPanelActions {
    /// The start button was pressed.
    pub start: bool,
    /// The pause/continue button was pressed.
    pub pause: bool,
    /// The restart button was pressed.
    pub restart: bool,
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Raw device input in the order it was observed.
    pub device: Vec<DeviceInput>,
    /// Control panel presses.
    pub actions: ControlPanelActions,
}

/// Scene description combining the board snapshot and the status panel.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Pixel geometry of the grid.
    pub grid: GridPresentation,
    /// Colors used to paint the board.
    pub palette: Palette,
    /// Board contents to draw.
    pub snapshot: GameSnapshot,
    /// Status line shown beneath the board.
    pub status: String,
    /// Availability of the control buttons.
    pub controls: Controls,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(grid: GridPresentation, palette: Palette, snapshot: GameSnapshot) -> Self {
        let status = Status::new();
        Self {
            grid,
            palette,
            snapshot,
            status: status.message().to_string(),
            controls: status.controls(),
        }
    }

    /// Replaces the board contents and status panel.
    ///
    /// The grid geometry follows the snapshot when the board was resized.
    pub fn refresh(&mut self, snapshot: GameSnapshot, status: &Status) {
        self.grid.grid = snapshot.grid;
        self.snapshot = snapshot;
        self.status = status.message().to_string();
        self.controls = status.controls();
    }

    /// Centre pixel of the snake's head.
    #[must_use]
    pub fn head_center(&self) -> Option<Vec2> {
        self.snapshot.head().map(|head| self.grid.cell_center(head))
    }

    /// Score and level line shown above the board.
    #[must_use]
    pub fn hud_line(&self) -> String {
        format!(
            "Score: {}   Level: {}",
            self.snapshot.score,
            self.snapshot.level.get()
        )
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Whether presentation waits for vertical sync.
    pub vsync: bool,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, vsync: bool, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            vsync,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Grid Snake scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta, per-frame
    /// input captured by the adapter, and may mutate the scene before it is
    /// rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Cells must have a positive finite side length.
    InvalidCellLength {
        /// Provided length that failed validation.
        cell_length: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellLength { cell_length } => {
                write!(
                    f,
                    "cell length must be a positive number of pixels (received {cell_length})"
                )
            }
        }
    }
}

impl Error for RenderingError {}
