#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Grid Snake.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The adapter uses Macroquad's immediate-mode UI module for the control
//! buttons. All UI-specific calls live inside the local `ui` module.

mod ui;

use self::ui::{draw_control_panel_ui, ControlPanelUiContext};
use anyhow::Result;
use glam::Vec2;
use grid_snake_rendering::{
    Color, ControlPanelActions, FrameInput, Presentation, RenderingBackend, Scene,
};
use grid_snake_system_input::{DeviceInput, Key};
use macroquad::input::{
    get_char_pressed, is_key_pressed, is_mouse_button_pressed, mouse_position,
    touches, KeyCode, MouseButton, TouchPhase,
};
use macroquad::math::Vec2 as MacroquadVec2;
use std::time::Duration;

const MARGIN: f32 = 20.0;
const HUD_HEIGHT: f32 = 36.0;
const STATUS_HEIGHT: f32 = 36.0;
const PANEL_HEIGHT: f32 = 56.0;
const HUD_FONT_SIZE: f32 = 28.0;

/// Tracks UI-sourced presses so they can be merged with physical input on the next frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlPanelInputState {
    latched: ControlPanelActions,
}

impl ControlPanelInputState {
    /// Returns the latched presses and clears them so each fires only once.
    pub fn take_actions(&mut self) -> ControlPanelActions {
        std::mem::take(&mut self.latched)
    }

    /// Records presses observed while drawing the control panel this frame.
    pub fn register(&mut self, actions: ControlPanelActions) {
        self.latched.start |= actions.start;
        self.latched.pause |= actions.pause;
        self.latched.restart |= actions.restart;
    }
}

/// Snapshot of edge-triggered keyboard input observed during a single frame.
#[derive(Clone, Debug, Default)]
struct KeyboardObservations {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// Keys forwarded to the input router in press order.
    keys: Vec<Key>,
}

impl KeyboardObservations {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);

        let mut keys = Vec::new();
        for (code, key) in [
            (KeyCode::Up, Key::ArrowUp),
            (KeyCode::Down, Key::ArrowDown),
            (KeyCode::Left, Key::ArrowLeft),
            (KeyCode::Right, Key::ArrowRight),
            (KeyCode::Space, Key::Space),
        ] {
            if is_key_pressed(code) {
                keys.push(key);
            }
        }
        while let Some(character) = get_char_pressed() {
            if character.is_ascii_alphabetic() {
                keys.push(Key::Char(character));
            }
        }

        Self {
            quit_requested,
            keys,
        }
    }
}

/// Touch activity reported by the platform, expressed in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
enum TouchObservation {
    Started(Vec2),
    Moved(Vec2),
    Ended,
}

fn poll_touches() -> Vec<TouchObservation> {
    touches()
        .into_iter()
        .filter_map(|touch| {
            let position = Vec2::new(touch.position.x, touch.position.y);
            match touch.phase {
                TouchPhase::Started => Some(TouchObservation::Started(position)),
                TouchPhase::Moved => Some(TouchObservation::Moved(position)),
                TouchPhase::Ended | TouchPhase::Cancelled => Some(TouchObservation::Ended),
                TouchPhase::Stationary => None,
            }
        })
        .collect()
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Presentation {
            window_title,
            clear_color,
            vsync,
            scene,
        } = presentation;

        let (window_width, window_height) = preferred_window_size(&scene);
        let mut config = macroquad::window::Conf {
            window_title,
            window_width,
            window_height,
            ..macroquad::window::Conf::default()
        };
        config.platform.swap_interval = self.swap_interval.or(Some(i32::from(vsync)));

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut control_panel_input = ControlPanelInputState::default();

            loop {
                let keyboard = KeyboardObservations::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let metrics_before = SceneMetrics::from_scene(&scene, screen_width, screen_height);

                let click = is_mouse_button_pressed(MouseButton::Left).then(|| {
                    let (x, y) = mouse_position();
                    Vec2::new(x, y)
                });
                let frame_input = FrameInput {
                    device: translate_observations(
                        &metrics_before,
                        &keyboard.keys,
                        &poll_touches(),
                        click,
                    ),
                    actions: control_panel_input.take_actions(),
                };

                update_scene(frame_dt, frame_input, &mut scene);

                let metrics = SceneMetrics::from_scene(&scene, screen_width, screen_height);
                draw_board(&scene, &metrics);
                draw_hud(&scene, &metrics);

                let panel_context = ControlPanelUiContext {
                    origin: MacroquadVec2::new(0.0, metrics.panel_top),
                    size: MacroquadVec2::new(screen_width, PANEL_HEIGHT),
                    background,
                    button: to_macroquad_color(scene.palette.button),
                    controls: scene.controls,
                };
                let mut control_panel_ui = macroquad::ui::root_ui();
                let actions = draw_control_panel_ui(&mut control_panel_ui, panel_context);
                control_panel_input.register(actions);

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn preferred_window_size(scene: &Scene) -> (i32, i32) {
    let width = scene.grid.width() + 2.0 * MARGIN;
    let height = scene.grid.height() + HUD_HEIGHT + STATUS_HEIGHT + PANEL_HEIGHT + 2.0 * MARGIN;
    (width.ceil() as i32, height.ceil() as i32)
}

/// Screen placement of the board for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    origin: Vec2,
    board_size: Vec2,
    status_top: f32,
    panel_top: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let board_width = scene.grid.width();
        let board_height = scene.grid.height();
        let available_width = (screen_width - 2.0 * MARGIN).max(0.0);
        let available_height =
            (screen_height - 2.0 * MARGIN - HUD_HEIGHT - STATUS_HEIGHT - PANEL_HEIGHT).max(0.0);

        let scale = if board_width <= f32::EPSILON || board_height <= f32::EPSILON {
            0.0
        } else {
            (available_width / board_width).min(available_height / board_height)
        };
        let board_size = Vec2::new(board_width, board_height) * scale;
        let origin = Vec2::new((screen_width - board_size.x) * 0.5, MARGIN + HUD_HEIGHT);
        let status_top = origin.y + board_size.y;

        Self {
            scale,
            origin,
            board_size,
            status_top,
            panel_top: status_top + STATUS_HEIGHT,
        }
    }

    fn to_screen(&self, board_position: Vec2) -> Vec2 {
        self.origin + board_position * self.scale
    }

    fn to_board(&self, screen_position: Vec2) -> Option<Vec2> {
        if self.scale <= f32::EPSILON {
            return None;
        }
        Some((screen_position - self.origin) / self.scale)
    }

    fn contains(&self, screen_position: Vec2) -> bool {
        let local = screen_position - self.origin;
        local.x >= 0.0 && local.y >= 0.0 && local.x < self.board_size.x && local.y < self.board_size.y
    }
}

/// Converts raw observations into router input expressed in board pixels.
///
/// Clicks and touch gestures that begin outside the board are dropped so
/// presses on the control panel never steer the snake. Macroquad mirrors
/// touches as mouse presses for its UI, so clicks arriving alongside touch
/// activity are ignored.
fn translate_observations(
    metrics: &SceneMetrics,
    keys: &[Key],
    touches: &[TouchObservation],
    click: Option<Vec2>,
) -> Vec<DeviceInput> {
    let mut inputs: Vec<DeviceInput> = keys.iter().copied().map(DeviceInput::Key).collect();

    for touch in touches {
        let input = match *touch {
            TouchObservation::Started(position) => Some(position)
                .filter(|position| metrics.contains(*position))
                .and_then(|position| metrics.to_board(position))
                .map(DeviceInput::TouchStart),
            TouchObservation::Moved(position) => {
                metrics.to_board(position).map(DeviceInput::TouchMove)
            }
            TouchObservation::Ended => Some(DeviceInput::TouchEnd),
        };
        inputs.extend(input);
    }

    let click = click.filter(|_| touches.is_empty());
    if let Some(position) = click.filter(|position| metrics.contains(*position)) {
        inputs.extend(metrics.to_board(position).map(DeviceInput::Click));
    }

    inputs
}

fn draw_board(scene: &Scene, metrics: &SceneMetrics) {
    let palette = scene.palette;
    let grid = scene.grid;
    let cell = grid.cell_length * metrics.scale;

    macroquad::shapes::draw_rectangle(
        metrics.origin.x,
        metrics.origin.y,
        metrics.board_size.x,
        metrics.board_size.y,
        to_macroquad_color(palette.background),
    );

    let line_color = to_macroquad_color(palette.grid_line);
    for column in 0..=grid.grid.width() {
        let x = metrics.origin.x + column as f32 * cell;
        macroquad::shapes::draw_line(
            x,
            metrics.origin.y,
            x,
            metrics.origin.y + metrics.board_size.y,
            0.5,
            line_color,
        );
    }
    for row in 0..=grid.grid.height() {
        let y = metrics.origin.y + row as f32 * cell;
        macroquad::shapes::draw_line(
            metrics.origin.x,
            y,
            metrics.origin.x + metrics.board_size.x,
            y,
            0.5,
            line_color,
        );
    }

    if let Some(food) = scene.snapshot.food {
        let center = metrics.to_screen(grid.cell_center(food));
        macroquad::shapes::draw_circle(
            center.x,
            center.y,
            grid.food_radius() * metrics.scale,
            to_macroquad_color(palette.food),
        );
    }

    let obstacle_color = to_macroquad_color(palette.obstacle);
    for obstacle in &scene.snapshot.obstacles {
        let origin = metrics.to_screen(grid.cell_origin(*obstacle));
        macroquad::shapes::draw_rectangle(origin.x, origin.y, cell, cell, obstacle_color);
    }

    let outline = to_macroquad_color(palette.snake_outline);
    for (index, segment) in scene.snapshot.snake.iter().enumerate() {
        let origin = metrics.to_screen(grid.cell_origin(*segment));
        let fill = to_macroquad_color(palette.snake_segment(index));
        macroquad::shapes::draw_rectangle(origin.x, origin.y, cell, cell, fill);
        macroquad::shapes::draw_rectangle_lines(origin.x, origin.y, cell, cell, 1.0, outline);
    }

    if let Some(head) = scene.snapshot.head() {
        let origin = metrics.to_screen(grid.cell_origin(head));
        let eye = grid.eye_size() * metrics.scale;
        let eye_color = to_macroquad_color(palette.eye);
        for offset in grid.eye_offsets(scene.snapshot.direction) {
            let position = origin + offset * metrics.scale;
            macroquad::shapes::draw_rectangle(position.x, position.y, eye, eye, eye_color);
        }
    }
}

fn draw_hud(scene: &Scene, metrics: &SceneMetrics) {
    let text_color = to_macroquad_color(scene.palette.text);

    let hud = scene.hud_line();
    let _ = macroquad::text::draw_text(
        &hud,
        metrics.origin.x,
        MARGIN + HUD_HEIGHT * 0.7,
        HUD_FONT_SIZE,
        text_color,
    );

    if !scene.status.is_empty() {
        let _ = macroquad::text::draw_text(
            &scene.status,
            metrics.origin.x,
            metrics.status_top + STATUS_HEIGHT * 0.7,
            HUD_FONT_SIZE,
            text_color,
        );
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_snake_core::{Cell, Direction, GamePhase, GameSnapshot, GridSize, Level};
    use grid_snake_rendering::{GridPresentation, Palette};

    fn scene(grid: GridSize) -> Scene {
        let presentation = GridPresentation::new(grid, 20.0).expect("positive cell length");
        let snapshot = GameSnapshot {
            grid,
            snake: vec![grid.center()],
            food: Some(Cell::new(0, 0)),
            obstacles: Vec::new(),
            direction: Direction::Right,
            phase: GamePhase::Ready,
            score: 0,
            level: Level::FIRST,
            tick_interval: Duration::from_millis(150),
        };
        Scene::new(presentation, Palette::default(), snapshot)
    }

    #[test]
    fn preferred_window_fits_board_hud_and_panel() {
        let scene = scene(GridSize::new(20, 20));
        let (width, height) = preferred_window_size(&scene);

        let metrics = SceneMetrics::from_scene(&scene, width as f32, height as f32);

        assert_eq!(metrics.scale, 1.0);
        assert_eq!(metrics.board_size, Vec2::new(400.0, 400.0));
        assert_eq!(metrics.origin, Vec2::new(MARGIN, MARGIN + HUD_HEIGHT));
    }

    #[test]
    fn metrics_scale_down_to_fit_small_windows() {
        let scene = scene(GridSize::new(20, 20));
        let height = 200.0 + 2.0 * MARGIN + HUD_HEIGHT + STATUS_HEIGHT + PANEL_HEIGHT;

        let metrics = SceneMetrics::from_scene(&scene, 1_000.0, height);

        assert_eq!(metrics.scale, 0.5);
        assert_eq!(metrics.to_screen(Vec2::new(20.0, 40.0)), metrics.origin + Vec2::new(10.0, 20.0));
        assert_eq!(metrics.to_board(metrics.origin + Vec2::new(10.0, 20.0)), Some(Vec2::new(20.0, 40.0)));
    }

    #[test]
    fn clicks_outside_the_board_are_dropped() {
        let scene = scene(GridSize::new(20, 20));
        let (width, height) = preferred_window_size(&scene);
        let metrics = SceneMetrics::from_scene(&scene, width as f32, height as f32);

        let inside = metrics.origin + Vec2::new(15.0, 25.0);
        let outside = Vec2::new(metrics.origin.x + 10.0, metrics.panel_top + 5.0);

        assert_eq!(
            translate_observations(&metrics, &[], &[], Some(inside)),
            vec![DeviceInput::Click(Vec2::new(15.0, 25.0))]
        );
        assert!(translate_observations(&metrics, &[], &[], Some(outside)).is_empty());
    }

    #[test]
    fn observations_preserve_order() {
        let scene = scene(GridSize::new(10, 10));
        let (width, height) = preferred_window_size(&scene);
        let metrics = SceneMetrics::from_scene(&scene, width as f32, height as f32);
        let start = metrics.origin + Vec2::new(5.0, 5.0);

        let inputs = translate_observations(
            &metrics,
            &[Key::Space, Key::Char('w')],
            &[
                TouchObservation::Started(start),
                TouchObservation::Moved(start + Vec2::new(30.0, 0.0)),
                TouchObservation::Ended,
            ],
            None,
        );

        assert_eq!(
            inputs,
            vec![
                DeviceInput::Key(Key::Space),
                DeviceInput::Key(Key::Char('w')),
                DeviceInput::TouchStart(Vec2::new(5.0, 5.0)),
                DeviceInput::TouchMove(Vec2::new(35.0, 5.0)),
                DeviceInput::TouchEnd,
            ]
        );
    }

    #[test]
    fn swipes_starting_on_the_control_panel_are_dropped() {
        let scene = scene(GridSize::new(10, 10));
        let (width, height) = preferred_window_size(&scene);
        let metrics = SceneMetrics::from_scene(&scene, width as f32, height as f32);
        let on_panel = Vec2::new(metrics.origin.x + 10.0, metrics.panel_top + 5.0);

        let inputs = translate_observations(
            &metrics,
            &[],
            &[TouchObservation::Started(on_panel)],
            None,
        );
        assert!(inputs.is_empty());

        let mut router = grid_snake_system_input::InputRouter::new();
        let mut commands = Vec::new();
        router.handle(&inputs, None, &mut commands);
        let moved = translate_observations(
            &metrics,
            &[],
            &[
                TouchObservation::Moved(on_panel - Vec2::new(0.0, 80.0)),
                TouchObservation::Ended,
            ],
            None,
        );
        router.handle(&moved, None, &mut commands);

        assert!(commands.is_empty());
    }

    #[test]
    fn mirrored_touch_clicks_are_ignored() {
        let scene = scene(GridSize::new(10, 10));
        let (width, height) = preferred_window_size(&scene);
        let metrics = SceneMetrics::from_scene(&scene, width as f32, height as f32);
        let tap = metrics.origin + Vec2::new(5.0, 5.0);

        let inputs = translate_observations(
            &metrics,
            &[],
            &[TouchObservation::Started(tap)],
            Some(tap),
        );

        assert_eq!(inputs, vec![DeviceInput::TouchStart(Vec2::new(5.0, 5.0))]);
    }
}
