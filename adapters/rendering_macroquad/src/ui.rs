//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter can
//! remain agnostic of Macroquad's UI types.

use grid_snake_rendering::ControlPanelActions;
use grid_snake_system_status::Controls;
use macroquad::{
    color::{Color, WHITE},
    math::{vec2, RectOffset, Vec2},
    ui::{hash, Skin, Ui},
};

const BUTTON_WIDTH: f32 = 110.0;
const BUTTON_HEIGHT: f32 = 36.0;
const BUTTON_GAP: f32 = 16.0;

/// Snapshot of the control panel's layout and state for the current frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ControlPanelUiContext {
    /// Top-left corner of the panel in screen coordinates.
    pub(crate) origin: Vec2,
    /// Panel dimensions in screen space.
    pub(crate) size: Vec2,
    /// Background colour matching the cleared frame.
    pub(crate) background: Color,
    /// Fill of enabled buttons.
    pub(crate) button: Color,
    /// Availability of each control.
    pub(crate) controls: Controls,
}

/// Renders the start, pause and restart buttons, reporting enabled presses.
pub(crate) fn draw_control_panel_ui(
    ui: &mut Ui,
    context: ControlPanelUiContext,
) -> ControlPanelActions {
    let enabled = button_skin(ui, context, context.button);
    let disabled = button_skin(ui, context, Color::new(0.58, 0.65, 0.65, 1.0));

    let controls = context.controls;
    let buttons = [
        ("Start", controls.start_enabled),
        (controls.pause_label.text(), controls.pause_enabled),
        ("Restart", controls.restart_enabled),
    ];
    let row_width = BUTTON_WIDTH * 3.0 + BUTTON_GAP * 2.0;
    let left = ((context.size.x - row_width) * 0.5).max(0.0);

    let mut pressed = [false; 3];
    ui.push_skin(&enabled);
    let _ = ui.window(hash!("control_panel"), context.origin, context.size, |ui| {
        for (index, (label, is_enabled)) in buttons.into_iter().enumerate() {
            ui.push_skin(if is_enabled { &enabled } else { &disabled });
            let position = vec2(left + index as f32 * (BUTTON_WIDTH + BUTTON_GAP), 0.0);
            pressed[index] = ui.button(Some(position), label) && is_enabled;
            ui.pop_skin();
        }
    });
    ui.pop_skin();

    ControlPanelActions {
        start: pressed[0],
        pause: pressed[1],
        restart: pressed[2],
    }
}

fn button_skin(ui: &mut Ui, context: ControlPanelUiContext, fill: Color) -> Skin {
    let mut skin = ui.default_skin();
    skin.margin = 0.0;

    skin.window_style = ui
        .style_builder()
        .color(context.background)
        .color_hovered(context.background)
        .color_clicked(context.background)
        .color_inactive(context.background)
        .margin(RectOffset::new(0.0, 0.0, 8.0, 8.0))
        .build();

    let hovered = Color::new(
        (fill.r + 0.08).min(1.0),
        (fill.g + 0.08).min(1.0),
        (fill.b + 0.08).min(1.0),
        fill.a,
    );
    skin.button_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .color(fill)
        .color_hovered(hovered)
        .color_clicked(fill)
        .color_inactive(fill)
        .margin(RectOffset::new(
            12.0,
            12.0,
            (BUTTON_HEIGHT - 20.0) * 0.5,
            (BUTTON_HEIGHT - 20.0) * 0.5,
        ))
        .build();

    skin
}
