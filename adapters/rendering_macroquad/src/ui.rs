//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter can
//! remain agnostic of Macroquad's UI types.

use macroquad::{
    color::{Color, BLACK},
    math::{RectOffset, Vec2},
    ui::{hash, Ui},
};
use snake_rendering::{ControlAction, ControlPanelView};

/// Snapshot of the control panel's UI layout and data for the current frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ControlPanelUiContext {
    /// Top-left corner of the panel in screen coordinates.
    pub origin: Vec2,
    /// Panel dimensions in screen space.
    pub size: Vec2,
    /// Background colour applied to the window skin.
    pub background: Color,
    /// Buttons offered this frame.
    pub panel: ControlPanelView,
    /// Score shown next to the buttons.
    pub score: u32,
    /// Speed factor shown next to the buttons.
    pub speed_factor: u32,
}

/// Renders the control panel and returns the buttons clicked this frame.
pub(crate) fn draw_control_panel_ui(
    ui: &mut Ui,
    context: ControlPanelUiContext,
) -> Vec<ControlAction> {
    let mut skin = ui.default_skin();
    skin.margin = 0.0;

    let window_style = ui
        .style_builder()
        .color(context.background)
        .color_hovered(context.background)
        .color_clicked(context.background)
        .color_selected(context.background)
        .color_selected_hovered(context.background)
        .color_inactive(context.background)
        .text_color(BLACK)
        .margin(RectOffset::new(12.0, 12.0, 10.0, 10.0))
        .build();
    skin.window_style = window_style;

    let label_style = ui
        .style_builder()
        .text_color(BLACK)
        .text_color_hovered(BLACK)
        .text_color_clicked(BLACK)
        .margin(RectOffset::new(0.0, 12.0, 4.0, 4.0))
        .build();
    skin.label_style = label_style;

    let button_style = ui
        .style_builder()
        .text_color(BLACK)
        .text_color_hovered(BLACK)
        .text_color_clicked(BLACK)
        .color(Color::from_rgba(225, 225, 225, 255))
        .color_hovered(Color::from_rgba(205, 205, 205, 255))
        .color_clicked(Color::from_rgba(185, 185, 185, 255))
        .margin(RectOffset::new(8.0, 8.0, 4.0, 4.0))
        .build();
    skin.button_style = button_style;

    ui.push_skin(&skin);

    let mut pressed = Vec::new();
    let _ = ui.window(hash!("control_panel"), context.origin, context.size, |ui| {
        for action in context.panel.actions() {
            if ui.button(None, action.label()) {
                pressed.push(action);
            }
            ui.same_line(0.0);
        }

        ui.label(None, &format!("Score: {}", context.score));
        ui.same_line(0.0);
        ui.label(None, &format!("Speed: {}", context.speed_factor));
    });

    ui.pop_skin();

    pressed
}
