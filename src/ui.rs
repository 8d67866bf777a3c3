/*
 * UI Module
 *
 * This module contains the egui control panel and the on-canvas debug overlay.
 * The panel reports what the user asked for; applying it to the engine is
 * left to the app module.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::{FieldParams, ParamSnapshot};
use crate::theme::Theme;

// What the user did in the panel this frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiActions {
    pub toggle_theme: bool,
    pub reinit_needed: bool,
    pub tuning_changed: bool,
    pub reset_field: bool,
}

pub fn update_ui(
    egui: &mut Egui,
    params: &mut FieldParams,
    theme: Theme,
    show_debug: &mut bool,
    debug_info: &DebugInfo,
) -> UiActions {
    let mut actions = UiActions::default();

    // Take a snapshot of current parameter values for change detection
    let snapshot = ParamSnapshot::take(params);

    let ctx = egui.begin_frame();

    egui::Window::new("Field Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.label(format!("Mode: {}", theme.label()));
            if ui.button(theme.toggle_caption()).clicked() {
                actions.toggle_theme = true;
            }

            ui.collapsing("Particles", |ui| {
                ui.add(egui::Slider::new(&mut params.particle_count, FieldParams::get_particle_count_range()).text("Particles"));
                if ui.button("Reset Field").clicked() {
                    actions.reset_field = true;
                }
                ui.add(egui::Slider::new(&mut params.connection_distance, FieldParams::get_distance_range()).text("Connection Distance"));
                ui.add(egui::Slider::new(&mut params.edge_width, FieldParams::get_edge_width_range()).text("Line Width"));
            });

            ui.collapsing("Pointer", |ui| {
                ui.add(egui::Slider::new(&mut params.repulsion_radius, FieldParams::get_distance_range()).text("Repulsion Radius"));
                ui.add(egui::Slider::new(&mut params.repulsion_strength, FieldParams::get_strength_range()).text("Repulsion Strength"));

                let mut limited = params.speed_limit.is_some();
                ui.checkbox(&mut limited, "Limit Speed");
                match (limited, params.speed_limit) {
                    (true, None) => params.speed_limit = Some(1.0),
                    (false, Some(_)) => params.speed_limit = None,
                    _ => {}
                }
                if let Some(limit) = params.speed_limit.as_mut() {
                    ui.add(egui::Slider::new(limit, FieldParams::get_speed_limit_range()).text("Max Speed"));
                }
            });

            ui.separator();

            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
            ui.label(format!("Links: {}", debug_info.last_frame.edges));

            ui.checkbox(show_debug, "Show Debug Info");
        });

    let changes = snapshot.detect_changes(params);
    actions.reinit_needed = changes.reinit_needed;
    actions.tuning_changed = changes.tuning_changed;
    actions
}

// Draw debug information on the screen
pub fn draw_debug_info(
    draw: &nannou::Draw,
    debug_info: &DebugInfo,
    window_rect: nannou::geom::Rect,
    theme: Theme,
) {
    // Create a background panel in the bottom-left corner
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 220.0;
    let panel_height = line_height * 6.0 + margin;
    let panel_x = window_rect.left() + panel_width / 2.0;
    let panel_y = window_rect.bottom() + panel_height / 2.0;

    let (panel, text) = match theme {
        Theme::Dark => (nannou::color::rgba(0.0, 0.0, 0.0, 0.7), nannou::color::rgba(1.0, 1.0, 1.0, 1.0)),
        Theme::Light => (nannou::color::rgba(1.0, 1.0, 1.0, 0.7), nannou::color::rgba(0.0, 0.0, 0.0, 1.0)),
    };

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(panel);

    let text_x = window_rect.left() + margin;
    let text_y = window_rect.bottom() + panel_height - margin;

    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Particles: {}", debug_info.last_frame.particles),
        format!("Links: {}", debug_info.last_frame.edges),
        format!("Frames: {}", debug_info.frames_rendered),
        format!("Pointer: ({:.0}, {:.0})", debug_info.pointer.x, debug_info.pointer.y),
    ];

    for (i, line) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        // Position the text with a fixed offset from the left edge
        draw.text(line)
            .x_y(text_x + 80.0, y)
            .color(text)
            .font_size(14);
    }
}
