/*
 * Input Module
 *
 * This module handles window events for the particle field.
 * Pointer and resize events are forwarded to the lifecycle controller only
 * while it holds the matching subscription.
 *
 * Keys:
 * - T: toggle between the dark and light theme
 * - D: toggle the debug overlay
 * - R: re-seed the field
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::field::Viewport;
use crate::host::Host;

// nannou reports positions from the window centre with y up; the field uses
// the top-left corner with y down
pub fn to_viewport(pos: Point2, viewport: Viewport) -> Vec2 {
    vec2(pos.x + viewport.width / 2.0, viewport.height / 2.0 - pos.y)
}

// Mouse moved event handler
pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    let viewport = model.controller.host().viewport();
    model.controller.dispatch_pointer_move(to_viewport(pos, viewport));
}

// Window resized event handler
pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    model.controller.dispatch_resize(Viewport::new(size.x, size.y));
}

pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }

    match key {
        Key::T => {
            let theme = model.controller.theme().toggled();
            model.controller.set_theme(theme);
        }
        Key::D => model.show_debug = !model.show_debug,
        Key::R => model.controller.reinitialize(),
        _ => {}
    }
}

// Pass raw window events to egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
