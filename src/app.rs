/*
 * Application Module
 *
 * This module defines the nannou model for the particle field window.
 * The lifecycle controller owns the engine; this module wires it to the
 * window: frames are pumped from update into a Draw that view presents,
 * and window events are forwarded through the input module.
 */

use log::{debug, info, warn};
use nannou::prelude::*;
use nannou_egui::Egui;
use once_cell::sync::OnceCell;

use crate::config::AppConfig;
use crate::debug::DebugInfo;
use crate::field::Viewport;
use crate::host::{Host, QueuedHost};
use crate::input::{key_pressed, mouse_moved, raw_window_event, resized};
use crate::lifecycle::LifecycleController;
use crate::renderer::view;
use crate::surface::DrawSurface;
use crate::ui;

// Window size used when no monitor can be queried
const FALLBACK_WINDOW: (f32, f32) = (1280.0, 800.0);

// nannou builds the model from a plain fn, so the resolved config is parked here
static CONFIG: OnceCell<AppConfig> = OnceCell::new();

// Main model for the application
pub struct Model {
    pub controller: LifecycleController<QueuedHost>,
    pub egui: Egui,
    pub draw: Draw,
    pub debug_info: DebugInfo,
    pub show_debug: bool,
    pub window_id: WindowId,
}

// Open the window and run until it closes
pub fn launch(config: AppConfig) {
    if CONFIG.set(config).is_err() {
        warn!("application config already set, keeping the first one");
    }

    nannou::app(model).update(update).exit(exit).run();
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let config = CONFIG.get().cloned().unwrap_or_default();

    let fraction = config.window.monitor_fraction;
    let (window_width, window_height) = match app.primary_monitor() {
        Some(monitor) => {
            let size = monitor.size();
            (size.width as f32 * fraction, size.height as f32 * fraction)
        }
        None => FALLBACK_WINDOW,
    };

    // Create the main window with dynamic size
    let window_id = app
        .new_window()
        .title(&config.window.title)
        .size(window_width as u32, window_height as u32)
        .view(view)
        .mouse_moved(mouse_moved)
        .resized(resized)
        .key_pressed(key_pressed)
        .raw_event(raw_window_event)
        .build()
        .expect("failed to build the main window");

    // Create the UI
    let egui = {
        let window = app
            .window(window_id)
            .expect("main window disappeared right after creation");
        Egui::from_window(&window)
    };

    let rect = app.window_rect();
    let viewport = Viewport::new(rect.w(), rect.h());

    let mut controller = LifecycleController::new(QueuedHost::new(viewport), config.field.clone(), config.theme);
    controller.start();

    Model {
        controller,
        egui,
        draw: Draw::new(),
        debug_info: DebugInfo::default(),
        show_debug: config.window.show_debug,
        window_id,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    // Update debug info
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    model.egui.set_elapsed_time(update.since_start);

    let theme = model.controller.theme();
    let actions = ui::update_ui(
        &mut model.egui,
        model.controller.params_mut(),
        theme,
        &mut model.show_debug,
        &model.debug_info,
    );

    if actions.toggle_theme {
        model.controller.set_theme(theme.toggled());
    }

    if actions.tuning_changed {
        debug!("field parameters adjusted: {:?}", model.controller.params());
    }

    if actions.reinit_needed || actions.reset_field {
        model.controller.reinitialize();
    }

    // Build this frame's drawing; view only presents it
    model.draw.reset();
    let viewport = model.controller.host().viewport();
    let mut surface = app
        .window(model.window_id)
        .is_some()
        .then(|| DrawSurface::new(&model.draw, viewport));
    model.controller.pump(update.since_last, surface.as_mut());

    model.debug_info.last_frame = model.controller.last_stats();
    model.debug_info.frames_rendered = model.controller.frames_rendered();
    model.debug_info.pointer = model.controller.pointer();
}

// Tear the engine down when the app exits
pub fn exit(_app: &App, mut model: Model) {
    model.controller.terminate();
    info!("window closed");
}
