/*
 * Renderer Module
 *
 * This module turns the current particle state into one frame:
 * the surface is cleared, every particle is drawn as a filled disc, and every
 * pair of particles closer than the connection distance is joined by a line
 * that fades out with distance.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::field::ParticleField;
use crate::params::FieldParams;
use crate::surface::Surface;
use crate::theme::Palette;
use crate::ui;

// What the last render pass drew
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub particles: usize,
    pub edges: usize,
}

// Paint one frame. A missing surface skips the frame without complaint.
pub fn render_frame<S: Surface + ?Sized>(
    surface: Option<&mut S>,
    field: &ParticleField,
    palette: &Palette,
    params: &FieldParams,
) -> FrameStats {
    let Some(surface) = surface else {
        return FrameStats::default();
    };

    surface.clear(palette.background);

    for particle in field.particles() {
        surface.fill_circle(particle.position, particle.radius, palette.particle);
    }

    let particles = field.particles();
    let mut edges = 0;
    for edge in field.edges(params.connection_distance) {
        surface.stroke_line(
            particles[edge.a].position,
            particles[edge.b].position,
            params.edge_width,
            palette.edge.fade(edge.opacity),
        );
        edges += 1;
    }

    FrameStats {
        particles: field.len(),
        edges,
    }
}

// Present the frame built during update, then the overlays
pub fn view(app: &App, model: &Model, frame: Frame) {
    if model.show_debug {
        ui::draw_debug_info(&model.draw, &model.debug_info, app.window_rect(), model.controller.theme());
    }

    if let Err(e) = model.draw.to_frame(app, &frame) {
        log::warn!("failed to present frame: {:?}", e);
    }

    if let Err(e) = model.egui.draw_to_frame(&frame) {
        log::warn!("failed to draw control panel: {:?}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;
    use crate::surface::{DrawCommand, RecordingSurface};
    use crate::theme::Theme;
    use crate::field::Viewport;

    fn pair(distance: f32) -> ParticleField {
        ParticleField::from_particles(
            Viewport::new(800.0, 600.0),
            vec![
                Particle::new(vec2(100.0, 100.0), Vec2::ZERO, 2.0),
                Particle::new(vec2(100.0 + distance, 100.0), Vec2::ZERO, 3.0),
            ],
        )
    }

    #[test]
    fn missing_surface_is_a_no_op() {
        let stats = render_frame::<RecordingSurface>(
            None,
            &pair(10.0),
            Theme::Dark.palette(),
            &FieldParams::default(),
        );
        assert_eq!(stats, FrameStats::default());
    }

    #[test]
    fn clears_then_draws_particles_and_edges() {
        let mut surface = RecordingSurface::new();
        let palette = Theme::Dark.palette();
        let stats = render_frame(Some(&mut surface), &pair(40.0), palette, &FieldParams::default());

        assert_eq!(stats, FrameStats { particles: 2, edges: 1 });
        assert_eq!(surface.commands[0], DrawCommand::Clear(palette.background));
        assert_eq!(surface.circles().count(), 2);

        match surface.lines().next() {
            Some(DrawCommand::Line { weight, color, .. }) => {
                assert_eq!(*weight, 1.2);
                let expected = palette.edge.a * (1.0 - 40.0 / 160.0);
                assert!((color.a - expected).abs() < 1e-6);
            }
            other => panic!("expected a line, got {:?}", other),
        };
    }

    #[test]
    fn pairs_at_the_threshold_draw_nothing() {
        let mut surface = RecordingSurface::new();
        let stats = render_frame(
            Some(&mut surface),
            &pair(160.0),
            Theme::Light.palette(),
            &FieldParams::default(),
        );
        assert_eq!(stats.edges, 0);
        assert_eq!(surface.lines().count(), 0);
    }

    #[test]
    fn theme_changes_particle_colour() {
        let field = pair(500.0);
        let params = FieldParams::default();
        let mut dark = RecordingSurface::new();
        let mut light = RecordingSurface::new();
        render_frame(Some(&mut dark), &field, Theme::Dark.palette(), &params);
        render_frame(Some(&mut light), &field, Theme::Light.palette(), &params);

        let colour = |s: &RecordingSurface| match s.circles().next() {
            Some(DrawCommand::Circle { color, .. }) => *color,
            _ => unreachable!(),
        };
        assert_ne!(colour(&dark), colour(&light));
    }
}
