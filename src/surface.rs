/*
 * Surface Module
 *
 * The drawing surface the renderer paints into. Coordinates are viewport
 * pixels with the origin in the top-left corner and y pointing down.
 */

use nannou::prelude::*;

use crate::field::Viewport;
use crate::theme::Color;

pub trait Surface {
    fn clear(&mut self, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, weight: f32, color: Color);
}

// A nannou Draw, mapping viewport pixels into nannou's centred, y-up space
pub struct DrawSurface<'a> {
    draw: &'a Draw,
    viewport: Viewport,
}

impl<'a> DrawSurface<'a> {
    pub fn new(draw: &'a Draw, viewport: Viewport) -> Self {
        Self { draw, viewport }
    }

    fn to_nannou(&self, point: Vec2) -> Point2 {
        pt2(
            point.x - self.viewport.width / 2.0,
            self.viewport.height / 2.0 - point.y,
        )
    }
}

fn to_srgba(color: Color) -> nannou::color::Srgba<f32> {
    nannou::color::srgba(
        color.r as f32 / 255.0,
        color.g as f32 / 255.0,
        color.b as f32 / 255.0,
        color.a,
    )
}

impl Surface for DrawSurface<'_> {
    fn clear(&mut self, color: Color) {
        self.draw.background().color(to_srgba(color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.draw
            .ellipse()
            .xy(self.to_nannou(center))
            .radius(radius)
            .color(to_srgba(color));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, weight: f32, color: Color) {
        self.draw
            .line()
            .start(self.to_nannou(from))
            .end(self.to_nannou(to))
            .weight(weight)
            .color(to_srgba(color));
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Circle { center: Vec2, radius: f32, color: Color },
    Line { from: Vec2, to: Vec2, weight: f32, color: Color },
}

// Keeps every command it is given; used headless and in tests
#[derive(Default, Debug)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, weight: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            weight,
            color,
        });
    }
}
