/*
 * Particle Field Module
 *
 * This module owns the particle store for one engine instance and advances it
 * once per frame. Connections between particles are never stored; they are
 * derived on demand from the current positions.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::params::FieldParams;
use crate::particle::{connection_opacity, Particle};

// Pointer position used before any pointer event arrives; far enough away
// that nothing is repelled
pub fn pointer_sentinel() -> Vec2 {
    vec2(-1000.0, -1000.0)
}

// Size of the drawing area in pixels, origin top-left, y down
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

// A transient link between particles `a` and `b` (a < b)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub opacity: f32,
}

pub struct ParticleField {
    particles: Vec<Particle>,
    viewport: Viewport,
}

impl ParticleField {
    // Allocate `params.particle_count` particles spread over the viewport
    pub fn new<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport, params: &FieldParams) -> Self {
        let mut particles = Vec::with_capacity(params.particle_count);
        for _ in 0..params.particle_count {
            particles.push(Particle::random(rng, viewport, params));
        }

        Self { particles, viewport }
    }

    // Build a field from an explicit layout
    pub fn from_particles(viewport: Viewport, particles: Vec<Particle>) -> Self {
        Self { particles, viewport }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    // One simulation step for every particle
    pub fn step(&mut self, pointer: Vec2, params: &FieldParams, scale: f32) {
        let viewport = self.viewport;
        for particle in &mut self.particles {
            particle.update(viewport, pointer, params, scale);
        }
    }

    // Every unordered pair closer than `threshold`, O(n^2)
    pub fn edges(&self, threshold: f32) -> impl Iterator<Item = Edge> + '_ {
        let particles = &self.particles;
        (0..particles.len()).flat_map(move |a| {
            ((a + 1)..particles.len()).filter_map(move |b| {
                connection_opacity(particles[a].position, particles[b].position, threshold)
                    .map(|opacity| Edge { a, b, opacity })
            })
        })
    }
}
