/*
 * Particle Module
 *
 * This module defines the Particle struct and its per-frame kinematics.
 * Each step a particle:
 * 1. Moves by its velocity (Euler, unit step unless scaled)
 * 2. Bounces off the viewport edges by flipping the crossed velocity component
 * 3. Is pushed away from the pointer when it is within the repulsion radius
 */

use nannou::prelude::*;
use rand::Rng;

use crate::field::Viewport;
use crate::params::FieldParams;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
        }
    }

    // Spawn a particle uniformly inside the viewport
    pub fn random<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport, params: &FieldParams) -> Self {
        let x = sample(rng, 0.0, viewport.width);
        let y = sample(rng, 0.0, viewport.height);
        let vx = sample(rng, -params.initial_speed, params.initial_speed);
        let vy = sample(rng, -params.initial_speed, params.initial_speed);
        let radius = sample(rng, params.min_radius, params.max_radius);

        Self::new(vec2(x, y), vec2(vx, vy), radius)
    }

    // Advance one simulation step
    pub fn update(&mut self, viewport: Viewport, pointer: Vec2, params: &FieldParams, scale: f32) {
        self.position += self.velocity * scale;

        self.reflect(viewport);

        self.velocity -= repulsion(
            self.position,
            pointer,
            params.repulsion_radius,
            params.repulsion_strength,
        ) * scale;

        // Limit speed
        if let Some(limit) = params.speed_limit {
            let speed = self.velocity.length();
            if speed > limit {
                self.velocity *= limit / speed;
            }
        }
    }

    // Flip each velocity component whose axis left the viewport.
    // The position is left where it is.
    pub fn reflect(&mut self, viewport: Viewport) {
        if self.position.x < 0.0 || self.position.x > viewport.width {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < 0.0 || self.position.y > viewport.height {
            self.velocity.y = -self.velocity.y;
        }
    }
}

// Velocity decrement pushing a particle at `position` away from `pointer`.
// Points from the particle towards the pointer, so callers subtract it.
// Zero outside the radius and when the particle sits exactly on the pointer.
pub fn repulsion(position: Vec2, pointer: Vec2, radius: f32, strength: f32) -> Vec2 {
    let delta = pointer - position;
    let distance = delta.length();

    if distance <= 0.0 || distance >= radius {
        return Vec2::ZERO;
    }

    let direction = delta / distance;
    let force = (radius - distance) / radius;
    direction * force * strength
}

// Opacity of the connection between two points, or None when too far apart
pub fn connection_opacity(a: Vec2, b: Vec2, threshold: f32) -> Option<f32> {
    let distance = a.distance(b);
    if distance < threshold {
        Some(1.0 - distance / threshold)
    } else {
        None
    }
}

// gen_range panics on an empty or unbounded range; collapse it to its lower
// bound instead
fn sample<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    if high > low && (high - low).is_finite() {
        rng.gen_range(low..high)
    } else {
        low
    }
}
