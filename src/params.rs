/*
 * Field Parameters Module
 *
 * This module defines the FieldParams struct that holds the tunable constants
 * of the particle field. The defaults reproduce the hand-calibrated look of the
 * original backdrop. Parameters can be loaded from the config file and adjusted
 * through the UI; ParamSnapshot tracks changes between UI frames so the app
 * knows when a full re-initialisation is needed.
 */

use std::time::Duration;

use serde::{Deserialize, Serialize};

// Longest frame the elapsed-time step will catch up on at once
pub const MAX_FRAME_SCALE: f32 = 4.0;

// How far a particle moves per simulation step
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timestep {
    // One unit step per frame; speed depends on the host frame rate
    PerFrame,
    // Displacement scaled by elapsed time relative to a reference frame rate
    Elapsed { reference_fps: f32 },
}

impl Timestep {
    pub fn scale(&self, elapsed: Duration) -> f32 {
        match *self {
            Timestep::PerFrame => 1.0,
            Timestep::Elapsed { reference_fps } => {
                (elapsed.as_secs_f32() * reference_fps).clamp(0.0, MAX_FRAME_SCALE)
            }
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    pub particle_count: usize,
    pub connection_distance: f32,
    pub repulsion_radius: f32,
    pub repulsion_strength: f32,
    pub initial_speed: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub edge_width: f32,
    pub speed_limit: Option<f32>,
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub timestep: Timestep,
    pub seed: Option<u64>,
}

// A snapshot of parameter values used for change detection
#[derive(Clone, Debug)]
pub struct ParamSnapshot {
    particle_count: usize,
    connection_distance: f32,
    repulsion_radius: f32,
    repulsion_strength: f32,
    edge_width: f32,
    speed_limit: Option<f32>,
}

// What changed since the last snapshot
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParamChanges {
    pub reinit_needed: bool,
    pub tuning_changed: bool,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            particle_count: 70,
            connection_distance: 160.0,
            repulsion_radius: 220.0,
            repulsion_strength: 0.05,
            initial_speed: 0.075,
            min_radius: 1.5,
            max_radius: 4.0,
            edge_width: 1.2,
            speed_limit: Some(1.0),
            timestep: Timestep::PerFrame,
            seed: None,
        }
    }
}

impl ParamSnapshot {
    // Take a snapshot of current parameter values for change detection
    pub fn take(params: &FieldParams) -> Self {
        Self {
            particle_count: params.particle_count,
            connection_distance: params.connection_distance,
            repulsion_radius: params.repulsion_radius,
            repulsion_strength: params.repulsion_strength,
            edge_width: params.edge_width,
            speed_limit: params.speed_limit,
        }
    }

    // Check if any parameters have changed since this snapshot.
    // Only the particle count forces the store to be rebuilt; everything
    // else is read fresh every frame.
    pub fn detect_changes(&self, params: &FieldParams) -> ParamChanges {
        let mut changes = ParamChanges::default();

        if params.particle_count != self.particle_count {
            changes.reinit_needed = true;
        }

        if params.connection_distance != self.connection_distance
            || params.repulsion_radius != self.repulsion_radius
            || params.repulsion_strength != self.repulsion_strength
            || params.edge_width != self.edge_width
            || params.speed_limit != self.speed_limit
        {
            changes.tuning_changed = true;
        }

        changes
    }
}

impl FieldParams {
    // Get parameter ranges for UI sliders
    pub fn get_particle_count_range() -> std::ops::RangeInclusive<usize> {
        0..=400
    }

    pub fn get_distance_range() -> std::ops::RangeInclusive<f32> {
        20.0..=400.0
    }

    pub fn get_strength_range() -> std::ops::RangeInclusive<f32> {
        0.0..=0.5
    }

    pub fn get_edge_width_range() -> std::ops::RangeInclusive<f32> {
        0.2..=4.0
    }

    pub fn get_speed_limit_range() -> std::ops::RangeInclusive<f32> {
        0.1..=5.0
    }
}
