/*
 * Debug Information Module
 *
 * Frame statistics shown in the control panel and the on-canvas overlay.
 */

use std::time::Duration;

use nannou::prelude::*;

use crate::renderer::FrameStats;

#[derive(Clone, Debug, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub frames_rendered: u64,
    pub last_frame: FrameStats,
    pub pointer: Vec2,
}
