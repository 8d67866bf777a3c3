/*
 * Lifecycle Module
 *
 * The LifecycleController owns the particle field, the pointer target, the
 * outstanding frame handle and the host subscriptions. It moves through
 * Uninitialized -> Running -> Terminated and guarantees that at most one frame
 * request is outstanding at any time.
 *
 * Each frame callback first checks that its handle is still the outstanding
 * one; a cancelled or stale handle does nothing. That check is the loop's
 * cancellation token.
 */

use std::time::Duration;

use log::{debug, info, trace, warn};
use nannou::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg64;

use crate::field::{pointer_sentinel, ParticleField, Viewport};
use crate::host::{FrameHandle, Host, HostEvent, QueuedHost, Subscription};
use crate::params::FieldParams;
use crate::renderer::{render_frame, FrameStats};
use crate::surface::Surface;
use crate::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Running,
    Terminated,
}

pub struct LifecycleController<H: Host> {
    host: H,
    params: FieldParams,
    theme: Theme,
    state: LifecycleState,
    field: Option<ParticleField>,
    pointer: Vec2,
    pending_frame: Option<FrameHandle>,
    subscriptions: Vec<Subscription>,
    rng: Pcg64,
    last_stats: FrameStats,
    frames_rendered: u64,
}

impl<H: Host> LifecycleController<H> {
    pub fn new(host: H, params: FieldParams, theme: Theme) -> Self {
        let rng = match params.seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_entropy(),
        };

        Self {
            host,
            params,
            theme,
            state: LifecycleState::Uninitialized,
            field: None,
            pointer: pointer_sentinel(),
            pending_frame: None,
            subscriptions: Vec::new(),
            rng,
            last_stats: FrameStats::default(),
            frames_rendered: 0,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    // Tuning changes take effect on the next frame; a new particle count
    // needs `reinitialize`
    pub fn params_mut(&mut self) -> &mut FieldParams {
        &mut self.params
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    // Uninitialized -> Running
    pub fn start(&mut self) {
        match self.state {
            LifecycleState::Running => {
                debug!("start ignored, field already running");
            }
            LifecycleState::Terminated => {
                warn!("start ignored, controller was terminated");
            }
            LifecycleState::Uninitialized => self.enter_running(),
        }
    }

    // Running -> Terminated. Safe to call any number of times.
    pub fn terminate(&mut self) {
        if self.state == LifecycleState::Terminated {
            return;
        }

        self.teardown();
        self.field = None;
        self.state = LifecycleState::Terminated;
        info!("particle field terminated after {} frames", self.frames_rendered);
    }

    // A theme change rebuilds the whole field rather than recolouring it
    pub fn set_theme(&mut self, theme: Theme) {
        if theme == self.theme {
            return;
        }

        self.theme = theme;
        if self.state == LifecycleState::Running {
            info!("theme changed to {}, restarting field", theme);
            self.teardown();
            self.state = LifecycleState::Uninitialized;
            self.enter_running();
        }
    }

    pub fn on_pointer_move(&mut self, position: Vec2) {
        if self.state == LifecycleState::Running {
            self.pointer = position;
        }
    }

    // The previous particles are discarded, not resampled
    pub fn on_resize(&mut self, viewport: Viewport) {
        if self.state != LifecycleState::Running {
            return;
        }

        if viewport.is_degenerate() {
            warn!(
                "viewport resized to {}x{}, particles collapse onto its edge",
                viewport.width, viewport.height
            );
        } else {
            debug!("viewport resized to {}x{}", viewport.width, viewport.height);
        }
        self.field = Some(ParticleField::new(&mut self.rng, viewport, &self.params));
    }

    // Rebuild the field at the host's current viewport, e.g. after the
    // particle count changed
    pub fn reinitialize(&mut self) {
        if self.state != LifecycleState::Running {
            return;
        }

        let viewport = self.host.viewport();
        self.field = Some(ParticleField::new(&mut self.rng, viewport, &self.params));
        debug!("field reinitialised with {} particles", self.params.particle_count);
    }

    // Run one scheduled frame: step, render, schedule the next one.
    // Returns false when the handle is not the outstanding one.
    pub fn frame<S: Surface + ?Sized>(
        &mut self,
        handle: FrameHandle,
        elapsed: Duration,
        surface: Option<&mut S>,
    ) -> bool {
        if self.state != LifecycleState::Running || self.pending_frame != Some(handle) {
            trace!("stale frame {:?} skipped", handle);
            return false;
        }
        self.pending_frame = None;

        if let Some(field) = self.field.as_mut() {
            let scale = self.params.timestep.scale(elapsed);
            field.step(self.pointer, &self.params, scale);
            self.last_stats = render_frame(surface, field, self.theme.palette(), &self.params);
        }
        self.frames_rendered += 1;

        self.pending_frame = Some(self.host.request_frame());
        true
    }

    fn enter_running(&mut self) {
        // Never leave an older loop registered
        self.cancel_pending();

        let viewport = self.host.viewport();
        self.field = Some(ParticleField::new(&mut self.rng, viewport, &self.params));
        self.pointer = pointer_sentinel();

        self.subscriptions.push(self.host.subscribe(HostEvent::PointerMove));
        self.subscriptions.push(self.host.subscribe(HostEvent::Resize));

        self.pending_frame = Some(self.host.request_frame());
        self.state = LifecycleState::Running;

        info!(
            "particle field running: {} particles, {}x{}, {} theme",
            self.params.particle_count, viewport.width, viewport.height, self.theme
        );
    }

    fn teardown(&mut self) {
        self.cancel_pending();
        for subscription in self.subscriptions.drain(..) {
            self.host.unsubscribe(subscription);
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.host.cancel_frame(handle);
        }
    }
}

impl LifecycleController<QueuedHost> {
    // Run the next due frame, if any
    pub fn pump<S: Surface + ?Sized>(&mut self, elapsed: Duration, surface: Option<&mut S>) -> bool {
        match self.host.take_due_frame() {
            Some(handle) => self.frame(handle, elapsed, surface),
            None => false,
        }
    }

    // Forward a pointer position only while the subscription is live
    pub fn dispatch_pointer_move(&mut self, position: Vec2) {
        if self.host.is_subscribed(HostEvent::PointerMove) {
            self.on_pointer_move(position);
        }
    }

    pub fn dispatch_resize(&mut self, viewport: Viewport) {
        self.host.set_viewport(viewport);
        if self.host.is_subscribed(HostEvent::Resize) {
            self.on_resize(viewport);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    const FRAME: Duration = Duration::from_millis(16);

    fn controller() -> LifecycleController<QueuedHost> {
        let params = FieldParams {
            seed: Some(11),
            ..FieldParams::default()
        };
        LifecycleController::new(QueuedHost::new(Viewport::new(800.0, 600.0)), params, Theme::Dark)
    }

    #[test]
    fn start_subscribes_and_schedules_one_frame() {
        let mut c = controller();
        assert_eq!(c.state(), LifecycleState::Uninitialized);
        c.start();

        assert_eq!(c.state(), LifecycleState::Running);
        assert_eq!(c.field().map(|f| f.len()), Some(70));
        assert_eq!(c.host().outstanding_frames(), 1);
        assert_eq!(c.host().active_subscriptions(), 2);
    }

    #[test]
    fn frame_reschedules_exactly_once() {
        let mut c = controller();
        c.start();
        let mut surface = RecordingSurface::new();

        for _ in 0..5 {
            assert!(c.pump(FRAME, Some(&mut surface)));
            assert_eq!(c.host().outstanding_frames(), 1);
        }
        assert_eq!(c.frames_rendered(), 5);
    }

    #[test]
    fn stale_handle_does_nothing() {
        let mut c = controller();
        c.start();
        let stale = c.host_mut().take_due_frame().unwrap();
        assert!(c.frame::<RecordingSurface>(stale, FRAME, None));
        assert!(!c.frame::<RecordingSurface>(stale, FRAME, None));
        assert_eq!(c.frames_rendered(), 1);
    }

    #[test]
    fn theme_change_restarts_with_single_loop() {
        let mut c = controller();
        c.start();
        c.dispatch_pointer_move(vec2(10.0, 10.0));
        c.set_theme(Theme::Light);

        assert_eq!(c.state(), LifecycleState::Running);
        assert_eq!(c.theme(), Theme::Light);
        assert_eq!(c.host().outstanding_frames(), 1);
        assert_eq!(c.host().active_subscriptions(), 2);
        assert_eq!(c.pointer(), pointer_sentinel());
    }

    #[test]
    fn theme_change_before_start_only_records() {
        let mut c = controller();
        c.set_theme(Theme::Light);
        assert_eq!(c.state(), LifecycleState::Uninitialized);
        assert_eq!(c.host().outstanding_frames(), 0);
    }

    #[test]
    fn resize_reallocates_and_keeps_loop() {
        let mut c = controller();
        c.start();
        c.dispatch_resize(Viewport::new(100.0, 50.0));

        let field = c.field().unwrap();
        assert_eq!(field.viewport(), Viewport::new(100.0, 50.0));
        assert_eq!(field.len(), 70);
        assert!(field
            .particles()
            .iter()
            .all(|p| p.position.x < 100.0 && p.position.y < 50.0));
        assert_eq!(c.host().outstanding_frames(), 1);
    }

    #[test]
    fn collapsed_viewport_keeps_count_and_loop() {
        let mut c = controller();
        c.start();
        c.dispatch_resize(Viewport::new(0.0, 0.0));

        let field = c.field().unwrap();
        assert!(field.viewport().is_degenerate());
        assert_eq!(field.len(), 70);
        assert!(field.particles().iter().all(|p| p.position == Vec2::ZERO));

        let mut surface = RecordingSurface::new();
        assert!(c.pump(FRAME, Some(&mut surface)));
        assert_eq!(c.host().outstanding_frames(), 1);
    }

    #[test]
    fn terminated_is_absorbing() {
        let mut c = controller();
        c.start();
        c.terminate();
        c.start();
        c.dispatch_pointer_move(vec2(1.0, 1.0));

        assert_eq!(c.state(), LifecycleState::Terminated);
        assert_eq!(c.host().outstanding_frames(), 0);
        assert_eq!(c.host().active_subscriptions(), 0);
        assert_eq!(c.pointer(), pointer_sentinel());
    }

    #[test]
    fn reinitialize_picks_up_new_count() {
        let mut c = controller();
        c.start();
        c.params_mut().particle_count = 12;
        c.reinitialize();
        assert_eq!(c.field().map(|f| f.len()), Some(12));
    }
}
