/*
 * Host Module
 *
 * The boundary between the engine and whatever embeds it. A host hands out
 * frame handles, lets them be cancelled, and manages event subscriptions.
 * QueuedHost keeps requested frames in a queue until the embedding loop
 * pumps them, which is how both the nannou app and the tests drive the engine.
 */

use std::collections::VecDeque;

use crate::field::Viewport;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostEvent {
    PointerMove,
    Resize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    id: u64,
    pub event: HostEvent,
}

pub trait Host {
    fn viewport(&self) -> Viewport;
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
    fn subscribe(&mut self, event: HostEvent) -> Subscription;
    fn unsubscribe(&mut self, subscription: Subscription);
}

#[derive(Debug, Default)]
pub struct QueuedHost {
    viewport: Viewport,
    next_id: u64,
    scheduled: VecDeque<FrameHandle>,
    subscriptions: Vec<Subscription>,
}

impl QueuedHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    // Oldest frame request that has not been cancelled
    pub fn take_due_frame(&mut self) -> Option<FrameHandle> {
        self.scheduled.pop_front()
    }

    pub fn outstanding_frames(&self) -> usize {
        self.scheduled.len()
    }

    pub fn is_subscribed(&self, event: HostEvent) -> bool {
        self.subscriptions.iter().any(|s| s.event == event)
    }

    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.len()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Host for QueuedHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.scheduled.push_back(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.scheduled.retain(|h| *h != handle);
    }

    fn subscribe(&mut self, event: HostEvent) -> Subscription {
        let subscription = Subscription {
            id: self.next_id(),
            event,
        };
        self.subscriptions.push(subscription);
        subscription
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        self.subscriptions.retain(|s| s.id != subscription.id);
    }
}
