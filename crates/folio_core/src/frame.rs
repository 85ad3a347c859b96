//! Per-frame callback scheduling
//!
//! The host calls [`FrameScheduler::tick`] once per animation frame. Every
//! subscriber runs in subscription order and can be cancelled through the
//! id it was given, so teardown can prove that nothing is left ticking.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle for a frame subscription
    pub struct FrameCallbackId;
}

/// Timing info passed to frame callbacks
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInfo {
    /// Monotonic frame counter, starting at 1 for the first tick
    pub frame: u64,
    /// Time since the scheduler started (ms)
    pub time_ms: f64,
    /// Time since the previous frame (ms)
    pub delta_ms: f32,
}

/// Frame callback function type
pub type FrameCallback = Box<dyn FnMut(&FrameInfo)>;

/// Runs subscribed callbacks once per frame
pub struct FrameScheduler {
    callbacks: SlotMap<FrameCallbackId, FrameCallback>,
    order: Vec<FrameCallbackId>,
    frame: u64,
    time_ms: f64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            callbacks: SlotMap::with_key(),
            order: Vec::new(),
            frame: 0,
            time_ms: 0.0,
        }
    }

    /// Subscribe a callback; it runs after every earlier subscriber
    pub fn subscribe<F>(&mut self, callback: F) -> FrameCallbackId
    where
        F: FnMut(&FrameInfo) + 'static,
    {
        let id = self.callbacks.insert(Box::new(callback));
        self.order.push(id);
        tracing::debug!(?id, active = self.callbacks.len(), "frame subscription added");
        id
    }

    /// Cancel a subscription. Returns false if it was already cancelled.
    pub fn cancel(&mut self, id: FrameCallbackId) -> bool {
        if self.callbacks.remove(id).is_none() {
            return false;
        }
        self.order.retain(|o| *o != id);
        tracing::debug!(?id, active = self.callbacks.len(), "frame subscription cancelled");
        true
    }

    /// Advance one frame and run all subscribers
    pub fn tick(&mut self, delta_ms: f32) -> FrameInfo {
        self.frame += 1;
        self.time_ms += delta_ms.max(0.0) as f64;
        let info = FrameInfo {
            frame: self.frame,
            time_ms: self.time_ms,
            delta_ms: delta_ms.max(0.0),
        };

        for id in &self.order {
            if let Some(callback) = self.callbacks.get_mut(*id) {
                callback(&info);
            }
        }

        info
    }

    /// Number of live subscriptions
    pub fn active_count(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_subscribed(&self, id: FrameCallbackId) -> bool {
        self.callbacks.contains_key(id)
    }

    /// Time since the scheduler started (ms)
    pub fn time_ms(&self) -> f64 {
        self.time_ms
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}
