//! Smooth scrolling
//!
//! [`SmoothScroll`] takes over native scrolling: wheel and touch deltas move a
//! *target* position, and the *published* position chases it once per frame,
//! either along an eased curve of fixed duration or by frame-rate independent
//! damping (`lerp` mode).
//!
//! ```text
//!   wheel/touch ──► target (clamped to 0..=limit)
//!                      │
//!   raf(dt) ───────────┴──► scroll ──► ScrollUpdate (only when it moved)
//! ```

use folio_animation::Easing;
use folio_core::events::{Event, EventData, ScrollSource};

/// Snap distance below which damping settles on the target
const SETTLE_EPSILON: f32 = 0.5;

/// Configuration for the smooth-scroll driver
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothScrollConfig {
    /// Duration of one eased glide toward a new target (ms)
    pub duration_ms: f32,
    /// Curve used in duration mode
    pub easing: Easing,
    /// Damping factor per 60 Hz frame; when set, replaces duration mode
    pub lerp: Option<f32>,
    pub wheel_multiplier: f32,
    pub touch_multiplier: f32,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            duration_ms: 1200.0,
            easing: Easing::ExpoDecay,
            lerp: None,
            wheel_multiplier: 1.0,
            touch_multiplier: 1.0,
        }
    }
}

impl SmoothScrollConfig {
    /// Use damping instead of a fixed duration (builder)
    pub fn lerp(mut self, factor: f32) -> Self {
        self.lerp = Some(factor.clamp(0.0, 1.0));
        self
    }

    /// Set the glide duration (builder)
    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms.max(0.0);
        self
    }

    pub fn wheel_multiplier(mut self, multiplier: f32) -> Self {
        self.wheel_multiplier = multiplier;
        self
    }

    pub fn touch_multiplier(mut self, multiplier: f32) -> Self {
        self.touch_multiplier = multiplier;
        self
    }
}

/// Direction of the most recent movement
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollDirection {
    #[default]
    None,
    Down,
    Up,
}

impl ScrollDirection {
    fn from_delta(delta: f32) -> Self {
        if delta > 0.0 {
            ScrollDirection::Down
        } else if delta < 0.0 {
            ScrollDirection::Up
        } else {
            ScrollDirection::None
        }
    }

    /// `1`, `-1` or `0`
    pub fn sign(&self) -> i8 {
        match self {
            ScrollDirection::None => 0,
            ScrollDirection::Down => 1,
            ScrollDirection::Up => -1,
        }
    }
}

/// Published scroll state
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollUpdate {
    pub scroll: f32,
    pub limit: f32,
    /// Movement since the previous frame (px)
    pub velocity: f32,
    pub direction: ScrollDirection,
    /// `scroll / limit`, or 1.0 when nothing can scroll
    pub progress: f32,
}

/// Eased scroll driver
#[derive(Clone, Debug)]
pub struct SmoothScroll {
    config: SmoothScrollConfig,
    scroll: f32,
    target: f32,
    /// Start of the current glide in duration mode
    glide_from: f32,
    glide_elapsed_ms: f32,
    animating: bool,
    limit: f32,
    velocity: f32,
    direction: ScrollDirection,
    /// Publish on the next frame even without movement
    dirty: bool,
    stopped: bool,
    native_scroll: bool,
}

impl SmoothScroll {
    /// Take over scrolling of a document
    pub fn new(config: SmoothScrollConfig, viewport_height: f32, content_height: f32) -> Self {
        let limit = (content_height - viewport_height).max(0.0);
        tracing::debug!(limit, "smooth scroll attached");
        Self {
            config,
            scroll: 0.0,
            target: 0.0,
            glide_from: 0.0,
            glide_elapsed_ms: 0.0,
            animating: false,
            limit,
            velocity: 0.0,
            direction: ScrollDirection::None,
            dirty: true,
            stopped: false,
            native_scroll: false,
        }
    }

    pub fn config(&self) -> &SmoothScrollConfig {
        &self.config
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Feed a wheel delta (px, positive scrolls down)
    pub fn on_wheel(&mut self, delta_y: f32) {
        let delta = delta_y * self.config.wheel_multiplier;
        self.push_target(delta);
    }

    /// Feed a touch-drag delta (px, positive scrolls down)
    pub fn on_touch(&mut self, delta_y: f32) {
        let delta = delta_y * self.config.touch_multiplier;
        self.push_target(delta);
    }

    /// Route a scroll event. Returns true if it was consumed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event.data {
            EventData::Scroll {
                delta_y,
                source: ScrollSource::Wheel,
                ..
            } => self.on_wheel(delta_y),
            EventData::Scroll {
                delta_y,
                source: ScrollSource::Touch,
                ..
            } => self.on_touch(delta_y),
            _ => return false,
        }
        self.accepts_input()
    }

    fn accepts_input(&self) -> bool {
        !self.stopped && !self.native_scroll
    }

    fn push_target(&mut self, delta: f32) {
        if !self.accepts_input() || delta == 0.0 {
            return;
        }
        let target = self.target + delta;
        self.glide_to(target);
    }

    fn glide_to(&mut self, target: f32) {
        let target = target.clamp(0.0, self.limit);
        if target == self.target && self.animating {
            return;
        }
        self.target = target;
        self.glide_from = self.scroll;
        self.glide_elapsed_ms = 0.0;
        self.animating = self.target != self.scroll;
        tracing::trace!(target = self.target, from = self.scroll, "scroll target");
    }

    /// Scroll to an absolute position, either gliding or jumping
    pub fn scroll_to(&mut self, target: f32, immediate: bool) {
        if self.native_scroll {
            return;
        }
        if immediate {
            let target = target.clamp(0.0, self.limit);
            self.direction = ScrollDirection::from_delta(target - self.scroll);
            self.velocity = 0.0;
            self.scroll = target;
            self.target = target;
            self.animating = false;
            self.dirty = true;
        } else {
            self.glide_to(target);
        }
    }

    /// Recompute the scroll limit after the viewport or content changed
    pub fn resize(&mut self, viewport_height: f32, content_height: f32) {
        self.limit = (content_height - viewport_height).max(0.0);
        if self.scroll > self.limit {
            self.scroll = self.limit;
        }
        let target = self.target.clamp(0.0, self.limit);
        if target != self.target {
            // Restart the glide from the current position
            self.target = target;
            self.glide_from = self.scroll;
            self.glide_elapsed_ms = 0.0;
        }
        self.animating = self.scroll != self.target;
        self.dirty = true;
        tracing::debug!(limit = self.limit, "smooth scroll resized");
    }

    /// Ignore input until [`start`](Self::start)
    pub fn stop(&mut self) {
        self.stopped = true;
        self.animating = false;
        self.target = self.scroll;
    }

    pub fn start(&mut self) {
        self.stopped = false;
    }

    /// Give scrolling back to the host
    pub fn destroy(&mut self) {
        self.native_scroll = true;
        self.animating = false;
        self.velocity = 0.0;
        self.target = self.scroll;
        tracing::debug!("smooth scroll destroyed, native scrolling restored");
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Advance one animation frame. Returns the published state when the
    /// position changed (or a resize/jump is pending).
    pub fn raf(&mut self, dt_ms: f32) -> Option<ScrollUpdate> {
        if self.native_scroll {
            return None;
        }

        let previous = self.scroll;
        if self.animating {
            let dt_ms = dt_ms.max(0.0);
            match self.config.lerp {
                Some(lerp) => {
                    let factor = 1.0 - (-lerp * 60.0 * dt_ms / 1000.0).exp();
                    self.scroll += (self.target - self.scroll) * factor;
                    if (self.target - self.scroll).abs() < SETTLE_EPSILON {
                        self.scroll = self.target;
                    }
                }
                None => {
                    self.glide_elapsed_ms += dt_ms;
                    let t = if self.config.duration_ms <= 0.0 {
                        1.0
                    } else {
                        (self.glide_elapsed_ms / self.config.duration_ms).min(1.0)
                    };
                    let eased = self.config.easing.apply(t);
                    self.scroll = self.glide_from + (self.target - self.glide_from) * eased;
                    if t >= 1.0 {
                        self.scroll = self.target;
                    }
                }
            }
            if self.scroll == self.target {
                self.animating = false;
            }
        }

        let moved = self.scroll - previous;
        self.velocity = moved;
        if moved != 0.0 {
            self.direction = ScrollDirection::from_delta(moved);
        }

        if moved == 0.0 && !self.dirty {
            return None;
        }
        self.dirty = false;
        let update = self.state();
        tracing::trace!(scroll = update.scroll, velocity = update.velocity, "scroll frame");
        Some(update)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Snapshot of the current published state
    pub fn state(&self) -> ScrollUpdate {
        ScrollUpdate {
            scroll: self.scroll,
            limit: self.limit,
            velocity: self.velocity,
            direction: self.direction,
            progress: self.progress(),
        }
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn limit(&self) -> f32 {
        self.limit
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    pub fn progress(&self) -> f32 {
        if self.limit <= 0.0 {
            1.0
        } else {
            (self.scroll / self.limit).clamp(0.0, 1.0)
        }
    }

    /// True while gliding toward the target
    pub fn is_scrolling(&self) -> bool {
        self.animating
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn native_scroll_enabled(&self) -> bool {
        self.native_scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> SmoothScroll {
        SmoothScroll::new(SmoothScrollConfig::default(), 800.0, 3000.0)
    }

    fn run(scroll: &mut SmoothScroll, frames: usize) -> Vec<ScrollUpdate> {
        (0..frames).filter_map(|_| scroll.raf(16.0)).collect()
    }

    #[test]
    fn test_resize_mid_glide_never_jumps_back() {
        let mut s = driver();
        s.raf(16.0);
        s.on_wheel(2200.0);
        run(&mut s, 5);
        let before = s.scroll();
        assert!(before > 0.0 && before < 1000.0);

        s.resize(800.0, 1800.0);
        assert_eq!(s.limit(), 1000.0);
        let mut last = before;
        for update in run(&mut s, 120) {
            assert!(update.scroll >= last);
            last = update.scroll;
        }
        assert_eq!(s.scroll(), 1000.0);
    }

    #[test]
    fn test_limit_from_content() {
        let s = driver();
        assert_eq!(s.limit(), 2200.0);
        assert!(!s.native_scroll_enabled());
        let empty = SmoothScroll::new(SmoothScrollConfig::default(), 800.0, 400.0);
        assert_eq!(empty.limit(), 0.0);
        assert_eq!(empty.progress(), 1.0);
    }

    #[test]
    fn test_wheel_glides_to_target() {
        let mut s = driver();
        s.raf(16.0);
        s.on_wheel(300.0);
        assert_eq!(s.target(), 300.0);

        let updates = run(&mut s, 10);
        assert!(!updates.is_empty());
        assert!(s.scroll() > 0.0 && s.scroll() < 300.0);
        assert!(updates.iter().all(|u| u.direction == ScrollDirection::Down));

        // 1.2s at 16ms frames
        run(&mut s, 80);
        assert_eq!(s.scroll(), 300.0);
        assert!(!s.is_scrolling());
        assert!(s.raf(16.0).is_none());
    }

    #[test]
    fn test_target_clamped() {
        let mut s = driver();
        s.on_wheel(-500.0);
        assert_eq!(s.target(), 0.0);
        s.on_wheel(10_000.0);
        assert_eq!(s.target(), 2200.0);
        run(&mut s, 100);
        assert_eq!(s.scroll(), 2200.0);
        assert_eq!(s.progress(), 1.0);
    }

    #[test]
    fn test_multipliers() {
        let config = SmoothScrollConfig::default()
            .wheel_multiplier(2.0)
            .touch_multiplier(0.5);
        let mut s = SmoothScroll::new(config, 800.0, 3000.0);
        s.on_wheel(100.0);
        assert_eq!(s.target(), 200.0);
        s.on_touch(100.0);
        assert_eq!(s.target(), 250.0);
    }

    #[test]
    fn test_lerp_mode_converges() {
        let mut s = SmoothScroll::new(SmoothScrollConfig::default().lerp(0.1), 800.0, 3000.0);
        s.on_wheel(400.0);
        s.raf(1000.0 / 60.0);
        // 400 * (1 - e^-0.1)
        assert!((s.scroll() - 38.065).abs() < 0.01);
        run(&mut s, 200);
        assert_eq!(s.scroll(), 400.0);
    }

    #[test]
    fn test_scroll_to_immediate_publishes_once() {
        let mut s = driver();
        s.raf(16.0);
        s.scroll_to(1000.0, true);
        assert_eq!(s.scroll(), 1000.0);
        let update = s.raf(16.0).unwrap();
        assert_eq!(update.scroll, 1000.0);
        assert!((update.progress - 1000.0 / 2200.0).abs() < 1e-6);
        assert!(s.raf(16.0).is_none());
    }

    #[test]
    fn test_resize_reclamps() {
        let mut s = driver();
        s.scroll_to(2000.0, true);
        s.resize(800.0, 1800.0);
        assert_eq!(s.limit(), 1000.0);
        assert_eq!(s.scroll(), 1000.0);
        assert_eq!(s.target(), 1000.0);
    }

    #[test]
    fn test_destroy_restores_native() {
        let mut s = driver();
        s.on_wheel(200.0);
        s.destroy();
        assert!(s.native_scroll_enabled());
        assert!(s.raf(16.0).is_none());
        s.on_wheel(200.0);
        assert_eq!(s.target(), s.scroll());
        assert!(!s.handle_event(&Event::wheel(0.0, 50.0)));
    }

    #[test]
    fn test_stop_ignores_input() {
        let mut s = driver();
        s.stop();
        s.on_wheel(100.0);
        assert_eq!(s.target(), 0.0);
        s.start();
        s.on_wheel(100.0);
        assert_eq!(s.target(), 100.0);
    }
}
