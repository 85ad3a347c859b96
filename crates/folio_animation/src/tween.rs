//! Reversible property tweens
//!
//! A [`Tween`] animates a property set from a start state to a rest state.
//! The playhead can run forward or backward from wherever it currently is,
//! which is what makes enter/leave toggling converge: however often a tween
//! is played and reversed, it only ever settles on one of its two endpoints.

use crate::easing::Easing;
use crate::properties::KeyframeProperties;

/// Playback direction of the playhead
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayDirection {
    #[default]
    Forward,
    Reverse,
}

/// A two-endpoint, time-based animation
#[derive(Clone, Debug)]
pub struct Tween {
    from: KeyframeProperties,
    to: KeyframeProperties,
    duration_ms: u32,
    delay_ms: u32,
    easing: Easing,
    /// Linear playhead position, `0.0..=1.0`
    position: f32,
    /// Remaining delay before the playhead starts moving forward
    delay_remaining_ms: f32,
    direction: PlayDirection,
    playing: bool,
}

impl Tween {
    /// Create a tween between two property sets
    pub fn new(from: KeyframeProperties, to: KeyframeProperties, duration_ms: u32) -> Self {
        Self {
            from,
            to,
            duration_ms,
            delay_ms: 0,
            easing: Easing::Linear,
            position: 0.0,
            delay_remaining_ms: 0.0,
            direction: PlayDirection::Forward,
            playing: false,
        }
    }

    /// Set easing (builder)
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set delay before forward playback from the start (builder)
    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    // =========================================================================
    // Playback control
    // =========================================================================

    /// Play forward from the current playhead. Starting from the beginning
    /// honours the delay.
    pub fn play(&mut self) {
        if self.is_at_start() && !(self.playing && self.direction == PlayDirection::Forward) {
            self.delay_remaining_ms = self.delay_ms as f32;
        }
        self.direction = PlayDirection::Forward;
        self.playing = !self.is_at_end();
    }

    /// Play backward from the current playhead toward the start state
    pub fn reverse(&mut self) {
        self.direction = PlayDirection::Reverse;
        self.delay_remaining_ms = 0.0;
        self.playing = !self.is_at_start();
    }

    /// Freeze the playhead
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Continue in the current direction
    pub fn resume(&mut self) {
        match self.direction {
            PlayDirection::Forward => self.playing = !self.is_at_end(),
            PlayDirection::Reverse => self.playing = !self.is_at_start(),
        }
    }

    /// Jump to the start and play forward again
    pub fn restart(&mut self) {
        self.position = 0.0;
        self.playing = false;
        self.play();
    }

    /// Jump to the start state and stop
    pub fn reset(&mut self) {
        self.position = 0.0;
        self.delay_remaining_ms = 0.0;
        self.direction = PlayDirection::Forward;
        self.playing = false;
    }

    /// Jump to the rest state and stop
    pub fn complete(&mut self) {
        self.position = 1.0;
        self.delay_remaining_ms = 0.0;
        self.direction = PlayDirection::Forward;
        self.playing = false;
    }

    /// Swap both endpoints; the playhead and direction are kept
    pub fn set_endpoints(&mut self, from: KeyframeProperties, to: KeyframeProperties) {
        self.from = from;
        self.to = to;
    }

    /// Place the playhead at a progress value without playing (scrubbing)
    pub fn seek_progress(&mut self, progress: f32) {
        self.position = progress.clamp(0.0, 1.0);
        self.playing = false;
    }

    /// Advance the playhead by delta time (in milliseconds).
    /// Returns true while the tween is still playing.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if !self.playing {
            return false;
        }

        let mut dt = dt_ms.max(0.0);
        if self.direction == PlayDirection::Forward && self.delay_remaining_ms > 0.0 {
            let consumed = dt.min(self.delay_remaining_ms);
            self.delay_remaining_ms -= consumed;
            dt -= consumed;
        }

        if self.direction == PlayDirection::Forward && self.delay_remaining_ms > 0.0 {
            return true;
        }

        // Zero-length tweens jump straight to their endpoint
        let step = if self.duration_ms == 0 {
            1.0
        } else {
            dt / self.duration_ms as f32
        };
        match self.direction {
            PlayDirection::Forward => {
                self.position = (self.position + step).min(1.0);
                if self.is_at_end() {
                    self.playing = false;
                }
            }
            PlayDirection::Reverse => {
                self.position = (self.position - step).max(0.0);
                if self.is_at_start() {
                    self.playing = false;
                }
            }
        }

        self.playing
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn direction(&self) -> PlayDirection {
        self.direction
    }

    /// Linear progress of the playhead (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        self.position
    }

    fn is_at_start(&self) -> bool {
        self.position <= 0.0
    }

    fn is_at_end(&self) -> bool {
        self.position >= 1.0
    }

    /// Get the current interpolated properties
    pub fn current_properties(&self) -> KeyframeProperties {
        self.sample_at(self.progress())
    }

    /// Sample the tween at a specific linear progress (0.0 to 1.0)
    pub fn sample_at(&self, progress: f32) -> KeyframeProperties {
        let eased = self.easing.apply(progress.clamp(0.0, 1.0));
        self.from.lerp(&self.to, eased)
    }

    pub fn from_properties(&self) -> &KeyframeProperties {
        &self.from
    }

    pub fn to_properties(&self) -> &KeyframeProperties {
        &self.to
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Total duration including delay
    pub fn total_duration_ms(&self) -> u32 {
        self.delay_ms + self.duration_ms
    }

    pub fn easing_fn(&self) -> Easing {
        self.easing
    }
}
