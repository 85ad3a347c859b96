//! Timeline orchestration for multiple tweens
//!
//! Entries are placed at millisecond offsets on a shared playhead, so a
//! sequence like "name, then title 300ms later, then tagline" is one object
//! that can be played, reversed or sampled as a whole.

use slotmap::{new_key_type, SlotMap};

use crate::properties::KeyframeProperties;
use crate::tween::{PlayDirection, Tween};

new_key_type! {
    pub struct TimelineEntryId;
}

/// An entry in a timeline
struct TimelineEntry {
    /// Offset in milliseconds from timeline start
    offset_ms: u32,
    /// Endpoints, duration and easing for the entry
    tween: Tween,
}

/// A timeline that orchestrates multiple tweens
pub struct Timeline {
    entries: SlotMap<TimelineEntryId, TimelineEntry>,
    current_time: f32,
    duration_ms: u32,
    direction: PlayDirection,
    playing: bool,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            current_time: 0.0,
            duration_ms: 0,
            direction: PlayDirection::Forward,
            playing: false,
        }
    }

    /// Add a tween to the timeline at a given offset. The tween's own delay
    /// is folded into the offset.
    pub fn add(&mut self, offset_ms: u32, tween: Tween) -> TimelineEntryId {
        let offset_ms = offset_ms + tween.delay_ms();
        let end_time = offset_ms + tween.duration_ms();
        self.duration_ms = self.duration_ms.max(end_time);
        self.entries.insert(TimelineEntry { offset_ms, tween })
    }

    /// Play forward from the current playhead
    pub fn play(&mut self) {
        self.direction = PlayDirection::Forward;
        self.playing = self.current_time < self.duration_ms as f32;
    }

    /// Play backward from the current playhead
    pub fn reverse(&mut self) {
        self.direction = PlayDirection::Reverse;
        self.playing = self.current_time > 0.0;
    }

    /// Restart from the beginning
    pub fn start(&mut self) {
        self.current_time = 0.0;
        self.play();
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Jump to the end and stop
    pub fn complete(&mut self) {
        self.current_time = self.duration_ms as f32;
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Advance the timeline. Returns true while still playing.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if !self.playing {
            return false;
        }

        let dt = dt_ms.max(0.0);
        match self.direction {
            PlayDirection::Forward => {
                self.current_time += dt;
                if self.current_time >= self.duration_ms as f32 {
                    self.current_time = self.duration_ms as f32;
                    self.playing = false;
                }
            }
            PlayDirection::Reverse => {
                self.current_time -= dt;
                if self.current_time <= 0.0 {
                    self.current_time = 0.0;
                    self.playing = false;
                }
            }
        }

        self.playing
    }

    /// Get the current properties for a timeline entry
    pub fn value(&self, id: TimelineEntryId) -> Option<KeyframeProperties> {
        let entry = self.entries.get(id)?;

        let local_time = self.current_time - entry.offset_ms as f32;
        let duration = entry.tween.duration_ms() as f32;

        let progress = if duration <= 0.0 {
            if local_time >= 0.0 && self.current_time > 0.0 {
                1.0
            } else {
                0.0
            }
        } else {
            (local_time / duration).clamp(0.0, 1.0)
        };

        Some(entry.tween.sample_at(progress))
    }

    /// Iterate entry ids
    pub fn entry_ids(&self) -> impl Iterator<Item = TimelineEntryId> + '_ {
        self.entries.keys()
    }

    /// Total duration in milliseconds
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Current playhead in milliseconds
    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;

    fn rise(distance: f32) -> Tween {
        Tween::new(
            KeyframeProperties::default()
                .with_translate_y(distance)
                .with_opacity(0.0),
            KeyframeProperties::default()
                .with_translate_y(0.0)
                .with_opacity(1.0),
            1000,
        )
        .easing(Easing::EaseOutQuint)
    }

    #[test]
    fn test_offsets_extend_duration() {
        let mut timeline = Timeline::new();
        timeline.add(0, rise(100.0));
        timeline.add(300, rise(50.0));
        timeline.add(0, rise(30.0).delay(500));
        assert_eq!(timeline.duration_ms(), 1500);
        assert_eq!(timeline.len(), 3);
    }

    #[test]
    fn test_entries_wait_for_their_offset() {
        let mut timeline = Timeline::new();
        let first = timeline.add(0, rise(100.0));
        let second = timeline.add(300, rise(50.0));
        timeline.start();

        timeline.tick(200.0);
        assert!(timeline.value(first).unwrap().resolved_opacity() > 0.0);
        assert_eq!(timeline.value(second).unwrap().resolved_opacity(), 0.0);

        timeline.tick(2000.0);
        assert!(!timeline.is_playing());
        assert_eq!(timeline.value(second).unwrap().resolved_translate(), (0.0, 0.0));
    }

    #[test]
    fn test_reverse_returns_to_start() {
        let mut timeline = Timeline::new();
        let id = timeline.add(0, rise(100.0));
        timeline.start();
        timeline.tick(500.0);
        timeline.reverse();
        timeline.tick(600.0);
        assert_eq!(timeline.current_time(), 0.0);
        assert_eq!(timeline.value(id).unwrap().translate_y, Some(100.0));
    }

    #[test]
    fn test_complete_jumps_to_end() {
        let mut timeline = Timeline::new();
        let id = timeline.add(250, rise(20.0));
        timeline.complete();
        assert_eq!(timeline.value(id).unwrap().resolved_opacity(), 1.0);
    }
}
