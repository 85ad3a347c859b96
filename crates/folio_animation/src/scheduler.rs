//! Animation scheduler
//!
//! Owns every live tween and timeline and advances them each frame.

use slotmap::{new_key_type, SlotMap};

use crate::timeline::Timeline;
use crate::tween::Tween;

new_key_type! {
    pub struct TweenId;
    pub struct TimelineId;
}

/// The animation scheduler that ticks all active animations
pub struct AnimationScheduler {
    tweens: SlotMap<TweenId, Tween>,
    timelines: SlotMap<TimelineId, Timeline>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            tweens: SlotMap::with_key(),
            timelines: SlotMap::with_key(),
        }
    }

    pub fn add_tween(&mut self, tween: Tween) -> TweenId {
        self.tweens.insert(tween)
    }

    pub fn get_tween(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(id)
    }

    pub fn get_tween_mut(&mut self, id: TweenId) -> Option<&mut Tween> {
        self.tweens.get_mut(id)
    }

    /// Run a closure against a tween, if it still exists
    pub fn with_tween_mut<R>(&mut self, id: TweenId, f: impl FnOnce(&mut Tween) -> R) -> Option<R> {
        self.tweens.get_mut(id).map(f)
    }

    pub fn remove_tween(&mut self, id: TweenId) -> Option<Tween> {
        self.tweens.remove(id)
    }

    pub fn add_timeline(&mut self, timeline: Timeline) -> TimelineId {
        self.timelines.insert(timeline)
    }

    pub fn get_timeline(&self, id: TimelineId) -> Option<&Timeline> {
        self.timelines.get(id)
    }

    pub fn get_timeline_mut(&mut self, id: TimelineId) -> Option<&mut Timeline> {
        self.timelines.get_mut(id)
    }

    pub fn remove_timeline(&mut self, id: TimelineId) -> Option<Timeline> {
        self.timelines.remove(id)
    }

    /// Tick all animations by `dt_ms` milliseconds.
    /// Returns true if anything is still playing afterwards.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        let mut active = false;
        for (_, tween) in self.tweens.iter_mut() {
            active |= tween.tick(dt_ms);
        }
        for (_, timeline) in self.timelines.iter_mut() {
            active |= timeline.tick(dt_ms);
        }
        active
    }

    /// Check if any animations are still playing
    pub fn has_active_animations(&self) -> bool {
        self.tweens.values().any(|t| t.is_playing())
            || self.timelines.values().any(|t| t.is_playing())
    }

    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }

    pub fn timeline_count(&self) -> usize {
        self.timelines.len()
    }

    /// Drop every animation
    pub fn clear(&mut self) {
        tracing::debug!(
            tweens = self.tweens.len(),
            timelines = self.timelines.len(),
            "clearing animation scheduler"
        );
        self.tweens.clear();
        self.timelines.clear();
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::KeyframeProperties;

    fn fade(duration_ms: u32) -> Tween {
        Tween::new(
            KeyframeProperties::opacity(0.0),
            KeyframeProperties::opacity(1.0),
            duration_ms,
        )
    }

    #[test]
    fn test_tick_advances_everything() {
        let mut scheduler = AnimationScheduler::new();
        let tween = scheduler.add_tween(fade(100));
        let mut timeline = Timeline::new();
        timeline.add(0, fade(200));
        let timeline = scheduler.add_timeline(timeline);

        scheduler.with_tween_mut(tween, |t| t.play());
        scheduler.get_timeline_mut(timeline).unwrap().start();
        assert!(scheduler.has_active_animations());

        assert!(scheduler.tick(100.0));
        assert!(!scheduler.get_tween(tween).unwrap().is_playing());
        assert!(!scheduler.tick(100.0));
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut scheduler = AnimationScheduler::new();
        let a = scheduler.add_tween(fade(100));
        scheduler.add_tween(fade(100));
        assert!(scheduler.remove_tween(a).is_some());
        assert!(scheduler.with_tween_mut(a, |t| t.play()).is_none());
        assert_eq!(scheduler.tween_count(), 1);
        scheduler.clear();
        assert_eq!(scheduler.tween_count(), 0);
        assert_eq!(scheduler.timeline_count(), 0);
    }
}
