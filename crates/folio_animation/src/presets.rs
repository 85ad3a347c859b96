//! Animation presets for common entrance and scroll-linked effects
//!
//! Each preset returns a [`Tween`] from an offset/hidden state to the
//! element's resting state, ready to be played, reversed or scrubbed.

use crate::easing::Easing;
use crate::properties::KeyframeProperties;
use crate::tween::Tween;

/// Direction for slide animations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideDirection {
    Left,
    Right,
    Top,
    Bottom,
}

/// Pre-built animation presets
pub struct AnimationPreset;

impl AnimationPreset {
    // ========================================================================
    // Fades
    // ========================================================================

    /// Fade in from transparent to opaque
    pub fn fade_in(duration_ms: u32) -> Tween {
        Tween::new(
            KeyframeProperties::opacity(0.0),
            KeyframeProperties::opacity(1.0),
            duration_ms,
        )
        .easing(Easing::EaseOutCubic)
    }

    /// Fade while rising `distance` pixels into place
    pub fn fade_up(duration_ms: u32, distance: f32) -> Tween {
        Tween::new(
            KeyframeProperties::default()
                .with_translate_y(distance)
                .with_opacity(0.0),
            KeyframeProperties::default()
                .with_translate_y(0.0)
                .with_opacity(1.0),
            duration_ms,
        )
        .easing(Easing::EaseOutQuint)
    }

    /// Fade, rise and un-blur (word reveals)
    pub fn blur_rise(duration_ms: u32, distance: f32, blur: f32) -> Tween {
        Tween::new(
            KeyframeProperties::default()
                .with_opacity(0.0)
                .with_translate_y(distance)
                .with_blur(blur),
            KeyframeProperties::default()
                .with_opacity(1.0)
                .with_translate_y(0.0)
                .with_blur(0.0),
            duration_ms,
        )
        .easing(Easing::CubicBezier(0.25, 0.4, 0.25, 1.0))
    }

    // ========================================================================
    // Slides
    // ========================================================================

    /// Slide in from a direction with fade
    pub fn slide_in(duration_ms: u32, direction: SlideDirection, distance: f32) -> Tween {
        let (x, y) = match direction {
            SlideDirection::Left => (-distance, 0.0),
            SlideDirection::Right => (distance, 0.0),
            SlideDirection::Top => (0.0, -distance),
            SlideDirection::Bottom => (0.0, distance),
        };
        Tween::new(
            KeyframeProperties::translate(x, y).with_opacity(0.0),
            KeyframeProperties::translate(0.0, 0.0).with_opacity(1.0),
            duration_ms,
        )
        .easing(Easing::EaseOutQuart)
    }

    // ========================================================================
    // Scroll-linked (scrubbed) presets; durations are nominal
    // ========================================================================

    /// Parallax drift: moves `distance` pixels on Y across the scroll range
    pub fn parallax_y(distance: f32) -> Tween {
        Tween::new(
            KeyframeProperties::default().with_translate_y(0.0),
            KeyframeProperties::default().with_translate_y(distance),
            1000,
        )
    }

    /// Fade out and sink as the element scrolls away
    pub fn scroll_fade_out(distance: f32) -> Tween {
        Tween::new(
            KeyframeProperties::default()
                .with_opacity(1.0)
                .with_translate_y(0.0),
            KeyframeProperties::default()
                .with_opacity(0.0)
                .with_translate_y(distance),
            1000,
        )
    }

    /// Background-position sweep across a gradient band
    pub fn gradient_sweep(from_percent: f32, to_percent: f32) -> Tween {
        Tween::new(
            KeyframeProperties::default().with_background_position_x(from_percent),
            KeyframeProperties::default().with_background_position_x(to_percent),
            1000,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_up_animation() {
        let mut anim = AnimationPreset::fade_up(1000, 100.0);
        anim.play();

        let props = anim.current_properties();
        assert!((props.resolved_opacity() - 0.0).abs() < 0.01);
        assert_eq!(props.resolved_translate(), (0.0, 100.0));

        anim.tick(1000.0);
        let props = anim.current_properties();
        assert!((props.resolved_opacity() - 1.0).abs() < 0.01);
        assert_eq!(props.resolved_translate(), (0.0, 0.0));
    }

    #[test]
    fn test_slide_in_left_animation() {
        let mut anim = AnimationPreset::slide_in(800, SlideDirection::Left, 80.0);
        anim.play();

        let (tx, ty) = anim.current_properties().resolved_translate();
        assert!((tx - (-80.0)).abs() < 0.01);
        assert!(ty.abs() < 0.01);

        anim.tick(800.0);
        let (tx, _) = anim.current_properties().resolved_translate();
        assert!(tx.abs() < 0.01);
    }

    #[test]
    fn test_blur_rise_clears_blur() {
        let mut anim = AnimationPreset::blur_rise(500, 20.0, 10.0);
        assert_eq!(anim.current_properties().resolved_blur(), 10.0);
        anim.complete();
        assert_eq!(anim.current_properties().resolved_blur(), 0.0);
    }

    #[test]
    fn test_gradient_sweep_is_linear() {
        let mut anim = AnimationPreset::gradient_sweep(0.0, 100.0);
        anim.seek_progress(0.4);
        let x = anim.current_properties().background_position_x.unwrap();
        assert!((x - 40.0).abs() < 1e-4);
    }
}
