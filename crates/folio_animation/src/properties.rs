//! Animatable visual properties
//!
//! A property set only carries the properties an animation touches; unset
//! properties stay `None` so that two animations targeting different
//! properties of the same element can be merged without clobbering.

/// Properties that can be animated on an element
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KeyframeProperties {
    /// Opacity (0.0 to 1.0)
    pub opacity: Option<f32>,
    /// Translation X in pixels
    pub translate_x: Option<f32>,
    /// Translation Y in pixels
    pub translate_y: Option<f32>,
    /// Rotation in degrees (Z-axis)
    pub rotate: Option<f32>,
    /// Rotation X in degrees (3D tilt)
    pub rotate_x: Option<f32>,
    /// Rotation Y in degrees (3D turn)
    pub rotate_y: Option<f32>,
    /// Uniform scale factor
    pub scale: Option<f32>,
    /// Gaussian blur radius in pixels
    pub blur: Option<f32>,
    /// Background position X in percent (gradient sweeps)
    pub background_position_x: Option<f32>,
}

impl KeyframeProperties {
    /// Create properties with only opacity set
    pub fn opacity(value: f32) -> Self {
        Self {
            opacity: Some(value),
            ..Default::default()
        }
    }

    /// Create properties with translation
    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            translate_x: Some(x),
            translate_y: Some(y),
            ..Default::default()
        }
    }

    /// Builder: set opacity
    pub fn with_opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    /// Builder: set translation
    pub fn with_translate(mut self, x: f32, y: f32) -> Self {
        self.translate_x = Some(x);
        self.translate_y = Some(y);
        self
    }

    /// Builder: set X translation
    pub fn with_translate_x(mut self, px: f32) -> Self {
        self.translate_x = Some(px);
        self
    }

    /// Builder: set Y translation
    pub fn with_translate_y(mut self, px: f32) -> Self {
        self.translate_y = Some(px);
        self
    }

    /// Builder: set rotation
    pub fn with_rotate(mut self, degrees: f32) -> Self {
        self.rotate = Some(degrees);
        self
    }

    /// Builder: set X rotation (3D tilt)
    pub fn with_rotate_x(mut self, degrees: f32) -> Self {
        self.rotate_x = Some(degrees);
        self
    }

    /// Builder: set Y rotation (3D turn)
    pub fn with_rotate_y(mut self, degrees: f32) -> Self {
        self.rotate_y = Some(degrees);
        self
    }

    /// Builder: set uniform scale
    pub fn with_scale(mut self, value: f32) -> Self {
        self.scale = Some(value);
        self
    }

    /// Builder: set blur radius
    pub fn with_blur(mut self, px: f32) -> Self {
        self.blur = Some(px);
        self
    }

    /// Builder: set background position X
    pub fn with_background_position_x(mut self, percent: f32) -> Self {
        self.background_position_x = Some(percent);
        self
    }

    /// True if no property is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Interpolate between two property sets
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            opacity: lerp_opt(self.opacity, other.opacity, t),
            translate_x: lerp_opt(self.translate_x, other.translate_x, t),
            translate_y: lerp_opt(self.translate_y, other.translate_y, t),
            rotate: lerp_opt(self.rotate, other.rotate, t),
            rotate_x: lerp_opt(self.rotate_x, other.rotate_x, t),
            rotate_y: lerp_opt(self.rotate_y, other.rotate_y, t),
            scale: lerp_opt(self.scale, other.scale, t),
            blur: lerp_opt(self.blur, other.blur, t),
            background_position_x: lerp_opt(
                self.background_position_x,
                other.background_position_x,
                t,
            ),
        }
    }

    /// Overlay `other` on top of `self`: properties set in `other` win
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            opacity: other.opacity.or(self.opacity),
            translate_x: other.translate_x.or(self.translate_x),
            translate_y: other.translate_y.or(self.translate_y),
            rotate: other.rotate.or(self.rotate),
            rotate_x: other.rotate_x.or(self.rotate_x),
            rotate_y: other.rotate_y.or(self.rotate_y),
            scale: other.scale.or(self.scale),
            blur: other.blur.or(self.blur),
            background_position_x: other.background_position_x.or(self.background_position_x),
        }
    }

    /// Get opacity, defaulting to 1.0
    pub fn resolved_opacity(&self) -> f32 {
        self.opacity.unwrap_or(1.0)
    }

    /// Get translation, defaulting to (0.0, 0.0)
    pub fn resolved_translate(&self) -> (f32, f32) {
        (
            self.translate_x.unwrap_or(0.0),
            self.translate_y.unwrap_or(0.0),
        )
    }

    /// Get rotation, defaulting to 0.0
    pub fn resolved_rotate(&self) -> f32 {
        self.rotate.unwrap_or(0.0)
    }

    /// Get 3D rotation (x, y), defaulting to (0.0, 0.0)
    pub fn resolved_rotate_3d(&self) -> (f32, f32) {
        (self.rotate_x.unwrap_or(0.0), self.rotate_y.unwrap_or(0.0))
    }

    /// Get scale, defaulting to 1.0
    pub fn resolved_scale(&self) -> f32 {
        self.scale.unwrap_or(1.0)
    }

    /// Get blur, defaulting to 0.0
    pub fn resolved_blur(&self) -> f32 {
        self.blur.unwrap_or(0.0)
    }
}

/// Interpolate optional values. A value present on only one side is held.
fn lerp_opt(a: Option<f32>, b: Option<f32>, t: f32) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + (b - a) * t),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_midpoint() {
        let from = KeyframeProperties::translate(0.0, 60.0).with_opacity(0.0);
        let to = KeyframeProperties::translate(0.0, 0.0).with_opacity(1.0);
        let mid = from.lerp(&to, 0.5);
        assert_eq!(mid.resolved_translate(), (0.0, 30.0));
        assert!((mid.resolved_opacity() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_lerp_holds_one_sided_values() {
        let from = KeyframeProperties::opacity(0.0).with_blur(10.0);
        let to = KeyframeProperties::opacity(1.0);
        let mid = from.lerp(&to, 0.5);
        assert_eq!(mid.blur, Some(10.0));
    }

    #[test]
    fn test_merge_prefers_overlay() {
        let base = KeyframeProperties::opacity(0.5).with_translate_y(10.0);
        let overlay = KeyframeProperties::default().with_translate_y(-20.0).with_rotate(2.0);
        let merged = base.merge(&overlay);
        assert_eq!(merged.opacity, Some(0.5));
        assert_eq!(merged.translate_y, Some(-20.0));
        assert_eq!(merged.rotate, Some(2.0));
    }

    #[test]
    fn test_resolved_defaults() {
        let props = KeyframeProperties::default();
        assert!(props.is_empty());
        assert_eq!(props.resolved_opacity(), 1.0);
        assert_eq!(props.resolved_scale(), 1.0);
        assert_eq!(props.resolved_rotate_3d(), (0.0, 0.0));
        assert_eq!(props.resolved_blur(), 0.0);
    }
}
