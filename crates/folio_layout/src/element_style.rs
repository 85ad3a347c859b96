//! Computed element styles
//!
//! [`ElementStyle`] is what the host applies to a node: the animated property
//! set plus transition and perspective settings. All properties are optional;
//! an empty style means "no inline style" and renders to an empty string.

use folio_animation::KeyframeProperties;
use smallvec::SmallVec;

/// A CSS transition on one property
#[derive(Clone, Debug, PartialEq)]
pub struct StyleTransition {
    pub property: &'static str,
    pub duration_ms: u32,
    pub timing: &'static str,
}

impl StyleTransition {
    pub fn new(property: &'static str, duration_ms: u32, timing: &'static str) -> Self {
        Self {
            property,
            duration_ms,
            timing,
        }
    }

    pub fn to_css(&self) -> String {
        format!(
            "{} {}s {}",
            self.property,
            format_number(self.duration_ms as f32 / 1000.0),
            self.timing
        )
    }
}

/// Visual style of an element
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementStyle {
    pub properties: KeyframeProperties,
    /// Perspective distance for 3D rotation (px)
    pub perspective: Option<f32>,
    pub transitions: SmallVec<[StyleTransition; 2]>,
}

impl ElementStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_properties(properties: KeyframeProperties) -> Self {
        Self {
            properties,
            ..Default::default()
        }
    }

    /// Set perspective (builder)
    pub fn perspective(mut self, px: f32) -> Self {
        self.perspective = Some(px);
        self
    }

    /// Add a transition (builder)
    pub fn transition(mut self, transition: StyleTransition) -> Self {
        self.transitions.push(transition);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.perspective.is_none() && self.transitions.is_empty()
    }

    /// Overlay `other` on top of `self`. Set properties in `other` win and
    /// transitions are concatenated.
    pub fn merge(&self, other: &ElementStyle) -> ElementStyle {
        let mut transitions = self.transitions.clone();
        transitions.extend(other.transitions.iter().cloned());
        ElementStyle {
            properties: self.properties.merge(&other.properties),
            perspective: other.perspective.or(self.perspective),
            transitions,
        }
    }

    /// CSS `transform` value, if any transform component is set
    pub fn transform_css(&self) -> Option<String> {
        let p = &self.properties;
        let mut parts: Vec<String> = Vec::new();

        if let Some(px) = self.perspective {
            parts.push(format!("perspective({}px)", format_number(px)));
        }
        if p.translate_x.is_some() || p.translate_y.is_some() {
            let (x, y) = p.resolved_translate();
            parts.push(format!(
                "translate3d({}px, {}px, 0)",
                format_number(x),
                format_number(y)
            ));
        }
        if let Some(deg) = p.rotate {
            parts.push(format!("rotate({}deg)", format_number(deg)));
        }
        if let Some(deg) = p.rotate_x {
            parts.push(format!("rotateX({}deg)", format_number(deg)));
        }
        if let Some(deg) = p.rotate_y {
            parts.push(format!("rotateY({}deg)", format_number(deg)));
        }
        if let Some(scale) = p.scale {
            parts.push(format!("scale({})", format_number(scale)));
        }

        (!parts.is_empty()).then(|| parts.join(" "))
    }

    /// Inline CSS declarations
    pub fn to_css(&self) -> String {
        let mut decls: Vec<String> = Vec::new();
        let p = &self.properties;

        if let Some(opacity) = p.opacity {
            decls.push(format!("opacity: {}", format_number(opacity)));
        }
        if let Some(transform) = self.transform_css() {
            decls.push(format!("transform: {transform}"));
        }
        if let Some(blur) = p.blur {
            decls.push(format!("filter: blur({}px)", format_number(blur)));
        }
        if let Some(x) = p.background_position_x {
            decls.push(format!("background-position: {}% 50%", format_number(x)));
        }
        if !self.transitions.is_empty() {
            let list: Vec<String> = self.transitions.iter().map(StyleTransition::to_css).collect();
            decls.push(format!("transition: {}", list.join(", ")));
        }

        decls.join("; ")
    }
}

/// Format a number with at most three decimals and no trailing zeros
pub fn format_number(value: f32) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    // Avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let s = format!("{rounded:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_style_renders_nothing() {
        let style = ElementStyle::new();
        assert!(style.is_empty());
        assert_eq!(style.to_css(), "");
        assert_eq!(style.transform_css(), None);
    }

    #[test]
    fn test_transform_order() {
        let style = ElementStyle::from_properties(
            KeyframeProperties::translate(-80.0, 0.0)
                .with_rotate(-2.0)
                .with_rotate_x(1.5)
                .with_rotate_y(-3.0)
                .with_scale(1.02),
        )
        .perspective(1000.0);
        assert_eq!(
            style.transform_css().unwrap(),
            "perspective(1000px) translate3d(-80px, 0px, 0) rotate(-2deg) rotateX(1.5deg) rotateY(-3deg) scale(1.02)"
        );
    }

    #[test]
    fn test_full_css() {
        let style = ElementStyle::from_properties(
            KeyframeProperties::opacity(0.25)
                .with_blur(10.0)
                .with_background_position_x(40.0),
        )
        .transition(StyleTransition::new("transform", 150, "ease-out"));
        assert_eq!(
            style.to_css(),
            "opacity: 0.25; filter: blur(10px); background-position: 40% 50%; transition: transform 0.15s ease-out"
        );
    }

    #[test]
    fn test_merge_overlays() {
        let base = ElementStyle::from_properties(KeyframeProperties::opacity(0.5).with_translate_y(30.0));
        let tilt = ElementStyle::from_properties(KeyframeProperties::default().with_rotate_x(2.0))
            .perspective(1000.0);
        let merged = base.merge(&tilt);
        assert_eq!(merged.properties.opacity, Some(0.5));
        assert_eq!(merged.properties.rotate_x, Some(2.0));
        assert_eq!(merged.perspective, Some(1000.0));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(0.333_33), "0.333");
        assert_eq!(format_number(-0.0001), "0");
        assert_eq!(format_number(-12.5), "-12.5");
    }
}
