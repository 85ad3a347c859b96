//! Tilt cards
//!
//! Per-card pointer tracking that tilts the card toward the pointer and
//! places a glare highlight under it. Each card owns a small record: its
//! geometry, an `Idle`/`Active` state machine, and the last computed sample.
//! Leaving the card resets everything to neutral.

use folio_core::fsm::{StateId, StateMachine};
use folio_core::geometry::{Point, Rect};
use folio_animation::KeyframeProperties;
use smallvec::SmallVec;

use crate::element::Element;
use crate::element_style::{format_number, ElementStyle, StyleTransition};

/// Classes that mark a card as sitting on an accent or dark background
pub const ACCENT_MARKERS: [&str; 3] = ["bg-accent", "bg-foreground", "bg-dark"];

mod states {
    use folio_core::fsm::{EventId, StateId};

    pub const IDLE: StateId = 0;
    pub const ACTIVE: StateId = 1;

    pub const ENTER: EventId = 1;
    pub const LEAVE: EventId = 2;
}

/// Static tone of a card, selecting its overlay treatment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CardTone {
    #[default]
    Neutral,
    Accent,
}

impl CardTone {
    pub fn of(element: &Element) -> Self {
        if ACCENT_MARKERS.iter().any(|m| element.has_class(m)) {
            CardTone::Accent
        } else {
            CardTone::Neutral
        }
    }
}

/// Tilt tuning
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltConfig {
    pub max_tilt_deg: f32,
    pub active_scale: f32,
    pub perspective_px: f32,
    pub transform_transition_ms: u32,
    pub overlay_transition_ms: u32,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_tilt_deg: 3.0,
            active_scale: 1.02,
            perspective_px: 1000.0,
            transform_transition_ms: 150,
            overlay_transition_ms: 300,
        }
    }
}

/// Result of one pointer sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltSample {
    pub rotate_x: f32,
    pub rotate_y: f32,
    /// Glare anchor, percent of width
    pub glare_x: f32,
    /// Glare anchor, percent of height
    pub glare_y: f32,
}

impl TiltSample {
    pub const NEUTRAL: TiltSample = TiltSample {
        rotate_x: 0.0,
        rotate_y: 0.0,
        glare_x: 50.0,
        glare_y: 50.0,
    };

    /// Compute tilt and glare for a point local to a `width` x `height`
    /// surface. Points outside the surface are clamped onto it.
    pub fn compute(local: Point, width: f32, height: f32, max_deg: f32) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return Self::NEUTRAL;
        }
        let x = local.x.clamp(0.0, width);
        let y = local.y.clamp(0.0, height);
        let (half_w, half_h) = (width / 2.0, height / 2.0);

        let rotate_x = (-((y - half_h) / half_h) * max_deg).clamp(-max_deg, max_deg);
        let rotate_y = (((x - half_w) / half_w) * max_deg).clamp(-max_deg, max_deg);

        Self {
            // Avoid -0.0 at the exact center
            rotate_x: rotate_x + 0.0,
            rotate_y: rotate_y + 0.0,
            glare_x: (x / width * 100.0).clamp(0.0, 100.0),
            glare_y: (y / height * 100.0).clamp(0.0, 100.0),
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.rotate_x == 0.0 && self.rotate_y == 0.0
    }
}

/// Which overlay a layer is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayKind {
    /// Colored highlight on accent cards
    AccentGlare,
    /// Warm-white highlight on neutral cards
    WarmGlare,
    /// Extra shadow layer on neutral cards
    AmbientShadow,
}

/// A synthetic overlay drawn above the card content
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayLayer {
    pub kind: OverlayKind,
    pub background: String,
    pub opacity: f32,
    pub transition: StyleTransition,
}

impl OverlayLayer {
    pub fn is_glare(&self) -> bool {
        matches!(self.kind, OverlayKind::AccentGlare | OverlayKind::WarmGlare)
    }

    pub fn to_css(&self) -> String {
        format!(
            "background: {}; opacity: {}; transition: {}",
            self.background,
            format_number(self.opacity),
            self.transition.to_css()
        )
    }
}

/// Interaction state of one card
#[derive(Clone, Debug)]
pub struct TiltCard {
    config: TiltConfig,
    tone: CardTone,
    bounds: Option<Rect>,
    hover: StateMachine,
    sample: TiltSample,
}

impl TiltCard {
    pub fn new(tone: CardTone) -> Self {
        Self::with_config(tone, TiltConfig::default())
    }

    pub fn with_config(tone: CardTone, config: TiltConfig) -> Self {
        let hover = StateMachine::builder(states::IDLE)
            .on(states::IDLE, states::ENTER, states::ACTIVE)
            .on(states::ACTIVE, states::LEAVE, states::IDLE)
            .build();
        Self {
            config,
            tone,
            bounds: None,
            hover,
            sample: TiltSample::NEUTRAL,
        }
    }

    /// Attach (or detach with `None`) the card's document-space geometry
    pub fn set_bounds(&mut self, bounds: Option<Rect>) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Convert a viewport point to card-local coordinates
    pub fn to_local(&self, viewport_point: Point, scroll: f32) -> Option<Point> {
        let bounds = self.bounds?;
        Some(Point::new(
            viewport_point.x - bounds.left(),
            viewport_point.y + scroll - bounds.top(),
        ))
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    pub fn pointer_enter(&mut self) {
        if self.hover.send(states::ENTER).is_some() {
            tracing::trace!(tone = ?self.tone, "tilt card active");
        }
    }

    /// Update tilt and glare from a card-local pointer position. Without
    /// geometry the sample is skipped and false is returned.
    pub fn pointer_move(&mut self, local: Point) -> bool {
        let Some(bounds) = self.bounds else {
            tracing::debug!("tilt card has no geometry, skipping pointer sample");
            return false;
        };
        // Some hosts deliver a move before the enter
        if self.hover.is_in(states::IDLE) {
            self.pointer_enter();
        }
        self.sample = TiltSample::compute(
            local,
            bounds.width(),
            bounds.height(),
            self.config.max_tilt_deg,
        );
        true
    }

    pub fn pointer_leave(&mut self) {
        self.hover.send(states::LEAVE);
        self.sample = TiltSample::NEUTRAL;
    }

    // =========================================================================
    // Output
    // =========================================================================

    pub fn is_active(&self) -> bool {
        self.hover.is_in(states::ACTIVE)
    }

    pub fn hover_state(&self) -> StateId {
        self.hover.current_state()
    }

    pub fn tone(&self) -> CardTone {
        self.tone
    }

    pub fn sample(&self) -> TiltSample {
        self.sample
    }

    pub fn scale(&self) -> f32 {
        if self.is_active() {
            self.config.active_scale
        } else {
            1.0
        }
    }

    /// Transform style of the card itself
    pub fn style(&self) -> ElementStyle {
        ElementStyle::from_properties(
            KeyframeProperties::default()
                .with_rotate_x(self.sample.rotate_x)
                .with_rotate_y(self.sample.rotate_y)
                .with_scale(self.scale()),
        )
        .perspective(self.config.perspective_px)
        .transition(StyleTransition::new(
            "transform",
            self.config.transform_transition_ms,
            "ease-out",
        ))
    }

    /// Overlay layers for the card's tone, visible only while active
    pub fn overlays(&self) -> SmallVec<[OverlayLayer; 2]> {
        let opacity = if self.is_active() { 1.0 } else { 0.0 };
        let transition =
            StyleTransition::new("opacity", self.config.overlay_transition_ms, "ease-out");
        let (gx, gy) = (
            format_number(self.sample.glare_x),
            format_number(self.sample.glare_y),
        );

        let mut layers = SmallVec::new();
        match self.tone {
            CardTone::Accent => layers.push(OverlayLayer {
                kind: OverlayKind::AccentGlare,
                background: format!(
                    "radial-gradient(circle at {gx}% {gy}%, rgba(255, 196, 150, 0.35), transparent 60%)"
                ),
                opacity,
                transition,
            }),
            CardTone::Neutral => {
                layers.push(OverlayLayer {
                    kind: OverlayKind::WarmGlare,
                    background: format!(
                        "radial-gradient(circle at {gx}% {gy}%, rgba(255, 250, 240, 0.6), transparent 55%)"
                    ),
                    opacity,
                    transition: transition.clone(),
                });
                layers.push(OverlayLayer {
                    kind: OverlayKind::AmbientShadow,
                    background: format!(
                        "radial-gradient(circle at {gx}% {gy}%, transparent 40%, rgba(28, 25, 23, 0.08))"
                    ),
                    opacity,
                    transition,
                });
            }
        }
        layers
    }

    /// True if a glare layer is currently visible
    pub fn glare_visible(&self) -> bool {
        self.overlays().iter().any(|o| o.is_glare() && o.opacity > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(tone: CardTone) -> TiltCard {
        let mut card = TiltCard::new(tone);
        card.set_bounds(Some(Rect::new(100.0, 1000.0, 400.0, 200.0)));
        card
    }

    #[test]
    fn test_center_is_flat() {
        let sample = TiltSample::compute(Point::new(200.0, 100.0), 400.0, 200.0, 3.0);
        assert_eq!(sample.rotate_x, 0.0);
        assert_eq!(sample.rotate_y, 0.0);
        assert_eq!((sample.glare_x, sample.glare_y), (50.0, 50.0));
    }

    #[test]
    fn test_corners_hit_the_cap() {
        let top_left = TiltSample::compute(Point::new(0.0, 0.0), 400.0, 200.0, 3.0);
        assert_eq!(top_left.rotate_x, 3.0);
        assert_eq!(top_left.rotate_y, -3.0);

        let bottom_right = TiltSample::compute(Point::new(400.0, 200.0), 400.0, 200.0, 3.0);
        assert_eq!(bottom_right.rotate_x, -3.0);
        assert_eq!(bottom_right.rotate_y, 3.0);
        assert_eq!((bottom_right.glare_x, bottom_right.glare_y), (100.0, 100.0));
    }

    #[test]
    fn test_bounded_over_grid() {
        for i in -10..=30 {
            for j in -10..=30 {
                let p = Point::new(i as f32 * 20.0, j as f32 * 10.0);
                let s = TiltSample::compute(p, 400.0, 200.0, 3.0);
                assert!(s.rotate_x.abs() <= 3.0 && s.rotate_y.abs() <= 3.0);
                assert!((0.0..=100.0).contains(&s.glare_x));
                assert!((0.0..=100.0).contains(&s.glare_y));
            }
        }
    }

    #[test]
    fn test_glare_is_linear() {
        let s = TiltSample::compute(Point::new(100.0, 150.0), 400.0, 200.0, 3.0);
        assert_eq!((s.glare_x, s.glare_y), (25.0, 75.0));
    }

    #[test]
    fn test_leave_resets_to_neutral() {
        let mut card = card(CardTone::Neutral);
        card.pointer_enter();
        card.pointer_move(Point::new(10.0, 190.0));
        assert!(card.is_active());
        assert!(!card.sample().is_neutral());
        assert_eq!(card.scale(), 1.02);

        card.pointer_leave();
        assert!(!card.is_active());
        assert_eq!(card.sample(), TiltSample::NEUTRAL);
        assert_eq!(card.scale(), 1.0);
        assert!(card.overlays().iter().all(|o| o.opacity == 0.0));
        assert_eq!(
            card.style().transform_css().unwrap(),
            "perspective(1000px) rotateX(0deg) rotateY(0deg) scale(1)"
        );
    }

    #[test]
    fn test_move_before_enter_activates() {
        let mut card = card(CardTone::Accent);
        assert!(card.pointer_move(Point::new(200.0, 100.0)));
        assert!(card.is_active());
        assert!(card.glare_visible());
    }

    #[test]
    fn test_missing_geometry_skips_sample() {
        let mut card = TiltCard::new(CardTone::Neutral);
        card.pointer_enter();
        assert!(!card.pointer_move(Point::new(10.0, 10.0)));
        assert_eq!(card.sample(), TiltSample::NEUTRAL);
    }

    #[test]
    fn test_tone_selects_overlays() {
        let accent = Element::div().class("bento-card bg-accent");
        let neutral = Element::div().class("bento-card bg-card");
        assert_eq!(CardTone::of(&accent), CardTone::Accent);
        assert_eq!(CardTone::of(&neutral), CardTone::Neutral);

        let kinds: Vec<_> = card(CardTone::Accent).overlays().iter().map(|o| o.kind).collect();
        assert_eq!(kinds, [OverlayKind::AccentGlare]);
        let kinds: Vec<_> = card(CardTone::Neutral).overlays().iter().map(|o| o.kind).collect();
        assert_eq!(kinds, [OverlayKind::WarmGlare, OverlayKind::AmbientShadow]);
    }

    #[test]
    fn test_to_local_accounts_for_scroll() {
        let card = card(CardTone::Neutral);
        let local = card.to_local(Point::new(150.0, 100.0), 950.0).unwrap();
        assert_eq!(local, Point::new(50.0, 50.0));
        assert!(TiltCard::new(CardTone::Neutral)
            .to_local(Point::ZERO, 0.0)
            .is_none());
    }

    #[test]
    fn test_overlay_transition_is_slower_than_transform() {
        let card = card(CardTone::Neutral);
        assert_eq!(card.overlays()[0].transition.duration_ms, 300);
        assert_eq!(card.style().transitions[0].duration_ms, 150);
        assert!(card.overlays()[0].to_css().contains("transition: opacity 0.3s ease-out"));
    }
}
