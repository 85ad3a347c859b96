//! Scroll-linked animation director
//!
//! The page hands the director a flat list of [`AnimationDescriptor`]s. Each
//! descriptor is bound to the elements it targets and driven one of three
//! ways:
//!
//! - **Immediate**: placed on the intro timeline and played once at mount.
//! - **Entrance**: a [`ScrollTrigger`] turns boundary crossings into tween
//!   commands through [`ToggleActions`].
//! - **Scrub**: tween progress follows trigger progress, directly or with a
//!   smoothing lag.
//!
//! Every frame the director writes an [`ElementStyle`] per animated element.
//! [`ScrollDirector::revert`] drops every binding and every style it wrote.

use folio_animation::{
    Easing, KeyframeProperties, StaggerConfig, Timeline, TimelineEntryId, Tween,
};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::element_style::ElementStyle;
use crate::error::Result;
use crate::selector::Selector;
use crate::tree::{ElementId, PageTree};
use crate::trigger::{ScrollTrigger, ToggleAction, ToggleActions, TriggerConfig};

new_key_type! {
    pub struct BindingId;
}

/// Below this distance a lagged scrub snaps to its target
const SCRUB_EPSILON: f32 = 1e-4;

// ============================================================================
// Descriptors
// ============================================================================

/// What a descriptor animates
#[derive(Clone, Debug, PartialEq)]
pub enum Target {
    Selector(String),
    Element(ElementId),
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Target::Selector(selector.to_string())
    }
}

impl From<ElementId> for Target {
    fn from(id: ElementId) -> Self {
        Target::Element(id)
    }
}

impl Target {
    fn resolve(&self, tree: &PageTree) -> Result<Vec<ElementId>> {
        Ok(match self {
            Target::Selector(s) => tree.query(&Selector::parse(s)?),
            Target::Element(id) if tree.contains(*id) => vec![*id],
            Target::Element(_) => Vec::new(),
        })
    }
}

/// How scroll progress reaches a scrubbed tween
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scrub {
    /// Progress maps straight through
    Direct,
    /// Progress is approached exponentially, settling within about this many seconds
    Lag(f32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationMode {
    Immediate,
    Entrance {
        toggle_actions: ToggleActions,
        once: bool,
    },
    Scrub(Scrub),
}

/// Static configuration of one animation
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationDescriptor {
    pub target: Target,
    /// Element whose position drives the trigger; defaults to each target
    pub trigger_target: Option<Target>,
    pub mode: AnimationMode,
    pub trigger: TriggerConfig,
    pub from: KeyframeProperties,
    /// Resting state; defaults to the neutral value of every `from` property
    pub to: Option<KeyframeProperties>,
    pub duration_ms: u32,
    pub delay_ms: u32,
    pub easing: Easing,
    pub stagger: Option<StaggerConfig>,
}

impl AnimationDescriptor {
    fn new(target: Target, mode: AnimationMode) -> Self {
        Self {
            target,
            trigger_target: None,
            mode,
            trigger: TriggerConfig::default(),
            from: KeyframeProperties::default(),
            to: None,
            duration_ms: 500,
            delay_ms: 0,
            easing: Easing::EaseOutQuad,
            stagger: None,
        }
    }

    /// Play once at mount
    pub fn immediate(target: impl Into<Target>) -> Self {
        Self::new(target.into(), AnimationMode::Immediate)
    }

    /// Toggle on viewport crossings with `"play none none reverse"`
    pub fn entrance(target: impl Into<Target>) -> Self {
        Self::new(
            target.into(),
            AnimationMode::Entrance {
                toggle_actions: ToggleActions::default(),
                once: false,
            },
        )
    }

    /// Bind progress to scroll position
    pub fn scrub(target: impl Into<Target>, scrub: Scrub) -> Self {
        Self {
            easing: Easing::Linear,
            ..Self::new(target.into(), AnimationMode::Scrub(scrub))
        }
    }

    pub fn from(mut self, props: KeyframeProperties) -> Self {
        self.from = props;
        self
    }

    pub fn to(mut self, props: KeyframeProperties) -> Self {
        self.to = Some(props);
        self
    }

    pub fn duration(mut self, ms: u32) -> Self {
        self.duration_ms = ms;
        self
    }

    pub fn delay(mut self, ms: u32) -> Self {
        self.delay_ms = ms;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn trigger(mut self, trigger: TriggerConfig) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn trigger_target(mut self, target: impl Into<Target>) -> Self {
        self.trigger_target = Some(target.into());
        self
    }

    pub fn stagger(mut self, stagger: StaggerConfig) -> Self {
        self.stagger = Some(stagger);
        self
    }

    /// Replace the toggle actions of an entrance
    pub fn toggle_actions(mut self, actions: ToggleActions) -> Self {
        if let AnimationMode::Entrance { toggle_actions, .. } = &mut self.mode {
            *toggle_actions = actions;
        }
        self
    }

    /// Kill the trigger after the first enter
    pub fn once(mut self) -> Self {
        if let AnimationMode::Entrance { once, .. } = &mut self.mode {
            *once = true;
        }
        self
    }

    fn resting_state(&self) -> KeyframeProperties {
        self.to.unwrap_or_else(|| resting_for(&self.from))
    }
}

/// Neutral value for every property set in `from`
fn resting_for(from: &KeyframeProperties) -> KeyframeProperties {
    KeyframeProperties {
        opacity: from.opacity.map(|_| 1.0),
        translate_x: from.translate_x.map(|_| 0.0),
        translate_y: from.translate_y.map(|_| 0.0),
        rotate: from.rotate.map(|_| 0.0),
        rotate_x: from.rotate_x.map(|_| 0.0),
        rotate_y: from.rotate_y.map(|_| 0.0),
        scale: from.scale.map(|_| 1.0),
        blur: from.blur.map(|_| 0.0),
        background_position_x: from.background_position_x.map(|_| 0.0),
    }
}

// ============================================================================
// Bindings
// ============================================================================

enum Driver {
    Intro(TimelineEntryId),
    Toggle {
        tween: Tween,
        actions: ToggleActions,
        once: bool,
    },
    Scrub {
        tween: Tween,
        scrub: Scrub,
        current: f32,
        target: f32,
    },
}

struct Binding {
    element: ElementId,
    trigger_element: ElementId,
    driver: Driver,
    trigger: Option<ScrollTrigger>,
}

fn apply_action(tween: &mut Tween, action: ToggleAction) {
    match action {
        ToggleAction::Play => tween.play(),
        ToggleAction::Pause => tween.pause(),
        ToggleAction::Resume => tween.resume(),
        ToggleAction::Reverse => tween.reverse(),
        ToggleAction::Restart => tween.restart(),
        ToggleAction::Reset => tween.reset(),
        ToggleAction::Complete => tween.complete(),
        ToggleAction::None => {}
    }
}

/// Interprets animation descriptors against the page and scroll position
pub struct ScrollDirector {
    bindings: SlotMap<BindingId, Binding>,
    intro: Timeline,
    styles: FxHashMap<ElementId, ElementStyle>,
    viewport_height: f32,
    scroll: f32,
}

impl ScrollDirector {
    pub fn new() -> Self {
        Self {
            bindings: SlotMap::with_key(),
            intro: Timeline::new(),
            styles: FxHashMap::default(),
            viewport_height: 0.0,
            scroll: 0.0,
        }
    }

    /// Bind a descriptor to every element it targets. A target that matches
    /// nothing binds nothing.
    pub fn bind(
        &mut self,
        tree: &PageTree,
        descriptor: &AnimationDescriptor,
    ) -> Result<SmallVec<[BindingId; 4]>> {
        let mut ids = SmallVec::new();
        let targets = descriptor.target.resolve(tree)?;
        if targets.is_empty() {
            tracing::debug!(target = ?descriptor.target, "animation target missing, skipping bind");
            return Ok(ids);
        }

        let shared_trigger = match &descriptor.trigger_target {
            Some(t) => match t.resolve(tree)?.first() {
                Some(&id) => Some(id),
                None => {
                    tracing::debug!(trigger = ?t, "trigger element missing, skipping bind");
                    return Ok(ids);
                }
            },
            None => None,
        };

        self.viewport_height = tree.viewport().height;
        let rest = descriptor.resting_state();
        let total = targets.len();

        for (index, element) in targets.into_iter().enumerate() {
            let stagger = descriptor
                .stagger
                .map(|s| s.delay_for_index(index, total))
                .unwrap_or(0);
            let tween = Tween::new(descriptor.from, rest, descriptor.duration_ms)
                .easing(descriptor.easing)
                .delay(descriptor.delay_ms + stagger);

            let (driver, trigger) = match descriptor.mode {
                AnimationMode::Immediate => {
                    let entry = self.intro.add(0, tween);
                    self.intro.play();
                    (Driver::Intro(entry), None)
                }
                AnimationMode::Entrance {
                    toggle_actions,
                    once,
                } => (
                    Driver::Toggle {
                        tween,
                        actions: toggle_actions,
                        once,
                    },
                    Some(ScrollTrigger::new(descriptor.trigger)),
                ),
                AnimationMode::Scrub(scrub) => (
                    Driver::Scrub {
                        tween,
                        scrub,
                        current: 0.0,
                        target: 0.0,
                    },
                    Some(ScrollTrigger::new(descriptor.trigger)),
                ),
            };

            let trigger_element = shared_trigger.unwrap_or(element);
            let mut binding = Binding {
                element,
                trigger_element,
                driver,
                trigger,
            };
            if let (Some(trigger), Some(rect)) = (&mut binding.trigger, tree.rect(trigger_element)) {
                trigger.refresh(&rect, self.viewport_height);
            }
            let id = self.bindings.insert(binding);
            self.update_binding(id, true);
            ids.push(id);
        }

        tracing::debug!(count = ids.len(), mode = ?descriptor.mode, "animation bound");
        self.write_styles();
        Ok(ids)
    }

    /// Recompute trigger offsets after layout changed
    pub fn refresh(&mut self, tree: &PageTree) {
        self.viewport_height = tree.viewport().height;
        for binding in self.bindings.values_mut() {
            let Some(trigger) = binding.trigger.as_mut() else {
                continue;
            };
            match tree.rect(binding.trigger_element) {
                Some(rect) => trigger.refresh(&rect, self.viewport_height),
                None => tracing::debug!("trigger element has no geometry, keeping offsets"),
            }
        }
        self.update(self.scroll);
    }

    /// Apply a published scroll position
    pub fn update(&mut self, scroll: f32) {
        self.scroll = scroll;
        let ids: Vec<BindingId> = self.bindings.keys().collect();
        for id in ids {
            self.update_binding(id, false);
        }
        self.write_styles();
    }

    fn update_binding(&mut self, id: BindingId, snap: bool) {
        let scroll = self.scroll;
        let Some(binding) = self.bindings.get_mut(id) else {
            return;
        };
        let Some(trigger) = binding.trigger.as_mut() else {
            return;
        };
        let events = trigger.update(scroll);
        let progress = trigger.progress();

        match &mut binding.driver {
            Driver::Toggle {
                tween,
                actions,
                once,
            } => {
                for event in events {
                    let action = actions.action_for(event);
                    tracing::trace!(?event, ?action, "trigger crossing");
                    apply_action(tween, action);
                    if *once && event == crate::trigger::TriggerEvent::Enter {
                        tracing::debug!("once trigger fired, killing trigger");
                        binding.trigger = None;
                        break;
                    }
                }
            }
            Driver::Scrub {
                tween,
                scrub,
                current,
                target,
            } => {
                *target = progress;
                if snap || *scrub == Scrub::Direct {
                    *current = progress;
                    tween.seek_progress(progress);
                }
            }
            Driver::Intro(_) => {}
        }
    }

    /// Advance every running animation. Returns true while anything moves.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        let mut active = self.intro.tick(dt_ms);
        let dt_s = dt_ms.max(0.0) / 1000.0;

        for binding in self.bindings.values_mut() {
            match &mut binding.driver {
                Driver::Toggle { tween, .. } => active |= tween.tick(dt_ms),
                Driver::Scrub {
                    tween,
                    scrub: Scrub::Lag(lag),
                    current,
                    target,
                } => {
                    if *current != *target {
                        let factor = if *lag <= 0.0 {
                            1.0
                        } else {
                            1.0 - (-dt_s * 4.0 / *lag).exp()
                        };
                        *current += (*target - *current) * factor;
                        if (*target - *current).abs() < SCRUB_EPSILON {
                            *current = *target;
                        }
                        tween.seek_progress(*current);
                        active = true;
                    }
                }
                Driver::Scrub { .. } | Driver::Intro(_) => {}
            }
        }

        self.write_styles();
        active
    }

    fn write_styles(&mut self) {
        self.styles.clear();
        for binding in self.bindings.values() {
            let props = match &binding.driver {
                Driver::Intro(entry) => match self.intro.value(*entry) {
                    Some(p) => p,
                    None => continue,
                },
                Driver::Toggle { tween, .. } | Driver::Scrub { tween, .. } => {
                    tween.current_properties()
                }
            };
            let style = self.styles.entry(binding.element).or_default();
            style.properties = style.properties.merge(&props);
        }
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Replace the endpoints of a toggle or scrub binding without touching its
    /// playhead or trigger. Intro bindings cannot be retargeted.
    pub fn retarget(
        &mut self,
        id: BindingId,
        from: KeyframeProperties,
        to: Option<KeyframeProperties>,
    ) -> bool {
        let Some(binding) = self.bindings.get_mut(id) else {
            return false;
        };
        let rest = to.unwrap_or_else(|| resting_for(&from));
        match &mut binding.driver {
            Driver::Toggle { tween, .. } | Driver::Scrub { tween, .. } => {
                tween.set_endpoints(from, rest)
            }
            Driver::Intro(_) => return false,
        }
        self.write_styles();
        true
    }

    /// Drop one binding; its element loses the style it contributed
    pub fn kill(&mut self, id: BindingId) -> bool {
        let removed = self.bindings.remove(id).is_some();
        if removed {
            self.write_styles();
        }
        removed
    }

    /// Drop every binding and every inline style
    pub fn revert(&mut self) {
        let count = self.bindings.len();
        self.bindings.clear();
        self.intro = Timeline::new();
        self.styles.clear();
        tracing::debug!(count, "animations reverted");
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn style(&self, element: ElementId) -> Option<&ElementStyle> {
        self.styles.get(&element)
    }

    pub fn styles(&self) -> impl Iterator<Item = (ElementId, &ElementStyle)> {
        self.styles.iter().map(|(id, style)| (*id, style))
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Bindings whose scroll trigger is still live
    pub fn trigger_count(&self) -> usize {
        self.bindings.values().filter(|b| b.trigger.is_some()).count()
    }

    /// Element each binding animates
    pub fn bound_elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.bindings.values().map(|b| b.element)
    }

    pub fn is_animating(&self) -> bool {
        self.intro.is_playing()
            || self.bindings.values().any(|b| match &b.driver {
                Driver::Toggle { tween, .. } => tween.is_playing(),
                Driver::Scrub {
                    current, target, ..
                } => current != target,
                Driver::Intro(_) => false,
            })
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }
}

impl Default for ScrollDirector {
    fn default() -> Self {
        Self::new()
    }
}
