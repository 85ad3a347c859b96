//! Scroll triggers
//!
//! A [`ScrollTrigger`] watches one element against the viewport. Its start and
//! end are written as `"<element-edge> <viewport-edge>"`, e.g. `"top 85%"`
//! means "when the element's top reaches 85% of the viewport height". As the
//! scroll position moves, the trigger walks a small state machine
//! (`Before` → `Active` → `After`) and reports the crossings, which toggle
//! actions then turn into tween commands.

use std::fmt;
use std::str::FromStr;

use folio_core::fsm::{StateId, StateMachine};
use folio_core::geometry::Rect;
use smallvec::SmallVec;

use crate::error::{LayoutError, Result};

// ============================================================================
// Positions
// ============================================================================

/// One edge of a trigger position
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
    /// Percentage of the extent (0-100)
    Percent(f32),
    /// Pixels from the top
    Pixels(f32),
}

impl Edge {
    /// Offset from the top of an extent
    pub fn resolve(&self, extent: f32) -> f32 {
        match *self {
            Edge::Top => 0.0,
            Edge::Center => extent * 0.5,
            Edge::Bottom => extent,
            Edge::Percent(p) => extent * p / 100.0,
            Edge::Pixels(px) => px,
        }
    }

    fn parse(token: &str) -> Option<Self> {
        match token {
            "top" => Some(Edge::Top),
            "center" => Some(Edge::Center),
            "bottom" => Some(Edge::Bottom),
            _ => {
                if let Some(p) = token.strip_suffix('%') {
                    p.parse().ok().map(Edge::Percent)
                } else {
                    let px = token.strip_suffix("px").unwrap_or(token);
                    px.parse().ok().map(Edge::Pixels)
                }
            }
        }
    }
}

/// Where a trigger starts or ends
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerPosition {
    /// Element edge meets viewport edge
    Edges { element: Edge, viewport: Edge },
    /// Pixels past the start (`"+=300"`); only meaningful as an end
    Relative(f32),
}

impl TriggerPosition {
    pub const fn edges(element: Edge, viewport: Edge) -> Self {
        TriggerPosition::Edges { element, viewport }
    }

    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || LayoutError::InvalidTriggerPosition(input.to_string());
        let s = input.trim();

        if let Some(rest) = s.strip_prefix("+=") {
            let px = rest.strip_suffix("px").unwrap_or(rest);
            return px
                .trim()
                .parse()
                .map(TriggerPosition::Relative)
                .map_err(|_| invalid());
        }

        let mut tokens = s.split_whitespace();
        let (Some(element), Some(viewport), None) = (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(invalid());
        };
        Ok(TriggerPosition::Edges {
            element: Edge::parse(element).ok_or_else(invalid)?,
            viewport: Edge::parse(viewport).ok_or_else(invalid)?,
        })
    }

    /// Scroll offset at which this position is reached. `start` is only used
    /// by relative positions.
    pub fn scroll_offset(&self, rect: &Rect, viewport_height: f32, start: f32) -> f32 {
        match *self {
            TriggerPosition::Edges { element, viewport } => {
                rect.top() + element.resolve(rect.height()) - viewport.resolve(viewport_height)
            }
            TriggerPosition::Relative(px) => start + px,
        }
    }
}

impl FromStr for TriggerPosition {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        TriggerPosition::parse(s)
    }
}

// ============================================================================
// Toggle actions
// ============================================================================

/// What a crossing does to the bound tween
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToggleAction {
    Play,
    Pause,
    Resume,
    Reverse,
    Restart,
    Reset,
    Complete,
    #[default]
    None,
}

impl ToggleAction {
    fn parse(token: &str) -> Option<Self> {
        Some(match token {
            "play" => ToggleAction::Play,
            "pause" => ToggleAction::Pause,
            "resume" => ToggleAction::Resume,
            "reverse" => ToggleAction::Reverse,
            "restart" => ToggleAction::Restart,
            "reset" => ToggleAction::Reset,
            "complete" => ToggleAction::Complete,
            "none" => ToggleAction::None,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToggleAction::Play => "play",
            ToggleAction::Pause => "pause",
            ToggleAction::Resume => "resume",
            ToggleAction::Reverse => "reverse",
            ToggleAction::Restart => "restart",
            ToggleAction::Reset => "reset",
            ToggleAction::Complete => "complete",
            ToggleAction::None => "none",
        }
    }
}

/// Actions for `onEnter onLeave onEnterBack onLeaveBack`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleActions {
    pub on_enter: ToggleAction,
    pub on_leave: ToggleAction,
    pub on_enter_back: ToggleAction,
    pub on_leave_back: ToggleAction,
}

impl Default for ToggleActions {
    /// `"play none none reverse"`
    fn default() -> Self {
        Self {
            on_enter: ToggleAction::Play,
            on_leave: ToggleAction::None,
            on_enter_back: ToggleAction::None,
            on_leave_back: ToggleAction::Reverse,
        }
    }
}

impl ToggleActions {
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || LayoutError::InvalidToggleActions(input.to_string());
        let actions: SmallVec<[ToggleAction; 4]> = input
            .split_whitespace()
            .map(|t| ToggleAction::parse(t).ok_or_else(invalid))
            .collect::<Result<_>>()?;
        let [on_enter, on_leave, on_enter_back, on_leave_back] = actions.as_slice() else {
            return Err(invalid());
        };
        Ok(Self {
            on_enter: *on_enter,
            on_leave: *on_leave,
            on_enter_back: *on_enter_back,
            on_leave_back: *on_leave_back,
        })
    }

    pub fn action_for(&self, event: TriggerEvent) -> ToggleAction {
        match event {
            TriggerEvent::Enter => self.on_enter,
            TriggerEvent::Leave => self.on_leave,
            TriggerEvent::EnterBack => self.on_enter_back,
            TriggerEvent::LeaveBack => self.on_leave_back,
        }
    }
}

impl FromStr for ToggleActions {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        ToggleActions::parse(s)
    }
}

impl fmt::Display for ToggleActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.on_enter.as_str(),
            self.on_leave.as_str(),
            self.on_enter_back.as_str(),
            self.on_leave_back.as_str()
        )
    }
}

// ============================================================================
// Trigger state
// ============================================================================

/// A boundary crossing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerEvent {
    /// Scrolled forward past the start
    Enter,
    /// Scrolled forward past the end
    Leave,
    /// Scrolled backward past the end
    EnterBack,
    /// Scrolled backward past the start
    LeaveBack,
}

/// Region of the scroll range relative to a trigger
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerRegion {
    Before,
    Active,
    After,
}

mod states {
    use folio_core::fsm::{EventId, StateId};

    pub const BEFORE: StateId = 0;
    pub const ACTIVE: StateId = 1;
    pub const AFTER: StateId = 2;

    pub const ENTER: EventId = 1;
    pub const LEAVE: EventId = 2;
    pub const ENTER_BACK: EventId = 3;
    pub const LEAVE_BACK: EventId = 4;
}

fn region_of(state: StateId) -> TriggerRegion {
    match state {
        states::ACTIVE => TriggerRegion::Active,
        states::AFTER => TriggerRegion::After,
        _ => TriggerRegion::Before,
    }
}

/// Start/end pair for a trigger
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerConfig {
    pub start: TriggerPosition,
    pub end: TriggerPosition,
}

impl Default for TriggerConfig {
    /// `start: "top bottom"`, `end: "bottom top"`
    fn default() -> Self {
        Self {
            start: TriggerPosition::edges(Edge::Top, Edge::Bottom),
            end: TriggerPosition::edges(Edge::Bottom, Edge::Top),
        }
    }
}

impl TriggerConfig {
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: TriggerPosition::parse(start)?,
            end: TriggerPosition::parse(end)?,
        })
    }
}

/// Tracks one element's position in the scroll range
#[derive(Clone, Debug)]
pub struct ScrollTrigger {
    config: TriggerConfig,
    start: f32,
    end: f32,
    progress: f32,
    fsm: StateMachine,
}

impl ScrollTrigger {
    pub fn new(config: TriggerConfig) -> Self {
        let fsm = StateMachine::builder(states::BEFORE)
            .on(states::BEFORE, states::ENTER, states::ACTIVE)
            .on(states::ACTIVE, states::LEAVE, states::AFTER)
            .on(states::AFTER, states::ENTER_BACK, states::ACTIVE)
            .on(states::ACTIVE, states::LEAVE_BACK, states::BEFORE)
            .build();
        Self {
            config,
            start: 0.0,
            end: 0.0,
            progress: 0.0,
            fsm,
        }
    }

    /// Recompute start/end scroll offsets from the element's layout
    pub fn refresh(&mut self, rect: &Rect, viewport_height: f32) {
        self.start = self.config.start.scroll_offset(rect, viewport_height, 0.0);
        let end = self.config.end.scroll_offset(rect, viewport_height, self.start);
        self.end = end.max(self.start);
    }

    /// Feed a scroll position; returns the crossings it caused, in order
    pub fn update(&mut self, scroll: f32) -> SmallVec<[TriggerEvent; 2]> {
        self.progress = self.progress_at(scroll);

        let target = if scroll < self.start {
            TriggerRegion::Before
        } else if scroll > self.end {
            TriggerRegion::After
        } else {
            TriggerRegion::Active
        };

        let mut events = SmallVec::new();
        // At most two steps: Before -> Active -> After or the reverse
        while self.region() != target {
            let (event, fired) = match (self.region(), target) {
                (TriggerRegion::Before, _) => (states::ENTER, TriggerEvent::Enter),
                (TriggerRegion::After, _) => (states::ENTER_BACK, TriggerEvent::EnterBack),
                (TriggerRegion::Active, TriggerRegion::After) => (states::LEAVE, TriggerEvent::Leave),
                (TriggerRegion::Active, _) => (states::LEAVE_BACK, TriggerEvent::LeaveBack),
            };
            if self.fsm.send(event).is_none() {
                break;
            }
            events.push(fired);
        }
        events
    }

    /// `clamp((scroll - start) / (end - start), 0, 1)`; a zero-length
    /// range steps from 0 to 1 at the start
    pub fn progress_at(&self, scroll: f32) -> f32 {
        let range = self.end - self.start;
        if range <= 0.0 {
            if scroll >= self.start {
                1.0
            } else {
                0.0
            }
        } else {
            ((scroll - self.start) / range).clamp(0.0, 1.0)
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn region(&self) -> TriggerRegion {
        region_of(self.fsm.current_state())
    }

    pub fn is_active(&self) -> bool {
        self.region() == TriggerRegion::Active
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn end(&self) -> f32 {
        self.end
    }

    pub fn config(&self) -> &TriggerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positions() {
        assert_eq!(
            TriggerPosition::parse("top 85%").unwrap(),
            TriggerPosition::edges(Edge::Top, Edge::Percent(85.0))
        );
        assert_eq!(
            TriggerPosition::parse("center 120px").unwrap(),
            TriggerPosition::edges(Edge::Center, Edge::Pixels(120.0))
        );
        assert_eq!(
            TriggerPosition::parse("+=300").unwrap(),
            TriggerPosition::Relative(300.0)
        );
        assert!(TriggerPosition::parse("top").is_err());
        assert!(TriggerPosition::parse("middle 50%").is_err());
        assert!(TriggerPosition::parse("top 50% extra").is_err());
    }

    #[test]
    fn test_parse_toggle_actions() {
        let actions = ToggleActions::parse("play none none reverse").unwrap();
        assert_eq!(actions, ToggleActions::default());
        assert_eq!(actions.to_string(), "play none none reverse");

        let actions: ToggleActions = "restart pause resume reset".parse().unwrap();
        assert_eq!(actions.on_leave, ToggleAction::Pause);
        assert_eq!(actions.action_for(TriggerEvent::LeaveBack), ToggleAction::Reset);

        assert!(ToggleActions::parse("play none").is_err());
        assert!(ToggleActions::parse("play none none rewind").is_err());
    }

    #[test]
    fn test_start_offset_top_85() {
        let config = TriggerConfig::parse("top 85%", "bottom top").unwrap();
        let mut trigger = ScrollTrigger::new(config);
        trigger.refresh(&Rect::new(0.0, 1500.0, 300.0, 280.0), 1000.0);
        assert_eq!(trigger.start(), 650.0);
        assert_eq!(trigger.end(), 1780.0);
    }

    #[test]
    fn test_crossings_in_order() {
        let config = TriggerConfig::parse("top bottom", "+=100").unwrap();
        let mut trigger = ScrollTrigger::new(config);
        trigger.refresh(&Rect::new(0.0, 1000.0, 100.0, 100.0), 800.0);
        assert_eq!((trigger.start(), trigger.end()), (200.0, 300.0));

        assert!(trigger.update(0.0).is_empty());
        assert_eq!(trigger.update(250.0).as_slice(), [TriggerEvent::Enter]);
        assert!((trigger.progress() - 0.5).abs() < 1e-6);
        assert_eq!(trigger.update(400.0).as_slice(), [TriggerEvent::Leave]);
        assert_eq!(trigger.update(250.0).as_slice(), [TriggerEvent::EnterBack]);
        assert_eq!(trigger.update(0.0).as_slice(), [TriggerEvent::LeaveBack]);
    }

    #[test]
    fn test_jump_across_fires_both() {
        let config = TriggerConfig::parse("top bottom", "+=100").unwrap();
        let mut trigger = ScrollTrigger::new(config);
        trigger.refresh(&Rect::new(0.0, 1000.0, 100.0, 100.0), 800.0);
        assert_eq!(
            trigger.update(5000.0).as_slice(),
            [TriggerEvent::Enter, TriggerEvent::Leave]
        );
        assert_eq!(trigger.progress(), 1.0);
        assert_eq!(
            trigger.update(0.0).as_slice(),
            [TriggerEvent::EnterBack, TriggerEvent::LeaveBack]
        );
        assert_eq!(trigger.region(), TriggerRegion::Before);
    }

    #[test]
    fn test_zero_length_range_is_step() {
        let config = TriggerConfig::parse("top center", "top center").unwrap();
        let mut trigger = ScrollTrigger::new(config);
        trigger.refresh(&Rect::new(0.0, 600.0, 100.0, 100.0), 800.0);
        assert_eq!(trigger.progress_at(199.0), 0.0);
        assert_eq!(trigger.progress_at(200.0), 1.0);
    }

    #[test]
    fn test_progress_clamped() {
        let mut trigger = ScrollTrigger::new(TriggerConfig::default());
        trigger.refresh(&Rect::new(0.0, 1000.0, 200.0, 200.0), 800.0);
        assert_eq!(trigger.progress_at(-100.0), 0.0);
        assert_eq!(trigger.progress_at(10_000.0), 1.0);
    }
}
