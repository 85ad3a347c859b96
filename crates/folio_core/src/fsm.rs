//! Flat state machines for interaction and trigger states
//!
//! Small transition tables: a hovered card (idle/active) and a scroll
//! trigger (before/active/after) are both driven through one of these so
//! every state change is explicit and observable.

use smallvec::SmallVec;

/// Identifier for a state within a state machine
pub type StateId = u32;

/// Identifier for an event type
pub type EventId = u32;

/// Maximum number of transitions kept in history
const HISTORY_LIMIT: usize = 64;

/// A transition in the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from_state: StateId,
    pub event: EventId,
    pub to_state: StateId,
}

impl Transition {
    pub const fn new(from: StateId, event: EventId, to: StateId) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
        }
    }
}

/// Record of a transition that fired
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateChange {
    pub from: StateId,
    pub event: EventId,
    pub to: StateId,
}

impl StateChange {
    /// True if the transition returned to the state it started in
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Builder for creating state machines
pub struct StateMachineBuilder {
    initial_state: StateId,
    transitions: SmallVec<[Transition; 8]>,
}

impl StateMachineBuilder {
    pub fn new(initial_state: StateId) -> Self {
        Self {
            initial_state,
            transitions: SmallVec::new(),
        }
    }

    /// Add a transition
    pub fn transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add a simple transition (from, event, to)
    pub fn on(self, from: StateId, event: EventId, to: StateId) -> Self {
        self.transition(Transition::new(from, event, to))
    }

    /// Build the state machine
    pub fn build(self) -> StateMachine {
        StateMachine {
            initial_state: self.initial_state,
            current_state: self.initial_state,
            transitions: self.transitions,
            history: Vec::new(),
        }
    }
}

/// A state machine instance
#[derive(Clone, Debug)]
pub struct StateMachine {
    initial_state: StateId,
    current_state: StateId,
    transitions: SmallVec<[Transition; 8]>,
    /// Most recent transitions, oldest first
    history: Vec<StateChange>,
}

impl StateMachine {
    /// Create a new state machine with an initial state and transitions
    pub fn new(initial_state: StateId, transitions: &[Transition]) -> Self {
        Self {
            initial_state,
            current_state: initial_state,
            transitions: transitions.iter().copied().collect(),
            history: Vec::new(),
        }
    }

    /// Create a builder for a state machine
    pub fn builder(initial_state: StateId) -> StateMachineBuilder {
        StateMachineBuilder::new(initial_state)
    }

    /// Get the current state
    pub fn current_state(&self) -> StateId {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: StateId) -> bool {
        self.current_state == state
    }

    /// Get transition history
    pub fn history(&self) -> &[StateChange] {
        &self.history
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: EventId) -> bool {
        self.find(event).is_some()
    }

    /// Send an event; returns the transition that fired, if any
    pub fn send(&mut self, event: EventId) -> Option<StateChange> {
        let transition = self.find(event)?;
        let change = StateChange {
            from: self.current_state,
            event,
            to: transition.to_state,
        };
        self.current_state = transition.to_state;

        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push(change);

        tracing::trace!(from = change.from, event, to = change.to, "fsm transition");
        Some(change)
    }

    /// Return to the initial state and forget history
    pub fn reset(&mut self) {
        self.current_state = self.initial_state;
        self.history.clear();
    }

    fn find(&self, event: EventId) -> Option<Transition> {
        self.transitions
            .iter()
            .find(|t| t.from_state == self.current_state && t.event == event)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDLE: StateId = 0;
    const ACTIVE: StateId = 1;

    const POINTER_ENTER: EventId = 1;
    const POINTER_LEAVE: EventId = 2;
    const POINTER_MOVE: EventId = 3;

    fn hover_machine() -> StateMachine {
        StateMachine::builder(IDLE)
            .on(IDLE, POINTER_ENTER, ACTIVE)
            .on(IDLE, POINTER_MOVE, ACTIVE)
            .on(ACTIVE, POINTER_MOVE, ACTIVE)
            .on(ACTIVE, POINTER_LEAVE, IDLE)
            .build()
    }

    #[test]
    fn test_simple_transitions() {
        let mut fsm = hover_machine();
        assert_eq!(fsm.current_state(), IDLE);

        let change = fsm.send(POINTER_ENTER).unwrap();
        assert_eq!(change.from, IDLE);
        assert_eq!(change.to, ACTIVE);
        assert!(fsm.is_in(ACTIVE));

        let change = fsm.send(POINTER_MOVE).unwrap();
        assert!(change.is_self_loop());

        fsm.send(POINTER_LEAVE);
        assert!(fsm.is_in(IDLE));
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut fsm = hover_machine();
        assert_eq!(fsm.send(POINTER_LEAVE), None);
        assert_eq!(fsm.current_state(), IDLE);
        assert!(fsm.history().is_empty());
    }

    #[test]
    fn test_can_send() {
        let fsm = hover_machine();
        assert!(fsm.can_send(POINTER_ENTER));
        assert!(!fsm.can_send(POINTER_LEAVE));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut fsm = hover_machine();
        for _ in 0..(HISTORY_LIMIT * 2) {
            fsm.send(POINTER_ENTER);
            fsm.send(POINTER_LEAVE);
        }
        assert_eq!(fsm.history().len(), HISTORY_LIMIT);
        let last = fsm.history().last().unwrap();
        assert_eq!(last.event, POINTER_LEAVE);
    }

    #[test]
    fn test_reset() {
        let mut fsm = hover_machine();
        fsm.send(POINTER_ENTER);
        fsm.reset();
        assert!(fsm.is_in(IDLE));
        assert!(fsm.history().is_empty());
    }
}
