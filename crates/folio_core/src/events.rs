//! Event dispatch system
//!
//! Host-agnostic input events and a dispatcher whose listeners can be
//! detached individually, so a page can release everything it bound on
//! unmount.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::geometry::Point;

/// Event type identifier
pub type EventType = u32;

/// Target id used for window-level listeners (scroll, resize)
pub const WINDOW_TARGET: u64 = 0;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    /// Wheel or touch scroll input
    pub const SCROLL: EventType = 30;
    pub const RESIZE: EventType = 40;

    // Element lifecycle events
    pub const MOUNT: EventType = 60;
    pub const UNMOUNT: EventType = 61;
}

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    /// Element id, or [`WINDOW_TARGET`]
    pub target: u64,
    pub data: EventData,
    pub timestamp: u64,
    pub propagation_stopped: bool,
}

impl Event {
    pub fn new(event_type: EventType, target: u64, data: EventData) -> Self {
        Self {
            event_type,
            target,
            data,
            timestamp: 0,
            propagation_stopped: false,
        }
    }

    /// Pointer event in viewport coordinates
    pub fn pointer(event_type: EventType, target: u64, x: f32, y: f32) -> Self {
        Self::new(event_type, target, EventData::Pointer { x, y })
    }

    /// Wheel scroll on the window
    pub fn wheel(delta_x: f32, delta_y: f32) -> Self {
        Self::new(
            event_types::SCROLL,
            WINDOW_TARGET,
            EventData::Scroll {
                delta_x,
                delta_y,
                source: ScrollSource::Wheel,
            },
        )
    }

    /// Touch drag scroll on the window
    pub fn touch_scroll(delta_x: f32, delta_y: f32) -> Self {
        Self::new(
            event_types::SCROLL,
            WINDOW_TARGET,
            EventData::Scroll {
                delta_x,
                delta_y,
                source: ScrollSource::Touch,
            },
        )
    }

    pub fn resize(width: u32, height: u32) -> Self {
        Self::new(
            event_types::RESIZE,
            WINDOW_TARGET,
            EventData::Resize { width, height },
        )
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Pointer position carried by the event, if any
    pub fn pointer_position(&self) -> Option<Point> {
        match self.data {
            EventData::Pointer { x, y } => Some(Point::new(x, y)),
            _ => None,
        }
    }
}

/// Where a scroll delta came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollSource {
    Wheel,
    Touch,
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    /// Pointer position in viewport coordinates
    Pointer { x: f32, y: f32 },
    Scroll {
        delta_x: f32,
        delta_y: f32,
        source: ScrollSource,
    },
    Resize { width: u32, height: u32 },
    None,
}

new_key_type! {
    /// Handle returned by [`EventDispatcher::register`]
    pub struct ListenerId;
}

/// Event handler function type
pub type EventHandler = Box<dyn Fn(&Event)>;

struct Listener {
    key: (u64, EventType),
    handler: EventHandler,
}

/// Dispatches events to registered handlers
pub struct EventDispatcher {
    listeners: SlotMap<ListenerId, Listener>,
    /// Registration order per (target, event type)
    routes: FxHashMap<(u64, EventType), SmallVec<[ListenerId; 2]>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            listeners: SlotMap::with_key(),
            routes: FxHashMap::default(),
        }
    }

    /// Register an event handler for a target and event type
    pub fn register<F>(&mut self, target: u64, event_type: EventType, handler: F) -> ListenerId
    where
        F: Fn(&Event) + 'static,
    {
        let key = (target, event_type);
        let id = self.listeners.insert(Listener {
            key,
            handler: Box::new(handler),
        });
        self.routes.entry(key).or_default().push(id);
        id
    }

    /// Detach a listener. Returns false if it was already gone.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let Some(listener) = self.listeners.remove(id) else {
            return false;
        };
        if let Some(route) = self.routes.get_mut(&listener.key) {
            route.retain(|l| *l != id);
            if route.is_empty() {
                self.routes.remove(&listener.key);
            }
        }
        true
    }

    /// Dispatch an event to all registered handlers in registration order
    pub fn dispatch(&self, event: &mut Event) -> usize {
        let Some(route) = self.routes.get(&(event.target, event.event_type)) else {
            return 0;
        };
        let mut delivered = 0;
        for id in route {
            if event.propagation_stopped {
                break;
            }
            if let Some(listener) = self.listeners.get(*id) {
                (listener.handler)(event);
                delivered += 1;
            }
        }
        delivered
    }

    /// Number of attached listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_dispatch_routes_by_target_and_type() {
        let mut dispatcher = EventDispatcher::new();
        let hits = Rc::new(Cell::new(0));

        let h = hits.clone();
        dispatcher.register(7, event_types::POINTER_MOVE, move |_| h.set(h.get() + 1));

        let mut event = Event::pointer(event_types::POINTER_MOVE, 7, 1.0, 2.0);
        assert_eq!(dispatcher.dispatch(&mut event), 1);

        let mut other_target = Event::pointer(event_types::POINTER_MOVE, 8, 1.0, 2.0);
        assert_eq!(dispatcher.dispatch(&mut other_target), 0);

        let mut other_type = Event::pointer(event_types::POINTER_ENTER, 7, 1.0, 2.0);
        assert_eq!(dispatcher.dispatch(&mut other_type), 0);

        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_unregister_detaches_listener() {
        let mut dispatcher = EventDispatcher::new();
        let hits = Rc::new(Cell::new(0));

        let h = hits.clone();
        let id = dispatcher.register(WINDOW_TARGET, event_types::SCROLL, move |_| {
            h.set(h.get() + 1)
        });
        assert_eq!(dispatcher.listener_count(), 1);

        assert!(dispatcher.unregister(id));
        assert!(!dispatcher.unregister(id));
        assert!(dispatcher.is_empty());

        let mut event = Event::wheel(0.0, 100.0);
        dispatcher.dispatch(&mut event);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_stop_propagation() {
        let mut dispatcher = EventDispatcher::new();
        let hits = Rc::new(Cell::new(0));

        dispatcher.register(1, event_types::POINTER_LEAVE, |_| {});
        let h = hits.clone();
        dispatcher.register(1, event_types::POINTER_LEAVE, move |_| h.set(h.get() + 1));

        let mut event = Event::pointer(event_types::POINTER_LEAVE, 1, 0.0, 0.0);
        event.stop_propagation();
        assert_eq!(dispatcher.dispatch(&mut event), 0);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_pointer_position() {
        let event = Event::pointer(event_types::POINTER_MOVE, 1, 3.0, 4.0);
        assert_eq!(event.pointer_position(), Some(Point::new(3.0, 4.0)));
        assert_eq!(Event::resize(10, 10).pointer_position(), None);
    }
}
