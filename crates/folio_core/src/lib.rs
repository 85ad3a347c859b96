//! Folio Core Runtime
//!
//! Foundational primitives for the Folio page runtime:
//!
//! - **Geometry**: points, sizes and rectangles in logical pixels
//! - **Event Dispatch**: pointer, scroll and resize events with detachable listeners
//! - **State Machines**: flat transition tables for hover and trigger states
//! - **Frame Scheduling**: cancellable per-frame callbacks
//!
//! # Example
//!
//! ```rust
//! use folio_core::frame::FrameScheduler;
//!
//! let mut frames = FrameScheduler::new();
//! let id = frames.subscribe(|info| {
//!     assert!(info.delta_ms >= 0.0);
//! });
//! frames.tick(16.0);
//! frames.cancel(id);
//! assert_eq!(frames.active_count(), 0);
//! ```

pub mod events;
pub mod frame;
pub mod fsm;
pub mod geometry;

pub use events::{Event, EventData, EventDispatcher, EventType, ListenerId, ScrollSource};
pub use frame::{FrameCallbackId, FrameInfo, FrameScheduler};
pub use fsm::{EventId, StateChange, StateId, StateMachine, Transition};
pub use geometry::{Point, Rect, Size};
