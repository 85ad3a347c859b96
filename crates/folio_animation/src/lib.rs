//! Folio Animation Engine
//!
//! Easing curves, reversible tweens, and timeline orchestration.
//!
//! # Features
//!
//! - **Easing**: power/expo families, cubic-bezier, and the exponential-decay scroll curve
//! - **Tweens**: two-endpoint animations that play, reverse, pause and scrub
//! - **Timelines**: orchestrate multiple tweens with offsets
//! - **Stagger**: per-index delays for cascades and word reveals

pub mod easing;
pub mod error;
pub mod presets;
pub mod properties;
pub mod scheduler;
pub mod stagger;
pub mod timeline;
pub mod tween;

pub use easing::Easing;
pub use error::AnimationError;
pub use presets::{AnimationPreset, SlideDirection};
pub use properties::KeyframeProperties;
pub use scheduler::{AnimationScheduler, TimelineId, TweenId};
pub use stagger::{StaggerConfig, StaggerDirection};
pub use timeline::{Timeline, TimelineEntryId};
pub use tween::{PlayDirection, Tween};
