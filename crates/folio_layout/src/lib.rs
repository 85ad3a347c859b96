//! Folio Layout
//!
//! The page side of Folio: an element tree laid out with taffy, plus the
//! interaction and scroll machinery that animates it.
//!
//! - [`tree::PageTree`]: elements, classes and real geometry
//! - [`scroll::SmoothScroll`]: eased scrolling driven by wheel/touch input
//! - [`trigger::ScrollTrigger`]: viewport crossings and scroll progress
//! - [`director::ScrollDirector`]: binds animation descriptors to elements
//! - [`tilt::TiltCard`]: pointer-driven tilt and glare
//! - [`text_reveal::TextReveal`]: word-by-word reveals
//!
//! # Example
//!
//! ```rust
//! use folio_core::geometry::Size;
//! use folio_layout::prelude::*;
//!
//! let mut tree = PageTree::new();
//! let root = tree.create_root(Element::new(Tag::Main), LayoutStyle::flex_column(0.0)).unwrap();
//! tree.append(root, Element::div().class("bento-card"), LayoutStyle::block(280.0)).unwrap();
//! tree.compute_layout(Size::new(1280.0, 800.0)).unwrap();
//!
//! let mut director = ScrollDirector::new();
//! let descriptor = AnimationDescriptor::entrance(".bento-card")
//!     .from(KeyframeProperties::translate(0.0, 60.0).with_opacity(0.0));
//! director.bind(&tree, &descriptor).unwrap();
//! director.update(0.0);
//! ```

pub mod director;
pub mod element;
pub mod element_style;
pub mod error;
pub mod scroll;
pub mod selector;
pub mod style;
pub mod text_reveal;
pub mod tilt;
pub mod tree;
pub mod trigger;

pub use director::{AnimationDescriptor, AnimationMode, BindingId, Scrub, ScrollDirector, Target};
pub use element::{Element, Link, Tag};
pub use element_style::{ElementStyle, StyleTransition};
pub use error::LayoutError;
pub use scroll::{ScrollDirection, ScrollUpdate, SmoothScroll, SmoothScrollConfig};
pub use selector::Selector;
pub use style::LayoutStyle;
pub use text_reveal::{split_words, RevealTag, RevealWord, TextReveal, TextRevealConfig};
pub use tilt::{CardTone, OverlayKind, OverlayLayer, TiltCard, TiltConfig, TiltSample};
pub use tree::{ElementId, PageTree};
pub use trigger::{
    Edge, ScrollTrigger, ToggleAction, ToggleActions, TriggerConfig, TriggerEvent,
    TriggerPosition, TriggerRegion,
};

/// Commonly used types
pub mod prelude {
    pub use crate::director::{AnimationDescriptor, Scrub, ScrollDirector};
    pub use crate::element::{Element, Tag};
    pub use crate::element_style::ElementStyle;
    pub use crate::scroll::{SmoothScroll, SmoothScrollConfig};
    pub use crate::style::LayoutStyle;
    pub use crate::text_reveal::{TextReveal, TextRevealConfig};
    pub use crate::tilt::{CardTone, TiltCard};
    pub use crate::tree::{ElementId, PageTree};
    pub use crate::trigger::{ToggleActions, TriggerConfig};
    pub use folio_animation::{Easing, KeyframeProperties};
}
