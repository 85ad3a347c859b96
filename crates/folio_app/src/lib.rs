//! Folio Application
//!
//! The portfolio page itself: configuration, page composition, the mountable
//! runtime, static HTML rendering and headless scenario runs.
//!
//! # Example
//!
//! ```rust
//! use folio_app::prelude::*;
//!
//! let config = SiteConfig::default();
//! let mut runtime = PageRuntime::new(&config).unwrap();
//! {
//!     let mut page = runtime.mount().unwrap();
//!     page.handle_event(Event::wheel(0.0, 600.0));
//!     for _ in 0..60 {
//!         page.frame(16.0);
//!     }
//! }
//! // Dropping the guard released everything
//! assert_eq!(runtime.listener_count(), 0);
//! ```

pub mod config;
pub mod headless_assert;
pub mod headless_report;
pub mod headless_runner;
pub mod headless_runtime;
pub mod headless_scenario;
pub mod page;
pub mod render;
pub mod runtime;

pub use config::{
    CardConfig, LinkConfig, MotionConfig, ProfileConfig, SiteConfig, ViewportConfig, CONFIG_FILE,
};
pub use headless_report::{HeadlessReport, ReportStatus};
pub use headless_runner::{run_loaded_scenario, run_scenario, RunOutcome};
pub use headless_runtime::HeadlessRunConfig;
pub use headless_scenario::{HeadlessScenario, ScenarioStep, ScrollTarget};
pub use page::{Column, Page, PageCard};
pub use render::{render_document, render_snapshot};
pub use runtime::{ComputedStyle, MountGuard, PageRuntime};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::config::SiteConfig;
    pub use crate::page::Page;
    pub use crate::runtime::{ComputedStyle, MountGuard, PageRuntime};

    pub use folio_core::events::event_types;
    pub use folio_core::{Event, Point, Size};
    pub use folio_layout::{ElementId, TiltSample};
}
