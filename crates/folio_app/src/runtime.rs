//! Page runtime
//!
//! Owns a laid-out [`Page`] and everything that animates it: the scroll
//! director, the smooth-scroll driver, one tilt state per bento card and the
//! band headline reveal. The host feeds it events and frame ticks and reads
//! back per-element computed styles.
//!
//! Mounting binds every animation descriptor, attaches window and card
//! listeners to the event dispatcher and subscribes two frame callbacks
//! (scroll first, animations second). Unmounting releases all of it; the
//! [`MountGuard`] returned by [`PageRuntime::mount`] does so on drop.

use std::cell::{Ref, RefCell};
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use anyhow::Result;
use folio_core::events::{event_types, WINDOW_TARGET};
use folio_core::geometry::{Point, Size};
use folio_core::{Event, EventData, EventDispatcher, FrameCallbackId, FrameInfo, FrameScheduler, ListenerId};
use folio_layout::{
    BindingId, ElementId, ElementStyle, OverlayLayer, ScrollDirector, ScrollUpdate, SmoothScroll,
    Target, TiltCard, TiltSample,
};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::config::{MotionConfig, SiteConfig};
use crate::page::Page;

/// Everything the host needs to paint one element
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComputedStyle {
    pub style: ElementStyle,
    /// Glare and shadow layers of a tilt card
    pub overlays: SmallVec<[OverlayLayer; 2]>,
}

impl ComputedStyle {
    pub fn opacity(&self) -> f32 {
        self.style.properties.resolved_opacity()
    }

    pub fn is_empty(&self) -> bool {
        self.style.is_empty() && self.overlays.is_empty()
    }

    /// Inline CSS of the element itself
    pub fn to_css(&self) -> String {
        self.style.to_css()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PointerPhase {
    Enter,
    Move,
    Leave,
}

/// Mutable page state shared with listeners and frame callbacks
struct RuntimeState {
    page: Page,
    motion: MotionConfig,
    director: ScrollDirector,
    scroll: Option<SmoothScroll>,
    cards: FxHashMap<ElementId, TiltCard>,
    /// Entrance bindings of each bento card
    card_bindings: FxHashMap<ElementId, SmallVec<[BindingId; 4]>>,
}

impl RuntimeState {
    fn scroll_position(&self) -> f32 {
        self.scroll.as_ref().map_or(0.0, SmoothScroll::scroll)
    }

    fn attach(&mut self) -> Result<()> {
        let viewport = self.page.viewport();
        self.scroll = Some(SmoothScroll::new(
            self.motion.smooth_scroll_config(),
            viewport.height,
            self.page.content_height(),
        ));

        let descriptors = self.page.descriptors(&self.motion)?;
        for descriptor in &descriptors {
            let ids = self.director.bind(self.page.tree(), descriptor)?;
            if let Target::Element(element) = descriptor.target {
                if self.page.cards().iter().any(|card| card.id == element) {
                    self.card_bindings.insert(element, ids);
                }
            }
        }

        let tilt = self.motion.tilt_config();
        let tree = self.page.tree();
        self.cards = self
            .page
            .cards()
            .iter()
            .map(|card| {
                let mut state = TiltCard::with_config(card.tone, tilt);
                state.set_bounds(tree.rect(card.id));
                (card.id, state)
            })
            .collect();

        self.page.reveal_mut().mount();
        Ok(())
    }

    fn detach(&mut self) {
        self.director.revert();
        if let Some(mut scroll) = self.scroll.take() {
            scroll.destroy();
        }
        for card in self.cards.values_mut() {
            card.pointer_leave();
        }
        self.cards.clear();
        self.card_bindings.clear();
        self.page.reveal_mut().unmount();
    }

    fn resize(&mut self, viewport: Size) -> Result<()> {
        self.page.layout(viewport)?;
        if let Some(scroll) = self.scroll.as_mut() {
            scroll.resize(viewport.height, self.page.content_height());
        }
        let tree = self.page.tree();
        for (id, card) in self.cards.iter_mut() {
            card.set_bounds(tree.rect(*id));
        }
        self.director.refresh(tree);
        self.retarget_cards()?;
        tracing::debug!(width = viewport.width, height = viewport.height, "page resized");
        Ok(())
    }

    /// Point every card entrance at the direction of its current column
    fn retarget_cards(&mut self) -> Result<()> {
        for card in self.page.cards() {
            let Some(ids) = self.card_bindings.get(&card.id) else {
                continue;
            };
            let descriptor = self.page.card_descriptor(card, &self.motion)?;
            for id in ids {
                self.director.retarget(*id, descriptor.from, descriptor.to);
            }
        }
        Ok(())
    }

    fn pointer(&mut self, card: ElementId, phase: PointerPhase, position: Option<Point>) {
        let scroll = self.scroll_position();
        let Some(tilt) = self.cards.get_mut(&card) else {
            return;
        };
        match phase {
            PointerPhase::Enter => tilt.pointer_enter(),
            PointerPhase::Leave => tilt.pointer_leave(),
            PointerPhase::Move => match position.and_then(|p| tilt.to_local(p, scroll)) {
                Some(local) => {
                    tilt.pointer_move(local);
                }
                None => tracing::debug!(?card, "pointer sample without geometry, skipped"),
            },
        }
    }

    fn advance_scroll(&mut self, dt_ms: f32) {
        let update = self.scroll.as_mut().and_then(|s| s.raf(dt_ms));
        if let Some(update) = update {
            self.director.update(update.scroll);
        }
    }

    fn advance_animations(&mut self, dt_ms: f32) {
        self.director.tick(dt_ms);
        self.page.reveal_mut().tick(dt_ms);
    }

    fn computed_style(&self, id: ElementId) -> ComputedStyle {
        let mut style = self.director.style(id).cloned().unwrap_or_default();

        let reveal = self.page.reveal();
        if reveal.is_mounted() {
            if id == self.page.reveal_container() {
                style = style.merge(&ElementStyle::from_properties(reveal.container_properties()));
            } else if let Some(index) = self.page.reveal_words().iter().position(|w| *w == id) {
                if let Some(props) = reveal.word_properties(index) {
                    style = style.merge(&ElementStyle::from_properties(props));
                }
            }
        }

        let overlays = match self.cards.get(&id) {
            Some(card) => {
                style = style.merge(&card.style());
                card.overlays()
            }
            None => SmallVec::new(),
        };

        ComputedStyle { style, overlays }
    }
}

struct MountHandles {
    listeners: Vec<ListenerId>,
    frames: SmallVec<[FrameCallbackId; 2]>,
}

/// A mountable portfolio page
pub struct PageRuntime {
    state: Rc<RefCell<RuntimeState>>,
    dispatcher: EventDispatcher,
    frames: FrameScheduler,
    handles: Option<MountHandles>,
}

impl PageRuntime {
    /// Build and lay out the page for the configured viewport
    pub fn new(config: &SiteConfig) -> Result<Self> {
        config.motion.validate()?;
        let mut page = Page::build(config)?;
        page.layout(Size::new(
            config.viewport.width as f32,
            config.viewport.height as f32,
        ))?;

        Ok(Self {
            state: Rc::new(RefCell::new(RuntimeState {
                page,
                motion: config.motion.clone(),
                director: ScrollDirector::new(),
                scroll: None,
                cards: FxHashMap::default(),
                card_bindings: FxHashMap::default(),
            })),
            dispatcher: EventDispatcher::new(),
            frames: FrameScheduler::new(),
            handles: None,
        })
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Bind animations, attach listeners and subscribe frame callbacks. A
    /// mounted runtime is unmounted first. The returned guard unmounts when
    /// dropped.
    pub fn mount(&mut self) -> Result<MountGuard<'_>> {
        self.unmount();

        {
            let mut state = self.state.borrow_mut();
            if let Err(err) = state.attach() {
                state.detach();
                return Err(err);
            }
        }

        let mut listeners = Vec::new();

        let state = Rc::clone(&self.state);
        listeners.push(self.dispatcher.register(
            WINDOW_TARGET,
            event_types::SCROLL,
            move |event| {
                if let Some(scroll) = state.borrow_mut().scroll.as_mut() {
                    scroll.handle_event(event);
                }
            },
        ));

        let state = Rc::clone(&self.state);
        listeners.push(self.dispatcher.register(
            WINDOW_TARGET,
            event_types::RESIZE,
            move |event| {
                if let EventData::Resize { width, height } = event.data {
                    let viewport = Size::new(width as f32, height as f32);
                    if let Err(err) = state.borrow_mut().resize(viewport) {
                        tracing::warn!(%err, "relayout after resize failed");
                    }
                }
            },
        ));

        let cards: Vec<ElementId> = self.state.borrow().cards.keys().copied().collect();
        for card in cards {
            for (event_type, phase) in [
                (event_types::POINTER_ENTER, PointerPhase::Enter),
                (event_types::POINTER_MOVE, PointerPhase::Move),
                (event_types::POINTER_LEAVE, PointerPhase::Leave),
            ] {
                let state = Rc::clone(&self.state);
                listeners.push(self.dispatcher.register(
                    card.to_target(),
                    event_type,
                    move |event| {
                        state
                            .borrow_mut()
                            .pointer(card, phase, event.pointer_position());
                    },
                ));
            }
        }

        let mut frames = SmallVec::new();
        let state = Rc::clone(&self.state);
        frames.push(
            self.frames
                .subscribe(move |info| state.borrow_mut().advance_scroll(info.delta_ms)),
        );
        let state = Rc::clone(&self.state);
        frames.push(
            self.frames
                .subscribe(move |info| state.borrow_mut().advance_animations(info.delta_ms)),
        );

        tracing::info!(
            bindings = self.binding_count(),
            listeners = listeners.len(),
            cards = self.state.borrow().cards.len(),
            "page mounted"
        );
        self.handles = Some(MountHandles { listeners, frames });
        Ok(MountGuard { runtime: self })
    }

    /// Release every binding, listener and frame subscription. Returns false
    /// when nothing was mounted.
    pub fn unmount(&mut self) -> bool {
        let Some(handles) = self.handles.take() else {
            return false;
        };
        for id in handles.frames {
            self.frames.cancel(id);
        }
        for id in handles.listeners {
            self.dispatcher.unregister(id);
        }
        self.state.borrow_mut().detach();
        tracing::info!("page unmounted");
        true
    }

    pub fn is_mounted(&self) -> bool {
        self.handles.is_some()
    }

    // =========================================================================
    // Host input
    // =========================================================================

    /// Dispatch an event to the page. Returns the number of listeners that
    /// saw it.
    pub fn handle_event(&self, mut event: Event) -> usize {
        self.dispatcher.dispatch(&mut event)
    }

    /// Run one animation frame
    pub fn frame(&mut self, dt_ms: f32) -> FrameInfo {
        self.frames.tick(dt_ms)
    }

    /// Scroll to a document offset
    pub fn scroll_to(&self, offset: f32, immediate: bool) -> bool {
        match self.state.borrow_mut().scroll.as_mut() {
            Some(scroll) => {
                scroll.scroll_to(offset, immediate);
                true
            }
            None => false,
        }
    }

    /// Scroll to an in-page anchor such as `#contact`. Unknown anchors are
    /// ignored.
    pub fn scroll_to_anchor(&self, anchor: &str, immediate: bool) -> bool {
        let offset = self.state.borrow().page.anchor_offset(anchor);
        match offset {
            Some(offset) => self.scroll_to(offset, immediate),
            None => {
                tracing::debug!(anchor, "anchor not found");
                false
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn page(&self) -> Ref<'_, Page> {
        Ref::map(self.state.borrow(), |s| &s.page)
    }

    /// Elements matching a selector
    pub fn find(&self, selector: &str) -> Result<Vec<ElementId>> {
        Ok(self.state.borrow().page.tree().query_str(selector)?)
    }

    pub fn computed_style(&self, id: ElementId) -> ComputedStyle {
        self.state.borrow().computed_style(id)
    }

    /// Computed style of every element that carries one, in document order
    pub fn computed_styles(&self) -> Vec<(ElementId, ComputedStyle)> {
        let state = self.state.borrow();
        state
            .page
            .tree()
            .document_order()
            .into_iter()
            .map(|id| (id, state.computed_style(id)))
            .filter(|(_, style)| !style.is_empty())
            .collect()
    }

    pub fn tilt_sample(&self, card: ElementId) -> Option<TiltSample> {
        self.state.borrow().cards.get(&card).map(TiltCard::sample)
    }

    pub fn is_card_active(&self, card: ElementId) -> bool {
        self.state
            .borrow()
            .cards
            .get(&card)
            .is_some_and(TiltCard::is_active)
    }

    pub fn glare_visible(&self, card: ElementId) -> bool {
        self.state
            .borrow()
            .cards
            .get(&card)
            .is_some_and(TiltCard::glare_visible)
    }

    pub fn scroll_state(&self) -> Option<ScrollUpdate> {
        self.state.borrow().scroll.as_ref().map(SmoothScroll::state)
    }

    pub fn scroll_position(&self) -> f32 {
        self.state.borrow().scroll_position()
    }

    pub fn native_scroll_enabled(&self) -> bool {
        self.state
            .borrow()
            .scroll
            .as_ref()
            .map_or(true, SmoothScroll::native_scroll_enabled)
    }

    pub fn viewport(&self) -> Size {
        self.state.borrow().page.viewport()
    }

    pub fn listener_count(&self) -> usize {
        self.dispatcher.listener_count()
    }

    pub fn frame_subscription_count(&self) -> usize {
        self.frames.active_count()
    }

    pub fn binding_count(&self) -> usize {
        self.state.borrow().director.binding_count()
    }

    pub fn trigger_count(&self) -> usize {
        self.state.borrow().director.trigger_count()
    }

    pub fn is_animating(&self) -> bool {
        let state = self.state.borrow();
        state.director.is_animating()
            || state.scroll.as_ref().is_some_and(SmoothScroll::is_scrolling)
    }
}

impl Drop for PageRuntime {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Keeps a runtime mounted; unmounts on drop
pub struct MountGuard<'a> {
    runtime: &'a mut PageRuntime,
}

impl Deref for MountGuard<'_> {
    type Target = PageRuntime;

    fn deref(&self) -> &PageRuntime {
        self.runtime
    }
}

impl DerefMut for MountGuard<'_> {
    fn deref_mut(&mut self) -> &mut PageRuntime {
        self.runtime
    }
}

impl Drop for MountGuard<'_> {
    fn drop(&mut self) {
        self.runtime.unmount();
    }
}
