//! Integration tests for smooth scrolling + scroll triggers + director
//!
//! These tests verify that:
//! - Published scroll positions drive entrance toggles
//! - Scrubbed animations follow the eased scroll position
//! - Resizing re-lays out the page and moves trigger offsets

use folio_core::frame::FrameScheduler;
use folio_core::geometry::Size;
use folio_layout::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

struct Page {
    tree: PageTree,
    band: ElementId,
    card: ElementId,
}

fn build(viewport: Size) -> Page {
    let mut tree = PageTree::new();
    let root = tree
        .create_root(Element::new(Tag::Main), LayoutStyle::flex_column(0.0))
        .unwrap();
    let band = tree
        .append(root, Element::new(Tag::Section).class("transition-band"), LayoutStyle::block(1200.0))
        .unwrap();
    let card = tree
        .append(root, Element::div().class("bento-card"), LayoutStyle::block(300.0))
        .unwrap();
    tree.append(root, Element::new(Tag::Footer), LayoutStyle::block(600.0))
        .unwrap();
    tree.compute_layout(viewport).unwrap();
    Page { tree, band, card }
}

#[test]
fn test_smooth_scroll_drives_entrance() {
    let viewport = Size::new(1024.0, 800.0);
    let page = build(viewport);
    let director = Rc::new(RefCell::new(ScrollDirector::new()));
    director
        .borrow_mut()
        .bind(
            &page.tree,
            &AnimationDescriptor::entrance(".bento-card")
                .from(KeyframeProperties::translate(0.0, 60.0).with_opacity(0.0))
                .duration(800)
                .trigger(TriggerConfig::parse("top 85%", "bottom top").unwrap()),
        )
        .unwrap();

    let scroll = Rc::new(RefCell::new(SmoothScroll::new(
        SmoothScrollConfig::default(),
        viewport.height,
        page.tree.content_height(),
    )));

    let mut frames = FrameScheduler::new();
    {
        let scroll = scroll.clone();
        let director = director.clone();
        frames.subscribe(move |info| {
            if let Some(update) = scroll.borrow_mut().raf(info.delta_ms) {
                director.borrow_mut().update(update.scroll);
            }
        });
    }
    {
        let director = director.clone();
        frames.subscribe(move |info| {
            director.borrow_mut().tick(info.delta_ms);
        });
    }

    // Card top = 1200, start = 1200 - 680 = 520
    scroll.borrow_mut().on_wheel(700.0);
    for _ in 0..150 {
        frames.tick(16.0);
    }
    assert_eq!(scroll.borrow().scroll(), 700.0);
    let style = director.borrow().style(page.card).cloned().unwrap();
    assert_eq!(style.properties.resolved_opacity(), 1.0);

    scroll.borrow_mut().scroll_to(0.0, false);
    for _ in 0..150 {
        frames.tick(16.0);
    }
    let style = director.borrow().style(page.card).cloned().unwrap();
    assert_eq!(style.properties.resolved_opacity(), 0.0);
}

#[test]
fn test_scrub_sweeps_background() {
    let viewport = Size::new(1024.0, 800.0);
    let page = build(viewport);
    let mut director = ScrollDirector::new();
    director
        .bind(
            &page.tree,
            &AnimationDescriptor::scrub(".transition-band", Scrub::Direct)
                .from(KeyframeProperties::default().with_background_position_x(0.0))
                .to(KeyframeProperties::default().with_background_position_x(100.0))
                .trigger(TriggerConfig::parse("top top", "bottom top").unwrap()),
        )
        .unwrap();

    director.update(300.0);
    let x = director.style(page.band).unwrap().properties.background_position_x.unwrap();
    assert!((x - 25.0).abs() < 1e-3);
    assert_eq!(
        director.style(page.band).unwrap().to_css(),
        "background-position: 25% 50%"
    );
}

#[test]
fn test_resize_moves_triggers() {
    let mut page = build(Size::new(1024.0, 800.0));
    let mut director = ScrollDirector::new();
    director
        .bind(
            &page.tree,
            &AnimationDescriptor::entrance(".bento-card")
                .from(KeyframeProperties::opacity(0.0))
                .trigger(TriggerConfig::parse("top bottom", "bottom top").unwrap()),
        )
        .unwrap();

    // start = 1200 - 800 = 400; a taller viewport starts earlier
    director.update(350.0);
    director.tick(1000.0);
    assert_eq!(director.style(page.card).unwrap().properties.resolved_opacity(), 0.0);

    page.tree.compute_layout(Size::new(1024.0, 900.0)).unwrap();
    director.refresh(&page.tree);
    director.tick(1000.0);
    assert_eq!(director.style(page.card).unwrap().properties.resolved_opacity(), 1.0);
}
