//! Integration tests for the mounted page
//!
//! These tests verify that:
//! - Unmounting leaves no listener, frame subscription or trigger binding
//! - Card entrances converge to the same resting state on every enter
//! - Accent and neutral cards pick their own overlay treatment
//! - Headless scenarios drive pointer and scroll input end to end

use folio_app::prelude::*;
use folio_app::{run_scenario, Column, ReportStatus};
use folio_layout::{split_words, CardTone, OverlayKind};

fn settle(runtime: &mut PageRuntime, frames: usize) {
    for _ in 0..frames {
        runtime.frame(16.0);
    }
}

#[test]
fn test_unmount_releases_everything() {
    let mut runtime = PageRuntime::new(&SiteConfig::default()).unwrap();
    {
        let mut page = runtime.mount().unwrap();
        assert!(page.listener_count() > 0);
        assert!(page.trigger_count() > 0);

        page.handle_event(Event::wheel(0.0, 1500.0));
        settle(&mut page, 30);
        assert!(page.scroll_position() > 0.0);
    }

    assert_eq!(runtime.listener_count(), 0);
    assert_eq!(runtime.frame_subscription_count(), 0);
    assert_eq!(runtime.binding_count(), 0);
    assert_eq!(runtime.trigger_count(), 0);
    assert!(runtime.native_scroll_enabled());

    // Input after unmount reaches nobody
    assert_eq!(runtime.handle_event(Event::wheel(0.0, 100.0)), 0);
    runtime.frame(16.0);
    assert_eq!(runtime.scroll_position(), 0.0);
}

#[test]
fn test_explicit_unmount_is_idempotent() {
    let mut runtime = PageRuntime::new(&SiteConfig::default()).unwrap();
    let page = runtime.mount().unwrap();
    drop(page);
    assert!(!runtime.unmount());
}

#[test]
fn test_card_entrance_is_reversible() {
    let mut runtime = PageRuntime::new(&SiteConfig::default()).unwrap();
    let mut page = runtime.mount().unwrap();

    let card = page.page().cards()[3].id;
    let top = page.page().tree().rect(card).unwrap().top();
    let start = top - 0.85 * page.viewport().height;
    assert!(start > 0.0);

    let hidden = page.computed_style(card);
    assert_eq!(hidden.opacity(), 0.0);

    page.scroll_to(start + 40.0, true);
    settle(&mut page, 80);
    let rest = page.computed_style(card);
    assert_eq!(rest.opacity(), 1.0);

    page.scroll_to(0.0, true);
    settle(&mut page, 80);
    assert_eq!(page.computed_style(card), hidden);

    page.scroll_to(start + 40.0, true);
    settle(&mut page, 80);
    assert_eq!(page.computed_style(card), rest);
}

#[test]
fn test_overlays_follow_card_tone() {
    let mut runtime = PageRuntime::new(&SiteConfig::default()).unwrap();
    let page = runtime.mount().unwrap();

    for card in page.page().cards().to_vec() {
        let kinds: Vec<OverlayKind> = page
            .computed_style(card.id)
            .overlays
            .iter()
            .map(|o| o.kind)
            .collect();
        match card.tone {
            CardTone::Accent => assert_eq!(kinds, [OverlayKind::AccentGlare]),
            CardTone::Neutral => {
                assert_eq!(kinds, [OverlayKind::WarmGlare, OverlayKind::AmbientShadow])
            }
        }
    }
}

#[test]
fn test_glare_scenario() {
    let outcome = run_scenario(
        &SiteConfig::default(),
        r##"{"steps": [
            {"type": "scroll_to", "target": "#contact", "immediate": true},
            {"type": "tick", "frames": 1},
            {"type": "assert_tilt_neutral", "selector": "#contact"},
            {"type": "pointer_enter", "selector": "#contact"},
            {"type": "pointer_move", "selector": "#contact", "x": 0, "y": 0},
            {"type": "assert_glare_visible", "selector": "#contact", "visible": true},
            {"type": "pointer_leave", "selector": "#contact"},
            {"type": "assert_tilt_neutral", "selector": "#contact"},
            {"type": "assert_glare_visible", "selector": "#contact", "visible": false},
            {"type": "pointer_move", "selector": "#about", "x": 5000, "y": -5000},
            {"type": "assert_glare_visible", "selector": "#about", "visible": true}
        ]}"##,
    )
    .unwrap();

    let report = outcome.report();
    assert_eq!(report.status, ReportStatus::Passed, "{report:?}");
    assert_eq!(report.steps_run, 11);
}

#[test]
fn test_hero_intro_scenario() {
    let outcome = run_scenario(
        &SiteConfig::default(),
        r#"{"steps": [
            {"type": "assert_opacity", "selector": ".hero-tagline", "value": 0},
            {"type": "wait", "ms": 1600},
            {"type": "assert_opacity", "selector": ".hero-name", "value": 1},
            {"type": "assert_opacity", "selector": ".hero-tagline", "value": 1}
        ]}"#,
    )
    .unwrap();
    assert!(!outcome.is_failed(), "{:?}", outcome.report());
}

#[test]
fn test_wheel_glides_to_clamped_target() {
    let mut runtime = PageRuntime::new(&SiteConfig::default()).unwrap();
    let mut page = runtime.mount().unwrap();
    let limit = page.scroll_state().unwrap().limit;

    page.handle_event(Event::wheel(0.0, limit * 10.0));
    settle(&mut page, 100);
    assert_eq!(page.scroll_position(), limit);
    assert_eq!(page.scroll_state().unwrap().progress, 1.0);
}

#[test]
fn test_resize_reflows_cards() {
    let mut runtime = PageRuntime::new(&SiteConfig::default()).unwrap();
    let page = runtime.mount().unwrap();
    let about = page.find("#about").unwrap()[0];
    let before = page.page().tree().rect(about).unwrap();

    page.handle_event(Event::resize(600, 900));
    let after = page.page().tree().rect(about).unwrap();
    assert!(after.width() < before.width());
    assert_eq!(page.viewport(), Size::new(600.0, 900.0));
}

#[test]
fn test_resize_redirects_card_entrance() {
    let config = SiteConfig::default();
    let distance = config.motion.card_distance;
    let mut runtime = PageRuntime::new(&config).unwrap();
    let page = runtime.mount().unwrap();
    let card = page.page().cards()[0].clone();

    assert_eq!(page.page().card_column(&card), Column::Left);
    let hidden = page.computed_style(card.id).style.properties;
    assert_eq!(hidden.translate_x, Some(-distance));
    assert_eq!(hidden.translate_y, Some(0.0));

    // On the mobile grid the card spans the full width and rises instead
    page.handle_event(Event::resize(600, 900));
    assert_eq!(page.page().card_column(&card), Column::Center);
    let hidden = page.computed_style(card.id).style.properties;
    assert_eq!(hidden.translate_x, Some(0.0));
    assert_eq!(hidden.translate_y, Some(distance));
    assert_eq!(hidden.resolved_opacity(), 0.0);

    page.handle_event(Event::resize(1280, 800));
    let hidden = page.computed_style(card.id).style.properties;
    assert_eq!(hidden.translate_x, Some(-distance));
    assert_eq!(page.binding_count(), 17);
}

#[test]
fn test_band_headline_split_is_deterministic() {
    let config = SiteConfig::default();
    let a = Page::build(&config).unwrap();
    let b = Page::build(&config).unwrap();

    let words: Vec<&str> = a.reveal().words().iter().map(|w| w.text.as_str()).collect();
    assert_eq!(words, split_words(&config.profile.band_headline));
    assert_eq!(words, ["Building", "bold,", "creative", "solutions"]);
    assert_eq!(a.reveal().schedule(), b.reveal().schedule());
    assert_eq!(a.reveal_words().len(), 4);
}
