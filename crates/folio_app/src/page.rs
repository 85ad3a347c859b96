//! Page composition
//!
//! Declares the portfolio's element tree (navigation, hero, transition band,
//! bento grid, footer) from the site profile, lays it out for a viewport, and
//! produces the data-driven list of animation descriptors the director binds
//! at mount.

use anyhow::Result;
use folio_animation::{Easing, KeyframeProperties};
use folio_core::geometry::{Rect, Size};
use folio_layout::style::{LayoutStyle, Style};
use folio_layout::{
    AnimationDescriptor, CardTone, Element, ElementId, PageTree, RevealTag, Scrub, Tag,
    TextReveal, TextRevealConfig, TriggerConfig, TriggerPosition,
};

use crate::config::{CardConfig, LinkConfig, MotionConfig, ProfileConfig, SiteConfig};

/// Viewport width from which the desktop grid applies
pub const DESKTOP_BREAKPOINT: f32 = 768.0;
pub const NAV_HEIGHT: f32 = 72.0;
pub const GRID_ROW_HEIGHT: f32 = 140.0;
pub const GRID_GAP: f32 = 16.0;
pub const CONTENT_MAX_WIDTH: f32 = 1152.0;

const DESKTOP_COLUMNS: u16 = 6;
const MOBILE_COLUMNS: u16 = 4;

/// Horizontal position of a card within its grid row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    Left,
    Center,
    Right,
}

impl Column {
    /// Classify a card from its rectangle and the grid's. Cards touching
    /// both edges (full width) count as centered.
    pub fn classify(card: &Rect, grid: &Rect) -> Self {
        let touches_left = (card.left() - grid.left()).abs() < 1.0;
        let touches_right = (card.right() - grid.right()).abs() < 1.0;
        match (touches_left, touches_right) {
            (true, false) => Column::Left,
            (false, true) => Column::Right,
            _ => Column::Center,
        }
    }
}

/// A laid-out bento card
#[derive(Clone, Debug, PartialEq)]
pub struct PageCard {
    pub id: ElementId,
    pub index: usize,
    pub tone: CardTone,
    pub columns: u16,
    pub mobile_columns: u16,
    pub rows: u16,
}

/// The portfolio page
pub struct Page {
    tree: PageTree,
    hero: ElementId,
    grid: ElementId,
    cards: Vec<PageCard>,
    reveal: TextReveal,
    reveal_container: ElementId,
    reveal_words: Vec<ElementId>,
    viewport: Size,
}

impl Page {
    /// Build the element tree from a site configuration
    pub fn build(config: &SiteConfig) -> Result<Self> {
        let profile = &config.profile;
        let mut tree = PageTree::new();

        let root = tree.create_root(
            Element::new(Tag::Main).class("min-h-screen bg-background font-sans"),
            LayoutStyle::flex_column(0.0),
        )?;

        build_nav(&mut tree, root, profile)?;
        let hero = build_hero(&mut tree, root, profile)?;

        // Transition band with a word-by-word headline
        let band = tree.append(
            root,
            Element::new(Tag::Section).class(
                "transition-band bg-gradient-to-r from-background via-accent/20 to-background bg-[length:200%_100%]",
            ),
            LayoutStyle::padded(LayoutStyle::centered(320.0), 24.0, 0.0),
        )?;
        let reveal = TextReveal::new(
            &profile.band_headline,
            TextRevealConfig::default()
                .tag(RevealTag::H2)
                .delay(200)
                .font_size(36.0),
        );
        let (reveal_container, reveal_words) = reveal.build(
            &mut tree,
            band,
            "band-headline font-heading text-4xl font-semibold",
        )?;

        let (grid, cards) = build_bento(&mut tree, root, profile)?;
        build_footer(&mut tree, root, profile)?;

        Ok(Self {
            tree,
            hero,
            grid,
            cards,
            reveal,
            reveal_container,
            reveal_words,
            viewport: Size::default(),
        })
    }

    /// Apply responsive styles and compute the layout
    pub fn layout(&mut self, viewport: Size) -> Result<()> {
        let desktop = viewport.width >= DESKTOP_BREAKPOINT;

        self.tree.set_style(self.hero, hero_style(viewport.height))?;

        let columns = if desktop { DESKTOP_COLUMNS } else { MOBILE_COLUMNS };
        self.tree.set_style(
            self.grid,
            LayoutStyle::grid(columns, GRID_ROW_HEIGHT, GRID_GAP),
        )?;
        for card in &self.cards {
            let span = if desktop {
                card.columns
            } else {
                card.mobile_columns
            };
            let padding = if card.rows > 1 { 32.0 } else { 24.0 };
            self.tree.set_style(
                card.id,
                LayoutStyle::card(span.min(columns), card.rows, padding),
            )?;
        }

        self.tree.compute_layout(viewport)?;
        self.viewport = viewport;
        Ok(())
    }

    pub fn tree(&self) -> &PageTree {
        &self.tree
    }

    pub fn cards(&self) -> &[PageCard] {
        &self.cards
    }

    pub fn hero(&self) -> ElementId {
        self.hero
    }

    pub fn grid(&self) -> ElementId {
        self.grid
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn reveal(&self) -> &TextReveal {
        &self.reveal
    }

    pub fn reveal_mut(&mut self) -> &mut TextReveal {
        &mut self.reveal
    }

    pub fn reveal_container(&self) -> ElementId {
        self.reveal_container
    }

    pub fn reveal_words(&self) -> &[ElementId] {
        &self.reveal_words
    }

    pub fn content_height(&self) -> f32 {
        self.tree.content_height()
    }

    /// Document offset of an in-page anchor such as `#about`
    pub fn anchor_offset(&self, anchor: &str) -> Option<f32> {
        let id = anchor.strip_prefix('#').unwrap_or(anchor);
        let element = self.tree.find_by_id(id)?;
        self.tree.rect(element).map(|r| r.top())
    }

    /// Column of a card in the current layout
    pub fn card_column(&self, card: &PageCard) -> Column {
        match (self.tree.rect(card.id), self.tree.rect(self.grid)) {
            (Some(card_rect), Some(grid_rect)) => Column::classify(&card_rect, &grid_rect),
            _ => Column::Center,
        }
    }

    // =========================================================================
    // Animation descriptors
    // =========================================================================

    /// Every animation the page binds at mount, in binding order
    pub fn descriptors(&self, motion: &MotionConfig) -> Result<Vec<AnimationDescriptor>> {
        let hero_easing = motion.hero_easing()?;
        let scrub = if motion.scrub_lag > 0.0 {
            Scrub::Lag(motion.scrub_lag)
        } else {
            Scrub::Direct
        };

        let mut descriptors = Vec::new();

        // Hero entrance, on load
        for (selector, distance, delay) in [
            (".hero-name", 100.0, 0),
            (".hero-title", 50.0, 300),
            (".hero-tagline", 30.0, 500),
        ] {
            descriptors.push(
                AnimationDescriptor::immediate(selector)
                    .from(KeyframeProperties::translate(0.0, distance).with_opacity(0.0))
                    .duration(motion.hero_duration_ms)
                    .delay(delay)
                    .easing(hero_easing),
            );
        }

        // Hero content drifts down and fades as the hero scrolls away
        let hero_exit = TriggerConfig::parse("top top", "bottom top")?;
        descriptors.push(
            AnimationDescriptor::scrub(".hero-content", scrub)
                .trigger_target(self.hero)
                .trigger(hero_exit)
                .from(KeyframeProperties::default().with_translate_y(0.0).with_opacity(1.0))
                .to(KeyframeProperties::default().with_translate_y(150.0).with_opacity(0.0)),
        );

        // Transition band: gradient sweep and headline parallax
        let band_pass = TriggerConfig::parse("top bottom", "bottom top")?;
        descriptors.push(
            AnimationDescriptor::scrub(".transition-band", scrub)
                .trigger(band_pass)
                .from(KeyframeProperties::default().with_background_position_x(0.0))
                .to(KeyframeProperties::default().with_background_position_x(100.0)),
        );
        descriptors.push(
            AnimationDescriptor::scrub(".band-headline", scrub)
                .trigger_target(".transition-band")
                .trigger(band_pass)
                .from(KeyframeProperties::default().with_translate_y(40.0))
                .to(KeyframeProperties::default().with_translate_y(-40.0)),
        );

        // Bento cascade
        for card in &self.cards {
            descriptors.push(self.card_descriptor(card, motion)?);
        }

        descriptors.push(
            AnimationDescriptor::entrance(".footer-content")
                .trigger(TriggerConfig {
                    start: TriggerPosition::parse("top 95%")?,
                    ..TriggerConfig::default()
                })
                .from(KeyframeProperties::translate(0.0, 30.0).with_opacity(0.0))
                .duration(600)
                .easing(Easing::EaseOutCubic),
        );

        Ok(descriptors)
    }

    /// Entrance for one bento card: direction from its column, rotation sign
    /// from index parity, delay restarting every four cards
    pub fn card_descriptor(
        &self,
        card: &PageCard,
        motion: &MotionConfig,
    ) -> Result<AnimationDescriptor> {
        let distance = motion.card_distance;
        let rotation = if card.index % 2 == 0 {
            -motion.card_rotation
        } else {
            motion.card_rotation
        };

        let from = match self.card_column(card) {
            Column::Left => KeyframeProperties::translate(-distance, 0.0),
            Column::Right => KeyframeProperties::translate(distance, 0.0),
            Column::Center => KeyframeProperties::translate(0.0, distance),
        }
        .with_rotate(rotation)
        .with_opacity(0.0);

        Ok(AnimationDescriptor::entrance(card.id)
            .trigger(TriggerConfig {
                start: motion.card_start()?,
                ..TriggerConfig::default()
            })
            .toggle_actions(motion.card_toggle_actions()?)
            .from(from)
            .duration(motion.card_duration_ms)
            .delay((card.index % 4) as u32 * motion.card_stagger_ms)
            .easing(motion.card_easing()?))
    }
}

fn hero_style(viewport_height: f32) -> Style {
    LayoutStyle::padded_top(
        LayoutStyle::padded(LayoutStyle::centered(viewport_height), 24.0, 0.0),
        NAV_HEIGHT + 8.0,
    )
}

// ============================================================================
// Sections
// ============================================================================

fn link_element(link: &LinkConfig, base_class: &str) -> Element {
    let el = Element::new(Tag::A).class(base_class).text(link.label.clone());
    let el = match &link.class {
        Some(extra) => el.class(extra),
        None => el,
    };
    if link.external {
        el.external_href(link.href.clone())
    } else {
        el.href(link.href.clone())
    }
}

fn build_nav(tree: &mut PageTree, root: ElementId, profile: &ProfileConfig) -> Result<()> {
    let nav = tree.append(
        root,
        Element::new(Tag::Nav).class("fixed top-0 left-0 right-0 z-50 px-6 py-4"),
        LayoutStyle::padded(LayoutStyle::pinned_top(NAV_HEIGHT), 24.0, 16.0),
    )?;
    let bar = tree.append(
        nav,
        Element::div().class("mx-auto max-w-6xl flex items-center justify-between"),
        LayoutStyle::max_width(LayoutStyle::space_between(), CONTENT_MAX_WIDTH),
    )?;
    tree.append(
        bar,
        Element::span()
            .class("font-heading text-xl font-semibold tracking-tight")
            .text(profile.handle.clone()),
        LayoutStyle::fixed_size(120.0, 28.0),
    )?;
    let links = tree.append(
        bar,
        Element::div().class("flex items-center gap-8"),
        LayoutStyle::flex_row(32.0),
    )?;
    for link in &profile.nav {
        tree.append(
            links,
            link_element(link, "text-sm text-muted-foreground hover:text-foreground transition-colors"),
            LayoutStyle::fixed_size(link.label.chars().count() as f32 * 8.0, 20.0),
        )?;
    }
    Ok(())
}

fn build_hero(tree: &mut PageTree, root: ElementId, profile: &ProfileConfig) -> Result<ElementId> {
    let hero = tree.append(
        root,
        Element::new(Tag::Section)
            .id("hero")
            .class("hero min-h-screen flex flex-col items-center justify-center px-6 pt-20"),
        hero_style(0.0),
    )?;
    let content = tree.append(
        hero,
        Element::div().class("hero-content text-center max-w-4xl"),
        LayoutStyle::flex_column(16.0),
    )?;
    tree.append(
        content,
        Element::new(Tag::H1)
            .class("hero-name font-heading text-6xl md:text-8xl font-semibold tracking-tight mb-4")
            .text(profile.name.clone()),
        LayoutStyle::block(96.0),
    )?;
    tree.append(
        content,
        Element::new(Tag::P)
            .class("hero-title text-xl md:text-2xl text-muted-foreground mb-6")
            .text(profile.role.clone()),
        LayoutStyle::block(32.0),
    )?;

    let tagline = tree.append(
        content,
        Element::new(Tag::P).class("hero-tagline text-lg text-muted-foreground max-w-xl mx-auto"),
        LayoutStyle::wrap_row(0.0),
    )?;
    for segment in highlight_segments(&profile.tagline, &profile.highlights) {
        let el = match segment {
            Segment::Plain(text) => Element::span().text(text),
            Segment::Highlight(text) => Element::span()
                .class("text-foreground font-medium")
                .text(text),
        };
        tree.append(tagline, el, LayoutStyle::block(28.0))?;
    }

    let indicator = tree.append(
        hero,
        Element::div().class("scroll-indicator absolute bottom-10 left-1/2 -translate-x-1/2"),
        LayoutStyle::pinned_bottom(24.0, 40.0, 40.0),
    )?;
    tree.append(
        indicator,
        Element::div().class("w-1 h-3 bg-muted-foreground/50 rounded-full mt-2 animate-bounce"),
        LayoutStyle::fixed_size(4.0, 12.0),
    )?;
    Ok(hero)
}

fn build_bento(
    tree: &mut PageTree,
    root: ElementId,
    profile: &ProfileConfig,
) -> Result<(ElementId, Vec<PageCard>)> {
    let section = tree.append(
        root,
        Element::new(Tag::Section).class("bento px-6 py-20"),
        LayoutStyle::padded(LayoutStyle::flex_column(0.0), 24.0, 80.0),
    )?;
    let container = tree.append(
        section,
        Element::div().class("mx-auto max-w-6xl"),
        LayoutStyle::max_width(LayoutStyle::flex_column(32.0), CONTENT_MAX_WIDTH),
    )?;
    tree.append(
        container,
        Element::new(Tag::P)
            .class("section-label text-sm text-muted-foreground uppercase tracking-widest mb-8")
            .text(profile.section_label.clone()),
        LayoutStyle::block(20.0),
    )?;
    let grid = tree.append(
        container,
        Element::div().class("bento-grid grid grid-cols-4 md:grid-cols-6 gap-4 auto-rows-[140px]"),
        LayoutStyle::grid(DESKTOP_COLUMNS, GRID_ROW_HEIGHT, GRID_GAP),
    )?;

    let mut cards = Vec::with_capacity(profile.cards.len());
    for (index, config) in profile.cards.iter().enumerate() {
        let id = build_card(tree, grid, config)?;
        let tone = tree.element(id).map(CardTone::of).unwrap_or_default();
        cards.push(PageCard {
            id,
            index,
            tone,
            columns: config.columns.clamp(1, DESKTOP_COLUMNS),
            mobile_columns: config.mobile_columns.clamp(1, MOBILE_COLUMNS),
            rows: config.rows.max(1),
        });
    }
    Ok((grid, cards))
}

fn build_card(tree: &mut PageTree, grid: ElementId, config: &CardConfig) -> Result<ElementId> {
    let mut card = Element::div().class(&format!(
        "bento-card col-span-{} md:col-span-{} row-span-{} {} rounded-3xl p-8 cursor-pointer group",
        config.mobile_columns, config.columns, config.rows, config.background
    ));
    if let Some(id) = &config.id {
        card = card.id(id.clone());
    }
    let card = tree.append(
        grid,
        card,
        LayoutStyle::card(config.columns, config.rows, 32.0),
    )?;

    tree.append(
        card,
        Element::new(Tag::P)
            .class("card-label text-sm uppercase tracking-widest opacity-70")
            .text(config.label.clone()),
        LayoutStyle::block(20.0),
    )?;
    if let Some(heading) = &config.heading {
        let tag = if config.rows > 1 { Tag::H2 } else { Tag::P };
        tree.append(
            card,
            Element::new(tag)
                .class("card-heading font-heading text-3xl font-semibold")
                .text(heading.clone()),
            LayoutStyle::block(40.0),
        )?;
    }
    if let Some(body) = &config.body {
        tree.append(
            card,
            Element::new(Tag::P)
                .class("card-body text-muted-foreground leading-relaxed")
                .text(body.clone()),
            LayoutStyle::block(24.0),
        )?;
    }
    if !config.chips.is_empty() {
        let chips = tree.append(
            card,
            Element::div().class("flex flex-wrap gap-2"),
            LayoutStyle::wrap_row(8.0),
        )?;
        for chip in &config.chips {
            tree.append(
                chips,
                Element::span()
                    .class("chip text-xs bg-secondary px-3 py-1 rounded-full")
                    .text(chip.clone()),
                LayoutStyle::fixed_size(chip.chars().count() as f32 * 7.0 + 24.0, 24.0),
            )?;
        }
    }
    if !config.links.is_empty() {
        let links = tree.append(
            card,
            Element::div().class("flex flex-wrap gap-4 mt-6"),
            LayoutStyle::wrap_row(16.0),
        )?;
        for link in &config.links {
            tree.append(
                links,
                link_element(link, "text-sm bg-background text-foreground"),
                LayoutStyle::fixed_size(link.label.chars().count() as f32 * 8.0 + 32.0, 36.0),
            )?;
        }
    }
    Ok(card)
}

fn build_footer(tree: &mut PageTree, root: ElementId, profile: &ProfileConfig) -> Result<()> {
    let footer = tree.append(
        root,
        Element::new(Tag::Footer).class("px-6 py-8 border-t border-border"),
        LayoutStyle::padded(LayoutStyle::flex_column(0.0), 24.0, 32.0),
    )?;
    let content = tree.append(
        footer,
        Element::div().class("footer-content mx-auto max-w-6xl flex items-center justify-between"),
        LayoutStyle::max_width(LayoutStyle::space_between(), CONTENT_MAX_WIDTH),
    )?;
    for text in [&profile.copyright, &profile.built_with] {
        tree.append(
            content,
            Element::span()
                .class("text-sm text-muted-foreground")
                .text(text.clone()),
            LayoutStyle::fixed_size(text.chars().count() as f32 * 7.5, 20.0),
        )?;
    }
    Ok(())
}

// ============================================================================
// Tagline highlights
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Plain(String),
    Highlight(String),
}

/// Split text into plain runs and highlighted words, preserving every
/// character of the input
fn highlight_segments(text: &str, highlights: &[String]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    'outer: while !rest.is_empty() {
        for word in highlights.iter().filter(|w| !w.is_empty()) {
            let at_boundary = plain
                .chars()
                .last()
                .map_or(true, |c| !c.is_alphanumeric());
            if at_boundary && rest.starts_with(word.as_str()) {
                let after = rest[word.len()..].chars().next();
                if after.map_or(true, |c| !c.is_alphanumeric()) {
                    if !plain.is_empty() {
                        segments.push(Segment::Plain(std::mem::take(&mut plain)));
                    }
                    segments.push(Segment::Highlight(word.clone()));
                    rest = &rest[word.len()..];
                    continue 'outer;
                }
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            plain.push(c);
        }
        rest = chars.as_str();
    }
    if !plain.is_empty() {
        segments.push(Segment::Plain(plain));
    }
    segments
}
