//! Word-by-word text reveals
//!
//! A string is split on whitespace into words; each word fades in, rises and
//! un-blurs on its own tween, staggered by index. The same text always yields
//! the same words and the same schedule.

use folio_animation::{AnimationPreset, Easing, KeyframeProperties, StaggerConfig, Tween};
use taffy::prelude::{FlexWrap, JustifyContent};

use crate::element::{Element, Tag};
use crate::error::Result;
use crate::style::LayoutStyle;
use crate::tree::{ElementId, PageTree};

/// Tag the reveal container renders as
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevealTag {
    H1,
    H2,
    H3,
    #[default]
    P,
    Span,
}

impl RevealTag {
    pub fn tag(&self) -> Tag {
        match self {
            RevealTag::H1 => Tag::H1,
            RevealTag::H2 => Tag::H2,
            RevealTag::H3 => Tag::H3,
            RevealTag::P => Tag::P,
            RevealTag::Span => Tag::Span,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextRevealConfig {
    /// Delay before the first word (ms)
    pub delay_ms: u32,
    /// Per-word duration (ms)
    pub duration_ms: u32,
    /// Delay between consecutive words (ms)
    pub stagger_ms: u32,
    /// Starting vertical offset of each word (px)
    pub rise_px: f32,
    /// Starting blur of each word (px)
    pub blur_px: f32,
    pub easing: Easing,
    pub tag: RevealTag,
    /// Used to size word boxes for layout
    pub font_size_px: f32,
}

impl Default for TextRevealConfig {
    fn default() -> Self {
        Self {
            delay_ms: 0,
            duration_ms: 500,
            stagger_ms: 30,
            rise_px: 20.0,
            blur_px: 10.0,
            easing: Easing::CubicBezier(0.25, 0.4, 0.25, 1.0),
            tag: RevealTag::P,
            font_size_px: 18.0,
        }
    }
}

impl TextRevealConfig {
    pub fn delay(mut self, ms: u32) -> Self {
        self.delay_ms = ms;
        self
    }

    pub fn duration(mut self, ms: u32) -> Self {
        self.duration_ms = ms;
        self
    }

    pub fn stagger(mut self, ms: u32) -> Self {
        self.stagger_ms = ms;
        self
    }

    pub fn tag(mut self, tag: RevealTag) -> Self {
        self.tag = tag;
        self
    }

    pub fn font_size(mut self, px: f32) -> Self {
        self.font_size_px = px;
        self
    }
}

/// One animatable word
#[derive(Clone, Debug, PartialEq)]
pub struct RevealWord {
    pub index: usize,
    pub text: String,
    pub delay_ms: u32,
}

pub struct TextReveal {
    config: TextRevealConfig,
    words: Vec<RevealWord>,
    word_tweens: Vec<Tween>,
    container: Tween,
    mounted: bool,
}

/// Split text into words in order
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

impl TextReveal {
    pub fn new(text: &str, config: TextRevealConfig) -> Self {
        let pieces = split_words(text);
        let stagger = StaggerConfig::new(config.stagger_ms).base_delay(config.delay_ms);
        let total = pieces.len();

        let words: Vec<RevealWord> = pieces
            .into_iter()
            .enumerate()
            .map(|(index, word)| RevealWord {
                index,
                text: word.to_string(),
                delay_ms: stagger.delay_for_index(index, total),
            })
            .collect();

        let word_tweens = words
            .iter()
            .map(|w| {
                AnimationPreset::blur_rise(config.duration_ms, config.rise_px, config.blur_px)
                    .easing(config.easing)
                    .delay(w.delay_ms)
            })
            .collect();

        Self {
            config,
            words,
            word_tweens,
            container: AnimationPreset::fade_in(300),
            mounted: false,
        }
    }

    pub fn words(&self) -> &[RevealWord] {
        &self.words
    }

    /// Start delay of every word, in order
    pub fn schedule(&self) -> Vec<u32> {
        self.words.iter().map(|w| w.delay_ms).collect()
    }

    /// Time until the last word settles
    pub fn total_duration_ms(&self) -> u32 {
        self.word_tweens
            .iter()
            .map(Tween::total_duration_ms)
            .max()
            .unwrap_or(0)
            .max(self.container.total_duration_ms())
    }

    pub fn config(&self) -> &TextRevealConfig {
        &self.config
    }

    /// Start the reveal from the hidden state
    pub fn mount(&mut self) {
        self.container.restart();
        for tween in &mut self.word_tweens {
            tween.restart();
        }
        self.mounted = true;
        tracing::trace!(words = self.words.len(), "text reveal mounted");
    }

    /// Return to the hidden state
    pub fn unmount(&mut self) {
        self.container.reset();
        for tween in &mut self.word_tweens {
            tween.reset();
        }
        self.mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Advance every word. Returns true while anything moves.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        let mut active = self.container.tick(dt_ms);
        for tween in &mut self.word_tweens {
            active |= tween.tick(dt_ms);
        }
        active
    }

    pub fn is_complete(&self) -> bool {
        self.container.progress() >= 1.0 && self.word_tweens.iter().all(|t| t.progress() >= 1.0)
    }

    pub fn container_properties(&self) -> KeyframeProperties {
        self.container.current_properties()
    }

    pub fn word_properties(&self, index: usize) -> Option<KeyframeProperties> {
        self.word_tweens.get(index).map(Tween::current_properties)
    }

    /// Add the container and one span per word under `parent`. Returns the
    /// container and the word elements in order.
    pub fn build(
        &self,
        tree: &mut PageTree,
        parent: ElementId,
        class: &str,
    ) -> Result<(ElementId, Vec<ElementId>)> {
        let mut style = LayoutStyle::flex_row(0.0);
        style.flex_wrap = FlexWrap::Wrap;
        style.justify_content = Some(JustifyContent::Center);

        let container = tree.append(
            parent,
            Element::new(self.config.tag.tag()).class("inline-flex flex-wrap justify-center").class(class),
            style,
        )?;

        let font = self.config.font_size_px;
        let mut spans = Vec::with_capacity(self.words.len());
        for word in &self.words {
            // Rough glyph advance plus the trailing 0.25em gap
            let width = word.text.chars().count() as f32 * font * 0.55 + font * 0.25;
            let span = tree.append(
                container,
                Element::span().class("inline-block mr-[0.25em]").text(word.text.clone()),
                LayoutStyle::fixed_size(width, font * 1.2),
            )?;
            spans.push(span);
        }
        Ok((container, spans))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::geometry::Size;

    #[test]
    fn test_split_on_whitespace() {
        let reveal = TextReveal::new("Hey there friend", TextRevealConfig::default());
        let words: Vec<_> = reveal.words().iter().map(|w| w.text.as_str()).collect();
        assert_eq!(words, ["Hey", "there", "friend"]);
        assert_eq!(split_words("  spaced\tout\nwords  "), ["spaced", "out", "words"]);
        assert!(split_words("   ").is_empty());
    }

    #[test]
    fn test_schedule_is_deterministic() {
        let config = TextRevealConfig::default().delay(200);
        let a = TextReveal::new("Software Engineer & CS Student", config);
        let b = TextReveal::new("Software Engineer & CS Student", config);
        assert_eq!(a.words(), b.words());
        assert_eq!(a.schedule(), vec![200, 230, 260, 290, 320]);
        assert_eq!(a.schedule(), b.schedule());
    }

    #[test]
    fn test_words_start_hidden_and_settle() {
        let mut reveal = TextReveal::new("Hey there friend", TextRevealConfig::default());
        let start = reveal.word_properties(0).unwrap();
        assert_eq!(start.resolved_opacity(), 0.0);
        assert_eq!(start.resolved_translate().1, 20.0);
        assert_eq!(start.resolved_blur(), 10.0);
        assert_eq!(reveal.container_properties().resolved_opacity(), 0.0);

        reveal.mount();
        reveal.tick(40.0);
        // The third word starts at 60ms
        assert_eq!(reveal.word_properties(2).unwrap().resolved_opacity(), 0.0);
        assert!(reveal.word_properties(0).unwrap().resolved_opacity() > 0.0);

        reveal.tick(reveal.total_duration_ms() as f32);
        assert!(reveal.is_complete());
        let end = reveal.word_properties(2).unwrap();
        assert_eq!(end.resolved_blur(), 0.0);
        assert_eq!(end.resolved_translate().1, 0.0);
    }

    #[test]
    fn test_remount_replays_same_schedule() {
        let mut reveal = TextReveal::new("one two", TextRevealConfig::default());
        reveal.mount();
        reveal.tick(1000.0);
        reveal.unmount();
        assert_eq!(reveal.word_properties(1).unwrap().resolved_opacity(), 0.0);
        reveal.mount();
        reveal.tick(1000.0);
        assert!(reveal.is_complete());
    }

    #[test]
    fn test_build_adds_spans() {
        let mut tree = PageTree::new();
        let root = tree
            .create_root(Element::new(Tag::Main), LayoutStyle::flex_column(0.0))
            .unwrap();
        let reveal = TextReveal::new(
            "Hey there friend",
            TextRevealConfig::default().tag(RevealTag::H2),
        );
        let (container, spans) = reveal.build(&mut tree, root, "hero-tagline").unwrap();
        assert_eq!(spans.len(), 3);
        assert_eq!(tree.element(container).unwrap().tag, Tag::H2);
        assert!(tree.element(container).unwrap().has_class("hero-tagline"));
        tree.compute_layout(Size::new(800.0, 600.0)).unwrap();
        assert!(tree.rect(spans[1]).unwrap().left() > tree.rect(spans[0]).unwrap().left());
    }
}
