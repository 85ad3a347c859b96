//! Site configuration (folio.toml)
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! stock portfolio.

use anyhow::{Context, Result};
use folio_animation::Easing;
use folio_layout::{SmoothScrollConfig, TiltConfig, ToggleActions, TriggerPosition};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "folio.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
}

// ============================================================================
// Profile
// ============================================================================

/// Page copy
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub name: String,
    /// Wordmark shown in the navigation bar
    pub handle: String,
    pub role: String,
    pub tagline: String,
    /// Highlighted words inside the tagline
    pub highlights: Vec<String>,
    /// Headline revealed word by word in the transition band
    pub band_headline: String,
    pub section_label: String,
    pub title: String,
    pub description: String,
    pub nav: Vec<LinkConfig>,
    pub cards: Vec<CardConfig>,
    pub copyright: String,
    pub built_with: String,
}

/// An anchor
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LinkConfig {
    pub label: String,
    pub href: String,
    #[serde(default)]
    pub external: bool,
    /// Extra classes, e.g. to render the link as a pill
    #[serde(default)]
    pub class: Option<String>,
}

impl LinkConfig {
    fn local(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
            external: false,
            class: None,
        }
    }

    fn external(label: &str, href: &str) -> Self {
        Self {
            external: true,
            ..Self::local(label, href)
        }
    }
}

/// One bento card
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CardConfig {
    #[serde(default)]
    pub id: Option<String>,
    pub label: String,
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub chips: Vec<String>,
    #[serde(default)]
    pub links: Vec<LinkConfig>,
    /// Background utility class; accent/dark markers switch the glare tone
    #[serde(default = "default_background")]
    pub background: String,
    /// Columns spanned on the 6-column desktop grid
    #[serde(default = "default_columns")]
    pub columns: u16,
    /// Columns spanned on the 4-column mobile grid
    #[serde(default = "default_mobile_columns")]
    pub mobile_columns: u16,
    #[serde(default = "default_rows")]
    pub rows: u16,
}

fn default_background() -> String {
    "bg-card".to_string()
}

fn default_columns() -> u16 {
    2
}

fn default_mobile_columns() -> u16 {
    4
}

fn default_rows() -> u16 {
    1
}

impl CardConfig {
    fn new(label: &str, columns: u16, mobile_columns: u16, rows: u16) -> Self {
        Self {
            id: None,
            label: label.to_string(),
            heading: None,
            body: None,
            chips: Vec::new(),
            links: Vec::new(),
            background: default_background(),
            columns,
            mobile_columns,
            rows,
        }
    }

    fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    fn heading(mut self, heading: &str) -> Self {
        self.heading = Some(heading.to_string());
        self
    }

    fn body(mut self, body: &str) -> Self {
        self.body = Some(body.to_string());
        self
    }

    fn chips(mut self, chips: &[&str]) -> Self {
        self.chips = chips.iter().map(|c| c.to_string()).collect();
        self
    }

    fn background(mut self, background: &str) -> Self {
        self.background = background.to_string();
        self
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        let pill = |mut link: LinkConfig| {
            link.class = Some("rounded-full px-4 py-2".to_string());
            link
        };
        Self {
            name: "Ibraheem Shaikh".to_string(),
            handle: "ibraheem".to_string(),
            role: "Software Engineer & CS Student".to_string(),
            tagline: "Building bold ideas at the intersection of tech, finance, and design."
                .to_string(),
            highlights: vec!["tech".into(), "finance".into(), "design".into()],
            band_headline: "Building bold, creative solutions".to_string(),
            section_label: "The Dashboard".to_string(),
            title: "Ibraheem Shaikh | Software Engineer".to_string(),
            description: "Software Engineer & CS Student - Building bold, creative solutions"
                .to_string(),
            nav: vec![
                LinkConfig::local("About", "#about"),
                LinkConfig::local("Projects", "#projects"),
                LinkConfig {
                    class: Some("bg-accent rounded-full px-4 py-2".to_string()),
                    ..LinkConfig::local("Let's Talk", "#contact")
                },
            ],
            cards: vec![
                CardConfig::new("About", 4, 4, 2)
                    .id("about")
                    .heading("Hey, I'm Ibraheem!")
                    .body(
                        "A risk-taker who loves building things that matter. When I'm not coding, \
                         you'll find me obsessing over Porsche designs, watching sports, or \
                         exploring the next big startup idea.",
                    ),
                CardConfig::new("Experience", 2, 2, 1).heading("3+").body("years coding"),
                CardConfig::new("Projects", 2, 2, 1).heading("10+").body("shipped"),
                CardConfig::new("Featured Project", 3, 4, 2)
                    .id("projects")
                    .heading("Project Name")
                    .body(
                        "A brief description of your coolest project goes here. \
                         What problem did it solve? What tech did you use?",
                    )
                    .chips(&["React", "TypeScript", "Node.js"]),
                CardConfig::new("Interests", 3, 2, 2).chips(&[
                    "🏎️ Porsche",
                    "⚽ Sports",
                    "🚀 Startups",
                    "💹 Finance",
                    "🌍 Adventure",
                ]),
                CardConfig::new("Tech Stack", 2, 4, 1).chips(&["TS", "⚛️", "🐍", "💚"]),
                CardConfig::new("Project", 2, 4, 2)
                    .heading("Another Project")
                    .body("Description of another impressive project you've built."),
                CardConfig::new("Currently", 2, 2, 1)
                    .body("Building something cool 🔨")
                    .background("bg-accent"),
                CardConfig {
                    links: vec![
                        pill(LinkConfig::local("Email", "mailto:your@email.com")),
                        pill(LinkConfig::external("LinkedIn", "https://linkedin.com")),
                        pill(LinkConfig::external("GitHub", "https://github.com")),
                    ],
                    ..CardConfig::new("Let's Connect", 4, 4, 2)
                        .id("contact")
                        .heading("Let's build something amazing together.")
                        .background("bg-foreground")
                },
                CardConfig::new("Based in", 2, 2, 1).body("📍 Your City"),
            ],
            copyright: "© 2025 Ibraheem Shaikh".to_string(),
            built_with: "Built with Rust".to_string(),
        }
    }
}

// ============================================================================
// Motion
// ============================================================================

/// Animation and scrolling tuning
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MotionConfig {
    /// Glide wheel input; when off, scrolling jumps straight to the target
    #[serde(default = "default_true")]
    pub smooth_scroll: bool,
    #[serde(default = "default_scroll_duration")]
    pub scroll_duration_ms: f32,
    /// Damping factor; replaces the fixed duration when set
    #[serde(default)]
    pub scroll_lerp: Option<f32>,
    #[serde(default = "default_multiplier")]
    pub wheel_multiplier: f32,
    #[serde(default = "default_multiplier")]
    pub touch_multiplier: f32,

    #[serde(default = "default_hero_duration")]
    pub hero_duration_ms: u32,
    #[serde(default = "default_hero_easing")]
    pub hero_easing: String,

    #[serde(default = "default_card_duration")]
    pub card_duration_ms: u32,
    #[serde(default = "default_card_easing")]
    pub card_easing: String,
    #[serde(default = "default_card_start")]
    pub card_start: String,
    #[serde(default = "default_toggle_actions")]
    pub card_toggle_actions: String,
    #[serde(default = "default_card_stagger")]
    pub card_stagger_ms: u32,
    /// Entry offset of each card (px)
    #[serde(default = "default_card_distance")]
    pub card_distance: f32,
    /// Entry rotation magnitude of each card (degrees)
    #[serde(default = "default_card_rotation")]
    pub card_rotation: f32,

    /// Smoothing lag for scrubbed animations (seconds); 0 maps directly
    #[serde(default = "default_scrub_lag")]
    pub scrub_lag: f32,
    #[serde(default = "default_max_tilt")]
    pub max_tilt_deg: f32,
}

fn default_true() -> bool {
    true
}

fn default_scroll_duration() -> f32 {
    1200.0
}

fn default_multiplier() -> f32 {
    1.0
}

fn default_hero_duration() -> u32 {
    1000
}

fn default_hero_easing() -> String {
    "power4.out".to_string()
}

fn default_card_duration() -> u32 {
    800
}

fn default_card_easing() -> String {
    "power3.out".to_string()
}

fn default_card_start() -> String {
    "top 85%".to_string()
}

fn default_toggle_actions() -> String {
    "play none none reverse".to_string()
}

fn default_card_stagger() -> u32 {
    100
}

fn default_card_distance() -> f32 {
    60.0
}

fn default_card_rotation() -> f32 {
    2.0
}

fn default_scrub_lag() -> f32 {
    1.0
}

fn default_max_tilt() -> f32 {
    3.0
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            smooth_scroll: true,
            scroll_duration_ms: default_scroll_duration(),
            scroll_lerp: None,
            wheel_multiplier: default_multiplier(),
            touch_multiplier: default_multiplier(),
            hero_duration_ms: default_hero_duration(),
            hero_easing: default_hero_easing(),
            card_duration_ms: default_card_duration(),
            card_easing: default_card_easing(),
            card_start: default_card_start(),
            card_toggle_actions: default_toggle_actions(),
            card_stagger_ms: default_card_stagger(),
            card_distance: default_card_distance(),
            card_rotation: default_card_rotation(),
            scrub_lag: default_scrub_lag(),
            max_tilt_deg: default_max_tilt(),
        }
    }
}

impl MotionConfig {
    pub fn hero_easing(&self) -> Result<Easing> {
        Easing::from_name(&self.hero_easing)
            .with_context(|| format!("Invalid hero_easing '{}'", self.hero_easing))
    }

    pub fn card_easing(&self) -> Result<Easing> {
        Easing::from_name(&self.card_easing)
            .with_context(|| format!("Invalid card_easing '{}'", self.card_easing))
    }

    pub fn card_start(&self) -> Result<TriggerPosition> {
        TriggerPosition::parse(&self.card_start)
            .with_context(|| format!("Invalid card_start '{}'", self.card_start))
    }

    pub fn card_toggle_actions(&self) -> Result<ToggleActions> {
        ToggleActions::parse(&self.card_toggle_actions).with_context(|| {
            format!(
                "Invalid card_toggle_actions '{}'",
                self.card_toggle_actions
            )
        })
    }

    /// Check every string-typed setting parses
    pub fn validate(&self) -> Result<()> {
        self.hero_easing()?;
        self.card_easing()?;
        self.card_start()?;
        self.card_toggle_actions()?;
        Ok(())
    }

    pub fn smooth_scroll_config(&self) -> SmoothScrollConfig {
        let mut config = SmoothScrollConfig::default()
            .wheel_multiplier(self.wheel_multiplier)
            .touch_multiplier(self.touch_multiplier)
            .duration(self.scroll_duration_ms);
        if !self.smooth_scroll {
            config = config.duration(0.0);
        } else if let Some(lerp) = self.scroll_lerp {
            config = config.lerp(lerp);
        }
        config
    }

    pub fn tilt_config(&self) -> TiltConfig {
        TiltConfig {
            max_tilt_deg: self.max_tilt_deg.abs(),
            ..TiltConfig::default()
        }
    }
}

// ============================================================================
// Viewport
// ============================================================================

/// Initial viewport for rendering and headless runs
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    800
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl SiteConfig {
    /// Load configuration from a file, or from `folio.toml` in a directory.
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content)?;
        config.motion.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = SiteConfig::from_toml("").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.profile.cards.len(), 10);
        assert_eq!(config.viewport.width, 1280);
    }

    #[test]
    fn test_partial_override() {
        let config = SiteConfig::from_toml(
            r#"
            [profile]
            name = "Ada Lovelace"

            [motion]
            card_stagger_ms = 50
            scroll_lerp = 0.1
            "#,
        )
        .unwrap();
        assert_eq!(config.profile.name, "Ada Lovelace");
        assert_eq!(config.profile.handle, "ibraheem");
        assert_eq!(config.motion.card_stagger_ms, 50);
        assert_eq!(config.motion.card_duration_ms, 800);
        assert_eq!(config.motion.smooth_scroll_config().lerp, Some(0.1));
    }

    #[test]
    fn test_invalid_motion_strings_rejected() {
        assert!(SiteConfig::from_toml("[motion]\nhero_easing = \"power9.out\"").is_err());
        assert!(SiteConfig::from_toml("[motion]\ncard_start = \"top\"").is_err());
        assert!(SiteConfig::from_toml("[motion]\ncard_toggle_actions = \"play\"").is_err());
    }

    #[test]
    fn test_round_trip_defaults() {
        let config = SiteConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(SiteConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_native_scroll_has_no_glide() {
        let motion = MotionConfig {
            smooth_scroll: false,
            ..MotionConfig::default()
        };
        assert_eq!(motion.smooth_scroll_config().duration_ms, 0.0);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = SiteConfig::load(Path::new("definitely/not/here/folio.toml")).unwrap();
        assert_eq!(config, SiteConfig::default());
    }
}
