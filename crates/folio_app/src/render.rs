//! Static HTML rendering
//!
//! Emits the layout shell (language, title, description, viewport meta and
//! the two font-family tokens on `<body>`) around the page markup. Fonts and
//! design tokens themselves are the host stylesheet's business.

use std::fmt::Write as _;

use folio_layout::{CardTone, ElementId, OverlayKind, OverlayLayer, PageTree, TiltCard};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::config::ProfileConfig;
use crate::page::Page;
use crate::runtime::{ComputedStyle, PageRuntime};

const FONT_TOKENS: &str = "--font-sans: 'Inter', sans-serif; --font-heading: 'Archivo', sans-serif";

/// Render the page at rest: no inline animation styles, overlays hidden
pub fn render_document(page: &Page, profile: &ProfileConfig) -> String {
    let renderer = Renderer::new(page, FxHashMap::default());
    renderer.document(profile)
}

/// Render the page with the runtime's current computed styles inlined
pub fn render_snapshot(runtime: &PageRuntime, profile: &ProfileConfig) -> String {
    let styles: FxHashMap<ElementId, ComputedStyle> = runtime.computed_styles().into_iter().collect();
    let page = runtime.page();
    Renderer::new(&page, styles).document(profile)
}

struct Renderer<'a> {
    tree: &'a PageTree,
    styles: FxHashMap<ElementId, ComputedStyle>,
    cards: FxHashMap<ElementId, CardTone>,
}

impl<'a> Renderer<'a> {
    fn new(page: &'a Page, styles: FxHashMap<ElementId, ComputedStyle>) -> Self {
        Self {
            tree: page.tree(),
            styles,
            cards: page.cards().iter().map(|c| (c.id, c.tone)).collect(),
        }
    }

    fn document(&self, profile: &ProfileConfig) -> String {
        let mut out = String::with_capacity(16 * 1024);
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        );
        let _ = writeln!(out, "<title>{}</title>", escape(&profile.title));
        let _ = writeln!(
            out,
            "<meta name=\"description\" content=\"{}\">",
            escape(&profile.description)
        );
        out.push_str("</head>\n");
        let _ = writeln!(out, "<body class=\"antialiased\" style=\"{FONT_TOKENS}\">");
        if let Some(root) = self.tree.root() {
            self.element(&mut out, root, 0);
        }
        out.push_str("</body>\n</html>\n");
        out
    }

    fn element(&self, out: &mut String, id: ElementId, depth: usize) {
        let Some(element) = self.tree.element(id) else {
            return;
        };
        let indent = "  ".repeat(depth);
        let tag = element.tag.as_str();

        let _ = write!(out, "{indent}<{tag}");
        if let Some(html_id) = &element.id {
            let _ = write!(out, " id=\"{}\"", escape(html_id));
        }
        if !element.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&element.classes.join(" ")));
        }
        if let Some(link) = &element.link {
            let _ = write!(out, " href=\"{}\"", escape(&link.href));
            if let Some(target) = link.target() {
                let _ = write!(out, " target=\"{target}\"");
            }
            if let Some(rel) = link.rel() {
                let _ = write!(out, " rel=\"{rel}\"");
            }
        }
        if let Some(title) = &element.title {
            let _ = write!(out, " title=\"{}\"", escape(title));
        }
        let computed = self.styles.get(&id);
        if let Some(style) = computed {
            let css = style.to_css();
            if !css.is_empty() {
                let _ = write!(out, " style=\"{}\"", escape(&css));
            }
        }
        out.push('>');

        if let Some(text) = &element.text {
            out.push_str(&escape(text));
        }

        let children = self.tree.children(id);
        let overlays = self.overlays(id, computed);
        if children.is_empty() && overlays.is_empty() {
            let _ = writeln!(out, "</{tag}>");
            return;
        }

        out.push('\n');
        for child in children {
            self.element(out, *child, depth + 1);
        }
        for layer in &overlays {
            let class = match layer.kind {
                OverlayKind::AccentGlare | OverlayKind::WarmGlare => "tilt-glare",
                OverlayKind::AmbientShadow => "tilt-shadow",
            };
            let _ = writeln!(
                out,
                "{indent}  <div class=\"{class} pointer-events-none absolute inset-0 rounded-3xl\" style=\"{}\"></div>",
                escape(&layer.to_css())
            );
        }
        let _ = writeln!(out, "{indent}</{tag}>");
    }

    /// Overlay layers of a card: live ones from the runtime, otherwise the
    /// hidden resting layers for its tone
    fn overlays(&self, id: ElementId, computed: Option<&ComputedStyle>) -> SmallVec<[OverlayLayer; 2]> {
        match computed {
            Some(style) if !style.overlays.is_empty() => style.overlays.clone(),
            _ => match self.cards.get(&id) {
                Some(tone) => TiltCard::new(*tone).overlays(),
                None => SmallVec::new(),
            },
        }
    }
}

/// Escape text for HTML content and attribute values
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
