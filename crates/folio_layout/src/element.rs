//! Page elements
//!
//! An [`Element`] is the static description of one node of the page: its tag,
//! identity, classes, text and link attributes. Geometry lives in the
//! [`PageTree`](crate::tree::PageTree), not here.

use smallvec::SmallVec;

/// HTML tag of an element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Main,
    Nav,
    Header,
    Section,
    Footer,
    Div,
    H1,
    H2,
    H3,
    P,
    Span,
    A,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Main => "main",
            Tag::Nav => "nav",
            Tag::Header => "header",
            Tag::Section => "section",
            Tag::Footer => "footer",
            Tag::Div => "div",
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::P => "p",
            Tag::Span => "span",
            Tag::A => "a",
        }
    }

    /// Parse a lowercase tag name
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "main" => Tag::Main,
            "nav" => Tag::Nav,
            "header" => Tag::Header,
            "section" => Tag::Section,
            "footer" => Tag::Footer,
            "div" => Tag::Div,
            "h1" => Tag::H1,
            "h2" => Tag::H2,
            "h3" => Tag::H3,
            "p" => Tag::P,
            "span" => Tag::Span,
            "a" => Tag::A,
            _ => return None,
        })
    }
}

/// A link target on an anchor element
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    /// Opens in a new browsing context with `rel="noopener noreferrer"`
    pub external: bool,
}

impl Link {
    pub fn target(&self) -> Option<&'static str> {
        self.external.then_some("_blank")
    }

    pub fn rel(&self) -> Option<&'static str> {
        self.external.then_some("noopener noreferrer")
    }
}

/// Static description of a page node
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub tag: Tag,
    pub id: Option<String>,
    pub classes: SmallVec<[String; 4]>,
    pub text: Option<String>,
    pub title: Option<String>,
    pub link: Option<Link>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            id: None,
            classes: SmallVec::new(),
            text: None,
            title: None,
            link: None,
        }
    }

    pub fn div() -> Self {
        Self::new(Tag::Div)
    }

    pub fn span() -> Self {
        Self::new(Tag::Span)
    }

    /// Set the element id (builder)
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Append whitespace-separated class names (builder)
    pub fn class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            if !self.has_class(class) {
                self.classes.push(class.to_string());
            }
        }
        self
    }

    /// Set the text content (builder)
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the title attribute (builder)
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Same-page or same-tab link (builder)
    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.link = Some(Link {
            href: href.into(),
            external: false,
        });
        self
    }

    /// Link that opens in a new tab (builder)
    pub fn external_href(mut self, href: impl Into<String>) -> Self {
        self.link = Some(Link {
            href: href.into(),
            external: true,
        });
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Space-joined class attribute value
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }
}
