//! Minimal element selectors for binding animations to targets
//!
//! Supported forms: `#id`, `.class`, `.class.other` (compound), and a bare tag
//! name such as `h1`.

use std::str::FromStr;

use smallvec::SmallVec;

use crate::element::{Element, Tag};
use crate::error::LayoutError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Classes(SmallVec<[String; 2]>),
    Tag(Tag),
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, LayoutError> {
        let s = input.trim();
        let invalid = || LayoutError::InvalidSelector(input.to_string());

        if let Some(id) = s.strip_prefix('#') {
            if id.is_empty() || id.contains(['.', '#', ' ']) {
                return Err(invalid());
            }
            return Ok(Selector::Id(id.to_string()));
        }

        if let Some(rest) = s.strip_prefix('.') {
            let classes: SmallVec<[String; 2]> = rest.split('.').map(str::to_string).collect();
            if classes.iter().any(|c| c.is_empty() || c.contains(['#', ' '])) {
                return Err(invalid());
            }
            return Ok(Selector::Classes(classes));
        }

        Tag::from_name(s).map(Selector::Tag).ok_or_else(invalid)
    }

    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Selector::Id(id) => element.id.as_deref() == Some(id.as_str()),
            Selector::Classes(classes) => classes.iter().all(|c| element.has_class(c)),
            Selector::Tag(tag) => element.tag == *tag,
        }
    }
}

impl FromStr for Selector {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(Selector::parse("#about").unwrap(), Selector::Id("about".into()));
        assert_eq!(Selector::parse("h1").unwrap(), Selector::Tag(Tag::H1));
        match Selector::parse(".bento-card.bg-accent").unwrap() {
            Selector::Classes(c) => assert_eq!(c.as_slice(), ["bento-card", "bg-accent"]),
            other => panic!("unexpected selector {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Selector::parse("#").is_err());
        assert!(Selector::parse(".a..b").is_err());
        assert!(Selector::parse("blink").is_err());
    }

    #[test]
    fn test_matches() {
        let el = Element::div().id("contact").class("bento-card bg-foreground");
        assert!(Selector::parse("#contact").unwrap().matches(&el));
        assert!(Selector::parse(".bento-card.bg-foreground").unwrap().matches(&el));
        assert!(!Selector::parse(".bg-accent").unwrap().matches(&el));
        assert!(Selector::parse("div").unwrap().matches(&el));
    }
}
