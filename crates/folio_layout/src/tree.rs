//! Page tree
//!
//! Owns the page's elements and maps each one to a taffy layout node so every
//! element has real geometry. Rectangles are reported in document
//! coordinates (relative to the top-left of the page, unscrolled).

use folio_core::geometry::{Rect, Size};
use slotmap::{new_key_type, Key, KeyData, SlotMap};
use taffy::prelude::{AvailableSpace, Dimension, NodeId, Style, TaffyTree};

use crate::element::Element;
use crate::error::{LayoutError, Result};
use crate::selector::Selector;

new_key_type! {
    pub struct ElementId;
}

impl ElementId {
    /// Encode as an event target
    pub fn to_target(self) -> u64 {
        self.data().as_ffi()
    }

    /// Decode from an event target
    pub fn from_target(target: u64) -> Self {
        KeyData::from_ffi(target).into()
    }
}

struct PageNode {
    element: Element,
    layout: NodeId,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

/// Element tree backed by a taffy layout tree
pub struct PageTree {
    taffy: TaffyTree<()>,
    nodes: SlotMap<ElementId, PageNode>,
    root: Option<ElementId>,
    viewport: Size,
}

impl PageTree {
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            nodes: SlotMap::with_key(),
            root: None,
            viewport: Size::default(),
        }
    }

    /// Create a detached element with a layout style
    pub fn create(&mut self, element: Element, style: Style) -> Result<ElementId> {
        let layout = self.taffy.new_leaf(style)?;
        Ok(self.nodes.insert(PageNode {
            element,
            layout,
            parent: None,
            children: Vec::new(),
        }))
    }

    /// Create the root element; it replaces any previous root
    pub fn create_root(&mut self, element: Element, style: Style) -> Result<ElementId> {
        let id = self.create(element, style)?;
        self.root = Some(id);
        Ok(id)
    }

    /// Create an element and append it to `parent`
    pub fn append(&mut self, parent: ElementId, element: Element, style: Style) -> Result<ElementId> {
        let child = self.create(element, style)?;
        self.append_child(parent, child)?;
        Ok(child)
    }

    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        let parent_layout = self.nodes.get(parent).ok_or(LayoutError::UnknownElement)?.layout;
        let child_layout = self.nodes.get(child).ok_or(LayoutError::UnknownElement)?.layout;
        self.taffy.add_child(parent_layout, child_layout)?;

        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
        Ok(())
    }

    pub fn set_style(&mut self, id: ElementId, style: Style) -> Result<()> {
        let node = self.nodes.get(id).ok_or(LayoutError::UnknownElement)?;
        self.taffy.set_style(node.layout, style)?;
        Ok(())
    }

    pub fn style(&self, id: ElementId) -> Result<&Style> {
        let node = self.nodes.get(id).ok_or(LayoutError::UnknownElement)?;
        Ok(self.taffy.style(node.layout)?)
    }

    /// Lay the page out for a viewport. The root is pinned to the viewport
    /// width; its height grows with content.
    pub fn compute_layout(&mut self, viewport: Size) -> Result<()> {
        let root = self.root.ok_or(LayoutError::MissingRoot)?;
        let layout = self.nodes.get(root).ok_or(LayoutError::UnknownElement)?.layout;

        let mut style = self.taffy.style(layout)?.clone();
        style.size.width = Dimension::Length(viewport.width);
        self.taffy.set_style(layout, style)?;

        self.taffy.compute_layout(
            layout,
            taffy::Size {
                width: AvailableSpace::Definite(viewport.width),
                height: AvailableSpace::MaxContent,
            },
        )?;
        self.viewport = viewport;
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            content_height = self.content_height(),
            "page layout computed"
        );
        Ok(())
    }

    /// Document-space rectangle of an element
    pub fn rect(&self, id: ElementId) -> Option<Rect> {
        let node = self.nodes.get(id)?;
        let layout = self.taffy.layout(node.layout).ok()?;
        let (mut x, mut y) = (layout.location.x, layout.location.y);

        let mut parent = node.parent;
        while let Some(pid) = parent {
            let pnode = self.nodes.get(pid)?;
            let playout = self.taffy.layout(pnode.layout).ok()?;
            x += playout.location.x;
            y += playout.location.y;
            parent = pnode.parent;
        }

        Some(Rect::new(x, y, layout.size.width, layout.size.height))
    }

    /// Height of the laid-out document
    pub fn content_height(&self) -> f32 {
        self.root
            .and_then(|root| self.rect(root))
            .map(|r| r.height())
            .unwrap_or(0.0)
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn root(&self) -> Option<ElementId> {
        self.root
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(id).map(|n| &n.element)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every element reachable from the root, in document order
    pub fn document_order(&self) -> Vec<ElementId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<ElementId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Elements matching a selector, in document order
    pub fn query(&self, selector: &Selector) -> Vec<ElementId> {
        self.document_order()
            .into_iter()
            .filter(|&id| self.element(id).is_some_and(|el| selector.matches(el)))
            .collect()
    }

    /// Parse and run a selector string
    pub fn query_str(&self, selector: &str) -> Result<Vec<ElementId>> {
        Ok(self.query(&Selector::parse(selector)?))
    }

    pub fn query_class(&self, class: &str) -> Vec<ElementId> {
        self.document_order()
            .into_iter()
            .filter(|&id| self.element(id).is_some_and(|el| el.has_class(class)))
            .collect()
    }

    pub fn find_by_id(&self, html_id: &str) -> Option<ElementId> {
        self.document_order()
            .into_iter()
            .find(|&id| self.element(id).and_then(|el| el.id.as_deref()) == Some(html_id))
    }
}

impl Default for PageTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Tag;
    use crate::style::LayoutStyle;

    fn sample_tree() -> (PageTree, ElementId, ElementId) {
        let mut tree = PageTree::new();
        let root = tree
            .create_root(Element::new(Tag::Main), LayoutStyle::flex_column(0.0))
            .unwrap();
        let header = tree
            .append(root, Element::new(Tag::Section).id("hero"), LayoutStyle::block(200.0))
            .unwrap();
        let grid = tree
            .append(root, Element::new(Tag::Section).id("projects"), LayoutStyle::grid(4, 100.0, 10.0))
            .unwrap();
        for i in 0..4 {
            tree.append(
                grid,
                Element::div().class("bento-card").text(format!("card {i}")),
                LayoutStyle::grid_span(2, 1),
            )
            .unwrap();
        }
        (tree, header, grid)
    }

    #[test]
    fn test_rects_are_absolute() {
        let (mut tree, header, grid) = sample_tree();
        tree.compute_layout(Size::new(400.0, 800.0)).unwrap();

        let header_rect = tree.rect(header).unwrap();
        assert_eq!(header_rect.height(), 200.0);
        assert_eq!(header_rect.width(), 400.0);

        let grid_rect = tree.rect(grid).unwrap();
        assert_eq!(grid_rect.top(), 200.0);

        let cards = tree.query_class("bento-card");
        let third = tree.rect(cards[2]).unwrap();
        assert_eq!(third.top(), 200.0 + 100.0 + 10.0);
        assert_eq!(third.left(), 0.0);
        let fourth = tree.rect(cards[3]).unwrap();
        assert_eq!(fourth.right(), 400.0);

        assert_eq!(tree.content_height(), 200.0 + 210.0);
    }

    #[test]
    fn test_queries_follow_document_order() {
        let (tree, header, _) = sample_tree();
        let cards = tree.query_str(".bento-card").unwrap();
        assert_eq!(cards.len(), 4);
        let texts: Vec<_> = cards
            .iter()
            .map(|&id| tree.element(id).unwrap().text.clone().unwrap())
            .collect();
        assert_eq!(texts, ["card 0", "card 1", "card 2", "card 3"]);
        assert_eq!(tree.find_by_id("hero"), Some(header));
        assert_eq!(tree.find_by_id("nowhere"), None);
    }

    #[test]
    fn test_layout_requires_root() {
        let mut tree = PageTree::new();
        assert!(matches!(
            tree.compute_layout(Size::new(100.0, 100.0)),
            Err(LayoutError::MissingRoot)
        ));
    }

    #[test]
    fn test_target_encoding() {
        let (tree, header, _) = sample_tree();
        assert_eq!(ElementId::from_target(header.to_target()), header);
        assert!(tree.contains(header));
    }
}
