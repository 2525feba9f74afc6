//! # Editable Surface
//!
//! The surface is whatever the person types into. In a browser it is a
//! `contenteditable` element; in tests and in the CLI it is a [`TreeSurface`].
//! The rest of the crate only talks to the [`EditableSurface`] trait:
//!
//! - enumerate textual leaves in document order (feeds the [`TextIndex`])
//! - report and place a collapsed caret
//! - take and give focus
//! - read the current [`DocumentState`] and render a new one
//!
//! ## TreeSurface
//!
//! An in-memory tree of [`Node`]s. Elements carry no text of their own; only
//! [`Node::Text`] leaves do. Rendering a document produces one text leaf per line
//! with the newline kept at the end of the leaf, so the concatenated leaves are
//! exactly the content:
//!
//! ```text
//! "a\nbc"  ─▶  article
//!              ├── Text("a\n")
//!              └── Text("bc")
//! ```
//!
//! After rendering, callers are free to reshape the tree (wrap leaves in elements,
//! split them, insert empty runs) the way a browser does while typing; caret
//! mapping only ever looks at the flattened leaf sequence.

use crate::caret::{CaretTarget, LeafPoint, TextIndex};
use crate::document::DocumentState;
use crate::error::SelectionError;

pub trait EditableSurface {
    /// Textual leaves in document order.
    fn text_leaves(&self) -> Vec<&str>;

    /// The collapsed caret, if a selection exists inside the surface.
    fn caret(&self) -> Result<CaretTarget, SelectionError>;

    /// Collapse the selection at `target`.
    fn place_caret(&mut self, target: CaretTarget);

    fn focus(&mut self);

    fn style(&self) -> String;

    /// Replace content and style.
    fn render(&mut self, state: &DocumentState);

    fn content(&self) -> String {
        self.text_leaves().concat()
    }

    fn state(&self) -> DocumentState {
        DocumentState::new(self.content(), self.style())
    }

    fn text_index(&self) -> TextIndex {
        TextIndex::from_leaves(self.text_leaves())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element { tag: String, children: Vec<Node> },
    Text(String),
}

impl Node {
    pub fn element(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Element {
            tag: tag.into(),
            children,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Node::Text(text) => out.push(text),
            Node::Element { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Find the `n`th text leaf, counting down from `*n`.
    fn nth_leaf_mut(&mut self, n: &mut usize) -> Option<&mut String> {
        match self {
            Node::Text(text) => {
                if *n == 0 {
                    Some(text)
                } else {
                    *n -= 1;
                    None
                }
            }
            Node::Element { children, .. } => children
                .iter_mut()
                .find_map(|child| child.nth_leaf_mut(n)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    None,
    Outside,
    Collapsed(CaretTarget),
}

#[derive(Debug, Clone)]
pub struct TreeSurface {
    root: Node,
    style: String,
    selection: Selection,
    focused: bool,
}

impl Default for TreeSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeSurface {
    pub fn new() -> Self {
        Self::with_root(Node::element("article", Vec::new()))
    }

    pub fn with_root(root: Node) -> Self {
        Self {
            root,
            style: String::new(),
            selection: Selection::None,
            focused: false,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Mutable access for reshaping; the selection is left untouched.
    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Simulate the selection moving somewhere else on the page.
    pub fn select_outside(&mut self) {
        self.selection = Selection::Outside;
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
    }

    pub fn set_style(&mut self, style: impl Into<String>) {
        self.style = style.into();
    }

    /// Type `text` at the caret and move the caret past it.
    pub fn insert_text(&mut self, text: &str) -> Result<(), SelectionError> {
        let target = self.caret()?;
        let inserted = text.chars().count();
        match target {
            CaretTarget::SurfaceStart => {
                match &mut self.root {
                    Node::Element { children, .. } => children.insert(0, Node::text(text)),
                    Node::Text(existing) => existing.insert_str(0, text),
                }
                self.selection = Selection::Collapsed(CaretTarget::Leaf(LeafPoint::new(0, inserted)));
            }
            CaretTarget::Leaf(point) => {
                let mut n = point.leaf;
                let leaf = self
                    .root
                    .nth_leaf_mut(&mut n)
                    .ok_or(SelectionError::OutsideSurface)?;
                let byte_at = leaf
                    .char_indices()
                    .nth(point.offset)
                    .map(|(i, _)| i)
                    .unwrap_or(leaf.len());
                leaf.insert_str(byte_at, text);
                self.selection = Selection::Collapsed(CaretTarget::Leaf(LeafPoint::new(
                    point.leaf,
                    point.offset + inserted,
                )));
            }
        }
        Ok(())
    }
}

impl EditableSurface for TreeSurface {
    fn text_leaves(&self) -> Vec<&str> {
        let mut leaves = Vec::new();
        self.root.collect_leaves(&mut leaves);
        leaves
    }

    fn caret(&self) -> Result<CaretTarget, SelectionError> {
        match self.selection {
            Selection::None => Err(SelectionError::NoSelection),
            Selection::Outside => Err(SelectionError::OutsideSurface),
            Selection::Collapsed(target) => Ok(target),
        }
    }

    fn place_caret(&mut self, target: CaretTarget) {
        let clamped = match target {
            CaretTarget::SurfaceStart => CaretTarget::SurfaceStart,
            CaretTarget::Leaf(point) => {
                let leaves = self.text_leaves();
                let Some(leaf) = leaves.get(point.leaf) else {
                    tracing::debug!("ignoring caret for missing leaf {}", point.leaf);
                    return;
                };
                let len = leaf.chars().count();
                CaretTarget::Leaf(LeafPoint::new(point.leaf, point.offset.min(len)))
            }
        };
        self.selection = Selection::Collapsed(clamped);
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn style(&self) -> String {
        self.style.clone()
    }

    fn render(&mut self, state: &DocumentState) {
        let children = state
            .content
            .split_inclusive('\n')
            .map(Node::text)
            .collect();
        self.root = Node::element("article", children);
        self.style = state.style.clone();
        self.selection = Selection::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caret::{capture_offset, restore_offset, try_capture_offset};

    fn nested_surface() -> TreeSurface {
        // <article>ab<p><b>cd</b>e</p><div></div><p>fgh<i>ij</i></p></article>
        TreeSurface::with_root(Node::element(
            "article",
            vec![
                Node::text("ab"),
                Node::element(
                    "p",
                    vec![Node::element("b", vec![Node::text("cd")]), Node::text("e")],
                ),
                Node::element("div", vec![]),
                Node::element(
                    "p",
                    vec![
                        Node::text("fgh"),
                        Node::element("i", vec![Node::text("ij")]),
                    ],
                ),
            ],
        ))
    }

    #[test]
    fn test_leaves_in_document_order() {
        let surface = nested_surface();
        assert_eq!(surface.text_leaves(), vec!["ab", "cd", "e", "fgh", "ij"]);
        assert_eq!(surface.content(), "abcdefghij");
    }

    #[test]
    fn test_caret_round_trip_on_nested_tree() {
        let mut surface = nested_surface();
        let len = surface.content().chars().count();
        for offset in 0..=len {
            restore_offset(&mut surface, offset);
            assert_eq!(capture_offset(&surface), offset, "offset {offset}");
        }
        restore_offset(&mut surface, len + 10);
        assert_eq!(capture_offset(&surface), len);
    }

    #[test]
    fn test_restore_past_end_lands_in_last_leaf() {
        let mut surface = nested_surface();
        restore_offset(&mut surface, 1_000);
        assert_eq!(
            surface.caret(),
            Ok(CaretTarget::Leaf(LeafPoint::new(4, 2)))
        );
    }

    #[test]
    fn test_capture_without_selection_is_zero() {
        let mut surface = nested_surface();
        assert_eq!(try_capture_offset(&surface), Err(SelectionError::NoSelection));
        assert_eq!(capture_offset(&surface), 0);

        restore_offset(&mut surface, 5);
        surface.select_outside();
        assert_eq!(
            try_capture_offset(&surface),
            Err(SelectionError::OutsideSurface)
        );
        assert_eq!(capture_offset(&surface), 0);
    }

    #[test]
    fn test_empty_surface_restores_to_start() {
        let mut surface = TreeSurface::new();
        restore_offset(&mut surface, 7);
        assert_eq!(surface.caret(), Ok(CaretTarget::SurfaceStart));
        assert_eq!(capture_offset(&surface), 0);
    }

    #[test]
    fn test_render_one_leaf_per_line() {
        let mut surface = TreeSurface::new();
        surface.render(&DocumentState::new("a\nbc\n\nd", "color:red"));
        assert_eq!(surface.text_leaves(), vec!["a\n", "bc\n", "\n", "d"]);
        assert_eq!(surface.state(), DocumentState::new("a\nbc\n\nd", "color:red"));
    }

    #[test]
    fn test_render_clears_selection() {
        let mut surface = TreeSurface::new();
        surface.render(&DocumentState::new("abc", ""));
        restore_offset(&mut surface, 2);
        surface.render(&DocumentState::new("xyz", ""));
        assert_eq!(surface.caret(), Err(SelectionError::NoSelection));
    }

    #[test]
    fn test_insert_text_moves_caret() {
        let mut surface = TreeSurface::new();
        surface.render(&DocumentState::new("Hllo\nworld", ""));
        restore_offset(&mut surface, 1);
        surface.insert_text("e").unwrap();
        assert_eq!(surface.content(), "Hello\nworld");
        assert_eq!(capture_offset(&surface), 2);
    }

    #[test]
    fn test_insert_into_empty_surface() {
        let mut surface = TreeSurface::new();
        surface.place_caret(CaretTarget::SurfaceStart);
        surface.insert_text("héllo").unwrap();
        assert_eq!(surface.content(), "héllo");
        assert_eq!(capture_offset(&surface), 5);
    }

    #[test]
    fn test_insert_without_selection_fails() {
        let mut surface = TreeSurface::new();
        assert_eq!(
            surface.insert_text("x"),
            Err(SelectionError::NoSelection)
        );
    }

    #[test]
    fn test_place_caret_ignores_missing_leaf() {
        let mut surface = nested_surface();
        surface.place_caret(CaretTarget::Leaf(LeafPoint::new(9, 0)));
        assert_eq!(surface.caret(), Err(SelectionError::NoSelection));
    }

    #[test]
    fn test_focus_and_blur() {
        let mut surface = TreeSurface::new();
        assert!(!surface.is_focused());
        surface.focus();
        assert!(surface.is_focused());
        surface.blur();
        assert!(!surface.is_focused());
    }
}
