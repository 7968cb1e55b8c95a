//! Persistent tree cursor
//!
//! A `Location` is the focused content entry plus a shared frame describing
//! where it sits: the parent's content sequence, the focus index within it,
//! the parent element and the frame above. Every operation returns a new
//! `Location`; frames and subtrees are shared, and only the frames along an
//! edited route are rebuilt when walking back up.

use std::sync::Arc;

use crate::dom::{Content, Node};
use crate::error::{Error, Result};

/// Cursor focused on one element or text fragment of a tree
#[derive(Debug, Clone)]
pub struct Location {
    focus: Content,
    /// `None` at the root
    frame: Option<Arc<Frame>>,
}

#[derive(Debug, Clone)]
struct Frame {
    /// Parent content; slot `index` may be stale while `changed` is set
    siblings: Arc<Vec<Content>>,
    index: usize,
    /// Parent element as it was when the cursor descended
    parent: Arc<Node>,
    up: Option<Arc<Frame>>,
    /// Something at this level was edited; `up` must rebuild the parent
    changed: bool,
}

impl Frame {
    /// Sibling sequence with `focus` written into its slot
    fn settled(&self, focus: &Content) -> Arc<Vec<Content>> {
        let mut siblings = Arc::clone(&self.siblings);
        if self.changed {
            Arc::make_mut(&mut siblings)[self.index] = focus.clone();
        }
        siblings
    }

    fn marked_changed(self: &Arc<Self>) -> Arc<Frame> {
        if self.changed {
            Arc::clone(self)
        } else {
            Arc::new(Frame {
                changed: true,
                ..Frame::clone(self)
            })
        }
    }
}

/// One non-root level of a cursor's ancestry, focus first
pub(crate) struct Level<'a> {
    /// Tag of the element at this level
    pub tag: &'a str,
    /// Siblings to the left of that element
    pub left: &'a [Content],
}

impl Location {
    /// Open a cursor on `root`
    pub fn new(root: Node) -> Self {
        Location::from_arc(Arc::new(root))
    }

    /// Open a cursor on a shared root element
    pub fn from_arc(root: Arc<Node>) -> Self {
        Location {
            focus: Content::Element(root),
            frame: None,
        }
    }

    /// Focused content entry
    #[inline]
    pub fn content(&self) -> &Content {
        &self.focus
    }

    /// Focused element, or `None` when the cursor is on text
    #[inline]
    pub fn node(&self) -> Option<&Node> {
        self.focus.as_element()
    }

    /// Focused text fragment, or `None` when the cursor is on an element
    #[inline]
    pub fn text_value(&self) -> Option<&str> {
        self.focus.as_text()
    }

    /// Check if the cursor has no parent
    #[inline]
    pub fn is_root(&self) -> bool {
        self.frame.is_none()
    }

    /// Number of ancestors above the focus
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut frame = self.frame.as_deref();
        while let Some(f) = frame {
            depth += 1;
            frame = f.up.as_deref();
        }
        depth
    }

    /// Position of the focus among its siblings (0 at the root)
    #[inline]
    pub fn index(&self) -> usize {
        self.frame.as_ref().map_or(0, |f| f.index)
    }

    /// First child
    #[inline]
    pub fn down(&self) -> Option<Location> {
        self.child(0)
    }

    /// Child at `index`
    pub fn child(&self, index: usize) -> Option<Location> {
        let Content::Element(node) = &self.focus else {
            return None;
        };
        let children = node.content()?;
        let focus = children.get(index)?.clone();
        Some(Location {
            focus,
            frame: Some(Arc::new(Frame {
                siblings: Arc::new(children.to_vec()),
                index,
                parent: Arc::clone(node),
                up: self.frame.clone(),
                changed: false,
            })),
        })
    }

    /// Cursors for every child, in document order
    pub fn children(&self) -> Vec<Location> {
        let Content::Element(node) = &self.focus else {
            return Vec::new();
        };
        let Some(children) = node.content() else {
            return Vec::new();
        };
        let siblings = Arc::new(children.to_vec());
        children
            .iter()
            .enumerate()
            .map(|(index, child)| Location {
                focus: child.clone(),
                frame: Some(Arc::new(Frame {
                    siblings: Arc::clone(&siblings),
                    index,
                    parent: Arc::clone(node),
                    up: self.frame.clone(),
                    changed: false,
                })),
            })
            .collect()
    }

    /// Parent, with any edits below folded into it
    pub fn up(&self) -> Option<Location> {
        let frame = self.frame.as_ref()?;
        if !frame.changed {
            return Some(Location {
                focus: Content::Element(Arc::clone(&frame.parent)),
                frame: frame.up.clone(),
            });
        }
        let content = Arc::unwrap_or_clone(frame.settled(&self.focus));
        Some(Location {
            focus: frame.parent.rebuild(Some(content)).into(),
            frame: frame.up.as_ref().map(Frame::marked_changed),
        })
    }

    /// Previous sibling
    pub fn left(&self) -> Option<Location> {
        let index = self.frame.as_ref()?.index.checked_sub(1)?;
        self.sibling(index)
    }

    /// Next sibling
    pub fn right(&self) -> Option<Location> {
        let index = self.frame.as_ref()?.index + 1;
        self.sibling(index)
    }

    /// First sibling (possibly the focus itself)
    pub fn leftmost(&self) -> Option<Location> {
        self.sibling(0)
    }

    /// Last sibling (possibly the focus itself)
    pub fn rightmost(&self) -> Option<Location> {
        let last = self.frame.as_ref()?.siblings.len().checked_sub(1)?;
        self.sibling(last)
    }

    fn sibling(&self, index: usize) -> Option<Location> {
        let frame = self.frame.as_ref()?;
        if index == frame.index {
            return Some(self.clone());
        }
        let siblings = frame.settled(&self.focus);
        let focus = siblings.get(index)?.clone();
        Some(Location {
            focus,
            frame: Some(Arc::new(Frame {
                siblings,
                index,
                parent: Arc::clone(&frame.parent),
                up: frame.up.clone(),
                changed: frame.changed,
            })),
        })
    }

    /// Cursor at the root with every edit folded in
    pub fn root(&self) -> Location {
        let mut current = self.clone();
        while let Some(parent) = current.up() {
            current = parent;
        }
        current
    }

    /// Root element of the (possibly edited) tree
    pub fn tree(&self) -> Node {
        Arc::unwrap_or_clone(self.tree_arc())
    }

    /// Root element of the (possibly edited) tree, shared
    pub fn tree_arc(&self) -> Arc<Node> {
        match self.root().focus {
            Content::Element(node) => node,
            // Location::new and replace() keep an element at the root
            Content::Text(_) => unreachable!("root cursor focused on text"),
        }
    }

    /// Same position, holding `content` instead
    ///
    /// The root can only hold an element.
    pub fn replace(&self, content: impl Into<Content>) -> Result<Location> {
        let content = content.into();
        match &self.frame {
            None if content.is_text() => Err(Error::NotAnElement("replacing the root")),
            None => Ok(Location {
                focus: content,
                frame: None,
            }),
            Some(frame) => Ok(Location {
                focus: content,
                frame: Some(frame.marked_changed()),
            }),
        }
    }

    /// Replace the focused element with `f(element)`
    pub fn edit<F>(&self, f: F) -> Result<Location>
    where
        F: FnOnce(Node) -> Result<Node>,
    {
        let Content::Element(node) = &self.focus else {
            return Err(Error::NotAnElement("edit"));
        };
        let edited = f(Node::clone(node))?;
        self.replace(edited)
    }

    /// Insert `content` as the previous sibling; focus is unchanged
    pub fn insert_left(&self, content: impl Into<Content>) -> Result<Location> {
        let frame = self.frame.as_ref().ok_or(Error::RootSibling)?;
        let mut siblings = frame.settled(&self.focus);
        Arc::make_mut(&mut siblings).insert(frame.index, content.into());
        Ok(self.with_frame(Frame {
            siblings,
            index: frame.index + 1,
            parent: Arc::clone(&frame.parent),
            up: frame.up.clone(),
            changed: true,
        }))
    }

    /// Insert `content` as the next sibling; focus is unchanged
    pub fn insert_right(&self, content: impl Into<Content>) -> Result<Location> {
        let frame = self.frame.as_ref().ok_or(Error::RootSibling)?;
        let mut siblings = frame.settled(&self.focus);
        Arc::make_mut(&mut siblings).insert(frame.index + 1, content.into());
        Ok(self.with_frame(Frame {
            siblings,
            index: frame.index,
            parent: Arc::clone(&frame.parent),
            up: frame.up.clone(),
            changed: true,
        }))
    }

    /// Remove the focus; returns the parent without it (`None` at the root)
    ///
    /// Removing the last child leaves the parent with an empty, not absent,
    /// content sequence.
    pub fn remove(&self) -> Option<Location> {
        let frame = self.frame.as_ref()?;
        let mut content = Arc::unwrap_or_clone(frame.settled(&self.focus));
        content.remove(frame.index);
        Some(Location {
            focus: frame.parent.rebuild(Some(content)).into(),
            frame: frame.up.as_ref().map(Frame::marked_changed),
        })
    }

    fn with_frame(&self, frame: Frame) -> Location {
        Location {
            focus: self.focus.clone(),
            frame: Some(Arc::new(frame)),
        }
    }

    /// Walk from the focus towards the root, one entry per non-root element
    /// level. A text focus contributes no level of its own. Returns the levels
    /// plus the root element's tag.
    pub(crate) fn ancestry(&self) -> (Vec<Level<'_>>, Option<&str>) {
        let mut levels = Vec::new();
        let mut tag = self.node().map(Node::tag);
        let mut frame = self.frame.as_deref();
        while let Some(f) = frame {
            if let Some(tag) = tag {
                levels.push(Level {
                    tag,
                    left: &f.siblings[..f.index],
                });
            }
            tag = Some(f.parent.tag());
            frame = f.up.as_deref();
        }
        (levels, tag)
    }
}

impl From<Node> for Location {
    fn from(root: Node) -> Self {
        Location::new(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(tag: &str) -> Node {
        Node::new(tag).unwrap()
    }

    /// <a><b>1</b><c/><d>x<e/></d></a>
    fn sample() -> Node {
        el("a")
            .with_child(el("b").with_child("1"))
            .with_child(el("c"))
            .with_child(el("d").with_child("x").with_child(el("e")))
    }

    #[test]
    fn test_navigation() {
        let root = sample().cursor();
        assert!(root.is_root());
        assert!(root.up().is_none());
        assert!(root.left().is_none());
        assert!(root.right().is_none());

        let b = root.down().unwrap();
        assert_eq!(b.node().unwrap().tag(), "b");
        assert!(b.left().is_none());

        let c = b.right().unwrap();
        assert_eq!(c.node().unwrap().tag(), "c");
        assert!(c.down().is_none());

        let d = c.right().unwrap();
        assert!(d.right().is_none());
        assert_eq!(d.depth(), 1);

        let text = d.down().unwrap();
        assert_eq!(text.text_value(), Some("x"));
        assert!(text.down().is_none());
        assert_eq!(text.right().unwrap().node().unwrap().tag(), "e");

        assert_eq!(text.up().unwrap().node().unwrap().tag(), "d");
        assert_eq!(text.root().node().unwrap().tag(), "a");
    }

    #[test]
    fn test_leftmost_rightmost_and_child() {
        let root = sample().cursor();
        let c = root.child(1).unwrap();
        assert_eq!(c.leftmost().unwrap().node().unwrap().tag(), "b");
        assert_eq!(c.rightmost().unwrap().node().unwrap().tag(), "d");
        assert!(root.child(3).is_none());
        assert_eq!(root.children().len(), 3);
        assert_eq!(root.children()[2].index(), 2);
    }

    #[test]
    fn test_replace_folds_into_root() {
        let root = sample().cursor();
        let c = root.child(1).unwrap();
        let edited = c.replace(el("z")).unwrap();
        let tree = edited.tree();
        let tags: Vec<_> = tree.elements().map(Node::tag).collect();
        assert_eq!(tags, vec!["b", "z", "d"]);

        // The original cursor still sees the old tree
        assert_eq!(c.node().unwrap().tag(), "c");
        assert_eq!(root.tree(), sample());
    }

    #[test]
    fn test_edit_survives_sideways_moves() {
        let root = sample().cursor();
        let b = root.down().unwrap().replace(el("q")).unwrap();
        let moved = b.right().unwrap().right().unwrap().left().unwrap();
        assert_eq!(moved.node().unwrap().tag(), "c");
        let tree = moved.tree();
        let tags: Vec<_> = tree.elements().map(Node::tag).collect();
        assert_eq!(tags, vec!["q", "c", "d"]);
    }

    #[test]
    fn test_untouched_subtrees_are_shared() {
        let original = Arc::new(sample());
        let root = Location::from_arc(Arc::clone(&original));
        let edited = root.child(1).unwrap().replace(el("z")).unwrap().tree();
        assert_eq!(edited.elements().nth(1).unwrap().tag(), "z");

        let old_d = original.children().nth(2).unwrap();
        let new_d = edited.children().nth(2).unwrap();
        match (old_d, new_d) {
            (Content::Element(old), Content::Element(new)) => assert!(Arc::ptr_eq(old, new)),
            _ => panic!("Expected elements"),
        }
    }

    #[test]
    fn test_insert_siblings_keep_focus() {
        let c = sample().cursor().child(1).unwrap();
        let loc = c.insert_left(el("l")).unwrap().insert_right("r").unwrap();
        assert_eq!(loc.node().unwrap().tag(), "c");
        assert_eq!(loc.index(), 2);

        let tree = loc.tree();
        let entries: Vec<String> = tree
            .children()
            .map(|c| match c {
                Content::Element(n) => n.tag().to_string(),
                Content::Text(t) => format!("'{}'", t),
            })
            .collect();
        assert_eq!(entries, vec!["b", "l", "c", "'r'", "d"]);
        assert_eq!(c.tree(), sample());
    }

    #[test]
    fn test_sibling_inserts_leave_input_tree() {
        let root = sample().cursor();
        let c = root.child(1).unwrap();
        let left = c.insert_left(el("l")).unwrap();
        let right = c.insert_right("r").unwrap();
        assert_ne!(left.tree(), sample());
        assert_ne!(right.tree(), sample());
        assert_eq!(root.tree(), sample());
        assert_eq!(c.tree(), sample());
    }

    #[test]
    fn test_root_has_no_sibling_slot() {
        let root = sample().cursor();
        assert!(matches!(root.insert_left(el("x")), Err(Error::RootSibling)));
        assert!(matches!(root.replace("text"), Err(Error::NotAnElement(_))));
        assert!(root.remove().is_none());
    }

    #[test]
    fn test_remove_last_child_leaves_empty_sequence() {
        let root = el("a").with_child(el("b")).cursor();
        let parent = root.down().unwrap().remove().unwrap();
        assert!(parent.is_root());
        let tree = parent.tree();
        assert!(!tree.is_empty_node());
        assert_eq!(tree.child_count(), 0);
    }

    #[test]
    fn test_deep_edit_rebuilds_whole_route() {
        let e = sample().cursor().child(2).unwrap().child(1).unwrap();
        let tree = e.edit(|n| Ok(n.with_attr("k", "v"))).unwrap().tree();
        let d = tree.elements().nth(2).unwrap();
        let e = d.elements().next().unwrap();
        assert_eq!(e.attr("k"), Some("v"));
    }

    #[test]
    fn test_location_is_send_sync() {
        fn f<T: Send + Sync>() {}
        f::<Location>();
    }
}
