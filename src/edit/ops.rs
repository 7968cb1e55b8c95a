//! In-place edits of the focused node
//!
//! "In place" means the cursor stays on the same slot; the tree itself is
//! rebuilt along the route to the root when the cursor walks back up.

use tracing::debug;

use super::Position;
use crate::cursor::Location;
use crate::dom::{make_node, Body, Content, Node};
use crate::error::{Error, Result};

impl Location {
    /// Rename the focused element
    pub fn edit_tag(&self, tag: &str) -> Result<Location> {
        self.element_op("edit_tag")?;
        self.edit(|mut node| {
            node.set_tag(tag)?;
            Ok(node)
        })
    }

    /// Replace the content with one text fragment, or append a fragment
    ///
    /// On a text focus the fragment itself is replaced or extended.
    pub fn edit_text(&self, text: &str, append: bool) -> Result<Location> {
        match self.content() {
            Content::Text(current) => {
                let updated = if append {
                    format!("{current}{text}")
                } else {
                    text.to_string()
                };
                self.replace(updated)
            }
            Content::Element(_) => self.edit(|mut node| {
                if append {
                    let mut content = node.take_content().unwrap_or_default();
                    content.push(text.into());
                    node.set_content(Some(content));
                } else {
                    node.set_content(Some(vec![text.into()]));
                }
                Ok(node)
            }),
        }
    }

    /// Merge `attrs` into the attributes, then drop every key in `dissoc`
    pub fn edit_attrs<I, K, V, D, S>(&self, attrs: I, dissoc: D) -> Result<Location>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
        D: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.element_op("edit_attrs")?;
        self.edit(|mut node| {
            let map = node.attrs_mut();
            map.merge(attrs);
            for key in dissoc {
                map.remove(key.as_ref());
            }
            Ok(node)
        })
    }

    /// Insert `content` as a child at `pos`; focus is unchanged
    ///
    /// An element with absent content gets a content sequence.
    pub fn insert_child(&self, content: impl Into<Content>, pos: Position) -> Result<Location> {
        self.element_op("insert_child")?;
        let content = content.into();
        self.edit(|mut node| {
            let mut children = node.take_content().unwrap_or_default();
            let slot = pos.resolve(children.len());
            children.insert(slot, content);
            node.set_content(Some(children));
            Ok(node)
        })
    }

    /// Wrap the focus as the sole child of a new element
    ///
    /// The wrapper takes the focus's slot; the returned cursor is on it.
    pub fn insert_parent<I, K, V>(&self, tag: &str, attrs: I) -> Result<Location>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        debug!(tag = %tag, at = %self.path(), "Wrapping focus in new parent");
        let wrapper = make_node(tag, attrs, Body::Items(vec![self.content().clone()]))?;
        self.replace(wrapper)
    }

    /// Number of children of the focused element (0 on text)
    pub(crate) fn child_len(&self) -> usize {
        self.node().map_or(0, Node::child_count)
    }

    pub(crate) fn element_op(&self, op: &'static str) -> Result<()> {
        if self.node().is_some() {
            Ok(())
        } else {
            Err(Error::NotAnElement(op))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Attributes;

    fn el(tag: &str) -> Node {
        Node::new(tag).unwrap()
    }

    fn child_tags(node: &Node) -> Vec<String> {
        node.children()
            .map(|c| match c {
                Content::Element(n) => n.tag().to_string(),
                Content::Text(t) => format!("'{}'", t),
            })
            .collect()
    }

    #[test]
    fn test_edit_attrs_merge_then_dissoc() {
        // <a x="1"/> with {y: "2"} and dissoc [x] => {y: "2"}
        let a = el("a").with_attr("x", "1").cursor();
        let edited = a.edit_attrs([("y", "2")], ["x"]).unwrap();
        let expected: Attributes = [("y", "2")].into_iter().collect();
        assert_eq!(edited.node().unwrap().attrs(), &expected);
        assert_eq!(a.node().unwrap().attr("x"), Some("1"));
    }

    #[test]
    fn test_edit_attrs_new_values_win() {
        let a = el("a").with_attr("x", "1").cursor();
        let edited = a.edit_attrs([("x", "9")], Vec::<String>::new()).unwrap();
        assert_eq!(edited.node().unwrap().attr("x"), Some("9"));
    }

    #[test]
    fn test_edit_tag() {
        let root = el("a").with_child(el("b").with_child("t")).cursor();
        let renamed = root.down().unwrap().edit_tag("z").unwrap();
        assert_eq!(renamed.node().unwrap().tag(), "z");
        assert_eq!(renamed.node().unwrap().text_content(), "t");
        assert_eq!(child_tags(&renamed.tree()), vec!["z"]);

        assert!(matches!(root.edit_tag("1x"), Err(Error::InvalidName(_))));
        let text = renamed.down().unwrap();
        assert!(matches!(text.edit_tag("q"), Err(Error::NotAnElement(_))));
    }

    #[test]
    fn test_edit_text_replace_and_append() {
        let b = el("a").with_child(el("b").with_child(el("i"))).cursor().down().unwrap();
        let replaced = b.edit_text("new", false).unwrap();
        assert_eq!(child_tags(replaced.node().unwrap()), vec!["'new'"]);

        let appended = b.edit_text("more", true).unwrap();
        assert_eq!(child_tags(appended.node().unwrap()), vec!["i", "'more'"]);

        let on_empty = el("e").cursor().edit_text("x", true).unwrap();
        assert_eq!(on_empty.node().unwrap().text_content(), "x");
    }

    #[test]
    fn test_edit_text_on_text_focus() {
        let text = el("a").with_child("ab").cursor().down().unwrap();
        assert_eq!(text.edit_text("cd", true).unwrap().text_value(), Some("abcd"));
        assert_eq!(text.edit_text("cd", false).unwrap().text_value(), Some("cd"));
    }

    #[test]
    fn test_insert_child_positions() {
        let root = el("a").with_child(el("x")).with_child(el("y")).cursor();
        let first = root.insert_child(el("f"), Position::FIRST).unwrap();
        assert_eq!(child_tags(first.node().unwrap()), vec!["f", "x", "y"]);
        assert!(first.is_root());

        let mid = root.insert_child("t", Position::At(1)).unwrap();
        assert_eq!(child_tags(mid.node().unwrap()), vec!["x", "'t'", "y"]);

        let clamped = root.insert_child(el("z"), Position::At(10)).unwrap();
        let last = root.insert_child(el("z"), Position::Last).unwrap();
        assert_eq!(clamped.tree(), last.tree());
        assert_eq!(child_tags(last.node().unwrap()), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_insert_child_into_empty_node() {
        let leaf = el("a").with_child(el("b")).cursor().down().unwrap();
        assert!(leaf.node().unwrap().is_empty_node());
        let filled = leaf.insert_child(el("c"), Position::default()).unwrap();
        assert_eq!(filled.node().unwrap().tag(), "b");
        assert_eq!(child_tags(filled.node().unwrap()), vec!["c"]);
        assert_eq!(child_tags(&filled.tree()), vec!["b"]);
    }

    #[test]
    fn test_insert_parent_wraps_focus() {
        let root = el("a").with_child(el("b")).with_child(el("c")).cursor();
        let wrapper = root
            .child(1)
            .unwrap()
            .insert_parent("w", [("k", "v")])
            .unwrap();
        assert_eq!(wrapper.node().unwrap().tag(), "w");
        assert_eq!(wrapper.node().unwrap().attr("k"), Some("v"));
        assert_eq!(child_tags(wrapper.node().unwrap()), vec!["c"]);
        assert_eq!(child_tags(&wrapper.tree()), vec!["b", "w"]);

        let at_root = root.insert_parent("doc", Vec::<(String, String)>::new()).unwrap();
        assert!(at_root.is_root());
        assert_eq!(at_root.tree().tag(), "doc");
    }

    #[test]
    fn test_edits_are_pure() {
        let original = el("a").with_child(el("b").with_attr("x", "1")).with_child("t");
        let root = original.clone().cursor();
        let b = root.down().unwrap();
        let before = b.node().unwrap().clone();

        let _ = b.edit_tag("z").unwrap();
        let _ = b.edit_attrs([("y", "2")], ["x"]).unwrap();
        let _ = b.edit_text("q", false).unwrap();
        let _ = b.insert_child(el("c"), Position::Last).unwrap();
        let _ = b.insert_parent("w", Vec::<(String, String)>::new()).unwrap();

        assert_eq!(b.node().unwrap(), &before);
        assert_eq!(root.tree(), original);
    }
}
