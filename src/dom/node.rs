//! Element and content representation
//!
//! An element owns its attributes and an optional content sequence.
//! Child elements sit behind `Arc`, so cloning a content sequence is shallow
//! and every tree version shares the subtrees it did not touch.

use std::sync::Arc;

use super::attributes::Attributes;
use crate::cursor::Location;
use crate::error::{Error, Result};

/// One entry of an element's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Child element
    Element(Arc<Node>),
    /// Raw text fragment
    Text(String),
}

impl Content {
    /// Get the element, if this entry is one
    #[inline]
    pub fn as_element(&self) -> Option<&Node> {
        match self {
            Content::Element(node) => Some(node),
            Content::Text(_) => None,
        }
    }

    /// Get the text, if this entry is a text fragment
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Element(_) => None,
        }
    }

    /// Check if this entry is a text fragment
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Content::Text(_))
    }

    /// Check if this entry is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self, Content::Element(_))
    }

    /// Concatenation of every text fragment at or below this entry
    pub fn text_content(&self) -> String {
        match self {
            Content::Text(text) => text.clone(),
            Content::Element(node) => node.text_content(),
        }
    }
}

impl From<Node> for Content {
    fn from(node: Node) -> Self {
        Content::Element(Arc::new(node))
    }
}

impl From<Arc<Node>> for Content {
    fn from(node: Arc<Node>) -> Self {
        Content::Element(node)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

/// An XML element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    tag: String,
    attrs: Attributes,
    /// `None` marks an empty element, distinct from `Some(vec![])`
    content: Option<Vec<Content>>,
}

impl Node {
    /// Create an empty element (no attributes, absent content)
    pub fn new(tag: impl Into<String>) -> Result<Self> {
        let tag = tag.into();
        validate_name(&tag)?;
        Ok(Node {
            tag,
            attrs: Attributes::new(),
            content: None,
        })
    }

    /// Create an element from all three parts
    pub fn from_parts(
        tag: impl Into<String>,
        attrs: Attributes,
        content: Option<Vec<Content>>,
    ) -> Result<Self> {
        let tag = tag.into();
        validate_name(&tag)?;
        Ok(Node { tag, attrs, content })
    }

    /// Element name
    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Rename the element
    pub fn set_tag(&mut self, tag: impl Into<String>) -> Result<()> {
        let tag = tag.into();
        validate_name(&tag)?;
        self.tag = tag;
        Ok(())
    }

    /// Attribute mapping
    #[inline]
    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    /// Mutable attribute mapping
    #[inline]
    pub fn attrs_mut(&mut self) -> &mut Attributes {
        &mut self.attrs
    }

    /// Get attribute value by name
    #[inline]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }

    /// Content sequence, or `None` for an empty element
    #[inline]
    pub fn content(&self) -> Option<&[Content]> {
        self.content.as_deref()
    }

    /// Replace the content sequence
    #[inline]
    pub fn set_content(&mut self, content: Option<Vec<Content>>) {
        self.content = content;
    }

    /// Take the content sequence out, leaving the element empty
    #[inline]
    pub fn take_content(&mut self) -> Option<Vec<Content>> {
        self.content.take()
    }

    /// Check if content is absent (not merely zero-length)
    #[inline]
    pub fn is_empty_node(&self) -> bool {
        self.content.is_none()
    }

    /// Number of content entries
    #[inline]
    pub fn child_count(&self) -> usize {
        self.content.as_ref().map_or(0, Vec::len)
    }

    /// Iterate over content entries
    pub fn children(&self) -> impl DoubleEndedIterator<Item = &Content> {
        self.content.iter().flatten()
    }

    /// Iterate over child elements only
    pub fn elements(&self) -> impl Iterator<Item = &Node> {
        self.children().filter_map(Content::as_element)
    }

    /// Concatenation of the direct text fragments, ignoring child elements
    pub fn direct_text(&self) -> String {
        self.children().filter_map(Content::as_text).collect()
    }

    /// Concatenation of all descendant text fragments in document order
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        let mut stack: Vec<&Content> = self.children().rev().collect();
        while let Some(entry) = stack.pop() {
            match entry {
                Content::Text(text) => out.push_str(text),
                Content::Element(node) => stack.extend(node.children().rev()),
            }
        }
        out
    }

    /// Count this element plus every element and text fragment below it
    pub fn node_count(&self) -> usize {
        let mut count = 1;
        let mut stack: Vec<&Node> = vec![self];
        while let Some(node) = stack.pop() {
            for entry in node.children() {
                count += 1;
                if let Content::Element(child) = entry {
                    stack.push(child);
                }
            }
        }
        count
    }

    /// Same tag and attributes with new content; the name is already valid
    pub(crate) fn rebuild(&self, content: Option<Vec<Content>>) -> Node {
        Node {
            tag: self.tag.clone(),
            attrs: self.attrs.clone(),
            content,
        }
    }

    /// Builder: set an attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name, value);
        self
    }

    /// Builder: append a content entry, creating the content sequence if absent
    pub fn with_child(mut self, child: impl Into<Content>) -> Self {
        self.content.get_or_insert_with(Vec::new).push(child.into());
        self
    }

    /// Open a cursor on this element as the root
    pub fn cursor(self) -> Location {
        Location::new(self)
    }
}

/// Content argument of [`make_node`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Body {
    /// Absent content: the element serializes self-closing
    #[default]
    Empty,
    /// Ready-made content sequence
    Items(Vec<Content>),
}

impl Body {
    fn into_content(self) -> Option<Vec<Content>> {
        match self {
            Body::Empty => None,
            Body::Items(items) => Some(items),
        }
    }
}

impl From<Content> for Body {
    fn from(content: Content) -> Self {
        Body::Items(vec![content])
    }
}

impl From<Node> for Body {
    fn from(node: Node) -> Self {
        Body::Items(vec![node.into()])
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Items(vec![text.into()])
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Items(vec![text.into()])
    }
}

impl From<Vec<Content>> for Body {
    fn from(items: Vec<Content>) -> Self {
        Body::Items(items)
    }
}

impl From<Vec<Node>> for Body {
    fn from(nodes: Vec<Node>) -> Self {
        Body::Items(nodes.into_iter().map(Content::from).collect())
    }
}

impl From<Option<Vec<Content>>> for Body {
    fn from(content: Option<Vec<Content>>) -> Self {
        content.map_or(Body::Empty, Body::Items)
    }
}

/// Build an element from a tag, attribute pairs and a body
///
/// A single content value is wrapped into a one-element sequence; a
/// sequence is used as is.
pub fn make_node<I, K, V>(tag: &str, attrs: I, body: impl Into<Body>) -> Result<Node>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    Node::from_parts(tag, attrs.into_iter().collect(), body.into().into_content())
}

/// Check that a tag is a well-formed XML name
pub fn validate_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => is_name_start_char(first) && chars.all(is_name_char),
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidName(name.to_string()))
    }
}

#[inline]
fn is_name_start_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == ':' || !c.is_ascii()
}

#[inline]
fn is_name_char(c: char) -> bool {
    is_name_start_char(c) || c.is_ascii_digit() || c == '-' || c == '.'
}
