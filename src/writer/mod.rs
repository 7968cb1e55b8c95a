//! Canonical XML text output
//!
//! Layout rules:
//! - One declaration line, then one element per line
//! - Absent content renders self-closing: `<tag/>`
//! - Pure-text content (including a zero-length sequence) stays inline:
//!   `<tag>text</tag>`
//! - Any other content opens a block; each child, text fragments included,
//!   goes on its own line one level deeper
//!
//! Traversal uses an explicit stack, so tree depth does not grow the call
//! stack.

pub mod sink;

pub use sink::{write_file, write_file_with, write_to, write_to_with};

use std::borrow::Cow;
use std::fmt::Write;

use crate::dom::{Content, Node};
use crate::entities::encode_text;

/// Declaration line emitted before the root element
pub const DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Output options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Spaces per depth level
    pub indent: usize,
    /// Emit the declaration line
    pub declaration: bool,
    /// Entity-escape text and attribute values
    pub escape: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            indent: 4,
            declaration: true,
            escape: false,
        }
    }
}

/// Serialize `node` in the canonical layout
pub fn to_xml_string(node: &Node) -> String {
    to_xml_string_with(node, &WriteOptions::default())
}

/// Serialize `node` with explicit options
pub fn to_xml_string_with(node: &Node, options: &WriteOptions) -> String {
    let mut serializer = Serializer::new(options);
    serializer.serialize(node);
    serializer.output
}

enum Task<'a> {
    Open(&'a Node, usize),
    Close(&'a str, usize),
    Line(&'a str, usize),
}

struct Serializer<'o> {
    options: &'o WriteOptions,
    output: String,
}

impl<'o> Serializer<'o> {
    fn new(options: &'o WriteOptions) -> Self {
        Serializer {
            options,
            output: String::new(),
        }
    }

    fn serialize(&mut self, root: &Node) {
        if self.options.declaration {
            self.output.push_str(DECLARATION);
            self.output.push('\n');
        }

        let mut stack = vec![Task::Open(root, 0)];
        while let Some(task) = stack.pop() {
            match task {
                Task::Open(node, depth) => {
                    self.indent(depth);
                    self.start_tag(node);
                    let Some(content) = node.content() else {
                        self.output.push_str("/>\n");
                        continue;
                    };
                    self.output.push('>');
                    if content.iter().all(Content::is_text) {
                        for text in content.iter().filter_map(Content::as_text) {
                            self.text(text);
                        }
                        self.end_tag(node.tag());
                        continue;
                    }
                    self.output.push('\n');
                    stack.push(Task::Close(node.tag(), depth));
                    for child in content.iter().rev() {
                        stack.push(match child {
                            Content::Element(el) => Task::Open(el, depth + 1),
                            Content::Text(text) => Task::Line(text, depth + 1),
                        });
                    }
                }
                Task::Close(tag, depth) => {
                    self.indent(depth);
                    self.end_tag(tag);
                }
                Task::Line(text, depth) => {
                    self.indent(depth);
                    self.text(text);
                    self.output.push('\n');
                }
            }
        }
    }

    fn indent(&mut self, depth: usize) {
        let width = depth * self.options.indent;
        self.output.extend(std::iter::repeat(' ').take(width));
    }

    fn start_tag(&mut self, node: &Node) {
        self.output.push('<');
        self.output.push_str(node.tag());
        for (name, value) in node.attrs().iter() {
            let value = self.escaped(value);
            // Writing into a String cannot fail
            let _ = write!(self.output, " {name}=\"{value}\"");
        }
    }

    fn end_tag(&mut self, tag: &str) {
        self.output.push_str("</");
        self.output.push_str(tag);
        self.output.push_str(">\n");
    }

    fn text(&mut self, text: &str) {
        let text = self.escaped(text);
        self.output.push_str(&text);
    }

    fn escaped<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.options.escape {
            encode_text(text)
        } else {
            Cow::Borrowed(text)
        }
    }
}

impl Node {
    /// Serialize this element in the canonical layout
    pub fn to_xml_string(&self) -> String {
        to_xml_string(self)
    }
}
