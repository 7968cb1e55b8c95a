//! Loader - XML text to `Node` trees
//!
//! A lenient, non-validating reader:
//! - Comments, processing instructions, DOCTYPE and the XML declaration are
//!   skipped
//! - CDATA sections become text
//! - Predefined entities and numeric references are decoded
//! - Whitespace-only text is dropped unless asked to keep it
//! - An element without content entries gets absent content
//!
//! Open elements are kept on an explicit stack.

pub mod attributes;
pub mod scanner;

use tracing::trace;

use self::attributes::parse_attributes;
use self::scanner::Scanner;
use crate::dom::{Attributes, Content, Node};
use crate::entities::decode_text;
use crate::error::{Error, Result};

/// Loader options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Keep text fragments made only of whitespace
    pub keep_whitespace: bool,
}

/// Parse a document with default options
pub fn parse(input: &str) -> Result<Node> {
    parse_with(input, &LoadOptions::default())
}

/// Parse a document
pub fn parse_with(input: &str, options: &LoadOptions) -> Result<Node> {
    Loader::new(input, options).run()
}

impl std::str::FromStr for Node {
    type Err = Error;

    fn from_str(s: &str) -> Result<Node> {
        parse(s)
    }
}

/// An element whose end tag has not been seen yet
struct Open<'a> {
    tag: &'a str,
    attrs: Attributes,
    content: Vec<Content>,
    start: usize,
}

impl Open<'_> {
    fn push_text(&mut self, text: &str) {
        match self.content.last_mut() {
            Some(Content::Text(last)) => last.push_str(text),
            _ => self.content.push(Content::Text(text.to_string())),
        }
    }
}

struct Loader<'a> {
    scanner: Scanner<'a>,
    options: &'a LoadOptions,
    stack: Vec<Open<'a>>,
    root: Option<Node>,
    elements: usize,
}

impl<'a> Loader<'a> {
    fn new(input: &'a str, options: &'a LoadOptions) -> Self {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        Loader {
            scanner: Scanner::new(input),
            options,
            stack: Vec::new(),
            root: None,
            elements: 0,
        }
    }

    fn run(mut self) -> Result<Node> {
        while !self.scanner.is_eof() {
            let start = self.scanner.position();
            let Some(lt) = self.scanner.find_tag_start() else {
                let rest = self.scanner.rest();
                self.scanner.set_position(start + rest.len());
                self.text(rest, start)?;
                break;
            };
            if lt > start {
                let raw = self.scanner.slice(start, lt);
                self.text(raw, start)?;
            }
            self.scanner.set_position(lt);
            self.markup()?;
        }

        if let Some(open) = self.stack.last() {
            return Err(Error::parse(
                format!("unclosed element <{}>", open.tag),
                open.start,
            ));
        }
        let root = self
            .root
            .ok_or_else(|| Error::parse("no root element", self.scanner.position()))?;
        trace!(elements = self.elements, "document loaded");
        Ok(root)
    }

    /// Character data between markup
    fn text(&mut self, raw: &str, at: usize) -> Result<()> {
        let blank = raw.bytes().all(scanner::is_whitespace);
        let Some(open) = self.stack.last_mut() else {
            if blank {
                return Ok(());
            }
            return Err(Error::parse("text outside the root element", at));
        };
        if blank && !self.options.keep_whitespace {
            return Ok(());
        }
        open.push_text(&decode_text(raw));
        Ok(())
    }

    /// Dispatch on the construct starting at '<'
    fn markup(&mut self) -> Result<()> {
        let at = self.scanner.position();
        if self.scanner.starts_with("<?") {
            self.skip_past("?>", "unterminated processing instruction")
        } else if self.scanner.starts_with("<!--") {
            self.skip_past("-->", "unterminated comment")
        } else if self.scanner.starts_with("<![CDATA[") {
            self.cdata(at)
        } else if self.scanner.starts_with("<!") {
            let end = self
                .scanner
                .find_declaration_end()
                .ok_or_else(|| Error::parse("unterminated declaration", at))?;
            self.scanner.set_position(end + 1);
            Ok(())
        } else if self.scanner.starts_with("</") {
            self.end_tag(at)
        } else {
            self.start_tag(at)
        }
    }

    fn skip_past(&mut self, terminator: &str, message: &str) -> Result<()> {
        let at = self.scanner.position();
        let end = self
            .scanner
            .find(terminator)
            .ok_or_else(|| Error::parse(message, at))?;
        self.scanner.set_position(end + terminator.len());
        Ok(())
    }

    fn cdata(&mut self, at: usize) -> Result<()> {
        self.scanner.advance("<![CDATA[".len());
        let start = self.scanner.position();
        let end = self
            .scanner
            .find("]]>")
            .ok_or_else(|| Error::parse("unterminated CDATA section", at))?;
        let text = self.scanner.slice(start, end);
        self.scanner.set_position(end + 3);
        let open = self
            .stack
            .last_mut()
            .ok_or_else(|| Error::parse("CDATA outside the root element", at))?;
        if !text.is_empty() {
            open.push_text(text);
        }
        Ok(())
    }

    fn start_tag(&mut self, at: usize) -> Result<()> {
        self.scanner.advance(1);
        let tag = self
            .scanner
            .read_name()
            .ok_or_else(|| Error::parse("expected element name", at + 1))?;
        let attr_start = self.scanner.position();
        let end = self
            .scanner
            .find_tag_end_quoted()
            .ok_or_else(|| Error::parse(format!("unterminated start tag <{tag}>"), at))?;
        let raw = self.scanner.slice(attr_start, end);
        let self_closing = raw.ends_with('/');
        let attrs = parse_attributes(raw.strip_suffix('/').unwrap_or(raw));
        self.scanner.set_position(end + 1);

        if self.stack.is_empty() && self.root.is_some() {
            return Err(Error::parse("more than one root element", at));
        }
        if self_closing {
            let node = Node::from_parts(tag, attrs, None)?;
            self.attach(node);
        } else {
            self.stack.push(Open {
                tag,
                attrs,
                content: Vec::new(),
                start: at,
            });
        }
        Ok(())
    }

    fn end_tag(&mut self, at: usize) -> Result<()> {
        self.scanner.advance(2);
        let tag = self
            .scanner
            .read_name()
            .ok_or_else(|| Error::parse("expected element name in end tag", at + 2))?;
        self.scanner.skip_whitespace();
        if self.scanner.peek() != Some(b'>') {
            return Err(Error::parse(format!("malformed end tag </{tag}>"), at));
        }
        self.scanner.advance(1);

        let open = self
            .stack
            .pop()
            .ok_or_else(|| Error::parse(format!("unexpected end tag </{tag}>"), at))?;
        if open.tag != tag {
            return Err(Error::parse(
                format!("expected </{}>, found </{tag}>", open.tag),
                at,
            ));
        }
        let content = if open.content.is_empty() {
            None
        } else {
            Some(open.content)
        };
        let node = Node::from_parts(open.tag, open.attrs, content)?;
        self.attach(node);
        Ok(())
    }

    /// Hand a finished element to its parent, or make it the root
    fn attach(&mut self, node: Node) {
        self.elements += 1;
        match self.stack.last_mut() {
            Some(parent) => parent.content.push(node.into()),
            None => self.root = Some(node),
        }
    }
}
