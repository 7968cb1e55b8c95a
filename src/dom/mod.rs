//! Tree Model - Elements with mixed content
//!
//! - `Node`: tag, attributes and an optional content sequence
//! - `Content`: child element or raw text fragment
//! - `Attributes`: insertion-ordered name/value mapping
//! - `make_node`: pure constructor used by the edit operations

pub mod attributes;
pub mod node;

pub use attributes::Attributes;
pub use node::{make_node, validate_name, Body, Content, Node};
