//! Predicate library
//!
//! Ready-made query steps:
//! - Axis generators: `children`, `descendants`, `descendants_or_self`,
//!   `tag`, `ancestors`, `following_siblings`, `preceding_siblings`
//! - Element tests: `self_tag`, `attr`, `attr_eq`, `empty_node`, `filled`,
//!   `not_filled`, `text_node`
//! - Text tests: `text_eq` / `text_matches` on direct text,
//!   `texts_eq` / `texts_matches` on all descendant text
//!
//! Element tests never hold on a text focus.

use super::axes::{navigate, Axis};
use super::regex_cache;
use super::step::Predicate;
use crate::cursor::Location;
use crate::error::Result;

/// Every child location, text fragments included
pub fn children() -> Predicate {
    Predicate::axis(|loc| navigate(loc, Axis::Child))
}

/// Every location below the context, depth-first and left to right
pub fn descendants() -> Predicate {
    Predicate::axis(|loc| navigate(loc, Axis::Descendant))
}

/// The context followed by every location below it
pub fn descendants_or_self() -> Predicate {
    Predicate::axis(|loc| navigate(loc, Axis::DescendantOrSelf))
}

/// Parent, grandparent, ... up to the root
pub fn ancestors() -> Predicate {
    Predicate::axis(|loc| navigate(loc, Axis::Ancestor))
}

/// Siblings to the right, in document order
pub fn following_siblings() -> Predicate {
    Predicate::axis(|loc| navigate(loc, Axis::FollowingSibling))
}

/// Siblings to the left, nearest first
pub fn preceding_siblings() -> Predicate {
    Predicate::axis(|loc| navigate(loc, Axis::PrecedingSibling))
}

/// Child elements named `name`
pub fn tag(name: &str) -> Predicate {
    let name = name.to_string();
    Predicate::axis(move |loc| {
        loc.children()
            .into_iter()
            .filter(|child| child.node().is_some_and(|n| n.tag() == name))
            .collect()
    })
}

/// The focused element is named `name`
pub fn self_tag(name: &str) -> Predicate {
    let name = name.to_string();
    Predicate::filter(move |loc| loc.node().is_some_and(|n| n.tag() == name))
}

/// The focused element carries attribute `name`
pub fn attr(name: &str) -> Predicate {
    let name = name.to_string();
    Predicate::filter(move |loc| loc.node().is_some_and(|n| n.attrs().contains(&name)))
}

/// The focused element's attribute `name` equals `value`
pub fn attr_eq(name: &str, value: &str) -> Predicate {
    let name = name.to_string();
    let value = value.to_string();
    Predicate::filter(move |loc| loc.node().and_then(|n| n.attr(&name)) == Some(value.as_str()))
}

/// The focused element has absent content
pub fn empty_node() -> Predicate {
    Predicate::filter(is_empty_node)
}

#[inline]
fn is_empty_node(loc: &Location) -> bool {
    loc.node().is_some_and(|n| n.is_empty_node())
}

/// Not an empty element, or any exclusion holds
pub fn filled<I>(exclusions: I) -> Predicate
where
    I: IntoIterator<Item = Predicate>,
{
    let exclusions: Vec<Predicate> = exclusions.into_iter().collect();
    Predicate::filter(move |loc| !is_empty_node(loc) || exclusions.iter().any(|p| p.test(loc)))
}

/// Complement of [`filled`]
pub fn not_filled<I>(exclusions: I) -> Predicate
where
    I: IntoIterator<Item = Predicate>,
{
    filled(exclusions).negate()
}

/// Some content entry is text, or every entry when `pure` is set
///
/// Absent content never holds. A zero-length sequence holds only in pure
/// mode.
pub fn text_node(pure: bool) -> Predicate {
    Predicate::filter(move |loc| {
        let Some(content) = loc.node().and_then(|n| n.content()) else {
            return false;
        };
        if pure {
            content.iter().all(|c| c.is_text())
        } else {
            content.iter().any(|c| c.is_text())
        }
    })
}

/// Direct text of an element, or the fragment itself on a text focus
fn direct_text(loc: &Location) -> String {
    match loc.node() {
        Some(node) => node.direct_text(),
        None => loc.text_value().unwrap_or_default().to_string(),
    }
}

/// Direct text equals `text`
pub fn text_eq(text: &str) -> Predicate {
    let text = text.to_string();
    Predicate::filter(move |loc| direct_text(loc) == text)
}

/// Direct text contains a match of `pattern`
pub fn text_matches(pattern: &str) -> Result<Predicate> {
    let regex = regex_cache::compile(pattern)?;
    Ok(Predicate::filter(move |loc| regex.is_match(&direct_text(loc))))
}

/// All descendant text equals `text`
pub fn texts_eq(text: &str) -> Predicate {
    let text = text.to_string();
    Predicate::filter(move |loc| loc.content().text_content() == text)
}

/// All descendant text contains a match of `pattern`
pub fn texts_matches(pattern: &str) -> Result<Predicate> {
    let regex = regex_cache::compile(pattern)?;
    Ok(Predicate::filter(move |loc| {
        regex.is_match(&loc.content().text_content())
    }))
}
