//! Cursor Axes
//!
//! Structural axes over a cursor, in XPath terms:
//! - child, parent, self
//! - descendant, descendant-or-self
//! - ancestor, ancestor-or-self
//! - following-sibling, preceding-sibling
//!
//! Text fragments are locations too; filter on `Location::node()` for
//! elements only.

use crate::cursor::Location;

/// Axis to navigate along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Child,
    Descendant,
    DescendantOrSelf,
    Parent,
    Ancestor,
    AncestorOrSelf,
    FollowingSibling,
    PrecedingSibling,
    Self_,
}

/// Navigate along an axis from a context location
pub fn navigate(context: &Location, axis: Axis) -> Vec<Location> {
    match axis {
        Axis::Child => context.children(),
        Axis::Descendant => descendant_axis(context),
        Axis::DescendantOrSelf => descendant_or_self_axis(context),
        Axis::Parent => context.up().into_iter().collect(),
        Axis::Ancestor => ancestor_axis(context),
        Axis::AncestorOrSelf => {
            let mut result = vec![context.clone()];
            result.extend(ancestor_axis(context));
            result
        }
        Axis::FollowingSibling => following_sibling_axis(context),
        Axis::PrecedingSibling => preceding_sibling_axis(context),
        Axis::Self_ => vec![context.clone()],
    }
}

/// descendant:: axis - depth-first, left to right
fn descendant_axis(context: &Location) -> Vec<Location> {
    let mut result = Vec::new();
    let mut stack: Vec<Location> = context.children().into_iter().rev().collect();
    while let Some(current) = stack.pop() {
        stack.extend(current.children().into_iter().rev());
        result.push(current);
    }
    result
}

/// descendant-or-self:: axis - context location first
fn descendant_or_self_axis(context: &Location) -> Vec<Location> {
    let mut result = vec![context.clone()];
    result.extend(descendant_axis(context));
    result
}

/// ancestor:: axis - parent, grandparent, ... up to the root
fn ancestor_axis(context: &Location) -> Vec<Location> {
    let mut result = Vec::new();
    let mut current = context.up();
    while let Some(parent) = current {
        current = parent.up();
        result.push(parent);
    }
    result
}

/// following-sibling:: axis - document order
fn following_sibling_axis(context: &Location) -> Vec<Location> {
    let mut result = Vec::new();
    let mut sibling = context.right();
    while let Some(current) = sibling {
        sibling = current.right();
        result.push(current);
    }
    result
}

/// preceding-sibling:: axis - nearest first (reverse document order)
fn preceding_sibling_axis(context: &Location) -> Vec<Location> {
    let mut result = Vec::new();
    let mut sibling = context.left();
    while let Some(current) = sibling {
        sibling = current.left();
        result.push(current);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Node;

    fn el(tag: &str) -> Node {
        Node::new(tag).unwrap()
    }

    fn tags(locs: &[Location]) -> Vec<String> {
        locs.iter()
            .map(|l| match l.node() {
                Some(n) => n.tag().to_string(),
                None => format!("'{}'", l.text_value().unwrap_or_default()),
            })
            .collect()
    }

    /// <root><a><b/></a>t<c/></root>
    fn sample() -> Location {
        el("root")
            .with_child(el("a").with_child(el("b")))
            .with_child("t")
            .with_child(el("c"))
            .cursor()
    }

    #[test]
    fn test_child_axis() {
        let root = sample();
        assert_eq!(tags(&navigate(&root, Axis::Child)), vec!["a", "'t'", "c"]);
    }

    #[test]
    fn test_descendant_axis() {
        let root = sample();
        assert_eq!(
            tags(&navigate(&root, Axis::Descendant)),
            vec!["a", "b", "'t'", "c"]
        );
        assert_eq!(navigate(&root, Axis::DescendantOrSelf).len(), 5);
    }

    #[test]
    fn test_ancestor_axis() {
        let b = sample().down().unwrap().down().unwrap();
        assert_eq!(tags(&navigate(&b, Axis::Ancestor)), vec!["a", "root"]);
        assert_eq!(navigate(&b, Axis::AncestorOrSelf).len(), 3);
        assert_eq!(tags(&navigate(&b, Axis::Parent)), vec!["a"]);
    }

    #[test]
    fn test_sibling_axes() {
        let t = sample().child(1).unwrap();
        assert_eq!(tags(&navigate(&t, Axis::FollowingSibling)), vec!["c"]);
        assert_eq!(tags(&navigate(&t, Axis::PrecedingSibling)), vec!["a"]);
        assert_eq!(tags(&navigate(&t, Axis::Self_)), vec!["'t'"]);
    }
}
