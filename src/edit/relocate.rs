//! Moving and copying subtrees between cursors
//!
//! A move removes the source first, so the destination is found again by
//! its path in the smaller tree. The removal can renumber same-tag
//! siblings along the destination's route; `Path::after_removal` accounts
//! for that before the lookup.

use tracing::debug;

use super::Position;
use crate::cursor::Location;
use crate::dom::Content;
use crate::error::{Error, Result};

/// Move the node at `from` to become a child of `to` at `pos`
///
/// Both cursors must be on the same tree; the result is built from `from`'s
/// version of it. Moving an element into itself or below itself fails with
/// [`Error::Cycle`] and builds nothing. Returns a cursor on the moved node.
pub fn move_node(from: &Location, to: &Location, pos: Position) -> Result<Location> {
    to.element_op("move_node destination")?;
    let from_path = from.path();
    let to_path = to.path();
    debug!(from = %from_path, to = %to_path, "Moving node");

    // A text fragment shares its parent's path and owns no subtree
    let moving_element = from.node().is_some();
    if moving_element && from_path.is_prefix_of(&to_path) {
        return Err(Error::Cycle {
            from: from_path,
            to: to_path,
        });
    }

    let Some(pruned) = from.remove() else {
        // Only the root has no parent, and the root is a prefix of everything
        return Err(Error::Cycle {
            from: from_path,
            to: to_path,
        });
    };
    let target = if moving_element {
        to_path.after_removal(&from_path)
    } else {
        to_path
    };
    let dest = pruned
        .locate(&target)
        .ok_or_else(|| Error::Unresolved(target.clone()))?;

    insert_tracked(&dest, from.content().clone(), pos)
        .ok_or(Error::Unresolved(target))
}

/// Insert a copy of the node at `from` as a child of `to` at `pos`
///
/// The source is left as it was. The result is built from `to`'s tree and
/// the returned cursor is on the inserted copy.
pub fn copy_node(from: &Location, to: &Location, pos: Position) -> Result<Location> {
    to.element_op("copy_node destination")?;
    debug!(from = %from.path(), to = %to.path(), "Copying node");
    insert_tracked(to, from.content().clone(), pos).ok_or_else(|| Error::Unresolved(to.path()))
}

/// Insert under `dest` and step onto the new child by its slot
fn insert_tracked(dest: &Location, content: Content, pos: Position) -> Option<Location> {
    let slot = pos.resolve(dest.child_len());
    dest.insert_child(content, pos).ok()?.child(slot)
}

impl Location {
    /// Move this node under `to`; see [`move_node`]
    pub fn move_node(&self, to: &Location, pos: Position) -> Result<Location> {
        move_node(self, to, pos)
    }

    /// Copy this node under `to`; see [`copy_node`]
    pub fn copy_node(&self, to: &Location, pos: Position) -> Result<Location> {
        copy_node(self, to, pos)
    }
}
