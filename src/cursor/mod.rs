//! Cursor Module - Persistent navigation and path addressing
//!
//! - `Location`: focus plus shared parent frames, edit-without-mutation
//! - `Path`: root-first `tag[ordinal]` route used to find a node again
//!   after the tree has been rebuilt

pub mod location;
pub mod path;

pub use location::Location;
pub use path::{path, path_with, Path, PathOptions, PathStep};
