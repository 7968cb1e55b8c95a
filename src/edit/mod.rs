//! Edit Module - Structural rewrites through cursors
//!
//! - `ops`: tag, text and attribute edits, child and parent insertion
//! - `relocate`: `move_node` and `copy_node`
//!
//! Every operation returns a new `Location`. The receiver and every tree
//! reachable from it stay as they were.

pub mod ops;
pub mod relocate;

pub use relocate::{copy_node, move_node};

/// Where a new child goes among the existing children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Zero-based slot, clamped to the end
    At(usize),
    /// After the last child
    Last,
}

impl Default for Position {
    fn default() -> Self {
        Position::FIRST
    }
}

impl Position {
    /// The front of the content sequence
    pub const FIRST: Position = Position::At(0);

    /// Concrete slot for a sequence of `len` entries
    #[inline]
    pub fn resolve(self, len: usize) -> usize {
        match self {
            Position::At(n) => n.min(len),
            Position::Last => len,
        }
    }
}

impl From<usize> for Position {
    fn from(n: usize) -> Self {
        Position::At(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_resolve() {
        assert_eq!(Position::FIRST.resolve(3), 0);
        assert_eq!(Position::At(2).resolve(3), 2);
        assert_eq!(Position::At(9).resolve(3), 3);
        assert_eq!(Position::Last.resolve(3), 3);
        assert_eq!(Position::from(1), Position::At(1));
        assert_eq!(Position::default(), Position::At(0));
    }
}
