//! Error types for cursor, edit and boundary operations

use crate::cursor::Path;

/// Result type for xmlcursor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type
///
/// Navigation and queries never fail: a missing parent, sibling or match is
/// an `Option::None` or an empty result. Only the operations below can.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Moving a node into itself or one of its descendants
    #[error("cannot move {from} into {to}: destination is inside the moved node")]
    Cycle { from: Path, to: Path },

    /// Tag is not a valid XML name
    #[error("invalid element name: {0:?}")]
    InvalidName(String),

    /// Element-only operation attempted on a text fragment
    #[error("{0} requires an element, cursor is on text")]
    NotAnElement(&'static str),

    /// Sibling insertion at the document root
    #[error("the root element has no siblings")]
    RootSibling,

    /// A path no longer resolves in the rebuilt tree
    #[error("path {0} does not resolve")]
    Unresolved(Path),

    /// Text pattern failed to compile
    #[error("invalid text pattern: {0}")]
    Regex(#[from] regex::Error),

    /// Loader could not build a tree
    #[error("XML parsing error at byte {position}: {message}")]
    Parse { message: String, position: usize },

    /// IO error from the sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S, position: usize) -> Self {
        Error::Parse {
            message: message.into(),
            position,
        }
    }
}
