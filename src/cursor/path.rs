//! Path addressing
//!
//! A path is the root-first route of `tag[ordinal]` steps down to a node.
//! The ordinal counts earlier siblings with the same tag and is omitted
//! when there are none. Replaying a path as a query from the root finds the
//! node again after the tree has been rebuilt, as long as that slot was not
//! itself edited.

use std::fmt;

use super::location::Location;
use crate::query::{predicates, Query, Step};

/// One level of a path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathStep {
    pub tag: String,
    /// Same-tag siblings to the left; `None` when there are none
    pub ordinal: Option<usize>,
}

impl PathStep {
    /// Create a step
    pub fn new(tag: impl Into<String>, ordinal: Option<usize>) -> Self {
        PathStep {
            tag: tag.into(),
            ordinal: ordinal.filter(|&n| n > 0),
        }
    }

    #[inline]
    fn position(&self) -> usize {
        self.ordinal.unwrap_or(0)
    }
}

/// Path options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathOptions {
    /// Emit the root element's own tag as the first step
    pub include_root: bool,
}

/// Root-first route to a node
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    steps: Vec<PathStep>,
    includes_root: bool,
}

impl Path {
    /// Build a path from steps below the root
    pub fn new(steps: Vec<PathStep>) -> Self {
        Path {
            steps,
            includes_root: false,
        }
    }

    /// All steps, including the root step when present
    #[inline]
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Check if the first step names the root element
    #[inline]
    pub fn includes_root(&self) -> bool {
        self.includes_root
    }

    /// Number of steps
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if there are no steps
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps below the root
    fn relative(&self) -> &[PathStep] {
        if self.includes_root && !self.steps.is_empty() {
            &self.steps[1..]
        } else {
            &self.steps
        }
    }

    /// Check if `other` lies at or below the node this path names
    ///
    /// The empty path names the root and is a prefix of every path.
    pub fn is_prefix_of(&self, other: &Path) -> bool {
        other.relative().starts_with(self.relative())
    }

    /// Query steps that re-locate this path from the root
    pub fn to_query(&self) -> Query {
        let mut steps = self.steps.iter();
        let mut query = Query::new();
        if self.includes_root {
            if let Some(root) = steps.next() {
                query = query.filter(predicates::self_tag(&root.tag));
            }
        }
        for step in steps {
            query = query.tag(&step.tag);
            if let Some(ordinal) = step.ordinal {
                query = query.step(Step::Index(ordinal as i64));
            }
        }
        query
    }

    /// The same node's path once the node at `removed` has been deleted
    ///
    /// Deleting a same-tag earlier sibling of one of this path's nodes
    /// shifts that node's ordinal down by one.
    pub fn after_removal(&self, removed: &Path) -> Path {
        let gone = removed.relative();
        let Some((last, parent)) = gone.split_last() else {
            return self.clone();
        };
        let offset = self.steps.len() - self.relative().len();
        let depth = parent.len();
        let mut adjusted = self.clone();
        let mine = self.relative();
        if mine.len() > depth
            && mine[..depth] == *parent
            && mine[depth].tag == last.tag
            && mine[depth].position() > last.position()
        {
            let step = &mut adjusted.steps[offset + depth];
            *step = PathStep::new(step.tag.clone(), Some(step.position() - 1));
        }
        adjusted
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str("/");
        }
        for step in &self.steps {
            write!(f, "/{}", step.tag)?;
            if let Some(ordinal) = step.ordinal {
                write!(f, "[{}]", ordinal)?;
            }
        }
        Ok(())
    }
}

/// Path of `loc`, excluding the root element's tag
pub fn path(loc: &Location) -> Path {
    path_with(loc, PathOptions::default())
}

/// Path of `loc`
pub fn path_with(loc: &Location, options: PathOptions) -> Path {
    let (levels, root_tag) = loc.ancestry();
    let mut steps = Vec::with_capacity(levels.len() + 1);
    let includes_root = options.include_root && root_tag.is_some();
    if let (true, Some(tag)) = (options.include_root, root_tag) {
        steps.push(PathStep::new(tag, None));
    }
    for level in levels.iter().rev() {
        let same = level
            .left
            .iter()
            .filter_map(|c| c.as_element())
            .filter(|n| n.tag() == level.tag)
            .count();
        steps.push(PathStep::new(level.tag, Some(same)));
    }
    Path {
        steps,
        includes_root,
    }
}

impl Location {
    /// Path of this cursor, excluding the root element's tag
    pub fn path(&self) -> Path {
        path(self)
    }

    /// Path of this cursor
    pub fn path_with(&self, options: PathOptions) -> Path {
        path_with(self, options)
    }

    /// Re-locate `path` in this cursor's tree
    pub fn locate(&self, path: &Path) -> Option<Location> {
        self.select_first_from_root(path.to_query())
    }
}
