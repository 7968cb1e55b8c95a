//! Query steps
//!
//! A query is a left-to-right list of steps. Each step is resolved into one
//! of three closed variants when it is built, never by inspecting values
//! during evaluation.

use std::fmt;
use std::sync::Arc;

use crate::cursor::Location;

/// Location test
pub type FilterFn = dyn Fn(&Location) -> bool + Send + Sync;

/// Location generator
pub type AxisFn = dyn Fn(&Location) -> Vec<Location> + Send + Sync;

/// User or library supplied step function
#[derive(Clone)]
pub enum Predicate {
    /// Keep the location when the test holds
    Filter(Arc<FilterFn>),
    /// Replace the location with the locations it generates
    Axis(Arc<AxisFn>),
}

impl Predicate {
    /// Wrap a location test
    pub fn filter<F>(f: F) -> Self
    where
        F: Fn(&Location) -> bool + Send + Sync + 'static,
    {
        Predicate::Filter(Arc::new(f))
    }

    /// Wrap a location generator
    pub fn axis<F>(f: F) -> Self
    where
        F: Fn(&Location) -> Vec<Location> + Send + Sync + 'static,
    {
        Predicate::Axis(Arc::new(f))
    }

    /// Apply to one location, producing zero or more locations
    pub fn apply(&self, loc: &Location) -> Vec<Location> {
        match self {
            Predicate::Filter(f) => {
                if f(loc) {
                    vec![loc.clone()]
                } else {
                    Vec::new()
                }
            }
            Predicate::Axis(g) => g(loc),
        }
    }

    /// Truth value at one location; a generator holds when it yields anything
    pub fn test(&self, loc: &Location) -> bool {
        match self {
            Predicate::Filter(f) => f(loc),
            Predicate::Axis(g) => !g(loc).is_empty(),
        }
    }

    /// Logical complement as a filter
    pub fn negate(self) -> Predicate {
        Predicate::filter(move |loc| !self.test(loc))
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Filter(_) => f.write_str("Predicate::Filter(..)"),
            Predicate::Axis(_) => f.write_str("Predicate::Axis(..)"),
        }
    }
}

/// One query step
#[derive(Debug, Clone)]
pub enum Step {
    /// Keep locations whose concatenated descendant text equals the string
    Text(String),
    /// Keep only the n-th location of the current result (0-based)
    Index(i64),
    /// Filter or expand each location
    Predicate(Predicate),
}

impl From<&str> for Step {
    fn from(text: &str) -> Self {
        Step::Text(text.to_string())
    }
}

impl From<String> for Step {
    fn from(text: String) -> Self {
        Step::Text(text)
    }
}

impl From<i64> for Step {
    fn from(index: i64) -> Self {
        Step::Index(index)
    }
}

impl From<i32> for Step {
    fn from(index: i32) -> Self {
        Step::Index(i64::from(index))
    }
}

impl From<usize> for Step {
    fn from(index: usize) -> Self {
        Step::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl From<Predicate> for Step {
    fn from(predicate: Predicate) -> Self {
        Step::Predicate(predicate)
    }
}

/// Ordered list of steps with builder methods
#[derive(Debug, Clone, Default)]
pub struct Query {
    steps: Vec<Step>,
}

impl Query {
    /// Create an empty query (matches the starting location)
    pub fn new() -> Self {
        Query { steps: Vec::new() }
    }

    /// Append any step
    pub fn step(mut self, step: impl Into<Step>) -> Self {
        self.steps.push(step.into());
        self
    }

    /// Append a child-element-by-tag step
    pub fn tag(self, name: &str) -> Self {
        self.step(super::predicates::tag(name))
    }

    /// Append a descendant-text equality step
    pub fn text(self, text: &str) -> Self {
        self.step(Step::Text(text.to_string()))
    }

    /// Append a positional step
    pub fn index(self, n: i64) -> Self {
        self.step(Step::Index(n))
    }

    /// Append a predicate step
    pub fn filter(self, predicate: Predicate) -> Self {
        self.step(predicate)
    }

    /// Steps in order
    #[inline]
    pub fn steps(&self) -> &[Step] {
        &self.steps
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
}

impl From<Vec<Step>> for Query {
    fn from(steps: Vec<Step>) -> Self {
        Query { steps }
    }
}

impl FromIterator<Step> for Query {
    fn from_iter<T: IntoIterator<Item = Step>>(iter: T) -> Self {
        Query {
            steps: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Query {
    type Item = Step;
    type IntoIter = std::vec::IntoIter<Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a> IntoIterator for &'a Query {
    type Item = Step;
    type IntoIter = std::iter::Cloned<std::slice::Iter<'a, Step>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter().cloned()
    }
}
