//! Query evaluation
//!
//! Evaluation is depth first over the steps. The matcher keeps a stack of
//! pending generator outputs, one entry per expanding step still in play,
//! and pushes each location as far down the step list as it gets before
//! pulling the next one. Nothing nests per step, so long queries (a path
//! replayed on a deep tree) do not grow the call stack, and `select_first`
//! stops as soon as the first full match is produced.

use tracing::trace;

use super::step::Step;
use crate::cursor::Location;

/// Locations waiting to enter step `stage`
struct Pending {
    stage: usize,
    locations: std::vec::IntoIter<Location>,
}

/// Lazy sequence of matching locations, in document order per step
pub struct Matches {
    steps: Vec<Step>,
    pending: Vec<Pending>,
    /// Locations seen so far by each `Index` step
    seen: Vec<usize>,
}

impl Matches {
    fn new(start: Location, steps: Vec<Step>) -> Self {
        let seen = vec![0; steps.len()];
        Matches {
            steps,
            pending: vec![Pending {
                stage: 0,
                locations: vec![start].into_iter(),
            }],
            seen,
        }
    }

    /// Run `loc` through the steps from `stage` until it is dropped,
    /// expanded, or comes out the end
    fn advance(&mut self, mut stage: usize, loc: Location) -> Option<Location> {
        loop {
            let Some(step) = self.steps.get(stage) else {
                return Some(loc);
            };
            match step {
                Step::Text(expected) => {
                    if loc.content().text_content() != *expected {
                        return None;
                    }
                }
                Step::Index(n) => {
                    let seen = self.seen[stage];
                    self.seen[stage] += 1;
                    if usize::try_from(*n).ok() != Some(seen) {
                        return None;
                    }
                    // Nothing else can pass this step; drop its feeders
                    self.pending.retain(|p| p.stage > stage);
                }
                Step::Predicate(predicate) => {
                    self.pending.push(Pending {
                        stage: stage + 1,
                        locations: predicate.apply(&loc).into_iter(),
                    });
                    return None;
                }
            }
            stage += 1;
        }
    }
}

impl Iterator for Matches {
    type Item = Location;

    fn next(&mut self) -> Option<Location> {
        loop {
            let top = self.pending.last_mut()?;
            let stage = top.stage;
            match top.locations.next() {
                Some(loc) => {
                    if let Some(found) = self.advance(stage, loc) {
                        return Some(found);
                    }
                }
                None => {
                    self.pending.pop();
                }
            }
        }
    }
}

impl std::fmt::Debug for Matches {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matches")
            .field("steps", &self.steps.len())
            .field("pending", &self.pending.len())
            .finish()
    }
}

/// Evaluate `steps` starting at `start`
///
/// An empty step list yields `start` itself.
pub fn select<I>(start: &Location, steps: I) -> Matches
where
    I: IntoIterator<Item = Step>,
{
    let steps: Vec<Step> = steps.into_iter().collect();
    trace!(steps = steps.len(), depth = start.depth(), "query built");
    Matches::new(start.clone(), steps)
}

/// First match of `steps` from `start`
pub fn select_first<I>(start: &Location, steps: I) -> Option<Location>
where
    I: IntoIterator<Item = Step>,
{
    select(start, steps).next()
}

/// Evaluate `steps` from the root of `loc`'s tree
pub fn select_from_root<I>(loc: &Location, steps: I) -> Matches
where
    I: IntoIterator<Item = Step>,
{
    select(&loc.root(), steps)
}

/// First match of `steps` from the root of `loc`'s tree
pub fn select_first_from_root<I>(loc: &Location, steps: I) -> Option<Location>
where
    I: IntoIterator<Item = Step>,
{
    select_first(&loc.root(), steps)
}

impl Location {
    /// All locations matched by `steps` from here
    pub fn select<I>(&self, steps: I) -> Matches
    where
        I: IntoIterator<Item = Step>,
    {
        select(self, steps)
    }

    /// First location matched by `steps` from here
    pub fn select_first<I>(&self, steps: I) -> Option<Location>
    where
        I: IntoIterator<Item = Step>,
    {
        select_first(self, steps)
    }

    /// All locations matched by `steps` from the root
    pub fn select_from_root<I>(&self, steps: I) -> Matches
    where
        I: IntoIterator<Item = Step>,
    {
        select_from_root(self, steps)
    }

    /// First location matched by `steps` from the root
    pub fn select_first_from_root<I>(&self, steps: I) -> Option<Location>
    where
        I: IntoIterator<Item = Step>,
    {
        select_first_from_root(self, steps)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::dom::Node;
    use crate::query::{predicates, Predicate, Query};

    fn el(tag: &str) -> Node {
        Node::new(tag).unwrap()
    }

    /// <a><b>1</b><b>2</b><c><b>3</b></c></a>
    fn sample() -> Location {
        el("a")
            .with_child(el("b").with_child("1"))
            .with_child(el("b").with_child("2"))
            .with_child(el("c").with_child(el("b").with_child("3")))
            .cursor()
    }

    fn texts(matches: Matches) -> Vec<String> {
        matches.map(|l| l.content().text_content()).collect()
    }

    #[test]
    fn test_empty_query_matches_start() {
        let root = sample();
        let found: Vec<_> = root.select(Query::new()).collect();
        assert_eq!(found.len(), 1);
        assert!(found[0].is_root());
    }

    #[test]
    fn test_tag_steps() {
        let root = sample();
        assert_eq!(texts(root.select(Query::new().tag("b"))), vec!["1", "2"]);
        assert_eq!(texts(root.select(Query::new().tag("c").tag("b"))), vec!["3"]);
        assert_eq!(root.select(Query::new().tag("zz")).count(), 0);
    }

    #[test]
    fn test_index_step() {
        let root = sample();
        assert_eq!(texts(root.select(Query::new().tag("b").index(1))), vec!["2"]);
        assert_eq!(root.select(Query::new().tag("b").index(5)).count(), 0);
        assert_eq!(root.select(Query::new().tag("b").index(-1)).count(), 0);
    }

    #[test]
    fn test_text_step() {
        let root = sample();
        let found = root.select_first(Query::new().tag("b").text("2")).unwrap();
        assert_eq!(found.index(), 1);
        assert!(root.select_first(Query::new().tag("b").text("3")).is_none());
    }

    #[test]
    fn test_from_root() {
        let deep = sample().child(2).unwrap().down().unwrap();
        let found = deep.select_first_from_root(Query::new().tag("b")).unwrap();
        assert_eq!(found.content().text_content(), "1");
        assert_eq!(deep.select_from_root(Query::new().tag("b")).count(), 2);
    }

    #[test]
    fn test_descendant_steps() {
        let root = sample();
        let all_b = Query::new()
            .filter(predicates::descendants())
            .filter(predicates::self_tag("b"));
        assert_eq!(texts(root.select(all_b)), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_select_first_is_lazy() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let counting = Predicate::filter(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });
        let root = sample();
        let first = root
            .select_first(Query::new().tag("b").filter(counting))
            .unwrap();
        assert_eq!(first.content().text_content(), "1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_index_counts_across_parents() {
        // Index applies to the whole current sequence, not per parent
        let root = sample();
        let any_b = Query::new()
            .filter(predicates::descendants())
            .filter(predicates::self_tag("b"));
        assert_eq!(texts(root.select(any_b.clone().index(2))), vec!["3"]);
        assert_eq!(texts(root.select(any_b.index(0).text("1"))), vec!["1"]);
    }

    #[test]
    fn test_long_query_does_not_recurse() {
        let root = sample();
        let mut query = Query::new().tag("b");
        for _ in 0..50_000 {
            query = query.filter(Predicate::filter(|_| true));
        }
        assert_eq!(texts(root.select(query.index(1))), vec!["2"]);
    }
}
