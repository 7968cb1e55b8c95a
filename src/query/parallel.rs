//! Parallel query evaluation
//!
//! Uses Rayon to run several independent queries against the same tree.
//! Each query still runs on a single thread; only the queries are spread
//! over the pool.

use rayon::prelude::*;

use super::step::Query;
use crate::cursor::Location;

/// Evaluate every query from `loc`, results in query order
pub fn select_all(loc: &Location, queries: &[Query]) -> Vec<Vec<Location>> {
    queries
        .par_iter()
        .map(|query| loc.select(query).collect())
        .collect()
}

/// Evaluate keyed queries from `loc`, pairing each key with its matches
pub fn select_keyed<K>(loc: &Location, queries: &[(K, Query)]) -> Vec<(K, Vec<Location>)>
where
    K: Clone + Send + Sync,
{
    queries
        .par_iter()
        .map(|(key, query)| (key.clone(), loc.select(query).collect()))
        .collect()
}
