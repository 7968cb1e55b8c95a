//! Compiled pattern cache
//!
//! Text predicates are often rebuilt with the same handful of patterns, so
//! compiled regexes are kept in a process-wide LRU cache.

use std::num::NonZeroUsize;
use std::sync::{Mutex, OnceLock};

use lru::LruCache;
use regex::Regex;
use tracing::warn;

use crate::error::Result;

const CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(128) {
    Some(n) => n,
    None => panic!("cache capacity must be non-zero"),
};

static CACHE: OnceLock<Mutex<LruCache<String, Regex>>> = OnceLock::new();

/// Compile `pattern`, reusing a cached compilation when available
pub fn compile(pattern: &str) -> Result<Regex> {
    let cache = CACHE.get_or_init(|| Mutex::new(LruCache::new(CACHE_CAPACITY)));
    // The cache holds only compiled patterns, so a poisoned lock is still usable
    let mut guard = cache.lock().unwrap_or_else(|poisoned| {
        warn!("pattern cache lock was poisoned, recovering");
        poisoned.into_inner()
    });
    if let Some(regex) = guard.get(pattern) {
        return Ok(regex.clone());
    }
    let regex = Regex::new(pattern)?;
    guard.put(pattern.to_string(), regex.clone());
    Ok(regex)
}
