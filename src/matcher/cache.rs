// Copyright 2025 Sqlregex Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bounded compiled-pattern cache with LRU eviction
//!
//! Query workloads reuse a small working set of patterns across many rows,
//! so an O(1) LRU keeps hot patterns resident while bounding memory.
//!
//! Concurrency contract: one mutex covers the lookup/compile/evict step and
//! the recency book-keeping; it is released before any matching runs.
//! Matchers are handed out as `Arc` clones, so an entry evicted while a
//! caller is mid-match stays alive until that caller drops its reference.
//! Concurrent misses for the same key serialize behind the mutex, so each
//! pattern compiles at most once per miss window.

use std::hash::BuildHasherDefault;
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use rustc_hash::FxHasher;

use super::compile::{compile, CompiledMatcher};
use super::PatternKey;
use crate::core::{Error, Result};

/// Default maximum number of cached compiled patterns
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// Cache counters, taken under the same lock as the entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups that found an existing compiled pattern
    pub hits: u64,
    /// Lookups that had to compile
    pub misses: u64,
    /// Entries evicted to stay within capacity
    pub evictions: u64,
}

struct CacheInner {
    entries: LruCache<PatternKey, Arc<CompiledMatcher>, FxBuildHasher>,
    stats: CacheStats,
}

/// Thread-safe bounded cache mapping [`PatternKey`] to [`CompiledMatcher`]
///
/// Invariant: `len() <= capacity()` after any operation completes. Failed
/// compilations are never inserted; an invalid pattern fails identically
/// (and cheaply) on every call.
pub struct PatternCache {
    inner: Mutex<CacheInner>,
}

impl std::fmt::Debug for PatternCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternCache").finish_non_exhaustive()
    }
}

impl PatternCache {
    /// Create a cache with [`DEFAULT_CACHE_CAPACITY`]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
            .unwrap_or_else(|_| unreachable!("default capacity is nonzero"))
    }

    /// Create a cache with the given capacity
    ///
    /// Fails with [`Error::InvalidCapacity`] for a zero capacity.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or(Error::InvalidCapacity)?;
        Ok(Self {
            inner: Mutex::new(CacheInner {
                entries: LruCache::with_hasher(capacity, FxBuildHasher::default()),
                stats: CacheStats::default(),
            }),
        })
    }

    /// Return the compiled matcher for `key`, compiling on first use
    ///
    /// A hit refreshes the entry's recency. A miss compiles, inserts, and
    /// evicts the least-recently-used entry if the cache is full. On compile
    /// failure nothing is inserted.
    pub fn get_or_compile(&self, key: &PatternKey) -> Result<Arc<CompiledMatcher>> {
        let mut inner = self.inner.lock();

        if let Some(matcher) = inner.entries.get(key).cloned() {
            inner.stats.hits += 1;
            return Ok(matcher);
        }

        inner.stats.misses += 1;
        let matcher = Arc::new(compile(key.pattern(), key.flags())?);
        if inner.entries.len() == inner.entries.cap().get() {
            inner.stats.evictions += 1;
        }
        inner.entries.put(key.clone(), Arc::clone(&matcher));
        Ok(matcher)
    }

    /// Whether `key` is resident, without refreshing its recency
    pub fn contains(&self, key: &PatternKey) -> bool {
        self.inner.lock().entries.peek(key).is_some()
    }

    /// Number of compiled patterns currently resident
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// True if no patterns are resident
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of resident patterns
    pub fn capacity(&self) -> usize {
        self.inner.lock().entries.cap().get()
    }

    /// Snapshot of the cache counters
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats
    }

    /// Drop every entry and reset the counters
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.stats = CacheStats::default();
    }
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new()
    }
}
