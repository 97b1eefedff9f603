// Dweve Kaplang - Type and Method Definition Language
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Read-through parse cache
//!
//! Editors re-parse the same buffer many times while nothing changes. The
//! cache remembers each parse outcome by consumer and exact source text, so
//! an unchanged buffer is parsed once per consumer.
//!
//! Parsing itself never touches the cache; callers opt in by owning one.
//!
//! # Thread Safety
//!
//! The cache is a cheap-to-clone handle around `Arc<RwLock<..>>`. Clones
//! share entries and statistics.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use kaplang_core::{parse, KaplangResult, ParseOptions, ParseResult};
use tracing::{debug, trace};

/// Default number of cached parse outcomes.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Cache key: who asked, and for which text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Consumer identity. Each consumer is expected to use one options set.
    pub consumer: String,
    /// Exact source text.
    pub source: String,
}

impl CacheKey {
    pub fn new(consumer: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            consumer: consumer.into(),
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    outcome: KaplangResult<ParseResult>,
    access_count: u64,
    last_access: Instant,
}

/// Statistics for cache monitoring
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStatistics {
    pub hits: u64,
    pub misses: u64,
    /// Entries dropped to stay within capacity
    pub evictions: u64,
    pub size: usize,
    pub capacity: usize,
}

impl CacheStatistics {
    /// Hit rate in `0.0..=1.0`; zero before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Thread-safe read-through cache of parse outcomes.
///
/// When full, the entry with the fewest accesses is evicted; ties go to
/// the entry accessed longest ago.
///
/// # Examples
///
/// ```rust
/// use kaplang::{ParseCache, ParseOptions};
///
/// let cache = ParseCache::new(16);
/// let opts = ParseOptions::permissive();
///
/// let first = cache.parse("editor-1", "Point { x: double }", &opts).unwrap();
/// let again = cache.parse("editor-1", "Point { x: double }", &opts).unwrap();
/// assert_eq!(first, again);
///
/// let stats = cache.statistics();
/// assert_eq!((stats.hits, stats.misses), (1, 1));
/// ```
#[derive(Debug, Clone)]
pub struct ParseCache {
    inner: Arc<RwLock<ParseCacheInner>>,
}

#[derive(Debug)]
struct ParseCacheInner {
    entries: HashMap<CacheKey, CacheEntry>,
    capacity: usize,
    stats: CacheStatistics,
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl ParseCache {
    /// Creates a cache holding at most `capacity` outcomes. A capacity of
    /// zero caches nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ParseCacheInner {
                entries: HashMap::with_capacity(capacity),
                capacity,
                stats: CacheStatistics {
                    capacity,
                    ..Default::default()
                },
            })),
        }
    }

    // Entries stay consistent under a poisoned lock: every mutation is a
    // single map or counter update.
    fn read(&self) -> RwLockReadGuard<'_, ParseCacheInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ParseCacheInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the cached outcome for `consumer` and `text`, parsing and
    /// storing it on a miss. Errors are cached like results.
    pub fn parse(
        &self,
        consumer: &str,
        text: &str,
        options: &ParseOptions,
    ) -> KaplangResult<ParseResult> {
        let key = CacheKey::new(consumer, text);
        if let Some(outcome) = self.get(&key) {
            return outcome;
        }
        let outcome = parse(text, options);
        self.insert(key, outcome.clone());
        outcome
    }

    /// Looks up a cached outcome, counting a hit or a miss.
    pub fn get(&self, key: &CacheKey) -> Option<KaplangResult<ParseResult>> {
        let mut inner = self.write();
        match inner.entries.get_mut(key) {
            Some(entry) => {
                entry.access_count += 1;
                entry.last_access = Instant::now();
                let outcome = entry.outcome.clone();
                inner.stats.hits += 1;
                trace!(consumer = %key.consumer, "parse cache hit");
                Some(outcome)
            }
            None => {
                inner.stats.misses += 1;
                trace!(consumer = %key.consumer, "parse cache miss");
                None
            }
        }
    }

    /// Stores an outcome, evicting the least used entry when full.
    pub fn insert(&self, key: CacheKey, outcome: KaplangResult<ParseResult>) {
        let mut inner = self.write();
        if inner.capacity == 0 {
            return;
        }
        if inner.entries.len() >= inner.capacity && !inner.entries.contains_key(&key) {
            if let Some(victim) = inner
                .entries
                .iter()
                .min_by_key(|(_, entry)| (entry.access_count, entry.last_access))
                .map(|(k, _)| k.clone())
            {
                inner.entries.remove(&victim);
                inner.stats.evictions += 1;
                debug!(consumer = %victim.consumer, "parse cache eviction");
            }
        }
        inner.entries.insert(
            key,
            CacheEntry {
                outcome,
                access_count: 1,
                last_access: Instant::now(),
            },
        );
        inner.stats.size = inner.entries.len();
    }

    /// Drops every entry of one consumer, e.g. when its options change.
    pub fn invalidate(&self, consumer: &str) {
        let mut inner = self.write();
        inner.entries.retain(|key, _| key.consumer != consumer);
        inner.stats.size = inner.entries.len();
    }

    /// Clears entries and resets statistics.
    pub fn clear(&self) {
        let mut inner = self.write();
        inner.entries.clear();
        let capacity = inner.capacity;
        inner.stats = CacheStatistics {
            capacity,
            ..Default::default()
        };
    }

    pub fn statistics(&self) -> CacheStatistics {
        self.read().stats.clone()
    }

    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
