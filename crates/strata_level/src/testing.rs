//! Recording cache implementation for testing.
//!
//! This module provides [`RecordingCache`], a configurable in-memory cache level
//! that records every operation and supports failure injection for testing error
//! paths and pass-through behavior of decorators.

use std::{collections::HashMap, hash::Hash, sync::Arc};

use parking_lot::Mutex;

use crate::{CacheLevel, Error, Result};

/// Recorded cache operation with full context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheOp<K, V> {
    /// A get operation was performed with the given key.
    Get(K),
    /// A set operation was performed with the given key and value.
    Set {
        /// The key that was written.
        key: K,
        /// The value that was written.
        value: V,
    },
    /// A clear operation was performed.
    Clear,
    /// A memory-pressure notification was delivered.
    MemoryPressure,
}

type FailPredicate<K, V> = Box<dyn Fn(&CacheOp<K, V>) -> bool + Send + Sync>;

/// A configurable recording cache for testing.
///
/// This cache stores values in memory and can be configured to fail operations on
/// demand, making it useful for testing error-handling paths. All operations are
/// recorded for later verification, which is how decorator tests prove that
/// `set`, `clear`, and memory-pressure calls reach the wrapped level untouched.
///
/// Cloning produces a handle to the same underlying store and operation log, so a
/// test can hand one handle to a decorator and keep another to inspect state
/// directly.
///
/// # Examples
///
/// ```no_run
/// use strata_level::{testing::{RecordingCache, CacheOp}, CacheLevel};
///
/// # async fn example() {
/// let cache = RecordingCache::<String, i32>::new();
///
/// // Set and retrieve
/// cache.set(&"key".to_string(), 42).await.unwrap();
/// let value = cache.get(&"key".to_string()).await.unwrap();
/// assert_eq!(value, 42);
///
/// // Verify operations
/// assert_eq!(cache.operations(), vec![
///     CacheOp::Set { key: "key".to_string(), value: 42 },
///     CacheOp::Get("key".to_string()),
/// ]);
/// # }
/// ```
///
/// # Failure Injection
///
/// ```no_run
/// use strata_level::{testing::{RecordingCache, CacheOp}, CacheLevel};
///
/// # async fn example() {
/// let cache: RecordingCache<String, i32> = RecordingCache::new();
///
/// // Fail all get operations
/// cache.fail_when(|op| matches!(op, CacheOp::Get(_)));
/// assert!(cache.get(&"key".to_string()).await.is_err());
///
/// // Fail only specific keys
/// cache.fail_when(|op| matches!(op, CacheOp::Get(k) if k == "forbidden"));
/// assert!(cache.get(&"forbidden".to_string()).await.is_err());
/// # }
/// ```
pub struct RecordingCache<K, V> {
    data: Arc<Mutex<HashMap<K, V>>>,
    operations: Arc<Mutex<Vec<CacheOp<K, V>>>>,
    fail_when: Arc<Mutex<Option<FailPredicate<K, V>>>>,
}

impl<K, V> std::fmt::Debug for RecordingCache<K, V>
where
    K: std::fmt::Debug,
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingCache")
            .field("data", &self.data)
            .field("operations", &self.operations)
            .field("fail_when", &self.fail_when.lock().is_some())
            .finish()
    }
}

impl<K, V> Clone for RecordingCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            operations: Arc::clone(&self.operations),
            fail_when: Arc::clone(&self.fail_when),
        }
    }
}

impl<K, V> Default for RecordingCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecordingCache<K, V> {
    /// Creates a new empty recording cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(HashMap::new())),
            operations: Arc::new(Mutex::new(Vec::new())),
            fail_when: Arc::new(Mutex::new(None)),
        }
    }
}

impl<K, V> RecordingCache<K, V>
where
    K: Eq + Hash,
{
    /// Creates a recording cache with pre-populated data.
    #[must_use]
    pub fn with_data(data: HashMap<K, V>) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
            operations: Arc::new(Mutex::new(Vec::new())),
            fail_when: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns the number of entries in the cache.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.data.lock().len()
    }

    /// Returns true if the cache contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.data.lock().contains_key(key)
    }
}

impl<K, V> RecordingCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Returns a clone of the value stored under `key`, bypassing the
    /// [`CacheLevel`] read path entirely.
    ///
    /// Nothing is recorded and no failure is injected, so tests can assert on
    /// stored state without disturbing the operation log.
    #[must_use]
    pub fn stored(&self, key: &K) -> Option<V> {
        self.data.lock().get(key).cloned()
    }
}

impl<K, V> RecordingCache<K, V>
where
    K: Clone,
    V: Clone,
{
    /// Sets a predicate that determines when operations should fail.
    ///
    /// The predicate receives the operation and returns `true` if it should fail.
    /// Memory-pressure notifications are recorded but never fail, since the hook
    /// has no result to fail with.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_level::testing::{RecordingCache, CacheOp};
    ///
    /// let cache: RecordingCache<String, i32> = RecordingCache::new();
    ///
    /// // Fail all operations
    /// cache.fail_when(|_| true);
    ///
    /// // Fail only gets
    /// cache.fail_when(|op| matches!(op, CacheOp::Get(_)));
    ///
    /// // Fail gets for a specific key
    /// cache.fail_when(|op| matches!(op, CacheOp::Get(k) if k == "bad_key"));
    /// ```
    pub fn fail_when<F>(&self, predicate: F)
    where
        F: Fn(&CacheOp<K, V>) -> bool + Send + Sync + 'static,
    {
        *self.fail_when.lock() = Some(Box::new(predicate));
    }

    /// Clears the failure predicate, allowing all operations to succeed.
    pub fn clear_failures(&self) {
        *self.fail_when.lock() = None;
    }

    /// Returns a clone of all recorded operations.
    #[must_use]
    pub fn operations(&self) -> Vec<CacheOp<K, V>> {
        self.operations.lock().clone()
    }

    /// Clears all recorded operations.
    pub fn clear_operations(&self) {
        self.operations.lock().clear();
    }

    fn record(&self, op: CacheOp<K, V>) {
        self.operations.lock().push(op);
    }

    fn should_fail(&self, op: &CacheOp<K, V>) -> bool {
        self.fail_when.lock().as_ref().is_some_and(|predicate| predicate(op))
    }
}

impl<K, V> CacheLevel<K, V> for RecordingCache<K, V>
where
    K: Clone + Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    async fn get(&self, key: &K) -> Result<V> {
        let op = CacheOp::Get(key.clone());
        if self.should_fail(&op) {
            self.record(op);
            return Err(Error::backend("recording cache: get failed"));
        }
        self.record(op);
        self.data.lock().get(key).cloned().ok_or(Error::NotFound)
    }

    async fn set(&self, key: &K, value: V) -> Result<()> {
        let op = CacheOp::Set {
            key: key.clone(),
            value: value.clone(),
        };
        if self.should_fail(&op) {
            self.record(op);
            return Err(Error::backend("recording cache: set failed"));
        }
        self.record(op);
        self.data.lock().insert(key.clone(), value);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let op = CacheOp::Clear;
        if self.should_fail(&op) {
            self.record(op);
            return Err(Error::backend("recording cache: clear failed"));
        }
        self.record(op);
        self.data.lock().clear();
        Ok(())
    }

    fn on_memory_pressure(&self) {
        self.record(CacheOp::MemoryPressure);
    }
}
