//! In-memory cache implementation using moka.

use std::hash::Hash;

use moka::future::Cache;
use strata_level::{CacheLevel, Error, Result};

/// An in-memory cache level backed by moka.
///
/// This cache provides concurrent access without external locking and optional
/// capacity-bounded eviction. A read miss resolves to
/// [`Error::NotFound`], per the `CacheLevel` contract.
///
/// Cloning is cheap and produces a handle to the same underlying store.
///
/// # Examples
///
/// ```
/// use strata_memory::InMemoryCache;
/// use strata_level::CacheLevel;
/// # futures::executor::block_on(async {
///
/// let cache = InMemoryCache::<String, i32>::new();
///
/// cache.set(&"key".to_string(), 42).await?;
/// let value = cache.get(&"key".to_string()).await?;
/// assert_eq!(value, 42);
/// # Ok::<(), strata_level::Error>(())
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Cache<K, V>,
}

impl<K, V> Default for InMemoryCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> InMemoryCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates a new unbounded in-memory cache.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_memory::InMemoryCache;
    ///
    /// let cache = InMemoryCache::<String, i32>::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self { inner: Cache::builder().build() }
    }

    /// Creates a new in-memory cache with a maximum capacity.
    ///
    /// Once the capacity is reached, entries are evicted using moka's default
    /// `TinyLFU` policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_memory::InMemoryCache;
    ///
    /// let cache = InMemoryCache::<String, i32>::with_capacity(1000);
    /// ```
    #[must_use]
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self {
            inner: Cache::builder().max_capacity(max_capacity).build(),
        }
    }
}

impl<K, V> CacheLevel<K, V> for InMemoryCache<K, V>
where
    K: Clone + Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Result<V> {
        self.inner.get(key).await.ok_or(Error::NotFound)
    }

    async fn set(&self, key: &K, value: V) -> Result<()> {
        self.inner.insert(key.clone(), value).await;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.inner.invalidate_all();
        Ok(())
    }

    fn on_memory_pressure(&self) {
        tracing::debug!("memory pressure, dropping all entries");
        self.inner.invalidate_all();
    }
}
