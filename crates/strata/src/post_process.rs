//! Read-side post-processing for cache levels.
//!
//! [`post_process`] decorates a [`CacheLevel`] with a [`OneWayTransformer`]: every
//! successful `get` is passed through the transformer before being returned, while
//! `set`, `clear`, and memory-pressure calls reach the wrapped cache untouched.

use std::sync::Arc;

use futures::FutureExt;
use strata_level::CacheLevel;

use crate::basic::BasicCache;
use crate::transformer::OneWayTransformer;

/// Adds a post-processing step to the get results of a cache level.
///
/// As usual, if the transformation fails, the get request also fails.
///
/// The transformer's input and output types must both equal the cache's value
/// type; a mismatch is a compile error. The transformation is never applied when
/// setting values, so what is stored is always the untransformed value and a read
/// after a write re-applies post-processing consistently.
///
/// The returned cache is itself a [`CacheLevel`] with the same key and value
/// types, so it can be decorated again. The wrapped cache and transformer may be
/// shared with other decorations; no additional locking is imposed, and for a
/// single `get` the transformer runs at most once, strictly after a successful
/// fetch.
///
/// # Examples
///
/// ```
/// use strata::{post_process, transformer};
/// use strata_level::{CacheLevel, testing::RecordingCache};
/// # futures::executor::block_on(async {
///
/// let base = RecordingCache::<String, i32>::new();
/// base.set(&"a".to_string(), 10).await?;
///
/// let doubled = post_process(base, transformer::from_fn(|v: i32| async move { Ok(v * 2) }));
/// assert_eq!(doubled.get(&"a".to_string()).await?, 20);
/// # Ok::<(), strata::Error>(())
/// # });
/// ```
#[must_use]
pub fn post_process<K, V, C, T>(cache: C, transformer: T) -> BasicCache<K, V>
where
    K: Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
    C: CacheLevel<K, V> + 'static,
    T: OneWayTransformer<Input = V, Output = V> + 'static,
{
    let cache = Arc::new(cache);
    let transformer = Arc::new(transformer);

    let fetch = Arc::clone(&cache);
    let get_fn = move |key: &K| {
        let cache = Arc::clone(&fetch);
        let transformer = Arc::clone(&transformer);
        let key = key.clone();
        async move {
            let value = cache.get(&key).await?;
            transformer.transform(value).await.inspect_err(|error| {
                tracing::debug!(%error, "post-processing transformer failed");
            })
        }
        .boxed()
    };

    let store = Arc::clone(&cache);
    let set_fn = move |key: &K, value: V| {
        let cache = Arc::clone(&store);
        let key = key.clone();
        async move { cache.set(&key, value).await }.boxed()
    };

    let wipe = Arc::clone(&cache);
    let clear_fn = move || {
        let cache = Arc::clone(&wipe);
        async move { cache.clear().await }.boxed()
    };

    let memory_fn = move || cache.on_memory_pressure();

    BasicCache::new(get_fn, set_fn, clear_fn, memory_fn)
}

/// Chaining sugar for cache decorations.
///
/// Rust has no custom infix operators, so the left-associative composition
/// operator is expressed as a consuming method: `cache.post_process(t1)
/// .post_process(t2)` is equivalent to nesting [`post_process`] calls, and
/// applies `t1` before `t2` on every read.
pub trait CacheLevelExt<K, V>: CacheLevel<K, V> {
    /// Adds a post-processing step to the get results of this cache level.
    ///
    /// See [`post_process`] for the full contract.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata::{CacheLevelExt, transformer};
    /// use strata_level::{CacheLevel, testing::RecordingCache};
    /// # futures::executor::block_on(async {
    ///
    /// let base = RecordingCache::<String, i32>::new();
    /// base.set(&"a".to_string(), 1).await?;
    ///
    /// let chained = base
    ///     .post_process(transformer::from_fn(|v: i32| async move { Ok(v + 1) }))
    ///     .post_process(transformer::from_fn(|v: i32| async move { Ok(v * 10) }));
    ///
    /// // (1 + 1) * 10: the first transformer in the chain runs first.
    /// assert_eq!(chained.get(&"a".to_string()).await?, 20);
    /// # Ok::<(), strata::Error>(())
    /// # });
    /// ```
    fn post_process<T>(self, transformer: T) -> BasicCache<K, V>
    where
        Self: Sized + 'static,
        T: OneWayTransformer<Input = V, Output = V> + 'static,
        K: Clone + Send + Sync + 'static,
        V: Send + Sync + 'static,
    {
        post_process(self, transformer)
    }
}

impl<K, V, C> CacheLevelExt<K, V> for C where C: CacheLevel<K, V> {}
