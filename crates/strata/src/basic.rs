//! Generic cache level built from injected behaviors.
//!
//! [`BasicCache`] holds the four behaviors of the [`CacheLevel`] contract as
//! stored callables and delegates each method to the corresponding one. It exists
//! so decorators can return a cache level without defining a new named type per
//! decoration.

use futures::future::BoxFuture;
use strata_level::{CacheLevel, Result};

type GetFn<K, V> = Box<dyn Fn(&K) -> BoxFuture<'static, Result<V>> + Send + Sync>;
type SetFn<K, V> = Box<dyn Fn(&K, V) -> BoxFuture<'static, Result<()>> + Send + Sync>;
type ClearFn = Box<dyn Fn() -> BoxFuture<'static, Result<()>> + Send + Sync>;
type MemoryFn = Box<dyn Fn() + Send + Sync>;

/// A cache level assembled from four injected behaviors.
///
/// Each public method invokes the corresponding stored behavior with its
/// arguments and returns the result untouched; there is no validation, retry, or
/// caching of its own, and no mutable state. Decorators such as
/// [`post_process`](crate::post_process) construct one per decoration, capturing
/// the wrapped cache and any collaborators inside the behaviors.
///
/// # Examples
///
/// ```
/// use futures::FutureExt;
/// use strata::BasicCache;
/// use strata_level::{CacheLevel, Error};
/// # futures::executor::block_on(async {
///
/// let cache: BasicCache<String, i32> = BasicCache::new(
///     |key: &String| {
///         let key = key.clone();
///         async move {
///             if key == "answer" { Ok(42) } else { Err(Error::NotFound) }
///         }
///         .boxed()
///     },
///     |_key, _value| async move { Ok(()) }.boxed(),
///     || async move { Ok(()) }.boxed(),
///     || {},
/// );
///
/// assert_eq!(cache.get(&"answer".to_string()).await?, 42);
/// # Ok::<(), Error>(())
/// # });
/// ```
pub struct BasicCache<K, V> {
    get_fn: GetFn<K, V>,
    set_fn: SetFn<K, V>,
    clear_fn: ClearFn,
    memory_fn: MemoryFn,
}

impl<K, V> std::fmt::Debug for BasicCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCache").finish_non_exhaustive()
    }
}

impl<K, V> BasicCache<K, V> {
    /// Creates a cache level from the four behaviors of the contract.
    ///
    /// The behaviors are invoked verbatim by [`CacheLevel::get`],
    /// [`CacheLevel::set`], [`CacheLevel::clear`], and
    /// [`CacheLevel::on_memory_pressure`] respectively.
    #[must_use]
    pub fn new<G, S, C, M>(get_fn: G, set_fn: S, clear_fn: C, memory_fn: M) -> Self
    where
        G: Fn(&K) -> BoxFuture<'static, Result<V>> + Send + Sync + 'static,
        S: Fn(&K, V) -> BoxFuture<'static, Result<()>> + Send + Sync + 'static,
        C: Fn() -> BoxFuture<'static, Result<()>> + Send + Sync + 'static,
        M: Fn() + Send + Sync + 'static,
    {
        Self {
            get_fn: Box::new(get_fn),
            set_fn: Box::new(set_fn),
            clear_fn: Box::new(clear_fn),
            memory_fn: Box::new(memory_fn),
        }
    }
}

impl<K, V> CacheLevel<K, V> for BasicCache<K, V>
where
    K: Send + Sync,
    V: Send,
{
    async fn get(&self, key: &K) -> Result<V> {
        (self.get_fn)(key).await
    }

    async fn set(&self, key: &K, value: V) -> Result<()> {
        (self.set_fn)(key, value).await
    }

    async fn clear(&self) -> Result<()> {
        (self.clear_fn)().await
    }

    fn on_memory_pressure(&self) {
        (self.memory_fn)();
    }
}
