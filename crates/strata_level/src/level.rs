//! The core trait for cache storage backends.
//!
//! [`CacheLevel`] defines the interface that all cache backends must implement.
//! This trait is designed for composition: implement the storage operations, then
//! use `strata` to layer on read-side post-processing and other decorations.

use crate::Result;

/// Trait for cache-level implementations.
///
/// Implement this trait to create custom cache backends. Decorators in `strata`
/// wrap implementations of this trait and return new implementations of it, so a
/// decorated cache can itself be decorated again.
///
/// All four methods are required: `get`, `set`, `clear`, and `on_memory_pressure`.
/// The first three are asynchronous and fallible; the memory-pressure hook is a
/// synchronous notification with no result.
///
/// Implementations are responsible for their own concurrency control. Callers may
/// share a cache level across tasks and issue overlapping `get`, `set`, and
/// `clear` calls; no serialization is imposed by the trait.
pub trait CacheLevel<K, V>: Send + Sync {
    /// Fetches the value stored under `key`.
    ///
    /// Resolves to [`Error::NotFound`](crate::Error::NotFound) when no value is
    /// stored under the key, and to a backend-specific error when the fetch itself
    /// fails.
    fn get(&self, key: &K) -> impl Future<Output = Result<V>> + Send;

    /// Stores `value` under `key`, returning an error if the operation fails.
    fn set(&self, key: &K, value: V) -> impl Future<Output = Result<()>> + Send;

    /// Removes all stored values, returning an error if the operation fails.
    fn clear(&self) -> impl Future<Output = Result<()>> + Send;

    /// Notifies the cache that the system is under memory pressure.
    ///
    /// Backends typically respond by dropping some or all of their entries. The
    /// hook must not block.
    fn on_memory_pressure(&self);
}
