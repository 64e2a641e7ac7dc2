#![cfg_attr(docsrs, feature(doc_cfg))]

//! Core cache-level abstractions for building cache backends.
//!
//! This crate defines the [`CacheLevel`] trait that all cache implementations must
//! satisfy, along with the [`Error`] type for fallible operations. A cache level is
//! any key-value store that can fetch, store, and clear values asynchronously and
//! react to memory-pressure notifications.
//!
//! # Overview
//!
//! The cache-level abstraction separates storage concerns from composition features.
//! Implement [`CacheLevel`] for your storage backend, then use `strata` to layer on
//! post-processing and other decorations without touching the backend.
//!
//! Unlike map-style APIs, a read miss is a *failure*: `get` resolves to
//! [`Error::NotFound`] rather than an empty option. This keeps the read path a
//! single success-or-failure outcome that decorators can map over uniformly.
//!
//! # Implementing a Cache Level
//!
//! Implement all required methods of [`CacheLevel`]:
//!
//! ```
//! use strata_level::{CacheLevel, Error};
//! use std::collections::HashMap;
//! use std::sync::RwLock;
//!
//! struct SimpleCache<K, V>(RwLock<HashMap<K, V>>);
//!
//! impl<K, V> CacheLevel<K, V> for SimpleCache<K, V>
//! where
//!     K: Clone + Eq + std::hash::Hash + Send + Sync,
//!     V: Clone + Send + Sync,
//! {
//!     async fn get(&self, key: &K) -> Result<V, Error> {
//!         self.0.read().unwrap().get(key).cloned().ok_or(Error::NotFound)
//!     }
//!
//!     async fn set(&self, key: &K, value: V) -> Result<(), Error> {
//!         self.0.write().unwrap().insert(key.clone(), value);
//!         Ok(())
//!     }
//!
//!     async fn clear(&self) -> Result<(), Error> {
//!         self.0.write().unwrap().clear();
//!         Ok(())
//!     }
//!
//!     fn on_memory_pressure(&self) {
//!         self.0.write().unwrap().clear();
//!     }
//! }
//! ```

pub mod error;
pub(crate) mod level;
#[cfg(any(feature = "test-util", test))]
pub mod testing;

#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use level::CacheLevel;
