#![cfg_attr(docsrs, feature(doc_cfg))]

//! Composable cache decorators with read-side post-processing.
//!
//! This crate provides the decoration layer for cache levels:
//! - [`OneWayTransformer`], an asynchronous, fallible value conversion
//! - [`post_process`], which wraps any [`CacheLevel`] so every successful read is
//!   passed through a transformer while writes bypass it entirely
//! - [`BasicCache`], a generic cache level built from four injected behaviors, so
//!   decorators never need a bespoke type per decoration
//! - [`CacheLevelExt`], chaining sugar for applying decorations left to right
//!
//! The decorated cache is itself a valid [`CacheLevel`] with the same key and
//! value types, so decorations compose: `cache.post_process(t1).post_process(t2)`
//! applies `t1` then `t2` on every read.
//!
//! # Examples
//!
//! ```
//! use strata::{CacheLevelExt, transformer};
//! use strata_level::{CacheLevel, testing::RecordingCache};
//! # futures::executor::block_on(async {
//!
//! let base = RecordingCache::<String, i32>::new();
//! base.set(&"a".to_string(), 10).await?;
//!
//! let doubled = base.post_process(transformer::from_fn(|v: i32| async move { Ok(v * 2) }));
//! assert_eq!(doubled.get(&"a".to_string()).await?, 20);
//! # Ok::<(), strata::Error>(())
//! # });
//! ```
//!
//! # Known limitation
//!
//! Post-processing maps a cache's value type onto itself: the transformer's input
//! and output types must both equal the cache's value type, enforced at compile
//! time. A genuine `V -> W` read transformation would change the decorated
//! cache's value type and is deliberately not provided here.

pub mod basic;
pub mod post_process;
pub mod transformer;

#[doc(inline)]
pub use basic::BasicCache;
#[doc(inline)]
pub use post_process::{CacheLevelExt, post_process};
#[doc(inline)]
pub use strata_level::{CacheLevel, Error, Result};
#[doc(inline)]
pub use transformer::OneWayTransformer;

#[cfg(any(feature = "test-util", test))]
#[doc(inline)]
pub use strata_level::testing::{CacheOp, RecordingCache};
