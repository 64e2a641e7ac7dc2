#![cfg_attr(docsrs, feature(doc_cfg))]

//! In-memory cache level backed by moka.
//!
//! This crate provides [`InMemoryCache`], a reference `CacheLevel` backend for
//! composing with the decorators in `strata`. It is intentionally thin: moka
//! handles concurrency and capacity, and the level adds only the contract's
//! miss-is-a-failure read semantics and the memory-pressure hook.

pub(crate) mod level;

#[doc(inline)]
pub use level::InMemoryCache;
