//! Error types for cache operations.

/// An error from a cache-level operation.
///
/// The variants encode the two failure kinds a decorated read can surface — the
/// fetch failed, or the fetch succeeded but a transformer rejected the value —
/// plus an opaque backend variant for everything a store can report on its own.
/// Decorators never inspect or rewrite these; they pass them through unchanged.
///
/// # Example
///
/// ```
/// use strata_level::Error;
///
/// let error = Error::backend("connection reset");
/// assert!(format!("{error:?}").contains("connection reset"));
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The cache holds no value for the requested key.
    #[error("no value found for the requested key")]
    NotFound,

    /// A transformer rejected or failed to convert a fetched value.
    #[error("value transformation rejected: {reason}")]
    TransformRejected {
        /// Why the transformer rejected the value.
        reason: String,
    },

    /// The underlying store reported a failure.
    #[error("cache backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Creates a transform-rejection error with the given reason.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_level::Error;
    ///
    /// let error = Error::transform_rejected("negative input");
    /// ```
    pub fn transform_rejected(reason: impl Into<String>) -> Self {
        Self::TransformRejected { reason: reason.into() }
    }

    /// Creates a backend error from any type that can be converted to an error.
    ///
    /// This is the public API for creating cache errors from backend crates.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_level::Error;
    ///
    /// let error = Error::backend("operation failed");
    /// ```
    pub fn backend(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Backend(cause.into())
    }

    /// Returns `true` if this error is a read miss.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// A specialized [`Result`] type for cache operations.
pub type Result<T> = std::result::Result<T, Error>;
