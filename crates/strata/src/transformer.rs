//! One-way value transformation.
//!
//! A [`OneWayTransformer`] converts a value of one type into another
//! asynchronously, and is allowed to fail. The post-processing decorator applies
//! one to every successful read of a cache level.

use std::marker::PhantomData;

use strata_level::Result;

/// Trait for asynchronous, fallible value conversions.
///
/// The input and output types are associated types rather than a single generic
/// parameter so decorators can constrain them independently. Post-processing
/// requires `Input = Output = V` for a cache with value type `V`; a transformer
/// with mismatched types is rejected at compile time, never at call time.
///
/// Implementations may be shared across many decorated caches and many
/// concurrent reads; `transform` takes `&self` and must be safe to invoke
/// concurrently.
pub trait OneWayTransformer: Send + Sync {
    /// The type accepted by the conversion.
    type Input;

    /// The type produced on success.
    type Output;

    /// Converts `input`, resolving to the converted value or a failure reason.
    fn transform(&self, input: Self::Input) -> impl Future<Output = Result<Self::Output>> + Send;
}

/// A [`OneWayTransformer`] built from a closure returning a future.
///
/// Construct via [`from_fn`].
pub struct FnTransformer<F, In, Out> {
    conversion: F,
    _phantom: PhantomData<fn(In) -> Out>,
}

impl<F, In, Out> std::fmt::Debug for FnTransformer<F, In, Out> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnTransformer").finish_non_exhaustive()
    }
}

/// Creates a transformer from a closure returning a future.
///
/// This is the closure-adapter counterpart of implementing [`OneWayTransformer`]
/// on a named type, convenient for tests and one-off conversions.
///
/// # Examples
///
/// ```
/// use strata::transformer;
/// use strata_level::Error;
///
/// let double = transformer::from_fn(|v: i32| async move { Ok(v * 2) });
///
/// let reject_negative = transformer::from_fn(|v: i32| async move {
///     if v < 0 {
///         Err(Error::transform_rejected("negative input"))
///     } else {
///         Ok(v)
///     }
/// });
/// ```
#[must_use]
pub fn from_fn<F, Fut, In, Out>(conversion: F) -> FnTransformer<F, In, Out>
where
    F: Fn(In) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Out>> + Send,
{
    FnTransformer {
        conversion,
        _phantom: PhantomData,
    }
}

impl<F, Fut, In, Out> OneWayTransformer for FnTransformer<F, In, Out>
where
    F: Fn(In) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Out>> + Send,
{
    type Input = In;
    type Output = Out;

    fn transform(&self, input: In) -> impl Future<Output = Result<Out>> + Send {
        (self.conversion)(input)
    }
}
