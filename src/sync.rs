//! This module defines the synchronous adapter: it turns a function
//! returning `Result` into a function returning [`Outcome`], without any
//! suspension point.

use crate::outcome::Outcome;

/// Synchronous adapter built by [`resultify_sync`].
#[derive(Debug, Clone, Copy)]
pub struct ResultifySync<F> {
    original: F,
}

/// Wraps a function that fails by returning `Err`.
///
/// # Examples
///
/// ```
/// use resultify::resultify_sync;
///
/// let parse = resultify_sync(|text: &str| text.parse::<u8>());
///
/// assert_eq!(parse.call("42").data, Some(42));
/// assert!(parse.call("forty-two").err.is_some());
/// ```
pub fn resultify_sync<F, A, T, E>(original: F) -> ResultifySync<F>
where
    F: Fn(A) -> Result<T, E>,
{
    tracing::trace!("wrapping synchronous function");
    ResultifySync { original }
}

impl<F> ResultifySync<F> {
    /// Calls the wrapped function and returns its outcome right away.
    pub fn call<A, T, E>(&self, args: A) -> Outcome<T, E>
    where
        F: Fn(A) -> Result<T, E>,
    {
        (self.original)(args).into()
    }
}
