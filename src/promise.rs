//! This module defines the future adapter: it turns a function returning a
//! future of `Result` into a function returning a future of [`Outcome`].

use crate::outcome::Outcome;
use pin_project::pin_project;
use std::{future::Future, pin::Pin, task};

/// Future adapter built by [`resultify_promise`] (or its alias
/// [`resultify_p`](crate::resultify_p)).
#[derive(Debug, Clone, Copy)]
pub struct ResultifyPromise<P> {
    original: P,
}

/// Wraps a future-returning function. Fulfillment becomes
/// `Outcome::success`, rejection `Outcome::failure`; the fulfilled value is
/// used as `data` verbatim.
///
/// # Examples
///
/// ```
/// use resultify::{resultify_p, resultify_promise};
///
/// # fn main() {
/// # futures::executor::block_on(async {
/// let halve = resultify_promise(|n: u32| async move {
///     if n % 2 == 0 {
///         Ok(n / 2)
///     } else {
///         Err(format!("{} is odd", n))
///     }
/// });
///
/// assert_eq!(halve.call(10).await.data, Some(5));
/// assert_eq!(halve.call(3).await.err.as_deref(), Some("3 is odd"));
/// # });
/// # }
/// ```
pub fn resultify_promise<P, A, F, T, E>(original: P) -> ResultifyPromise<P>
where
    P: Fn(A) -> F,
    F: Future<Output = Result<T, E>>,
{
    tracing::trace!("wrapping future-returning function");
    ResultifyPromise { original }
}

impl<P> ResultifyPromise<P> {
    /// Calls the wrapped function and returns a future of its outcome.
    pub fn call<A, F, T, E>(&self, args: A) -> Settled<F>
    where
        P: Fn(A) -> F,
        F: Future<Output = Result<T, E>>,
    {
        Settled::new((self.original)(args))
    }
}

/// Future mapping the result of an inner future into an [`Outcome`].
#[pin_project]
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct Settled<F> {
    #[pin]
    future: F,
}

impl<F> Settled<F> {
    pub(crate) fn new(future: F) -> Self {
        Self { future }
    }

    /// Gives the inner future back.
    pub fn into_inner(self) -> F {
        self.future
    }
}

impl<F, T, E> Future for Settled<F>
where
    F: Future<Output = Result<T, E>>,
{
    type Output = Outcome<T, E>;

    fn poll(
        self: Pin<&mut Self>,
        ctx: &mut task::Context<'_>,
    ) -> task::Poll<Self::Output> {
        self.project().future.poll(ctx).map(Outcome::from)
    }
}
