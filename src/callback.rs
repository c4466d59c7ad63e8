//! This module defines the callback adapter: it turns a function following
//! the error-first callback convention into a function returning a future of
//! [`Outcome`].
//!
//! The wrapped function receives its arguments plus a [`Callback`], and fires
//! that callback exactly once, with an optional error and any number of
//! values. Which values end up in `data` is decided by the [`Pack`] strategy
//! of the [`Convertible`] being wrapped.
//!
//! A convertible may also declare its own future-returning implementation
//! ([`Convertible::with_future_impl`]). This is resolved once, when the
//! adapter is built: such adapters never call the callback function and
//! behave exactly like [`resultify_promise`] over that implementation.

pub(crate) mod shared;

use crate::{
    outcome::Outcome,
    pack::{Fields, First, Pack},
    promise::{resultify_promise, ResultifyPromise, Settled},
};
use futures::future::{FutureExt, LocalBoxFuture};
use std::{
    fmt,
    future::Future,
    iter,
    marker::PhantomData,
    pin::Pin,
    rc::Rc,
    task,
};

type BoxedFutureFn<A, T, E> =
    Box<dyn Fn(A) -> LocalBoxFuture<'static, Result<T, E>>>;

struct Reply<V, E> {
    err: Option<E>,
    values: Vec<V>,
}

/// The error-first callback handed to a wrapped function. Firing it consumes
/// it, so it settles its adapter at most once.
///
/// Dropping a callback without firing it leaves the adapter's future pending
/// forever, the same as a callback that is never invoked.
pub struct Callback<V, E> {
    notifier: Option<shared::Notifier<Reply<V, E>>>,
}

impl<V, E> Callback<V, E> {
    fn new(notifier: shared::Notifier<Reply<V, E>>) -> Self {
        Self { notifier: Some(notifier) }
    }

    /// Fires the callback with an optional error and the produced values, in
    /// order. Values are ignored when `err` is set.
    pub fn call<I>(mut self, err: Option<E>, values: I)
    where
        I: IntoIterator<Item = V>,
    {
        if let Some(notifier) = self.notifier.take() {
            let reply = Reply { err, values: values.into_iter().collect() };
            if !notifier.send(reply) {
                tracing::trace!("callback fired after its future was dropped");
            }
        }
    }

    /// Fires the callback with no error and a single value.
    pub fn ok(self, value: V) {
        self.call(None, iter::once(value))
    }

    /// Fires the callback with no error and several values.
    pub fn values<I>(self, values: I)
    where
        I: IntoIterator<Item = V>,
    {
        self.call(None, values)
    }

    /// Fires the callback with an error.
    pub fn fail(self, err: E) {
        self.call(Some(err), iter::empty())
    }

    /// Fires the callback with neither error nor value.
    pub fn done(self) {
        self.call(None, iter::empty())
    }

    /// Fires the callback from a standard result.
    pub fn settle(self, result: Result<V, E>) {
        match result {
            Ok(value) => self.ok(value),
            Err(err) => self.fail(err),
        }
    }
}

impl<V, E> fmt::Debug for Callback<V, E> {
    fn fmt(&self, fmtr: &mut fmt::Formatter) -> fmt::Result {
        fmtr.debug_struct("Callback")
            .field("fired", &self.notifier.is_none())
            .finish()
    }
}

impl<V, E> Drop for Callback<V, E> {
    fn drop(&mut self) {
        if self.notifier.is_some() {
            tracing::warn!(
                "callback dropped without being fired, its future will never \
                 settle"
            );
        }
    }
}

/// A future-returning implementation a convertible function supplies for
/// itself.
pub struct FutureImpl<A, T, E> {
    function: BoxedFutureFn<A, T, E>,
}

impl<A, T, E> FutureImpl<A, T, E> {
    /// Wraps a future-returning function.
    pub fn new<P, F>(function: P) -> Self
    where
        P: Fn(A) -> F + 'static,
        F: Future<Output = Result<T, E>> + 'static,
    {
        Self { function: Box::new(move |args| function(args).boxed_local()) }
    }
}

impl<A, T, E> fmt::Debug for FutureImpl<A, T, E> {
    fn fmt(&self, fmtr: &mut fmt::Formatter) -> fmt::Result {
        fmtr.debug_struct("FutureImpl").finish_non_exhaustive()
    }
}

/// Descriptor of a function following the error-first callback convention,
/// with the construction-time metadata the callback adapter honors: how
/// callback values are packed, and an optional future implementation.
///
/// # Examples
///
/// ```
/// use resultify::{resultify, Callback, Convertible, Fields, Payload};
///
/// # fn main() {
/// # futures::executor::block_on(async {
/// let fields = Fields::new(["quotient", "remainder"]).unwrap();
/// let divide = resultify(Convertible::with_fields(
///     |(a, b): (u32, u32), done: Callback<u32, &'static str>| {
///         if b == 0 {
///             done.fail("division by zero");
///         } else {
///             done.values([a / b, a % b]);
///         }
///     },
///     fields,
/// ));
///
/// let outcome = divide.call((7, 2)).await;
/// let map = outcome.data.and_then(Payload::into_fields).unwrap();
/// assert_eq!(map.get("quotient"), Some(&3));
/// assert_eq!(map.get("remainder"), Some(&1));
/// # });
/// # }
/// ```
pub struct Convertible<C, A, V, E, K = First>
where
    K: Pack<V>,
{
    original: C,
    packer: K,
    future_impl: Option<FutureImpl<A, K::Output, E>>,
    _marker: PhantomData<fn(V)>,
}

impl<C, A, V, E> Convertible<C, A, V, E, First>
where
    C: Fn(A, Callback<V, E>),
{
    /// A convertible whose callback's first value is its payload.
    pub fn new(original: C) -> Self {
        Self {
            original,
            packer: First,
            future_impl: None,
            _marker: PhantomData,
        }
    }
}

impl<C, A, V, E> Convertible<C, A, V, E, Fields>
where
    C: Fn(A, Callback<V, E>),
{
    /// A convertible whose callback values are named by `fields`.
    pub fn with_fields(original: C, fields: Fields) -> Self {
        Self {
            original,
            packer: fields,
            future_impl: None,
            _marker: PhantomData,
        }
    }
}

impl<C, A, V, E, K> Convertible<C, A, V, E, K>
where
    K: Pack<V>,
{
    /// Declares a future-returning implementation that the callback adapter
    /// delegates to instead of firing callbacks.
    pub fn with_future_impl<P, F>(mut self, function: P) -> Self
    where
        P: Fn(A) -> F + 'static,
        F: Future<Output = Result<K::Output, E>> + 'static,
    {
        self.future_impl = Some(FutureImpl::new(function));
        self
    }

    /// Tests whether a future implementation was declared.
    pub fn has_future_impl(&self) -> bool {
        self.future_impl.is_some()
    }
}

impl<C, A, V, E, K> fmt::Debug for Convertible<C, A, V, E, K>
where
    K: Pack<V> + fmt::Debug,
{
    fn fmt(&self, fmtr: &mut fmt::Formatter) -> fmt::Result {
        fmtr.debug_struct("Convertible")
            .field("packer", &self.packer)
            .field("future_impl", &self.future_impl)
            .finish_non_exhaustive()
    }
}

/// Anything [`resultify`] accepts: a bare callback function, or a
/// [`Convertible`] carrying metadata.
pub trait IntoConvertible<A, V, E> {
    /// The callback function type.
    type Original: Fn(A, Callback<V, E>);
    /// The packing strategy.
    type Packer: Pack<V>;

    /// Performs the conversion.
    fn into_convertible(
        self,
    ) -> Convertible<Self::Original, A, V, E, Self::Packer>;
}

impl<C, A, V, E> IntoConvertible<A, V, E> for C
where
    C: Fn(A, Callback<V, E>),
{
    type Original = C;
    type Packer = First;

    fn into_convertible(self) -> Convertible<C, A, V, E, First> {
        Convertible::new(self)
    }
}

impl<C, A, V, E, K> IntoConvertible<A, V, E> for Convertible<C, A, V, E, K>
where
    C: Fn(A, Callback<V, E>),
    K: Pack<V>,
{
    type Original = C;
    type Packer = K;

    fn into_convertible(self) -> Self {
        self
    }
}

enum Plan<C, A, T, E> {
    Callback(C),
    Future(ResultifyPromise<BoxedFutureFn<A, T, E>>),
}

/// Callback adapter built by [`resultify`].
pub struct Resultify<C, A, V, E, K = First>
where
    K: Pack<V>,
{
    plan: Plan<C, A, K::Output, E>,
    packer: Rc<K>,
    _marker: PhantomData<fn(V)>,
}

/// Wraps a function following the error-first callback convention.
///
/// When `original` declares a future implementation, the adapter delegates
/// to [`resultify_promise`] over it; the callback function is then never
/// called.
///
/// # Examples
///
/// ```
/// use resultify::{resultify, Callback};
/// use std::io;
///
/// # fn main() {
/// # futures::executor::block_on(async {
/// let read = resultify(|path: &str, done: Callback<String, io::Error>| {
///     done.settle(std::fs::read_to_string(path));
/// });
///
/// let outcome = read.call("/does/not/exist").await;
/// assert_eq!(outcome.err.unwrap().kind(), io::ErrorKind::NotFound);
/// assert_eq!(outcome.data, None);
/// # });
/// # }
/// ```
pub fn resultify<O, A, V, E>(
    original: O,
) -> Resultify<O::Original, A, V, E, O::Packer>
where
    O: IntoConvertible<A, V, E>,
{
    let convertible = original.into_convertible();
    let plan = match convertible.future_impl {
        Some(future_impl) => {
            tracing::trace!("delegating to the declared future implementation");
            Plan::Future(resultify_promise(future_impl.function))
        },
        None => {
            tracing::trace!("wrapping error-first callback function");
            Plan::Callback(convertible.original)
        },
    };
    Resultify {
        plan,
        packer: Rc::new(convertible.packer),
        _marker: PhantomData,
    }
}

impl<C, A, V, E, K> Resultify<C, A, V, E, K>
where
    C: Fn(A, Callback<V, E>),
    K: Pack<V>,
{
    /// Calls the wrapped function. The returned future settles once the
    /// callback fires (or the future implementation settles).
    ///
    /// A panic raised by the wrapped function before it fires its callback is
    /// not caught and propagates out of this method.
    pub fn call(&self, args: A) -> Settle<V, E, K> {
        let state = match &self.plan {
            Plan::Future(adapter) => State::Future(adapter.call(args)),
            Plan::Callback(original) => {
                let (notifier, listener) = shared::channel();
                original(args, Callback::new(notifier));
                State::Callback { listener, packer: self.packer.clone() }
            },
        };
        Settle { state }
    }

    /// Tests whether calls are delegated to a future implementation.
    pub fn is_delegated(&self) -> bool {
        matches!(self.plan, Plan::Future(_))
    }
}

impl<C, A, V, E, K> fmt::Debug for Resultify<C, A, V, E, K>
where
    K: Pack<V> + fmt::Debug,
{
    fn fmt(&self, fmtr: &mut fmt::Formatter) -> fmt::Result {
        fmtr.debug_struct("Resultify")
            .field("delegated", &matches!(self.plan, Plan::Future(_)))
            .field("packer", &self.packer)
            .finish()
    }
}

enum State<V, E, K>
where
    K: Pack<V>,
{
    Callback {
        listener: shared::Listener<Reply<V, E>>,
        packer: Rc<K>,
    },
    Future(Settled<LocalBoxFuture<'static, Result<K::Output, E>>>),
}

/// Future returned by [`Resultify::call`].
#[must_use = "futures do nothing unless polled"]
pub struct Settle<V, E, K = First>
where
    K: Pack<V>,
{
    state: State<V, E, K>,
}

impl<V, E, K> Future for Settle<V, E, K>
where
    K: Pack<V>,
{
    type Output = Outcome<K::Output, E>;

    fn poll(
        self: Pin<&mut Self>,
        ctx: &mut task::Context<'_>,
    ) -> task::Poll<Self::Output> {
        match &mut self.get_mut().state {
            State::Callback { listener, packer } => match listener.receive() {
                Some(Reply { err: Some(err), .. }) => {
                    tracing::trace!("callback fired with an error");
                    task::Poll::Ready(Outcome::failure(err))
                },
                Some(Reply { err: None, values }) => {
                    tracing::trace!(values = values.len(), "callback fired");
                    task::Poll::Ready(Outcome::settled(packer.pack(values)))
                },
                None => {
                    listener.subscribe(ctx.waker());
                    task::Poll::Pending
                },
            },
            State::Future(settled) => Pin::new(settled).poll(ctx),
        }
    }
}
