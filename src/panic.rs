//! This module defines the unwind adapter, for functions that report failure
//! by panicking instead of returning `Err`.

use crate::outcome::Outcome;
use std::{any::Any, panic};
use thiserror::Error;

/// Payload of a caught panic.
pub type Payload = Box<dyn Any + Send + 'static>;

/// A panic caught by [`ResultifyUnwind::call`].
#[derive(Debug, Error)]
#[error("operation panicked: {}", describe(.payload))]
pub struct Panicked {
    payload: Payload,
}

fn describe(payload: &Payload) -> &str {
    message(payload).unwrap_or("<non-string payload>")
}

fn message(payload: &Payload) -> Option<&str> {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
}

impl Panicked {
    /// The panic message, when the payload is a string.
    pub fn message(&self) -> Option<&str> {
        message(&self.payload)
    }

    /// Gives the payload back.
    pub fn into_payload(self) -> Payload {
        self.payload
    }

    /// Resumes unwinding with the original payload.
    pub fn resume(self) -> ! {
        panic::resume_unwind(self.payload)
    }
}

/// Unwind adapter built by [`resultify_unwind`].
#[derive(Debug, Clone, Copy)]
pub struct ResultifyUnwind<F> {
    original: F,
}

/// Wraps a function that fails by panicking. The panic hook still runs, so
/// the panic message is reported as usual.
///
/// # Examples
///
/// ```
/// use resultify::resultify_unwind;
///
/// let index = resultify_unwind(|i: usize| [1, 2, 3][i]);
///
/// assert_eq!(index.call(1).data, Some(2));
/// assert!(index.call(7).err.is_some());
/// ```
pub fn resultify_unwind<F, A, T>(original: F) -> ResultifyUnwind<F>
where
    F: Fn(A) -> T,
{
    tracing::trace!("wrapping panicking function");
    ResultifyUnwind { original }
}

impl<F> ResultifyUnwind<F> {
    /// Calls the wrapped function, catching any panic.
    pub fn call<A, T>(&self, args: A) -> Outcome<T, Panicked>
    where
        F: Fn(A) -> T,
    {
        let original = &self.original;
        panic::catch_unwind(panic::AssertUnwindSafe(move || original(args)))
            .map_err(|payload| Panicked { payload })
            .into()
    }
}
