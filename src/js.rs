//! Adapters for JavaScript functions, for use from WebAssembly.
//!
//! These mirror the native adapters for dynamically typed
//! [`js_sys::Function`] values. Since the values are untyped, the checks the
//! native adapters get from the type system happen here at construction time
//! and fail with [`ConfigError`]. The calling context (`this`) is forwarded
//! unchanged to the wrapped function.
//!
//! A function may declare its own promise-returning implementation under the
//! `Symbol.for("nodejs.util.promisify.custom")` key, the same marker Node's
//! `util.promisify` honors. The callback adapter detects it when built and
//! then behaves like [`resultify_promise`] over it.
//!
//! # Examples
//!
//! ```no_run
//! use resultify::js;
//! use resultify::js_sys::{Array, Function};
//! use resultify::wasm_bindgen::JsValue;
//!
//! # async fn example() {
//! let original = Function::new_with_args("a, b, cb", "cb(null, a + b);");
//! let add = js::resultify(&original).unwrap();
//! let args = Array::of2(&JsValue::from(1), &JsValue::from(2));
//! let outcome = add.call(&JsValue::UNDEFINED, &args).unwrap().await;
//! assert_eq!(outcome.data.and_then(|data| data.as_f64()), Some(3.0));
//! # }
//! ```

use crate::{
    callback::shared,
    error::ConfigError,
    outcome::Outcome,
    pack::Fields,
    promise::Settled,
};
use js_sys::{Array, Function, Object, Promise, Reflect, Symbol, TypeError};
use std::{future::Future, pin::Pin, task};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Outcome of a JavaScript adapter.
pub type JsOutcome = Outcome<JsValue, JsValue>;

/// Registry key of the symbol marking a custom promise implementation.
pub const CUSTOM_FUTURE_KEY: &str = "nodejs.util.promisify.custom";

// Builds a callback that collects its variadic arguments into one array for
// `done`. Calls after the first are ignored, like a second `resolve`.
const COLLECT_VALUES: &str = "var fired = false; \
     return function () { \
     if (fired) return; \
     fired = true; \
     return done(Array.prototype.slice.call(arguments)); \
     };";

fn callable(value: &JsValue) -> Result<Function, ConfigError> {
    value.dyn_ref::<Function>().cloned().ok_or(ConfigError::NotCallable)
}

/// Reads the custom promise implementation `original` declares, if any. A
/// falsy marker counts as absent. A marker getter that throws is reported as
/// [`ConfigError::MarkerNotCallable`].
pub fn detect(original: &Function) -> Result<Option<Function>, ConfigError> {
    let marker = Reflect::get(original, &Symbol::for_(CUSTOM_FUTURE_KEY))
        .map_err(|_| ConfigError::MarkerNotCallable)?;
    if marker.is_falsy() {
        return Ok(None);
    }
    match callable(&marker) {
        Ok(function) => Ok(Some(function)),
        Err(_) => Err(ConfigError::MarkerNotCallable),
    }
}

#[derive(Debug, Clone)]
enum Plan {
    Callback { original: Function, collect: Function },
    Future(JsResultifyPromise),
}

/// Callback adapter for JavaScript functions, built by [`resultify`] or
/// [`resultify_with_fields`].
#[derive(Debug, Clone)]
pub struct JsResultify {
    plan: Plan,
    fields: Option<Fields>,
}

/// Wraps a JavaScript function following the error-first callback
/// convention.
pub fn resultify(original: &JsValue) -> Result<JsResultify, ConfigError> {
    build(original, None)
}

/// Wraps a JavaScript function following the error-first callback
/// convention, naming the values its callback produces.
pub fn resultify_with_fields(
    original: &JsValue,
    fields: Fields,
) -> Result<JsResultify, ConfigError> {
    build(original, Some(fields))
}

fn build(
    original: &JsValue,
    fields: Option<Fields>,
) -> Result<JsResultify, ConfigError> {
    let original = callable(original)?;
    let plan = match detect(&original)? {
        Some(custom) => {
            tracing::trace!("delegating to the declared promise function");
            Plan::Future(JsResultifyPromise { original: custom })
        },
        None => Plan::Callback {
            original,
            collect: Function::new_with_args("done", COLLECT_VALUES),
        },
    };
    Ok(JsResultify { plan, fields })
}

impl JsResultify {
    /// Applies the wrapped function to `this` and `args`, with the callback
    /// appended.
    ///
    /// A synchronous throw from the wrapped function is returned as `Err`
    /// rather than settled into the outcome.
    pub fn call(
        &self,
        this: &JsValue,
        args: &Array,
    ) -> Result<JsSettle, JsValue> {
        let state = match &self.plan {
            Plan::Future(adapter) => State::Future(adapter.call(this, args)?),
            Plan::Callback { original, collect } => {
                let (notifier, listener) = shared::channel();
                let done = Closure::once_into_js(move |values: Array| {
                    if !notifier.send(values) {
                        tracing::trace!(
                            "callback fired after its future was dropped"
                        );
                    }
                });
                let callback = collect.call1(&JsValue::UNDEFINED, &done)?;
                original.apply(this, &args.concat(&Array::of1(&callback)))?;
                State::Callback { listener, fields: self.fields.clone() }
            },
        };
        Ok(JsSettle { state })
    }
}

enum State {
    Callback {
        listener: shared::Listener<Array>,
        fields: Option<Fields>,
    },
    Future(Settled<JsFuture>),
}

/// Future returned by [`JsResultify::call`].
#[must_use = "futures do nothing unless polled"]
pub struct JsSettle {
    state: State,
}

impl Future for JsSettle {
    type Output = JsOutcome;

    fn poll(
        self: Pin<&mut Self>,
        ctx: &mut task::Context<'_>,
    ) -> task::Poll<Self::Output> {
        match &mut self.get_mut().state {
            State::Callback { listener, fields } => match listener.receive() {
                Some(values) => {
                    task::Poll::Ready(settle_values(values, fields.as_ref()))
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

fn settle_values(values: Array, fields: Option<&Fields>) -> JsOutcome {
    let err = values.shift();
    if err.is_truthy() {
        return Outcome::failure(err);
    }
    match fields {
        Some(fields) if values.length() > 1 => {
            pack_object(fields, &values).into()
        },
        _ => Outcome::success(values.get(0)),
    }
}

fn pack_object(fields: &Fields, values: &Array) -> Result<JsValue, JsValue> {
    let object = Object::new();
    for (name, value) in fields.pack_values(values.iter().collect()) {
        let value = value.unwrap_or(JsValue::UNDEFINED);
        Reflect::set(&object, &JsValue::from_str(&name), &value)?;
    }
    Ok(object.into())
}

/// Promise adapter for JavaScript functions, built by [`resultify_promise`]
/// (or its alias [`resultify_p`]).
#[derive(Debug, Clone)]
pub struct JsResultifyPromise {
    original: Function,
}

/// Wraps a JavaScript function returning a promise (or any thenable).
pub fn resultify_promise(
    original: &JsValue,
) -> Result<JsResultifyPromise, ConfigError> {
    Ok(JsResultifyPromise { original: callable(original)? })
}

pub use self::resultify_promise as resultify_p;

impl JsResultifyPromise {
    /// Applies the wrapped function to `this` and `args` and waits for the
    /// returned value to settle.
    ///
    /// A synchronous throw is returned as `Err`, and so is a `TypeError`
    /// when the returned value is not a thenable.
    pub fn call(
        &self,
        this: &JsValue,
        args: &Array,
    ) -> Result<Settled<JsFuture>, JsValue> {
        let returned = self.original.apply(this, args)?;
        if !is_thenable(&returned) {
            let message = "resultified function did not return a thenable";
            return Err(TypeError::new(message).into());
        }
        Ok(Settled::new(JsFuture::from(Promise::resolve(&returned))))
    }
}

fn is_thenable(value: &JsValue) -> bool {
    if !value.is_object() && !value.is_function() {
        return false;
    }
    Reflect::get(value, &JsValue::from_str("then"))
        .map_or(false, |then| then.is_function())
}

/// Synchronous adapter for JavaScript functions, built by
/// [`resultify_sync`].
#[derive(Debug, Clone)]
pub struct JsResultifySync {
    original: Function,
}

/// Wraps a JavaScript function that fails by throwing.
pub fn resultify_sync(
    original: &JsValue,
) -> Result<JsResultifySync, ConfigError> {
    Ok(JsResultifySync { original: callable(original)? })
}

impl JsResultifySync {
    /// Applies the wrapped function to `this` and `args`; a throw becomes
    /// the outcome's `err`.
    pub fn call(&self, this: &JsValue, args: &Array) -> JsOutcome {
        self.original.apply(this, args).into()
    }
}
