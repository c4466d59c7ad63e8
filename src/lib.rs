//! Adapters that turn error-first callbacks, futures of `Result` and
//! `Result`-returning functions into one uniform [`Outcome`] value, so callers
//! always destructure `Outcome { err, data }`.
//!
//! # Examples
//!
//! ```
//! use resultify::{resultify, resultify_sync, Callback, Outcome};
//!
//! # fn main() {
//! # futures::executor::block_on(async {
//! let add = resultify(|(a, b): (u32, u32), done: Callback<u32, String>| {
//!     done.ok(a + b);
//! });
//! let Outcome { err, data } = add.call((2, 3)).await;
//! assert!(err.is_none());
//! assert_eq!(data, Some(5));
//!
//! let parse = resultify_sync(|text: &str| text.parse::<i32>());
//! let Outcome { err, data } = parse.call("nope");
//! assert!(err.is_some());
//! assert_eq!(data, None);
//! # });
//! # }
//! ```

#![warn(missing_docs)]
#![cfg_attr(feature = "feature-doc-cfg", feature(doc_cfg))]

#[cfg(feature = "js")]
#[doc(hidden)]
pub use js_sys;
#[cfg(feature = "js")]
#[doc(hidden)]
pub use wasm_bindgen;
#[cfg(feature = "js")]
#[doc(hidden)]
pub use wasm_bindgen_futures;

mod error;
mod outcome;

pub mod callback;
pub mod pack;
pub mod panic;
pub mod promise;
pub mod sync;

#[cfg(feature = "js")]
#[cfg_attr(feature = "feature-doc-cfg", doc(cfg(feature = "js")))]
pub mod js;

pub use callback::{
    resultify,
    Callback,
    Convertible,
    FutureImpl,
    IntoConvertible,
    Resultify,
    Settle,
};
pub use error::ConfigError;
pub use outcome::Outcome;
pub use pack::{FieldMap, Fields, First, Pack, Payload};
pub use panic::{resultify_unwind, Panicked, ResultifyUnwind};
pub use promise::{resultify_promise, ResultifyPromise, Settled};
pub use sync::{resultify_sync, ResultifySync};

/// Alias of [`resultify_promise`]: the very same function item.
pub use promise::resultify_promise as resultify_p;
