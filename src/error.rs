use thiserror::Error;

/// A programmer error detected while building an adapter. These are returned
/// eagerly by constructors and never show up inside an [`Outcome`].
///
/// [`Outcome`]: crate::Outcome
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The value handed to an adapter constructor cannot be called.
    #[error("original must be a function")]
    NotCallable,

    /// A custom future implementation was declared but cannot be called.
    #[error("custom future implementation must be a function")]
    MarkerNotCallable,

    /// A callback field name is empty.
    #[error("callback field name at position {position} is empty")]
    EmptyFieldName {
        /// Position of the offending name in the list.
        position: usize,
    },

    /// A callback field name appears more than once.
    #[error("callback field name {0:?} is declared more than once")]
    DuplicateField(String),
}
