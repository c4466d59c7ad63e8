use std::fmt;

/// The uniform outcome of every adapter: either `err` is set, or the
/// operation succeeded and `data` holds whatever value it produced.
///
/// Adapters never set both fields. `data` may be `None` on success when the
/// wrapped operation completed without producing a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use = "an outcome may carry an error that should be checked"]
pub struct Outcome<T, E> {
    /// The failure reported by the wrapped operation, if any.
    pub err: Option<E>,
    /// The success payload, if any.
    pub data: Option<T>,
}

impl<T, E> Outcome<T, E> {
    /// A successful outcome carrying `data`.
    pub fn success(data: T) -> Self {
        Self { err: None, data: Some(data) }
    }

    /// A successful outcome that carries no value.
    pub fn empty() -> Self {
        Self { err: None, data: None }
    }

    /// A failed outcome carrying `err`.
    pub fn failure(err: E) -> Self {
        Self { err: Some(err), data: None }
    }

    pub(crate) fn settled(data: Option<T>) -> Self {
        Self { err: None, data }
    }

    /// Tests whether the operation succeeded.
    pub fn is_ok(&self) -> bool {
        self.err.is_none()
    }

    /// Tests whether the operation failed.
    pub fn is_err(&self) -> bool {
        self.err.is_some()
    }

    /// Converts back into a standard result. A success without value becomes
    /// `Ok(None)`.
    pub fn into_result(self) -> Result<Option<T>, E> {
        match self.err {
            Some(err) => Err(err),
            None => Ok(self.data),
        }
    }

    /// Maps the success payload, leaving a failure untouched.
    pub fn map<U, F>(self, mapper: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
    {
        Outcome { err: self.err, data: self.data.map(mapper) }
    }

    /// Maps the failure, leaving a success untouched.
    pub fn map_err<G, F>(self, mapper: F) -> Outcome<T, G>
    where
        F: FnOnce(E) -> G,
    {
        Outcome { err: self.err.map(mapper), data: self.data }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::failure(err),
        }
    }
}

impl<T, E> fmt::Display for Outcome<T, E>
where
    T: fmt::Debug,
    E: fmt::Display,
{
    fn fmt(&self, fmtr: &mut fmt::Formatter) -> fmt::Result {
        match (&self.err, &self.data) {
            (Some(err), _) => write!(fmtr, "failed: {}", err),
            (None, Some(data)) => write!(fmtr, "succeeded with {:?}", data),
            (None, None) => write!(fmtr, "succeeded"),
        }
    }
}
