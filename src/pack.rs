//! This module defines how the values a callback is fired with become the
//! `data` of an [`Outcome`](crate::Outcome).
//!
//! A callback may be fired with any number of values. [`First`] keeps only
//! the first one. [`Fields`] names each position and, when more than one value
//! arrives, packs them into a [`FieldMap`]; a single value is still passed
//! bare, as [`Payload::Value`].

use crate::error::ConfigError;
use std::{collections::HashSet, slice, vec};

/// Strategy turning the ordered values of a callback into the success
/// payload.
pub trait Pack<V> {
    /// The payload type produced.
    type Output;

    /// Builds the payload. `None` means the callback produced no value.
    fn pack(&self, values: Vec<V>) -> Option<Self::Output>;
}

/// Packing strategy keeping the first value bare and discarding the rest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct First;

impl<V> Pack<V> for First {
    type Output = V;

    fn pack(&self, values: Vec<V>) -> Option<V> {
        values.into_iter().next()
    }
}

/// An ordered list of callback field names.
///
/// # Examples
///
/// ```
/// use resultify::Fields;
///
/// let fields = Fields::new(["bytes_read", "buffer"]).unwrap();
/// let map = fields.pack_values(vec![3, 7]);
/// assert_eq!(map.get("bytes_read"), Some(&3));
/// assert_eq!(map.get("buffer"), Some(&7));
///
/// assert!(Fields::new(["a", "a"]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fields {
    names: Vec<String>,
}

impl Fields {
    /// Builds the list, rejecting empty and duplicate names.
    pub fn new<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut seen = HashSet::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(ConfigError::EmptyFieldName { position });
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateField(name.clone()));
            }
        }
        Ok(Self { names })
    }

    /// The declared names, in order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Pairs names and values by position. Names without a value map to
    /// `None`; values without a name are dropped.
    pub fn pack_values<V>(&self, values: Vec<V>) -> FieldMap<V> {
        let mut values = values.into_iter();
        let entries = self
            .names
            .iter()
            .map(|name| (name.clone(), values.next()))
            .collect();
        FieldMap { entries }
    }
}

impl<V> Pack<V> for Fields {
    type Output = Payload<V>;

    fn pack(&self, values: Vec<V>) -> Option<Payload<V>> {
        if values.len() > 1 {
            Some(Payload::Fields(self.pack_values(values)))
        } else {
            values.into_iter().next().map(Payload::Value)
        }
    }
}

/// Success payload of an adapter configured with [`Fields`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload<V> {
    /// The callback produced exactly one value.
    Value(V),
    /// The callback produced several values, packed by name.
    Fields(FieldMap<V>),
}

impl<V> Payload<V> {
    /// The bare value, if this is not a packed mapping.
    pub fn into_value(self) -> Option<V> {
        match self {
            Payload::Value(value) => Some(value),
            Payload::Fields(_) => None,
        }
    }

    /// The packed mapping, if several values were produced.
    pub fn into_fields(self) -> Option<FieldMap<V>> {
        match self {
            Payload::Fields(map) => Some(map),
            Payload::Value(_) => None,
        }
    }

    /// Borrowing version of [`Payload::into_fields`].
    pub fn as_fields(&self) -> Option<&FieldMap<V>> {
        match self {
            Payload::Fields(map) => Some(map),
            Payload::Value(_) => None,
        }
    }
}

/// Named callback values, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap<V> {
    entries: Vec<(String, Option<V>)>,
}

impl<V> FieldMap<V> {
    /// The value under `name`. `None` both for unknown names and for names
    /// the callback gave no value for.
    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.as_ref())
    }

    /// Tests whether `name` is one of the declared fields.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    /// Takes the value under `name` out of the map, leaving the field in
    /// place without value.
    pub fn remove(&mut self, name: &str) -> Option<V> {
        self.entries
            .iter_mut()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.take())
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Tests whether no field was declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over fields and their values.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { inner: self.entries.iter() }
    }
}

impl<V> IntoIterator for FieldMap<V> {
    type Item = (String, Option<V>);
    type IntoIter = vec::IntoIter<(String, Option<V>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'map, V> IntoIterator for &'map FieldMap<V> {
    type Item = (&'map str, Option<&'map V>);
    type IntoIter = Iter<'map, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over a [`FieldMap`].
#[derive(Debug, Clone)]
pub struct Iter<'map, V> {
    inner: slice::Iter<'map, (String, Option<V>)>,
}

impl<'map, V> Iterator for Iter<'map, V> {
    type Item = (&'map str, Option<&'map V>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key.as_str(), value.as_ref()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
