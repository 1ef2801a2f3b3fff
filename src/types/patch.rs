// src/types/patch.rs
//! Sparse field values for partial payloads.

use serde::{Serialize, Serializer};

/// A payload field that is either left out entirely or sent with a value.
///
/// The Coda API treats a missing key differently from an explicit empty
/// value, so payload structs mark every optional field as a `Patch` and
/// skip `Unset` fields during serialization:
///
/// ```ignore
/// #[serde(skip_serializing_if = "Patch::is_unset")]
/// subtitle: Patch<String>,
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Unset,
    Present(T),
}

impl<T> Patch<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Patch::Unset)
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Patch<U> {
        match self {
            Patch::Unset => Patch::Unset,
            Patch::Present(value) => Patch::Present(f(value)),
        }
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Unset
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Patch::Present(value),
            None => Patch::Unset,
        }
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Patch::Present(value) => value.serialize(serializer),
            // Only reachable when a field forgets `skip_serializing_if`.
            Patch::Unset => serializer.serialize_none(),
        }
    }
}
