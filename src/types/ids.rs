// src/types/ids.rs
use super::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Strong typing for IDs with phantom types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: String,
    _phantom: PhantomData<T>,
}

/// Marker types for different ID kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExportMarker;

/// Human-readable name of an ID kind, used in validation messages.
pub trait IdKind {
    const KIND: &'static str;
}

impl IdKind for PageMarker {
    const KIND: &'static str = "page";
}

impl IdKind for DocMarker {
    const KIND: &'static str = "doc";
}

impl IdKind for ExportMarker {
    const KIND: &'static str = "export request";
}

/// Type aliases for specific ID types
pub type PageId = Id<PageMarker>;
pub type DocId = Id<DocMarker>;
pub type ExportRequestId = Id<ExportMarker>;

/// Characters Coda uses in opaque identifiers (`canvas-Ab3_x`, `AbCdEf12`, ...).
static OPAQUE_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+$").expect("opaque ID regex is valid")
});

/// Doc ID embedded in a browser URL: `https://coda.io/d/Roadmap_dAbC123xyz/...`
static BROWSER_DOC_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/d/(?:[^/?#]*_)?d([A-Za-z0-9_-]+)(?:[/?#]|$)")
        .expect("browser doc URL regex is valid")
});

/// Doc ID embedded in an API URL: `https://coda.io/apis/v1/docs/AbC123xyz/...`
static API_DOC_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/docs/([A-Za-z0-9_-]+)(?:[/?#]|$)").expect("API doc URL regex is valid")
});

impl<T: IdKind> Id<T> {
    /// Parses an opaque Coda identifier.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidId {
                kind: T::KIND,
                reason: "identifier is empty".to_string(),
            });
        }
        if !OPAQUE_ID.is_match(trimmed) {
            return Err(ValidationError::InvalidId {
                kind: T::KIND,
                reason: format!("'{}' contains unsupported characters", trimmed),
            });
        }
        Ok(Self::from_trusted(trimmed.to_string()))
    }
}

impl<T> Id<T> {
    /// Wraps an identifier handed out by the API itself.
    pub(crate) fn from_trusted(value: String) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }

    /// Get the ID as a string reference
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl DocId {
    /// Accepts a bare doc ID, a browser URL or an API URL.
    pub fn from_input(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Self::parse(trimmed);
        }

        API_DOC_ID
            .captures(trimmed)
            .or_else(|| BROWSER_DOC_ID.captures(trimmed))
            .and_then(|captures| captures.get(1))
            .map(|id| Self::from_trusted(id.as_str().to_string()))
            .ok_or_else(|| ValidationError::InvalidId {
                kind: DocMarker::KIND,
                reason: format!("no doc ID found in URL {}", trimmed),
            })
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_trusted(value))
    }
}

/// A page addressed either by ID or by name.
///
/// The API resolves names itself; when several pages share a name the API
/// decides which one wins, so IDs are preferred wherever the caller has one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageIdOrName(String);

impl PageIdOrName {
    pub fn new(input: impl Into<String>) -> Result<Self, ValidationError> {
        let input = input.into();
        if input.trim().is_empty() {
            return Err(ValidationError::EmptyField("pageIdOrName"));
        }
        Ok(Self(input))
    }

    /// Unencoded value; URL builders percent-encode it as a path segment.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&PageId> for PageIdOrName {
    fn from(id: &PageId) -> Self {
        Self(id.as_str().to_string())
    }
}

impl fmt::Display for PageIdOrName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
